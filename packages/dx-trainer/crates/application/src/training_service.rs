use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use domain::inference::posterior;
use domain::{
    Case, CaseGenerator, CaseStore, DiseaseCatalog, Distribution, Evidence, LikelihoodEngine,
    PosteriorUpdater, TestCharacteristics, TestSimulator,
};
use infrastructure::TemplateDirectory;

use crate::config::{EvidencePolicy, TrainerConfig};
use crate::error::TrainingError;
use crate::format::title_case;
use crate::view::{CaseView, DiagnosisVerdict, TestReport};

/// The diagnostic-training workflow: draw a case, order tests, diagnose.
///
/// State lives entirely in the `CaseStore`, keyed by session. Every
/// mutating operation holds that session's guard from load to save.
pub struct TrainingService<S: CaseStore> {
    catalog: Arc<DiseaseCatalog>,
    store: S,
    rng: Mutex<StdRng>,
    sessions: Mutex<HashMap<String, Arc<Mutex<()>>>>,
    policy: EvidencePolicy,
    fallback: TestCharacteristics,
}

impl<S: CaseStore> TrainingService<S> {
    pub fn new(catalog: Arc<DiseaseCatalog>, store: S) -> Self {
        Self {
            catalog,
            store,
            rng: Mutex::new(StdRng::from_entropy()),
            sessions: Mutex::new(HashMap::new()),
            policy: EvidencePolicy::default(),
            fallback: domain::inference::likelihood::FALLBACK_CHARACTERISTICS,
        }
    }

    /// Load the catalog named by `config` and wire it to `store`.
    pub fn from_config(config: &TrainerConfig, store: S) -> Result<Self> {
        let templates_dir = config.templates_dir();
        let catalog = TemplateDirectory::new(templates_dir.clone())
            .load()
            .with_context(|| {
                format!(
                    "Failed to load disease templates from {}",
                    templates_dir.display()
                )
            })?;
        tracing::info!(diseases = catalog.len(), "Catalog loaded");

        let mut service = Self::new(Arc::new(catalog), store)
            .with_policy(config.policy)
            .with_fallback(config.fallback.into());
        if let Some(seed) = config.seed {
            service = service.with_seed(seed);
        }
        Ok(service)
    }

    pub fn with_policy(mut self, policy: EvidencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_fallback(mut self, fallback: TestCharacteristics) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn catalog(&self) -> &DiseaseCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> EvidencePolicy {
        self.policy
    }

    /// Draw a new case for `session`, replacing any case already there.
    pub fn new_case(&self, session: &str) -> Result<CaseView, TrainingError> {
        let lock = self.session_lock(session);
        let _guard = hold(&lock);

        let mut case = CaseGenerator::generate(&self.catalog, &mut *self.rng())?;

        if self.policy == EvidencePolicy::FoldPresentation {
            let likelihoods = self.likelihoods(&Evidence::presentation(&case));
            PosteriorUpdater::update_case(&mut case, &likelihoods)?;
        }

        tracing::debug!(session, disease = %case.hidden_disease, "Hidden disease drawn");
        tracing::info!(session, policy = ?self.policy, "New case generated");

        self.store.save(session, &case)?;
        Ok(CaseView::from(&case))
    }

    pub fn current_case(&self, session: &str) -> Result<CaseView, TrainingError> {
        self.load(session).map(|case| CaseView::from(&case))
    }

    /// Run a test on the session's case and fold its result into the posterior.
    pub fn order_test(&self, session: &str, test_name: &str) -> Result<TestReport, TrainingError> {
        let test_name = test_name.trim();
        if test_name.is_empty() {
            return Err(TrainingError::EmptyTestName);
        }

        let lock = self.session_lock(session);
        let _guard = hold(&lock);

        let mut case = self.load(session)?;
        let result = TestSimulator::run_test(&self.catalog, &mut case, test_name, &mut *self.rng())?;

        let likelihoods = LikelihoodEngine::new(&self.catalog)
            .with_fallback(self.fallback)
            .likelihood_of_test(test_name, &result);
        PosteriorUpdater::update_case(&mut case, &likelihoods)?;

        if posterior::is_degenerate(&case.probabilities) {
            tracing::warn!(session, test = test_name, "No disease fits the evidence");
        }
        tracing::info!(session, test = test_name, "Test ordered");

        self.store.save(session, &case)?;
        Ok(TestReport {
            test_name: test_name.to_string(),
            result,
        })
    }

    /// Compare `guess` with the hidden disease. The case stays stored.
    pub fn submit_diagnosis(
        &self,
        session: &str,
        guess: &str,
    ) -> Result<DiagnosisVerdict, TrainingError> {
        let lock = self.session_lock(session);
        let _guard = hold(&lock);

        let case = self.load(session)?;
        let submitted = guess.trim();
        let correct = submitted.to_lowercase() == case.hidden_disease.trim().to_lowercase();

        let feedback = if correct {
            "Correct!".to_string()
        } else {
            format!(
                "Incorrect. The correct answer was '{}'.",
                title_case(&case.hidden_disease.replace('_', " "))
            )
        };
        tracing::info!(session, correct, "Diagnosis submitted");

        Ok(DiagnosisVerdict {
            correct,
            submitted: submitted.to_string(),
            feedback,
        })
    }

    /// Drop the session's case. Returns whether one existed.
    pub fn reset(&self, session: &str) -> Result<bool, TrainingError> {
        let lock = self.session_lock(session);
        let _guard = hold(&lock);

        let removed = self.store.remove(session)?;
        tracing::info!(session, removed, "Session reset");
        Ok(removed)
    }

    pub fn available_tests(&self) -> Vec<String> {
        self.catalog.available_tests()
    }

    /// Highest-posterior disease, or `None` when no disease fits.
    pub fn most_likely(case: &CaseView) -> Option<(&str, f64)> {
        posterior::most_likely(&case.probabilities)
    }

    /// Per-disease likelihood of `evidence` under the configured fallback.
    pub fn likelihoods(&self, evidence: &Evidence) -> Distribution {
        LikelihoodEngine::new(&self.catalog)
            .with_fallback(self.fallback)
            .likelihood_of_evidence_batch(evidence)
    }

    fn load(&self, session: &str) -> Result<Case, TrainingError> {
        self.store
            .load(session)?
            .ok_or_else(|| TrainingError::NoActiveCase(session.to_string()))
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // A panic mid-draw leaves the generator usable.
        hold(&self.rng)
    }

    /// Guard for `session`. Entries are never evicted, so every caller of
    /// a session shares the same mutex.
    fn session_lock(&self, session: &str) -> Arc<Mutex<()>> {
        hold(&self.sessions)
            .entry(session.to_string())
            .or_default()
            .clone()
    }
}

fn hold<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
