use domain::{Case, CaseStore, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local case store. Cases vanish when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryCaseStore {
    cases: RwLock<HashMap<String, Case>>,
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cases.read().map(|cases| cases.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CaseStore for InMemoryCaseStore {
    fn load(&self, session: &str) -> Result<Option<Case>, StoreError> {
        let cases = self.cases.read().map_err(|_| StoreError::Poisoned)?;
        Ok(cases.get(session).cloned())
    }

    fn save(&self, session: &str, case: &Case) -> Result<(), StoreError> {
        let mut cases = self.cases.write().map_err(|_| StoreError::Poisoned)?;
        cases.insert(session.to_string(), case.clone());
        Ok(())
    }

    fn remove(&self, session: &str) -> Result<bool, StoreError> {
        let mut cases = self.cases.write().map_err(|_| StoreError::Poisoned)?;
        Ok(cases.remove(session).is_some())
    }
}
