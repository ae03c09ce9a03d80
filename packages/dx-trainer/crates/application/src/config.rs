use anyhow::{Context, Result};
use domain::TestCharacteristics;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = "dx-trainer.toml";

pub const ENV_TEMPLATES: &str = "DX_TRAINER_TEMPLATES";
pub const ENV_STORE: &str = "DX_TRAINER_STORE";
pub const ENV_SEED: &str = "DX_TRAINER_SEED";

/// How much of a new case is folded into its starting posterior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvidencePolicy {
    /// The starting posterior is the normalized prior.
    PriorOnly,
    /// Demographics, symptoms and vitals are folded in at generation.
    #[default]
    FoldPresentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub sensitivity: f64,
    pub specificity: f64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        let fallback = domain::inference::likelihood::FALLBACK_CHARACTERISTICS;
        Self {
            sensitivity: fallback.sensitivity,
            specificity: fallback.specificity,
        }
    }
}

impl From<FallbackConfig> for TestCharacteristics {
    fn from(config: FallbackConfig) -> Self {
        TestCharacteristics::new(config.sensitivity, config.specificity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    pub templates_dir: PathBuf,
    pub store_dir: Option<PathBuf>,
    pub policy: EvidencePolicy,
    pub seed: Option<u64>,
    pub session: String,
    pub fallback: FallbackConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("data/digestive-diseases"),
            store_dir: None,
            policy: EvidencePolicy::default(),
            seed: None,
            session: "default".to_string(),
            fallback: FallbackConfig::default(),
        }
    }
}

impl TrainerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// The explicit path if given, else `dx-trainer.toml` in the working
    /// directory if present, else the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = Path::new(FILE_NAME);
        if local.is_file() {
            tracing::debug!(path = %local.display(), "Using local config");
            return Self::load(local);
        }
        Ok(Self::default())
    }

    /// Apply `DX_TRAINER_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(templates) = lookup(ENV_TEMPLATES) {
            self.templates_dir = PathBuf::from(templates);
        }
        if let Some(store) = lookup(ENV_STORE) {
            self.store_dir = Some(PathBuf::from(store));
        }
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be an unsigned integer, got '{}'", ENV_SEED, seed))?;
            self.seed = Some(seed);
        }
        Ok(())
    }

    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn validate(&self) -> Result<()> {
        let FallbackConfig {
            sensitivity,
            specificity,
        } = self.fallback;
        for (label, value) in [("sensitivity", sensitivity), ("specificity", specificity)] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("Fallback {} must lie in [0, 1], got {}", label, value);
            }
        }
        if self.session.trim().is_empty() {
            anyhow::bail!("Session name must not be empty");
        }
        Ok(())
    }

    pub fn templates_dir(&self) -> PathBuf {
        expand_home(&self.templates_dir)
    }

    pub fn store_dir(&self) -> Option<PathBuf> {
        self.store_dir.as_deref().map(expand_home)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let config: TrainerConfig = toml::from_str(
            r#"
templates_dir = "templates"
store_dir = "/tmp/cases"
policy = "prior-only"
seed = 42
session = "ward-3"

[fallback]
sensitivity = 0.05
specificity = 0.95
"#,
        )
        .unwrap();

        assert_eq!(config.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.store_dir, Some(PathBuf::from("/tmp/cases")));
        assert_eq!(config.policy, EvidencePolicy::PriorOnly);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.session, "ward-3");
        assert_eq!(config.fallback.sensitivity, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: TrainerConfig = toml::from_str("").unwrap();
        assert_eq!(config, TrainerConfig::default());
        assert_eq!(config.policy, EvidencePolicy::FoldPresentation);
        assert_eq!(config.fallback.sensitivity, 0.01);
        assert_eq!(config.fallback.specificity, 0.99);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<TrainerConfig>("polcy = \"prior-only\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_TEMPLATES, "/srv/templates"),
            (ENV_STORE, "/srv/cases"),
            (ENV_SEED, "7"),
        ]
        .into_iter()
        .collect();

        let mut config = TrainerConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.templates_dir, PathBuf::from("/srv/templates"));
        assert_eq!(config.store_dir, Some(PathBuf::from("/srv/cases")));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_bad_seed_override() {
        let mut config = TrainerConfig::default();
        let result = config.apply_overrides(|key| (key == ENV_SEED).then(|| "soon".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_fallback_out_of_range() {
        let mut config = TrainerConfig::default();
        config.fallback.specificity = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        std::fs::write(&path, "seed = 3\npolicy = \"fold-presentation\"\n").unwrap();

        let config = TrainerConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.session, "default");
    }

    #[test]
    fn test_home_expansion() {
        let config = TrainerConfig {
            store_dir: Some(PathBuf::from("~/cases")),
            ..TrainerConfig::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.store_dir(), Some(home.join("cases")));
        }
    }
}
