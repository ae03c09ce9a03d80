use anyhow::Result;
use std::path::PathBuf;

use dx_trainer::application::{TrainerConfig, TrainingService};
use dx_trainer::infrastructure::FileCaseStore;

use crate::core::error::CliError;
use crate::GlobalArgs;

/// Resolved configuration for one invocation.
pub struct AppContext {
    pub config: TrainerConfig,
}

impl AppContext {
    /// Defaults, then the config file, then `DX_TRAINER_*`, then flags.
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let mut config = TrainerConfig::discover(args.config.as_deref())
            .map_err(|e| CliError::Config(format!("{:#}", e)))?;
        config
            .apply_env()
            .map_err(|e| CliError::Config(format!("{:#}", e)))?;

        if let Some(templates) = &args.templates {
            config.templates_dir = templates.clone();
        }
        if let Some(session) = &args.session {
            config.session = session.clone();
        }
        if let Some(seed) = args.seed {
            config.seed = Some(seed);
        }
        config
            .validate()
            .map_err(|e| CliError::Config(format!("{:#}", e)))?;

        tracing::debug!(?config, "Resolved configuration");
        Ok(Self { config })
    }

    pub fn session(&self) -> &str {
        &self.config.session
    }

    pub fn service(&self) -> Result<TrainingService<FileCaseStore>> {
        let store = match self.config.store_dir() {
            Some(dir) => FileCaseStore::new(dir),
            None => FileCaseStore::default_location()?,
        };
        TrainingService::from_config(&self.config, store)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.config.templates_dir()
    }
}
