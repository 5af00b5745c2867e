use std::{fmt, sync::Arc};

use bookstore_config::Config;
use bookstore_core::application::AppUnitOfWork;

#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<AppUnitOfWork>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("unit_of_work", &self.unit_of_work)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(unit_of_work: AppUnitOfWork, config: Config) -> Self {
        Self {
            unit_of_work: Arc::new(unit_of_work),
            config: Arc::new(config),
        }
    }

    pub fn unit_of_work(&self) -> &AppUnitOfWork {
        &self.unit_of_work
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
