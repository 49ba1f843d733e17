use std::sync::Arc;

use {parlance_domain::Domain, parlance_nlg::TemplatedGenerator};

/// Shared app state: the once-loaded domain and the generator built from it.
/// Read-only after startup, so requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub domain: Arc<Domain>,
    pub generator: Arc<TemplatedGenerator>,
}

impl AppState {
    pub fn new(domain: Domain) -> Self {
        let generator = TemplatedGenerator::from_domain(&domain);
        Self {
            domain: Arc::new(domain),
            generator: Arc::new(generator),
        }
    }
}
