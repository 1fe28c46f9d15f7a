use std::sync::Arc;

use crate::auth::TokenAuthenticator;
use crate::database::SuperheroStore;

/// Shared collaborators handed to every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SuperheroStore>,
    pub authenticator: Arc<dyn TokenAuthenticator>,
}

impl AppState {
    pub fn new(store: Arc<dyn SuperheroStore>, authenticator: Arc<dyn TokenAuthenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}
