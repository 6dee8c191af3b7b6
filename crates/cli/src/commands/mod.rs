//! CLI command implementations.
//!
//! One module per command group; each command is one self-contained view
//! of the store. Every command builds its own [`Context`] from the
//! environment, checks the session gate before fetching anything, and
//! exits after a single round of work.

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod pos;
pub mod sales;

use medipos_client::api::ApiClient;
use medipos_client::session::SessionStore;
use medipos_client::{AppError, ClientConfig};

/// Everything a command needs: configuration, the backend client, and the
/// session store.
pub struct Context {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub store: SessionStore,
}

impl Context {
    /// Build the command context from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        let config = ClientConfig::from_env()?;
        let api = ApiClient::new(&config)?;
        let store = SessionStore::new(config.session_file.clone());

        Ok(Self { config, api, store })
    }
}
