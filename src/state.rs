// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::auth::session::SessionSigner;
use crate::backend::StoreApi;
use crate::cart::session::ShopperSessions;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn StoreApi>,
    pub sessions: ShopperSessions,
    pub signer: SessionSigner,
}

impl AppState {
    pub fn new(api: Arc<dyn StoreApi>, config: &Config) -> Self {
        Self {
            api,
            sessions: ShopperSessions::new(Duration::from_secs(config.cart_idle_secs)),
            signer: SessionSigner::new(config.session_secret.clone(), config.session_ttl_secs),
        }
    }
}
