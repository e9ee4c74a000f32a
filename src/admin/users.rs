use tracing::{info, instrument, warn};

use crate::backend::StoreApi;
use crate::error::AppError;
use crate::models::user::User;

#[derive(Debug, Clone, Default)]
pub struct UsersView {
    users: Vec<User>,
}

impl UsersView {
    pub async fn load(api: &dyn StoreApi) -> Result<Self, AppError> {
        Ok(Self {
            users: api.list_users().await?,
        })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Drops the row locally once the backend accepted the delete; no re-fetch.
    #[instrument(skip(self, api))]
    pub async fn delete(&mut self, api: &dyn StoreApi, id: i64) -> Result<(), AppError> {
        if let Err(e) = api.delete_user(id).await {
            warn!(error = %e, "User delete failed");
            return Err(e);
        }
        self.users.retain(|u| u.id != id);
        info!("User deleted");
        Ok(())
    }
}
