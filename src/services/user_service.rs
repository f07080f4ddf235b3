use std::sync::Arc;

use tracing::info;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::services::Outcome;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn register(&self, user: User) -> Result<User, AppError> {
        let user = self.repo.save(user).await?;
        info!("saved user {}", user.wallet_address);
        Ok(user)
    }

    pub async fn find_user(&self, wallet_address: &str) -> Result<Outcome<User>, AppError> {
        Ok(Outcome::from_option(
            self.repo.find_by_wallet_address(wallet_address).await?,
        ))
    }

    pub async fn list_users(&self) -> Result<Outcome<Vec<User>>, AppError> {
        Ok(Outcome::from_list(self.repo.find_all().await?))
    }
}
