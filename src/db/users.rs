use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, sqlx::Error>;
    async fn find_by_wallet_address(&self, wallet_address: &str) -> Result<Option<User>, sqlx::Error>;
    /// Upsert keyed by wallet address.
    async fn save(&self, user: User) -> Result<User, sqlx::Error>;
}

#[derive(Clone)]
pub struct SqliteUserRepository {
    db: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT wallet_address, name, email FROM users ORDER BY wallet_address")
            .fetch_all(&self.db)
            .await
    }

    async fn find_by_wallet_address(&self, wallet_address: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT wallet_address, name, email FROM users WHERE wallet_address = ?")
            .bind(wallet_address)
            .fetch_optional(&self.db)
            .await
    }

    async fn save(&self, user: User) -> Result<User, sqlx::Error> {
        sqlx::query(
            "INSERT INTO users (wallet_address, name, email) VALUES (?, ?, ?) \
             ON CONFLICT(wallet_address) DO UPDATE SET name = excluded.name, email = excluded.email"
        )
        .bind(&user.wallet_address)
        .bind(&user.name)
        .bind(&user.email)
        .execute(&self.db)
        .await?;

        Ok(user)
    }
}
