use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered participant, keyed by wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub wallet_address: String,
    pub name: Option<String>,
    pub email: Option<String>,
}
