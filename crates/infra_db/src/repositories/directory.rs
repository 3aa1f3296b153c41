//! Phone directory adapter
//!
//! Stand-in for the hosted identity provider's phone lookup. A phone that is
//! not registered is a normal `false`, never an error.

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{DirectoryError, PhoneDirectory};

/// `PhoneDirectory` adapter over the client_profiles table
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhoneDirectory for DirectoryRepository {
    async fn phone_exists(&self, phone: &str) -> Result<bool, DirectoryError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM client_profiles WHERE phone = $1)")
                .bind(phone)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DirectoryError::LookupFailed(e.to_string()))?;

        Ok(exists.0)
    }
}
