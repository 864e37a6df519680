//! PostgreSQL implementation of address repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Address, AddressDetails, NewAddress};
use crate::domain::repositories::AddressRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for shipping addresses.
///
/// Every statement carries `user_id = $n` so ownership is enforced by the
/// query itself. The default flag is swapped inside a transaction.
pub struct PgAddressRepository {
    pool: Arc<PgPool>,
}

impl PgAddressRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn create_within_limit(
        &self,
        new_address: NewAddress,
        limit: i64,
    ) -> Result<Address, AppError> {
        let user_id = new_address.user_id;
        let d = new_address.details;

        let mut tx = self.pool.begin().await?;

        // Serializes concurrent creates for the same owner.
        let owner: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        if owner.is_none() {
            tx.rollback().await?;
            return Err(AppError::not_found("User not found", json!({"id": user_id})));
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        if count >= limit {
            tx.rollback().await?;
            return Err(AppError::bad_request(
                format!("User can't have more than {limit} addresses"),
                json!({"limit": limit}),
            ));
        }

        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (user_id, address_line1, address_line2, postal_code, city, state, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, address_line1, address_line2, postal_code, city, state, country,
                      is_default, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(d.address_line1)
        .bind(d.address_line2)
        .bind(d.postal_code)
        .bind(d.city)
        .bind(d.state)
        .bind(d.country)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(address)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Address>, AppError> {
        let rows = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, user_id, address_line1, address_line2, postal_code, city, state, country,
                   is_default, created_at, updated_at
            FROM addresses
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Address>, AppError> {
        let row = sqlx::query_as::<_, Address>(
            r#"
            SELECT id, user_id, address_line1, address_line2, postal_code, city, state, country,
                   is_default, created_at, updated_at
            FROM addresses
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        details: AddressDetails,
    ) -> Result<Option<Address>, AppError> {
        let row = sqlx::query_as::<_, Address>(
            r#"
            UPDATE addresses SET
                address_line1 = $3,
                address_line2 = $4,
                postal_code   = $5,
                city          = $6,
                state         = $7,
                country       = $8,
                updated_at    = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, address_line1, address_line2, postal_code, city, state, country,
                      is_default, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(details.address_line1)
        .bind(details.address_line2)
        .bind(details.postal_code)
        .bind(details.city)
        .bind(details.state)
        .bind(details.country)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn set_default(&self, id: i64, user_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent swaps for the same owner.
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE addresses SET is_default = FALSE, updated_at = NOW() \
             WHERE user_id = $1 AND is_default AND id <> $2",
        )
        .bind(user_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            "UPDATE addresses SET is_default = TRUE, updated_at = NOW() WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(
                "Address not found",
                json!({"id": id, "user_id": user_id}),
            ));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
