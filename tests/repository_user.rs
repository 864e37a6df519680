mod common;

use sqlx::PgPool;
use std::sync::Arc;
use shop_accounts::domain::entities::{NewUser, Role, UserProfile};
use shop_accounts::domain::repositories::UserRepository;
use shop_accounts::error::AppError;
use shop_accounts::infrastructure::persistence::PgUserRepository;

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Ada Lovelace".to_string(),
        email: email.to_string(),
        phone: Some("+441234567".to_string()),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

#[sqlx::test]
async fn test_create_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create(new_user("ada@example.com")).await.unwrap();

    assert!(user.id > 0);
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.phone, Some("+441234567".to_string()));
    assert_eq!(user.role, Role::User);
}

#[sqlx::test]
async fn test_create_duplicate_email_case_insensitive(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    repo.create(new_user("ada@example.com")).await.unwrap();
    let result = repo.create(new_user("ADA@example.com")).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_find_by_email_ignores_case(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let created = repo.create(new_user("ada@example.com")).await.unwrap();

    let found = repo.find_by_email("Ada@Example.com").await.unwrap();

    assert_eq!(found.unwrap().id, created.id);
}

#[sqlx::test]
async fn test_find_by_id_not_found(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    assert!(repo.find_by_id(999_999).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_update_profile(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let user = repo.create(new_user("ada@example.com")).await.unwrap();

    let updated = repo
        .update_profile(
            user.id,
            UserProfile {
                name: "Ada King".to_string(),
                email: "countess@example.com".to_string(),
                phone: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Ada King");
    assert_eq!(updated.email, "countess@example.com");
    assert_eq!(updated.phone, None);
    assert!(updated.updated_at >= user.updated_at);
}

#[sqlx::test]
async fn test_update_profile_email_taken(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let ada = repo.create(new_user("ada@example.com")).await.unwrap();
    repo.create(new_user("grace@example.com")).await.unwrap();

    let result = repo
        .update_profile(
            ada.id,
            UserProfile {
                name: "Ada".to_string(),
                email: "grace@example.com".to_string(),
                phone: None,
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_update_password(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let user = repo.create(new_user("ada@example.com")).await.unwrap();

    assert!(repo.update_password(user.id, "new-hash").await.unwrap());
    assert!(!repo.update_password(999_999, "new-hash").await.unwrap());

    let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.password_hash, "new-hash");
}

#[sqlx::test]
async fn test_delete_user_cascades(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));
    let user = repo.create(new_user("ada@example.com")).await.unwrap();

    sqlx::query(
        "INSERT INTO addresses (user_id, address_line1, postal_code, city, state, country)
         VALUES ($1, '1 Main Street', '12345', 'Springfield', 'Oregon', 'USA')",
    )
    .bind(user.id)
    .execute(&pool)
    .await
    .unwrap();

    assert!(repo.delete(user.id).await.unwrap());
    assert!(!repo.delete(user.id).await.unwrap());
    assert_eq!(common::address_count(&pool, user.id).await, 0);
}

#[sqlx::test]
async fn test_list_and_count(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    repo.create(new_user("ada@example.com")).await.unwrap();
    repo.create(new_user("grace@example.com")).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
    assert_eq!(repo.list().await.unwrap().len(), 2);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    assert!(repo.ping().await.is_ok());

    pool.close().await;
    assert!(matches!(repo.ping().await, Err(AppError::Internal { .. })));
}
