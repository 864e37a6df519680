mod common;

use sqlx::PgPool;
use std::sync::Arc;
use tokio::task::JoinSet;
use shop_accounts::domain::entities::NewAddress;
use shop_accounts::domain::repositories::AddressRepository;
use shop_accounts::error::AppError;
use shop_accounts::infrastructure::persistence::PgAddressRepository;

const LIMIT: i64 = 10;

fn repo(pool: &PgPool) -> PgAddressRepository {
    PgAddressRepository::new(Arc::new(pool.clone()))
}

fn new_address(user_id: i64, line1: &str) -> NewAddress {
    NewAddress {
        user_id,
        details: common::details(line1),
    }
}

async fn add(repo: &PgAddressRepository, user_id: i64, line1: &str) -> i64 {
    repo.create_within_limit(new_address(user_id, line1), LIMIT)
        .await
        .unwrap()
        .id
}

#[sqlx::test]
async fn test_create_then_find_round_trip(pool: PgPool) {
    let user = common::create_test_user(&pool, "ada@example.com").await;
    let repo = repo(&pool);

    let created = repo
        .create_within_limit(new_address(user.id, "10 Downing Street"), LIMIT)
        .await
        .unwrap();

    assert!(!created.is_default);

    let found = repo.find_by_id(created.id, user.id).await.unwrap().unwrap();

    assert_eq!(found, created);
    assert_eq!(found.details(), common::details("10 Downing Street"));
}

#[sqlx::test]
async fn test_create_stops_at_limit(pool: PgPool) {
    let user = common::create_test_user(&pool, "ada@example.com").await;
    let repo = repo(&pool);

    for i in 0..LIMIT {
        add(&repo, user.id, &format!("{i} Limit Street")).await;
    }

    let result = repo
        .create_within_limit(new_address(user.id, "11 Limit Street"), LIMIT)
        .await;

    match result {
        Err(AppError::Validation { details, .. }) => assert_eq!(details["limit"], LIMIT),
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(common::address_count(&pool, user.id).await, LIMIT);
}

#[sqlx::test]
async fn test_concurrent_creates_respect_limit(pool: PgPool) {
    let user = common::create_test_user(&pool, "ada@example.com").await;
    let repo = Arc::new(repo(&pool));
    let user_id = user.id;

    let mut tasks = JoinSet::new();
    for i in 0..25 {
        let repo = repo.clone();
        tasks.spawn(async move {
            repo.create_within_limit(new_address(user_id, &format!("{i} Race Street")), LIMIT)
                .await
        });
    }

    let mut created = 0;
    let mut rejected = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::Validation { .. }) => rejected += 1,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    assert_eq!(created, LIMIT);
    assert_eq!(rejected, 25 - LIMIT);
    assert_eq!(common::address_count(&pool, user.id).await, LIMIT);
}

#[sqlx::test]
async fn test_create_for_missing_user_is_not_found(pool: PgPool) {
    let repo = repo(&pool);

    let result = repo
        .create_within_limit(new_address(424242, "1 Nowhere Lane"), LIMIT)
        .await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_list_by_user(pool: PgPool) {
    let ada = common::create_test_user(&pool, "ada@example.com").await;
    let grace = common::create_test_user(&pool, "grace@example.com").await;
    let repo = repo(&pool);

    let first = add(&repo, ada.id, "1 First Street").await;
    let second = add(&repo, ada.id, "2 Second Street").await;
    add(&repo, grace.id, "3 Third Street").await;

    assert_eq!(common::address_count(&pool, ada.id).await, 2);

    let ids: Vec<i64> = repo
        .list_by_user(ada.id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[sqlx::test]
async fn test_other_users_address_is_invisible(pool: PgPool) {
    let ada = common::create_test_user(&pool, "ada@example.com").await;
    let grace = common::create_test_user(&pool, "grace@example.com").await;
    let repo = repo(&pool);

    let id = add(&repo, ada.id, "1 First Street").await;

    assert!(repo.find_by_id(id, grace.id).await.unwrap().is_none());
    assert!(
        repo.update(id, grace.id, common::details("Hijacked Road"))
            .await
            .unwrap()
            .is_none()
    );
    assert!(!repo.delete(id, grace.id).await.unwrap());

    let untouched = repo.find_by_id(id, ada.id).await.unwrap().unwrap();
    assert_eq!(untouched.address_line1, "1 First Street");
}

#[sqlx::test]
async fn test_update_keeps_default_flag(pool: PgPool) {
    let user = common::create_test_user(&pool, "ada@example.com").await;
    let repo = repo(&pool);
    let id = add(&repo, user.id, "1 First Street").await;
    repo.set_default(id, user.id).await.unwrap();

    let updated = repo
        .update(id, user.id, common::details("99 New Street"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.address_line1, "99 New Street");
    assert!(updated.is_default);
}

#[sqlx::test]
async fn test_set_default_leaves_exactly_one(pool: PgPool) {
    let user = common::create_test_user(&pool, "ada@example.com").await;
    let repo = repo(&pool);

    let a = add(&repo, user.id, "1 First Street").await;
    let b = add(&repo, user.id, "2 Second Street").await;
    add(&repo, user.id, "3 Third Street").await;

    repo.set_default(a, user.id).await.unwrap();
    assert_eq!(common::default_address_ids(&pool, user.id).await, vec![a]);

    repo.set_default(b, user.id).await.unwrap();
    assert_eq!(common::default_address_ids(&pool, user.id).await, vec![b]);

    // Idempotent
    repo.set_default(b, user.id).await.unwrap();
    assert_eq!(common::default_address_ids(&pool, user.id).await, vec![b]);
}

#[sqlx::test]
async fn test_set_default_wrong_owner_rolls_back(pool: PgPool) {
    let ada = common::create_test_user(&pool, "ada@example.com").await;
    let grace = common::create_test_user(&pool, "grace@example.com").await;
    let repo = repo(&pool);

    let ada_addr = add(&repo, ada.id, "1 First Street").await;
    let grace_addr = add(&repo, grace.id, "2 Second Street").await;
    repo.set_default(grace_addr, grace.id).await.unwrap();

    let result = repo.set_default(ada_addr, grace.id).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    assert_eq!(
        common::default_address_ids(&pool, grace.id).await,
        vec![grace_addr]
    );
    assert!(common::default_address_ids(&pool, ada.id).await.is_empty());
}

#[sqlx::test]
async fn test_set_default_does_not_touch_other_users(pool: PgPool) {
    let ada = common::create_test_user(&pool, "ada@example.com").await;
    let grace = common::create_test_user(&pool, "grace@example.com").await;
    let repo = repo(&pool);

    let ada_addr = add(&repo, ada.id, "1 First Street").await;
    let grace_addr = add(&repo, grace.id, "2 Second Street").await;
    repo.set_default(grace_addr, grace.id).await.unwrap();

    repo.set_default(ada_addr, ada.id).await.unwrap();

    assert_eq!(
        common::default_address_ids(&pool, grace.id).await,
        vec![grace_addr]
    );
}

#[sqlx::test]
async fn test_set_default_touches_previous_default(pool: PgPool) {
    let user = common::create_test_user(&pool, "ada@example.com").await;
    let repo = repo(&pool);
    let a = add(&repo, user.id, "1 First Street").await;
    let b = add(&repo, user.id, "2 Second Street").await;
    repo.set_default(a, user.id).await.unwrap();

    let before = repo.find_by_id(a, user.id).await.unwrap().unwrap().updated_at;
    repo.set_default(b, user.id).await.unwrap();
    let after = repo.find_by_id(a, user.id).await.unwrap().unwrap();

    assert!(!after.is_default);
    assert!(after.updated_at > before);
}

#[sqlx::test]
async fn test_second_default_rejected_by_index(pool: PgPool) {
    let user = common::create_test_user(&pool, "ada@example.com").await;
    let repo = repo(&pool);
    let a = add(&repo, user.id, "1 First Street").await;
    let b = add(&repo, user.id, "2 Second Street").await;
    repo.set_default(a, user.id).await.unwrap();

    let result = sqlx::query("UPDATE addresses SET is_default = TRUE WHERE id = $1")
        .bind(b)
        .execute(&pool)
        .await;

    assert!(result.is_err());
}

#[sqlx::test]
async fn test_delete_does_not_affect_other_users(pool: PgPool) {
    let ada = common::create_test_user(&pool, "ada@example.com").await;
    let grace = common::create_test_user(&pool, "grace@example.com").await;
    let repo = repo(&pool);

    let ada_addr = add(&repo, ada.id, "1 First Street").await;
    let grace_addr = add(&repo, grace.id, "2 Second Street").await;
    add(&repo, grace.id, "3 Third Street").await;
    repo.set_default(grace_addr, grace.id).await.unwrap();

    assert!(repo.delete(ada_addr, ada.id).await.unwrap());

    assert_eq!(common::address_count(&pool, ada.id).await, 0);
    assert_eq!(common::address_count(&pool, grace.id).await, 2);
    assert_eq!(
        common::default_address_ids(&pool, grace.id).await,
        vec![grace_addr]
    );
}
