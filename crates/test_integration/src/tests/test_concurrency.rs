use crate::runner::context::test_context::TestContext;
use crate::test_constants::{OWNER_EMAIL, PASSWORD};
use color_eyre::Result;
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::CreateUser;
use common_services::api::auth::service::create_user;
use common_services::api::event::service::create_event;
use common_services::database::DbError;
use common_services::database::event_store::EventStore;
use common_services::database::user_store::UserStore;
use futures_util::future::join_all;
use std::collections::HashSet;

const RACERS: usize = 8;

pub async fn test_concurrent_registration(context: &TestContext) -> Result<()> {
    // ARRANGE
    let email = "racer@example.com";
    let payloads: Vec<CreateUser> = (0..RACERS)
        .map(|i| CreateUser {
            email: email.to_owned(),
            name: format!("Racer {i}"),
            password: PASSWORD.to_owned(),
        })
        .collect();

    // ACT
    let results = join_all(payloads.iter().map(|p| create_user(&context.pool, p))).await;

    // ASSERT
    let created = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(created, 1, "exactly one registration wins");
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, AuthError::UserAlreadyExists(_)))
    );
    assert!(UserStore::find_by_email(&context.pool, email).await?.is_some());
    Ok(())
}

pub async fn test_concurrent_event_slugs(context: &TestContext) -> Result<()> {
    // ARRANGE
    let owner = UserStore::find_by_email(&context.pool, OWNER_EMAIL)
        .await?
        .expect("owner was registered earlier in the suite");

    // ACT
    let raw_inserts = join_all(
        (0..RACERS).map(|_| EventStore::create(&context.pool, "Race", "race", owner.id)),
    )
    .await;
    let via_service =
        join_all((0..RACERS).map(|_| create_event(&context.pool, "Relay Race", owner.id))).await;

    // ASSERT
    let inserted = raw_inserts.iter().filter(|r| r.is_ok()).count();
    assert_eq!(inserted, 1, "the slug constraint admits one row");
    assert!(
        raw_inserts
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(DbError::is_unique_violation)
    );

    let slugs: Vec<&str> = via_service
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|event| event.slug.as_str())
        .collect();
    assert!(slugs.contains(&"relay-race"));
    let unique: HashSet<&&str> = slugs.iter().collect();
    assert_eq!(unique.len(), slugs.len(), "no two events share a slug");
    Ok(())
}
