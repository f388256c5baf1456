//! Integration tests for the `PostgreSQL` stores.
//!
//! Run with: `DATABASE_URL=... cargo test -p riskline-db --features integration`

#![cfg(feature = "integration")]

mod common;

use chrono::Utc;
use riskline_trail::{
    event_types, Actor, AuditLogInput, AuditStore, NewAuditEvent, RiskProfileStore, UserId,
};
use serde_json::json;
use sqlx::Executor;

use common::{payload, TestContext};

#[tokio::test]
async fn test_settings_update_is_persisted() {
    let ctx = TestContext::new().await;
    let before = Utc::now();

    ctx.audit
        .log(
            AuditLogInput::new("settings.update", "changed retention period")
                .actor(Actor::with_id("u1")),
        )
        .await
        .unwrap();

    let events = ctx.audit.list_recent(10).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "settings.update");
    assert_eq!(events[0].actor, Actor::with_id("u1"));
    assert!(events[0].metadata.is_empty());
    assert!(events[0].created_at >= before - chrono::Duration::seconds(5));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_list_recent_most_recent_first_and_bounded() {
    let ctx = TestContext::new().await;

    for i in 0..8 {
        ctx.audit
            .log(
                AuditLogInput::new(event_types::CASE_UPDATED, "update")
                    .entity("case", format!("C-{i}")),
            )
            .await
            .unwrap();
    }

    let events = ctx.audit.list_recent(3).await.unwrap();
    let ids: Vec<_> = events.iter().filter_map(|e| e.entity_id.clone()).collect();
    assert_eq!(ids, vec!["C-7", "C-6", "C-5"]);
    assert_eq!(ctx.audit.list_recent(100).await.unwrap().len(), 8);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_audit_rows_cannot_be_mutated() {
    let ctx = TestContext::new().await;

    ctx.audit_store
        .append(NewAuditEvent::new(event_types::CASE_CREATED, "create"))
        .await
        .unwrap();

    let update = ctx
        .pool
        .inner()
        .execute("UPDATE audit_logs SET action = 'tampered'")
        .await;
    assert!(update.is_err());

    let delete = ctx.pool.inner().execute("DELETE FROM audit_logs").await;
    assert!(delete.is_err());

    assert_eq!(ctx.audit_store.count().await.unwrap(), 1);
    assert_eq!(ctx.audit_store.list_recent(1).await.unwrap()[0].action, "create");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_metadata_round_trips_through_jsonb() {
    let ctx = TestContext::new().await;
    let metadata = payload(json!({ "before": { "priority": "low" }, "after": { "priority": "high" } }));

    ctx.audit
        .log(
            AuditLogInput::new(event_types::CASE_UPDATED, "reprioritize")
                .entity("case", "C-1")
                .actor(Actor::with_id("analyst-1").email("a1@example.com").ip("10.0.0.1"))
                .metadata(metadata.clone()),
        )
        .await
        .unwrap();

    let event = &ctx.audit.list_recent(1).await.unwrap()[0];
    assert_eq!(event.metadata, metadata);
    assert_eq!(event.actor.actor_email.as_deref(), Some("a1@example.com"));
    assert_eq!(event.actor.ip_address.as_deref(), Some("10.0.0.1"));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_profile_upsert_merges() {
    let ctx = TestContext::new().await;

    let first = ctx
        .risk
        .upsert("u42", payload(json!({ "score": 0.8 })))
        .await
        .unwrap();
    let second = ctx
        .risk
        .upsert("u42", payload(json!({ "flag": "reviewed" })))
        .await
        .unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);

    let profile = ctx.risk.find_by_user_id("u42").await.unwrap().unwrap();
    assert_eq!(profile.number("score"), Some(0.8));
    assert_eq!(profile.field("flag"), Some(&json!("reviewed")));
    assert_eq!(ctx.profile_store.count().await.unwrap(), 1);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_store_upsert_drops_reserved_keys() {
    let ctx = TestContext::new().await;
    let user_id = UserId::parse("u1").unwrap();

    let profile = ctx
        .profile_store
        .upsert(
            &user_id,
            payload(json!({ "userId": "other", "createdAt": "1970-01-01T00:00:00Z", "score": 0.9 })),
        )
        .await
        .unwrap();
    assert!(profile.field("userId").is_none());
    assert!(profile.field("createdAt").is_none());

    let merged = ctx
        .profile_store
        .upsert(&user_id, payload(json!({ "userId": "other", "flag": "x" })))
        .await
        .unwrap();
    assert_eq!(merged.fields.len(), 2);

    let value = serde_json::to_value(&merged).unwrap();
    assert_eq!(value["userId"], "u1");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_unknown_profile_is_absent() {
    let ctx = TestContext::new().await;
    assert!(ctx.risk.find_by_user_id("unknown").await.unwrap().is_none());
    ctx.cleanup().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_upserts_yield_one_row() {
    let ctx = TestContext::new().await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let risk = ctx.risk.clone();
            tokio::spawn(async move {
                risk.upsert("race-user", payload(json!({ format!("signal{i}"): i })))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(ctx.profile_store.count().await.unwrap(), 1);
    let profile = ctx.risk.find_by_user_id("race-user").await.unwrap().unwrap();
    assert_eq!(profile.fields.len(), 16);

    ctx.cleanup().await;
}
