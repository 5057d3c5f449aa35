//! Integration tests for the statistics aggregator: per-state counts,
//! overdue detection, the zero-filled monthly trend, category distribution,
//! filters, and idempotence.

use chrono::{Duration, Utc};
use faultdesk_core::roles::{ROLE_REPORTER, ROLE_TECHNICIAN};
use faultdesk_core::stats::TREND_MONTHS;
use faultdesk_core::types::{DbId, Timestamp};
use sqlx::SqlitePool;

use faultdesk_db::engine::LifecycleEngine;
use faultdesk_db::models::report::{CreateReport, TransitionReport};
use faultdesk_db::models::stats::StatsFilter;
use faultdesk_db::models::status::{PrioritySeed, StateSeed};
use faultdesk_db::models::user::CreateUser;
use faultdesk_db::repositories::{StatsRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &SqlitePool, name: &str, email: &str, role: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            role: Some(role.to_string()),
        },
        Utc::now(),
    )
    .await
    .unwrap()
    .id
}

fn report_in_category(category_id: DbId) -> CreateReport {
    CreateReport {
        building_id: None,
        room_id: None,
        location_detail: None,
        category_id,
        subcategory: None,
        title: None,
        description: "Something is broken".to_string(),
        priority_id: None,
    }
}

/// Backdate a report's creation, bypassing the engine (tests only).
async fn backdate(pool: &SqlitePool, report_id: DbId, created_at: Timestamp) {
    sqlx::query("UPDATE reports SET created_at = $2 WHERE id = $1")
        .bind(report_id)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn empty_set_yields_a_zeroed_summary(pool: SqlitePool) {
    let stats = StatsRepo::dashboard(&pool, &StatsFilter::default(), 7, Utc::now())
        .await
        .unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.received, 0);
    assert_eq!(stats.in_process, 0);
    assert_eq!(stats.resolved, 0);
    assert_eq!(stats.cancelled, 0);
    assert_eq!(stats.overdue, 0);
    assert_eq!(stats.today, 0);
    assert!(stats.by_category.is_empty());
    assert_eq!(stats.monthly.len(), TREND_MONTHS, "trend is zero-filled, not empty");
    assert!(stats.monthly.iter().all(|bucket| bucket.count == 0));
}

#[sqlx::test(migrations = "../../migrations")]
async fn counts_follow_states_and_categories(pool: SqlitePool) {
    let reporter = new_user(&pool, "Stats Reporter", "st1@faultdesk.test", ROLE_REPORTER).await;
    let tech = new_user(&pool, "Stats Tech", "st2@faultdesk.test", ROLE_TECHNICIAN).await;
    let engine = LifecycleEngine::default();

    // Two electrical, one furniture.
    engine.create_report(&pool, reporter, &report_in_category(1)).await.unwrap();
    let second = engine.create_report(&pool, reporter, &report_in_category(1)).await.unwrap();
    engine.create_report(&pool, reporter, &report_in_category(3)).await.unwrap();

    engine
        .transition(
            &pool,
            second.id,
            tech,
            &TransitionReport {
                state_id: StateSeed::Resolved.id(),
                priority_id: PrioritySeed::Medium.id(),
                assignee_id: None,
                comment: None,
                expected_version: None,
            },
        )
        .await
        .unwrap();

    let stats = StatsRepo::dashboard(&pool, &StatsFilter::default(), 7, Utc::now())
        .await
        .unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.received, 2);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.in_process, 0);
    assert_eq!(stats.today, 3);

    // Category distribution is descending by count.
    assert_eq!(stats.by_category.len(), 2);
    assert_eq!(stats.by_category[0].category, "Electrical");
    assert_eq!(stats.by_category[0].count, 2);
    assert_eq!(stats.by_category[1].category, "Furniture");
    assert_eq!(stats.by_category[1].count, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn overdue_counts_stale_initial_state_reports(pool: SqlitePool) {
    let reporter = new_user(&pool, "Overdue Reporter", "st3@faultdesk.test", ROLE_REPORTER).await;
    let tech = new_user(&pool, "Overdue Tech", "st4@faultdesk.test", ROLE_TECHNICIAN).await;
    let engine = LifecycleEngine::default();
    let now = Utc::now();

    // Ten days old and still Received: overdue.
    let stale = engine.create_report(&pool, reporter, &report_in_category(1)).await.unwrap();
    backdate(&pool, stale.id, now - Duration::days(10)).await;

    // Ten days old but already being worked on: not overdue.
    let in_process = engine.create_report(&pool, reporter, &report_in_category(1)).await.unwrap();
    backdate(&pool, in_process.id, now - Duration::days(10)).await;
    engine
        .transition(
            &pool,
            in_process.id,
            tech,
            &TransitionReport {
                state_id: StateSeed::InProcess.id(),
                priority_id: PrioritySeed::Medium.id(),
                assignee_id: None,
                comment: None,
                expected_version: None,
            },
        )
        .await
        .unwrap();

    // Fresh and Received: not overdue yet.
    engine.create_report(&pool, reporter, &report_in_category(1)).await.unwrap();

    let stats = StatsRepo::dashboard(&pool, &StatsFilter::default(), 7, now).await.unwrap();
    assert_eq!(stats.overdue, 1);

    // A wider window clears it.
    let stats = StatsRepo::dashboard(&pool, &StatsFilter::default(), 30, now).await.unwrap();
    assert_eq!(stats.overdue, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn monthly_trend_is_dense_and_chronological(pool: SqlitePool) {
    let reporter = new_user(&pool, "Trend Reporter", "st5@faultdesk.test", ROLE_REPORTER).await;
    let engine = LifecycleEngine::default();
    let now = Utc::now();

    // One report this month, one about two months back.
    engine.create_report(&pool, reporter, &report_in_category(1)).await.unwrap();
    let old = engine.create_report(&pool, reporter, &report_in_category(1)).await.unwrap();
    backdate(&pool, old.id, now - Duration::days(65)).await;

    let stats = StatsRepo::dashboard(&pool, &StatsFilter::default(), 7, now).await.unwrap();

    assert_eq!(stats.monthly.len(), TREND_MONTHS);
    // Chronological: each bucket strictly follows the previous.
    for pair in stats.monthly.windows(2) {
        assert!(
            (pair[0].year, pair[0].month) < (pair[1].year, pair[1].month),
            "buckets must be in chronological order"
        );
    }
    assert_eq!(stats.monthly.last().unwrap().count, 1, "current month has one report");
    assert_eq!(
        stats.monthly.iter().map(|b| b.count).sum::<i64>(),
        2,
        "both reports fall inside the trend window"
    );
    assert!(
        stats.monthly.iter().filter(|b| b.count == 0).count() >= TREND_MONTHS - 2,
        "months without reports are zero-filled"
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn filters_narrow_the_aggregation(pool: SqlitePool) {
    let alice = new_user(&pool, "Alice", "st6@faultdesk.test", ROLE_REPORTER).await;
    let bob = new_user(&pool, "Bob", "st7@faultdesk.test", ROLE_REPORTER).await;
    let engine = LifecycleEngine::default();

    engine.create_report(&pool, alice, &report_in_category(1)).await.unwrap(); // infrastructure
    engine.create_report(&pool, alice, &report_in_category(5)).await.unwrap(); // it
    engine.create_report(&pool, bob, &report_in_category(5)).await.unwrap(); // it

    let alice_stats = StatsRepo::dashboard(
        &pool,
        &StatsFilter { reporter_id: Some(alice), dashboard_type: None },
        7,
        Utc::now(),
    )
    .await
    .unwrap();
    assert_eq!(alice_stats.total, 2);

    let it_stats = StatsRepo::dashboard(
        &pool,
        &StatsFilter { reporter_id: None, dashboard_type: Some("it".to_string()) },
        7,
        Utc::now(),
    )
    .await
    .unwrap();
    assert_eq!(it_stats.total, 2);
    assert_eq!(it_stats.by_category.len(), 1);
    assert_eq!(it_stats.by_category[0].category, "Network");

    let both = StatsRepo::dashboard(
        &pool,
        &StatsFilter { reporter_id: Some(bob), dashboard_type: Some("it".to_string()) },
        7,
        Utc::now(),
    )
    .await
    .unwrap();
    assert_eq!(both.total, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn statistics_are_idempotent(pool: SqlitePool) {
    let reporter = new_user(&pool, "Idem Reporter", "st8@faultdesk.test", ROLE_REPORTER).await;
    let engine = LifecycleEngine::default();

    engine.create_report(&pool, reporter, &report_in_category(1)).await.unwrap();
    engine.create_report(&pool, reporter, &report_in_category(3)).await.unwrap();

    let now = Utc::now();
    let first = StatsRepo::dashboard(&pool, &StatsFilter::default(), 7, now).await.unwrap();
    let second = StatsRepo::dashboard(&pool, &StatsFilter::default(), 7, now).await.unwrap();

    assert_eq!(first, second, "no intervening writes, identical results");
}
