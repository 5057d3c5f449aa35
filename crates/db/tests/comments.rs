//! Integration tests for the comment subsystem: visibility, threading,
//! editing, soft delete, and the derived last-public-action field.

use chrono::Utc;
use faultdesk_core::comment::{VISIBILITY_INTERNAL, VISIBILITY_PUBLIC};
use faultdesk_core::roles::{ROLE_REPORTER, ROLE_TECHNICIAN};
use faultdesk_core::types::DbId;
use sqlx::SqlitePool;

use faultdesk_db::engine::LifecycleEngine;
use faultdesk_db::models::comment::CreateComment;
use faultdesk_db::models::report::CreateReport;
use faultdesk_db::models::user::CreateUser;
use faultdesk_db::repositories::{CommentRepo, ReportRepo, UserRepo};

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

async fn new_report(pool: &SqlitePool, reporter: DbId) -> DbId {
    LifecycleEngine::default()
        .create_report(
            pool,
            reporter,
            &CreateReport {
                building_id: None,
                room_id: None,
                location_detail: None,
                category_id: 1,
                subcategory: None,
                title: None,
                description: "Door handle came off".to_string(),
                priority_id: None,
            },
        )
        .await
        .unwrap()
        .id
}

fn public_comment(body: &str) -> CreateComment {
    CreateComment {
        body: body.to_string(),
        visibility: None,
        parent_comment_id: None,
    }
}

fn internal_comment(body: &str) -> CreateComment {
    CreateComment {
        body: body.to_string(),
        visibility: Some(VISIBILITY_INTERNAL.to_string()),
        parent_comment_id: None,
    }
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn visibility_defaults_to_public_and_filters_apply(pool: SqlitePool) {
    let reporter = new_user(&pool, "C Reporter", "c1@faultdesk.test", ROLE_REPORTER).await;
    let tech = new_user(&pool, "C Tech", "c2@faultdesk.test", ROLE_TECHNICIAN).await;
    let report_id = new_report(&pool, reporter).await;

    let public = CommentRepo::create(&pool, report_id, reporter, &public_comment("When will this be fixed?"), Utc::now())
        .await
        .unwrap();
    assert_eq!(public.visibility, VISIBILITY_PUBLIC);

    CommentRepo::create(&pool, report_id, tech, &internal_comment("Parts ordered, ETA Friday"), Utc::now())
        .await
        .unwrap();

    let reporter_view = CommentRepo::list_by_report(&pool, report_id, false).await.unwrap();
    assert_eq!(reporter_view.len(), 1);
    assert_eq!(reporter_view[0].body, "When will this be fixed?");

    let staff_view = CommentRepo::list_by_report(&pool, report_id, true).await.unwrap();
    assert_eq!(staff_view.len(), 2);
    assert_eq!(staff_view[0].author_name, "C Tech", "newest first");
}

// ---------------------------------------------------------------------------
// Last public action
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn last_public_action_ignores_internal_and_deleted(pool: SqlitePool) {
    let reporter = new_user(&pool, "C Reporter2", "c3@faultdesk.test", ROLE_REPORTER).await;
    let tech = new_user(&pool, "C Tech2", "c4@faultdesk.test", ROLE_TECHNICIAN).await;
    let report_id = new_report(&pool, reporter).await;

    CommentRepo::create(&pool, report_id, tech, &public_comment("Inspected the door"), Utc::now())
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let latest = CommentRepo::create(&pool, report_id, tech, &public_comment("Handle replaced"), Utc::now())
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    CommentRepo::create(&pool, report_id, tech, &internal_comment("Invoice filed"), Utc::now())
        .await
        .unwrap();

    let action = CommentRepo::last_public_action(&pool, report_id)
        .await
        .unwrap()
        .expect("a public comment exists");
    assert_eq!(action.id, latest.id, "internal notes never become the last action");

    // The detail view carries the same derived field.
    let detail = ReportRepo::find_detail_by_id(&pool, report_id).await.unwrap().unwrap();
    assert_eq!(detail.last_public_action.as_deref(), Some("Handle replaced"));

    // Deleting the newest public comment falls back to the previous one.
    CommentRepo::soft_delete(&pool, latest.id).await.unwrap();
    let action = CommentRepo::last_public_action(&pool, report_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(action.body, "Inspected the door");
}

// ---------------------------------------------------------------------------
// Editing and deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn editing_marks_the_comment_edited(pool: SqlitePool) {
    let reporter = new_user(&pool, "C Reporter3", "c5@faultdesk.test", ROLE_REPORTER).await;
    let report_id = new_report(&pool, reporter).await;

    let comment = CommentRepo::create(&pool, report_id, reporter, &public_comment("Tpyo here"), Utc::now())
        .await
        .unwrap();
    assert!(!comment.is_edited);

    let edited = CommentRepo::edit(&pool, comment.id, "Typo here", Utc::now())
        .await
        .unwrap()
        .expect("comment exists");
    assert!(edited.is_edited);
    assert!(edited.edited_at.is_some());
    assert_eq!(edited.body, "Typo here");
}

#[sqlx::test(migrations = "../../migrations")]
async fn soft_deleted_comments_vanish_from_reads(pool: SqlitePool) {
    let reporter = new_user(&pool, "C Reporter4", "c6@faultdesk.test", ROLE_REPORTER).await;
    let report_id = new_report(&pool, reporter).await;

    let comment = CommentRepo::create(&pool, report_id, reporter, &public_comment("Remove me"), Utc::now())
        .await
        .unwrap();

    assert!(CommentRepo::soft_delete(&pool, comment.id).await.unwrap());
    assert!(!CommentRepo::soft_delete(&pool, comment.id).await.unwrap(), "second delete is a no-op");

    assert!(CommentRepo::find_by_id(&pool, comment.id).await.unwrap().is_none());
    assert!(CommentRepo::list_by_report(&pool, report_id, true).await.unwrap().is_empty());
    assert!(
        CommentRepo::edit(&pool, comment.id, "Too late", Utc::now()).await.unwrap().is_none(),
        "deleted comments cannot be edited"
    );
}

// ---------------------------------------------------------------------------
// Threading
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn replies_thread_under_their_parent(pool: SqlitePool) {
    let reporter = new_user(&pool, "C Reporter5", "c7@faultdesk.test", ROLE_REPORTER).await;
    let tech = new_user(&pool, "C Tech3", "c8@faultdesk.test", ROLE_TECHNICIAN).await;
    let report_id = new_report(&pool, reporter).await;

    let parent = CommentRepo::create(&pool, report_id, reporter, &public_comment("Any update?"), Utc::now())
        .await
        .unwrap();

    let reply = CreateComment {
        body: "Scheduled for tomorrow morning".to_string(),
        visibility: None,
        parent_comment_id: Some(parent.id),
    };
    CommentRepo::create(&pool, report_id, tech, &reply, Utc::now()).await.unwrap();

    let thread = CommentRepo::list_thread(&pool, parent.id).await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].body, "Scheduled for tomorrow morning");
    assert_eq!(thread[0].parent_comment_id, Some(parent.id));
}
