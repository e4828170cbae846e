//! HTTP tests for project create, edit and delete.

mod common;

use axum::http::StatusCode;
use common::{body_text, flash_cookie, get, location, post_form, seed_project};
use sqlx::SqlitePool;
use tabula_db::repositories::ProjectRepo;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_form_lists_lookups(pool: SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let response = get(common::build_test_app(pool, dir.path()), "/projects/create").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("New project"));
    assert!(html.contains(">In Progress<"));
    assert!(html.contains(">Critical<"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_persists_and_redirects(pool: SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path());

    let response = post_form(
        app,
        "/projects",
        &[("name", "  Apollo  "), ("status_id", "2"), ("category_id", ""), ("priority_id", "3")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/projects");
    assert_eq!(
        flash_cookie(&response),
        "tabula_flash=Project+created+with+success."
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE name = 'Apollo'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_create_rerenders_with_messages(pool: SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path());

    let response = post_form(app, "/projects", &[("name", ""), ("status_id", "99")]).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("The name field is required."));
    assert!(html.contains("The selected status id is invalid."));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_form_is_filled_from_record(pool: SqlitePool) {
    let id = seed_project(&pool, "Gemini", 3, Some(2), None).await;
    let dir = tempfile::tempdir().unwrap();

    let response = get(
        common::build_test_app(pool, dir.path()),
        &format!("/projects/{id}/edit"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"value="Gemini""#));
    assert!(html.contains(r#"<option value="3" selected>Completed</option>"#));
    assert!(html.contains(r#"<option value="2" selected>Client</option>"#));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_of_missing_project_is_404(pool: SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let response = get(common::build_test_app(pool, dir.path()), "/projects/4242/edit").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_writes_every_field(pool: SqlitePool) {
    let id = seed_project(&pool, "Gemini", 3, Some(2), Some(1)).await;
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path());

    let response = post_form(
        app,
        &format!("/projects/{id}"),
        &[("name", "Gemini II"), ("status_id", "1"), ("category_id", ""), ("priority_id", "4")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/projects");

    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(project.name, "Gemini II");
    assert_eq!(project.status_id, 1);
    assert_eq!(project.category_id, None);
    assert_eq!(project.priority_id, Some(4));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_update_leaves_record_unchanged(pool: SqlitePool) {
    let id = seed_project(&pool, "Gemini", 3, None, None).await;
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool.clone(), dir.path());

    let response = post_form(
        app,
        &format!("/projects/{id}"),
        &[("name", "Renamed"), ("status_id", "two")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("The status id field must be a number."));
    // Old input is kept in the form.
    assert!(html.contains(r#"value="Renamed""#));

    let project = ProjectRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(project.name, "Gemini");
    assert_eq!(project.status_id, 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_removes_and_redirects(pool: SqlitePool) {
    let id = seed_project(&pool, "Skylab", 1, None, None).await;
    let dir = tempfile::tempdir().unwrap();

    let response = post_form(
        common::build_test_app(pool.clone(), dir.path()),
        &format!("/projects/{id}/delete"),
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/projects");
    assert_eq!(flash_cookie(&response), "tabula_flash=Deleted");
    assert!(ProjectRepo::find_by_id(&pool, id).await.unwrap().is_none());

    let again = post_form(
        common::build_test_app(pool, dir.path()),
        &format!("/projects/{id}/delete"),
        &[],
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
