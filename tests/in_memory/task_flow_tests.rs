//! Integration tests for the create/update/delete lifecycle.

use super::helpers::Stack;
use rstest::{fixture, rstest};
use taskdeck::tasks::{
    domain::{TaskId, UserId},
    services::{TaskDraft, TaskListing, TaskMutationError},
};

#[fixture]
fn stack() -> Stack {
    Stack::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_create_update_complete_delete(stack: Stack) {
    let user = UserId::new();
    let list = stack.seed_list(user, "Projects").await;

    let task = stack
        .mutations
        .create(
            user,
            TaskDraft::new("Write proposal", list.id())
                .with_description("first draft")
                .with_due_date("2026-11-30"),
        )
        .await
        .expect("task creation should succeed");

    let completed = stack
        .mutations
        .update(
            user,
            task.id(),
            TaskDraft::new("Write proposal", list.id())
                .with_description("sent to review")
                .with_completed(true),
        )
        .await
        .expect("update should succeed");
    assert!(completed.is_completed());
    assert_eq!(completed.description(), Some("sent to review"));
    assert_eq!(completed.due_date(), None, "omitted due date clears it");

    stack
        .mutations
        .delete(user, task.id())
        .await
        .expect("delete should succeed");

    let page = stack
        .queries
        .list(user, &TaskListing::new())
        .await
        .expect("listing should succeed");
    assert_eq!(page.total, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validation_failures_surface_field_keyed_messages(stack: Stack) {
    let user = UserId::new();
    let list = stack.seed_list(user, "Forms").await;

    let result = stack
        .mutations
        .create(
            user,
            TaskDraft::new("", list.id()).with_due_date("31-12-2026"),
        )
        .await;

    let Err(TaskMutationError::Validation(errors)) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    let by_field = errors.by_field();
    assert_eq!(
        by_field.get("title").map(Vec::as_slice),
        Some(["title must not be empty".to_owned()].as_slice())
    );
    assert!(by_field.contains_key("due_date"));
    assert!(!by_field.contains_key("list_id"), "list was valid");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_task_is_not_found_every_time(stack: Stack) {
    let user = UserId::new();
    stack.seed_list(user, "Empty").await;
    let ghost = TaskId::new();

    let first = stack.mutations.delete(user, ghost).await;
    assert!(matches!(first, Err(TaskMutationError::NotFound)));
    let second = stack.mutations.delete(user, ghost).await;
    assert!(matches!(second, Err(TaskMutationError::NotFound)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_a_task_between_own_lists_is_allowed(stack: Stack) {
    let user = UserId::new();
    let inbox = stack.seed_list(user, "Inbox").await;
    let archive = stack.seed_list(user, "Archive").await;
    let task = stack.seed_task(user, inbox.id(), "Migrating").await;

    let moved = stack
        .mutations
        .update(user, task.id(), TaskDraft::new("Migrating", archive.id()))
        .await
        .expect("update should succeed");
    assert_eq!(moved.list_id(), archive.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_list_removes_its_tasks_from_listings(stack: Stack) {
    let user = UserId::new();
    let keep = stack.seed_list(user, "Keep").await;
    let doomed = stack.seed_list(user, "Doomed").await;
    let kept = stack.seed_task(user, keep.id(), "survives").await;
    stack.seed_task(user, doomed.id(), "perishes").await;

    stack
        .lists
        .delete(user, doomed.id())
        .await
        .expect("list deletion should succeed");

    let page = stack
        .queries
        .list(user, &TaskListing::new())
        .await
        .expect("listing should succeed");
    assert_eq!(page.items, vec![kept]);

    let lists = stack
        .lists
        .lists_for(user)
        .await
        .expect("enumeration should succeed");
    assert_eq!(lists, vec![keep]);
}
