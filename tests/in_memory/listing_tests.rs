//! Integration tests for search, status filtering, and pagination.

use super::helpers::Stack;
use rstest::{fixture, rstest};
use taskdeck::tasks::{
    domain::{StatusFilter, Task, UserId},
    services::{TaskDraft, TaskListing},
};

#[fixture]
fn stack() -> Stack {
    Stack::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_foo_matches_title_and_description_but_not_others(stack: Stack) {
    let user = UserId::new();
    let list = stack.seed_list(user, "Weekend").await;
    let milk = stack
        .mutations
        .create(
            user,
            TaskDraft::new("Buy milk", list.id()).with_description("also some food for lunch"),
        )
        .await
        .expect("task creation should succeed");
    let football = stack.seed_task(user, list.id(), "FOOtball practice").await;
    stack.seed_task(user, list.id(), "Clean house").await;

    let page = stack
        .queries
        .list(user, &TaskListing::new().with_search("foo"))
        .await
        .expect("listing should succeed");

    assert_eq!(page.total, 2);
    let ids: Vec<_> = page.items.iter().map(Task::id).collect();
    assert!(ids.contains(&football.id()), "matched in the title");
    assert!(ids.contains(&milk.id()), "matched in the description");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_filters_partition_the_owned_set(stack: Stack) {
    let user = UserId::new();
    let list = stack.seed_list(user, "Mixed").await;
    for index in 0..3 {
        stack
            .seed_task(user, list.id(), &format!("open {index}"))
            .await;
    }
    for index in 0..2 {
        stack
            .mutations
            .create(
                user,
                TaskDraft::new(format!("closed {index}"), list.id()).with_completed(true),
            )
            .await
            .expect("task creation should succeed");
    }

    let all = stack
        .queries
        .list(user, &TaskListing::new())
        .await
        .expect("listing should succeed");
    let completed = stack
        .queries
        .list(user, &TaskListing::new().with_status(StatusFilter::Completed))
        .await
        .expect("listing should succeed");
    let pending = stack
        .queries
        .list(user, &TaskListing::new().with_status(StatusFilter::Pending))
        .await
        .expect("listing should succeed");

    assert_eq!(all.total, 5);
    assert_eq!(completed.total, 2);
    assert!(completed.items.iter().all(Task::is_completed));
    assert_eq!(pending.total, 3);
    assert!(pending.items.iter().all(|task| !task.is_completed()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn twenty_five_tasks_paginate_into_three_pages(stack: Stack) {
    let user = UserId::new();
    let list = stack.seed_list(user, "Backlog").await;
    for index in 0..25 {
        stack
            .seed_task(user, list.id(), &format!("item {index:02}"))
            .await;
    }

    let page_one = stack
        .queries
        .list(user, &TaskListing::new().with_page(1))
        .await
        .expect("listing should succeed");
    assert_eq!(page_one.items.len(), 10);
    assert_eq!(page_one.current_page, 1);
    assert_eq!(page_one.last_page, 3);
    assert_eq!(page_one.total, 25);
    assert_eq!(page_one.from, Some(1));
    assert_eq!(page_one.to, Some(10));

    let page_three = stack
        .queries
        .list(user, &TaskListing::new().with_page(3))
        .await
        .expect("listing should succeed");
    assert_eq!(page_three.items.len(), 5);
    assert_eq!(page_three.from, Some(21));
    assert_eq!(page_three.to, Some(25));

    let page_four = stack
        .queries
        .list(user, &TaskListing::new().with_page(4))
        .await
        .expect("listing should succeed");
    assert!(page_four.items.is_empty());
    assert_eq!(page_four.current_page, 4);
    assert_eq!(page_four.last_page, 3);
    assert_eq!(page_four.total, 25);
    assert_eq!(page_four.from, None);
    assert_eq!(page_four.to, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pages_walk_the_set_newest_first_without_overlap(stack: Stack) {
    let user = UserId::new();
    let list = stack.seed_list(user, "Walk").await;
    let mut created = Vec::new();
    for index in 0..7 {
        created.push(stack.seed_task(user, list.id(), &format!("step {index}")).await);
    }
    created.reverse();

    let mut walked = Vec::new();
    for page_number in 1..=3 {
        let page = stack
            .queries
            .list(
                user,
                &TaskListing::new().with_per_page(3).with_page(page_number),
            )
            .await
            .expect("listing should succeed");
        walked.extend(page.items);
    }

    assert_eq!(walked, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_and_status_and_pagination_compose(stack: Stack) {
    let user = UserId::new();
    let list = stack.seed_list(user, "Compose").await;
    for index in 0..6 {
        stack
            .mutations
            .create(
                user,
                TaskDraft::new(format!("report {index}"), list.id()).with_completed(true),
            )
            .await
            .expect("task creation should succeed");
    }
    stack.seed_task(user, list.id(), "report pending").await;
    stack.seed_task(user, list.id(), "unrelated").await;

    let page = stack
        .queries
        .list(
            user,
            &TaskListing::new()
                .with_search("report")
                .with_status(StatusFilter::Completed)
                .with_per_page(4)
                .with_page(2),
        )
        .await
        .expect("listing should succeed");

    assert_eq!(page.total, 6);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.last_page, 2);
    assert_eq!(page.from, Some(5));
    assert_eq!(page.to, Some(6));
}
