//! Remote store contract tests against `PostgreSQL`.

use crate::postgres::helpers::{BoxError, StoreContext, owned_task, store_context};
use corkboard::board::{
    domain::{ColumnId, OwnerId, Task, TaskId, seed_board},
    ports::{RemoteStore, RemoteStoreError},
};
use rstest::rstest;

#[rstest]
fn storing_a_task_again_keeps_the_last_write(
    store_context: Result<Option<StoreContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(context) = store_context? else {
        return Ok(());
    };
    let store = &context.store;

    context.block_on(store.store_task(&owned_task("t1", "Draft", "u1")))?;
    context.block_on(store.store_task(&owned_task("t1", "Final", "u1")))?;

    let found = context.block_on(store.find_task(&TaskId::new("t1")))?;
    let listed = context.block_on(store.find_tasks_by_owner(&OwnerId::new("u1")))?;
    assert_eq!(found.as_ref().map(Task::title), Some("Final"));
    assert_eq!(listed.len(), 1);
    Ok(())
}

#[rstest]
fn reassigned_task_moves_to_the_new_owner(
    store_context: Result<Option<StoreContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(context) = store_context? else {
        return Ok(());
    };
    let store = &context.store;

    context.block_on(store.store_task(&owned_task("t1", "Shared", "u1")))?;
    context.block_on(store.store_task(&owned_task("t1", "Shared", "u2")))?;

    assert!(
        context
            .block_on(store.find_tasks_by_owner(&OwnerId::new("u1")))?
            .is_empty()
    );
    assert_eq!(
        context.block_on(store.find_tasks_by_owner(&OwnerId::new("u2")))?,
        [owned_task("t1", "Shared", "u2")]
    );
    Ok(())
}

#[rstest]
fn owner_query_returns_only_that_owner_in_id_order(
    store_context: Result<Option<StoreContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(context) = store_context? else {
        return Ok(());
    };
    let store = &context.store;

    for task in [
        owned_task("t3", "Third", "u1"),
        owned_task("t1", "First", "u1"),
        owned_task("t2", "Other", "u2"),
    ] {
        context.block_on(store.store_task(&task))?;
    }

    let found = context.block_on(store.find_tasks_by_owner(&OwnerId::new("u1")))?;

    let ids: Vec<&str> = found.iter().map(|task| task.id().as_str()).collect();
    assert_eq!(ids, ["t1", "t3"]);
    Ok(())
}

#[rstest]
fn layout_upsert_replaces_the_owner_document(
    store_context: Result<Option<StoreContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(context) = store_context? else {
        return Ok(());
    };
    let store = &context.store;
    let owner = OwnerId::new("u1");
    let seed = seed_board();
    let first = seed.topology();
    let second = seed
        .without_column(&ColumnId::new("on-prod"), &ColumnId::new("todo"))
        .topology();

    context.block_on(store.store_topology(&owner, &first))?;
    context.block_on(store.store_topology(&owner, &second))?;

    assert_eq!(context.block_on(store.find_topology(&owner))?, Some(second));
    assert_eq!(
        context.block_on(store.find_topology(&OwnerId::new("u2")))?,
        None
    );
    Ok(())
}

#[rstest]
fn removed_task_is_gone_and_removing_twice_succeeds(
    store_context: Result<Option<StoreContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(context) = store_context? else {
        return Ok(());
    };
    let store = &context.store;

    context.block_on(store.store_task(&owned_task("t1", "Doomed", "u1")))?;
    context.block_on(store.remove_task(&TaskId::new("t1")))?;
    context.block_on(store.remove_task(&TaskId::new("t1")))?;

    assert_eq!(context.block_on(store.find_task(&TaskId::new("t1")))?, None);
    Ok(())
}

#[rstest]
fn anonymous_task_is_rejected_before_writing(
    store_context: Result<Option<StoreContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(context) = store_context? else {
        return Ok(());
    };
    let anonymous = Task::new(TaskId::new("1"), "Seed", "Seed task", None);

    let result = context.block_on(context.store.store_task(&anonymous));

    assert!(matches!(result, Err(RemoteStoreError::UnownedTask(_))));
    assert_eq!(
        context.block_on(context.store.find_task(&TaskId::new("1")))?,
        None
    );
    Ok(())
}
