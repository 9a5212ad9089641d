//! Board sessions syncing through `PostgreSQL`.

use crate::postgres::helpers::{BoxError, StoreContext, store_context};
use corkboard::board::{
    adapters::{memory::InMemoryLocalCache, postgres::PostgresRemoteStore},
    domain::{BoardConfig, ColumnId, OwnerId, SequentialIdAllocator, TaskId},
    ports::RemoteStore,
    services::{BoardEngine, BoardSession},
};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

type PgSession =
    BoardSession<InMemoryLocalCache, PostgresRemoteStore<DefaultClock>, SequentialIdAllocator>;

fn start_device(context: &StoreContext) -> Result<PgSession, BoxError> {
    let engine = BoardEngine::new(
        BoardConfig::default(),
        Arc::new(SequentialIdAllocator::new()),
    );
    let session = context.block_on(BoardSession::start(
        engine,
        Arc::new(InMemoryLocalCache::new()),
        Arc::clone(&context.store),
    ))?;
    Ok(session)
}

#[rstest]
fn layout_and_tasks_follow_the_owner_to_a_new_device(
    store_context: Result<Option<StoreContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(context) = store_context? else {
        return Ok(());
    };
    let owner = OwnerId::new("u1");
    let mut first = start_device(&context)?;
    context.block_on(first.on_identity_acquired(owner.clone()));
    context.block_on(first.delete_column(&ColumnId::new("on-prod")));
    context.block_on(first.add_column("Archive"))?;
    let edited = context.block_on(first.create_task("Owned", "Follows the owner"))?;

    let mut second = start_device(&context)?;
    let merged = context.block_on(second.on_identity_acquired(owner));

    assert_eq!(merged.column_order(), edited.column_order());
    assert_eq!(
        merged.task(&TaskId::new("task-1")),
        edited.task(&TaskId::new("task-1"))
    );
    Ok(())
}

#[rstest]
fn cascade_deleted_tasks_are_removed_from_the_database(
    store_context: Result<Option<StoreContext>, BoxError>,
) -> Result<(), BoxError> {
    let Some(context) = store_context? else {
        return Ok(());
    };
    let owner = OwnerId::new("u1");
    let mut session = start_device(&context)?;
    context.block_on(session.on_identity_acquired(owner.clone()));
    context.block_on(session.create_task("Owned", "Deleted with the last column"))?;
    for column in session.state().column_order().to_vec() {
        context.block_on(session.delete_column(&column));
    }

    context.block_on(session.on_identity_lost());
    let signed_in = context.block_on(session.on_identity_acquired(owner.clone()));

    assert!(signed_in.task(&TaskId::new("task-1")).is_none());
    assert!(
        context
            .block_on(context.store.find_tasks_by_owner(&owner))?
            .is_empty()
    );
    Ok(())
}
