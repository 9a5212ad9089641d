//! Given steps for identity transition scenarios.

use super::world::{IdentityWorld, run_async};
use corkboard::board::{
    domain::{BoardConfig, OwnerId, SequentialIdAllocator, Task, TaskId},
    ports::RemoteStore,
    services::{BoardEngine, BoardSession},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use std::sync::Arc;

#[given("an anonymous board session")]
fn anonymous_session(world: &mut IdentityWorld) -> Result<(), eyre::Report> {
    let engine = BoardEngine::new(
        BoardConfig::default(),
        Arc::new(SequentialIdAllocator::new()),
    );
    let session = run_async(BoardSession::start(
        engine,
        Arc::clone(&world.cache),
        Arc::clone(&world.remote),
    ))
    .wrap_err("start board session")?;
    world.session = Some(session);
    Ok(())
}

#[given(r#"the remote store holds task "{id}" titled "{title}" for owner "{owner}""#)]
fn remote_task(
    world: &mut IdentityWorld,
    id: String,
    title: String,
    owner: String,
) -> Result<(), eyre::Report> {
    let task = Task::new(
        TaskId::new(id),
        title,
        "Stored remotely",
        Some(OwnerId::new(owner)),
    );
    run_async(world.remote.store_task(&task)).wrap_err("seed remote task")?;
    Ok(())
}

#[given(r#"owner "{owner}" has signed in"#)]
fn owner_signed_in(world: &mut IdentityWorld, owner: String) -> Result<(), eyre::Report> {
    let session = world.session()?;
    run_async(session.on_identity_acquired(OwnerId::new(owner)));
    Ok(())
}

#[given(r#"the signed-in owner creates a task titled "{title}""#)]
fn owner_creates_task(world: &mut IdentityWorld, title: String) -> Result<(), eyre::Report> {
    let session = world.session()?;
    run_async(session.create_task(&title, "Created while signed in"))
        .wrap_err("create owned task")?;
    Ok(())
}
