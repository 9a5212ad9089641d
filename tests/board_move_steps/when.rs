//! When steps for board move scenarios.

use super::world::MoveWorld;
use corkboard::board::domain::{DragLocation, MoveDescriptor};
use rstest_bdd_macros::when;

#[when(
    r#"task "{task}" is moved from "{source}" index {source_index:u64} to "{destination}" index {destination_index:u64}"#
)]
fn move_task(
    world: &mut MoveWorld,
    task: String,
    source: String,
    source_index: u64,
    destination: String,
    destination_index: u64,
) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let descriptor = MoveDescriptor::new(
        task.as_str(),
        DragLocation::new(source.as_str(), usize::try_from(source_index)?),
        DragLocation::new(destination.as_str(), usize::try_from(destination_index)?),
    );
    let result = world.engine.apply_move(&board, &descriptor);
    if let Ok(next) = &result {
        world.board = Some(next.clone());
    }
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"a column titled "{title}" is added"#)]
fn add_column(world: &mut MoveWorld, title: String) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let result = world.engine.add_column(&board, &title);
    if let Ok(next) = &result {
        world.board = Some(next.clone());
    }
    world.last_result = Some(result);
    Ok(())
}
