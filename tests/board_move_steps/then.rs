//! Then steps for board move scenarios.

use super::world::{MoveWorld, split_ids};
use corkboard::board::domain::{BoardError, ColumnId};
use rstest_bdd_macros::then;

#[then(r#"column "{column}" holds tasks "{tasks}""#)]
fn column_holds_tasks(
    world: &mut MoveWorld,
    column: String,
    tasks: String,
) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let found = board
        .column(&ColumnId::new(column.as_str()))
        .ok_or_else(|| eyre::eyre!("column {column} is missing"))?;
    let actual: Vec<String> = found.task_ids().iter().map(ToString::to_string).collect();
    eyre::ensure!(
        actual == split_ids(&tasks),
        "expected column {column} to hold {tasks}, found {actual:?}"
    );
    board.validate()?;
    Ok(())
}

#[then("the move is rejected as invalid")]
fn move_rejected(world: &MoveWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result in scenario world"))?;
    eyre::ensure!(
        matches!(result, Err(BoardError::InvalidMove(_))),
        "expected an invalid move, got {result:?}"
    );
    Ok(())
}

#[then("the column limit is reported")]
fn column_limit_reported(world: &MoveWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing add result in scenario world"))?;
    eyre::ensure!(
        matches!(result, Err(BoardError::ColumnLimitExceeded { limit: 5 })),
        "expected the column limit error, got {result:?}"
    );
    Ok(())
}

#[then("the board still has {count:u64} columns")]
fn board_column_count(world: &mut MoveWorld, count: u64) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let actual = u64::try_from(board.column_order().len())?;
    eyre::ensure!(actual == count, "expected {count} columns, found {actual}");
    Ok(())
}
