//! When steps for identity transition scenarios.

use super::world::{IdentityWorld, run_async};
use corkboard::board::domain::OwnerId;
use rstest_bdd_macros::when;

#[when(r#"owner "{owner}" signs in"#)]
fn owner_signs_in(world: &mut IdentityWorld, owner: String) -> Result<(), eyre::Report> {
    let session = world.session()?;
    run_async(session.on_identity_acquired(OwnerId::new(owner)));
    Ok(())
}

#[when("the owner signs out")]
fn owner_signs_out(world: &mut IdentityWorld) -> Result<(), eyre::Report> {
    let session = world.session()?;
    run_async(session.on_identity_lost());
    Ok(())
}
