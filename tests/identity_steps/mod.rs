//! Step definitions for identity transition scenarios.

pub mod given;
pub mod then;
pub mod when;
