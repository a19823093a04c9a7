pub mod plan;
pub mod roster;
pub mod snapshot;
