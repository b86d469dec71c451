//! Look profiles and the orchestrator that runs them.

pub mod evaluate;
pub mod params;
pub mod presets;
pub mod stage;
