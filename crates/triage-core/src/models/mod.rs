//! Domain models for the triage engine.

mod assessment;
mod catalog;
mod input;
mod recommendation;

pub use assessment::*;
pub use catalog::*;
pub use input::*;
pub use recommendation::*;
