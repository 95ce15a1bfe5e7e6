//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (ScriptSource)
//! but are themselves concrete structs, not traits.

mod playground;

pub use playground::{Outcome, PlaygroundService};
