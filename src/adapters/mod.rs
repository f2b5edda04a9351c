// Adapters layer: concrete implementations for external systems.
// Local filesystem storage lives in config::cli next to the CLI wiring.

pub mod git;

pub use git::{FixtureRevisionSource, GitCli};
