pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FixtureRevisionSource, GitCli};
pub use config::cli::LocalStorage;
pub use config::jobs::{PatchConfigJob, RewriteHistoryJob};
pub use config::toml_config::JobFile;
pub use crate::core::{
    config_patcher::ConfigPatchPipeline, engine::PatchEngine,
    history_rewriter::HistoryRewritePipeline, PatchReport, Replacement,
};
pub use utils::error::{FixupError, Result};
