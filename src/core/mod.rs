pub mod config_patcher;
pub mod engine;
pub mod history_rewriter;
pub mod replace;

pub use crate::domain::model::{
    JobKind, PatchReport, ReplaceMode, ReplaceOutcome, Replacement, TextDocument, TransformResult,
};
pub use crate::domain::ports::{Pipeline, RevisionSource, Storage};
pub use crate::utils::error::Result;
