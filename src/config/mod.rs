pub mod cli;
pub mod jobs;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::{usage_exit_code, CliConfig, Command, PatchConfigArgs, RewriteHistoryArgs};

#[cfg(feature = "cli")]
mod args {
    use crate::config::jobs::{PatchConfigJob, RewriteHistoryJob};
    use crate::config::toml_config::{JobFile, PatchConfigSection, RewriteHistorySection};
    use clap::{Args, Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "repo-fixup")]
    #[command(about = "One-shot fixups: repair config quoting, restore files from history")]
    pub struct CliConfig {
        /// Enable verbose output
        #[arg(short, long, global = true)]
        pub verbose: bool,

        /// Print the run report as JSON
        #[arg(long, global = true)]
        pub json: bool,

        /// Optional TOML job file overriding the built-in defaults
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Fix the malformed port quoting in the deployment config, in place
        PatchConfig(PatchConfigArgs),
        /// Restore a file from a past revision under a new path, rewriting its route segment
        RewriteHistory(RewriteHistoryArgs),
    }

    #[derive(Debug, Clone, Args)]
    pub struct PatchConfigArgs {
        /// Config file to patch
        #[arg(long)]
        pub file: Option<String>,

        /// Literal text to replace
        #[arg(long)]
        pub from: Option<String>,

        /// Replacement text
        #[arg(long)]
        pub to: Option<String>,

        /// Replace only the first occurrence
        #[arg(long)]
        pub first_only: bool,

        /// Show what would change without writing
        #[arg(long)]
        pub dry_run: bool,
    }

    #[derive(Debug, Clone, Args)]
    pub struct RewriteHistoryArgs {
        /// Revision to read the file from
        #[arg(long)]
        pub rev: Option<String>,

        /// Path of the file inside the revision
        #[arg(long)]
        pub source: Option<String>,

        /// Path to write the rewritten file to
        #[arg(long)]
        pub target: Option<String>,

        /// Literal text to replace
        #[arg(long)]
        pub from: Option<String>,

        /// Replacement text
        #[arg(long)]
        pub to: Option<String>,

        /// Repository working directory
        #[arg(long, default_value = ".")]
        pub repo: String,

        /// Replace only the first occurrence
        #[arg(long)]
        pub first_only: bool,

        /// Show what would change without writing
        #[arg(long)]
        pub dry_run: bool,
    }

    /// 命令列用法錯誤一律退出碼 1，避免與 git 查詢失敗的 2 混淆；--help / --version 為 0
    pub fn usage_exit_code(err: &clap::Error) -> i32 {
        if err.use_stderr() {
            1
        } else {
            0
        }
    }

    impl From<&PatchConfigArgs> for PatchConfigSection {
        fn from(args: &PatchConfigArgs) -> Self {
            Self {
                file: args.file.clone(),
                from: args.from.clone(),
                to: args.to.clone(),
                first_only: args.first_only.then_some(true),
            }
        }
    }

    impl From<&RewriteHistoryArgs> for RewriteHistorySection {
        fn from(args: &RewriteHistoryArgs) -> Self {
            Self {
                rev: args.rev.clone(),
                source: args.source.clone(),
                target: args.target.clone(),
                from: args.from.clone(),
                to: args.to.clone(),
                first_only: args.first_only.then_some(true),
            }
        }
    }

    impl PatchConfigArgs {
        /// 預設值 < 設定檔 < 命令列
        pub fn resolve(&self, file: &JobFile) -> PatchConfigJob {
            let mut job = file.patch_config_job();
            PatchConfigSection::from(self).apply(&mut job);
            job
        }
    }

    impl RewriteHistoryArgs {
        pub fn resolve(&self, file: &JobFile) -> RewriteHistoryJob {
            let mut job = file.rewrite_history_job();
            RewriteHistorySection::from(self).apply(&mut job);
            job
        }
    }

}
