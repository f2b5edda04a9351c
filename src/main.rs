use clap::Parser;
use repo_fixup::config::{usage_exit_code, Command, PatchConfigArgs, RewriteHistoryArgs};
use repo_fixup::utils::{logger, validation::Validate};
use repo_fixup::{
    CliConfig, ConfigPatchPipeline, FixupError, GitCli, HistoryRewritePipeline, JobFile,
    LocalStorage, PatchEngine, PatchReport,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            e.print()?;
            std::process::exit(usage_exit_code(&e));
        }
    };

    // 初始化日誌
    if config.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let job_file = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading job file from: {}", path);
            match JobFile::from_file(path) {
                Ok(file) => file,
                Err(e) => fail(&e),
            }
        }
        None => JobFile::default(),
    };

    let result = match &config.command {
        Command::PatchConfig(args) => run_patch_config(args, &job_file).await,
        Command::RewriteHistory(args) => run_rewrite_history(args, &job_file).await,
    };

    match result {
        Ok(report) => {
            if config.json {
                match report.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(&e),
                }
            } else {
                println!("{}", report.confirmation());
            }
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

async fn run_patch_config(
    args: &PatchConfigArgs,
    job_file: &JobFile,
) -> repo_fixup::Result<PatchReport> {
    let job = args.resolve(job_file);
    job.validate()?;

    let pipeline = ConfigPatchPipeline::new(LocalStorage::new("."), job);
    PatchEngine::with_dry_run(pipeline, args.dry_run).run().await
}

async fn run_rewrite_history(
    args: &RewriteHistoryArgs,
    job_file: &JobFile,
) -> repo_fixup::Result<PatchReport> {
    let job = args.resolve(job_file);
    job.validate()?;

    let pipeline = HistoryRewritePipeline::new(
        GitCli::new(&args.repo),
        LocalStorage::new(&args.repo),
        job,
    );
    PatchEngine::with_dry_run(pipeline, args.dry_run).run().await
}

fn fail(e: &FixupError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Job failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code())
}
