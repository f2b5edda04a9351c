use crate::core::{PatchReport, Pipeline};
use crate::utils::error::Result;
use chrono::Utc;

pub struct PatchEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> PatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    pub fn with_dry_run(pipeline: P, dry_run: bool) -> Self {
        Self { pipeline, dry_run }
    }

    pub async fn run(&self) -> Result<PatchReport> {
        tracing::info!("Starting {:?} job", self.pipeline.kind());

        // Extract
        let document = self.pipeline.extract().await?;
        let source = document.origin.clone();
        tracing::info!("Read {} bytes from {}", document.content.len(), source);

        // Transform
        let transformed = self.pipeline.transform(document).await?;
        let occurrences = transformed.occurrences;
        tracing::info!("Replaced {} occurrence(s)", occurrences);

        // Load
        let bytes_written = if self.dry_run {
            tracing::info!(
                "🔍 DRY RUN - would write {} bytes to {}",
                transformed.document.content.len(),
                self.pipeline.target()
            );
            0
        } else {
            let written = self.pipeline.load(transformed).await?;
            tracing::info!("Wrote {} bytes to {}", written, self.pipeline.target());
            written
        };

        Ok(PatchReport {
            job: self.pipeline.kind(),
            source,
            target: self.pipeline.target().to_string(),
            occurrences,
            bytes_written,
            dry_run: self.dry_run,
            finished_at: Utc::now(),
        })
    }
}
