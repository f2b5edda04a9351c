use crate::config::jobs::RewriteHistoryJob;
use crate::core::{
    replace, JobKind, Pipeline, RevisionSource, Storage, TextDocument, TransformResult,
};
use crate::utils::error::Result;

/// Reads `source` as of `revision`, rewrites the route segment and writes it to `target`.
/// The working tree copy of `source` is never touched.
pub struct HistoryRewritePipeline<R: RevisionSource, S: Storage> {
    history: R,
    storage: S,
    job: RewriteHistoryJob,
}

impl<R: RevisionSource, S: Storage> HistoryRewritePipeline<R, S> {
    pub fn new(history: R, storage: S, job: RewriteHistoryJob) -> Self {
        Self {
            history,
            storage,
            job,
        }
    }

    pub fn job(&self) -> &RewriteHistoryJob {
        &self.job
    }

    fn origin(&self) -> String {
        format!("{}:{}", self.job.revision, self.job.source)
    }
}

#[async_trait::async_trait]
impl<R: RevisionSource, S: Storage> Pipeline for HistoryRewritePipeline<R, S> {
    fn kind(&self) -> JobKind {
        JobKind::RewriteHistory
    }

    fn target(&self) -> &str {
        &self.job.target
    }

    async fn extract(&self) -> Result<TextDocument> {
        let bytes = self
            .history
            .show_file(&self.job.revision, &self.job.source)
            .await?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), self.origin());
        TextDocument::from_bytes(self.origin(), bytes)
    }

    async fn transform(&self, document: TextDocument) -> Result<TransformResult> {
        let outcome = replace::apply(&self.job.rule, &document.content);

        if outcome.occurrences == 0 {
            tracing::warn!(
                "'{}' not found in {}, content is copied as-is",
                self.job.rule.needle,
                document.origin
            );
        }

        Ok(TransformResult {
            document: TextDocument {
                origin: document.origin,
                content: outcome.content,
            },
            occurrences: outcome.occurrences,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<usize> {
        let data = result.document.content.as_bytes();
        self.storage.write_file(&self.job.target, data).await?;
        Ok(data.len())
    }
}
