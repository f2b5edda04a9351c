use crate::config::jobs::PatchConfigJob;
use crate::core::{replace, JobKind, Pipeline, Storage, TextDocument, TransformResult};
use crate::utils::error::Result;

/// Rewrites the config file in place. No backup is kept.
pub struct ConfigPatchPipeline<S: Storage> {
    storage: S,
    job: PatchConfigJob,
}

impl<S: Storage> ConfigPatchPipeline<S> {
    pub fn new(storage: S, job: PatchConfigJob) -> Self {
        Self { storage, job }
    }

    pub fn job(&self) -> &PatchConfigJob {
        &self.job
    }
}

#[async_trait::async_trait]
impl<S: Storage> Pipeline for ConfigPatchPipeline<S> {
    fn kind(&self) -> JobKind {
        JobKind::PatchConfig
    }

    fn target(&self) -> &str {
        &self.job.file
    }

    async fn extract(&self) -> Result<TextDocument> {
        let bytes = self.storage.read_file(&self.job.file).await?;
        TextDocument::from_bytes(self.job.file.clone(), bytes)
    }

    async fn transform(&self, document: TextDocument) -> Result<TransformResult> {
        let outcome = replace::apply(&self.job.rule, &document.content);

        if outcome.occurrences == 0 {
            // 找不到目標字串時照樣寫回
            tracing::warn!(
                "'{}' not found in {}, file will be written unchanged",
                self.job.rule.needle,
                document.origin
            );
        } else {
            tracing::debug!(
                "Replaced {} occurrence(s) in {}",
                outcome.occurrences,
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
        self.storage.write_file(&self.job.file, data).await?;
        Ok(data.len())
    }
}
