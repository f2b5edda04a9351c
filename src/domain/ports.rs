use crate::domain::model::{JobKind, TextDocument, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Read-only access to file contents as stored at a past revision.
pub trait RevisionSource: Send + Sync {
    fn show_file(
        &self,
        revision: &str,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn kind(&self) -> JobKind;
    fn target(&self) -> &str;
    async fn extract(&self) -> Result<TextDocument>;
    async fn transform(&self, document: TextDocument) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<usize>;
}
