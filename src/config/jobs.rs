use crate::domain::model::Replacement;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_paths, validate_needle, validate_path, validate_revision, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "docker-compose.yml";
pub const MALFORMED_PORT: &str = r"- \ 127.0.0.1:9999:8080\";
pub const QUOTED_PORT: &str = r#"- "127.0.0.1:9999:8080""#;

pub const DEFAULT_REVISION: &str = "HEAD";
pub const DEFAULT_HISTORY_SOURCE: &str = "app/app/[org]/telegram/page.tsx";
pub const DEFAULT_HISTORY_TARGET: &str = "app/p/[org]/telegram/page.tsx";
pub const OLD_ROUTE_SEGMENT: &str = "/app/${orgId}/telegram";
pub const NEW_ROUTE_SEGMENT: &str = "/p/${orgId}/telegram";

/// 修正部署設定檔中的 port 引號
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchConfigJob {
    pub file: String,
    pub rule: Replacement,
}

impl Default for PatchConfigJob {
    fn default() -> Self {
        Self {
            file: DEFAULT_CONFIG_FILE.to_string(),
            rule: Replacement::new(MALFORMED_PORT, QUOTED_PORT),
        }
    }
}

impl Validate for PatchConfigJob {
    fn validate(&self) -> Result<()> {
        validate_path("patch_config.file", &self.file)?;
        validate_needle("patch_config.from", &self.rule.needle)?;
        Ok(())
    }
}

/// 從歷史版本取出檔案、改寫路徑後寫到新位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteHistoryJob {
    pub revision: String,
    pub source: String,
    pub target: String,
    pub rule: Replacement,
}

impl Default for RewriteHistoryJob {
    fn default() -> Self {
        Self {
            revision: DEFAULT_REVISION.to_string(),
            source: DEFAULT_HISTORY_SOURCE.to_string(),
            target: DEFAULT_HISTORY_TARGET.to_string(),
            rule: Replacement::new(OLD_ROUTE_SEGMENT, NEW_ROUTE_SEGMENT),
        }
    }
}

impl Validate for RewriteHistoryJob {
    fn validate(&self) -> Result<()> {
        validate_revision("rewrite_history.rev", &self.revision)?;
        validate_path("rewrite_history.source", &self.source)?;
        validate_path("rewrite_history.target", &self.target)?;
        validate_distinct_paths("rewrite_history.target", &self.source, &self.target)?;
        validate_needle("rewrite_history.from", &self.rule.needle)?;
        Ok(())
    }
}
