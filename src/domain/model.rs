use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::{FixupError, Result};

/// 讀入記憶體的整份文字內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    pub origin: String,
    pub content: String,
}

impl TextDocument {
    pub fn from_bytes(origin: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let origin = origin.into();
        match String::from_utf8(bytes) {
            Ok(content) => Ok(Self { origin, content }),
            Err(_) => Err(FixupError::DecodeError { origin }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceMode {
    #[default]
    All,
    First,
}

/// A literal (non-pattern) substitution rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub needle: String,
    pub replacement: String,
    #[serde(default)]
    pub mode: ReplaceMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub content: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub document: TextDocument,
    pub occurrences: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobKind {
    PatchConfig,
    RewriteHistory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchReport {
    pub job: JobKind,
    pub source: String,
    pub target: String,
    pub occurrences: usize,
    pub bytes_written: usize,
    pub dry_run: bool,
    pub finished_at: DateTime<Utc>,
}

impl PatchReport {
    /// 任務完成後印出的固定訊息
    pub fn confirmation(&self) -> String {
        let prefix = if self.dry_run { "🔍 [dry run] " } else { "✅ " };
        match self.job {
            JobKind::PatchConfig => format!("{}Fixed port quoting in {}", prefix, self.target),
            JobKind::RewriteHistory => {
                format!("{}Restored {} from {}", prefix, self.target, self.source)
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(job: JobKind, dry_run: bool) -> PatchReport {
        let (source, target) = match job {
            JobKind::PatchConfig => ("docker-compose.yml", "docker-compose.yml"),
            JobKind::RewriteHistory => (
                "HEAD:app/app/[org]/telegram/page.tsx",
                "app/p/[org]/telegram/page.tsx",
            ),
        };
        PatchReport {
            job,
            source: source.to_string(),
            target: target.to_string(),
            occurrences: 1,
            bytes_written: if dry_run { 0 } else { 42 },
            dry_run,
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_confirmation_messages() {
        assert_eq!(
            report(JobKind::PatchConfig, false).confirmation(),
            "✅ Fixed port quoting in docker-compose.yml"
        );
        assert_eq!(
            report(JobKind::RewriteHistory, false).confirmation(),
            "✅ Restored app/p/[org]/telegram/page.tsx from HEAD:app/app/[org]/telegram/page.tsx"
        );
    }

    #[test]
    fn test_dry_run_confirmation_prefix() {
        assert_eq!(
            report(JobKind::PatchConfig, true).confirmation(),
            "🔍 [dry run] Fixed port quoting in docker-compose.yml"
        );
        assert!(report(JobKind::RewriteHistory, true)
            .confirmation()
            .starts_with("🔍 [dry run] Restored app/p/[org]/telegram/page.tsx"));
    }

    #[test]
    fn test_json_report_reads_back() {
        let original = report(JobKind::RewriteHistory, false);
        let json = original.to_json().unwrap();

        assert!(json.contains("\"job\": \"rewrite-history\""));
        let parsed: PatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = TextDocument::from_bytes("HEAD:logo.png", vec![0x89, 0x50, 0xff]).unwrap_err();
        assert!(matches!(err, FixupError::DecodeError { origin } if origin == "HEAD:logo.png"));
    }
}
