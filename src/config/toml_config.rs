use crate::config::jobs::{PatchConfigJob, RewriteHistoryJob};
use crate::domain::model::ReplaceMode;
use crate::utils::error::{FixupError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional job file; every key overrides the built-in default of the matching job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFile {
    pub patch_config: Option<PatchConfigSection>,
    pub rewrite_history: Option<RewriteHistorySection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchConfigSection {
    pub file: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub first_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewriteHistorySection {
    pub rev: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub first_only: Option<bool>,
}

impl JobFile {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FixupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut file: Self =
            toml::from_str(content).map_err(|e| FixupError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        file.substitute_env_vars()?;
        Ok(file)
    }

    /// 替換環境變數 (例如 ${REVISION})，只作用於路徑與版本欄位。
    /// `from` / `to` 是字面替換規則，`${...}` 必須原樣保留。
    fn substitute_env_vars(&mut self) -> Result<()> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            FixupError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: e.to_string(),
            }
        })?;

        if let Some(section) = &mut self.patch_config {
            expand(&re, &mut section.file);
        }
        if let Some(section) = &mut self.rewrite_history {
            expand(&re, &mut section.rev);
            expand(&re, &mut section.source);
            expand(&re, &mut section.target);
        }
        Ok(())
    }

    pub fn patch_config_job(&self) -> PatchConfigJob {
        let mut job = PatchConfigJob::default();
        if let Some(section) = &self.patch_config {
            section.apply(&mut job);
        }
        job
    }

    pub fn rewrite_history_job(&self) -> RewriteHistoryJob {
        let mut job = RewriteHistoryJob::default();
        if let Some(section) = &self.rewrite_history {
            section.apply(&mut job);
        }
        job
    }
}

/// 未定義的變數保持原樣
fn expand(re: &Regex, value: &mut Option<String>) {
    if let Some(text) = value {
        let expanded = re.replace_all(text.as_str(), |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });
        *text = expanded.into_owned();
    }
}

impl PatchConfigSection {
    pub fn apply(&self, job: &mut PatchConfigJob) {
        if let Some(file) = &self.file {
            job.file = file.clone();
        }
        if let Some(from) = &self.from {
            job.rule.needle = from.clone();
        }
        if let Some(to) = &self.to {
            job.rule.replacement = to.clone();
        }
        if self.first_only == Some(true) {
            job.rule.mode = ReplaceMode::First;
        }
    }
}

impl RewriteHistorySection {
    pub fn apply(&self, job: &mut RewriteHistoryJob) {
        if let Some(rev) = &self.rev {
            job.revision = rev.clone();
        }
        if let Some(source) = &self.source {
            job.source = source.clone();
        }
        if let Some(target) = &self.target {
            job.target = target.clone();
        }
        if let Some(from) = &self.from {
            job.rule.needle = from.clone();
        }
        if let Some(to) = &self.to {
            job.rule.replacement = to.clone();
        }
        if self.first_only == Some(true) {
            job.rule.mode = ReplaceMode::First;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::jobs::{DEFAULT_CONFIG_FILE, NEW_ROUTE_SEGMENT};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_keeps_defaults() {
        let jobs = JobFile::from_toml_str("").unwrap();
        assert_eq!(jobs.patch_config_job(), PatchConfigJob::default());
        assert_eq!(jobs.rewrite_history_job(), RewriteHistoryJob::default());
    }

    #[test]
    fn test_partial_override() {
        let toml_content = r#"
[rewrite_history]
rev = "v1.4.0"
source = "app/app/[org]/events/page.tsx"
target = "app/p/[org]/events/page.tsx"
first_only = true
"#;

        let jobs = JobFile::from_toml_str(toml_content).unwrap();
        let job = jobs.rewrite_history_job();
        assert_eq!(job.revision, "v1.4.0");
        assert_eq!(job.target, "app/p/[org]/events/page.tsx");
        assert_eq!(job.rule.replacement, NEW_ROUTE_SEGMENT);
        assert_eq!(job.rule.mode, ReplaceMode::First);
        assert_eq!(jobs.patch_config_job().file, DEFAULT_CONFIG_FILE);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("REPO_FIXUP_TEST_REV", "release-2024");

        let toml_content = r#"
[rewrite_history]
rev = "${REPO_FIXUP_TEST_REV}"
"#;

        let jobs = JobFile::from_toml_str(toml_content).unwrap();
        assert_eq!(jobs.rewrite_history_job().revision, "release-2024");

        std::env::remove_var("REPO_FIXUP_TEST_REV");
    }

    #[test]
    fn test_rule_text_is_never_substituted() {
        // 環境變數與規則中的 placeholder 同名時，規則仍保持字面值
        std::env::set_var("REPO_FIXUP_TEST_ORG", "acme");
        let toml_content = r#"
[patch_config]
file = "deploy/${REPO_FIXUP_TEST_ORG}.yml"
from = "host: ${REPO_FIXUP_TEST_ORG}"

[rewrite_history]
target = "app/p/${REPO_FIXUP_TEST_ORG}/page.tsx"
from = "/app/${REPO_FIXUP_TEST_ORG}/telegram"
to = "/p/${REPO_FIXUP_TEST_ORG}/telegram"
"#;
        let jobs = JobFile::from_toml_str(toml_content).unwrap();
        std::env::remove_var("REPO_FIXUP_TEST_ORG");

        let rewrite = jobs.rewrite_history_job();
        assert_eq!(rewrite.rule.needle, "/app/${REPO_FIXUP_TEST_ORG}/telegram");
        assert_eq!(rewrite.rule.replacement, "/p/${REPO_FIXUP_TEST_ORG}/telegram");
        assert_eq!(rewrite.target, "app/p/acme/page.tsx");

        let patch = jobs.patch_config_job();
        assert_eq!(patch.rule.needle, "host: ${REPO_FIXUP_TEST_ORG}");
        assert_eq!(patch.file, "deploy/acme.yml");
    }

    #[test]
    fn test_undefined_variable_kept_in_path() {
        std::env::remove_var("REPO_FIXUP_TEST_UNSET");
        let toml_content = r#"
[rewrite_history]
source = "app/${REPO_FIXUP_TEST_UNSET}/page.tsx"
"#;
        let jobs = JobFile::from_toml_str(toml_content).unwrap();
        assert_eq!(
            jobs.rewrite_history_job().source,
            "app/${REPO_FIXUP_TEST_UNSET}/page.tsx"
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml_content = r#"
[patch_config]
path = "compose.yml"
"#;
        assert!(JobFile::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[patch_config]
file = "deploy/compose.yaml"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let jobs = JobFile::from_file(temp_file.path()).unwrap();
        assert_eq!(jobs.patch_config_job().file, "deploy/compose.yaml");
    }
}
