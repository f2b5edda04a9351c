use crate::core::RevisionSource;
use crate::utils::error::{FixupError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::process::Command;

/// `git show <rev>:<path>` run inside `repo_root`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            program: "git".to_string(),
            repo_root: repo_root.into(),
        }
    }

    /// 指定 git 執行檔（測試或非標準安裝時使用）
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl RevisionSource for GitCli {
    async fn show_file(&self, revision: &str, path: &str) -> Result<Vec<u8>> {
        let object = format!("{}:{}", revision, path);
        tracing::debug!(
            "Running {} show {} in {}",
            self.program,
            object,
            self.repo_root.display()
        );

        let output = Command::new(&self.program)
            .arg("show")
            .arg(&object)
            .current_dir(&self.repo_root)
            .output()
            .await
            .map_err(|source| FixupError::VcsUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(FixupError::VcsCommandError {
                command: format!("{} show {}", self.program, object),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

/// In-memory revision history, keyed by `(revision, path)`.
#[derive(Debug, Clone, Default)]
pub struct FixtureRevisionSource {
    files: HashMap<(String, String), Vec<u8>>,
}

impl FixtureRevisionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(
        mut self,
        revision: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.files
            .insert((revision.into(), path.into()), content.into());
        self
    }
}

impl RevisionSource for FixtureRevisionSource {
    async fn show_file(&self, revision: &str, path: &str) -> Result<Vec<u8>> {
        self.files
            .get(&(revision.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| FixupError::VcsCommandError {
                command: format!("git show {}:{}", revision, path),
                status: "exit status: 128".to_string(),
                stderr: format!("fatal: path '{}' does not exist in '{}'", path, revision),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_returns_stored_content() {
        let source = FixtureRevisionSource::new().with_file("HEAD~1", "a.txt", "hello");
        let data = source.show_file("HEAD~1", "a.txt").await.unwrap();
        assert_eq!(data, b"hello");
    }

    #[tokio::test]
    async fn test_fixture_missing_path_fails_like_git() {
        let source = FixtureRevisionSource::new();
        let err = source.show_file("HEAD", "a.txt").await.unwrap_err();
        assert!(matches!(err, FixupError::VcsCommandError { .. }));
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let git = GitCli::new(".").with_program("repo-fixup-no-such-vcs");
        let err = git.show_file("HEAD", "Cargo.toml").await.unwrap_err();
        assert!(matches!(err, FixupError::VcsUnavailable { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
