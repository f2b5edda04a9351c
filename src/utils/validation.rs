use crate::utils::error::{FixupError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FixupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FixupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 空字串會匹配所有位置，不允許當作替換目標
pub fn validate_needle(field_name: &str, needle: &str) -> Result<()> {
    if needle.is_empty() {
        return Err(FixupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: needle.to_string(),
            reason: "Search text cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_revision(field_name: &str, revision: &str) -> Result<()> {
    if revision.trim().is_empty() {
        return Err(FixupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: revision.to_string(),
            reason: "Revision cannot be empty or whitespace-only".to_string(),
        });
    }

    // 避免被 git 當成選項解析
    if revision.starts_with('-') {
        return Err(FixupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: revision.to_string(),
            reason: "Revision cannot start with '-'".to_string(),
        });
    }

    // `@{...}` 裡的冒號 (例如日期) 不會被 git 當成 <rev>:<path> 的分隔符
    if revision.contains('\0') || has_unbraced_colon(revision) {
        return Err(FixupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: revision.to_string(),
            reason: "Revision cannot contain ':' outside '@{...}' or null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_distinct_paths(field_name: &str, source: &str, target: &str) -> Result<()> {
    if normalize(source) == normalize(target) {
        return Err(FixupError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!("Target path '{}' must differ from the source path", target),
        });
    }
    Ok(())
}

fn has_unbraced_colon(revision: &str) -> bool {
    let mut depth = 0usize;
    for c in revision.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

fn normalize(path: &str) -> String {
    path.trim_start_matches("./").replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("patch_config.file", "docker-compose.yml").is_ok());
        assert!(validate_path("patch_config.file", "").is_err());
        assert!(validate_path("patch_config.file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_needle() {
        assert!(validate_needle("patch_config.from", "127.0.0.1").is_ok());
        assert!(validate_needle("patch_config.from", "").is_err());
    }

    #[test]
    fn test_validate_revision() {
        assert!(validate_revision("rewrite_history.rev", "HEAD~3").is_ok());
        assert!(validate_revision("rewrite_history.rev", "a1b2c3d").is_ok());
        assert!(validate_revision("rewrite_history.rev", " ").is_err());
        assert!(validate_revision("rewrite_history.rev", "--output=x").is_err());
        assert!(validate_revision("rewrite_history.rev", "HEAD:file").is_err());
    }

    #[test]
    fn test_validate_revision_allows_colon_in_reflog_date() {
        assert!(validate_revision("rewrite_history.rev", "HEAD@{2024-01-01 10:00:00}").is_ok());
        assert!(validate_revision("rewrite_history.rev", "main@{2 days ago}").is_ok());
        assert!(validate_revision("rewrite_history.rev", "HEAD@{10:00}:app/page.tsx").is_err());
    }

    #[test]
    fn test_validate_distinct_paths() {
        assert!(validate_distinct_paths("rewrite_history.target", "a/b.tsx", "c/b.tsx").is_ok());
        assert!(validate_distinct_paths("rewrite_history.target", "a/b.tsx", "./a/b.tsx").is_err());
    }
}
