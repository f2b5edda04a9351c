use crate::domain::model::{ReplaceMode, ReplaceOutcome, Replacement};

impl Replacement {
    pub fn new(needle: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
            replacement: replacement.into(),
            mode: ReplaceMode::All,
        }
    }

    pub fn first_only(mut self) -> Self {
        self.mode = ReplaceMode::First;
        self
    }
}

/// Literal substring replacement. Matches are non-overlapping and scanned left to right;
/// text outside the matches is copied byte for byte.
pub fn apply(rule: &Replacement, text: &str) -> ReplaceOutcome {
    if rule.needle.is_empty() {
        return ReplaceOutcome {
            content: text.to_string(),
            occurrences: 0,
        };
    }

    let found = text.matches(rule.needle.as_str()).count();
    if found == 0 {
        return ReplaceOutcome {
            content: text.to_string(),
            occurrences: 0,
        };
    }

    match rule.mode {
        ReplaceMode::All => ReplaceOutcome {
            content: text.replace(rule.needle.as_str(), &rule.replacement),
            occurrences: found,
        },
        ReplaceMode::First => ReplaceOutcome {
            content: text.replacen(rule.needle.as_str(), &rule.replacement, 1),
            occurrences: 1,
        },
    }
}
