//! Ignore lists for workspaces, repositories, organizations and git hosts

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One pattern or a list of patterns, as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExclusionPattern {
    Single(String),
    Many(Vec<String>),
}

impl Default for ExclusionPattern {
    fn default() -> Self {
        ExclusionPattern::Many(Vec::new())
    }
}

impl ExclusionPattern {
    pub fn is_empty(&self) -> bool {
        match self {
            ExclusionPattern::Single(pattern) => pattern.is_empty(),
            ExclusionPattern::Many(patterns) => patterns.iter().all(|p| p.is_empty()),
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            ExclusionPattern::Single(pattern) => pattern_matches(pattern, candidate),
            ExclusionPattern::Many(patterns) => {
                patterns.iter().any(|p| pattern_matches(p, candidate))
            }
        }
    }
}

impl From<&str> for ExclusionPattern {
    fn from(pattern: &str) -> Self {
        ExclusionPattern::Single(pattern.to_string())
    }
}

impl From<Vec<String>> for ExclusionPattern {
    fn from(patterns: Vec<String>) -> Self {
        ExclusionPattern::Many(patterns)
    }
}

/// Reads an ignore list from the config file without failing the whole load.
///
/// `null` means no patterns, entries that are not strings are skipped, and any
/// other shape is treated as an empty list.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<ExclusionPattern, D::Error>
where
    D: Deserializer<'de>,
{
    let pattern = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => ExclusionPattern::default(),
        Some(Value::String(pattern)) => ExclusionPattern::Single(pattern),
        Some(Value::Array(items)) => ExclusionPattern::Many(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(pattern) => Some(pattern),
                    other => {
                        tracing::warn!("Ignoring non-string exclusion pattern: {}", other);
                        None
                    }
                })
                .collect(),
        ),
        Some(other) => {
            tracing::warn!("Ignoring exclusion list of unexpected shape: {}", other);
            ExclusionPattern::default()
        }
    };
    Ok(pattern)
}

/// Returns true when `candidate` is hit by any of the configured patterns.
///
/// Missing or empty input on either side never excludes anything.
pub fn is_excluded(pattern: Option<&ExclusionPattern>, candidate: Option<&str>) -> bool {
    let (Some(pattern), Some(candidate)) = (pattern, candidate) else {
        return false;
    };

    if candidate.is_empty() || pattern.is_empty() {
        return false;
    }

    let excluded = pattern.matches(candidate);
    if excluded {
        tracing::trace!("'{}' matched an exclusion pattern", candidate);
    }
    excluded
}

fn pattern_matches(pattern: &str, candidate: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }

    if pattern == candidate || candidate.contains(pattern) {
        return true;
    }

    // An invalid glob is simply a pattern that does not match
    glob::Pattern::new(pattern).map_or(false, |p| p.matches(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn many(patterns: &[&str]) -> ExclusionPattern {
        ExclusionPattern::Many(patterns.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    fn test_absent_or_empty_never_excludes() {
        assert!(!is_excluded(None, Some("anything")));
        assert!(!is_excluded(Some(&many(&[])), Some("anything")));
        assert!(!is_excluded(Some(&"".into()), Some("anything")));
        assert!(!is_excluded(Some(&many(&["foo"])), None));
        assert!(!is_excluded(Some(&many(&["foo"])), Some("")));
    }

    #[test]
    fn test_list_matches_any_element() {
        let patterns = many(&["foo", "bar"]);
        assert!(is_excluded(Some(&patterns), Some("bar")));
        assert!(!is_excluded(Some(&patterns), Some("baz")));
    }

    #[test]
    fn test_single_pattern_glob_and_substring() {
        let glob = ExclusionPattern::from("/home/*/secret*");
        assert!(is_excluded(Some(&glob), Some("/home/me/secret-project")));
        assert!(!is_excluded(Some(&glob), Some("/home/me/public")));

        let substring = ExclusionPattern::from("github.com/acme");
        assert!(is_excluded(
            Some(&substring),
            Some("https://github.com/acme/widgets")
        ));
    }

    #[test]
    fn test_malformed_glob_is_not_fatal() {
        let broken = ExclusionPattern::from("[unclosed");
        assert!(!is_excluded(Some(&broken), Some("somewhere")));
        assert!(is_excluded(Some(&broken), Some("a[unclosed")));
    }

    #[test]
    fn test_deserializes_string_or_list() {
        let single: ExclusionPattern = serde_json::from_str(r#""gitlab.com""#).unwrap();
        assert_eq!(single, ExclusionPattern::Single("gitlab.com".to_string()));

        let list: ExclusionPattern = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(list, many(&["a", "b"]));
    }
}
