//! Event name parsing.
//!
//! Subscription strings may carry several specifiers separated by commas,
//! slashes or spaces (`"resize tick.clock"`). Each specifier is either
//! `event` or `event.namespace`. This module is pure string handling with
//! no registry access, so every rule is testable in isolation.

use std::fmt;

/// Reserved namespace used when a specifier names none.
///
/// Operations resolved to this namespace act on every namespace.
pub const BASE_NAMESPACE: &str = "base";

/// A parsed `event.namespace` specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventName {
    original: String,
    value: String,
    namespace: String,
}

impl EventName {
    /// Parse a single specifier.
    ///
    /// The value is the text before the first `.`, the namespace the text
    /// between the first and second `.`. A missing or empty namespace
    /// resolves to [`BASE_NAMESPACE`].
    pub fn parse(specifier: &str) -> Self {
        let mut parts = specifier.split('.');
        let value = parts.next().unwrap_or_default();
        let namespace = match parts.next() {
            Some(ns) if !ns.is_empty() => ns,
            _ => BASE_NAMESPACE,
        };

        Self {
            original: specifier.to_string(),
            value: value.to_string(),
            namespace: namespace.to_string(),
        }
    }

    /// The specifier as it was given.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Event identifier (may be empty for namespace-only specifiers).
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns true if this name acts across all namespaces.
    pub fn is_base_scoped(&self) -> bool {
        self.namespace == BASE_NAMESPACE
    }

    /// Returns true if this specifier targets a whole namespace (`.ns`).
    pub fn is_namespace_only(&self) -> bool {
        !self.is_base_scoped() && self.value.is_empty()
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.value, self.namespace)
    }
}

/// Split a raw names string into specifier strings.
///
/// 1. Every character that is not ASCII alphanumeric, space, comma, slash
///    or dot is dropped.
/// 2. Runs of commas and slashes collapse into a single space.
/// 3. The result is split on single spaces.
///
/// Step 3 keeps empty tokens (`"a  b"` yields `["a", "", "b"]`); callers
/// decide whether an empty specifier is meaningful.
pub fn resolve_names(names: &str) -> Vec<String> {
    let mut cleaned = String::with_capacity(names.len());
    let mut in_separator_run = false;

    for c in names.chars() {
        match c {
            ',' | '/' => {
                if !in_separator_run {
                    cleaned.push(' ');
                    in_separator_run = true;
                }
            }
            c if c.is_ascii_alphanumeric() || c == ' ' || c == '.' => {
                cleaned.push(c);
                in_separator_run = false;
            }
            // Dropped characters do not break a separator run: "a,!/b" is "a b".
            _ => {}
        }
    }

    cleaned.split(' ').map(str::to_string).collect()
}

/// Parse every non-empty specifier of a names string.
pub fn parse_names(names: &str) -> Vec<EventName> {
    resolve_names(names)
        .iter()
        .filter(|specifier| !specifier.is_empty())
        .map(|specifier| EventName::parse(specifier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_event_is_base_scoped() {
        let name = EventName::parse("resize");
        assert_eq!(name.value(), "resize");
        assert_eq!(name.namespace(), BASE_NAMESPACE);
        assert!(name.is_base_scoped());
        assert!(!name.is_namespace_only());
    }

    #[test]
    fn test_parse_event_with_namespace() {
        let name = EventName::parse("ready.loader");
        assert_eq!(name.original(), "ready.loader");
        assert_eq!(name.value(), "ready");
        assert_eq!(name.namespace(), "loader");
        assert!(!name.is_base_scoped());
    }

    #[test]
    fn test_parse_trailing_dot_falls_back_to_base() {
        let name = EventName::parse("tick.");
        assert_eq!(name.value(), "tick");
        assert!(name.is_base_scoped());
    }

    #[test]
    fn test_parse_namespace_only() {
        let name = EventName::parse(".camera");
        assert_eq!(name.value(), "");
        assert_eq!(name.namespace(), "camera");
        assert!(name.is_namespace_only());
    }

    #[test]
    fn test_parse_ignores_parts_after_second_dot() {
        let name = EventName::parse("a.b.c");
        assert_eq!(name.value(), "a");
        assert_eq!(name.namespace(), "b");
    }

    #[test]
    fn test_resolve_names_splits_on_all_separators() {
        assert_eq!(resolve_names("a,b/c d"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_resolve_names_collapses_separator_runs() {
        assert_eq!(resolve_names("a,,/b"), vec!["a", "b"]);
    }

    #[test]
    fn test_resolve_names_strips_invalid_characters() {
        assert_eq!(resolve_names("re-size!.ns_1"), vec!["resize.ns1"]);
    }

    #[test]
    fn test_resolve_names_keeps_empty_tokens_between_spaces() {
        assert_eq!(resolve_names("a  b"), vec!["a", "", "b"]);
        assert_eq!(resolve_names("a, b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_parse_names_skips_empty_tokens() {
        let names = parse_names(" tick,  resize.sizes ");
        let values: Vec<_> = names.iter().map(|n| n.value()).collect();
        assert_eq!(values, vec!["tick", "resize"]);
        assert_eq!(names[1].namespace(), "sizes");
    }

    #[test]
    fn test_display_includes_namespace() {
        assert_eq!(EventName::parse("tick").to_string(), "tick.base");
    }
}
