//! Normalized resource, action and principal lists.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumIter};
use utoipa::ToSchema;

use crate::coerce::sorted_list_of_strings;

/// Which statement field a [`Targets`] was read from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumIter,
)]
pub enum TargetKind {
    Resource,
    Action,
    Principal,
}

impl TargetKind {
    /// The key that lists the targets directly, e.g. `Action`.
    pub fn positive_key(&self) -> &'static str {
        match self {
            Self::Resource => "Resource",
            Self::Action => "Action",
            Self::Principal => "Principal",
        }
    }

    /// The key that lists everything except the targets, e.g. `NotAction`.
    pub fn negative_key(&self) -> &'static str {
        match self {
            Self::Resource => "NotResource",
            Self::Action => "NotAction",
            Self::Principal => "NotPrincipal",
        }
    }
}

/// A sorted list of target strings, plus whether it came from the `Not*` key.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Targets {
    kind: TargetKind,
    values: Vec<String>,
    negated: bool,
}

impl PartialEq for Targets {
    fn eq(&self, other: &Self) -> bool {
        self.negated == other.negated && self.values == other.values
    }
}

impl Eq for Targets {}

impl Targets {
    /// Read the targets of `kind` from a statement object.
    ///
    /// Presence of the negative key decides negation, even if its value is
    /// empty or null.
    pub fn from_statement(statement: &Map<String, Value>, kind: TargetKind) -> Self {
        let (raw, negated) = match statement.get(kind.negative_key()) {
            Some(raw) => (Some(raw), true),
            None => (statement.get(kind.positive_key()), false),
        };

        Targets {
            kind,
            values: sorted_list_of_strings(raw),
            negated,
        }
    }

    /// Empty, non-negated targets.
    pub fn empty(kind: TargetKind) -> Self {
        Targets {
            kind,
            values: Vec::new(),
            negated: false,
        }
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Use `placeholder` as the only value if there are none.
    #[must_use]
    pub fn replace_if_empty(mut self, placeholder: impl Into<String>) -> Self {
        if self.values.is_empty() {
            self.values.push(placeholder.into());
        }
        self
    }

    /// Replace every literal `*` with `replacement`.
    #[must_use]
    pub fn replace_wildcard(self, replacement: &str) -> Self {
        let values = self
            .values
            .into_iter()
            .map(|v| if v == "*" { replacement.to_string() } else { v })
            .sorted()
            .collect();
        Targets { values, ..self }
    }

    /// One value per line, prefixed with `NOT ` when negated.
    pub fn render(&self) -> String {
        if self.negated {
            self.values.iter().map(|v| format!("NOT {v}")).join("\n")
        } else {
            self.values.join("\n")
        }
    }

    /// The `(key, values)` pair this serializes to in a normalized
    /// statement. Negated targets always keep their key, since its presence
    /// alone selects negation; empty positive targets produce `None`.
    pub(crate) fn json_entry(&self) -> Option<(&'static str, &[String])> {
        if self.negated {
            return Some((self.kind.negative_key(), &self.values));
        }
        if self.values.is_empty() {
            return None;
        }
        Some((self.kind.positive_key(), &self.values))
    }
}

/// Render targets for display.
pub fn render_targets(targets: &Targets) -> String {
    targets.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;
    use yare::parameterized;

    fn targets(raw: Value, kind: TargetKind) -> Targets {
        let map = raw.as_object().cloned().unwrap_or_default();
        Targets::from_statement(&map, kind)
    }

    #[test]
    fn test_positive_key_is_not_negated() {
        for kind in TargetKind::iter() {
            let t = targets(json!({ kind.positive_key(): ["b", "a"] }), kind);
            assert!(!t.is_negated());
            assert_eq!(t.values(), &["a".to_string(), "b".to_string()]);
        }
    }

    #[parameterized(
        empty_list = { json!({"NotAction": []}) },
        empty_string = { json!({"NotAction": ""}) },
        null = { json!({"NotAction": null}) },
        with_sibling = { json!({"Action": ["s3:GetObject"], "NotAction": ["s3:PutObject"]}) },
    )]
    fn test_negative_key_presence_negates(raw: Value) {
        let t = targets(raw, TargetKind::Action);
        assert!(t.is_negated());
        assert!(!t.values().contains(&"s3:GetObject".to_string()));
    }

    #[test]
    fn test_absent_keys_are_empty() {
        let t = targets(json!({}), TargetKind::Resource);
        assert!(t.is_empty());
        assert!(!t.is_negated());
        assert_eq!(t, Targets::empty(TargetKind::Resource));
    }

    #[test]
    fn test_equality_ignores_source_order() {
        let a = targets(json!({"Action": ["s3:PutObject", "s3:GetObject"]}), TargetKind::Action);
        let b = targets(json!({"Action": ["s3:GetObject", "s3:PutObject"]}), TargetKind::Action);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_respects_negation_and_multiplicity() {
        let a = targets(json!({"Action": ["s3:GetObject"]}), TargetKind::Action);
        let b = targets(json!({"NotAction": ["s3:GetObject"]}), TargetKind::Action);
        let c = targets(json!({"Action": ["s3:GetObject", "s3:GetObject"]}), TargetKind::Action);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_replace_if_empty() {
        let filled = Targets::empty(TargetKind::Principal).replace_if_empty("X");
        assert_eq!(filled.values(), &["X".to_string()]);

        let untouched = targets(json!({"Principal": "*"}), TargetKind::Principal).replace_if_empty("X");
        assert_eq!(untouched.values(), &["*".to_string()]);
    }

    #[test]
    fn test_replace_wildcard_resorts() {
        let t = targets(json!({"Resource": ["*", "arn:b"]}), TargetKind::Resource)
            .replace_wildcard("All resources");
        assert_eq!(
            t.values(),
            &["All resources".to_string(), "arn:b".to_string()]
        );
    }

    #[test]
    fn test_replace_wildcard_keeps_negation() {
        let t = targets(json!({"NotResource": "*"}), TargetKind::Resource).replace_wildcard("R");
        assert!(t.is_negated());
        assert_eq!(t.values(), &["R".to_string()]);
    }

    #[test]
    fn test_render() {
        let plain = targets(json!({"Action": ["s3:PutObject", "s3:GetObject"]}), TargetKind::Action);
        assert_eq!(render_targets(&plain), "s3:GetObject\ns3:PutObject");

        let negated = targets(json!({"NotAction": ["s3:*", "ec2:*"]}), TargetKind::Action);
        assert_eq!(negated.render(), "NOT ec2:*\nNOT s3:*");

        assert_eq!(Targets::empty(TargetKind::Action).render(), "");
    }

    #[test]
    fn test_json_entry() {
        let negated = targets(json!({"NotPrincipal": {"AWS": "1"}}), TargetKind::Principal);
        assert_eq!(
            negated.json_entry(),
            Some(("NotPrincipal", &["AWS:1".to_string()][..]))
        );
        assert_eq!(Targets::empty(TargetKind::Principal).json_entry(), None);
    }

    #[test]
    fn test_json_entry_keeps_empty_negated_key() {
        let negated = targets(json!({"NotAction": []}), TargetKind::Action);
        let none: &[String] = &[];
        assert_eq!(negated.json_entry(), Some(("NotAction", none)));
    }
}
