//! Statement-level changes between two versions of a policy.

use tracing::debug;

use crate::types::{Statement, TargetKind};

/// Column headers of [`StatementChanges::summarize`].
pub const SUMMARY_HEADER: [&str; 6] = ["", "Resource", "Effect", "Action", "Principal", "Condition"];

/// Statements added and removed between an old and a new list.
///
/// Statements are matched by equality, so reordering a list or the values
/// inside a statement is not a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementChanges {
    additions: Vec<Statement>,
    removals: Vec<Statement>,
}

impl StatementChanges {
    pub fn new(old: &[Statement], new: &[Statement]) -> Self {
        let additions = difference(new, old);
        let removals = difference(old, new);

        debug!(
            event = "Diff",
            phase = "Statements",
            additions = additions.len(),
            removals = removals.len()
        );

        StatementChanges {
            additions,
            removals,
        }
    }

    pub fn additions(&self) -> &[Statement] {
        &self.additions
    }

    pub fn removals(&self) -> &[Statement] {
        &self.removals
    }

    pub fn has_additions(&self) -> bool {
        !self.additions.is_empty()
    }

    pub fn has_removals(&self) -> bool {
        !self.removals.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        self.has_additions() || self.has_removals()
    }

    /// True when an added statement grants something rather than
    /// restricting it.
    pub fn permissions_broadened(&self) -> bool {
        self.additions.iter().any(|s| !s.is_negative_statement())
    }

    /// Table rows for display: the header, then one `+` row per addition and
    /// one `-` row per removal, ordered by resource.
    pub fn summarize(&self) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = self
            .additions
            .iter()
            .map(|s| summary_row("+", s))
            .chain(self.removals.iter().map(|s| summary_row("-", s)))
            .collect();

        rows.sort_by(|a, b| a[1].cmp(&b[1]));
        rows.insert(0, SUMMARY_HEADER.iter().map(|h| h.to_string()).collect());
        rows
    }
}

fn difference(xs: &[Statement], ys: &[Statement]) -> Vec<Statement> {
    xs.iter().filter(|x| !ys.contains(*x)).cloned().collect()
}

fn summary_row(marker: &str, statement: &Statement) -> Vec<String> {
    let rendered = statement.render();
    vec![
        marker.to_string(),
        rendered.resource,
        rendered.effect,
        rendered.action,
        rendered.principal,
        rendered.condition,
    ]
}

/// Statements attached to an identity apply to that identity: fill in
/// `principal` where no principal, or the wildcard, is given.
pub fn default_principal(principal: &str, statements: Vec<Statement>) -> Vec<Statement> {
    fill_targets(TargetKind::Principal, principal, statements)
}

/// Statements attached to a resource apply to that resource: fill in
/// `resource` where no resource, or the wildcard, is given.
pub fn default_resource(resource: &str, statements: Vec<Statement>) -> Vec<Statement> {
    fill_targets(TargetKind::Resource, resource, statements)
}

fn fill_targets(kind: TargetKind, value: &str, statements: Vec<Statement>) -> Vec<Statement> {
    statements
        .into_iter()
        .map(|s| s.map_targets(kind, |t| t.replace_if_empty(value).replace_wildcard(value)))
        .collect()
}
