//! Normalized IAM policy statements.

use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::StatementError;
use crate::render::render_condition;

use super::effect::Effect;
use super::targets::{TargetKind, Targets};

/// One IAM policy statement in a form that can be compared and rendered.
///
/// A statement is either parsed from an object, or holds the raw text of an
/// unresolved expression that stood where the statement should be. In the
/// latter case every structured field is empty.
#[derive(Debug, Clone)]
pub struct Statement {
    sid: Option<String>,
    effect: Effect,
    resources: Targets,
    actions: Targets,
    principals: Targets,
    condition: Option<Value>,
    raw_expression: Option<String>,
}

/// A statement flattened to display strings, one per table column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RenderedStatement {
    pub resource: String,
    pub effect: String,
    pub action: String,
    pub principal: String,
    pub condition: String,
}

impl Statement {
    /// Build a statement from a statement object.
    pub fn from_object(statement: &Map<String, Value>) -> Self {
        Statement {
            sid: statement
                .get("Sid")
                .and_then(Value::as_str)
                .map(str::to_string),
            effect: Effect::from_value(statement.get("Effect")),
            resources: Targets::from_statement(statement, TargetKind::Resource),
            actions: Targets::from_statement(statement, TargetKind::Action),
            principals: Targets::from_statement(statement, TargetKind::Principal),
            condition: statement
                .get("Condition")
                .filter(|c| !c.is_null())
                .cloned(),
            raw_expression: None,
        }
    }

    /// A statement that could not be resolved and is kept as text.
    pub fn unparseable(expression: impl Into<String>) -> Self {
        Statement {
            raw_expression: Some(expression.into()),
            ..Statement::default()
        }
    }

    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn resources(&self) -> &Targets {
        &self.resources
    }

    pub fn actions(&self) -> &Targets {
        &self.actions
    }

    pub fn principals(&self) -> &Targets {
        &self.principals
    }

    pub fn targets(&self, kind: TargetKind) -> &Targets {
        match kind {
            TargetKind::Resource => &self.resources,
            TargetKind::Action => &self.actions,
            TargetKind::Principal => &self.principals,
        }
    }

    pub fn condition(&self) -> Option<&Value> {
        self.condition.as_ref()
    }

    pub fn raw_expression(&self) -> Option<&str> {
        self.raw_expression.as_deref()
    }

    /// Apply an edit such as [`Targets::replace_if_empty`] to one field.
    #[must_use]
    pub fn map_targets(mut self, kind: TargetKind, f: impl FnOnce(Targets) -> Targets) -> Self {
        let slot = match kind {
            TargetKind::Resource => &mut self.resources,
            TargetKind::Action => &mut self.actions,
            TargetKind::Principal => &mut self.principals,
        };
        let current = std::mem::replace(slot, Targets::empty(kind));
        *slot = f(current);
        self
    }

    /// Whether the statement speaks about the complement of its targets.
    ///
    /// For `Allow` that is the case when any field is negated. For `Deny`
    /// (and unknown effects) the reading flips: a negated deny leaves the
    /// listed targets allowed.
    pub fn is_negative_statement(&self) -> bool {
        let any_negated = self.resources.is_negated()
            || self.actions.is_negated()
            || self.principals.is_negated();

        if self.effect == Effect::Allow {
            any_negated
        } else {
            !any_negated
        }
    }

    pub fn render(&self) -> RenderedStatement {
        match &self.raw_expression {
            Some(expression) => RenderedStatement {
                resource: expression.clone(),
                principal: self.principals.render(),
                ..RenderedStatement::default()
            },
            None => RenderedStatement {
                resource: self.resources.render(),
                effect: self.effect.to_string(),
                action: self.actions.render(),
                principal: self.principals.render(),
                condition: render_condition(self.condition.as_ref()),
            },
        }
    }
}

impl Default for Statement {
    fn default() -> Self {
        Statement {
            sid: None,
            effect: Effect::Unknown,
            resources: Targets::empty(TargetKind::Resource),
            actions: Targets::empty(TargetKind::Action),
            principals: Targets::empty(TargetKind::Principal),
            condition: None,
            raw_expression: None,
        }
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        self.sid == other.sid
            && self.effect == other.effect
            && self.raw_expression == other.raw_expression
            && self.resources == other.resources
            && self.actions == other.actions
            && self.principals == other.principals
            && self.condition == other.condition
    }
}

impl Eq for Statement {}

/// Serializes to a normalized statement object, or to the raw expression.
impl Serialize for Statement {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Some(expression) = &self.raw_expression {
            return ser.serialize_str(expression);
        }

        let mut m = ser.serialize_map(None)?;
        if let Some(sid) = &self.sid {
            m.serialize_entry("Sid", sid)?;
        }
        m.serialize_entry("Effect", &self.effect.to_string())?;
        for targets in [&self.resources, &self.actions, &self.principals] {
            if let Some((key, values)) = targets.json_entry() {
                m.serialize_entry(key, values)?;
            }
        }
        if let Some(condition) = &self.condition {
            m.serialize_entry("Condition", condition)?;
        }
        m.end()
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D>(de: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(de)?;
        Ok(crate::parser::parse_statement(&raw))
    }
}

impl FromStr for Statement {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: Value = serde_json::from_str(s)?;
        Ok(crate::parser::parse_statement(&raw))
    }
}
