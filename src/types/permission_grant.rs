//! Resource-based permission grants on functions (Lambda `AddPermission`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use utoipa::ToSchema;

use crate::error::StatementError;

use super::statement::Statement;

/// A bare 12-digit AWS account id, ASCII digits only.
static ACCOUNT_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{12}$").expect("valid account id pattern")
});

/// A function permission, modelled on the properties of
/// `AWS::Lambda::Permission`. Field values are kept as JSON so unresolved
/// references survive into the synthesized statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourcePermissionGrant {
    pub action: Value,
    pub function_name: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_arn: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_account: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_source_token: Option<Value>,
}

impl ResourcePermissionGrant {
    pub fn new(action: impl Into<Value>, function_name: impl Into<Value>) -> Self {
        ResourcePermissionGrant {
            action: action.into(),
            function_name: function_name.into(),
            ..Default::default()
        }
    }

    pub fn with_principal(mut self, principal: impl Into<Value>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    pub fn with_source_arn(mut self, source_arn: impl Into<Value>) -> Self {
        self.source_arn = Some(source_arn.into());
        self
    }

    pub fn with_source_account(mut self, source_account: impl Into<Value>) -> Self {
        self.source_account = Some(source_account.into());
        self
    }

    pub fn with_event_source_token(mut self, token: impl Into<Value>) -> Self {
        self.event_source_token = Some(token.into());
        self
    }

    /// The equivalent policy statement object.
    ///
    /// `SourceAccount` and `EventSourceToken` both write the whole
    /// `StringEquals` block, so when both are set only the token survives.
    pub fn to_statement_object(&self) -> Map<String, Value> {
        let mut statement = Map::new();
        statement.insert("Effect".to_string(), json!("Allow"));
        if !self.action.is_null() {
            statement.insert("Action".to_string(), self.action.clone());
        }
        if !self.function_name.is_null() {
            statement.insert("Resource".to_string(), self.function_name.clone());
        }
        if let Some(principal) = &self.principal {
            statement.insert("Principal".to_string(), principal_value(principal));
        }

        let mut condition = Map::new();
        if let Some(arn) = &self.source_arn {
            condition.insert("ArnLike".to_string(), json!({ "AWS:SourceArn": arn }));
        }
        if let Some(account) = &self.source_account {
            condition.insert(
                "StringEquals".to_string(),
                json!({ "AWS:SourceAccount": account }),
            );
        }
        if let Some(token) = &self.event_source_token {
            condition.insert(
                "StringEquals".to_string(),
                json!({ "lambda:EventSourceToken": token }),
            );
        }
        if !condition.is_empty() {
            statement.insert("Condition".to_string(), Value::Object(condition));
        }

        statement
    }
}

fn principal_value(principal: &Value) -> Value {
    match principal.as_str() {
        Some("*") => json!("*"),
        Some(id) if ACCOUNT_ID.is_match(id) => json!({ "AWS": format!("arn:aws:iam::{id}:root") }),
        _ => json!({ "Service": principal }),
    }
}

impl From<&ResourcePermissionGrant> for Statement {
    fn from(grant: &ResourcePermissionGrant) -> Self {
        Statement::from_object(&grant.to_statement_object())
    }
}

impl TryFrom<&Value> for ResourcePermissionGrant {
    type Error = StatementError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        ResourcePermissionGrant::deserialize(value)
            .map_err(|e| StatementError::InvalidGrant(e.to_string()))
    }
}
