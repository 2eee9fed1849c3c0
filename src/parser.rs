use serde_json::Value;
use tracing::{debug, trace};

use crate::types::{ResourcePermissionGrant, Statement};

/// Parse one raw statement.
///
/// A string is an unresolved expression and becomes an unparseable
/// statement. An object is read field by field. Anything else yields a
/// statement with every field at its default. This never fails.
///
/// Example:
/// ```rust
/// use iam_statement_diff::{Effect, parse_statement};
/// use serde_json::json;
///
/// let statement = parse_statement(&json!({
///     "Effect": "Allow",
///     "Action": ["s3:PutObject", "s3:GetObject"],
///     "Resource": "*"
/// }));
/// assert_eq!(statement.effect(), Effect::Allow);
/// assert_eq!(statement.actions().values(), &["s3:GetObject", "s3:PutObject"]);
/// ```
pub fn parse_statement(raw: &Value) -> Statement {
    match raw {
        Value::Object(map) => Statement::from_object(map),
        Value::String(expression) => {
            debug!(
                event = "Parse",
                phase = "Unparseable",
                expression = expression.as_str()
            );
            Statement::unparseable(expression.as_str())
        }
        other => {
            debug!(event = "Parse", phase = "Default", value = %other);
            Statement::default()
        }
    }
}

/// Parse a statement list: absent or null gives no statements, a list gives
/// one statement per element, and any other value a single statement.
pub fn parse_statement_list(raw: Option<&Value>) -> Vec<Statement> {
    let statements: Vec<Statement> = match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(parse_statement).collect(),
        Some(single) => vec![parse_statement(single)],
    };
    trace!(event = "Parse", phase = "List", count = statements.len());
    statements
}

/// Parse the `Statement` list of a policy document.
///
/// A document that is not an object (for example an unresolved expression
/// standing in for the whole document) is parsed as a statement list itself.
pub fn parse_policy_document(document: &Value) -> Vec<Statement> {
    match document {
        Value::Object(map) => parse_statement_list(map.get("Statement")),
        other => parse_statement_list(Some(other)),
    }
}

/// Synthesize the statement equivalent to a function permission grant.
///
/// Input that cannot be read as a grant is treated as a grant with no
/// fields set, which still yields an `Allow` statement.
pub fn parse_resource_permission_grant(raw: &Value) -> Statement {
    let grant = ResourcePermissionGrant::try_from(raw).unwrap_or_else(|e| {
        debug!(event = "Parse", phase = "Grant", error = %e);
        ResourcePermissionGrant::default()
    });
    Statement::from(&grant)
}
