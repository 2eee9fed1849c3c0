use serde_json::Value;

/// Render a condition block as compact multi-line text.
///
/// The block is pretty-printed with two-space indentation, then the outer
/// braces are dropped and the remaining lines de-indented by one level:
///
/// ```rust
/// use iam_statement_diff::render_condition;
/// use serde_json::json;
///
/// let condition = json!({"ArnLike": {"AWS:SourceArn": "${Topic}"}});
/// assert_eq!(
///     render_condition(Some(&condition)),
///     "\"ArnLike\": {\n  \"AWS:SourceArn\": \"${Topic}\"\n}"
/// );
/// assert_eq!(render_condition(None), "");
/// ```
pub fn render_condition(condition: Option<&Value>) -> String {
    let condition = match condition {
        None | Some(Value::Null) => return String::new(),
        Some(Value::Object(map)) if map.is_empty() => return String::new(),
        Some(c) => c,
    };

    let Ok(pretty) = serde_json::to_string_pretty(condition) else {
        return String::new();
    };

    let lines: Vec<&str> = pretty.lines().collect();
    if lines.len() < 2 {
        return String::new();
    }

    lines[1..lines.len() - 1]
        .iter()
        .map(|line| line.get(2..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}
