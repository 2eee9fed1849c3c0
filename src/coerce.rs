use itertools::Itertools;
use serde_json::Value;

/// Flatten an arbitrary JSON value into a list of strings.
///
/// Arrays produce one string per element (nested lists are joined with `,`),
/// objects produce one `key:value` string per coerced value, in key order.
/// `None` and `null` produce nothing.
pub fn force_list_of_strings(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| force_list_of_strings(Some(item)).join(","))
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .flat_map(|(key, v)| {
                force_list_of_strings(Some(v))
                    .into_iter()
                    .map(move |s| format!("{key}:{s}"))
            })
            .collect(),
        Some(Value::Bool(b)) => vec![b.to_string()],
        Some(Value::Number(n)) => vec![n.to_string()],
    }
}

/// Coerce and sort in code-point order.
pub(crate) fn sorted_list_of_strings(value: Option<&Value>) -> Vec<String> {
    force_list_of_strings(value).into_iter().sorted().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yare::parameterized;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[parameterized(
        wildcard = { json!("*"), &["*"] },
        null = { json!(null), &[] },
        flat_list = { json!(["s3:GetObject", "s3:PutObject"]), &["s3:GetObject", "s3:PutObject"] },
        nested_list = { json!(["a", ["b", "c"]]), &["a", "b,c"] },
        null_in_list = { json!(["a", null]), &["a", ""] },
        principal_map = { json!({"AWS": "123", "Service": "x"}), &["AWS:123", "Service:x"] },
        principal_map_with_list = { json!({"AWS": ["1", "2"]}), &["AWS:1", "AWS:2"] },
        number = { json!(42), &["42"] },
        boolean = { json!(true), &["true"] },
        empty_map = { json!({}), &[] },
    )]
    fn test_force_list_of_strings(raw: Value, expected: &[&str]) {
        assert_eq!(force_list_of_strings(Some(&raw)), strings(expected));
    }

    #[test]
    fn test_force_list_of_strings_absent() {
        assert!(force_list_of_strings(None).is_empty());
    }

    #[test]
    fn test_object_keys_keep_insertion_order() {
        let raw = json!({"Service": "x", "AWS": "123"});
        assert_eq!(
            force_list_of_strings(Some(&raw)),
            strings(&["Service:x", "AWS:123"])
        );
        assert_eq!(
            sorted_list_of_strings(Some(&raw)),
            strings(&["AWS:123", "Service:x"])
        );
    }

    #[test]
    fn test_nested_object_in_list_is_joined() {
        let raw = json!([{"Fn::GetAtt": ["Bucket", "Arn"]}]);
        assert_eq!(
            force_list_of_strings(Some(&raw)),
            strings(&["Fn::GetAtt:Bucket,Fn::GetAtt:Arn"])
        );
    }

    #[test]
    fn test_sorting_is_code_point_order() {
        let raw = json!(["b", "B", "a", "*"]);
        assert_eq!(
            sorted_list_of_strings(Some(&raw)),
            strings(&["*", "B", "a", "b"])
        );
    }
}
