use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a free-form argument as JSON, falling back to a plain string.
#[must_use]
pub fn parse_json_or_text(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use krit_core::enums::EventKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{parse_enum, parse_json_or_text};

    #[test]
    fn parse_enum_accepts_snake_and_kebab_case() {
        let snake: EventKind = parse_enum("ki_pruefung", "kind").expect("snake case should parse");
        let kebab: EventKind = parse_enum("ki-pruefung", "kind").expect("kebab case should parse");
        assert_eq!(snake, EventKind::KiPruefung);
        assert_eq!(kebab, EventKind::KiPruefung);
    }

    #[test]
    fn parse_enum_reports_field_and_value() {
        let error = parse_enum::<EventKind>("genehmigt", "kind").expect_err("should fail");
        let message = error.to_string();
        assert!(message.contains("kind"));
        assert!(message.contains("genehmigt"));
    }

    #[test]
    fn json_arguments_are_structured() {
        assert_eq!(parse_json_or_text("{\"punkte\": 3}"), json!({"punkte": 3}));
        assert_eq!(parse_json_or_text("4"), json!(4));
    }

    #[test]
    fn non_json_arguments_stay_text() {
        assert_eq!(parse_json_or_text("passt so"), json!("passt so"));
        assert_eq!(parse_json_or_text("{kaputt"), json!("{kaputt"));
    }
}
