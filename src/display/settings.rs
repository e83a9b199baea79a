//! Settings display formatting

use serde_json::{Map, Value};

/// One `key: value` line per setting, keys sorted
pub fn format_settings(settings: &Map<String, Value>) -> String {
    let mut keys: Vec<_> = settings.keys().collect();
    keys.sort();

    let width = keys.iter().map(|k| k.len()).max().unwrap_or(0);
    let mut output = String::new();
    for key in keys {
        let rendered = match &settings[key.as_str()] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        output.push_str(&format!("{:<width$}  {}\n", key, rendered, width = width));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_settings() {
        let mut settings = Map::new();
        settings.insert("locale".into(), json!("fr-FR"));
        settings.insert("currency".into(), json!("EUR"));
        settings.insert("categories".into(), json!({ "income": ["Salaire"] }));

        let output = format_settings(&settings);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], r#"categories  {"income":["Salaire"]}"#);
        assert_eq!(lines[1], "currency    EUR");
        assert_eq!(lines[2], "locale      fr-FR");
    }
}
