use std::path::Path;

use serde_json::{Map, Value as JsonValue};

/// Environment variables consulted for a `configuration` key nobody else supplied.
pub const ENV_FALLBACKS: [(&str, &str); 2] = [
    ("accessToken", "ERP_ACCESS_TOKEN"),
    ("password", "ERP_PASSWORD"),
];

pub fn load_state(path: &Path) -> Result<JsonValue, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read state file {}: {e}", path.display()))?;
    let value = erp_core::parse_value_str(&content)
        .map_err(|e| format!("state file {} is neither valid JSON nor YAML: {e}", path.display()))?;
    match value {
        JsonValue::Object(_) | JsonValue::Null => Ok(value),
        _ => Err(format!("state file {} must contain an object", path.display())),
    }
}

/// `KEY=VALUE` pairs become string entries of `overrides.configuration`.
pub fn merge_set_configuration(overrides: &mut JsonValue, set: &[String]) -> Result<(), String> {
    if set.is_empty() {
        return Ok(());
    }
    let configuration = configuration_mut(overrides)?;
    for s in set {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| format!("--set expects KEY=VALUE, got {s:?}"))?;
        configuration.insert(k.to_string(), JsonValue::String(v.to_string()));
    }
    Ok(())
}

/// Fill secrets from the environment when neither the job nor the overrides set them.
pub fn apply_env_fallbacks<F>(
    overrides: &mut JsonValue,
    job_state: Option<&JsonValue>,
    lookup: F,
) -> Result<(), String>
where
    F: Fn(&str) -> Option<String>,
{
    let in_job = |key: &str| {
        job_state
            .and_then(|s| s.get("configuration"))
            .and_then(|c| c.get(key))
            .is_some()
    };
    for (key, var) in ENV_FALLBACKS {
        if in_job(key) {
            continue;
        }
        if let Some(value) = lookup(var) {
            let configuration = configuration_mut(overrides)?;
            configuration
                .entry(key.to_string())
                .or_insert(JsonValue::String(value));
        }
    }
    Ok(())
}

fn configuration_mut(overrides: &mut JsonValue) -> Result<&mut Map<String, JsonValue>, String> {
    if overrides.is_null() {
        *overrides = JsonValue::Object(Map::new());
    }
    let root = overrides
        .as_object_mut()
        .ok_or_else(|| "state overrides must be an object".to_string())?;
    let configuration = root
        .entry("configuration".to_string())
        .or_insert_with(|| JsonValue::Object(Map::new()));
    if configuration.is_null() {
        *configuration = JsonValue::Object(Map::new());
    }
    configuration
        .as_object_mut()
        .ok_or_else(|| "state.configuration must be an object".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_values_land_in_configuration() {
        let mut overrides = JsonValue::Null;
        merge_set_configuration(
            &mut overrides,
            &["resource=https://h".to_string(), "apiVersion=9.2".to_string()],
        )
        .unwrap();
        assert_eq!(
            overrides,
            json!({ "configuration": { "resource": "https://h", "apiVersion": "9.2" } })
        );
    }

    #[test]
    fn set_without_equals_is_rejected() {
        let mut overrides = JsonValue::Null;
        assert!(merge_set_configuration(&mut overrides, &["oops".to_string()]).is_err());
    }

    #[test]
    fn env_fallback_only_fills_missing_keys() {
        let job = json!({ "configuration": { "password": "from-job" } });
        let mut overrides = json!({ "configuration": { "accessToken": "from-flag" } });
        apply_env_fallbacks(&mut overrides, Some(&job), |_| Some("from-env".to_string())).unwrap();
        assert_eq!(overrides, json!({ "configuration": { "accessToken": "from-flag" } }));

        let mut overrides = JsonValue::Null;
        apply_env_fallbacks(&mut overrides, None, |var| {
            (var == "ERP_ACCESS_TOKEN").then(|| "tok".to_string())
        })
        .unwrap();
        assert_eq!(overrides, json!({ "configuration": { "accessToken": "tok" } }));
    }
}
