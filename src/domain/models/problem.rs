#[cfg(test)]
#[path = "problem_test.rs"]
mod tests;

use std::collections::HashMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use super::Language;

/// Ids arrive as numbers from some endpoints and as slugs from others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(text) => return Ok(text),
        serde_json::Value::Number(num) => return Ok(num.to_string()),
        serde_json::Value::Null => return Ok("".to_string()),
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected a string or number id, got {other}"
            )))
        }
    }
}

/// Judges send `null` where a field has nothing to report.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    return Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default());
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
    #[serde(default, rename = "isHidden")]
    pub is_hidden: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub input_format: String,
    #[serde(default)]
    pub output_format: String,
    #[serde(default)]
    pub sample_input: String,
    #[serde(default)]
    pub sample_output: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default, rename = "starterCode", skip_serializing_if = "Option::is_none")]
    pub starter_code: Option<HashMap<String, String>>,
}

impl Problem {
    /// Server provided starter code for the language. Keys are matched
    /// exactly first, then case-insensitively.
    pub fn starter_code_for(&self, language: &Language) -> Option<&str> {
        let starters = self.starter_code.as_ref()?;
        let name = language.to_string();
        if let Some(code) = starters.get(&name) {
            return Some(code.as_str());
        }

        return starters
            .iter()
            .find(|(key, _)| return key.eq_ignore_ascii_case(&name))
            .map(|(_, code)| return code.as_str());
    }

    pub fn public_test_cases(&self) -> Vec<&TestCase> {
        return self
            .test_cases
            .iter()
            .filter(|case| return !case.is_hidden)
            .collect();
    }
}
