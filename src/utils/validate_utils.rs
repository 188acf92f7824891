use core::fmt;

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer,
};
use validator::ValidationError;

pub fn trim_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Cannot be empty".into()));
    }
    Ok(())
}

struct IdExtractor;

impl<'de> Visitor<'de> for IdExtractor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or an integer id")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }
}

/// Accepts `"12"` or `12` and yields `"12"`.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IdExtractor)
}

struct OptionIdExtractor;

impl<'de> Visitor<'de> for OptionIdExtractor {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, a string or an integer id")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = deserialize_id(deserializer)?;
        Ok(if id.is_empty() { None } else { Some(id) })
    }
}

pub fn deserialize_option_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionIdExtractor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Record {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_option_id")]
        parent: Option<String>,
    }

    #[test]
    fn accepts_numeric_and_string_ids() {
        let numeric: Record = serde_json::from_str(r#"{"id": 7, "parent": 3}"#).unwrap();
        assert_eq!(numeric.id, "7");
        assert_eq!(numeric.parent.as_deref(), Some("3"));

        let text: Record = serde_json::from_str(r#"{"id": "a1f"}"#).unwrap();
        assert_eq!(text.id, "a1f");
        assert_eq!(text.parent, None);
    }

    #[test]
    fn null_and_empty_parent_are_none() {
        let r: Record = serde_json::from_str(r#"{"id": 1, "parent": null}"#).unwrap();
        assert_eq!(r.parent, None);
        let r: Record = serde_json::from_str(r#"{"id": 1, "parent": ""}"#).unwrap();
        assert_eq!(r.parent, None);
    }

    #[test]
    fn blank_is_rejected() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank(" hi ").is_ok());
    }
}
