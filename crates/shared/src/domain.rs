use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One backend-managed JSON document holding a batch of catalog items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub file_name: String,
    #[serde(default)]
    pub item_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Strings are taken verbatim and numbers use their decimal rendering,
    /// with integral floats written without a fraction (`1.0` is `"1"`).
    /// Anything else has no stable string form and is rejected.
    pub fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(render_number(n))),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Integers up to 2^53 survive an f64 round trip exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An ordered list of candidate keys for one display concern.
///
/// Upstream source formats name the same concept differently, so a value is
/// resolved by walking `candidates` and taking the first present one. New
/// formats are supported by extending the table.
#[derive(Debug, Clone, Copy)]
pub struct DisplayField {
    pub name: &'static str,
    pub candidates: &'static [&'static str],
    pub fallback: &'static str,
}

pub const TITLE_FIELD: DisplayField = DisplayField {
    name: "title",
    candidates: &["Artikelbeschreibung", "Name", "title"],
    fallback: "Item",
};

pub const ITEM_NUMBER_FIELD: DisplayField = DisplayField {
    name: "itemNumber",
    candidates: &["itemNumber", "item_number", "Artikelnummer", "article_number"],
    fallback: "-",
};

impl DisplayField {
    pub fn resolve(&self, fields: &Map<String, Value>) -> String {
        self.candidates
            .iter()
            .find_map(|key| fields.get(*key).and_then(present_text))
            .unwrap_or_else(|| self.fallback.to_string())
    }
}

// Empty strings, zero, false and null count as absent.
fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// A loosely-typed catalog record. Only `ID` is required.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub fields: Map<String, Value>,
}

impl Item {
    pub const ID_KEY: &'static str = "ID";

    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            return None;
        };
        let id = fields.get(Self::ID_KEY).and_then(ItemId::coerce)?;
        Some(Self { id, fields })
    }

    pub fn title(&self) -> String {
        TITLE_FIELD.resolve(&self.fields)
    }

    pub fn item_number(&self) -> String {
        ITEM_NUMBER_FIELD.resolve(&self.fields)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn coerces_string_and_numeric_ids() {
        assert_eq!(ItemId::coerce(&json!("83859")), Some(ItemId::new("83859")));
        assert_eq!(ItemId::coerce(&json!(42)), Some(ItemId::new("42")));
        assert_eq!(ItemId::coerce(&json!(1.0)), Some(ItemId::new("1")));
        assert_eq!(ItemId::coerce(&json!(-3.0)), Some(ItemId::new("-3")));
        assert_eq!(ItemId::coerce(&json!(2.5)), Some(ItemId::new("2.5")));
        assert_eq!(ItemId::coerce(&json!(null)), None);
        assert_eq!(ItemId::coerce(&json!({"nested": 1})), None);
    }

    #[test]
    fn item_requires_coercible_id() {
        assert!(Item::from_value(json!({"Name": "Chair"})).is_none());
        assert!(Item::from_value(json!("not an object")).is_none());
        let item = Item::from_value(json!({"ID": 7, "Name": "Chair"})).expect("item");
        assert_eq!(item.id.as_str(), "7");
    }

    #[test]
    fn title_uses_first_present_candidate() {
        let item = Item::from_value(json!({
            "ID": "1",
            "Artikelbeschreibung": "",
            "Name": "Sofa",
            "title": "ignored"
        }))
        .expect("item");
        assert_eq!(item.title(), "Sofa");
    }

    #[test]
    fn display_fields_fall_back_when_nothing_matches() {
        let item = Item::from_value(json!({"ID": "1", "Name": null, "itemNumber": 0}))
            .expect("item");
        assert_eq!(item.title(), "Item");
        assert_eq!(item.item_number(), "-");
    }

    #[test]
    fn item_number_renders_numeric_values() {
        let item = Item::from_value(json!({"ID": "1", "Artikelnummer": 4069943027235u64}))
            .expect("item");
        assert_eq!(item.item_number(), "4069943027235");
    }
}
