use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

pub const LIBRARIES_KEY: &str = "libraries";
pub const NAME_KEY: &str = "name";
pub const HAS_CONTEXT_FILE_KEY: &str = "hasContextFile";
pub const CONTEXT_FILE_NAME_KEY: &str = "contextFileName";

/// A domain catalog as stored in `<domain>-libraries.json`.
///
/// Top-level keys keep their original order on write; `libraries` is put
/// back in its own slot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Catalog {
    pub libraries: Vec<LibraryRecord>,
    fields: Map<String, Value>,
}

impl Catalog {
    pub fn new(libraries: Vec<LibraryRecord>) -> Self {
        let mut fields = Map::new();
        fields.insert(LIBRARIES_KEY.to_string(), Value::Null);
        Self { libraries, fields }
    }

    /// Top-level value other than `libraries`.
    pub fn field(&self, key: &str) -> Option<&Value> {
        if key == LIBRARIES_KEY {
            None
        } else {
            self.fields.get(key)
        }
    }
}

impl TryFrom<Map<String, Value>> for Catalog {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        // 保留原位置，寫回時再放回
        let raw = fields
            .get_mut(LIBRARIES_KEY)
            .ok_or_else(|| format!("missing field `{LIBRARIES_KEY}`"))?
            .take();

        let Value::Array(items) = raw else {
            return Err(format!("`{LIBRARIES_KEY}` must be an array"));
        };

        let libraries = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => {
                    LibraryRecord::try_from(map).map_err(|e| format!("library #{i}: {e}"))
                }
                _ => Err(format!("library #{i}: expected an object")),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { libraries, fields })
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            if key == LIBRARIES_KEY {
                map.serialize_entry(key, &self.libraries)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// One library entry; every key except the two context keys is passed through
/// untouched and in its original order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct LibraryRecord {
    fields: Map<String, Value>,
}

impl LibraryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(NAME_KEY.to_string(), Value::String(name.into()));
        Self { fields }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        self.fields
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn has_context_file(&self) -> bool {
        self.fields
            .get(HAS_CONTEXT_FILE_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn context_file_name(&self) -> Option<&str> {
        self.fields.get(CONTEXT_FILE_NAME_KEY).and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Sets both context keys from a match result, whatever they held before.
    /// Returns `true` when the record changed.
    pub fn apply_match(&mut self, matched: Option<&str>) -> bool {
        let flag = Value::Bool(matched.is_some());
        let mut changed = self.fields.get(HAS_CONTEXT_FILE_KEY) != Some(&flag);
        // 既有鍵保持原位置，新鍵附加在最後
        self.fields.insert(HAS_CONTEXT_FILE_KEY.to_string(), flag);

        match matched {
            Some(file_name) => {
                let value = Value::String(file_name.to_string());
                changed |= self.fields.get(CONTEXT_FILE_NAME_KEY) != Some(&value);
                self.fields.insert(CONTEXT_FILE_NAME_KEY.to_string(), value);
            }
            None => {
                changed |= self.fields.shift_remove(CONTEXT_FILE_NAME_KEY).is_some();
            }
        }

        changed
    }
}

impl TryFrom<Map<String, Value>> for LibraryRecord {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        match fields.get(NAME_KEY) {
            Some(Value::String(_)) => Ok(Self { fields }),
            Some(_) => Err(format!("`{NAME_KEY}` must be a string")),
            None => Err(format!("missing field `{NAME_KEY}`")),
        }
    }
}

impl Serialize for LibraryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// The set of context file names found in one domain directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextIndex {
    names: BTreeSet<String>,
}

impl ContextIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ContextIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of matching a single library record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub name: String,
    pub context_file_name: Option<String>,
    pub changed: bool,
}

/// Per-domain result of a successful synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainSummary {
    pub domain: String,
    pub context_files: usize,
    pub total: usize,
    pub with_context: usize,
    pub changed: usize,
    pub newly_matched: usize,
    pub newly_unmatched: usize,
    pub written: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl DomainSummary {
    pub fn coverage_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.with_context as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_keeps_unknown_fields() {
        let raw = json!({
            "domain": "finance",
            "libraries": [
                {"name": "finance/pandas", "stars": 42, "tags": ["data", "ü"]}
            ]
        });

        let catalog: Catalog = serde_json::from_value(raw).unwrap();
        assert_eq!(catalog.field("domain"), Some(&json!("finance")));

        let record = &catalog.libraries[0];
        assert_eq!(record.name(), "finance/pandas");
        assert!(!record.has_context_file());
        assert_eq!(record.context_file_name(), None);
        assert_eq!(record.field("stars"), Some(&json!(42)));

        let back = serde_json::to_value(&catalog).unwrap();
        assert_eq!(back["libraries"][0]["tags"], json!(["data", "ü"]));
        assert!(back["libraries"][0].get("hasContextFile").is_none());
    }

    #[test]
    fn test_catalog_requires_libraries_and_names() {
        assert!(serde_json::from_str::<Catalog>(r#"{"items": []}"#).is_err());
        assert!(serde_json::from_str::<Catalog>(r#"{"libraries": {}}"#).is_err());
        assert!(serde_json::from_str::<Catalog>(r#"{"libraries": [{"stars": 1}]}"#).is_err());
        assert!(serde_json::from_str::<Catalog>(r#"{"libraries": [{"name": 7}]}"#).is_err());
        assert!(serde_json::from_str::<Catalog>(r#"{"libraries": ["numpy"]}"#).is_err());
        assert!(serde_json::from_str::<Catalog>(r#"[]"#).is_err());
    }

    #[test]
    fn test_key_order_survives_update() {
        let input = r#"{"domain":"finance","libraries":[{"rank":1,"name":"finance/pandas","stars":5,"hasContextFile":false,"contextFileName":null}]}"#;
        let mut catalog: Catalog = serde_json::from_str(input).unwrap();

        assert!(catalog.libraries[0].apply_match(Some("pandas-context.txt")));

        assert_eq!(
            serde_json::to_string(&catalog).unwrap(),
            r#"{"domain":"finance","libraries":[{"rank":1,"name":"finance/pandas","stars":5,"hasContextFile":true,"contextFileName":"pandas-context.txt"}]}"#
        );
    }

    #[test]
    fn test_removing_file_name_keeps_following_keys_in_place() {
        let input = r#"{"libraries":[{"name":"numpy","hasContextFile":true,"contextFileName":"stale.txt","stars":9,"rank":2}]}"#;
        let mut catalog: Catalog = serde_json::from_str(input).unwrap();

        assert!(catalog.libraries[0].apply_match(None));

        assert_eq!(
            serde_json::to_string(&catalog).unwrap(),
            r#"{"libraries":[{"name":"numpy","hasContextFile":false,"stars":9,"rank":2}]}"#
        );
    }

    #[test]
    fn test_context_keys_of_any_type_are_overwritten() {
        let input = r#"{"libraries":[
            {"name":"finance/pandas","hasContextFile":null},
            {"name":"numpy","hasContextFile":"yes","contextFileName":42}
        ]}"#;
        let mut catalog: Catalog = serde_json::from_str(input).unwrap();
        assert!(!catalog.libraries[0].has_context_file());
        assert_eq!(catalog.libraries[1].context_file_name(), None);

        assert!(catalog.libraries[0].apply_match(Some("pandas-context.txt")));
        assert!(catalog.libraries[1].apply_match(None));

        let back = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            back,
            json!({"libraries": [
                {"name": "finance/pandas", "hasContextFile": true, "contextFileName": "pandas-context.txt"},
                {"name": "numpy", "hasContextFile": false}
            ]})
        );
    }

    #[test]
    fn test_apply_match_reports_changes() {
        let mut record = LibraryRecord::new("numpy");
        assert!(record.apply_match(None));
        assert!(!record.apply_match(None));

        assert!(record.apply_match(Some("numpy-context.txt")));
        assert!(record.has_context_file());
        assert_eq!(record.context_file_name(), Some("numpy-context.txt"));

        assert!(!record.apply_match(Some("numpy-context.txt")));
        assert!(record.apply_match(None));
        assert_eq!(record.context_file_name(), None);
    }

    #[test]
    fn test_coverage_percent() {
        let summary = DomainSummary {
            total: 4,
            with_context: 1,
            ..Default::default()
        };
        assert_eq!(summary.coverage_percent(), 25.0);
        assert_eq!(DomainSummary::default().coverage_percent(), 0.0);
    }
}
