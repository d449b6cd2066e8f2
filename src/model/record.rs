use anyhow::{bail, Result};
use serde_json::Value;

/// One row of tabular data: a mapping from column name to display value.
///
/// Field order follows the source JSON object, so the global-search haystack
/// (`search_text`) is deterministic. Lookups are linear; record widths are
/// small enough that this never matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Field value for `column`, or the empty string when the record does
    /// not carry that column.
    pub fn get(&self, column: &str) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// All field values space-joined, the haystack for global search.
    pub fn search_text(&self) -> String {
        let mut joined = String::new();
        for (_, value) in &self.fields {
            joined.push(' ');
            joined.push_str(value);
        }
        joined
    }
}

/// The full in-memory record set backing one grid instance.
///
/// Column names come from the first record's keys, in key order. The column
/// set is fixed once loaded; records missing a column read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Decode a parsed JSON document into a record set.
    ///
    /// The document must be a non-empty array of objects. Values are
    /// stringified for display: strings as-is, numbers and booleans via
    /// their JSON text, null as the empty string.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            bail!("invalid data: expected a JSON array of records");
        };
        if items.is_empty() {
            bail!("no data");
        }

        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let Value::Object(map) = item else {
                bail!("invalid data: record {} is not an object", i);
            };
            let fields = map
                .into_iter()
                .map(|(name, value)| (name, stringify(value)))
                .collect();
            records.push(Record { fields });
        }

        let columns: Vec<String> = records[0]
            .fields
            .iter()
            .map(|(name, _)| name.clone())
            .collect();

        Ok(Self { columns, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Header label for a column name: underscores become spaces, first letter
/// upper-cased, the rest lower-cased (`user_NAME` renders as `User name`).
pub fn title_case(column: &str) -> String {
    let spaced = column.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> RecordSet {
        RecordSet::from_json(json!([
            {"name": "b", "age": 2},
            {"name": "a", "age": 1},
        ]))
        .unwrap()
    }

    #[test]
    fn columns_come_from_first_record_in_order() {
        let set = sample();
        assert_eq!(set.columns, vec!["name", "age"]);
    }

    #[test]
    fn numbers_are_stringified() {
        let set = sample();
        assert_eq!(set.records[0].get("age"), "2");
    }

    #[test]
    fn null_reads_as_empty() {
        let set = RecordSet::from_json(json!([{"a": null, "b": true}])).unwrap();
        assert_eq!(set.records[0].get("a"), "");
        assert_eq!(set.records[0].get("b"), "true");
    }

    #[test]
    fn missing_column_reads_as_empty() {
        let set = RecordSet::from_json(json!([
            {"name": "x", "age": 1},
            {"name": "y"},
        ]))
        .unwrap();
        assert_eq!(set.records[1].get("age"), "");
    }

    #[test]
    fn search_text_joins_values_in_field_order() {
        let set = sample();
        assert_eq!(set.records[0].search_text(), " b 2");
    }

    #[test]
    fn empty_array_is_rejected() {
        let err = RecordSet::from_json(json!([])).unwrap_err();
        assert!(err.to_string().contains("no data"));
    }

    #[test]
    fn non_array_is_rejected() {
        assert!(RecordSet::from_json(json!({"a": 1})).is_err());
        assert!(RecordSet::from_json(json!("nope")).is_err());
    }

    #[test]
    fn non_object_record_is_rejected() {
        assert!(RecordSet::from_json(json!([{"a": 1}, 2])).is_err());
    }

    #[test]
    fn title_case_headers() {
        assert_eq!(title_case("name"), "Name");
        assert_eq!(title_case("first_name"), "First name");
        assert_eq!(title_case("user_NAME"), "User name");
        assert_eq!(title_case(""), "");
    }
}
