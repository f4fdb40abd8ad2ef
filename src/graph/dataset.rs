//! The dataset graph: test cases shaped like the object graph
//!
//! A dataset file mirrors the object graph at tested paths; each path that
//! names a function holds a list of cases:
//!
//! ```yaml
//! math:
//!   add:
//!     - label: adds two numbers
//!       arguments: [2, 3]
//!       result: { equal: 5 }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::common::{join_namespace, Error, Result};
use crate::expect::Expectation;

/// One test case: label, opaque arguments and the expected result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestCase {
    pub label: String,
    #[serde(default)]
    pub arguments: Value,
    #[serde(default)]
    pub result: Expectation,
}

impl TestCase {
    pub fn new(label: impl Into<String>, arguments: impl Into<Value>, result: Expectation) -> Self {
        Self {
            label: label.into(),
            arguments: arguments.into(),
            result,
        }
    }
}

/// A node of the dataset graph
///
/// Branch keys keep their document order, which is also the order cases are
/// registered in. Sequences are case lists, mappings are branches, and any
/// other value is kept as a plain leaf that never produces cases.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetNode {
    Cases(Vec<TestCase>),
    Branch(IndexMap<String, DatasetNode>),
    Value(Value),
}

impl TryFrom<Value> for DatasetNode {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Array(_) => Ok(Self::Cases(serde_json::from_value(value)?)),
            Value::Object(entries) => entries
                .into_iter()
                .map(|(key, child)| Self::try_from(child).map(|node| (key, node)))
                .collect::<std::result::Result<IndexMap<_, _>, Self::Error>>()
                .map(Self::Branch),
            other => Ok(Self::Value(other)),
        }
    }
}

impl<'de> Deserialize<'de> for DatasetNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl Default for DatasetNode {
    fn default() -> Self {
        Self::Branch(IndexMap::new())
    }
}

impl DatasetNode {
    pub fn cases(cases: impl IntoIterator<Item = TestCase>) -> Self {
        Self::Cases(cases.into_iter().collect())
    }

    pub fn branch<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DatasetNode)>,
    {
        Self::Branch(
            entries
                .into_iter()
                .map(|(key, node)| (key.into(), node))
                .collect(),
        )
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a dataset file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::file_read(&display, &e))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| Error::dataset_parse(&display, e))
            }
            "json" => serde_json::from_str(&content).map_err(|e| Error::dataset_parse(&display, e)),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }

    /// Child at `key`, if this node is a branch
    pub fn get(&self, key: &str) -> Option<&DatasetNode> {
        match self {
            Self::Branch(children) => children.get(key),
            Self::Cases(_) | Self::Value(_) => None,
        }
    }

    /// Total number of cases below this node
    pub fn case_count(&self) -> usize {
        match self {
            Self::Cases(cases) => cases.len(),
            Self::Branch(children) => children.values().map(Self::case_count).sum(),
            Self::Value(_) => 0,
        }
    }

    /// Indented outline of namespaces and case labels under `root`
    ///
    /// This describes the dataset alone; whether each path names a function
    /// is only known once it is walked against an object graph.
    pub fn outline(&self, root: &str) -> Vec<String> {
        let mut lines = Vec::new();
        self.outline_into(root, 0, &mut lines);
        lines
    }

    fn outline_into(&self, namespace: &str, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match self {
            Self::Cases(cases) => {
                lines.push(format!("{indent}#{namespace}()"));
                for case in cases {
                    lines.push(format!("{indent}  - {} [{}]", case.label, case.result));
                }
            }
            Self::Branch(children) => {
                for (key, child) in children {
                    child.outline_into(&join_namespace(namespace, key), depth, lines);
                }
            }
            Self::Value(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    const MATH_YAML: &str = r#"
math:
  sub:
    - label: subtracts
      arguments: [5, 3]
      result: { equal: 2 }
  add:
    - label: adds two numbers
      arguments: [2, 3]
      result: { equal: 5 }
    - label: not six
      arguments: [2, 3]
      result: { not: true, equal: 6 }
strings:
  upper:
    - label: no expectation
"#;

    #[test]
    fn test_yaml_keeps_document_order() {
        let dataset = DatasetNode::from_yaml_str(MATH_YAML).unwrap();
        let DatasetNode::Branch(root) = &dataset else {
            panic!("expected a branch at the root");
        };
        assert_eq!(root.keys().collect::<Vec<_>>(), vec!["math", "strings"]);

        let math = dataset.get("math").unwrap();
        let DatasetNode::Branch(math) = math else {
            panic!("expected a branch under math");
        };
        assert_eq!(math.keys().collect::<Vec<_>>(), vec!["sub", "add"]);
    }

    #[test]
    fn test_case_fields_and_defaults() {
        let dataset = DatasetNode::from_yaml_str(MATH_YAML).unwrap();
        let Some(DatasetNode::Cases(add)) = dataset.get("math").and_then(|m| m.get("add")) else {
            panic!("expected cases under math.add");
        };
        assert_eq!(
            add[1],
            TestCase::new("not six", json!([2, 3]), Expectation::equal(6).negated())
        );

        let Some(DatasetNode::Cases(upper)) = dataset.get("strings").and_then(|s| s.get("upper"))
        else {
            panic!("expected cases under strings.upper");
        };
        assert_eq!(upper[0].arguments, Value::Null);
        assert_eq!(upper[0].result, Expectation::Unchecked);
    }

    #[test]
    fn test_json_value_round_into_dataset() {
        let dataset = DatasetNode::from_value(json!({
            "add": [{ "label": "adds", "arguments": [1, 1], "result": { "equal": 2 } }]
        }))
        .unwrap();
        assert_eq!(dataset.case_count(), 1);
        assert!(matches!(dataset.get("add"), Some(DatasetNode::Cases(_))));
    }

    #[test]
    fn test_case_missing_label_is_rejected() {
        let err = DatasetNode::from_json_str(r#"{"add": [{"arguments": 1}]}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_case_count_and_outline() {
        let dataset = DatasetNode::from_yaml_str(MATH_YAML).unwrap();
        assert_eq!(dataset.case_count(), 4);
        assert_eq!(
            dataset.outline("root"),
            vec![
                "#root.math.sub()",
                "  - subtracts [equal 2]",
                "#root.math.add()",
                "  - adds two numbers [equal 5]",
                "  - not six [not equal 6]",
                "#root.strings.upper()",
                "  - no expectation [unchecked]",
            ]
        );
    }

    #[test]
    fn test_plain_leaves_are_kept_but_hold_no_cases() {
        let dataset = DatasetNode::from_yaml_str(
            "version: \"1.0\"\nadd:\n  - label: adds\n    arguments: [1, 1]\n    result: { equal: 2 }\nenabled: true\nnothing:\n",
        )
        .unwrap();

        assert_eq!(dataset.get("version"), Some(&DatasetNode::Value(json!("1.0"))));
        assert_eq!(dataset.get("enabled"), Some(&DatasetNode::Value(json!(true))));
        assert_eq!(dataset.get("nothing"), Some(&DatasetNode::Value(Value::Null)));
        assert_eq!(dataset.case_count(), 1);
        assert_eq!(dataset.outline("root"), vec!["#root.add()", "  - adds [equal 2]"]);
    }

    #[test]
    fn test_malformed_case_list_is_still_an_error() {
        let err = DatasetNode::from_yaml_str("add:\n  - arguments: [1, 1]\n").unwrap_err();
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_load_by_extension() {
        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        yaml.write_all(MATH_YAML.as_bytes()).unwrap();
        assert_eq!(DatasetNode::load(yaml.path()).unwrap().case_count(), 4);

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json.write_all(br#"{"f": [{"label": "x"}]}"#).unwrap();
        assert_eq!(DatasetNode::load(json.path()).unwrap().case_count(), 1);

        let txt = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(matches!(
            DatasetNode::load(txt.path()),
            Err(Error::UnsupportedFormat(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn test_load_invalid_yaml_names_the_file() {
        let mut yaml = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        yaml.write_all(b"add: [unclosed").unwrap();
        let err = DatasetNode::load(yaml.path()).unwrap_err();
        assert!(matches!(err, Error::DatasetParse { .. }));
    }
}
