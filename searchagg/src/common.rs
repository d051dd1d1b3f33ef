//! Union-typed field values shared by requests and responses.
use indexmap::IndexMap;
use searchagg_core::value::JsonData;
use serde::{Deserialize, Serialize};

/// Where a pipeline aggregation reads its input from.
///
/// ```rust
/// use searchagg::common::BucketsPath;
///
/// let single: BucketsPath = serde_json::from_str(r#""sales>total""#).unwrap();
/// let named: BucketsPath = serde_json::from_str(r#"{"a": "sales", "b": "cost"}"#).unwrap();
///
/// assert_eq!(single, BucketsPath::from("sales>total"));
/// assert!(matches!(named, BucketsPath::Dict(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketsPath {
    Single(String),
    Array(Vec<String>),
    Dict(IndexMap<String, String>),
}

impl From<&str> for BucketsPath {
    fn from(path: &str) -> Self {
        Self::Single(path.to_string())
    }
}

impl From<String> for BucketsPath {
    fn from(path: String) -> Self {
        Self::Single(path)
    }
}

impl From<Vec<String>> for BucketsPath {
    fn from(paths: Vec<String>) -> Self {
        Self::Array(paths)
    }
}

impl From<IndexMap<String, String>> for BucketsPath {
    fn from(paths: IndexMap<String, String>) -> Self {
        Self::Dict(paths)
    }
}

/// A script, either as bare source or as an object with language and parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Script {
    Source(String),
    Inline(InlineScript),
    Stored(StoredScript),
}

impl From<&str> for Script {
    fn from(source: &str) -> Self {
        Self::Source(source.to_string())
    }
}

impl From<InlineScript> for Script {
    fn from(script: InlineScript) -> Self {
        Self::Inline(script)
    }
}

impl From<StoredScript> for Script {
    fn from(script: StoredScript) -> Self {
        Self::Stored(script)
    }
}

/// Script source sent with the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InlineScript {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Compiler options, such as `content_type` for mustache scripts.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, JsonData>,
}

impl InlineScript {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            lang: None,
            options: IndexMap::new(),
            params: IndexMap::new(),
        }
    }
}

/// A script stored on the cluster, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredScript {
    pub id: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, JsonData>,
}

impl StoredScript {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            params: IndexMap::new(),
        }
    }
}

/// What a pipeline aggregation does with buckets that have no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    Skip,
    InsertZeros,
}

/// Response buckets, as an array or keyed by bucket key (`"keyed": true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Buckets<B> {
    Array(Vec<B>),
    Keyed(IndexMap<String, B>),
}

impl<B> Buckets<B> {
    pub fn len(&self) -> usize {
        match self {
            Self::Array(buckets) => buckets.len(),
            Self::Keyed(buckets) => buckets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every bucket, in wire order, regardless of the layout.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &B> + '_> {
        match self {
            Self::Array(buckets) => Box::new(buckets.iter()),
            Self::Keyed(buckets) => Box::new(buckets.values()),
        }
    }
}

impl<B> From<Vec<B>> for Buckets<B> {
    fn from(buckets: Vec<B>) -> Self {
        Self::Array(buckets)
    }
}
