//! Flow records: one observation at one supply-chain stage.

use super::identifiers::RecordId;
use super::ordered_map::OrderedMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ===== MetricValue =====

/// A metric reading, either numeric (`48`, `3.1`) or free text (`"100%"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// JSON number.
    Number(f64),
    /// JSON string, shown verbatim.
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display already drops a trailing ".0" (48.0 -> "48")
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

// ===== FlowRecord =====

/// One stage-level observation in the traceability chain.
///
/// `refs`, `metrics` and `tags` are independently optional. `None` means
/// "not applicable to this stage", not "unknown". Records are never
/// mutated once a store holds them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    /// Unique within the store.
    pub id: RecordId,
    /// Stage name: Farm, Transport, Processor, Case-Ready, DC, Store.
    pub stage: String,
    /// Operator at this stage, possibly with a PIC or licence code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Origin of a movement between sites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Destination of a movement between sites.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// ISO-like date, kept as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Document references (NVD, PIC, lot codes). Not searchable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<OrderedMap<String>>,
    /// Stage measurements. Not searchable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<OrderedMap<MetricValue>>,
    /// Certifications and labels, searchable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl FlowRecord {
    /// Create a record with only the required fields set.
    pub fn new(id: RecordId, stage: impl Into<String>) -> Self {
        Self {
            id,
            stage: stage.into(),
            company: None,
            from: None,
            to: None,
            date: None,
            refs: None,
            metrics: None,
            tags: None,
        }
    }

    /// Set the operating company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set both ends of a movement.
    pub fn with_route(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self.to = Some(to.into());
        self
    }

    /// Set the date text.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Replace the references.
    pub fn with_refs<K: Into<String>, V: Into<String>>(
        mut self,
        refs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.refs = Some(refs.into_iter().map(|(k, v)| (k, v.into())).collect());
        self
    }

    /// Replace the metrics.
    pub fn with_metrics<K: Into<String>, V: Into<MetricValue>>(
        mut self,
        metrics: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.metrics = Some(metrics.into_iter().map(|(k, v)| (k, v.into())).collect());
        self
    }

    /// Replace the tags.
    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Tags as a slice; empty when the record carries none.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Whether the record describes a movement between two sites.
    pub fn has_route(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}
