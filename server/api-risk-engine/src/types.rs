//! Core types for the API risk engine (diff events, change records, JSON contracts).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// One step into a document tree: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
  Key(String),
  Index(usize),
}

impl PathSegment {
  pub fn key(k: impl Into<String>) -> Self {
    Self::Key(k.into())
  }

  pub fn as_key(&self) -> Option<&str> {
    match self {
      Self::Key(k) => Some(k),
      Self::Index(_) => None,
    }
  }
}

impl fmt::Display for PathSegment {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Key(k) => f.write_str(k),
      Self::Index(i) => write!(f, "{}", i),
    }
  }
}

impl From<&str> for PathSegment {
  fn from(k: &str) -> Self {
    Self::Key(k.to_string())
  }
}

impl From<usize> for PathSegment {
  fn from(i: usize) -> Self {
    Self::Index(i)
  }
}

/// Build a path from mixed key/index literals: `path!["paths", "/users", "get"]`.
#[macro_export]
macro_rules! path {
  ($($seg:expr),* $(,)?) => {
    vec![$($crate::types::PathSegment::from($seg)),*]
  };
}

/// `root['paths']['/users']['get'][0]` rendering, for logs.
pub fn display_path(path: &[PathSegment]) -> String {
  let mut out = String::from("root");
  for seg in path {
    match seg {
      PathSegment::Key(k) => out.push_str(&format!("['{}']", k)),
      PathSegment::Index(i) => out.push_str(&format!("[{}]", i)),
    }
  }
  out
}

// ---------------------------------------------------------------------------
// Diff events (what the diff engine emits)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
  KeyAdded,
  KeyRemoved,
  ValueChanged,
  ItemAdded,
  ItemRemoved,
}

/// One structural difference between the old and new document.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
  KeyAdded { path: Vec<PathSegment>, new: Value },
  KeyRemoved { path: Vec<PathSegment>, old: Value },
  ValueChanged { path: Vec<PathSegment>, old: Value, new: Value },
  ItemAdded { path: Vec<PathSegment>, new: Value },
  ItemRemoved { path: Vec<PathSegment>, old: Value },
}

impl ChangeEvent {
  pub fn kind(&self) -> EventKind {
    match self {
      Self::KeyAdded { .. } => EventKind::KeyAdded,
      Self::KeyRemoved { .. } => EventKind::KeyRemoved,
      Self::ValueChanged { .. } => EventKind::ValueChanged,
      Self::ItemAdded { .. } => EventKind::ItemAdded,
      Self::ItemRemoved { .. } => EventKind::ItemRemoved,
    }
  }

  pub fn path(&self) -> &[PathSegment] {
    match self {
      Self::KeyAdded { path, .. }
      | Self::KeyRemoved { path, .. }
      | Self::ValueChanged { path, .. }
      | Self::ItemAdded { path, .. }
      | Self::ItemRemoved { path, .. } => path,
    }
  }
}

/// All events from one diff run, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSet {
  events: Vec<ChangeEvent>,
}

impl EventSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, event: ChangeEvent) {
    self.events.push(event);
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ChangeEvent> {
    self.events.iter()
  }

  /// Events of one kind, preserving emission order.
  pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &ChangeEvent> {
    self.events.iter().filter(move |e| e.kind() == kind)
  }
}

impl FromIterator<ChangeEvent> for EventSet {
  fn from_iter<I: IntoIterator<Item = ChangeEvent>>(iter: I) -> Self {
    Self {
      events: iter.into_iter().collect(),
    }
  }
}

// ---------------------------------------------------------------------------
// Change records (what the classifiers emit)
// ---------------------------------------------------------------------------

/// Closed set of API change types known to the scoring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
  EndpointRemoved,
  MethodRemoved,
  ParameterRequiredAdded,
  ParameterRemoved,
  ParameterTypeChanged,
  ParameterMadeRequired,
  ResponseRequiredFieldRemoved,
  ResponseSchemaChanged,
  ResponseRequiredFieldAdded,
  EndpointDeprecatedWithTimeline,
  EndpointDeprecated,
  ParameterOptionalAdded,
  ResponseOptionalFieldAdded,
  EndpointAdded,
  /// Any tag outside the table; scores 0.
  #[serde(other)]
  Unknown,
}

impl ChangeType {
  pub const ALL: [ChangeType; 14] = [
    Self::EndpointRemoved,
    Self::MethodRemoved,
    Self::ParameterRequiredAdded,
    Self::ParameterRemoved,
    Self::ParameterTypeChanged,
    Self::ParameterMadeRequired,
    Self::ResponseRequiredFieldRemoved,
    Self::ResponseSchemaChanged,
    Self::ResponseRequiredFieldAdded,
    Self::EndpointDeprecatedWithTimeline,
    Self::EndpointDeprecated,
    Self::ParameterOptionalAdded,
    Self::ResponseOptionalFieldAdded,
    Self::EndpointAdded,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::EndpointRemoved => "endpoint-removed",
      Self::MethodRemoved => "method-removed",
      Self::ParameterRequiredAdded => "parameter-required-added",
      Self::ParameterRemoved => "parameter-removed",
      Self::ParameterTypeChanged => "parameter-type-changed",
      Self::ParameterMadeRequired => "parameter-made-required",
      Self::ResponseRequiredFieldRemoved => "response-required-field-removed",
      Self::ResponseSchemaChanged => "response-schema-changed",
      Self::ResponseRequiredFieldAdded => "response-required-field-added",
      Self::EndpointDeprecatedWithTimeline => "endpoint-deprecated-with-timeline",
      Self::EndpointDeprecated => "endpoint-deprecated",
      Self::ParameterOptionalAdded => "parameter-optional-added",
      Self::ResponseOptionalFieldAdded => "response-optional-field-added",
      Self::EndpointAdded => "endpoint-added",
      Self::Unknown => "unknown",
    }
  }

  /// Parse a kebab-case tag; anything unrecognized is `Unknown`.
  pub fn from_tag(tag: &str) -> Self {
    Self::ALL
      .into_iter()
      .find(|t| t.as_str() == tag)
      .unwrap_or(Self::Unknown)
  }
}

impl fmt::Display for ChangeType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Breaking,
}

/// Route placeholder when the endpoint segment cannot be resolved.
pub const UNKNOWN_PATH: &str = "?";
/// Method placeholder meaning "every method of the endpoint".
pub const ALL_METHODS: &str = "*";

/// One detected API change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
  #[serde(rename = "type")]
  pub change_type: ChangeType,
  #[serde(default = "unknown_path")]
  pub path: String,
  #[serde(default)]
  pub method: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub severity: Option<Severity>,
}

fn unknown_path() -> String {
  UNKNOWN_PATH.to_string()
}

impl ChangeRecord {
  pub fn new(change_type: ChangeType, path: impl Into<String>, method: impl Into<String>) -> Self {
    Self {
      change_type,
      path: path.into(),
      method: method.into(),
      severity: None,
    }
  }

  pub fn breaking(mut self) -> Self {
    self.severity = Some(Severity::Breaking);
    self
  }

  pub fn is_breaking(&self) -> bool {
    self.severity == Some(Severity::Breaking)
  }
}

/// Classified result of comparing two documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
  pub differences: Vec<ChangeRecord>,
}

// ---------------------------------------------------------------------------
// Risk assessment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
  Low,
  Medium,
  High,
}

impl RiskLevel {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "LOW",
      Self::Medium => "MEDIUM",
      Self::High => "HIGH",
    }
  }
}

impl fmt::Display for RiskLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Score and reviewer guidance derived from a change list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
  pub raw_score: u32,
  /// Always within `[1, 10]`.
  pub normalized_score: f64,
  pub risk_level: RiskLevel,
  pub label: String,
  pub message: String,
  pub reviewer_action: String,
}

// ---------------------------------------------------------------------------
// JSON contracts (stdin/stdout binary, HTTP service)
// ---------------------------------------------------------------------------

/// Input: the two parsed documents to compare.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzeRequest {
  pub old_spec: Value,
  pub new_spec: Value,
}

/// Input: an already-classified change list to score.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreRequest {
  #[serde(default)]
  pub differences: Vec<ChangeRecord>,
}

/// Output: change list plus its risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
  pub differences: Vec<ChangeRecord>,
  pub assessment: RiskAssessment,
}

/// Structured error output for machine readers.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
    }
  }
}
