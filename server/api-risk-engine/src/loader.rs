//! Load OpenAPI documents from YAML or JSON into a generic tree.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
  Yaml,
  Json,
}

impl DocumentFormat {
  /// `.yaml` / `.yml` are YAML; anything else, including no extension, is JSON.
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|e| e.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => Self::Yaml,
      _ => Self::Json,
    }
  }
}

/// Read and parse a document file.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, EngineError> {
  let path = path.as_ref();
  let display = path.display().to_string();
  if !path.exists() {
    return Err(EngineError::NotFound(display));
  }
  let text = fs::read_to_string(path).map_err(|source| EngineError::Io {
    path: display.clone(),
    source,
  })?;
  let doc = parse_document(&text, DocumentFormat::from_path(path), &display)?;
  info!(path = %path.display(), "loaded document");
  Ok(doc)
}

/// Parse in-memory document text; `origin` names it in errors.
pub fn parse_document(text: &str, format: DocumentFormat, origin: &str) -> Result<Value, EngineError> {
  match format {
    DocumentFormat::Yaml => {
      let raw: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| EngineError::parse(origin, e))?;
      yaml_to_json(raw, origin)
    }
    DocumentFormat::Json => serde_json::from_str(text).map_err(|e| EngineError::parse(origin, e)),
  }
}

/// YAML allows non-string mapping keys (`200:` under `responses`); they become strings.
fn yaml_to_json(value: serde_yaml::Value, origin: &str) -> Result<Value, EngineError> {
  use serde_yaml::Value as Yaml;
  Ok(match value {
    Yaml::Null => Value::Null,
    Yaml::Bool(b) => Value::Bool(b),
    Yaml::Number(n) => {
      if let Some(i) = n.as_i64() {
        Value::from(i)
      } else if let Some(u) = n.as_u64() {
        Value::from(u)
      } else {
        n.as_f64()
          .and_then(serde_json::Number::from_f64)
          .map(Value::Number)
          .unwrap_or(Value::Null)
      }
    }
    Yaml::String(s) => Value::String(s),
    Yaml::Sequence(items) => Value::Array(
      items
        .into_iter()
        .map(|v| yaml_to_json(v, origin))
        .collect::<Result<_, _>>()?,
    ),
    Yaml::Mapping(entries) => {
      let mut out = Map::new();
      for (k, v) in entries {
        out.insert(yaml_key(k, origin)?, yaml_to_json(v, origin)?);
      }
      Value::Object(out)
    }
    Yaml::Tagged(tagged) => yaml_to_json(tagged.value, origin)?,
  })
}

fn yaml_key(key: serde_yaml::Value, origin: &str) -> Result<String, EngineError> {
  use serde_yaml::Value as Yaml;
  match key {
    Yaml::String(s) => Ok(s),
    Yaml::Number(n) => Ok(n.to_string()),
    Yaml::Bool(b) => Ok(b.to_string()),
    Yaml::Null => Ok("null".to_string()),
    other => Err(EngineError::parse(
      origin,
      format!("unsupported mapping key: {:?}", other),
    )),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use std::io::Write;

  fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
  }

  #[test]
  fn format_from_extension() {
    assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
    assert_eq!(DocumentFormat::from_path(Path::new("a.YML")), DocumentFormat::Yaml);
    assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
    assert_eq!(DocumentFormat::from_path(Path::new("spec")), DocumentFormat::Json);
  }

  #[test]
  fn loads_yaml_with_numeric_keys() {
    let f = write_temp(
      ".yaml",
      "paths:\n  /users:\n    get:\n      responses:\n        200:\n          description: ok\n",
    );
    let doc = load_document(f.path()).unwrap();
    assert_eq!(
      doc["paths"]["/users"]["get"]["responses"]["200"],
      json!({"description": "ok"})
    );
  }

  #[test]
  fn loads_json() {
    let f = write_temp(".json", r#"{"openapi": "3.0.0", "paths": {}}"#);
    assert_eq!(load_document(f.path()).unwrap(), json!({"openapi": "3.0.0", "paths": {}}));
  }

  #[test]
  fn missing_file_is_not_found() {
    let err = load_document("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
  }

  #[test]
  fn invalid_json_names_the_file() {
    let f = write_temp(".json", "{not json");
    let err = load_document(f.path()).unwrap_err();
    assert!(matches!(err, EngineError::Parse { .. }));
    assert!(err.to_string().contains(&f.path().display().to_string()));
  }
}
