//! Generic tree diff: the capability the classifiers consume, plus a
//! structural, order-insensitive implementation over `serde_json::Value`.

use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::EngineError;
use crate::types::*;

/// Produces the structural differences between two document trees.
///
/// Sequence element order must not be reported as a change.
pub trait DiffEngine {
  fn diff(&self, old: &Value, new: &Value) -> Result<EventSet, EngineError>;
}

impl<T: DiffEngine + ?Sized> DiffEngine for &T {
  fn diff(&self, old: &Value, new: &Value) -> Result<EventSet, EngineError> {
    (**self).diff(old, new)
  }
}

/// Recursive key/value diff with set semantics for sequences.
///
/// Sequence elements present on both sides are ignored regardless of
/// position. A leftover removed and added mapping with the same identity is
/// diffed in place, so editing a parameter's description, schema or
/// `required` flag is a field-level change, not a removal. Identity is
/// `name` plus `in` when both sides carry a `name`; nameless mappings must
/// have identical scalar entries. A rename stays a removal plus an addition.
#[derive(Debug, Clone)]
pub struct StructuralDiff {
  max_depth: usize,
}

impl StructuralDiff {
  pub fn new(config: &Config) -> Self {
    Self {
      max_depth: config.max_depth,
    }
  }
}

impl Default for StructuralDiff {
  fn default() -> Self {
    Self::new(&Config::default())
  }
}

impl DiffEngine for StructuralDiff {
  fn diff(&self, old: &Value, new: &Value) -> Result<EventSet, EngineError> {
    if !old.is_object() || !new.is_object() {
      return Err(EngineError::not_comparable(format!(
        "expected two mappings at the root, got {} and {}",
        kind_name(old),
        kind_name(new)
      )));
    }
    let mut walker = Walker {
      differ: self,
      path: Vec::new(),
      events: EventSet::new(),
    };
    walker.walk(old, new)?;
    Ok(walker.events)
  }
}

struct Walker<'a> {
  differ: &'a StructuralDiff,
  path: Vec<PathSegment>,
  events: EventSet,
}

impl Walker<'_> {
  fn walk(&mut self, old: &Value, new: &Value) -> Result<(), EngineError> {
    if old == new {
      return Ok(());
    }
    match (old, new) {
      (Value::Object(a), Value::Object(b)) => {
        self.check_depth()?;
        self.walk_maps(a, b)
      }
      (Value::Array(a), Value::Array(b)) => {
        self.check_depth()?;
        self.walk_lists(a, b)
      }
      _ => {
        self.events.push(ChangeEvent::ValueChanged {
          path: self.path.clone(),
          old: old.clone(),
          new: new.clone(),
        });
        Ok(())
      }
    }
  }

  fn check_depth(&self) -> Result<(), EngineError> {
    if self.path.len() >= self.differ.max_depth {
      return Err(EngineError::TooDeep {
        max_depth: self.differ.max_depth,
        path: display_path(&self.path),
      });
    }
    Ok(())
  }

  fn walk_maps(&mut self, a: &Map<String, Value>, b: &Map<String, Value>) -> Result<(), EngineError> {
    for (key, old) in a {
      if !b.contains_key(key) {
        self.events.push(ChangeEvent::KeyRemoved {
          path: self.child(PathSegment::key(key.as_str())),
          old: old.clone(),
        });
      }
    }
    for (key, new) in b {
      if !a.contains_key(key) {
        self.events.push(ChangeEvent::KeyAdded {
          path: self.child(PathSegment::key(key.as_str())),
          new: new.clone(),
        });
      }
    }
    for (key, old) in a {
      if let Some(new) = b.get(key) {
        self.path.push(PathSegment::key(key.as_str()));
        let res = self.walk(old, new);
        self.path.pop();
        res?;
      }
    }
    Ok(())
  }

  fn walk_lists(&mut self, a: &[Value], b: &[Value]) -> Result<(), EngineError> {
    let removed: Vec<usize> = (0..a.len()).filter(|&i| !b.contains(&a[i])).collect();
    let added: Vec<usize> = (0..b.len()).filter(|&j| !a.contains(&b[j])).collect();

    let pairs = self.pair_up(a, b, &removed, &added);
    let paired_old: Vec<usize> = pairs.iter().map(|&(i, _)| i).collect();
    let paired_new: Vec<usize> = pairs.iter().map(|&(_, j)| j).collect();

    for &i in removed.iter().filter(|i| !paired_old.contains(i)) {
      self.events.push(ChangeEvent::ItemRemoved {
        path: self.child(PathSegment::Index(i)),
        old: a[i].clone(),
      });
    }
    for &j in added.iter().filter(|j| !paired_new.contains(j)) {
      self.events.push(ChangeEvent::ItemAdded {
        path: self.child(PathSegment::Index(j)),
        new: b[j].clone(),
      });
    }
    for (i, j) in pairs {
      self.path.push(PathSegment::Index(i));
      let res = self.walk(&a[i], &b[j]);
      self.path.pop();
      res?;
    }
    Ok(())
  }

  /// First-fit pairing of leftover mappings that describe the same element.
  fn pair_up(&self, a: &[Value], b: &[Value], removed: &[usize], added: &[usize]) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for &i in removed {
      let Value::Object(x) = &a[i] else {
        continue;
      };
      let partner = added.iter().copied().find(|&j| {
        !pairs.iter().any(|&(_, pj)| pj == j)
          && matches!(&b[j], Value::Object(y) if same_element(x, y))
      });
      if let Some(j) = partner {
        pairs.push((i, j));
      }
    }
    pairs
  }

  fn child(&self, seg: PathSegment) -> Vec<PathSegment> {
    let mut path = self.path.clone();
    path.push(seg);
    path
  }
}

fn same_element(x: &Map<String, Value>, y: &Map<String, Value>) -> bool {
  match (identity(x), identity(y)) {
    (Some(a), Some(b)) => a == b,
    (None, None) => same_scalars(x, y),
    _ => false,
  }
}

/// `(name, in)` of a named element such as a parameter or header.
fn identity(m: &Map<String, Value>) -> Option<(&Value, Option<&Value>)> {
  m.get("name").map(|name| (name, m.get("in")))
}

/// Both mappings carry exactly the same non-container entries.
fn same_scalars(x: &Map<String, Value>, y: &Map<String, Value>) -> bool {
  let scalars = |m: &Map<String, Value>| -> Vec<(String, Value)> {
    m.iter()
      .filter(|(_, v)| !v.is_object() && !v.is_array())
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect()
  };
  scalars(x) == scalars(y)
}

fn kind_name(v: &Value) -> &'static str {
  match v {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "sequence",
    Value::Object(_) => "mapping",
  }
}
