//! Rule-based classifiers: generic diff events in, API change records out.
//!
//! Each rule looks at one or two event kinds and ignores everything it cannot
//! place under `paths`. Unplaceable events are dropped, not reported.

use serde_json::Value;
use tracing::debug;

use crate::anchor::{find_anchor, relative_len, segment_after, PARAMETERS, PATHS};
use crate::types::*;

/// Endpoint and method removals from `KeyRemoved` events.
///
/// `['paths', '/users/{id}']` is a whole endpoint, `['paths', '/users/{id}', 'get']`
/// a single method. Deeper removals are not endpoint-level changes.
pub fn endpoint_removals(events: &EventSet) -> Vec<ChangeRecord> {
  let mut out = Vec::new();
  for event in events.of_kind(EventKind::KeyRemoved) {
    let path = event.path();
    let Some(idx) = find_anchor(path, PATHS) else {
      debug!(path = %display_path(path), "removed key outside paths; skipped");
      continue;
    };
    let api_path = segment_after(path, idx, 1).unwrap_or_else(|| UNKNOWN_PATH.to_string());
    match relative_len(path, idx) {
      2 => out.push(ChangeRecord::new(ChangeType::EndpointRemoved, api_path, ALL_METHODS).breaking()),
      3 => {
        let method = segment_after(path, idx, 2).unwrap_or_else(|| ALL_METHODS.to_string());
        out.push(ChangeRecord::new(ChangeType::MethodRemoved, api_path, method).breaking());
      }
      _ => {}
    }
  }
  out
}

/// Methods lost when an endpoint's whole method map is replaced.
///
/// Only the removed side is reported; methods that appear in the new map are
/// additions and not breaking.
pub fn method_swaps(events: &EventSet) -> Vec<ChangeRecord> {
  let mut out = Vec::new();
  for event in events.of_kind(EventKind::ValueChanged) {
    let ChangeEvent::ValueChanged { path, old, new } = event else {
      continue;
    };
    let Some(idx) = find_anchor(path, PATHS) else {
      continue;
    };
    if relative_len(path, idx) != 2 {
      continue;
    }
    let (Value::Object(old_methods), Value::Object(new_methods)) = (old, new) else {
      continue;
    };
    let api_path = segment_after(path, idx, 1).unwrap_or_else(|| UNKNOWN_PATH.to_string());
    for method in old_methods.keys() {
      if !new_methods.contains_key(method) {
        out.push(ChangeRecord::new(ChangeType::MethodRemoved, api_path.clone(), method.clone()).breaking());
      }
    }
  }
  out
}

/// Items dropped anywhere under an endpoint- or operation-level parameter
/// list, including values nested inside a parameter (an enum entry).
pub fn parameter_removals(events: &EventSet) -> Vec<ChangeRecord> {
  let mut out = Vec::new();
  for event in events.of_kind(EventKind::ItemRemoved) {
    if let Some((api_path, method)) = parameter_owner(event.path()) {
      out.push(ChangeRecord::new(ChangeType::ParameterRemoved, api_path, method));
    }
  }
  out
}

/// New required parameters, whether appended to an existing list or shipped
/// in a parameter list that did not exist before.
pub fn required_parameter_additions(events: &EventSet) -> Vec<ChangeRecord> {
  let mut out = Vec::new();
  for event in events.iter() {
    let (path, candidates): (&[PathSegment], Vec<&Value>) = match event {
      ChangeEvent::ItemAdded { path, new } => (path.as_slice(), vec![new]),
      ChangeEvent::KeyAdded { path, new } => match (path.last(), new) {
        (Some(PathSegment::Key(k)), Value::Array(items)) if k == PARAMETERS => {
          (path.as_slice(), items.iter().collect())
        }
        _ => continue,
      },
      _ => continue,
    };
    let Some((api_path, method)) = parameter_owner(path) else {
      continue;
    };
    for param in candidates.into_iter().filter(|p| is_required(p)) {
      let name = param.get("name").and_then(Value::as_str).unwrap_or("?");
      debug!(path = %display_path(path), name, "required parameter added");
      out.push(ChangeRecord::new(
        ChangeType::ParameterRequiredAdded,
        api_path.clone(),
        method.clone(),
      ));
    }
  }
  out
}

/// Run every classifier in order and concatenate their records.
pub fn classify(events: &EventSet) -> Vec<ChangeRecord> {
  let mut out = endpoint_removals(events);
  out.extend(method_swaps(events));
  out.extend(parameter_removals(events));
  out.extend(required_parameter_additions(events));
  out
}

/// Route and method owning the `parameters` list that `path` falls under.
///
/// The method is the segment just before `parameters`, so an endpoint-level
/// list (`['paths', '/a', 'parameters']`) names the route itself. A
/// `parameters` key at or before `paths` is not an endpoint's list.
fn parameter_owner(path: &[PathSegment]) -> Option<(String, String)> {
  let paths_idx = find_anchor(path, PATHS)?;
  let params_idx = find_anchor(path, PARAMETERS)?;
  if params_idx <= paths_idx {
    return None;
  }
  let api_path = segment_after(path, paths_idx, 1)?;
  let method = if params_idx - 1 > paths_idx {
    path[params_idx - 1].to_string()
  } else {
    ALL_METHODS.to_string()
  };
  Some((api_path, method))
}

fn is_required(param: &Value) -> bool {
  param.get("required").and_then(Value::as_bool) == Some(true)
}
