//! Integration tests: real documents through diff, classification, and scoring.

use api_risk_engine::loader::{parse_document, DocumentFormat};
use api_risk_engine::report::render_text;
use api_risk_engine::types::Severity;
use api_risk_engine::{ChangeRecord, ChangeType, Comparison, Engine, RiskLevel};
use pretty_assertions::assert_eq;
use serde_json::Value;

const OLD_SPEC: &str = r#"
openapi: 3.0.0
info:
  title: Users API
  version: "1.0"
paths:
  /users:
    get:
      parameters:
        - name: limit
          in: query
          required: false
      responses:
        200:
          description: ok
  /users/{id}:
    parameters:
      - name: id
        in: path
        required: true
    get:
      responses:
        200:
          description: ok
    delete:
      responses:
        204:
          description: gone
  /legacy:
    get:
      responses:
        200:
          description: ok
"#;

fn yaml(text: &str) -> Value {
  parse_document(text, DocumentFormat::Yaml, "inline").unwrap()
}

fn compare(old: &str, new: &str) -> Vec<ChangeRecord> {
  Engine::with_defaults()
    .compare(&yaml(old), &yaml(new))
    .unwrap()
    .differences
}

#[test]
fn identical_documents_produce_no_changes_and_minimum_score() {
  let engine = Engine::with_defaults();
  let analysis = engine.analyze(&yaml(OLD_SPEC), &yaml(OLD_SPEC)).unwrap();
  assert!(analysis.differences.is_empty());
  assert_eq!(analysis.assessment.raw_score, 0);
  assert_eq!(analysis.assessment.normalized_score, 1.0);
  assert_eq!(analysis.assessment.risk_level, RiskLevel::Low);
}

#[test]
fn removed_endpoint_is_a_single_breaking_record() {
  let new = OLD_SPEC.replace(
    "  /legacy:\n    get:\n      responses:\n        200:\n          description: ok\n",
    "",
  );
  assert_eq!(
    compare(OLD_SPEC, &new),
    vec![ChangeRecord {
      change_type: ChangeType::EndpointRemoved,
      path: "/legacy".into(),
      method: "*".into(),
      severity: Some(Severity::Breaking),
    }]
  );
}

#[test]
fn removed_method_under_kept_endpoint() {
  let new = OLD_SPEC.replace(
    "    delete:\n      responses:\n        204:\n          description: gone\n",
    "",
  );
  assert_eq!(
    compare(OLD_SPEC, &new),
    vec![ChangeRecord::new(ChangeType::MethodRemoved, "/users/{id}", "delete").breaking()]
  );
}

#[test]
fn swapped_method_reports_only_the_removal() {
  let old = "paths:\n  /items:\n    get:\n      summary: list\n";
  let new = "paths:\n  /items:\n    post:\n      summary: create\n";
  assert_eq!(
    compare(old, new),
    vec![ChangeRecord::new(ChangeType::MethodRemoved, "/items", "get").breaking()]
  );
}

#[test]
fn appended_required_parameter() {
  let new = OLD_SPEC.replace(
    "        - name: limit\n          in: query\n          required: false\n",
    "        - name: limit\n          in: query\n          required: false\n        - name: tenant\n          in: header\n          required: true\n",
  );
  assert_eq!(
    compare(OLD_SPEC, &new),
    vec![ChangeRecord::new(ChangeType::ParameterRequiredAdded, "/users", "get")]
  );
}

#[test]
fn new_parameter_list_with_required_entry() {
  let new = OLD_SPEC.replace(
    "    delete:\n",
    "    delete:\n      parameters:\n        - name: reason\n          in: query\n          required: true\n        - name: note\n          in: query\n",
  );
  assert_eq!(
    compare(OLD_SPEC, &new),
    vec![ChangeRecord::new(ChangeType::ParameterRequiredAdded, "/users/{id}", "delete")]
  );
}

#[test]
fn removed_parameter_is_scored_but_not_breaking() {
  let new = OLD_SPEC.replace(
    "      parameters:\n        - name: limit\n          in: query\n          required: false\n",
    "      parameters:\n        - name: offset\n          in: query\n          required: false\n          deprecated: true\n",
  );
  let changes = compare(OLD_SPEC, &new);
  assert_eq!(
    changes,
    vec![ChangeRecord::new(ChangeType::ParameterRemoved, "/users", "get")]
  );
  let assessment = Engine::with_defaults().assess(&changes);
  assert_eq!(assessment.raw_score, 25);
  assert_eq!(assessment.normalized_score, 8.3);
}

#[test]
fn nested_parameter_edit_is_not_a_removal() {
  let new = OLD_SPEC.replace(
    "          in: query\n          required: false\n",
    "          in: query\n          required: false\n          schema:\n            type: integer\n",
  );
  assert!(compare(OLD_SPEC, &new).is_empty());
}

#[test]
fn parameter_description_edit_is_not_a_removal() {
  let new = OLD_SPEC.replace(
    "        - name: limit\n          in: query\n          required: false\n",
    "        - name: limit\n          in: query\n          required: false\n          description: page size\n",
  );
  let analysis = Engine::with_defaults().analyze(&yaml(OLD_SPEC), &yaml(&new)).unwrap();
  assert!(analysis.differences.is_empty());
  assert_eq!(analysis.assessment.normalized_score, 1.0);
}

#[test]
fn making_a_parameter_required_is_not_scored() {
  let new = OLD_SPEC.replace(
    "        - name: limit\n          in: query\n          required: false\n",
    "        - name: limit\n          in: query\n          required: true\n",
  );
  let analysis = Engine::with_defaults().analyze(&yaml(OLD_SPEC), &yaml(&new)).unwrap();
  assert!(analysis.differences.is_empty());
  assert_eq!(analysis.assessment.raw_score, 0);
}

#[test]
fn dropped_enum_value_inside_a_parameter_is_a_removal() {
  let old = "paths:\n  /a:\n    get:\n      parameters:\n        - name: sort\n          in: query\n          schema:\n            enum: [asc, desc]\n";
  let new = "paths:\n  /a:\n    get:\n      parameters:\n        - name: sort\n          in: query\n          schema:\n            enum: [asc]\n";
  assert_eq!(
    compare(old, new),
    vec![ChangeRecord::new(ChangeType::ParameterRemoved, "/a", "get")]
  );
}

#[test]
fn endpoint_level_parameter_removal_names_the_route() {
  let new = OLD_SPEC.replace(
    "    parameters:\n      - name: id\n        in: path\n        required: true\n",
    "    parameters:\n      - name: key\n        in: path\n",
  );
  assert_eq!(
    compare(OLD_SPEC, &new),
    vec![ChangeRecord::new(ChangeType::ParameterRemoved, "/users/{id}", "/users/{id}")]
  );
}

#[test]
fn renamed_parameter_is_a_removal_plus_an_addition() {
  let new = OLD_SPEC.replace(
    "        - name: limit\n          in: query\n          required: false\n",
    "        - name: size\n          in: query\n          required: true\n",
  );
  assert_eq!(
    compare(OLD_SPEC, &new),
    vec![
      ChangeRecord::new(ChangeType::ParameterRemoved, "/users", "get"),
      ChangeRecord::new(ChangeType::ParameterRequiredAdded, "/users", "get"),
    ]
  );
}

#[test]
fn additions_and_metadata_changes_are_not_classified() {
  let new = OLD_SPEC
    .replace("version: \"1.0\"", "version: \"2.0\"")
    .replace("paths:\n", "paths:\n  /health:\n    get:\n      responses:\n        200:\n          description: ok\n");
  assert!(compare(OLD_SPEC, &new).is_empty());
}

#[test]
fn combined_changes_clamp_to_ten() {
  let new = r#"
openapi: 3.0.0
paths:
  /users:
    get:
      parameters:
        - name: limit
          in: query
          required: false
        - name: tenant
          in: header
          required: true
"#;
  let engine = Engine::with_defaults();
  let analysis = engine.analyze(&yaml(OLD_SPEC), &yaml(new)).unwrap();
  let types: Vec<ChangeType> = analysis.differences.iter().map(|c| c.change_type).collect();
  assert_eq!(
    types,
    vec![
      ChangeType::EndpointRemoved,
      ChangeType::EndpointRemoved,
      ChangeType::ParameterRequiredAdded,
    ]
  );
  assert_eq!(analysis.assessment.raw_score, 65);
  assert_eq!(analysis.assessment.normalized_score, 10.0);
  assert_eq!(analysis.assessment.risk_level, RiskLevel::High);

  let report = render_text(
    &analysis.assessment,
    &Comparison {
      differences: analysis.differences.clone(),
    },
  );
  assert!(report.starts_with("[HIGH] API Risk Score: 10/10"));
  assert!(report.contains("- [!] endpoint-removed (25 pts): * /legacy"));
  assert!(report.contains("- [!] parameter-required-added (15 pts): get /users"));
}

#[test]
fn analysis_json_contract_is_stable() {
  let engine = Engine::with_defaults();
  let new = OLD_SPEC.replace(
    "    delete:\n      responses:\n        204:\n          description: gone\n",
    "",
  );
  let analysis = engine.analyze(&yaml(OLD_SPEC), &yaml(&new)).unwrap();
  let v = serde_json::to_value(&analysis).unwrap();
  assert_eq!(
    v,
    serde_json::json!({
      "differences": [
        {"type": "method-removed", "path": "/users/{id}", "method": "delete", "severity": "breaking"}
      ],
      "assessment": {
        "raw_score": 20,
        "normalized_score": 6.7,
        "risk_level": "HIGH",
        "label": "[HIGH]",
        "message": "High-risk change. Extra vigilance required.",
        "reviewer_action": "Require two reviewers; mandate QA verification; consider staged rollout; notify clients."
      }
    })
  );
}

#[test]
fn non_mapping_document_is_a_hard_failure() {
  let err = Engine::with_defaults()
    .compare(&yaml("- a\n- b\n"), &yaml(OLD_SPEC))
    .unwrap_err();
  assert!(err.is_diff_failure());
}
