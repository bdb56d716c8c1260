//! Tests for the operation builders (pure parts; request flows are
//! covered by the mock-server integration tests)

use super::issue::{apply_optional_fields, split_list, IdRef, IssueFields};
use super::notify::{build_recipients, build_restrictions, parse_json_param};
use super::Operation;
use crate::provider::{Params, StaticProvider};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Operation Tests
// ============================================================================

#[test_case("create", Operation::Create)]
#[test_case("update", Operation::Update)]
#[test_case("get", Operation::Get)]
#[test_case("search", Operation::Search)]
#[test_case("changelog", Operation::Changelog)]
#[test_case("notify", Operation::Notify)]
#[test_case("transitions", Operation::Transitions)]
#[test_case("delete", Operation::Delete)]
fn test_operation_round_trip(name: &str, expected: Operation) {
    let parsed: Operation = name.parse().unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(parsed.as_str(), name);
}

#[test]
fn test_unknown_operation_rejected() {
    let err = "archive".parse::<Operation>().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("archive"));
}

// ============================================================================
// Sparse Merge Tests
// ============================================================================

#[test]
fn test_absent_optionals_never_serialized() {
    let fields = IssueFields {
        summary: Some("A bug".to_string()),
        project: Some(IdRef {
            id: "10000".to_string(),
        }),
        issue_type: Some(IdRef {
            id: "10001".to_string(),
        }),
        ..IssueFields::default()
    };

    let body = json!({ "fields": fields });
    assert_eq!(
        body,
        json!({
            "fields": {
                "summary": "A bug",
                "project": {"id": "10000"},
                "issuetype": {"id": "10001"},
            }
        })
    );
}

#[test]
fn test_optional_fields_included_when_supplied() {
    let provider = StaticProvider::new()
        .with_parameter("labels", json!(["bug", "urgent"]))
        .with_parameter("priority_id", json!("2"))
        .with_parameter("assignee", json!("jdoe"))
        .with_parameter("description", json!("details"));

    let mut fields = IssueFields::default();
    apply_optional_fields(&mut fields, Params::new(&provider, 0)).unwrap();

    assert_eq!(
        json!(fields),
        json!({
            "labels": ["bug", "urgent"],
            "priority": {"id": "2"},
            "assignee": {"name": "jdoe"},
            "description": "details",
        })
    );
}

#[test]
fn test_parent_key_uppercased() {
    let provider = StaticProvider::new().with_parameter("parent_key", json!("proj-12"));

    let mut fields = IssueFields::default();
    apply_optional_fields(&mut fields, Params::new(&provider, 0)).unwrap();

    assert_eq!(json!(fields), json!({"parent": {"key": "PROJ-12"}}));
}

#[test_case("summary,status", &["summary", "status"] ; "plain")]
#[test_case(" summary , status ", &["summary", "status"] ; "whitespace")]
#[test_case("summary,,status,", &["summary", "status"] ; "empty_segments")]
fn test_split_list(input: &str, expected: &[&str]) {
    assert_eq!(split_list(input), expected);
}

// ============================================================================
// Notify Builder Tests
// ============================================================================

#[test]
fn test_recipients_voters_distinct_from_watchers() {
    let provider = StaticProvider::new().with_parameter("notify_voters", json!(true));
    let recipients = build_recipients(Params::new(&provider, 0)).unwrap();

    assert_eq!(
        json!(recipients),
        json!({"reporter": false, "assignee": false, "watchers": false, "voters": true})
    );
}

#[test]
fn test_recipients_with_users_and_groups() {
    let provider = StaticProvider::new()
        .with_parameter("notify_reporter", json!(true))
        .with_parameter("notify_users", json!(["5b10a2844c20165700ede21g"]))
        .with_parameter("notify_groups", json!(["site-admins"]));
    let recipients = build_recipients(Params::new(&provider, 0)).unwrap();

    assert_eq!(
        json!(recipients),
        json!({
            "reporter": true,
            "assignee": false,
            "watchers": false,
            "voters": false,
            "users": [{"accountId": "5b10a2844c20165700ede21g"}],
            "groups": [{"name": "site-admins"}],
        })
    );
}

#[test]
fn test_restrictions_absent_without_groups() {
    let provider = StaticProvider::new();
    assert!(build_restrictions(Params::new(&provider, 0))
        .unwrap()
        .is_none());
}

#[test]
fn test_restrictions_with_groups() {
    let provider = StaticProvider::new().with_parameter("restrict_groups", json!(["dev-team"]));
    let restrict = build_restrictions(Params::new(&provider, 0))
        .unwrap()
        .unwrap();
    assert_eq!(restrict, json!({"groups": [{"name": "dev-team"}]}));
}

#[test]
fn test_json_mode_parses_verbatim() {
    let provider =
        StaticProvider::new().with_parameter("recipients_json", json!(r#"{"reporter":true}"#));
    let parsed = parse_json_param(Params::new(&provider, 0), "recipients_json")
        .unwrap()
        .unwrap();
    assert_eq!(parsed, json!({"reporter": true}));
}

#[test]
fn test_json_mode_rejects_malformed_text() {
    let provider =
        StaticProvider::new().with_parameter("recipients_json", json!("{reporter: yes}"));
    let err = parse_json_param(Params::new(&provider, 0), "recipients_json").unwrap_err();
    assert!(err.is_validation());
}
