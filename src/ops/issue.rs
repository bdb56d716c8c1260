//! Issue lifecycle request builders
//!
//! Each builder reads typed parameters for one record and produces the
//! request for its endpoint. Optional fields follow a sparse merge:
//! anything absent from the input is omitted from the body, never sent as
//! null.

use crate::envelope::Envelope;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, Gateway};
use crate::pagination;
use crate::provider::Params;
use crate::types::{JsonObject, JsonValue, Method};
use serde::Serialize;
use serde_json::json;

/// Single-page result cap when the caller does not ask for everything
const DEFAULT_LIMIT: i64 = 50;

// ============================================================================
// Field payloads
// ============================================================================

/// Reference by stable id (`{"id": "..."}`)
#[derive(Debug, Clone, Serialize)]
pub struct IdRef {
    pub id: String,
}

/// Reference by user name (`{"name": "..."}`)
#[derive(Debug, Clone, Serialize)]
pub struct NameRef {
    pub name: String,
}

/// Reference by issue key (`{"key": "..."}`)
#[derive(Debug, Clone, Serialize)]
pub struct KeyRef {
    pub key: String,
}

/// The `fields` object of a create/update body.
///
/// Every member is optional so the same struct serves both operations;
/// serde skips absent members entirely.
#[derive(Debug, Default, Serialize)]
pub struct IssueFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<IdRef>,
    #[serde(rename = "issuetype", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<NameRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<KeyRef>,
}

/// Merge the optional issue fields shared by create and update.
///
/// Parent issue keys are case-normalized to upper case; the tracker
/// treats keys as case-sensitive on some endpoints and canonical keys are
/// always upper case.
pub(super) fn apply_optional_fields(fields: &mut IssueFields, params: Params<'_>) -> Result<()> {
    fields.labels = params.str_list_opt("labels")?;
    if let Some(id) = params.str_opt("priority_id")? {
        fields.priority = Some(IdRef { id });
    }
    if let Some(name) = params.str_opt("assignee")? {
        fields.assignee = Some(NameRef { name });
    }
    fields.description = params.str_opt("description")?;
    if let Some(key) = params.str_opt("parent_key")? {
        fields.parent = Some(KeyRef {
            key: key.to_uppercase(),
        });
    }
    Ok(())
}

/// Look up whether `type_id` is flagged as a subtask type.
///
/// The type list is fetched fresh per call; an id the tracker does not
/// know is a validation failure rather than a silent pass.
async fn is_subtask_type(gateway: &Gateway, type_id: &str) -> Result<bool> {
    let response = gateway.send(&ApiRequest::get("/issuetype")).await?;
    let types = Envelope::Bare.unwrap_records(&response)?;

    for issue_type in &types {
        if issue_type.get("id").and_then(JsonValue::as_str) == Some(type_id) {
            return Ok(issue_type
                .get("subtask")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false));
        }
    }

    Err(Error::validation(format!(
        "issue type '{type_id}' does not exist"
    )))
}

fn require_parent_for_subtask(fields: &IssueFields, type_id: &str) -> Result<()> {
    if fields.parent.is_none() {
        return Err(Error::validation(format!(
            "issue type '{type_id}' is a subtask type; 'parent_key' is required"
        )));
    }
    Ok(())
}

// ============================================================================
// Operations
// ============================================================================

/// Create an issue (`POST /issue`).
pub async fn create(gateway: &Gateway, params: Params<'_>) -> Result<JsonValue> {
    let issue_type_id = params.str_required("issue_type_id")?;

    let mut fields = IssueFields {
        summary: Some(params.str_required("summary")?),
        project: Some(IdRef {
            id: params.str_required("project_id")?,
        }),
        issue_type: Some(IdRef {
            id: issue_type_id.clone(),
        }),
        ..IssueFields::default()
    };
    apply_optional_fields(&mut fields, params)?;

    if is_subtask_type(gateway, &issue_type_id).await? {
        require_parent_for_subtask(&fields, &issue_type_id)?;
    }

    let request = ApiRequest::post("/issue").json(json!({ "fields": fields }));
    gateway.send(&request).await
}

/// Update an issue (`PUT /issue/{key}`). All fields optional.
pub async fn update(gateway: &Gateway, params: Params<'_>) -> Result<JsonValue> {
    let issue_key = params.str_required("issue_key")?;

    let mut fields = IssueFields {
        summary: params.str_opt("summary")?,
        ..IssueFields::default()
    };
    apply_optional_fields(&mut fields, params)?;

    if let Some(type_id) = params.str_opt("issue_type_id")? {
        fields.issue_type = Some(IdRef {
            id: type_id.clone(),
        });
        if is_subtask_type(gateway, &type_id).await? {
            require_parent_for_subtask(&fields, &type_id)?;
        }
    }

    let request =
        ApiRequest::put(format!("/issue/{issue_key}")).json(json!({ "fields": fields }));
    gateway.send(&request).await
}

/// Fetch one issue (`GET /issue/{key}`).
///
/// Optional query parameters pass through verbatim when present; nothing
/// is sent for absent ones.
pub async fn get(gateway: &Gateway, params: Params<'_>) -> Result<JsonValue> {
    let issue_key = params.str_required("issue_key")?;
    let mut request = ApiRequest::get(format!("/issue/{issue_key}"));

    if let Some(fields) = params.str_opt("fields")? {
        request = request.query("fields", fields);
    }
    if params.bool_or("fields_by_keys", false)? {
        request = request.query("fieldsByKeys", "true");
    }
    if let Some(expand) = params.str_opt("expand")? {
        request = request.query("expand", expand);
    }
    if let Some(properties) = params.str_opt("properties")? {
        request = request.query("properties", properties);
    }
    if params.bool_or("update_history", false)? {
        request = request.query("updateHistory", "true");
    }

    gateway.send(&request).await
}

/// Search issues (`POST /search`), unwrapping the `issues` array.
pub async fn search(gateway: &Gateway, params: Params<'_>) -> Result<Vec<JsonValue>> {
    let mut body = JsonObject::new();
    if let Some(jql) = params.str_opt("jql")? {
        body.insert("jql".to_string(), json!(jql));
    }
    if let Some(fields) = params.str_opt("fields")? {
        body.insert("fields".to_string(), json!(split_list(&fields)));
    }
    if let Some(expand) = params.str_opt("expand")? {
        body.insert("expand".to_string(), json!(split_list(&expand)));
    }

    if params.bool_or("return_all", false)? {
        return pagination::fetch_all(gateway, "issues", "/search", Method::POST, body).await;
    }

    let limit = params.i64_opt("limit")?.unwrap_or(DEFAULT_LIMIT);
    body.insert("maxResults".to_string(), json!(limit));
    let response = gateway
        .send(&ApiRequest::post("/search").json(JsonValue::Object(body)))
        .await?;
    Envelope::Wrapped("issues").unwrap_records(&response)
}

/// Read an issue's changelog (`GET /issue/{key}/changelog`), unwrapping
/// the `values` array.
pub async fn changelog(gateway: &Gateway, params: Params<'_>) -> Result<Vec<JsonValue>> {
    let issue_key = params.str_required("issue_key")?;
    let path = format!("/issue/{issue_key}/changelog");

    if params.bool_or("return_all", false)? {
        return pagination::fetch_all(gateway, "values", &path, Method::GET, JsonObject::new())
            .await;
    }

    let limit = params.i64_opt("limit")?.unwrap_or(DEFAULT_LIMIT);
    let response = gateway
        .send(&ApiRequest::get(&path).query("maxResults", limit.to_string()))
        .await?;
    Envelope::Wrapped("values").unwrap_records(&response)
}

/// List available transitions (`GET /issue/{key}/transitions`),
/// unwrapping the `transitions` array.
pub async fn transitions(gateway: &Gateway, params: Params<'_>) -> Result<Vec<JsonValue>> {
    let issue_key = params.str_required("issue_key")?;
    let mut request = ApiRequest::get(format!("/issue/{issue_key}/transitions"));

    if let Some(id) = params.str_opt("transition_id")? {
        request = request.query("transitionId", id);
    }
    if let Some(expand) = params.str_opt("expand")? {
        request = request.query("expand", expand);
    }
    if params.bool_or("skip_remote_only_condition", false)? {
        request = request.query("skipRemoteOnlyCondition", "true");
    }

    let response = gateway.send(&request).await?;
    Envelope::Wrapped("transitions").unwrap_records(&response)
}

/// Delete an issue (`DELETE /issue/{key}`).
///
/// The tracker requires an explicit decision about subtasks, so the flag
/// is always sent.
pub async fn delete(gateway: &Gateway, params: Params<'_>) -> Result<JsonValue> {
    let issue_key = params.str_required("issue_key")?;
    let delete_subtasks = params.bool_or("delete_subtasks", false)?;

    let request = ApiRequest::delete(format!("/issue/{issue_key}"))
        .query("deleteSubtasks", delete_subtasks.to_string());
    gateway.send(&request).await
}

/// Split comma-separated text into trimmed entries
pub(super) fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
