//! Notification payload builder
//!
//! The recipients structure is built one of two ways, selected by the
//! `json_parameters` flag: structured mode reads individual checkbox
//! booleans and explicit user/group lists; raw mode takes JSON text from
//! the host and parses it as-is, rejecting malformed input before
//! anything is sent. Restriction groups follow the same dual scheme.

use crate::error::{Error, Result};
use crate::http::{ApiRequest, Gateway};
use crate::provider::Params;
use crate::types::{JsonObject, JsonValue};
use serde::Serialize;
use serde_json::json;

/// Reference by account id (`{"accountId": "..."}`)
#[derive(Debug, Clone, Serialize)]
pub struct AccountRef {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

/// Reference by group name (`{"name": "..."}`)
#[derive(Debug, Clone, Serialize)]
pub struct GroupRef {
    pub name: String,
}

/// Structured recipients body.
///
/// Voters and watchers are distinct flags; the tracker's notify contract
/// accepts both independently.
#[derive(Debug, Default, Serialize)]
pub struct Recipients {
    pub reporter: bool,
    pub assignee: bool,
    pub watchers: bool,
    pub voters: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<AccountRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupRef>,
}

/// Send a notification (`POST /issue/{key}/notify`).
pub async fn notify(gateway: &Gateway, params: Params<'_>) -> Result<JsonValue> {
    let issue_key = params.str_required("issue_key")?;

    let mut body = JsonObject::new();
    if let Some(subject) = params.str_opt("subject")? {
        body.insert("subject".to_string(), json!(subject));
    }
    if let Some(text) = params.str_opt("text_body")? {
        body.insert("textBody".to_string(), json!(text));
    }

    let json_mode = params.bool_or("json_parameters", false)?;

    let recipients = if json_mode {
        parse_json_param(params, "recipients_json")?
    } else {
        Some(json!(build_recipients(params)?))
    };
    if let Some(to) = recipients {
        body.insert("to".to_string(), to);
    }

    let restrictions = if json_mode {
        parse_json_param(params, "restrictions_json")?
    } else {
        build_restrictions(params)?
    };
    if let Some(restrict) = restrictions {
        body.insert("restrict".to_string(), restrict);
    }

    let request =
        ApiRequest::post(format!("/issue/{issue_key}/notify")).json(JsonValue::Object(body));
    gateway.send(&request).await
}

/// Build recipients from checkbox-style parameters.
pub(super) fn build_recipients(params: Params<'_>) -> Result<Recipients> {
    Ok(Recipients {
        reporter: params.bool_or("notify_reporter", false)?,
        assignee: params.bool_or("notify_assignee", false)?,
        watchers: params.bool_or("notify_watchers", false)?,
        voters: params.bool_or("notify_voters", false)?,
        users: params
            .str_list_opt("notify_users")?
            .unwrap_or_default()
            .into_iter()
            .map(|account_id| AccountRef { account_id })
            .collect(),
        groups: params
            .str_list_opt("notify_groups")?
            .unwrap_or_default()
            .into_iter()
            .map(|name| GroupRef { name })
            .collect(),
    })
}

/// Build the restriction structure; absent when no groups were named.
pub(super) fn build_restrictions(params: Params<'_>) -> Result<Option<JsonValue>> {
    let groups = params.str_list_opt("restrict_groups")?.unwrap_or_default();
    if groups.is_empty() {
        return Ok(None);
    }
    let groups: Vec<GroupRef> = groups.into_iter().map(|name| GroupRef { name }).collect();
    Ok(Some(json!({ "groups": groups })))
}

/// Parse a raw-JSON parameter, rejecting malformed text with a
/// validation error before any request is issued.
pub(super) fn parse_json_param(params: Params<'_>, name: &str) -> Result<Option<JsonValue>> {
    match params.str_opt(name)? {
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| Error::validation(format!("invalid JSON in '{name}': {e}"))),
        None => Ok(None),
    }
}
