//! Stateless HTTP request builder and response parser for the lead API.
//!
//! # Design
//! `LeadClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller (or `LeadService`) executes the round-trip.
//!
//! Every reply is a JSON envelope with a numeric `code`; the payload key
//! depends on the endpoint (`list`, `lead`). A reply is only a success when
//! both the HTTP status is 2xx and the envelope `code` is 200.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Lead, LeadId, LeadPatch};

const SUCCESS_CODE: u16 = 200;
const NOT_FOUND_CODE: u16 = 404;

/// Bytes escaped when a lead id is placed in a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Deserialize)]
struct ListReply {
    code: u16,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    list: Vec<Lead>,
}

#[derive(Debug, Deserialize)]
struct LeadReply {
    code: u16,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lead: Option<Lead>,
}

#[derive(Debug, Deserialize)]
struct StatusReply {
    code: u16,
    #[serde(default)]
    message: Option<String>,
}

/// Synchronous, stateless client for the lead API.
#[derive(Debug, Clone)]
pub struct LeadClient {
    config: ClientConfig,
}

impl LeadClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_list_leads(&self) -> HttpRequest {
        get_request(self.config.endpoint(""))
    }

    pub fn build_get_lead(&self, id: &LeadId) -> HttpRequest {
        get_request(self.config.endpoint(&format!("get/{}", id_segment(id))))
    }

    /// Create when `patch.id` is `None`, update otherwise. The body is exactly
    /// the fields set on `patch`.
    pub fn build_upsert_lead(&self, patch: &LeadPatch) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(patch).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.config.endpoint("upsert"),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_lead(&self, id: &LeadId) -> HttpRequest {
        get_request(self.config.endpoint(&format!("delete/{}", id_segment(id))))
    }

    pub fn parse_list_leads(&self, response: HttpResponse) -> Result<Vec<Lead>, ApiError> {
        let reply: ListReply = decode(&response)?;
        check_code(reply.code, reply.message)?;
        Ok(reply.list)
    }

    /// A success envelope without a `lead` is reported as `NotFound`.
    pub fn parse_get_lead(&self, response: HttpResponse) -> Result<Lead, ApiError> {
        let reply: LeadReply = decode(&response)?;
        check_code(reply.code, reply.message)?;
        reply.lead.ok_or(ApiError::NotFound)
    }

    /// Returns the stored lead when the server echoes it back.
    pub fn parse_upsert_lead(&self, response: HttpResponse) -> Result<Option<Lead>, ApiError> {
        let reply: LeadReply = decode(&response)?;
        check_code(reply.code, reply.message)?;
        Ok(reply.lead)
    }

    pub fn parse_delete_lead(&self, response: HttpResponse) -> Result<(), ApiError> {
        let reply: StatusReply = decode(&response)?;
        check_code(reply.code, reply.message)
    }
}

/// Ids are opaque, so `/`, `?` and friends must not change the route.
fn id_segment(id: &LeadId) -> String {
    match id.as_str() {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        raw => utf8_percent_encode(raw, SEGMENT).to_string(),
    }
}

fn get_request(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-2xx HTTP statuses to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == NOT_FOUND_CODE {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Map a non-200 envelope `code` to the appropriate `ApiError` variant.
fn check_code(code: u16, message: Option<String>) -> Result<(), ApiError> {
    match code {
        SUCCESS_CODE => Ok(()),
        NOT_FOUND_CODE => Err(ApiError::NotFound),
        _ => Err(ApiError::Rejected { code, message }),
    }
}
