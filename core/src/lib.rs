//! Client core for the lead CRM service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the lead
//! REST API without touching the network (host-does-IO pattern), validates
//! lead forms before they are submitted, and filters fetched leads for the
//! list screen.
//!
//! # Design
//! - `LeadClient` is stateless; it holds only an immutable `ClientConfig`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. `LeadService` joins the two over a `Transport`.
//! - Every operation returns a `Result` whose error says why it failed:
//!   not found, rejected envelope code, HTTP status, or transport failure.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

#[cfg(feature = "ureq")]
pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod programs;
pub mod search;
pub mod service;
pub mod types;
pub mod validate;
pub mod view;

#[cfg(feature = "ureq")]
pub use agent::UreqTransport;
pub use client::LeadClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use search::filter_leads;
pub use service::{LeadService, UpsertAction, UpsertOutcome};
pub use types::{Lead, LeadField, LeadForm, LeadId, LeadPatch};
pub use validate::{validate_lead_form, FieldErrors};
pub use view::{LeadEditView, LeadListView, Notice, NoticeLevel, Redirect, Route, ShellContext, SubmitOutcome};
