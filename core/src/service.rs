//! `LeadService`: the lead resource client wired to a transport.
//!
//! Each method is one request: build, execute, parse. Nothing is retried or
//! cached; failures come back to the caller as `ApiError`.

use tracing::{debug, warn};

use crate::client::LeadClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Lead, LeadId, LeadPatch};

/// Whether an upsert targeted a new or an existing lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub action: UpsertAction,
    /// The stored record, when the server echoes it back.
    pub lead: Option<Lead>,
}

#[derive(Debug, Clone)]
pub struct LeadService<T> {
    client: LeadClient,
    transport: T,
}

impl<T: Transport> LeadService<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: LeadClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &LeadClient {
        &self.client
    }

    pub fn list(&self) -> Result<Vec<Lead>, ApiError> {
        let response = self.round_trip(self.client.build_list_leads())?;
        let leads = self.client.parse_list_leads(response).inspect_err(|err| warn!(%err, "listing leads failed"))?;
        debug!(count = leads.len(), "listed leads");
        Ok(leads)
    }

    pub fn get(&self, id: &LeadId) -> Result<Lead, ApiError> {
        let response = self.round_trip(self.client.build_get_lead(id))?;
        self.client
            .parse_get_lead(response)
            .inspect_err(|err| warn!(%id, %err, "fetching lead failed"))
    }

    pub fn upsert(&self, patch: &LeadPatch) -> Result<UpsertOutcome, ApiError> {
        let action = if patch.is_create() {
            UpsertAction::Created
        } else {
            UpsertAction::Updated
        };
        let response = self.round_trip(self.client.build_upsert_lead(patch)?)?;
        let lead = self
            .client
            .parse_upsert_lead(response)
            .inspect_err(|err| warn!(?action, %err, "upserting lead failed"))?;
        debug!(?action, "upserted lead");
        Ok(UpsertOutcome { action, lead })
    }

    pub fn delete(&self, id: &LeadId) -> Result<(), ApiError> {
        let response = self.round_trip(self.client.build_delete_lead(id))?;
        self.client
            .parse_delete_lead(response)
            .inspect_err(|err| warn!(%id, %err, "deleting lead failed"))
    }

    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending lead request");
        let response = self.transport.execute(request).inspect_err(|err| warn!(%err, "lead request did not complete"))?;
        debug!(status = response.status, "received lead response");
        Ok(response)
    }
}
