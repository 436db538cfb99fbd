//! Domain DTOs for the lead API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates. The backing store
//! keys records by `_id`, so that is the wire name of every id field, with
//! `id` accepted when decoding.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Opaque, non-empty lead identifier assigned by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LeadId(String);

impl LeadId {
    pub fn new(id: impl Into<String>) -> Result<Self, ApiError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ApiError::MissingId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LeadId {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LeadId> for String {
    fn from(id: LeadId) -> Self {
        id.0
    }
}

impl FromStr for LeadId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lead record as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lead {
    #[serde(rename = "_id", alias = "id")]
    pub id: LeadId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental: Option<u64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Display name computed by the server. Not authoritative.
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile_phone: String,
    #[serde(rename = "interestProgram", default)]
    pub interest_program: String,
    #[serde(default)]
    pub deleted: bool,
}

impl Lead {
    /// `full_name` when the server sent one, otherwise first and last name.
    pub fn display_name(&self) -> Cow<'_, str> {
        if self.full_name.is_empty() {
            Cow::Owned(format!("{} {}", self.first_name, self.last_name).trim().to_string())
        } else {
            Cow::Borrowed(&self.full_name)
        }
    }
}

/// Partial lead payload for `upsert`.
///
/// Without `id` the server creates a lead; with `id` it updates that lead,
/// applying only the fields present. Unset fields are left out of the JSON
/// body entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadPatch {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LeadId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(rename = "interestProgram", default, skip_serializing_if = "Option::is_none")]
    pub interest_program: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl LeadPatch {
    /// Payload that flags an existing lead as deleted and touches nothing else.
    pub fn soft_delete(id: LeadId) -> Self {
        Self {
            id: Some(id),
            deleted: Some(true),
            ..Self::default()
        }
    }

    pub fn is_create(&self) -> bool {
        self.id.is_none()
    }
}

/// Editable fields of the lead form, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LeadField {
    #[serde(rename = "first_name")]
    FirstName,
    #[serde(rename = "last_name")]
    LastName,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "mobile_phone")]
    MobilePhone,
    #[serde(rename = "interestProgram")]
    InterestProgram,
}

impl LeadField {
    pub const ALL: [LeadField; 5] = [
        LeadField::FirstName,
        LeadField::LastName,
        LeadField::Email,
        LeadField::MobilePhone,
        LeadField::InterestProgram,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            LeadField::FirstName => "first_name",
            LeadField::LastName => "last_name",
            LeadField::Email => "email",
            LeadField::MobilePhone => "mobile_phone",
            LeadField::InterestProgram => "interestProgram",
        }
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown lead field: {s}"))
    }
}

/// State of the create/edit form. `id` is `None` while creating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub id: Option<LeadId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_phone: String,
    pub interest_program: String,
}

impl LeadForm {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            id: Some(lead.id.clone()),
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            email: lead.email.clone(),
            mobile_phone: lead.mobile_phone.clone(),
            interest_program: lead.interest_program.clone(),
        }
    }

    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::FirstName => &self.first_name,
            LeadField::LastName => &self.last_name,
            LeadField::Email => &self.email,
            LeadField::MobilePhone => &self.mobile_phone,
            LeadField::InterestProgram => &self.interest_program,
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let slot = match field {
            LeadField::FirstName => &mut self.first_name,
            LeadField::LastName => &mut self.last_name,
            LeadField::Email => &mut self.email,
            LeadField::MobilePhone => &mut self.mobile_phone,
            LeadField::InterestProgram => &mut self.interest_program,
        };
        *slot = value.into();
    }

    /// Full-field replace payload; carries the id only when editing.
    pub fn to_patch(&self) -> LeadPatch {
        LeadPatch {
            id: self.id.clone(),
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
            mobile_phone: Some(self.mobile_phone.clone()),
            interest_program: Some(self.interest_program.clone()),
            deleted: None,
        }
    }
}
