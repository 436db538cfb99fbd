//! Lead form validation.
//!
//! Rules run in `LeadField` order. A field is missing when its value is the
//! empty string. The program field is checked for presence only; the
//! selection UI is what restricts it to the catalog.

use std::collections::btree_map;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::types::{LeadField, LeadForm};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles"));

/// Per-field error messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<LeadField, String>);

impl FieldErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: LeadField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: LeadField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = LeadField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, LeadField, String> {
        self.0.iter()
    }

    /// Drop the message for `field`, e.g. once the user edits it.
    pub fn clear(&mut self, field: LeadField) {
        self.0.remove(&field);
    }

    fn insert(&mut self, field: LeadField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a LeadField, &'a String);
    type IntoIter = btree_map::Iter<'a, LeadField, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn validate_lead_form(form: &LeadForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if form.first_name.is_empty() {
        errors.insert(LeadField::FirstName, "First name is required");
    }
    if form.last_name.is_empty() {
        errors.insert(LeadField::LastName, "Last name is required");
    }
    if form.email.is_empty() {
        errors.insert(LeadField::Email, "Email is required");
    } else if !is_valid_email(&form.email) {
        errors.insert(LeadField::Email, "Email is invalid");
    }
    if form.mobile_phone.is_empty() {
        errors.insert(LeadField::MobilePhone, "Mobile phone is required");
    }
    if form.interest_program.is_empty() {
        errors.insert(LeadField::InterestProgram, "Select a program");
    }
    errors
}
