//! Toolkit-independent controllers for the lead list and lead form screens.
//!
//! # Design
//! A UI layer renders these and forwards user input to them. Every effect a
//! screen can have on the rest of the application comes back as a value:
//! a `Notice` to toast, a `Route` to navigate to. The shell context (app
//! name, accent, breadcrumb) is passed in at construction and each view keeps
//! its own derived copy.

use tracing::debug;

use crate::error::ApiError;
use crate::http::Transport;
use crate::programs;
use crate::search::filter_leads;
use crate::service::{LeadService, UpsertAction};
use crate::types::{Lead, LeadField, LeadForm, LeadId, LeadPatch};
use crate::validate::{validate_lead_form, FieldErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub title: String,
    pub url: String,
}

/// Chrome shared by every screen: which app/module is active, the accent
/// color, the back link and the breadcrumb trail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellContext {
    pub app: String,
    pub module: String,
    pub window: String,
    pub back: Option<String>,
    pub accent: String,
    pub breadcrumb: Vec<Crumb>,
}

impl ShellContext {
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            ..Self::default()
        }
    }

    /// Context for the lead screens, keeping the caller's app name.
    pub fn leads_section(&self) -> Self {
        Self {
            app: self.app.clone(),
            module: "leads".to_string(),
            window: "crm".to_string(),
            back: None,
            accent: "purple".to_string(),
            breadcrumb: vec![Crumb {
                title: "Leads".to_string(),
                url: "/leads".to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The lead listing.
    Home,
    NewLead,
    EditLead(LeadId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/home".to_string(),
            Route::NewLead => "/leads".to_string(),
            Route::EditLead(id) => format!("/leads/{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    fn success(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            level: NoticeLevel::Success,
        }
    }

    fn error(title: &str, err: &ApiError) -> Self {
        Self {
            title: title.to_string(),
            description: err.to_string(),
            level: NoticeLevel::Error,
        }
    }
}

/// Navigation forced on a screen that cannot be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The mutation went through; leave the form.
    Saved { notice: Notice, redirect: Route },
    /// Nothing was sent; the errors are also kept on the view.
    Invalid(FieldErrors),
    /// The request failed; the form keeps its state.
    Failed(Notice),
}

pub struct LeadListView<'s, T> {
    service: &'s LeadService<T>,
    shell: ShellContext,
    leads: Vec<Lead>,
    search: String,
}

impl<'s, T: Transport> LeadListView<'s, T> {
    pub fn new(service: &'s LeadService<T>, shell: &ShellContext) -> Self {
        Self {
            service,
            shell: shell.leads_section(),
            leads: Vec::new(),
            search: String::new(),
        }
    }

    pub fn shell(&self) -> &ShellContext {
        &self.shell
    }

    /// Fetch the listing. On failure the previously loaded leads stay.
    pub fn load(&mut self) -> Result<usize, Notice> {
        match self.service.list() {
            Ok(leads) => {
                self.leads = leads;
                Ok(self.leads.len())
            }
            Err(err) => Err(Notice::error("Could not load leads", &err)),
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Loaded leads matching the current search term.
    pub fn visible(&self) -> Vec<&Lead> {
        filter_leads(&self.leads, &self.search)
    }

    pub fn route_for(&self, lead: &Lead) -> Route {
        Route::EditLead(lead.id.clone())
    }

    pub fn new_lead_route(&self) -> Route {
        Route::NewLead
    }
}

pub struct LeadEditView<'s, T> {
    service: &'s LeadService<T>,
    shell: ShellContext,
    form: LeadForm,
    errors: FieldErrors,
}

impl<'s, T: Transport> LeadEditView<'s, T> {
    /// Blank form for a new lead.
    pub fn create(service: &'s LeadService<T>, shell: &ShellContext) -> Self {
        Self {
            service,
            shell: shell.leads_section(),
            form: LeadForm::default(),
            errors: FieldErrors::default(),
        }
    }

    /// Open the form for `id`, or a blank one when `id` is absent or empty.
    /// A lead that cannot be fetched sends the user back to the listing.
    pub fn open(service: &'s LeadService<T>, shell: &ShellContext, id: Option<&str>) -> Result<Self, Redirect> {
        let mut view = Self::create(service, shell);
        let Some(id) = id.filter(|id| !id.is_empty()) else {
            return Ok(view);
        };
        let id = LeadId::new(id).map_err(|_| Redirect {
            to: Route::Home,
            notice: None,
        })?;
        match service.get(&id) {
            Ok(lead) => {
                view.form = LeadForm::from_lead(&lead);
                Ok(view)
            }
            Err(ApiError::NotFound) => {
                debug!(%id, "lead not found, redirecting to listing");
                Err(Redirect {
                    to: Route::Home,
                    notice: None,
                })
            }
            Err(err) => Err(Redirect {
                to: Route::Home,
                notice: Some(Notice::error("Could not load lead", &err)),
            }),
        }
    }

    pub fn shell(&self) -> &ShellContext {
        &self.shell
    }

    pub fn is_editing(&self) -> bool {
        self.form.id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit lead"
        } else {
            "New lead"
        }
    }

    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn programs(&self) -> &'static [&'static str] {
        programs::programs()
    }

    /// Update one field and drop its stale error message.
    pub fn set_field(&mut self, field: LeadField, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    /// Validate, then upsert. An invalid form never reaches the service.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.errors = validate_lead_form(&self.form);
        if !self.errors.is_valid() {
            return SubmitOutcome::Invalid(self.errors.clone());
        }
        match self.service.upsert(&self.form.to_patch()) {
            Ok(outcome) => {
                let verb = match outcome.action {
                    UpsertAction::Created => "created",
                    UpsertAction::Updated => "updated",
                };
                SubmitOutcome::Saved {
                    notice: Notice::success(&format!("Lead {verb}"), format!("{} was {verb}.", self.full_name())),
                    redirect: Route::Home,
                }
            }
            Err(err) => SubmitOutcome::Failed(Notice::error("Could not save lead", &err)),
        }
    }

    /// Soft-delete the lead being edited.
    pub fn delete(&mut self) -> SubmitOutcome {
        let Some(id) = self.form.id.clone() else {
            return SubmitOutcome::Failed(Notice::error("Could not delete lead", &ApiError::MissingId));
        };
        match self.service.upsert(&LeadPatch::soft_delete(id)) {
            Ok(_) => SubmitOutcome::Saved {
                notice: Notice::success("Lead deleted", format!("{} was deleted.", self.full_name())),
                redirect: Route::Home,
            },
            Err(err) => SubmitOutcome::Failed(Notice::error("Could not delete lead", &err)),
        }
    }

    fn full_name(&self) -> String {
        format!("{} {}", self.form.first_name, self.form.last_name)
    }
}
