use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

pub const DEFAULT_BASE_PATH: &str = "/lead";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lead {
    #[serde(rename = "_id")]
    pub id: String,
    pub incremental: u64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub mobile_phone: String,
    #[serde(rename = "interestProgram")]
    pub interest_program: String,
    pub deleted: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeadPatch {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    #[serde(rename = "interestProgram")]
    pub interest_program: Option<String>,
    pub deleted: Option<bool>,
}

/// JSON envelope of every endpoint. The HTTP status mirrors `code`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reply {
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<Lead>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead: Option<Lead>,
}

impl Reply {
    fn ok() -> Self {
        Self {
            code: 200,
            message: None,
            list: None,
            lead: None,
        }
    }

    fn with_list(list: Vec<Lead>) -> Self {
        Self {
            list: Some(list),
            ..Self::ok()
        }
    }

    fn with_lead(lead: Lead) -> Self {
        Self {
            lead: Some(lead),
            ..Self::ok()
        }
    }

    fn not_found(id: &str) -> Self {
        Self {
            code: 404,
            message: Some(format!("lead {id} not found")),
            ..Self::ok()
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    leads: HashMap<String, Lead>,
    last_incremental: u64,
}

impl Store {
    /// Active leads in creation order.
    fn active(&self) -> Vec<Lead> {
        let mut leads: Vec<Lead> = self.leads.values().filter(|l| !l.deleted).cloned().collect();
        leads.sort_by_key(|l| l.incremental);
        leads
    }

    fn create(&mut self, patch: LeadPatch) -> Lead {
        self.last_incremental += 1;
        let mut lead = Lead {
            id: Uuid::new_v4().to_string(),
            incremental: self.last_incremental,
            first_name: patch.first_name.unwrap_or_default(),
            last_name: patch.last_name.unwrap_or_default(),
            full_name: String::new(),
            email: patch.email.unwrap_or_default(),
            mobile_phone: patch.mobile_phone.unwrap_or_default(),
            interest_program: patch.interest_program.unwrap_or_default(),
            deleted: patch.deleted.unwrap_or(false),
        };
        lead.full_name = full_name(&lead);
        self.leads.insert(lead.id.clone(), lead.clone());
        lead
    }

    fn update(&mut self, id: &str, patch: LeadPatch) -> Option<Lead> {
        let lead = self.leads.get_mut(id)?;
        if let Some(first_name) = patch.first_name {
            lead.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            lead.last_name = last_name;
        }
        if let Some(email) = patch.email {
            lead.email = email;
        }
        if let Some(mobile_phone) = patch.mobile_phone {
            lead.mobile_phone = mobile_phone;
        }
        if let Some(interest_program) = patch.interest_program {
            lead.interest_program = interest_program;
        }
        if let Some(deleted) = patch.deleted {
            lead.deleted = deleted;
        }
        lead.full_name = full_name(lead);
        Some(lead.clone())
    }
}

fn full_name(lead: &Lead) -> String {
    format!("{} {}", lead.first_name, lead.last_name).trim().to_string()
}

pub type Db = Arc<RwLock<Store>>;

/// Mock server settings, read from `PORT` and `LEAD_BASE_PATH`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            base_path: std::env::var("LEAD_BASE_PATH")
                .map(|p| normalize_base_path(&p))
                .unwrap_or(defaults.base_path),
        }
    }

    pub fn addr(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}

fn normalize_base_path(path: &str) -> String {
    match path.trim_matches('/') {
        "" => DEFAULT_BASE_PATH.to_string(),
        trimmed => format!("/{trimmed}"),
    }
}

pub fn app() -> Router {
    app_with_base_path(DEFAULT_BASE_PATH)
}

pub fn app_with_base_path(base_path: &str) -> Router {
    let base = normalize_base_path(base_path);
    let db: Db = Arc::default();
    Router::new()
        .route(&base, get(list_leads))
        .route(&format!("{base}/get/{{id}}"), get(get_lead))
        .route(&format!("{base}/upsert"), post(upsert_lead))
        .route(&format!("{base}/delete/{{id}}"), get(delete_lead))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener, base_path: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_base_path(base_path)).await
}

async fn list_leads(State(db): State<Db>) -> Reply {
    Reply::with_list(db.read().await.active())
}

async fn get_lead(State(db): State<Db>, Path(id): Path<String>) -> Reply {
    let store = db.read().await;
    match store.leads.get(&id) {
        Some(lead) => Reply::with_lead(lead.clone()),
        None => Reply::not_found(&id),
    }
}

async fn upsert_lead(State(db): State<Db>, Json(mut patch): Json<LeadPatch>) -> Reply {
    let mut store = db.write().await;
    match patch.id.take().filter(|id| !id.is_empty()) {
        None => {
            let lead = store.create(patch);
            info!(id = %lead.id, incremental = lead.incremental, "created lead");
            Reply::with_lead(lead)
        }
        Some(id) => match store.update(&id, patch) {
            Some(lead) => {
                info!(id = %lead.id, deleted = lead.deleted, "updated lead");
                Reply::with_lead(lead)
            }
            None => Reply::not_found(&id),
        },
    }
}

async fn delete_lead(State(db): State<Db>, Path(id): Path<String>) -> Reply {
    let mut store = db.write().await;
    match store.leads.remove(&id) {
        Some(_) => {
            info!(%id, "deleted lead");
            Reply {
                message: Some(format!("lead {id} deleted")),
                ..Reply::ok()
            }
        }
        None => Reply::not_found(&id),
    }
}
