//! REST endpoints for intake, provisioning, login and chat.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::{ChatSession, ChatSessions};
use crate::config::{ComposingDelay, PortalConfig};
use crate::dialogue::{DialogueEngine, DialogueTurn, Intent};
use crate::error::{ProvisioningError, ResolutionError, SessionError};
use crate::provisioning::{Orchestrator, StepEvent};
use crate::registry::{ProjectOption, Registry, RoleOption};
use crate::resolver::{OnboardingRecord, Resolver};
use crate::session::{EmployeeSession, JsonFileSessionStore, SessionStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub engine: Arc<DialogueEngine>,
    pub sessions: Arc<dyn SessionStore>,
    pub chats: Arc<ChatSessions>,
    pub orchestrator: Arc<Orchestrator>,
    pub composing_delay: ComposingDelay,
}

impl AppState {
    pub fn new(
        config: &PortalConfig,
        registry: Arc<Registry>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let orchestrator = Orchestrator::new(config.provisioning_plan.clone())
            .with_settle(config.provisioning_settle);
        Self {
            resolver: Resolver::new(registry),
            engine: Arc::new(DialogueEngine::default_rules()),
            sessions,
            chats: Arc::new(ChatSessions::new()),
            orchestrator: Arc::new(orchestrator),
            composing_delay: config.composing_delay,
        }
    }

    /// Load the catalog and open the session file named by `config`.
    pub async fn from_config(config: &PortalConfig) -> crate::error::Result<Self> {
        let registry = match &config.catalog_path {
            Some(path) => Registry::load(path)?,
            None => Registry::builtin(),
        };
        registry.validate(config.strict_catalog)?;

        let sessions = JsonFileSessionStore::open(&config.sessions_path).await?;
        Ok(Self::new(config, Arc::new(registry), Arc::new(sessions)))
    }
}

/// Build the portal router.
pub fn portal_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{id}/roles", get(list_roles))
        .route("/api/onboard", post(onboard))
        .route("/api/login", post(login))
        .route("/api/chat/{id}", post(chat).delete(logout))
        .route("/api/chat/{id}/history", get(chat_history))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Errors ──────────────────────────────────────────────────────────────

/// Handler error, rendered as `{"error": "..."}` with a matching status.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Unprocessable(String),
    Internal(String),
}

impl From<ResolutionError> for ApiError {
    fn from(e: ResolutionError) -> Self {
        Self::Unprocessable(e.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<ProvisioningError> for ApiError {
    fn from(e: ProvisioningError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            Self::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m),
            Self::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m),
            Self::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "onboard-assist"
    }))
}

// ── Catalog ─────────────────────────────────────────────────────────────

async fn list_projects(State(state): State<AppState>) -> Json<Vec<ProjectOption>> {
    Json(state.resolver.registry().project_options())
}

async fn list_roles(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<RoleOption>> {
    Json(state.resolver.registry().role_options_for_project(&id))
}

// ── Intake + provisioning ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OnboardRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardResponse {
    pub employee: EmployeeSession,
    pub progress: Vec<StepEvent>,
    pub summary: String,
    pub completed_at: DateTime<Utc>,
}

/// POST /api/onboard
///
/// Resolves the selection, stores the handoff record, then runs the
/// provisioning sequence and returns every progress event it emitted.
async fn onboard(
    State(state): State<AppState>,
    Json(req): Json<OnboardRequest>,
) -> Result<Json<OnboardResponse>, ApiError> {
    let name = req.name.trim();
    let email = req.email.trim();
    if [name, email, req.project.as_str(), req.role.as_str()]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(ApiError::BadRequest(
            "Please fill in all required fields".into(),
        ));
    }

    let record = state
        .resolver
        .resolve(&req.project, &req.role)
        .inspect_err(|e| warn!(error = %e, "Onboarding form rejected"))?;

    let employee = EmployeeSession::new(name, email, &req.project, &req.role, record);
    state.sessions.save(&employee).await?;
    info!(
        employee = %employee.email,
        project = %employee.project,
        role = %employee.role,
        "Employee onboarded, provisioning"
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let report = state.orchestrator.run(&tx).await?;
    drop(tx);

    let mut progress = Vec::new();
    while let Some(event) = rx.recv().await {
        progress.push(event);
    }

    let summary = employee.onboarding_data.summary();
    Ok(Json(OnboardResponse {
        employee,
        progress,
        summary,
        completed_at: report.finished_at,
    }))
}

// ── Login ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub chat_id: Uuid,
    pub name: String,
    pub initials: String,
    pub role: String,
    pub onboarding_data: OnboardingRecord,
    pub welcome: String,
}

/// POST /api/login
///
/// Identifies a previously onboarded employee and opens a chat session.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Some(employee) = state.sessions.login(&req.name, &req.email).await? else {
        warn!(email = %req.email, "Login rejected");
        return Err(ApiError::Unauthorized(
            "Invalid credentials. Please check your name and email.".into(),
        ));
    };

    let chat = ChatSession::open(
        employee,
        Arc::clone(&state.engine),
        state.composing_delay,
    );
    let chat = state.chats.insert(chat).await;
    let welcome = chat
        .history()
        .await
        .first()
        .map(|turn| turn.text.clone())
        .unwrap_or_default();

    let employee = chat.employee();
    Ok(Json(LoginResponse {
        chat_id: chat.id(),
        name: employee.name.clone(),
        initials: employee.initials(),
        role: employee.role.clone(),
        onboarding_data: chat.record().clone(),
        welcome,
    }))
}

// ── Chat ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub intent: Intent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub chat_id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub turns: Vec<DialogueTurn>,
}

async fn find_chat(state: &AppState, id: Uuid) -> Result<Arc<ChatSession>, ApiError> {
    state
        .chats
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Chat session {id} not found")))
}

/// POST /api/chat/{id}
async fn chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message must not be empty".into()));
    }

    let chat = find_chat(&state, id).await?;
    let reply = chat.submit(message).await;
    Ok(Json(ChatResponse {
        reply: reply.text,
        intent: reply.intent,
    }))
}

/// DELETE /api/chat/{id}
///
/// Logs the employee out; the transcript is discarded.
async fn logout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .chats
        .remove(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| ApiError::NotFound(format!("Chat session {id} not found")))
}

/// GET /api/chat/{id}/history
async fn chat_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let chat = find_chat(&state, id).await?;
    Ok(Json(HistoryResponse {
        chat_id: chat.id(),
        opened_at: chat.opened_at(),
        turns: chat.history().await,
    }))
}
