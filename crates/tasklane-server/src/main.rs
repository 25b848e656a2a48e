use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tasklane_api::{ApiError, ChatRequest, ErrorCode, RegisterRequest, TasklaneService};
use tasklane_config::{load_config, TasklaneConfig};
use tasklane_core::{Dispatcher, ListQuery, NewTodo, Outcome, SortKey, TodoPatch, User};
use tasklane_oracle::{HttpLlmClient, HttpLlmClientConfig, LlmIntentOracle, OracleConfig};
use tasklane_stores::{InMemoryTodoStore, InMemoryUserStore};

#[derive(Debug, Parser)]
#[command(name = "tasklane-server")]
struct Args {
    #[arg(long, default_value = "config/tasklane.yaml")]
    config: PathBuf,
    /// Overrides `server.listen` from the config file.
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[derive(Clone)]
struct AppState {
    service: Arc<TasklaneService>,
}

#[derive(Debug, Deserialize)]
struct ListParams {
    completed: Option<bool>,
    sort: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = if args.config.exists() {
        load_config(&args.config).context("load configuration failed")?
    } else {
        warn!(path = %args.config.display(), "config file not found, using defaults");
        TasklaneConfig::default()
    };

    let service = Arc::new(build_service(&config));
    let state = AppState { service };

    let app = Router::new()
        .route("/health", get(health))
        .route("/users", post(register))
        .route("/chat", post(chat))
        .route("/todos", post(create_todo).get(list_todos))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .with_state(state);

    let listen: SocketAddr = match args.listen {
        Some(addr) => addr,
        None => config
            .server
            .listen
            .parse()
            .context("invalid server.listen address")?,
    };

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .context("bind server listener failed")?;
    info!(%listen, "tasklane-server listening");
    axum::serve(listener, app)
        .await
        .context("server terminated with error")
}

fn build_service(config: &TasklaneConfig) -> TasklaneService {
    let todos = Arc::new(InMemoryTodoStore::new());
    let users = Arc::new(InMemoryUserStore::new());
    let mut dispatcher = Dispatcher::new(todos, users.clone());

    if config.oracle.enabled {
        match std::env::var(&config.oracle.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                match HttpLlmClient::new(HttpLlmClientConfig {
                    endpoint: config.oracle.endpoint.clone(),
                    api_key: Some(key),
                    timeout_secs: config.oracle.timeout_secs,
                }) {
                    Ok(client) => {
                        let oracle = LlmIntentOracle::new(
                            client,
                            OracleConfig {
                                model: config.oracle.model.clone(),
                                temperature: config.oracle.temperature,
                            },
                        );
                        dispatcher = dispatcher.with_oracle(Arc::new(oracle));
                        info!(model = %config.oracle.model, "intent oracle enabled");
                    }
                    Err(err) => {
                        warn!(%err, "oracle client construction failed, running grammar-only");
                    }
                }
            }
            _ => {
                warn!(
                    env = %config.oracle.api_key_env,
                    "oracle enabled but API key env is unset, running grammar-only"
                );
            }
        }
    }

    TasklaneService::new(dispatcher, users)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status":"ok"}))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorBody>)> {
    let resp = state
        .service
        .register(&payload.username)
        .await
        .map_err(map_api_error)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// Text interface. Denied and unknown commands are part of the envelope, so
/// the route answers 200 for every dispatched message.
async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorBody>)> {
    let requester = resolve(&state, &headers).await?;
    let outcome = state
        .service
        .chat(&payload.message, requester.as_ref())
        .await
        .map_err(map_api_error)?;
    Ok(Json(outcome))
}

async fn create_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewTodo>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let requester = resolve(&state, &headers).await?;
    let outcome = state
        .service
        .create_todo(payload, requester.as_ref())
        .await
        .map_err(map_api_error)?;
    Ok(outcome_response(outcome))
}

async fn list_todos(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let requester = resolve(&state, &headers).await?;
    let sort = match params.sort.as_deref() {
        None => None,
        Some(raw) => Some(parse_sort(raw).ok_or_else(|| {
            map_api_error(ApiError::InvalidArgument(format!(
                "unknown sort key: {raw}"
            )))
        })?),
    };
    let query = ListQuery {
        completed: params.completed,
        sort,
    };
    let outcome = state
        .service
        .list_todos(query, requester.as_ref())
        .await
        .map_err(map_api_error)?;
    Ok(outcome_response(outcome))
}

async fn update_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<TodoPatch>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let requester = resolve(&state, &headers).await?;
    let outcome = state
        .service
        .update_todo(&id, patch, requester.as_ref())
        .await
        .map_err(map_api_error)?;
    Ok(outcome_response(outcome))
}

async fn delete_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<ErrorBody>)> {
    let requester = resolve(&state, &headers).await?;
    let outcome = state
        .service
        .delete_todo(&id, requester.as_ref())
        .await
        .map_err(map_api_error)?;
    Ok(outcome_response(outcome))
}

async fn resolve(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<User>, (StatusCode, Json<ErrorBody>)> {
    state
        .service
        .resolve_token(token_from_headers(headers))
        .await
        .map_err(map_api_error)
}

/// Extract the credential from `Authorization: Token <value>`. Any other
/// shape resolves to no identity; the policy decides what that means.
fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Token "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn parse_sort(raw: &str) -> Option<SortKey> {
    match raw {
        "due_date" => Some(SortKey::DueDateAsc),
        "-due_date" => Some(SortKey::DueDateDesc),
        _ => None,
    }
}

/// Map a dispatch outcome onto its HTTP status. The envelope itself is the
/// body in every case except a successful delete.
fn outcome_response(outcome: Outcome) -> Response {
    let status = match &outcome {
        Outcome::Created { .. } => StatusCode::CREATED,
        Outcome::Deleted { .. } => return StatusCode::NO_CONTENT.into_response(),
        Outcome::List { .. } | Outcome::Updated { .. } | Outcome::UnknownCommand => StatusCode::OK,
        Outcome::NotFound { .. } => StatusCode::NOT_FOUND,
        Outcome::Forbidden => StatusCode::FORBIDDEN,
        Outcome::Unauthorized => StatusCode::UNAUTHORIZED,
    };
    (status, Json(outcome)).into_response()
}

fn map_api_error(err: ApiError) -> (StatusCode, Json<ErrorBody>) {
    let (status, code) = match err.code() {
        ErrorCode::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        ErrorCode::PermissionDenied => (StatusCode::FORBIDDEN, "permission_denied"),
        ErrorCode::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
        ErrorCode::Conflict => (StatusCode::CONFLICT, "conflict"),
        ErrorCode::InvalidArgument => (StatusCode::BAD_REQUEST, "invalid_argument"),
        ErrorCode::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };
    (
        status,
        Json(ErrorBody {
            code: code.to_string(),
            message: err.to_string(),
        }),
    )
}
