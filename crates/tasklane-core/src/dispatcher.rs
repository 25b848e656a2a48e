//! Dispatcher
//!
//! The central state machine of the core: text enters via the oracle (when
//! configured) or the grammar, the target record is resolved, the
//! authorization policy decides, and exactly one store mutation or query runs
//! on allow. The structured entry points (`create`/`list`/`update`/`delete`)
//! share the same pipeline, so both interfaces produce identical
//! authorization outcomes for equivalent inputs.
//!
//! The dispatcher holds no persistent state of its own; store handles are
//! injected at construction.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::grammar;
use crate::oracle::IntentOracle;
use crate::policy::{authorize, Decision, IntentKind};
use crate::store::{SortKey, StoreError, TodoFilter, TodoStore, UserStore};
use crate::types::{Intent, Outcome, Status, Todo, TodoPatch, User};

/// Dispatch errors. Denied and not-found cases are `Outcome` tags, not
/// errors; these two are the caller-reported validation failure and the
/// generic internal store fault.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

/// Fields for a structured create
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Filters for a structured list
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

/// Orchestrates grammar, oracle fallback, record lookup, authorization and
/// the single store mutation per call.
pub struct Dispatcher {
    todos: Arc<dyn TodoStore>,
    users: Arc<dyn UserStore>,
    oracle: Option<Arc<dyn IntentOracle>>,
}

impl Dispatcher {
    /// Create a dispatcher without an oracle; the grammar is the only
    /// text-to-intent path.
    pub fn new(todos: Arc<dyn TodoStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            todos,
            users,
            oracle: None,
        }
    }

    /// Attach an optional intent oracle, attempted before the grammar.
    pub fn with_oracle(mut self, oracle: Arc<dyn IntentOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Handle a free-text command. The oracle (when configured) is attempted
    /// first; any failure falls back to the deterministic grammar and is
    /// never surfaced.
    pub async fn handle(
        &self,
        text: &str,
        requester: Option<&User>,
    ) -> Result<Outcome, DispatchError> {
        let intent = self.resolve_intent(text).await;
        debug!(?intent, authenticated = requester.is_some(), "resolved command intent");
        self.dispatch(intent, requester).await
    }

    /// Dispatch an already-parsed intent through the shared pipeline.
    pub async fn dispatch(
        &self,
        intent: Intent,
        requester: Option<&User>,
    ) -> Result<Outcome, DispatchError> {
        match intent {
            Intent::Create { title, description } => {
                self.create(
                    NewTodo {
                        title,
                        description,
                        ..NewTodo::default()
                    },
                    requester,
                )
                .await
            }
            Intent::List => self.list(ListQuery::default(), requester).await,
            Intent::Update { id, patch } => self.update(&id, patch, requester).await,
            Intent::Delete { id } => self.delete(&id, requester).await,
            Intent::Unknown => Ok(Outcome::UnknownCommand),
        }
    }

    /// Create a todo. In bootstrap mode (no user has ever registered) an
    /// anonymous create is allowed; once any user exists it is unauthorized.
    pub async fn create(
        &self,
        new: NewTodo,
        requester: Option<&User>,
    ) -> Result<Outcome, DispatchError> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(DispatchError::Validation("title is required".to_string()));
        }

        let any_registered = self.users.any_registered().await?;
        match authorize(IntentKind::Create, None, requester, any_registered) {
            Decision::Allow => {}
            Decision::Forbidden => return Ok(Outcome::Forbidden),
            Decision::Unauthorized => return Ok(Outcome::Unauthorized),
        }

        let mut todo = Todo::new(title, new.description.filter(|d| !d.trim().is_empty()));
        todo.status = new.status;
        todo.priority = new.priority;
        todo.due_date = new.due_date;
        todo.owner_id = requester.map(|user| user.id.clone());

        let todo = self.todos.insert(todo).await?;
        info!(todo_id = %todo.id, owner = ?todo.owner_id, "todo created");
        Ok(Outcome::Created { todo })
    }

    /// Enumerate todos. Always allowed; results are scoped to the
    /// requester's own records when an identity is present, otherwise
    /// unscoped.
    pub async fn list(
        &self,
        query: ListQuery,
        requester: Option<&User>,
    ) -> Result<Outcome, DispatchError> {
        let filter = TodoFilter {
            owner_id: requester.map(|user| user.id.clone()),
            status: query.completed.map(|done| {
                if done {
                    Status::Completed
                } else {
                    Status::Pending
                }
            }),
            sort: query.sort,
        };
        let todos = self.todos.list(filter).await?;
        Ok(Outcome::List { todos })
    }

    /// Partially update a todo: only fields present in the patch are
    /// applied, `updated_at` is refreshed.
    pub async fn update(
        &self,
        id: &str,
        patch: TodoPatch,
        requester: Option<&User>,
    ) -> Result<Outcome, DispatchError> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(DispatchError::Validation("title is required".to_string()));
            }
        }

        let Some(mut todo) = self.todos.get(id).await? else {
            return Ok(Outcome::NotFound { id: id.to_string() });
        };

        let any_registered = self.users.any_registered().await?;
        match authorize(IntentKind::Update, Some(&todo), requester, any_registered) {
            Decision::Allow => {}
            Decision::Forbidden => return Ok(Outcome::Forbidden),
            Decision::Unauthorized => return Ok(Outcome::Unauthorized),
        }

        todo.apply(patch);
        let todo = self.todos.update(todo).await?;
        info!(todo_id = %todo.id, "todo updated");
        Ok(Outcome::Updated { todo })
    }

    /// Delete a todo.
    pub async fn delete(
        &self,
        id: &str,
        requester: Option<&User>,
    ) -> Result<Outcome, DispatchError> {
        let Some(todo) = self.todos.get(id).await? else {
            return Ok(Outcome::NotFound { id: id.to_string() });
        };

        let any_registered = self.users.any_registered().await?;
        match authorize(IntentKind::Delete, Some(&todo), requester, any_registered) {
            Decision::Allow => {}
            Decision::Forbidden => return Ok(Outcome::Forbidden),
            Decision::Unauthorized => return Ok(Outcome::Unauthorized),
        }

        self.todos.delete(&todo.id).await?;
        info!(todo_id = %todo.id, "todo deleted");
        Ok(Outcome::Deleted { id: todo.id })
    }

    async fn resolve_intent(&self, text: &str) -> Intent {
        if let Some(oracle) = &self.oracle {
            if let Some(intent) = oracle.try_resolve(text).await {
                debug!("oracle resolved intent");
                return intent;
            }
            debug!("oracle produced nothing usable, falling back to grammar");
        }
        grammar::parse(text)
    }
}
