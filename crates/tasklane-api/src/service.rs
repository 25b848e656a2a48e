use std::sync::Arc;

use tracing::info;

use tasklane_core::{
    Dispatcher, ListQuery, NewTodo, Outcome, TodoPatch, TodoStore, User, UserStore,
};

use crate::dto::RegisterResponse;
use crate::ApiError;

/// Service facade: registration, credential resolution and the two dispatch
/// interfaces (text and structured), all sharing one dispatcher.
pub struct TasklaneService {
    dispatcher: Dispatcher,
    users: Arc<dyn UserStore>,
}

impl TasklaneService {
    /// Build the service over store handles. The dispatcher should be
    /// constructed from the same `users` handle so bootstrap-mode checks and
    /// token resolution agree.
    pub fn new(dispatcher: Dispatcher, users: Arc<dyn UserStore>) -> Self {
        Self { dispatcher, users }
    }

    /// Convenience constructor without an oracle.
    pub fn with_stores(todos: Arc<dyn TodoStore>, users: Arc<dyn UserStore>) -> Self {
        Self::new(Dispatcher::new(todos, users.clone()), users)
    }

    /// Register a new user. The returned token is issued exactly once and is
    /// never recoverable afterwards.
    pub async fn register(&self, username: &str) -> Result<RegisterResponse, ApiError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::InvalidArgument(
                "username is required".to_string(),
            ));
        }

        let user = self.users.insert(User::new(username)).await?;
        info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(RegisterResponse { token: user.token })
    }

    /// Resolve a bearer token to its user. Absent, malformed or unknown
    /// tokens resolve to `None`; only store faults are errors.
    pub async fn resolve_token(&self, token: Option<&str>) -> Result<Option<User>, ApiError> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        Ok(self.users.get_by_token(token).await?)
    }

    /// Text interface: dispatch a free-text command.
    pub async fn chat(&self, message: &str, requester: Option<&User>) -> Result<Outcome, ApiError> {
        Ok(self.dispatcher.handle(message, requester).await?)
    }

    /// Structured create.
    pub async fn create_todo(
        &self,
        new: NewTodo,
        requester: Option<&User>,
    ) -> Result<Outcome, ApiError> {
        Ok(self.dispatcher.create(new, requester).await?)
    }

    /// Structured list.
    pub async fn list_todos(
        &self,
        query: ListQuery,
        requester: Option<&User>,
    ) -> Result<Outcome, ApiError> {
        Ok(self.dispatcher.list(query, requester).await?)
    }

    /// Structured partial update.
    pub async fn update_todo(
        &self,
        id: &str,
        patch: TodoPatch,
        requester: Option<&User>,
    ) -> Result<Outcome, ApiError> {
        Ok(self.dispatcher.update(id, patch, requester).await?)
    }

    /// Structured delete.
    pub async fn delete_todo(
        &self,
        id: &str,
        requester: Option<&User>,
    ) -> Result<Outcome, ApiError> {
        Ok(self.dispatcher.delete(id, requester).await?)
    }
}
