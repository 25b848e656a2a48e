//! In-memory TodoStore

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use tasklane_core::store::{SortKey, StoreError, TodoFilter, TodoStore};
use tasklane_core::types::{Todo, TodoId};

/// In-memory implementation for development and testing
pub struct InMemoryTodoStore {
    todos: RwLock<HashMap<TodoId, Todo>>,
}

impl InMemoryTodoStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            todos: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn get(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let todos = self
            .todos
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        Ok(todos.get(id).cloned())
    }

    async fn insert(&self, todo: Todo) -> Result<Todo, StoreError> {
        let mut todos = self
            .todos
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        todos.insert(todo.id.clone(), todo.clone());
        Ok(todo)
    }

    async fn update(&self, todo: Todo) -> Result<Todo, StoreError> {
        let mut todos = self
            .todos
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        if !todos.contains_key(&todo.id) {
            return Err(StoreError::NotFound(todo.id.clone()));
        }
        todos.insert(todo.id.clone(), todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: &TodoId) -> Result<bool, StoreError> {
        let mut todos = self
            .todos
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        Ok(todos.remove(id).is_some())
    }

    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>, StoreError> {
        let todos = self
            .todos
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?;

        let mut matched: Vec<Todo> = todos
            .values()
            .filter(|todo| {
                filter
                    .owner_id
                    .as_ref()
                    .map_or(true, |owner| todo.owner_id.as_ref() == Some(owner))
            })
            .filter(|todo| filter.status.map_or(true, |status| todo.status == status))
            .cloned()
            .collect();

        match filter.sort {
            // Missing due dates sort last in both directions.
            Some(SortKey::DueDateAsc) => {
                matched.sort_by_key(|todo| (todo.due_date.is_none(), todo.due_date))
            }
            Some(SortKey::DueDateDesc) => matched.sort_by(|a, b| b.due_date.cmp(&a.due_date)),
            None => matched.sort_by_key(|todo| todo.created_at),
        }

        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use tasklane_core::types::Status;

    fn todo_due(title: &str, due: Option<&str>) -> Todo {
        let mut todo = Todo::new(title, None);
        todo.due_date = due.map(|d| {
            format!("{}T00:00:00Z", d)
                .parse::<DateTime<Utc>>()
                .expect("parse date")
        });
        todo
    }

    #[tokio::test]
    async fn test_insert_get_delete_roundtrip() {
        let store = InMemoryTodoStore::new();
        let todo = store.insert(Todo::new("a", None)).await.expect("insert");

        let loaded = store.get(&todo.id).await.expect("get").expect("present");
        assert_eq!(loaded.title, "a");

        assert!(store.delete(&todo.id).await.expect("delete"));
        assert!(store.get(&todo.id).await.expect("get").is_none());
        // Idempotent: a second delete simply reports nothing removed.
        assert!(!store.delete(&todo.id).await.expect("delete"));
    }

    #[tokio::test]
    async fn test_update_of_missing_record_is_not_found() {
        let store = InMemoryTodoStore::new();
        let result = store.update(Todo::new("ghost", None)).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_owner_and_status() {
        let store = InMemoryTodoStore::new();
        let mut owned = Todo::new("owned", None);
        owned.owner_id = Some("alice".to_string());
        owned.status = Status::Completed;
        store.insert(owned).await.expect("insert");
        store.insert(Todo::new("unowned", None)).await.expect("insert");

        let mine = store
            .list(TodoFilter {
                owner_id: Some("alice".to_string()),
                ..TodoFilter::default()
            })
            .await
            .expect("list");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "owned");

        let completed = store
            .list(TodoFilter {
                status: Some(Status::Completed),
                ..TodoFilter::default()
            })
            .await
            .expect("list");
        assert_eq!(completed.len(), 1);

        let all = store.list(TodoFilter::default()).await.expect("list");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_due_date_sort_orders() {
        let store = InMemoryTodoStore::new();
        store
            .insert(todo_due("later", Some("2026-01-10")))
            .await
            .expect("insert");
        store
            .insert(todo_due("sooner", Some("2026-01-05")))
            .await
            .expect("insert");
        store.insert(todo_due("undated", None)).await.expect("insert");

        let asc = store
            .list(TodoFilter {
                sort: Some(SortKey::DueDateAsc),
                ..TodoFilter::default()
            })
            .await
            .expect("list");
        let titles: Vec<&str> = asc.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["sooner", "later", "undated"]);

        let desc = store
            .list(TodoFilter {
                sort: Some(SortKey::DueDateDesc),
                ..TodoFilter::default()
            })
            .await
            .expect("list");
        let titles: Vec<&str> = desc.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["later", "sooner", "undated"]);
    }
}
