//! Structured-interface scenarios: registration, CRUD, authorization parity
//! with the text interface, filtering and sorting.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tasklane_api::{ApiError, ErrorCode, TasklaneService};
use tasklane_core::{ListQuery, NewTodo, Outcome, SortKey, Todo, TodoPatch, User};
use tasklane_stores::{InMemoryTodoStore, InMemoryUserStore};

fn service() -> TasklaneService {
    TasklaneService::with_stores(
        Arc::new(InMemoryTodoStore::new()),
        Arc::new(InMemoryUserStore::new()),
    )
}

async fn login(service: &TasklaneService, name: &str) -> User {
    let token = service.register(name).await.expect("register").token;
    service
        .resolve_token(Some(&token))
        .await
        .expect("resolve")
        .expect("known token")
}

fn created(outcome: Outcome) -> Todo {
    match outcome {
        Outcome::Created { todo } => todo,
        other => panic!("expected created, got {:?}", other),
    }
}

fn titled(title: &str) -> NewTodo {
    NewTodo {
        title: title.to_string(),
        ..NewTodo::default()
    }
}

fn due(date: &str) -> Option<DateTime<Utc>> {
    Some(
        format!("{}T00:00:00Z", date)
            .parse::<DateTime<Utc>>()
            .expect("parse date"),
    )
}

#[tokio::test]
async fn test_registration_issues_token_once_and_rejects_duplicates() {
    let service = service();
    let token = service.register("alice").await.expect("register").token;
    assert!(!token.is_empty());

    let err = service.register("alice").await.expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);

    let err = service.register("   ").await.expect_err("blank");
    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}

#[tokio::test]
async fn test_token_resolution_never_raises() {
    let service = service();
    service.register("alice").await.expect("register");

    for token in [None, Some(""), Some("   "), Some("garbage"), Some("!! %%")] {
        let resolved = service.resolve_token(token).await.expect("resolve");
        assert!(resolved.is_none(), "token {:?} should not resolve", token);
    }
}

#[tokio::test]
async fn test_create_validation_rejects_empty_title() {
    let service = service();
    let err = service
        .create_todo(titled("   "), None)
        .await
        .expect_err("validation");
    assert!(matches!(err, ApiError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_structured_and_text_interfaces_agree_on_authorization() {
    let service = service();
    let alice = login(&service, "alice").await;
    let bob = login(&service, "bob").await;
    let todo = created(
        service
            .create_todo(titled("guarded"), Some(&alice))
            .await
            .expect("create"),
    );

    let patch = TodoPatch {
        title: Some("hijacked".to_string()),
        ..TodoPatch::default()
    };

    // Structured path.
    let structured = service
        .update_todo(&todo.id, patch.clone(), Some(&bob))
        .await
        .expect("update");
    // Text path, equivalent input.
    let text = service
        .chat(&format!("update todo {} title hijacked", todo.id), Some(&bob))
        .await
        .expect("chat");

    assert!(matches!(structured, Outcome::Forbidden));
    assert!(matches!(text, Outcome::Forbidden));

    let structured = service
        .update_todo(&todo.id, patch, None)
        .await
        .expect("update");
    let text = service
        .chat(&format!("update todo {} title hijacked", todo.id), None)
        .await
        .expect("chat");
    assert!(matches!(structured, Outcome::Unauthorized));
    assert!(matches!(text, Outcome::Unauthorized));
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let service = service();
    let outcome = service
        .update_todo("no-such-id", TodoPatch::default(), None)
        .await
        .expect("update");
    assert!(matches!(outcome, Outcome::NotFound { .. }));
}

#[tokio::test]
async fn test_list_filters_completed_and_sorts_by_due_date() {
    let service = service();
    let alice = login(&service, "alice").await;

    let mut first = titled("A");
    first.due_date = due("2026-01-10");
    let mut second = titled("B");
    second.due_date = due("2026-01-05");

    let first = created(service.create_todo(first, Some(&alice)).await.expect("create"));
    let second = created(service.create_todo(second, Some(&alice)).await.expect("create"));

    service
        .update_todo(
            &second.id,
            TodoPatch {
                status: Some("completed".parse().expect("status")),
                ..TodoPatch::default()
            },
            Some(&alice),
        )
        .await
        .expect("update");

    // completed=true keeps only the second todo.
    match service
        .list_todos(
            ListQuery {
                completed: Some(true),
                sort: None,
            },
            Some(&alice),
        )
        .await
        .expect("list")
    {
        Outcome::List { todos } => {
            assert_eq!(todos.len(), 1);
            assert_eq!(todos[0].id, second.id);
        }
        other => panic!("expected list, got {:?}", other),
    }

    // Ascending due-date sort puts the 01-05 item first.
    match service
        .list_todos(
            ListQuery {
                completed: None,
                sort: Some(SortKey::DueDateAsc),
            },
            Some(&alice),
        )
        .await
        .expect("list")
    {
        Outcome::List { todos } => {
            assert_eq!(todos[0].id, second.id);
            assert_eq!(todos[1].id, first.id);
        }
        other => panic!("expected list, got {:?}", other),
    }
}

#[tokio::test]
async fn test_partial_update_preserves_unspecified_fields() {
    let service = service();
    let alice = login(&service, "alice").await;

    let mut new = titled("Original");
    new.description = Some("original description".to_string());
    new.priority = 3;
    let todo = created(service.create_todo(new, Some(&alice)).await.expect("create"));

    let outcome = service
        .update_todo(
            &todo.id,
            TodoPatch {
                description: Some("rewritten".to_string()),
                ..TodoPatch::default()
            },
            Some(&alice),
        )
        .await
        .expect("update");

    match outcome {
        Outcome::Updated { todo: updated } => {
            assert_eq!(updated.title, "Original");
            assert_eq!(updated.description.as_deref(), Some("rewritten"));
            assert_eq!(updated.priority, 3);
            assert!(updated.updated_at >= updated.created_at);
        }
        other => panic!("expected updated, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_then_get_via_list_scoped_and_unscoped() {
    let service = service();
    let alice = login(&service, "alice").await;
    let todo = created(
        service
            .create_todo(titled("ephemeral"), Some(&alice))
            .await
            .expect("create"),
    );

    assert!(matches!(
        service
            .delete_todo(&todo.id, Some(&alice))
            .await
            .expect("delete"),
        Outcome::Deleted { .. }
    ));

    for requester in [Some(&alice), None] {
        match service
            .list_todos(ListQuery::default(), requester)
            .await
            .expect("list")
        {
            Outcome::List { todos } => assert!(todos.iter().all(|t| t.id != todo.id)),
            other => panic!("expected list, got {:?}", other),
        }
    }

    assert!(matches!(
        service
            .delete_todo(&todo.id, Some(&alice))
            .await
            .expect("delete"),
        Outcome::NotFound { .. }
    ));
}
