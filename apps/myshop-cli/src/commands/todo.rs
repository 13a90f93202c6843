//! # Todo Commands
//!
//! Commands for the todo list. Titles are validated here, before the
//! store sees them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use myshop_core::validation::validate_todo_title;
use myshop_core::TodoItem;

use crate::error::ApiError;
use crate::state::TodoHandle;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodosResponse {
    /// Newest first.
    pub todos: Vec<TodoItem>,
    /// False when the command named an unknown todo id.
    pub applied: bool,
}

fn respond(todos: &TodoHandle, applied: bool) -> TodosResponse {
    TodosResponse {
        todos: todos.with_store(|s| s.todos().to_vec()),
        applied,
    }
}

pub fn get_todos(todos: &TodoHandle) -> TodosResponse {
    debug!("get_todos command");
    respond(todos, true)
}

/// Adds a todo to the top of the list.
pub fn add_todo(todos: &TodoHandle, title: &str) -> Result<TodosResponse, ApiError> {
    let title = validate_todo_title(title)?;
    debug!(%title, "add_todo command");

    todos.with_store_mut(|s| s.add_todo(TodoItem::new(title)));
    Ok(respond(todos, true))
}

pub fn toggle_todo(todos: &TodoHandle, id: &str) -> TodosResponse {
    debug!(%id, "toggle_todo command");
    let applied = todos.with_store_mut(|s| s.toggle_todo(id));
    respond(todos, applied)
}

pub fn delete_todo(todos: &TodoHandle, id: &str) -> TodosResponse {
    debug!(%id, "delete_todo command");
    let applied = todos.with_store_mut(|s| s.delete_todo(id));
    respond(todos, applied)
}

/// Renames a todo. The new title is validated like a new one.
pub fn edit_todo(todos: &TodoHandle, id: &str, title: &str) -> Result<TodosResponse, ApiError> {
    let title = validate_todo_title(title)?;
    debug!(%id, %title, "edit_todo command");

    let applied = todos.with_store_mut(|s| s.edit_todo(id, title));
    Ok(respond(todos, applied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_add_validates_title() {
        let todos = TodoHandle::new();

        let err = add_todo(&todos, "   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let resp = add_todo(&todos, "  우유 사기 ").unwrap();
        assert_eq!(resp.todos[0].title, "우유 사기");
    }

    #[test]
    fn test_toggle_edit_delete() {
        let todos = TodoHandle::new();
        let id = add_todo(&todos, "장보기").unwrap().todos[0].id.clone();

        assert!(toggle_todo(&todos, &id).todos[0].completed);
        assert_eq!(edit_todo(&todos, &id, "마트 가기").unwrap().todos[0].title, "마트 가기");
        assert!(delete_todo(&todos, &id).todos.is_empty());
        assert!(!delete_todo(&todos, &id).applied);
    }
}
