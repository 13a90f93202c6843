//! # Todo List
//!
//! A small todo container that lives next to the shop but shares nothing
//! with it. Same pattern as the shop: closed command set, pure reducer,
//! a store that owns the state.
//!
//! ```text
//! Add(item)        → item goes to the FRONT of the list
//! Toggle(id)       → completed = !completed
//! Delete(id)       → item removed
//! Edit{id, title}  → title replaced
//! unknown id       → no change
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Todo Item
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// UUID v4 string.
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// A new, open item with a fresh id.
    ///
    /// The title is taken as given; callers validate it first
    /// (see [`crate::validation::validate_todo_title`]).
    pub fn new(title: impl Into<String>) -> Self {
        TodoItem {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Commands & Reducer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum TodoCommand {
    Add(TodoItem),
    Toggle(String),
    Delete(String),
    Edit { id: String, title: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TodoState {
    pub todos: Vec<TodoItem>,
}

impl TodoState {
    pub fn contains(&self, id: &str) -> bool {
        self.todos.iter().any(|t| t.id == id)
    }
}

/// Pure transition for the todo list.
pub fn reduce_todos(state: &TodoState, command: &TodoCommand) -> TodoState {
    let todos = match command {
        TodoCommand::Add(item) => {
            let mut todos = Vec::with_capacity(state.todos.len() + 1);
            todos.push(item.clone());
            todos.extend(state.todos.iter().cloned());
            todos
        }
        TodoCommand::Toggle(id) => state
            .todos
            .iter()
            .map(|t| {
                if &t.id == id {
                    TodoItem {
                        completed: !t.completed,
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect(),
        TodoCommand::Delete(id) => state
            .todos
            .iter()
            .filter(|t| &t.id != id)
            .cloned()
            .collect(),
        TodoCommand::Edit { id, title } => state
            .todos
            .iter()
            .map(|t| {
                if &t.id == id {
                    TodoItem {
                        title: title.clone(),
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect(),
    };

    TodoState { todos }
}

// =============================================================================
// Store
// =============================================================================

/// Owner of a [`TodoState`].
///
/// `toggle_todo`, `delete_todo` and `edit_todo` return `false` when the id
/// is unknown (the list is left as is).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoStore {
    state: TodoState,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.state.todos
    }

    pub fn dispatch(&mut self, command: TodoCommand) -> bool {
        let known = match &command {
            TodoCommand::Add(_) => true,
            TodoCommand::Toggle(id) | TodoCommand::Delete(id) | TodoCommand::Edit { id, .. } => {
                self.state.contains(id)
            }
        };

        if known {
            self.state = reduce_todos(&self.state, &command);
            debug!(?command, count = self.state.todos.len(), "todo command applied");
        } else {
            debug!(?command, "todo command ignored");
        }
        known
    }

    pub fn add_todo(&mut self, item: TodoItem) {
        self.dispatch(TodoCommand::Add(item));
    }

    pub fn toggle_todo(&mut self, id: &str) -> bool {
        self.dispatch(TodoCommand::Toggle(id.to_string()))
    }

    pub fn delete_todo(&mut self, id: &str) -> bool {
        self.dispatch(TodoCommand::Delete(id.to_string()))
    }

    pub fn edit_todo(&mut self, id: &str, title: impl Into<String>) -> bool {
        self.dispatch(TodoCommand::Edit {
            id: id.to_string(),
            title: title.into(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
