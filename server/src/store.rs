//! In-memory todo store.
//!
//! # Design
//! `TodoStore` is an owned value injected into handlers rather than a
//! module-level global, so tests can build isolated instances and a real
//! persistence backend could replace it later. Records live in a map keyed
//! by id for O(1) lookup; a separate `order` vec preserves insertion order
//! for listing. Ids come from a monotonic counter starting at 1 and are
//! never reused, even after a delete.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single todo record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    /// Set once at creation, never mutated afterwards.
    pub created_at: DateTime<Utc>,
}

/// The in-memory collection plus id counter.
#[derive(Debug, Default)]
pub struct TodoStore {
    items: HashMap<u64, Todo>,
    order: Vec<u64>,
    next_id: u64,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in insertion order.
    pub fn list(&self) -> Vec<Todo> {
        self.order
            .iter()
            .map(|id| self.items[id].clone())
            .collect()
    }

    /// Append a new record with a fresh id.
    ///
    /// The title is trimmed before storage; a missing or blank title is
    /// rejected and leaves the collection untouched.
    pub fn create(&mut self, title: Option<&str>) -> Result<Todo, Error> {
        let title = title.map(str::trim).filter(|t| !t.is_empty());
        let title = title.ok_or(Error::TitleRequired)?;

        self.next_id += 1;
        let todo = Todo {
            id: self.next_id,
            title: title.to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        self.items.insert(todo.id, todo.clone());
        self.order.push(todo.id);
        Ok(todo)
    }

    /// Replace the title of an existing record.
    ///
    /// `None` leaves the title unchanged. A provided title is trimmed and
    /// validated the same way as on create.
    pub fn update(&mut self, id: u64, title: Option<&str>) -> Result<Todo, Error> {
        if let Some(raw) = title {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(Error::TitleRequired);
            }
            let todo = self.items.get_mut(&id).ok_or(Error::TodoNotFound)?;
            todo.title = trimmed.to_string();
            Ok(todo.clone())
        } else {
            self.items.get(&id).cloned().ok_or(Error::TodoNotFound)
        }
    }

    /// Flip the `completed` flag of an existing record.
    pub fn toggle(&mut self, id: u64) -> Result<Todo, Error> {
        let todo = self.items.get_mut(&id).ok_or(Error::TodoNotFound)?;
        todo.completed = !todo.completed;
        Ok(todo.clone())
    }

    /// Remove a record. The id is never handed out again.
    pub fn delete(&mut self, id: u64) -> Result<(), Error> {
        self.items.remove(&id).ok_or(Error::TodoNotFound)?;
        self.order.retain(|&other| other != id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
