//! View model for the todo client.
//!
//! # Overview
//! Holds the client-side projection of the server's collection and the
//! explicit fetch state machine (idle -> loading -> ready/failed). All
//! rendering reads from this struct; the host performs the actual HTTP
//! round-trips and feeds results back through the `fetch_*` transitions.
//!
//! # Design
//! The view never owns authoritative state: it keeps the last successfully
//! fetched collection, which may be stale until the next refetch. A failed
//! refetch keeps the previous projection visible alongside the error.

use todo_core::Todo;

/// Message rendered when the collection is empty.
pub const EMPTY_MESSAGE: &str = "No todos yet";

/// Fetch state of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No fetch has been issued yet.
    Idle,
    /// A fetch is in flight; the previous projection (if any) is still shown.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed with this message.
    Failed(String),
}

/// Client-side state: fetch phase plus the cached projection.
#[derive(Debug)]
pub struct TodoView {
    phase: Phase,
    todos: Vec<Todo>,
}

impl TodoView {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            todos: Vec::new(),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// A fetch was issued; keep showing the stale projection meanwhile.
    pub fn fetch_started(&mut self) {
        self.phase = Phase::Loading;
    }

    /// A fetch completed; replace the projection wholesale.
    pub fn fetch_succeeded(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        self.phase = Phase::Ready;
    }

    /// A fetch failed; keep the stale projection visible.
    pub fn fetch_failed(&mut self, message: String) {
        self.phase = Phase::Failed(message);
    }

    /// Count of records not yet completed.
    pub fn items_left(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    /// Count of completed records.
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Aggregate line, e.g. `"2 items left, 1 completed"`.
    pub fn counts_line(&self) -> String {
        let left = self.items_left();
        let noun = if left == 1 { "item" } else { "items" };
        format!("{left} {noun} left, {} completed", self.completed_count())
    }

    /// Render the view as display lines.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        match &self.phase {
            Phase::Idle | Phase::Loading if self.todos.is_empty() => {
                lines.push("Loading...".to_string());
                return lines;
            }
            Phase::Failed(message) => {
                lines.push(format!("error: {message}"));
            }
            _ => {}
        }

        if self.todos.is_empty() {
            lines.push(EMPTY_MESSAGE.to_string());
            return lines;
        }

        for todo in &self.todos {
            let mark = if todo.completed { "x" } else { " " };
            lines.push(format!("[{mark}] {:>3}  {}", todo.id, todo.title));
        }
        lines.push(self.counts_line());
        lines
    }
}

impl Default for TodoView {
    fn default() -> Self {
        Self::new()
    }
}
