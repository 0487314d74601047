use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task record exactly as the backend sends it. Timestamps are still text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTask {
    pub title: String,
    pub priority: Priority,
    #[serde(default)]
    pub due: Option<String>,
    pub sub: Vec<RawTask>,
    pub done: bool,
    #[serde(default)]
    pub done_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub title: String,
    pub priority: Priority,
    pub due: Option<DateTime<Utc>>,
    pub sub: Vec<Task>,
    pub done: bool,
    pub done_at: Option<DateTime<Utc>>,
}

impl Task {
    /// `done_at` should only be set on completed tasks. The backend does not
    /// enforce this, so conversion keeps whatever it was given.
    pub fn completion_consistent(&self) -> bool {
        self.done || self.done_at.is_none()
    }

    /// This task plus every descendant.
    pub fn total_count(&self) -> usize {
        1 + self.sub.iter().map(Task::total_count).sum::<usize>()
    }

    /// Height of the subtree rooted here; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.sub.iter().map(Task::depth).max().unwrap_or(0)
    }

    /// Pre-order traversal yielding `(depth, task)`, root at depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }
}

/// Copy of the forest without completed tasks. A done task is dropped
/// together with its whole subtree.
pub fn pending_only(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| !t.done)
        .map(|t| Task {
            title: t.title.clone(),
            priority: t.priority,
            due: t.due,
            sub: pending_only(&t.sub),
            done: t.done,
            done_at: t.done_at,
        })
        .collect()
}

pub struct Walk<'a> {
    stack: Vec<(usize, &'a Task)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Task);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, task) = self.stack.pop()?;
        // reversed so the first child is popped next
        self.stack
            .extend(task.sub.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, task))
    }
}
