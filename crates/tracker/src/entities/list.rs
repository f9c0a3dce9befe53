//! Ordered, index-addressed task collection.

use super::Task;
use crate::errors::{TrackerError, TrackerResult};

/// Tasks in insertion order. Indices are 0-based; the 1-based numbers users
/// type are converted before they reach this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Check a possibly negative 0-based index and return it as `usize`.
    ///
    /// Never mutates the list.
    pub fn validate_index(&self, index: i64) -> TrackerResult<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.tasks.len())
            .ok_or(TrackerError::IndexOutOfRange {
                number: index.saturating_add(1),
                size: self.tasks.len(),
            })
    }

    pub fn get(&self, index: usize) -> TrackerResult<&Task> {
        let size = self.tasks.len();
        self.tasks.get(index).ok_or_else(|| out_of_range(index, size))
    }

    pub fn get_mut(&mut self, index: usize) -> TrackerResult<&mut Task> {
        let size = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, size))
    }

    /// Append a task
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove and return the task at `index`, shifting later tasks down
    pub fn remove(&mut self, index: usize) -> TrackerResult<Task> {
        if index >= self.tasks.len() {
            return Err(out_of_range(index, self.tasks.len()));
        }
        Ok(self.tasks.remove(index))
    }

    /// Case-insensitive substring search over descriptions, in list order.
    /// An empty keyword matches every task.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        let keyword = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.description().to_lowercase().contains(&keyword))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }
}

fn out_of_range(index: usize, size: usize) -> TrackerError {
    TrackerError::IndexOutOfRange {
        number: i64::try_from(index).unwrap_or(i64::MAX).saturating_add(1),
        size,
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
