#![deny(missing_docs)]

//! # Circular Reference Registry
//!
//! Append-only record of pointers found to take part in a reference cycle.
//! It is reporting state for one conversion run and never influences resolution.

use indexmap::IndexSet;

/// Pointers confirmed circular, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircularRegistry {
    pointers: IndexSet<String>,
}

impl CircularRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pointer. Returns `true` the first time it is seen.
    pub fn record(&mut self, pointer: impl Into<String>) -> bool {
        self.pointers.insert(pointer.into())
    }

    /// Whether the pointer has been recorded.
    pub fn contains(&self, pointer: &str) -> bool {
        self.pointers.contains(pointer)
    }

    /// Number of distinct circular pointers.
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// True when no cycle was found.
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Recorded pointers in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pointers.iter().map(String::as_str)
    }

    /// Consumes the registry into an ordered list.
    pub fn into_vec(self) -> Vec<String> {
        self.pointers.into_iter().collect()
    }
}
