//! Per-level placement state for the synchronizers.

/// Tracks the nesting depth of the elements being synchronized and how many
/// element children at that depth have been processed so far.
///
/// A counter belongs to one parent element during one pass. Entering a child
/// element takes a fresh counter from [`IndentationCounter::nested`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndentationCounter {
    depth: usize,
    current_index: usize,
}

impl IndentationCounter {
    pub fn new(depth: usize) -> Self {
        IndentationCounter {
            depth,
            current_index: 0,
        }
    }

    /// Indentation level of the elements placed with this counter.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of element children already processed at this depth.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn increase_count(&mut self) {
        self.current_index += 1;
    }

    /// A fresh counter for the children of an element placed at this depth.
    pub fn nested(&self) -> Self {
        Self::new(self.depth + 1)
    }
}
