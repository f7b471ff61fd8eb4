// src/operation.rs

//! Named logical operations for log correlation.
//!
//! [`LogicalOperation::start`] pushes a description onto a per-thread stack
//! and enters a `logical_operation` span, so every event logged while the
//! guard is alive carries the description. Dropping the guard logs the stop
//! event and pops the stack.
//!
//! ```rust
//! use procexec::operation::{operation_stack, LogicalOperation};
//!
//! {
//!     let _op = LogicalOperation::start("building packages");
//!     assert_eq!(operation_stack().last().map(String::as_str), Some("building packages"));
//! }
//! assert!(operation_stack().is_empty());
//! ```

use std::cell::RefCell;

use tracing::span::EnteredSpan;
use tracing::{info, info_span};

thread_local! {
    static STACK: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Guard for one logical operation. Not `Send`: it must be dropped on the
/// thread that started it.
#[must_use = "the operation ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LogicalOperation {
    description: String,
    depth: usize,
    _span: EnteredSpan,
}

impl LogicalOperation {
    /// Start an operation.
    ///
    /// `description` is either a present-continuous verb phrase
    /// ("processing orders") or the id of the item being processed.
    pub fn start(description: impl Into<String>) -> Self {
        let description = description.into();
        let span = info_span!("logical_operation", operation = %description).entered();

        let depth = STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(description.clone());
            stack.len()
        });

        info!(operation = %description, depth, "start");

        Self {
            description,
            depth,
            _span: span,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Drop for LogicalOperation {
    fn drop(&mut self) {
        info!(operation = %self.description, depth = self.depth, "stop");
        STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            // Guards dropped out of order unwind everything above them.
            stack.truncate(self.depth.saturating_sub(1));
        });
    }
}

/// Snapshot of this thread's operation stack, outermost first.
pub fn operation_stack() -> Vec<String> {
    STACK.with(|stack| stack.borrow().clone())
}
