//! # Structural Wrap/Unwrap Editor
//!
//! Arity-aware parenthesis wrapping and conditional unwrapping for
//! S-expression buffers.
//!
//! ## Philosophy
//!
//! - **Never corrupt the buffer**: Every edit either completes or degrades
//!   to a safe zero-argument wrap; unwrap extracts all text before the
//!   first mutation. Balanced input stays balanced.
//! - **Explicit collaborators**: Arity lookup and undo storage are injected
//!   traits; the "previous command was this command" toggle is a parameter
//!   supplied by the host dispatcher, not hidden global state.
//! - **Visible control flow**: Fallbacks are `Result` values handled at the
//!   call site, never unwinding.
//! - **Structured decisions**: Every invocation appends typed trace events
//!   the host can inspect.
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A reader or pretty-printer
//! - A key-binding or UI layer
//! - Special-cased wrapping for irregular forms (those names belong in the
//!   arity registry's exclusion set and take the bare-word path)
//!
//! ## Example
//!
//! ```
//! use arity_registry::{ArityRegistry, MinArity};
//! use paren_edit::{EditOutcome, ParenEditor};
//! use sexp_scan::EditBuffer;
//!
//! let mut registry = ArityRegistry::new();
//! registry.register("concat", MinArity(2));
//!
//! let mut editor = ParenEditor::new(registry);
//! let mut buffer = EditBuffer::from_string("concat a b c");
//!
//! let outcome = editor.invoke(&mut buffer, 6, false).unwrap();
//! assert_eq!(buffer.as_string(), "(concat a b) c");
//! assert_eq!(outcome, EditOutcome::Wrapped { cursor: 7 });
//! ```

pub mod classify;
pub mod config;
pub mod executor;
pub mod trace;
pub mod undo;

pub use classify::{classify, EditAction};
pub use config::EditConfig;
pub use executor::{EditError, EditOutcome, EditResult, ParenEditor};
pub use trace::{DecisionTrace, TraceEvent};
pub use undo::{SnapshotJournal, UndoService};
