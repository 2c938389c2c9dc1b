//! Wrap/unwrap execution
//!
//! Performs the structural edit the classifier selected. Every multi-step
//! edit extracts all required text before mutating, or dry-runs the scan
//! before inserting, so a failure can never leave the buffer unbalanced or
//! half-applied.

use arity_registry::{ArityResolver, MinArity};
use sexp_scan::{Direction, EditBuffer, Scanner, Span};
use thiserror::Error;

use crate::classify::{classify, EditAction};
use crate::config::EditConfig;
use crate::trace::{DecisionTrace, TraceEvent};
use crate::undo::{SnapshotJournal, UndoService};

/// Edit error
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// Unwrap target lacks condition + true-branch structure
    #[error("conditional form needs a condition and a true branch")]
    MalformedForm,
}

/// Edit result
pub type EditResult = Result<EditOutcome, EditError>;

/// Outcome of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Conditional form collapsed to its true branch
    Unwrapped { cursor: usize },
    /// Token wrapped, arity-aware or bare
    Wrapped { cursor: usize },
    /// Toggle invocation undid the previous edit; `cursor` is `None` when
    /// there was nothing to undo
    UndoApplied { cursor: Option<usize> },
}

/// The structural wrap/unwrap editor
///
/// Owns the scanner and configuration; arity lookup and undo storage are
/// injected. The whole operation is stateless per invocation apart from
/// the undo journal and the decision trace.
pub struct ParenEditor<R: ArityResolver, U: UndoService = SnapshotJournal> {
    scanner: Scanner,
    resolver: R,
    config: EditConfig,
    journal: U,
    trace: DecisionTrace,
}

impl<R: ArityResolver> ParenEditor<R, SnapshotJournal> {
    /// Creates an editor with the default config and a fresh journal
    pub fn new(resolver: R) -> Self {
        Self::with_undo_service(resolver, EditConfig::default(), SnapshotJournal::new())
    }

    pub fn with_config(resolver: R, config: EditConfig) -> Self {
        Self::with_undo_service(resolver, config, SnapshotJournal::new())
    }
}

impl<R: ArityResolver, U: UndoService> ParenEditor<R, U> {
    /// Creates an editor with an injected undo service
    pub fn with_undo_service(resolver: R, config: EditConfig, journal: U) -> Self {
        Self {
            scanner: Scanner::new(),
            resolver,
            config,
            journal,
            trace: DecisionTrace::new(),
        }
    }

    /// Replaces the scanner, e.g. for a non-default dialect
    pub fn with_scanner(mut self, scanner: Scanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn config(&self) -> &EditConfig {
        &self.config
    }

    pub fn trace(&self) -> &DecisionTrace {
        &self.trace
    }

    pub fn take_trace(&mut self) -> Vec<TraceEvent> {
        self.trace.take()
    }

    /// Depth of the undo journal
    pub fn undo_depth(&self) -> usize {
        self.journal.depth()
    }

    /// Perform one invocation at `cursor`
    ///
    /// `repeated` is true when the host's dispatcher saw this same command
    /// immediately before; the invocation then undoes the previous edit
    /// instead of wrapping again. Out-of-range cursors are clamped.
    pub fn invoke(&mut self, buffer: &mut EditBuffer, cursor: usize, repeated: bool) -> EditResult {
        let cursor = cursor.min(buffer.len());

        if repeated {
            let restored = self.journal.undo_last(buffer);
            self.trace.push(TraceEvent::UndoToggled {
                restored: restored.is_some(),
            });
            return Ok(EditOutcome::UndoApplied { cursor: restored });
        }

        let action = classify(&self.scanner, buffer, &self.resolver, &self.config, cursor);
        self.trace.push(TraceEvent::ActionSelected(action));

        let before = buffer.clone();
        let outcome = match action {
            EditAction::UnwrapConditional { form_start } => {
                match self.unwrap_conditional(buffer, form_start) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        self.trace.push(TraceEvent::EditRejected);
                        return Err(err);
                    }
                }
            }
            EditAction::WrapWithArity { atom, min_args } => {
                self.wrap_with_arity(buffer, atom, min_args)
            }
            EditAction::WrapBareWord => self.wrap_bare_word(buffer, cursor),
        };

        self.journal.record(&before, cursor);
        Ok(outcome)
    }

    /// Replace the whole conditional form with its true branch
    fn unwrap_conditional(
        &self,
        buffer: &mut EditBuffer,
        form_start: usize,
    ) -> Result<EditOutcome, EditError> {
        let scanner = &self.scanner;
        let form_end = scanner
            .skip_expressions(buffer, form_start, 1, Direction::Forward)
            .map_err(|_| EditError::MalformedForm)?;
        let inside = scanner
            .descend_into(buffer, form_start)
            .map_err(|_| EditError::MalformedForm)?;
        let marker_end = scanner
            .skip_expressions(buffer, inside, 1, Direction::Forward)
            .map_err(|_| EditError::MalformedForm)?;
        let condition_end = scanner
            .skip_expressions(buffer, marker_end, 1, Direction::Forward)
            .map_err(|_| EditError::MalformedForm)?;
        let branch_end = scanner
            .skip_expressions(buffer, condition_end, 1, Direction::Forward)
            .map_err(|_| EditError::MalformedForm)?;
        let branch_start = scanner
            .skip_expressions(buffer, branch_end, 1, Direction::Backward)
            .map_err(|_| EditError::MalformedForm)?;

        // All text is extracted before the first mutation
        let branch = buffer.slice(Span::new(branch_start, branch_end));
        if !buffer.replace_range(Span::new(form_start, form_end), &branch) {
            return Err(EditError::MalformedForm);
        }
        Ok(EditOutcome::Unwrapped { cursor: form_start })
    }

    /// Wrap the atom and absorb `min_args` following sibling expressions,
    /// degrading to a bare-word wrap when too few exist
    fn wrap_with_arity(
        &mut self,
        buffer: &mut EditBuffer,
        atom: Span,
        min_args: MinArity,
    ) -> EditOutcome {
        match self
            .scanner
            .skip_expressions(buffer, atom.end, min_args.get(), Direction::Forward)
        {
            Ok(wrap_end) => {
                insert_pair(buffer, atom.start, wrap_end);
                EditOutcome::Wrapped {
                    cursor: atom.end + 1,
                }
            }
            Err(_) => {
                self.trace.push(TraceEvent::ArityFallback {
                    requested: min_args.get(),
                });
                wrap_span(buffer, atom)
            }
        }
    }

    /// Wrap the symbol run at the cursor, or the zero-width point
    fn wrap_bare_word(&self, buffer: &mut EditBuffer, cursor: usize) -> EditOutcome {
        let span = self
            .scanner
            .atom_bounds_at(buffer, cursor)
            .unwrap_or_else(|| Span::point(cursor));
        wrap_span(buffer, span)
    }
}

/// Insert the closing delimiter first so the start offset stays valid
fn insert_pair(buffer: &mut EditBuffer, start: usize, end: usize) {
    let closed = buffer.insert_char(end, ')');
    let opened = buffer.insert_char(start, '(');
    debug_assert!(closed && opened);
}

fn wrap_span(buffer: &mut EditBuffer, span: Span) -> EditOutcome {
    insert_pair(buffer, span.start, span.end);
    EditOutcome::Wrapped {
        cursor: span.end + 1,
    }
}
