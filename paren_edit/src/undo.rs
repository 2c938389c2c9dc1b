//! Snapshot-based undo journal
//!
//! Buffers edited by this command are interactive-editing sized, so the
//! journal stores whole-buffer snapshots: cheap, deterministic, and
//! trivially correct to restore.

use sexp_scan::EditBuffer;

/// Undo storage consumed by the editor
///
/// `undo_last` is an idempotent no-op when nothing is recorded.
pub trait UndoService {
    /// Record a pre-edit state
    fn record(&mut self, buffer: &EditBuffer, cursor: usize);

    /// Restore the most recent recorded state; returns the restored cursor,
    /// or `None` when the journal is empty (buffer untouched)
    fn undo_last(&mut self, buffer: &mut EditBuffer) -> Option<usize>;

    /// Number of recorded states
    fn depth(&self) -> usize;
}

/// One recorded pre-edit state
#[derive(Debug, Clone)]
struct BufferSnapshot {
    buffer: EditBuffer,
    cursor: usize,
}

/// Whole-buffer snapshot stack
#[derive(Debug, Default)]
pub struct SnapshotJournal {
    stack: Vec<BufferSnapshot>,
}

impl SnapshotJournal {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

impl UndoService for SnapshotJournal {
    fn record(&mut self, buffer: &EditBuffer, cursor: usize) {
        self.stack.push(BufferSnapshot {
            buffer: buffer.clone(),
            cursor,
        });
    }

    fn undo_last(&mut self, buffer: &mut EditBuffer) -> Option<usize> {
        let snapshot = self.stack.pop()?;
        *buffer = snapshot.buffer;
        Some(snapshot.cursor)
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }
}
