//! Linear undo/redo history.
//!
//! The history is a list of full [`Scene`] snapshots plus a cursor. Entry 0
//! is the state the session started from. Recording while the cursor is
//! behind the tail discards the redo tail first.
//!
//! Pointer gestures use **snapshot batching**: the scene is captured when
//! the gesture starts and compared when it ends, so a whole drag becomes a
//! single entry (and a click that moved nothing adds none).

use pb_core::model::Scene;

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Scene>,
    index: usize,
    /// Maximum number of entries kept; oldest are dropped first.
    limit: Option<usize>,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    /// Scene captured at the start of the outermost batch.
    batch_snapshot: Option<Scene>,
}

impl History {
    pub fn new(initial: Scene, limit: Option<usize>) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            limit: limit.map(|l| l.max(1)),
            batch_depth: 0,
            batch_snapshot: None,
        }
    }

    /// The entry the cursor points at.
    pub fn current(&self) -> &Scene {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Scene] {
        &self.entries
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Append a snapshot after the cursor, discarding any redo tail.
    pub fn record(&mut self, scene: Scene) {
        self.entries.truncate(self.index + 1);
        self.entries.push(scene);
        if let Some(limit) = self.limit {
            let overflow = self.entries.len().saturating_sub(limit);
            if overflow > 0 {
                self.entries.drain(..overflow);
            }
        }
        self.index = self.entries.len() - 1;
        log::debug!("history: recorded entry {} of {}", self.index, self.entries.len());
    }

    /// Step back. Returns the snapshot to restore, or `None` at the start.
    pub fn undo(&mut self) -> Option<&Scene> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        log::debug!("history: undo to {}", self.index);
        Some(&self.entries[self.index])
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the tail.
    pub fn redo(&mut self) -> Option<&Scene> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        log::debug!("history: redo to {}", self.index);
        Some(&self.entries[self.index])
    }

    /// Start a gesture. Nested calls are folded into the outermost one.
    pub fn begin_batch(&mut self, scene: &Scene) {
        if self.batch_depth == 0 {
            self.batch_snapshot = Some(scene.clone());
        }
        self.batch_depth += 1;
    }

    /// End a gesture. When the outermost batch closes and `scene` differs
    /// from the snapshot taken at its start, one entry is recorded.
    /// Returns whether an entry was recorded.
    pub fn end_batch(&mut self, scene: &Scene) -> bool {
        if self.batch_depth == 0 {
            return false;
        }
        self.batch_depth -= 1;
        if self.batch_depth > 0 {
            return false;
        }
        let before = self.batch_snapshot.take();
        if before.as_ref() == Some(scene) {
            return false;
        }
        self.record(scene.clone());
        true
    }

    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    /// Rewrite every entry (and an open batch snapshot) through `f`.
    ///
    /// Used by view transforms such as a resize or an orientation flip,
    /// which change coordinates without being user edits.
    pub fn map_entries(&mut self, mut f: impl FnMut(&Scene) -> Scene) {
        for entry in &mut self.entries {
            *entry = f(entry);
        }
        if let Some(snapshot) = &mut self.batch_snapshot {
            *snapshot = f(snapshot);
        }
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: Scene) {
        self.entries = vec![initial];
        self.index = 0;
        self.batch_depth = 0;
        self.batch_snapshot = None;
    }
}
