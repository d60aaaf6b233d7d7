//! Linear undo history.

use tracing::debug;

use crate::canvas::SceneCanvas;
use crate::commands::SceneCommand;

/// Executed commands plus a position. Everything below `index` has been
/// applied; everything from `index` on has been undone and can be redone.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    commands: Vec<SceneCommand>,
    index: usize,
    limit: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `limit` commands (0 = unlimited).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Executes `cmd` and records it, dropping any undone suffix.
    pub fn push(&mut self, mut cmd: SceneCommand, canvas: &mut SceneCanvas) {
        cmd.redo(canvas);
        self.commands.truncate(self.index);
        self.commands.push(cmd);

        if self.limit > 0 && self.commands.len() > self.limit {
            let excess = self.commands.len() - self.limit;
            self.commands.drain(..excess);
        }
        self.index = self.commands.len();
        debug!("undo stack: {} commands", self.commands.len());
    }

    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, canvas: &mut SceneCanvas) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        self.commands[self.index].undo(canvas);
        true
    }

    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, canvas: &mut SceneCanvas) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.commands[self.index].redo(canvas);
        self.index += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.commands.len()
    }

    /// Name of the command `undo` would revert.
    pub fn undo_text(&self) -> Option<&str> {
        self.index
            .checked_sub(1)
            .and_then(|i| self.commands.get(i))
            .map(SceneCommand::name)
    }

    /// Name of the command `redo` would apply.
    pub fn redo_text(&self) -> Option<&str> {
        self.commands.get(self.index).map(SceneCommand::name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.index = 0;
    }
}
