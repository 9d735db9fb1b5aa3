use tracing::debug;

use crate::error::Result;
use crate::geometry::Segment;
use crate::project::{LineId, LineRole, Project};

/// An undoable edit of the line set.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Draws a line. `restores` names the line this one brings back after a
    /// deletion, so later actions on the old id can follow it.
    AddLine {
        name: Option<String>,
        role: LineRole,
        segment: Segment,
        restores: Option<LineId>,
    },
    DeleteLine {
        id: LineId,
    },
    UpdateLine {
        id: LineId,
        role: LineRole,
        segment: Segment,
    },
}

impl Action {
    /// Applies the action to `project` and returns the action that undoes it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the target line is gone, or
    /// `GeometryError::ZeroLength` for a degenerate segment.
    pub fn apply(self, project: &mut Project) -> Result<Action> {
        match self {
            Self::AddLine {
                name, role, segment, ..
            } => {
                let id = project.insert_line(name, role, segment)?;
                Ok(Self::DeleteLine { id })
            }
            Self::DeleteLine { id } => {
                let line = project.remove_line(id)?;
                Ok(Self::AddLine {
                    name: Some(line.name),
                    role: line.role,
                    segment: line.projection,
                    restores: Some(id),
                })
            }
            Self::UpdateLine { id, role, segment } => {
                let previous = project.update_line(id, role, segment.start, segment.end)?;
                Ok(Self::UpdateLine {
                    id,
                    role: previous.role,
                    segment: previous.projection,
                })
            }
        }
    }

    /// The line this action operates on, if it already exists.
    #[must_use]
    pub fn target(&self) -> Option<LineId> {
        match self {
            Self::AddLine { .. } => None,
            Self::DeleteLine { id } | Self::UpdateLine { id, .. } => Some(*id),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::AddLine { .. } => "add",
            Self::DeleteLine { .. } => "delete",
            Self::UpdateLine { .. } => "update",
        }
    }

    fn remap(&mut self, from: LineId, to: LineId) {
        match self {
            Self::DeleteLine { id } | Self::UpdateLine { id, .. } if *id == from => *id = to,
            Self::AddLine {
                restores: Some(id), ..
            } if *id == from => *id = to,
            _ => {}
        }
    }
}

/// Undo and redo stacks over a caller-owned [`Project`].
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<Action>,
    redo: Vec<Action>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a new action and records its inverse. Clears the redo stack.
    ///
    /// Returns the id of the line the action left in the project, if any.
    ///
    /// # Errors
    ///
    /// Propagates the error of [`Action::apply`]; nothing is recorded.
    pub fn execute(&mut self, project: &mut Project, action: Action) -> Result<Option<LineId>> {
        let inverse = self.run(project, action)?;
        let target = inverse.target();
        self.undo.push(inverse);
        self.redo.clear();
        Ok(target)
    }

    /// Reverts the latest action. Returns `false` if there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Propagates the error of [`Action::apply`]; the stacks are unchanged.
    pub fn undo(&mut self, project: &mut Project) -> Result<bool> {
        let Some(action) = self.undo.pop() else {
            return Ok(false);
        };
        match self.run(project, action.clone()) {
            Ok(inverse) => {
                self.redo.push(inverse);
                Ok(true)
            }
            Err(err) => {
                self.undo.push(action);
                Err(err)
            }
        }
    }

    /// Re-applies the latest undone action. Returns `false` if there is
    /// nothing to redo.
    ///
    /// # Errors
    ///
    /// Propagates the error of [`Action::apply`]; the stacks are unchanged.
    pub fn redo(&mut self, project: &mut Project) -> Result<bool> {
        let Some(action) = self.redo.pop() else {
            return Ok(false);
        };
        match self.run(project, action.clone()) {
            Ok(inverse) => {
                self.undo.push(inverse);
                Ok(true)
            }
            Err(err) => {
                self.redo.push(action);
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    fn run(&mut self, project: &mut Project, action: Action) -> Result<Action> {
        let kind = action.kind();
        let restores = match &action {
            Action::AddLine { restores, .. } => *restores,
            _ => None,
        };
        let inverse = action.apply(project)?;
        debug!(kind, "applied action");

        // A restored line gets a fresh id; point pending actions at it.
        if let (Some(old), Some(new)) = (restores, inverse.target()) {
            for pending in self.undo.iter_mut().chain(self.redo.iter_mut()) {
                pending.remap(old, new);
            }
        }
        Ok(inverse)
    }
}
