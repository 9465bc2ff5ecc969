//! Gesture state machine and history hand-off
//!
//! A gesture runs from mouse down to mouse up. On begin it keeps the field it
//! started from; the first change copies it into a working field and later
//! changes go to that copy, so the snapshot stays untouched. On end the `(before, after)` pair goes to
//! an [`EditHistory`] as a single undoable edit.

use std::collections::HashMap;
use std::rc::Rc;

use tilebrush_core::{Tile, TileField};
use tracing::debug;

/// Receiver of completed gestures (the editor's undo stack)
pub trait EditHistory {
    /// Record one atomic edit
    fn commit(&mut self, before: Rc<TileField>, after: Rc<TileField>, description: &str);
}

/// Per-cell changes between two snapshots of the same field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileChanges {
    /// Changes: (x, y) -> (old_tile, new_tile)
    pub changes: HashMap<(i32, i32), (Option<Tile>, Option<Tile>)>,
}

impl TileChanges {
    /// Create from before/after snapshots. Both fields are expected to have
    /// the same size; cells missing from `after` read as empty.
    pub fn diff(before: &TileField, after: &TileField) -> Self {
        let changes = before
            .iter()
            .filter_map(|cell| {
                let new_tile = after.get(cell.x, cell.y);
                (cell.tile != new_tile).then_some(((cell.x, cell.y), (cell.tile, new_tile)))
            })
            .collect();
        Self { changes }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Write the new tiles into `field`
    pub fn redo(&self, field: &mut TileField) {
        for (&(x, y), &(_, new_tile)) in &self.changes {
            field.set(x, y, new_tile);
        }
    }

    /// Write the old tiles back into `field`
    pub fn undo(&self, field: &mut TileField) {
        for (&(x, y), &(old_tile, _)) in &self.changes {
            field.set(x, y, old_tile);
        }
    }
}

#[derive(Debug, Clone, Default)]
enum GestureState {
    #[default]
    Idle,
    Active {
        snapshot: Rc<TileField>,
        working: Rc<TileField>,
        description: String,
    },
}

/// One editing gesture, `Idle -> Active -> Idle`
#[derive(Debug, Clone, Default)]
pub struct Gesture {
    state: GestureState,
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active { .. })
    }

    /// Start a gesture on `field`. An active gesture is abandoned first.
    pub fn begin(&mut self, field: Rc<TileField>, description: impl Into<String>) {
        if let GestureState::Active {
            description: previous,
            ..
        } = &self.state
        {
            debug!("abandoning unfinished gesture '{}'", previous);
        }
        self.state = GestureState::Active {
            working: Rc::clone(&field),
            snapshot: field,
            description: description.into(),
        };
    }

    /// The field as edited so far, if active
    pub fn working(&self) -> Option<&Rc<TileField>> {
        match &self.state {
            GestureState::Active { working, .. } => Some(working),
            GestureState::Idle => None,
        }
    }

    /// Run an edit on the working field. Until the first change the edit runs
    /// on a copy that replaces the working field only if `edit` reports a
    /// change; after that the working field is edited in place (copied first
    /// if someone else still holds it). Returns that report, or false when
    /// idle.
    pub fn apply<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut TileField) -> bool,
    {
        let GestureState::Active {
            snapshot, working, ..
        } = &mut self.state
        else {
            return false;
        };

        if !Rc::ptr_eq(snapshot, working) {
            return edit(Rc::make_mut(working));
        }

        let mut next = TileField::clone(working);
        if !edit(&mut next) {
            return false;
        }
        *working = Rc::new(next);
        true
    }

    /// Finish the gesture. The edit is committed to `history` unless nothing
    /// changed. Returns the resulting field, or `None` when idle.
    pub fn end<H>(&mut self, history: &mut H) -> Option<Rc<TileField>>
    where
        H: EditHistory + ?Sized,
    {
        let GestureState::Active {
            snapshot,
            working,
            description,
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        if Rc::ptr_eq(&snapshot, &working) {
            debug!("gesture '{}' made no changes, nothing to commit", description);
        } else {
            debug!("committing gesture '{}'", description);
            history.commit(snapshot, Rc::clone(&working), &description);
        }
        Some(working)
    }

    /// Drop the gesture and return the field it started from
    pub fn abandon(&mut self) -> Option<Rc<TileField>> {
        match std::mem::take(&mut self.state) {
            GestureState::Active {
                snapshot,
                description,
                ..
            } => {
                debug!("abandoning gesture '{}'", description);
                Some(snapshot)
            }
            GestureState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingHistory {
        edits: Vec<(Rc<TileField>, Rc<TileField>, String)>,
    }

    impl EditHistory for RecordingHistory {
        fn commit(&mut self, before: Rc<TileField>, after: Rc<TileField>, description: &str) {
            self.edits.push((before, after, description.to_string()));
        }
    }

    fn tile(index: u32) -> Option<Tile> {
        Some(Tile::new(Uuid::nil(), index))
    }

    #[test]
    fn test_edit_commits_before_and_after() {
        let field = Rc::new(TileField::new(3, 3));
        let mut gesture = Gesture::new();
        let mut history = RecordingHistory::default();

        gesture.begin(Rc::clone(&field), "Paint");
        assert!(gesture.apply(|f| f.set(1, 1, tile(4))));
        let result = gesture.end(&mut history).unwrap();

        assert!(!gesture.is_active());
        assert_eq!(history.edits.len(), 1);
        let (before, after, description) = &history.edits[0];
        assert!(Rc::ptr_eq(before, &field));
        assert!(Rc::ptr_eq(after, &result));
        assert_eq!(description, "Paint");

        // The snapshot was never written
        assert_eq!(field.tile_count(), 0);
        assert_eq!(result.get(1, 1), tile(4));
    }

    #[test]
    fn test_noop_gesture_does_not_commit() {
        let mut start = TileField::new(2, 2);
        start.set(0, 0, tile(1));
        let field = Rc::new(start);
        let mut gesture = Gesture::new();
        let mut history = RecordingHistory::default();

        gesture.begin(Rc::clone(&field), "Paint");
        // Writing the tile already there is not a change
        assert!(!gesture.apply(|f| f.set(0, 0, tile(1))));
        let result = gesture.end(&mut history).unwrap();

        assert!(history.edits.is_empty());
        assert!(Rc::ptr_eq(&result, &field));
    }

    #[test]
    fn test_later_edits_leave_snapshot_and_held_views() {
        let field = Rc::new(TileField::new(3, 1));
        let mut gesture = Gesture::new();
        let mut history = RecordingHistory::default();

        gesture.begin(Rc::clone(&field), "Paint");
        gesture.apply(|f| f.set(0, 0, tile(1)));
        let first = gesture.working().map(Rc::clone).unwrap();
        assert!(gesture.apply(|f| f.set(1, 0, tile(2))));
        assert!(!gesture.apply(|f| f.set(1, 0, tile(2))));

        // A view taken mid-gesture keeps its contents
        assert_eq!(first.get(1, 0), None);
        assert_eq!(field.tile_count(), 0);

        let result = gesture.end(&mut history).unwrap();
        assert_eq!(result.tile_count(), 2);
        assert_eq!(history.edits.len(), 1);
        assert!(Rc::ptr_eq(&history.edits[0].0, &field));
    }

    #[test]
    fn test_idle_gesture() {
        let mut gesture = Gesture::new();
        let mut history = RecordingHistory::default();

        assert!(!gesture.apply(|f| f.set(0, 0, tile(1))));
        assert!(gesture.end(&mut history).is_none());
        assert!(gesture.abandon().is_none());
    }

    #[test]
    fn test_begin_while_active_abandons() {
        let first = Rc::new(TileField::new(2, 2));
        let second = Rc::new(TileField::new(2, 2));
        let mut gesture = Gesture::new();
        let mut history = RecordingHistory::default();

        gesture.begin(Rc::clone(&first), "First");
        gesture.apply(|f| f.set(0, 0, tile(1)));
        gesture.begin(Rc::clone(&second), "Second");
        let result = gesture.end(&mut history).unwrap();

        assert!(history.edits.is_empty());
        assert!(Rc::ptr_eq(&result, &second));
    }

    #[test]
    fn test_abandon_returns_snapshot() {
        let field = Rc::new(TileField::new(2, 2));
        let mut gesture = Gesture::new();

        gesture.begin(Rc::clone(&field), "Paint");
        gesture.apply(|f| f.set(1, 0, tile(2)));
        let restored = gesture.abandon().unwrap();

        assert!(Rc::ptr_eq(&restored, &field));
        assert!(!gesture.is_active());
    }

    #[test]
    fn test_tile_changes_diff_undo_redo() {
        let before = TileField::new(3, 2);
        let mut after = before.clone();
        after.set(0, 0, tile(1));
        after.set(2, 1, tile(2));

        let changes = TileChanges::diff(&before, &after);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes.changes.get(&(2, 1)), Some(&(None, tile(2))));

        let mut field = before.clone();
        changes.redo(&mut field);
        assert_eq!(field, after);
        changes.undo(&mut field);
        assert_eq!(field, before);

        assert!(TileChanges::diff(&after, &after).is_empty());
    }
}
