//! Pointer affordances, bound per identity.
//!
//! Bindings are plain data kept apart from the rendered elements. They are
//! installed when an element is created and dropped when it is removed, so
//! in-place updates never touch them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::algorithms::reconcile::Patch;
use crate::model::{PointId, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    Background,
    Cell(PointId),
    Marker(PointId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Click,
    Enter,
    Move,
    Leave,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub at: Vec2,
    pub target: Target,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32, target: Target) -> Self {
        PointerEvent { kind, at: Vec2::new(x, y), target }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    AddPoint,
    RemovePoint(PointId),
    ShowArea(PointId),
    TrackPointer,
    HideOverlay,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    pub click: Option<Action>,
    pub enter: Option<Action>,
    pub moved: Option<Action>,
    pub leave: Option<Action>,
}

impl Bindings {
    fn for_kind(&self, kind: PointerKind) -> Option<Action> {
        match kind {
            PointerKind::Click => self.click,
            PointerKind::Enter => self.enter,
            PointerKind::Move => self.moved,
            PointerKind::Leave => self.leave,
        }
    }

    fn cell(id: PointId) -> Bindings {
        Bindings {
            click: None,
            enter: Some(Action::ShowArea(id)),
            moved: Some(Action::TrackPointer),
            leave: Some(Action::HideOverlay),
        }
    }

    fn marker(id: PointId) -> Bindings {
        Bindings { click: Some(Action::RemovePoint(id)), ..Default::default() }
    }
}

/// Resolved handler for one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub action: Option<Action>,
    /// The event stopped at its target and must not reach the background.
    pub consumed: bool,
}

#[derive(Clone, Debug)]
pub struct DispatchTable {
    cells: HashMap<PointId, Bindings>,
    markers: HashMap<PointId, Bindings>,
    background: Bindings,
}

impl Default for DispatchTable {
    fn default() -> Self {
        DispatchTable {
            cells: HashMap::new(),
            markers: HashMap::new(),
            background: Bindings { click: Some(Action::AddPoint), ..Default::default() },
        }
    }
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, id: PointId) {
        self.cells.insert(id, Bindings::cell(id));
        self.markers.insert(id, Bindings::marker(id));
    }

    pub fn uninstall(&mut self, id: PointId) {
        self.cells.remove(&id);
        self.markers.remove(&id);
    }

    pub fn sync(&mut self, patch: &Patch) {
        for &id in &patch.removed {
            self.uninstall(id);
        }
        for &id in &patch.created {
            self.install(id);
        }
    }

    pub fn is_bound(&self, id: PointId) -> bool {
        self.markers.contains_key(&id)
    }

    /// Marker clicks stop at the marker even when its binding is gone, so
    /// a stale marker can never turn into an "add point".
    pub fn resolve(&self, ev: &PointerEvent) -> Resolved {
        match ev.target {
            Target::Marker(id) => match self.markers.get(&id).and_then(|b| b.for_kind(ev.kind)) {
                Some(a) => Resolved { action: Some(a), consumed: true },
                None => Resolved { action: None, consumed: ev.kind == PointerKind::Click },
            },
            Target::Cell(id) => match self.cells.get(&id).and_then(|b| b.for_kind(ev.kind)) {
                Some(a) => Resolved { action: Some(a), consumed: true },
                None => self.bubble(ev.kind),
            },
            Target::Background => self.bubble(ev.kind),
        }
    }

    fn bubble(&self, kind: PointerKind) -> Resolved {
        Resolved { action: self.background.for_kind(kind), consumed: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(target: Target) -> PointerEvent {
        PointerEvent::new(PointerKind::Click, 1.0, 2.0, target)
    }

    #[test]
    fn marker_click_removes_and_consumes() {
        let mut t = DispatchTable::new();
        t.install(7);
        let r = t.resolve(&click(Target::Marker(7)));
        assert_eq!(r.action, Some(Action::RemovePoint(7)));
        assert!(r.consumed);
    }

    #[test]
    fn stale_marker_click_never_adds() {
        let t = DispatchTable::new();
        let r = t.resolve(&click(Target::Marker(3)));
        assert_eq!(r.action, None);
        assert!(r.consumed);
    }

    #[test]
    fn cell_and_background_clicks_add() {
        let mut t = DispatchTable::new();
        t.install(1);
        assert_eq!(t.resolve(&click(Target::Cell(1))).action, Some(Action::AddPoint));
        assert_eq!(t.resolve(&click(Target::Background)).action, Some(Action::AddPoint));
    }

    #[test]
    fn hover_bindings_follow_cell() {
        let mut t = DispatchTable::new();
        t.install(2);
        let enter = PointerEvent::new(PointerKind::Enter, 0.0, 0.0, Target::Cell(2));
        assert_eq!(t.resolve(&enter).action, Some(Action::ShowArea(2)));
        let leave = PointerEvent::new(PointerKind::Leave, 0.0, 0.0, Target::Cell(2));
        assert_eq!(t.resolve(&leave).action, Some(Action::HideOverlay));
        t.uninstall(2);
        assert_eq!(t.resolve(&enter).action, None);
    }

    #[test]
    fn sync_applies_patch() {
        let mut t = DispatchTable::new();
        t.install(1);
        let patch = Patch { created: vec![2], removed: vec![1], ..Default::default() };
        t.sync(&patch);
        assert!(!t.is_bound(1));
        assert!(t.is_bound(2));
    }
}
