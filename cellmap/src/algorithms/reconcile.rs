//! Keyed diff between the previously rendered frame and a new one.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Color, PointId, Vec2};
use crate::surface::RenderCommand;

#[derive(Clone, Debug, PartialEq)]
pub struct CellFrame {
    pub id: PointId,
    /// Empty for a degenerate cell; the element still exists.
    pub points: Vec<Vec2>,
    pub fill: Color,
    pub area: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerFrame {
    pub id: PointId,
    pub at: Vec2,
    pub radius: f32,
}

/// Everything the surface should show after one recomputation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub cells: Vec<CellFrame>,
    pub markers: Vec<MarkerFrame>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Patch {
    pub commands: Vec<RenderCommand>,
    pub created: Vec<PointId>,
    pub removed: Vec<PointId>,
    pub updated: usize,
}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Reconciler {
    cells: BTreeMap<PointId, CellFrame>,
    markers: BTreeMap<PointId, MarkerFrame>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, id: PointId) -> Option<&CellFrame> {
        self.cells.get(&id)
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellFrame> {
        self.cells.values()
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerFrame> {
        self.markers.values()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.markers.is_empty()
    }

    /// Removes first, then in-place updates, then creations. Cells precede
    /// markers within each group so markers stay above cells. Every
    /// surviving cell is updated even when unchanged since its fill depends
    /// on the global area scale.
    pub fn reconcile(&mut self, frame: &Frame) -> Patch {
        let next_cells: BTreeMap<PointId, CellFrame> =
            frame.cells.iter().map(|c| (c.id, c.clone())).collect();
        let next_markers: BTreeMap<PointId, MarkerFrame> =
            frame.markers.iter().map(|m| (m.id, *m)).collect();

        let mut patch = Patch::default();
        let mut removed: BTreeSet<PointId> = BTreeSet::new();
        let mut created: BTreeSet<PointId> = BTreeSet::new();

        for &id in self.cells.keys() {
            if !next_cells.contains_key(&id) {
                patch.commands.push(RenderCommand::RemoveCell { id });
                removed.insert(id);
            }
        }
        for &id in self.markers.keys() {
            if !next_markers.contains_key(&id) {
                patch.commands.push(RenderCommand::RemoveMarker { id });
                removed.insert(id);
            }
        }
        for (id, c) in &next_cells {
            if self.cells.contains_key(id) {
                patch.commands.push(RenderCommand::UpdateCell {
                    id: *id,
                    points: c.points.clone(),
                    fill: c.fill,
                    area: c.area,
                });
                patch.updated += 1;
            }
        }
        for (id, m) in &next_markers {
            if self.markers.contains_key(id) {
                patch.commands.push(RenderCommand::UpdateMarker { id: *id, at: m.at });
                patch.updated += 1;
            }
        }
        for (id, c) in &next_cells {
            if !self.cells.contains_key(id) {
                patch.commands.push(RenderCommand::CreateCell {
                    id: *id,
                    points: c.points.clone(),
                    fill: c.fill,
                    area: c.area,
                });
                created.insert(*id);
            }
        }
        for (id, m) in &next_markers {
            if !self.markers.contains_key(id) {
                patch.commands.push(RenderCommand::CreateMarker { id: *id, at: m.at, radius: m.radius });
                created.insert(*id);
            }
        }

        self.cells = next_cells;
        self.markers = next_markers;
        patch.created = created.into_iter().collect();
        patch.removed = removed.into_iter().collect();
        log::trace!(
            "reconciled: {} created, {} updated, {} removed",
            patch.created.len(),
            patch.updated,
            patch.removed.len()
        );
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: Color = Color { r: 1, g: 2, b: 3 };

    fn frame(ids: &[PointId]) -> Frame {
        Frame {
            cells: ids
                .iter()
                .map(|&id| CellFrame { id, points: vec![], fill: FILL, area: 0.0 })
                .collect(),
            markers: ids
                .iter()
                .map(|&id| MarkerFrame { id, at: Vec2::new(id as f32, 0.0), radius: 5.0 })
                .collect(),
        }
    }

    #[test]
    fn first_frame_creates_everything() {
        let mut r = Reconciler::new();
        let p = r.reconcile(&frame(&[0, 1]));
        assert_eq!(p.created, vec![0, 1]);
        assert_eq!(p.updated, 0);
        assert_eq!(p.commands.len(), 4);
        assert!(matches!(p.commands[0], RenderCommand::CreateCell { id: 0, .. }));
        assert!(matches!(p.commands[3], RenderCommand::CreateMarker { id: 1, .. }));
    }

    #[test]
    fn survivors_update_in_place() {
        let mut r = Reconciler::new();
        r.reconcile(&frame(&[0, 1, 2]));
        let p = r.reconcile(&frame(&[0, 2, 3]));
        assert_eq!(p.removed, vec![1]);
        assert_eq!(p.created, vec![3]);
        assert_eq!(p.updated, 4);
        assert_eq!(
            &p.commands[..2],
            &[RenderCommand::RemoveCell { id: 1 }, RenderCommand::RemoveMarker { id: 1 }]
        );
        assert!(!p
            .commands
            .iter()
            .any(|c| matches!(c, RenderCommand::CreateCell { id, .. } if *id == 0 || *id == 2)));
    }

    #[test]
    fn empty_frame_removes_everything() {
        let mut r = Reconciler::new();
        r.reconcile(&frame(&[4, 5]));
        let p = r.reconcile(&Frame::default());
        assert_eq!(p.removed, vec![4, 5]);
        assert!(r.is_empty());
    }
}
