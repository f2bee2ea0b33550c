pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod surface;
pub mod svg;
pub mod geometry {
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod interaction;
    pub mod partition;
    pub mod picking;
    pub mod reconcile;
    pub mod shading;
}
mod json;

use std::collections::BTreeMap;

use algorithms::interaction::{Action, DispatchTable, PointerEvent, PointerKind, Resolved, Target};
use algorithms::reconcile::{CellFrame, Frame, MarkerFrame, Patch, Reconciler};
use algorithms::shading::{AreaScale, Shade};
use algorithms::{partition, picking, shading};
use config::{DiagramConfig, EXPORT_FILENAME, EXPORT_MIME};
use error::DiagramError;
use geometry::limits;
use model::{PointId, Rect, Vec2};
use store::PointStore;
use surface::{CommandQueue, ExportSink, OverlayCommand, OverlayHost, OverlayQueue, RenderCommand, RenderSurface};
use svg::SvgScene;

/// Whether the rendered state matches the point store. Mutations pass
/// through `Stale` and leave in `Reconciled` before returning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    Stale,
    Reconciled,
}

/// Result of routing one pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub action: Option<Action>,
    pub consumed: bool,
    pub added: Option<PointId>,
    pub removed: Option<PointId>,
}

impl Dispatch {
    fn from_resolved(r: Resolved) -> Self {
        Dispatch { action: r.action, consumed: r.consumed, added: None, removed: None }
    }
}

/// The command surface: owns the points, the last rendered frame, the
/// retained scene and the pointer bindings.
pub struct Diagram {
    pub(crate) config: DiagramConfig,
    pub(crate) store: PointStore,
    pub(crate) reconciler: Reconciler,
    pub(crate) bindings: DispatchTable,
    pub(crate) scene: SvgScene,
    pub(crate) scale: AreaScale,
    pub(crate) shades: BTreeMap<PointId, Shade>,
    pub(crate) pending: CommandQueue, // coalesced until the host drains it
    pub(crate) overlay: OverlayQueue,
    pub(crate) hovered: Option<PointId>,
    pub(crate) sync: SyncState,
    pub(crate) geom_ver: u64,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram {
    pub fn new() -> Self {
        Self::build(DiagramConfig::default())
    }

    pub fn with_config(config: DiagramConfig) -> Result<Self, DiagramError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    pub fn with_bounds(width: f32, height: f32) -> Result<Self, DiagramError> {
        Self::with_config(DiagramConfig::with_bounds(width, height))
    }

    fn build(config: DiagramConfig) -> Self {
        let scene = SvgScene::new(config.width, config.height);
        Diagram {
            config,
            store: PointStore::new(),
            reconciler: Reconciler::new(),
            bindings: DispatchTable::new(),
            scene,
            scale: AreaScale::fit(&[]),
            shades: BTreeMap::new(),
            pending: CommandQueue::new(),
            overlay: OverlayQueue::default(),
            hovered: None,
            sync: SyncState::Reconciled,
            geom_ver: 1,
        }
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }
    pub fn bounds(&self) -> Rect {
        self.config.bounds()
    }
    /// Monotonic version; increments on every point mutation.
    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }
    pub fn sync_state(&self) -> SyncState {
        self.sync
    }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
        self.sync = SyncState::Stale;
    }

    // Points
    /// `None` only once every point id has been handed out.
    pub fn add_point(&mut self, x: f32, y: f32) -> Option<PointId> {
        let Some(id) = self.store.add(Vec2::new(x, y)) else {
            log::warn!("point ids exhausted; ignoring add at ({}, {})", x, y);
            return None;
        };
        self.bump();
        self.recompute();
        Some(id)
    }
    pub fn try_add_point(&mut self, x: f32, y: f32) -> Result<PointId, DiagramError> {
        for (param, v) in [("x", x), ("y", y)] {
            if !v.is_finite() {
                return Err(DiagramError::NonFinite { param });
            }
            if !limits::in_coord_bounds(v) {
                return Err(DiagramError::OutOfRange {
                    param,
                    min: limits::COORD_MIN,
                    max: limits::COORD_MAX,
                    got: v,
                });
            }
        }
        if self.store.len() >= limits::MAX_POINTS {
            return Err(DiagramError::TooManyPoints(limits::MAX_POINTS));
        }
        self.add_point(x, y).ok_or(DiagramError::TooManyPoints(limits::MAX_POINTS))
    }
    /// Removes a point by identity. Stale ids are a no-op and skip the
    /// recomputation.
    pub fn remove_point(&mut self, id: PointId) -> bool {
        if self.store.remove(id).is_none() {
            if !self.store.was_issued(id) {
                log::warn!("remove of never-issued point id {}", id);
            }
            return false;
        }
        self.bump();
        self.recompute();
        true
    }
    pub fn try_remove_point(&mut self, id: PointId) -> Result<Vec2, DiagramError> {
        let p = self.store.get(id).ok_or(DiagramError::UnknownPoint(id))?;
        self.remove_point(id);
        Ok(p)
    }
    pub fn get_point(&self, id: PointId) -> Option<Vec2> {
        self.store.get(id)
    }
    pub fn points(&self) -> &[(PointId, Vec2)] {
        self.store.points()
    }
    pub fn point_count(&self) -> usize {
        self.store.len()
    }
    pub fn get_point_arrays(&self) -> (Vec<u32>, Vec<f32>) {
        let mut ids = Vec::with_capacity(self.store.len());
        let mut pos = Vec::with_capacity(self.store.len() * 2);
        for (id, p) in self.store.iter() {
            ids.push(id);
            pos.push(p.x);
            pos.push(p.y);
        }
        (ids, pos)
    }

    /// Clears every point; the next frame is empty.
    pub fn reset(&mut self) {
        self.store.clear();
        self.bump();
        self.recompute();
    }

    /// Full pipeline: partition, shade, reconcile, apply to the scene and
    /// queue for the host.
    pub fn recompute(&mut self) -> Patch {
        let frame = self.build_frame();
        let patch = self.reconciler.reconcile(&frame);
        for cmd in &patch.commands {
            self.scene.apply(cmd);
        }
        for cmd in &patch.commands {
            self.pending.push(cmd.clone());
        }
        self.bindings.sync(&patch);
        if let Some(h) = self.hovered {
            if patch.removed.contains(&h) {
                self.hovered = None;
                self.overlay.push(OverlayCommand::Hide);
            }
        }
        self.sync = SyncState::Reconciled;
        patch
    }

    fn build_frame(&mut self) -> Frame {
        let cells = partition::compute(self.store.points(), self.bounds());
        let (scale, shades) = shading::shade(&cells);
        log::debug!(
            "recomputed {} cells over {} points, area domain {:?}{}",
            cells.len(),
            self.store.len(),
            scale.domain(),
            if scale.tied { " (tied)" } else { "" }
        );
        self.scale = scale;
        self.shades = cells.iter().zip(&shades).map(|(c, s)| (c.id, *s)).collect();
        let radius = self.config.marker_radius;
        Frame {
            cells: cells
                .into_iter()
                .zip(shades)
                .map(|(c, s)| CellFrame {
                    id: c.id,
                    points: c.polygon.unwrap_or_default(),
                    fill: s.color,
                    area: s.area,
                })
                .collect(),
            markers: self.store.iter().map(|(id, at)| MarkerFrame { id, at, radius }).collect(),
        }
    }

    // Rendered state
    pub fn cells(&self) -> impl Iterator<Item = &CellFrame> {
        self.reconciler.cells()
    }
    pub fn cell(&self, id: PointId) -> Option<&CellFrame> {
        self.reconciler.cell(id)
    }
    pub fn markers(&self) -> impl Iterator<Item = &MarkerFrame> {
        self.reconciler.markers()
    }
    pub fn shade(&self, id: PointId) -> Option<Shade> {
        self.shades.get(&id).copied()
    }
    pub fn area_scale(&self) -> AreaScale {
        self.scale
    }
    pub fn scene(&self) -> &SvgScene {
        &self.scene
    }

    // Host plumbing
    /// Drains the render commands produced since the last drain. Undrained
    /// commands coalesce per element, so hosts that never call this (for
    /// example ones that only read `cells()` or export) hold a bounded queue.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        self.pending.drain()
    }
    pub fn flush(&mut self, surface: &mut impl RenderSurface) {
        for cmd in self.take_commands() {
            surface.apply(&cmd);
        }
    }
    pub fn take_overlay(&mut self) -> Vec<OverlayCommand> {
        self.overlay.drain()
    }
    pub fn flush_overlay(&mut self, host: &mut impl OverlayHost) {
        for cmd in self.take_overlay() {
            host.apply(&cmd);
        }
    }

    // Interaction
    pub fn tooltip_text(&self, id: PointId) -> Option<String> {
        self.shades.get(&id).map(|s| format!("Area: {:.2}", s.area))
    }
    pub fn hovered(&self) -> Option<PointId> {
        self.hovered
    }
    pub fn is_bound(&self, id: PointId) -> bool {
        self.bindings.is_bound(id)
    }

    pub fn dispatch(&mut self, ev: PointerEvent) -> Dispatch {
        let resolved = self.bindings.resolve(&ev);
        let mut out = Dispatch::from_resolved(resolved);
        let at = ev.at.offset(self.config.tooltip_offset);
        match resolved.action {
            Some(Action::AddPoint) => {
                out.added = self.add_point(ev.at.x, ev.at.y);
            }
            Some(Action::RemovePoint(id)) => {
                if self.remove_point(id) {
                    out.removed = Some(id);
                }
            }
            Some(Action::ShowArea(id)) => {
                if let Some(text) = self.tooltip_text(id) {
                    self.hovered = Some(id);
                    self.overlay.push(OverlayCommand::Show { text, at });
                }
            }
            Some(Action::TrackPointer) => {
                if self.hovered.is_some() {
                    self.overlay.push(OverlayCommand::Move { at });
                }
            }
            Some(Action::HideOverlay) => {
                if self.hovered.take().is_some() {
                    self.overlay.push(OverlayCommand::Hide);
                }
            }
            None => {}
        }
        out
    }

    pub fn pick(&self, x: f32, y: f32, tol: f32) -> Option<(PointId, f32)> {
        picking::pick_marker(&self.reconciler, x, y, tol)
    }
    pub fn cell_at(&self, x: f32, y: f32) -> Option<PointId> {
        picking::cell_at(&self.reconciler, x, y)
    }

    /// Click for hosts without element hit-testing: markers take priority
    /// over cells.
    pub fn click_at(&mut self, x: f32, y: f32) -> Dispatch {
        let target = if let Some((id, _)) = self.pick(x, y, self.config.pick_tolerance) {
            Target::Marker(id)
        } else if let Some(id) = self.cell_at(x, y) {
            Target::Cell(id)
        } else {
            Target::Background
        };
        self.dispatch(PointerEvent::new(PointerKind::Click, x, y, target))
    }

    /// Pointer motion for hosts without element hit-testing; synthesizes
    /// leave/enter when the cell under the pointer changes.
    pub fn hover_at(&mut self, x: f32, y: f32) {
        let under = self.cell_at(x, y);
        if under == self.hovered {
            if let Some(id) = under {
                self.dispatch(PointerEvent::new(PointerKind::Move, x, y, Target::Cell(id)));
            }
            return;
        }
        if let Some(old) = self.hovered {
            self.dispatch(PointerEvent::new(PointerKind::Leave, x, y, Target::Cell(old)));
        }
        if let Some(id) = under {
            self.dispatch(PointerEvent::new(PointerKind::Enter, x, y, Target::Cell(id)));
        }
    }

    // Export
    pub fn export_svg(&self) -> String {
        self.scene.to_document()
    }
    pub fn export(&self, sink: &mut impl ExportSink) {
        sink.offer(&self.export_svg(), EXPORT_FILENAME, EXPORT_MIME);
    }

    // JSON
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
}
