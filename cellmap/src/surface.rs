//! Interfaces to the host collaborators: the drawing surface, the overlay
//! (tooltip) host and the export sink.

use std::collections::BTreeMap;

use crate::model::{Color, PointId, Vec2};
use serde::Serialize;

/// Keyed drawing instruction. Cells are paths, markers are circles.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderCommand {
    CreateCell { id: PointId, points: Vec<Vec2>, fill: Color, area: f32 },
    UpdateCell { id: PointId, points: Vec<Vec2>, fill: Color, area: f32 },
    RemoveCell { id: PointId },
    CreateMarker { id: PointId, at: Vec2, radius: f32 },
    UpdateMarker { id: PointId, at: Vec2 },
    RemoveMarker { id: PointId },
}

impl RenderCommand {
    pub fn id(&self) -> PointId {
        match *self {
            RenderCommand::CreateCell { id, .. }
            | RenderCommand::UpdateCell { id, .. }
            | RenderCommand::RemoveCell { id }
            | RenderCommand::CreateMarker { id, .. }
            | RenderCommand::UpdateMarker { id, .. }
            | RenderCommand::RemoveMarker { id } => id,
        }
    }

    fn targets_cell(&self) -> bool {
        matches!(
            self,
            RenderCommand::CreateCell { .. } | RenderCommand::UpdateCell { .. } | RenderCommand::RemoveCell { .. }
        )
    }
}

/// SVG path data for a cell; empty for a degenerate cell.
pub fn path_data(points: &[Vec2]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        d.push_str(if i == 0 { "M" } else { "L" });
        d.push_str(&format!("{},{}", p.x, p.y));
    }
    if !d.is_empty() {
        d.push('Z');
    }
    d
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OverlayCommand {
    Show { text: String, at: Vec2 },
    Move { at: Vec2 },
    Hide,
}

#[derive(Clone, Debug)]
enum Pending {
    Create(RenderCommand),
    Update(RenderCommand),
    Remove(RenderCommand),
}

/// Render commands not yet handed to the host, coalesced per element: an
/// undrained queue holds at most one entry per cell and per marker, so a host
/// that never drains it does not grow it without bound.
#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    cells: BTreeMap<PointId, Pending>,
    markers: BTreeMap<PointId, Pending>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: RenderCommand) {
        let id = cmd.id();
        let slot = if cmd.targets_cell() { &mut self.cells } else { &mut self.markers };
        match cmd {
            RenderCommand::CreateCell { .. } | RenderCommand::CreateMarker { .. } => {
                slot.insert(id, Pending::Create(cmd));
            }
            RenderCommand::UpdateCell { .. } | RenderCommand::UpdateMarker { .. } => match slot.get_mut(&id) {
                Some(Pending::Create(create)) => merge_update(create, cmd),
                _ => {
                    slot.insert(id, Pending::Update(cmd));
                }
            },
            RenderCommand::RemoveCell { .. } | RenderCommand::RemoveMarker { .. } => {
                // The host never saw an element created since the last drain.
                if let Some(Pending::Create(_)) = slot.get(&id) {
                    slot.remove(&id);
                } else {
                    slot.insert(id, Pending::Remove(cmd));
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len() + self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.markers.is_empty()
    }

    /// Removes, then updates, then creations; cells before markers within
    /// each group, ids ascending.
    pub fn drain(&mut self) -> Vec<RenderCommand> {
        let cells = std::mem::take(&mut self.cells);
        let markers = std::mem::take(&mut self.markers);
        let mut out = Vec::with_capacity(cells.len() + markers.len());
        for rank in 0..3 {
            for p in cells.values().chain(markers.values()).filter(|p| p.rank() == rank) {
                out.push(p.command().clone());
            }
        }
        out
    }
}

impl Pending {
    fn rank(&self) -> u8 {
        match self {
            Pending::Remove(_) => 0,
            Pending::Update(_) => 1,
            Pending::Create(_) => 2,
        }
    }

    fn command(&self) -> &RenderCommand {
        match self {
            Pending::Create(c) | Pending::Update(c) | Pending::Remove(c) => c,
        }
    }
}

fn merge_update(create: &mut RenderCommand, update: RenderCommand) {
    match (create, update) {
        (
            RenderCommand::CreateCell { points, fill, area, .. },
            RenderCommand::UpdateCell { points: p, fill: f, area: a, .. },
        ) => {
            *points = p;
            *fill = f;
            *area = a;
        }
        (RenderCommand::CreateMarker { at, .. }, RenderCommand::UpdateMarker { at: a, .. }) => *at = a,
        _ => {}
    }
}

/// Overlay commands not yet handed to the host. `Show` and `Hide` replace
/// everything queued before them and consecutive moves collapse, so at most
/// two entries are pending.
#[derive(Clone, Debug, Default)]
pub struct OverlayQueue {
    cmds: Vec<OverlayCommand>,
}

impl OverlayQueue {
    pub fn push(&mut self, cmd: OverlayCommand) {
        match cmd {
            OverlayCommand::Show { .. } | OverlayCommand::Hide => self.cmds.clear(),
            OverlayCommand::Move { .. } => {
                if let Some(OverlayCommand::Move { .. }) = self.cmds.last() {
                    self.cmds.pop();
                }
            }
        }
        self.cmds.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn drain(&mut self) -> Vec<OverlayCommand> {
        std::mem::take(&mut self.cmds)
    }
}

pub trait RenderSurface {
    fn apply(&mut self, cmd: &RenderCommand);
}

pub trait OverlayHost {
    fn apply(&mut self, cmd: &OverlayCommand);
}

pub trait ExportSink {
    /// Receives a complete document for download.
    fn offer(&mut self, document: &str, filename: &str, mime: &str);
}

impl RenderSurface for Vec<RenderCommand> {
    fn apply(&mut self, cmd: &RenderCommand) {
        self.push(cmd.clone());
    }
}

impl OverlayHost for Vec<OverlayCommand> {
    fn apply(&mut self, cmd: &OverlayCommand) {
        self.push(cmd.clone());
    }
}
