use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::model::{Color, PointId, Vec2};
use crate::surface::{path_data, RenderCommand, RenderSurface};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub const XML_PROLOG: &str = "<?xml version=\"1.0\" standalone=\"no\"?>\r\n";

const CELL_STROKE: &str = "#ffffff";
const MARKER_FILL: &str = "#333333";

#[derive(Clone, Debug, PartialEq)]
struct PathEl {
    d: String,
    fill: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CircleEl {
    at: Vec2,
    radius: f32,
}

/// Element lifecycle counters; updates must not show up as create+remove.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub created: u64,
    pub updated: u64,
    pub removed: u64,
}

/// Retained mirror of the host surface. Elements are keyed by point id and
/// kept in id order, which is creation order.
#[derive(Clone, Debug)]
pub struct SvgScene {
    width: f32,
    height: f32,
    cells: BTreeMap<PointId, PathEl>,
    markers: BTreeMap<PointId, CircleEl>,
    stats: SceneStats,
}

impl SvgScene {
    pub fn new(width: f32, height: f32) -> Self {
        SvgScene { width, height, cells: BTreeMap::new(), markers: BTreeMap::new(), stats: SceneStats::default() }
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn cell_path(&self, id: PointId) -> Option<&str> {
        self.cells.get(&id).map(|p| p.d.as_str())
    }

    pub fn cell_fill(&self, id: PointId) -> Option<Color> {
        self.cells.get(&id).map(|p| p.fill)
    }

    pub fn marker_at(&self, id: PointId) -> Option<Vec2> {
        self.markers.get(&id).map(|c| c.at)
    }

    /// Markup as the live element tree would serialize it: no namespace
    /// declarations and no prolog.
    pub fn to_markup(&self) -> String {
        let mut s = String::new();
        let _ = write!(
            s,
            "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height
        );
        s.push_str("<g class=\"cells\">");
        for (id, p) in &self.cells {
            let _ = write!(s, "<path data-id=\"{}\"", id);
            if !p.d.is_empty() {
                let _ = write!(s, " d=\"{}\"", p.d);
            }
            let _ = write!(s, " fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>", p.fill, CELL_STROKE);
        }
        s.push_str("</g><g class=\"points\">");
        for (id, c) in &self.markers {
            let _ = write!(
                s,
                "<circle data-id=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
                id, c.at.x, c.at.y, c.radius, MARKER_FILL
            );
        }
        s.push_str("</g></svg>");
        s
    }

    pub fn to_document(&self) -> String {
        standalone_document(&self.to_markup())
    }
}

impl RenderSurface for SvgScene {
    fn apply(&mut self, cmd: &RenderCommand) {
        match cmd {
            RenderCommand::CreateCell { id, points, fill, .. } => {
                self.cells.insert(*id, PathEl { d: path_data(points), fill: *fill });
                self.stats.created += 1;
            }
            RenderCommand::UpdateCell { id, points, fill, .. } => {
                if let Some(el) = self.cells.get_mut(id) {
                    el.d = path_data(points);
                    el.fill = *fill;
                    self.stats.updated += 1;
                }
            }
            RenderCommand::RemoveCell { id } => {
                if self.cells.remove(id).is_some() {
                    self.stats.removed += 1;
                }
            }
            RenderCommand::CreateMarker { id, at, radius } => {
                self.markers.insert(*id, CircleEl { at: *at, radius: *radius });
                self.stats.created += 1;
            }
            RenderCommand::UpdateMarker { id, at } => {
                if let Some(el) = self.markers.get_mut(id) {
                    el.at = *at;
                    self.stats.updated += 1;
                }
            }
            RenderCommand::RemoveMarker { id } => {
                if self.markers.remove(id).is_some() {
                    self.stats.removed += 1;
                }
            }
        }
    }
}

/// Prepends the XML prolog and adds the SVG and xlink namespace
/// declarations to the root element when they are missing.
pub fn standalone_document(markup: &str) -> String {
    let body = markup.trim_start();
    let mut out = String::with_capacity(body.len() + 128);
    out.push_str(XML_PROLOG);
    if !body.starts_with("<svg") {
        out.push_str(body);
        return out;
    }
    let root_end = body.find('>').unwrap_or(body.len());
    let root = &body[..root_end];
    let mut injected = String::new();
    if !root.contains(&format!("xmlns=\"{}\"", SVG_NS)) {
        let _ = write!(injected, " xmlns=\"{}\"", SVG_NS);
    }
    if !root.contains(&format!("\"{}\"", XLINK_NS)) {
        let _ = write!(injected, " xmlns:xlink=\"{}\"", XLINK_NS);
    }
    out.push_str("<svg");
    out.push_str(&injected);
    out.push_str(&body[4..]);
    out
}
