use crate::export::BrowserDownload;
use crate::interop::{arr_f32, arr_u32, new_obj, set_kv, to_js};
use crate::{error, Diagram};
use cellmap::algorithms::interaction::{Action, PointerEvent, PointerKind, Target};
use cellmap::config::{DiagramConfig, EXPORT_FILENAME};
use cellmap::geometry::limits;
use serde::Serialize;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
struct DispatchOut {
    action: Option<&'static str>,
    consumed: bool,
    added: Option<u32>,
    removed: Option<u32>,
}

impl From<cellmap::Dispatch> for DispatchOut {
    fn from(d: cellmap::Dispatch) -> Self {
        let action = d.action.map(|a| match a {
            Action::AddPoint => "add_point",
            Action::RemovePoint(_) => "remove_point",
            Action::ShowArea(_) => "show_area",
            Action::TrackPointer => "track_pointer",
            Action::HideOverlay => "hide_overlay",
        });
        DispatchOut { action, consumed: d.consumed, added: d.added, removed: d.removed }
    }
}

#[derive(Serialize)]
struct CellOut<'a> {
    id: u32,
    d: String,
    fill: String,
    area: f32,
    points: &'a [cellmap::model::Vec2],
}

fn target_of(kind: &str, id: Option<u32>) -> Target {
    match (kind, id) {
        ("marker", Some(id)) => Target::Marker(id),
        ("cell", Some(id)) => Target::Cell(id),
        _ => Target::Background,
    }
}

#[wasm_bindgen]
impl Diagram {
    /// Invalid bounds fall back to the default surface with a console warning.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Diagram {
        match cellmap::Diagram::with_bounds(width, height) {
            Ok(inner) => Diagram::rs_new(inner),
            Err(e) => {
                error::warn(&format!("{}; using default bounds", e));
                Diagram::rs_new(cellmap::Diagram::new())
            }
        }
    }
    pub fn with_config(cfg: JsValue) -> Diagram {
        let parsed: Result<DiagramConfig, _> = serde_wasm_bindgen::from_value(cfg);
        match parsed.map_err(|e| e.to_string()).and_then(|c| {
            cellmap::Diagram::with_config(c).map_err(|e| e.to_string())
        }) {
            Ok(inner) => Diagram::rs_new(inner),
            Err(msg) => {
                error::warn(&format!("{}; using default config", msg));
                Diagram::rs_new(cellmap::Diagram::new())
            }
        }
    }
    /// Strict constructor: `{ok, value}` holds the diagram handle.
    pub fn with_config_res(cfg: JsValue) -> JsValue {
        let parsed: DiagramConfig = match serde_wasm_bindgen::from_value(cfg) {
            Ok(c) => c,
            Err(e) => return error::err("invalid_config", e.to_string(), None),
        };
        match cellmap::Diagram::with_config(parsed) {
            Ok(inner) => error::ok(JsValue::from(Diagram::rs_new(inner))),
            Err(e) => error::from_diagram(&e),
        }
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }
    pub fn width(&self) -> f32 {
        self.inner.bounds().width
    }
    pub fn height(&self) -> f32 {
        self.inner.bounds().height
    }

    // Points
    /// `undefined` once point ids are exhausted.
    pub fn add_point(&mut self, x: f32, y: f32) -> Option<u32> {
        self.inner.add_point(x, y)
    }
    pub fn add_point_res(&mut self, x: f32, y: f32) -> JsValue {
        match self.inner.try_add_point(x, y) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::from_diagram(&e),
        }
    }
    pub fn remove_point(&mut self, id: u32) -> bool {
        self.inner.remove_point(id)
    }
    pub fn remove_point_res(&mut self, id: u32) -> JsValue {
        match self.inner.try_remove_point(id) {
            Ok(p) => error::ok(to_js(&vec![p.x, p.y])),
            Err(e) => error::from_diagram(&e),
        }
    }
    pub fn get_point(&self, id: u32) -> JsValue {
        match self.inner.get_point(id) {
            Some(p) => to_js(&vec![p.x, p.y]),
            None => JsValue::NULL,
        }
    }
    pub fn point_count(&self) -> u32 {
        self.inner.point_count() as u32
    }
    pub fn reset(&mut self) {
        self.inner.reset();
    }
    /// `{ids: Uint32Array, positions: Float32Array}` with positions interleaved.
    pub fn get_point_data(&self) -> JsValue {
        let (ids, pos) = self.inner.get_point_arrays();
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "positions", &arr_f32(&pos).into());
        obj.into()
    }

    // Rendered state
    pub fn get_cells(&self) -> JsValue {
        let cells: Vec<CellOut> = self
            .inner
            .cells()
            .map(|c| CellOut {
                id: c.id,
                d: cellmap::surface::path_data(&c.points),
                fill: c.fill.to_string(),
                area: c.area,
                points: &c.points,
            })
            .collect();
        to_js(&cells)
    }
    pub fn cell_count(&self) -> u32 {
        self.inner.cells().count() as u32
    }
    /// Drains the render commands produced since the last call.
    pub fn take_commands(&mut self) -> JsValue {
        to_js(&self.inner.take_commands())
    }
    pub fn take_overlay(&mut self) -> JsValue {
        to_js(&self.inner.take_overlay())
    }
    pub fn tooltip_text(&self, id: u32) -> Option<String> {
        self.inner.tooltip_text(id)
    }
    pub fn hovered(&self) -> Option<u32> {
        self.inner.hovered()
    }

    // Interaction
    /// Routes a host-side hit: `target` is "marker", "cell" or anything else
    /// for the background.
    pub fn click(&mut self, x: f32, y: f32, target: &str, id: Option<u32>) -> JsValue {
        let ev = PointerEvent::new(PointerKind::Click, x, y, target_of(target, id));
        to_js(&DispatchOut::from(self.inner.dispatch(ev)))
    }
    pub fn click_at(&mut self, x: f32, y: f32) -> JsValue {
        to_js(&DispatchOut::from(self.inner.click_at(x, y)))
    }
    pub fn pointer_enter(&mut self, id: u32, x: f32, y: f32) {
        self.inner.dispatch(PointerEvent::new(PointerKind::Enter, x, y, Target::Cell(id)));
    }
    pub fn pointer_move(&mut self, id: u32, x: f32, y: f32) {
        self.inner.dispatch(PointerEvent::new(PointerKind::Move, x, y, Target::Cell(id)));
    }
    pub fn pointer_leave(&mut self, id: u32, x: f32, y: f32) {
        self.inner.dispatch(PointerEvent::new(PointerKind::Leave, x, y, Target::Cell(id)));
    }
    pub fn hover_at(&mut self, x: f32, y: f32) {
        self.inner.hover_at(x, y);
    }
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> JsValue {
        match self.inner.pick(x, y, tol) {
            Some((id, dist)) => {
                let obj = new_obj();
                set_kv(&obj, "id", &JsValue::from_f64(id as f64));
                set_kv(&obj, "dist", &JsValue::from_f64(dist as f64));
                obj.into()
            }
            None => JsValue::NULL,
        }
    }
    pub fn pick_res(&self, x: f32, y: f32, tol: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if !tol.is_finite() {
            return error::non_finite("tol");
        }
        if !(0.0..=limits::RADIUS_MAX).contains(&tol) {
            return error::out_of_range("tol", 0.0, limits::RADIUS_MAX, tol);
        }
        error::ok(self.pick(x, y, tol))
    }
    pub fn cell_at(&self, x: f32, y: f32) -> Option<u32> {
        self.inner.cell_at(x, y)
    }

    // Export / JSON
    pub fn export_svg(&self) -> String {
        self.inner.export_svg()
    }
    /// Offers the standalone SVG as a browser download. Failures are logged.
    pub fn export_snapshot(&self) {
        let mut sink = BrowserDownload::default();
        self.inner.export(&mut sink);
    }
    pub fn export_snapshot_res(&self) -> JsValue {
        let mut sink = BrowserDownload::default();
        self.inner.export(&mut sink);
        match sink.failure {
            None => error::ok(JsValue::from_str(EXPORT_FILENAME)),
            Some(msg) => error::err("export_failed", msg, None),
        }
    }
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_json_value())
    }
    pub fn to_json_string(&self) -> String {
        self.inner.to_json_value().to_string()
    }
}
