use cellmap_wasm::Diagram;
use js_sys::{Float32Array, Reflect, Uint32Array};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Deserialize)]
struct CellView {
    id: u32,
    d: String,
    fill: String,
    area: f32,
}

#[derive(Deserialize)]
struct DispatchView {
    action: Option<String>,
    consumed: bool,
    added: Option<u32>,
    removed: Option<u32>,
}

fn get(v: &JsValue, k: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(k)).unwrap()
}

#[wasm_bindgen_test]
fn points_and_typed_arrays() {
    let mut d = Diagram::new(800.0, 600.0);
    let a = d.add_point(100.0, 100.0).unwrap();
    let b = d.add_point(700.0, 500.0).unwrap();
    assert_eq!(d.point_count(), 2);
    let pa: Vec<f32> = serde_wasm_bindgen::from_value(d.get_point(a)).unwrap();
    assert_eq!(pa, vec![100.0, 100.0]);

    let data = d.get_point_data();
    let ids = Uint32Array::from(get(&data, "ids")).to_vec();
    let pos = Float32Array::from(get(&data, "positions")).to_vec();
    assert_eq!(ids, vec![a, b]);
    assert_eq!(pos, vec![100.0, 100.0, 700.0, 500.0]);

    assert!(d.remove_point(a));
    assert!(!d.remove_point(a));
    assert!(d.get_point(a).is_null());
}

#[wasm_bindgen_test]
fn cells_carry_path_and_fill() {
    let mut d = Diagram::new(800.0, 600.0);
    d.add_point(200.0, 300.0);
    d.add_point(600.0, 300.0);
    let cells: Vec<CellView> = serde_wasm_bindgen::from_value(d.get_cells()).unwrap();
    assert_eq!(cells.len(), 2);
    for c in &cells {
        assert!(c.d.starts_with('M') && c.d.ends_with('Z'), "path {} for {}", c.d, c.id);
        assert!((c.area - 240_000.0).abs() < 1.0);
        // equal areas tie to the top of the ramp
        assert_eq!(c.fill, "rgb(133, 224, 133)");
    }
}

#[wasm_bindgen_test]
fn command_queue_drains() {
    let mut d = Diagram::new(800.0, 600.0);
    d.add_point(10.0, 10.0);
    let cmds: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(d.take_commands()).unwrap();
    let ops: Vec<&str> = cmds.iter().filter_map(|c| c["op"].as_str()).collect();
    assert_eq!(ops, vec!["create_cell", "create_marker"]);
    let again: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(d.take_commands()).unwrap();
    assert!(again.is_empty());
}

#[wasm_bindgen_test]
fn clicks_add_and_remove() {
    let mut d = Diagram::new(800.0, 600.0);
    let r: DispatchView = serde_wasm_bindgen::from_value(d.click(50.0, 60.0, "background", None)).unwrap();
    assert_eq!(r.action.as_deref(), Some("add_point"));
    let id = r.added.expect("added id");
    assert_eq!(d.point_count(), 1);

    let r: DispatchView = serde_wasm_bindgen::from_value(d.click(300.0, 300.0, "cell", Some(id))).unwrap();
    assert!(!r.consumed);
    assert_eq!(d.point_count(), 2);

    let r: DispatchView = serde_wasm_bindgen::from_value(d.click(50.0, 60.0, "marker", Some(id))).unwrap();
    assert!(r.consumed);
    assert_eq!(r.removed, Some(id));
    assert_eq!(d.point_count(), 1);

    // stale marker is swallowed without adding
    let r: DispatchView = serde_wasm_bindgen::from_value(d.click(50.0, 60.0, "marker", Some(id))).unwrap();
    assert!(r.consumed);
    assert_eq!(r.added, None);
    assert_eq!(d.point_count(), 1);
}

#[wasm_bindgen_test]
fn hover_drives_overlay() {
    let mut d = Diagram::new(800.0, 600.0);
    let id = d.add_point(400.0, 300.0).unwrap();
    d.pointer_enter(id, 100.0, 100.0);
    assert_eq!(d.hovered(), Some(id));
    assert_eq!(d.tooltip_text(id).as_deref(), Some("Area: 480000.00"));
    d.pointer_move(id, 120.0, 100.0);
    let ov: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(d.take_overlay()).unwrap();
    let ops: Vec<&str> = ov.iter().filter_map(|c| c["op"].as_str()).collect();
    assert_eq!(ops, vec!["show", "move"]);
    assert_eq!(ov[0]["text"], "Area: 480000.00");
    assert_eq!(ov[0]["at"]["x"], 110.0);
    assert_eq!(ov[0]["at"]["y"], 72.0);
    assert_eq!(ov[1]["at"]["x"], 130.0);
    d.pointer_leave(id, 120.0, 100.0);
    let ov: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(d.take_overlay()).unwrap();
    assert_eq!(ov.len(), 1);
    assert_eq!(ov[0]["op"], "hide");
}

#[wasm_bindgen_test]
fn svg_and_json_snapshots() {
    let mut d = Diagram::new(800.0, 600.0);
    d.add_point(100.0, 100.0);
    let svg = d.export_svg();
    assert!(svg.starts_with("<?xml version=\"1.0\" standalone=\"no\"?>"));
    assert_eq!(svg.matches("xmlns=\"http://www.w3.org/2000/svg\"").count(), 1);

    let v: serde_json::Value = serde_wasm_bindgen::from_value(d.to_json()).unwrap();
    assert_eq!(v["points"].as_array().map(|a| a.len()), Some(1));
    let s: serde_json::Value = serde_json::from_str(&d.to_json_string()).unwrap();
    assert_eq!(s, v);
}

#[wasm_bindgen_test]
fn reset_keeps_ids_unique() {
    let mut d = Diagram::new(800.0, 600.0);
    let a = d.add_point(1.0, 1.0).unwrap();
    d.reset();
    assert_eq!(d.point_count(), 0);
    assert_eq!(d.cell_count(), 0);
    let b = d.add_point(1.0, 1.0).unwrap();
    assert_ne!(a, b);
}
