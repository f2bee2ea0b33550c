use cellmap_wasm::Diagram;
use js_sys::Reflect;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    let ok = Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool());
    if ok != Some(false) {
        return false;
    }
    Reflect::get(v, &JsValue::from_str("error"))
        .and_then(|e| Reflect::get(&e, &JsValue::from_str("code")))
        .ok()
        .and_then(|c| c.as_string())
        .map_or(false, |s| s == code)
}

fn js(v: serde_json::Value) -> JsValue {
    v.serialize(&Serializer::json_compatible()).unwrap()
}

fn is_ok(v: &JsValue) -> bool {
    Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool()) == Some(true)
}

#[wasm_bindgen_test]
fn strict_calls_return_typed_errors() {
    let mut d = Diagram::new(800.0, 600.0);
    let ver = d.geom_version();
    assert!(is_err(&d.add_point_res(f32::NAN, 0.0), "non_finite"));
    assert!(is_err(&d.add_point_res(0.0, f32::INFINITY), "non_finite"));
    assert!(is_err(&d.add_point_res(1e9, 0.0), "out_of_range"));
    assert!(is_err(&d.remove_point_res(42), "invalid_id"));
    assert_eq!(d.geom_version(), ver, "state mutated on error");
    assert_eq!(d.point_count(), 0);

    let r = d.add_point_res(10.0, 20.0);
    assert!(is_ok(&r));
    let id = Reflect::get(&r, &JsValue::from_str("value")).unwrap().as_f64().unwrap() as u32;
    assert!(is_ok(&d.remove_point_res(id)));
    assert!(is_err(&d.remove_point_res(id), "invalid_id"));
}

#[wasm_bindgen_test]
fn pick_res_validates_tolerance() {
    let mut d = Diagram::new(800.0, 600.0);
    d.add_point(100.0, 100.0);
    assert!(is_err(&d.pick_res(f32::NAN, 0.0, 1.0), "non_finite"));
    assert!(is_err(&d.pick_res(0.0, 0.0, -1.0), "out_of_range"));
    let hit = d.pick_res(103.0, 100.0, 0.0);
    assert!(is_ok(&hit));
    let miss = d.pick_res(300.0, 300.0, 0.0);
    assert!(Reflect::get(&miss, &JsValue::from_str("value")).unwrap().is_null());
}

#[wasm_bindgen_test]
fn config_errors_are_reported() {
    let bad = js(serde_json::json!({ "width": -5.0 }));
    assert!(is_err(&Diagram::with_config_res(bad), "out_of_range"));
    let fixed = js(serde_json::json!({ "export_filename": "a.svg" }));
    assert!(is_err(&Diagram::with_config_res(fixed), "invalid_config"));
    let wrong = JsValue::from_str("not a config");
    assert!(is_err(&Diagram::with_config_res(wrong), "invalid_config"));
    let good = js(serde_json::json!({ "width": 400.0, "height": 300.0 }));
    assert!(is_ok(&Diagram::with_config_res(good)));
}

#[wasm_bindgen_test]
fn invalid_bounds_fall_back_to_default() {
    let d = Diagram::new(0.0, f32::NAN);
    assert_eq!(d.width(), 800.0);
    assert_eq!(d.height(), 600.0);
}
