use cellmap::error::DiagramError;
use wasm_bindgen::prelude::*;

use crate::interop::{new_obj, set_kv};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f32, max: f32, got: f32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min as f64));
    set_kv(&d, "max", &JsValue::from_f64(max as f64));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str("point"));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", "invalid point id", Some(d.into()))
}

/// Envelope for core failures; the code comes from the core so both layers
/// agree on it.
pub fn from_diagram(e: &DiagramError) -> JsValue {
    match e {
        DiagramError::NonFinite { param } => non_finite(param),
        DiagramError::UnknownPoint(id) => invalid_id(*id),
        DiagramError::OutOfRange { param, min, max, got } => out_of_range(param, *min, *max, *got),
        DiagramError::InvalidBounds { width, height, max } => {
            let d = new_obj();
            set_kv(&d, "width", &JsValue::from_f64(*width as f64));
            set_kv(&d, "height", &JsValue::from_f64(*height as f64));
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        DiagramError::TooManyPoints(max) => {
            let d = new_obj(); set_kv(&d, "max", &JsValue::from_f64(*max as f64));
            err(e.code(), e.to_string(), Some(d.into()))
        }
        DiagramError::InvalidConfig(_) => err(e.code(), e.to_string(), None),
    }
}

pub fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}
