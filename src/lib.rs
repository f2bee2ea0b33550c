use wasm_bindgen::prelude::*;
mod api;
mod error;
mod export;
mod interop;

#[wasm_bindgen]
pub struct Diagram { pub(crate) inner: cellmap::Diagram }

impl Diagram {
    pub fn rs_new(inner: cellmap::Diagram) -> Diagram { Diagram { inner } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.geom_version() }
}
