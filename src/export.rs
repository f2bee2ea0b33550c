use cellmap::surface::ExportSink;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offers the document as a client-side file download through a temporary
/// object URL and anchor element.
#[derive(Default)]
pub struct BrowserDownload {
    pub(crate) failure: Option<String>,
}

impl ExportSink for BrowserDownload {
    fn offer(&mut self, document: &str, filename: &str, mime: &str) {
        if let Err(e) = download(document, filename, mime) {
            let msg = e.as_string().unwrap_or_else(|| format!("{:?}", e));
            crate::error::warn(&format!("export failed: {}", msg));
            self.failure = Some(msg);
        }
    }
}

fn download(document: &str, filename: &str, mime: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let parts = js_sys::Array::of1(&JsValue::from_str(document));
    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let anchor: HtmlAnchorElement = doc
        .create_element("a")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("anchor element unavailable"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();
    Url::revoke_object_url(&url)
}
