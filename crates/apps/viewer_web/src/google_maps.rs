use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::dom::{DomElement, js_error_message};
use foundation::math::GeoCoordinate;
use runtime::{AtlasError, MapViewport, ViewportOptions};

#[wasm_bindgen]
extern "C" {
    /// `google.maps.Map` from the Maps JavaScript API.
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    #[derive(Debug, Clone)]
    pub type JsGoogleMap;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"], js_class = "Map")]
    fn new(container: &HtmlElement, options: &JsValue) -> Result<JsGoogleMap, JsValue>;

    #[wasm_bindgen(method, js_class = "Map", js_name = setCenter)]
    fn set_center(this: &JsGoogleMap, center: &JsValue);

    #[wasm_bindgen(method, js_class = "Map", js_name = setZoom)]
    fn set_zoom(this: &JsGoogleMap, zoom: f64);
}

/// One Google map living inside a face element.
#[derive(Debug, Clone)]
pub struct GoogleMapViewport {
    map: JsGoogleMap,
}

impl GoogleMapViewport {
    pub fn create(face: &DomElement, options: &ViewportOptions) -> Result<Self, AtlasError> {
        let options = to_js(options).map_err(AtlasError::Viewport)?;
        let map = JsGoogleMap::new(face.html(), &options)
            .map_err(|e| AtlasError::Viewport(js_error_message(&e)))?;
        Ok(Self { map })
    }
}

impl MapViewport for GoogleMapViewport {
    fn set_center(&mut self, center: GeoCoordinate) {
        match to_js(&center) {
            Ok(value) => self.map.set_center(&value),
            Err(err) => crate::log(&format!("setCenter skipped: {err}")),
        }
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.map.set_zoom(zoom);
    }
}

/// Plain JS object with the same shape as `value`'s JSON form.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|e| e.to_string())?;
    js_sys::JSON::parse(&json).map_err(|e| js_error_message(&e))
}
