use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement};

use runtime::AtlasError;
use scene::Element;

/// `HtmlElement` handle acting as a geometry sink.
#[derive(Debug, Clone)]
pub struct DomElement {
    html: HtmlElement,
}

impl DomElement {
    pub fn new(html: HtmlElement) -> Self {
        Self { html }
    }

    /// Create a detached `<div>` with the given class.
    pub fn create_div(document: &Document, class_name: &str) -> Result<Self, AtlasError> {
        let html = document
            .create_element("div")
            .map_err(|e| AtlasError::Element(js_error_message(&e)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| AtlasError::Element("created node is not an HTMLElement".to_string()))?;
        html.set_class_name(class_name);
        Ok(Self::new(html))
    }

    /// First element matching a CSS selector.
    pub fn query(document: &Document, selector: &str) -> Result<Self, AtlasError> {
        let found = document
            .query_selector(selector)
            .map_err(|e| AtlasError::Element(js_error_message(&e)))?
            .ok_or_else(|| AtlasError::Element(format!("no element matches {selector:?}")))?;
        let html = found
            .dyn_into::<HtmlElement>()
            .map_err(|_| AtlasError::Element(format!("{selector:?} is not an HTMLElement")))?;
        Ok(Self::new(html))
    }

    pub fn html(&self) -> &HtmlElement {
        &self.html
    }
}

impl Element for DomElement {
    fn set_style(&self, property: &str, value: &str) {
        if let Err(err) = self.html.style().set_property(property, value) {
            crate::log(&format!("style {property} rejected: {}", js_error_message(&err)));
        }
    }

    fn append_child(&self, child: &Self) {
        if let Err(err) = self.html.append_child(&child.html) {
            crate::log(&format!("append_child failed: {}", js_error_message(&err)));
        }
    }
}

pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
