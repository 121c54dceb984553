use console_error_panic_hook::set_once;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, WheelEvent};

use foundation::math::Vec2;
use runtime::{Atlas, AtlasError, AtlasOptions};
use scene::components::AxisUpdate;

mod dom;
mod google_maps;
pub use dom::DomElement;
pub use google_maps::GoogleMapViewport;

type WebAtlas = Atlas<DomElement, GoogleMapViewport>;

thread_local! {
    static ATLAS: RefCell<Option<WebAtlas>> = const { RefCell::new(None) };
}

pub(crate) fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

fn js_err(err: AtlasError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

/// Run `f` against the mounted atlas.
fn with_atlas<T>(f: impl FnOnce(&mut WebAtlas) -> T) -> Result<T, JsValue> {
    ATLAS.with(|cell| {
        let mut slot = cell.borrow_mut();
        let atlas = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("atlas is not mounted; call mount() first"))?;
        Ok(f(atlas))
    })
}

/// Event handlers run outside any `with_atlas` borrow; a missing atlas is
/// silently ignored.
fn dispatch(f: impl FnOnce(&mut WebAtlas)) {
    ATLAS.with(|cell| {
        if let Some(atlas) = cell.borrow_mut().as_mut() {
            f(atlas);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Build the folding map under the element matching `selector`.
///
/// `options_json` may be empty to use the defaults.
#[wasm_bindgen]
pub fn mount(selector: &str, options_json: &str) -> Result<(), JsValue> {
    let document = document()?;
    let options = if options_json.trim().is_empty() {
        AtlasOptions::default()
    } else {
        AtlasOptions::from_json(options_json).map_err(js_err)?
    };

    let container = DomElement::query(&document, selector).map_err(js_err)?;
    let atlas = Atlas::new(container, options, |class| {
        DomElement::create_div(&document, class)
    })
    .map_err(js_err)?;

    ATLAS.with(|cell| *cell.borrow_mut() = Some(atlas));
    Ok(())
}

/// Create the map viewports, wire input listeners and attach the map to the
/// page.
#[wasm_bindgen]
pub fn insert() -> Result<(), JsValue> {
    let (map_node, face_nodes) = with_atlas(|atlas| {
        atlas.insert(GoogleMapViewport::create)?;
        let map_node = atlas.world().map().element().html().clone();
        let face_nodes: Vec<HtmlElement> = atlas
            .world()
            .faces()
            .iter()
            .map(|face| face.element().html().clone())
            .collect();
        Ok::<_, AtlasError>((map_node, face_nodes))
    })?
    .map_err(js_err)?;

    let body = document()?
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    wire_keyboard(&body)?;
    wire_drag(&map_node, &body)?;
    for face in &face_nodes {
        wire_wheel(face)?;
    }
    Ok(())
}

#[wasm_bindgen]
pub fn rotate(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Result<(), JsValue> {
    with_atlas(|atlas| atlas.rotate(AxisUpdate { x, y, z }))
}

#[wasm_bindgen]
pub fn fold(angle_deg: f64) -> Result<(), JsValue> {
    with_atlas(|atlas| atlas.fold(angle_deg))
}

/// Current geometry and map state as pretty JSON.
#[wasm_bindgen]
pub fn snapshot() -> Result<String, JsValue> {
    let snapshot = with_atlas(|atlas| atlas.snapshot())?;
    serde_json::to_string_pretty(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn wire_keyboard(body: &HtmlElement) -> Result<(), JsValue> {
    listen(body, "keydown", |event: KeyboardEvent| {
        dispatch(|atlas| atlas.on_key_down(event.key_code()));
    })?;
    listen(body, "keyup", |event: KeyboardEvent| {
        dispatch(|atlas| atlas.on_key_up(event.key_code()));
    })
}

fn wire_drag(map_node: &HtmlElement, body: &HtmlElement) -> Result<(), JsValue> {
    listen(map_node, "mousedown", |event: MouseEvent| {
        let pos = Vec2::new(event.client_x() as f64, event.client_y() as f64);
        dispatch(|atlas| atlas.on_pointer_down(pos));
    })?;
    listen(body, "mousemove", |event: MouseEvent| {
        let pos = Vec2::new(event.client_x() as f64, event.client_y() as f64);
        dispatch(|atlas| atlas.on_pointer_move(pos));
    })?;
    listen(body, "mouseup", |_: MouseEvent| {
        dispatch(|atlas| atlas.on_pointer_up());
    })
}

fn wire_wheel(face: &HtmlElement) -> Result<(), JsValue> {
    listen(face, "wheel", |event: WheelEvent| {
        dispatch(|atlas| atlas.on_wheel(event.delta_y()));
    })
}
