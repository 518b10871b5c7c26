//! JavaScript entry points for server-rendered tables.
//!
//! # Design
//! - Pages build one [`ToggleBindings`] with their request init and keep it in
//!   a variable the table markup can reach.
//! - The configuration travels with the bindings; nothing reads page globals.
//! - Rows registered through `registerRow` resolve from the registry; any
//!   other id falls back to a document lookup.
//! - The request init is read field by field so `Headers` instances and
//!   arrays of pairs keep their entries.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::{ConfigError, RequestConfig};
use crate::features::toggles::api::FetchTransport;
use crate::features::toggles::controller::{SurfaceLookup, ToggleController};
use crate::features::toggles::dom::{ConsoleDiagnostics, DocumentLookup, DomSurface};
use crate::features::toggles::logic::{ElementNaming, render_toggle_cell_json};
use crate::features::toggles::registry::{FallbackLookup, ToggleRegistry};
use crate::features::toggles::state::ToggleTarget;
use crate::features::toggles::view::BrowserToggleController;

/// Install the panic hook when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Toggle handlers bound to a page's request configuration.
#[wasm_bindgen]
pub struct ToggleBindings {
    config: Option<RequestConfig>,
    controller: BrowserToggleController,
    registry: Rc<RefCell<ToggleRegistry<DomSurface>>>,
}

#[wasm_bindgen]
impl ToggleBindings {
    /// Bind handlers to `request_init`; `undefined`/`null` leaves them unconfigured.
    ///
    /// # Errors
    /// Throws when `request_init` is present but is not a usable fetch init object.
    #[wasm_bindgen(constructor)]
    pub fn new(request_init: JsValue) -> Result<ToggleBindings, JsValue> {
        Ok(Self {
            config: parse_request_init(&request_init)?,
            controller: ToggleController::new(FetchTransport, ConsoleDiagnostics),
            registry: Rc::default(),
        })
    }

    /// Whether a request configuration was supplied.
    #[wasm_bindgen(getter)]
    pub fn configured(&self) -> bool {
        self.config.is_some()
    }

    /// Remember the elements for a rendered row. Returns `false` when the button is absent.
    #[wasm_bindgen(js_name = registerRow)]
    pub fn register_row(&self, button_id: String, row_id: String) -> bool {
        let target = ToggleTarget::new(button_id, String::new(), row_id);
        match DocumentLookup.resolve(&target) {
            Ok(surface) => {
                self.registry
                    .borrow_mut()
                    .register(target.button_key(), surface);
                true
            }
            Err(_) => false,
        }
    }

    /// Forget every registered row, e.g. before the table redraws.
    pub fn clear(&self) {
        self.registry.borrow_mut().clear();
    }

    /// Markup for the toggle column cell described by `cell` (`{id, es_activo, url}`).
    ///
    /// # Errors
    /// Throws when `cell` is not a toggle cell object.
    #[wasm_bindgen(js_name = renderToggleCell)]
    pub fn render_toggle_cell(
        &self,
        prefix: String,
        cell: JsValue,
        handle: String,
    ) -> Result<String, JsValue> {
        let raw: String = js_sys::JSON::stringify(&cell)?.into();
        render_toggle_cell_json(&ElementNaming::new(prefix), &raw, &handle)
            .map_err(|err| JsValue::from_str(&format!("invalid toggle cell: {err}")))
    }

    /// Flip `es_activo` for the row addressed by `button_id` / `row_id`.
    #[wasm_bindgen(js_name = toggleEsActivo)]
    pub fn toggle_es_activo(&self, button_id: String, url: String, row_id: String) {
        let target = ToggleTarget::new(button_id, url, row_id);
        let controller = self.controller.clone();
        let config = self.config.clone();
        let lookup = FallbackLookup::new(Rc::clone(&self.registry), DocumentLookup);
        spawn_local(async move {
            controller
                .activate(&lookup, &target, config.as_ref())
                .await;
        });
    }
}

fn parse_request_init(value: &JsValue) -> Result<Option<RequestConfig>, JsValue> {
    if is_absent(value) {
        return Ok(None);
    }
    if !value.is_object() {
        return Err(config_error(&ConfigError::InvalidField {
            field: "requestInit",
        }));
    }
    let method = string_field(value, "method")?;
    let credentials = string_field(value, "credentials")?;
    let headers = header_entries(&Reflect::get(value, &JsValue::from_str("headers"))?)?;
    RequestConfig::from_parts(method.as_deref(), credentials.as_deref(), headers)
        .map(Some)
        .map_err(|err| config_error(&err))
}

fn string_field(init: &JsValue, field: &'static str) -> Result<Option<String>, JsValue> {
    let value = Reflect::get(init, &JsValue::from_str(field))?;
    if is_absent(&value) {
        return Ok(None);
    }
    value
        .as_string()
        .map(Some)
        .ok_or_else(|| config_error(&ConfigError::InvalidField { field }))
}

fn header_entries(headers: &JsValue) -> Result<Vec<(String, String)>, JsValue> {
    if is_absent(headers) {
        return Ok(Vec::new());
    }
    if !headers.is_object() {
        return Err(config_error(&ConfigError::InvalidHeaders {
            detail: "expected Headers, an array of pairs or an object".to_string(),
        }));
    }
    // `Headers` and arrays iterate as [name, value] pairs; plain objects do not iterate.
    let entries: Vec<JsValue> = match js_sys::try_iter(headers)? {
        Some(iter) => iter.collect::<Result<_, _>>()?,
        None => Object::entries(headers.unchecked_ref()).iter().collect(),
    };
    entries.iter().map(header_entry).collect()
}

fn header_entry(entry: &JsValue) -> Result<(String, String), JsValue> {
    let parts: Vec<Option<String>> = if Array::is_array(entry) {
        Array::from(entry).iter().map(|part| part.as_string()).collect()
    } else {
        Vec::new()
    };
    RequestConfig::header_entry(&parts).map_err(|err| config_error(&err))
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn config_error(err: &ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
