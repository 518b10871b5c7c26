//! DOM and console adapters for toggle activations.

use gloo::console;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::features::toggles::controller::{Diagnostics, SurfaceLookup, ToggleSurface};
use crate::features::toggles::error::ToggleError;
use crate::features::toggles::state::{INACTIVE_ROW_CLASS, ToggleTarget, ToggleVariant};

/// Button element plus its (optional) table row.
#[derive(Clone, Debug)]
pub struct DomSurface {
    button: Element,
    row: Option<Element>,
}

impl DomSurface {
    /// Wrap already-resolved elements.
    #[must_use]
    pub const fn new(button: Element, row: Option<Element>) -> Self {
        Self { button, row }
    }
}

impl ToggleSurface for DomSurface {
    fn set_disabled(&self, disabled: bool) {
        if let Err(err) = self.button.toggle_attribute_with_force("disabled", disabled) {
            log_dom_error("toggle disabled attribute", err);
        }
    }

    fn apply_variant(&self, variant: ToggleVariant) {
        let classes = self.button.class_list();
        if let Err(err) = classes.remove_1(variant.stale_button_class()) {
            log_dom_error("remove button class", err);
        }
        if let Err(err) = classes.add_1(variant.button_class()) {
            log_dom_error("add button class", err);
        }
        self.button.set_inner_html(&variant.icon_html());

        let Some(row) = &self.row else {
            return;
        };
        let row_classes = row.class_list();
        let result = if variant.highlights_row() {
            row_classes.add_1(INACTIVE_ROW_CLASS)
        } else {
            row_classes.remove_1(INACTIVE_ROW_CLASS)
        };
        if let Err(err) = result {
            log_dom_error("update row highlight", err);
        }
    }
}

/// Resolves targets against the current document by element id.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentLookup;

impl SurfaceLookup for DocumentLookup {
    type Surface = DomSurface;

    fn resolve(&self, target: &ToggleTarget) -> Result<DomSurface, ToggleError> {
        let document = web_sys::window().and_then(|window| window.document());
        let find = |id: &str| {
            document
                .as_ref()
                .and_then(|document| document.get_element_by_id(id))
        };
        let button = find(target.button_key()).ok_or_else(|| ToggleError::ElementMissing {
            element_id: target.button_key().to_string(),
        })?;
        Ok(DomSurface::new(button, find(target.row_key())))
    }
}

/// Writes toggle diagnostics to the browser console.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn report(&self, target: &ToggleTarget, error: &ToggleError) {
        let detail = match error {
            ToggleError::RequestFailure { source, .. } => source.to_string(),
            _ => String::new(),
        };
        console::error!(
            "toggle es_activo failed",
            target.element_id.as_str(),
            error.to_string(),
            detail
        );
    }

    fn rejected(&self, target: &ToggleTarget, message: Option<&str>) {
        console::warn!(
            "toggle es_activo rejected",
            target.element_id.as_str(),
            message.unwrap_or("-")
        );
    }
}

fn log_dom_error(operation: &'static str, err: JsValue) {
    console::error!("toggle dom update failed", operation, err);
}
