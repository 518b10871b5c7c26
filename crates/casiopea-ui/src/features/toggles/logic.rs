//! Toggle markup, id and route helpers.
//!
//! # Design
//! - One naming convention shared by markup, lookups and Yew cells.
//! - Escape everything that lands in attributes or inline handlers.

use std::fmt::Write as _;

use casiopea_api_models::{RecordId, ToggleCell};

use crate::features::toggles::state::ToggleVariant;

/// Element id convention for a table: `{prefix}_es_activo_{id}` and `{prefix}_row_{id}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementNaming {
    prefix: String,
}

impl ElementNaming {
    /// Naming for the table whose ids start with `prefix` (usually the module name).
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Table prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Button id for a record.
    #[must_use]
    pub fn button_id(&self, id: &RecordId) -> String {
        format!("{}_es_activo_{id}", self.prefix)
    }

    /// Row id for a record.
    #[must_use]
    pub fn row_id(&self, id: &RecordId) -> String {
        format!("{}_row_{id}", self.prefix)
    }
}

/// Server route that flips `es_activo` for a record of `module`.
#[must_use]
pub fn toggle_path(module: &str, id: &RecordId) -> String {
    let module = module.trim_matches('/');
    let id = id.to_string();
    format!(
        "/{module}/toggle_es_activo_json/{}",
        urlencoding::encode(&id)
    )
}

/// Render the toggle column cell for a row.
///
/// Rows without an endpoint get a read-only badge. Editable rows get a button
/// whose inline handler calls `{handle}.toggleEsActivo(...)`, where `handle`
/// is the page variable holding the exported bindings.
#[must_use]
pub fn render_toggle_cell(naming: &ElementNaming, cell: &ToggleCell, handle: &str) -> String {
    let variant = ToggleVariant::from_active(cell.es_activo);
    if !cell.editable() {
        return format!(
            r#"<span class="{}">{}</span>"#,
            variant.badge_class(),
            variant.label()
        );
    }
    let button_id = naming.button_id(&cell.id);
    let row_id = naming.row_id(&cell.id);
    let on_click = format!(
        "{handle}.toggleEsActivo('#{}', '{}', '#{}')",
        js_string(&button_id),
        js_string(&cell.url),
        js_string(&row_id)
    );
    format!(
        r#"<button id="{}" type="button" class="btn btn-sm {}" onclick="{}">{}</button>"#,
        escape_html(&button_id),
        variant.button_class(),
        escape_html(&on_click),
        variant.icon_html()
    )
}

/// Render a cell from the JSON the table hands to its column renderer.
///
/// # Errors
/// Returns the decode error when `raw` is not a [`ToggleCell`] document.
pub fn render_toggle_cell_json(
    naming: &ElementNaming,
    raw: &str,
    handle: &str,
) -> Result<String, serde_json::Error> {
    let cell: ToggleCell = serde_json::from_str(raw)?;
    Ok(render_toggle_cell(naming, &cell, handle))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn js_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            other => out.push(other),
        }
    }
    out
}
