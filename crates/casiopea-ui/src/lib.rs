#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Casiopea Web UI toggle controls.
//!
//! Flips a record's `es_activo` flag from a table button, then repaints the
//! button and row from the server's answer. Decision logic is DOM-free and
//! tested natively; the fetch, DOM and Yew adapters build for `wasm32` only.

pub mod config;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::{ToggleBindings, start};

pub use config::{ConfigError, Credentials, Method, RequestConfig};
pub use features::toggles::controller::{
    Diagnostics, DisabledGuard, SurfaceLookup, ToggleController, ToggleSurface, ToggleTransport,
};
pub use features::toggles::error::{ToggleError, TransportError};
pub use features::toggles::logic::{
    ElementNaming, render_toggle_cell, render_toggle_cell_json, toggle_path,
};
pub use features::toggles::registry::{FallbackLookup, ToggleRegistry};
pub use features::toggles::state::{ToggleOutcome, ToggleTarget, ToggleVariant};

#[cfg(test)]
mod tests {
    use crate::{ElementNaming, ToggleTarget, ToggleVariant, toggle_path};
    use casiopea_api_models::RecordId;

    #[test]
    fn record_target_points_at_server_route() {
        let naming = ElementNaming::new("materias");
        let id = RecordId::from("9f2e");
        let target = ToggleTarget::for_record(&naming, &id, toggle_path(naming.prefix(), &id));
        assert_eq!(target.request_url, "/materias/toggle_es_activo_json/9f2e");
        assert_eq!(target.button_key(), "materias_es_activo_9f2e");
        assert_eq!(target.row_key(), "materias_row_9f2e");
    }

    #[test]
    fn variants_flip_back_and_forth() {
        assert_eq!(ToggleVariant::Active.flipped(), ToggleVariant::Inactive);
        assert_eq!(ToggleVariant::Inactive.flipped().flipped(), ToggleVariant::Inactive);
        assert!(ToggleVariant::from_active(true).is_active());
    }
}
