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
//! Shared HTTP DTOs for the Casiopea `es_activo` toggle endpoints.
//!
//! The table JSON hands one [`ToggleCell`] per row to the toggle column, and
//! each `toggle_es_activo_json` endpoint answers with a [`ToggleResult`].
//! Field names follow the server payloads verbatim so both sides decode the
//! same documents.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Record identifier as emitted by the server (UUID strings or integer keys).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer primary key.
    Int(i64),
    /// String key, usually a UUID.
    Text(String),
}

impl Display for RecordId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Text(value) => formatter.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Toggle column payload supplied by the table JSON for each row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleCell {
    /// Record identifier used to derive element ids.
    pub id: RecordId,
    /// Current persisted state of the record.
    pub es_activo: bool,
    /// Toggle endpoint; empty when the viewer may not edit the record.
    #[serde(default)]
    pub url: String,
}

impl ToggleCell {
    /// Whether the viewer may flip the flag (an endpoint was supplied).
    #[must_use]
    pub fn editable(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Response returned by a `toggle_es_activo_json` endpoint.
///
/// Decoding is lenient: a body without `success` reads as a rejection, and
/// when both `es_activo` and `isActive` are present the server field wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "ToggleResultWire")]
pub struct ToggleResult {
    /// Whether the server accepted and persisted the change.
    pub success: bool,
    /// New state of the record; absent on rejected requests.
    #[serde(rename = "es_activo", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Human-readable status or rejection reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Identifier of the toggled record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
}

#[derive(Deserialize)]
struct ToggleResultWire {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    es_activo: Option<bool>,
    #[serde(default, rename = "isActive")]
    is_active: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    id: Option<RecordId>,
}

impl From<ToggleResultWire> for ToggleResult {
    fn from(wire: ToggleResultWire) -> Self {
        Self {
            success: wire.success,
            is_active: wire.es_activo.or(wire.is_active),
            message: wire.message,
            id: wire.id,
        }
    }
}
