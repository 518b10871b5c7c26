//! `es_activo` toggle feature wiring.
//!
//! # Design
//! - Keep the request/response decisions DOM-free so they run under native tests.
//! - Reach the DOM, fetch and console only through the seams in [`controller`].
//! - Show only server-acknowledged state; never paint an optimistic guess.

#[cfg(target_arch = "wasm32")]
pub mod api;
pub mod controller;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod error;
pub mod logic;
pub mod registry;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
