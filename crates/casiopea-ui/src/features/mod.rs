//! Feature slices for the Casiopea UI.

pub mod toggles;
