//! Keyed toggle surfaces.
//!
//! # Design
//! - Surfaces are registered once per rendered row under the button id.
//! - Lookups never build selectors; a miss is an explicit error.
//! - [`FallbackLookup`] lets a shared registry sit in front of a document
//!   lookup for rows that were never registered.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::features::toggles::controller::{SurfaceLookup, ToggleSurface};
use crate::features::toggles::error::ToggleError;
use crate::features::toggles::state::ToggleTarget;

/// Map from button id to the surface painting that button and its row.
#[derive(Clone, Debug)]
pub struct ToggleRegistry<S> {
    by_key: HashMap<String, S>,
}

impl<S> Default for ToggleRegistry<S> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
        }
    }
}

impl<S> ToggleRegistry<S> {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the surface for a button id. Returns the previous surface.
    pub fn register(&mut self, key: impl Into<String>, surface: S) -> Option<S> {
        self.by_key.insert(normalize(&key.into()), surface)
    }

    /// Drop the surface for a button id, e.g. when its row is redrawn.
    pub fn unregister(&mut self, key: &str) -> Option<S> {
        self.by_key.remove(normalize(key).as_str())
    }

    /// Borrow a registered surface.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S> {
        self.by_key.get(normalize(key).as_str())
    }

    /// Number of registered surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Forget every surface (table redraw).
    pub fn clear(&mut self) {
        self.by_key.clear();
    }
}

impl<S: ToggleSurface + Clone> SurfaceLookup for ToggleRegistry<S> {
    type Surface = S;

    fn resolve(&self, target: &ToggleTarget) -> Result<S, ToggleError> {
        self.by_key
            .get(target.button_key())
            .cloned()
            .ok_or_else(|| ToggleError::ElementMissing {
                element_id: target.button_key().to_string(),
            })
    }
}

impl<L: SurfaceLookup> SurfaceLookup for RefCell<L> {
    type Surface = L::Surface;

    fn resolve(&self, target: &ToggleTarget) -> Result<Self::Surface, ToggleError> {
        self.borrow().resolve(target)
    }
}

impl<L: SurfaceLookup + ?Sized> SurfaceLookup for Rc<L> {
    type Surface = L::Surface;

    fn resolve(&self, target: &ToggleTarget) -> Result<Self::Surface, ToggleError> {
        self.as_ref().resolve(target)
    }
}

/// Tries `primary` first and consults `fallback` only when the button is missing there.
#[derive(Clone, Debug)]
pub struct FallbackLookup<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackLookup<P, F> {
    /// Chain two lookups.
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> SurfaceLookup for FallbackLookup<P, F>
where
    P: SurfaceLookup,
    F: SurfaceLookup<Surface = P::Surface>,
{
    type Surface = P::Surface;

    fn resolve(&self, target: &ToggleTarget) -> Result<Self::Surface, ToggleError> {
        match self.primary.resolve(target) {
            Err(ToggleError::ElementMissing { .. }) => self.fallback.resolve(target),
            other => other,
        }
    }
}

fn normalize(key: &str) -> String {
    let trimmed = key.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).to_string()
}
