//! Toggle targets, variants and outcomes.

use casiopea_api_models::{RecordId, ToggleResult};

use crate::features::toggles::logic::ElementNaming;

/// Row highlight class applied while a record is inactive.
pub const INACTIVE_ROW_CLASS: &str = "table-secondary";

/// Visual state of a toggle button and its row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleVariant {
    /// Record is active: blue outline button, switch-on icon.
    Active,
    /// Record is inactive: light button, switch-off icon, highlighted row.
    Inactive,
}

impl ToggleVariant {
    /// Map a persisted flag into its variant.
    #[must_use]
    pub const fn from_active(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }

    /// Variant reported by a successful response. Only a literal `true` is active.
    #[must_use]
    pub fn from_result(result: &ToggleResult) -> Self {
        Self::from_active(result.is_active == Some(true))
    }

    /// Whether this variant represents an active record.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Button class carried by this variant.
    #[must_use]
    pub const fn button_class(self) -> &'static str {
        match self {
            Self::Active => "btn-outline-primary",
            Self::Inactive => "btn-light",
        }
    }

    /// Button class belonging to the opposite variant, removed on apply.
    #[must_use]
    pub const fn stale_button_class(self) -> &'static str {
        self.flipped().button_class()
    }

    /// Icon classes for the button glyph.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Active => "mdi mdi-toggle-switch",
            Self::Inactive => "mdi mdi-toggle-switch-off",
        }
    }

    /// Inner HTML placed in the button.
    #[must_use]
    pub fn icon_html(self) -> String {
        format!(r#"<span class="{}"></span>"#, self.icon_class())
    }

    /// Whether the row carries [`INACTIVE_ROW_CLASS`].
    #[must_use]
    pub const fn highlights_row(self) -> bool {
        matches!(self, Self::Inactive)
    }

    /// Label used by the read-only badge.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Activo",
            Self::Inactive => "Inactivo",
        }
    }

    /// Badge classes used when the viewer cannot toggle.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Active => "badge bg-primary",
            Self::Inactive => "badge bg-secondary",
        }
    }

    /// The other variant.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// Per-click request: which button, which endpoint, which row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleTarget {
    /// Button element id (a leading `#` is tolerated).
    pub element_id: String,
    /// Toggle endpoint URL.
    pub request_url: String,
    /// Row element id (a leading `#` is tolerated).
    pub row_id: String,
}

impl ToggleTarget {
    /// Build a target from explicit ids.
    #[must_use]
    pub fn new(
        element_id: impl Into<String>,
        request_url: impl Into<String>,
        row_id: impl Into<String>,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            request_url: request_url.into(),
            row_id: row_id.into(),
        }
    }

    /// Build a target for a record using the table's id convention.
    #[must_use]
    pub fn for_record(
        naming: &ElementNaming,
        id: &RecordId,
        request_url: impl Into<String>,
    ) -> Self {
        Self {
            element_id: naming.button_id(id),
            request_url: request_url.into(),
            row_id: naming.row_id(id),
        }
    }

    /// Button id without a selector prefix.
    #[must_use]
    pub fn button_key(&self) -> &str {
        strip_selector(&self.element_id)
    }

    /// Row id without a selector prefix.
    #[must_use]
    pub fn row_key(&self) -> &str {
        strip_selector(&self.row_id)
    }
}

fn strip_selector(id: &str) -> &str {
    let trimmed = id.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed)
}

/// How a settled toggle request ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server flipped the flag; the variant was painted.
    Applied(ToggleVariant),
    /// The server declined; nothing was painted.
    Rejected {
        /// Reason supplied by the server, if any.
        message: Option<String>,
    },
}

/// Render state for a toggle cell owned by a component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellState {
    /// Last acknowledged variant.
    pub variant: ToggleVariant,
    /// Whether a request is in flight.
    pub busy: bool,
}

impl CellState {
    /// Idle cell showing the persisted state.
    #[must_use]
    pub const fn new(active: bool) -> Self {
        Self {
            variant: ToggleVariant::from_active(active),
            busy: false,
        }
    }
}

/// Mutations applied to [`CellState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellAction {
    /// Mark the cell busy or idle.
    Busy(bool),
    /// Paint an acknowledged variant.
    Paint(ToggleVariant),
    /// Adopt a persisted flag handed down again by the owner of the row.
    Sync(bool),
}

impl CellState {
    /// Apply an action, returning the next state.
    #[must_use]
    pub const fn apply(&self, action: CellAction) -> Self {
        match action {
            CellAction::Busy(busy) => Self {
                variant: self.variant,
                busy,
            },
            CellAction::Paint(variant) => Self {
                variant,
                busy: self.busy,
            },
            CellAction::Sync(active) => Self {
                variant: ToggleVariant::from_active(active),
                busy: self.busy,
            },
        }
    }
}
