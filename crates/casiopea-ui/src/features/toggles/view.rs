//! Yew toggle cell for tables rendered by the app itself.

use std::rc::Rc;

use casiopea_api_models::ToggleCell;
use yew::prelude::*;

use crate::config::RequestConfig;
use crate::features::toggles::api::FetchTransport;
use crate::features::toggles::controller::{Diagnostics, ToggleController, ToggleSurface};
use crate::features::toggles::dom::ConsoleDiagnostics;
use crate::features::toggles::error::ToggleError;
use crate::features::toggles::logic::ElementNaming;
use crate::features::toggles::state::{CellAction, CellState, ToggleTarget, ToggleVariant};

/// Controller type used by browser toggles.
pub type BrowserToggleController = ToggleController<FetchTransport, ConsoleDiagnostics>;

/// Toggle context provided above tables containing [`ToggleEsActivoCell`]s.
#[derive(Clone)]
pub struct ToggleCtx {
    /// Request configuration injected for every toggle under this provider.
    pub config: Option<Rc<RequestConfig>>,
    /// Shared controller.
    pub controller: Rc<BrowserToggleController>,
}

impl ToggleCtx {
    /// Build a context around an optional request configuration.
    #[must_use]
    pub fn new(config: Option<RequestConfig>) -> Self {
        Self {
            config: config.map(Rc::new),
            controller: Rc::new(ToggleController::new(FetchTransport, ConsoleDiagnostics)),
        }
    }
}

impl PartialEq for ToggleCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
            && match (&self.config, &other.config) {
                (Some(left), Some(right)) => Rc::ptr_eq(left, right),
                (None, None) => true,
                _ => false,
            }
    }
}

impl Reducible for CellState {
    type Action = CellAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

struct ReducerSurface {
    state: UseReducerHandle<CellState>,
    on_change: Callback<ToggleVariant>,
}

impl ToggleSurface for ReducerSurface {
    fn set_disabled(&self, disabled: bool) {
        self.state.dispatch(CellAction::Busy(disabled));
    }

    fn apply_variant(&self, variant: ToggleVariant) {
        self.state.dispatch(CellAction::Paint(variant));
        self.on_change.emit(variant);
    }
}

/// Props for [`ToggleEsActivoCell`].
#[derive(Properties, PartialEq)]
pub struct ToggleEsActivoCellProps {
    /// Id convention of the enclosing table.
    pub naming: ElementNaming,
    /// Row payload for the toggle column.
    pub cell: ToggleCell,
    /// Called with each acknowledged variant so the row can update its highlight.
    #[prop_or_default]
    pub on_change: Callback<ToggleVariant>,
}

/// Toggle button (or read-only badge) for one table row.
#[function_component(ToggleEsActivoCell)]
pub fn toggle_es_activo_cell(props: &ToggleEsActivoCellProps) -> Html {
    let ctx = use_context::<ToggleCtx>();
    let initial = props.cell.es_activo;
    let state = use_reducer(move || CellState::new(initial));
    {
        let state = state.clone();
        use_effect_with_deps(
            move |active: &bool| {
                state.dispatch(CellAction::Sync(*active));
                || ()
            },
            props.cell.es_activo,
        );
    }

    if !props.cell.editable() {
        let variant = state.variant;
        return html! {
            <span class={classes!(variant.badge_class())}>{ variant.label() }</span>
        };
    }

    let target = ToggleTarget::for_record(&props.naming, &props.cell.id, props.cell.url.clone());
    let onclick = {
        let state = state.clone();
        let on_change = props.on_change.clone();
        let target = target.clone();
        Callback::from(move |_: MouseEvent| {
            let surface = ReducerSurface {
                state: state.clone(),
                on_change: on_change.clone(),
            };
            let target = target.clone();
            let Some(ctx) = ctx.clone() else {
                ConsoleDiagnostics.report(&target, &ToggleError::ConfigurationMissing);
                return;
            };
            yew::platform::spawn_local(async move {
                ctx.controller
                    .activate_surface(&surface, &target, ctx.config.as_deref())
                    .await;
            });
        })
    };

    html! {
        <button
            id={target.element_id}
            type="button"
            class={classes!("btn", "btn-sm", state.variant.button_class())}
            {onclick}
            disabled={state.busy}
        >
            <span class={classes!(state.variant.icon_class())}></span>
        </button>
    }
}
