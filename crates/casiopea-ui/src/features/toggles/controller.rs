//! Toggle activation flow: disable, request, paint, re-enable.
//!
//! # Design
//! - Validate configuration and resolve elements before any side effect.
//! - Hold the button disabled through a guard; every exit path re-enables it.
//! - Treat `success: false` as a normal outcome, not an error.

use std::future::Future;

use casiopea_api_models::ToggleResult;

use crate::config::RequestConfig;
use crate::features::toggles::error::{ToggleError, TransportError};
use crate::features::toggles::state::{ToggleOutcome, ToggleTarget, ToggleVariant};

/// Button and row pair that a toggle paints.
pub trait ToggleSurface {
    /// Enable or disable the button.
    fn set_disabled(&self, disabled: bool);

    /// Paint the button and row for an acknowledged variant.
    fn apply_variant(&self, variant: ToggleVariant);
}

/// Resolves a target into the surface it addresses.
pub trait SurfaceLookup {
    /// Surface handed back for a target.
    type Surface: ToggleSurface;

    /// Resolve the target's button (and row, when present).
    ///
    /// # Errors
    /// Returns [`ToggleError::ElementMissing`] when the button cannot be found.
    fn resolve(&self, target: &ToggleTarget) -> Result<Self::Surface, ToggleError>;
}

/// Sends the state-changing request.
pub trait ToggleTransport {
    /// Issue the request and decode the toggle response.
    fn send(
        &self,
        url: &str,
        config: &RequestConfig,
    ) -> impl Future<Output = Result<ToggleResult, TransportError>>;
}

/// Sink for failures and server rejections.
pub trait Diagnostics {
    /// Report a failed activation.
    fn report(&self, target: &ToggleTarget, error: &ToggleError);

    /// Note that the server declined a toggle.
    fn rejected(&self, target: &ToggleTarget, message: Option<&str>);
}

/// Keeps a surface disabled until dropped.
#[must_use = "dropping the guard re-enables the button immediately"]
pub struct DisabledGuard<'a, S: ToggleSurface + ?Sized> {
    surface: &'a S,
}

impl<'a, S: ToggleSurface + ?Sized> DisabledGuard<'a, S> {
    /// Disable `surface` for the guard's lifetime.
    pub fn engage(surface: &'a S) -> Self {
        surface.set_disabled(true);
        Self { surface }
    }
}

impl<S: ToggleSurface + ?Sized> Drop for DisabledGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_disabled(false);
    }
}

/// Runs toggle activations against a transport, reporting to a diagnostics sink.
#[derive(Clone, Debug)]
pub struct ToggleController<T, D> {
    transport: T,
    diagnostics: D,
}

impl<T, D> ToggleController<T, D>
where
    T: ToggleTransport,
    D: Diagnostics,
{
    /// Build a controller from its transport and diagnostics sink.
    pub const fn new(transport: T, diagnostics: D) -> Self {
        Self {
            transport,
            diagnostics,
        }
    }

    /// Borrow the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrow the diagnostics sink.
    pub const fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Fire-and-forget activation: outcomes are painted, failures reported.
    pub async fn activate<L: SurfaceLookup>(
        &self,
        lookup: &L,
        target: &ToggleTarget,
        config: Option<&RequestConfig>,
    ) {
        if let Err(err) = self.try_activate(lookup, target, config).await {
            self.diagnostics.report(target, &err);
        }
    }

    /// Activation that hands the outcome back to the caller.
    ///
    /// # Errors
    /// - [`ToggleError::ConfigurationMissing`] when `config` is `None`; nothing is touched.
    /// - [`ToggleError::ElementMissing`] when the button cannot be resolved.
    /// - [`ToggleError::RequestFailure`] when the request fails; the button is re-enabled.
    pub async fn try_activate<L: SurfaceLookup>(
        &self,
        lookup: &L,
        target: &ToggleTarget,
        config: Option<&RequestConfig>,
    ) -> Result<ToggleOutcome, ToggleError> {
        let config = config.ok_or(ToggleError::ConfigurationMissing)?;
        let surface = lookup.resolve(target)?;
        self.run(&surface, target, config).await
    }

    /// Activation against a surface the caller already holds.
    pub async fn activate_surface<S: ToggleSurface>(
        &self,
        surface: &S,
        target: &ToggleTarget,
        config: Option<&RequestConfig>,
    ) {
        let result = match config {
            Some(config) => self.run(surface, target, config).await,
            None => Err(ToggleError::ConfigurationMissing),
        };
        if let Err(err) = result {
            self.diagnostics.report(target, &err);
        }
    }

    async fn run<S: ToggleSurface>(
        &self,
        surface: &S,
        target: &ToggleTarget,
        config: &RequestConfig,
    ) -> Result<ToggleOutcome, ToggleError> {
        let _guard = DisabledGuard::engage(surface);
        let result = self
            .transport
            .send(&target.request_url, config)
            .await
            .map_err(|source| ToggleError::RequestFailure {
                url: target.request_url.clone(),
                source,
            })?;
        if !result.success {
            self.diagnostics
                .rejected(target, result.message.as_deref());
            return Ok(ToggleOutcome::Rejected {
                message: result.message,
            });
        }
        let variant = ToggleVariant::from_result(&result);
        surface.apply_variant(variant);
        Ok(ToggleOutcome::Applied(variant))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{
        FakeSurface, FakeTransport, RecordingDiagnostics, SurfaceCall, accepted,
    };
    use super::*;
    use crate::config::Method;
    use crate::features::toggles::registry::{FallbackLookup, ToggleRegistry};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn config() -> RequestConfig {
        RequestConfig::new(Method::Post).with_header("X-CSRFToken", "t0k")
    }

    fn scenario_target() -> ToggleTarget {
        ToggleTarget::new("#x1", "/toggle/1", "#row1")
    }

    fn registry_with(surface: &FakeSurface) -> ToggleRegistry<FakeSurface> {
        let mut registry = ToggleRegistry::new();
        registry.register("x1", surface.clone());
        registry
    }

    #[tokio::test]
    async fn active_response_paints_active_variant() {
        let surface = FakeSurface::showing(ToggleVariant::Inactive);
        let transport = FakeTransport::replying([accepted(true)]).observing(&surface);
        let controller = ToggleController::new(transport.clone(), RecordingDiagnostics::default());

        let outcome = controller
            .try_activate(&registry_with(&surface), &scenario_target(), Some(&config()))
            .await
            .expect("toggle should settle");

        assert_eq!(outcome, ToggleOutcome::Applied(ToggleVariant::Active));
        assert_eq!(surface.button_class(), "btn-outline-primary");
        assert_eq!(
            surface.icon(),
            r#"<span class="mdi mdi-toggle-switch"></span>"#
        );
        assert!(!surface.row_highlighted.get());
        assert!(!surface.disabled.get());
        assert_eq!(transport.disabled_during_send.borrow().as_slice(), &[true]);
    }

    #[tokio::test]
    async fn inactive_response_matches_scenario() {
        let surface = FakeSurface::showing(ToggleVariant::Active);
        let transport = FakeTransport::replying([accepted(false)]);
        let controller = ToggleController::new(transport.clone(), RecordingDiagnostics::default());

        let outcome = controller
            .try_activate(&registry_with(&surface), &scenario_target(), Some(&config()))
            .await
            .expect("toggle should settle");

        assert_eq!(outcome, ToggleOutcome::Applied(ToggleVariant::Inactive));
        assert_eq!(surface.button_class(), "btn-light");
        assert_eq!(
            surface.icon(),
            r#"<span class="mdi mdi-toggle-switch-off"></span>"#
        );
        assert!(surface.row_highlighted.get());
        assert!(!surface.disabled.get());
        assert_eq!(
            transport.sent.borrow().as_slice(),
            &[("/toggle/1".to_string(), config())]
        );
    }

    #[tokio::test]
    async fn rejected_response_leaves_visuals_and_reenables() {
        let surface = FakeSurface::showing(ToggleVariant::Active);
        let transport = FakeTransport::replying([Ok(ToggleResult {
            success: false,
            message: Some("No encontrado".to_string()),
            ..ToggleResult::default()
        })]);
        let diagnostics = RecordingDiagnostics::default();
        let controller = ToggleController::new(transport, diagnostics.clone());

        let outcome = controller
            .try_activate(&registry_with(&surface), &scenario_target(), Some(&config()))
            .await
            .expect("rejection is not an error");

        assert_eq!(
            outcome,
            ToggleOutcome::Rejected {
                message: Some("No encontrado".to_string())
            }
        );
        assert_eq!(
            surface.calls(),
            vec![SurfaceCall::Disabled(true), SurfaceCall::Disabled(false)]
        );
        assert_eq!(surface.button_class(), "btn-outline-primary");
        assert!(diagnostics.errors().is_empty());
        assert_eq!(
            diagnostics.rejections.borrow().as_slice(),
            &[Some("No encontrado".to_string())]
        );
    }

    #[tokio::test]
    async fn transport_failure_reports_and_reenables_every_time() {
        let surface = FakeSurface::showing(ToggleVariant::Active);
        let transport = FakeTransport::replying([
            Err(TransportError::Network("offline".to_string())),
            Err(TransportError::Decode("expected value".to_string())),
        ]);
        let diagnostics = RecordingDiagnostics::default();
        let controller = ToggleController::new(transport, diagnostics.clone());
        let registry = registry_with(&surface);

        for _ in 0..2 {
            controller
                .activate(&registry, &scenario_target(), Some(&config()))
                .await;
            assert!(!surface.disabled.get());
            assert_eq!(surface.button_class(), "btn-outline-primary");
        }

        assert_eq!(
            diagnostics.errors(),
            vec![
                "#x1: toggle request to `/toggle/1` failed".to_string(),
                "#x1: toggle request to `/toggle/1` failed".to_string(),
            ]
        );
        assert!(
            !surface
                .calls()
                .iter()
                .any(|call| matches!(call, SurfaceCall::Painted(_)))
        );
    }

    #[tokio::test]
    async fn failure_surfaces_transport_source() {
        let surface = FakeSurface::default();
        let controller = ToggleController::new(
            FakeTransport::replying([Err(TransportError::Status(403))]),
            RecordingDiagnostics::default(),
        );

        let err = controller
            .try_activate(&registry_with(&surface), &scenario_target(), Some(&config()))
            .await
            .expect_err("status failure should surface");

        assert!(matches!(
            err,
            ToggleError::RequestFailure {
                source: TransportError::Status(403),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn missing_configuration_touches_nothing() {
        let surface = FakeSurface::default();
        let transport = FakeTransport::replying([accepted(true)]);
        let diagnostics = RecordingDiagnostics::default();
        let controller = ToggleController::new(transport.clone(), diagnostics.clone());

        controller
            .activate(&registry_with(&surface), &scenario_target(), None)
            .await;

        assert_eq!(transport.sent_count(), 0);
        assert!(surface.calls().is_empty());
        assert_eq!(
            diagnostics.errors(),
            vec!["#x1: request configuration is missing".to_string()]
        );
    }

    #[tokio::test]
    async fn unknown_button_is_reported_without_request() {
        let transport = FakeTransport::replying([accepted(true)]);
        let diagnostics = RecordingDiagnostics::default();
        let controller = ToggleController::new(transport.clone(), diagnostics.clone());
        let registry: ToggleRegistry<FakeSurface> = ToggleRegistry::new();

        controller
            .activate(&registry, &scenario_target(), Some(&config()))
            .await;

        assert_eq!(transport.sent_count(), 0);
        assert_eq!(
            diagnostics.errors(),
            vec!["#x1: toggle element `x1` was not found".to_string()]
        );
    }

    #[tokio::test]
    async fn held_surfaces_follow_the_same_flow() {
        let surface = FakeSurface::showing(ToggleVariant::Inactive);
        let transport = FakeTransport::replying([accepted(true)]);
        let diagnostics = RecordingDiagnostics::default();
        let controller = ToggleController::new(transport.clone(), diagnostics.clone());

        controller
            .activate_surface(&surface, &scenario_target(), None)
            .await;
        assert_eq!(transport.sent_count(), 0);
        assert!(surface.calls().is_empty());

        controller
            .activate_surface(&surface, &scenario_target(), Some(&config()))
            .await;
        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::Disabled(true),
                SurfaceCall::Painted(ToggleVariant::Active),
                SurfaceCall::Disabled(false),
            ]
        );
        assert_eq!(diagnostics.errors().len(), 1);
    }

    #[tokio::test]
    async fn body_without_success_flag_is_a_quiet_rejection() {
        let surface = FakeSurface::showing(ToggleVariant::Inactive);
        let body: ToggleResult =
            serde_json::from_str(r#"{"es_activo":true}"#).expect("lenient decode");
        let diagnostics = RecordingDiagnostics::default();
        let controller = ToggleController::new(FakeTransport::replying([Ok(body)]), diagnostics.clone());

        let outcome = controller
            .try_activate(&registry_with(&surface), &scenario_target(), Some(&config()))
            .await
            .expect("rejection is not an error");

        assert_eq!(outcome, ToggleOutcome::Rejected { message: None });
        assert_eq!(surface.button_class(), "btn-light");
        assert!(!surface.disabled.get());
        assert!(diagnostics.errors().is_empty());
    }

    #[tokio::test]
    async fn registered_rows_win_over_the_fallback_lookup() {
        let registered = FakeSurface::showing(ToggleVariant::Inactive);
        let fallback_surface = FakeSurface::showing(ToggleVariant::Inactive);
        let shared = Rc::new(RefCell::new(registry_with(&registered)));
        let mut fallback = ToggleRegistry::new();
        fallback.register("x1", fallback_surface.clone());
        fallback.register("x2", fallback_surface.clone());
        let lookup = FallbackLookup::new(Rc::clone(&shared), fallback);
        let controller = ToggleController::new(
            FakeTransport::replying([accepted(true), accepted(false)]),
            RecordingDiagnostics::default(),
        );

        controller
            .activate(&lookup, &scenario_target(), Some(&config()))
            .await;
        controller
            .activate(
                &lookup,
                &ToggleTarget::new("#x2", "/toggle/2", "#row2"),
                Some(&config()),
            )
            .await;

        assert_eq!(registered.button_class(), "btn-outline-primary");
        assert_eq!(
            fallback_surface.calls(),
            vec![
                SurfaceCall::Disabled(true),
                SurfaceCall::Painted(ToggleVariant::Inactive),
                SurfaceCall::Disabled(false),
            ]
        );

        shared.borrow_mut().clear();
        assert!(shared.borrow().is_empty());
    }
}
