//! Axum router assembly.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use heatgate_app::ports::{ActivityLog, HeatingConnector, Terminator};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// `/health` is open; every other route requires the API key.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<N, L, T>(state: AppState<N, L, T>) -> Router
where
    N: HeatingConnector + 'static,
    L: ActivityLog + 'static,
    T: Terminator + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health_check() -> Json<Health> {
    Json(Health { status: "running" })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::auth::{API_KEY_HEADER, ApiKey};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use heatgate_app::ports::HeatingClient;
    use heatgate_app::services::activation_service::ActivationService;
    use heatgate_app::services::zone_service::ZoneService;
    use heatgate_domain::activation::ActivationStatus;
    use heatgate_domain::error::HeatGateError;
    use heatgate_domain::zone::{WindowState, Zone, ZoneId};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const SECRET: &str = "s3cret";

    type Calls = Arc<Mutex<Vec<String>>>;

    struct StubClient {
        calls: Calls,
        open: Option<u32>,
    }

    impl StubClient {
        fn push(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl HeatingClient for StubClient {
        async fn activation_status(&self) -> Result<ActivationStatus, HeatGateError> {
            Ok(ActivationStatus::Completed)
        }
        async fn verification_url(&self) -> Result<String, HeatGateError> {
            Ok(String::new())
        }
        async fn activate(&self) -> Result<(), HeatGateError> {
            Ok(())
        }
        async fn get_zones(&self) -> Result<Vec<Zone>, HeatGateError> {
            self.push("zones".into());
            Ok(vec![
                Zone::new(1, "LivingRoom"),
                Zone::new(2, "Kitchen"),
            ])
        }
        async fn get_window_state(&self, zone: ZoneId) -> Result<WindowState, HeatGateError> {
            self.push(format!("state:{zone}"));
            Ok(if self.open == Some(zone.get()) {
                WindowState::detected()
            } else {
                WindowState::closed()
            })
        }
        async fn set_open_window(&self, zone: ZoneId) -> Result<(), HeatGateError> {
            self.push(format!("open_window:{zone}"));
            Ok(())
        }
        async fn cancel_overlay(&self, zone: ZoneId) -> Result<(), HeatGateError> {
            self.push(format!("cancel_overlay:{zone}"));
            Ok(())
        }
    }

    struct StubConnector {
        calls: Calls,
        open: Option<u32>,
    }

    impl HeatingConnector for StubConnector {
        type Client = StubClient;

        fn has_stored_token(&self) -> bool {
            true
        }

        async fn connect(&self) -> Result<StubClient, HeatGateError> {
            self.calls.lock().unwrap().push("connect".into());
            Ok(StubClient {
                calls: Arc::clone(&self.calls),
                open: self.open,
            })
        }
    }

    #[derive(Clone)]
    struct NullLog;

    impl ActivityLog for NullLog {
        fn record(&self, _message: &str) {}
    }

    struct NoExit;

    impl Terminator for NoExit {
        fn terminate(&self, _code: i32) {}
    }

    fn app(open: Option<u32>) -> (Router, Calls) {
        let calls = Calls::default();
        let connector = StubConnector {
            calls: Arc::clone(&calls),
            open,
        };
        let state = AppState::new(
            ActivationService::new(connector, NullLog, NoExit),
            ZoneService::new(NullLog),
            ApiKey::new(SECRET),
        );
        (build(state), calls)
    }

    fn request(method: &str, uri: &str, key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_running_from_health_without_key() {
        let (app, _) = app(None);

        let resp = app.oneshot(request("GET", "/health", None)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!({"status": "running"}));
    }

    #[tokio::test]
    async fn should_return_running_from_health_with_wrong_key() {
        let (app, calls) = app(None);

        let resp = app
            .oneshot(request("GET", "/health", Some("nope")))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!({"status": "running"}));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_wrong_key_before_touching_vendor() {
        let (app, calls) = app(None);

        let resp = app
            .oneshot(request("PUT", "/heater/off?zone=Kitchen", Some("nope")))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(resp).await, serde_json::json!({"detail": "Forbidden"}));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_missing_key_on_zones() {
        let (app, calls) = app(None);

        let resp = app.oneshot(request("GET", "/zones", None)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_turn_off_named_zone_echoing_supplied_name() {
        let (app, calls) = app(None);

        let resp = app
            .oneshot(request("PUT", "/heater/off?zone=livingroom", Some(SECRET)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({"status": "ok", "action": "heater_off", "zone": "livingroom"})
        );
        assert!(calls.lock().unwrap().contains(&"open_window:1".to_string()));
    }

    #[tokio::test]
    async fn should_turn_off_first_open_window_zone_when_zone_omitted() {
        let (app, calls) = app(Some(2));

        let resp = app
            .oneshot(request("PUT", "/heater/off?zone=", Some(SECRET)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({"status": "ok", "action": "heater_off", "zone": "Kitchen"})
        );
        assert!(calls.lock().unwrap().contains(&"open_window:2".to_string()));
    }

    #[tokio::test]
    async fn should_return_404_when_no_window_is_open() {
        let (app, _) = app(None);

        let resp = app
            .oneshot(request("PUT", "/heater/off", Some(SECRET)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({"detail": "No zone with open window detected"})
        );
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_zone() {
        let (app, calls) = app(None);

        let resp = app
            .oneshot(request("PUT", "/heater/on?zone=Attic", Some(SECRET)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({"detail": "Zone 'Attic' not found"})
        );
        assert!(
            !calls
                .lock()
                .unwrap()
                .iter()
                .any(|call| call.starts_with("cancel_overlay"))
        );
    }

    #[tokio::test]
    async fn should_require_zone_for_heater_on_without_vendor_call() {
        let (app, calls) = app(None);

        let resp = app
            .oneshot(request("PUT", "/heater/on", Some(SECRET)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({"detail": "Query parameter 'zone' is required"})
        );
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_turn_on_named_zone() {
        let (app, calls) = app(None);

        let resp = app
            .oneshot(request("PUT", "/heater/on?zone=KITCHEN", Some(SECRET)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!({"status": "ok", "action": "heater_on", "zone": "KITCHEN"})
        );
        assert!(calls.lock().unwrap().contains(&"cancel_overlay:2".to_string()));
    }

    #[tokio::test]
    async fn should_list_zone_names_in_vendor_order() {
        let (app, _) = app(None);

        let resp = app.oneshot(request("GET", "/zones", Some(SECRET))).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            json_body(resp).await,
            serde_json::json!(["LivingRoom", "Kitchen"])
        );
    }
}
