//! In-memory port implementations shared by the service tests.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use heatgate_domain::activation::ActivationStatus;
use heatgate_domain::error::{FatalError, HeatGateError};
use heatgate_domain::zone::{WindowState, Zone, ZoneId};

use crate::ports::{ActivityLog, HeatingClient, HeatingConnector, Terminator};

pub(crate) fn vendor_error(message: &str) -> HeatGateError {
    HeatGateError::vendor(std::io::Error::other(message.to_string()))
}

pub(crate) fn permission_denied() -> HeatGateError {
    FatalError::PermissionDenied {
        path: "/tado_token/token".to_string(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    }
    .into()
}

#[derive(Default)]
pub(crate) struct RecordingLog {
    lines: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ActivityLog for RecordingLog {
    fn record(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub(crate) struct RecordingTerminator {
    codes: Mutex<Vec<i32>>,
}

impl RecordingTerminator {
    pub(crate) fn codes(&self) -> Vec<i32> {
        self.codes.lock().unwrap().clone()
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self, code: i32) {
        self.codes.lock().unwrap().push(code);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Activate,
    GetZones,
    WindowState(ZoneId),
    SetOpenWindow(ZoneId),
    CancelOverlay(ZoneId),
}

/// Holds `activate()` until the test releases it.
#[derive(Default)]
pub(crate) struct ActivationGate {
    pub(crate) entered: tokio::sync::Notify,
    pub(crate) release: tokio::sync::Notify,
}

/// Scripted vendor session.
///
/// Activation statuses are consumed front to back; the last one sticks.
/// A zone listed in `broken_windows` fails its window-state query, one listed
/// in `broken_overrides` fails its open-window override.
#[derive(Default)]
pub(crate) struct FakeClient {
    zones: Vec<Zone>,
    open_windows: HashSet<ZoneId>,
    broken_windows: HashSet<ZoneId>,
    broken_overrides: HashSet<ZoneId>,
    gate: Option<Arc<ActivationGate>>,
    statuses: Mutex<VecDeque<ActivationStatus>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeClient {
    pub(crate) fn with_zones(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            statuses: Mutex::new(VecDeque::from([ActivationStatus::Completed])),
            ..Self::default()
        }
    }

    pub(crate) fn with_statuses(statuses: &[ActivationStatus]) -> Self {
        Self {
            statuses: Mutex::new(statuses.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub(crate) fn open_window(mut self, id: u32) -> Self {
        self.open_windows.insert(ZoneId::new(id));
        self
    }

    pub(crate) fn broken_window(mut self, id: u32) -> Self {
        self.broken_windows.insert(ZoneId::new(id));
        self
    }

    pub(crate) fn broken_override(mut self, id: u32) -> Self {
        self.broken_overrides.insert(ZoneId::new(id));
        self
    }

    pub(crate) fn gated(mut self, gate: &Arc<ActivationGate>) -> Self {
        self.gate = Some(Arc::clone(gate));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change zone state on the vendor side.
    pub(crate) fn commands(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::SetOpenWindow(_) | Call::CancelOverlay(_)))
            .collect()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl HeatingClient for FakeClient {
    async fn activation_status(&self) -> Result<ActivationStatus, HeatGateError> {
        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.len() > 1 {
            statuses.pop_front()
        } else {
            statuses.front().copied()
        };
        Ok(status.unwrap_or(ActivationStatus::NotStarted))
    }

    async fn verification_url(&self) -> Result<String, HeatGateError> {
        Ok("https://login.example.com/device?user_code=ABC123".to_string())
    }

    async fn activate(&self) -> Result<(), HeatGateError> {
        self.push(Call::Activate);
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        Ok(())
    }

    async fn get_zones(&self) -> Result<Vec<Zone>, HeatGateError> {
        self.push(Call::GetZones);
        Ok(self.zones.clone())
    }

    async fn get_window_state(&self, zone: ZoneId) -> Result<WindowState, HeatGateError> {
        self.push(Call::WindowState(zone));
        if self.broken_windows.contains(&zone) {
            return Err(vendor_error("zone state unavailable"));
        }
        Ok(WindowState {
            open_window_detected: self.open_windows.contains(&zone),
        })
    }

    async fn set_open_window(&self, zone: ZoneId) -> Result<(), HeatGateError> {
        self.push(Call::SetOpenWindow(zone));
        if self.broken_overrides.contains(&zone) {
            return Err(vendor_error("override rejected"));
        }
        Ok(())
    }

    async fn cancel_overlay(&self, zone: ZoneId) -> Result<(), HeatGateError> {
        self.push(Call::CancelOverlay(zone));
        Ok(())
    }
}

/// What the next `connect()` call yields.
pub(crate) enum Connect {
    Client(FakeClient),
    Error(HeatGateError),
}

/// Scripted connector; once the script runs out every connect fails.
#[derive(Default)]
pub(crate) struct FakeConnector {
    script: Mutex<VecDeque<Connect>>,
    stored_token: bool,
    connects: AtomicUsize,
}

impl FakeConnector {
    pub(crate) fn new(script: Vec<Connect>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    pub(crate) fn with_stored_token(mut self) -> Self {
        self.stored_token = true;
        self
    }

    pub(crate) fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl HeatingConnector for FakeConnector {
    type Client = FakeClient;

    fn has_stored_token(&self) -> bool {
        self.stored_token
    }

    async fn connect(&self) -> Result<FakeClient, HeatGateError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Connect::Client(client)) => Ok(client),
            Some(Connect::Error(err)) => Err(err),
            None => Err(vendor_error("script exhausted")),
        }
    }
}

/// Zone list used across tests, in vendor order.
pub(crate) fn home() -> Vec<Zone> {
    vec![
        Zone::new(1, "LivingRoom"),
        Zone::new(2, "Kitchen"),
        Zone::new(3, "Bedroom"),
    ]
}

