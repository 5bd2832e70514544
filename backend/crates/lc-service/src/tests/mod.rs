
use crate::{ControlApiError, Result, ServiceControl, ServiceStatus};

use std::sync::Mutex;

use async_trait::async_trait;

/// In-memory service manager.
///
/// A start/stop request leaves the service `Unknown` for `settle_after`
/// status checks before it reaches the target state.
pub(crate) struct FakeService {
    state: Mutex<FakeState>,
}

#[derive(Default)]
pub(crate) struct Calls {
    pub queries: u32,
    pub starts: u32,
    pub stops: u32,
}

struct FakeState {
    status: ServiceStatus,
    pending: Option<ServiceStatus>,
    pending_checks: u32,
    settle_after: u32,
    never_settles: bool,
    fail_requests: bool,
    fail_queries: bool,
    calls: Calls,
}

impl FakeService {
    pub fn new(status: ServiceStatus) -> Self {
        Self {
            state: Mutex::new(FakeState {
                status,
                pending: None,
                pending_checks: 0,
                settle_after: 0,
                never_settles: false,
                fail_requests: false,
                fail_queries: false,
                calls: Calls::default(),
            }),
        }
    }

    pub fn settling_after(self, checks: u32) -> Self {
        self.state.lock().expect("lock").settle_after = checks;
        self
    }

    pub fn never_settling(self) -> Self {
        self.state.lock().expect("lock").never_settles = true;
        self
    }

    pub fn rejecting_requests(self) -> Self {
        self.state.lock().expect("lock").fail_requests = true;
        self
    }

    pub fn failing_queries(self) -> Self {
        self.state.lock().expect("lock").fail_queries = true;
        self
    }

    pub fn calls(&self) -> (u32, u32, u32) {
        let state = self.state.lock().expect("lock");
        (state.calls.queries, state.calls.starts, state.calls.stops)
    }

    fn request(&self, command: &str, target: ServiceStatus) -> Result<()> {
        let mut state = self.state.lock().expect("lock");
        if state.fail_requests {
            return Err(ControlApiError::command_failed(
                command,
                Some(1),
                "Job failed. See journal for details.",
            ));
        }
        if !state.never_settles {
            state.pending = Some(target);
            state.pending_checks = state.settle_after;
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceControl for FakeService {
    fn backend(&self) -> &'static str {
        "fake"
    }

    async fn query(&self, _service_name: &str) -> Result<ServiceStatus> {
        let mut state = self.state.lock().expect("lock");
        state.calls.queries += 1;

        if state.fail_queries {
            return Err(ControlApiError::command_failed(
                "systemctl is-active",
                Some(1),
                "Failed to connect to bus",
            ));
        }

        if let Some(target) = state.pending {
            if state.pending_checks == 0 {
                state.status = target;
                state.pending = None;
            } else {
                state.pending_checks -= 1;
                return Ok(ServiceStatus::Unknown);
            }
        }

        Ok(state.status)
    }

    async fn start(&self, service_name: &str) -> Result<()> {
        self.state.lock().expect("lock").calls.starts += 1;
        self.request(&format!("start {service_name}"), ServiceStatus::Running)
    }

    async fn stop(&self, service_name: &str) -> Result<()> {
        self.state.lock().expect("lock").calls.stops += 1;
        self.request(&format!("stop {service_name}"), ServiceStatus::Stopped)
    }
}
