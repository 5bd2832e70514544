#![allow(dead_code)]

use lc_service::{ControlApiError, Result, ServiceControl, ServiceStatus};

use std::sync::Mutex;

use async_trait::async_trait;

/// Service manager whose requests take effect immediately
pub struct InstantService {
    status: Mutex<ServiceStatus>,
    reject: bool,
}

impl InstantService {
    pub fn new(status: ServiceStatus) -> Self {
        Self {
            status: Mutex::new(status),
            reject: false,
        }
    }

    pub fn rejecting(status: ServiceStatus) -> Self {
        Self {
            status: Mutex::new(status),
            reject: true,
        }
    }

    fn set(&self, command: &str, status: ServiceStatus) -> Result<()> {
        if self.reject {
            return Err(ControlApiError::command_failed(command, Some(5), "Unit not found."));
        }
        *self.status.lock().expect("lock") = status;
        Ok(())
    }
}

#[async_trait]
impl ServiceControl for InstantService {
    fn backend(&self) -> &'static str {
        "instant"
    }

    async fn query(&self, _service_name: &str) -> Result<ServiceStatus> {
        Ok(*self.status.lock().expect("lock"))
    }

    async fn start(&self, service_name: &str) -> Result<()> {
        self.set(&format!("start {service_name}"), ServiceStatus::Running)
    }

    async fn stop(&self, service_name: &str) -> Result<()> {
        self.set(&format!("stop {service_name}"), ServiceStatus::Stopped)
    }
}
