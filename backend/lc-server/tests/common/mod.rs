#![allow(dead_code)]

use lc_config::Config;
use lc_core::ErrorReporter;
use lc_service::{ControlApiError, Result, ServiceControl, ServiceStatus};

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

pub fn reporter() -> Arc<ErrorReporter> {
    Arc::new(ErrorReporter::new("lc-server-it"))
}

/// Plain http on an OS-assigned loopback port, no retries
pub fn plain_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.server.drain_grace_secs = 1;
    config.retry.retries = 0;
    config
}

/// Records every request; requests take effect immediately
pub struct RecordingService {
    status: Mutex<ServiceStatus>,
    log: Mutex<Vec<String>>,
    reject: bool,
}

impl RecordingService {
    pub fn new(status: ServiceStatus) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
            log: Mutex::new(Vec::new()),
            reject: false,
        })
    }

    pub fn rejecting(status: ServiceStatus) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
            log: Mutex::new(Vec::new()),
            reject: true,
        })
    }

    pub fn requests(&self) -> Vec<String> {
        self.log.lock().expect("lock").clone()
    }

    fn request(&self, verb: &str, service_name: &str, status: ServiceStatus) -> Result<()> {
        self.log
            .lock()
            .expect("lock")
            .push(format!("{verb} {service_name}"));
        if self.reject {
            return Err(ControlApiError::command_failed(verb, Some(1), "denied"));
        }
        *self.status.lock().expect("lock") = status;
        Ok(())
    }
}

#[async_trait]
impl ServiceControl for RecordingService {
    fn backend(&self) -> &'static str {
        "recording"
    }

    async fn query(&self, _service_name: &str) -> Result<ServiceStatus> {
        Ok(*self.status.lock().expect("lock"))
    }

    async fn start(&self, service_name: &str) -> Result<()> {
        self.request("start", service_name, ServiceStatus::Running)
    }

    async fn stop(&self, service_name: &str) -> Result<()> {
        self.request("stop", service_name, ServiceStatus::Stopped)
    }
}
