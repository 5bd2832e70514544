use crate::{ListenerKind, ListenerState};

use std::net::SocketAddr;

/// Point-in-time view of a registered listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerSummary {
    pub name: String,
    pub kind: ListenerKind,
    pub state: ListenerState,
    pub local_addr: Option<SocketAddr>,
}
