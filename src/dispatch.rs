use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;

use crate::{location::LocationInput, types::SessionId};

/// Signal sent to the worker notification service once a request is confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub session_id: SessionId,
    pub service_id: String,
    pub service_label: String,
    pub location_summary: String,
    pub location: LocationInput,
    pub requested_by: Option<String>,
    pub requested_at: DateTime<Utc>,
}

/// Receives confirmed requests. Implementations must not block.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, request: DispatchRequest);
}

/// Only records requests in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDispatcher;

impl Dispatcher for LogDispatcher {
    fn dispatch(&self, request: DispatchRequest) {
        log::info!(
            "User {} ({}) requested {} at {}",
            request.session_id,
            request.requested_by.as_deref().unwrap_or("unknown"),
            request.service_label,
            request.location_summary
        );
    }
}

impl Dispatcher for UnboundedSender<DispatchRequest> {
    fn dispatch(&self, request: DispatchRequest) {
        if let Err(err) = self.send(request) {
            log::warn!("Dispatch receiver is gone, dropping request for {}", err.0.session_id);
        }
    }
}
