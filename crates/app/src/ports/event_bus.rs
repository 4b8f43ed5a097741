//! Event publishing port.

use std::future::Future;

use lumen_domain::error::LumenError;
use lumen_domain::event::Event;

/// Outbound port for broadcasting domain events.
pub trait EventPublisher {
    /// Publish an event. Implementations must succeed even with no
    /// subscribers listening.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), LumenError>> + Send;
}
