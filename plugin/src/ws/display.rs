use crate::ws::ConnectionEvent;

/// The two areas of the presentation surface the client writes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayRegion {
    ClientCount,
    Result,
}

impl DisplayRegion {
    /// Identifier of the region on the presentation surface.
    pub fn id(self) -> &'static str {
        match self {
            DisplayRegion::ClientCount => "client-count",
            DisplayRegion::Result => "result",
        }
    }
}

/// Something that can show text in a display region.
pub trait DisplaySurface {
    /// Replace the region's text with `text`.
    fn set_text(&mut self, region: DisplayRegion, text: &str);
}

/// React to one connection event.
///
/// Messages go verbatim into the region their kind maps to. Open, error
/// and close only produce log lines. Nothing here reconnects.
pub fn apply_event(event: &ConnectionEvent, surface: &mut impl DisplaySurface) {
    match event {
        ConnectionEvent::Open { protocol } => {
            log::info!(
                "WebSocket connection established (protocol: {})",
                protocol.as_deref().unwrap_or("none")
            );
        }
        ConnectionEvent::Message(message) => {
            log::debug!(
                "Writing to #{}: {}",
                message.region().id(),
                message.text()
            );
            surface.set_text(message.region(), message.text());
        }
        ConnectionEvent::Error(e) => {
            log::warn!("WebSocket error: {}", e);
        }
        ConnectionEvent::Closed { code, reason } => {
            // Reconnection is not implemented.
            log::info!("WebSocket connection closed ({} {})", code, reason);
        }
    }
}
