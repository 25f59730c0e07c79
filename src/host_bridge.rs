//! Reads host lifecycle events (one JSON object per line) and forwards them
//! to the bus.

use std::io::BufRead;

use log::{debug, info, warn};
use tokio::sync::broadcast::Sender;

use crate::protocol::{HostEvent, HostMessage, Message};

pub fn parse_host_event(line: &str) -> Result<Option<HostEvent>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<HostEvent>(trimmed)
        .map(Some)
        .map_err(|err| err.to_string())
}

/// Forwards events from `reader` until a quit event or end of input.
///
/// Always finishes by publishing [`HostMessage::Shutdown`].
pub fn forward_host_events<R: BufRead>(reader: R, bus_sender: &Sender<Message>) {
    info!("HostBridge: listening for host events");
    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("HostBridge: failed to read host input: {}", err);
                break;
            }
        };

        let event = match parse_host_event(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(err) => {
                warn!(
                    "HostBridge: skipping malformed event on line {}: {}",
                    index + 1,
                    err
                );
                continue;
            }
        };

        let message = HostMessage::from(event);
        if matches!(message, HostMessage::Shutdown) {
            break;
        }
        debug!("HostBridge: forwarding {:?}", message);
        let _ = bus_sender.send(Message::Host(message));
    }
    let _ = bus_sender.send(Message::Host(HostMessage::Shutdown));
}
