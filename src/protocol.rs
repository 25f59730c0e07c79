//! Event-bus protocol shared by the host bridge and the status manager.

use crate::session::GameplaySession;

/// Top-level envelope for all bus traffic.
#[derive(Debug, Clone)]
pub enum Message {
    Host(HostMessage),
}

/// Host lifecycle notifications.
#[derive(Debug, Clone)]
pub enum HostMessage {
    /// A level started; the status should show it.
    GameSceneActive(Box<GameplaySession>),
    /// The player is back in the menu; the status should be empty.
    MenuSceneActive,
    /// The host is exiting.
    Shutdown,
}

/// Wire form of one host event, one JSON object per line.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    GameSceneActive { session: Box<GameplaySession> },
    MenuSceneActive,
    Quit,
}

impl From<HostEvent> for HostMessage {
    fn from(event: HostEvent) -> Self {
        match event {
            HostEvent::GameSceneActive { session } => Self::GameSceneActive(session),
            HostEvent::MenuSceneActive => Self::MenuSceneActive,
            HostEvent::Quit => Self::Shutdown,
        }
    }
}
