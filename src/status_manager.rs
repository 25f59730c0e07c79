//! Status-file writer driven by host lifecycle events.
//!
//! The manager owns every collaborator a render needs (template source, star
//! table, output sink) and reacts to bus messages: a game scene renders the
//! status, a menu scene or shutdown clears it.

use log::{debug, error, info, warn};
use tokio::sync::broadcast::{error::RecvError, Receiver};

use crate::{
    protocol::{HostMessage, Message},
    session::GameplaySession,
    star_table::StarTable,
    status_files::{StatusSink, TemplateSource},
    status_keywords::render_status,
};

/// Renders status text for a session.
pub struct StatusRenderer {
    template_source: TemplateSource,
    star_table: StarTable,
}

impl StatusRenderer {
    pub fn new(template_source: TemplateSource, star_table: StarTable) -> Self {
        Self {
            template_source,
            star_table,
        }
    }

    pub fn render(&self, session: &GameplaySession) -> String {
        let template = self.template_source.load();
        render_status(session, &template, &self.star_table)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

pub struct StatusManager {
    bus_consumer: Receiver<Message>,
    renderer: StatusRenderer,
    sink: Box<dyn StatusSink>,
}

impl StatusManager {
    pub fn new(
        bus_consumer: Receiver<Message>,
        renderer: StatusRenderer,
        sink: Box<dyn StatusSink>,
    ) -> Self {
        Self {
            bus_consumer,
            renderer,
            sink,
        }
    }

    fn publish_session(&mut self, session: &GameplaySession) {
        info!(
            "StatusManager: level_id={} song_name={}",
            session.level.level_id, session.level.song_name
        );
        let status = self.renderer.render(session);
        debug!("StatusManager: rendered status:\n{}", status);
        if let Err(err) = self.sink.write_status(&status) {
            error!("StatusManager: failed to write status: {}", err);
        }
    }

    fn clear(&mut self) {
        if let Err(err) = self.sink.clear_status() {
            error!("StatusManager: failed to clear status: {}", err);
        }
    }

    fn handle_message(&mut self, message: Message) -> Flow {
        match message {
            Message::Host(HostMessage::GameSceneActive(session)) => {
                self.publish_session(&session);
                Flow::Continue
            }
            Message::Host(HostMessage::MenuSceneActive) => {
                debug!("StatusManager: menu scene active, clearing status");
                self.clear();
                Flow::Continue
            }
            Message::Host(HostMessage::Shutdown) => {
                self.clear();
                Flow::Stop
            }
        }
    }

    /// Starts the blocking manager loop.
    pub fn run(&mut self) {
        info!("StatusManager: started");
        loop {
            match self.bus_consumer.blocking_recv() {
                Ok(message) => {
                    if self.handle_message(message) == Flow::Stop {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("StatusManager: bus lagged by {} messages", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
        info!("StatusManager: stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::{StatusManager, StatusRenderer};
    use crate::{
        protocol::{HostMessage, Message},
        session::{GameplaySession, LevelInfo},
        star_table::StarTable,
        status_files::{StatusSink, TemplateSource},
    };
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};
    use std::time::{SystemTime, UNIX_EPOCH};
    use tokio::sync::broadcast;

    #[derive(Clone, Default)]
    struct RecordingSink {
        writes: Arc<Mutex<Vec<String>>>,
    }

    impl StatusSink for RecordingSink {
        fn write_status(&mut self, text: &str) -> std::io::Result<()> {
            self.writes
                .lock()
                .expect("writes lock poisoned")
                .push(text.to_string());
            Ok(())
        }
    }

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("songstatus_{name}_{nonce}"))
    }

    fn renderer_with_template(dir: &Path, template: &str) -> StatusRenderer {
        std::fs::create_dir_all(dir).expect("failed to create temp dir");
        let template_path = dir.join("songStatusTemplate.txt");
        std::fs::write(&template_path, template).expect("failed to write template");
        StatusRenderer::new(
            TemplateSource::new(template_path),
            StarTable::new(dir.join("star.csv")),
        )
    }

    fn session(song_name: &str) -> GameplaySession {
        GameplaySession {
            level: LevelInfo {
                level_id: "custom_level_abc123".to_string(),
                song_name: song_name.to_string(),
                ..LevelInfo::default()
            },
            ..GameplaySession::default()
        }
    }

    #[test]
    fn test_manager_renders_then_clears_until_shutdown() {
        let dir = unique_temp_dir("manager");
        let sink = RecordingSink::default();
        let writes = Arc::clone(&sink.writes);
        let (bus_sender, bus_receiver) = broadcast::channel(16);
        let mut manager = StatusManager::new(
            bus_receiver,
            renderer_with_template(&dir, "Playing: {songName} {[isNoFail]}"),
            Box::new(sink),
        );

        for message in [
            HostMessage::GameSceneActive(Box::new(session("First"))),
            HostMessage::MenuSceneActive,
            HostMessage::GameSceneActive(Box::new(session("Second"))),
            HostMessage::Shutdown,
            HostMessage::GameSceneActive(Box::new(session("Ignored"))),
        ] {
            bus_sender
                .send(Message::Host(message))
                .expect("bus should have a receiver");
        }
        manager.run();

        let writes = writes.lock().expect("writes lock poisoned").clone();
        assert_eq!(
            writes,
            vec![
                "Playing: First ".to_string(),
                String::new(),
                "Playing: Second ".to_string(),
                String::new(),
            ]
        );

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_manager_stops_when_bus_closes() {
        let dir = unique_temp_dir("manager_closed");
        let sink = RecordingSink::default();
        let writes = Arc::clone(&sink.writes);
        let (bus_sender, bus_receiver) = broadcast::channel(4);
        let mut manager = StatusManager::new(
            bus_receiver,
            renderer_with_template(&dir, "{songName}"),
            Box::new(sink),
        );

        bus_sender
            .send(Message::Host(HostMessage::GameSceneActive(Box::new(
                session("Only"),
            ))))
            .expect("bus should have a receiver");
        drop(bus_sender);
        manager.run();

        assert_eq!(
            *writes.lock().expect("writes lock poisoned"),
            vec!["Only".to_string()]
        );

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_renderer_reads_template_each_time() {
        let dir = unique_temp_dir("renderer_reload");
        let renderer = renderer_with_template(&dir, "A {songName}");
        assert_eq!(renderer.render(&session("x")), "A x");

        std::fs::write(dir.join("songStatusTemplate.txt"), "B {songName}")
            .expect("failed to rewrite template");
        assert_eq!(renderer.render(&session("x")), "B x");

        let _ = std::fs::remove_dir_all(dir);
    }
}
