mod config;
mod host_bridge;
mod protocol;
mod session;
mod star_table;
mod status_files;
mod status_keywords;
mod status_manager;
mod text_template;

use std::thread;

use log::info;
use tokio::sync::broadcast;

use config::{default_config_path, load_or_create_config, Config};
use star_table::StarTable;
use status_files::{FileStatusSink, TemplateSource};
use status_manager::{StatusManager, StatusRenderer};

fn panic_payload_to_string(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "non-string panic payload".to_string()
}

fn load_config() -> Config {
    match default_config_path() {
        Some(config_file) => load_or_create_config(&config_file),
        None => {
            log::warn!("No config directory available. Using default config");
            Config::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Trace);
    clog.init();

    let config = load_config();
    log::set_max_level(config.logging.level.to_filter());

    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
    }));

    let files = &config.files;

    // Bus between the host bridge and the status manager
    let (bus_sender, _) = broadcast::channel(64);

    let renderer = StatusRenderer::new(
        TemplateSource::new(files.template_path()),
        StarTable::new(files.star_table_path()),
    );
    let sink = FileStatusSink::new(files.status_path());
    info!(
        "Status file: {}, template: {}, star table: {}",
        sink.path().display(),
        files.template_path().display(),
        files.star_table_path().display()
    );
    let status_manager_bus_receiver = bus_sender.subscribe();
    let status_manager_thread = thread::Builder::new()
        .name("status-manager".to_string())
        .spawn(move || {
            let mut status_manager =
                StatusManager::new(status_manager_bus_receiver, renderer, Box::new(sink));
            status_manager.run();
        })?;

    let stdin = std::io::stdin();
    host_bridge::forward_host_events(stdin.lock(), &bus_sender);
    drop(bus_sender);

    if let Err(payload) = status_manager_thread.join() {
        log::error!(
            "StatusManager thread terminated due to panic: {}",
            panic_payload_to_string(payload.as_ref())
        );
    }

    info!("Exiting");
    Ok(())
}
