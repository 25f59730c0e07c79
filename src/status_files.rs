//! Template source and status output files.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::text_template::default_status_template;

/// Loads the user-editable template, creating it from the default when missing.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    path: PathBuf,
}

impl TemplateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Current template text. Read fresh on every render so edits made
    /// between songs are picked up.
    pub fn load(&self) -> String {
        match std::fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let template = default_status_template();
                info!(
                    "Template file not found. Creating default template. path={}",
                    self.path.display()
                );
                if let Err(err) = write_creating_parent(&self.path, &template) {
                    warn!(
                        "Failed to write default template to {}: {}",
                        self.path.display(),
                        err
                    );
                }
                template
            }
            Err(err) => {
                warn!(
                    "Failed to read template {}: {}. Using default template",
                    self.path.display(),
                    err
                );
                default_status_template()
            }
        }
    }
}

/// Destination for rendered status text.
pub trait StatusSink: Send {
    /// Replaces the whole status with `text`.
    fn write_status(&mut self, text: &str) -> std::io::Result<()>;

    fn clear_status(&mut self) -> std::io::Result<()> {
        self.write_status("")
    }
}

/// Status file that is fully replaced on every write.
///
/// Text goes to a sibling `.tmp` file first and is then renamed over the
/// status file, so readers never see a truncated status.
#[derive(Debug, Clone)]
pub struct FileStatusSink {
    path: PathBuf,
}

impl FileStatusSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

impl StatusSink for FileStatusSink {
    fn write_status(&mut self, text: &str) -> std::io::Result<()> {
        let staging_path = self.staging_path();
        write_creating_parent(&staging_path, text)?;
        if let Err(err) = std::fs::rename(&staging_path, &self.path) {
            let _ = std::fs::remove_file(&staging_path);
            return Err(err);
        }
        Ok(())
    }
}

fn write_creating_parent(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)
}
