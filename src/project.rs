//! Project files on disk
//!
//! A project is a plain UTF-8 text file. Snapshots (text, mode, revision) are
//! kept next to it as JSON in `<file>.snapshot.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::EngineConfig;
use crate::engine::{DocumentEngine, Snapshot};
use crate::text::RawText;

#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    /// Revision last written to disk
    saved_revision: u64,
}

impl ProjectFile {
    /// Open `path`, or start an empty document if it does not exist yet
    pub fn open(path: impl Into<PathBuf>, config: &EngineConfig) -> Result<(Self, DocumentEngine)> {
        let path = path.into();
        let text = if path.exists() {
            let bytes =
                fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            RawText::Utf8(bytes)
                .decode()
                .with_context(|| format!("{} is not valid UTF-8 text", path.display()))?
        } else {
            tracing::debug!("{} does not exist, starting empty", path.display());
            String::new()
        };

        let engine = DocumentEngine::with_config(&text, config);
        tracing::info!(
            "Opened {} ({} chars, mode {})",
            path.display(),
            engine.len(),
            engine.get_mode()
        );
        let project = Self {
            path,
            saved_revision: engine.get_revision(),
        };
        Ok((project, engine))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".snapshot.json");
        self.path.with_file_name(name)
    }

    /// Whether the text on disk matches the document
    pub fn is_pristine(&self, engine: &DocumentEngine) -> bool {
        engine.get_revision() == self.saved_revision
    }

    /// Write the current text
    pub fn save(&mut self, engine: &DocumentEngine) -> Result<()> {
        let snapshot = engine.snapshot();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, snapshot.text.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        self.saved_revision = snapshot.revision;
        tracing::info!("Saved {} at revision {}", self.path.display(), snapshot.revision);
        Ok(())
    }

    /// Write the snapshot sidecar, returning its path
    pub fn save_snapshot(&self, engine: &DocumentEngine) -> Result<PathBuf> {
        let path = self.snapshot_path();
        write_snapshot(&path, &engine.snapshot())?;
        Ok(path)
    }

    /// Restore the document from the snapshot sidecar
    pub fn load_snapshot(&self, engine: &DocumentEngine) -> Result<()> {
        let snapshot = read_snapshot(&self.snapshot_path())?;
        engine.restore(snapshot)?;
        Ok(())
    }

    /// Persist a final snapshot and release the project. Works on a halted
    /// document too, since snapshots only read.
    pub fn close(self, engine: DocumentEngine) -> Result<PathBuf> {
        let path = self.save_snapshot(&engine)?;
        tracing::info!(
            "Closed {} at revision {}",
            self.path.display(),
            engine.get_revision()
        );
        Ok(path)
    }
}

pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = snapshot.to_json()?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote snapshot to {}", path.display());
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let snapshot = Snapshot::from_json_bytes(&bytes)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
    Ok(snapshot)
}
