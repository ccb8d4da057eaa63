use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::export::Artifact;
use crate::foundation::error::{MenuQrError, MenuQrResult};

/// Destination for exported artifacts; the "download" step of an export.
pub trait ArtifactSink {
    /// Deliver one artifact and report where it ended up.
    fn write(&mut self, artifact: &Artifact) -> MenuQrResult<PathBuf>;
}

/// Writes artifacts into a directory under their export file name.
///
/// Bytes are staged in a temporary file next to the destination and atomically moved into
/// place; the staging file is removed on every failure path.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectorySink {
    /// Sink into `dir`, replacing existing files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: true,
        }
    }

    /// Refuse to replace files that already exist.
    pub fn no_overwrite(mut self) -> Self {
        self.overwrite = false;
        self
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, artifact: &Artifact) -> MenuQrResult<PathBuf> {
        if artifact.bytes.is_empty() {
            return Err(MenuQrError::not_ready(format!(
                "refusing to write empty artifact '{}'",
                artifact.filename
            )));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;

        let target = self.dir.join(&artifact.filename);
        if !self.overwrite && target.exists() {
            return Err(MenuQrError::validation(format!(
                "'{}' already exists",
                target.display()
            )));
        }

        let mut staged = tempfile::Builder::new()
            .prefix(".menuqr-")
            .suffix(".partial")
            .tempfile_in(&self.dir)
            .with_context(|| format!("stage artifact in '{}'", self.dir.display()))?;
        staged
            .write_all(&artifact.bytes)
            .and_then(|()| staged.flush())
            .with_context(|| format!("write artifact '{}'", artifact.filename))?;
        staged
            .persist(&target)
            .map_err(|e| e.error)
            .with_context(|| format!("move artifact into '{}'", target.display()))?;

        tracing::info!(path = %target.display(), bytes = artifact.bytes.len(), "wrote artifact");
        Ok(target)
    }
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    artifacts: Vec<Artifact>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifacts in write order.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }
}

impl ArtifactSink for InMemorySink {
    fn write(&mut self, artifact: &Artifact) -> MenuQrResult<PathBuf> {
        self.artifacts.push(artifact.clone());
        Ok(PathBuf::from(&artifact.filename))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
