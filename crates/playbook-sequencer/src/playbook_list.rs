//! Playbook list file loading.
//!
//! The list file is a YAML sequence of playbook identifiers:
//!
//! ```yaml
//! - playbooks/base.yml
//! - playbooks/db.yml
//! - playbooks/app.yml
//! ```

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::SequencerError;

/// Ordered playbook identifiers as loaded from the list file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybookList {
    playbooks: Vec<String>,
}

impl PlaybookList {
    pub fn new(playbooks: Vec<String>) -> Self {
        Self { playbooks }
    }

    /// Open, guard and decode a list file.
    ///
    /// The size check runs against file metadata, so an oversized file is
    /// rejected without being read.
    pub fn load(path: &Path, max_bytes: u64) -> Result<Self, SequencerError> {
        let mut file = File::open(path).map_err(|e| {
            SequencerError::Config(format!("failed opening playbook list file: {}", e))
        })?;

        let metadata = file.metadata().map_err(|e| {
            SequencerError::Config(format!("failed reading playbook list file metadata: {}", e))
        })?;

        if !metadata.is_file() {
            return Err(SequencerError::Config(
                "playbook list file provided is not a regular file".to_string(),
            ));
        }

        if metadata.len() > max_bytes {
            return Err(SequencerError::Config(format!(
                "file size exceeds maximum ({} bytes > {} bytes)",
                metadata.len(),
                max_bytes
            )));
        }

        let mut content = String::with_capacity(metadata.len() as usize);
        file.read_to_string(&mut content).map_err(|e| {
            SequencerError::Config(format!("failed reading playbook list file: {}", e))
        })?;

        let list = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), count = list.len(), "Loaded playbook list");
        Ok(list)
    }

    /// Decode YAML content.
    ///
    /// Entries keep their source text: `1.10` stays `1.10` and `True` stays
    /// `True`. A null entry becomes an empty identifier. Only the first
    /// document of a multi-document stream is read. Empty and `null`
    /// documents give an empty list.
    pub fn parse(content: &str) -> Result<Self, SequencerError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let Some(document) = serde_yaml::Deserializer::from_str(content).next() else {
            return Ok(Self::default());
        };
        let entries: Option<Vec<Option<String>>> = Option::deserialize(document)?;

        let playbooks = entries
            .unwrap_or_default()
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();

        Ok(Self { playbooks })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.playbooks
    }

    pub fn len(&self) -> usize {
        self.playbooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playbooks.is_empty()
    }
}
