//! Sequencer configuration.

use anyhow::{Context, Result};

/// Runner program used when nothing else is configured.
pub const DEFAULT_RUNNER: &str = "ansible-playbook";

/// Largest playbook list file accepted (1 MiB).
pub const MAX_LIST_FILE_BYTES: u64 = 1 << 20;

/// Sequencer configuration.
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Executable invoked once per selected playbook.
    pub runner_program: String,

    /// Size cap for the playbook list file. Never above 1 MiB.
    pub max_list_bytes: u64,
}

impl SequencerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let runner_program = std::env::var("PLAYBOOK_RUNNER")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RUNNER.to_string());

        let max_list_bytes =
            parse_max_list_bytes(std::env::var("PLAYBOOK_LIST_MAX_BYTES").ok().as_deref())?;

        Ok(Self {
            runner_program,
            max_list_bytes,
        })
    }

    /// Override the runner program, e.g. from `--runner`.
    pub fn with_runner(mut self, runner: Option<String>) -> Self {
        if let Some(runner) = runner {
            self.runner_program = runner;
        }
        self
    }
}

/// `PLAYBOOK_LIST_MAX_BYTES` may only lower the 1 MiB cap.
fn parse_max_list_bytes(value: Option<&str>) -> Result<u64> {
    let Some(value) = value.filter(|s| !s.is_empty()) else {
        return Ok(MAX_LIST_FILE_BYTES);
    };

    let bytes: u64 = value
        .parse()
        .with_context(|| format!("Invalid PLAYBOOK_LIST_MAX_BYTES: {:?}", value))?;

    if bytes == 0 || bytes > MAX_LIST_FILE_BYTES {
        anyhow::bail!(
            "PLAYBOOK_LIST_MAX_BYTES must be between 1 and {}, got {}",
            MAX_LIST_FILE_BYTES,
            bytes
        );
    }

    Ok(bytes)
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            runner_program: DEFAULT_RUNNER.to_string(),
            max_list_bytes: MAX_LIST_FILE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SequencerConfig::default();
        assert_eq!(config.runner_program, "ansible-playbook");
        assert_eq!(config.max_list_bytes, 1_048_576);
    }

    #[test]
    fn test_runner_override() {
        let config = SequencerConfig::default().with_runner(Some("echo".to_string()));
        assert_eq!(config.runner_program, "echo");

        let config = SequencerConfig::default().with_runner(None);
        assert_eq!(config.runner_program, DEFAULT_RUNNER);
    }

    #[test]
    fn test_max_list_bytes() {
        assert_eq!(parse_max_list_bytes(None).unwrap(), MAX_LIST_FILE_BYTES);
        assert_eq!(parse_max_list_bytes(Some("")).unwrap(), MAX_LIST_FILE_BYTES);
        assert_eq!(parse_max_list_bytes(Some("4096")).unwrap(), 4096);
        assert_eq!(parse_max_list_bytes(Some("1048576")).unwrap(), MAX_LIST_FILE_BYTES);

        let err = parse_max_list_bytes(Some("1MiB")).unwrap_err();
        assert!(err.to_string().starts_with("Invalid PLAYBOOK_LIST_MAX_BYTES"));
        assert!(parse_max_list_bytes(Some("0")).is_err());
        assert!(parse_max_list_bytes(Some("1048577")).is_err());
    }
}
