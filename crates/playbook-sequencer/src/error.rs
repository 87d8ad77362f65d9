//! Sequencer error types.

use thiserror::Error;

/// Exit code used for every failure that is not a child's own exit status.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Errors that end a sequencer run.
#[derive(Debug, Error)]
pub enum SequencerError {
    /// Missing flag, unreadable or oversized list file, malformed YAML.
    #[error("{0}")]
    Config(String),

    /// A `--from`/`--to` bound is not in the working list.
    #[error("cannot find playbook in --{flag} '{playbook}'")]
    NotFound { flag: &'static str, playbook: String },

    /// The runner could not be spawned or exited non-zero.
    #[error("error running playbook {playbook}: {message}")]
    Execution {
        playbook: String,
        code: i32,
        message: String,
    },
}

impl SequencerError {
    /// Process exit code this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            SequencerError::Execution { code, .. } => *code,
            SequencerError::Config(_) | SequencerError::NotFound { .. } => FAILURE_EXIT_CODE,
        }
    }
}

impl From<serde_yaml::Error> for SequencerError {
    fn from(e: serde_yaml::Error) -> Self {
        SequencerError::Config(format!("error unmarshalling yaml: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SequencerError::NotFound {
            flag: "from",
            playbook: "site.yml".to_string(),
        };
        assert_eq!(err.to_string(), "cannot find playbook in --from 'site.yml'");

        let err = SequencerError::Execution {
            playbook: "db.yml".to_string(),
            code: 4,
            message: "exit status: 4".to_string(),
        };
        assert_eq!(err.to_string(), "error running playbook db.yml: exit status: 4");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SequencerError::Config("bad".into()).exit_code(), 1);
        let err = SequencerError::NotFound {
            flag: "to",
            playbook: "x".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        let err = SequencerError::Execution {
            playbook: "p2".to_string(),
            code: 7,
            message: String::new(),
        };
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let err: SequencerError = yaml_err.into();
        assert!(matches!(
            err,
            SequencerError::Config(ref m) if m.starts_with("error unmarshalling yaml")
        ));
    }
}
