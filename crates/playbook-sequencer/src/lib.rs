//! Playbook Sequencer
//!
//! Runs a list of playbooks, one at a time, through an external playbook
//! runner (`ansible-playbook` by default).
//!
//! This crate provides:
//! - Playbook list file loading with size and file-type guards
//! - Include/exclude/range selection of the playbooks to run
//! - A sequential runner that stops at the first failing playbook

pub mod config;
pub mod error;
pub mod playbook_list;
pub mod runner;
pub mod selector;

pub use config::SequencerConfig;
pub use error::SequencerError;
pub use playbook_list::PlaybookList;
pub use runner::{ExtraArgs, PlannedCommand, PlaybookRunner, RunState};
pub use selector::{select, Selection};
