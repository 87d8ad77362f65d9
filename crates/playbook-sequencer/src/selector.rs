//! Playbook selection: include, exclude and `--from`/`--to` range.
//!
//! Selection runs in a fixed order:
//!
//! 1. A non-empty include list *replaces* the loaded list. It does not
//!    intersect with it, so an included playbook missing from the list file
//!    is still run.
//! 2. Exclude removes every matching identifier, keeping the order of the
//!    rest. The result is the working list.
//! 3. `from` (inclusive) and `to` (exclusive) are looked up in the working
//!    list by first occurrence and slice it. A `from` past `to` selects
//!    nothing.
//!
//! Comma lists are split literally: no trimming, empty segments kept.

use crate::error::SequencerError;

/// Filter directives. Empty strings mean "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub include: String,
    pub exclude: String,
    pub from: String,
    pub to: String,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    pub fn with_exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = exclude.into();
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = to.into();
        self
    }

    /// Include/exclude filtering, before range slicing.
    pub fn working_list(&self, all_playbooks: &[String]) -> Vec<String> {
        let base: Vec<String> = if self.include.is_empty() {
            all_playbooks.to_vec()
        } else {
            split_list(&self.include)
        };

        if self.exclude.is_empty() {
            return base;
        }

        let excluded = split_list(&self.exclude);
        base.into_iter()
            .filter(|playbook| !excluded.contains(playbook))
            .collect()
    }

    /// Compute the execution plan.
    pub fn select(&self, all_playbooks: &[String]) -> Result<Vec<String>, SequencerError> {
        let working = self.working_list(all_playbooks);

        let from_index = if self.from.is_empty() {
            0
        } else {
            position(&working, &self.from).ok_or_else(|| SequencerError::NotFound {
                flag: "from",
                playbook: self.from.clone(),
            })?
        };

        let to_index = if self.to.is_empty() {
            working.len()
        } else {
            position(&working, &self.to).ok_or_else(|| SequencerError::NotFound {
                flag: "to",
                playbook: self.to.clone(),
            })?
        };

        if from_index > to_index {
            tracing::debug!(from_index, to_index, "Range bounds cross, nothing selected");
            return Ok(Vec::new());
        }

        Ok(working[from_index..to_index].to_vec())
    }
}

/// Free-function form of [`Selection::select`].
pub fn select(
    all_playbooks: &[String],
    include: &str,
    exclude: &str,
    from: &str,
    to: &str,
) -> Result<Vec<String>, SequencerError> {
    Selection::new()
        .with_include(include)
        .with_exclude(exclude)
        .with_from(from)
        .with_to(to)
        .select(all_playbooks)
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',').map(str::to_string).collect()
}

fn position(list: &[String], playbook: &str) -> Option<usize> {
    list.iter().position(|p| p == playbook)
}
