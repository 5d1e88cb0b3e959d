use std::collections::BTreeSet;
use std::fmt;

use crate::config::UpdateMode;
use crate::error::Result;

/// Records present on only one side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDelta<R: Ord> {
    pub added: BTreeSet<R>,
    pub removed: BTreeSet<R>,
}

impl<R: Ord + Clone> CatalogDelta<R> {
    /// `added = fresh - existing`, `removed = existing - fresh`, by record identity.
    pub fn between(fresh: &[R], existing: &[R]) -> Self {
        let fresh: BTreeSet<&R> = fresh.iter().collect();
        let existing: BTreeSet<&R> = existing.iter().collect();
        Self {
            added: fresh.difference(&existing).map(|r| (*r).clone()).collect(),
            removed: existing.difference(&fresh).map(|r| (*r).clone()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl<R: Ord + fmt::Display> CatalogDelta<R> {
    pub fn summarize(&self, label: &str) -> ChangeSummary {
        ChangeSummary {
            label: label.to_string(),
            added: self.added.iter().map(ToString::to_string).collect(),
            removed: self.removed.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Human-readable, sorted view of a delta handed to a [`Confirm`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSummary {
    pub label: String,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} changed: +{}, -{}",
            self.label,
            self.added.len(),
            self.removed.len()
        )?;
        if !self.added.is_empty() {
            write!(f, "\n\nAdded:")?;
            for line in &self.added {
                write!(f, "\n  + {line}")?;
            }
        }
        if !self.removed.is_empty() {
            write!(f, "\n\nRemoved:")?;
            for line in &self.removed {
                write!(f, "\n  - {line}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

/// Asks whoever is driving the run whether a detected change may be written.
pub trait Confirm {
    fn confirm(&mut self, summary: &ChangeSummary) -> Result<Decision>;
}

impl<F> Confirm for F
where
    F: FnMut(&ChangeSummary) -> Decision,
{
    fn confirm(&mut self, summary: &ChangeSummary) -> Result<Decision> {
        Ok(self(summary))
    }
}

/// What reconciliation decided, before anything touches disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<R: Ord> {
    Unchanged,
    Commit(CatalogDelta<R>),
    Skip(CatalogDelta<R>),
}

/// What happened to a persisted table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Committed { added: usize, removed: usize },
    Skipped,
}

/// Compare `fresh` against `existing` and decide whether `fresh` should replace it.
///
/// No difference is always `Unchanged`. Any difference, including a first run
/// against an empty table, is committed under [`UpdateMode::All`] and put to
/// `confirm` under [`UpdateMode::Partial`].
pub fn reconcile<R>(
    label: &str,
    fresh: &[R],
    existing: &[R],
    mode: UpdateMode,
    confirm: &mut dyn Confirm,
) -> Result<Verdict<R>>
where
    R: Ord + Clone + fmt::Display,
{
    let delta = CatalogDelta::between(fresh, existing);
    if delta.is_empty() {
        return Ok(Verdict::Unchanged);
    }

    match mode {
        UpdateMode::All => Ok(Verdict::Commit(delta)),
        UpdateMode::Partial => match confirm.confirm(&delta.summarize(label))? {
            Decision::Approve => Ok(Verdict::Commit(delta)),
            Decision::Reject => Ok(Verdict::Skip(delta)),
        },
    }
}
