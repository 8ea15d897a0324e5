//! Status transition policy.
//!
//! The allowed status graph is data, supplied at startup, so new edges (for
//! example a `failed -> sent` retry) only need a configuration change.

use std::collections::{HashMap, HashSet};

use super::MessageStatus;
use crate::domain::error::DomainError;

/// Immutable mapping from a status to the statuses reachable from it.
///
/// A status with no outgoing edges is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRules {
    edges: HashMap<MessageStatus, HashSet<MessageStatus>>,
}

impl TransitionRules {
    /// Build rules from `(from, [to, ...])` pairs. Repeated `from` keys merge.
    pub fn new<I, T>(edges: I) -> Self
    where
        I: IntoIterator<Item = (MessageStatus, T)>,
        T: IntoIterator<Item = MessageStatus>,
    {
        let mut map: HashMap<MessageStatus, HashSet<MessageStatus>> = HashMap::new();
        for (from, targets) in edges {
            map.entry(from).or_default().extend(targets);
        }
        Self { edges: map }
    }

    /// True iff `target` is reachable from `current` in one step.
    ///
    /// A status without configured edges yields `false`, never an error.
    pub fn can_transition(&self, current: MessageStatus, target: MessageStatus) -> bool {
        self.edges
            .get(&current)
            .is_some_and(|targets| targets.contains(&target))
    }

    /// Parse rules from their configuration form (`{"sent": ["delivered", ...]}`).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` for any name outside the status set.
    pub fn from_names(names: &HashMap<String, Vec<String>>) -> Result<Self, DomainError> {
        let mut edges = Vec::with_capacity(names.len());
        for (from, targets) in names {
            let from: MessageStatus = from.parse()?;
            let targets = targets
                .iter()
                .map(|target| target.parse::<MessageStatus>())
                .collect::<Result<Vec<_>, _>>()?;
            edges.push((from, targets));
        }
        Ok(Self::new(edges))
    }

    /// Configuration form of these rules.
    pub fn to_names(&self) -> HashMap<String, Vec<String>> {
        self.edges
            .iter()
            .map(|(from, targets)| {
                let mut targets: Vec<String> =
                    targets.iter().map(|t| t.as_str().to_string()).collect();
                targets.sort();
                (from.as_str().to_string(), targets)
            })
            .collect()
    }
}

impl Default for TransitionRules {
    /// ```text
    /// sent      -> delivered, failed
    /// delivered -> read
    /// read      -> (terminal)
    /// failed    -> (terminal)
    /// ```
    fn default() -> Self {
        use MessageStatus::*;

        Self::new([(Sent, vec![Delivered, Failed]), (Delivered, vec![Read])])
    }
}
