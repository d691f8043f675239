//! Folding per-entry verdicts into a [`Report`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mcpdoc_common::{HealthState, Report};
use serde::Serialize;

use crate::domain::classify::HealthVerdict;

/// A verdict paired with the entry it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryVerdict {
    pub name: String,
    #[serde(flatten)]
    pub verdict: HealthVerdict,
}

/// Build a report from verdicts given in registry order.
///
/// Every [`HealthState`] appears in the summary, zero when unseen. Issues and
/// recommendations are prefixed with the entry name and keep per-entry order.
#[must_use]
pub fn aggregate(verdicts: &[EntryVerdict], generated_at: DateTime<Utc>) -> Report {
    let mut summary: BTreeMap<HealthState, usize> =
        HealthState::ALL.into_iter().map(|s| (s, 0)).collect();
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    for EntryVerdict { name, verdict } in verdicts {
        *summary.entry(verdict.state).or_default() += 1;
        issues.extend(verdict.issues.iter().map(|i| format!("{name}: {i}")));
        recommendations.extend(
            verdict
                .recommendations
                .iter()
                .map(|r| format!("{name}: {r}")),
        );
    }

    Report {
        timestamp: generated_at,
        total: verdicts.len(),
        summary,
        issues,
        recommendations,
        launchers: Vec::new(),
    }
}
