//! Keep/drop decision for registry cleanup.
//!
//! Coarser than classification on purpose: an unconfigured package entry is
//! kept, only a script whose file is confirmed absent is dropped. Pure; the
//! caller owns read → backup → write sequencing.

use crate::domain::classify::PathProbe;
use crate::domain::path::normalize;
use crate::domain::registry::{EntryDescriptor, Launch, Registry};

/// Outcome of [`reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Registry with dropped entries removed, original order preserved.
    pub kept: Registry,
    /// Dropped entry names, in encounter order.
    pub removed: Vec<String>,
    /// Script entries whose probe errored; kept because absence is unconfirmed.
    pub unverified: Vec<String>,
}

impl Reconciliation {
    /// Whether applying this result would change the document.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Split the registry into kept and removed entries.
#[must_use]
pub fn reconcile(registry: &Registry, probe: &impl PathProbe) -> Reconciliation {
    let mut removed = Vec::new();
    let mut unverified = Vec::new();

    for entry in registry.entries() {
        match decide(entry, probe) {
            Decision::Keep => {}
            Decision::Drop => removed.push(entry.name.clone()),
            Decision::Unverified => unverified.push(entry.name.clone()),
        }
    }

    let kept = registry.retain(|e| !removed.contains(&e.name));
    Reconciliation {
        kept,
        removed,
        unverified,
    }
}

enum Decision {
    Keep,
    Drop,
    Unverified,
}

fn decide(entry: &EntryDescriptor, probe: &impl PathProbe) -> Decision {
    match &entry.launch {
        Launch::LocalScript { launch_path, .. } | Launch::InterpreterScript { launch_path, .. } => {
            match probe.exists(&normalize(launch_path)) {
                Ok(true) => Decision::Keep,
                Ok(false) => Decision::Drop,
                Err(_) => Decision::Unverified,
            }
        }
        Launch::Package { .. } | Launch::Unrecognized { .. } | Launch::Malformed { .. } => {
            Decision::Keep
        }
    }
}
