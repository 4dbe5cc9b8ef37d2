// crates/air-registry/src/registry.rs

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use air_core::{AccountId, AirError};

/// A registered content report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Content identifier of the reported material (e.g., an IPFS CID).
    pub cid: String,
    /// Account that submitted the report.
    pub submitter: AccountId,
    /// Timestamp when the report was registered.
    pub registered_at: DateTime<Utc>,
}

/// Append-only report log with duplicate rejection.
///
/// Registration is open to any account; the owner is recorded for
/// administrative surfaces outside this crate's scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRegistry {
    owner: AccountId,
    reports: Vec<Report>,
    seen_cids: HashSet<String>,
}

impl ReportRegistry {
    /// Create an empty registry with the given owner.
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            reports: Vec::new(),
            seen_cids: HashSet::new(),
        }
    }

    /// Register a content report.
    ///
    /// # Errors
    /// Returns `AirError::DuplicateCid` if the cid was ever registered
    /// before; the log and count are unchanged.
    pub fn register_report(&mut self, submitter: &AccountId, cid: &str) -> Result<(), AirError> {
        if self.seen_cids.contains(cid) {
            return Err(AirError::DuplicateCid(cid.to_string()));
        }
        self.seen_cids.insert(cid.to_string());
        self.reports.push(Report {
            cid: cid.to_string(),
            submitter: *submitter,
            registered_at: Utc::now(),
        });
        Ok(())
    }

    /// Number of registered reports.
    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    /// Whether a cid has been registered.
    pub fn contains(&self, cid: &str) -> bool {
        self.seen_cids.contains(cid)
    }

    /// All registered reports, in registration order.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }
}
