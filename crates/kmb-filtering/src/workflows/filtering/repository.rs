use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bureau::BureauDetailRow;
use super::codes;
use super::domain::{
    BpkbNameType, Cluster, CustomerSegment, CustomerStatus, Decision, EligibilityDecision,
    ProspectId,
};
use crate::workflows::elaborate::BureauResult;

/// Persistence-ready outcome of one filtering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteringRecord {
    pub prospect_id: ProspectId,
    pub branch_id: String,
    pub decision: EligibilityDecision,
    pub cluster: Option<Cluster>,
    pub bpkb_name_type: BpkbNameType,
    pub customer_status: CustomerStatus,
    pub customer_segment: CustomerSegment,
    pub is_blacklist: bool,
    pub total_baki_debet: f64,
    #[serde(default)]
    pub bureau_details: Vec<BureauDetailRow>,
    pub created_at: DateTime<Utc>,
}

impl FilteringRecord {
    pub fn next_process(&self) -> bool {
        self.decision.next_process
    }

    /// Bureau result the elaboration tables are keyed on. Runs without a scored
    /// report count as no-hit.
    pub fn bureau_result(&self) -> BureauResult {
        match self.decision.code.as_str() {
            codes::PBK_NO_HIT | codes::PBK_TIDAK_DITEMUKAN_NEW | codes::PBK_TIDAK_DITEMUKAN_AO_RO => {
                BureauResult::NoHit
            }
            _ => match self.decision.decision {
                Decision::Pass => BureauResult::Pass,
                Decision::Reject => BureauResult::Reject,
            },
        }
    }
}

/// Storage abstraction so the orchestrator can be exercised in isolation.
///
/// One record per prospect: `save` supersedes whatever an earlier run stored.
pub trait FilteringRepository: Send + Sync {
    fn save(&self, record: FilteringRecord) -> Result<FilteringRecord, RepositoryError>;
    fn fetch(&self, prospect_id: &ProspectId) -> Result<Option<FilteringRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store used by the command line and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFilteringRepository {
    records: Arc<Mutex<HashMap<ProspectId, FilteringRecord>>>,
}

impl InMemoryFilteringRepository {
    pub fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FilteringRepository for InMemoryFilteringRepository {
    fn save(&self, record: FilteringRecord) -> Result<FilteringRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        guard.insert(record.prospect_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, prospect_id: &ProspectId) -> Result<Option<FilteringRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(guard.get(prospect_id).cloned())
    }
}
