use serde::{Deserialize, Serialize};

use super::codes;
use super::domain::{CustomerStatus, Decision, DupcheckResult, Party};
use crate::workflows::policy::PolicyThresholds;

const BAD_TYPE_BLACKLIST: &str = "B";

/// Result of screening one party against the dupcheck answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistVerdict {
    pub party: Party,
    pub code: String,
    pub decision: Decision,
    pub reason: String,
    pub status_konsumen: CustomerStatus,
}

impl BlacklistVerdict {
    pub fn is_rejected(&self) -> bool {
        self.decision == Decision::Reject
    }
}

/// Which blacklist rule fired, independent of the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlacklistHit {
    BadType,
    Overdue,
    AssetInventory,
    Restructure,
    Clean,
}

/// Fixed-priority rule evaluation, first match wins.
pub(crate) fn classify(result: &DupcheckResult, max_overdue_days: i64) -> BlacklistHit {
    let bad_type = result
        .bad_type
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if bad_type.eq_ignore_ascii_case(BAD_TYPE_BLACKLIST) {
        BlacklistHit::BadType
    } else if result.max_overdue_days > max_overdue_days {
        BlacklistHit::Overdue
    } else if result.num_of_asset_inventoried > 0 {
        BlacklistHit::AssetInventory
    } else if result.is_restructure {
        BlacklistHit::Restructure
    } else {
        BlacklistHit::Clean
    }
}

/// Screens the applicant (index 0) and spouse (index 1) dupcheck answers.
#[derive(Debug, Clone)]
pub struct BlacklistChecker {
    max_overdue_days: i64,
}

impl Default for BlacklistChecker {
    fn default() -> Self {
        Self::new(PolicyThresholds::default().blacklist_max_overdue_days)
    }
}

impl BlacklistChecker {
    pub fn new(max_overdue_days: i64) -> Self {
        Self { max_overdue_days }
    }

    pub fn evaluate(&self, party_index: usize, result: &DupcheckResult) -> BlacklistVerdict {
        let status = if result.is_empty() {
            CustomerStatus::New
        } else {
            CustomerStatus::parse(result.customer_status.as_deref())
        };
        let hit = classify(result, self.max_overdue_days);

        match Party::from_index(party_index) {
            Party::Customer => konsumen_verdict(hit, status, self.max_overdue_days),
            Party::Spouse => pasangan_verdict(hit, status, self.max_overdue_days),
        }
    }
}

fn konsumen_verdict(hit: BlacklistHit, status: CustomerStatus, limit: i64) -> BlacklistVerdict {
    let (code, decision, reason) = match hit {
        BlacklistHit::BadType => (
            codes::KONSUMEN_BLACKLIST,
            Decision::Reject,
            "Konsumen Terdaftar Blacklist".to_string(),
        ),
        BlacklistHit::Overdue => (
            codes::KONSUMEN_OVD_90,
            Decision::Reject,
            format!("Konsumen Ada Overdue > {limit} Hari"),
        ),
        BlacklistHit::AssetInventory => (
            codes::KONSUMEN_ASSET_INVENTORY,
            Decision::Reject,
            "Konsumen Ada Aset Inventori".to_string(),
        ),
        BlacklistHit::Restructure => (
            codes::KONSUMEN_RESTRUCTURE,
            Decision::Reject,
            "Konsumen Ada Fasilitas Restrukturisasi".to_string(),
        ),
        BlacklistHit::Clean => (
            codes::KONSUMEN_NON_BLACKLIST,
            Decision::Pass,
            "Konsumen Non Blacklist".to_string(),
        ),
    };

    BlacklistVerdict {
        party: Party::Customer,
        code: code.to_string(),
        decision,
        reason,
        status_konsumen: status,
    }
}

fn pasangan_verdict(hit: BlacklistHit, status: CustomerStatus, limit: i64) -> BlacklistVerdict {
    let (code, decision, reason) = match hit {
        BlacklistHit::BadType => (
            codes::PASANGAN_BLACKLIST,
            Decision::Reject,
            "Pasangan Terdaftar Blacklist".to_string(),
        ),
        BlacklistHit::Overdue => (
            codes::PASANGAN_OVD_90,
            Decision::Reject,
            format!("Pasangan Ada Overdue > {limit} Hari"),
        ),
        BlacklistHit::AssetInventory => (
            codes::PASANGAN_ASSET_INVENTORY,
            Decision::Reject,
            "Pasangan Ada Aset Inventori".to_string(),
        ),
        BlacklistHit::Restructure => (
            codes::PASANGAN_RESTRUCTURE,
            Decision::Reject,
            "Pasangan Ada Fasilitas Restrukturisasi".to_string(),
        ),
        BlacklistHit::Clean => (
            codes::PASANGAN_NON_BLACKLIST,
            Decision::Pass,
            "Pasangan Non Blacklist".to_string(),
        ),
    };

    BlacklistVerdict {
        party: Party::Spouse,
        code: code.to_string(),
        decision,
        reason,
        status_konsumen: status,
    }
}
