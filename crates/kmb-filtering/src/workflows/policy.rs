use serde::{Deserialize, Serialize};

/// Numeric limits shared by the filtering and elaboration rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyThresholds {
    /// Max overdue days tolerated over the last twelve months.
    pub ovd_last_12_limit: f64,
    /// Max current overdue days tolerated.
    pub ovd_current_limit: f64,
    /// Non-collateral outstanding balance ceiling.
    pub baki_debet_limit: f64,
    /// Lower band of the outstanding balance wording.
    pub baki_debet_small_tier: f64,
    /// Balance ceiling for clusters E and F during elaboration.
    pub cluster_ef_baki_debet_limit: f64,
    pub blacklist_max_overdue_days: i64,
    /// Tenor (months) from which LTV rows also match on BPKB name and vehicle age.
    pub ltv_tenor_split: u32,
}

impl Default for PolicyThresholds {
    fn default() -> Self {
        Self {
            ovd_last_12_limit: 60.0,
            ovd_current_limit: 30.0,
            baki_debet_limit: 20_000_000.0,
            baki_debet_small_tier: 3_000_000.0,
            cluster_ef_baki_debet_limit: 10_000_000.0,
            blacklist_max_overdue_days: 90,
            ltv_tenor_split: 36,
        }
    }
}

impl PolicyThresholds {
    /// True when the balance sits in the (small tier, ceiling] band.
    pub fn in_mid_balance_band(&self, balance: f64) -> bool {
        balance > self.baki_debet_small_tier && balance <= self.baki_debet_limit
    }
}

/// Renders a rupiah amount in the "N Juta" wording used by reason strings.
pub fn format_juta(amount: f64) -> String {
    let juta = amount / 1_000_000.0;
    if (juta - juta.round()).abs() < f64::EPSILON {
        format!("{} Juta", juta.round() as i64)
    } else {
        format!("{juta:.1} Juta")
    }
}

/// Whole numbers print without a fractional part ("60", "72.5").
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
