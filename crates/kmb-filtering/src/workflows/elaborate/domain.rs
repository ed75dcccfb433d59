use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::filtering::{
    BpkbNameType, Cluster, CustomerSegment, CustomerStatus, Decision, ProspectId,
};

/// Bureau outcome as the elaboration tables key it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BureauResult {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "NO HIT")]
    NoHit,
    #[serde(rename = "REJECT")]
    Reject,
}

impl BureauResult {
    pub const fn label(self) -> &'static str {
        match self {
            BureauResult::Pass => "PASS",
            BureauResult::NoHit => "NO HIT",
            BureauResult::Reject => "REJECT",
        }
    }
}

impl FromStr for BureauResult {
    type Err = ElaborateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().replace('_', " ").as_str() {
            "PASS" => Ok(BureauResult::Pass),
            "NO HIT" | "NOHIT" => Ok(BureauResult::NoHit),
            "REJECT" => Ok(BureauResult::Reject),
            other => Err(ElaborateError::BadRequest(format!(
                "unknown bureau result '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleAgeBucket {
    #[serde(rename = "<=12")]
    UpTo12,
    #[serde(rename = ">12")]
    Over12,
}

impl VehicleAgeBucket {
    pub const fn from_age(age: i64) -> Self {
        if age <= 12 {
            VehicleAgeBucket::UpTo12
        } else {
            VehicleAgeBucket::Over12
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            VehicleAgeBucket::UpTo12 => "<=12",
            VehicleAgeBucket::Over12 => ">12",
        }
    }
}

impl fmt::Display for VehicleAgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleAgeBucket {
    type Err = ElaborateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "<=12" => Ok(VehicleAgeBucket::UpTo12),
            ">12" => Ok(VehicleAgeBucket::Over12),
            other => Err(ElaborateError::BadRequest(format!(
                "unknown vehicle age bucket '{other}'"
            ))),
        }
    }
}

/// Vehicle age in years at the end of the tenor: whole years since January 1st of
/// the manufacturing year plus whole years of tenor.
pub fn vehicle_age(manufacture_year: i32, tenor_months: u32, today: NaiveDate) -> i64 {
    let elapsed_days = NaiveDate::from_ymd_opt(manufacture_year, 1, 1)
        .map(|built| (today - built).num_days().max(0))
        .unwrap_or(0);
    elapsed_days / 365 + i64::from(tenor_months / 12)
}

/// Full-elaborate eligibility row. `None` bounds and filters match anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElaborateSchemeRow {
    pub result_pefindo: BureauResult,
    pub cluster: Cluster,
    pub tenor_start: u32,
    pub tenor_end: u32,
    pub bpkb_name_type: Option<BpkbNameType>,
    pub age_vehicle: Option<VehicleAgeBucket>,
    pub ltv_start: Option<f64>,
    pub ltv_end: Option<f64>,
    pub total_baki_debet_start: Option<f64>,
    pub total_baki_debet_end: Option<f64>,
    pub decision: Decision,
}

/// Tenor/LTV mapping row scanned by `elaborate_ltv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtvMappingRow {
    pub result_pefindo: BureauResult,
    pub cluster: Cluster,
    pub tenor_start: u32,
    pub tenor_end: u32,
    pub bpkb_name_type: Option<BpkbNameType>,
    pub age_vehicle: Option<VehicleAgeBucket>,
    pub total_baki_debet_start: Option<f64>,
    pub total_baki_debet_end: Option<f64>,
    pub ltv: f64,
}

/// Input of the full elaborate step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElaborateRequest {
    pub prospect_id: ProspectId,
    pub branch_id: String,
    pub customer_status: CustomerStatus,
    pub customer_segment: CustomerSegment,
    pub bpkb_name_type: BpkbNameType,
    pub bureau_result: BureauResult,
    pub tenor: u32,
    pub manufacture_year: i32,
    /// Requested financing as a percentage of the on-the-road price.
    pub ltv_otr: f64,
    #[serde(default)]
    pub total_baki_debet: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElaborateOutcome {
    pub code: String,
    pub decision: Decision,
    pub reason: String,
    pub cluster: Option<Cluster>,
    pub vehicle_age: Option<VehicleAgeBucket>,
}

impl ElaborateOutcome {
    pub fn is_pass(&self) -> bool {
        self.decision == Decision::Pass
    }
}

/// Input of the tenor/LTV table scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtvRequest {
    pub tenor: u32,
    pub vehicle_age: VehicleAgeBucket,
    pub bpkb_name_type: BpkbNameType,
    pub cluster: Cluster,
    pub bureau_result: BureauResult,
    #[serde(default)]
    pub total_baki_debet: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtvOutcome {
    pub ltv: f64,
    pub max_tenor: u32,
    pub adjust_tenor: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElaborateError {
    #[error("bad elaborate request: {0}")]
    BadRequest(String),
}
