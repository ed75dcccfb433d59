use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for a financing prospect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProspectId(pub String);

impl fmt::Display for ProspectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which party of the application a check runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Party {
    Customer,
    Spouse,
}

impl Party {
    /// Index 0 is the applicant, anything above is the spouse.
    pub const fn from_index(index: usize) -> Self {
        if index == 0 {
            Party::Customer
        } else {
            Party::Spouse
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Party::Customer => "CUSTOMER",
            Party::Spouse => "SPOUSE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// Whether the BPKB carries the applicant's own name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BpkbNameType {
    Same,
    Different,
}

impl BpkbNameType {
    /// Bureau and mapping tables encode same-name as 1, different-name as 0.
    pub const fn code(self) -> u8 {
        match self {
            BpkbNameType::Same => 1,
            BpkbNameType::Different => 0,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BpkbNameType::Same),
            0 => Some(BpkbNameType::Different),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            BpkbNameType::Same => "NAMA SAMA",
            BpkbNameType::Different => "NAMA BEDA",
        }
    }
}

impl FromStr for BpkbNameType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "1" | "SAME" | "NAMA SAMA" | "K" => Ok(BpkbNameType::Same),
            "0" | "DIFFERENT" | "NAMA BEDA" | "O" => Ok(BpkbNameType::Different),
            other => Err(format!("unknown BPKB name type '{other}'")),
        }
    }
}

/// Relationship of the customer with the lender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    New,
    Ao,
    Ro,
    #[serde(other)]
    Unknown,
}

impl CustomerStatus {
    /// Parses the dupcheck status; blank values mean a new customer.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            None => CustomerStatus::New,
            Some(value) => match value.to_ascii_uppercase().as_str() {
                "NEW" => CustomerStatus::New,
                "AO" => CustomerStatus::Ao,
                "RO" => CustomerStatus::Ro,
                _ => CustomerStatus::Unknown,
            },
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CustomerStatus::New => "NEW",
            CustomerStatus::Ao => "AO",
            CustomerStatus::Ro => "RO",
            CustomerStatus::Unknown => "UNKNOWN",
        }
    }

    /// Cluster tables only distinguish new customers from existing ones.
    pub const fn bucket(self) -> CustomerStatusBucket {
        match self {
            CustomerStatus::Ao | CustomerStatus::Ro => CustomerStatusBucket::AoRo,
            CustomerStatus::New | CustomerStatus::Unknown => CustomerStatusBucket::New,
        }
    }

    pub const fn is_existing(self) -> bool {
        matches!(self, CustomerStatus::Ao | CustomerStatus::Ro)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerStatusBucket {
    #[serde(rename = "NEW")]
    New,
    #[serde(rename = "AO/RO")]
    AoRo,
}

impl CustomerStatusBucket {
    pub const fn label(self) -> &'static str {
        match self {
            CustomerStatusBucket::New => "NEW",
            CustomerStatusBucket::AoRo => "AO/RO",
        }
    }
}

impl FromStr for CustomerStatusBucket {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NEW" => Ok(CustomerStatusBucket::New),
            "AO/RO" | "AO" | "RO" => Ok(CustomerStatusBucket::AoRo),
            other => Err(format!("unknown customer status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerSegment {
    Regular,
    Prime,
    Priority,
}

/// Risk bucket derived from branch, customer status and BPKB name type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cluster {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Cluster {
    pub const fn label(self) -> &'static str {
        match self {
            Cluster::A => "Cluster A",
            Cluster::B => "Cluster B",
            Cluster::C => "Cluster C",
            Cluster::D => "Cluster D",
            Cluster::E => "Cluster E",
            Cluster::F => "Cluster F",
        }
    }

    pub const fn is_high_risk(self) -> bool {
        matches!(self, Cluster::E | Cluster::F)
    }

    /// Cluster used when the mapping has no row: only same-name BPKB or PRIME
    /// applicants fall back to C, everyone else stays unresolved.
    pub fn fallback(bpkb_name_type: BpkbNameType, segment: CustomerSegment) -> Option<Self> {
        if bpkb_name_type == BpkbNameType::Same || segment == CustomerSegment::Prime {
            Some(Cluster::C)
        } else {
            None
        }
    }
}

impl FromStr for Cluster {
    type Err = String;

    /// Accepts `"A"` as well as the table wording `"Cluster A"`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let letter = trimmed
            .strip_prefix("Cluster ")
            .or_else(|| trimmed.strip_prefix("CLUSTER "))
            .unwrap_or(trimmed);
        match letter.to_ascii_uppercase().as_str() {
            "A" => Ok(Cluster::A),
            "B" => Ok(Cluster::B),
            "C" => Ok(Cluster::C),
            "D" => Ok(Cluster::D),
            "E" => Ok(Cluster::E),
            "F" => Ok(Cluster::F),
            _ => Err(format!("unknown cluster '{trimmed}'")),
        }
    }
}

/// Identity and profile of the applicant or the spouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id_number: String,
    pub legal_name: String,
    pub birth_date: NaiveDate,
    pub mother_name: String,
    pub gender: Gender,
    pub bpkb_name_type: BpkbNameType,
    pub customer_status: CustomerStatus,
    pub customer_segment: CustomerSegment,
}

pub type SpouseApplicant = Applicant;

/// Everything the pipeline needs to screen one prospect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteringRequest {
    pub prospect_id: ProspectId,
    pub branch_id: String,
    pub applicant: Applicant,
    #[serde(default)]
    pub spouse: Option<SpouseApplicant>,
}

/// Normalized answer of the duplicate-check service for one party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DupcheckResult {
    #[serde(default)]
    pub bad_type: Option<String>,
    #[serde(default)]
    pub max_overdue_days: i64,
    #[serde(default)]
    pub num_of_asset_inventoried: i64,
    #[serde(default)]
    pub is_restructure: bool,
    #[serde(default)]
    pub customer_status: Option<String>,
}

impl DupcheckResult {
    pub fn is_empty(&self) -> bool {
        *self == DupcheckResult::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Pass,
    Reject,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Pass => "PASS",
            Decision::Reject => "REJECT",
        }
    }
}

/// Outcome of a filtering stage. Created once per run and only ever superseded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub code: String,
    pub decision: Decision,
    pub reason: String,
    pub next_process: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ltv_override: Option<f64>,
}

impl EligibilityDecision {
    pub fn new(code: &str, decision: Decision, reason: String, next_process: bool) -> Self {
        debug_assert!(!reason.trim().is_empty(), "decision {code} without reason");
        Self {
            code: code.to_string(),
            decision,
            reason,
            next_process,
            ltv_override: None,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.decision == Decision::Pass
    }
}
