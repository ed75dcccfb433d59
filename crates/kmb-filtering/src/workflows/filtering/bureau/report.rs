use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::super::domain::{
    BpkbNameType, Cluster, CustomerSegment, CustomerStatus, EligibilityDecision, Party,
};

/// Overdue days as reported by the bureau: a number, or nothing at all.
///
/// The payload sends these either as JSON numbers or as numeric strings, so every
/// threshold comparison goes through [`OverdueValue::coerce`] first. `Absent` is
/// never the same thing as `Number(0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OverdueValue {
    Number(f64),
    #[default]
    Absent,
}

impl OverdueValue {
    pub fn coerce(raw: &Value) -> Result<Self, String> {
        match raw {
            Value::Null => Ok(OverdueValue::Absent),
            Value::Number(number) => number
                .as_f64()
                .map(OverdueValue::Number)
                .ok_or_else(|| format!("overdue value {number} is not representable")),
            Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(OverdueValue::Absent);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .map(OverdueValue::Number)
                    .ok_or_else(|| format!("overdue value '{trimmed}' is not numeric"))
            }
            other => Err(format!("overdue value {other} has an unsupported type")),
        }
    }

    pub fn days(self) -> Option<f64> {
        match self {
            OverdueValue::Number(days) => Some(days),
            OverdueValue::Absent => None,
        }
    }
}

impl<'de> Deserialize<'de> for OverdueValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        OverdueValue::coerce(&raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for OverdueValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            OverdueValue::Number(days) => serializer.serialize_f64(*days),
            OverdueValue::Absent => serializer.serialize_none(),
        }
    }
}

/// Bureau risk category, written as a roman numeral in every reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BureauCategory {
    I,
    II,
    III,
}

impl BureauCategory {
    pub const fn roman(self) -> &'static str {
        match self {
            BureauCategory::I => "I",
            BureauCategory::II => "II",
            BureauCategory::III => "III",
        }
    }

    fn from_raw(raw: &Value) -> Result<Self, String> {
        let text = match raw {
            Value::Number(number) => number.to_string(),
            Value::String(text) => text.trim().to_ascii_uppercase(),
            other => return Err(format!("category {other} has an unsupported type")),
        };
        match text.as_str() {
            "1" | "1.0" | "I" => Ok(BureauCategory::I),
            "2" | "2.0" | "II" => Ok(BureauCategory::II),
            "3" | "3.0" | "III" => Ok(BureauCategory::III),
            _ => Err(format!("unknown bureau category '{text}'")),
        }
    }
}

impl<'de> Deserialize<'de> for BureauCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        BureauCategory::from_raw(&raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for BureauCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let code = match self {
            BureauCategory::I => 1,
            BureauCategory::II => 2,
            BureauCategory::III => 3,
        };
        serializer.serialize_u8(code)
    }
}

/// Scored bureau report. Produced once per run and never modified.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BureauReport {
    #[serde(default)]
    pub category: Option<BureauCategory>,
    #[serde(default, alias = "max_overdue")]
    pub current_overdue: OverdueValue,
    #[serde(default, alias = "max_overdue_last12months")]
    pub last_12_months_overdue: OverdueValue,
    #[serde(default)]
    pub wo_contract: bool,
    #[serde(default)]
    pub wo_ada_agunan: bool,
    #[serde(default)]
    pub baki_debet_non_agunan: f64,
    #[serde(default)]
    pub detail_report: Option<String>,
    #[serde(default)]
    pub pbk_report_customer: Option<Value>,
    #[serde(default)]
    pub pbk_report_spouse: Option<Value>,
}

/// What the bureau call produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BureauResponse {
    Found(BureauReport),
    /// Unscored or no record at the bureau.
    NoRecord,
}

/// Inputs of the bureau decision beside the report itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BureauContext {
    pub bpkb_name_type: BpkbNameType,
    pub customer_status: CustomerStatus,
    pub customer_segment: CustomerSegment,
    pub cluster: Option<Cluster>,
}

/// Persistable per-party bureau detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BureauDetailRow {
    pub subject: Party,
    pub detail: Value,
}

impl BureauDetailRow {
    /// Only non-empty sub-objects of the raw payload become rows.
    pub(crate) fn from_payload(subject: Party, payload: Option<&Value>) -> Option<Self> {
        let detail = payload?;
        let populated = match detail {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::String(text) => !text.trim().is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        };
        populated.then(|| BureauDetailRow {
            subject,
            detail: detail.clone(),
        })
    }
}

/// Decision plus the bureau facts the filtering record keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BureauOutcome {
    pub decision: EligibilityDecision,
    pub cluster: Option<Cluster>,
    pub total_baki_debet: f64,
    pub pbk_report_customer: Option<BureauDetailRow>,
    pub pbk_report_spouse: Option<BureauDetailRow>,
}

impl BureauOutcome {
    pub fn detail_rows(&self) -> Vec<BureauDetailRow> {
        self.pbk_report_customer
            .iter()
            .chain(self.pbk_report_spouse.iter())
            .cloned()
            .collect()
    }
}
