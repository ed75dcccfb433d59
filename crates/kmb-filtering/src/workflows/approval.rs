//! Credit approval chain stepping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Approver roles in master order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApprovalAlias {
    Cbm,
    Drm,
    Gmo,
    Com,
    Gmc,
    Ucc,
}

const MASTER_SEQUENCE: [ApprovalAlias; 6] = [
    ApprovalAlias::Cbm,
    ApprovalAlias::Drm,
    ApprovalAlias::Gmo,
    ApprovalAlias::Com,
    ApprovalAlias::Gmc,
    ApprovalAlias::Ucc,
];

impl ApprovalAlias {
    pub const fn label(self) -> &'static str {
        match self {
            ApprovalAlias::Cbm => "CBM",
            ApprovalAlias::Drm => "DRM",
            ApprovalAlias::Gmo => "GMO",
            ApprovalAlias::Com => "COM",
            ApprovalAlias::Gmc => "GMC",
            ApprovalAlias::Ucc => "UCC",
        }
    }

    pub fn sequence() -> &'static [ApprovalAlias] {
        &MASTER_SEQUENCE
    }

    /// The alias right after this one, `None` for the last approver.
    pub fn following(self) -> Option<ApprovalAlias> {
        let position = MASTER_SEQUENCE.iter().position(|alias| *alias == self)?;
        MASTER_SEQUENCE.get(position + 1).copied()
    }
}

impl fmt::Display for ApprovalAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApprovalAlias {
    type Err = ApprovalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_uppercase();
        MASTER_SEQUENCE
            .iter()
            .copied()
            .find(|alias| alias.label() == wanted)
            .ok_or_else(|| ApprovalError::BadRequest(format!("unknown approval alias '{wanted}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApprovalStep {
    pub next_step: Option<ApprovalAlias>,
    pub is_final: bool,
    pub is_escalation: bool,
}

/// Computes the next approver from the current one and the chain's final approver.
///
/// Reaching the final approver ends the chain unless escalation is requested, in
/// which case exactly one more step is allowed. Stepping past `UCC` is rejected.
pub fn next_approval_step(
    current: ApprovalAlias,
    final_alias: ApprovalAlias,
    need_escalation: bool,
) -> Result<ApprovalStep, ApprovalError> {
    if current == final_alias && !need_escalation {
        return Ok(ApprovalStep {
            next_step: None,
            is_final: true,
            is_escalation: false,
        });
    }

    let next = current.following().ok_or_else(|| {
        ApprovalError::BadRequest(format!("no approver after {current} in the chain"))
    })?;

    Ok(ApprovalStep {
        next_step: Some(next),
        is_final: false,
        is_escalation: current == final_alias,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApprovalDecision {
    Approve,
    Reject,
    Return,
}

impl FromStr for ApprovalDecision {
    type Err = ApprovalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "APPROVE" => Ok(ApprovalDecision::Approve),
            "REJECT" => Ok(ApprovalDecision::Reject),
            "RETURN" => Ok(ApprovalDecision::Return),
            other => Err(ApprovalError::BadRequest(format!(
                "unknown approval decision '{other}'"
            ))),
        }
    }
}

/// Approval chain of one application, bounded by its final approver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalScheme {
    pub final_alias: ApprovalAlias,
}

impl ApprovalScheme {
    pub fn new(final_alias: ApprovalAlias) -> Self {
        Self { final_alias }
    }

    /// Reject and return close the chain; approve moves it along.
    pub fn advance(
        &self,
        current: ApprovalAlias,
        decision: ApprovalDecision,
        need_escalation: bool,
    ) -> Result<ApprovalStep, ApprovalError> {
        match decision {
            ApprovalDecision::Approve => {
                next_approval_step(current, self.final_alias, need_escalation)
            }
            ApprovalDecision::Reject | ApprovalDecision::Return => Ok(ApprovalStep {
                next_step: None,
                is_final: true,
                is_escalation: false,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApprovalError {
    #[error("bad approval request: {0}")]
    BadRequest(String),
}
