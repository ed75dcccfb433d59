use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::bureau::BureauResponse;
use super::domain::{Applicant, DupcheckResult, Party, ProspectId};

/// Failure talking to an external dependency. The core never retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("{service} did not answer within {timeout:?}")]
    Timeout {
        service: &'static str,
        timeout: Duration,
    },
    #[error("{service} call failed: {message}")]
    Failure {
        service: &'static str,
        message: String,
    },
    #[error("{service} returned an unreadable payload: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout { .. })
    }
}

/// Duplicate-check capability for one party.
pub trait DupcheckClient: Send + Sync {
    fn dupcheck(
        &self,
        party: Party,
        applicant: &Applicant,
        timeout: Duration,
    ) -> Result<DupcheckResult, UpstreamError>;
}

/// Inquiry sent to the credit bureau for the applicant and optional spouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BureauInquiry {
    pub prospect_id: ProspectId,
    pub branch_id: String,
    pub customer: Applicant,
    pub spouse: Option<Applicant>,
}

/// Credit-bureau capability.
pub trait BureauClient: Send + Sync {
    fn inquiry(
        &self,
        inquiry: &BureauInquiry,
        timeout: Duration,
    ) -> Result<BureauResponse, UpstreamError>;
}

/// Capabilities handed to a single filtering run instead of process-wide state.
pub struct UpstreamContext<'a> {
    pub dupcheck: &'a dyn DupcheckClient,
    pub bureau: &'a dyn BureauClient,
    pub timeout: Duration,
}
