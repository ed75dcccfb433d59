use chrono::NaiveDate;
use kmb_filtering::workflows::elaborate::ElaborateRequest;
use kmb_filtering::workflows::filtering::{
    Applicant, BureauClient, BureauInquiry, BureauResponse, DupcheckClient, DupcheckResult,
    FilteringRecord, FilteringRequest, Party, UpstreamError,
};
use serde::Deserialize;
use std::time::Duration;

/// One prospect as captured from production traffic: the request plus what the
/// dupcheck and bureau services answered.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FilteringCase {
    pub(crate) request: FilteringRequest,
    #[serde(default)]
    pub(crate) upstream: RecordedUpstream,
    #[serde(default)]
    pub(crate) elaborate: Option<ElaborateInput>,
}

/// Vehicle and financing facts that only the elaboration step needs.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ElaborateInput {
    pub(crate) tenor: u32,
    pub(crate) manufacture_year: i32,
    pub(crate) ltv_otr: f64,
}

impl ElaborateInput {
    /// Everything filtering decided comes from the stored record.
    pub(crate) fn into_request(self, record: &FilteringRecord) -> ElaborateRequest {
        ElaborateRequest {
            prospect_id: record.prospect_id.clone(),
            branch_id: record.branch_id.clone(),
            customer_status: record.customer_status,
            customer_segment: record.customer_segment,
            bpkb_name_type: record.bpkb_name_type,
            bureau_result: record.bureau_result(),
            tenor: self.tenor,
            manufacture_year: self.manufacture_year,
            ltv_otr: self.ltv_otr,
            total_baki_debet: record.total_baki_debet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RecordedService {
    Dupcheck,
    Pefindo,
}

impl RecordedService {
    fn name(self) -> &'static str {
        match self {
            RecordedService::Dupcheck => "dupcheck",
            RecordedService::Pefindo => "pefindo",
        }
    }
}

/// Replays a failed upstream call.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RecordedFailure {
    pub(crate) service: RecordedService,
    #[serde(default)]
    pub(crate) timeout: bool,
    #[serde(default)]
    pub(crate) message: String,
}

impl RecordedFailure {
    fn to_error(&self, timeout: Duration) -> UpstreamError {
        if self.timeout {
            UpstreamError::Timeout {
                service: self.service.name(),
                timeout,
            }
        } else {
            UpstreamError::Failure {
                service: self.service.name(),
                message: self.message.clone(),
            }
        }
    }
}

/// Upstream answers served back to the pipeline in place of live services.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RecordedUpstream {
    #[serde(default)]
    pub(crate) customer_dupcheck: DupcheckResult,
    #[serde(default)]
    pub(crate) spouse_dupcheck: DupcheckResult,
    #[serde(default)]
    pub(crate) bureau: Option<BureauResponse>,
    #[serde(default)]
    pub(crate) failure: Option<RecordedFailure>,
}

impl RecordedUpstream {
    fn failure_for(&self, service: RecordedService) -> Option<&RecordedFailure> {
        self.failure
            .as_ref()
            .filter(|failure| failure.service == service)
    }
}

impl DupcheckClient for RecordedUpstream {
    fn dupcheck(
        &self,
        party: Party,
        _applicant: &Applicant,
        timeout: Duration,
    ) -> Result<DupcheckResult, UpstreamError> {
        if let Some(failure) = self.failure_for(RecordedService::Dupcheck) {
            return Err(failure.to_error(timeout));
        }
        Ok(match party {
            Party::Customer => self.customer_dupcheck.clone(),
            Party::Spouse => self.spouse_dupcheck.clone(),
        })
    }
}

impl BureauClient for RecordedUpstream {
    fn inquiry(
        &self,
        _inquiry: &BureauInquiry,
        timeout: Duration,
    ) -> Result<BureauResponse, UpstreamError> {
        if let Some(failure) = self.failure_for(RecordedService::Pefindo) {
            return Err(failure.to_error(timeout));
        }
        self.bureau.clone().ok_or_else(|| UpstreamError::Failure {
            service: RecordedService::Pefindo.name(),
            message: "no bureau response recorded for this case".to_string(),
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
