use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::blacklist::{BlacklistChecker, BlacklistVerdict};
use super::bureau::{BureauContext, BureauDecisionEngine};
use super::cluster::ClusterLookup;
use super::codes;
use super::domain::{
    Applicant, Cluster, CustomerStatus, Decision, EligibilityDecision, FilteringRequest, Party,
    ProspectId,
};
use super::repository::{FilteringRecord, FilteringRepository, RepositoryError};
use super::upstream::{BureauInquiry, UpstreamContext, UpstreamError};
use crate::workflows::elaborate::{ElaborateError, ElaborateOutcome, ElaborateRequest, LtvElaborator};

/// Orchestrates blacklist screening, cluster resolution and bureau interpretation
/// for one prospect, then persists a single record.
pub struct FilteringService<R, C> {
    repository: Arc<R>,
    clusters: Arc<C>,
    blacklist: BlacklistChecker,
    bureau: BureauDecisionEngine,
    elaborator: LtvElaborator,
}

impl<R, C> FilteringService<R, C>
where
    R: FilteringRepository + 'static,
    C: ClusterLookup + 'static,
{
    pub fn new(repository: Arc<R>, clusters: Arc<C>, elaborator: LtvElaborator) -> Self {
        let thresholds = elaborator.thresholds().clone();
        Self {
            repository,
            clusters,
            blacklist: BlacklistChecker::new(thresholds.blacklist_max_overdue_days),
            bureau: BureauDecisionEngine::new(thresholds),
            elaborator,
        }
    }

    /// Runs the filtering pipeline. Nothing is persisted unless every stage finished;
    /// an upstream failure leaves the repository untouched.
    pub fn filter(
        &self,
        request: FilteringRequest,
        upstream: &UpstreamContext<'_>,
    ) -> Result<FilteringRecord, FilteringError> {
        if request.branch_id.trim().is_empty() {
            return Err(FilteringError::BadRequest("branch id is required".to_string()));
        }

        let customer = self.screen(&request, Party::Customer, &request.applicant, upstream)?;
        let status = customer.status_konsumen;
        if customer.is_rejected() {
            return self.persist_blacklist(&request, customer, status);
        }

        if let Some(spouse) = request.spouse.as_ref() {
            let verdict = self.screen(&request, Party::Spouse, spouse, upstream)?;
            if verdict.is_rejected() {
                return self.persist_blacklist(&request, verdict, status);
            }
        }

        let applicant = &request.applicant;
        let cluster = self.clusters.lookup(
            &request.branch_id,
            status.bucket(),
            applicant.bpkb_name_type,
        )?;

        let inquiry = BureauInquiry {
            prospect_id: request.prospect_id.clone(),
            branch_id: request.branch_id.clone(),
            customer: applicant.clone(),
            spouse: request.spouse.clone(),
        };
        let response = upstream.bureau.inquiry(&inquiry, upstream.timeout).map_err(|err| {
            warn!(prospect_id = %request.prospect_id, error = %err, "bureau inquiry failed");
            err
        })?;

        let outcome = self.bureau.evaluate(
            &response,
            &BureauContext {
                bpkb_name_type: applicant.bpkb_name_type,
                customer_status: status,
                customer_segment: applicant.customer_segment,
                cluster,
            },
        );

        info!(
            prospect_id = %request.prospect_id,
            code = %outcome.decision.code,
            decision = outcome.decision.decision.label(),
            next_process = outcome.decision.next_process,
            cluster = outcome.cluster.map(Cluster::label),
            "bureau evaluated"
        );

        let bureau_details = outcome.detail_rows();
        let record = FilteringRecord {
            prospect_id: request.prospect_id,
            branch_id: request.branch_id,
            decision: outcome.decision,
            cluster: outcome.cluster,
            bpkb_name_type: applicant.bpkb_name_type,
            customer_status: status,
            customer_segment: applicant.customer_segment,
            is_blacklist: false,
            total_baki_debet: outcome.total_baki_debet,
            bureau_details,
            created_at: Utc::now(),
        };

        Ok(self.repository.save(record)?)
    }

    /// Elaboration is only available once filtering stored a record for the prospect.
    ///
    /// Cluster, balance, bureau result and customer profile come from that record;
    /// the request only contributes tenor, vehicle year and LTV.
    pub fn elaborate(
        &self,
        request: &ElaborateRequest,
        today: NaiveDate,
    ) -> Result<ElaborateOutcome, FilteringError> {
        let record = self
            .repository
            .fetch(&request.prospect_id)?
            .ok_or_else(|| {
                FilteringError::BadRequest(format!(
                    "filtering has not completed for prospect {}",
                    request.prospect_id
                ))
            })?;

        if !record.next_process() {
            return Ok(ElaborateOutcome {
                code: codes::ELABORATE_FILTERING_NOT_PASSED.to_string(),
                decision: Decision::Reject,
                reason: format!("Filtering Tidak Lolos - {}", record.decision.reason),
                cluster: record.cluster,
                vehicle_age: None,
            });
        }

        let stored = ElaborateRequest {
            branch_id: record.branch_id.clone(),
            customer_status: record.customer_status,
            customer_segment: record.customer_segment,
            bpkb_name_type: record.bpkb_name_type,
            bureau_result: record.bureau_result(),
            total_baki_debet: record.total_baki_debet,
            ..request.clone()
        };
        if stored.total_baki_debet != request.total_baki_debet
            || stored.bureau_result != request.bureau_result
        {
            debug!(
                prospect_id = %request.prospect_id,
                requested_baki_debet = request.total_baki_debet,
                stored_baki_debet = stored.total_baki_debet,
                requested_result = request.bureau_result.label(),
                stored_result = stored.bureau_result.label(),
                "elaborate request differs from filtering record, using the record"
            );
        }

        Ok(self.elaborator.elaborate(&stored, record.cluster, today)?)
    }

    pub fn record(&self, prospect_id: &ProspectId) -> Result<FilteringRecord, FilteringError> {
        self.repository
            .fetch(prospect_id)?
            .ok_or_else(|| FilteringError::NotFound(format!("no filtering record for {prospect_id}")))
    }

    fn screen(
        &self,
        request: &FilteringRequest,
        party: Party,
        applicant: &Applicant,
        upstream: &UpstreamContext<'_>,
    ) -> Result<BlacklistVerdict, FilteringError> {
        let result = upstream
            .dupcheck
            .dupcheck(party, applicant, upstream.timeout)
            .map_err(|err| {
                warn!(
                    prospect_id = %request.prospect_id,
                    party = party.label(),
                    error = %err,
                    "dupcheck failed"
                );
                err
            })?;

        let index = match party {
            Party::Customer => 0,
            Party::Spouse => 1,
        };
        let verdict = self.blacklist.evaluate(index, &result);
        info!(
            prospect_id = %request.prospect_id,
            party = party.label(),
            code = %verdict.code,
            decision = verdict.decision.label(),
            "blacklist evaluated"
        );
        Ok(verdict)
    }

    fn persist_blacklist(
        &self,
        request: &FilteringRequest,
        verdict: BlacklistVerdict,
        customer_status: CustomerStatus,
    ) -> Result<FilteringRecord, FilteringError> {
        let record = FilteringRecord {
            prospect_id: request.prospect_id.clone(),
            branch_id: request.branch_id.clone(),
            decision: EligibilityDecision::new(
                &verdict.code,
                verdict.decision,
                verdict.reason,
                false,
            ),
            cluster: None,
            bpkb_name_type: request.applicant.bpkb_name_type,
            customer_status,
            customer_segment: request.applicant.customer_segment,
            is_blacklist: true,
            total_baki_debet: 0.0,
            bureau_details: Vec::new(),
            created_at: Utc::now(),
        };
        Ok(self.repository.save(record)?)
    }
}

/// Error raised by the filtering service.
#[derive(Debug, thiserror::Error)]
pub enum FilteringError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ElaborateError> for FilteringError {
    fn from(err: ElaborateError) -> Self {
        match err {
            ElaborateError::BadRequest(message) => FilteringError::BadRequest(message),
        }
    }
}

/// Classification hosts use to map failures onto their own surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UpstreamTimeout,
    UpstreamError,
    BadRequest,
    NotFound,
    Internal,
}

impl FilteringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilteringError::Upstream(err) if err.is_timeout() => ErrorKind::UpstreamTimeout,
            FilteringError::Upstream(_) => ErrorKind::UpstreamError,
            FilteringError::BadRequest(_) => ErrorKind::BadRequest,
            FilteringError::NotFound(_) => ErrorKind::NotFound,
            FilteringError::Repository(_) => ErrorKind::Internal,
        }
    }
}
