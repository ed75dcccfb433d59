use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;

use crate::workflows::elaborate::LtvElaborator;
use crate::workflows::filtering::bureau::{
    BureauCategory, BureauContext, BureauReport, BureauResponse, OverdueValue,
};
use crate::workflows::filtering::cluster::{ClusterMapping, ClusterResolver};
use crate::workflows::filtering::domain::{
    Applicant, BpkbNameType, Cluster, CustomerSegment, CustomerStatus, CustomerStatusBucket,
    DupcheckResult, FilteringRequest, Gender, Party, ProspectId,
};
use crate::workflows::filtering::repository::InMemoryFilteringRepository;
use crate::workflows::filtering::service::FilteringService;
use crate::workflows::filtering::upstream::{
    BureauClient, BureauInquiry, DupcheckClient, UpstreamContext, UpstreamError,
};
use crate::workflows::policy::PolicyThresholds;

pub(super) const TIMEOUT: Duration = Duration::from_millis(250);

pub(super) fn applicant(bpkb_name_type: BpkbNameType) -> Applicant {
    Applicant {
        id_number: "3201010101900001".to_string(),
        legal_name: "Budi Santoso".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
        mother_name: "Siti Aminah".to_string(),
        gender: Gender::Male,
        bpkb_name_type,
        customer_status: CustomerStatus::New,
        customer_segment: CustomerSegment::Regular,
    }
}

pub(super) fn spouse() -> Applicant {
    Applicant {
        id_number: "3201014101920002".to_string(),
        legal_name: "Dewi Lestari".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1992, 1, 1).expect("valid date"),
        mother_name: "Sri Wahyuni".to_string(),
        gender: Gender::Female,
        ..applicant(BpkbNameType::Same)
    }
}

pub(super) fn request(bpkb_name_type: BpkbNameType, with_spouse: bool) -> FilteringRequest {
    FilteringRequest {
        prospect_id: ProspectId("SAL-2026-0001".to_string()),
        branch_id: "400".to_string(),
        applicant: applicant(bpkb_name_type),
        spouse: with_spouse.then(spouse),
    }
}

pub(super) fn clean_dupcheck(status: &str) -> DupcheckResult {
    DupcheckResult {
        customer_status: Some(status.to_string()),
        ..DupcheckResult::default()
    }
}

pub(super) fn report(
    category: Option<BureauCategory>,
    last_12: OverdueValue,
    current: OverdueValue,
) -> BureauReport {
    BureauReport {
        category,
        last_12_months_overdue: last_12,
        current_overdue: current,
        ..BureauReport::default()
    }
}

pub(super) fn context(
    bpkb_name_type: BpkbNameType,
    customer_status: CustomerStatus,
    cluster: Option<Cluster>,
) -> BureauContext {
    BureauContext {
        bpkb_name_type,
        customer_status,
        customer_segment: CustomerSegment::Regular,
        cluster,
    }
}

pub(super) fn days(value: f64) -> OverdueValue {
    OverdueValue::Number(value)
}

pub(super) fn clusters() -> Arc<ClusterResolver> {
    Arc::new(ClusterResolver::new(vec![
        ClusterMapping {
            branch_id: "400".to_string(),
            customer_status: CustomerStatusBucket::New,
            bpkb_name_type: BpkbNameType::Same,
            cluster: Some(Cluster::B),
        },
        ClusterMapping {
            branch_id: "400".to_string(),
            customer_status: CustomerStatusBucket::AoRo,
            bpkb_name_type: BpkbNameType::Same,
            cluster: Some(Cluster::E),
        },
    ]))
}

pub(super) fn service() -> (
    FilteringService<MemoryRepository, ClusterResolver>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let elaborator = LtvElaborator::new(
        PolicyThresholds::default(),
        Arc::new(Vec::new()),
        Arc::new(Vec::new()),
    );
    let service = FilteringService::new(repository.clone(), clusters(), elaborator);
    (service, repository)
}

pub(super) type MemoryRepository = InMemoryFilteringRepository;

/// Canned dupcheck answers per party, recording who was asked.
pub(super) struct StubDupcheck {
    customer: Result<DupcheckResult, UpstreamError>,
    spouse: Result<DupcheckResult, UpstreamError>,
    calls: Mutex<Vec<Party>>,
}

impl StubDupcheck {
    pub(super) fn new(
        customer: Result<DupcheckResult, UpstreamError>,
        spouse: Result<DupcheckResult, UpstreamError>,
    ) -> Self {
        Self {
            customer,
            spouse,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn clean() -> Self {
        Self::new(Ok(clean_dupcheck("NEW")), Ok(DupcheckResult::default()))
    }

    pub(super) fn calls(&self) -> Vec<Party> {
        self.calls.lock().expect("dupcheck mutex poisoned").clone()
    }
}

impl DupcheckClient for StubDupcheck {
    fn dupcheck(
        &self,
        party: Party,
        _applicant: &Applicant,
        _timeout: Duration,
    ) -> Result<DupcheckResult, UpstreamError> {
        self.calls.lock().expect("dupcheck mutex poisoned").push(party);
        match party {
            Party::Customer => self.customer.clone(),
            Party::Spouse => self.spouse.clone(),
        }
    }
}

pub(super) struct StubBureau {
    response: Result<BureauResponse, UpstreamError>,
    inquiries: Mutex<Vec<BureauInquiry>>,
}

impl StubBureau {
    pub(super) fn new(response: Result<BureauResponse, UpstreamError>) -> Self {
        Self {
            response,
            inquiries: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn inquiries(&self) -> Vec<BureauInquiry> {
        self.inquiries.lock().expect("bureau mutex poisoned").clone()
    }
}

impl BureauClient for StubBureau {
    fn inquiry(
        &self,
        inquiry: &BureauInquiry,
        _timeout: Duration,
    ) -> Result<BureauResponse, UpstreamError> {
        self.inquiries
            .lock()
            .expect("bureau mutex poisoned")
            .push(inquiry.clone());
        self.response.clone()
    }
}

pub(super) fn upstream<'a>(dupcheck: &'a StubDupcheck, bureau: &'a StubBureau) -> UpstreamContext<'a> {
    UpstreamContext {
        dupcheck,
        bureau,
        timeout: TIMEOUT,
    }
}
