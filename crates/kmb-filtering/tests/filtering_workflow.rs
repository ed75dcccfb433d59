use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use kmb_filtering::workflows::approval::{next_approval_step, ApprovalAlias};
use kmb_filtering::workflows::elaborate::{
    BureauResult, ElaborateRequest, LtvRequest, VehicleAgeBucket,
};
use kmb_filtering::workflows::filtering::{
    codes, Applicant, BpkbNameType, BureauClient, BureauInquiry, BureauResponse, Cluster,
    CustomerSegment, CustomerStatus, Decision, DupcheckClient, DupcheckResult, FilteringRequest,
    FilteringService, Gender, InMemoryFilteringRepository, Party, ProspectId, UpstreamContext,
    UpstreamError,
};
use kmb_filtering::workflows::policy::PolicyThresholds;
use kmb_filtering::workflows::reference::ReferenceTables;
use serde_json::json;

fn tables() -> ReferenceTables {
    ReferenceTables::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
        .expect("bundled reference tables load")
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

struct Dupcheck(DupcheckResult);

impl DupcheckClient for Dupcheck {
    fn dupcheck(
        &self,
        _party: Party,
        _applicant: &Applicant,
        _timeout: Duration,
    ) -> Result<DupcheckResult, UpstreamError> {
        Ok(self.0.clone())
    }
}

struct Bureau(serde_json::Value);

impl BureauClient for Bureau {
    fn inquiry(
        &self,
        _inquiry: &BureauInquiry,
        _timeout: Duration,
    ) -> Result<BureauResponse, UpstreamError> {
        serde_json::from_value(self.0.clone()).map_err(|err| UpstreamError::Decode {
            service: "pefindo",
            message: err.to_string(),
        })
    }
}

fn request(prospect_id: &str, branch_id: &str, bpkb_name_type: BpkbNameType) -> FilteringRequest {
    FilteringRequest {
        prospect_id: ProspectId(prospect_id.to_string()),
        branch_id: branch_id.to_string(),
        applicant: Applicant {
            id_number: "3201010101900001".to_string(),
            legal_name: "Budi Santoso".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
            mother_name: "Siti Aminah".to_string(),
            gender: Gender::Male,
            bpkb_name_type,
            customer_status: CustomerStatus::New,
            customer_segment: CustomerSegment::Regular,
        },
        spouse: None,
    }
}

fn service(
    tables: &ReferenceTables,
) -> FilteringService<InMemoryFilteringRepository, kmb_filtering::workflows::filtering::ClusterResolver>
{
    FilteringService::new(
        Arc::new(InMemoryFilteringRepository::default()),
        Arc::new(tables.cluster_resolver()),
        tables.elaborator(PolicyThresholds::default()),
    )
}

#[test]
fn bundled_tables_drive_filter_then_elaborate() {
    let tables = tables();
    let service = service(&tables);
    let dupcheck = Dupcheck(DupcheckResult::default());
    let bureau = Bureau(json!({
        "status": "FOUND",
        "category": 1,
        "max_overdue": "0",
        "max_overdue_last12months": 0,
        "wo_contract": false,
        "wo_ada_agunan": false,
        "baki_debet_non_agunan": 1500000,
        "pbk_report_customer": { "score": 720 }
    }));
    let upstream = UpstreamContext {
        dupcheck: &dupcheck,
        bureau: &bureau,
        timeout: Duration::from_secs(5),
    };

    let record = service
        .filter(request("SAL-IT-1", "400", BpkbNameType::Same), &upstream)
        .expect("filtering succeeds");
    assert_eq!(record.decision.code, codes::NAMA_SAMA_CURRENT_OVD_UNDER_LIMIT);
    assert_eq!(record.decision.decision, Decision::Pass);
    assert_eq!(record.cluster, Some(Cluster::B));
    assert_eq!(record.total_baki_debet, 1_500_000.0);
    assert_eq!(record.bureau_details.len(), 1);

    let outcome = service
        .elaborate(
            &ElaborateRequest {
                prospect_id: record.prospect_id.clone(),
                branch_id: "400".to_string(),
                customer_status: CustomerStatus::New,
                customer_segment: CustomerSegment::Regular,
                bpkb_name_type: BpkbNameType::Same,
                bureau_result: BureauResult::Pass,
                tenor: 24,
                manufacture_year: 2022,
                ltv_otr: 80.0,
                total_baki_debet: record.total_baki_debet,
            },
            today(),
        )
        .expect("elaborate runs");
    assert_eq!(outcome.decision, Decision::Pass);
    assert_eq!(outcome.cluster, Some(Cluster::B));
}

#[test]
fn balance_over_ceiling_rejects_before_lookup() {
    let tables = tables();
    let elaborator = tables.elaborator(PolicyThresholds::default());
    let request = ElaborateRequest {
        prospect_id: ProspectId("SAL-IT-2".to_string()),
        branch_id: "400".to_string(),
        customer_status: CustomerStatus::Ro,
        customer_segment: CustomerSegment::Regular,
        bpkb_name_type: BpkbNameType::Same,
        bureau_result: BureauResult::Pass,
        tenor: 12,
        manufacture_year: 2024,
        ltv_otr: 10.0,
        total_baki_debet: 21_000_000.0,
    };

    for cluster in [Cluster::A, Cluster::C, Cluster::F] {
        let outcome = elaborator
            .elaborate(&request, Some(cluster), today())
            .expect("elaborate runs");
        assert_eq!(outcome.decision, Decision::Reject);
        assert_eq!(outcome.reason, "Baki Debet > 20 Juta");
    }
}

#[test]
fn bureau_payload_that_cannot_decode_is_an_upstream_error() {
    let tables = tables();
    let service = service(&tables);
    let dupcheck = Dupcheck(DupcheckResult::default());
    let bureau = Bureau(json!({ "status": "FOUND", "category": "IV" }));
    let upstream = UpstreamContext {
        dupcheck: &dupcheck,
        bureau: &bureau,
        timeout: Duration::from_secs(5),
    };

    let error = service
        .filter(request("SAL-IT-3", "401", BpkbNameType::Different), &upstream)
        .expect_err("decode fails");
    assert_eq!(
        error.kind(),
        kmb_filtering::workflows::filtering::ErrorKind::UpstreamError
    );
    assert!(service.record(&ProspectId("SAL-IT-3".to_string())).is_err());
}

#[test]
fn elaborate_ltv_is_stable_across_calls() {
    let elaborator = tables().elaborator(PolicyThresholds::default());
    let request = LtvRequest {
        tenor: 48,
        vehicle_age: VehicleAgeBucket::UpTo12,
        bpkb_name_type: BpkbNameType::Different,
        cluster: Cluster::C,
        bureau_result: BureauResult::Pass,
        total_baki_debet: 0.0,
    };

    let first = elaborator.elaborate_ltv(&request).expect("ltv resolves");
    let second = elaborator.elaborate_ltv(&request).expect("ltv resolves");
    assert_eq!(first, second);
    assert_eq!(first.ltv, 65.0);
}

#[test]
fn approval_chain_scenarios() {
    let step = next_approval_step(ApprovalAlias::Cbm, ApprovalAlias::Com, false).expect("step");
    assert_eq!(step.next_step, Some(ApprovalAlias::Drm));
    assert!(!step.is_final);

    let step = next_approval_step(ApprovalAlias::Com, ApprovalAlias::Com, true).expect("step");
    assert_eq!(step.next_step, Some(ApprovalAlias::Gmc));
    assert!(step.is_escalation);

    let step = next_approval_step(ApprovalAlias::Com, ApprovalAlias::Com, false).expect("step");
    assert!(step.is_final);
    assert_eq!(step.next_step, None);
}
