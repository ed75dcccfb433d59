use std::sync::Arc;

use chrono::NaiveDate;

use crate::workflows::elaborate::{
    BureauResult, ElaborateRequest, ElaborateSchemeRow, LtvElaborator, LtvMappingRow, LtvRequest,
    VehicleAgeBucket,
};
use crate::workflows::filtering::{
    BpkbNameType, Cluster, CustomerSegment, CustomerStatus, Decision, ProspectId,
};
use crate::workflows::policy::PolicyThresholds;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

fn scheme_row(
    result: BureauResult,
    tenor: (u32, u32),
    ltv: (Option<f64>, Option<f64>),
    balance: (Option<f64>, Option<f64>),
    decision: Decision,
) -> ElaborateSchemeRow {
    ElaborateSchemeRow {
        result_pefindo: result,
        cluster: Cluster::C,
        tenor_start: tenor.0,
        tenor_end: tenor.1,
        bpkb_name_type: None,
        age_vehicle: None,
        ltv_start: ltv.0,
        ltv_end: ltv.1,
        total_baki_debet_start: balance.0,
        total_baki_debet_end: balance.1,
        decision,
    }
}

pub(super) fn scheme_rows() -> Vec<ElaborateSchemeRow> {
    let mut same_name_young = scheme_row(
        BureauResult::Pass,
        (25, 48),
        (Some(0.0), Some(80.0)),
        (None, None),
        Decision::Pass,
    );
    same_name_young.bpkb_name_type = Some(BpkbNameType::Same);
    same_name_young.age_vehicle = Some(VehicleAgeBucket::UpTo12);

    vec![
        scheme_row(
            BureauResult::Pass,
            (1, 24),
            (Some(0.0), Some(85.0)),
            (None, None),
            Decision::Pass,
        ),
        same_name_young,
        scheme_row(
            BureauResult::Pass,
            (1, 48),
            (Some(85.0), Some(100.0)),
            (None, None),
            Decision::Reject,
        ),
        scheme_row(
            BureauResult::NoHit,
            (1, 36),
            (Some(0.0), Some(75.0)),
            (None, None),
            Decision::Pass,
        ),
        scheme_row(
            BureauResult::Reject,
            (1, 24),
            (None, None),
            (Some(0.0), Some(5_000_000.0)),
            Decision::Pass,
        ),
        scheme_row(
            BureauResult::Reject,
            (1, 60),
            (None, None),
            (Some(5_000_000.0), Some(20_000_000.0)),
            Decision::Reject,
        ),
    ]
}

fn ltv_row(
    result: BureauResult,
    cluster: Cluster,
    tenor: (u32, u32),
    bpkb: Option<BpkbNameType>,
    age: Option<VehicleAgeBucket>,
    balance: (Option<f64>, Option<f64>),
    ltv: f64,
) -> LtvMappingRow {
    LtvMappingRow {
        result_pefindo: result,
        cluster,
        tenor_start: tenor.0,
        tenor_end: tenor.1,
        bpkb_name_type: bpkb,
        age_vehicle: age,
        total_baki_debet_start: balance.0,
        total_baki_debet_end: balance.1,
        ltv,
    }
}

pub(super) fn ltv_rows() -> Vec<LtvMappingRow> {
    use BureauResult::{Pass, Reject};
    use VehicleAgeBucket::{Over12, UpTo12};
    let any = (None, None);
    vec![
        ltv_row(Pass, Cluster::C, (1, 12), None, None, any, 85.0),
        ltv_row(Pass, Cluster::C, (13, 35), None, None, any, 80.0),
        ltv_row(Pass, Cluster::C, (36, 48), Some(BpkbNameType::Same), Some(UpTo12), any, 75.0),
        ltv_row(Pass, Cluster::C, (36, 48), Some(BpkbNameType::Different), Some(UpTo12), any, 0.0),
        ltv_row(Pass, Cluster::C, (49, 60), Some(BpkbNameType::Same), Some(UpTo12), any, 70.0),
        ltv_row(Pass, Cluster::C, (36, 60), None, Some(Over12), any, 0.0),
        ltv_row(Reject, Cluster::C, (1, 24), None, None, (Some(0.0), Some(5_000_000.0)), 60.0),
        ltv_row(Reject, Cluster::C, (1, 24), None, None, (Some(5_000_000.0), Some(20_000_000.0)), 0.0),
        ltv_row(Pass, Cluster::E, (1, 24), None, None, any, 70.0),
    ]
}

pub(super) fn elaborator() -> LtvElaborator {
    LtvElaborator::new(
        PolicyThresholds::default(),
        Arc::new(scheme_rows()),
        Arc::new(ltv_rows()),
    )
}

pub(super) fn empty_elaborator() -> LtvElaborator {
    LtvElaborator::new(
        PolicyThresholds::default(),
        Arc::new(Vec::new()),
        Arc::new(Vec::new()),
    )
}

pub(super) fn elaborate_request(bureau_result: BureauResult, tenor: u32, ltv_otr: f64) -> ElaborateRequest {
    ElaborateRequest {
        prospect_id: ProspectId("SAL-0001".to_string()),
        branch_id: "400".to_string(),
        customer_status: CustomerStatus::New,
        customer_segment: CustomerSegment::Regular,
        bpkb_name_type: BpkbNameType::Same,
        bureau_result,
        tenor,
        manufacture_year: 2022,
        ltv_otr,
        total_baki_debet: 0.0,
    }
}

pub(super) fn ltv_request(tenor: u32) -> LtvRequest {
    LtvRequest {
        tenor,
        vehicle_age: VehicleAgeBucket::UpTo12,
        bpkb_name_type: BpkbNameType::Same,
        cluster: Cluster::C,
        bureau_result: BureauResult::Pass,
        total_baki_debet: 0.0,
    }
}
