use super::common::*;
use crate::workflows::elaborate::{
    vehicle_age, BureauResult, ElaborateError, VehicleAgeBucket,
};
use crate::workflows::filtering::{codes, BpkbNameType, Cluster, Decision};

#[test]
fn balance_over_ceiling_rejects_before_any_table_lookup() {
    let mut request = elaborate_request(BureauResult::Pass, 12, 50.0);
    request.total_baki_debet = 21_000_000.0;

    for cluster in [Some(Cluster::A), Some(Cluster::F), None] {
        let outcome = empty_elaborator()
            .elaborate(&request, cluster, today())
            .expect("elaborate runs");
        assert_eq!(outcome.code, codes::ELABORATE_BAKI_DEBET_OVER_LIMIT);
        assert_eq!(outcome.decision, Decision::Reject);
        assert_eq!(outcome.reason, "Baki Debet > 20 Juta");
        assert_eq!(outcome.vehicle_age, None);
    }
}

#[test]
fn cluster_e_f_reject_above_ten_million() {
    let mut request = elaborate_request(BureauResult::Reject, 12, 50.0);
    request.total_baki_debet = 10_000_001.0;

    let outcome = elaborator()
        .elaborate(&request, Some(Cluster::E), today())
        .expect("elaborate runs");
    assert_eq!(outcome.code, codes::ELABORATE_CLUSTER_EF_BAKI_DEBET);
    assert_eq!(outcome.reason, "Cluster E/F & Baki Debet > 10 Juta");

    request.total_baki_debet = 15_000_000.0;
    let outcome = elaborator()
        .elaborate(&request, Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(outcome.code, codes::ELABORATE_SCHEME_REJECT);
    assert_eq!(outcome.decision, Decision::Reject);
}

#[test]
fn unresolved_cluster_is_a_reject_not_an_error() {
    let request = elaborate_request(BureauResult::Pass, 12, 50.0);
    let outcome = elaborator()
        .elaborate(&request, None, today())
        .expect("elaborate runs");
    assert_eq!(outcome.code, codes::ELABORATE_CLUSTER_NOT_FOUND);
    assert_eq!(outcome.cluster, None);
}

#[test]
fn pass_rows_exclude_lower_ltv_bound() {
    let elaborator = elaborator();

    let at_upper = elaborator
        .elaborate(&elaborate_request(BureauResult::Pass, 12, 85.0), Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(at_upper.code, codes::ELABORATE_SCHEME_PASS);
    assert!(at_upper.is_pass());

    let at_lower = elaborator
        .elaborate(&elaborate_request(BureauResult::Pass, 12, 0.0), Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(at_lower.code, codes::ELABORATE_NO_MAPPING);
    assert_eq!(at_lower.reason, "Tidak Ada Mapping Elaborate Yang Sesuai");

    let too_high = elaborator
        .elaborate(&elaborate_request(BureauResult::Pass, 12, 90.0), Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(too_high.code, codes::ELABORATE_SCHEME_REJECT);
}

#[test]
fn pass_rows_filter_on_bpkb_and_vehicle_age() {
    let elaborator = elaborator();
    let request = elaborate_request(BureauResult::Pass, 36, 80.0);

    let same_name = elaborator
        .elaborate(&request, Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(same_name.code, codes::ELABORATE_SCHEME_PASS);
    assert_eq!(same_name.vehicle_age, Some(VehicleAgeBucket::UpTo12));

    let mut different = request.clone();
    different.bpkb_name_type = BpkbNameType::Different;
    let outcome = elaborator
        .elaborate(&different, Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(outcome.code, codes::ELABORATE_NO_MAPPING);

    let mut old_vehicle = request;
    old_vehicle.manufacture_year = 2010;
    let outcome = elaborator
        .elaborate(&old_vehicle, Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(outcome.vehicle_age, Some(VehicleAgeBucket::Over12));
    assert_eq!(outcome.code, codes::ELABORATE_NO_MAPPING);
}

#[test]
fn no_hit_rows_include_both_ltv_bounds() {
    let elaborator = elaborator();
    for ltv in [0.0, 75.0] {
        let outcome = elaborator
            .elaborate(&elaborate_request(BureauResult::NoHit, 24, ltv), Some(Cluster::C), today())
            .expect("elaborate runs");
        assert_eq!(outcome.code, codes::ELABORATE_SCHEME_PASS, "ltv {ltv}");
    }

    let outcome = elaborator
        .elaborate(&elaborate_request(BureauResult::NoHit, 24, 75.5), Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(outcome.code, codes::ELABORATE_NO_MAPPING);
}

#[test]
fn reject_rows_match_balance_band_before_tenor() {
    let elaborator = elaborator();
    let mut request = elaborate_request(BureauResult::Reject, 12, 99.0);

    request.total_baki_debet = 5_000_000.0;
    let outcome = elaborator
        .elaborate(&request, Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(outcome.decision, Decision::Pass);

    request.total_baki_debet = 5_000_001.0;
    let outcome = elaborator
        .elaborate(&request, Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(outcome.decision, Decision::Reject);
    assert_eq!(outcome.code, codes::ELABORATE_SCHEME_REJECT);

    request.total_baki_debet = 5_000_000.0;
    request.tenor = 30;
    let outcome = elaborator
        .elaborate(&request, Some(Cluster::C), today())
        .expect("elaborate runs");
    assert_eq!(outcome.code, codes::ELABORATE_NO_MAPPING);
}

#[test]
fn zero_tenor_is_a_bad_request() {
    match elaborator().elaborate(&elaborate_request(BureauResult::Pass, 0, 50.0), Some(Cluster::C), today()) {
        Err(ElaborateError::BadRequest(_)) => {}
        other => panic!("expected bad request, got {other:?}"),
    }
}

#[test]
fn vehicle_age_bucket_boundary_is_twelve_years() {
    // 2015-01-01 to 2026-10-19 is 11 whole years.
    let twelve = vehicle_age(2015, 12, today());
    assert_eq!(twelve, 12);
    assert_eq!(VehicleAgeBucket::from_age(twelve), VehicleAgeBucket::UpTo12);

    let thirteen = vehicle_age(2015, 24, today());
    assert_eq!(thirteen, 13);
    assert_eq!(VehicleAgeBucket::from_age(thirteen), VehicleAgeBucket::Over12);
}

#[test]
fn vehicle_built_after_today_counts_tenor_only() {
    assert_eq!(vehicle_age(2027, 36, today()), 3);
}

#[test]
fn bureau_result_parses_table_wording() {
    assert_eq!("no hit".parse::<BureauResult>(), Ok(BureauResult::NoHit));
    assert_eq!("NO_HIT".parse::<BureauResult>(), Ok(BureauResult::NoHit));
    assert!(matches!(
        "MAYBE".parse::<BureauResult>(),
        Err(ElaborateError::BadRequest(_))
    ));
}
