use super::common::*;
use crate::workflows::elaborate::{BureauResult, ElaborateError, VehicleAgeBucket};
use crate::workflows::filtering::{BpkbNameType, Cluster};

#[test]
fn short_tenor_uses_tenor_bounds_only() {
    let outcome = elaborator()
        .elaborate_ltv(&ltv_request(12))
        .expect("ltv resolves");
    assert_eq!(outcome.ltv, 85.0);
    assert_eq!(outcome.max_tenor, 60);
    assert!(!outcome.adjust_tenor);
    assert_eq!(outcome.reason, "LTV 85% - Tenor 12 Bulan");
}

#[test]
fn long_tenor_also_matches_bpkb_and_vehicle_age() {
    let outcome = elaborator()
        .elaborate_ltv(&ltv_request(48))
        .expect("ltv resolves");
    assert_eq!(outcome.ltv, 75.0);
    assert_eq!(outcome.max_tenor, 60);
}

#[test]
fn zero_ltv_with_shorter_usable_tenor_asks_for_adjustment() {
    let mut request = ltv_request(48);
    request.bpkb_name_type = BpkbNameType::Different;

    let outcome = elaborator().elaborate_ltv(&request).expect("ltv resolves");
    assert_eq!(outcome.ltv, 0.0);
    assert_eq!(outcome.max_tenor, 35);
    assert!(outcome.adjust_tenor);
    assert_eq!(
        outcome.reason,
        "Tenor 48 Bulan Tidak Tersedia - Maksimal Tenor 35 Bulan"
    );
}

#[test]
fn old_vehicle_on_long_tenor_gets_nothing_above_short_rows() {
    let mut request = ltv_request(40);
    request.vehicle_age = VehicleAgeBucket::Over12;

    let outcome = elaborator().elaborate_ltv(&request).expect("ltv resolves");
    assert_eq!(outcome.ltv, 0.0);
    assert_eq!(outcome.max_tenor, 35);
    assert!(outcome.adjust_tenor);
}

#[test]
fn reject_rows_filter_on_balance() {
    let mut request = ltv_request(12);
    request.bureau_result = BureauResult::Reject;
    request.total_baki_debet = 4_000_000.0;

    let outcome = elaborator().elaborate_ltv(&request).expect("ltv resolves");
    assert_eq!(outcome.ltv, 60.0);
    assert_eq!(outcome.max_tenor, 24);

    request.total_baki_debet = 6_000_000.0;
    let outcome = elaborator().elaborate_ltv(&request).expect("ltv resolves");
    assert_eq!(outcome.ltv, 0.0);
    assert_eq!(outcome.max_tenor, 0);
    assert!(!outcome.adjust_tenor);
    assert_eq!(outcome.reason, "LTV Tidak Tersedia - Tenor 12 Bulan");
}

#[test]
fn cluster_e_f_over_balance_overrides_a_matching_row() {
    let mut request = ltv_request(12);
    request.cluster = Cluster::E;
    request.total_baki_debet = 12_000_000.0;

    let outcome = elaborator().elaborate_ltv(&request).expect("ltv resolves");
    assert_eq!(outcome.ltv, 0.0);
    assert_eq!(outcome.max_tenor, 0);
    assert!(!outcome.adjust_tenor);
    assert_eq!(outcome.reason, "Cluster E/F & Baki Debet > 10 Juta");

    request.total_baki_debet = 10_000_000.0;
    let outcome = elaborator().elaborate_ltv(&request).expect("ltv resolves");
    assert_eq!(outcome.ltv, 70.0);
}

#[test]
fn empty_table_yields_zero_result() {
    let outcome = empty_elaborator()
        .elaborate_ltv(&ltv_request(24))
        .expect("ltv resolves");
    assert_eq!(outcome.ltv, 0.0);
    assert_eq!(outcome.max_tenor, 0);
    assert!(!outcome.adjust_tenor);
    assert_eq!(outcome.reason, "Tidak Ada Mapping LTV Yang Sesuai");
}

#[test]
fn repeated_calls_agree() {
    let elaborator = elaborator();
    for tenor in [6, 12, 24, 36, 48, 60, 72] {
        let request = ltv_request(tenor);
        let first = elaborator.elaborate_ltv(&request).expect("ltv resolves");
        let second = elaborator.elaborate_ltv(&request).expect("ltv resolves");
        assert_eq!(first, second, "tenor {tenor}");
    }
}

#[test]
fn zero_tenor_is_a_bad_request() {
    match elaborator().elaborate_ltv(&ltv_request(0)) {
        Err(ElaborateError::BadRequest(_)) => {}
        other => panic!("expected bad request, got {other:?}"),
    }
}
