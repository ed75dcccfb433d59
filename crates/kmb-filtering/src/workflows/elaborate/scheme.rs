//! Row predicates of the full-elaborate table. Each bureau result keeps its own
//! builder because bound inclusivity differs between them.

use super::domain::{BureauResult, ElaborateSchemeRow, VehicleAgeBucket};
use crate::workflows::filtering::{BpkbNameType, Cluster};

/// Facts a scheme row is matched against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SchemeQuery {
    pub(crate) cluster: Cluster,
    pub(crate) tenor: u32,
    pub(crate) bpkb_name_type: BpkbNameType,
    pub(crate) vehicle_age: VehicleAgeBucket,
    pub(crate) ltv: f64,
    pub(crate) total_baki_debet: f64,
}

pub(crate) type SchemePredicate = Box<dyn Fn(&ElaborateSchemeRow) -> bool>;

pub(crate) fn predicate_for(result: BureauResult, query: SchemeQuery) -> SchemePredicate {
    match result {
        BureauResult::Pass => pass_predicate(query),
        BureauResult::NoHit => no_hit_predicate(query),
        BureauResult::Reject => reject_predicate(query),
    }
}

/// PASS rows: tenor inclusive, LTV in `(start, end]`.
fn pass_predicate(query: SchemeQuery) -> SchemePredicate {
    Box::new(move |row| {
        row.result_pefindo == BureauResult::Pass
            && row.cluster == query.cluster
            && tenor_within(row, query.tenor)
            && matches_optional(row.bpkb_name_type, query.bpkb_name_type)
            && matches_optional(row.age_vehicle, query.vehicle_age)
            && row.ltv_start.map_or(true, |start| query.ltv > start)
            && row.ltv_end.map_or(true, |end| query.ltv <= end)
    })
}

/// NO HIT rows: tenor inclusive, LTV in `[start, end]`.
fn no_hit_predicate(query: SchemeQuery) -> SchemePredicate {
    Box::new(move |row| {
        row.result_pefindo == BureauResult::NoHit
            && row.cluster == query.cluster
            && tenor_within(row, query.tenor)
            && matches_optional(row.bpkb_name_type, query.bpkb_name_type)
            && matches_optional(row.age_vehicle, query.vehicle_age)
            && row.ltv_start.map_or(true, |start| query.ltv >= start)
            && row.ltv_end.map_or(true, |end| query.ltv <= end)
    })
}

/// REJECT rows: balance in `(start, end]` checked before tenor, no LTV filter.
fn reject_predicate(query: SchemeQuery) -> SchemePredicate {
    Box::new(move |row| {
        row.result_pefindo == BureauResult::Reject
            && row.cluster == query.cluster
            && row
                .total_baki_debet_start
                .map_or(true, |start| query.total_baki_debet > start)
            && row
                .total_baki_debet_end
                .map_or(true, |end| query.total_baki_debet <= end)
            && tenor_within(row, query.tenor)
    })
}

fn tenor_within(row: &ElaborateSchemeRow, tenor: u32) -> bool {
    row.tenor_start <= tenor && tenor <= row.tenor_end
}

fn matches_optional<T: PartialEq>(filter: Option<T>, value: T) -> bool {
    filter.map_or(true, |expected| expected == value)
}
