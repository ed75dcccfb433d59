use super::domain::{BureauResult, LtvMappingRow, LtvOutcome, LtvRequest};
use crate::workflows::policy::{format_juta, format_number, PolicyThresholds};

/// Walks every row of the (bureau result, cluster) pair once. The first applicable
/// row gives the LTV; rows with a positive LTV also feed the longest usable tenor.
pub(crate) fn scan(
    rows: &[LtvMappingRow],
    request: &LtvRequest,
    thresholds: &PolicyThresholds,
) -> LtvOutcome {
    let mut ltv: Option<f64> = None;
    let mut max_tenor = 0;

    for row in rows
        .iter()
        .filter(|row| row.result_pefindo == request.bureau_result && row.cluster == request.cluster)
    {
        if ltv.is_none() && applies(row, request, thresholds) {
            ltv = Some(row.ltv);
        }
        if row.ltv > 0.0 && eligible_ignoring_tenor(row, request, thresholds) {
            max_tenor = max_tenor.max(row.tenor_end);
        }
    }

    if request.cluster.is_high_risk()
        && request.total_baki_debet > thresholds.cluster_ef_baki_debet_limit
    {
        return LtvOutcome {
            ltv: 0.0,
            max_tenor: 0,
            adjust_tenor: false,
            reason: format!(
                "Cluster E/F & Baki Debet > {}",
                format_juta(thresholds.cluster_ef_baki_debet_limit)
            ),
        };
    }

    let matched = ltv;
    let ltv = matched.unwrap_or(0.0);
    let adjust_tenor = ltv <= 0.0 && max_tenor > 0;
    let reason = if ltv > 0.0 {
        format!("LTV {}% - Tenor {} Bulan", format_number(ltv), request.tenor)
    } else if adjust_tenor {
        format!(
            "Tenor {} Bulan Tidak Tersedia - Maksimal Tenor {max_tenor} Bulan",
            request.tenor
        )
    } else if matched.is_some() {
        format!("LTV Tidak Tersedia - Tenor {} Bulan", request.tenor)
    } else {
        "Tidak Ada Mapping LTV Yang Sesuai".to_string()
    };

    LtvOutcome {
        ltv,
        max_tenor,
        adjust_tenor,
        reason,
    }
}

fn applies(row: &LtvMappingRow, request: &LtvRequest, thresholds: &PolicyThresholds) -> bool {
    let tenor_within = row.tenor_start <= request.tenor && request.tenor <= row.tenor_end;
    if request.tenor >= thresholds.ltv_tenor_split {
        tenor_within && attributes_match(row, request)
    } else {
        tenor_within && balance_matches(row, request)
    }
}

fn eligible_ignoring_tenor(
    row: &LtvMappingRow,
    request: &LtvRequest,
    thresholds: &PolicyThresholds,
) -> bool {
    if row.tenor_start >= thresholds.ltv_tenor_split {
        attributes_match(row, request)
    } else {
        balance_matches(row, request)
    }
}

fn attributes_match(row: &LtvMappingRow, request: &LtvRequest) -> bool {
    row.bpkb_name_type
        .map_or(true, |bpkb| bpkb == request.bpkb_name_type)
        && row.age_vehicle.map_or(true, |age| age == request.vehicle_age)
}

/// Only REJECT rows filter on the outstanding balance.
fn balance_matches(row: &LtvMappingRow, request: &LtvRequest) -> bool {
    if request.bureau_result != BureauResult::Reject {
        return true;
    }
    row.total_baki_debet_start
        .map_or(true, |start| request.total_baki_debet > start)
        && row
            .total_baki_debet_end
            .map_or(true, |end| request.total_baki_debet <= end)
}
