//! LTV and tenor elaboration that runs once filtering has let a prospect through.

mod domain;
mod ltv;
mod scheme;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

pub use domain::{
    vehicle_age, BureauResult, ElaborateError, ElaborateOutcome, ElaborateRequest,
    ElaborateSchemeRow, LtvMappingRow, LtvOutcome, LtvRequest, VehicleAgeBucket,
};

use crate::workflows::filtering::{codes, Cluster, Decision};
use crate::workflows::policy::{format_juta, PolicyThresholds};
use scheme::{predicate_for, SchemeQuery};

/// Holds the read-only elaborate tables and applies them to requests.
#[derive(Debug, Clone)]
pub struct LtvElaborator {
    thresholds: PolicyThresholds,
    scheme: Arc<Vec<ElaborateSchemeRow>>,
    ltv_rows: Arc<Vec<LtvMappingRow>>,
}

impl LtvElaborator {
    pub fn new(
        thresholds: PolicyThresholds,
        scheme: Arc<Vec<ElaborateSchemeRow>>,
        ltv_rows: Arc<Vec<LtvMappingRow>>,
    ) -> Self {
        Self {
            thresholds,
            scheme,
            ltv_rows,
        }
    }

    pub fn thresholds(&self) -> &PolicyThresholds {
        &self.thresholds
    }

    /// First-pass eligibility. Balance ceilings are checked before any table row,
    /// so an over-limit balance never reaches the mapping.
    pub fn elaborate(
        &self,
        request: &ElaborateRequest,
        cluster: Option<Cluster>,
        today: NaiveDate,
    ) -> Result<ElaborateOutcome, ElaborateError> {
        if request.tenor == 0 {
            return Err(ElaborateError::BadRequest(
                "tenor must be at least one month".to_string(),
            ));
        }

        let limits = &self.thresholds;
        let balance = request.total_baki_debet;

        if balance > limits.baki_debet_limit {
            return Ok(reject(
                codes::ELABORATE_BAKI_DEBET_OVER_LIMIT,
                format!("Baki Debet > {}", format_juta(limits.baki_debet_limit)),
                cluster,
                None,
            ));
        }

        if balance > limits.cluster_ef_baki_debet_limit
            && cluster.map_or(false, Cluster::is_high_risk)
        {
            return Ok(reject(
                codes::ELABORATE_CLUSTER_EF_BAKI_DEBET,
                format!(
                    "Cluster E/F & Baki Debet > {}",
                    format_juta(limits.cluster_ef_baki_debet_limit)
                ),
                cluster,
                None,
            ));
        }

        let Some(cluster) = cluster else {
            return Ok(reject(
                codes::ELABORATE_CLUSTER_NOT_FOUND,
                format!(
                    "Cluster Tidak Ditemukan - Cabang {} - {}",
                    request.branch_id.trim(),
                    request.bpkb_name_type.label()
                ),
                None,
                None,
            ));
        };

        let age = VehicleAgeBucket::from_age(vehicle_age(
            request.manufacture_year,
            request.tenor,
            today,
        ));
        let predicate = predicate_for(
            request.bureau_result,
            SchemeQuery {
                cluster,
                tenor: request.tenor,
                bpkb_name_type: request.bpkb_name_type,
                vehicle_age: age,
                ltv: request.ltv_otr,
                total_baki_debet: balance,
            },
        );

        let outcome = match self.scheme.iter().find(|row| predicate(row)) {
            Some(row) => {
                let code = match row.decision {
                    Decision::Pass => codes::ELABORATE_SCHEME_PASS,
                    Decision::Reject => codes::ELABORATE_SCHEME_REJECT,
                };
                ElaborateOutcome {
                    code: code.to_string(),
                    decision: row.decision,
                    reason: format!(
                        "{} - PBK {} - Tenor {} Bulan - Usia Kendaraan {} - {}",
                        cluster.label(),
                        request.bureau_result.label(),
                        request.tenor,
                        age,
                        row.decision.label()
                    ),
                    cluster: Some(cluster),
                    vehicle_age: Some(age),
                }
            }
            None => reject(
                codes::ELABORATE_NO_MAPPING,
                "Tidak Ada Mapping Elaborate Yang Sesuai".to_string(),
                Some(cluster),
                Some(age),
            ),
        };

        info!(
            prospect_id = %request.prospect_id,
            cluster = cluster.label(),
            code = %outcome.code,
            decision = outcome.decision.label(),
            "elaborate evaluated"
        );
        Ok(outcome)
    }

    /// Tenor/LTV lookup. Pure over the loaded table, so repeated calls agree.
    pub fn elaborate_ltv(&self, request: &LtvRequest) -> Result<LtvOutcome, ElaborateError> {
        if request.tenor == 0 {
            return Err(ElaborateError::BadRequest(
                "tenor must be at least one month".to_string(),
            ));
        }

        let outcome = ltv::scan(&self.ltv_rows, request, &self.thresholds);
        debug!(
            cluster = request.cluster.label(),
            tenor = request.tenor,
            ltv = outcome.ltv,
            max_tenor = outcome.max_tenor,
            adjust_tenor = outcome.adjust_tenor,
            "ltv resolved"
        );
        Ok(outcome)
    }
}

fn reject(
    code: &str,
    reason: String,
    cluster: Option<Cluster>,
    vehicle_age: Option<VehicleAgeBucket>,
) -> ElaborateOutcome {
    ElaborateOutcome {
        code: code.to_string(),
        decision: Decision::Reject,
        reason,
        cluster,
        vehicle_age,
    }
}
