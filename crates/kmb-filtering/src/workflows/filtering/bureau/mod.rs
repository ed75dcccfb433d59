//! Interpretation of the credit-bureau answer into a filtering decision.

mod report;
mod rules;

pub use report::{
    BureauCategory, BureauContext, BureauDetailRow, BureauOutcome, BureauReport, BureauResponse,
    OverdueValue,
};

use super::codes;
use super::domain::{BpkbNameType, Cluster, Decision, EligibilityDecision, Party};
use crate::workflows::policy::{format_juta, PolicyThresholds};
use rules::{
    different_name_overdue_table, different_name_write_off_table, render,
    same_name_overdue_table, same_name_write_off_table, select_write_off, OverdueFacts,
    OverdueTable, ReasonArgs, WriteOffFacts, WriteOffRule,
};

/// Rule tables for one BPKB name type.
#[derive(Clone)]
struct NameTypeRules {
    overdue: OverdueTable,
    write_off: Vec<WriteOffRule>,
}

/// Turns a [`BureauResponse`] into an [`EligibilityDecision`] plus the bureau facts
/// the filtering record keeps. Pure: the same inputs always give the same outcome.
#[derive(Clone)]
pub struct BureauDecisionEngine {
    thresholds: PolicyThresholds,
    same_name: NameTypeRules,
    different_name: NameTypeRules,
}

impl Default for BureauDecisionEngine {
    fn default() -> Self {
        Self::new(PolicyThresholds::default())
    }
}

impl BureauDecisionEngine {
    pub fn new(thresholds: PolicyThresholds) -> Self {
        Self {
            thresholds,
            same_name: NameTypeRules {
                overdue: same_name_overdue_table(),
                write_off: same_name_write_off_table(),
            },
            different_name: NameTypeRules {
                overdue: different_name_overdue_table(),
                write_off: different_name_write_off_table(),
            },
        }
    }

    pub fn thresholds(&self) -> &PolicyThresholds {
        &self.thresholds
    }

    pub fn evaluate(&self, response: &BureauResponse, context: &BureauContext) -> BureauOutcome {
        let cluster = context
            .cluster
            .or_else(|| Cluster::fallback(context.bpkb_name_type, context.customer_segment));

        let report = match response {
            BureauResponse::NoRecord => return self.no_record(context, cluster),
            BureauResponse::Found(report) => report,
        };

        let decision = match report.category {
            None => EligibilityDecision::new(
                codes::PBK_NO_HIT,
                Decision::Pass,
                format!("{} - PBK No Hit", context.bpkb_name_type.label()),
                true,
            ),
            Some(category) => self.scored(report, category, context, cluster),
        };

        BureauOutcome {
            decision,
            cluster,
            total_baki_debet: report.baki_debet_non_agunan,
            pbk_report_customer: BureauDetailRow::from_payload(
                Party::Customer,
                report.pbk_report_customer.as_ref(),
            ),
            pbk_report_spouse: BureauDetailRow::from_payload(
                Party::Spouse,
                report.pbk_report_spouse.as_ref(),
            ),
        }
    }

    fn no_record(&self, context: &BureauContext, cluster: Option<Cluster>) -> BureauOutcome {
        let code = if context.customer_status.is_existing() {
            codes::PBK_TIDAK_DITEMUKAN_AO_RO
        } else {
            codes::PBK_TIDAK_DITEMUKAN_NEW
        };
        let reason = format!("PBK Tidak Ditemukan - {}", context.customer_status.label());

        BureauOutcome {
            decision: EligibilityDecision::new(code, Decision::Pass, reason, true),
            cluster,
            total_baki_debet: 0.0,
            pbk_report_customer: None,
            pbk_report_spouse: None,
        }
    }

    fn scored(
        &self,
        report: &BureauReport,
        category: BureauCategory,
        context: &BureauContext,
        cluster: Option<Cluster>,
    ) -> EligibilityDecision {
        let limits = &self.thresholds;
        let rules = match context.bpkb_name_type {
            BpkbNameType::Same => &self.same_name,
            BpkbNameType::Different => &self.different_name,
        };
        let args = ReasonArgs {
            bpkb: context.bpkb_name_type.label(),
            category: category.roman(),
            status: context.customer_status.label(),
            limits,
        };

        let facts = OverdueFacts {
            category,
            last_12: report.last_12_months_overdue.days(),
            current: report.current_overdue.days(),
        };
        let row = rules.overdue.select(&facts, limits);
        let mut decision = EligibilityDecision::new(
            row.code,
            row.decision.resolve(category),
            render(row.reason, &args),
            true,
        );

        let balance = report.baki_debet_non_agunan;
        let write_off = WriteOffFacts {
            wo_contract: report.wo_contract,
            wo_ada_agunan: report.wo_ada_agunan,
            status: context.customer_status,
            balance,
        };
        if let Some(rule) = select_write_off(&rules.write_off, &write_off, limits) {
            decision.next_process = rule.next_process;
            decision.reason = render(rule.reason, &args);
        }

        if decision.decision == Decision::Reject && decision.next_process {
            if balance <= limits.baki_debet_small_tier {
                decision.reason = format!(
                    "{} - Baki Debet <= {}",
                    decision.reason,
                    format_juta(limits.baki_debet_small_tier)
                );
            } else if balance <= limits.baki_debet_limit {
                decision.reason = format!(
                    "{} - Baki Debet > {} s/d {}",
                    decision.reason,
                    format_juta(limits.baki_debet_small_tier),
                    format_juta(limits.baki_debet_limit)
                );
            }
        }

        if facts.exceeds_any_limit(limits) && limits.in_mid_balance_band(balance) {
            let band = format!(
                "Baki Debet > {} s/d {}",
                format_juta(limits.baki_debet_small_tier),
                format_juta(limits.baki_debet_limit)
            );
            match (context.bpkb_name_type, cluster) {
                (BpkbNameType::Different, _) => {
                    decision = EligibilityDecision::new(
                        codes::NAMA_BEDA_BAKI_DEBET_OVD,
                        Decision::Reject,
                        format!(
                            "{} - PBK Kategori {} - OVD Melebihi Batas & {band}",
                            args.bpkb, args.category
                        ),
                        false,
                    );
                }
                (BpkbNameType::Same, Some(cluster)) if cluster.is_high_risk() => {
                    decision = EligibilityDecision::new(
                        codes::NAMA_SAMA_CLUSTER_EF_BAKI_DEBET,
                        Decision::Reject,
                        format!(
                            "{} - PBK Kategori {} - {} & OVD Melebihi Batas & {band}",
                            args.bpkb,
                            args.category,
                            cluster.label()
                        ),
                        false,
                    );
                }
                _ => {}
            }
        }

        decision
    }
}
