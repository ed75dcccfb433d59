//! Decision tables for scored bureau reports. Same-name and different-name BPKB
//! keep separate tables; wording and outcomes differ between them.

use super::super::codes;
use super::super::domain::{CustomerStatus, Decision};
use super::report::BureauCategory;
use crate::workflows::policy::{format_juta, format_number, PolicyThresholds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Last12Band {
    WithinOrAbsent,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CurrentBand {
    Absent,
    Within,
    Over,
}

/// Overdue facts of a scored report after coercion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OverdueFacts {
    pub(crate) category: BureauCategory,
    pub(crate) last_12: Option<f64>,
    pub(crate) current: Option<f64>,
}

impl OverdueFacts {
    pub(crate) fn last_12_band(&self, limits: &PolicyThresholds) -> Last12Band {
        match self.last_12 {
            Some(days) if days > limits.ovd_last_12_limit => Last12Band::Over,
            _ => Last12Band::WithinOrAbsent,
        }
    }

    pub(crate) fn current_band(&self, limits: &PolicyThresholds) -> CurrentBand {
        match self.current {
            None => CurrentBand::Absent,
            Some(days) if days <= limits.ovd_current_limit => CurrentBand::Within,
            Some(_) => CurrentBand::Over,
        }
    }

    pub(crate) fn exceeds_any_limit(&self, limits: &PolicyThresholds) -> bool {
        self.last_12_band(limits) == Last12Band::Over
            || self.current_band(limits) == CurrentBand::Over
    }

    fn bands(&self, limits: &PolicyThresholds) -> (Last12Band, CurrentBand) {
        (self.last_12_band(limits), self.current_band(limits))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecisionRule {
    Pass,
    Reject,
    RejectWhenCategoryIii,
}

impl DecisionRule {
    pub(crate) fn resolve(self, category: BureauCategory) -> Decision {
        match self {
            DecisionRule::Pass => Decision::Pass,
            DecisionRule::Reject => Decision::Reject,
            DecisionRule::RejectWhenCategoryIii if category == BureauCategory::III => {
                Decision::Reject
            }
            DecisionRule::RejectWhenCategoryIii => Decision::Pass,
        }
    }
}

pub(crate) type OverduePredicate = fn(&OverdueFacts, &PolicyThresholds) -> bool;

/// One row of the overdue table.
#[derive(Clone)]
pub(crate) struct BureauRule {
    pub(crate) predicate: OverduePredicate,
    pub(crate) code: &'static str,
    pub(crate) reason: &'static str,
    pub(crate) decision: DecisionRule,
}

/// Ordered rows plus the row taken when nothing above matched.
#[derive(Clone)]
pub(crate) struct OverdueTable {
    pub(crate) rules: Vec<BureauRule>,
    pub(crate) otherwise: BureauRule,
}

impl OverdueTable {
    pub(crate) fn select(&self, facts: &OverdueFacts, limits: &PolicyThresholds) -> &BureauRule {
        self.rules
            .iter()
            .find(|rule| (rule.predicate)(facts, limits))
            .unwrap_or(&self.otherwise)
    }
}

pub(crate) fn same_name_overdue_table() -> OverdueTable {
    OverdueTable {
        rules: vec![
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::WithinOrAbsent, CurrentBand::Absent)
                },
                code: codes::NAMA_SAMA_CURRENT_OVD_NULL,
                reason: "{bpkb} - PBK Kategori {category} - OVD 12 Bulan Terakhir <= {t12} & Tidak Ada OVD Current",
                decision: DecisionRule::Pass,
            },
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::WithinOrAbsent, CurrentBand::Within)
                },
                code: codes::NAMA_SAMA_CURRENT_OVD_UNDER_LIMIT,
                reason: "{bpkb} - PBK Kategori {category} - OVD 12 Bulan Terakhir <= {t12} & OVD Current <= {tc}",
                decision: DecisionRule::Pass,
            },
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::WithinOrAbsent, CurrentBand::Over)
                },
                code: codes::NAMA_SAMA_CURRENT_OVD_OVER_LIMIT,
                reason: "{bpkb} - PBK Kategori {category} - OVD 12 Bulan Terakhir <= {t12} & OVD Current > {tc}",
                decision: DecisionRule::RejectWhenCategoryIii,
            },
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::Over, CurrentBand::Absent)
                },
                code: codes::NAMA_SAMA_OVD_12_OVER_CURRENT_NULL,
                reason: "{bpkb} - PBK Kategori {category} - OVD 12 Bulan Terakhir > {t12} & Tidak Ada OVD Current",
                decision: DecisionRule::RejectWhenCategoryIii,
            },
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::Over, CurrentBand::Within)
                },
                code: codes::NAMA_SAMA_OVD_12_OVER_CURRENT_UNDER,
                reason: "{bpkb} - PBK Kategori {category} - OVD 12 Bulan Terakhir > {t12} & OVD Current <= {tc}",
                decision: DecisionRule::RejectWhenCategoryIii,
            },
        ],
        otherwise: BureauRule {
            predicate: |facts, limits| facts.bands(limits) == (Last12Band::Over, CurrentBand::Over),
            code: codes::NAMA_SAMA_OVD_12_OVER_CURRENT_OVER,
            reason: "{bpkb} - PBK Kategori {category} - OVD 12 Bulan Terakhir > {t12} & OVD Current > {tc}",
            decision: DecisionRule::RejectWhenCategoryIii,
        },
    }
}

pub(crate) fn different_name_overdue_table() -> OverdueTable {
    OverdueTable {
        rules: vec![
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::WithinOrAbsent, CurrentBand::Absent)
                },
                code: codes::NAMA_BEDA_CURRENT_OVD_NULL,
                reason: "{bpkb} - PBK Kategori {category} - Max OVD 12 Bulan Terakhir <= {t12} & Current OVD Kosong",
                decision: DecisionRule::Pass,
            },
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::WithinOrAbsent, CurrentBand::Within)
                },
                code: codes::NAMA_BEDA_CURRENT_OVD_UNDER_LIMIT,
                reason: "{bpkb} - PBK Kategori {category} - Max OVD 12 Bulan Terakhir <= {t12} & Current OVD <= {tc}",
                decision: DecisionRule::Pass,
            },
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::WithinOrAbsent, CurrentBand::Over)
                },
                code: codes::NAMA_BEDA_CURRENT_OVD_OVER_LIMIT,
                reason: "{bpkb} - PBK Kategori {category} - Max OVD 12 Bulan Terakhir <= {t12} & Current OVD > {tc}",
                decision: DecisionRule::Reject,
            },
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::Over, CurrentBand::Absent)
                },
                code: codes::NAMA_BEDA_OVD_12_OVER_CURRENT_NULL,
                reason: "{bpkb} - PBK Kategori {category} - Max OVD 12 Bulan Terakhir > {t12} & Current OVD Kosong",
                decision: DecisionRule::Pass,
            },
            BureauRule {
                predicate: |facts, limits| {
                    facts.bands(limits) == (Last12Band::Over, CurrentBand::Within)
                },
                code: codes::NAMA_BEDA_OVD_12_OVER_CURRENT_UNDER,
                reason: "{bpkb} - PBK Kategori {category} - Max OVD 12 Bulan Terakhir > {t12} & Current OVD <= {tc}",
                decision: DecisionRule::Pass,
            },
        ],
        otherwise: BureauRule {
            predicate: |facts, limits| facts.bands(limits) == (Last12Band::Over, CurrentBand::Over),
            code: codes::NAMA_BEDA_OVD_12_OVER_CURRENT_OVER,
            reason: "{bpkb} - PBK Kategori {category} - Max OVD 12 Bulan Terakhir > {t12} & Current OVD > {tc}",
            decision: DecisionRule::Reject,
        },
    }
}

/// Write-off and balance facts for the second pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WriteOffFacts {
    pub(crate) wo_contract: bool,
    pub(crate) wo_ada_agunan: bool,
    pub(crate) status: CustomerStatus,
    pub(crate) balance: f64,
}

impl WriteOffFacts {
    fn over_limit(&self, limits: &PolicyThresholds) -> bool {
        self.balance > limits.baki_debet_limit
    }
}

pub(crate) type WriteOffPredicate = fn(&WriteOffFacts, &PolicyThresholds) -> bool;

/// Second-pass row: may flip `next_process` and replace the reason, never the decision.
#[derive(Clone)]
pub(crate) struct WriteOffRule {
    pub(crate) predicate: WriteOffPredicate,
    pub(crate) next_process: bool,
    pub(crate) reason: &'static str,
}

pub(crate) fn select_write_off<'a>(
    rules: &'a [WriteOffRule],
    facts: &WriteOffFacts,
    limits: &PolicyThresholds,
) -> Option<&'a WriteOffRule> {
    rules.iter().find(|rule| (rule.predicate)(facts, limits))
}

pub(crate) fn same_name_write_off_table() -> Vec<WriteOffRule> {
    vec![
        WriteOffRule {
            predicate: |facts, _| facts.wo_contract && facts.wo_ada_agunan,
            next_process: false,
            reason: "{bpkb} - PBK Kategori {category} - Ada Fasilitas WO Dengan Agunan",
        },
        WriteOffRule {
            predicate: |facts, limits| {
                facts.wo_contract && facts.status == CustomerStatus::New && facts.over_limit(limits)
            },
            next_process: false,
            reason: "{bpkb} - PBK Kategori {category} - WO Tanpa Agunan & Baki Debet > {baki_debet}",
        },
        WriteOffRule {
            predicate: |facts, _| facts.wo_contract && facts.status == CustomerStatus::New,
            next_process: true,
            reason: "{bpkb} - PBK Kategori {category} - WO Tanpa Agunan & Baki Debet <= {baki_debet}",
        },
        WriteOffRule {
            predicate: |facts, _| facts.wo_contract && facts.status.is_existing(),
            next_process: true,
            reason: "{bpkb} - PBK Kategori {category} - WO Tanpa Agunan - Konsumen {status}",
        },
        WriteOffRule {
            predicate: |facts, _| facts.wo_contract,
            next_process: false,
            reason: "{bpkb} - PBK Kategori {category} - WO Tanpa Agunan - Status Konsumen {status}",
        },
        WriteOffRule {
            predicate: |facts, limits| facts.over_limit(limits),
            next_process: false,
            reason: "{bpkb} - PBK Kategori {category} - Tidak Ada WO & Baki Debet > {baki_debet}",
        },
    ]
}

pub(crate) fn different_name_write_off_table() -> Vec<WriteOffRule> {
    vec![
        WriteOffRule {
            predicate: |facts, _| facts.wo_contract && !facts.status.is_existing(),
            next_process: false,
            reason: "{bpkb} - PBK Kategori {category} - Ada WO - Konsumen {status}",
        },
        WriteOffRule {
            predicate: |facts, _| facts.wo_contract && facts.wo_ada_agunan,
            next_process: false,
            reason: "{bpkb} - PBK Kategori {category} - Ada WO Dengan Agunan - Konsumen {status}",
        },
        WriteOffRule {
            predicate: |facts, limits| facts.wo_contract && facts.over_limit(limits),
            next_process: false,
            reason: "{bpkb} - PBK Kategori {category} - Ada WO & Baki Debet > {baki_debet} - Konsumen {status}",
        },
        WriteOffRule {
            predicate: |facts, _| facts.wo_contract,
            next_process: true,
            reason: "{bpkb} - PBK Kategori {category} - Ada WO Tanpa Agunan & Baki Debet <= {baki_debet} - Konsumen {status}",
        },
        WriteOffRule {
            predicate: |facts, limits| facts.over_limit(limits),
            next_process: false,
            reason: "{bpkb} - PBK Kategori {category} - Baki Debet > {baki_debet}",
        },
    ]
}

/// Values substituted into reason templates.
pub(crate) struct ReasonArgs<'a> {
    pub(crate) bpkb: &'a str,
    pub(crate) category: &'a str,
    pub(crate) status: &'a str,
    pub(crate) limits: &'a PolicyThresholds,
}

pub(crate) fn render(template: &str, args: &ReasonArgs<'_>) -> String {
    template
        .replace("{bpkb}", args.bpkb)
        .replace("{category}", args.category)
        .replace("{status}", args.status)
        .replace("{t12}", &format_number(args.limits.ovd_last_12_limit))
        .replace("{tc}", &format_number(args.limits.ovd_current_limit))
        .replace("{baki_debet}", &format_juta(args.limits.baki_debet_limit))
}
