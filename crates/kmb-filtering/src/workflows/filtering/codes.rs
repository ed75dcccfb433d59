//! Decision codes consumed by downstream systems. Customer and spouse codes stay
//! distinct even where the rule behind them is identical.

// Blacklist, applicant.
pub const KONSUMEN_BLACKLIST: &str = "1001";
pub const KONSUMEN_OVD_90: &str = "1002";
pub const KONSUMEN_ASSET_INVENTORY: &str = "1003";
pub const KONSUMEN_RESTRUCTURE: &str = "1004";
pub const KONSUMEN_NON_BLACKLIST: &str = "1005";

// Blacklist, spouse.
pub const PASANGAN_BLACKLIST: &str = "1011";
pub const PASANGAN_OVD_90: &str = "1012";
pub const PASANGAN_ASSET_INVENTORY: &str = "1013";
pub const PASANGAN_RESTRUCTURE: &str = "1014";
pub const PASANGAN_NON_BLACKLIST: &str = "1015";

// Bureau without a scored report.
pub const PBK_NO_HIT: &str = "2001";
pub const PBK_TIDAK_DITEMUKAN_NEW: &str = "2002";
pub const PBK_TIDAK_DITEMUKAN_AO_RO: &str = "2003";

// Bureau, BPKB in the applicant's name.
pub const NAMA_SAMA_CURRENT_OVD_NULL: &str = "2101";
pub const NAMA_SAMA_CURRENT_OVD_UNDER_LIMIT: &str = "2102";
pub const NAMA_SAMA_CURRENT_OVD_OVER_LIMIT: &str = "2103";
pub const NAMA_SAMA_OVD_12_OVER_CURRENT_NULL: &str = "2104";
pub const NAMA_SAMA_OVD_12_OVER_CURRENT_UNDER: &str = "2105";
pub const NAMA_SAMA_OVD_12_OVER_CURRENT_OVER: &str = "2106";
pub const NAMA_SAMA_CLUSTER_EF_BAKI_DEBET: &str = "2107";

// Bureau, BPKB in someone else's name.
pub const NAMA_BEDA_CURRENT_OVD_NULL: &str = "2201";
pub const NAMA_BEDA_CURRENT_OVD_UNDER_LIMIT: &str = "2202";
pub const NAMA_BEDA_CURRENT_OVD_OVER_LIMIT: &str = "2203";
pub const NAMA_BEDA_OVD_12_OVER_CURRENT_NULL: &str = "2204";
pub const NAMA_BEDA_OVD_12_OVER_CURRENT_UNDER: &str = "2205";
pub const NAMA_BEDA_OVD_12_OVER_CURRENT_OVER: &str = "2206";
pub const NAMA_BEDA_BAKI_DEBET_OVD: &str = "2207";

// Elaboration.
pub const ELABORATE_BAKI_DEBET_OVER_LIMIT: &str = "3001";
pub const ELABORATE_CLUSTER_EF_BAKI_DEBET: &str = "3002";
pub const ELABORATE_CLUSTER_NOT_FOUND: &str = "3003";
pub const ELABORATE_SCHEME_PASS: &str = "3004";
pub const ELABORATE_SCHEME_REJECT: &str = "3005";
pub const ELABORATE_NO_MAPPING: &str = "3006";
pub const ELABORATE_FILTERING_NOT_PASSED: &str = "3007";
