//! Credit filtering: blacklist screening, cluster resolution and bureau interpretation
//! for an applicant and optional spouse.
//!
//! Collaborators (dupcheck, bureau, cluster source, storage) sit behind traits so the
//! service can be driven entirely in memory.

pub mod blacklist;
pub mod bureau;
pub mod cluster;
pub mod codes;
pub mod domain;
pub mod repository;
pub mod service;
pub mod upstream;

#[cfg(test)]
mod tests;

pub use blacklist::{BlacklistChecker, BlacklistVerdict};
pub use bureau::{
    BureauCategory, BureauContext, BureauDecisionEngine, BureauDetailRow, BureauOutcome,
    BureauReport, BureauResponse, OverdueValue,
};
pub use cluster::{ClusterLookup, ClusterMapping, ClusterResolver};
pub use domain::{
    Applicant, BpkbNameType, Cluster, CustomerSegment, CustomerStatus, CustomerStatusBucket,
    Decision, DupcheckResult, EligibilityDecision, FilteringRequest, Gender, Party, ProspectId,
    SpouseApplicant,
};
pub use repository::{
    FilteringRecord, FilteringRepository, InMemoryFilteringRepository, RepositoryError,
};
pub use service::{ErrorKind, FilteringError, FilteringService};
pub use upstream::{BureauClient, BureauInquiry, DupcheckClient, UpstreamContext, UpstreamError};
