use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::{BpkbNameType, Cluster, CustomerStatusBucket};
use super::upstream::UpstreamError;

/// One row of the branch cluster mapping. `cluster = None` mirrors an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMapping {
    pub branch_id: String,
    pub customer_status: CustomerStatusBucket,
    pub bpkb_name_type: BpkbNameType,
    pub cluster: Option<Cluster>,
}

/// Source of cluster labels. Only failures other than "not found" are errors.
pub trait ClusterLookup: Send + Sync {
    fn lookup(
        &self,
        branch_id: &str,
        status: CustomerStatusBucket,
        bpkb_name_type: BpkbNameType,
    ) -> Result<Option<Cluster>, UpstreamError>;
}

type ClusterKey = (String, CustomerStatusBucket, BpkbNameType);

/// Read-only cluster table keyed by (branch, status bucket, BPKB name type).
#[derive(Debug, Clone, Default)]
pub struct ClusterResolver {
    entries: HashMap<ClusterKey, Option<Cluster>>,
}

impl ClusterResolver {
    pub fn new(mappings: impl IntoIterator<Item = ClusterMapping>) -> Self {
        let mut entries = HashMap::new();
        for mapping in mappings {
            entries
                .entry((
                    mapping.branch_id.trim().to_string(),
                    mapping.customer_status,
                    mapping.bpkb_name_type,
                ))
                .or_insert(mapping.cluster);
        }
        Self { entries }
    }

    /// Missing rows and empty cells both resolve to `None`; defaulting is the caller's call.
    pub fn resolve(
        &self,
        branch_id: &str,
        status: CustomerStatusBucket,
        bpkb_name_type: BpkbNameType,
    ) -> Option<Cluster> {
        self.entries
            .get(&(branch_id.trim().to_string(), status, bpkb_name_type))
            .copied()
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ClusterLookup for ClusterResolver {
    fn lookup(
        &self,
        branch_id: &str,
        status: CustomerStatusBucket,
        bpkb_name_type: BpkbNameType,
    ) -> Result<Option<Cluster>, UpstreamError> {
        Ok(self.resolve(branch_id, status, bpkb_name_type))
    }
}
