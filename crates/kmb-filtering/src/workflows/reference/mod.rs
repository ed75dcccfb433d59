//! Read-only mapping tables loaded once from CSV.

mod parser;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::workflows::elaborate::{ElaborateSchemeRow, LtvElaborator, LtvMappingRow};
use crate::workflows::filtering::{ClusterMapping, ClusterResolver};
use crate::workflows::policy::PolicyThresholds;

pub const CLUSTER_FILE: &str = "cluster_branch.csv";
pub const SCHEME_FILE: &str = "elaborate_scheme.csv";
pub const LTV_FILE: &str = "elaborate_ltv.csv";

#[derive(Debug)]
pub enum ReferenceDataError {
    Io(std::io::Error),
    Csv(csv::Error),
    Invalid {
        table: &'static str,
        line: usize,
        message: String,
    },
}

impl std::fmt::Display for ReferenceDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceDataError::Io(err) => write!(f, "failed to read reference table: {}", err),
            ReferenceDataError::Csv(err) => write!(f, "invalid reference CSV data: {}", err),
            ReferenceDataError::Invalid {
                table,
                line,
                message,
            } => write!(f, "{table} line {line}: {message}"),
        }
    }
}

impl std::error::Error for ReferenceDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceDataError::Io(err) => Some(err),
            ReferenceDataError::Csv(err) => Some(err),
            ReferenceDataError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReferenceDataError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ReferenceDataError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Every mapping table the decision core consults. Shared through `Arc` and never
/// mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub clusters: Arc<Vec<ClusterMapping>>,
    pub scheme: Arc<Vec<ElaborateSchemeRow>>,
    pub ltv: Arc<Vec<LtvMappingRow>>,
}

impl ReferenceTables {
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ReferenceDataError> {
        let dir = dir.as_ref();
        let tables = Self::from_readers(
            std::fs::File::open(dir.join(CLUSTER_FILE))?,
            std::fs::File::open(dir.join(SCHEME_FILE))?,
            std::fs::File::open(dir.join(LTV_FILE))?,
        )?;
        info!(
            dir = %dir.display(),
            clusters = tables.clusters.len(),
            scheme = tables.scheme.len(),
            ltv = tables.ltv.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }

    pub fn from_readers<A: Read, B: Read, C: Read>(
        clusters: A,
        scheme: B,
        ltv: C,
    ) -> Result<Self, ReferenceDataError> {
        Ok(Self {
            clusters: Arc::new(parser::parse_clusters(clusters)?),
            scheme: Arc::new(parser::parse_scheme(scheme)?),
            ltv: Arc::new(parser::parse_ltv(ltv)?),
        })
    }

    pub fn cluster_resolver(&self) -> ClusterResolver {
        ClusterResolver::new(self.clusters.iter().cloned())
    }

    pub fn elaborator(&self, thresholds: PolicyThresholds) -> LtvElaborator {
        LtvElaborator::new(thresholds, Arc::clone(&self.scheme), Arc::clone(&self.ltv))
    }
}
