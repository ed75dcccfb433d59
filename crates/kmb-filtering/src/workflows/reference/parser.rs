use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::workflows::elaborate::{
    BureauResult, ElaborateSchemeRow, LtvMappingRow, VehicleAgeBucket,
};
use crate::workflows::filtering::{
    BpkbNameType, Cluster, ClusterMapping, CustomerStatusBucket, Decision,
};

use super::ReferenceDataError;

pub(crate) const CLUSTER_TABLE: &str = "cluster_branch";
pub(crate) const SCHEME_TABLE: &str = "elaborate_scheme";
pub(crate) const LTV_TABLE: &str = "elaborate_ltv";

#[derive(Debug, Deserialize)]
struct ClusterRow {
    branch_id: String,
    customer_status: String,
    bpkb_name_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cluster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SchemeRow {
    result_pefindo: String,
    cluster: String,
    tenor_start: u32,
    tenor_end: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bpkb_name_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age_vehicle: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ltv_start: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ltv_end: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    total_baki_debet_start: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    total_baki_debet_end: Option<String>,
    decision: String,
}

#[derive(Debug, Deserialize)]
struct LtvRow {
    result_pefindo: String,
    cluster: String,
    tenor_start: u32,
    tenor_end: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bpkb_name_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    age_vehicle: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    total_baki_debet_start: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    total_baki_debet_end: Option<String>,
    ltv: f64,
}

pub(crate) fn parse_clusters<R: Read>(reader: R) -> Result<Vec<ClusterMapping>, ReferenceDataError> {
    let mut csv_reader = csv_reader(reader);
    let mut mappings = Vec::new();

    for (index, record) in csv_reader.deserialize::<ClusterRow>().enumerate() {
        let row = record?;
        let cell = Cell::new(CLUSTER_TABLE, index);
        mappings.push(ClusterMapping {
            branch_id: row.branch_id,
            customer_status: cell.parse::<CustomerStatusBucket>(&row.customer_status)?,
            bpkb_name_type: cell.parse::<BpkbNameType>(&row.bpkb_name_type)?,
            cluster: cell.parse_optional::<Cluster>(row.cluster.as_deref())?,
        });
    }

    Ok(mappings)
}

pub(crate) fn parse_scheme<R: Read>(
    reader: R,
) -> Result<Vec<ElaborateSchemeRow>, ReferenceDataError> {
    let mut csv_reader = csv_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<SchemeRow>().enumerate() {
        let row = record?;
        let cell = Cell::new(SCHEME_TABLE, index);
        cell.check_tenor(row.tenor_start, row.tenor_end)?;
        rows.push(ElaborateSchemeRow {
            result_pefindo: cell.parse::<BureauResult>(&row.result_pefindo)?,
            cluster: cell.parse::<Cluster>(&row.cluster)?,
            tenor_start: row.tenor_start,
            tenor_end: row.tenor_end,
            bpkb_name_type: cell.parse_optional::<BpkbNameType>(row.bpkb_name_type.as_deref())?,
            age_vehicle: cell.parse_optional::<VehicleAgeBucket>(row.age_vehicle.as_deref())?,
            ltv_start: cell.parse_optional::<f64>(row.ltv_start.as_deref())?,
            ltv_end: cell.parse_optional::<f64>(row.ltv_end.as_deref())?,
            total_baki_debet_start: cell
                .parse_optional::<f64>(row.total_baki_debet_start.as_deref())?,
            total_baki_debet_end: cell
                .parse_optional::<f64>(row.total_baki_debet_end.as_deref())?,
            decision: cell.decision(&row.decision)?,
        });
    }

    Ok(rows)
}

pub(crate) fn parse_ltv<R: Read>(reader: R) -> Result<Vec<LtvMappingRow>, ReferenceDataError> {
    let mut csv_reader = csv_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<LtvRow>().enumerate() {
        let row = record?;
        let cell = Cell::new(LTV_TABLE, index);
        cell.check_tenor(row.tenor_start, row.tenor_end)?;
        if row.ltv < 0.0 {
            return Err(cell.invalid(format!("ltv {} is negative", row.ltv)));
        }
        rows.push(LtvMappingRow {
            result_pefindo: cell.parse::<BureauResult>(&row.result_pefindo)?,
            cluster: cell.parse::<Cluster>(&row.cluster)?,
            tenor_start: row.tenor_start,
            tenor_end: row.tenor_end,
            bpkb_name_type: cell.parse_optional::<BpkbNameType>(row.bpkb_name_type.as_deref())?,
            age_vehicle: cell.parse_optional::<VehicleAgeBucket>(row.age_vehicle.as_deref())?,
            total_baki_debet_start: cell
                .parse_optional::<f64>(row.total_baki_debet_start.as_deref())?,
            total_baki_debet_end: cell
                .parse_optional::<f64>(row.total_baki_debet_end.as_deref())?,
            ltv: row.ltv,
        });
    }

    Ok(rows)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Location of a data row, for error reporting. Line 1 is the header.
struct Cell {
    table: &'static str,
    line: usize,
}

impl Cell {
    fn new(table: &'static str, index: usize) -> Self {
        Self {
            table,
            line: index + 2,
        }
    }

    fn invalid(&self, message: String) -> ReferenceDataError {
        ReferenceDataError::Invalid {
            table: self.table,
            line: self.line,
            message,
        }
    }

    fn parse<T>(&self, value: &str) -> Result<T, ReferenceDataError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        value
            .trim()
            .parse::<T>()
            .map_err(|err| self.invalid(err.to_string()))
    }

    fn parse_optional<T>(&self, value: Option<&str>) -> Result<Option<T>, ReferenceDataError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        value.map(|raw| self.parse::<T>(raw)).transpose()
    }

    fn decision(&self, value: &str) -> Result<Decision, ReferenceDataError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PASS" => Ok(Decision::Pass),
            "REJECT" => Ok(Decision::Reject),
            other => Err(self.invalid(format!("unknown decision '{other}'"))),
        }
    }

    fn check_tenor(&self, start: u32, end: u32) -> Result<(), ReferenceDataError> {
        if start > end {
            return Err(self.invalid(format!("tenor range {start}-{end} is inverted")));
        }
        Ok(())
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
