use crate::cli::{ApprovalAdvanceArgs, ApprovalNextArgs, ElaborateArgs, FilterArgs, LtvArgs};
use crate::infra::FilteringCase;
use chrono::Local;
use kmb_filtering::config::AppConfig;
use kmb_filtering::error::AppError;
use kmb_filtering::workflows::approval::{next_approval_step, ApprovalScheme};
use kmb_filtering::workflows::elaborate::LtvRequest;
use kmb_filtering::workflows::filtering::{
    ClusterResolver, FilteringError, FilteringRecord, FilteringService,
    InMemoryFilteringRepository, UpstreamContext,
};
use kmb_filtering::workflows::reference::ReferenceTables;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

type Service = FilteringService<InMemoryFilteringRepository, ClusterResolver>;

pub(crate) fn filter(config: &AppConfig, args: &FilterArgs) -> Result<Value, AppError> {
    let case: FilteringCase = read_json(&args.input)?;
    let service = build_service(config)?;
    let record = run_case(&service, config, &case)?;
    Ok(serde_json::to_value(record)?)
}

pub(crate) fn elaborate(config: &AppConfig, args: &ElaborateArgs) -> Result<Value, AppError> {
    let case: FilteringCase = read_json(&args.input)?;
    let input = case.elaborate.clone().ok_or_else(|| {
        FilteringError::BadRequest(format!(
            "{} has no elaborate section",
            args.input.display()
        ))
    })?;

    let service = build_service(config)?;
    let record = run_case(&service, config, &case)?;
    let request = input.into_request(&record);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let outcome = service.elaborate(&request, today)?;

    Ok(json!({
        "filtering": record,
        "elaborate": outcome,
    }))
}

pub(crate) fn ltv(config: &AppConfig, args: &LtvArgs) -> Result<Value, AppError> {
    let request: LtvRequest = read_json(&args.input)?;
    let tables = ReferenceTables::from_dir(&config.reference.dir)?;
    let outcome = tables
        .elaborator(config.policy.clone())
        .elaborate_ltv(&request)?;
    Ok(serde_json::to_value(outcome)?)
}

pub(crate) fn approval_next(args: &ApprovalNextArgs) -> Result<Value, AppError> {
    let step = next_approval_step(args.current, args.final_alias, args.escalate)?;
    Ok(serde_json::to_value(step)?)
}

pub(crate) fn approval_advance(args: &ApprovalAdvanceArgs) -> Result<Value, AppError> {
    let step = ApprovalScheme::new(args.final_alias).advance(
        args.current,
        args.decision,
        args.escalate,
    )?;
    Ok(serde_json::to_value(step)?)
}

fn build_service(config: &AppConfig) -> Result<Service, AppError> {
    let tables = ReferenceTables::from_dir(&config.reference.dir)?;
    info!(dir = %config.reference.dir.display(), "reference tables loaded");
    Ok(FilteringService::new(
        Arc::new(InMemoryFilteringRepository::default()),
        Arc::new(tables.cluster_resolver()),
        tables.elaborator(config.policy.clone()),
    ))
}

fn run_case(
    service: &Service,
    config: &AppConfig,
    case: &FilteringCase,
) -> Result<FilteringRecord, AppError> {
    let upstream = UpstreamContext {
        dupcheck: &case.upstream,
        bureau: &case.upstream,
        timeout: config.upstream.timeout,
    };
    Ok(service.filter(case.request.clone(), &upstream)?)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
