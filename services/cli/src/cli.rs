use crate::commands;
use crate::infra::parse_date;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kmb_filtering::config::AppConfig;
use kmb_filtering::error::AppError;
use kmb_filtering::telemetry;
use kmb_filtering::workflows::approval::{ApprovalAlias, ApprovalDecision};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kmb-filtering",
    about = "Run KMB credit filtering, elaboration and approval stepping from recorded inputs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Screen a recorded prospect and print the stored filtering record
    Filter(FilterArgs),
    /// Screen a recorded prospect, then run the first-pass elaboration
    Elaborate(ElaborateArgs),
    /// Resolve LTV and the longest usable tenor for a lookup request
    Ltv(LtvArgs),
    /// Step through the credit approval chain
    Approval {
        #[command(subcommand)]
        command: ApprovalCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ApprovalCommand {
    /// Compute the next approver after an approval
    Next(ApprovalNextArgs),
    /// Apply an approver's decision to the chain
    Advance(ApprovalAdvanceArgs),
}

#[derive(Args, Debug)]
pub(crate) struct FilterArgs {
    /// JSON case file with the request and the recorded upstream answers
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ElaborateArgs {
    /// JSON case file; must carry an `elaborate` section
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Evaluation date used for vehicle age (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct LtvArgs {
    /// JSON LTV lookup request
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ApprovalNextArgs {
    /// Alias of the approver who just approved
    #[arg(long)]
    pub(crate) current: ApprovalAlias,
    /// Final approver of the application's scheme
    #[arg(long = "final")]
    pub(crate) final_alias: ApprovalAlias,
    /// Escalate past the final approver
    #[arg(long)]
    pub(crate) escalate: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ApprovalAdvanceArgs {
    #[arg(long)]
    pub(crate) current: ApprovalAlias,
    #[arg(long = "final")]
    pub(crate) final_alias: ApprovalAlias,
    /// APPROVE, REJECT or RETURN
    #[arg(long)]
    pub(crate) decision: ApprovalDecision,
    #[arg(long)]
    pub(crate) escalate: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let output = match cli.command {
        Command::Filter(args) => commands::filter(&config, &args)?,
        Command::Elaborate(args) => commands::elaborate(&config, &args)?,
        Command::Ltv(args) => commands::ltv(&config, &args)?,
        Command::Approval {
            command: ApprovalCommand::Next(args),
        } => commands::approval_next(&args)?,
        Command::Approval {
            command: ApprovalCommand::Advance(args),
        } => commands::approval_advance(&args)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
