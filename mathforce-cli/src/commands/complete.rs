use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use mathforce_engine::{Role, SessionAggregate};
use tracing::warn;

use super::{Context, print_session_report};

#[derive(Args)]
pub struct CompleteArgs {
    /// Recorded session aggregate (JSON)
    pub aggregate: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: CompleteArgs, role: Option<Role>) -> Result<()> {
    let ctx = Context::load(role)?;

    let raw = tokio::fs::read_to_string(&args.aggregate)
        .await
        .with_context(|| format!("failed to read {}", args.aggregate.display()))?;
    let aggregate: SessionAggregate = serde_json::from_str(&raw)
        .with_context(|| format!("invalid session aggregate in {}", args.aggregate.display()))?;

    if !aggregate.is_consistent() {
        warn!("aggregate counts do not add up; results may be skewed");
    }
    if !aggregate.is_finalized() {
        warn!("aggregate has no total time; PAI will be unmeasurable");
    }

    let report = ctx.engine().complete_session(&aggregate).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_session_report(&report, ctx.locale());
    }
    Ok(())
}
