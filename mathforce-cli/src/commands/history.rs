use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use mathforce_engine::{HistoryLedger, HistoryRecord, Role};

use super::{Context, PLACEHOLDER};

#[derive(Args)]
pub struct HistoryArgs {
    /// Only show the most recent N sessions
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Print the ledger as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: HistoryArgs, role: Option<Role>) -> Result<()> {
    let ctx = Context::load(role)?;
    let ledger = ctx.engine().history().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(ledger.records())?);
        return Ok(());
    }

    if ledger.is_empty() {
        println!("No sessions recorded for role '{}'.", ctx.config.role);
        return Ok(());
    }

    let skip = args
        .limit
        .map_or(0, |limit| ledger.len().saturating_sub(limit));
    println!("{}", history_table(&ledger.records()[skip..]));
    println!();
    print_summary(&ledger);
    Ok(())
}

fn history_table(records: &[HistoryRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("PAI").fg(Color::Cyan),
        Cell::new("Accuracy").fg(Color::Cyan),
        Cell::new("Avg time").fg(Color::Cyan),
        Cell::new("ERA").fg(Color::Cyan),
    ]);

    for record in records {
        let era = Cell::new(&record.era);
        table.add_row(vec![
            Cell::new(record.date.format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(record.pai),
            Cell::new(format!("{}%", record.accuracy)),
            Cell::new(format!("{:.1}s", record.avg_time)),
            if record.is_unstable() {
                era.fg(Color::Yellow)
            } else {
                era
            },
        ]);
    }
    table
}

fn print_summary(ledger: &HistoryLedger) {
    let or_placeholder = |v: Option<u8>| v.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string());

    println!("Sessions:      {}", ledger.len());
    println!("Average PAI:   {}", or_placeholder(ledger.average_pai()));
    println!("Average acc.:  {}%", or_placeholder(ledger.average_accuracy()));
    if let Some(previous) = ledger.previous_pai() {
        let latest = ledger.latest().map(|r| r.pai);
        let arrow = ledger.pai_trend(latest).map(|t| t.arrow()).unwrap_or("=");
        println!("Latest PAI:    {} ({arrow} from {previous})", or_placeholder(latest));
    }
    if let Some(index) = ledger.stability_index() {
        println!("Stability:     {} ({})", index, index.label_kk());
    }
    let series: Vec<String> = ledger
        .stability_series()
        .iter()
        .map(|v| v.to_string())
        .collect();
    println!("Stability series: {}", series.join(" "));
}
