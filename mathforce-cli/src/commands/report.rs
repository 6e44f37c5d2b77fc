use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use mathforce_engine::adapt::REVIEW_LIMIT;
use mathforce_engine::{Role, review_questions};

use super::{Context, PLACEHOLDER, format_pai, load_bank};

#[derive(Args)]
pub struct ReportArgs {
    /// Question bank to list weak-topic review questions from
    #[arg(long)]
    pub bank: Option<PathBuf>,

    /// Maximum number of review questions
    #[arg(long, default_value_t = REVIEW_LIMIT)]
    pub review_limit: usize,
}

pub async fn run(args: ReportArgs, role: Option<Role>) -> Result<()> {
    let ctx = Context::load(role)?;
    let engine = ctx.engine();
    let locale = ctx.locale();

    let ledger = engine.history().await?;
    let Some(latest) = ledger.latest() else {
        println!("No sessions recorded yet. Run `mathforce train` first.");
        return Ok(());
    };
    let marker = engine.load_weak_topic().await?;

    println!("Performance report ({})", latest.date.format("%Y-%m-%d"));
    println!("  PAI:        {}", format_pai(Some(latest.pai)));
    println!("  Accuracy:   {}%", latest.accuracy);
    println!("  ERA:        {}", latest.era);
    println!(
        "  Stability:  {}",
        ledger
            .stability_index()
            .map_or_else(|| PLACEHOLDER.to_string(), |s| s.to_string())
    );
    match &marker {
        Some(m) => println!("  Weak topic: {} (grade {})", m.topic, m.grade),
        None => println!("  Weak topic: {PLACEHOLDER}"),
    }

    println!();
    println!("Recommendations");
    for rec in engine.latest_recommendations().await? {
        println!("  - {}", rec.text(locale));
    }

    if let (Some(path), Some(marker)) = (args.bank, marker) {
        let bank = load_bank(&path).await?;
        let review = review_questions(bank.questions(), &marker.topic, args.review_limit);
        println!();
        println!("Review: {}", marker.topic);
        if review.is_empty() {
            println!("  No questions for this topic in the bank.");
        }
        for (i, q) in review.iter().enumerate() {
            println!("  {}. [{}] {}", i + 1, q.id, q.prompt);
        }
    }
    Ok(())
}
