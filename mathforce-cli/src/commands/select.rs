use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use mathforce_engine::Role;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Context, load_bank};

#[derive(Args)]
pub struct SelectArgs {
    /// Question bank (JSON array)
    #[arg(long)]
    pub bank: PathBuf,

    /// Grade 5-11
    #[arg(long)]
    pub grade: Option<u8>,

    /// Difficulty level 1-5 (defaults to the adapted level)
    #[arg(long)]
    pub difficulty: Option<u8>,

    /// Number of questions 1-30
    #[arg(long)]
    pub count: Option<usize>,

    /// Seed the shuffle for a reproducible pick
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn run(args: SelectArgs, role: Option<Role>) -> Result<()> {
    let ctx = Context::load(role)?;
    let engine = ctx.engine();
    let bank = load_bank(&args.bank).await?;

    let settings = engine
        .next_settings(&ctx.config.session, args.grade, args.difficulty, args.count)
        .await?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let picked = engine.prepare_session(bank.questions(), &settings, &mut rng).await?;

    if picked.is_empty() {
        println!(
            "No questions for grade {} at difficulty {}.",
            settings.grade, settings.difficulty
        );
        return Ok(());
    }

    println!(
        "Grade {} | difficulty {} | {} questions",
        settings.grade,
        settings.difficulty,
        picked.len()
    );
    for q in &picked {
        println!("  {}  {} (d{})", q.id, q.topic, q.difficulty);
    }
    Ok(())
}
