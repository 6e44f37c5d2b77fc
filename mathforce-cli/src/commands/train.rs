//! Interactive timed session on the terminal.

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Args;
use mathforce_engine::analysis::{live_stability_hint, pai};
use mathforce_engine::session::CountdownTick;
use mathforce_engine::{
    Countdown, PendingQuestion, PressureStage, Question, QuestionEvent, Role,
    SessionAggregate, SessionRecorder, run_countdown,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{Context, format_pai, load_bank, print_session_report};

#[derive(Args)]
pub struct TrainArgs {
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

    /// Seed the question shuffle
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn run(args: TrainArgs, role: Option<Role>) -> Result<()> {
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
    let questions = engine.prepare_session(bank.questions(), &settings, &mut rng).await?;
    if questions.is_empty() {
        bail!(
            "no questions for grade {} at difficulty {}",
            settings.grade,
            settings.difficulty
        );
    }

    println!(
        "Grade {} | difficulty {} | {} questions | {}s on the clock",
        settings.grade,
        settings.difficulty,
        questions.len(),
        ctx.config.session.countdown_seconds
    );
    println!("Answer with the option number. Ctrl-D finishes early.");

    let mut recorder = engine.start_session(&settings);
    let aggregate = run_session(
        &mut recorder,
        &questions,
        ctx.config.session.countdown_seconds,
    )
    .await?;

    let report = engine.complete_session(&aggregate).await?;
    print_session_report(&report, ctx.locale());
    Ok(())
}

/// Ask each question until the list ends, stdin closes, or time runs out.
async fn run_session(
    recorder: &mut SessionRecorder,
    questions: &[Question],
    countdown_seconds: u32,
) -> Result<SessionAggregate> {
    let cancel = CancellationToken::new();
    let (tick_tx, mut ticks) = mpsc::unbounded_channel::<CountdownTick>();
    let countdown = tokio::spawn(run_countdown(
        Countdown::new(countdown_seconds),
        cancel.clone(),
        move |tick| {
            let _ = tick_tx.send(*tick);
        },
    ));
    let mut answers = spawn_stdin_reader();
    let started = Instant::now();
    let mut clock_running = true;

    'session: for (index, question) in questions.iter().enumerate() {
        print_question(index, questions.len(), question);
        let asked = Instant::now();

        loop {
            tokio::select! {
                tick = ticks.recv(), if clock_running => match tick {
                    Some(tick) if tick.is_expired() => {
                        println!("\nTime is up.");
                        let pending = PendingQuestion {
                            topic_id: question.topic.clone(),
                            selected_correct: None,
                            elapsed_seconds: asked.elapsed().as_secs_f64(),
                        };
                        let _ = countdown.await;
                        return Ok(recorder.expire(Some(pending), whole_seconds(started.elapsed()))?);
                    }
                    Some(tick) => announce_tick(&tick),
                    None => clock_running = false,
                },
                line = answers.recv() => {
                    let Some(line) = line else {
                        debug!("stdin closed, finishing early");
                        break 'session;
                    };
                    match parse_choice(&line, question.options.len()) {
                        Some(choice) => {
                            let correct = question.is_correct(choice);
                            recorder.record(QuestionEvent::new(
                                question.topic.clone(),
                                correct,
                                asked.elapsed().as_secs_f64(),
                            ))?;
                            print_live(recorder.snapshot(), started.elapsed().as_secs_f64(), correct);
                            break;
                        }
                        None => println!("Enter an option number."),
                    }
                }
            }
        }
    }

    cancel.cancel();
    let _ = countdown.await;
    Ok(recorder.finish(whole_seconds(started.elapsed()))?)
}

/// Session totals are stored in whole seconds.
fn whole_seconds(elapsed: Duration) -> f64 {
    elapsed.as_secs() as f64
}

/// Read stdin lines on a plain thread so a pending read never blocks exit.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_question(index: usize, total: usize, question: &Question) {
    println!();
    println!("[{}/{}] {} ({})", index + 1, total, question.prompt, question.topic);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}) {}", i + 1, option);
    }
}

fn announce_tick(tick: &CountdownTick) {
    if tick.stage_increased {
        let label = match tick.stage {
            PressureStage::Elevated => "under a minute left",
            PressureStage::Critical => "final seconds",
            PressureStage::Calm => "",
        };
        println!("  ! Pressure level {} ({label})", tick.stage.level());
    } else if tick.remaining % 30 == 0 {
        println!("  {}s left", tick.remaining);
    }
}

fn print_live(aggregate: &SessionAggregate, elapsed: f64, correct: bool) {
    let verdict = if correct { "correct" } else { "wrong" };
    let hint = if live_stability_hint(aggregate) {
        " | instability detected"
    } else {
        ""
    };
    println!(
        "  {verdict} | live PAI {}{hint}",
        format_pai(pai::live_preview(aggregate, elapsed))
    );
}

/// 1-based option number to a 0-based index. Any number is accepted when the
/// question carries no option list.
fn parse_choice(line: &str, options: usize) -> Option<usize> {
    let n: usize = line.trim().parse().ok()?;
    if n == 0 || (options > 0 && n > options) {
        return None;
    }
    Some(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("2", 4), Some(1));
        assert_eq!(parse_choice(" 1 \n", 4), Some(0));
        assert_eq!(parse_choice("0", 4), None);
        assert_eq!(parse_choice("5", 4), None);
        assert_eq!(parse_choice("abc", 4), None);
        assert_eq!(parse_choice("7", 0), Some(6));
    }

    #[test]
    fn test_whole_seconds_floors_totals() {
        assert_eq!(whole_seconds(Duration::from_millis(95_999)), 95.0);
        assert_eq!(whole_seconds(Duration::from_millis(400)), 0.0);
        assert_eq!(whole_seconds(Duration::from_secs(180)), 180.0);
    }
}
