pub mod complete;
pub mod config;
pub mod history;
pub mod report;
pub mod select;
pub mod train;

use std::path::Path;

use anyhow::{Context as _, Result};
use mathforce_engine::analysis::era;
use mathforce_engine::{
    Engine, EngineConfig, EraTag, JsonFileStore, Locale, QuestionBank, Role, SessionReport,
};

use crate::config::ConfigLoader;

/// Placeholder for values that could not be measured.
pub const PLACEHOLDER: &str = "—";

/// Effective configuration plus the engine it opens.
pub struct Context {
    pub config: EngineConfig,
}

impl Context {
    /// Load layered configuration, with `--role` taking precedence.
    pub fn load(role: Option<Role>) -> Result<Self> {
        let mut config = ConfigLoader::load()?;
        if let Some(role) = role {
            config.role = role;
        }
        Ok(Self { config })
    }

    pub fn engine(&self) -> Engine<JsonFileStore> {
        Engine::new(self.config.storage.open(), self.config.role)
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }
}

pub async fn load_bank(path: &Path) -> Result<QuestionBank> {
    QuestionBank::load(path)
        .await
        .with_context(|| format!("failed to load question bank {}", path.display()))
}

pub fn format_pai(pai: Option<u8>) -> String {
    pai.map_or_else(|| PLACEHOLDER.to_string(), |p| p.to_string())
}

/// ERA lines for display, or the empty-state text.
pub fn era_lines(tags: &[EraTag], locale: Locale) -> Vec<String> {
    if tags.is_empty() {
        return vec![era::empty_display_text(locale).to_string()];
    }
    tags.iter().map(|t| t.message(locale)).collect()
}

pub fn print_session_report(report: &SessionReport, locale: Locale) {
    println!();
    println!("Session results");
    println!("  PAI:        {}", format_pai(report.pai));
    if let Some(previous) = report.previous_pai {
        let arrow = report.trend.map(|t| t.arrow()).unwrap_or("=");
        println!("  Previous:   {previous} {arrow}");
    }
    println!("  Accuracy:   {}%", report.accuracy);
    match report.mean_time {
        Some(mean) => println!("  Avg time:   {mean:.1}s"),
        None => println!("  Avg time:   {PLACEHOLDER}"),
    }
    println!("  Difficulty: {} -> {}", report.adaptation.previous, report.adaptation.next);
    if let Some(notice) = report.notice() {
        println!("  {notice}");
    }
    if let Some(topic) = &report.weak_topic {
        println!("  Weak topic: {topic}");
    }
    println!();
    println!("ERA");
    for line in era_lines(&report.tags, locale) {
        println!("  - {line}");
    }
}
