//! CLI command implementations

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

use crate::analysis::{MeetingInsights, Pipeline, TranscriptRequest};
use crate::capability::CapabilityRegistry;
use crate::cli::args::ConfigCommand;
use crate::config::Settings;

/// Analyze a transcript file, or stdin when no file is given.
pub async fn analyze_transcript(
    settings: &Settings,
    file: Option<PathBuf>,
    title: Option<String>,
    participants: Option<String>,
    format: &str,
    max_length: Option<usize>,
) -> Result<()> {
    if !matches!(format, "text" | "json") {
        anyhow::bail!("Unsupported format '{}'. Supported formats: text, json", format);
    }

    let transcript = read_transcript(file)?;
    if transcript.trim().is_empty() {
        anyhow::bail!("Transcript is empty");
    }

    let participants: Vec<String> = participants
        .map(|p| {
            p.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let registry = CapabilityRegistry::new(settings);
    let max_length = max_length.unwrap_or(settings.analysis.max_summary_length);
    let pipeline = Pipeline::new(&registry, max_length);

    let insights = pipeline
        .process(TranscriptRequest {
            transcript,
            title,
            participants,
        })
        .await;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print_insights(&insights);
    }

    Ok(())
}

fn read_transcript(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read transcript file: {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read transcript from stdin")?;
            Ok(buf)
        }
    }
}

fn print_insights(insights: &MeetingInsights) {
    println!("== {} ==", insights.title);
    if !insights.participants.is_empty() {
        println!("Participants: {}", insights.participants.join(", "));
    }
    println!("Sentiment: {}", insights.sentiment.as_str());
    println!();
    println!("Summary:");
    println!("{}", insights.summary);
    println!();

    if insights.action_items.is_empty() {
        println!("No action items found.");
        return;
    }

    println!("Action items:");
    for (i, item) in insights.action_items.iter().enumerate() {
        let assignee = item.assignee.as_deref().unwrap_or("unassigned");
        let deadline = item
            .deadline
            .as_deref()
            .map(|d| format!(", by {}", d))
            .unwrap_or_default();
        println!(
            "{:>2}. [{}] {} ({}{})",
            i + 1,
            item.priority.as_str(),
            item.task,
            assignee,
            deadline
        );
    }
}

/// Configuration management commands.
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
