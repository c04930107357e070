//! Summarize command

use crate::api::Client;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub async fn execute(client: &Client, text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let text = match (text, file) {
        (_, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (Some(text), None) => text,
        (None, None) => String::new(),
    };

    if text.trim().is_empty() {
        warn!("Refusing to summarize empty text");
        println!("{} {}", "⚠".yellow(), "Nothing to summarize".yellow());
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid spinner template")?,
    );
    spinner.set_message("Summarizing...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = client.summarize(&text).await;
    spinner.finish_and_clear();

    let summary = result?;
    println!("{}", "📝 Tóm tắt".blue().bold());
    println!();
    println!("{}", summary);
    Ok(())
}
