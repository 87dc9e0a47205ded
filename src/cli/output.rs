use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use super::filters::FilterArgs;
use super::OutputConfig;
use crate::config::Config;
use crate::image::ImageFetcher;
use crate::results::card::{IMAGE_FAILED, NO_IMAGE};
use crate::results::{present, Card, ImageSlot, Presentation, ResultsView, CRAVING_MESSAGE};
use crate::search::RawResultSet;

/// JSON output for a successful presentation
#[derive(Serialize)]
struct ResultsOutput<'a> {
    query: &'a str,
    #[serde(flatten)]
    view: &'a ResultsView,
}

/// JSON output for the craving and failure paths
#[derive(Serialize)]
pub struct StatusOutput<'a> {
    pub status: &'a str,
    pub message: String,
}

/// Present a raw result set and print it.
pub async fn show(
    query: &str,
    raw: &RawResultSet,
    filters: &FilterArgs,
    config: &Config,
    output: OutputConfig,
) -> Result<()> {
    let selection = filters.selection()?;
    let columns = filters
        .columns
        .map_or(config.display.columns, usize::from);

    let mut view = match present(raw, &selection, columns) {
        Presentation::Craving => {
            if output.json {
                print_status("empty", CRAVING_MESSAGE.to_string())?;
            } else if !output.quiet {
                println!("{} {}", "!".yellow(), CRAVING_MESSAGE);
            }
            return Ok(());
        }
        Presentation::Results(view) => view,
    };

    if config.display.fetch_images && !filters.no_images {
        let fetcher = ImageFetcher::new(
            Duration::from_secs(config.display.image_timeout_secs),
            config.display.max_image_bytes,
        )
        .context("Failed to build image client")?;
        fetcher.resolve_grid(&mut view.rows).await;
    }

    if output.json {
        let out = ResultsOutput { query, view: &view };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if !output.quiet {
        print_human(query, &view, filters.show_options, output.verbose);
    }
    Ok(())
}

pub fn print_status(status: &str, message: String) -> Result<()> {
    let out = StatusOutput { status, message };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_human(query: &str, view: &ResultsView, show_options: bool, verbose: bool) {
    if show_options {
        print_options(view);
    }

    if view.count == 0 {
        println!(
            "{} None of the {} results for {} match the selected filters",
            "!".yellow(),
            view.total,
            query.cyan()
        );
        return;
    }

    println!(
        "{} Showing {} of {} results for: {}",
        "✓".green(),
        view.count,
        view.total,
        query.cyan()
    );
    println!();

    let mut n = 0;
    for (row_idx, row) in view.rows.iter().enumerate() {
        println!("{}", format!("── row {} ──", row_idx + 1).dimmed());
        for card in row {
            n += 1;
            print_card(n, card, verbose);
        }
        println!();
    }
}

fn print_card(n: usize, card: &Card, verbose: bool) {
    let title = match &card.link {
        Some(link) => format!(
            "{} {} {}",
            card.title.bold(),
            "→".dimmed(),
            format!("{} ({})", link.url, link.platform).blue()
        ),
        None => card.title.bold().to_string(),
    };
    println!("{}. {}", n.to_string().bold(), title);
    println!("   {}", card.summary.dimmed());

    match &card.image {
        ImageSlot::Unavailable => println!("   {}", NO_IMAGE.dimmed()),
        ImageSlot::Pending { url } => println!("   image: {}", url.dimmed()),
        ImageSlot::Loaded { format, size, .. } => {
            println!("   image: {} {}", format.to_string().magenta(), format_size(*size));
        }
        ImageSlot::Failed { reason, .. } => {
            println!("   {} {} ({})", "✗".red(), IMAGE_FAILED.red(), reason);
        }
    }

    let shown = if verbose { card.details.len() } else { 3 };
    for detail in card.details.iter().take(shown) {
        println!("   {}: {}", detail.label, detail.value);
    }
}

fn print_options(view: &ResultsView) {
    println!("{}", "Filter options".bold());
    for (field, values) in &view.options.tags {
        println!("  {}: {}", field.label(), join_or_none(values));
    }
    for (field, values) in &view.options.choices {
        println!("  {}: {}", field.label(), join_or_none(values));
    }
    if let Some(r) = view.rating {
        println!("  Restaurant Rating: {} – {}", r.min, r.max);
    }
    println!();
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        values.join(", ")
    }
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}
