//! Static screens: header, platform menu, install and support panels,
//! and the startup spinner.

use crate::config::Config;
use crate::error::Result;
use crate::models::PLATFORMS;
use colored::*;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Commands that set up the downloader on Termux.
pub const INSTALL_STEPS: [&str; 4] = [
    "pkg update && pkg upgrade -y",
    "pkg install python ffmpeg -y",
    "pip install --upgrade pip",
    "pip install yt-dlp",
];

fn panel(title: &str, lines: &[String]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new(title).fg(Color::Cyan)])
        .add_row(vec![lines.join("\n")]);
    table
}

pub fn show_header() {
    let table = panel(
        "All-in-One Media Downloader",
        &["by akbaraaja".to_string(), "Supports multiple platforms".dimmed().to_string()],
    );
    println!("{}", table);
}

pub fn show_menu(config: &Config) {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING).set_header(vec![
        Cell::new("Key").fg(Color::Cyan),
        Cell::new("Platform").fg(Color::Magenta),
    ]);
    for platform in PLATFORMS.iter() {
        table.add_row(vec![
            Cell::new(platform.key).fg(Color::Cyan),
            Cell::new(platform.label).fg(Color::Magenta),
        ]);
    }

    println!("\n{}", "Platform Menu".bold());
    println!("{}", table);
    println!(
        "{}",
        panel(
            "Support & Legal",
            &[
                format!("Support: {} | {}", config.saweria_url, config.trakteer_url),
                format!(
                    "{} Only download content you own or are allowed to.",
                    "Note:".yellow().bold()
                ),
            ],
        )
    );
}

pub fn show_install_steps() {
    println!("{}", "Install prerequisites (Termux)".green().bold());
    for step in INSTALL_STEPS {
        println!("{}", step);
    }
}

pub fn show_support(config: &Config) {
    let table = panel(
        "Support",
        &[
            format!("- Saweria: {}", config.saweria_url),
            format!("- Trakteer: {}", config.trakteer_url),
        ],
    );
    println!("{}", table);
}

/// Heading printed when a download flow starts.
pub fn show_flow_rule(label: &str) {
    let title = format!(" Download - {} ", label);
    let bar = "─".repeat(8);
    println!("\n{}{}{}", bar.blue(), title.blue().bold(), bar.blue());
}

/// Spinner shown while a startup check runs.
pub fn spinner(message: &str) -> Result<ProgressBar> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner:.yellow} {msg}")?);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}
