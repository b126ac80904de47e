//! dayline CLI: lay out a day of events and print or view the result

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dayline_engine::time::format_clock;
use dayline_engine::{hour_label, load_document, LayoutStyle, TimelineLayout, TimelineOutput};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Single-day timeline layout engine
#[derive(Parser)]
#[command(name = "dayline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log layout details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out an event document and print the geometry
    Layout {
        /// Event document (JSON)
        file: PathBuf,

        /// Day the events' HHmm times refer to (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Layout style file (JSON)
        #[arg(long)]
        style: Option<PathBuf>,

        /// Override the container width
        #[arg(long)]
        width: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the timeline in a full-screen viewer
    View {
        /// Event document (JSON)
        file: PathBuf,

        /// Day the events' HHmm times refer to (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Layout style file (JSON)
        #[arg(long)]
        style: Option<PathBuf>,
    },

    /// Print the default layout style, or write it to a file
    Style {
        /// Write the style here instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Layout {
            file,
            date,
            style,
            width,
            json,
        } => {
            cmd_layout(&file, date, style.as_deref(), width, json);
        }
        Commands::View { file, date, style } => {
            cmd_view(&file, date, style.as_deref());
        }
        Commands::Style { output } => {
            cmd_style(output.as_deref());
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Load the style and document, then lay out the day.
///
/// Exits the process on any error.
fn build_timeline(
    file: &Path,
    date: Option<NaiveDate>,
    style_path: Option<&Path>,
    width: Option<f64>,
) -> TimelineOutput {
    let mut style = match style_path {
        Some(path) => match LayoutStyle::load(path) {
            Ok(style) => style,
            Err(e) => {
                eprintln!("Error loading style {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => LayoutStyle::default(),
    };
    if let Some(width) = width {
        style = style.with_container_width(width);
    }

    let engine = match TimelineLayout::new(style) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let document = match load_document(file) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error reading {}: {e}", file.display());
            std::process::exit(1);
        }
    };

    let day = date.unwrap_or_else(|| Local::now().date_naive());
    let (events, issues) = document.into_events(day);
    for issue in &issues {
        warn!(%issue, "Skipping record");
    }
    debug!(%day, events = events.len(), skipped = issues.len(), "Loaded event document");
    for event in &events {
        debug!(event_id = %event.id, event = %event.display_text(), "Loaded event");
    }

    engine.layout_day(&events, day)
}

fn cmd_layout(
    file: &Path,
    date: Option<NaiveDate>,
    style_path: Option<&Path>,
    width: Option<f64>,
    json: bool,
) {
    let output = build_timeline(file, date, style_path, width);

    if json {
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to serialize layout: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", render_report(&output));
}

/// Plain-text summary of a layout.
fn render_report(output: &TimelineOutput) -> String {
    let mut report = String::new();

    let day = output
        .day
        .map_or_else(|| "(no day)".to_string(), |d| d.to_string());
    let hours = match (output.slots.first(), output.slots.last()) {
        (Some(first), Some(last)) => format!("{} - {}", hour_label(first.hour), hour_label(last.hour)),
        _ => "no hours".to_string(),
    };
    report.push_str(&format!(
        "Timeline for {day} ({hours}, {:.1} x {:.1})\n\n",
        output.content_width, output.content_height
    ));

    report.push_str("Hours\n");
    for slot in &output.slots {
        report.push_str(&format!("  {:>5}  y={:.1}\n", slot.label, slot.center_y()));
    }

    report.push_str("\nEvents\n");
    if output.placements.is_empty() {
        report.push_str("  (none)\n");
    }
    for p in &output.placements {
        report.push_str(&format!(
            "  {}  {}  {}-{}  x={:.1} y={:.1} w={:.1} h={:.1}  [cluster {}, column {}/{}]\n",
            p.event_id,
            p.label,
            format_clock(p.start),
            format_clock(p.end),
            p.rect.x,
            p.rect.y,
            p.rect.width,
            p.rect.height,
            p.cluster,
            p.column + 1,
            p.cluster_size,
        ));
    }

    if !output.diagnostics.is_empty() {
        report.push_str("\nDiagnostics\n");
        for diagnostic in &output.diagnostics {
            report.push_str(&format!("  {diagnostic}\n"));
        }
    }

    report
}

fn cmd_view(file: &Path, date: Option<NaiveDate>, style_path: Option<&Path>) {
    let output = build_timeline(file, date, style_path, None);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(dayline_tui::run_viewer(&output)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_style(output: Option<&Path>) {
    let style = LayoutStyle::default();

    match output {
        Some(path) => match style.save(path) {
            Ok(()) => println!("Wrote {}", path.display()),
            Err(e) => {
                eprintln!("Failed to write style: {e}");
                std::process::exit(1);
            }
        },
        None => match serde_json::to_string_pretty(&style) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to serialize style: {e}");
                std::process::exit(1);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayline_engine::Event;

    #[test]
    fn test_cli_parses_layout() {
        let cli = Cli::try_parse_from([
            "dayline", "layout", "events.json", "--date", "2024-06-06", "--width", "640", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Layout {
                file,
                date,
                width,
                json,
                style,
            } => {
                assert_eq!(file, PathBuf::from("events.json"));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 6));
                assert_eq!(width, Some(640.0));
                assert!(json);
                assert!(style.is_none());
            }
            _ => panic!("expected layout command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["dayline", "view", "events.json", "--date", "June 6"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["dayline", "style", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_render_report() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 6).unwrap();
        let at = |hour, minute| day.and_hms_opt(hour, minute, 0).unwrap();
        let events = [
            Event::from_times("standup", "Standup", at(9, 0), at(10, 0)).unwrap(),
            Event::from_times("late", "Late", at(22, 0), at(23, 0)).unwrap(),
        ];
        let output = TimelineLayout::new(LayoutStyle::default())
            .unwrap()
            .layout_day(&events, day);

        let report = render_report(&output);
        assert!(report.starts_with("Timeline for 2024-06-06 (9 AM - 9 PM, 375.0 x 390.0)"));
        assert!(report.contains(" 9 AM  y=15.0"));
        assert!(report.contains(
            "standup  Standup  9:00 AM-10:00 AM  x=60.0 y=15.0 w=304.0 h=29.0  [cluster 0, column 1/1]"
        ));
        assert!(report.contains("[outside_axis] late:"));
    }
}
