use crate::config::ReportConfig;
use crate::core::dates::parse_filter_input;
use crate::core::ReportSession;
use crate::error::{ReservasError, ReservasResult};
use crate::excel::ExcelImporter;
use crate::report::ReportView;
use crate::writer::write_report;
use clap::Args;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Options shared by `report` and `watch`
#[derive(Args, Debug, Clone, Default)]
pub struct ReportOptions {
    /// YAML config file (column mapping, fallback label, header rows, top N)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Filter start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// Filter end date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<String>,

    /// Global quote count (non-numeric input counts as 0)
    #[arg(short, long)]
    pub quotes: Option<String>,

    /// Per-instance quote count as NAME=VALUE (repeatable)
    #[arg(short = 'i', long = "instance-quote")]
    pub instance_quotes: Vec<String>,

    /// Number of instances in the top ranking
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Column holding the instance identifier (default B)
    #[arg(long)]
    pub instance_column: Option<String>,

    /// Column holding the reservation status (default U)
    #[arg(long)]
    pub status_column: Option<String>,

    /// Column holding the creation date (default Z)
    #[arg(long)]
    pub date_column: Option<String>,

    /// Write the report to a file (.xlsx, .yaml or .json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show verbose steps
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the report command
pub fn report(file: PathBuf, options: ReportOptions) -> ReservasResult<()> {
    println!("{}", "📊 Reservas - Reservation Report".bold().green());
    println!("   File: {}", file.display());
    println!();

    let view = build_report(&file, &options)?;
    print_report(&view);

    if let Some(output) = &options.output {
        write_report(output, &view)?;
        println!(
            "{}",
            format!("✅ Report exported to {}", output.display())
                .bold()
                .green()
        );
    }

    Ok(())
}

/// Load `file` and replay the user inputs from `options` as session
/// commands: load, instance quotes, global quotes, then the date filter.
///
/// A rejected filter (missing/inverted dates, no matching rows) is reported
/// and the unfiltered report is returned.
pub fn build_report(file: &Path, options: &ReportOptions) -> ReservasResult<ReportView> {
    let config = resolve_config(options)?;

    if options.verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
    }
    let rows = ExcelImporter::new(file)
        .with_header_rows(config.header_rows)
        .import()?;
    if options.verbose {
        println!("   Found {} reservation rows\n", rows.len());
    }

    let source = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let mut session = ReportSession::new(config);
    session.on_file_loaded(source, rows)?;

    for entry in &options.instance_quotes {
        let (instance, value) = parse_instance_quote(entry)?;
        session.on_quote_changed(&instance, &value);
    }
    if let Some(quotes) = &options.quotes {
        session.on_global_quotes_changed(quotes);
    }

    if options.from.is_some() || options.to.is_some() {
        if options.verbose {
            println!("{}", "📅 Applying date filter...".cyan());
        }
        if let Err(e) = apply_date_filter(&mut session, options) {
            if !e.is_user_facing() {
                return Err(e);
            }
            println!("{} {}\n", "⚠️  Filter not applied:".yellow().bold(), e);
        }
    }

    Ok(session.view())
}

fn apply_date_filter(
    session: &mut ReportSession,
    options: &ReportOptions,
) -> ReservasResult<ReportView> {
    let start = parse_filter_input(options.from.as_deref())?;
    let end = parse_filter_input(options.to.as_deref())?;
    session.on_filter_applied(start, end)
}

/// Execute the config command - print the effective configuration
pub fn show_config(options: ReportOptions) -> ReservasResult<()> {
    let config = resolve_config(&options)?;
    println!("{}", "⚙️  Reservas - Effective Configuration".bold().green());
    println!();
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn resolve_config(options: &ReportOptions) -> ReservasResult<ReportConfig> {
    let mut config = match &options.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    if let Some(top) = options.top {
        config.top_n = top;
    }
    if let Some(column) = &options.instance_column {
        config.columns.instance = column.to_uppercase();
    }
    if let Some(column) = &options.status_column {
        config.columns.status = column.to_uppercase();
    }
    if let Some(column) = &options.date_column {
        config.columns.created_at = column.to_uppercase();
    }

    config.validate()?;
    Ok(config)
}

/// Split `NAME=VALUE`. The value is kept raw; quote parsing is lenient.
fn parse_instance_quote(entry: &str) -> ReservasResult<(String, String)> {
    match entry.rsplit_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(ReservasError::Validation(format!(
            "Invalid instance quote '{}'. Expected: NAME=VALUE (e.g., \"Hotel Sol=120\")",
            entry
        ))),
    }
}

/// Print the whole report to the terminal
pub fn print_report(view: &ReportView) {
    if let Some(summary) = view.filter.summary() {
        println!("{} {}\n", "✅".green(), summary.bold());
    }
    print_summary(view);
    print_top(view);
    print_instances(view);
    print_global_conversion(view);
}

fn print_summary(view: &ReportView) {
    let totals = &view.totals;
    println!("{}", "📋 Overall Summary:".bold().cyan());
    println!("   Total reservations: {}", totals.reservations.to_string().bold());
    println!("   ✅ Confirmed:   {}", totals.confirmed.to_string().green());
    println!("   ⏳ Pending:     {}", totals.pending.to_string().yellow());
    println!("   ❌ Failed:      {}", totals.failed.to_string().red());
    println!("   🔄 Processing:  {}", totals.processing.to_string().blue());
    if totals.unrecognized > 0 {
        println!("   ❔ Other status: {}", totals.unrecognized);
    }
    println!("   🏢 Instances:   {}", totals.instances.to_string().bold());
    println!();
}

fn print_top(view: &ReportView) {
    println!("{}", format!("🏆 Top {} Instances:", view.top.len()).bold().cyan());
    for entry in &view.top {
        println!(
            "   #{:<3} {:<30} {} reservations",
            entry.rank,
            entry.name.bright_blue(),
            entry.total.to_string().bold()
        );
    }
    println!();
}

fn print_instances(view: &ReportView) {
    println!("{}", "🏢 Instances:".bold().cyan());
    println!("{}", "─".repeat(104));
    println!(
        "{:<28} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10} {:>10}",
        "Instance".bold(),
        "Confirm".bold(),
        "Pending".bold(),
        "Failed".bold(),
        "Process".bold(),
        "Total".bold(),
        "Quotes".bold(),
        "Tot/Quo".bold(),
        "Conf/Quo".bold()
    );
    println!("{}", "─".repeat(104));

    for report in &view.instances {
        let stats = &report.stats;
        println!(
            "{:<28} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10} {:>10}",
            stats.name.bright_blue(),
            stats.confirmed.to_string().green(),
            stats.pending.to_string().yellow(),
            stats.failed.to_string().red(),
            stats.processing,
            stats.total.to_string().bold(),
            report.conversion.quotes,
            format!("{}%", report.conversion.total_rate),
            format!("{}%", report.conversion.confirmed_rate)
        );
    }
    println!("{}", "─".repeat(104));
    println!();
}

fn print_global_conversion(view: &ReportView) {
    let global = &view.global;
    println!("{}", "💼 Global Conversion:".bold().cyan());
    println!(
        "   {} confirmed / {} quotes = {}",
        global.confirmed,
        global.quotes,
        format!("{}%", global.rate).bold().green()
    );
    println!();
}

/// Execute the watch command
pub fn watch(file: PathBuf, options: ReportOptions) -> ReservasResult<()> {
    println!("{}", "👁️  Reservas - Watch Mode".bold().green());
    println!("   Watching: {}", file.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !file.exists() {
        return Err(ReservasError::Validation(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let canonical_path = file.canonicalize()?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| ReservasError::Validation("Cannot determine parent directory".to_string()))?;

    let (tx, rx) = channel();

    // Spreadsheet apps write through temp files; debounce the burst of events
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| ReservasError::Validation(format!("Failed to create file watcher: {}", e)))?;

    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| ReservasError::Validation(format!("Failed to watch directory: {}", e)))?;

    if options.verbose {
        println!(
            "   {} {}",
            "Watching directory:".cyan(),
            parent_dir.display()
        );
    }

    println!("{}", "🔄 Initial run...".cyan());
    run_watch_action(&file, &options);
    println!();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    event.kind == DebouncedEventKind::Any
                        && is_watched_file(&event.path, &canonical_path)
                });

                if relevant {
                    println!(
                        "\n{} {}",
                        "🔄 Change detected at".cyan(),
                        chrono::Local::now().format("%H:%M:%S").to_string().cyan()
                    );
                    run_watch_action(&file, &options);
                    println!();
                }
            }
            Ok(Err(error)) => {
                eprintln!("{} Watch error: {}", "❌".red(), error);
            }
            Err(e) => {
                eprintln!("{} Channel error: {}", "❌".red(), e);
                break;
            }
        }
    }

    Ok(())
}

fn is_watched_file(event_path: &Path, watched: &Path) -> bool {
    if let Ok(event_canonical) = event_path.canonicalize() {
        if event_canonical == watched {
            return true;
        }
    }
    // Deleted-then-recreated files no longer canonicalize; fall back to the name
    matches!(
        (event_path.file_name(), watched.file_name()),
        (Some(a), Some(b)) if a == b
    )
}

/// Rebuild and print the report; errors are printed, never fatal in watch mode
fn run_watch_action(file: &Path, options: &ReportOptions) {
    let result = build_report(file, options).and_then(|view| {
        print_report(&view);
        if let Some(output) = &options.output {
            write_report(output, &view)?;
        }
        Ok(())
    });

    match result {
        Ok(()) => println!("{}", "✅ Report updated".bold().green()),
        Err(e) => println!("{} {}", "❌ Report failed:".bold().red(), e),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
