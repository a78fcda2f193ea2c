//! # inboxpack CLI
//!
//! Command-line interface for the inboxpack library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use inboxpack::InboxpackError;
use inboxpack::aggregator::CorpusAggregator;
use inboxpack::cli::Args;
use inboxpack::core::{ActivityReport, Summary, activity, summary, to_table};
use inboxpack::format::{OutputFormat, write_table};
use inboxpack::logging::init_cli_logger;
use inboxpack::progress::stderr_progress;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_cli_logger(args.verbose, args.log_json);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), InboxpackError> {
    let total_start = Instant::now();
    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();

    // Print header
    println!("📦 inboxpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    if !args.summary_only {
        println!("💾 Output:  {}", output_path.display());
        println!("📄 Format:  {}", format);
    }
    if args.sequential {
        println!("🐢 Mode:    Sequential");
    }
    println!();

    // Step 1: Parse
    let mut aggregator = CorpusAggregator::with_config(args.aggregator_config())?;
    if args.verbose {
        aggregator = aggregator.with_progress(stderr_progress());
    }
    println!("⏳ Parsing export...");
    let parse_start = Instant::now();
    let (corpus, report) = aggregator.parse_directory_with_report(&args.input)?;
    println!(
        "   {} files parsed, {} failed ({:.2}s)",
        report.files_parsed,
        report.files_failed,
        parse_start.elapsed().as_secs_f64()
    );

    if corpus.is_empty() {
        println!();
        println!("⚠️  No messages found in {}", args.input.display());
        return Ok(());
    }

    // Step 2: Report
    println!();
    print_summary(&summary(&corpus));
    println!();
    print_activity(&activity(&corpus, args.top));

    // Step 3: Write table
    if !args.summary_only {
        println!();
        println!("💾 Writing {}...", format);
        let write_start = Instant::now();
        let rows = to_table(&corpus);
        write_table(&rows, &output_path, format)?;
        println!(
            "   {} rows written in {:.2}s",
            rows.len(),
            write_start.elapsed().as_secs_f64()
        );
        println!();
        println!("✅ Done! Output saved to {}", output_path.display());
    }

    // Performance stats
    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    println!(
        "   Throughput:  {:.0} messages/sec",
        corpus.len() as f64 / total_time.as_secs_f64().max(f64::EPSILON)
    );

    Ok(())
}

fn print_summary(summary: &Summary) {
    println!("📊 Summary:");
    println!("   Messages:      {}", summary.total_messages);
    println!("   Participants:  {}", summary.total_participants);
    println!("   Threads:       {}", summary.total_threads);
    if let Some(range) = summary.date_range {
        println!(
            "   Date range:    {} → {}",
            range.start.format("%Y-%m-%d"),
            range.end.format("%Y-%m-%d")
        );
    }
}

/// Longest thread title printed in full by the activity report.
const MAX_TITLE_CHARS: usize = 50;

fn shorten_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(MAX_TITLE_CHARS).collect();
        format!("{head}...")
    } else {
        title.to_string()
    }
}

fn print_activity(report: &ActivityReport) {
    println!("👥 Most active participants:");
    for (name, count) in &report.top_senders {
        println!("   {name}: {count} messages");
    }

    println!("💬 Most active conversations:");
    for (title, count) in &report.top_threads {
        println!("   {}: {count} messages", shorten_title(title));
    }

    if let Some(hour) = report.busiest_hour {
        println!("🕐 Most active hour:  {hour:02}:00");
    }
    if let Some(day) = &report.busiest_weekday {
        println!("📅 Most active day:   {day}");
    }
    if let Some(mean) = report.mean_length {
        println!("📏 Average length:    {mean:.1} characters");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_title() {
        assert_eq!(shorten_title("Team"), "Team");
        assert_eq!(shorten_title(&"a".repeat(50)), "a".repeat(50));
        assert_eq!(shorten_title(&"a".repeat(51)), format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_shorten_title_counts_chars() {
        let title = "Семейный чат".repeat(5);
        let shortened = shorten_title(&title);
        assert!(shortened.ends_with("..."));
        assert_eq!(shortened.chars().count(), 53);
    }
}
