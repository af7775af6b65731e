//! Terminal rendering of annotated entries and summaries, shared by the
//! `check`, `recheck` and `list` commands.

use crate::models::entry::TimeEntry;
use crate::models::settings::VerifierSettings;
use crate::models::summary::{BatchSummary, DailySummary};
use crate::utils::colors::{
    CYAN, GREY, RESET, color_for_confidence, color_for_severity, colorize_optional,
};
use crate::utils::formatting::{fmt_delta, fmt_hours, fmt_money};
use crate::utils::table::{Column, Table};
use crate::utils::text::truncate;

const DESCRIPTION_WIDTH: usize = 42;

/// Render the per-entry table. Flag and quality lines are printed under
/// each affected row, indented, the way the PDF report annotates them.
pub fn print_entries(entries: &[TimeEntry], verbose: bool) {
    let mut table = Table::new(vec![
        Column::new("Id", 5),
        Column::new("Date", 10),
        Column::new("Attorney", 14),
        Column::new("Hrs", 5),
        Column::new("Rnd", 5),
        Column::new("Amount", 10),
        Column::new("Code", 5),
        Column::new("Conf", 6),
        Column::new("Description", DESCRIPTION_WIDTH),
    ]);

    for e in entries {
        let conf = format!(
            "{}{}{}",
            color_for_confidence(e.confidence),
            e.confidence.to_db_str(),
            RESET
        );
        // quoted CSV fields may carry embedded newlines; keep rows on one line
        let description = e.description.replace(['\n', '\r'], " ");
        table.add_row(vec![
            e.id.clone(),
            truncate(&e.date, 10),
            truncate(&e.attorney, 14),
            fmt_hours(e.hours),
            fmt_hours(e.rounded_hours),
            fmt_money(e.adjusted_amount),
            colorize_optional(e.utbms_code.as_deref().unwrap_or("")),
            conf,
            truncate(&description, DESCRIPTION_WIDTH),
        ]);
    }

    // Render row by row so annotation lines land under their entry.
    let rendered = table.render();
    let mut lines = rendered.lines();

    if let Some(header) = lines.next() {
        println!("{}", header);
    }
    if let Some(separator) = lines.next() {
        println!("{}", separator);
    }

    for (e, line) in entries.iter().zip(lines) {
        println!("{}", line);
        print_annotations(e, verbose);
    }
}

fn print_annotations(e: &TimeEntry, verbose: bool) {
    for flag in &e.flags {
        println!(
            "      {}[{}]{} {}",
            color_for_severity(flag.severity),
            flag.kind.as_str(),
            RESET,
            flag.message
        );
    }

    if !verbose {
        return;
    }

    for issue in &e.quality_issues {
        let suggestion = issue
            .suggestion
            .as_deref()
            .map(|s| format!(" → {}", s))
            .unwrap_or_default();
        println!(
            "      {}[{}]{} {}{}",
            GREY,
            issue.kind.as_str(),
            RESET,
            issue.message,
            suggestion
        );
    }

    if let Some(split) = &e.split_suggestion {
        println!(
            "      {}[split]{} {} part(s) of {} h each",
            CYAN,
            RESET,
            split.parts.len(),
            split.parts.first().map(|p| fmt_hours(p.hours)).unwrap_or_default()
        );
        for part in &split.parts {
            println!("            - {} ({} h)", truncate(&part.description, 60), fmt_hours(part.hours));
        }
    }
}

pub fn print_batch_summary(summary: &BatchSummary) {
    println!();
    println!("Entries:    {} total | {} flagged | {} approved | {} written off",
        summary.total_entries, summary.flagged_entries, summary.approved_entries, summary.written_off);
    println!(
        "Hours:      {} raw → {} adjusted ({})",
        fmt_hours(summary.total_hours),
        fmt_hours(summary.adjusted_hours),
        fmt_delta(summary.rounding_delta_hours)
    );
    println!(
        "Amount:     {} raw → {} adjusted",
        fmt_money(summary.total_amount),
        fmt_money(summary.adjusted_amount)
    );
    println!(
        "Confidence: {} high / {} medium / {} low",
        summary.high_confidence, summary.medium_confidence, summary.low_confidence
    );
    println!(
        "UTBMS:      {}/{} entries coded",
        summary.coded_entries, summary.total_entries
    );
}

pub fn print_daily_summaries(days: &[DailySummary], settings: &VerifierSettings) {
    let mut table = Table::new(vec![
        Column::new("Date", 12),
        Column::new("Entries", 7),
        Column::new("Hours", 6),
        Column::new("Amount", 11),
        Column::new("Flags", 5),
        Column::new("Over cap", 8),
    ]);

    for day in days {
        let over = if day.over_threshold {
            format!("> {:.1}", settings.day_threshold)
        } else {
            String::new()
        };
        table.add_row(vec![
            day.date.clone(),
            day.entries.to_string(),
            fmt_hours(day.hours),
            fmt_money(day.amount),
            day.flag_count.to_string(),
            over,
        ]);
    }

    println!();
    println!("{}", table.render());
}
