pub mod analyze;
pub mod cast;
pub mod chart;
pub mod stars;
pub mod text;

use chrono::{Local, NaiveDate};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use ly_core::calendar::day_pillar;
use ly_core::cast::line_name;
use ly_core::{Branch, CalendarContext, Cast, Hexagram, HexagramChart, LineInfo, StemBranch, palace};
use strsim::jaro_winkler;

use crate::When;

/// Minimum similarity for a name suggestion (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.7;

/// Resolve the day pillar: explicit stem-branch, then date, then today.
fn resolve_day(when: &When) -> Result<StemBranch, String> {
    if let Some(day) = &when.day {
        return day.parse().map_err(|e| format!("{e}"));
    }
    let date = match &when.date {
        Some(date) => NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| format!("invalid date \"{date}\": {e}"))?,
        None => Local::now().date_naive(),
    };
    Ok(day_pillar(date))
}

fn resolve_calendar(when: &When, month: &str) -> Result<CalendarContext, String> {
    let month: Branch = month.parse().map_err(|e| format!("{e}"))?;
    Ok(CalendarContext::new(resolve_day(when)?, month))
}

/// Names close to `input`, best first.
fn suggest<'a>(input: &str, names: impl Iterator<Item = &'a str>, limit: usize) -> Vec<&'a str> {
    let mut scored: Vec<(&str, f64)> = names
        .map(|name| (name, jaro_winkler(input, name)))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(limit).map(|(name, _)| name).collect()
}

fn did_you_mean(suggestions: &[&str]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Parse six digits or a hexagram name.
fn parse_hexagram(input: &str) -> Result<Hexagram, String> {
    let input = input.trim();
    if input.chars().all(|c| c.is_ascii_digit()) {
        return input.parse().map_err(|e| format!("{e}"));
    }
    palace::hexagram_of_name(input).ok_or_else(|| {
        let hint = did_you_mean(&suggest(input, palace::names(), 3));
        format!("unknown hexagram \"{input}\"{hint}")
    })
}

/// Build a cast from a hexagram and 1-based moving line numbers.
fn cast_with_moving(hexagram: Hexagram, moving: &[usize]) -> Result<Cast, String> {
    let mut changed = [false; 6];
    for &line in moving {
        if !(1..=6).contains(&line) {
            return Err(format!("moving line {line} is out of range 1-6"));
        }
        changed[line - 1] = true;
    }
    Ok(Cast::new(hexagram, changed))
}

fn annotate(cast: &Cast, day: StemBranch) -> Result<(HexagramChart, HexagramChart), String> {
    let original = HexagramChart::annotate(cast.original, day.stem).map_err(|e| format!("{e}"))?;
    let transformed =
        HexagramChart::annotate_transformed(cast.transformed, day.stem, original.kinship_element)
            .map_err(|e| format!("{e}"))?;
    Ok((original, transformed))
}

fn describe(line: &LineInfo) -> String {
    format!(
        "{}{}{}",
        line.kinship.glyph(),
        line.stem_branch,
        line.element().glyph()
    )
}

/// Print the chart header and a table of both hexagrams, top line first.
fn print_charts(cast: &Cast, original: &HexagramChart, transformed: &HexagramChart) {
    let moving = cast.has_moving_lines();
    if moving {
        println!(
            "  {} {}  →  {} {}",
            original.name.bold(),
            original.placement.to_string().dimmed(),
            transformed.name.bold(),
            transformed.placement.to_string().dimmed()
        );
    } else {
        println!(
            "  {} {}",
            original.name.bold(),
            original.placement.to_string().dimmed()
        );
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["爻位", "六神", "本卦", "爻象", "世应", "伏神"];
    if moving {
        header.push("变卦");
    }
    table.set_header(header);

    for index in (0..6).rev() {
        let line = &original.lines[index];
        let mut row = vec![
            line_name(index).to_string(),
            line.spirit.to_string(),
            describe(line),
            cast.line_kind(index).mark().to_string(),
            line.marker.map(|m| m.to_string()).unwrap_or_default(),
            line.hidden.map(|h| h.to_string()).unwrap_or_default(),
        ];
        if moving {
            let changed = &transformed.lines[index];
            let mark = if changed.yang { "—" } else { "- -" };
            let marker = changed.marker.map(|m| format!(" {m}")).unwrap_or_default();
            row.push(format!("{} {mark}{marker}", describe(changed)));
        }
        table.add_row(row);
    }
    println!("{table}");

    if let Some(body) = original.body_branch() {
        println!("  卦身: {body}");
    }
}
