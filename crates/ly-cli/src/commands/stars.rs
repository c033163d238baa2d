use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use ly_core::stars::star_map;

use crate::When;

pub fn run(month: &str, when: &When) -> Result<(), String> {
    let calendar = super::resolve_calendar(when, month)?;
    println!("  {}", calendar.to_string().bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["神煞", "地支"]);
    for (star, branches) in star_map(calendar.day, calendar.month) {
        let names: Vec<String> = branches.iter().map(|b| b.to_string()).collect();
        table.add_row(vec![star.glyph().to_string(), names.join(" ")]);
    }
    println!("{table}");
    Ok(())
}
