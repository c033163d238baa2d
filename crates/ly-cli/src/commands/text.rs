use std::path::Path;

use colored::Colorize;
use ly_corpus::{Corpus, CorpusIndex, LineText};

pub fn run(corpus: &Path, name: &str, line: Option<&str>) -> Result<(), String> {
    let index = CorpusIndex::load(corpus).map_err(|e| format!("{e}"))?;
    let text = index.hexagram(name).ok_or_else(|| {
        let hint = super::did_you_mean(&super::suggest(name.trim(), index.names(), 3));
        format!("hexagram not found: \"{}\"{hint}", name.trim())
    })?;

    if let Some(line) = line {
        let found = text
            .line(line)
            .ok_or_else(|| format!("line not found: \"{line}\" in {}", text.name))?;
        print_line(found);
        return Ok(());
    }

    println!("  {} {} [{}]", text.name.bold(), text.symbol, text.alias.dimmed());
    println!();
    if !text.core_meaning.is_empty() {
        println!("  {}", text.core_meaning);
    }
    if !text.judgment.is_empty() {
        println!("  卦辞: {}", text.judgment);
    }
    if !text.world_line.is_empty() {
        println!("  世爻: {}", text.world_line);
    }
    let mut lines: Vec<&LineText> = text.lines.values().collect();
    lines.sort_by_key(|l| l.index);
    for l in lines {
        println!();
        print_line(l);
    }
    Ok(())
}

fn print_line(line: &LineText) {
    let target = if line.transformed_name.is_empty() {
        String::new()
    } else {
        format!(" → {}", line.transformed_name)
    };
    println!("  {}{}", line.short_name().bold(), target.dimmed());
    if !line.text.is_empty() {
        println!("    爻辞: {}", line.text);
    }
    if !line.transformed_text.is_empty() {
        println!("    变卦辞: {}", line.transformed_text);
    }
    if !line.meaning.is_empty() {
        println!("    {}", line.meaning);
    }
}
