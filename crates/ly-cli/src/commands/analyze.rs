use std::path::Path;

use colored::Colorize;
use ly_corpus::CorpusIndex;
use ly_engine::render::narrative;
use ly_engine::{
    AnalysisConfig, AnalysisContext, AnalysisResult, Category, Decoration, Fact, Gender, Judgment,
    analyze_with, decorate,
};
use tracing::debug;

use crate::When;

/// Arguments of the `analyze` command.
pub struct Request<'a> {
    pub hexagram: &'a str,
    pub moving: &'a [usize],
    pub category: &'a str,
    pub gender: Option<&'a str>,
    pub month: &'a str,
    pub when: &'a When,
    pub corpus: Option<&'a Path>,
    pub brief: bool,
    pub json: bool,
}

pub fn run(req: &Request<'_>) -> Result<(), String> {
    let hexagram = super::parse_hexagram(req.hexagram)?;
    let cast = super::cast_with_moving(hexagram, req.moving)?;
    let calendar = super::resolve_calendar(req.when, req.month)?;
    let category: Category = req.category.parse().map_err(|e| format!("{e}"))?;

    let mut ctx = AnalysisContext::new(cast, calendar, category);
    if let Some(gender) = req.gender {
        let gender: Gender = gender.parse().map_err(|e| format!("{e}"))?;
        ctx = ctx.with_gender(gender);
    }
    let config = if req.brief {
        AnalysisConfig::brief()
    } else {
        AnalysisConfig::default()
    };

    let result = analyze_with(&ctx, &config).map_err(|e| format!("{e}"))?;
    let decoration = match req.corpus {
        Some(path) => {
            let corpus = CorpusIndex::load(path).map_err(|e| format!("{e}"))?;
            debug!(path = %path.display(), entries = corpus.len(), "loaded corpus");
            Some(decorate(&result, &corpus))
        }
        None => None,
    };

    if req.json {
        let value = serde_json::json!({
            "reading": result,
            "decoration": decoration,
        });
        let out = serde_json::to_string_pretty(&value).map_err(|e| format!("{e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!("  {calendar}  {}", category.glyph().bold());
    super::print_charts(&cast, &result.original, &result.transformed);
    println!();
    print_reading(&result);
    if let Some(decoration) = &decoration {
        print_decoration(decoration);
    }
    Ok(())
}

fn print_reading(result: &AnalysisResult) {
    let lines = narrative(&result.facts);
    for (fact, line) in result.facts.iter().zip(lines) {
        match fact {
            Fact::Judgment(judgment) => {
                let text = match judgment {
                    Judgment::Auspicious => line.green().bold(),
                    Judgment::Neutral => line.yellow().bold(),
                    Judgment::Inauspicious => line.red().bold(),
                };
                println!("  {text}");
            }
            Fact::Target(_) | Fact::Score { .. } => println!("  {}", line.bold()),
            Fact::Line(_) => {
                for part in line.lines() {
                    println!("  {}", part.dimmed());
                }
            }
            _ => println!("  {line}"),
        }
    }
}

fn print_decoration(decoration: &Decoration) {
    if let Some(text) = &decoration.original {
        println!();
        println!("  {} {}", text.name.bold(), text.symbol);
        if !text.judgment.is_empty() {
            println!("  卦辞: {}", text.judgment);
        }
        if !text.core_meaning.is_empty() {
            println!("  {}", text.core_meaning.dimmed());
        }
    }
    for line in &decoration.lines {
        let Some(text) = &line.text else {
            continue;
        };
        println!();
        println!("  {}", line.name.bold());
        if !text.text.is_empty() {
            println!("  爻辞: {}", text.text);
        }
        if !text.meaning.is_empty() {
            println!("  {}", text.meaning.dimmed());
        }
    }
    if let Some(text) = &decoration.transformed {
        println!();
        println!("  {} {} {}", "变".dimmed(), text.name.bold(), text.symbol);
        if !text.judgment.is_empty() {
            println!("  卦辞: {}", text.judgment);
        }
    }
}
