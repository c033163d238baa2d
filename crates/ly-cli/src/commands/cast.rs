use colored::Colorize;
use ly_core::cast::line_name;
use ly_core::{Cast, LineCast};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::When;

pub fn run(lines: &[String], seed: Option<u64>, when: &When) -> Result<(), String> {
    let tosses = if lines.is_empty() {
        toss(seed)
    } else {
        parse_tosses(lines)?
    };
    let day = super::resolve_day(when)?;

    println!("  {}", "Tosses".bold());
    for (index, coins) in tosses.iter().enumerate().rev() {
        let kind = coins.kind();
        let mark = if kind.is_moving() {
            kind.mark().red().to_string()
        } else {
            kind.mark().to_string()
        };
        println!("  {}  {coins}  {mark}", line_name(index));
    }
    if let Some(seed) = seed {
        println!("  {}", format!("seed {seed}").dimmed());
    }
    println!();

    let cast = Cast::from_tosses(tosses);
    let (original, transformed) = super::annotate(&cast, day)?;
    super::print_charts(&cast, &original, &transformed);
    Ok(())
}

fn toss(seed: Option<u64>) -> [LineCast; 6] {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    std::array::from_fn(|_| LineCast(std::array::from_fn(|_| rng.random_bool(0.5))))
}

fn parse_tosses(lines: &[String]) -> Result<[LineCast; 6], String> {
    let parsed = lines
        .iter()
        .map(|l| l.parse::<LineCast>().map_err(|e| format!("{e}")))
        .collect::<Result<Vec<_>, _>>()?;
    <[LineCast; 6]>::try_from(parsed)
        .map_err(|p| format!("expected 6 tosses, got {}", p.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_tosses_repeat() {
        assert_eq!(toss(Some(7)), toss(Some(7)));
    }

    #[test]
    fn explicit_tosses() {
        let lines: Vec<String> = ["111", "000", "100", "110", "111", "000"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let tosses = parse_tosses(&lines).unwrap();
        assert_eq!(tosses[0].heads(), 3);
        assert_eq!(tosses[3].heads(), 2);
        assert!(parse_tosses(&lines[..5]).is_err());
        assert!(parse_tosses(&["12x".to_string()]).is_err());
    }
}
