use crate::When;

pub fn run(hexagram: &str, moving: &[usize], when: &When, json: bool) -> Result<(), String> {
    let hexagram = super::parse_hexagram(hexagram)?;
    let cast = super::cast_with_moving(hexagram, moving)?;
    let day = super::resolve_day(when)?;
    let (original, transformed) = super::annotate(&cast, day)?;

    if json {
        let value = serde_json::json!({
            "original": original,
            "transformed": transformed,
            "changed": cast.changed,
        });
        let out = serde_json::to_string_pretty(&value).map_err(|e| format!("{e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!("  {day}日");
    super::print_charts(&cast, &original, &transformed);
    let missing = original.missing_kinships();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|k| k.glyph()).collect();
        println!("  缺: {}", names.join(" "));
    }
    Ok(())
}
