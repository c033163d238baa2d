//! Integration tests for the `ly` command-line interface.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CORPUS: &str = "\
### 坤宫

#### **一、本宫卦：坤为地 ䷁（双重柔顺，厚德载物）**
+ **卦辞**：元亨，利牝马之贞。
+ **世爻**：上六
1. **初六爻动（变地雷复 ䷗）**
   - **本爻辞**：履霜，坚冰至。
   - **变卦辞**：亨。出入无疾，朋来无咎。
   - **爻动含义**：见微知著，防患未然。

---

#### 二、一世卦：地雷复 ䷗（一阳来复）
* **卦辞**：亨。出入无疾。
";

/// Create a temp directory holding a small commentary file.
fn test_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("corpus.md"), CORPUS).unwrap();
    dir
}

fn ly() -> Command {
    Command::cargo_bin("ly").unwrap()
}

// ---------------------------------------------------------------------------
// chart
// ---------------------------------------------------------------------------

#[test]
fn chart_by_digits() {
    ly().args(["chart", "010001", "--day", "甲子"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("山水蒙")
                .and(predicate::str::contains("离宫"))
                .and(predicate::str::contains("甲子日")),
        );
}

#[test]
fn chart_by_name_with_moving_line() {
    ly().args(["chart", "乾为天", "-m", "1", "--day", "甲子"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("乾为天")
                .and(predicate::str::contains("天风姤"))
                .and(predicate::str::contains("变卦")),
        );
}

#[test]
fn chart_json() {
    let output = ly()
        .args(["chart", "111111", "--day", "甲子", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["original"]["name"], "乾为天");
    assert_eq!(value["changed"], serde_json::json!([false, false, false, false, false, false]));
}

#[test]
fn chart_unknown_hexagram_suggests() {
    ly().args(["chart", "山水", "--day", "甲子"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("山水蒙")));
}

#[test]
fn chart_moving_line_out_of_range() {
    ly().args(["chart", "111111", "-m", "7", "--day", "甲子"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn chart_bad_date() {
    ly().args(["chart", "111111", "--date", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
}

// ---------------------------------------------------------------------------
// cast
// ---------------------------------------------------------------------------

#[test]
fn cast_explicit_tosses() {
    ly().args([
        "cast",
        "--lines",
        "111,111,111,111,111,111",
        "--day",
        "甲子",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("乾为天").and(predicate::str::contains("坤为地")));
}

#[test]
fn cast_needs_six_tosses() {
    ly().args(["cast", "--lines", "111,000", "--day", "甲子"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 6 tosses"));
}

#[test]
fn seeded_cast_is_deterministic() {
    let first = ly()
        .args(["cast", "--seed", "42", "--day", "甲子"])
        .output()
        .unwrap();
    let second = ly()
        .args(["cast", "--seed", "42", "--day", "甲子"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_hidden_wealth() {
    ly().args([
        "analyze", "010001", "-c", "wealth", "--day", "甲寅", "--month", "辰",
    ])
    .assert()
    .success()
    .stdout(
        predicate::str::contains("己酉")
            .and(predicate::str::contains("伏藏"))
            .and(predicate::str::contains("断：吉"))
            .and(predicate::str::contains("初爻：")),
    );
}

#[test]
fn analyze_json() {
    let output = ly()
        .args([
            "analyze", "010001", "-c", "wealth", "--day", "甲寅", "--month", "辰", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["reading"]["judgment"], "Auspicious");
    assert_eq!(value["reading"]["assessment"]["score"], 4);
    assert!(value["decoration"].is_null());
}

#[test]
fn analyze_brief_skips_line_reports() {
    ly().args([
        "analyze", "010001", "-c", "wealth", "--day", "甲寅", "--month", "辰", "--brief",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("断：").and(predicate::str::contains("初爻：").not()));
}

#[test]
fn analyze_invalid_category() {
    ly().args(["analyze", "111111", "-c", "lottery", "--day", "甲子", "--month", "寅"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid category: lottery"));
}

#[test]
fn analyze_invalid_month() {
    ly().args(["analyze", "111111", "--day", "甲子", "--month", "X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn analyze_with_corpus() {
    let dir = test_corpus();
    let corpus = dir.path().join("corpus.md");
    ly().args([
        "analyze",
        "000000",
        "-m",
        "1",
        "--day",
        "甲子",
        "--month",
        "寅",
        "--corpus",
        corpus.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(
        predicate::str::contains("元亨，利牝马之贞。")
            .and(predicate::str::contains("履霜，坚冰至。")),
    );
}

// ---------------------------------------------------------------------------
// text
// ---------------------------------------------------------------------------

#[test]
fn text_shows_hexagram() {
    let dir = test_corpus();
    let corpus = dir.path().join("corpus.md");
    ly().args(["text", "坤为地", "--corpus", corpus.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("䷁")
                .and(predicate::str::contains("元亨"))
                .and(predicate::str::contains("初六")),
        );
}

#[test]
fn text_single_line() {
    let dir = test_corpus();
    let corpus = dir.path().join("corpus.md");
    ly().args(["text", "坤为地", "初六", "--corpus", corpus.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("履霜").and(predicate::str::contains("地雷复")));
}

#[test]
fn text_missing_line() {
    let dir = test_corpus();
    let corpus = dir.path().join("corpus.md");
    ly().args(["text", "坤为地", "上六", "--corpus", corpus.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line not found"));
}

#[test]
fn text_miss_suggests() {
    let dir = test_corpus();
    let corpus = dir.path().join("corpus.md");
    ly().args(["text", "坤为", "--corpus", corpus.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("hexagram not found")
                .and(predicate::str::contains("did you mean 坤为地")),
        );
}

// ---------------------------------------------------------------------------
// stars
// ---------------------------------------------------------------------------

#[test]
fn stars_table() {
    ly().args(["stars", "--day", "甲子", "--month", "寅"])
        .assert()
        .success()
        .stdout(predicate::str::contains("贵人").and(predicate::str::contains("驿马")));
}
