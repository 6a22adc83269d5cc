mod common;

use common::TestEnv;
use predicates::str::contains;

#[test]
fn render_writes_self_contained_page() {
    let env = TestEnv::new();
    env.cmd()
        .args(["render", "--out", "dash.html"])
        .assert()
        .success()
        .stdout(contains("wrote dash.html"));

    let page = env.read_output("dash.html");
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains("When the Witness Goes Silent"));
    for id in [
        "fig-yearly-trend",
        "fig-violation-taxonomy",
        "fig-sophistication",
        "fig-keyword-findings",
        "fig-growth",
    ] {
        assert!(page.contains(id), "missing {id}");
    }
    assert!(page.contains("+187% vs prior year"));
    assert!(page.contains("49 (34.8%)"));
    // no external assets: everything is inline
    assert!(!page.contains("<script src"));
    assert!(!page.contains("<link"));
}

#[test]
fn render_honors_page_config() {
    let env = TestEnv::new();
    let config = env.write_page_config(
        r##"
title = "Audit Trails Under the Lens"

[theme]
emphasis = "#336699"
"##,
    );
    env.cmd()
        .args(["render", "--out", "custom.html", "--config"])
        .arg(&config)
        .assert()
        .success();

    let page = env.read_output("custom.html");
    assert!(page.contains("Audit Trails Under the Lens"));
    assert!(!page.contains("When the Witness Goes Silent"));
    assert!(page.contains("--emphasis: #336699"));
    // the emphasis color reaches the chart marks, not just the stylesheet
    assert!(page.matches("#336699").count() > 1);
}

#[test]
fn render_stdout_flag_prints_the_page() {
    let env = TestEnv::new();
    env.cmd()
        .args(["render", "--stdout"])
        .assert()
        .success()
        .stdout(contains("<!DOCTYPE html>"));
}

#[test]
fn rank_preserves_declared_tie_order() {
    let env = TestEnv::new();
    let out = env.run_json(&["rank", "violations"]);
    let data = out["data"].as_array().unwrap();
    assert_eq!(data[0]["label"], "Audit Trail Failures");
    // the three rows tied at 24 keep their declared relative order
    let tied: Vec<&str> = data[2..5]
        .iter()
        .map(|e| e["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        tied,
        vec![
            "Chromatography Data Systems",
            "Electronic Records",
            "Password & Login Issues"
        ]
    );
}

#[test]
fn validate_json_envelope_reflects_overall_status() {
    let env = TestEnv::new();
    let out = env.run_json(&["validate"]);
    assert_eq!(out["ok"], true);
    assert_eq!(out["data"]["overall"], "ok");
    let checks = out["data"]["checks"].as_array().unwrap();
    assert!(checks.iter().all(|c| c["status"] == "ok"));
}

#[test]
fn summary_json_is_derived_from_the_tables() {
    let env = TestEnv::new();
    let out = env.run_json(&["summary"]);
    assert_eq!(out["data"]["top_violation"], "Audit Trail Failures");
    assert_eq!(out["data"]["top_violation_share"], "34.8%");
    assert_eq!(out["data"]["surge_growth"], "+187%");
    assert_eq!(out["data"]["us_share"], "50.4%");
}

#[test]
fn ratios_interpret_each_region() {
    let env = TestEnv::new();
    let out = env.run_json(&["ratios"]);
    let data = out["data"].as_array().unwrap();
    let classes: Vec<&str> = data.iter().map(|c| c["class"].as_str().unwrap()).collect();
    assert_eq!(classes, vec!["below", "above", "below"]);
    assert_eq!(data[1]["caption"], "More complex than basic");
}
