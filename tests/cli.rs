use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("csvdash").unwrap()
}

#[test]
fn summary_lists_headlines() {
    cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("observations: 141"))
        .stdout(contains("surge: 2024 (+187%)"));
}

#[test]
fn validate_reports_ok() {
    cmd()
        .arg("validate")
        .assert()
        .success()
        .stdout(contains("datasets ok"));
}

#[test]
fn show_dumps_declared_order() {
    cmd()
        .args(["show", "violations"])
        .assert()
        .success()
        .stdout(contains("Audit Trail Failures\t49\t34.8%"));
}

#[test]
fn rank_rejects_missing_measures() {
    cmd()
        .args(["rank", "yearly", "--by", "ratio"])
        .assert()
        .failure()
        .stderr(contains("has no"));
}
