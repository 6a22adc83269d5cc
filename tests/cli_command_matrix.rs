use assert_cmd::Command;

fn run_help(args: &[&str]) {
    let mut cmd = Command::cargo_bin("csvdash").unwrap();
    cmd.args(args).arg("--help").assert().success();
}

#[test]
fn every_cli_command_has_help_path() {
    // top-level
    run_help(&[]);

    run_help(&["render"]);
    run_help(&["summary"]);
    run_help(&["tables"]);
    run_help(&["show"]);
    run_help(&["rank"]);
    run_help(&["ratios"]);
    run_help(&["validate"]);
}
