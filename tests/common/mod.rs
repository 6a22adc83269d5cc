use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let dir = tmp.path().to_path_buf();
        Self { _tmp: tmp, dir }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("csvdash").expect("csvdash binary");
        cmd.current_dir(&self.dir);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn write_page_config(&self, contents: &str) -> PathBuf {
        let path = self.dir.join("page.toml");
        fs::write(&path, contents).expect("write page config");
        path
    }

    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.dir.join(name)).expect("read rendered output")
    }
}
