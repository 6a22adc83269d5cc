mod common;

use common::TestEnv;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn contracts_check() {
    let env = TestEnv::new();

    let summary = env.run_json(&["summary"]);
    assert_eq!(summary["ok"], true);
    validate("summary.schema.json", &summary["data"]);

    let tables = env.run_json(&["tables"]);
    assert_eq!(tables["ok"], true);
    validate("tables.schema.json", &tables["data"]);

    let rank = env.run_json(&["rank", "violations"]);
    assert_eq!(rank["ok"], true);
    validate("rank.schema.json", &rank["data"]);

    let ratios = env.run_json(&["ratios"]);
    assert_eq!(ratios["ok"], true);
    validate("ratios.schema.json", &ratios["data"]);

    let checks = env.run_json(&["validate"]);
    assert_eq!(checks["ok"], true);
    validate("validate.schema.json", &checks["data"]);

    let render = env.run_json(&["render", "--out", "dash.html"]);
    assert_eq!(render["ok"], true);
    validate("render.schema.json", &render["data"]);
}
