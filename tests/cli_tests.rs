use assert_cmd::Command;
use casgraph::{GraphSnapshot, cli::CommandLineConfig};
use serde_json::Value;
use std::path::PathBuf;

const SCRIPT: &str = r#"[
    {"op": "add_vertex", "vertex": {"id": "a", "category": "geometry"}},
    {"op": "add_vertex", "vertex": {"id": "b", "category": "geometry"}},
    {"op": "add_vertex", "vertex": {"id": "c", "category": "variable"}},
    {"op": "add_edge", "from": "a", "to": "b"},
    {"op": "add_edge", "from": "a", "to": "c"},
    {"op": "add_edge", "from": "b", "to": "c"},
    {"op": "replace_vertex", "id": "b", "vertex": {"id": "d", "category": "geometry"}}
]"#;

#[test]
fn test_cli_exits_with_success_on_help() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casgraph"));
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_status_without_script() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casgraph"));
    cmd.args(["--command", "status"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(String::from_utf8(output).unwrap().trim(), "vertices=0 edges=0");
}

#[test]
fn test_cli_adjacency_after_replace() {
    let path = write_script("casgraph_cli_adjacency.json", SCRIPT);
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casgraph"));
    cmd.args(["--script", path.to_str().unwrap(), "--command", "adjacency"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "a out=[d,c] in=[]",
            "d out=[c] in=[a]",
            "c out=[] in=[a,d]",
        ]
    );
}

#[test]
fn test_cli_check_reports_clean_graph() {
    let path = write_script("casgraph_cli_check.json", SCRIPT);
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casgraph"));
    cmd.args(["--script", path.to_str().unwrap(), "check"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let report: Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(report["total_vertices"], 3);
    assert_eq!(report["total_edges"], 3);
    assert_eq!(report["dangling_edges"], 0);
}

#[test]
fn test_cli_snapshot_is_parseable() {
    let path = write_script("casgraph_cli_snapshot.json", SCRIPT);
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casgraph"));
    cmd.args(["--script", path.to_str().unwrap(), "--command", "snapshot"]);
    let output = cmd.assert().success().get_output().stdout.clone();
    let snapshot: GraphSnapshot<casgraph::GeomVertex, String> =
        serde_json::from_slice(&output).expect("snapshot");
    assert_eq!(snapshot.vertex_count(), 3);
    assert_eq!(snapshot.edges[0], ("a".to_string(), "d".to_string()));
}

#[test]
fn test_cli_rejects_invalid_script() {
    let path = write_script(
        "casgraph_cli_invalid.json",
        r#"[{"op": "add_edge", "from": "x", "to": "y"}]"#,
    );
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casgraph"));
    cmd.args(["--script", path.to_str().unwrap()]);
    cmd.assert().code(2);
}

#[test]
fn test_cli_rejects_unknown_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casgraph"));
    cmd.arg("--bogus");
    cmd.assert().code(2);
}

#[test]
fn test_cli_unknown_command_fails() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casgraph"));
    cmd.args(["--command", "teleport"]);
    let output = cmd.assert().code(1).get_output().stderr.clone();
    assert!(String::from_utf8(output).unwrap().contains("unknown command teleport"));
}

#[test]
fn test_command_line_config_parsing() {
    let cfg =
        CommandLineConfig::from_args(&["casgraph", "--script", "ops.json", "-v", "edges"]).unwrap();
    assert_eq!(cfg.script.as_deref(), Some("ops.json"));
    assert_eq!(cfg.command, "edges");
    assert!(cfg.verbose);

    let err = CommandLineConfig::from_args(&["casgraph", "--script"]).unwrap_err();
    assert!(err.contains("--script requires a value"));
}

fn write_script(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, contents).expect("write script");
    path
}
