use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

#[test]
fn cli_routes_board_links_to_json() {
    let root = repo_root();
    let fixture = root.join("fixtures").join("board.json");
    assert!(fixture.exists(), "fixture missing: {}", fixture.display());

    let exe = assert_cmd::cargo_bin!("corkboard-cli");
    let assert = Command::new(exe)
        .current_dir(&root)
        .args(["links", "--select", "n1p2", fixture.to_string_lossy().as_ref()])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let layout: serde_json::Value = serde_json::from_str(&stdout).expect("layout JSON");
    let paths = layout["paths"].as_array().expect("paths array");
    // Five declared links fan out to eight pairs, all mounted.
    assert_eq!(paths.len(), 8);
    assert_eq!(paths[0]["id"], "n1p2-n2p2");
    assert_eq!(paths[0]["is_highlighted"], true);
    assert_eq!(paths[0]["is_connected_highlighted"], true);
}

#[test]
fn cli_emits_links_svg() {
    let root = repo_root();
    let fixture = root.join("fixtures").join("board.json");

    let exe = assert_cmd::cargo_bin!("corkboard-cli");
    let assert = Command::new(exe)
        .current_dir(&root)
        .args([
            "links",
            "--format",
            "svg",
            fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains(r#"class="links-layer""#));
    assert!(stdout.contains("<path"));
}

#[test]
fn cli_writes_timeline_svg_to_a_file() {
    let root = repo_root();
    let fixture = root.join("fixtures").join("events.json");

    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("timeline.svg");

    let exe = assert_cmd::cargo_bin!("corkboard-cli");
    Command::new(exe)
        .current_dir(&root)
        .args([
            "timeline",
            "--format",
            "svg",
            "--select",
            "ev1",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.contains(r#"class="event-timeline""#));
    // ev1 and ev2 overlap in the "build" lane.
    assert!(svg.contains(r##"stroke="#ffffff" stroke-width="0.8""##));
}

#[test]
fn cli_reads_events_from_stdin() {
    let exe = assert_cmd::cargo_bin!("corkboard-cli");
    let assert = assert_cmd::Command::new(exe)
        .args(["timeline", "--pretty", "-"])
        .write_stdin(r#"[{ "id": "e1", "name": "build", "startTime": 0, "endTime": 1000 }]"#)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let layout: serde_json::Value = serde_json::from_str(&stdout).expect("layout JSON");
    assert_eq!(layout["grid_interval_ms"], 30000.0);
    assert_eq!(layout["lanes"].as_array().unwrap().len(), 1);
}

#[test]
fn cli_rejects_unknown_flags_with_usage() {
    let exe = assert_cmd::cargo_bin!("corkboard-cli");
    Command::new(exe)
        .args(["links", "--bogus"])
        .assert()
        .code(2);
}
