//! CLI integration tests for ratp-importer.
//!
//! These tests run the binary over extract trees laid out the way the
//! downloaded archives unpack.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const HEADER: &str = "stop_id,stop_name,stop_desc,stop_lat,stop_lon";

/// Get the importer binary command, rooted at `root` and isolated from any
/// user configuration.
fn importer(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ratp-importer").unwrap();
    cmd.arg("--root")
        .arg(root)
        .arg("--no-color")
        .env("XDG_CONFIG_HOME", root.join(".config"))
        .env_remove("RATP_IMPORTER_ROOT");
    cmd
}

/// Create a temporary working root.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write(root: &Path, path: &str, contents: &[u8]) {
    let dest = root.join(path);
    fs::create_dir_all(dest.parent().unwrap()).unwrap();
    fs::write(dest, contents).unwrap();
}

fn stop_table(root: &Path, folder: &str, rows: &[&str]) {
    let mut contents = format!("{}\n", HEADER);
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    write(
        root,
        &format!("extract/ratp_gtfs_lines/{}/stops.txt", folder),
        contents.as_bytes(),
    );
}

fn read_list(root: &Path, file: &str) -> Vec<Value> {
    let contents = fs::read_to_string(root.join("build/stations").join(file)).unwrap();
    serde_json::from_str(&contents).unwrap()
}

// ============================================================================
// ratp-importer build
// ============================================================================

#[test]
fn test_build_single_station() {
    let tmp = temp_dir();
    write(tmp.path(), "extract/rail_icons/M1genRVB.png", b"png");
    stop_table(
        tmp.path(),
        "RATP_GTFS_METRO_1",
        &["1001,chatelet,Chatelet station,48.8,2.3"],
    );

    importer(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished"));

    let expected = serde_json::json!([{
        "type": "station",
        "subtype": "subway",
        "lineNumber": "1",
        "icon": "subway-1.png",
        "center": { "lat": "48.8", "lng": "2.3" },
        "title": "Chatelet",
        "infos": "Chatelet station",
        "openDataID": "1001"
    }]);

    assert_eq!(Value::Array(read_list(tmp.path(), "subway.json")), expected);
    assert_eq!(Value::Array(read_list(tmp.path(), "all.json")), expected);
    assert!(read_list(tmp.path(), "bus.json").is_empty());
    assert!(read_list(tmp.path(), "tram.json").is_empty());
    assert!(tmp.path().join("build/icons/subway-1.png").exists());
}

#[test]
fn test_build_is_default_command() {
    let tmp = temp_dir();
    stop_table(tmp.path(), "RATP_GTFS_TRAM_T3", &["7,porte_de_vanves,Desc,48.82,2.30"]);

    importer(tmp.path()).assert().success();

    let tram = read_list(tmp.path(), "tram.json");
    assert_eq!(tram.len(), 1);
    assert_eq!(tram[0]["title"], "Porte de vanves");
    assert!(tram[0].get("icon").is_none());
}

#[test]
fn test_build_drops_duplicate_across_tables() {
    let tmp = temp_dir();
    stop_table(tmp.path(), "RATP_GTFS_METRO_1", &["1001,chatelet,Desc,48.8,2.3"]);
    stop_table(tmp.path(), "RATP_GTFS_METRO_4", &["4001,chatelet,Other,48.8,2.3"]);

    importer(tmp.path()).arg("build").assert().success();

    let all = read_list(tmp.path(), "all.json");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["openDataID"], "1001");
    assert_eq!(all[0]["lineNumber"], "1");
}

#[test]
fn test_build_skips_malformed_table() {
    let tmp = temp_dir();
    write(
        tmp.path(),
        "extract/ratp_gtfs_lines/RATP_GTFS_BUS_20/stops.txt",
        &[0xff, 0xfe, 0x00, 0x41],
    );
    stop_table(tmp.path(), "RATP_GTFS_BUS_21", &["21,gare_de_lyon,Desc,48.84,2.37"]);

    importer(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("RATP_GTFS_BUS_20"));

    let bus = read_list(tmp.path(), "bus.json");
    assert_eq!(bus.len(), 1);
    assert_eq!(bus[0]["lineNumber"], "21");
}

#[test]
fn test_build_reports_missing_icons() {
    let tmp = temp_dir();
    stop_table(tmp.path(), "RATP_GTFS_METRO_14", &["14,olympiades,Desc,48.82,2.36"]);

    importer(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("subway-14"));
}

#[test]
fn test_build_is_idempotent() {
    let tmp = temp_dir();
    write(tmp.path(), "extract/bus_icon/BUS_42-genRVB.png", b"bus");
    write(tmp.path(), "extract/rail_icons/T3-genRVB.png", b"tram");
    stop_table(
        tmp.path(),
        "RATP_GTFS_BUS_42",
        &["1,opera,Desc,48.87,2.33", "2,madeleine,Desc,48.87,2.32"],
    );
    stop_table(tmp.path(), "RATP_GTFS_TRAM_T3", &["3,porte_d_italie,Desc,48.81,2.35"]);

    importer(tmp.path()).arg("build").assert().success();
    let first = fs::read(tmp.path().join("build/stations/all.json")).unwrap();

    importer(tmp.path()).arg("build").assert().success();
    let second = fs::read(tmp.path().join("build/stations/all.json")).unwrap();

    assert_eq!(first, second);
    let bus = read_list(tmp.path(), "bus.json");
    assert_eq!(bus.len(), 2);
    assert_eq!(bus[0]["icon"], "bus-42.png");
    assert_eq!(read_list(tmp.path(), "tram.json")[0]["icon"], "tram-t3.png");
}

#[test]
fn test_build_with_empty_extract() {
    let tmp = temp_dir();

    importer(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("no icons or stop tables found"));

    for file in ["bus.json", "subway.json", "tram.json", "all.json"] {
        assert!(read_list(tmp.path(), file).is_empty());
    }
}

#[test]
fn test_build_uses_project_config() {
    let tmp = temp_dir();
    write(
        tmp.path(),
        "ratp-importer.toml",
        b"[paths]\nextract = \"data\"\nbuild = \"out\"\n\n[stations]\nroot = \"lines\"\n",
    );
    write(
        tmp.path(),
        "data/lines/RATP_GTFS_METRO_2/stops.txt",
        format!("{}\n2,nation,Desc,48.84,2.39\n", HEADER).as_bytes(),
    );

    importer(tmp.path()).arg("build").assert().success();

    let contents = fs::read_to_string(tmp.path().join("out/stations/subway.json")).unwrap();
    assert!(contents.contains("\"lineNumber\":\"2\""));
    assert!(!tmp.path().join("build").exists());
}

#[test]
fn test_build_quiet_prints_nothing() {
    let tmp = temp_dir();
    stop_table(tmp.path(), "RATP_GTFS_METRO_1", &["1,a,b,1,2"]);

    importer(tmp.path())
        .args(["--quiet", "build"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ============================================================================
// ratp-importer clean
// ============================================================================

#[test]
fn test_clean_removes_build_only() {
    let tmp = temp_dir();
    stop_table(tmp.path(), "RATP_GTFS_METRO_1", &["1,a,b,1,2"]);
    importer(tmp.path()).arg("build").assert().success();

    importer(tmp.path())
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));

    assert!(!tmp.path().join("build").exists());
    assert!(tmp.path().join("extract").exists());
}

#[test]
fn test_clean_all() {
    let tmp = temp_dir();
    write(tmp.path(), "raw/ratp_gtfs_lines.zip", b"zip");
    stop_table(tmp.path(), "RATP_GTFS_METRO_1", &["1,a,b,1,2"]);

    importer(tmp.path()).args(["clean", "--all"]).assert().success();

    assert!(!tmp.path().join("raw").exists());
    assert!(!tmp.path().join("extract").exists());
}

// ============================================================================
// ratp-importer fetch
// ============================================================================

#[test]
fn test_fetch_unreachable_source_fails() {
    let tmp = temp_dir();
    write(
        tmp.path(),
        "ratp-importer.toml",
        b"[[sources]]\narchive = \"lines.zip\"\nname = \"ratp_gtfs_lines\"\nurl = \"http://127.0.0.1:9/lines.zip\"\n",
    );

    importer(tmp.path())
        .arg("fetch")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: failed to download"));
}
