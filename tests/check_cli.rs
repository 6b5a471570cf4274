// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Black-box tests driving the `oifits check` subcommand.

use assert_cmd::Command;
use tempfile::tempdir;

use oifits::{write_fits, Dataset, Header, Target, TargetTable};

fn minimal_dataset() -> Dataset {
    let mut target = TargetTable::new(1);
    let mut t = Target::new_default(1);
    t.target = "Vega".to_string();
    t.raep0 = 279.23;
    t.decep0 = 38.78;
    t.equinox = 2000.0;
    target.targets.push(t);
    Dataset::new(Header::new_default(), target)
}

#[test]
fn check_passes_on_a_conformant_minimal_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("minimal.fits");
    write_fits(path.to_str().unwrap(), &minimal_dataset()).unwrap();

    Command::cargo_bin("oifits")
        .unwrap()
        .arg("check")
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn check_reports_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("minimal.fits");
    write_fits(path.to_str().unwrap(), &minimal_dataset()).unwrap();

    let output = Command::cargo_bin("oifits")
        .unwrap()
        .arg("check")
        .arg(&path)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(parsed.is_array());
}

#[test]
fn check_fails_on_empty_target_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.fits");
    let ds = Dataset::new(Header::new_default(), TargetTable::new(2));
    write_fits(path.to_str().unwrap(), &ds).unwrap();

    Command::cargo_bin("oifits")
        .unwrap()
        .arg("check")
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn check_fails_on_missing_file() {
    Command::cargo_bin("oifits")
        .unwrap()
        .arg("check")
        .arg("/nonexistent/path/does-not-exist.fits")
        .assert()
        .failure();
}
