// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Black-box tests driving the `oifits merge` subcommand.

use assert_cmd::Command;
use tempfile::tempdir;

use oifits::{read_fits, write_fits, Dataset, Header, Target, TargetTable};

fn dataset_with_target(name: &str) -> Dataset {
    let mut target = TargetTable::new(1);
    let mut t = Target::new_default(1);
    t.target = name.to_string();
    t.raep0 = 10.0;
    t.decep0 = 20.0;
    t.equinox = 2000.0;
    target.targets.push(t);
    Dataset::new(Header::new_default(), target)
}

#[test]
fn merge_combines_two_inputs_deduplicating_shared_target() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.fits");
    let b = dir.path().join("b.fits");
    let out = dir.path().join("out.fits");

    write_fits(a.to_str().unwrap(), &dataset_with_target("Vega")).unwrap();
    write_fits(b.to_str().unwrap(), &dataset_with_target("Vega")).unwrap();

    Command::cargo_bin("oifits")
        .unwrap()
        .arg("merge")
        .arg(&out)
        .arg(&a)
        .arg(&b)
        .assert()
        .success();

    let merged = read_fits(out.to_str().unwrap()).unwrap();
    assert_eq!(merged.target.targets.len(), 1);
}

#[test]
fn merge_requires_at_least_two_inputs() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.fits");
    let out = dir.path().join("out.fits");
    write_fits(a.to_str().unwrap(), &dataset_with_target("Vega")).unwrap();

    Command::cargo_bin("oifits")
        .unwrap()
        .arg("merge")
        .arg(&out)
        .arg(&a)
        .assert()
        .failure();
}
