//! Filter command tests
//!
//! Attribute-path filtering across the federated catalogs.

mod common;

use predicates::prelude::*;

#[test]
fn test_filter_devices_by_meta() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 2);
    workspace.write_snapshot("catalogs/site-b.json", "b", 3);
    workspace.write_config(&["./catalogs/site-a.json", "./catalogs/site-b.json"]);

    workspace
        .fedcat()
        .args(["filter", "meta.site", "equals", "b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matching devices"))
        .stdout(predicate::str::contains("3 total"))
        .stdout(predicate::str::contains("b-1"))
        .stdout(predicate::str::contains("a-1").not());
}

#[test]
fn test_filter_one_returns_first_match_in_order() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 2);
    workspace.write_snapshot("catalogs/site-b.json", "b", 2);
    workspace.write_config(&["./catalogs/site-a.json", "./catalogs/site-b.json"]);

    workspace
        .fedcat()
        .args(["filter", "meta.manufacturer", "equals", "acme", "--one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a-1"))
        .stdout(predicate::str::contains("b-1").not());
}

#[test]
fn test_filter_resources_groups_into_owning_devices() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 2);
    workspace.write_snapshot("catalogs/site-b.json", "b", 1);
    workspace.write_config(&["./catalogs/site-a.json", "./catalogs/site-b.json"]);

    workspace
        .fedcat()
        .args(["filter", "id", "suffix", "-r", "--resources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Devices with matching resources"))
        .stdout(predicate::str::contains("3 total"))
        .stdout(predicate::str::contains("a-1-r"))
        .stdout(predicate::str::contains("b-1-r"));
}

#[test]
fn test_filter_resource_one() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 2);
    workspace.write_config(&["./catalogs/site-a.json"]);

    workspace
        .fedcat()
        .args(["filter", "name", "contains", "a-2-r", "--resources", "--one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resource a-2-r"));
}

#[test]
fn test_filter_no_matches() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 1);
    workspace.write_config(&["./catalogs/site-a.json"]);

    workspace
        .fedcat()
        .args(["filter", "meta.manufacturer", "equals", "globex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches."));
}

#[test]
fn test_filter_one_no_match_is_not_found() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 1);
    workspace.write_config(&["./catalogs/site-a.json"]);

    workspace
        .fedcat()
        .args(["filter", "name", "equals", "nothing", "--one"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No item matches"));
}

#[test]
fn test_filter_rejects_unknown_operator() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 1);
    workspace.write_config(&["./catalogs/site-a.json"]);

    workspace
        .fedcat()
        .args(["filter", "name", "regex", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown filter operator: regex"));
}
