//! List command tests
//!
//! Federated paginated listing across snapshot catalogs.

mod common;

use predicates::prelude::*;

#[test]
fn test_list_merges_catalogs_in_configured_order() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 3);
    workspace.write_snapshot("catalogs/site-b.json", "b", 2);
    workspace.write_config(&["./catalogs/site-a.json", "./catalogs/site-b.json"]);

    workspace
        .fedcat()
        .args(["list", "--per-page", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 total"))
        .stdout(predicate::str::contains("a-1"))
        .stdout(predicate::str::contains("b-2"))
        .stdout(predicate::function(|out: &str| {
            // configured order: site-a devices before site-b devices
            match (out.find("a-1"), out.find("b-1")) {
                (Some(a), Some(b)) => a < b,
                _ => false,
            }
        }));
}

#[test]
fn test_list_page_size_splits_proportionally() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 7);
    workspace.write_snapshot("catalogs/site-b.json", "b", 3);
    workspace.write_config(&["./catalogs/site-a.json", "./catalogs/site-b.json"]);

    workspace
        .fedcat()
        .args(["list", "--per-page", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 of 10 total"))
        .stdout(predicate::str::contains("a-3"))
        .stdout(predicate::str::contains("b-2"))
        .stdout(predicate::str::contains("a-4").not());
}

#[test]
fn test_list_degrades_when_one_catalog_is_missing() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 3);
    workspace.write_config(&["./catalogs/site-a.json", "./catalogs/missing.json"]);

    workspace
        .fedcat()
        .args(["list", "--per-page", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 total"))
        .stdout(predicate::str::contains("a-2"));
}

#[test]
fn test_list_page_past_the_end_is_empty() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 2);
    workspace.write_config(&["./catalogs/site-a.json"]);

    workspace
        .fedcat()
        .args(["list", "--page", "5", "--per-page", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No devices."));
}

#[test]
fn test_list_detailed_shows_resources_and_timestamps() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 1);
    workspace.write_config(&["./catalogs/site-a.json"]);

    workspace
        .fedcat()
        .args(["list", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resources:"))
        .stdout(predicate::str::contains("a-1-r"))
        .stdout(predicate::str::contains("Protocol:"));
}

#[test]
fn test_list_with_catalog_overrides_ignores_config() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 1);
    workspace.write_snapshot("extra/site-c.json", "c", 2);
    workspace.write_config(&["./catalogs/site-a.json"]);

    workspace
        .fedcat()
        .args(["list", "--catalog", "./extra/site-c.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 total"))
        .stdout(predicate::str::contains("a-1").not());
}

#[test]
fn test_list_with_directory_source() {
    let workspace = common::TestWorkspace::new();
    workspace.write_snapshot("catalogs/site-a.json", "a", 1);
    workspace.write_snapshot("catalogs/site-b.json", "b", 1);
    workspace.write_config(&["./catalogs"]);

    workspace
        .fedcat()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 total"));
}

#[test]
fn test_list_without_any_catalogs_fails() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file("fedcat.yaml", "name: empty\ncatalogs: []\n");

    workspace
        .fedcat()
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least one catalog"));
}
