//! Common test utilities for fedcat integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A test workspace holding snapshot files and a fedcat.yaml
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the workspace
    pub fn write_file(&self, rel: &str, content: &str) {
        let file_path = self.path.join(rel);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write a snapshot file with `count` devices named `{prefix}-{i}`,
    /// each owning one resource `{prefix}-{i}-r`
    pub fn write_snapshot(&self, rel: &str, prefix: &str, count: usize) {
        self.write_file(rel, &snapshot_json(prefix, count));
    }

    /// Write fedcat.yaml listing the given catalog endpoints
    pub fn write_config(&self, endpoints: &[&str]) {
        let mut yaml = String::from("name: test federation\n\ncatalogs:\n");
        for endpoint in endpoints {
            yaml.push_str(&format!("  - endpoint: {endpoint}\n"));
        }
        self.write_file("fedcat.yaml", &yaml);
    }

    /// A fedcat command running inside this workspace
    pub fn fedcat(&self) -> Command {
        let mut cmd = fedcat_cmd();
        cmd.current_dir(&self.path);
        cmd
    }
}

/// A fedcat command with a clean environment
pub fn fedcat_cmd() -> Command {
    #[allow(clippy::unwrap_used)]
    let mut cmd = Command::cargo_bin("fedcat").unwrap();
    // Always ignore any developer FEDCAT_CONFIG overrides during tests
    cmd.env_remove("FEDCAT_CONFIG");
    cmd
}

/// Snapshot JSON with `count` devices named `{prefix}-{i}`
#[allow(dead_code)]
pub fn snapshot_json(prefix: &str, count: usize) -> String {
    let devices: Vec<serde_json::Value> = (1..=count)
        .map(|i| {
            serde_json::json!({
                "id": format!("{prefix}-{i}"),
                "type": "Device",
                "name": format!("device {prefix}-{i}"),
                "meta": {"manufacturer": "acme", "site": prefix},
                "resources": [{
                    "id": format!("{prefix}-{i}-r"),
                    "device": format!("{prefix}-{i}"),
                    "name": format!("resource {prefix}-{i}-r"),
                    "protocols": [{
                        "type": "REST",
                        "endpoint": {"url": format!("http://{prefix}.local/{i}")},
                        "methods": ["GET"],
                        "content-types": ["application/json"]
                    }]
                }]
            })
        })
        .collect();
    let body = serde_json::json!({
        "description": format!("{prefix} snapshot"),
        "devices": devices,
    });
    #[allow(clippy::unwrap_used)]
    serde_json::to_string_pretty(&body).unwrap()
}
