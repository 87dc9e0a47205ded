use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

/// A temporary working directory holding saved search responses.
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the workspace root.
    pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full = self.dir.path().join(relative_path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        std::fs::write(&full, content).expect("failed to write file");
        full
    }

    /// Write a response body wrapping `records` under `data.Get.CrispyMuffins`.
    pub fn write_response(&self, name: &str, records: Value) -> PathBuf {
        let body = json!({"data": {"Get": {"CrispyMuffins": records}}});
        self.write_file(name, &serde_json::to_string_pretty(&body).unwrap())
    }

    /// Two ramen dishes differing in spice, rating and links.
    pub fn write_ramen_fixture(&self) -> PathBuf {
        self.write_response(
            "ramen.json",
            json!([
                {
                    "dish_ID": "r1",
                    "dishName": "Shio Ramen",
                    "spice_Category": "mild",
                    "cuisine": "Japanese",
                    "restaurantRating": 4.2,
                    "restaurantName": "Menya",
                    "linkUber": "None",
                    "linkDoorDash": "https://doordash.example/r1",
                    "imageUber": "None"
                },
                {
                    "dish_ID": "r2",
                    "dishName": "Tantanmen",
                    "spice_Category": "hot",
                    "cuisine": "Japanese",
                    "restaurantRating": "4.6",
                    "restaurantName": "Ramen Ya",
                    "linkUber": "https://ubereats.example/r2",
                    "linkDoorDash": "https://doordash.example/r2",
                    "imageUber": "https://images.example/r2.jpg"
                }
            ]),
        )
    }
}

/// Build a command for the crispy binary, isolated from the caller's
/// environment and working directory.
pub fn crispy(workspace: &TestWorkspace) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_crispy"));
    cmd.current_dir(workspace.path())
        .env_remove("WEAVIATE_URL")
        .env_remove("WEAVIATE_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env("NO_COLOR", "1");
    cmd
}
