mod common;

use common::{crispy, TestWorkspace};
use predicates::prelude::*;
use serde_json::{json, Value};

const NO_IMAGE: &str = "No image available";

fn json_stdout(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

#[test]
fn render_filters_by_spice() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();

    let output = crispy(&ws)
        .args(["--json", "render", "ramen.json", "--spice", "hot", "--no-images"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let json = json_stdout(&output);
    assert_eq!(json["query"], "ramen.json");
    assert_eq!(json["total"], 2);
    assert_eq!(json["count"], 1);
    assert_eq!(json["rows"][0][0]["title"], "Tantanmen");
    assert_eq!(json["options"]["tags"]["spice"], json!(["mild", "hot"]));
}

#[test]
fn render_prefers_uber_link_then_doordash() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();

    let output = crispy(&ws)
        .args(["--json", "render", "ramen.json", "--no-images"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_stdout(&output);
    let first = &json["rows"][0][0];
    let second = &json["rows"][0][1];
    assert_eq!(first["link"]["platform"], "door_dash");
    assert_eq!(first["link"]["url"], "https://doordash.example/r1");
    assert_eq!(second["link"]["platform"], "uber");
    assert_eq!(second["link"]["url"], "https://ubereats.example/r2");
}

#[test]
fn render_without_images_leaves_urls_pending() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();

    let output = crispy(&ws)
        .args(["--json", "render", "ramen.json", "--no-images"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["rows"][0][0]["image"]["status"], "unavailable");
    assert_eq!(json["rows"][0][1]["image"]["status"], "pending");
    assert_eq!(json["rows"][0][1]["image"]["url"], "https://images.example/r2.jpg");
}

#[test]
fn render_rating_range_is_inclusive() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();

    let output = crispy(&ws)
        .args(["--json", "render", "ramen.json", "--no-images", "--min-rating", "4.6"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["count"], 1);
    assert_eq!(json["rows"][0][0]["dish_id"], "r2");
    assert_eq!(json["rating_filter"]["min"], 4.6);
}

#[test]
fn render_columns_shape_the_grid() {
    let ws = TestWorkspace::new();
    let records: Vec<Value> = (0..7)
        .map(|i| json!({"dish_ID": format!("d{i}"), "dishName": format!("Dish {i}")}))
        .collect();
    ws.write_response("seven.json", Value::Array(records));

    let output = crispy(&ws)
        .args(["--json", "render", "seven.json", "--no-images", "--columns", "3"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    let shape: Vec<usize> = json["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row.as_array().unwrap().len())
        .collect();
    assert_eq!(shape, [3, 3, 1]);
}

#[test]
fn render_empty_results_asks_for_craving() {
    let ws = TestWorkspace::new();
    ws.write_response("empty.json", json!([]));

    let output = crispy(&ws)
        .args(["--json", "render", "empty.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);
    assert_eq!(json["status"], "empty");
    assert_eq!(json["message"], "Please tell us what you're craving");
}

#[test]
fn render_unknown_collection_asks_for_craving() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();

    crispy(&ws)
        .args(["render", "ramen.json", "--collection", "OtherDishes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please tell us what you're craving"));
}

#[test]
fn render_human_output() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();

    crispy(&ws)
        .args(["render", "ramen.json", "--no-images", "--cuisine", "Japanese"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 2 of 2 results"))
        .stdout(predicate::str::contains("Shio Ramen"))
        .stdout(predicate::str::contains("Tantanmen"))
        .stdout(predicate::str::contains(NO_IMAGE));
}

#[test]
fn render_filtered_to_nothing() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();

    crispy(&ws)
        .args(["render", "ramen.json", "--no-images", "--cuisine", "Peruvian"])
        .assert()
        .success()
        .stdout(predicate::str::contains("None of the 2 results"));
}

#[test]
fn render_show_options() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();

    crispy(&ws)
        .args(["render", "ramen.json", "--no-images", "--show-options"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Filter options"))
        .stdout(predicate::str::contains("mild, hot"));
}

#[test]
fn render_honors_config_file() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();
    ws.write_file("crispy.toml", "[display]\ncolumns = 1\nfetch_images = false\n");

    let output = crispy(&ws)
        .args(["--json", "render", "ramen.json"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    assert_eq!(json["rows"].as_array().unwrap().len(), 2);
    assert_eq!(json["rows"][1][0]["image"]["status"], "pending");
}

#[test]
fn render_rejects_inverted_rating_range() {
    let ws = TestWorkspace::new();
    ws.write_ramen_fixture();

    crispy(&ws)
        .args(["render", "ramen.json", "--min-rating", "5", "--max-rating", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than"));
}

#[test]
fn render_missing_file_fails() {
    let ws = TestWorkspace::new();

    crispy(&ws)
        .args(["render", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn render_invalid_json_fails() {
    let ws = TestWorkspace::new();
    ws.write_file("broken.json", "{not json");

    crispy(&ws)
        .args(["render", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("as JSON"));
}
