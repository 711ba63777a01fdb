use std::fs;
use tempfile::tempdir;

use dgn7_cli::commands::{OutputFormat, extract};
use dgn7_core::encoder::{DesignFileBuilder, text_element};

#[test]
fn extract_text_to_file() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("plan.dgn");
    let out_path = td.path().join("plan.txt");

    let stream = DesignFileBuilder::new()
        .element(text_element(b"TITLE BLOCK").unwrap())
        .element(text_element(b"REV A\x00\x01").unwrap())
        .finish();
    fs::write(&in_path, &stream).unwrap();

    extract::execute(
        in_path.to_str().unwrap(),
        Some(out_path.to_str().unwrap()),
        "\n",
        OutputFormat::Text,
    )
    .unwrap();

    let out = fs::read_to_string(&out_path).unwrap();
    assert_eq!(out, "TITLE BLOCK\nREV A");
}

#[test]
fn extract_json_carries_inventory_and_fragments() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("notes.dgn");
    let out_path = td.path().join("notes.json");

    let stream = DesignFileBuilder::new()
        .element(text_element(b"NOTE ONE").unwrap())
        .finish();
    fs::write(&in_path, &stream).unwrap();

    extract::execute(
        in_path.to_str().unwrap(),
        Some(out_path.to_str().unwrap()),
        "\n",
        OutputFormat::Json,
    )
    .unwrap();

    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    let types: Vec<u64> = v["element_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_u64().unwrap())
        .collect();
    assert!(types.contains(&9));
    assert!(types.contains(&17));
    assert_eq!(v["text_fragments"][0], "NOTE ONE");
}

#[test]
fn extract_custom_separator() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("sep.dgn");
    let out_path = td.path().join("sep.txt");

    let stream = DesignFileBuilder::new()
        .element(text_element(b"A").unwrap())
        .element(text_element(b"B").unwrap())
        .finish();
    fs::write(&in_path, &stream).unwrap();

    extract::execute(
        in_path.to_str().unwrap(),
        Some(out_path.to_str().unwrap()),
        " | ",
        OutputFormat::Text,
    )
    .unwrap();

    assert_eq!(fs::read_to_string(&out_path).unwrap(), "A | B");
}

#[test]
fn extract_fails_on_truncated_file() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("cut.dgn");

    let stream = DesignFileBuilder::new()
        .element(text_element(b"GOES MISSING").unwrap())
        .finish_without_terminator();
    fs::write(&in_path, &stream[..stream.len() - 5]).unwrap();

    let result = extract::execute(in_path.to_str().unwrap(), None, "\n", OutputFormat::Text);
    assert!(result.is_err());
}
