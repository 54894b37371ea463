//! Rendering properties of the nightly sanity report, exercised through the
//! public library API.

use std::fs;

use sanity_report::catalog::ReportCatalog;
use sanity_report::document::ResultsDocument;
use sanity_report::render::render_report;
use serde_json::{json, Value};

const FIXTURE: &str = "tests/fixtures/2020-07-01/report_data.json";

fn fixture() -> (ResultsDocument, Value) {
    let text = fs::read_to_string(FIXTURE).unwrap();
    let doc = ResultsDocument::parse(&text, FIXTURE).unwrap();
    let raw: Value = serde_json::from_str(&text).unwrap();
    (doc, raw)
}

/// Value cells of the row whose description is `label`.
fn row_cells(html: &str, label: &str) -> Vec<String> {
    let marker = format!("<td class=\"description\">{}</td>", label);
    let line = html
        .lines()
        .find(|l| l.contains(&marker))
        .unwrap_or_else(|| panic!("row {} not rendered", label));
    let rest = &line[line.find(&marker).unwrap() + marker.len()..];
    rest.split("</td>")
        .filter(|s| s.contains("<td"))
        .map(|s| s[s.find('>').unwrap() + 1..].to_string())
        .collect()
}

#[test]
fn complete_document_renders_every_row_in_catalog_order() {
    let (doc, raw) = fixture();
    let catalog = ReportCatalog::standard();
    let html = render_report(&doc, catalog, "2020-07-01");

    let mut pos = 0;
    for test in &catalog.tests {
        let marker = format!(
            "<tr><td>{}</td><td class=\"description\">{}</td>",
            test.id, test.description
        );
        let found = html[pos..]
            .find(&marker)
            .unwrap_or_else(|| panic!("test {} missing or out of order", test.id));
        pos += found + marker.len();

        let expected: Vec<String> = catalog
            .columns
            .iter()
            .map(|c| raw["tests"][&c.id][&test.id].as_str().unwrap().to_string())
            .collect();
        assert_eq!(row_cells(&html, &test.description), expected, "row {}", test.id);
    }
}

#[test]
fn summary_rows_read_nested_cloud_sdk_fields() {
    let (doc, _) = fixture();
    let html = render_report(&doc, ReportCatalog::standard(), "2020-07-01");
    assert_eq!(
        row_cells(&html, "CloudSDK Commit ID"),
        ["c0ffee0", "c0ffee1", "c0ffee2", "c0ffee3"]
    );
    assert_eq!(
        row_cells(&html, "Test Pass Rate"),
        ["95%", "100%", "88%", "92%"]
    );
}

#[test]
fn rendering_is_deterministic() {
    let (doc, _) = fixture();
    let catalog = ReportCatalog::standard();
    assert_eq!(
        render_report(&doc, catalog, "run"),
        render_report(&doc, catalog, "run")
    );
}

#[test]
fn column_order_ignores_document_key_order() {
    let forward = ResultsDocument::from_value(json!({
        "fw_under_test": {"ea8300": "a", "ecw5211": "b", "ecw5410": "c", "ec420": "d"}
    }));
    let reversed = ResultsDocument::parse(
        r#"{"fw_under_test": {"ec420": "d", "ecw5410": "c", "ecw5211": "b", "ea8300": "a"}}"#,
        "reversed.json",
    )
    .unwrap();
    let catalog = ReportCatalog::standard();
    let a = render_report(&forward, catalog, "run");
    let b = render_report(&reversed, catalog, "run");
    assert_eq!(a, b);
    assert_eq!(row_cells(&a, "FW Under Test"), ["a", "b", "c", "d"]);
}

#[test]
fn missing_model_leaves_blank_cells_and_other_rows_render() {
    let (_, mut raw) = fixture();
    raw["tests"].as_object_mut().unwrap().remove("ec420");
    let doc = ResultsDocument::from_value(raw.clone());
    let catalog = ReportCatalog::standard();
    let html = render_report(&doc, catalog, "run");

    for test in &catalog.tests {
        let cells = row_cells(&html, &test.description);
        assert_eq!(cells[3], "", "ec420 cell for {}", test.id);
        assert_eq!(cells[0], raw["tests"]["ea8300"][&test.id].as_str().unwrap());
    }
}

#[test]
fn missing_fw_available_section_renders_blank_row() {
    let (_, mut raw) = fixture();
    raw.as_object_mut().unwrap().remove("fw_available");
    let doc = ResultsDocument::from_value(raw);
    let html = render_report(&doc, ReportCatalog::standard(), "run");

    assert_eq!(row_cells(&html, "New FW Available"), ["", "", "", ""]);
    assert_eq!(row_cells(&html, "FW Under Test").len(), 4);
    assert!(!row_cells(&html, "FW Under Test")[0].is_empty());
    assert!(html.contains("<td>5249</td>"));
}

#[test]
fn empty_document_still_renders_full_table() {
    let doc = ResultsDocument::parse("{}", "empty.json").unwrap();
    let catalog = ReportCatalog::standard();
    let html = render_report(&doc, catalog, "run");
    for test in &catalog.tests {
        assert_eq!(row_cells(&html, &test.description), ["", "", "", ""]);
    }
    assert!(html.ends_with("</html>\n"));
}

#[test]
fn structured_values_are_stringified_not_dropped() {
    let doc = ResultsDocument::from_value(json!({
        "tests": {"ecw5211": {"5540": ["passed", "retried"]}},
        "pass_percent": {"ea8300": 95, "ecw5211": {"passed": 27, "total": 28}}
    }));
    let html = render_report(&doc, ReportCatalog::standard(), "run");
    assert_eq!(
        row_cells(&html, "Get CloudSDK Version with API")[1],
        "passed, retried"
    );
    let rate = row_cells(&html, "Test Pass Rate");
    assert_eq!(rate[0], "95");
    assert_eq!(rate[1], "passed: 27, total: 28");
}

#[test]
fn custom_catalog_controls_layout() {
    let catalog: ReportCatalog = serde_yaml::from_str(
        r#"
title: Lab Report
heading: Lab Sanity
columns:
  - id: ec420
    label: EC420
summary:
  - label: Pass
    section: pass_percent
tests:
  - id: "2233"
    description: Upgrade
"#,
    )
    .unwrap();
    catalog.validate().unwrap();

    let doc = ResultsDocument::from_value(json!({
        "pass_percent": {"ec420": "50%", "ea8300": "95%"},
        "tests": {"ec420": {"2233": "passed", "5540": "failed"}}
    }));
    let html = render_report(&doc, &catalog, "lab");
    assert!(html.contains("<title>Lab Report</title>"));
    assert!(html.contains("Lab Sanity - lab</h1>"));
    assert_eq!(row_cells(&html, "Pass"), ["50%"]);
    assert_eq!(row_cells(&html, "Upgrade"), ["passed"]);
    assert!(!html.contains("failed"));
    assert!(!html.contains("95%"));
}
