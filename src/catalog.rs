//! The report catalog: which device columns, summary rows and test rows appear
//! in a report, and in what order.
//!
//! The catalog is independent of any results document. The built-in layout is
//! [`ReportCatalog::standard`]; a replacement can be loaded from YAML or JSON.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::ReportError;

/// A device model column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Key used under every section of the results document.
    pub id: String,
    /// Header text.
    pub label: String,
}

/// A per-model summary metric shown above the test rows.
///
/// The value for a column is read from `section.<model>`, or from
/// `section.<model>.<field>` when `field` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Inline CSS applied to each value cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_style: Option<String>,
}

impl SummaryRow {
    /// Key path of this metric for one model.
    pub fn path<'a>(&'a self, model: &'a str) -> Vec<&'a str> {
        let mut path = vec![self.section.as_str(), model];
        if let Some(field) = &self.field {
            path.push(field.as_str());
        }
        path
    }
}

/// A test case row. `id` is the key under `tests.<model>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRow {
    pub id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCatalog {
    /// Page `<title>`.
    pub title: String,
    /// Page heading; the run label is appended to it.
    pub heading: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub summary: Vec<SummaryRow>,
    #[serde(default)]
    pub tests: Vec<TestRow>,
}

/// Section holding per-model test results.
pub const TESTS_SECTION: &str = "tests";

static STANDARD: Lazy<ReportCatalog> = Lazy::new(build_standard);

const STANDARD_COLUMNS: &[(&str, &str)] = &[
    ("ea8300", "EA8300 Result"),
    ("ecw5211", "ECW5211 Result"),
    ("ecw5410", "ECW5410 Result"),
    ("ec420", "EC420 Result"),
];

// (label, section, field, cell style)
const STANDARD_SUMMARY: &[(&str, &str, Option<&str>, &str)] = &[
    ("New FW Available", "fw_available", None, "font-weight:bold"),
    ("FW Under Test", "fw_under_test", None, "font-size:12px"),
    ("CloudSDK Commit Date", "cloud_sdk", Some("date"), "font-size:12px"),
    ("CloudSDK Commit ID", "cloud_sdk", Some("commitId"), "font-size:10px"),
    ("CloudSDK Project Version", "cloud_sdk", Some("projectVersion"), "font-size:12px"),
    ("Test Pass Rate", "pass_percent", None, "font-size:14px"),
];

const STANDARD_TESTS: &[(&str, &str)] = &[
    ("5540", "Get CloudSDK Version with API"),
    ("2233", "AP Upgrade Successful"),
    ("5247", "CloudSDK Reports Correct FW"),
    ("5222", "AP-CloudSDK Connection Active"),
    ("5541", "CloudSDK Pushes Correct AP Profile - Bridge Mode"),
    ("5544", "AP Applies Correct AP Profile - Bridge Mode"),
    ("5214", "Client connectivity to 2.4 GHz WPA2-EAP - Bridge Mode"),
    ("2237", "Client connectivity to 2.4 GHz WPA2 - Bridge Mode"),
    ("2420", "Client connectivity to 2.4 GHz WPA - Bridge Mode"),
    ("5215", "Client connectivity to 5 GHz WPA2-EAP - Bridge Mode"),
    ("2236", "Client connectivity to 5 GHz WPA2 - Bridge Mode"),
    ("2419", "Client connectivity to 5 GHz WPA - Bridge Mode"),
    ("5542", "CloudSDK Pushes Correct AP Profile - NAT Mode"),
    ("5545", "AP Applies Correct AP Profile - NAT Mode"),
    ("5216", "Client connectivity to 2.4 GHz WPA2-EAP - NAT Mode"),
    ("4325", "Client connectivity to 2.4 GHz WPA2 - NAT Mode"),
    ("4323", "Client connectivity to 2.4 GHz WPA - NAT Mode"),
    ("5217", "Client connectivity to 5 GHz WPA2-EAP - NAT Mode"),
    ("4326", "Client connectivity to 5 GHz WPA2 - NAT Mode"),
    ("4324", "Client connectivity to 5 GHz WPA - NAT Mode"),
    ("5543", "CloudSDK Pushes Correct AP Profile - Custom VLAN"),
    ("5546", "AP Applies Correct AP Profile - Custom VLAN"),
    ("5253", "Client connectivity to 2.4 GHz WPA2-EAP - Custom VLAN"),
    ("5251", "Client connectivity to 2.4 GHz WPA2 - Custom VLAN"),
    ("5252", "Client connectivity to 2.4 GHz WPA - Custom VLAN"),
    ("5250", "Client connectivity to 5 GHz WPA2-EAP - Custom VLAN"),
    ("5248", "Client connectivity to 5 GHz WPA2 - Custom VLAN"),
    ("5249", "Client connectivity to 5 GHz WPA - Custom VLAN"),
];

fn build_standard() -> ReportCatalog {
    ReportCatalog {
        title: "Testing Report".to_string(),
        heading: "CICD Nightly Sanity Report".to_string(),
        columns: STANDARD_COLUMNS
            .iter()
            .map(|(id, label)| Column {
                id: id.to_string(),
                label: label.to_string(),
            })
            .collect(),
        summary: STANDARD_SUMMARY
            .iter()
            .map(|(label, section, field, style)| SummaryRow {
                label: label.to_string(),
                section: section.to_string(),
                field: field.map(str::to_string),
                cell_style: Some(style.to_string()),
            })
            .collect(),
        tests: STANDARD_TESTS
            .iter()
            .map(|(id, description)| TestRow {
                id: id.to_string(),
                description: description.to_string(),
            })
            .collect(),
    }
}

impl ReportCatalog {
    /// The built-in nightly sanity layout.
    pub fn standard() -> &'static ReportCatalog {
        &STANDARD
    }

    /// Loads a catalog from a `.yaml`/`.yml` or `.json` file and validates it.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let text = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let format_err = |message: String| ReportError::CatalogFormat {
            path: path.to_path_buf(),
            message,
        };
        let catalog: ReportCatalog = match ext.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|e| format_err(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&text).map_err(|e| format_err(e.to_string()))?,
            _ => return Err(format_err("unrecognised file extension".to_string())),
        };
        catalog.validate()?;
        debug!(
            "loaded catalog {} ({} columns, {} summary rows, {} tests)",
            path.display(),
            catalog.columns.len(),
            catalog.summary.len(),
            catalog.tests.len()
        );
        Ok(catalog)
    }

    /// Checks that the layout has at least one column and no duplicate ids.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.columns.is_empty() {
            return Err(ReportError::catalog("at least one column is required"));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.id.as_str()) {
                return Err(ReportError::catalog(format!(
                    "duplicate column id `{}`",
                    column.id
                )));
            }
        }
        let mut seen = HashSet::new();
        for test in &self.tests {
            if !seen.insert(test.id.as_str()) {
                return Err(ReportError::catalog(format!(
                    "duplicate test id `{}`",
                    test.id
                )));
            }
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, ReportError> {
        serde_yaml::to_string(self)
            .map_err(|e| ReportError::catalog(format!("could not serialize catalog: {}", e)))
    }

    /// Number of table columns: test id, description, then one per model.
    pub fn table_width(&self) -> usize {
        self.columns.len() + 2
    }
}
