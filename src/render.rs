//! Report rendering.
//!
//! A render is a single pass over the catalog. Each cell is a safe lookup
//! into the results document, so a missing section, model or test id leaves
//! that cell blank and every other row still renders.

use log::{debug, trace};

use crate::catalog::{ReportCatalog, TESTS_SECTION};
use crate::document::ResultsDocument;

pub trait Renderer {
    fn render(&self, doc: &ResultsDocument, catalog: &ReportCatalog, label: &str) -> String;
}

/// Renders the report as a standalone HTML page.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

const STYLE: &str = "\
<style>
    table.results {
        background-color: lightgray;
        font-size: 16px;
        width: 1400px;
    }
    table.results td {
        text-align: center;
    }
    table.results td.description {
        text-align: left;
    }
    tr.summary {
        font-weight: bold;
    }
</style>
";

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &ResultsDocument, catalog: &ReportCatalog, label: &str) -> String {
        let mut out = String::new();
        let mut blank = 0usize;

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape(&catalog.title)));
        out.push_str(STYLE);
        out.push_str("</head>\n<body bgcolor=\"grey\">\n");
        out.push_str("<header>\n");
        out.push_str("<h1 style=\"color:green; font-size:40px; text-align: center\">");
        out.push_str(&format!(
            "{} - {}</h1>\n",
            escape(&catalog.heading),
            escape(label)
        ));
        out.push_str("</header>\n");

        out.push_str(
            "<table class=\"results\" border=\"1\" cellpadding=\"4\" cellspacing=\"3\">\n",
        );
        out.push_str(&format!(
            "<tr><th colspan=\"{}\"><h3>Test Results</h3></th></tr>\n",
            catalog.table_width()
        ));
        out.push_str("<tr><th>Test Case</th><th>Description</th>");
        for column in &catalog.columns {
            out.push_str(&format!("<th width=\"150px\">{}</th>", escape(&column.label)));
        }
        out.push_str("</tr>\n");

        for row in &catalog.summary {
            out.push_str(&format!(
                "<tr class=\"summary\"><td></td><td class=\"description\">{}</td>",
                escape(&row.label)
            ));
            for column in &catalog.columns {
                let path = row.path(&column.id);
                let value = doc.cell(&path);
                if value.is_empty() {
                    trace!("no value at {}", path.join("."));
                    blank += 1;
                }
                match &row.cell_style {
                    Some(style) => out.push_str(&format!(
                        "<td style=\"{}\">{}</td>",
                        escape(style),
                        escape(&value)
                    )),
                    None => out.push_str(&format!("<td>{}</td>", escape(&value))),
                }
            }
            out.push_str("</tr>\n");
        }

        for test in &catalog.tests {
            out.push_str(&format!(
                "<tr><td>{}</td><td class=\"description\">{}</td>",
                escape(&test.id),
                escape(&test.description)
            ));
            for column in &catalog.columns {
                let value = doc.cell(&[TESTS_SECTION, column.id.as_str(), test.id.as_str()]);
                if value.is_empty() {
                    trace!("no result for test {} on {}", test.id, column.id);
                    blank += 1;
                }
                out.push_str(&format!("<td>{}</td>", escape(&value)));
            }
            out.push_str("</tr>\n");
        }

        out.push_str("</table>\n</body>\n</html>\n");

        let total = (catalog.summary.len() + catalog.tests.len()) * catalog.columns.len();
        debug!("rendered report `{}`: {} of {} cells blank", label, blank, total);
        out
    }
}

/// Renders with the HTML renderer.
pub fn render_report(doc: &ResultsDocument, catalog: &ReportCatalog, label: &str) -> String {
    HtmlRenderer::new().render(doc, catalog, label)
}

/// Escapes text for embedding in HTML element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
