//! Per-symbol HTML reports.

use crate::error::{Result, ScanError};
use crate::html::{self, Element, Node};
use crate::types::TimeframeResult;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const STYLESHEET: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
.timeframe { margin-bottom: 20px; padding: 15px; border: 1px solid #ddd; border-radius: 5px; }
.signal-True { color: green; font-weight: bold; }
.signal-False { color: gray; }
h2 { color: #333; }";

fn flag(name: &str, value: bool) -> Element {
    let label = if value { "True" } else { "False" };
    Element::new("p")
        .text(format!("{}: ", name))
        .child(Element::new("span").class(format!("signal-{}", label)).text(label))
}

fn timeframe_block(result: &TimeframeResult) -> Element {
    Element::new("div")
        .class("timeframe")
        .child(Element::new("h2").text(result.timeframe.as_str()))
        .child(Element::new("p").text(format!("Last Price: ${:.2}", result.last_price)))
        .child(flag("Expansion", result.expansion))
        .child(flag("TC20", result.tc20))
}

/// Document tree for one symbol's results, blocks in input order.
pub fn build_report(symbol: &str, results: &[TimeframeResult], generated_at: DateTime<Local>) -> Element {
    let title = format!("{} Market Analysis", symbol);

    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "UTF-8"))
        .child(Element::new("title").text(title.clone()))
        .child(Element::new("meta").attr("name", "viewport").attr("content", "width=device-width, initial-scale=1.0"))
        .child(Element::new("style").child(Node::Raw(STYLESHEET.to_string())));

    let body = Element::new("body")
        .child(Element::new("h1").text(title))
        .child(Element::new("p").text(format!("Last updated: {}", generated_at.format(TIMESTAMP_FORMAT))))
        .children(results.iter().map(timeframe_block));

    Element::new("html").attr("lang", "en").child(head).child(body)
}

pub fn render_report(symbol: &str, results: &[TimeframeResult], generated_at: DateTime<Local>) -> String {
    html::to_document(&build_report(symbol, results, generated_at))
}

pub fn report_file_name(symbol: &str) -> String {
    format!("{}.html", symbol.replace('/', "_"))
}

/// Writes `document` under `output_dir`, creating the directory if needed and
/// overwriting any previous report for the symbol.
pub fn write_report(output_dir: &Path, symbol: &str, document: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| ScanError::io(output_dir, e))?;

    let path = output_dir.join(report_file_name(symbol));
    fs::write(&path, document).map_err(|e| ScanError::io(&path, e))?;

    info!("{}: report written to {}", symbol, path.display());
    Ok(path)
}
