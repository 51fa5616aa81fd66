pub mod schema;

use crate::constants::TOURNAMENT_MARKER;
use crate::error::{Result, ScraperError};
use once_cell::sync::Lazy;
use regex::Regex;
use schema::{TableSchema, ValueKind};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

pub use schema::TableKind;

static SCHOOL_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/schools/([^/]+)/").expect("school link pattern"));
static CONFERENCE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/conferences/([^/]+)/").expect("conference link pattern"));

/// Classes the site puts on header rows it repeats inside `tbody`.
const HEADER_ROW_CLASSES: [&str; 2] = ["thead", "over_header"];

/// One parsed cell. `Missing` is kept distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Count(u32),
    Float(f64),
    Missing,
}

impl FieldValue {
    pub fn as_count(&self) -> Option<u32> {
        match self {
            FieldValue::Count(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(value) => Some(*value),
            FieldValue::Count(value) => Some(f64::from(*value)),
            FieldValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

pub type FieldMap = HashMap<&'static str, FieldValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub abbreviation: String,
    pub name: String,
    pub fields: FieldMap,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Returns the outer markup of the first element matching `css`.
pub fn extract_table(document: &str, css: &str) -> Result<String> {
    let html = Html::parse_document(document);
    let table_selector = selector(css)?;
    html.select(&table_selector)
        .next()
        .map(|table| table.html())
        .ok_or_else(|| ScraperError::NotFound {
            selector: css.to_string(),
        })
}

/// Markup of the data rows of a table: body rows only, without repeated
/// header rows or rows that carry no data cells.
pub fn table_rows(table_markup: &str) -> Result<Vec<String>> {
    let fragment = Html::parse_fragment(table_markup);
    let row_selector = selector("tbody > tr")?;
    Ok(data_rows(&fragment, &row_selector)
        .map(|row| row.html())
        .collect())
}

fn data_rows<'a>(
    fragment: &'a Html,
    row_selector: &'a Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    fragment
        .select(row_selector)
        .filter(|row| is_data_row(row))
}

fn is_data_row(row: &ElementRef) -> bool {
    let classed_header = row
        .value()
        .classes()
        .any(|class| HEADER_ROW_CLASSES.contains(&class));
    !classed_header && cells(*row).iter().any(|cell| cell.value().name() == "td")
}

fn cells(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect()
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .collect::<String>()
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

/// Parses a single `<tr>` against a table layout.
pub fn parse_row(row_markup: &str, schema: &TableSchema) -> Result<ParsedRow> {
    // Rows only survive the HTML tree builder inside a table context
    let wrapped = format!("<table><tbody>{}</tbody></table>", row_markup);
    let fragment = Html::parse_fragment(&wrapped);
    let row_selector = selector("tr")?;
    let row = fragment
        .select(&row_selector)
        .next()
        .ok_or_else(|| ScraperError::NotFound {
            selector: "tr".to_string(),
        })?;
    parse_row_element(row, schema)
}

fn parse_row_element(row: ElementRef, schema: &TableSchema) -> Result<ParsedRow> {
    let cells = cells(row);
    let key_cell = cells
        .get(schema.key_position)
        .ok_or_else(|| ScraperError::Parse {
            field: format!("{} school cell", schema.name),
            raw: row.html(),
        })?;
    let (name, abbreviation) = parse_school_cell(key_cell)?;

    let mut fields = FieldMap::with_capacity(schema.columns.len());
    for column in schema.columns {
        let raw = cells.get(column.position).map(cell_text).unwrap_or_default();
        fields.insert(column.field, parse_value(column.field, column.kind, &raw)?);
    }

    Ok(ParsedRow {
        abbreviation,
        name,
        fields,
    })
}

fn parse_school_cell(cell: &ElementRef) -> Result<(String, String)> {
    let link_selector = selector("a")?;
    let link = cell.select(&link_selector).next();

    let mut name = match &link {
        Some(anchor) => cell_text(anchor),
        None => cell_text(cell),
    };
    if let Some(stripped) = name.strip_suffix(TOURNAMENT_MARKER) {
        name = stripped.trim_end().to_string();
    }
    if name.is_empty() {
        return Err(ScraperError::Parse {
            field: "name".to_string(),
            raw: cell.html(),
        });
    }

    let abbreviation = link
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(school_slug)
        .map(|slug| normalize_abbreviation(&slug))
        .unwrap_or_else(|| normalize_abbreviation(&name));

    Ok((name, abbreviation))
}

fn parse_value(field: &str, kind: ValueKind, raw: &str) -> Result<FieldValue> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(FieldValue::Missing);
    }

    let parsed = match kind {
        ValueKind::Count => cleaned.parse::<u32>().ok().map(FieldValue::Count),
        ValueKind::Float => cleaned
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(FieldValue::Float),
    };
    parsed.ok_or_else(|| ScraperError::Parse {
        field: field.to_string(),
        raw: raw.to_string(),
    })
}

/// Parses every data row of a table.
pub fn parse_table(table_markup: &str, schema: &TableSchema) -> Result<Vec<ParsedRow>> {
    let fragment = Html::parse_fragment(table_markup);
    let row_selector = selector("tbody > tr")?;

    let rows = data_rows(&fragment, &row_selector)
        .map(|row| parse_row_element(row, schema))
        .collect::<Result<Vec<_>>>()?;
    debug!("Parsed {} rows from {}", rows.len(), schema.name);
    Ok(rows)
}

/// Extracts the table for `schema` from a full page and parses its rows.
pub fn parse_document(document: &str, schema: &TableSchema) -> Result<Vec<ParsedRow>> {
    let table = extract_table(document, schema.selector)?;
    parse_table(&table, schema)
}

/// Uppercase, hyphen-separated form used for team identifiers.
pub fn normalize_abbreviation(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_hyphen = false;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch.to_ascii_uppercase());
        } else if ch == '&' || ch == '\'' || ch == '.' {
            // Dropped without a separator: "Texas A&M" -> TEXAS-AM
        } else {
            pending_hyphen = true;
        }
    }
    out
}

pub fn school_slug(href: &str) -> Option<String> {
    SCHOOL_LINK
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|slug| slug.as_str().to_lowercase())
}

pub fn conference_slug(href: &str) -> Option<String> {
    CONFERENCE_LINK
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|slug| slug.as_str().to_lowercase())
}

/// Every `href` inside the first element matching `css`, in document order.
pub fn links_in(document: &str, css: &str) -> Result<Vec<String>> {
    let table = extract_table(document, css)?;
    let fragment = Html::parse_fragment(&table);
    let link_selector = selector("tbody a[href]")?;
    Ok(fragment
        .select(&link_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect())
}
