//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Render list pages, single records, and the resource catalog as tables or JSON.
//!
//! Does NOT handle:
//! - Fetching data (see `commands`).
//!
//! Invariants:
//! - Tables use tab-separation for consistent alignment in standard terminals.
//! - Missing or null fields render as `N/A` in tables and `null` in JSON.
//! - Empty lists render as valid JSON and as a human message in tables.

use anyhow::Result;
use geohosting_client::{Page, Record, Resource};
use serde::Serialize;
use serde_json::Value;

/// Representation of missing/null values in tables.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// One loaded page of a list view.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    pub resource: Resource,
    pub page: u32,
    pub page_size: u32,
    pub data: &'a Page,
}

impl ListView<'_> {
    pub fn total_pages(&self) -> u32 {
        self.data.total_pages(self.page_size)
    }
}

/// JSON shape of a list page.
#[derive(Serialize)]
struct ListOutput<'a> {
    resource: &'a str,
    page: u32,
    page_size: u32,
    total_pages: u32,
    count: u64,
    results: &'a [Record],
}

#[derive(Serialize)]
struct ResourceOutput {
    name: &'static str,
    path: &'static str,
    columns: &'static [&'static str],
    default_filters: Vec<String>,
}

/// Formatter trait for different output types.
pub trait Formatter {
    /// Format one page of a collection.
    fn format_list(&self, view: &ListView<'_>) -> Result<String>;

    /// Format a single record.
    fn format_record(&self, resource: Resource, record: &Record) -> Result<String>;

    /// Format the resource catalog.
    fn format_resources(&self, resources: &[Resource]) -> Result<String>;
}

/// Print formatted output to stdout, ending with exactly one newline.
pub fn output_result(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_list(&self, view: &ListView<'_>) -> Result<String> {
        let output = ListOutput {
            resource: view.resource.as_str(),
            page: view.page,
            page_size: view.page_size,
            total_pages: view.total_pages(),
            count: view.data.count,
            results: &view.data.results,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }

    fn format_record(&self, _resource: Resource, record: &Record) -> Result<String> {
        Ok(serde_json::to_string_pretty(record)?)
    }

    fn format_resources(&self, resources: &[Resource]) -> Result<String> {
        let output: Vec<ResourceOutput> = resources
            .iter()
            .map(|r| ResourceOutput {
                name: r.as_str(),
                path: r.path(),
                columns: r.columns(),
                default_filters: r
                    .default_filters()
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect(),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_list(&self, view: &ListView<'_>) -> Result<String> {
        let records = &view.data.results;
        if records.is_empty() {
            if view.data.count > 0 {
                return Ok(format!(
                    "Showing 0 of {} (page {} out of range, {} pages)\n",
                    view.data.count,
                    view.page,
                    view.total_pages()
                ));
            }
            return Ok(format!("No {} found.\n", view.resource));
        }

        let columns = view.resource.columns();
        let mut output = String::new();
        output.push_str(&columns.join("\t"));
        output.push('\n');
        for record in records {
            let row: Vec<String> = columns.iter().map(|c| cell(record, c)).collect();
            output.push_str(&row.join("\t"));
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&pagination_footer(view));
        output.push('\n');
        Ok(output)
    }

    fn format_record(&self, resource: Resource, record: &Record) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("--- {} ---\n", resource));

        let Some(fields) = record.as_object() else {
            output.push_str(&format_json_value(record));
            output.push('\n');
            return Ok(output);
        };

        // Catalog columns first, then everything else in key order
        for column in resource.columns() {
            output.push_str(&format!("{}: {}\n", column, cell(record, column)));
        }
        for (key, value) in fields {
            if !resource.columns().contains(&key.as_str()) {
                output.push_str(&format!("{}: {}\n", key, display_value(value)));
            }
        }
        Ok(output)
    }

    fn format_resources(&self, resources: &[Resource]) -> Result<String> {
        let mut output = String::from("Name\tPath\tDefault filters\n");
        for resource in resources {
            let filters: Vec<String> = resource
                .default_filters()
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            let filters = if filters.is_empty() {
                DEFAULT_MISSING_VALUE.to_string()
            } else {
                filters.join(",")
            };
            output.push_str(&format!(
                "{}\t{}\t{}\n",
                resource,
                resource.path(),
                filters
            ));
        }
        Ok(output)
    }
}

fn pagination_footer(view: &ListView<'_>) -> String {
    let offset = u64::from(view.page.saturating_sub(1)) * u64::from(view.page_size);
    let shown = view.data.results.len() as u64;
    format!(
        "Showing {}-{} of {} (page {} of {})",
        offset + 1,
        offset + shown,
        view.data.count,
        view.page,
        view.total_pages()
    )
}

fn cell(record: &Record, column: &str) -> String {
    record
        .get(column)
        .map(display_value)
        .unwrap_or_else(|| DEFAULT_MISSING_VALUE.to_string())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => DEFAULT_MISSING_VALUE.to_string(),
        Value::String(s) if s.is_empty() => DEFAULT_MISSING_VALUE.to_string(),
        other => format_json_value(other),
    }
}

/// Strings without quotes; everything else as compact JSON.
fn format_json_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn orders_page() -> Page {
        Page {
            count: 12,
            next: Some("http://localhost/api/orders/?page=2".to_string()),
            previous: None,
            results: vec![
                json!({
                    "id": 1,
                    "erpnext_code": "SO-0001",
                    "app_name": "geonode-demo",
                    "order_status": "Deployed",
                    "company_name": null,
                    "date": "2024-05-01",
                }),
                json!({"id": 2, "erpnext_code": "SO-0002", "app_name": "geoserver"}),
            ],
        }
    }

    fn view(page: &Page, number: u32) -> ListView<'_> {
        ListView {
            resource: Resource::Orders,
            page: number,
            page_size: 10,
            data: page,
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("csv").is_err());
    }

    #[test]
    fn test_table_list_uses_resource_columns() {
        let page = orders_page();
        let output = TableFormatter.format_list(&view(&page, 1)).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "erpnext_code\tapp_name\torder_status\tcompany_name\tdate"
        );
        assert_eq!(lines[1], "SO-0001\tgeonode-demo\tDeployed\tN/A\t2024-05-01");
        assert_eq!(lines[2], "SO-0002\tgeoserver\tN/A\tN/A\tN/A");
        assert!(output.contains("Showing 1-2 of 12 (page 1 of 2)"));
    }

    #[test]
    fn test_table_footer_offsets_by_page() {
        let page = orders_page();
        let output = TableFormatter.format_list(&view(&page, 2)).unwrap();
        assert!(output.contains("Showing 11-12 of 12 (page 2 of 2)"));
    }

    #[test]
    fn test_table_empty_list() {
        let page = Page::default();
        let output = TableFormatter.format_list(&view(&page, 1)).unwrap();
        assert_eq!(output, "No orders found.\n");
    }

    #[test]
    fn test_table_page_out_of_range() {
        let page = Page {
            count: 12,
            ..Page::default()
        };
        let output = TableFormatter.format_list(&view(&page, 5)).unwrap();
        assert!(output.contains("page 5 out of range, 2 pages"));
    }

    #[test]
    fn test_json_list_shape() {
        let page = orders_page();
        let output = JsonFormatter.format_list(&view(&page, 1)).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["resource"], "orders");
        assert_eq!(parsed["count"], 12);
        assert_eq!(parsed["total_pages"], 2);
        assert_eq!(parsed["results"][0]["app_name"], "geonode-demo");
    }

    #[test]
    fn test_json_empty_list_is_valid() {
        let page = Page::default();
        let output = JsonFormatter.format_list(&view(&page, 1)).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["results"], json!([]));
    }

    #[test]
    fn test_table_record_lists_columns_then_extra_fields() {
        let record = json!({"id": 42, "name": "geonode-demo", "status": "Online", "package": {"name": "Small"}});
        let output = TableFormatter
            .format_record(Resource::Instances, &record)
            .unwrap();

        assert!(output.starts_with("--- instances ---\n"));
        assert!(output.contains("id: 42\n"));
        assert!(output.contains("url: N/A\n"));
        assert!(output.contains("package: {\"name\":\"Small\"}\n"));
    }

    #[test]
    fn test_resources_table() {
        let output = TableFormatter.format_resources(&Resource::ALL).unwrap();
        assert!(output.contains("orders\t/api/orders/\tis_main_invoice=True"));
        assert!(output.contains("tickets\t/api/tickets/\tN/A"));
    }
}
