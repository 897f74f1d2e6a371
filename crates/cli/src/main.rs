//! # sortable-cli
//!
//! Load a workbook, profile and sort its sheets, and print the result.

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use indexmap::IndexMap;
use sortable_core::{column_index, Direction, Registry, SortableTable, TableOptions};
use sortable_sheet::{load, SheetRecords, Source};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// sortable - Render spreadsheet tables sorted by column
#[derive(Parser, Debug)]
#[command(name = "sortable")]
#[command(author, version, about = "Type-aware sorting for spreadsheet tables", long_about = None)]
struct Cli {
    /// Workbook path or http(s) URL
    #[arg(value_name = "SOURCE")]
    source: String,

    /// Sheet to render, by name or zero-based index (default: first sheet)
    #[arg(long, conflicts_with = "all_sheets")]
    sheet: Option<String>,

    /// Render every sheet
    #[arg(long)]
    all_sheets: bool,

    /// Column type override (e.g. B=number)
    #[arg(long = "type", value_name = "COL=TAG")]
    types: Vec<String>,

    /// Pinned minimum value (e.g. C=N/A)
    #[arg(long = "min", value_name = "COL=VALUE")]
    min_values: Vec<String>,

    /// Pinned maximum value (e.g. C=-)
    #[arg(long = "max", value_name = "COL=VALUE")]
    max_values: Vec<String>,

    /// Columns that cannot be sorted (e.g. A,D)
    #[arg(long, value_name = "COLS")]
    no_sort: Vec<String>,

    /// JSON or YAML file of table attributes; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initial sort column
    #[arg(long, value_name = "COL")]
    sort_by: Option<String>,

    /// Initial sort direction
    #[arg(long, value_name = "DIR", requires = "sort_by")]
    sort_dir: Option<SortDir>,

    /// Header click to replay, in order (repeatable)
    #[arg(long = "click", value_name = "COL")]
    clicks: Vec<String>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for rendered tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Aligned plain text (default)
    #[default]
    Table,
    /// CSV output
    Csv,
    /// JSON array of row objects
    Json,
    /// HTML table fragment
    Html,
}

/// Initial sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum SortDir {
    /// Ascending (default)
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl From<SortDir> for Direction {
    fn from(dir: SortDir) -> Self {
        match dir {
            SortDir::Asc => Direction::Asc,
            SortDir::Desc => Direction::Desc,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let options = build_options(&cli)?;
    let sheets = load(Source::parse(&cli.source))
        .await
        .with_context(|| format!("Failed to load workbook: {}", cli.source))?;

    for sheet in select_sheets(sheets, cli.sheet.as_deref(), cli.all_sheets)? {
        let name = sheet.name.clone();
        let table = sheet
            .into_table()
            .with_context(|| format!("Invalid sheet: {name}"))?;
        let mut widget = SortableTable::new(table, options.clone(), Registry::default())
            .with_context(|| format!("Failed to prepare sheet: {name}"))?;

        for click in &cli.clicks {
            let state = widget.request_sort(column_index(click)?)?;
            tracing::info!(column = %click, direction = %state.direction, "replayed click");
        }

        if cli.all_sheets && cli.format == OutputFormat::Table {
            println!("{}", name.cyan().bold());
        }
        println!("{}", render(&widget, cli.format)?);
    }

    Ok(())
}

/// Merge the config file and command-line flags into table options.
fn build_options(cli: &Cli) -> Result<TableOptions> {
    let mut options = match &cli.config {
        Some(path) => read_config(path)?,
        None => TableOptions::default(),
    };

    for (key, pairs) in [
        ("type", &cli.types),
        ("minValue", &cli.min_values),
        ("maxValue", &cli.max_values),
    ] {
        for pair in pairs {
            let (column, value) = pair.split_once('=').with_context(|| {
                format!("Invalid --{key} value: '{pair}'. Expected COL=VALUE format")
            })?;
            options.apply_attribute(&format!("{key}{}", column.trim()), value)?;
        }
    }
    for columns in &cli.no_sort {
        options.apply_attribute("noSort", columns)?;
    }
    if let Some(column) = &cli.sort_by {
        let index = column_index(column)?;
        options.apply_attribute("sortBy", &index.to_string())?;
        options.sort_dir = Some(cli.sort_dir.unwrap_or_default().into());
    }

    Ok(options)
}

fn read_config(path: &Path) -> Result<TableOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let options = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => TableOptions::from_json_str(&content)?,
        Some("yaml" | "yml") => TableOptions::from_yaml_str(&content)?,
        _ => bail!("Unsupported config format: {}", path.display()),
    };
    Ok(options)
}

/// Pick the sheets to render.
fn select_sheets(
    sheets: Vec<SheetRecords>,
    selector: Option<&str>,
    all: bool,
) -> Result<Vec<SheetRecords>> {
    if all {
        return Ok(sheets);
    }
    let available: Vec<_> = sheets.iter().map(|s| s.name.clone()).collect();
    let position = match selector {
        None => 0,
        Some(selector) => match sheets.iter().position(|s| s.name == selector) {
            Some(position) => position,
            None => selector
                .parse::<usize>()
                .ok()
                .filter(|&i| i < sheets.len())
                .with_context(|| {
                    format!("Sheet not found: {selector} (available: {})", available.join(", "))
                })?,
        },
    };
    let sheet = sheets
        .into_iter()
        .nth(position)
        .context("Workbook has no sheets")?;
    Ok(vec![sheet])
}

/// Render the table in the requested format.
fn render(widget: &SortableTable, format: OutputFormat) -> Result<String> {
    let headers = widget.table().headers();
    let rows = widget.display_rows()?;

    let output = match format {
        OutputFormat::Table => render_text(widget, &rows),
        OutputFormat::Csv => {
            let mut lines = vec![headers.iter().map(|h| csv_value(h)).collect::<Vec<_>>().join(",")];
            lines.extend(
                rows.iter()
                    .map(|row| row.iter().map(|v| csv_value(v)).collect::<Vec<_>>().join(",")),
            );
            lines.join("\n")
        }
        OutputFormat::Json => {
            let objects: Vec<IndexMap<&str, &str>> = rows
                .iter()
                .map(|row| {
                    headers
                        .iter()
                        .map(String::as_str)
                        .zip(row.iter().map(String::as_str))
                        .collect()
                })
                .collect();
            serde_json::to_string_pretty(&objects)?
        }
        OutputFormat::Html => widget.to_html()?,
    };
    Ok(output)
}

/// Aligned plain text with the active sort column marked in the header.
fn render_text(widget: &SortableTable, rows: &[Vec<String>]) -> String {
    let state = widget.state();
    let headers: Vec<String> = widget
        .table()
        .headers()
        .iter()
        .enumerate()
        .map(|(index, header)| match state.column {
            Some(active) if active == index => match state.direction {
                Direction::Asc => format!("{header} ^"),
                Direction::Desc => format!("{header} v"),
            },
            _ => header.clone(),
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, &width)| format!("{value:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.as_slice()).bold().to_string()];
    out.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.extend(rows.iter().map(|row| line(row.as_slice())));
    out.join("\n")
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_value(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
