// File: crates/demo/src/main.rs
// Summary: Demo loads form data JSON and a CSV query result, runs the confidence bands plugin and prints chart options.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bands_core::plugin::ChartPlugin;
use bands_core::{ChartProps, FormData, LabelMap, PluginRegistry, QueryResult, Row, Value};
use chrono::{DateTime, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bands-demo", about = "Run the confidence bands chart plugin over a CSV query result")]
struct Cli {
    /// Log at debug level regardless of RUST_LOG.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Plugin key to resolve from the registry.
    #[arg(long, global = true, default_value = "confidence_bands")]
    plugin: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build chart options from form data and query rows.
    Render {
        #[arg(long)]
        form_data: PathBuf,
        /// CSV with a header row; one record per x-axis position.
        #[arg(long)]
        rows: PathBuf,
        /// JSON object mapping column keys to display labels.
        #[arg(long)]
        label_map: Option<PathBuf>,
        /// Write options here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 600)]
        height: u32,
    },
    /// Print the backend query the plugin would issue.
    Query {
        #[arg(long)]
        form_data: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = PluginRegistry::with_defaults();
    let plugin = registry.get(&cli.plugin)?;
    info!(plugin = plugin.key(), "using chart plugin");

    match cli.command {
        Command::Render { form_data, rows, label_map, out, width, height } => {
            let form_data = load_form_data(&form_data)?;
            let data = load_rows_csv(&rows)
                .with_context(|| format!("failed to load CSV '{}'", rows.display()))?;
            info!(rows = data.len(), "loaded query rows");
            if data.is_empty() {
                warn!("no rows loaded; every layer will be empty");
            }
            let label_map = match label_map {
                Some(p) => load_label_map(&p)?,
                None => LabelMap::new(),
            };

            let props = ChartProps {
                width,
                height,
                form_data,
                queries_data: vec![QueryResult { data, label_map }],
            };
            let transformed = plugin.transform_props(&props);
            let text = serde_json::to_string_pretty(&transformed.echart_options)?;
            write_output(out.as_deref(), &text)?;
        }
        Command::Query { form_data } => {
            let form_data = load_form_data(&form_data)?;
            let ctx = plugin.build_query(&form_data);
            println!("{}", serde_json::to_string_pretty(&ctx)?);
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_form_data(path: &Path) -> Result<FormData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("opening {}", path.display()))?;
    FormData::from_json(&text).with_context(|| format!("parsing form data {}", path.display()))
}

fn load_label_map(path: &Path) -> Result<LabelMap> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing label map {}", path.display()))
}

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote chart options");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Load a CSV with headers into rows keyed by header name.
fn load_rows_csv(path: &Path) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    debug!(?headers, "csv headers");

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let mut row = Row::new();
        for (h, cell) in headers.iter().zip(rec.iter()) {
            row.insert(h.clone(), parse_cell(cell));
        }
        out.push(row);
    }
    Ok(out)
}

/// Empty -> null, finite number -> number, ISO date/datetime -> epoch ms, else text.
fn parse_cell(s: &str) -> Value {
    let s = s.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = s.parse::<f64>() {
        if n.is_finite() {
            return Value::Number(n);
        }
    }
    if let Some(ms) = parse_time_to_ms(s) {
        return Value::Number(ms as f64);
    }
    Value::Text(s.to_string())
}

fn parse_time_to_ms(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}
