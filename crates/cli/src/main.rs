use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use filters::filters::TimeFilter;
use filters::{Errors, Failure, Filter, FilterKind, Params};
use inputs::{GroupedInput, Value};
use interaction::{params_from_json, run, Interaction, Schema};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// interact - typed input casting for declared attributes
#[derive(Parser)]
#[command(name = "interact")]
#[command(about = "Cast and validate raw params against filter declarations", long_about = None)]
struct Cli {
    /// Path to a JSON array of filter declarations
    #[arg(short, long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List declared attributes with their types and defaults
    Describe,

    /// Cast one params object and print the typed inputs
    Cast {
        /// JSON file holding one params object
        #[arg(long)]
        input: PathBuf,
    },

    /// Cast an array of params objects in parallel
    Batch {
        /// JSON file holding an array of params objects
        #[arg(long)]
        input: PathBuf,
    },

    /// Measure time casting on random strings and grouped inputs
    Benchmark {
        /// Number of values to cast
        #[arg(long, default_value = "10000")]
        requests: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Describe => handle_describe(&load_schema(cli.schema.as_deref())?),
        Commands::Cast { input } => handle_cast(&load_schema(cli.schema.as_deref())?, &input),
        Commands::Batch { input } => handle_batch(&load_schema(cli.schema.as_deref())?, &input),
        Commands::Benchmark { requests } => handle_benchmark(requests),
    }
}

/// Load and validate declarations; any bad default fails here
fn load_schema(path: Option<&Path>) -> Result<Schema> {
    let Some(path) = path else {
        bail!("--schema is required for this command");
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema {}", path.display()))?;
    let schema = Schema::from_json(&json)
        .with_context(|| format!("Invalid declarations in {}", path.display()))?;

    info!("Loaded {} declarations from {}", schema.filters().len(), path.display());
    Ok(schema)
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Malformed JSON in {}", path.display()))
}

/// Handle the 'describe' command
fn handle_describe(schema: &Schema) -> Result<()> {
    println!("{}", "Declared inputs:".bold().blue());

    for filter in schema.filters().iter() {
        let default = match filter.default()? {
            None => "required".yellow().to_string(),
            Some(value) => format!("default {}", value),
        };
        println!(
            "{}{} : {} ({}) {}{}",
            "• ".green(),
            filter.name().bold(),
            type_label(filter),
            filter.database_column_type(),
            default,
            filter.desc().map(|d| format!(" - {}", d)).unwrap_or_default(),
        );
    }
    Ok(())
}

/// Type name plus the options that change how it casts
fn type_label(filter: &Filter) -> String {
    match filter.kind() {
        FilterKind::Time(time) => match time.format() {
            Some(format) => format!("time [{}]", format),
            None => "time".to_string(),
        },
        FilterKind::Date(date) => match date.format() {
            Some(format) => format!("date [{}]", format),
            None => "date".to_string(),
        },
        FilterKind::String(string) if !string.strip() => "string [no strip]".to_string(),
        FilterKind::Hash(hash) => {
            let fields: Vec<String> = hash
                .fields()
                .iter()
                .map(|field| format!("{}: {}", field.name(), type_label(field)))
                .collect();
            let strip = if hash.strip() { "" } else { " [no strip]" };
            format!("hash {{{}}}{}", fields.join(", "), strip)
        }
        FilterKind::Array(array) => match array.element() {
            Some(element) => format!("array of {}", type_label(element)),
            None => "array".to_string(),
        },
        other => other.type_name().to_string(),
    }
}

/// Handle the 'cast' command
fn handle_cast(schema: &Schema, input: &Path) -> Result<()> {
    let params = params_from_json(&read_json(input)?)
        .with_context(|| format!("Invalid params in {}", input.display()))?;

    let outcome = run(schema, params);
    match outcome.inputs() {
        Some(inputs) if outcome.is_valid() => {
            println!("{} Inputs are valid", "✓".green());
            println!("{}", serde_json::to_string_pretty(&inputs.to_json())?);
            Ok(())
        }
        _ => {
            print_errors(outcome.errors());
            bail!("{} invalid input(s)", outcome.errors().len());
        }
    }
}

/// Handle the 'batch' command
fn handle_batch(schema: &Schema, input: &Path) -> Result<()> {
    let records = match read_json(input)? {
        serde_json::Value::Array(records) => records,
        _ => bail!("{} must hold a JSON array of params objects", input.display()),
    };
    let batch = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            params_from_json(record).with_context(|| format!("Invalid params in record {}", i))
        })
        .collect::<Result<Vec<Params>>>()?;

    let start = Instant::now();
    let results = schema.filters().process_batch(&batch);
    let elapsed = start.elapsed();

    let mut failed = 0;
    for (i, result) in results.iter().enumerate() {
        if let Err(errors) = result {
            failed += 1;
            println!("{} record {}: {}", "✗".red(), i, errors);
        }
    }

    println!("{}", "Batch results:".bold().blue());
    println!("Records: {}", results.len());
    println!("Valid: {}", (results.len() - failed).to_string().green());
    println!("Invalid: {}", failed.to_string().red());
    println!("Elapsed: {:?}", elapsed);
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let free_form = Filter::new("at", TimeFilter::new());
    let with_format = Filter::new("at", TimeFilter::new().with_format("%d/%m/%Y %H:%M:%S %z"));

    // Generate random inputs in three shapes
    let mut rng = rand::rng();
    let inputs: Vec<(&Filter, Value)> = (0..requests)
        .map(|i| {
            let (y, mo, d) = (
                rng.random_range(1970..2038),
                rng.random_range(1..=12),
                rng.random_range(1..=28),
            );
            let (h, mi, s) = (
                rng.random_range(0..24),
                rng.random_range(0..60),
                rng.random_range(0..60),
            );
            match i % 3 {
                0 => (
                    &free_form,
                    Value::from(format!("{:04}-{:02}-{:02} {:02}:{:02}:{:02} +0100", y, mo, d, h, mi, s)),
                ),
                1 => (
                    &with_format,
                    Value::from(format!("{:02}/{:02}/{:04} {:02}:{:02}:{:02} +0100", d, mo, y, h, mi, s)),
                ),
                _ => (
                    &free_form,
                    Value::Grouped(
                        [y, mo, d, h, mi, s]
                            .iter()
                            .enumerate()
                            .map(|(slot, part)| ((slot + 1).to_string(), part.to_string()))
                            .collect::<GroupedInput>(),
                    ),
                ),
            }
        })
        .collect();

    // Cast each one and collect timings
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    let mut failures = 0;
    for (filter, value) in &inputs {
        let start = Instant::now();
        if filter.cast(value).is_err() {
            failures += 1;
        }
        timings.push(start.elapsed());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64().max(f64::EPSILON);

    println!("{}", "Benchmark results:".bold().blue());
    println!("Casts: {} ({} failed)", requests, failures);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} casts/second", throughput);

    Ok(())
}

/// Helper function to print an error report
fn print_errors(errors: &Errors) {
    println!("{}", "Invalid inputs:".bold().red());
    for failure in errors.iter() {
        let kind = match failure {
            Failure::Filter(err) => err.kind(),
            Failure::Custom { .. } => "custom",
        };
        println!("{}{} [{}]", "✗ ".red(), failure.full_message(), kind.dimmed());
    }
}
