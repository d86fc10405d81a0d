//! A binary to arrange a prevalence data file into rows of positions with
//! their domain overlay tracks.
//!
//! ```shell
//! cargo run --release --bin=prevalence-view --features=binaries -- \
//!     prevalence.json.gz --gene CA --subtype B --wild-type consensus.fas \
//!     --structural 85-93:CypA --structural 146-150:IDR --structural 153-172:MHR \
//!     --special lena_resist=56,66,67 --format table
//! ```
//!
//! The output is either the render-ready view serialized as JSON (the
//! default) or a plain-text table per row for eyeballing the layout.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use clap_verbosity_flag::Verbosity;
use prevalence::core::Interval;
use prevalence::overlay::Categories;
use prevalence::overlay::Category;
use prevalence::overlay::Segment;
use prevalence::pipeline::Builder;
use prevalence::pipeline::Row;
use prevalence::pipeline::View;
use prevalence::reader;
use prevalence::WildType;
use tabled::builder::Builder as TableBuilder;
use tabled::settings::object::Rows;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Output
////////////////////////////////////////////////////////////////////////////////////////

/// The output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// The view serialized as JSON.
    Json,
    /// A human-readable table per row.
    Table,
}

/// Renders an overlay track as a single line.
fn track(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return String::from("<none>");
    }

    segments
        .iter()
        .map(|segment| segment.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders one row as a table of its positions followed by its tracks.
fn row_table(row: &Row, sites_per_row: usize, indels: &[prevalence::core::Position]) -> String {
    let mut builder = TableBuilder::default();
    builder.push_record(["Position", "Total", "Residues", "Indel"]);

    for group in row.groups() {
        let position = match group.is_tick(sites_per_row) {
            true => group.position().to_string(),
            false => String::new(),
        };

        let residues = group
            .records()
            .iter()
            .map(|record| {
                let marker = if record.is_wild_type() { "*" } else { "" };
                format!(
                    "{}{}{}",
                    record.amino_acid(),
                    marker,
                    record.rounded_percent()
                )
            })
            .collect::<Vec<_>>()
            .join(" ");

        let indel = match indels.contains(&group.position()) {
            true => "•",
            false => "",
        };

        builder.push_record([
            position,
            group.total().to_string(),
            residues,
            indel.to_string(),
        ]);
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string();

    format!(
        "== {}-{} ==\nstructural: {}\nfunctional: {}\nspecial:    {}\n{}",
        row.start(),
        row.stop(),
        track(row.structural()),
        track(row.functional()),
        track(row.special()),
        table
    )
}

/// Writes the view in the requested format to standard output.
fn write_view(view: &View, format: Format) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, view).context("serializing the view")?;
            writeln!(out).context("writing to stdout")?;
        }
        Format::Table => {
            for row in view.rows() {
                writeln!(
                    out,
                    "{}\n",
                    row_table(row, view.sites_per_row(), view.indels())
                )
                .context("writing to stdout")?;
            }
        }
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Arranges amino acid prevalence data into annotated rows.
#[derive(Parser)]
struct Args {
    /// The prevalence data file (a JSON array of rows, optionally gzipped).
    records: PathBuf,

    /// The wild-type consensus sequence (plain text or FASTA).
    #[arg(short, long)]
    wild_type: Option<PathBuf>,

    /// The gene to display.
    #[arg(short, long)]
    gene: String,

    /// The subtype to display.
    #[arg(short, long)]
    subtype: String,

    /// The treatment stratum to display.
    #[arg(long, default_value = "all")]
    rx_type: String,

    /// The minimum percent for a residue to be displayed.
    #[arg(long, default_value_t = 0.1)]
    min_percent: f64,

    /// The number of sites in each row.
    #[arg(short = 'n', long, default_value_t = 50)]
    sites_per_row: usize,

    /// A structural domain (e.g., `85-93:CypA`). Can be repeated; order is
    /// kept.
    #[arg(long, value_name = "START-END:LABEL")]
    structural: Vec<Interval>,

    /// A functional domain (e.g., `146-150:IDR`). Can be repeated; order is
    /// kept.
    #[arg(long, value_name = "START-END:LABEL")]
    functional: Vec<Interval>,

    /// A category of special positions (e.g., `lena_resist=56,66,67`). Can
    /// be repeated.
    #[arg(long, value_name = "NAME=POS,...")]
    special: Vec<Category>,

    /// The output format.
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    #[command(flatten)]
    verbose: Verbosity,
}

fn run(args: Args) -> Result<()> {
    let pipeline = Builder::default()
        .gene(args.gene)
        .subtype(args.subtype)
        .rx_type(args.rx_type)
        .min_percent(args.min_percent)
        .sites_per_row(args.sites_per_row)
        .structural(args.structural)
        .functional(args.functional)
        .special(args.special.into_iter().collect::<Categories>())
        .try_build()
        .context("configuring the pipeline")?;

    info!("records: reading {}", args.records.display());
    let rows = reader::open(&args.records)
        .with_context(|| format!("opening {}", args.records.display()))
        .and_then(|file| reader::read_records(file).context("parsing prevalence records"))?;
    info!("records: read {} rows", rows.len());

    let wild_type = match &args.wild_type {
        Some(path) => {
            info!("wild type: reading {}", path.display());
            let file =
                reader::open(path).with_context(|| format!("opening {}", path.display()))?;
            reader::read_wild_type(file).context("reading the wild-type sequence")?
        }
        None => {
            warn!("wild type: none provided, so no residue will be flagged as wild type");
            WildType::default()
        }
    };

    let view = pipeline
        .run(rows, &wild_type)
        .context("transforming prevalence records")?;
    info!(
        "view: {} rows, {} indel positions",
        view.rows().len(),
        view.indels().len()
    );

    if view.rows().is_empty() {
        warn!("no records matched the selected gene, subtype, and treatment stratum");
    }

    write_view(&view, args.format)
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .init(),
    };

    run(args)
}
