use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use purl_tools::infer::{CsvSchemaInferrer, DEFAULT_SAMPLE_ROWS};
use purl_tools::select::TerminalPresenter;
use purl_tools::workflow;
use purl_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose)?;
    match cli.command {
        Command::Associate(args) => execute_associate(args),
        Command::Package(args) => execute_package(args),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| ToolError::Logging(err.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn execute_associate(args: AssociateArgs) -> Result<()> {
    require_input(&args.file)?;
    require_input(&args.ontology)?;
    if let Some(prior) = &args.assoc_file {
        require_input(prior)?;
    }

    let output = args
        .outfile
        .clone()
        .unwrap_or_else(|| workflow::default_association_output(&args.file));
    refuse_overwrite(&output, args.force)?;

    let store = workflow::associate(
        &args.file,
        &args.ontology,
        args.assoc_file.as_deref(),
        &output,
        TerminalPresenter::stdio(),
    )?;

    println!(
        "Done, wrote \"{}\" ({} of {} columns associated)",
        output.display(),
        store.associated_count(),
        store.len()
    );
    Ok(())
}

fn execute_package(args: PackageArgs) -> Result<()> {
    for path in &args.data {
        require_input(path)?;
    }
    require_input(&args.ontology)?;
    refuse_overwrite(&args.outfile, args.force)?;

    for (index, path) in args.data.iter().enumerate() {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{:3}: {name}", index + 1);
    }

    let inferrer = CsvSchemaInferrer {
        sample_rows: args.sample_rows,
        missing_values: args.missing.clone(),
    };
    workflow::build_package(
        &args.data,
        &args.ontology,
        &args.missing,
        &inferrer,
        &args.outfile,
    )?;

    println!("Done, see \"{}\"", args.outfile.display());
    Ok(())
}

fn require_input(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ToolError::MissingInput(path.to_path_buf()))
    }
}

fn refuse_overwrite(path: &Path, force: bool) -> Result<()> {
    if path.is_file() && !force {
        Err(ToolError::OutputExists(path.to_path_buf()))
    } else {
        Ok(())
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Associate table columns with ontology terms and enrich data packages."
)]
struct Cli {
    /// Log progress at info level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactively associate the columns of a data table with ontology terms.
    Associate(AssociateArgs),
    /// Build a data package whose schemas carry ontology attributes.
    Package(PackageArgs),
}

#[derive(clap::Args)]
struct AssociateArgs {
    /// Data table whose header defines the columns.
    #[arg(short = 'f', long)]
    file: PathBuf,

    /// Tab-delimited ontology term lookup table.
    #[arg(short = 'o', long)]
    ontology: PathBuf,

    /// Association output file [default: <stem>_ontology.tsv].
    #[arg(short = 'O', long)]
    outfile: Option<PathBuf>,

    /// Association file from a previous run.
    #[arg(short = 'a', long)]
    assoc_file: Option<PathBuf>,

    /// Overwrite an existing output file.
    #[arg(long)]
    force: bool,
}

#[derive(clap::Args)]
struct PackageArgs {
    /// Data tables to describe.
    #[arg(short = 'd', long, num_args = 1.., required = true)]
    data: Vec<PathBuf>,

    /// Tab-delimited parameter catalog.
    #[arg(short = 'o', long)]
    ontology: PathBuf,

    /// Data package output file.
    #[arg(short = 'O', long, default_value = "datapackage.json")]
    outfile: PathBuf,

    /// Extra tokens to treat as missing values.
    #[arg(short = 'm', long, num_args = 0..)]
    missing: Vec<String>,

    /// Rows sampled per table when inferring field types.
    #[arg(long, default_value_t = DEFAULT_SAMPLE_ROWS)]
    sample_rows: usize,

    /// Overwrite an existing output file.
    #[arg(short = 'f', long)]
    force: bool,
}
