use clap::Parser;
use config_gen::{DurationStrings, Result, emit};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "config-gen")]
#[command(about = "Generate typed Go accessors for an etcd-backed config from a YAML schema", long_about = None)]
struct Cli {
    /// Path to the config schema YAML file
    #[arg(long, env = "CONFIG_GEN_SCHEMA", default_value = "config_schema.yaml")]
    schema: PathBuf,

    /// Directory that receives config.go and fake.go
    #[arg(long, env = "CONFIG_GEN_OUT_DIR", default_value = "internal/config")]
    out_dir: PathBuf,

    /// Parse duration-looking string defaults with time.ParseDuration at startup
    /// (fields declared `string` are left alone)
    #[arg(long)]
    parse_duration_strings: bool,

    /// Skip the gofmt pass
    #[arg(long)]
    no_gofmt: bool,

    /// Print the field descriptors as JSON instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let duration_strings = if cli.parse_duration_strings {
        DurationStrings::ParseAtStartup
    } else {
        DurationStrings::Quote
    };

    // 1) Schema -> descriptors.
    let plan = config_gen::plan_from_file(&cli.schema, duration_strings)?;

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    // 2) Render + format everything before touching the disk.
    let files = emit::render_files(&plan, !cli.no_gofmt)?;

    // 3) Write.
    emit::write_files(&cli.out_dir, &files)?;
    println!("Generated config code in {}", cli.out_dir.display());

    Ok(())
}

fn setup_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
