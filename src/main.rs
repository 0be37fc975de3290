use ailurus::config;
use ailurus::export;
use ailurus::graph::LineageGraph;
use ailurus::vitamin;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ailurus")]
#[command(about = "Build and export the red panda lineage graph dataset")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import records, validate the dataset, and export the JSON document
    Build(BuildArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Dataset root containing the zoos/, wild/, pandas/, and media/ trees
    #[arg(short, long, default_value = ".")]
    input: String,

    /// Path of the exported interchange document
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    output: String,

    /// Also rebuild the font-subsetting character inventory in index.html
    #[arg(long)]
    publish: bool,
}

fn run_build(args: BuildArgs) -> Result<()> {
    let root = Path::new(&args.input);

    let start_import = Instant::now();
    let graph = LineageGraph::build(root)?;
    let import_duration = start_import.elapsed();
    info!(
        duration_secs = import_duration.as_secs_f64(),
        "Import and validation complete"
    );

    export::export_json_graph(&graph, Path::new(&args.output))?;

    if args.publish {
        vitamin::run_publish(root)?;
    }

    println!();
    println!("=== Summary ===");
    println!("Build time:         {:.2}s", import_duration.as_secs_f64());
    println!();
    println!("Pandas imported:    {}", graph.panda_count());
    println!("Zoos imported:      {}", graph.zoo_count());
    println!("Wild ranges:        {}", graph.wild_count());
    println!("Media items:        {}", graph.media_count());
    println!("Edges recorded:     {}", graph.edges().len());
    println!("Last born:          {}", graph.summary().last_born);
    println!("Last died:          {}", graph.summary().last_died);

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::Build(args) => run_build(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
