use anyhow::Result;
use clap::{Parser, ValueEnum};

use git_fixversion::cli::orchestration::{run_with_default_config, ResolveWorkflowArgs};
use git_fixversion::ui;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Parser)]
#[command(
    name = "git-fixversion",
    version,
    about = "Map every commit of a branch history to the release it first shipped in"
)]
struct Args {
    #[arg(help = "JSON file describing the segment tree")]
    tree: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Keep merge commits in the result")]
    include_merges: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
    format: OutputFormat,

    #[arg(short, long, help = "Log resolver progress to stderr")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ui::init_logging(args.verbose);

    let workflow_args = ResolveWorkflowArgs {
        tree_path: args.tree.clone(),
        config_path: args.config.clone(),
        include_merges: args.include_merges,
    };

    let result = match run_with_default_config(&workflow_args) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    match args.format {
        OutputFormat::Json => {
            println!("{}", ui::format_resolution_json(&result.resolution)?);
        }
        OutputFormat::Text => {
            ui::display_resolution(&result.resolution, &args.tree);
            ui::display_success(&format!(
                "Resolved {} commits",
                result.resolution.len()
            ));
        }
    }

    Ok(())
}
