use clap::{
    Parser,
    Subcommand,
};
use std::{
    io::stdout,
    path::PathBuf,
};
use wfbin::{
    load::{
        load_workflow,
        registry_from_path,
    },
    output::{
        save_definition,
        write_definition,
    },
};
use wfcore::registry::ActionGroupMap;
use wfgen::{
    overview::permission_overview,
    WorkflowGenerator,
};

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, value_name = "WFGEN_REGISTRY", env = "WFGEN_REGISTRY")]
    registry: Option<PathBuf>,
    #[clap(long, value_name = "WFGEN_WORKFLOW_ID", env = "WFGEN_WORKFLOW_ID")]
    workflow_id: Option<String>,
    #[clap(long)]
    no_manager_bypass: bool,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(arg_required_else_help = true)]
    Generate {
        spec: PathBuf,
        #[clap(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
    #[command(arg_required_else_help = true)]
    Translations {
        spec: PathBuf,
    },
    #[command(arg_required_else_help = true)]
    States {
        spec: PathBuf,
    },
    #[command(arg_required_else_help = true)]
    Permissions {
        spec: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("wfbin")
        .module("wfcore")
        .module("wfgen")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let registry = match &args.registry {
        Some(path) => registry_from_path(path)?,
        None => {
            log::warn!("no registry given; no permission will be managed");
            ActionGroupMap::new()
        }
    };
    let generator = WorkflowGenerator::new(&registry)
        .manager_bypass(!args.no_manager_bypass);

    match args.command {
        Commands::Generate { spec, output } => {
            let (workflow_id, spec) = load_workflow(&spec, args.workflow_id)?;
            let doc = generator.generate(&workflow_id, &spec)?;
            match output {
                Some(path) => save_definition(&doc, &path)?,
                None => {
                    write_definition(&doc, stdout().lock())?;
                }
            }
        },
        Commands::Translations { spec } => {
            let (workflow_id, spec) = load_workflow(&spec, args.workflow_id)?;
            let translations = generator.translations(&workflow_id, &spec)?;
            println!("{}", serde_json::to_string_pretty(&translations)?);
        },
        Commands::States { spec } => {
            let (workflow_id, spec) = load_workflow(&spec, args.workflow_id)?;
            for state_id in generator.state_ids(&workflow_id, &spec) {
                println!("{state_id}");
            }
        },
        Commands::Permissions { spec } => {
            let (workflow_id, _) = load_workflow(&spec, args.workflow_id)?;
            let overview = permission_overview(
                &workflow_id,
                registry.known_permissions(),
                &registry,
            )?;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        },
    }

    Ok(())
}
