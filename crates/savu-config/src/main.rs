mod cli; // Declare the cli module

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{debug, info};

use savu_core::plugin_list::{AnsiDecorator, PlainDecorator, PluginList, RenderOptions, TextDecorator};
use savu_core::plugin_system::{PluginRegistry, StaticPluginRegistry};
use savu_core::storage::{FrameworkConfig, LocalStorageProvider};
use savu_core::Result;

use cli::{CheckArgs, CliArgs, Commands, ListArgs};

/// Registry with every built-in plugin, using the configured default saver
fn build_registry(config: &FrameworkConfig) -> Result<Arc<StaticPluginRegistry>> {
    let mut registry = StaticPluginRegistry::with_default_saver(&config.default_saver_id);
    savu_plugins::register_builtin(&mut registry)?;
    Ok(Arc::new(registry))
}

fn new_list(config: &FrameworkConfig) -> Result<PluginList> {
    let registry = build_registry(config)?;
    Ok(PluginList::new(registry).with_framework_citations(config.framework_citations.clone()))
}

fn run_list(args: &ListArgs, config: &FrameworkConfig) -> Result<()> {
    let mut list = new_list(config)?;
    list.load(&args.file, args.all)?;

    let options = RenderOptions::new(args.verbosity())
        .with_level(args.level.into())
        .with_range(args.start, args.stop)
        .with_width(config.render_width);
    let decorator: &dyn TextDecorator = if args.colour || config.colour {
        &AnsiDecorator
    } else {
        &PlainDecorator
    };
    println!("{}", list.render_with(&options, decorator)?);
    Ok(())
}

fn run_check(args: &CheckArgs, config: &FrameworkConfig) -> Result<()> {
    let mut list = new_list(config)?;
    list.load(&args.file, false)?;
    list.validate_structure()?;
    println!(
        "{}: {} steps ({} loaders, {} savers)",
        args.file.display(),
        list.len(),
        list.n_loaders(),
        list.n_savers()
    );

    let added = list.synthesize_missing_savers(&args.required)?;
    for name in &added {
        println!("Added {} for dataset '{}'", list.registry().default_saver_id(), name);
    }
    if list.has_gpu_steps()? {
        println!("The list contains GPU plugins");
    }

    if let Some(output) = &args.output {
        list.save(output)?;
        println!("Saved completed list to {}", output.display());
    } else if !added.is_empty() {
        info!("No --output given; the completed list was not saved");
    }
    Ok(())
}

fn run_plugins(config: &FrameworkConfig) -> Result<()> {
    let registry = build_registry(config)?;
    for id in registry.plugin_ids() {
        let class = registry.resolve(&id)?;
        let tags: Vec<String> = class.capabilities().iter().map(|c| c.to_string()).collect();
        if tags.is_empty() {
            println!("{} ({})", class.name(), id);
        } else {
            println!("{} ({}) [{}]", class.name(), id, tags.join(", "));
        }
    }
    Ok(())
}

fn run(args: CliArgs) -> Result<()> {
    let storage = LocalStorageProvider::current_dir();
    let config = FrameworkConfig::load_or_default(&storage, args.config.as_deref())?;
    debug!("Using configuration: {:?}", config);

    match &args.command {
        Commands::List(list_args) => run_list(list_args, &config),
        Commands::Check(check_args) => run_check(check_args, &config),
        Commands::Plugins => run_plugins(&config),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
