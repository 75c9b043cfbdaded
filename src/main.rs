use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;
use toolshelf::catalog::{BaseUrlMode, CatalogLoader, CatalogManager, IconMapExt, LoadOutcome, NewTool, fetcher_for};
use toolshelf::page;
use toolshelf::ripple::PointerRipple;
use toolshelf::theme::{EnvProbe, FileStore, ThemeController};

fn setup_logging(level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolshelf")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolshelf.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized at {}, writing to: {}", level, log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => handle_render_command(None, None, None, None, config),
        Some(Commands::Render {
            output,
            source,
            mode,
            base_url,
        }) => handle_render_command(output.as_deref(), source.as_deref(), *mode, base_url.as_deref(), config),
        Some(Commands::Theme { theme }) => handle_theme_command(theme.as_deref(), config),
        Some(Commands::List { source }) => handle_list_command(source.as_deref(), config),
        Some(Commands::AddCategory { name, icon }) => handle_add_category_command(name, icon, config),
        Some(Commands::AddTool {
            category,
            name,
            description,
            url,
            banner,
        }) => handle_add_tool_command(
            category,
            NewTool {
                name: name.clone(),
                description: description.clone(),
                url: url.clone(),
                banner: banner.clone(),
            },
            config,
        ),
    }
}

fn theme_controller(config: &Config) -> ThemeController<FileStore, EnvProbe> {
    ThemeController::new(
        FileStore::new(&config.theme.storage_path),
        EnvProbe,
        config.theme.settings(),
    )
}

fn current_thread_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

fn handle_render_command(
    output: Option<&Path>,
    source: Option<&str>,
    mode: Option<BaseUrlMode>,
    base_url: Option<&str>,
    config: &Config,
) -> Result<()> {
    let location = source.unwrap_or(&config.source.location);
    let mut links = config.links.clone();
    if let Some(mode) = mode {
        links.base_url_mode = mode;
    }
    if let Some(base_url) = base_url {
        links.tool_base_url = base_url.to_string();
    }
    info!("Rendering from {} (links: {:?})", location, links.base_url_mode);

    let loader = CatalogLoader::new(fetcher_for(location), config.catalog.clone(), links);
    let ripple = PointerRipple::new(config.ripple.button_class.clone(), config.ripple.style());
    let mut theme = theme_controller(config);
    let mut doc = page::scaffold(&config.page, &config.catalog.render_target, &config.theme.option_class);

    let runtime = current_thread_runtime()?;
    let report = runtime
        .block_on(page::initialize(&mut doc, &mut theme, &loader, &ripple))
        .context("Failed to initialize page")?;

    match &report.outcome {
        LoadOutcome::Rendered { categories, tools } => {
            eprintln!(
                "{} {} categories, {} tools (theme: {})",
                "Rendered:".green(),
                categories,
                tools,
                report.theme
            );
        }
        LoadOutcome::Failed(e) => {
            eprintln!("{} {}", "Failed to load tools:".red(), e);
        }
    }

    let html = doc.to_html();
    match output {
        Some(path) => {
            fs::write(path, html).context(format!("Failed to write {}", path.display()))?;
            eprintln!("{} {}", "Wrote:".green(), path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn handle_theme_command(theme: Option<&str>, config: &Config) -> Result<()> {
    let mut controller = theme_controller(config);
    controller.restore();

    if let Some(token) = theme {
        info!("Selecting theme: {}", token);
        controller.persist(token).context("Failed to set theme")?;
        println!("{} {}", "Theme set:".green(), controller.state().preference);
    } else {
        println!("{} {}", "Theme:".cyan(), controller.state().preference);
    }
    println!("  resolves to {}", controller.resolved());
    Ok(())
}

fn handle_list_command(source: Option<&str>, config: &Config) -> Result<()> {
    let location = source.unwrap_or(&config.source.location);
    let loader = CatalogLoader::new(fetcher_for(location), config.catalog.clone(), config.links.clone());

    let runtime = current_thread_runtime()?;
    let (catalog, icons) = runtime.block_on(loader.load()).context("Failed to load catalog")?;

    for (idx, (category, tools)) in catalog.iter().enumerate() {
        let icon = icons.icon_for(category);
        println!(
            "{}. {} ({} tools) {}",
            idx + 1,
            category.cyan(),
            tools.len(),
            if icon.is_empty() { "-".dimmed() } else { icon.normal() }
        );
    }
    Ok(())
}

fn data_manager(config: &Config) -> Result<CatalogManager> {
    let location = &config.source.location;
    if location.starts_with("http://") || location.starts_with("https://") {
        bail!("Data documents at {} are remote; set source.location to a local directory", location);
    }
    CatalogManager::open(location, &config.catalog).context(format!("Failed to open catalog data in {}", location))
}

fn handle_add_category_command(name: &str, icon: &str, config: &Config) -> Result<()> {
    info!("Adding category: {}", name);
    let mut manager = data_manager(config)?;
    manager.add_category(name, icon).context("Failed to add category")?;
    println!("{} {}", "Added category:".green(), name);
    Ok(())
}

fn handle_add_tool_command(category: &str, tool: NewTool, config: &Config) -> Result<()> {
    info!("Adding tool {} to {}", tool.name, category);
    let mut manager = data_manager(config)?;
    let entry = manager.add_tool(category, tool).context("Failed to add tool")?;
    println!("{} {} -> {}", "Added tool:".green(), entry.name, entry.url);
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; it carries the log level
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(config.log_filter()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
