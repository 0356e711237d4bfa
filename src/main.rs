// ABOUTME: Entry point for the recipebox binary.
// ABOUTME: Parses CLI arguments, initializes tracing, and runs a store command or the HTTP server.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use recipebox_core::{Preferences, Recipe, RecipeInput, RecipeStore, Storage};
use recipebox_server::{AppState, RecipeboxConfig, create_router};
use recipebox_store::{StorageKind, open_storage};

#[derive(Parser)]
#[command(name = "recipebox", version, about = "Manage your recipes locally")]
struct Cli {
    /// Data directory (overrides RECIPEBOX_HOME)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Storage backend (overrides RECIPEBOX_BACKEND)
    #[arg(long, global = true, value_enum)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    File,
    Sqlite,
}

impl From<Backend> for StorageKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::File => StorageKind::File,
            Backend::Sqlite => StorageKind::Sqlite,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve {
        /// Socket address to bind (overrides RECIPEBOX_BIND)
        #[arg(long)]
        bind: Option<std::net::SocketAddr>,
    },
    /// List recipes, optionally filtered by text and category
    List {
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Show one recipe in full
    Show { position: usize },
    /// Create a recipe
    Add(RecipeArgs),
    /// Replace the recipe at a position
    Edit {
        position: usize,
        #[command(flatten)]
        recipe: RecipeArgs,
    },
    /// Delete the recipe at a position
    Delete {
        position: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Import recipes from a JSON file and append them to the collection
    Import { file: PathBuf },
    /// Write the collection as JSON in the import format
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or change the dark mode preference
    Theme {
        #[arg(value_enum, default_value = "show")]
        action: ThemeAction,
    },
}

#[derive(clap::Args)]
struct RecipeArgs {
    #[arg(short, long)]
    title: String,
    #[arg(short, long)]
    category: Option<String>,
    /// Preparation time in minutes
    #[arg(long)]
    prep_time: Option<u32>,
    /// Cooking time in minutes
    #[arg(long)]
    cook_time: Option<u32>,
    /// Repeat for each ingredient
    #[arg(short, long = "ingredient")]
    ingredients: Vec<String>,
    /// Repeat for each step, in order
    #[arg(short, long = "step")]
    steps: Vec<String>,
}

impl From<RecipeArgs> for RecipeInput {
    fn from(args: RecipeArgs) -> Self {
        Self {
            title: args.title,
            category: args.category,
            prep_time: args.prep_time,
            cook_time: args.cook_time,
            ingredients: args.ingredients,
            steps: args.steps,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipebox=info,tower_http=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = RecipeboxConfig::from_env().context("invalid configuration")?;
    if let Some(home) = cli.home {
        config.home = home;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend.into();
    }

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            serve(config).await
        }
        command => run_store_command(&config, command),
    }
}

async fn serve(config: RecipeboxConfig) -> Result<()> {
    let state = AppState::open(&config)?;
    tracing::info!(
        "serving recipes from {} ({} backend)",
        state.home.display(),
        config.backend
    );
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!("recipebox listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}

fn open_store(config: &RecipeboxConfig) -> Result<RecipeStore<Box<dyn Storage>>> {
    let storage = open_storage(config.backend, &config.home)
        .with_context(|| format!("failed to open storage in {}", config.home.display()))?;
    Ok(RecipeStore::open(storage)?)
}

fn run_store_command(config: &RecipeboxConfig, command: Command) -> Result<()> {
    match command {
        Command::Serve { .. } => bail!("serve runs the HTTP server, not a store command"),
        Command::List { query, category } => {
            let store = open_store(config)?;
            let matches = store.filter(&query, &category);
            if matches.is_empty() {
                println!("No recipes found.");
            }
            for recipe in matches {
                let position = store.position_of(recipe.id).unwrap_or_default();
                println!("{:>3}  {}  ({})", position, recipe.title, recipe.summary());
            }
        }
        Command::Show { position } => {
            let store = open_store(config)?;
            match store.get_at(position) {
                Some(recipe) => print_recipe(recipe),
                None => bail!("no recipe at position {}", position),
            }
        }
        Command::Add(args) => {
            let mut store = open_store(config)?;
            let title = store.create(args.into())?.title.clone();
            println!("Saved {:?} at position {}", title, store.len() - 1);
        }
        Command::Edit { position, recipe } => {
            let mut store = open_store(config)?;
            let recipe = store.update_at(position, recipe.into())?;
            println!("Updated {:?}", recipe.title);
        }
        Command::Delete { position, yes } => {
            let mut store = open_store(config)?;
            let stdin = std::io::stdin();
            match delete_confirmed(
                &mut store,
                position,
                yes,
                &mut stdin.lock(),
                &mut std::io::stdout(),
            )? {
                Some(removed) => println!("Deleted {:?}", removed.title),
                None => println!("Kept."),
            }
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let mut store = open_store(config)?;
            let count = store.import_merge(&raw)?;
            println!("Imported {} recipe(s).", count);
        }
        Command::Export { output } => {
            let store = open_store(config)?;
            let json = store.export()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Exported {} recipe(s) to {}", store.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
        Command::Theme { action } => {
            let mut prefs = Preferences::new(open_storage(config.backend, &config.home)?);
            let dark = match action {
                ThemeAction::Show => prefs.dark_mode()?,
                ThemeAction::Toggle => prefs.toggle_dark_mode()?,
                ThemeAction::Dark => {
                    prefs.set_dark_mode(true)?;
                    true
                }
                ThemeAction::Light => {
                    prefs.set_dark_mode(false)?;
                    false
                }
            };
            println!("{}", if dark { "dark" } else { "light" });
        }
    }
    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    println!("{}", recipe.title);
    let meta = meta_line(recipe);
    if !meta.is_empty() {
        println!("{}", meta);
    }

    println!("\nIngredients");
    for ingredient in &recipe.ingredients {
        println!("  • {}", ingredient);
    }
    println!("\nSteps");
    for (n, step) in recipe.steps.iter().enumerate() {
        println!("  {}. {}", n + 1, step);
    }
}

/// Category and timings joined for the header under the title.
fn meta_line(recipe: &Recipe) -> String {
    let mut meta = Vec::new();
    if let Some(category) = &recipe.category {
        meta.push(category.clone());
    }
    if let Some(prep) = recipe.prep_time {
        meta.push(format!("prep {} min", prep));
    }
    if let Some(cook) = recipe.cook_time {
        meta.push(format!("cook {} min", cook));
    }
    if let Some(total) = recipe.total_time() {
        meta.push(format!("total {} min", total));
    }
    meta.join(" • ")
}

/// Delete the recipe at `position`, asking first unless `yes` is set.
/// Returns `None` when the answer was anything but y/yes.
fn delete_confirmed<S: Storage>(
    store: &mut RecipeStore<S>,
    position: usize,
    yes: bool,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<Recipe>> {
    let Some(recipe) = store.get_at(position) else {
        bail!("no recipe at position {}", position);
    };
    let prompt = format!("Delete {:?}? This cannot be undone. [y/N] ", recipe.title);
    if !yes && !confirm(&prompt, input, output)? {
        return Ok(None);
    }
    Ok(Some(store.delete_at(position)?))
}

fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
