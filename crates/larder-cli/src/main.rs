//! Larder CLI — find recipes and keep your favorites

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use larder::catalog::{IngredientQuery, RecipeSource, SampleCatalog};
use larder::config::storage::DATA_DIR_ENV;
use larder::data::{FavoritesStore, FileStorage, Recipe, RecipeFilter, RecipeSort, Storage};

#[derive(Parser)]
#[command(name = "larder", about = "Find recipes by ingredient and keep your favorites", version)]
struct Cli {
    /// Directory holding saved favorites
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search recipes by ingredients, e.g. "tomato, basil"
    Search { ingredients: String },
    /// Show a recipe in full
    Show { id: String },
    /// List saved favorites
    Favorites {
        /// Only favorites whose title or ingredients contain this text
        #[arg(long)]
        filter: Option<String>,
        #[arg(long, value_enum, default_value_t = SortArg::Added)]
        sort: SortArg,
    },
    /// Save a recipe to favorites
    Add { id: String },
    /// Remove a recipe from favorites
    Remove { id: String },
    /// Save the recipe if it isn't a favorite, remove it if it is
    Toggle { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Added,
    Title,
    Time,
}

impl From<SortArg> for RecipeSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Added => RecipeSort::Added,
            SortArg::Title => RecipeSort::Title,
            SortArg::Time => RecipeSort::ReadyTime,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let storage = match cli.data_dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::open_default().context("Cannot locate a data directory")?,
    };
    tracing::info!(dir = %storage.dir().display(), "Using data directory");
    let dir = storage.dir().to_path_buf();

    let catalog = SampleCatalog::new()?;
    let mut favorites = FavoritesStore::initialize(storage);

    let stdout = io::stdout();
    run(cli.command, &mut favorites, &catalog, &mut stdout.lock())
        .with_context(|| format!("Data directory: {}", dir.display()))
}

/// Execute one command against the favorites store and catalog
///
/// Fails if the command left favorites that could not be written back.
fn run<S: Storage>(
    command: Command,
    favorites: &mut FavoritesStore<S>,
    catalog: &dyn RecipeSource,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Search { ingredients } => {
            let query = IngredientQuery::parse(&ingredients);
            let results = catalog.search(&query)?;
            writeln!(out, "{} recipes for {}", results.len(), query.ingredients().join(", "))?;
            for recipe in &results {
                print_row(out, recipe, favorites.is_favorite(&recipe.id))?;
            }
        }
        Command::Show { id } => {
            let recipe = match favorites.get(&id) {
                Some(recipe) => recipe.clone(),
                None => find_recipe(catalog, &id)?,
            };
            print_detail(out, &recipe, favorites.is_favorite(&id))?;
        }
        Command::Favorites { filter, sort } => {
            let mut recipe_filter = RecipeFilter::new();
            if let Some(term) = filter {
                recipe_filter = recipe_filter.search(term);
            }
            let shown = favorites.query(&recipe_filter, sort.into());
            writeln!(out, "{} of {} favorites", shown.len(), favorites.len())?;
            for recipe in shown {
                print_row(out, recipe, true)?;
            }
        }
        Command::Add { id } => {
            let recipe = find_recipe(catalog, &id)?;
            let title = recipe.title.clone();
            if favorites.add(recipe) {
                writeln!(out, "Saved \"{}\"", title)?;
            } else {
                writeln!(out, "\"{}\" is already a favorite", title)?;
            }
        }
        Command::Remove { id } => match favorites.remove(&id) {
            Some(recipe) => writeln!(out, "Removed \"{}\"", recipe.title)?,
            None => writeln!(out, "Recipe {} is not a favorite", id)?,
        },
        Command::Toggle { id } => {
            let recipe = match favorites.get(&id) {
                Some(recipe) => recipe.clone(),
                None => find_recipe(catalog, &id)?,
            };
            let title = recipe.title.clone();
            if favorites.toggle(recipe) {
                writeln!(out, "Saved \"{}\"", title)?;
            } else {
                writeln!(out, "Removed \"{}\"", title)?;
            }
        }
    }

    if !favorites.is_synced() {
        bail!("Favorites changed but could not be saved");
    }

    Ok(())
}

fn find_recipe(catalog: &dyn RecipeSource, id: &str) -> Result<Recipe> {
    match catalog.get_recipe(id)? {
        Some(recipe) => Ok(recipe),
        None => bail!("No recipe with ID {} in {}", id, catalog.name()),
    }
}

fn print_row(out: &mut impl Write, recipe: &Recipe, favorite: bool) -> io::Result<()> {
    let marker = if favorite { "♥" } else { " " };
    writeln!(
        out,
        "{} {:>4}  {:<28} {:>3} min",
        marker, recipe.id, recipe.title, recipe.ready_in_minutes
    )
}

fn print_detail(out: &mut impl Write, recipe: &Recipe, favorite: bool) -> io::Result<()> {
    writeln!(out, "{}{}", recipe.title, if favorite { "  ♥" } else { "" })?;
    writeln!(out, "Ready in {} minutes", recipe.ready_in_minutes)?;
    if let Some(ref summary) = recipe.summary {
        writeln!(out, "\n{}", summary)?;
    }

    writeln!(out, "\nIngredients:")?;
    for ingredient in &recipe.ingredients {
        writeln!(out, "  - {}", ingredient)?;
    }

    writeln!(out, "\nInstructions:")?;
    for (i, step) in recipe.instructions.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, step)?;
    }

    if !recipe.image.is_empty() {
        writeln!(out, "\nImage: {}", recipe.image)?;
    }
    if let Some(url) = recipe.source_url.as_deref().filter(|u| !u.is_empty()) {
        writeln!(out, "Source: {}", url)?;
    }
    Ok(())
}
