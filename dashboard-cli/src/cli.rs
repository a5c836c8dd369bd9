use anyhow::Context;
use clap::{Parser, Subcommand};
use dashboard_core::{
    Config, Dashboard, FavoritesStore, FileStore, Region, SortMode, provider::provider_from_config,
};
use inquire::{Password, Select, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Weather dashboard for Luzon cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather, forecast and air quality for a city.
    Show {
        /// City name, e.g. "Baguio".
        city: String,

        /// Forecast order: default, temp-asc or temp-desc.
        #[arg(long, default_value = "default")]
        sort: SortMode,

        /// Only keep forecast days whose description contains this text.
        #[arg(long)]
        filter: Option<String>,

        /// Reveal the extended forecast instead of the first page.
        #[arg(long)]
        all: bool,
    },

    /// Search a city and explore its forecast interactively.
    Browse {
        /// City to start with; without it, pick from favorites or type one.
        city: Option<String>,
    },

    /// Manage favorite cities.
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// List favorite cities.
    List,

    /// Add a city, or remove it if it is already a favorite.
    Toggle {
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::debug!(command = ?self.command, "dispatching command");

        match self.command {
            Command::Configure => configure(),
            Command::Show { city, sort, filter, all } => {
                let mut dashboard = open_dashboard()?;
                let favorites = open_favorites()?;

                let snapshot = dashboard.search(&city).await?;
                let favorite = favorites.is_favorite(&snapshot.current.location_name);
                let header = render::current(snapshot, favorite);

                let view = dashboard.forecast_mut();
                view.set_sort(sort);
                if let Some(filter) = filter {
                    view.set_filter(&filter);
                }
                if all {
                    view.reveal_all();
                }

                println!("{header}");
                print!("{}", render::forecast(view));
                Ok(())
            }
            Command::Browse { city } => browse(city).await,
            Command::Favorites { action } => {
                let mut favorites = open_favorites()?;
                match action {
                    FavoritesAction::List => {
                        print!("{}", render::favorites(favorites.list(), None));
                    }
                    FavoritesAction::Toggle { city } => {
                        let city = dashboard_core::validate_city(&city)?;
                        let added = favorites.toggle(city)?;
                        tracing::debug!(city, added, "favorite toggled");
                        let verb = if added { "Added" } else { "Removed" };
                        println!("{verb} {}", render::display_city(city));
                    }
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(key);
    config.require_api_key()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn open_dashboard() -> anyhow::Result<Dashboard> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(Dashboard::new(provider, Region::luzon()))
}

fn open_favorites() -> anyhow::Result<FavoritesStore<FileStore>> {
    let storage = FileStore::open_default()?;
    Ok(FavoritesStore::open(storage)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowseAction {
    LoadMore,
    Sort,
    Filter,
    ToggleFavorite,
    OpenFavorite,
    Search,
    Quit,
}

impl std::fmt::Display for BrowseAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BrowseAction::LoadMore => "Load more",
            BrowseAction::Sort => "Sort forecast",
            BrowseAction::Filter => "Filter forecast",
            BrowseAction::ToggleFavorite => "Toggle favorite",
            BrowseAction::OpenFavorite => "Open a favorite",
            BrowseAction::Search => "Search another city",
            BrowseAction::Quit => "Quit",
        })
    }
}

/// Menu entries for the current state; favorites are only offered once some
/// exist.
fn browse_actions(has_more: bool, favorites: &[String]) -> Vec<BrowseAction> {
    let mut actions = Vec::with_capacity(7);
    if has_more {
        actions.push(BrowseAction::LoadMore);
    }
    actions.extend([BrowseAction::Sort, BrowseAction::Filter, BrowseAction::ToggleFavorite]);
    if !favorites.is_empty() {
        actions.push(BrowseAction::OpenFavorite);
    }
    actions.extend([BrowseAction::Search, BrowseAction::Quit]);
    actions
}

/// A city offered for quick recall, or the way out to free text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CityChoice {
    Favorite(String),
    Other,
}

impl std::fmt::Display for CityChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CityChoice::Favorite(city) => f.write_str(&render::display_city(city)),
            CityChoice::Other => f.write_str("Other city…"),
        }
    }
}

fn city_choices(favorites: &[String], allow_other: bool) -> Vec<CityChoice> {
    let mut choices: Vec<CityChoice> =
        favorites.iter().cloned().map(CityChoice::Favorite).collect();
    if allow_other {
        choices.push(CityChoice::Other);
    }
    choices
}

fn prompt_city() -> anyhow::Result<String> {
    Text::new("City:").prompt().context("Failed to read city")
}

/// Ask for a city, offering favorites first when there are any.
fn prompt_start_city(favorites: &[String]) -> anyhow::Result<String> {
    if favorites.is_empty() {
        return prompt_city();
    }

    let choice = Select::new("City:", city_choices(favorites, true))
        .prompt()
        .context("Failed to read city")?;
    match choice {
        CityChoice::Favorite(city) => Ok(city),
        CityChoice::Other => prompt_city(),
    }
}

async fn browse(city: Option<String>) -> anyhow::Result<()> {
    let mut dashboard = open_dashboard()?;
    let mut favorites = open_favorites()?;
    let mut active: Option<String> = None;
    let mut pending = city;

    loop {
        if let Some(city) = pending.take() {
            // A failed search keeps whatever was on screen before.
            match dashboard.search(&city).await {
                Ok(snapshot) => active = Some(snapshot.current.location_name.clone()),
                Err(err) => {
                    tracing::warn!(%city, error = %err, "search failed");
                    eprintln!("{err}");
                }
            }
        }

        let Some(name) = active.as_deref() else {
            pending = Some(prompt_start_city(favorites.list())?);
            continue;
        };

        if let Some(snapshot) = dashboard.snapshot() {
            println!("{}", render::current(snapshot, favorites.is_favorite(name)));
        }
        print!("{}", render::forecast(dashboard.forecast()));
        print!("{}", render::favorites(favorites.list(), Some(name)));

        let actions = browse_actions(dashboard.forecast().has_more(), favorites.list());
        let action = Select::new("Action:", actions).prompt().context("Failed to read action")?;
        match action {
            BrowseAction::LoadMore => dashboard.forecast_mut().reveal_all(),
            BrowseAction::Sort => {
                let mode = Select::new("Sort by:", SortMode::all().to_vec())
                    .prompt()
                    .context("Failed to read sort mode")?;
                dashboard.forecast_mut().set_sort(mode);
            }
            BrowseAction::Filter => {
                let text = Text::new("Description contains:")
                    .with_initial_value(dashboard.forecast().filter())
                    .prompt()
                    .context("Failed to read filter")?;
                dashboard.forecast_mut().set_filter(&text);
            }
            BrowseAction::ToggleFavorite => {
                if let Err(err) = favorites.toggle(name) {
                    tracing::warn!(city = name, error = %err, "favorite toggle failed");
                    eprintln!("{err}");
                }
            }
            BrowseAction::OpenFavorite => {
                let choice = Select::new("Favorite:", city_choices(favorites.list(), false))
                    .prompt()
                    .context("Failed to read favorite")?;
                if let CityChoice::Favorite(city) = choice {
                    pending = Some(city);
                }
            }
            BrowseAction::Search => pending = Some(prompt_city()?),
            BrowseAction::Quit => return Ok(()),
        }
    }
}
