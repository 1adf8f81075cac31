use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use base64::Engine;
use clap::{Parser, Subcommand};
use rezeptbuch_core::changelog::CHANGELOG;
use rezeptbuch_core::{
    AuthStore, CatalogStore, Configuration, HttpAuthApi, HttpCatalogApi, HttpRecipeApi,
    RecipeApi, RecipeStore, ScanImage, TokenStore,
};

#[derive(Parser)]
#[command(name = "rezeptbuch")]
#[command(about = "Rezeptbuch CLI", long_about = None)]
struct Cli {
    /// Server base URL, e.g. http://localhost:8080/api
    /// (default: REZEPTBUCH_API_URL or /api)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the stored session token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List recipes, optionally filtered (e.g. "suppe" "< 30")
    Recipes {
        /// Search terms; all must match
        terms: Vec<String>,
    },
    /// Show one recipe in full
    Show { id: i64 },
    /// Delete a recipe
    Delete { id: i64 },
    /// Server-side recipe search
    Search { query: String },
    /// Scan recipe photos into structured fields
    Scan {
        /// Image files (jpg/png)
        files: Vec<PathBuf>,
    },
    /// List the ingredient reference catalog
    Catalog,
    /// List user accounts (admin)
    Users,
    /// Print the release changelog
    Changelog,
}

fn configuration(server: Option<String>) -> Configuration {
    match server {
        Some(base_path) => Configuration::with_base_path(base_path),
        None => Configuration::new(),
    }
}

fn mime_for(path: &std::path::Path) -> Option<String> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => Some("image/png".to_string()),
        Some("jpg") | Some("jpeg") => Some("image/jpeg".to_string()),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = configuration(cli.server);

    match cli.command {
        Commands::Login { email, password } => login(config, &email, &password).await,
        Commands::Logout => {
            config.tokens.clear();
            println!("Abgemeldet.");
            Ok(())
        }
        Commands::Whoami => whoami(config).await,
        Commands::Recipes { terms } => list_recipes(config, terms).await,
        Commands::Show { id } => show_recipe(config, id).await,
        Commands::Delete { id } => delete_recipe(config, id).await,
        Commands::Search { query } => search_recipes(config, &query).await,
        Commands::Scan { files } => scan_recipe(config, &files).await,
        Commands::Catalog => list_catalog(config).await,
        Commands::Users => list_users(config).await,
        Commands::Changelog => {
            print_changelog();
            Ok(())
        }
    }
}

async fn login(config: Configuration, email: &str, password: &str) -> Result<()> {
    let mut auth = AuthStore::new(Arc::new(HttpAuthApi::new(config)));
    if auth.login(email, password).await {
        println!("Angemeldet als {}", auth.full_name());
        if auth.needs_profile_setup() {
            println!("Hinweis: Profil ist unvollständig oder das Passwort muss geändert werden.");
        }
        Ok(())
    } else {
        bail!(
            "{}",
            auth.error().unwrap_or("Anmeldung fehlgeschlagen.").to_string()
        )
    }
}

async fn whoami(config: Configuration) -> Result<()> {
    let mut auth = AuthStore::new(Arc::new(HttpAuthApi::new(config)));
    if !auth.check_auth().await {
        bail!("Nicht angemeldet.");
    }
    let user = auth.user().context("no user after check_auth")?;
    println!("{} <{}> ({:?})", user.full_name(), user.email, user.role);
    Ok(())
}

async fn list_recipes(config: Configuration, terms: Vec<String>) -> Result<()> {
    let mut store = RecipeStore::new(Arc::new(HttpRecipeApi::new(config)));
    store.fetch_all(false).await;
    if let Some(error) = store.error() {
        tracing::warn!(error = %error, "Recipe list fetch failed");
        bail!("{}", error);
    }
    store.set_search_terms(terms);

    let hits = store.filtered_recipes();
    if hits.is_empty() {
        println!("Keine Rezepte gefunden.");
        return Ok(());
    }
    for recipe in hits {
        let prep = recipe
            .prep_time_minutes
            .map(|m| format!("{m} min"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:<40} {:>8}  {} Zutaten",
            recipe.id, recipe.title, prep, recipe.ingredient_count
        );
    }
    Ok(())
}

async fn show_recipe(config: Configuration, id: i64) -> Result<()> {
    let mut store = RecipeStore::new(Arc::new(HttpRecipeApi::new(config)));
    let recipe = store.fetch_by_id(id).await?;

    println!("{}", recipe.title);
    if let Some(description) = &recipe.description {
        println!("{description}");
    }
    if let Some(prep) = recipe.prep_time_minutes {
        println!("Zubereitung: {prep} min");
    }
    if !recipe.ingredients.is_empty() {
        println!();
        println!("Zutaten:");
        for ingredient in &recipe.ingredients {
            let amount = ingredient.amount.as_deref().unwrap_or("");
            let unit = ingredient.unit.as_deref().unwrap_or("");
            println!("  {:>6} {:<6} {}", amount, unit, ingredient.name);
        }
    }
    if !recipe.instructions.is_empty() {
        println!();
        for (i, step) in recipe.instructions.iter().enumerate() {
            println!("{}. {}", i + 1, step);
        }
    }
    Ok(())
}

async fn delete_recipe(config: Configuration, id: i64) -> Result<()> {
    let mut store = RecipeStore::new(Arc::new(HttpRecipeApi::new(config)));
    store.delete(id).await?;
    println!("Rezept {id} gelöscht.");
    Ok(())
}

async fn search_recipes(config: Configuration, query: &str) -> Result<()> {
    let api = HttpRecipeApi::new(config);
    let results = api.search(query).await?;
    if results.is_empty() {
        println!("Keine Treffer für '{query}'.");
        return Ok(());
    }
    for recipe in results {
        println!("{:>5}  {}", recipe.id.unwrap_or_default(), recipe.title);
    }
    Ok(())
}

async fn scan_recipe(config: Configuration, files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        bail!("Mindestens ein Bild ist erforderlich.");
    }

    let mut images = Vec::with_capacity(files.len());
    for path in files {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        let mime_type = mime_for(path);
        if mime_type.is_none() {
            tracing::debug!(file = %path.display(), "Unknown image extension, sending without mime type");
        }
        images.push(ScanImage {
            image_data: base64::engine::general_purpose::STANDARD.encode(&bytes),
            mime_type,
        });
    }

    let api = HttpRecipeApi::new(config);
    let result = api.scan(&images).await?;

    println!("Titel:  {}", result.title.as_deref().unwrap_or("-"));
    println!("Autor:  {}", result.author.as_deref().unwrap_or("-"));
    println!("Quelle: {}", result.source.as_deref().unwrap_or("-"));
    if !result.ingredients.is_empty() {
        println!("Zutaten:");
        for ingredient in &result.ingredients {
            println!("  {}", ingredient.name);
        }
    }
    for (i, step) in result.instructions.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    Ok(())
}

async fn list_catalog(config: Configuration) -> Result<()> {
    let mut store = CatalogStore::new(Arc::new(HttpCatalogApi::new(config)));
    store.fetch_all().await;
    if let Some(error) = store.error() {
        tracing::warn!(error = %error, "Catalog fetch failed");
        bail!("{}", error);
    }
    for entry in store.entries() {
        let kcal = entry
            .nutrition_kcal
            .map(|k| format!("{k} kcal"))
            .unwrap_or_default();
        println!(
            "{:>5}  {:<30} {:<6} {}",
            entry.id.unwrap_or_default(),
            entry.name,
            entry.unit.as_deref().unwrap_or(""),
            kcal
        );
    }
    Ok(())
}

async fn list_users(config: Configuration) -> Result<()> {
    let mut auth = AuthStore::new(Arc::new(HttpAuthApi::new(config)));
    let users = auth.fetch_users().await?;
    for user in users {
        println!("{:>5}  {:<30} {:?}", user.id, user.email, user.role);
    }
    Ok(())
}

fn print_changelog() {
    for entry in CHANGELOG {
        println!("{} — {}", entry.date, entry.title);
        for change in entry.changes {
            println!("  - {change}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(
            mime_for(std::path::Path::new("rezept.png")).as_deref(),
            Some("image/png")
        );
        assert_eq!(
            mime_for(std::path::Path::new("seite.jpeg")).as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(mime_for(std::path::Path::new("scan.heic")), None);
    }
}
