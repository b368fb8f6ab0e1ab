//! prodplan CLI
//!
//! Loads a JSON catalog, filters it by activated technologies, generates
//! the production map and solves for the cheapest layout meeting the
//! requested item rates.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use prodplan::availability::{BuildingSet, RecipeSet, TechnologySet};
use prodplan::data::load_catalog;
use prodplan::generator::ProductionMap;
use prodplan::models::Item;
use prodplan::optimizer::Optimizer;
use prodplan::report;

#[derive(Parser)]
#[command(name = "prodplan")]
#[command(about = "Optimal factory layout planner for crafting-game economies")]
struct Cli {
    /// Path to the JSON catalog file
    #[arg(short, long, default_value = "catalog.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the cheapest layout meeting the given item rates
    Plan {
        /// Activated technology, repeatable
        #[arg(long = "tech")]
        technologies: Vec<String>,

        /// Item rate target, e.g. "iron-plate=5" or "steam@165=10"
        #[arg(long = "target")]
        targets: Vec<String>,

        /// Per-unit quantity cap, e.g. "iron-ore-patch-0/mining-drill=4";
        /// a bare recipe variant name caps every matching unit
        #[arg(long = "cap")]
        caps: Vec<String>,

        /// Write the solved production graph as Graphviz dot
        #[arg(long)]
        dot: Option<PathBuf>,

        /// Show every solved unit with its rates
        #[arg(short, long)]
        verbose: bool,
    },

    /// List all recipes in the catalog
    ListRecipes,

    /// List all buildings in the catalog
    ListBuildings,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "prodplan=info".to_string()),
        )
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(&cli.catalog)?;

    match cli.command {
        Commands::Plan {
            technologies,
            targets,
            caps,
            dot,
            verbose,
        } => {
            let tech_set =
                TechnologySet::from_names(&catalog, technologies.iter().map(String::as_str));
            let recipes = RecipeSet::from_catalog(&catalog, &tech_set);
            let buildings = BuildingSet::from_catalog(&catalog, &recipes);
            let map = ProductionMap::generate(&recipes, &buildings, &catalog)?;
            tracing::info!(
                recipes = recipes.len(),
                buildings = buildings.len(),
                units = map.len(),
                "production map generated"
            );

            let item_targets = targets
                .iter()
                .map(|spec| parse_target(spec))
                .collect::<Result<Vec<_>>>()?;
            let unit_caps = parse_caps(&map, &caps)?;

            let solved = Optimizer::new(&map, item_targets, unit_caps).optimize()?;

            if verbose {
                println!("Solved units:\n");
                println!("{}", report::format_units(&solved));
            }
            println!("{}", report::summarize(&solved));

            if let Some(path) = dot {
                let file = File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                report::write_dot(&solved, &mut BufWriter::new(file))?;
                println!("Graph written to {}", path.display());
            }
        }

        Commands::ListRecipes => {
            println!("{:<40} {:<20} {:>10}", "Recipe", "Category", "Time (s)");
            println!("{}", "-".repeat(72));
            for recipe in catalog.recipes() {
                println!(
                    "{:<40} {:<20} {:>10.1}",
                    recipe.name, recipe.category, recipe.base_time
                );
            }
        }

        Commands::ListBuildings => {
            println!("{:<30} {:>10} {:>8}", "Building", "Energy", "Speed");
            println!("{}", "-".repeat(50));
            for building in catalog.buildings() {
                println!(
                    "{:<30} {:>10.0} {:>8.2}",
                    building.name, building.energy_usage, building.speed_coefficient
                );
            }
        }
    }

    Ok(())
}

/// Parse "name=rate" or "name@temp=rate" into an item target.
fn parse_target(spec: &str) -> Result<(Item, f64)> {
    let Some((item_part, rate_part)) = spec.rsplit_once('=') else {
        bail!("target '{}' is not of the form item=rate", spec);
    };
    let rate: f64 = rate_part
        .parse()
        .with_context(|| format!("bad rate in target '{}'", spec))?;
    let item = match item_part.rsplit_once('@') {
        Some((name, temp)) => {
            let temperature: i32 = temp
                .parse()
                .with_context(|| format!("bad temperature in target '{}'", spec))?;
            Item::at(name, temperature)
        }
        None => Item::new(item_part),
    };
    Ok((item, rate))
}

/// Parse "unit-name=max" caps, matching units by full display name or by
/// recipe variant name.
fn parse_caps(map: &ProductionMap, caps: &[String]) -> Result<Vec<(usize, f64)>> {
    let mut unit_caps = Vec::new();
    for spec in caps {
        let Some((name, cap_part)) = spec.rsplit_once('=') else {
            bail!("cap '{}' is not of the form unit=max", spec);
        };
        let cap: f64 = cap_part
            .parse()
            .with_context(|| format!("bad bound in cap '{}'", spec))?;
        let mut matched = false;
        for (id, unit) in map.units.iter().enumerate() {
            if unit.name() == name || unit.recipe_name == name {
                unit_caps.push((id, cap));
                matched = true;
            }
        }
        if !matched {
            bail!("cap '{}' matches no production unit", spec);
        }
    }
    Ok(unit_caps)
}
