//! JSON catalog loading
//!
//! One flat file holds every prototype kind. Dangling cross-references are
//! logged and the offending entry skipped; loading never fails on them.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::energy::EnergySource;
use crate::models::{
    Building, Fluid, Ingredient, Product, ProductKind, Recipe, Solid, Technology,
};

fn default_probability() -> f64 {
    1.0
}

fn default_effectivity() -> f64 {
    1.0
}

fn default_speed() -> f64 {
    1.0
}

fn default_heat_capacity() -> f64 {
    1000.0
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<ItemEntry>,
    #[serde(default)]
    fluids: Vec<FluidEntry>,
    #[serde(default)]
    buildings: Vec<BuildingEntry>,
    #[serde(default)]
    recipes: Vec<RecipeEntry>,
    #[serde(default)]
    technologies: Vec<TechnologyEntry>,
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    name: String,
    #[serde(default)]
    fuel_category: Option<String>,
    #[serde(default)]
    fuel_value: f64,
    #[serde(default)]
    place_result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FluidEntry {
    name: String,
    #[serde(default)]
    default_temperature: i32,
    #[serde(default)]
    fuel_value: f64,
    #[serde(default = "default_heat_capacity")]
    heat_capacity: f64,
}

#[derive(Debug, Deserialize)]
struct BuildingEntry {
    name: String,
    #[serde(default)]
    energy_usage: f64,
    #[serde(default = "default_speed")]
    speed_coefficient: f64,
    crafting_categories: Vec<String>,
    energy: EnergyEntry,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EnergyEntry {
    Electricity,
    Burner {
        #[serde(default = "default_effectivity")]
        effectivity: f64,
        fuel_categories: Vec<String>,
    },
    Fluid {
        #[serde(default = "default_effectivity")]
        effectivity: f64,
        #[serde(default)]
        burns_fluid: bool,
        #[serde(default)]
        min_useful_temperature: i32,
    },
    Heat,
    Void,
}

impl From<EnergyEntry> for EnergySource {
    fn from(entry: EnergyEntry) -> EnergySource {
        match entry {
            EnergyEntry::Electricity => EnergySource::Electricity,
            EnergyEntry::Burner {
                effectivity,
                fuel_categories,
            } => EnergySource::Burner {
                effectivity,
                fuel_categories,
            },
            EnergyEntry::Fluid {
                effectivity,
                burns_fluid,
                min_useful_temperature,
            } => EnergySource::FluidEnergy {
                effectivity,
                burns_fluid,
                min_useful_temperature,
            },
            EnergyEntry::Heat => EnergySource::Heat,
            EnergyEntry::Void => EnergySource::Void,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecipeEntry {
    name: String,
    category: String,
    base_time: f64,
    #[serde(default)]
    available_from_start: bool,
    #[serde(default)]
    hidden_from_player_crafting: bool,
    #[serde(default)]
    ingredients: Vec<IngredientEntry>,
    #[serde(default)]
    products: Vec<ProductEntry>,
}

#[derive(Debug, Deserialize)]
struct IngredientEntry {
    name: String,
    amount: f64,
    #[serde(default)]
    min_temperature: Option<i32>,
    #[serde(default)]
    max_temperature: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ProductEntry {
    name: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    min_amount: f64,
    #[serde(default)]
    max_amount: f64,
    #[serde(default = "default_probability")]
    probability: f64,
    /// Output temperature; defaults to the fluid's default temperature.
    #[serde(default)]
    temperature: Option<i32>,
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("failed to parse catalog {}", path.display()))
}

/// Parse a catalog from JSON text.
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let file: CatalogFile = serde_json::from_str(content)?;

    let fluid_names: BTreeSet<String> = file.fluids.iter().map(|f| f.name.clone()).collect();
    let item_names: BTreeSet<String> = file.items.iter().map(|i| i.name.clone()).collect();

    let items = file
        .items
        .into_iter()
        .map(|entry| Solid {
            name: entry.name,
            fuel_category: entry.fuel_category,
            fuel_value: entry.fuel_value,
            place_result: entry.place_result,
        })
        .collect();

    let fluids: Vec<Fluid> = file
        .fluids
        .into_iter()
        .map(|entry| Fluid {
            name: entry.name,
            default_temperature: entry.default_temperature,
            fuel_value: entry.fuel_value,
            heat_capacity: entry.heat_capacity,
        })
        .collect();

    let buildings = file
        .buildings
        .into_iter()
        .map(|entry| Building {
            name: entry.name,
            energy_usage: entry.energy_usage,
            speed_coefficient: entry.speed_coefficient,
            crafting_categories: entry.crafting_categories,
            energy: entry.energy.into(),
        })
        .collect();

    let mut recipes = Vec::new();
    'recipes: for entry in file.recipes {
        let mut ingredients = Vec::new();
        for ing in &entry.ingredients {
            if fluid_names.contains(&ing.name) {
                ingredients.push(Ingredient::fluid(
                    &ing.name,
                    ing.amount,
                    ing.min_temperature,
                    ing.max_temperature,
                ));
            } else if item_names.contains(&ing.name) {
                ingredients.push(Ingredient::solid(&ing.name, ing.amount));
            } else {
                tracing::warn!(
                    "recipe '{}' references unknown object '{}', skipping recipe",
                    entry.name,
                    ing.name
                );
                continue 'recipes;
            }
        }
        let mut products = Vec::new();
        for prod in &entry.products {
            let kind = if let Some(fluid) = fluids.iter().find(|f| f.name == prod.name) {
                ProductKind::Fluid {
                    temperature: prod.temperature.unwrap_or(fluid.default_temperature),
                }
            } else if item_names.contains(&prod.name) {
                ProductKind::Solid
            } else {
                tracing::warn!(
                    "recipe '{}' references unknown object '{}', skipping recipe",
                    entry.name,
                    prod.name
                );
                continue 'recipes;
            };
            products.push(Product {
                name: prod.name.clone(),
                amount: prod.amount,
                min_amount: prod.min_amount,
                max_amount: prod.max_amount,
                probability: prod.probability,
                kind,
            });
        }
        recipes.push(Recipe {
            name: entry.name,
            category: entry.category,
            base_time: entry.base_time,
            available_from_start: entry.available_from_start,
            hidden_from_player_crafting: entry.hidden_from_player_crafting,
            ingredients,
            products,
        });
    }

    let technologies = file
        .technologies
        .into_iter()
        .map(|entry| Technology {
            name: entry.name,
            unlocks: entry.unlocks,
        })
        .collect();

    Ok(Catalog::new(items, fluids, buildings, recipes, technologies))
}

#[derive(Debug, Deserialize)]
struct TechnologyEntry {
    name: String,
    #[serde(default)]
    unlocks: Vec<String>,
}
