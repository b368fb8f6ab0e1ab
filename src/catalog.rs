//! In-memory prototype catalog with name lookup and a reverse
//! "recipes producing X" index

use std::collections::BTreeMap;

use crate::models::{Building, Fluid, Recipe, Solid, Technology};

/// Read-only lookup tables for every prototype kind.
///
/// Iteration order is name order, so everything derived from a catalog walk
/// is deterministic.
#[derive(Debug, Default)]
pub struct Catalog {
    items: BTreeMap<String, Solid>,
    fluids: BTreeMap<String, Fluid>,
    buildings: BTreeMap<String, Building>,
    recipes: BTreeMap<String, Recipe>,
    technologies: BTreeMap<String, Technology>,
    /// Object name -> names of recipes with that object among their products.
    producers: BTreeMap<String, Vec<String>>,
}

/// Colliding names keep the last occurrence, with a warning, matching the
/// logged-and-skipped treatment of other malformed input.
fn index_by_name<T>(kind: &str, values: Vec<T>, name: fn(&T) -> &str) -> BTreeMap<String, T> {
    let mut map: BTreeMap<String, T> = BTreeMap::new();
    for value in values {
        let key = name(&value).to_string();
        if map.insert(key.clone(), value).is_some() {
            tracing::warn!("duplicate {} prototype '{}', keeping the last", kind, key);
        }
    }
    map
}

impl Catalog {
    pub fn new(
        items: Vec<Solid>,
        fluids: Vec<Fluid>,
        buildings: Vec<Building>,
        recipes: Vec<Recipe>,
        technologies: Vec<Technology>,
    ) -> Catalog {
        let mut producers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for recipe in &recipes {
            for product in &recipe.products {
                let entry = producers.entry(product.name.clone()).or_default();
                if !entry.contains(&recipe.name) {
                    entry.push(recipe.name.clone());
                }
            }
        }
        Catalog {
            items: index_by_name("item", items, |i| &i.name),
            fluids: index_by_name("fluid", fluids, |f| &f.name),
            buildings: index_by_name("building", buildings, |b| &b.name),
            recipes: index_by_name("recipe", recipes, |r| &r.name),
            technologies: index_by_name("technology", technologies, |t| &t.name),
            producers,
        }
    }

    pub fn item(&self, name: &str) -> Option<&Solid> {
        self.items.get(name)
    }

    pub fn fluid(&self, name: &str) -> Option<&Fluid> {
        self.fluids.get(name)
    }

    pub fn building(&self, name: &str) -> Option<&Building> {
        self.buildings.get(name)
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.get(name)
    }

    pub fn technology(&self, name: &str) -> Option<&Technology> {
        self.technologies.get(name)
    }

    pub fn items(&self) -> impl Iterator<Item = &Solid> {
        self.items.values()
    }

    pub fn fluids(&self) -> impl Iterator<Item = &Fluid> {
        self.fluids.values()
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn technologies(&self) -> impl Iterator<Item = &Technology> {
        self.technologies.values()
    }

    /// All recipes with the named object among their products.
    pub fn recipes_producing(&self, name: &str) -> impl Iterator<Item = &Recipe> {
        self.producers
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|recipe_name| self.recipes.get(recipe_name))
    }
}
