//! Availability filtering: which recipes and buildings the current
//! technology state actually offers

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::catalog::Catalog;
use crate::models::{Building, ProductKind, Recipe};

/// Category prefix marking non-productive transformations. Recipes in these
/// categories would let the solver launder matter backwards, so they are
/// excluded outright.
const NON_PRODUCTIVE_PREFIX: &str = "recycle-";

/// A set of activated technologies reduced to the union of recipe names
/// they unlock.
#[derive(Debug, Default)]
pub struct TechnologySet {
    unlocked_recipes: HashSet<String>,
}

impl TechnologySet {
    /// Resolve technology names against the catalog. Unknown technologies
    /// and dangling recipe references are logged and skipped.
    pub fn from_names<'a, I>(catalog: &Catalog, names: I) -> TechnologySet
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut unlocked_recipes = HashSet::new();
        for name in names {
            let Some(tech) = catalog.technology(name) else {
                tracing::warn!("technology '{}' not in catalog, skipping", name);
                continue;
            };
            for recipe_name in &tech.unlocks {
                if catalog.recipe(recipe_name).is_none() {
                    tracing::warn!(
                        "technology '{}' unlocks unknown recipe '{}', skipping",
                        name,
                        recipe_name
                    );
                    continue;
                }
                unlocked_recipes.insert(recipe_name.clone());
            }
        }
        TechnologySet { unlocked_recipes }
    }

    pub fn unlocks(&self, recipe_name: &str) -> bool {
        self.unlocked_recipes.contains(recipe_name)
    }
}

/// The recipes usable under a given technology state, with a precomputed
/// snapshot of every temperature each fluid is produced at.
///
/// The snapshot is immutable: two concurrent scenarios built from different
/// technology states never observe each other.
#[derive(Debug)]
pub struct RecipeSet {
    recipes: Vec<Recipe>,
    names: HashSet<String>,
    product_temperatures: BTreeMap<String, BTreeSet<i32>>,
}

impl RecipeSet {
    /// Usable = available from game start, or unlocked by an activated
    /// technology, minus non-productive categories.
    pub fn from_catalog(catalog: &Catalog, technologies: &TechnologySet) -> RecipeSet {
        let recipes: Vec<Recipe> = catalog
            .recipes()
            .filter(|r| r.available_from_start || technologies.unlocks(&r.name))
            .filter(|r| !r.category.starts_with(NON_PRODUCTIVE_PREFIX))
            .cloned()
            .collect();

        let mut product_temperatures: BTreeMap<String, BTreeSet<i32>> = BTreeMap::new();
        for recipe in &recipes {
            for product in &recipe.products {
                if let ProductKind::Fluid { temperature } = product.kind {
                    product_temperatures
                        .entry(product.name.clone())
                        .or_default()
                        .insert(temperature);
                }
            }
        }

        let names = recipes.iter().map(|r| r.name.clone()).collect();
        RecipeSet {
            recipes,
            names,
            product_temperatures,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn contains(&self, recipe_name: &str) -> bool {
        self.names.contains(recipe_name)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Every temperature at which any usable recipe produces the named
    /// fluid, ascending.
    pub fn produced_temperatures(&self, fluid_name: &str) -> impl Iterator<Item = i32> + '_ {
        self.product_temperatures
            .get(fluid_name)
            .into_iter()
            .flatten()
            .copied()
    }
}

/// The buildings reachable under a given recipe availability state.
#[derive(Debug)]
pub struct BuildingSet {
    buildings: Vec<Building>,
}

impl BuildingSet {
    /// A building is reachable if some usable recipe produces the item that
    /// places it. Buildings nothing currently produces are silently left
    /// out; that is the expected state for tech not yet researched.
    pub fn from_catalog(catalog: &Catalog, available: &RecipeSet) -> BuildingSet {
        let buildings = catalog
            .buildings()
            .filter(|building| {
                catalog.items().any(|item| {
                    item.place_result.as_deref() == Some(building.name.as_str())
                        && catalog
                            .recipes_producing(&item.name)
                            .any(|recipe| available.contains(&recipe.name))
                })
            })
            .cloned()
            .collect();
        BuildingSet { buildings }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter()
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}
