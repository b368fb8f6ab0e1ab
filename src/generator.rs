//! Production unit generation: expanding (recipe, building) pairings into
//! concrete rate-normalized production options

use std::collections::{BTreeMap, BTreeSet};

use crate::availability::{BuildingSet, RecipeSet};
use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::{Building, IngredientKind, Item, Recipe};

/// Building identity for the hand-crafting fallback.
pub const CHARACTER: &str = "character";

/// Building identity for diagnostic orphan-item producers.
pub const MAGIC_BUILDING: &str = "magic-building";

/// Fixed penalty rate for hand crafting. Raw recipe amounts are multiplied
/// by this instead of being divided by base_time, so hand crafting is always
/// a last resort for the solver.
pub const HANDCRAFT_RATE: f64 = 0.001;

/// Index of a production unit within its map's arena. Per-unit constraints
/// and solver variables address units by this index; the `<recipe>-<n>`
/// display name is for humans only.
pub type UnitId = usize;

/// One concrete (recipe variant, building) pairing with fixed per-second
/// ingredient and product rates.
///
/// Units are logically immutable; `quantity` is only ever set when a solved
/// map is constructed, never on a shared instance.
#[derive(Debug, Clone)]
pub struct ProductionUnit {
    /// Recipe name, suffixed `-<n>` when the recipe expanded into several
    /// variants for one building.
    pub recipe_name: String,
    pub building_name: String,
    /// Consumption rates per second at quantity 1.
    pub ingredients: BTreeMap<Item, f64>,
    /// Production rates per second at quantity 1.
    pub products: BTreeMap<Item, f64>,
    /// Solved number of building instances running; 0 until optimized.
    pub quantity: f64,
}

impl ProductionUnit {
    /// Display name combining recipe variant and building.
    pub fn name(&self) -> String {
        format!("{}/{}", self.recipe_name, self.building_name)
    }

    /// Every item this unit touches, ingredients and products alike.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.ingredients.keys().chain(self.products.keys())
    }

    pub fn consumed_rate(&self, item: &Item) -> f64 {
        self.ingredients.get(item).copied().unwrap_or(0.0)
    }

    pub fn produced_rate(&self, item: &Item) -> f64 {
        self.products.get(item).copied().unwrap_or(0.0)
    }

    /// Products minus ingredients for the item, per second, at quantity 1.
    pub fn net_rate(&self, item: &Item) -> f64 {
        self.produced_rate(item) - self.consumed_rate(item)
    }
}

/// The flat ordered collection of all production units for a scenario.
#[derive(Debug, Clone, Default)]
pub struct ProductionMap {
    pub units: Vec<ProductionUnit>,
}

impl ProductionMap {
    /// Expand every (usable recipe, usable building) pair with matching
    /// category into zero or more production units, falling back to hand
    /// crafting for recipes no building can run.
    pub fn generate(
        available: &RecipeSet,
        buildings: &BuildingSet,
        catalog: &Catalog,
    ) -> Result<ProductionMap> {
        let mut units = Vec::new();
        for recipe in available.iter() {
            let before = units.len();
            for building in buildings
                .iter()
                .filter(|b| b.crafting_categories.contains(&recipe.category))
            {
                expand_pair(recipe, building, available, catalog, &mut units)?;
            }
            if units.len() == before && recipe.handcraftable() {
                units.push(handcraft_unit(recipe));
            }
        }
        Ok(ProductionMap { units })
    }

    pub fn unit(&self, id: UnitId) -> Option<&ProductionUnit> {
        self.units.get(id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The set of all items referenced by any unit.
    pub fn items(&self) -> BTreeSet<Item> {
        self.units
            .iter()
            .flat_map(|unit| unit.items())
            .cloned()
            .collect()
    }

    /// Apply a solved-quantity overlay, keeping only units with strictly
    /// positive quantity. Candidate units are cloned, never mutated.
    /// Overlay entries naming a unit outside this map are logged and skipped,
    /// so a stale id can never select the wrong unit.
    pub fn with_quantities(&self, overlay: &[(UnitId, f64)]) -> ProductionMap {
        let units = overlay
            .iter()
            .filter(|(id, quantity)| {
                if *id >= self.units.len() {
                    tracing::warn!("quantity overlay names unknown unit {}", id);
                    return false;
                }
                *quantity > 0.0
            })
            .map(|(id, quantity)| {
                let mut unit = self.units[*id].clone();
                unit.quantity = *quantity;
                unit
            })
            .collect();
        ProductionMap { units }
    }

    /// Add a rate-1 producer for every item nothing on the map produces.
    ///
    /// Purely a debugging aid to keep the solver's constraint graph
    /// connected while hunting infeasibility; never part of a real answer.
    pub fn add_diagnostic_units(&mut self) {
        let produced: BTreeSet<Item> = self
            .units
            .iter()
            .flat_map(|unit| unit.products.keys())
            .cloned()
            .collect();
        let orphans: Vec<Item> = self
            .items()
            .into_iter()
            .filter(|item| !produced.contains(item))
            .collect();
        for item in orphans {
            tracing::warn!("no producer for '{}', adding diagnostic unit", item);
            self.units.push(ProductionUnit {
                recipe_name: format!("magic-{}", item),
                building_name: MAGIC_BUILDING.to_string(),
                ingredients: BTreeMap::new(),
                products: BTreeMap::from([(item, 1.0)]),
                quantity: 0.0,
            });
        }
    }
}

/// Expand one category-matched (recipe, building) pair into concrete units.
///
/// Each ingredient contributes one slot of alternative (item, amount)
/// choices; fluid ingredients get one choice per produced temperature inside
/// their window. The building's power source contributes one more slot. The
/// Cartesian product over all slots yields the variants: a craft cannot mix
/// two temperatures, and fuel alternatives are exclusive.
fn expand_pair(
    recipe: &Recipe,
    building: &Building,
    available: &RecipeSet,
    catalog: &Catalog,
    out: &mut Vec<ProductionUnit>,
) -> Result<()> {
    if !(recipe.base_time.is_finite() && recipe.base_time > 0.0) {
        return Err(PlanError::MalformedPrototype {
            name: recipe.name.clone(),
            reason: format!("base_time {} is not a positive finite number", recipe.base_time),
        });
    }

    let mut slots: Vec<Vec<(Item, f64)>> = Vec::with_capacity(recipe.ingredients.len() + 1);
    for ingredient in &recipe.ingredients {
        match &ingredient.kind {
            IngredientKind::Solid => {
                slots.push(vec![(Item::new(&ingredient.name), ingredient.amount)]);
            }
            IngredientKind::Fluid {
                min_temperature,
                max_temperature,
            } => {
                let lo = min_temperature.unwrap_or(i32::MIN);
                let hi = max_temperature.unwrap_or(i32::MAX);
                slots.push(
                    available
                        .produced_temperatures(&ingredient.name)
                        .filter(|temp| lo <= *temp && *temp <= hi)
                        .map(|temp| (Item::at(&ingredient.name, temp), ingredient.amount))
                        .collect(),
                );
            }
        }
    }

    // Power draw is one more exclusive-choice slot, except its rates are
    // already absolute per-second draws and bypass time/speed scaling.
    let fuel = building.energy.fuel_options(building, available, catalog)?;
    let energy_slot = if building.energy.is_passive() {
        None
    } else {
        if fuel.is_empty() {
            // Nothing can power this building right now.
            return Ok(());
        }
        slots.push(fuel.into_iter().map(|f| (f.item, f.rate)).collect());
        Some(slots.len() - 1)
    };

    // A fluid ingredient nobody produces at an acceptable temperature kills
    // every variant of this pairing.
    if slots.iter().any(Vec::is_empty) {
        return Ok(());
    }

    let per_craft = building.speed_coefficient / recipe.base_time;

    let mut products: BTreeMap<Item, f64> = BTreeMap::new();
    for product in &recipe.products {
        let rate = product.expected_amount() * per_craft;
        if rate != 0.0 {
            *products.entry(product.item()).or_insert(0.0) += rate;
        }
    }

    // Cartesian product over the slots, rightmost slot varying fastest.
    let mut cursors = vec![0usize; slots.len()];
    let mut index = 0usize;
    loop {
        let mut ingredients: BTreeMap<Item, f64> = BTreeMap::new();
        for (slot_idx, slot) in slots.iter().enumerate() {
            let (item, amount) = &slot[cursors[slot_idx]];
            let rate = if energy_slot == Some(slot_idx) {
                *amount
            } else {
                amount * per_craft
            };
            *ingredients.entry(item.clone()).or_insert(0.0) += rate;
        }
        out.push(ProductionUnit {
            recipe_name: format!("{}-{}", recipe.name, index),
            building_name: building.name.clone(),
            ingredients,
            products: products.clone(),
            quantity: 0.0,
        });
        index += 1;

        let mut pos = slots.len();
        loop {
            if pos == 0 {
                return Ok(());
            }
            pos -= 1;
            cursors[pos] += 1;
            if cursors[pos] < slots[pos].len() {
                break;
            }
            cursors[pos] = 0;
        }
    }
}

/// Synthesize the hand-crafting fallback unit. Handcraftable recipes have
/// no fluids, so all items are temperature-free.
fn handcraft_unit(recipe: &Recipe) -> ProductionUnit {
    let mut ingredients: BTreeMap<Item, f64> = BTreeMap::new();
    for ingredient in &recipe.ingredients {
        *ingredients.entry(Item::new(&ingredient.name)).or_insert(0.0) +=
            ingredient.amount * HANDCRAFT_RATE;
    }
    let mut products: BTreeMap<Item, f64> = BTreeMap::new();
    for product in &recipe.products {
        let rate = product.expected_amount() * HANDCRAFT_RATE;
        if rate != 0.0 {
            *products.entry(Item::new(&product.name)).or_insert(0.0) += rate;
        }
    }
    ProductionUnit {
        recipe_name: recipe.name.clone(),
        building_name: CHARACTER.to_string(),
        ingredients,
        products,
        quantity: 0.0,
    }
}
