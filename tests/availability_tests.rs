//! Tests for recipe/building availability filtering.

use prodplan::availability::{BuildingSet, RecipeSet, TechnologySet};
use prodplan::catalog::Catalog;
use prodplan::energy::EnergySource;
use prodplan::models::{Building, Fluid, Ingredient, Product, Recipe, Solid, Technology};

fn solid(name: &str) -> Solid {
    Solid {
        name: name.to_string(),
        fuel_category: None,
        fuel_value: 0.0,
        place_result: None,
    }
}

fn recipe(name: &str, category: &str, from_start: bool) -> Recipe {
    Recipe {
        name: name.to_string(),
        category: category.to_string(),
        base_time: 1.0,
        available_from_start: from_start,
        hidden_from_player_crafting: false,
        ingredients: vec![],
        products: vec![],
    }
}

fn test_catalog() -> Catalog {
    let mut furnace_item = solid("furnace");
    furnace_item.place_result = Some("furnace".to_string());

    let furnace = Building {
        name: "furnace".to_string(),
        energy_usage: 10.0,
        speed_coefficient: 1.0,
        crafting_categories: vec!["smelting".to_string()],
        energy: EnergySource::Electricity,
    };

    let mut smelt = recipe("smelt-ore", "smelting", true);
    smelt.ingredients = vec![Ingredient::solid("iron-ore", 1.0)];
    smelt.products = vec![Product::solid("iron-plate", 1.0)];

    let mut make_furnace = recipe("make-furnace", "crafting", false);
    make_furnace.ingredients = vec![Ingredient::solid("stone", 5.0)];
    make_furnace.products = vec![Product::solid("furnace", 1.0)];

    let mut recycle = recipe("scrap-plates", "recycle-crafting", true);
    recycle.ingredients = vec![Ingredient::solid("iron-plate", 1.0)];
    recycle.products = vec![Product::solid("iron-ore", 1.0)];

    let metallurgy = Technology {
        name: "metallurgy".to_string(),
        unlocks: vec!["make-furnace".to_string()],
    };

    Catalog::new(
        vec![
            solid("iron-ore"),
            solid("iron-plate"),
            solid("stone"),
            furnace_item,
        ],
        vec![],
        vec![furnace],
        vec![smelt, make_furnace, recycle],
        vec![metallurgy],
    )
}

#[test]
fn test_from_start_recipes_are_available() {
    let catalog = test_catalog();
    let recipes = RecipeSet::from_catalog(&catalog, &TechnologySet::default());

    assert!(recipes.contains("smelt-ore"));
    assert!(!recipes.contains("make-furnace"));
}

#[test]
fn test_technology_unlocks_recipes() {
    let catalog = test_catalog();
    let tech = TechnologySet::from_names(&catalog, ["metallurgy"]);
    let recipes = RecipeSet::from_catalog(&catalog, &tech);

    assert!(recipes.contains("make-furnace"));
}

#[test]
fn test_recycling_category_is_excluded() {
    let catalog = test_catalog();
    let recipes = RecipeSet::from_catalog(&catalog, &TechnologySet::default());

    assert!(!recipes.contains("scrap-plates"));
}

#[test]
fn test_unknown_technology_is_skipped() {
    let catalog = test_catalog();
    let tech = TechnologySet::from_names(&catalog, ["not-a-tech"]);
    let recipes = RecipeSet::from_catalog(&catalog, &tech);

    assert!(!recipes.contains("make-furnace"));
}

#[test]
fn test_building_reachable_only_when_placing_item_is_producible() {
    let catalog = test_catalog();

    // Without metallurgy nothing produces the furnace item.
    let recipes = RecipeSet::from_catalog(&catalog, &TechnologySet::default());
    let buildings = BuildingSet::from_catalog(&catalog, &recipes);
    assert!(buildings.is_empty());

    let tech = TechnologySet::from_names(&catalog, ["metallurgy"]);
    let recipes = RecipeSet::from_catalog(&catalog, &tech);
    let buildings = BuildingSet::from_catalog(&catalog, &recipes);
    assert_eq!(
        buildings.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
        vec!["furnace"]
    );
}

#[test]
fn test_produced_temperatures_snapshot() {
    let mut boil_low = recipe("boil-low", "boiling", true);
    boil_low.ingredients = vec![Ingredient::fluid("water", 10.0, None, None)];
    boil_low.products = vec![Product::fluid("steam", 10.0, 100)];

    let mut boil_high = recipe("boil-high", "boiling", true);
    boil_high.ingredients = vec![Ingredient::fluid("water", 10.0, None, None)];
    boil_high.products = vec![Product::fluid("steam", 10.0, 150)];

    let water = Fluid {
        name: "water".to_string(),
        default_temperature: 15,
        fuel_value: 0.0,
        heat_capacity: 1000.0,
    };
    let steam = Fluid {
        name: "steam".to_string(),
        default_temperature: 15,
        fuel_value: 0.0,
        heat_capacity: 200.0,
    };

    let catalog = Catalog::new(
        vec![],
        vec![water, steam],
        vec![],
        vec![boil_low, boil_high],
        vec![],
    );
    let recipes = RecipeSet::from_catalog(&catalog, &TechnologySet::default());

    let temps: Vec<i32> = recipes.produced_temperatures("steam").collect();
    assert_eq!(temps, vec![100, 150]);
    assert_eq!(recipes.produced_temperatures("water").count(), 0);
}

#[test]
fn test_duplicate_prototype_names_keep_the_last() {
    let first = solid("iron-ore");
    let mut second = solid("iron-ore");
    second.fuel_value = 4.0;

    let catalog = Catalog::new(vec![first, second], vec![], vec![], vec![], vec![]);

    assert_eq!(catalog.items().count(), 1);
    assert_eq!(catalog.item("iron-ore").unwrap().fuel_value, 4.0);
}

#[test]
fn test_recipes_producing_index() {
    let catalog = test_catalog();
    let producers: Vec<&str> = catalog
        .recipes_producing("iron-plate")
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(producers, vec!["smelt-ore"]);
}
