//! Tests for the JSON catalog adapter.

use prodplan::data::parse_catalog;
use prodplan::energy::EnergySource;
use prodplan::models::IngredientKind;

const CATALOG_JSON: &str = r#"{
    "items": [
        {"name": "iron-ore"},
        {"name": "iron-plate"},
        {"name": "coal", "fuel_category": "chemical", "fuel_value": 4.0},
        {"name": "furnace", "place_result": "furnace"}
    ],
    "fluids": [
        {"name": "water", "default_temperature": 15},
        {"name": "steam", "heat_capacity": 200.0}
    ],
    "buildings": [
        {
            "name": "furnace",
            "energy_usage": 10.0,
            "crafting_categories": ["smelting"],
            "energy": {"kind": "electricity"}
        },
        {
            "name": "boiler",
            "energy_usage": 100.0,
            "crafting_categories": ["boiling"],
            "energy": {"kind": "burner", "fuel_categories": ["chemical"]}
        }
    ],
    "recipes": [
        {
            "name": "smelt-ore",
            "category": "smelting",
            "base_time": 2.0,
            "available_from_start": true,
            "ingredients": [{"name": "iron-ore", "amount": 1.0}],
            "products": [{"name": "iron-plate", "amount": 1.0}]
        },
        {
            "name": "boil-water",
            "category": "boiling",
            "base_time": 1.0,
            "available_from_start": true,
            "ingredients": [{"name": "water", "amount": 10.0, "max_temperature": 50}],
            "products": [{"name": "steam", "amount": 10.0, "temperature": 165}]
        },
        {
            "name": "broken",
            "category": "smelting",
            "base_time": 1.0,
            "ingredients": [{"name": "no-such-object", "amount": 1.0}],
            "products": [{"name": "iron-plate", "amount": 1.0}]
        }
    ],
    "technologies": [
        {"name": "metallurgy", "unlocks": ["smelt-ore"]}
    ]
}"#;

#[test]
fn test_parse_catalog_prototypes() {
    let catalog = parse_catalog(CATALOG_JSON).unwrap();

    assert_eq!(catalog.items().count(), 4);
    assert_eq!(catalog.fluids().count(), 2);
    assert_eq!(catalog.item("coal").unwrap().fuel_value, 4.0);
    assert_eq!(catalog.fluid("steam").unwrap().heat_capacity, 200.0);
    // Unspecified heat capacity falls back to the default.
    assert_eq!(catalog.fluid("water").unwrap().heat_capacity, 1000.0);
    assert_eq!(catalog.technology("metallurgy").unwrap().unlocks, vec!["smelt-ore"]);
}

#[test]
fn test_parse_catalog_energy_kinds() {
    let catalog = parse_catalog(CATALOG_JSON).unwrap();

    assert!(matches!(
        catalog.building("furnace").unwrap().energy,
        EnergySource::Electricity
    ));
    match &catalog.building("boiler").unwrap().energy {
        EnergySource::Burner {
            effectivity,
            fuel_categories,
        } => {
            assert_eq!(*effectivity, 1.0);
            assert_eq!(fuel_categories, &vec!["chemical".to_string()]);
        }
        other => panic!("unexpected energy source {:?}", other),
    }
}

#[test]
fn test_ingredient_and_product_kinds_are_inferred() {
    let catalog = parse_catalog(CATALOG_JSON).unwrap();

    let smelt = catalog.recipe("smelt-ore").unwrap();
    assert!(matches!(smelt.ingredients[0].kind, IngredientKind::Solid));

    let boil = catalog.recipe("boil-water").unwrap();
    match boil.ingredients[0].kind {
        IngredientKind::Fluid {
            min_temperature,
            max_temperature,
        } => {
            assert_eq!(min_temperature, None);
            assert_eq!(max_temperature, Some(50));
        }
        _ => panic!("water should be a fluid ingredient"),
    }
    assert_eq!(boil.products[0].item().temperature, Some(165));
}

#[test]
fn test_dangling_reference_skips_recipe() {
    let catalog = parse_catalog(CATALOG_JSON).unwrap();

    assert!(catalog.recipe("broken").is_none());
    assert_eq!(catalog.recipes().count(), 2);
}

#[test]
fn test_empty_catalog_parses() {
    let catalog = parse_catalog("{}").unwrap();
    assert_eq!(catalog.recipes().count(), 0);
}
