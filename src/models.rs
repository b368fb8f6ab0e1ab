//! Data models for catalog prototypes and balanced items

use crate::energy::EnergySource;

/// Name of the abstract item standing in for electric power.
pub const ELECTRICITY: &str = "electricity";

/// An item as the optimizer balances it: a name plus, for fluids carrying
/// a specific thermal state, a temperature.
///
/// Two items with the same name but different temperatures (or one with and
/// one without a temperature) are distinct entities for rate balancing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    pub name: String,
    pub temperature: Option<i32>,
}

impl Item {
    /// A plain item with no thermal state.
    pub fn new(name: &str) -> Item {
        Item {
            name: name.to_string(),
            temperature: None,
        }
    }

    /// A fluid pinned to a specific temperature.
    pub fn at(name: &str, temperature: i32) -> Item {
        Item {
            name: name.to_string(),
            temperature: Some(temperature),
        }
    }

    /// The abstract electricity item.
    pub fn electricity() -> Item {
        Item::new(ELECTRICITY)
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.temperature {
            Some(temp) => write!(f, "{}@{}", self.name, temp),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A solid object prototype.
#[derive(Debug, Clone)]
pub struct Solid {
    pub name: String,
    pub fuel_category: Option<String>,
    pub fuel_value: f64,
    /// Name of the building this item places when built, if any.
    pub place_result: Option<String>,
}

/// A fluid prototype.
#[derive(Debug, Clone)]
pub struct Fluid {
    pub name: String,
    pub default_temperature: i32,
    pub fuel_value: f64,
    /// Heat capacity in J/°C.
    pub heat_capacity: f64,
}

/// A production building prototype.
#[derive(Debug, Clone)]
pub struct Building {
    pub name: String,
    pub energy_usage: f64,
    /// Multiplier on craft rate.
    pub speed_coefficient: f64,
    pub crafting_categories: Vec<String>,
    pub energy: EnergySource,
}

#[derive(Debug, Clone)]
pub enum IngredientKind {
    Solid,
    Fluid {
        /// Acceptable temperature window; an unset bound is unbounded.
        min_temperature: Option<i32>,
        max_temperature: Option<i32>,
    },
}

/// A quantity of an object consumed by a recipe.
#[derive(Debug, Clone)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub kind: IngredientKind,
}

impl Ingredient {
    pub fn solid(name: &str, amount: f64) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount,
            kind: IngredientKind::Solid,
        }
    }

    pub fn fluid(
        name: &str,
        amount: f64,
        min_temperature: Option<i32>,
        max_temperature: Option<i32>,
    ) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount,
            kind: IngredientKind::Fluid {
                min_temperature,
                max_temperature,
            },
        }
    }

    pub fn is_fluid(&self) -> bool {
        matches!(self.kind, IngredientKind::Fluid { .. })
    }
}

#[derive(Debug, Clone)]
pub enum ProductKind {
    Solid,
    Fluid {
        /// Fixed output temperature.
        temperature: i32,
    },
}

/// A quantity of an object produced by a recipe, possibly probabilistic.
#[derive(Debug, Clone)]
pub struct Product {
    pub name: String,
    /// A fixed amount.
    pub amount: f64,
    /// The minimum amount the recipe can produce.
    pub min_amount: f64,
    /// The maximum amount the recipe can produce.
    pub max_amount: f64,
    /// The probability to get that object when the craft completes.
    pub probability: f64,
    pub kind: ProductKind,
}

impl Product {
    pub fn solid(name: &str, amount: f64) -> Product {
        Product {
            name: name.to_string(),
            amount,
            min_amount: 0.0,
            max_amount: 0.0,
            probability: 1.0,
            kind: ProductKind::Solid,
        }
    }

    pub fn fluid(name: &str, amount: f64, temperature: i32) -> Product {
        Product {
            name: name.to_string(),
            amount,
            min_amount: 0.0,
            max_amount: 0.0,
            probability: 1.0,
            kind: ProductKind::Fluid { temperature },
        }
    }

    pub fn is_fluid(&self) -> bool {
        matches!(self.kind, ProductKind::Fluid { .. })
    }

    /// Expected amount produced per craft.
    pub fn expected_amount(&self) -> f64 {
        (self.amount + self.max_amount - self.min_amount) * self.probability
    }

    /// The balanced item this product yields.
    pub fn item(&self) -> Item {
        match self.kind {
            ProductKind::Solid => Item::new(&self.name),
            ProductKind::Fluid { temperature } => Item::at(&self.name, temperature),
        }
    }
}

/// A recipe prototype.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: String,
    /// Crafting category tag; a building must list it to run the recipe.
    pub category: String,
    /// Seconds per craft at speed 1.0.
    pub base_time: f64,
    pub available_from_start: bool,
    pub hidden_from_player_crafting: bool,
    pub ingredients: Vec<Ingredient>,
    pub products: Vec<Product>,
}

impl Recipe {
    /// True if the character can make this recipe without a building:
    /// not hidden and no fluid on either side.
    pub fn handcraftable(&self) -> bool {
        !self.hidden_from_player_crafting
            && !self.ingredients.iter().any(Ingredient::is_fluid)
            && !self.products.iter().any(Product::is_fluid)
    }

    /// True if any product slot names the given object.
    pub fn produces(&self, name: &str) -> bool {
        self.products.iter().any(|p| p.name == name)
    }
}

/// A technology unlocking recipes, referenced by name.
#[derive(Debug, Clone)]
pub struct Technology {
    pub name: String,
    pub unlocks: Vec<String>,
}
