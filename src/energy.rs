//! Energy source resolution: how a building's power draw turns into
//! consumable ingredient candidates

use crate::availability::RecipeSet;
use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::{Building, Item};

/// How a building is fed power. The variant set is closed and exhaustively
/// known, so this is an enum rather than an open trait.
#[derive(Debug, Clone)]
pub enum EnergySource {
    /// Draws from the abstract electricity item.
    Electricity,
    /// Burns solid fuel from the listed categories.
    Burner {
        effectivity: f64,
        fuel_categories: Vec<String>,
    },
    /// Consumes a fluid, either burning it for its fuel value or
    /// exchanging heat from its temperature.
    FluidEnergy {
        effectivity: f64,
        burns_fluid: bool,
        /// Lowest temperature at which heat exchange is useful. Ignored
        /// when `burns_fluid` is set.
        min_useful_temperature: i32,
    },
    /// Fed by a heat network. No consumable ingredient.
    Heat,
    /// Needs no power at all.
    Void,
}

/// One candidate power ingredient for a building.
///
/// Candidates returned together are mutually exclusive alternatives, never
/// summed. The rate is an absolute per-building-second draw, independent of
/// craft throughput.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelOption {
    pub item: Item,
    pub rate: f64,
}

impl EnergySource {
    /// True for sources that never contribute a consumable ingredient.
    /// A passive source means "no energy slot", not "an empty slot".
    pub fn is_passive(&self) -> bool {
        matches!(self, EnergySource::Heat | EnergySource::Void)
    }

    /// Candidate power ingredients for `building` under the given recipe
    /// availability snapshot.
    ///
    /// An empty list from a non-passive source means the building cannot
    /// currently be powered; the generator handles that by not
    /// instantiating the pairing.
    pub fn fuel_options(
        &self,
        building: &Building,
        available: &RecipeSet,
        catalog: &Catalog,
    ) -> Result<Vec<FuelOption>> {
        match self {
            EnergySource::Electricity => Ok(vec![FuelOption {
                item: Item::electricity(),
                rate: building.energy_usage,
            }]),

            EnergySource::Burner {
                effectivity,
                fuel_categories,
            } => {
                let mut options = Vec::new();
                for item in catalog.items() {
                    let matches_category = item
                        .fuel_category
                        .as_ref()
                        .is_some_and(|cat| fuel_categories.contains(cat));
                    if !matches_category || item.fuel_value <= 0.0 {
                        continue;
                    }
                    options.push(FuelOption {
                        item: Item::new(&item.name),
                        rate: fuel_rate(
                            &building.name,
                            building.energy_usage,
                            item.fuel_value * effectivity,
                        )?,
                    });
                }
                Ok(options)
            }

            EnergySource::FluidEnergy {
                effectivity,
                burns_fluid: true,
                ..
            } => {
                let mut options = Vec::new();
                for fluid in catalog.fluids() {
                    if fluid.fuel_value <= 0.0 {
                        continue;
                    }
                    options.push(FuelOption {
                        item: Item::at(&fluid.name, fluid.default_temperature),
                        rate: fuel_rate(
                            &building.name,
                            building.energy_usage,
                            fluid.fuel_value * effectivity,
                        )?,
                    });
                }
                Ok(options)
            }

            EnergySource::FluidEnergy {
                effectivity,
                burns_fluid: false,
                min_useful_temperature,
            } => {
                // Valid temperatures are whatever the available recipes
                // actually produce, not what the fluid could nominally hold.
                let mut options = Vec::new();
                for fluid in catalog.fluids() {
                    for temperature in available.produced_temperatures(&fluid.name) {
                        if temperature < *min_useful_temperature {
                            continue;
                        }
                        options.push(FuelOption {
                            item: Item::at(&fluid.name, temperature),
                            rate: fuel_rate(
                                &building.name,
                                building.energy_usage,
                                f64::from(temperature) * fluid.heat_capacity * effectivity,
                            )?,
                        });
                    }
                }
                Ok(options)
            }

            EnergySource::Heat | EnergySource::Void => Ok(Vec::new()),
        }
    }
}

/// Guarded division for power draw; a non-positive or non-finite divisor
/// must never reach the linear program.
fn fuel_rate(building_name: &str, energy_usage: f64, divisor: f64) -> Result<f64> {
    if !(divisor.is_finite() && divisor > 0.0) {
        return Err(PlanError::MalformedPrototype {
            name: building_name.to_string(),
            reason: format!("fuel divisor {} is not a positive finite number", divisor),
        });
    }
    Ok(energy_usage / divisor)
}
