//! prodplan: optimal factory layout planner
//!
//! Given a catalog of recipes, buildings and technologies plus a set of
//! target output rates, computes how many of each (recipe, building)
//! pairing must run to satisfy the targets with the fewest total buildings.
//!
//! Pipeline: catalog -> availability filter -> production unit generation
//! -> linear-program formulation -> SCIP solve -> reduced solved map.

pub mod availability;
pub mod catalog;
pub mod data;
pub mod energy;
pub mod error;
pub mod generator;
pub mod models;
pub mod optimizer;
pub mod report;

pub use error::{PlanError, Result};
pub use generator::{ProductionMap, ProductionUnit, UnitId};
pub use models::Item;
pub use optimizer::Optimizer;
