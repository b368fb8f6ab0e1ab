//! Human-readable summaries and Graphviz export for production maps

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use crate::generator::ProductionMap;
use crate::models::Item;

/// Aggregated view of a solved production map.
#[derive(Debug)]
pub struct PlanSummary {
    /// Total building instances across all units.
    pub total_units: f64,
    /// (building name, summed quantity), name order.
    pub building_counts: Vec<(String, f64)>,
    /// (item, net rate across the whole map), item order.
    pub net_rates: Vec<(Item, f64)>,
}

/// Aggregate a solved map into per-building counts and per-item net rates.
pub fn summarize(map: &ProductionMap) -> PlanSummary {
    let mut building_counts: BTreeMap<String, f64> = BTreeMap::new();
    let mut net_rates: BTreeMap<Item, f64> = BTreeMap::new();

    for unit in &map.units {
        *building_counts.entry(unit.building_name.clone()).or_default() += unit.quantity;
        // Collect first: an item on both sides of a unit must be counted once.
        let touched: BTreeSet<&Item> = unit.items().collect();
        for item in touched {
            *net_rates.entry(item.clone()).or_default() += unit.quantity * unit.net_rate(item);
        }
    }

    PlanSummary {
        total_units: map.units.iter().map(|u| u.quantity).sum(),
        building_counts: building_counts.into_iter().collect(),
        net_rates: net_rates.into_iter().collect(),
    }
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Production Plan ===")?;
        writeln!(f, "Total units: {:.2}", self.total_units)?;
        writeln!(f)?;

        writeln!(f, "Buildings required:")?;
        for (name, count) in &self.building_counts {
            writeln!(f, "  {:.2}x {}", count, name)?;
        }
        writeln!(f)?;

        writeln!(f, "Net item rates (per second):")?;
        for (item, rate) in &self.net_rates {
            writeln!(f, "  {:<30} {:>12.3}", item.to_string(), rate)?;
        }

        Ok(())
    }
}

/// Format every unit of a map with its rates, one block per unit.
pub fn format_units(map: &ProductionMap) -> String {
    let mut output = String::new();
    for unit in &map.units {
        output.push_str(&format!("{:.3}x {}\n", unit.quantity, unit.name()));
        for (item, rate) in &unit.ingredients {
            output.push_str(&format!("  consumes {} @ {:.3}/s\n", item, rate * scale(unit.quantity)));
        }
        for (item, rate) in &unit.products {
            output.push_str(&format!("  produces {} @ {:.3}/s\n", item, rate * scale(unit.quantity)));
        }
    }
    output
}

// Candidate maps carry quantity 0; show their unit rates instead of zeros.
fn scale(quantity: f64) -> f64 {
    if quantity > 0.0 { quantity } else { 1.0 }
}

/// Write the map as a Graphviz digraph: box nodes for units, ellipse nodes
/// for items, edges labelled with per-second flows.
pub fn write_dot<W: Write>(map: &ProductionMap, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "digraph production {{")?;
    writeln!(writer, "  rankdir=LR;")?;

    for item in map.items() {
        writeln!(writer, "  \"{}\" [shape=ellipse];", item)?;
    }
    for (id, unit) in map.units.iter().enumerate() {
        writeln!(
            writer,
            "  \"u{}\" [shape=box, label=\"{}\\n{}\\nx{:.2}\"];",
            id, unit.recipe_name, unit.building_name, unit.quantity
        )?;
        for (item, rate) in &unit.ingredients {
            writeln!(
                writer,
                "  \"{}\" -> \"u{}\" [label=\"{:.3}\"];",
                item,
                id,
                rate * scale(unit.quantity)
            )?;
        }
        for (item, rate) in &unit.products {
            writeln!(
                writer,
                "  \"u{}\" -> \"{}\" [label=\"{:.3}\"];",
                id,
                item,
                rate * scale(unit.quantity)
            )?;
        }
    }

    writeln!(writer, "}}")?;
    Ok(())
}
