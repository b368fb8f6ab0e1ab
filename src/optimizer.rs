//! Linear-program formulation and solving over a production map

use std::collections::BTreeMap;

use russcip::prelude::*;

use crate::error::{PlanError, Result};
use crate::generator::{ProductionMap, UnitId};
use crate::models::Item;

/// Solved values below this are solver floating-point noise, not real
/// building counts.
pub const QUANTITY_TOLERANCE: f64 = 1e-3;

/// Formulates the production map plus user constraints as a linear program,
/// solves it with SCIP, and extracts the reduced solved map.
///
/// One optimizer instance per scenario; nothing is shared across solves, so
/// several scenarios may reuse one immutable [`ProductionMap`].
pub struct Optimizer<'a> {
    production_map: &'a ProductionMap,
    item_targets: Vec<(Item, f64)>,
    unit_caps: Vec<(UnitId, f64)>,
}

impl<'a> Optimizer<'a> {
    /// `item_targets` are signed net-rate floors (production ≥ target);
    /// `unit_caps` are per-unit upper bounds on solved quantity, addressed
    /// by unit index.
    pub fn new(
        production_map: &'a ProductionMap,
        item_targets: Vec<(Item, f64)>,
        unit_caps: Vec<(UnitId, f64)>,
    ) -> Optimizer<'a> {
        Optimizer {
            production_map,
            item_targets,
            unit_caps,
        }
    }

    /// Build variables, constraints and objective, solve, and return the
    /// map of units with strictly positive solved quantity.
    ///
    /// Any non-optimal solver status is a hard failure; no partial result
    /// is ever returned.
    pub fn optimize(&self) -> Result<ProductionMap> {
        for (id, _) in &self.unit_caps {
            if *id >= self.production_map.len() {
                return Err(PlanError::UnknownUnit(*id));
            }
        }

        let mut model = Model::new()
            .hide_output()
            .include_default_plugins()
            .create_prob("production-plan")
            .set_obj_sense(ObjSense::Minimize);

        // One non-negative continuous variable per unit, each weighing 1 in
        // the objective: minimize the total number of building instances.
        let vars: Vec<_> = self
            .production_map
            .units
            .iter()
            .enumerate()
            .map(|(id, _)| {
                model.add_var(
                    0.0,
                    f64::INFINITY,
                    1.0,
                    &format!("u{}", id),
                    VarType::Continuous,
                )
            })
            .collect();

        // Group units by every item they touch.
        let mut units_by_item: BTreeMap<&Item, Vec<UnitId>> = BTreeMap::new();
        for (id, unit) in self.production_map.units.iter().enumerate() {
            for item in unit.items() {
                let ids = units_by_item.entry(item).or_default();
                if ids.last() != Some(&id) {
                    ids.push(id);
                }
            }
        }

        // An explicit target on an item nothing touches is a caller bug,
        // not something to paper over.
        let mut targets: BTreeMap<&Item, f64> = BTreeMap::new();
        for (item, target) in &self.item_targets {
            if !units_by_item.contains_key(item) {
                return Err(PlanError::UnknownItem(item.to_string()));
            }
            targets.insert(item, *target);
        }

        // One net-rate floor per item; items without an explicit target get
        // the baseline 0, i.e. the map may not run the item net negative.
        for (&item, unit_ids) in &units_by_item {
            let cons_vars: Vec<_> = unit_ids.iter().map(|id| vars[*id].clone()).collect();
            let coefs: Vec<f64> = unit_ids
                .iter()
                .map(|id| self.production_map.units[*id].net_rate(item))
                .collect();
            let target = targets.get(item).copied().unwrap_or(0.0);
            model.add_cons(
                cons_vars,
                &coefs,
                target,
                f64::INFINITY,
                &format!("item_{}", item),
            );
        }

        // Per-unit capacity bounds (e.g. a finite ore patch).
        for (id, cap) in &self.unit_caps {
            model.add_cons(
                vec![vars[*id].clone()],
                &[1.0],
                -f64::INFINITY,
                *cap,
                &format!("cap_u{}", id),
            );
        }

        let solved = model.solve();
        match solved.status() {
            Status::Optimal => {}
            status => {
                return Err(PlanError::SolutionNotFound {
                    status: format!("{:?}", status),
                });
            }
        }
        tracing::debug!(
            objective = solved.obj_val(),
            units = self.production_map.len(),
            "solver finished"
        );

        let sol = solved.best_sol().ok_or_else(|| PlanError::SolutionNotFound {
            status: "optimal status but no stored solution".to_string(),
        })?;
        let overlay: Vec<(UnitId, f64)> = vars
            .iter()
            .enumerate()
            .filter_map(|(id, var)| {
                let quantity = sol.val(var.clone());
                (quantity > QUANTITY_TOLERANCE).then_some((id, quantity))
            })
            .collect();
        Ok(self.production_map.with_quantities(&overlay))
    }
}
