//! Cost ledger: estimation, actuals accumulation, and settlement.

use chrono::{DateTime, Utc};
use common::{DocumentNumber, UserId};

use crate::DomainError;
use crate::order::{ConfirmationKind, Money, Settlement, WorkOrder};

use super::{CostingRates, VarianceReport};

/// Computes cost figures for work orders at fixed valuation rates.
///
/// Actual costs are always recomputed in full from the order's source
/// documents (goods issues and confirmations), never accumulated
/// incrementally. The result is independent of posting order and calling
/// the ledger twice in a row changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostLedger {
    rates: CostingRates,
}

impl CostLedger {
    pub fn new(rates: CostingRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &CostingRates {
        &self.rates
    }

    /// Writes a fresh estimate into the order's cost summary, fully
    /// replacing the previous one.
    ///
    /// Material is the sum of component estimates; labor is planned hours
    /// at the internal rate; external starts at zero. Variances are
    /// derived on the summary, so they follow immediately.
    pub fn estimate(&self, order: &mut WorkOrder) -> Result<(), DomainError> {
        if order.is_terminal() {
            return Err(DomainError::OrderClosed);
        }

        let material: Money = order.components().map(|c| c.estimated_cost).sum();
        let labor: Money = order
            .operations()
            .map(|op| op.planned_hours.cost_at(self.rates.labor_rate))
            .sum();

        order.costs_mut().set_estimate(material, labor, Money::zero());
        Ok(())
    }

    /// Recomputes all actual costs from source documents.
    ///
    /// Material: every goods issue valued at its component's unit cost.
    /// Labor: internal confirmation hours at the internal rate. External:
    /// external confirmation hours at the external rate. Each component's
    /// own actual cost is refreshed from its issues as well.
    pub fn accumulate_actuals(&self, order: &mut WorkOrder) {
        let issued: Vec<(DocumentNumber, u32)> = order
            .goods_issues()
            .map(|gi| (gi.component.clone(), gi.quantity))
            .collect();

        let component_actuals: Vec<(DocumentNumber, Money)> = order
            .components()
            .map(|component| {
                let unit = component.unit_cost(self.rates.fallback_unit_cost);
                let cost: Money = issued
                    .iter()
                    .filter(|(number, _)| number == &component.number)
                    .map(|(_, quantity)| unit.multiply(*quantity))
                    .sum();
                (component.number.clone(), cost)
            })
            .collect();

        let material: Money = component_actuals.iter().map(|(_, cost)| *cost).sum();
        let labor: Money = order
            .confirmations()
            .filter(|c| c.kind == ConfirmationKind::Internal)
            .map(|c| c.actual_hours.cost_at(self.rates.labor_rate))
            .sum();
        let external: Money = order
            .confirmations()
            .filter(|c| c.kind == ConfirmationKind::External)
            .map(|c| c.actual_hours.cost_at(self.rates.external_rate))
            .sum();

        order.apply_component_actuals(component_actuals);
        order.costs_mut().set_actuals(material, labor, external);
    }

    /// Variance report from the order's current cost summary.
    pub fn variance(&self, order: &WorkOrder) -> VarianceReport {
        order.costs().variance_report()
    }

    /// Settles the order's actual costs to a cost center.
    ///
    /// Requires technical completion, a positive actual total, and no
    /// prior settlement. The settlement document id is deterministic per
    /// order, and the cost summary itself is left untouched.
    pub fn settle(
        &self,
        order: &mut WorkOrder,
        cost_center: impl Into<String>,
        settled_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<Settlement, DomainError> {
        if !order.is_terminal() {
            return Err(DomainError::NotTechnicallyComplete {
                status: order.status(),
            });
        }
        if let Some(existing) = order.settlement() {
            return Err(DomainError::AlreadySettled {
                document: existing.document.as_str().to_string(),
            });
        }
        if !order.costs().actual_total().is_positive() {
            return Err(DomainError::NoActualCosts);
        }

        let settlement = Settlement {
            document: DocumentNumber::settlement(order.id()),
            cost_center: cost_center.into(),
            amount: order.costs().actual_total(),
            settled_by,
            settled_at: now,
        };
        order.set_settlement(settlement.clone());
        Ok(settlement)
    }
}
