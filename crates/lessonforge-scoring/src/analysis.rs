//! Penalty terms and the cost audit.
//!
//! Every soft constraint is recorded as a [`PenaltyTerm`] when it is added to
//! the objective. After a solve the [`PenaltyLedger`] evaluates each term
//! against the solution, so the audit always adds up to the objective value.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use lessonforge_core::PenaltyCategory;
use lessonforge_model::{LinearExpr, Model, Solution};
use serde::{Deserialize, Serialize};

/// One weighted objective contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyTerm {
    pub category: PenaltyCategory,
    pub description: String,
    /// Cost per unit of `expr`; negative for rewards.
    pub weight: i64,
    pub expr: LinearExpr,
}

impl PenaltyTerm {
    /// Realized value of the measured quantity.
    pub fn value(&self, solution: &Solution) -> i64 {
        solution.evaluate(&self.expr)
    }

    pub fn cost(&self, solution: &Solution) -> i64 {
        self.weight * self.value(solution)
    }
}

/// A triggered penalty (or reward) in a solved timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub category: PenaltyCategory,
    pub description: String,
    pub weight: i64,
    pub value: i64,
    /// `weight × value`.
    pub cost: i64,
}

/// Total cost and occurrences of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub occurrences: usize,
    pub cost: i64,
}

/// Orders entries by descending cost, then description.
pub fn audit_order(a: &AuditEntry, b: &AuditEntry) -> Ordering {
    b.cost
        .cmp(&a.cost)
        .then_with(|| a.description.cmp(&b.description))
}

/// Per-category totals of an audit.
pub fn summarize(audit: &[AuditEntry]) -> BTreeMap<PenaltyCategory, CategorySummary> {
    let mut summary: BTreeMap<PenaltyCategory, CategorySummary> = BTreeMap::new();
    for entry in audit {
        let slot = summary.entry(entry.category).or_default();
        slot.occurrences += 1;
        slot.cost += entry.cost;
    }
    summary
}

/// All penalty terms of one model.
#[derive(Debug, Clone, Default)]
pub struct PenaltyLedger {
    terms: Vec<PenaltyTerm>,
}

impl PenaltyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight × expr` to the model objective and records the term.
    ///
    /// Zero weights are dropped without touching the model.
    pub fn add(
        &mut self,
        model: &mut Model,
        category: PenaltyCategory,
        weight: i64,
        expr: LinearExpr,
        description: impl Into<String>,
    ) {
        if weight == 0 {
            return;
        }
        model.add_objective_term(expr.clone(), weight);
        self.terms.push(PenaltyTerm {
            category,
            description: description.into(),
            weight,
            expr,
        });
    }

    pub fn terms(&self) -> &[PenaltyTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of terms per category.
    pub fn counts(&self) -> BTreeMap<PenaltyCategory, usize> {
        let mut counts = BTreeMap::new();
        for term in &self.terms {
            *counts.entry(term.category).or_default() += 1;
        }
        counts
    }

    /// Sum of every term's cost under `solution`.
    pub fn total(&self, solution: &Solution) -> i64 {
        self.terms.iter().map(|t| t.cost(solution)).sum()
    }

    /// Terms with a non-zero cost, most expensive first.
    pub fn audit(&self, solution: &Solution) -> Vec<AuditEntry> {
        let mut entries: Vec<AuditEntry> = self
            .terms
            .iter()
            .filter_map(|term| {
                let value = term.value(solution);
                let cost = term.weight * value;
                (cost != 0).then(|| AuditEntry {
                    category: term.category,
                    description: term.description.clone(),
                    weight: term.weight,
                    value,
                    cost,
                })
            })
            .collect();
        entries.sort_by(audit_order);
        entries
    }
}
