//! The model container.
//!
//! A [`Model`] owns its variables, constraints and objective. It is built
//! fresh for every solve and never shared between solves.

use std::fmt;

use crate::expr::{LinearExpr, VarId};

/// A bounded integer variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub lb: i64,
    pub ub: i64,
}

impl Variable {
    pub fn is_fixed(&self) -> bool {
        self.lb == self.ub
    }
}

/// Comparison of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::LessOrEqual => "<=",
            Relation::GreaterOrEqual => ">=",
            Relation::Equal => "==",
        })
    }
}

/// `expr relation rhs`, with the expression's constant folded into `rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: i64,
    /// Short label naming the rule that produced the constraint.
    pub tag: &'static str,
}

impl LinearConstraint {
    /// Whether `values` satisfy the constraint.
    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::LessOrEqual => lhs <= self.rhs,
            Relation::GreaterOrEqual => lhs >= self.rhs,
            Relation::Equal => lhs == self.rhs,
        }
    }
}

/// Size of a model, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub variables: usize,
    pub fixed_variables: usize,
    pub constraints: usize,
    pub objective_terms: usize,
}

/// Integer linear model: variables, constraints and a minimization objective.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
    /// Set when a bound tightening emptied a domain.
    empty_domain: bool,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a 0/1 variable.
    pub fn new_bool(&mut self, name: impl Into<String>) -> VarId {
        self.new_int(0, 1, name)
    }

    /// Adds an integer variable with domain `[lb, ub]`.
    pub fn new_int(&mut self, lb: i64, ub: i64, name: impl Into<String>) -> VarId {
        let id = VarId::new(self.variables.len());
        if lb > ub {
            self.empty_domain = true;
        }
        self.variables.push(Variable {
            name: name.into(),
            lb,
            ub,
        });
        id
    }

    /// Adds a variable fixed to `value`.
    pub fn new_constant(&mut self, value: i64, name: impl Into<String>) -> VarId {
        self.new_int(value, value, name)
    }

    /// Pins `var` to `value` by tightening its bounds.
    pub fn fix(&mut self, var: VarId, value: i64) {
        let variable = &mut self.variables[var.index()];
        variable.lb = variable.lb.max(value);
        variable.ub = variable.ub.min(value);
        if variable.lb > variable.ub {
            self.empty_domain = true;
        }
    }

    pub fn add_le(&mut self, expr: LinearExpr, rhs: i64, tag: &'static str) {
        self.add_constraint(expr, Relation::LessOrEqual, rhs, tag);
    }

    pub fn add_ge(&mut self, expr: LinearExpr, rhs: i64, tag: &'static str) {
        self.add_constraint(expr, Relation::GreaterOrEqual, rhs, tag);
    }

    pub fn add_eq(&mut self, expr: LinearExpr, rhs: i64, tag: &'static str) {
        self.add_constraint(expr, Relation::Equal, rhs, tag);
    }

    /// Adds `expr relation rhs`. The expression is simplified and its
    /// constant moved to the right-hand side.
    pub fn add_constraint(
        &mut self,
        expr: LinearExpr,
        relation: Relation,
        rhs: i64,
        tag: &'static str,
    ) {
        let expr = expr.simplified();
        let rhs = rhs - expr.constant_part();
        let expr = LinearExpr::weighted_sum(expr.terms().iter().copied());
        self.constraints.push(LinearConstraint {
            expr,
            relation,
            rhs,
            tag,
        });
    }

    /// Adds `weight × expr` to the minimization objective.
    pub fn add_objective_term(&mut self, expr: LinearExpr, weight: i64) {
        if weight != 0 {
            self.objective += expr * weight;
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.index()]
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Whether some variable has an empty domain, making the model
    /// infeasible before any search.
    pub fn has_empty_domain(&self) -> bool {
        self.empty_domain
    }

    /// Smallest and largest value `expr` can take under the variable bounds.
    pub fn bounds(&self, expr: &LinearExpr) -> (i64, i64) {
        let mut lo = expr.constant_part();
        let mut hi = expr.constant_part();
        for &(var, c) in expr.terms() {
            let v = &self.variables[var.index()];
            if c >= 0 {
                lo += c * v.lb;
                hi += c * v.ub;
            } else {
                lo += c * v.ub;
                hi += c * v.lb;
            }
        }
        (lo, hi)
    }

    /// Checks every bound and constraint against `values`.
    ///
    /// Returns the tags of violated constraints; empty means feasible.
    pub fn violations(&self, values: &[i64]) -> Vec<&'static str> {
        let mut violated = Vec::new();
        for (variable, &value) in self.variables.iter().zip(values) {
            if value < variable.lb || value > variable.ub {
                violated.push("bounds");
            }
        }
        for constraint in &self.constraints {
            if !constraint.is_satisfied(values) {
                violated.push(constraint.tag);
            }
        }
        violated
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            variables: self.variables.len(),
            fixed_variables: self.variables.iter().filter(|v| v.is_fixed()).count(),
            constraints: self.constraints.len(),
            objective_terms: self.objective.simplified().terms().len(),
        }
    }
}
