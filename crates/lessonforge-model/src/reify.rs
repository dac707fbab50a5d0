//! Exact linear encodings of derived quantities.
//!
//! Every helper returns a fresh variable whose value is fully determined by
//! its inputs in any feasible assignment. Penalty terms read these values
//! back after the solve, so one-sided encodings that are only tight at the
//! optimum are not good enough.

use crate::expr::{LinearExpr, VarId};
use crate::model::Model;

impl Model {
    /// Returns `b` with `b == 1` iff `expr >= k`.
    ///
    /// Bounds of `expr` come from the variable domains.
    pub fn at_least(&mut self, expr: &LinearExpr, k: i64, name: impl Into<String>) -> VarId {
        let (lo, hi) = self.bounds(expr);
        let b = self.new_bool(name);
        if k <= lo {
            self.fix(b, 1);
            return b;
        }
        if k > hi {
            self.fix(b, 0);
            return b;
        }
        // b = 1  =>  expr >= k
        self.add_ge(expr.clone() - LinearExpr::term(b, k - lo), lo, "reify_at_least");
        // b = 0  =>  expr <= k - 1
        self.add_le(
            expr.clone() - LinearExpr::term(b, hi - k + 1),
            k - 1,
            "reify_at_least",
        );
        b
    }

    /// Returns `b` with `b == 1` iff `expr >= 1`.
    pub fn presence(&mut self, expr: &LinearExpr, name: impl Into<String>) -> VarId {
        self.at_least(expr, 1, name)
    }

    /// Returns `b` with `b == 1` iff `expr == k`.
    pub fn equals_indicator(
        &mut self,
        expr: &LinearExpr,
        k: i64,
        name: impl Into<String>,
    ) -> VarId {
        let name = name.into();
        let reached = self.at_least(expr, k, format!("{}_ge", name));
        let passed = self.at_least(expr, k + 1, format!("{}_gt", name));
        let b = self.new_bool(name);
        // b = reached - passed
        self.add_eq(
            LinearExpr::from(b) - reached + passed,
            0,
            "reify_equals",
        );
        b
    }

    /// Returns `y == max(0, expr)`.
    pub fn max_zero(&mut self, expr: &LinearExpr, name: impl Into<String>) -> VarId {
        let name = name.into();
        let (lo, hi) = self.bounds(expr);
        if hi <= 0 {
            return self.new_constant(0, name);
        }
        if lo >= 0 {
            let y = self.new_int(lo, hi, name);
            self.add_eq(LinearExpr::from(y) - expr.clone(), 0, "max_zero");
            return y;
        }
        let positive = self.at_least(expr, 1, format!("{}_pos", name));
        let y = self.new_int(0, hi, name);
        // y >= expr
        self.add_ge(LinearExpr::from(y) - expr.clone(), 0, "max_zero");
        // positive = 1  =>  y <= expr
        self.add_le(
            LinearExpr::from(y) - expr.clone() - LinearExpr::term(positive, lo),
            -lo,
            "max_zero",
        );
        // positive = 0  =>  y <= 0
        self.add_le(
            LinearExpr::from(y) - LinearExpr::term(positive, hi),
            0,
            "max_zero",
        );
        y
    }

    /// Returns `g == a AND b` for 0/1 variables.
    pub fn and(&mut self, a: VarId, b: VarId, name: impl Into<String>) -> VarId {
        let g = self.new_bool(name);
        self.add_le(LinearExpr::from(g) - a, 0, "and");
        self.add_le(LinearExpr::from(g) - b, 0, "and");
        self.add_ge(LinearExpr::from(g) - a - b, -1, "and");
        g
    }

    /// Returns `d == |a - b|` for 0/1 variables.
    pub fn differs(&mut self, a: VarId, b: VarId, name: impl Into<String>) -> VarId {
        let d = self.new_bool(name);
        self.add_ge(LinearExpr::from(d) - a + b, 0, "differs");
        self.add_ge(LinearExpr::from(d) - b + a, 0, "differs");
        self.add_le(LinearExpr::from(d) - a - b, 0, "differs");
        self.add_le(LinearExpr::from(d) + a + b, 2, "differs");
        d
    }
}
