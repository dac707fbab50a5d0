//! Variables and linear expressions.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Handle of a model variable.
///
/// Handles are dense indices into the owning [`Model`](crate::Model) and are
/// only meaningful for that model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(u32);

impl VarId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// `Σ coefficient × variable + constant`.
///
/// # Examples
///
/// ```
/// use lessonforge_model::{LinearExpr, Model};
///
/// let mut model = Model::new();
/// let a = model.new_bool("a");
/// let b = model.new_bool("b");
///
/// let expr = LinearExpr::sum([a, b]) * 3 - 1;
/// assert_eq!(expr.evaluate(&[1, 0]), 2);
/// assert_eq!(expr.terms().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(VarId, i64)>,
    constant: i64,
}

impl LinearExpr {
    /// The zero expression.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: i64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    pub fn term(var: VarId, coefficient: i64) -> Self {
        Self {
            terms: vec![(var, coefficient)],
            constant: 0,
        }
    }

    /// Sum of variables with unit coefficients.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1)).collect(),
            constant: 0,
        }
    }

    /// Sum of `coefficient × var` pairs.
    pub fn weighted_sum(terms: impl IntoIterator<Item = (VarId, i64)>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            constant: 0,
        }
    }

    pub fn add_term(&mut self, var: VarId, coefficient: i64) {
        self.terms.push((var, coefficient));
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn constant_part(&self) -> i64 {
        self.constant
    }

    /// True when the expression has no variable terms.
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|&(_, c)| c == 0)
    }

    /// Value of the expression under `values`, indexed by [`VarId::index`].
    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.terms
            .iter()
            .map(|&(v, c)| c * values[v.index()])
            .sum::<i64>()
            + self.constant
    }

    /// Merges repeated variables and drops zero coefficients.
    pub fn simplified(&self) -> Self {
        let mut terms: Vec<(VarId, i64)> = self.terms.clone();
        terms.sort_by_key(|&(v, _)| v);
        let mut merged: Vec<(VarId, i64)> = Vec::with_capacity(terms.len());
        for (var, coefficient) in terms {
            match merged.last_mut() {
                Some((last, c)) if *last == var => *c += coefficient,
                _ => merged.push((var, coefficient)),
            }
        }
        merged.retain(|&(_, c)| c != 0);
        Self {
            terms: merged,
            constant: self.constant,
        }
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        Self::term(var, 1)
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self += rhs;
        self
    }
}

impl AddAssign for LinearExpr {
    fn add_assign(&mut self, rhs: LinearExpr) {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
    }
}

impl Add<VarId> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: VarId) -> LinearExpr {
        self.add_term(rhs, 1);
        self
    }
}

impl Add<i64> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: i64) -> LinearExpr {
        self.constant += rhs;
        self
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: LinearExpr) -> LinearExpr {
        self + (-rhs)
    }
}

impl Sub<VarId> for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: VarId) -> LinearExpr {
        self.add_term(rhs, -1);
        self
    }
}

impl Sub<i64> for LinearExpr {
    type Output = LinearExpr;

    fn sub(mut self, rhs: i64) -> LinearExpr {
        self.constant -= rhs;
        self
    }
}

impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(mut self, rhs: i64) -> LinearExpr {
        for (_, c) in &mut self.terms {
            *c *= rhs;
        }
        self.constant *= rhs;
        self
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        self * -1
    }
}
