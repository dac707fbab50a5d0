//! Exhaustive checks of the reified encodings.
//!
//! Each test builds a tiny model, enumerates every assignment inside the
//! variable bounds and checks that for every value of the inputs exactly the
//! expected derived value survives the constraints.

use std::time::Duration;

use crate::backend::{SolverBackend, SolverStatus};
use crate::expr::{LinearExpr, VarId};
use crate::model::Model;
use crate::pumpkin::PumpkinBackend;

/// Every assignment within bounds that satisfies all constraints.
fn feasible_assignments(model: &Model) -> Vec<Vec<i64>> {
    let vars = model.variables();
    let mut current: Vec<i64> = vars.iter().map(|v| v.lb).collect();
    let mut out = Vec::new();
    if vars.iter().any(|v| v.lb > v.ub) {
        return out;
    }
    loop {
        if model.violations(&current).is_empty() {
            out.push(current.clone());
        }
        let mut i = 0;
        loop {
            if i == vars.len() {
                return out;
            }
            if current[i] < vars[i].ub {
                current[i] += 1;
                break;
            }
            current[i] = vars[i].lb;
            i += 1;
        }
    }
}

/// Asserts that for every input value combination the derived variable has
/// exactly one feasible value, equal to `expected(inputs)`.
fn assert_exact(model: &Model, inputs: &[VarId], derived: VarId, expected: impl Fn(&[i64]) -> i64) {
    let assignments = feasible_assignments(model);

    let mut combos: Vec<Vec<i64>> = vec![vec![]];
    for &input in inputs {
        let v = model.variable(input);
        combos = combos
            .into_iter()
            .flat_map(|prefix| {
                (v.lb..=v.ub).map(move |x| {
                    let mut next = prefix.clone();
                    next.push(x);
                    next
                })
            })
            .collect();
    }

    for combo in combos {
        let matching: Vec<&Vec<i64>> = assignments
            .iter()
            .filter(|a| inputs.iter().zip(&combo).all(|(v, x)| a[v.index()] == *x))
            .collect();
        assert!(!matching.is_empty(), "no completion for inputs {:?}", combo);
        for assignment in matching {
            assert_eq!(
                assignment[derived.index()],
                expected(&combo),
                "inputs {:?}",
                combo
            );
        }
    }
}

#[test]
fn test_at_least_is_exact() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let b = model.new_bool("b");
    let c = model.new_bool("c");
    let expr = LinearExpr::sum([a, b, c]);
    let two = model.at_least(&expr, 2, "two");

    assert_exact(&model, &[a, b, c], two, |x| (x.iter().sum::<i64>() >= 2) as i64);
}

#[test]
fn test_at_least_outside_range_is_fixed() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let always = model.at_least(&LinearExpr::from(a), 0, "always");
    let never = model.at_least(&LinearExpr::from(a), 2, "never");

    assert_eq!(model.variable(always).lb, 1);
    assert_eq!(model.variable(never).ub, 0);
}

#[test]
fn test_presence_is_exact() {
    let mut model = Model::new();
    let a = model.new_int(0, 3, "a");
    let b = model.new_bool("b");
    let present = model.presence(&LinearExpr::sum([a, b]), "present");

    assert_exact(&model, &[a, b], present, |x| (x[0] + x[1] >= 1) as i64);
}

#[test]
fn test_equals_indicator_is_exact() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let b = model.new_bool("b");
    let c = model.new_bool("c");
    let single = model.equals_indicator(&LinearExpr::sum([a, b, c]), 1, "single");

    assert_exact(&model, &[a, b, c], single, |x| {
        (x.iter().sum::<i64>() == 1) as i64
    });
}

#[test]
fn test_max_zero_is_exact() {
    let mut model = Model::new();
    let a = model.new_int(0, 4, "a");
    let expr = LinearExpr::from(a) - 2;
    let excess = model.max_zero(&expr, "excess");

    assert_exact(&model, &[a], excess, |x| (x[0] - 2).max(0));
}

#[test]
fn test_max_zero_trivial_ranges() {
    let mut model = Model::new();
    let a = model.new_int(0, 2, "a");

    let never = model.max_zero(&(LinearExpr::from(a) - 5), "never");
    assert_eq!(model.variable(never).ub, 0);

    let shifted = model.max_zero(&(LinearExpr::from(a) + 1), "shifted");
    assert_exact(&model, &[a], shifted, |x| x[0] + 1);
}

#[test]
fn test_and_is_exact() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let b = model.new_bool("b");
    let both = model.and(a, b, "both");

    assert_exact(&model, &[a, b], both, |x| x[0] * x[1]);
}

#[test]
fn test_differs_is_exact() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let b = model.new_bool("b");
    let diff = model.differs(a, b, "diff");

    assert_exact(&model, &[a, b], diff, |x| (x[0] - x[1]).abs());
}

#[test]
fn test_pumpkin_minimizes_objective() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let b = model.new_bool("b");
    let c = model.new_bool("c");
    model.add_eq(LinearExpr::sum([a, b, c]), 2, "pick_two");
    model.add_objective_term(LinearExpr::from(a), 5);
    model.add_objective_term(LinearExpr::from(b), 1);
    model.add_objective_term(LinearExpr::from(c), 2);

    let outcome = PumpkinBackend::new()
        .solve(&model, Duration::from_secs(10))
        .unwrap();

    assert_eq!(outcome.status, SolverStatus::Optimal);
    let solution = outcome.solution.unwrap();
    assert_eq!(solution.values(), &[0, 1, 1]);
    assert_eq!(solution.evaluate(model.objective()), 3);
}

#[test]
fn test_pumpkin_reports_infeasible() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    let b = model.new_bool("b");
    model.add_ge(LinearExpr::sum([a, b]), 3, "impossible");

    let outcome = PumpkinBackend::new()
        .solve(&model, Duration::from_secs(10))
        .unwrap();

    assert_eq!(outcome.status, SolverStatus::Infeasible);
    assert!(outcome.solution.is_none());
}

#[test]
fn test_pumpkin_empty_domain_short_circuits() {
    let mut model = Model::new();
    let a = model.new_bool("a");
    model.fix(a, 0);
    model.fix(a, 1);

    let outcome = PumpkinBackend::new()
        .solve(&model, Duration::from_secs(1))
        .unwrap();
    assert_eq!(outcome.status, SolverStatus::Infeasible);
}

#[test]
fn test_pumpkin_respects_reified_penalty() {
    // Two lessons over three periods, penalize the excess over one lesson.
    let mut model = Model::new();
    let slots: Vec<VarId> = (0..3).map(|p| model.new_bool(format!("x{}", p))).collect();
    let load = LinearExpr::sum(slots.iter().copied());
    model.add_eq(load.clone(), 2, "load");
    let excess = model.max_zero(&(load - 1), "excess");
    model.add_objective_term(LinearExpr::from(excess), 7);
    model.add_objective_term(LinearExpr::from(slots[0]), -1);

    let outcome = PumpkinBackend::new()
        .solve(&model, Duration::from_secs(10))
        .unwrap();
    let solution = outcome.solution.unwrap();

    assert_eq!(solution.value(excess), 1);
    assert_eq!(solution.value(slots[0]), 1);
    assert_eq!(solution.evaluate(model.objective()), 6);
}
