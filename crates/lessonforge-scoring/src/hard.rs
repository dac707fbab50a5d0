//! Hard constraints.
//!
//! Every rule posts linear constraints or fixes variables on the model; none
//! of them is ever relaxed. An unsatisfiable combination is left for the
//! backend to report.

use std::collections::BTreeSet;

use lessonforge_config::TimetableConfig;
use lessonforge_core::{ClassId, Day, Period, Slot, TeacherId, TimetableProblem};
use lessonforge_model::{LinearExpr, Model, VarId};
use tracing::debug;

use crate::grid::LessonGrid;

/// Number of constraints (or fixed variables) each rule produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardConstraintCounts {
    pub class_exclusivity: usize,
    pub teacher_exclusivity: usize,
    pub exact_load: usize,
    pub blocked: usize,
    pub fixed_slots: usize,
    pub no_doubles: usize,
    pub no_triples: usize,
    pub daily_subject_cap: usize,
}

impl HardConstraintCounts {
    pub fn total(&self) -> usize {
        self.class_exclusivity
            + self.teacher_exclusivity
            + self.exact_load
            + self.blocked
            + self.fixed_slots
            + self.no_doubles
            + self.no_triples
            + self.daily_subject_cap
    }
}

/// Posts every hard rule for `grid` on `model`.
pub fn post_hard_constraints(
    model: &mut Model,
    grid: &LessonGrid,
    problem: &TimetableProblem,
    config: &TimetableConfig,
) -> HardConstraintCounts {
    let mut counts = HardConstraintCounts {
        class_exclusivity: class_exclusivity(model, grid),
        teacher_exclusivity: teacher_exclusivity(model, grid),
        exact_load: exact_load(model, grid),
        blocked: blocked_slots(model, grid, problem),
        fixed_slots: fixed_slot_groups(model, grid, problem),
        ..HardConstraintCounts::default()
    };

    let doubles = &config.double_periods;
    if !doubles.allowed {
        counts.no_doubles = no_double_periods(model, grid);
    } else if doubles.forbid_triples {
        counts.no_triples = daily_window_cap(model, grid, 3, 2, "no_triples");
    }
    if let Some(max) = config.max_daily_lessons_per_subject {
        counts.daily_subject_cap = daily_subject_cap(model, grid, max);
    }

    debug!(
        event = "hard_constraints_posted",
        class_exclusivity = counts.class_exclusivity,
        teacher_exclusivity = counts.teacher_exclusivity,
        exact_load = counts.exact_load,
        blocked = counts.blocked,
        fixed_slots = counts.fixed_slots,
        no_doubles = counts.no_doubles,
        no_triples = counts.no_triples,
        daily_subject_cap = counts.daily_subject_cap,
    );

    counts
}

/// At most one lesson per class cell.
fn class_exclusivity(model: &mut Model, grid: &LessonGrid) -> usize {
    let mut posted = 0;
    for (_, cell) in grid.class_cells() {
        if cell.len() > 1 {
            let vars = cell.iter().map(|&i| grid.lessons()[i].var);
            model.add_le(LinearExpr::sum(vars), 1, "class_exclusivity");
            posted += 1;
        }
    }
    posted
}

/// At most one lesson per teacher cell.
fn teacher_exclusivity(model: &mut Model, grid: &LessonGrid) -> usize {
    let mut posted = 0;
    for (_, cell) in grid.teacher_cells() {
        if cell.len() > 1 {
            let vars = cell.iter().map(|&i| grid.lessons()[i].var);
            model.add_le(LinearExpr::sum(vars), 1, "teacher_exclusivity");
            posted += 1;
        }
    }
    posted
}

/// Each item is taught exactly its weekly quantity.
fn exact_load(model: &mut Model, grid: &LessonGrid) -> usize {
    for (index, item) in grid.items().iter().enumerate() {
        let vars = grid.item_lessons(index).iter().map(|l| l.var);
        model.add_eq(LinearExpr::sum(vars), item.quantity as i64, "exact_load");
    }
    grid.items().len()
}

/// Nothing is taught in a teacher's blocked slots.
fn blocked_slots(model: &mut Model, grid: &LessonGrid, problem: &TimetableProblem) -> usize {
    let mut fixed = 0;
    for (teacher, blocks) in &problem.teacher_blocks {
        for &slot in blocks {
            for var in grid.teacher_slot_vars(teacher, slot) {
                model.fix(var, 0);
                fixed += 1;
            }
        }
    }
    fixed
}

/// Group subjects only at their reserved slots, and nothing else there for
/// the classes that take part.
fn fixed_slot_groups(model: &mut Model, grid: &LessonGrid, problem: &TimetableProblem) -> usize {
    let mut fixed = 0;
    for group in &problem.fixed_slot_groups {
        let mut participants: BTreeSet<&ClassId> = BTreeSet::new();

        for (index, item) in grid.items().iter().enumerate() {
            if !group.matches(item) {
                continue;
            }
            participants.insert(&item.class);
            for lesson in grid.item_lessons(index) {
                if !group.reserves(lesson.key.slot()) {
                    model.fix(lesson.var, 0);
                    fixed += 1;
                }
            }
        }

        for (index, item) in grid.items().iter().enumerate() {
            if group.matches(item) || !participants.contains(&item.class) {
                continue;
            }
            for &day in &group.days {
                if let Some(var) = grid.item_var(index, Slot::new(day, group.period)) {
                    model.fix(var, 0);
                    fixed += 1;
                }
            }
        }
    }
    fixed
}

/// A teacher never meets the same class in two consecutive periods.
fn no_double_periods(model: &mut Model, grid: &LessonGrid) -> usize {
    let mut pairs: BTreeSet<(&ClassId, &TeacherId)> = BTreeSet::new();
    for item in grid.items() {
        pairs.insert((&item.class, &item.teacher));
    }

    let mut posted = 0;
    for (class, teacher) in pairs {
        let items: Vec<usize> = grid
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| &item.class == class && &item.teacher == teacher)
            .map(|(index, _)| index)
            .collect();
        let periods = grid.class_periods(class);

        for day in Day::all() {
            for p in 0..periods.saturating_sub(1) {
                let mut vars: Vec<VarId> = Vec::with_capacity(items.len() * 2);
                for &index in &items {
                    for q in [p, p + 1] {
                        vars.extend(grid.item_var(index, Slot::new(day, Period::new(q))));
                    }
                }
                model.add_le(LinearExpr::sum(vars), 1, "no_doubles");
                posted += 1;
            }
        }
    }
    posted
}

/// Caps every `window`-period run of one item on one day at `max` lessons.
fn daily_window_cap(
    model: &mut Model,
    grid: &LessonGrid,
    window: usize,
    max: i64,
    tag: &'static str,
) -> usize {
    let mut posted = 0;
    for (index, item) in grid.items().iter().enumerate() {
        if (item.quantity as i64) <= max {
            continue;
        }
        for day in Day::all() {
            let lessons = grid.item_day_lessons(index, day);
            for run in lessons.windows(window) {
                model.add_le(LinearExpr::sum(run.iter().map(|l| l.var)), max, tag);
                posted += 1;
            }
        }
    }
    posted
}

/// At most `max` lessons of one item per day.
fn daily_subject_cap(model: &mut Model, grid: &LessonGrid, max: u32) -> usize {
    let mut posted = 0;
    for (index, item) in grid.items().iter().enumerate() {
        if item.quantity <= max {
            continue;
        }
        for day in Day::all() {
            let vars = grid.item_day_lessons(index, day).iter().map(|l| l.var);
            model.add_le(LinearExpr::sum(vars), max as i64, "daily_subject_cap");
            posted += 1;
        }
    }
    posted
}
