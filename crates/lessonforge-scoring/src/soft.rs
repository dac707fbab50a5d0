//! Soft constraints and the weighted objective.
//!
//! Teacher-day comfort terms (overload, single-lesson days, idle gaps),
//! double period rewards and synchronization disagreements are each measured
//! by an auxiliary variable that the hard model pins to its true value.
//! Weights come from [`TimetableConfig`].

use lessonforge_config::{SyncScope, TimetableConfig};
use lessonforge_core::{ClassId, Day, PenaltyCategory, Period, Slot, TeacherId, TimetableProblem};
use lessonforge_model::{LinearExpr, Model, VarId};
use tracing::{debug, trace};

use crate::analysis::PenaltyLedger;
use crate::grid::LessonGrid;

/// Adds every soft term to `model`'s objective.
///
/// Must run after the hard constraints so blocked variables are already
/// fixed and can be left out of the auxiliary encodings.
pub fn post_soft_constraints(
    model: &mut Model,
    grid: &LessonGrid,
    problem: &TimetableProblem,
    config: &TimetableConfig,
) -> PenaltyLedger {
    let mut ledger = PenaltyLedger::new();

    for teacher in grid.teachers() {
        let quota = problem
            .teacher(teacher, config.default_free_quota)
            .free_quota;
        for day in Day::all() {
            teacher_day_terms(model, &mut ledger, grid, config, teacher, day, quota);
        }
    }

    if config.double_periods.allowed {
        double_period_terms(model, &mut ledger, grid, config);
    }

    if !problem.sync_groups.is_empty() {
        sync_terms(model, &mut ledger, grid, problem, config);
    }

    for (category, count) in ledger.counts() {
        debug!(event = "soft_terms_posted", category = category.key(), count);
    }

    ledger
}

fn is_live(model: &Model, var: VarId) -> bool {
    model.variable(var).ub > 0
}

/// Overload, single lesson and idle gap terms of one teacher day.
fn teacher_day_terms(
    model: &mut Model,
    ledger: &mut PenaltyLedger,
    grid: &LessonGrid,
    config: &TimetableConfig,
    teacher: &TeacherId,
    day: Day,
    quota: u32,
) {
    // (period, worked) for every period the teacher could still teach
    let mut worked: Vec<(usize, VarId)> = Vec::new();
    for p in 0..grid.school_max_periods() {
        let slot = Slot::new(day, Period::new(p));
        let vars: Vec<VarId> = grid
            .teacher_slot_vars(teacher, slot)
            .into_iter()
            .filter(|&v| is_live(model, v))
            .collect();
        match vars.len() {
            0 => {}
            1 => worked.push((p, vars[0])),
            _ => {
                let w = model.new_bool(format!("worked[{}|{}|{}]", teacher, day.index(), p));
                model.add_eq(LinearExpr::from(w) - LinearExpr::sum(vars), 0, "worked");
                worked.push((p, w));
            }
        }
    }
    if worked.is_empty() {
        return;
    }

    let occupied = LinearExpr::sum(worked.iter().map(|&(_, w)| w));
    let threshold = config.daily_overload_threshold;

    let overload_weight = config.weight(PenaltyCategory::DailyOverload);
    if overload_weight != 0 && worked.len() > threshold as usize {
        let excess = model.max_zero(
            &(occupied.clone() - threshold as i64),
            format!("overload[{}|{}]", teacher, day.index()),
        );
        ledger.add(
            model,
            PenaltyCategory::DailyOverload,
            overload_weight,
            LinearExpr::from(excess),
            format!("{} on {}: lessons above {}", teacher, day, threshold),
        );
    }

    let single_weight = config.weight(PenaltyCategory::SingleLessonDay);
    if single_weight != 0 {
        let single = model.equals_indicator(
            &occupied,
            1,
            format!("single[{}|{}]", teacher, day.index()),
        );
        ledger.add(
            model,
            PenaltyCategory::SingleLessonDay,
            single_weight,
            LinearExpr::from(single),
            format!("{} on {}: single lesson", teacher, day),
        );
    }

    let gap_weight = config.weight(PenaltyCategory::IdleGap);
    let first = worked[0].0;
    let last = worked[worked.len() - 1].0;
    // the largest possible gap leaves only the two ends worked
    let widest_gap = (last - first + 1).saturating_sub(2);
    if gap_weight != 0 && widest_gap > quota as usize {
        let excess = idle_gap_excess(model, grid, &worked, &occupied, teacher, day, quota);
        ledger.add(
            model,
            PenaltyCategory::IdleGap,
            gap_weight,
            LinearExpr::from(excess),
            format!("{} on {}: idle periods above {}", teacher, day, quota),
        );
    }
}

/// Encodes `max(0, (last - first + 1 - occupied) - quota)` for one teacher
/// day.
///
/// `first` and `last` are pinned to the first and last worked period through
/// big-M rows with `M` equal to the school day length; when nothing is
/// worked the gap is forced to zero.
fn idle_gap_excess(
    model: &mut Model,
    grid: &LessonGrid,
    worked: &[(usize, VarId)],
    occupied: &LinearExpr,
    teacher: &TeacherId,
    day: Day,
    quota: u32,
) -> VarId {
    let periods = grid.school_max_periods() as i64;
    let big_m = periods;
    let name = |what: &str| format!("{}[{}|{}]", what, teacher, day.index());

    let first = model.new_int(0, periods - 1, name("first"));
    let last = model.new_int(0, periods - 1, name("last"));
    let has = model.presence(occupied, name("teaches"));

    for (i, &(a, w)) in worked.iter().enumerate() {
        let a = a as i64;
        let before = LinearExpr::sum(worked[..i].iter().map(|&(_, v)| v));
        let after = LinearExpr::sum(worked[i + 1..].iter().map(|&(_, v)| v));

        // w = 1  =>  first <= a
        model.add_le(LinearExpr::from(first) + LinearExpr::term(w, big_m), a + big_m, "gap_first");
        // nothing worked before a  =>  first >= a
        model.add_ge(LinearExpr::from(first) + before * big_m, a, "gap_first");
        // w = 1  =>  last >= a
        model.add_ge(LinearExpr::from(last) - LinearExpr::term(w, a), 0, "gap_last");
        // nothing worked after a  =>  last <= a
        model.add_le(LinearExpr::from(last) - after * big_m, a, "gap_last");
    }

    let span = LinearExpr::from(last) - first + 1 - occupied.clone();
    let gap = model.new_int(0, periods, name("gap"));
    // has = 1  =>  gap == span
    model.add_ge(
        LinearExpr::from(gap) - span.clone() - LinearExpr::term(has, big_m),
        -big_m,
        "gap",
    );
    model.add_le(
        LinearExpr::from(gap) - span + LinearExpr::term(has, big_m),
        big_m,
        "gap",
    );
    // has = 0  =>  gap == 0
    model.add_le(LinearExpr::from(gap) - LinearExpr::term(has, big_m), 0, "gap");

    trace!(event = "idle_gap_encoded", teacher = %teacher, day = %day, periods = worked.len());

    model.max_zero(&(LinearExpr::from(gap) - quota as i64), name("idle_excess"))
}

/// One term per adjacent pair of the same item on the same day.
fn double_period_terms(
    model: &mut Model,
    ledger: &mut PenaltyLedger,
    grid: &LessonGrid,
    config: &TimetableConfig,
) {
    let weight = config.weight(PenaltyCategory::DoublePeriod);
    if weight == 0 {
        return;
    }
    for (index, item) in grid.items().iter().enumerate() {
        if item.quantity < 2 {
            continue;
        }
        for day in Day::all() {
            for pair in grid.item_day_lessons(index, day).windows(2) {
                let (first, second) = (&pair[0], &pair[1]);
                if !is_live(model, first.var) || !is_live(model, second.var) {
                    continue;
                }
                let both = model.and(
                    first.var,
                    second.var,
                    format!(
                        "double[{}|{}|{}|{}|{}]",
                        item.class,
                        item.teacher,
                        item.subject,
                        day.index(),
                        first.key.period.index()
                    ),
                );
                ledger.add(
                    model,
                    PenaltyCategory::DoublePeriod,
                    weight,
                    LinearExpr::from(both),
                    format!(
                        "{} {} ({}) on {} {}-{}: double period",
                        item.class, item.subject, item.teacher, day, first.key.period, second.key.period
                    ),
                );
            }
        }
    }
}

/// Pairwise day disagreement between the members of each sync group.
fn sync_terms(
    model: &mut Model,
    ledger: &mut PenaltyLedger,
    grid: &LessonGrid,
    problem: &TimetableProblem,
    config: &TimetableConfig,
) {
    let weight = config.weight(PenaltyCategory::SyncDisagreement);
    if weight == 0 {
        return;
    }

    let scopes: Vec<Option<&ClassId>> = match config.sync_scope {
        SyncScope::PerClass => grid.classes().map(Some).collect(),
        SyncScope::School => vec![None],
    };

    for (group_index, group) in problem.sync_groups.iter().enumerate() {
        for &scope in &scopes {
            let members: Vec<(&String, Vec<usize>)> = group
                .members
                .iter()
                .map(|member| {
                    let items = grid
                        .items()
                        .iter()
                        .enumerate()
                        .filter(|(_, item)| {
                            item.in_group(member) && scope.map_or(true, |c| &item.class == c)
                        })
                        .map(|(index, _)| index)
                        .collect();
                    (member, items)
                })
                .collect();
            // only scopes that teach every member are judged
            if members.iter().any(|(_, items)| items.is_empty()) {
                continue;
            }

            let label = match scope {
                Some(class) => format!("{}|{}", group_index, class),
                None => format!("{}|school", group_index),
            };

            for day in Day::all() {
                let present: Vec<VarId> = members
                    .iter()
                    .map(|(member, items)| {
                        let vars = items.iter().flat_map(|&index| {
                            grid.item_day_lessons(index, day).iter().map(|l| l.var)
                        });
                        model.presence(
                            &LinearExpr::sum(vars),
                            format!("sync_present[{}|{}|{}]", label, member, day.index()),
                        )
                    })
                    .collect();

                for i in 0..members.len() {
                    for j in i + 1..members.len() {
                        let (a, b) = (members[i].0, members[j].0);
                        let differs = model.differs(
                            present[i],
                            present[j],
                            format!("sync_differs[{}|{}|{}|{}]", label, a, b, day.index()),
                        );
                        let description = match scope {
                            Some(class) => {
                                format!("{} on {}: {} and {} out of sync", class, day, a, b)
                            }
                            None => format!("School on {}: {} and {} out of sync", day, a, b),
                        };
                        ledger.add(
                            model,
                            PenaltyCategory::SyncDisagreement,
                            weight,
                            LinearExpr::from(differs),
                            description,
                        );
                    }
                }
            }
        }
    }
}
