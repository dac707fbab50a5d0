//! Decision variables and their lookup indices.
//!
//! One 0/1 variable exists per curriculum item and per `(day, period)` of its
//! class's day. Variables live in a flat arena, item-major then day-major,
//! so the lessons of an item on a day form one contiguous slice whose
//! position follows from the item's offset.

use std::collections::BTreeMap;
use std::ops::Range;

use lessonforge_core::{
    ClassId, CurriculumItem, Day, LessonKey, Period, Slot, SubjectId, TeacherId,
    TimetableProblem, DAYS_PER_WEEK,
};
use lessonforge_model::{Model, VarId};
use smallvec::SmallVec;
use tracing::debug;

/// Arena positions sharing one `(class | teacher, day, period)` cell.
///
/// A cell rarely holds more than a handful of candidate lessons.
pub type CellLessons = SmallVec<[usize; 4]>;

/// One decision variable and its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub key: LessonKey,
    pub var: VarId,
    /// Index into [`LessonGrid::items`].
    pub item: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItemLayout {
    offset: usize,
    periods: usize,
}

/// All decision variables of a solve, with the indices later stages use.
#[derive(Debug, Clone)]
pub struct LessonGrid {
    items: Vec<CurriculumItem>,
    layouts: Vec<ItemLayout>,
    lessons: Vec<Lesson>,
    class_periods: BTreeMap<ClassId, usize>,
    school_max_periods: usize,
    by_class_slot: BTreeMap<(ClassId, Slot), CellLessons>,
    by_teacher_slot: BTreeMap<(TeacherId, Slot), CellLessons>,
    by_triple: BTreeMap<(ClassId, TeacherId, SubjectId), usize>,
}

impl LessonGrid {
    /// Allocates the decision variables of `problem` in `model`.
    ///
    /// Items whose class is unknown are skipped; [`TimetableProblem::validate`]
    /// rejects them before this point.
    pub fn build(problem: &TimetableProblem, model: &mut Model) -> Self {
        let class_periods: BTreeMap<ClassId, usize> = problem
            .class_groups()
            .into_iter()
            .map(|group| {
                let periods = group.periods_per_day();
                (group.id, periods)
            })
            .collect();
        let school_max_periods = problem.school_max_periods_per_day();

        let items: Vec<CurriculumItem> = problem
            .aggregated_curriculum()
            .into_iter()
            .filter(|item| class_periods.contains_key(&item.class))
            .collect();

        let total: usize = items
            .iter()
            .map(|item| DAYS_PER_WEEK * class_periods[&item.class])
            .sum();

        let mut grid = LessonGrid {
            layouts: Vec::with_capacity(items.len()),
            lessons: Vec::with_capacity(total),
            class_periods,
            school_max_periods,
            by_class_slot: BTreeMap::new(),
            by_teacher_slot: BTreeMap::new(),
            by_triple: BTreeMap::new(),
            items: Vec::new(),
        };

        for (index, item) in items.iter().enumerate() {
            let periods = grid.class_periods[&item.class];
            grid.layouts.push(ItemLayout {
                offset: grid.lessons.len(),
                periods,
            });
            grid.by_triple.insert(
                (item.class.clone(), item.teacher.clone(), item.subject.clone()),
                index,
            );

            for day in Day::all() {
                for p in 0..periods {
                    let period = Period::new(p);
                    let slot = Slot::new(day, period);
                    let var = model.new_bool(format!(
                        "x[{}|{}|{}|{}|{}]",
                        item.class,
                        item.teacher,
                        item.subject,
                        day.index(),
                        p
                    ));
                    let position = grid.lessons.len();
                    grid.by_class_slot
                        .entry((item.class.clone(), slot))
                        .or_default()
                        .push(position);
                    grid.by_teacher_slot
                        .entry((item.teacher.clone(), slot))
                        .or_default()
                        .push(position);
                    grid.lessons.push(Lesson {
                        key: LessonKey::new(
                            item.class.clone(),
                            day,
                            period,
                            item.teacher.clone(),
                            item.subject.clone(),
                        ),
                        var,
                        item: index,
                    });
                }
            }
        }
        grid.items = items;

        debug!(
            event = "grid_built",
            items = grid.items.len(),
            lessons = grid.lessons.len(),
            school_max_periods = grid.school_max_periods,
        );

        grid
    }

    /// Curriculum items after merging duplicates.
    pub fn items(&self) -> &[CurriculumItem] {
        &self.items
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn school_max_periods(&self) -> usize {
        self.school_max_periods
    }

    /// Length of `class`'s day; zero for an unknown class.
    pub fn class_periods(&self, class: &ClassId) -> usize {
        self.class_periods.get(class).copied().unwrap_or(0)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassId> {
        self.class_periods.keys()
    }

    /// Teachers with at least one lesson variable, in identifier order.
    pub fn teachers(&self) -> Vec<&TeacherId> {
        let mut teachers: Vec<&TeacherId> = self.items.iter().map(|i| &i.teacher).collect();
        teachers.sort();
        teachers.dedup();
        teachers
    }

    /// Lessons of one item, day-major.
    pub fn item_lessons(&self, item: usize) -> &[Lesson] {
        &self.lessons[self.item_range(item)]
    }

    /// Lessons of one item on `day`, ordered by period.
    pub fn item_day_lessons(&self, item: usize, day: Day) -> &[Lesson] {
        let layout = self.layouts[item];
        let start = layout.offset + day.index() * layout.periods;
        &self.lessons[start..start + layout.periods]
    }

    /// Variable of `item` at `slot`, if the slot exists on the class's day.
    pub fn item_var(&self, item: usize, slot: Slot) -> Option<VarId> {
        let layout = self.layouts[item];
        let p = slot.period.index();
        (p < layout.periods)
            .then(|| self.lessons[layout.offset + slot.day.index() * layout.periods + p].var)
    }

    /// Index of the item for `(class, teacher, subject)`.
    pub fn item_index(
        &self,
        class: &ClassId,
        teacher: &TeacherId,
        subject: &SubjectId,
    ) -> Option<usize> {
        self.by_triple
            .get(&(class.clone(), teacher.clone(), subject.clone()))
            .copied()
    }

    /// Variables competing for one class cell.
    pub fn class_slot_vars(&self, class: &ClassId, slot: Slot) -> Vec<VarId> {
        self.cell_vars(self.by_class_slot.get(&(class.clone(), slot)))
    }

    /// Variables competing for one teacher cell.
    pub fn teacher_slot_vars(&self, teacher: &TeacherId, slot: Slot) -> Vec<VarId> {
        self.cell_vars(self.by_teacher_slot.get(&(teacher.clone(), slot)))
    }

    /// Every occupied class cell with its lessons.
    pub fn class_cells(&self) -> impl Iterator<Item = (&(ClassId, Slot), &CellLessons)> {
        self.by_class_slot.iter()
    }

    /// Every occupied teacher cell with its lessons.
    pub fn teacher_cells(&self) -> impl Iterator<Item = (&(TeacherId, Slot), &CellLessons)> {
        self.by_teacher_slot.iter()
    }

    /// Lessons set to 1 in `values`.
    pub fn assigned<'a>(&'a self, values: &'a [i64]) -> impl Iterator<Item = &'a Lesson> + 'a {
        self.lessons
            .iter()
            .filter(move |lesson| values[lesson.var.index()] == 1)
    }

    fn item_range(&self, item: usize) -> Range<usize> {
        let layout = self.layouts[item];
        layout.offset..layout.offset + DAYS_PER_WEEK * layout.periods
    }

    fn cell_vars(&self, cell: Option<&CellLessons>) -> Vec<VarId> {
        cell.map(|positions| positions.iter().map(|&i| self.lessons[i].var).collect())
            .unwrap_or_default()
    }
}
