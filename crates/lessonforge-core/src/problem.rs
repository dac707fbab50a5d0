//! The timetabling problem as supplied by the caller.
//!
//! A [`TimetableProblem`] holds already-normalized data: canonical teacher
//! names, curriculum items and blocked slots resolved to integer day/period
//! pairs. Everything downstream is rebuilt from it on each solve.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::calendar::{
    periods_per_day, Day, Period, Slot, DAYS_PER_WEEK, MAX_PERIODS_PER_DAY,
};
use crate::error::{Result, TimetableError};
use crate::ids::{ClassId, SubjectId, TeacherId};

/// Free periods a teacher tolerates per day when no quota is declared.
pub const DEFAULT_FREE_QUOTA: u32 = 2;

/// A student cohort with a fixed weekly lesson count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassGroup {
    pub id: ClassId,
    pub weekly_lessons: u32,
}

impl ClassGroup {
    pub fn new(id: ClassId, weekly_lessons: u32) -> Self {
        Self { id, weekly_lessons }
    }

    /// Length of this class's day.
    pub fn periods_per_day(&self) -> usize {
        periods_per_day(self.weekly_lessons)
    }

    /// Whether `slot` exists on this class's grid.
    pub fn has_slot(&self, slot: Slot) -> bool {
        slot.period.index() < self.periods_per_day()
    }
}

/// A teacher with their unavailability and free period quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: TeacherId,
    pub blocks: BTreeSet<Slot>,
    pub free_quota: u32,
}

impl Teacher {
    pub fn is_blocked(&self, slot: Slot) -> bool {
        self.blocks.contains(&slot)
    }
}

/// A required weekly lesson count for one `(teacher, subject, class)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurriculumItem {
    pub teacher: TeacherId,
    pub subject: SubjectId,
    pub class: ClassId,
    pub quantity: u32,
    /// Caller-supplied group tags used by synchronization and fixed-slot
    /// groups in addition to the subject name.
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl CurriculumItem {
    pub fn new(
        teacher: impl Into<TeacherId>,
        subject: impl Into<SubjectId>,
        class: impl Into<ClassId>,
        quantity: u32,
    ) -> Self {
        Self {
            teacher: teacher.into(),
            subject: subject.into(),
            class: class.into(),
            quantity,
            tags: BTreeSet::new(),
        }
    }

    /// Adds a group tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Whether this item is named by `group_member`, either as its subject or
    /// as one of its tags.
    pub fn in_group(&self, group_member: &str) -> bool {
        self.subject.as_str() == group_member || self.tags.contains(group_member)
    }

    fn key(&self) -> (ClassId, TeacherId, SubjectId) {
        (self.class.clone(), self.teacher.clone(), self.subject.clone())
    }
}

/// A school-wide reservation: the group's subjects may only be taught at
/// `period` on `days`, and nothing else may be taught there to the classes
/// that take part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedSlotGroup {
    pub subjects: BTreeSet<String>,
    pub days: BTreeSet<Day>,
    pub period: Period,
}

impl FixedSlotGroup {
    pub fn new<I, S>(subjects: I, days: impl IntoIterator<Item = Day>, period: Period) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subjects: subjects.into_iter().map(Into::into).collect(),
            days: days.into_iter().collect(),
            period,
        }
    }

    pub fn matches(&self, item: &CurriculumItem) -> bool {
        self.subjects.iter().any(|member| item.in_group(member))
    }

    pub fn reserves(&self, slot: Slot) -> bool {
        slot.period == self.period && self.days.contains(&slot.day)
    }
}

/// Subjects (or tags) that should be taught on the same days.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncGroup {
    pub members: BTreeSet<String>,
}

impl SyncGroup {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Complete input of one solve.
///
/// # Example
///
/// ```
/// use lessonforge_core::{CurriculumItem, Slot, TimetableProblem};
///
/// let problem = TimetableProblem::new()
///     .with_class("6A", 25)
///     .with_item(CurriculumItem::new("Ana", "Math", "6A", 5))
///     .with_item(CurriculumItem::new("Ana", "Math", "6A", 2))
///     .with_block("Ana", Slot::from_indices(0, 0).unwrap());
///
/// let items = problem.aggregated_curriculum();
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].quantity, 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimetableProblem {
    /// Weekly lesson count per class.
    pub classes: BTreeMap<ClassId, u32>,
    pub curriculum: Vec<CurriculumItem>,
    #[serde(default)]
    pub teacher_blocks: BTreeMap<TeacherId, BTreeSet<Slot>>,
    #[serde(default)]
    pub teacher_free_quota: BTreeMap<TeacherId, u32>,
    #[serde(default)]
    pub fixed_slot_groups: Vec<FixedSlotGroup>,
    #[serde(default)]
    pub sync_groups: Vec<SyncGroup>,
}

impl TimetableProblem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: impl Into<ClassId>, weekly_lessons: u32) -> Self {
        self.classes.insert(class.into(), weekly_lessons);
        self
    }

    pub fn with_item(mut self, item: CurriculumItem) -> Self {
        self.curriculum.push(item);
        self
    }

    pub fn with_block(mut self, teacher: impl Into<TeacherId>, slot: Slot) -> Self {
        self.teacher_blocks
            .entry(teacher.into())
            .or_default()
            .insert(slot);
        self
    }

    pub fn with_free_quota(mut self, teacher: impl Into<TeacherId>, quota: u32) -> Self {
        self.teacher_free_quota.insert(teacher.into(), quota);
        self
    }

    pub fn with_fixed_slot_group(mut self, group: FixedSlotGroup) -> Self {
        self.fixed_slot_groups.push(group);
        self
    }

    pub fn with_sync_group(mut self, group: SyncGroup) -> Self {
        self.sync_groups.push(group);
        self
    }

    /// Class groups in identifier order.
    pub fn class_groups(&self) -> Vec<ClassGroup> {
        self.classes
            .iter()
            .map(|(id, &weekly)| ClassGroup::new(id.clone(), weekly))
            .collect()
    }

    pub fn class_group(&self, id: &ClassId) -> Option<ClassGroup> {
        self.classes
            .get(id)
            .map(|&weekly| ClassGroup::new(id.clone(), weekly))
    }

    /// Longest day of any class; the length of the school's period axis.
    pub fn school_max_periods_per_day(&self) -> usize {
        self.classes
            .values()
            .map(|&weekly| periods_per_day(weekly))
            .max()
            .unwrap_or_else(|| periods_per_day(0))
    }

    /// Curriculum with duplicate `(teacher, subject, class)` rows merged.
    ///
    /// Quantities of duplicates are summed and their tags united. Items come
    /// back ordered by class, teacher, subject.
    pub fn aggregated_curriculum(&self) -> Vec<CurriculumItem> {
        let mut merged: BTreeMap<(ClassId, TeacherId, SubjectId), CurriculumItem> =
            BTreeMap::new();
        for item in &self.curriculum {
            merged
                .entry(item.key())
                .and_modify(|existing| {
                    existing.quantity += item.quantity;
                    existing.tags.extend(item.tags.iter().cloned());
                })
                .or_insert_with(|| item.clone());
        }
        merged.into_values().collect()
    }

    /// Teachers named by the curriculum, in identifier order.
    pub fn teacher_ids(&self) -> BTreeSet<TeacherId> {
        self.curriculum.iter().map(|i| i.teacher.clone()).collect()
    }

    /// Resolves a teacher's blocks and quota, using `default_quota` when the
    /// teacher has none declared.
    pub fn teacher(&self, id: &TeacherId, default_quota: u32) -> Teacher {
        Teacher {
            id: id.clone(),
            blocks: self.teacher_blocks.get(id).cloned().unwrap_or_default(),
            free_quota: self
                .teacher_free_quota
                .get(id)
                .copied()
                .unwrap_or(default_quota),
        }
    }

    /// Rejects input that cannot be turned into a model.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::InvalidInput`] naming the first offending
    /// entry.
    pub fn validate(&self) -> Result<()> {
        for (class, &weekly) in &self.classes {
            if class.as_str().trim().is_empty() {
                return Err(TimetableError::InvalidInput(
                    "class with an empty identifier".to_string(),
                ));
            }
            if periods_per_day(weekly) > MAX_PERIODS_PER_DAY {
                return Err(TimetableError::InvalidInput(format!(
                    "class '{}' has {} weekly lessons, more than {} periods a day",
                    class, weekly, MAX_PERIODS_PER_DAY
                )));
            }
        }

        for item in &self.curriculum {
            if item.teacher.as_str().trim().is_empty() {
                return Err(TimetableError::InvalidInput(format!(
                    "curriculum item '{}' for class '{}' has no teacher",
                    item.subject, item.class
                )));
            }
            if item.subject.as_str().trim().is_empty() {
                return Err(TimetableError::InvalidInput(format!(
                    "curriculum item of teacher '{}' for class '{}' has no subject",
                    item.teacher, item.class
                )));
            }
            if !self.classes.contains_key(&item.class) {
                return Err(TimetableError::InvalidInput(format!(
                    "curriculum item '{}' ({}) targets unknown class '{}'",
                    item.subject, item.teacher, item.class
                )));
            }
        }

        for (index, group) in self.fixed_slot_groups.iter().enumerate() {
            if group.subjects.is_empty() || group.days.is_empty() {
                return Err(TimetableError::InvalidInput(format!(
                    "fixed slot group #{} needs at least one subject and one day",
                    index
                )));
            }
            if group.period.index() >= self.school_max_periods_per_day() {
                return Err(TimetableError::InvalidInput(format!(
                    "fixed slot group #{} reserves {} but the school day has only {} periods",
                    index,
                    group.period,
                    self.school_max_periods_per_day()
                )));
            }
        }

        for (index, group) in self.sync_groups.iter().enumerate() {
            if group.members.len() < 2 {
                return Err(TimetableError::InvalidInput(format!(
                    "sync group #{} needs at least two members",
                    index
                )));
            }
        }

        Ok(())
    }

    /// Number of `(day, period)` cells in the school-wide week.
    pub fn school_slots_per_week(&self) -> usize {
        DAYS_PER_WEEK * self.school_max_periods_per_day()
    }
}
