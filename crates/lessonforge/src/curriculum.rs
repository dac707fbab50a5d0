//! Curriculum normalization.
//!
//! Turns spreadsheet-style rows into a [`TimetableProblem`]. A row names a
//! teacher as typed by a human ("Prof. ana  maria"), a subject, a
//! comma-separated list of target classes, a weekly quantity per class and
//! free-text unavailability such as `"seg:1, ter:3; fri"`.

use std::collections::{BTreeMap, BTreeSet};

use lessonforge_core::{
    CurriculumItem, Day, FixedSlotGroup, Period, Slot, SyncGroup, TeacherId, TimetableProblem,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Title prefixes dropped from teacher names, longest first.
const TITLE_PREFIXES: [&str; 5] = ["teacher", "prof.", "profª", "profa", "prof"];

const DAY_KEYS: [(&str, usize); 10] = [
    ("seg", 0),
    ("mon", 0),
    ("ter", 1),
    ("tue", 1),
    ("qua", 2),
    ("wed", 2),
    ("qui", 3),
    ("thu", 3),
    ("sex", 4),
    ("fri", 4),
];

/// Errors raised while normalizing raw curriculum rows.
///
/// `row` is the zero-based position of the offending row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurriculumError {
    #[error("row {row}: teacher name is empty")]
    EmptyTeacher { row: usize },

    #[error("row {row}: subject is empty")]
    EmptySubject { row: usize },

    #[error("row {row}: unknown day in unavailability token '{token}'")]
    UnknownDay { row: usize, token: String },

    #[error("row {row}: invalid period in unavailability token '{token}'")]
    InvalidPeriod { row: usize, token: String },
}

/// One curriculum row as entered by a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub teacher: String,
    pub subject: String,
    /// Comma-separated class identifiers.
    pub target_classes: String,
    /// Weekly lessons for each target class.
    pub quantity: u32,
    #[serde(default)]
    pub unavailability: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RawRow {
    pub fn new(
        teacher: impl Into<String>,
        subject: impl Into<String>,
        target_classes: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            teacher: teacher.into(),
            subject: subject.into(),
            target_classes: target_classes.into(),
            quantity,
            ..Self::default()
        }
    }

    pub fn with_unavailability(mut self, text: impl Into<String>) -> Self {
        self.unavailability = text.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Classes, raw rows and the group definitions that pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCurriculum {
    /// Weekly lesson count per class.
    pub classes: BTreeMap<String, u32>,
    pub rows: Vec<RawRow>,
    /// Free period quota keyed by teacher name in any spelling.
    #[serde(default)]
    pub free_quota: BTreeMap<String, u32>,
    #[serde(default)]
    pub fixed_slot_groups: Vec<FixedSlotGroup>,
    #[serde(default)]
    pub sync_groups: Vec<SyncGroup>,
}

/// Canonical form of a teacher name.
///
/// # Examples
///
/// ```
/// use lessonforge::curriculum::canonical_teacher;
///
/// assert_eq!(canonical_teacher("  Prof. ana   MARIA "), "Ana Maria");
/// assert_eq!(canonical_teacher("profª Beatriz"), "Beatriz");
/// assert_eq!(canonical_teacher("Professor Xavier"), "Professor Xavier");
/// ```
pub fn canonical_teacher(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut rest = lowered.as_str();
    for prefix in TITLE_PREFIXES {
        if let Some(after) = rest.strip_prefix(prefix) {
            let delimited = prefix.ends_with('.')
                || prefix.ends_with('ª')
                || after.is_empty()
                || after.starts_with(char::is_whitespace);
            if delimited {
                rest = after;
                break;
            }
        }
    }

    rest.split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses unavailability text into blocked slots.
///
/// Tokens are separated by `,` or `;`. A `day:period` token blocks one
/// period (1-based); a bare day blocks the whole day, `periods_per_day`
/// long. Days match on their first three letters in Portuguese or English.
/// Empty tokens are ignored.
///
/// # Errors
///
/// [`CurriculumError::UnknownDay`] or [`CurriculumError::InvalidPeriod`]
/// for malformed tokens.
///
/// # Examples
///
/// ```
/// use lessonforge::curriculum::parse_unavailability;
///
/// let slots = parse_unavailability("seg:1; Tuesday", 5, 0).unwrap();
/// assert_eq!(slots.len(), 6);
/// assert!(parse_unavailability("sab:1", 5, 0).is_err());
/// ```
pub fn parse_unavailability(
    text: &str,
    periods_per_day: usize,
    row: usize,
) -> Result<BTreeSet<Slot>, CurriculumError> {
    let mut slots = BTreeSet::new();

    for token in text.split([',', ';']) {
        let token: String = token.chars().filter(|c| !c.is_whitespace()).collect();
        if token.is_empty() {
            continue;
        }
        let token = token.to_lowercase();

        let (day_part, period_part) = match token.split_once(':') {
            Some((day, period)) => (day, Some(period)),
            None => (token.as_str(), None),
        };

        let day = parse_day(day_part).ok_or_else(|| CurriculumError::UnknownDay {
            row,
            token: token.clone(),
        })?;

        match period_part {
            Some(period) => {
                let number: usize = period
                    .parse()
                    .ok()
                    .filter(|&n| (1..=u8::MAX as usize).contains(&n))
                    .ok_or_else(|| CurriculumError::InvalidPeriod {
                        row,
                        token: token.clone(),
                    })?;
                slots.insert(Slot::new(day, Period::new(number - 1)));
            }
            None => {
                slots.extend((0..periods_per_day).map(|p| Slot::new(day, Period::new(p))));
            }
        }
    }

    Ok(slots)
}

fn parse_day(text: &str) -> Option<Day> {
    let key: String = text.chars().take(3).collect();
    DAY_KEYS
        .iter()
        .find(|(name, _)| *name == key)
        .and_then(|&(_, index)| Day::new(index))
}

/// Builds a [`TimetableProblem`] from raw rows.
///
/// Teacher names are canonicalized, unknown target classes are skipped with
/// a warning, duplicate `(teacher, subject, class)` rows accumulate and all
/// unavailability of a teacher is merged. The result is not validated; the
/// solver does that.
///
/// # Errors
///
/// Returns the first [`CurriculumError`] found.
///
/// # Examples
///
/// ```
/// use lessonforge::curriculum::{normalize, RawCurriculum, RawRow};
///
/// let mut raw = RawCurriculum::default();
/// raw.classes.insert("6A".to_string(), 25);
/// raw.classes.insert("6B".to_string(), 25);
/// raw.rows.push(RawRow::new("Prof. Ana", "Math", "6A, 6B", 4).with_unavailability("sex"));
///
/// let problem = normalize(&raw).unwrap();
/// assert_eq!(problem.curriculum.len(), 2);
/// assert_eq!(problem.teacher_blocks["Ana"].len(), 5);
/// ```
pub fn normalize(raw: &RawCurriculum) -> Result<TimetableProblem, CurriculumError> {
    let mut problem = TimetableProblem::new();
    for (class, &weekly) in &raw.classes {
        problem = problem.with_class(class.trim(), weekly);
    }
    let periods_per_day = problem.school_max_periods_per_day();

    let mut items: BTreeMap<(TeacherId, String, String), CurriculumItem> = BTreeMap::new();
    let mut skipped = 0usize;

    for (row_index, row) in raw.rows.iter().enumerate() {
        let teacher = canonical_teacher(&row.teacher);
        if teacher.is_empty() {
            return Err(CurriculumError::EmptyTeacher { row: row_index });
        }
        let subject = row.subject.trim();
        if subject.is_empty() {
            return Err(CurriculumError::EmptySubject { row: row_index });
        }
        let teacher = TeacherId::from(teacher);

        let blocks = parse_unavailability(&row.unavailability, periods_per_day, row_index)?;
        if !blocks.is_empty() {
            problem
                .teacher_blocks
                .entry(teacher.clone())
                .or_default()
                .extend(blocks);
        }

        for class in row.target_classes.split(',').map(str::trim) {
            if class.is_empty() {
                continue;
            }
            if !problem.classes.contains_key(class) {
                skipped += 1;
                warn!(
                    event = "unknown_class",
                    row = row_index,
                    class,
                    teacher = %teacher,
                    subject,
                );
                continue;
            }

            let key = (teacher.clone(), subject.to_string(), class.to_string());
            let item = items.entry(key).or_insert_with(|| {
                CurriculumItem::new(teacher.clone(), subject, class, 0)
            });
            item.quantity += row.quantity;
            item.tags.extend(
                row.tags
                    .iter()
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
        }
    }

    problem.curriculum = items.into_values().collect();
    for (name, &quota) in &raw.free_quota {
        problem = problem.with_free_quota(canonical_teacher(name), quota);
    }
    problem.fixed_slot_groups = raw.fixed_slot_groups.clone();
    problem.sync_groups = raw.sync_groups.clone();

    debug!(
        event = "curriculum_normalized",
        rows = raw.rows.len(),
        items = problem.curriculum.len(),
        teachers = problem.teacher_ids().len(),
        skipped_targets = skipped,
    );

    Ok(problem)
}
