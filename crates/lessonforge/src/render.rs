//! Plain-text views of a solved timetable.
//!
//! Everything here reads a [`SolveResult`] (or a [`CapacityReport`]) and
//! returns a string; nothing feeds back into solving.

use std::collections::BTreeMap;
use std::fmt;

use lessonforge_core::{ClassId, Day, Period, TeacherId, TimetableProblem, DAYS_PER_WEEK};
use lessonforge_scoring::{summarize, CapacityReport};
use lessonforge_solver::SolveResult;

const EMPTY_CELL: &str = "-";

/// Left-aligned text table with a header rule.
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_row(f, &widths, &self.headers)?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        writeln!(f, "   {}", rule.join("-+-"))?;
        for row in &self.rows {
            write_row(f, &widths, row)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: &[String]) -> fmt::Result {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            format!("{:<w$}", cell, w = w)
        })
        .collect();
    writeln!(f, "   {}", padded.join(" | ").trim_end())
}

fn day_headers(first: &str) -> Vec<String> {
    std::iter::once(first.to_string())
        .chain(Day::all().map(|d| d.name().to_string()))
        .collect()
}

/// Weekly grid of one class: periods down, days across.
///
/// Cells read `Subject (Teacher)`; free periods show `-`.
pub fn class_grid(problem: &TimetableProblem, result: &SolveResult, class: &ClassId) -> String {
    let Some(group) = problem.class_group(class) else {
        return format!("{}: unknown class\n", class);
    };

    let mut cells: BTreeMap<(usize, usize), Vec<String>> = BTreeMap::new();
    for lesson in result.class_lessons(class) {
        cells
            .entry((lesson.period.index(), lesson.day.index()))
            .or_default()
            .push(format!("{} ({})", lesson.subject, lesson.teacher));
    }

    let mut table = Table::new(day_headers(""));
    for period in 0..group.periods_per_day() {
        let mut row = vec![Period::new(period).to_string()];
        for day in 0..DAYS_PER_WEEK {
            let cell = cells
                .get(&(period, day))
                .map(|names| names.join(" / "))
                .unwrap_or_else(|| EMPTY_CELL.to_string());
            row.push(cell);
        }
        table.push(row);
    }

    format!(
        "Class {} ({} lessons/week)\n{}",
        class, group.weekly_lessons, table
    )
}

/// Grids of every class, in identifier order, separated by blank lines.
pub fn class_grids(problem: &TimetableProblem, result: &SolveResult) -> String {
    problem
        .classes
        .keys()
        .map(|class| class_grid(problem, result, class))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lessons per teacher and day, with a weekly total.
pub fn teacher_load(problem: &TimetableProblem, result: &SolveResult) -> String {
    let mut counts: BTreeMap<TeacherId, [usize; DAYS_PER_WEEK]> = problem
        .teacher_ids()
        .into_iter()
        .map(|t| (t, [0; DAYS_PER_WEEK]))
        .collect();
    for lesson in &result.assignment {
        counts.entry(lesson.teacher.clone()).or_default()[lesson.day.index()] += 1;
    }

    let mut headers = day_headers("Teacher");
    headers.push("Total".to_string());
    let mut table = Table::new(headers);
    for (teacher, days) in &counts {
        let mut row = vec![teacher.to_string()];
        row.extend(days.iter().map(ToString::to_string));
        row.push(days.iter().sum::<usize>().to_string());
        table.push(row);
    }

    table.to_string()
}

/// Triggered terms in audit order, then per-category subtotals and the total.
pub fn audit_table(result: &SolveResult) -> String {
    if result.audit.is_empty() {
        let total = result.objective_value.unwrap_or(0);
        return format!("   (no penalties triggered, total cost {})\n", total);
    }

    let mut table = Table::new(["Category", "Description", "Weight", "Value", "Cost"]);
    for entry in &result.audit {
        table.push(vec![
            entry.category.to_string(),
            entry.description.clone(),
            entry.weight.to_string(),
            entry.value.to_string(),
            entry.cost.to_string(),
        ]);
    }

    let mut summary = Table::new(["Category", "Occurrences", "Cost"]);
    for (category, totals) in summarize(&result.audit) {
        summary.push(vec![
            category.to_string(),
            totals.occurrences.to_string(),
            totals.cost.to_string(),
        ]);
    }

    format!(
        "{}\n{}\n   Total cost: {}\n",
        table,
        summary,
        result.audit_total()
    )
}

/// Capacity verdict per teacher.
pub fn capacity_table(report: &CapacityReport) -> String {
    let mut table = Table::new([
        "Teacher", "Required", "Blocked", "Available", "Balance", "Status",
    ]);
    for teacher in &report.teachers {
        table.push(vec![
            teacher.teacher.to_string(),
            teacher.required.to_string(),
            teacher.blocked.to_string(),
            teacher.available.to_string(),
            teacher.balance.to_string(),
            teacher.status.to_string(),
        ]);
    }
    table.to_string()
}
