//! Colorful console output for solve progress.
//!
//! Provides a custom `tracing` layer that formats LessonForge lifecycle
//! events (`solve_start`, `capacity_checked`, `model_built`, `solve_end`)
//! with colors. Other events pass through as plain one-line records.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Solver progress at info, warnings from every other LessonForge crate.
const DEFAULT_DIRECTIVES: &[&str] = &["lessonforge=warn", "lessonforge_solver=info"];

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// is honored on top of [`DEFAULT_DIRECTIVES`].
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        for directive in DEFAULT_DIRECTIVES {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TimetableConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats timetabling events with colors.
pub struct TimetableConsoleLayer;

impl<S: Subscriber> Layer<S> for TimetableConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("lessonforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    status: Option<String>,
    teacher: Option<String>,
    backend: Option<String>,
    classes: Option<u64>,
    curriculum_items: Option<u64>,
    time_limit_ms: Option<u64>,
    teachers: Option<u64>,
    critical: Option<u64>,
    required: Option<u64>,
    available: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    hard_rules: Option<u64>,
    penalty_terms: Option<u64>,
    lessons: Option<u64>,
    triggered_terms: Option<u64>,
    duration_ms: Option<u64>,
    objective: Option<i64>,
    passed: Option<bool>,
    proven_optimal: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "message" => &mut self.message,
            "status" => &mut self.status,
            "teacher" => &mut self.teacher,
            "backend" => &mut self.backend,
            _ => return,
        };
        *slot = Some(value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "classes" => &mut self.classes,
            "curriculum_items" => &mut self.curriculum_items,
            "time_limit_ms" => &mut self.time_limit_ms,
            "teachers" => &mut self.teachers,
            "critical" => &mut self.critical,
            "required" => &mut self.required,
            "available" => &mut self.available,
            "variables" => &mut self.variables,
            "constraints" => &mut self.constraints,
            "hard_rules" => &mut self.hard_rules,
            "penalty_terms" => &mut self.penalty_terms,
            "lessons" => &mut self.lessons,
            "triggered_terms" => &mut self.triggered_terms,
            "duration_ms" => &mut self.duration_ms,
            "objective" => {
                self.objective = Some(value as i64);
                return;
            }
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "objective" {
            self.objective = Some(value);
        } else if value >= 0 {
            self.record_u64(field, value as u64);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "passed" => self.passed = Some(value),
            "proven_optimal" => self.proven_optimal = Some(value),
            _ => {}
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref() {
        Some("solve_start") => format_solve_start(v),
        Some("capacity_checked") => format_capacity_checked(v),
        Some("capacity_critical") => format_capacity_critical(v),
        Some("model_built") => format_model_built(v),
        Some("solve_end") => format_solve_end(v),
        Some(other) if level <= Level::INFO => format_plain(level, other, v),
        _ => String::new(),
    }
}

fn prefix(level: Level) -> String {
    let label = match level {
        Level::ERROR => "ERROR".bright_red().to_string(),
        Level::WARN => " WARN".yellow().to_string(),
        Level::INFO => " INFO".bright_green().to_string(),
        Level::DEBUG => "DEBUG".bright_blue().to_string(),
        Level::TRACE => "TRACE".bright_black().to_string(),
    };
    format!(
        "{} {} {}",
        timestamp().bright_black(),
        label,
        "[Timetable]".bright_cyan()
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} Solving started: classes ({}), curriculum items ({}), backend ({}), time limit ({})",
        prefix(Level::INFO),
        v.classes.unwrap_or(0).bright_yellow(),
        v.curriculum_items.unwrap_or(0).bright_yellow(),
        v.backend.as_deref().unwrap_or("?").white().bold(),
        format_duration_ms(v.time_limit_ms.unwrap_or(0)).yellow()
    )
}

fn format_capacity_checked(v: &EventVisitor) -> String {
    let verdict = if v.passed.unwrap_or(false) {
        "passed".bright_green().to_string()
    } else {
        "FAILED".bright_red().bold().to_string()
    };
    format!(
        "{} Capacity check {}: teachers ({}), critical ({})",
        prefix(Level::INFO),
        verdict,
        v.teachers.unwrap_or(0).bright_yellow(),
        v.critical.unwrap_or(0).bright_yellow()
    )
}

fn format_capacity_critical(v: &EventVisitor) -> String {
    format!(
        "{} {} needs {} lessons with {} free slots",
        prefix(Level::WARN),
        v.teacher.as_deref().unwrap_or("?").white().bold(),
        v.required.unwrap_or(0).bright_red(),
        v.available.unwrap_or(0).bright_red()
    )
}

fn format_model_built(v: &EventVisitor) -> String {
    format!(
        "{} Model built: variables ({}), constraints ({}), hard rules ({}), penalty terms ({})",
        prefix(Level::INFO),
        v.variables.unwrap_or(0).bright_yellow(),
        v.constraints.unwrap_or(0).bright_yellow(),
        v.hard_rules.unwrap_or(0).bright_yellow(),
        v.penalty_terms.unwrap_or(0).bright_magenta()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("ERROR");
    let status_colored = match status {
        "OK" => status.bright_green().bold().to_string(),
        "INFEASIBLE" => status.bright_red().bold().to_string(),
        _ => status.yellow().bold().to_string(),
    };
    let objective = match v.objective {
        Some(value) => format_objective(value),
        None => "N/A".white().to_string(),
    };
    let optimality = if v.proven_optimal.unwrap_or(false) {
        "optimal".bright_green().to_string()
    } else {
        "not proven optimal".yellow().to_string()
    };

    format!(
        "{} Solving ended: status ({}), objective ({}, {}), lessons ({}), triggered terms ({}), time spent ({})",
        prefix(Level::INFO),
        status_colored,
        objective,
        optimality,
        v.lessons.unwrap_or(0).white(),
        v.triggered_terms.unwrap_or(0).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_plain(level: Level, event: &str, v: &EventVisitor) -> String {
    match v.message.as_deref() {
        Some(message) => format!("{} {}: {}", prefix(level), event, message),
        None => format!("{} {}", prefix(level), event),
    }
}

fn format_objective(value: i64) -> String {
    let text = value.to_string();
    if value > 0 {
        text.yellow().to_string()
    } else if value < 0 {
        text.bright_green().to_string()
    } else {
        text.white().to_string()
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_default_directives_parse() {
        use tracing_subscriber::filter::Directive;

        for directive in DEFAULT_DIRECTIVES {
            assert!(directive.parse::<Directive>().is_ok(), "{directive}");
        }
        assert!(DEFAULT_DIRECTIVES.contains(&"lessonforge=warn"));
    }

    #[test]
    fn test_unknown_debug_events_are_dropped() {
        let visitor = EventVisitor {
            event: Some("grid_built".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(Level::DEBUG, &visitor).is_empty());
        assert!(format_event(Level::INFO, &EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_solve_end_mentions_status_and_objective() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            status: Some("OK".to_string()),
            objective: Some(1200),
            proven_optimal: Some(true),
            ..EventVisitor::default()
        };
        let line = format_event(Level::INFO, &visitor);
        assert!(line.contains("Solving ended"));
        assert!(line.contains("OK"));
        assert!(line.contains("1200"));
        assert!(line.contains("optimal"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
