//! Colorful console output for selection runs.
//!
//! Provides a custom `tracing` layer that formats pipeline events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (selection start/end, problem scale)
//! - **WARN**: Solver fallback, non-dominant penalties, bound violations
//! - **DEBUG**: Optimizer iterations with expectation values

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SELECTION_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "siteselect_solver=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and installs the tracing subscriber.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SelectionConsoleLayer)
            .try_init();
    });
}

fn mark_selection_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SELECTION_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SELECTION_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____  _ _       ____       _           _
/ ___|(_) |_ ___/ ___|  ___| | ___  ___| |_
\___ \| | __/ _ \___ \ / _ \ |/ _ \/ __| __|
 ___) | | ||  __/___) |  __/ |  __/ (__| |_
|____/|_|\__\___|____/ \___|_|\___|\___|\__|
"#;

    let version_line = format!(
        "            v{} - Constrained Site Selection\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats selection events with colors.
pub struct SelectionConsoleLayer;

impl<S: Subscriber> Layer<S> for SelectionConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with("siteselect_solver") && !target.starts_with("siteselect::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    solver: Option<String>,
    primary: Option<String>,
    fallback: Option<String>,
    reason: Option<String>,
    candidate_count: Option<u64>,
    variable_count: Option<u64>,
    max_selected: Option<u64>,
    selected: Option<u64>,
    iteration: Option<u64>,
    elapsed_ms: Option<u64>,
    net_benefit: Option<i64>,
    penalty: Option<f64>,
    magnitude: Option<f64>,
    objective: Option<f64>,
    expectation: Option<f64>,
    best: Option<f64>,
    step: Option<f64>,
    improvement_percent: Option<f64>,
    binding: Option<bool>,
    fallback_used: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        self.record_text(field, s);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "candidate_count" => self.candidate_count = Some(value),
            "variable_count" => self.variable_count = Some(value),
            "max_selected" => self.max_selected = Some(value),
            "selected" => self.selected = Some(value),
            "iteration" => self.iteration = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "net_benefit" => self.net_benefit = Some(value as i64),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "net_benefit" => self.net_benefit = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "penalty" => self.penalty = Some(value),
            "magnitude" => self.magnitude = Some(value),
            "objective" => self.objective = Some(value),
            "expectation" => self.expectation = Some(value),
            "best" => self.best = Some(value),
            "step" => self.step = Some(value),
            "improvement_percent" => self.improvement_percent = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "binding" => self.binding = Some(value),
            "fallback_used" => self.fallback_used = Some(value),
            _ => {}
        }
    }
}

impl EventVisitor {
    fn record_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "status" => self.status = Some(value),
            "solver" => self.solver = Some(value),
            "primary" => self.primary = Some(value),
            "fallback" => self.fallback = Some(value),
            "reason" => self.reason = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "selection_start" => format_selection_start(v),
        "problem_built" => format_problem_built(v),
        "iteration" => format_iteration(v),
        "solver_fallback" => format_fallback(v),
        "penalty_not_dominant" => format_weak_penalty(v),
        "constraint_violated" => format_violation(v),
        "selection_end" => format_selection_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_selection_start(v: &EventVisitor) -> String {
    mark_selection_start();
    let candidates = v.candidate_count.unwrap_or(0);
    let max_selected = v.max_selected.unwrap_or(0);

    format!(
        "{} {} Selecting │ {} candidates │ at most {} │ {} subsets",
        format_elapsed(),
        "▶".bright_green().bold(),
        candidates.to_formatted_string(&Locale::en).bright_yellow(),
        max_selected.to_formatted_string(&Locale::en).bright_yellow(),
        format_subset_count(candidates).bright_magenta()
    )
}

fn format_problem_built(v: &EventVisitor) -> String {
    let variables = v.variable_count.unwrap_or(0);
    let penalty = v.penalty.unwrap_or(0.0);
    let binding = if v.binding.unwrap_or(true) {
        "binding".white().to_string()
    } else {
        "non-binding".bright_black().to_string()
    };

    format!(
        "{} {} QUBO built │ {} variables │ penalty {} │ {}",
        format_elapsed(),
        "◆".bright_blue(),
        variables.to_formatted_string(&Locale::en).white(),
        format!("{:.1}", penalty).bright_yellow(),
        binding
    )
}

fn format_iteration(v: &EventVisitor) -> String {
    let iteration = v.iteration.unwrap_or(0);
    let expectation = v.expectation.unwrap_or(f64::NAN);

    let mut output = format!(
        "{} {} Iteration {:>4} │ ⟨E⟩ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        iteration.to_formatted_string(&Locale::en).white(),
        format_energy(expectation)
    );
    if let Some(best) = v.best {
        output.push_str(&format!(" │ best {}", format_energy(best)));
    }
    if let Some(step) = v.step {
        output.push_str(&format!(" │ step {:.4}", step).bright_black().to_string());
    }
    output
}

fn format_fallback(v: &EventVisitor) -> String {
    format!(
        "{} {} {} failed ({}), falling back to {}",
        format_elapsed(),
        "↺".bright_yellow().bold(),
        v.primary.as_deref().unwrap_or("primary").white().bold(),
        v.reason.as_deref().unwrap_or("unknown").yellow(),
        v.fallback.as_deref().unwrap_or("fallback").white().bold()
    )
}

fn format_weak_penalty(v: &EventVisitor) -> String {
    format!(
        "{} {} Penalty {:.1} does not dominate objective magnitude {:.1}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        v.penalty.unwrap_or(0.0),
        v.magnitude.unwrap_or(0.0)
    )
}

fn format_violation(v: &EventVisitor) -> String {
    format!(
        "{} {} {} sites selected, at most {} allowed",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.selected.unwrap_or(0).to_formatted_string(&Locale::en).bright_red(),
        v.max_selected.unwrap_or(0).to_formatted_string(&Locale::en)
    )
}

fn format_selection_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("Unknown");
    let solver = v.solver.as_deref().unwrap_or("unknown");
    let selected = v.selected.unwrap_or(0);
    let net_benefit = v.net_benefit.unwrap_or(0);
    let duration = v.elapsed_ms.unwrap_or(0);

    let status_colored = match status {
        "Optimal" => status.bright_green().bold().to_string(),
        "Feasible" => status.green().bold().to_string(),
        _ => status.bright_red().bold().to_string(),
    };
    let solver_label = if v.fallback_used.unwrap_or(false) {
        format!("{} (fallback)", solver)
    } else {
        solver.to_string()
    };

    let mut output = format!(
        "{} {} Selection complete │ {} │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status_colored,
        solver_label.white(),
        format_duration_ms(duration).yellow()
    );

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&summary_row("Sites selected:", &selected.to_formatted_string(&Locale::en)));
    output.push_str(&summary_row("Net benefit:", &net_benefit.to_formatted_string(&Locale::en)));
    if let Some(objective) = v.objective {
        output.push_str(&summary_row("Objective:", &format!("{:.2}", objective)));
    }
    if let Some(improvement) = v.improvement_percent {
        output.push_str(&summary_row("vs. greedy:", &format!("{:+.2}%", improvement)));
    }
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn summary_row(label: &str, value: &str) -> String {
    format!(
        "{}  {:<18}{:>36}  {}\n",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    )
}

fn format_energy(energy: f64) -> String {
    let text = format!("{:.2}", energy);
    if energy < 0.0 {
        text.bright_green().to_string()
    } else {
        text.white().to_string()
    }
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

/// Size of the search space, `2^n`, in scientific notation.
fn format_subset_count(candidates: u64) -> String {
    if candidates == 0 {
        return "1".to_string();
    }
    let log_scale = candidates as f64 * 2f64.log10();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}
