//! Output rendering: JSON envelopes for machines, a plain table for people.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use taskrank_core::{
    CycleReport, PriorityBand, ScoreBreakdown, ScoredTask, Strategy, Task, score_task,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Table,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    scored: &'a ScoredTask,
    band: PriorityBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<ScoreBreakdown>,
}

#[derive(Debug, Serialize)]
struct AnalyzeReport<'a> {
    strategy: Strategy,
    tasks: Vec<Row<'a>>,
}

#[derive(Debug, Serialize)]
struct SuggestReport<'a> {
    message: String,
    strategy: Strategy,
    suggestions: Vec<Row<'a>>,
}

/// Recompute the per-factor breakdown of each ranked task.
///
/// `ranked` must be the complete output of one ranking: its dependencies
/// refer to output positions, so the cycle context is rebuilt from it.
pub fn breakdowns(
    ranked: &[ScoredTask],
    strategy: Strategy,
    today: NaiveDate,
) -> Vec<ScoreBreakdown> {
    let tasks: Vec<Task> = ranked.iter().map(|s| s.task.clone()).collect();
    let cycles = CycleReport::analyze(&tasks);
    ranked
        .iter()
        .map(|s| score_task(&s.task, strategy, today, Some(&cycles)))
        .collect()
}

fn rows<'a>(ranked: &'a [ScoredTask], breakdowns: Option<&[ScoreBreakdown]>) -> Vec<Row<'a>> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, scored)| Row {
            scored,
            band: scored.band(),
            breakdown: breakdowns.and_then(|b| b.get(i).copied()),
        })
        .collect()
}

pub fn print_analysis(
    strategy: Strategy,
    ranked: &[ScoredTask],
    breakdowns: Option<&[ScoreBreakdown]>,
    format: Format,
) -> Result<()> {
    let rows = rows(ranked, breakdowns);
    match format {
        Format::Json => print_json(&AnalyzeReport { strategy, tasks: rows }),
        Format::Table => {
            println!("# Ranked by {strategy}\n");
            print_table(&rows);
            Ok(())
        }
    }
}

pub fn print_suggestions(strategy: Strategy, ranked: &[ScoredTask], format: Format) -> Result<()> {
    let message = format!("Top {} suggested tasks for today", ranked.len());
    let rows = rows(ranked, None);
    match format {
        Format::Json => print_json(&SuggestReport {
            message,
            strategy,
            suggestions: rows,
        }),
        Format::Table => {
            println!("# {message} ({strategy})\n");
            print_table(&rows);
            Ok(())
        }
    }
}

pub fn print_strategies() {
    println!(
        "{:<16} {:>8} {:>11} {:>7} {:>11}",
        "strategy", "urgency", "importance", "effort", "dependency"
    );
    for strategy in Strategy::ALL {
        let w = strategy.weights();
        let marker = if strategy == Strategy::default() { " (default)" } else { "" };
        println!(
            "{:<16} {:>8.2} {:>11.2} {:>7.2} {:>11.2}{marker}",
            strategy.name(),
            w.urgency,
            w.importance,
            w.effort,
            w.dependency
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{json}");
    Ok(())
}

fn print_table(rows: &[Row<'_>]) {
    if rows.is_empty() {
        println!("(no tasks)");
        return;
    }
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:>3}. [{:<6}] {:>6.2} | {} | {}",
            rank + 1,
            row.band,
            row.scored.priority_score,
            row.scored.title(),
            row.scored.explanation
        );
        if let Some(b) = &row.breakdown {
            println!(
                "       urgency={:.1} importance={:.1} effort={:.2} dependency=x{:.2}{}",
                b.urgency,
                b.importance,
                b.effort,
                b.dependency_multiplier,
                if b.circular { " (circular)" } else { "" }
            );
        }
    }
}
