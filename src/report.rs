use serde::Serialize;
use taskscore::{Baseline, FactorKind, Formula, ScoredRecord};

use crate::report_helpers;

/// Print scored records as a table, optionally followed by a per-record
/// factor breakdown.
pub fn print_scores(scored: &[ScoredRecord], total: usize, formula: Formula, breakdown: bool) {
    let width = report_helpers::label_width(scored.iter().map(|s| s.task_id.as_str()), 4, 32);
    let rule = report_helpers::rule(width + 48);

    println!("Task Scores (formula {formula})");
    println!("{rule}");
    println!(
        " {:<width$}  {:>12}  {:>8}  {:>9}  {:>6}",
        "Task", "Productivity", "Grit", "Execution", "Bonus",
    );
    println!("{rule}");
    for s in scored {
        println!(
            " {:<width$}  {:>12.1}  {:>8.1}  {:>9.1}  {:>5.1}%",
            report_helpers::truncate_label(&s.task_id, width),
            s.scores.productivity,
            s.scores.grit,
            s.scores.execution,
            s.breakdown.bonus.total * 100.0,
        );
    }
    println!("{rule}");
    if scored.len() < total {
        println!(" showing {} of {total} records", scored.len());
    }

    if breakdown {
        for s in scored {
            print_breakdown(s);
        }
    }
}

fn print_breakdown(s: &ScoredRecord) {
    let f = &s.breakdown.factors;
    let b = &s.breakdown.bonus;
    let id = s.instance_id.as_deref().unwrap_or("-");
    println!();
    println!(" {} ({id})", s.task_id);
    let rows = [
        ("difficulty", f.difficulty),
        ("speed", f.speed),
        ("start_speed", f.start_speed),
        ("completion", f.completion),
        ("passion", f.passion),
        ("persistence", f.persistence_multiplier),
        ("perseverance", f.perseverance),
        ("focus", f.focus),
        ("momentum", f.momentum.value),
        ("time_bonus", f.time_bonus),
        ("efficiency", s.breakdown.efficiency),
    ];
    for (name, value) in rows {
        println!("   {name:<14} {value:>8.3}");
    }
    if let Some(load) = f.load {
        println!("   {:<14} {load:>8.1}", "load");
    }
    if let Some(net) = f.relief.net {
        println!("   {:<14} {net:>8.1}", "net_relief");
    }
    println!(
        "   bonus          synergy {:.3}  load {:.3}  spike {:.3}  total {:.3}",
        b.synergy, b.load, b.spike, b.total
    );
}

#[derive(Serialize)]
struct JsonScores<'a> {
    formula: Formula,
    total: usize,
    records: &'a [ScoredRecord],
}

pub fn print_scores_json(
    scored: &[ScoredRecord],
    total: usize,
    formula: Formula,
) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json(&JsonScores {
        formula,
        total,
        records: scored,
    })
}

pub fn print_stats(factor: FactorKind, baseline: &Baseline, records: usize) {
    let rule = report_helpers::rule(40);
    println!("Baseline: {factor}");
    println!("{rule}");
    println!(" Records:  {records}");
    match baseline {
        Baseline::Ready(s) => {
            println!(" Samples:  {}", s.samples);
            println!(" Mean:     {:.4}", s.mean);
            println!(" Median:   {:.4}", s.median);
            println!(" Std dev:  {:.4}", s.std);
        }
        Baseline::Insufficient { samples } => {
            println!(" Insufficient data ({samples} qualifying value(s), need 2)");
        }
    }
    println!("{rule}");
}

#[derive(Serialize)]
struct JsonStats<'a> {
    factor: FactorKind,
    records: usize,
    baseline: &'a Baseline,
}

pub fn print_stats_json(
    factor: FactorKind,
    baseline: &Baseline,
    records: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json(&JsonStats {
        factor,
        records,
        baseline,
    })
}

pub fn print_formulas() {
    let rule = report_helpers::rule(78);
    println!(" {:<8} {:<9}  Description", "Formula", "");
    println!("{rule}");
    for f in Formula::ALL {
        let mark = if f.is_canonical() { "canonical" } else { "" };
        println!(" {:<8} {:<9}  {}", f.as_str(), mark, f.description());
    }
    println!("{rule}");
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
