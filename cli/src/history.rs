//! Price history: replay multiplier samples through the recorder
//!
//! Samples come from the command line, from stdin (one per line, `clear`
//! resets the table, `#` starts a comment) or from a simulated slider drag.

use amm_model::{multiplier_from_slider, slider_sweep, HistoryRecorder, Pool};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::io::BufRead;

use crate::config::DashboardConfig;
use crate::output::{header, il_cell, print_json, Format};

/// One event in the sample stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Multiplier(f64),
    Clear,
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("line {line}: expected a multiplier or `clear`, got {text:?}")]
    BadLine { line: usize, text: String },
    #[error("failed to read stdin")]
    Io(#[from] std::io::Error),
}

/// Where the samples come from
#[derive(Debug, Default)]
pub struct SampleSources {
    pub args: Vec<f64>,
    pub stdin: bool,
    pub sweep: Option<(f64, f64)>,
}

/// What the recorder did with the stream
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub samples: usize,
    pub recorded: usize,
    pub suppressed: usize,
    pub clears: usize,
}

pub fn run_history(config: &DashboardConfig, sources: SampleSources, format: Format) -> Result<()> {
    let mut samples: Vec<Sample> = sources.args.iter().copied().map(Sample::Multiplier).collect();
    if let Some((from, to)) = sources.sweep {
        samples.extend(sweep_samples(from, to));
    }
    if sources.stdin {
        let stdin = std::io::stdin();
        samples.extend(parse_samples(stdin.lock()).context("Invalid history input")?);
    }
    if samples.is_empty() {
        anyhow::bail!("No samples: pass multipliers, --sweep FROM TO or --stdin");
    }

    let pool = config.pool();
    let mut recorder = HistoryRecorder::with_capacity(config.history.capacity);
    let stats = replay(&mut recorder, &pool, &samples);
    log::debug!("history replay: {:?}", stats);

    if format == Format::Json {
        #[derive(Serialize)]
        struct HistoryView<'a> {
            stats: ReplayStats,
            records: Vec<&'a amm_model::HistoryRecord>,
        }
        return print_json(&HistoryView {
            stats,
            records: recorder.records().collect(),
        });
    }

    header("Price History");
    if recorder.is_empty() {
        println!("{}", "No records (drag the price to start recording)".dimmed());
    } else {
        println!(
            "{:>4} {:>11} {:>12} {:>12} {:>12} {:>10}",
            "#".dimmed(),
            "Multiplier".dimmed(),
            "Price (Y/X)".dimmed(),
            "Reserve X".dimmed(),
            "Reserve Y".dimmed(),
            "IL %".dimmed()
        );
        let total = recorder.len();
        for (i, rec) in recorder.records().enumerate() {
            println!(
                "{:>4} {:>11} {:>12.4} {:>12.2} {:>12.2} {}",
                (total - i).to_string().dimmed(),
                format!("{:.3}x", rec.multiplier).bright_green(),
                rec.price,
                rec.x,
                rec.y,
                il_cell(rec.il, rec.classification, 9)
            );
        }
    }
    println!(
        "\n{}",
        format!(
            "{} samples, {} recorded, {} suppressed, {} cleared",
            stats.samples, stats.recorded, stats.suppressed, stats.clears
        )
        .dimmed()
    );
    Ok(())
}

/// Feed every sample to the recorder in order
pub fn replay(recorder: &mut HistoryRecorder, pool: &Pool, samples: &[Sample]) -> ReplayStats {
    let mut stats = ReplayStats::default();
    for sample in samples {
        match *sample {
            Sample::Clear => {
                recorder.clear();
                stats.clears += 1;
            }
            Sample::Multiplier(r) => {
                stats.samples += 1;
                if recorder.record(r, pool).is_some() {
                    stats.recorded += 1;
                } else {
                    stats.suppressed += 1;
                }
            }
        }
    }
    stats
}

/// Multipliers visited by dragging the log slider from `from` to `to`
pub fn sweep_samples(from: f64, to: f64) -> Vec<Sample> {
    slider_sweep(from, to)
        .into_iter()
        .map(|s| Sample::Multiplier(multiplier_from_slider(s)))
        .collect()
}

pub fn parse_samples<R: BufRead>(reader: R) -> Result<Vec<Sample>, InputError> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        if text.eq_ignore_ascii_case("clear") {
            samples.push(Sample::Clear);
            continue;
        }
        let value = text.parse::<f64>().map_err(|_| InputError::BadLine {
            line: idx + 1,
            text: text.to_string(),
        })?;
        samples.push(Sample::Multiplier(value));
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Pool {
        Pool::new(1000.0, 1000.0).unwrap()
    }

    #[test]
    fn test_parse_samples() {
        let input = "1.0\n\n# drag start\n1.25  # mid\nclear\n  4\n";
        let samples = parse_samples(input.as_bytes()).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample::Multiplier(1.0),
                Sample::Multiplier(1.25),
                Sample::Clear,
                Sample::Multiplier(4.0),
            ]
        );
    }

    #[test]
    fn test_parse_reports_line() {
        let err = parse_samples("1.0\nabc\n".as_bytes()).unwrap_err();
        assert!(matches!(err, InputError::BadLine { line: 2, .. }));
    }

    #[test]
    fn test_replay_counts() {
        let mut recorder = HistoryRecorder::new();
        let samples = [
            Sample::Multiplier(1.0001),
            Sample::Multiplier(1.0002),
            Sample::Multiplier(1.05),
            Sample::Clear,
            Sample::Multiplier(1.05),
        ];
        let stats = replay(&mut recorder, &pool(), &samples);
        assert_eq!(
            stats,
            ReplayStats {
                samples: 4,
                recorded: 3,
                suppressed: 1,
                clears: 1,
            }
        );
        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.latest().unwrap().id, 3);
    }

    #[test]
    fn test_sweep_records_distinct_rows() {
        let mut recorder = HistoryRecorder::new();
        let samples = sweep_samples(0.0, 0.1);
        assert_eq!(samples.len(), 21);
        let stats = replay(&mut recorder, &pool(), &samples);
        // 10^(0.005 i) is distinct at 3 decimals for every step
        assert_eq!(stats.recorded, 21);
        assert_eq!(recorder.latest().unwrap().multiplier, 1.259);
    }

    #[test]
    fn test_no_samples_is_error() {
        let config = DashboardConfig::default();
        assert!(run_history(&config, SampleSources::default(), Format::Json).is_err());
    }
}
