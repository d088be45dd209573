//! Human and machine readable output of simulation results.

use serde::Serialize;
use std::io::{self, Write};
use zoo_core::{BatchSummary, SimulationResult};
use zoo_world::{EventSink, SimulationEvent};

/// Writes one line per event; the first write error is kept for [`EventPrinter::finish`].
pub struct EventPrinter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> EventPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> EventSink for EventPrinter<W> {
    fn record(&mut self, event: &SimulationEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", event) {
            self.error = Some(err);
        }
    }
}

pub fn write_result(result: &SimulationResult, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "------- Simulation Results -------")?;
    writeln!(out)?;
    writeln!(out, "Run: {} (seed {}, {} ticks)", result.run_id, result.seed, result.ticks)?;
    writeln!(out, "Final Total Count: {}", result.total_population)?;
    writeln!(out, "Final entity counts:")?;
    for population in &result.populations {
        writeln!(out, "  {}: {}", population.species, population.count)?;
    }

    if result.totals.is_quiet() {
        writeln!(out)?;
        writeln!(out, "No Hunting or Mating performed during the simulation.")?;
    } else {
        writeln!(out)?;
        writeln!(out, "--------- Action Summary ---------")?;
        writeln!(out)?;
        writeln!(out, "Total Hunting: {}", result.totals.huntings)?;
        writeln!(out, "Total Mating: {}", result.totals.matings)?;
    }

    writeln!(out)?;
    writeln!(out, "-------------------------------")?;
    Ok(())
}

pub fn write_batch_summary(summary: &BatchSummary, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "------- Batch Summary ({} runs) -------", summary.runs)?;
    writeln!(out)?;
    writeln!(
        out,
        "Mean Total Count: {:.2} (min {}, max {})",
        summary.mean_total_population, summary.min_total_population, summary.max_total_population
    )?;
    writeln!(out, "Mean entity counts:")?;
    for (species, mean) in &summary.mean_populations {
        writeln!(out, "  {}: {:.2}", species, mean)?;
    }
    writeln!(out, "Mean Hunting: {:.2}", summary.mean_huntings)?;
    writeln!(out, "Mean Mating: {:.2}", summary.mean_matings)?;
    Ok(())
}

pub fn write_json<T: Serialize>(value: &T, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoo_core::{EventTotals, Position, RunId, SpeciesPopulation};

    fn result(matings: u64, huntings: u64) -> SimulationResult {
        SimulationResult {
            run_id: RunId::new(),
            seed: 8,
            ticks: 1000,
            populations: vec![
                SpeciesPopulation {
                    species: "sheep".to_string(),
                    count: 31,
                },
                SpeciesPopulation {
                    species: "hunter".to_string(),
                    count: 1,
                },
            ],
            total_population: 32,
            totals: EventTotals { matings, huntings },
        }
    }

    fn render(result: &SimulationResult) -> String {
        let mut out = Vec::new();
        write_result(result, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_report_with_actions() {
        let text = render(&result(3, 2));
        assert!(text.contains("Final Total Count: 32"));
        assert!(text.contains("  sheep: 31\n"));
        assert!(text.contains("  hunter: 1\n"));
        assert!(text.contains("Total Hunting: 2"));
        assert!(text.contains("Total Mating: 3"));
        assert!(!text.contains("No Hunting or Mating"));
    }

    #[test]
    fn test_text_report_without_actions() {
        let text = render(&result(0, 0));
        assert!(text.contains("No Hunting or Mating performed during the simulation."));
        assert!(!text.contains("Action Summary"));
    }

    #[test]
    fn test_json_report() {
        let mut out = Vec::new();
        write_json(&result(1, 0), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total_population"], 32);
        assert_eq!(value["totals"]["matings"], 1);
        assert_eq!(value["populations"][0]["species"], "sheep");
    }

    #[test]
    fn test_batch_summary_text() {
        let mut summary = BatchSummary::new();
        summary.update(&result(2, 0));
        summary.update(&result(4, 2));

        let mut out = Vec::new();
        write_batch_summary(&summary, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Batch Summary (2 runs)"));
        assert!(text.contains("  sheep: 31.00"));
        assert!(text.contains("Mean Mating: 3.00"));
        assert!(text.contains("Mean Hunting: 1.00"));
    }

    #[test]
    fn test_event_printer_writes_lines() {
        let mut printer = EventPrinter::new(Vec::new());
        printer.record(&SimulationEvent::Hunting {
            predator: "lion".to_string(),
            prey: "cow".to_string(),
            predator_at: Position::new(1, 1),
            prey_at: Position::new(2, 3),
        });
        printer.record(&SimulationEvent::Mating {
            species: "wolf".to_string(),
            at: Position::new(0, 0),
            partner: Position::new(1, 0),
            offspring: Position::new(9, 9),
            partner_relocated_to: Position::new(4, 4),
        });

        let out = printer.finish().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "lion hunted cow at (2, 3)\nMating occurred: wolf at (0, 0) and (1, 0)\n"
        );
    }
}
