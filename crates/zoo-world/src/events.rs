//! Mating and hunting events, and where they are sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use zoo_core::Position;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEvent {
    Mating {
        species: String,
        /// Cell of the scanned parent
        at: Position,
        /// Cell the partner was found in, before it was moved away
        partner: Position,
        offspring: Position,
        partner_relocated_to: Position,
    },
    Hunting {
        predator: String,
        prey: String,
        predator_at: Position,
        prey_at: Position,
    },
}

impl fmt::Display for SimulationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationEvent::Mating {
                species,
                at,
                partner,
                ..
            } => write!(f, "Mating occurred: {} at {} and {}", species, at, partner),
            SimulationEvent::Hunting {
                predator,
                prey,
                prey_at,
                ..
            } => write!(f, "{} hunted {} at {}", predator, prey, prey_at),
        }
    }
}

/// Receiver of the events a simulation produces
pub trait EventSink {
    fn record(&mut self, event: &SimulationEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &SimulationEvent) {}
}

impl EventSink for Vec<SimulationEvent> {
    fn record(&mut self, event: &SimulationEvent) {
        self.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        let mating = SimulationEvent::Mating {
            species: "sheep".to_string(),
            at: Position::new(0, 0),
            partner: Position::new(0, 1),
            offspring: Position::new(4, 4),
            partner_relocated_to: Position::new(7, 2),
        };
        assert_eq!(mating.to_string(), "Mating occurred: sheep at (0, 0) and (0, 1)");

        let hunting = SimulationEvent::Hunting {
            predator: "wolf".to_string(),
            prey: "chicken".to_string(),
            predator_at: Position::new(3, 3),
            prey_at: Position::new(5, 6),
        };
        assert_eq!(hunting.to_string(), "wolf hunted chicken at (5, 6)");
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut events: Vec<SimulationEvent> = Vec::new();
        let event = SimulationEvent::Hunting {
            predator: "lion".to_string(),
            prey: "cow".to_string(),
            predator_at: Position::new(0, 0),
            prey_at: Position::new(1, 1),
        };
        events.record(&event);
        NullSink.record(&event);
        assert_eq!(events, vec![event]);
    }
}
