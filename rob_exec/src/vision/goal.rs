//! Vision target observations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use crate::geom::Vector2d;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single observed target candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalState {
    /// Position of the target in the field frame.
    ///
    /// Units: inches
    pub position: Vector2d,

    /// Quality of the observation, higher is better.
    ///
    /// Units: none, in `[0, 1]`
    pub confidence: f64,
}

/// The set of target candidates seen in the latest camera frame.
#[derive(Debug, Clone, Default)]
pub struct GoalStates {
    candidates: Vec<GoalState>,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A provider of vision targets, queried once per control tick.
pub trait GoalSource {
    /// The best target currently in view, or `None` if nothing is seen.
    fn best_vision_target(&self) -> Option<GoalState>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GoalState {
    pub fn new(position: Vector2d, confidence: f64) -> Self {
        Self {
            position,
            confidence,
        }
    }
}

impl GoalStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidates with those from a new frame.
    pub fn update<I: IntoIterator<Item = GoalState>>(&mut self, candidates: I) {
        self.candidates.clear();
        self.candidates.extend(candidates);
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl GoalSource for GoalStates {
    /// The most confident candidate. Candidates with a NaN confidence are
    /// never chosen.
    fn best_vision_target(&self) -> Option<GoalState> {
        self.candidates
            .iter()
            .filter(|g| !g.confidence.is_nan())
            .fold(None, |best: Option<GoalState>, g| match best {
                Some(b) if b.confidence >= g.confidence => Some(b),
                _ => Some(*g),
            })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_best_target() {
        let mut goals = GoalStates::new();
        assert_eq!(goals.best_vision_target(), None);

        goals.update(vec![
            GoalState::new(Vector2d::new(100.0, 0.0), 0.4),
            GoalState::new(Vector2d::new(120.0, 10.0), 0.9),
            GoalState::new(Vector2d::new(80.0, -5.0), std::f64::NAN),
            GoalState::new(Vector2d::new(90.0, 5.0), 0.9),
        ]);
        assert_eq!(goals.len(), 4);

        // Highest confidence wins, first seen on a tie
        let best = goals.best_vision_target().unwrap();
        assert_eq!(best.position, Vector2d::new(120.0, 10.0));

        goals.clear();
        assert!(goals.is_empty());
        assert_eq!(goals.best_vision_target(), None);
    }
}
