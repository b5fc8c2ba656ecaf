//! # Session Scripts
//!
//! A recorded session is a JSON list of timed events:
//!
//! ```json
//! [
//!   { "at_ms": 0,    "event": { "type": "type", "text": "hello" } },
//!   { "at_ms": 10,   "event": { "type": "press_print" } },
//!   { "at_ms": 3200, "event": { "type": "pointer", "kind": "down",
//!                               "at": { "x": 640, "y": 300 },
//!                               "button": "primary", "target": "exit" } },
//!   { "at_ms": 3300, "event": { "type": "pointer", "kind": "up", "at": { "x": 640, "y": 300 } } }
//! ]
//! ```
//!
//! Replaying feeds every event to a [`MoodMemo`] in time order and collects
//! the effects.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::app::{Effect, Event, MoodMemo};
use crate::error::MemoError;
use crate::geometry::GeometryProvider;
use crate::random::RandomSource;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    /// Milliseconds since the toy was mounted
    pub at_ms: u64,
    pub event: Event,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn new(mut steps: Vec<Step>) -> Self {
        // stable: events at the same instant keep their order
        steps.sort_by_key(|s| s.at_ms);
        Self { steps }
    }

    pub fn from_json(json: &str) -> Result<Self, MemoError> {
        let steps: Vec<Step> =
            serde_json::from_str(json).map_err(|e| MemoError::Script(e.to_string()))?;
        Ok(Self::new(steps))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, MemoError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Time of the last event.
    pub fn end(&self) -> Duration {
        self.steps
            .last()
            .map(|s| Duration::from_millis(s.at_ms))
            .unwrap_or_default()
    }

    /// Feed every step to `memo`. Returns each effect with the time it was
    /// produced.
    pub fn replay<G, R>(&self, memo: &mut MoodMemo<G, R>) -> Vec<(Duration, Effect)>
    where
        G: GeometryProvider,
        R: RandomSource,
    {
        let mut effects = Vec::new();
        for step in &self.steps {
            let now = Duration::from_millis(step.at_ms);
            for effect in memo.handle(step.event.clone(), now) {
                effects.push((now, effect));
            }
        }
        effects
    }
}
