//! Spawn scheduler.
//!
//! Apples appear on a fixed cadence of `duration / apples` seconds.  Each
//! tick the scheduler works out how many apples *should* exist by now and
//! creates the missing ones, stamping each with its scheduled time rather
//! than the tick time, so loop jitter never drifts the cadence.
//!
//! ```text
//!  elapsed:  0 ─────── c ─────── 2c ─────── 3c ── …
//!  due:      1         2         3          4    … (capped at apples)
//!  spawn_t:  start     start+c   start+2c   start+3c
//! ```

use log::debug;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::Fault;
use crate::game::{Apple, AppleList, Arena, Edge, Level};

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

/// Creates apples for the active level.
pub struct SpawnScheduler {
    rng: Pcg32,
    /// Seconds between spawns.
    cadence: f64,
    /// Apples the level spawns in total.
    target: usize,
    /// Session start on the pause-adjusted clock.
    start: f64,
    /// Travel speed for every apple of this level.
    speed: f32,
}

impl SpawnScheduler {
    /// A scheduler with no level armed.  `seed` fixes the edge sequence.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            cadence: f64::INFINITY,
            target: 0,
            start: 0.0,
            speed: 0.0,
        }
    }

    /// Prepare for a new level starting at `start`.
    pub fn arm(&mut self, level: &Level, speed: f32, start: f64) {
        self.cadence = level.cadence_secs();
        self.target = usize::from(level.apples);
        self.start = start;
        self.speed = speed;
    }

    /// Drop the armed level; nothing spawns until the next `arm`.
    pub fn disarm(&mut self) {
        self.cadence = f64::INFINITY;
        self.target = 0;
    }

    pub fn cadence(&self) -> f64 {
        self.cadence
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Number of apples that should exist `elapsed` seconds into the level.
    pub fn due_count(&self, elapsed: f64) -> usize {
        if self.target == 0 || !self.cadence.is_finite() {
            return 0;
        }
        let slots = (elapsed.max(0.0) / self.cadence).floor();
        // Saturating float → int cast; `+ 1` for the apple at t = 0.
        (slots as usize).saturating_add(1).min(self.target)
    }

    /// Spawn every apple that is due.  Returns how many were created, or
    /// [`Fault::LevelExhausted`] once the level target has been reached.
    pub fn spawn_due(
        &mut self,
        elapsed: f64,
        apples: &mut AppleList,
        arena: &Arena,
    ) -> Result<usize, Fault> {
        if self.target > 0 && apples.len() >= self.target {
            return Err(Fault::LevelExhausted);
        }

        let due = self.due_count(elapsed);
        let mut spawned = 0;
        while apples.len() < due {
            let index = apples.len();
            let spawn_time = self.start + index as f64 * self.cadence;
            let edge = self.pick_edge();
            if apples
                .push(Apple::new(edge, self.speed, spawn_time, arena))
                .is_err()
            {
                return Err(Fault::LevelExhausted);
            }
            debug!("spawn #{index} from {edge:?} at t={spawn_time:.2}");
            spawned += 1;
        }
        Ok(spawned)
    }

    fn pick_edge(&mut self) -> Edge {
        Edge::ALL[self.rng.random_range(0..Edge::ALL.len())]
    }
}
