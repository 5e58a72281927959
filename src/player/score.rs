//! Hits, points and the match clock.

use std::time::Duration;

use bevy::prelude::*;

use crate::persistence::HighScoreStore;

/// Player score for the current match.
#[derive(Resource, Debug, Default, Clone)]
pub struct Score {
    pub hits: u32,
    pub points: u32,
    /// The last computed points beat the stored best.
    pub points_record: bool,
    started_at: Option<Duration>,
    elapsed_secs: f64,
}

impl Score {
    /// Start (or restart) the match clock at `now`.
    pub fn start_time_counter(&mut self, now: Duration) {
        self.started_at = Some(now);
        self.elapsed_secs = 0.0;
    }

    /// Stop the match clock at `now`. A clock that never started reads 0.
    pub fn stop_time_counter(&mut self, now: Duration) {
        self.elapsed_secs = self
            .started_at
            .map_or(0.0, |start| now.saturating_sub(start).as_secs_f64());
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Final points for the match, then check them against the stored best.
    ///
    /// Every hit is worth 100. Elapsed seconds are subtracted when that still
    /// leaves something, then one point per shot. A non-positive result falls
    /// back to the number of hits.
    pub fn calculate_points(&mut self, shots: u32, store: &mut dyn HighScoreStore) -> u32 {
        let elapsed = if self.elapsed_secs == 0.0 {
            1.0
        } else {
            self.elapsed_secs
        };

        let mut points = f64::from(self.hits) * 100.0;
        if elapsed < points {
            points -= elapsed;
        }
        points = (points - f64::from(shots)).trunc();

        self.points = if points > 0.0 { points as u32 } else { self.hits };
        self.check_and_save_record(store);
        self.points
    }

    fn check_and_save_record(&mut self, store: &mut dyn HighScoreStore) {
        self.points_record = false;
        if store.best() < self.points {
            self.points_record = true;
            if let Err(e) = store.set_best(self.points) {
                error!("{}", e);
            }
        }
    }

    /// Best score to show on the end menu.
    pub fn last_record(&self, store: &dyn HighScoreStore) -> u32 {
        store.best()
    }
}
