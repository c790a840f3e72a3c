use hifitime::prelude::{Duration, Epoch, TimeScale};
use serde::Serialize;

#[derive(Debug, Default, Clone)]
pub struct Runtime {
    /// Latest [Epoch]
    pub epoch: Option<Epoch>,

    /// First [Epoch]
    first_epoch: Option<Epoch>,

    /// Time span as [Duration]
    pub span: Duration,

    /// Number of distinct epochs
    pub epochs: usize,
}

/// Observation time span, expressed in UTC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSpan {
    pub first: String,
    pub last: String,
    pub epochs: usize,
    pub duration: String,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update latest epoch. Rows sharing the same epoch are only counted once.
    pub fn new_epoch(&mut self, epoch: Epoch) {
        if self.epoch == Some(epoch) {
            return;
        }

        let first = *self.first_epoch.get_or_insert(epoch);

        self.epoch = Some(epoch);
        self.span = epoch - first;
        self.epochs += 1;
    }

    /// Returns first epoch in [TimeScale::UTC]
    pub fn first_utc(&self) -> Option<Epoch> {
        self.first_epoch.map(|t| t.to_time_scale(TimeScale::UTC))
    }

    /// Returns current epoch in [TimeScale::UTC]
    pub fn utc_time(&self) -> Option<Epoch> {
        self.epoch.map(|t| t.to_time_scale(TimeScale::UTC))
    }

    /// Summarizes the time frame, None if no epoch was ever latched.
    pub fn time_span(&self, precision: Duration) -> Option<TimeSpan> {
        let first = self.first_utc()?;
        let last = self.utc_time()?;

        Some(TimeSpan {
            first: first.round(precision).to_string(),
            last: last.round(precision).to_string(),
            epochs: self.epochs,
            duration: self.span.round(precision).to_string(),
        })
    }
}
