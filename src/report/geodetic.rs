use std::collections::BTreeMap;

use hifitime::prelude::Duration;
use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    error::Error,
    pvt::{PvtError, classify_pvt_error},
    runtime::{Runtime, TimeSpan},
    signal::{SignalDecoder, SignalMask, UnknownBitPolicy},
    stf::geodetic::{GeodeticEpoch, Position, PositionMode},
};

/// Epochs that used one signal combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalGroup {
    pub mask: SignalMask,
    /// Combination name (labels joined with '+')
    pub name: String,
    pub labels: Vec<&'static str>,
    pub constellations: Vec<String>,
    pub epochs_3d: usize,
    pub epochs_2d: usize,
    /// Positioned epochs without (valid) 2D/3D mode
    pub epochs_no_mode: usize,
}

/// Epochs that reported one PVT error code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorGroup {
    pub code: u32,
    pub label: String,
    /// Solution deliberately suppressed (code 127)
    pub suppressed: bool,
    /// Solver failure (codes 1 to 9)
    pub failure: bool,
    pub epochs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeodeticReport {
    pub gnss: String,
    pub file: String,
    pub time: Option<TimeSpan>,
    pub positioned_epochs: usize,
    pub unpositioned_epochs: usize,
    pub first_position: Option<Position>,
    pub last_position: Option<Position>,
    pub signals: Vec<SignalGroup>,
    pub errors: Vec<ErrorGroup>,
}

#[derive(Debug, Default, Copy, Clone)]
struct ModeCount {
    epochs_3d: usize,
    epochs_2d: usize,
    epochs_no_mode: usize,
}

/// Accumulates [GeodeticEpoch]s
pub struct Collecter<'a> {
    decoder: SignalDecoder<'a>,
    runtime: Runtime,
    signals: BTreeMap<SignalMask, ModeCount>,
    errors: BTreeMap<u32, usize>,
    positioned: usize,
    unpositioned: usize,
    first_position: Option<Position>,
    last_position: Option<Position>,
}

impl<'a> Collecter<'a> {
    pub fn new(decoder: SignalDecoder<'a>) -> Self {
        Self {
            decoder,
            runtime: Runtime::new(),
            signals: Default::default(),
            errors: Default::default(),
            positioned: 0,
            unpositioned: 0,
            first_position: None,
            last_position: None,
        }
    }

    pub fn latch(&mut self, epoch: &GeodeticEpoch) {
        self.runtime.new_epoch(epoch.epoch);

        *self.errors.entry(epoch.error).or_default() += 1;

        match epoch.position {
            Some(position) => {
                self.positioned += 1;

                if self.first_position.is_none() {
                    self.first_position = Some(position);
                }
                self.last_position = Some(position);

                let count = self.signals.entry(epoch.signal_info).or_default();

                match epoch.mode {
                    Some(PositionMode::ThreeD) => count.epochs_3d += 1,
                    Some(PositionMode::TwoD) => count.epochs_2d += 1,
                    None => {
                        debug!("{} - positioned epoch without 2D/3D mode", epoch.epoch);
                        count.epochs_no_mode += 1;
                    },
                }
            },
            None => {
                self.unpositioned += 1;
                debug!(
                    "{} - no position: {}",
                    epoch.epoch,
                    classify_pvt_error(epoch.error).unwrap_or("unknown PVT error")
                );
            },
        }
    }

    fn signal_group(&self, mask: SignalMask, count: &ModeCount) -> Result<SignalGroup, Error> {
        let labels = self.decoder.decode(mask)?;
        let name = self.decoder.name(mask)?;

        Ok(SignalGroup {
            mask,
            name,
            labels,
            constellations: mask
                .constellations()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            epochs_3d: count.epochs_3d,
            epochs_2d: count.epochs_2d,
            epochs_no_mode: count.epochs_no_mode,
        })
    }

    fn error_group(&self, code: u32, epochs: usize) -> Result<ErrorGroup, Error> {
        match PvtError::try_from(code) {
            Ok(error) => Ok(ErrorGroup {
                code,
                label: error.to_string(),
                suppressed: error.is_suppressed(),
                failure: error.is_failure(),
                epochs,
            }),
            Err(e) => match self.decoder.policy() {
                UnknownBitPolicy::Fail => Err(e),
                UnknownBitPolicy::Ignore => {
                    warn!("{}", e);
                    Ok(ErrorGroup {
                        code,
                        label: format!("unknown #{}", code),
                        suppressed: false,
                        failure: true,
                        epochs,
                    })
                },
            },
        }
    }

    /// Terminates collection
    pub fn report(&self, gnss: &str, file: &str) -> Result<GeodeticReport, Error> {
        let signals = self
            .signals
            .iter()
            .map(|(mask, count)| self.signal_group(*mask, count))
            .collect::<Result<Vec<_>, _>>()?;

        let errors = self
            .errors
            .iter()
            .map(|(code, epochs)| self.error_group(*code, *epochs))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GeodeticReport {
            gnss: gnss.to_string(),
            file: file.to_string(),
            time: self.runtime.time_span(Duration::from_seconds(1.0)),
            positioned_epochs: self.positioned,
            unpositioned_epochs: self.unpositioned,
            first_position: self.first_position,
            last_position: self.last_position,
            signals,
            errors,
        })
    }
}

impl GeodeticReport {
    pub fn log_summary(&self) {
        if let Some(time) = &self.time {
            info!(
                "{} - {} epochs from {} to {} ({})",
                self.file, time.epochs, time.first, time.last, time.duration
            );
        }

        info!(
            "{} - {} positioned epochs, {} without position",
            self.file, self.positioned_epochs, self.unpositioned_epochs
        );

        for group in self.signals.iter() {
            info!(
                "{} - signals {} = {} (3D: {}, 2D: {}, no mode: {})",
                self.gnss,
                group.mask.0,
                group.name,
                group.epochs_3d,
                group.epochs_2d,
                group.epochs_no_mode
            );
        }

        for group in self.errors.iter() {
            if group.suppressed {
                warn!(
                    "{} - PVT error #{} \"{}\": {} epochs",
                    self.gnss, group.code, group.label, group.epochs
                );
            } else {
                info!(
                    "{} - PVT error #{} \"{}\": {} epochs",
                    self.gnss, group.code, group.label, group.epochs
                );
            }
        }
    }
}
