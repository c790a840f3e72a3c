use std::io::Read;

use hifitime::prelude::Epoch;
use serde::Serialize;

use crate::{
    error::Error,
    signal::SignalMask,
    stf::{Record, StfFile, TOW, WNC},
};

const ERROR: &str = "Error";
const SIGNAL_INFO: &str = "SignalInfo";
const MODE_2D_3D: &str = "2D/3D";
const NR_SV: &str = "NrSV";
const LATITUDE: &str = "Latitude[rad]";
const LONGITUDE: &str = "Longitude[rad]";
const HEIGHT: &str = "Height[m]";

/// Positioning mode of a PVT solution
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PositionMode {
    ThreeD,
    TwoD,
}

impl PositionMode {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::ThreeD),
            1 => Some(Self::TwoD),
            _ => None,
        }
    }
}

/// Geodetic position, in decimal degrees and meters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Position {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub height_m: Option<f64>,
}

/// Column indices of a PVTGeodetic_v2 table
#[derive(Debug, Copy, Clone)]
pub struct Columns {
    wnc: usize,
    tow: usize,
    error: usize,
    signal_info: usize,
    mode: Option<usize>,
    nr_sv: Option<usize>,
    latitude: usize,
    longitude: usize,
    height: Option<usize>,
}

impl Columns {
    /// Locates all columns we need. 2D/3D, NrSV and Height are optional.
    pub fn locate<R: Read>(stf: &StfFile<R>) -> Result<Self, Error> {
        Ok(Self {
            wnc: stf.column(WNC)?,
            tow: stf.column(TOW)?,
            error: stf.column(ERROR)?,
            signal_info: stf.column(SIGNAL_INFO)?,
            mode: stf.column(MODE_2D_3D).ok(),
            nr_sv: stf.column(NR_SV).ok(),
            latitude: stf.column(LATITUDE)?,
            longitude: stf.column(LONGITUDE)?,
            height: stf.column(HEIGHT).ok(),
        })
    }
}

/// One PVTGeodetic epoch
#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticEpoch {
    /// [Epoch] in GPST
    pub epoch: Epoch,

    /// Raw PVT error code
    pub error: u32,

    /// Signals used in this solution
    pub signal_info: SignalMask,

    pub mode: Option<PositionMode>,

    /// Number of satellites used
    pub nr_sv: Option<u32>,

    /// None when no position was produced
    pub position: Option<Position>,
}

impl GeodeticEpoch {
    /// Interprets a [Record]. Returns None when the record is not dated.
    pub fn from_record(record: &Record, columns: &Columns) -> Result<Option<Self>, Error> {
        let epoch = match record.gpst_epoch(columns.wnc, columns.tow)? {
            Some(epoch) => epoch,
            None => return Ok(None),
        };

        let error = record.parse_u32(columns.error, ERROR)?.unwrap_or_default();

        let signal_info = record
            .parse_u32(columns.signal_info, SIGNAL_INFO)?
            .unwrap_or_default();

        let mode = match columns.mode {
            Some(index) => record
                .parse_u32(index, MODE_2D_3D)?
                .and_then(PositionMode::from_code),
            None => None,
        };

        let nr_sv = match columns.nr_sv {
            Some(index) => record.parse_u32(index, NR_SV)?,
            None => None,
        };

        let latitude = record.parse_f64(columns.latitude, LATITUDE)?;
        let longitude = record.parse_f64(columns.longitude, LONGITUDE)?;

        let height_m = match columns.height {
            Some(index) => record.parse_f64(index, HEIGHT)?,
            None => None,
        };

        let position = match (latitude, longitude) {
            (Some(lat_rad), Some(long_rad)) => Some(Position {
                latitude_deg: lat_rad.to_degrees(),
                longitude_deg: long_rad.to_degrees(),
                height_m,
            }),
            _ => None,
        };

        Ok(Some(Self {
            epoch,
            error,
            signal_info: SignalMask(signal_info),
            mode,
            nr_sv,
            position,
        }))
    }
}
