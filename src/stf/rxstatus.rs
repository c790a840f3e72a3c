use std::io::Read;

use hifitime::prelude::Epoch;

use crate::{
    error::Error,
    stf::{Record, StfFile, TOW, WNC},
};

const FRONT_END: &str = "FrontEnd";
const AGC_GAIN: &str = "AGCGain[dB]";

/// AGC gain "do-not-use" value
pub const DO_NOT_USE_AGC_DB: f64 = -128.0;

/// Column indices of a ReceiverStatus_2 table
#[derive(Debug, Copy, Clone)]
pub struct Columns {
    wnc: usize,
    tow: usize,
    frontend: usize,
    gain: usize,
}

impl Columns {
    pub fn locate<R: Read>(stf: &StfFile<R>) -> Result<Self, Error> {
        Ok(Self {
            wnc: stf.column(WNC)?,
            tow: stf.column(TOW)?,
            frontend: stf.column(FRONT_END)?,
            gain: stf.column(AGC_GAIN)?,
        })
    }
}

/// AGC gain reported for one front-end
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AgcSample {
    pub epoch: Epoch,
    /// Raw front-end code
    pub frontend: u32,
    pub gain_db: f64,
}

impl AgcSample {
    /// Interprets a [Record]. Returns None when any of the fields is missing.
    pub fn from_record(record: &Record, columns: &Columns) -> Result<Option<Self>, Error> {
        let epoch = record.gpst_epoch(columns.wnc, columns.tow)?;
        let frontend = record.parse_u32(columns.frontend, FRONT_END)?;
        let gain_db = record
            .parse_f64(columns.gain, AGC_GAIN)?
            .filter(|gain_db| *gain_db != DO_NOT_USE_AGC_DB);

        match (epoch, frontend, gain_db) {
            (Some(epoch), Some(frontend), Some(gain_db)) => Ok(Some(Self {
                epoch,
                frontend,
                gain_db,
            })),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{AgcSample, Columns};
    use crate::{stf::StfFile, tests::RXSTATUS_STF};

    #[test]
    fn agc_samples() {
        let mut stf = StfFile::from_reader(RXSTATUS_STF.as_bytes()).unwrap();
        let columns = Columns::locate(&stf).unwrap();

        let samples = stf
            .by_ref()
            .map(|record| AgcSample::from_record(&record.unwrap(), &columns).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(samples.len(), 8);
        assert_eq!(samples.iter().filter(|s| s.is_none()).count(), 1);

        let first = samples[0].unwrap();
        assert_eq!(first.frontend, 0);
        assert_eq!(first.gain_db, 28.0);

        // same epoch, other front-end
        let second = samples[1].unwrap();
        assert_eq!(second.frontend, 3);
        assert_eq!(second.epoch, first.epoch);
    }

    #[test]
    fn do_not_use_samples() {
        let content = "\
TOW[s],WNc[week],FrontEnd,AGCGain[dB]
units
345600.0,2100,0,-128
345600.0,65535,0,28
4294967.295,2100,0,28
345600.0,2100,0,-127
";
        let mut stf = StfFile::from_reader(content.as_bytes()).unwrap();
        let columns = Columns::locate(&stf).unwrap();

        let samples = stf
            .by_ref()
            .map(|record| AgcSample::from_record(&record.unwrap(), &columns).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(samples.len(), 4);
        assert!(samples[0].is_none());
        assert!(samples[1].is_none());
        assert!(samples[2].is_none());
        assert_eq!(samples[3].unwrap().gain_db, -127.0);
    }
}
