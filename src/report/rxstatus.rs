use std::collections::BTreeMap;

use hifitime::prelude::Duration;
use log::{info, warn};
use serde::Serialize;

use crate::{
    error::Error,
    frontend::classify_front_end,
    runtime::{Runtime, TimeSpan},
    signal::UnknownBitPolicy,
    stf::rxstatus::AgcSample,
};

/// AGC statistics of one front-end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontEndGroup {
    pub code: u32,
    pub name: String,
    pub samples: usize,
    pub min_db: f64,
    pub max_db: f64,
    pub mean_db: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RxStatusReport {
    pub gnss: String,
    pub file: String,
    pub time: Option<TimeSpan>,
    pub rows: usize,
    pub dropped_rows: usize,
    pub min_db: Option<f64>,
    pub max_db: Option<f64>,
    pub frontends: Vec<FrontEndGroup>,
}

#[derive(Debug, Copy, Clone)]
struct AgcStats {
    samples: usize,
    min: f64,
    max: f64,
    sum: f64,
}

impl AgcStats {
    fn new(gain_db: f64) -> Self {
        Self {
            samples: 1,
            min: gain_db,
            max: gain_db,
            sum: gain_db,
        }
    }

    fn latch(&mut self, gain_db: f64) {
        self.samples += 1;
        self.min = self.min.min(gain_db);
        self.max = self.max.max(gain_db);
        self.sum += gain_db;
    }
}

/// Accumulates [AgcSample]s
pub struct Collecter {
    policy: UnknownBitPolicy,
    runtime: Runtime,
    frontends: BTreeMap<u32, AgcStats>,
    rows: usize,
    dropped: usize,
}

impl Collecter {
    pub fn new(policy: UnknownBitPolicy) -> Self {
        Self {
            policy,
            runtime: Runtime::new(),
            frontends: Default::default(),
            rows: 0,
            dropped: 0,
        }
    }

    pub fn latch(&mut self, sample: &AgcSample) {
        self.rows += 1;
        self.runtime.new_epoch(sample.epoch);

        self.frontends
            .entry(sample.frontend)
            .and_modify(|stats| stats.latch(sample.gain_db))
            .or_insert_with(|| AgcStats::new(sample.gain_db));
    }

    /// Declares one incomplete row
    pub fn drop_row(&mut self) {
        self.dropped += 1;
    }

    fn frontend_group(&self, code: u32, stats: &AgcStats) -> Result<FrontEndGroup, Error> {
        let name = match classify_front_end(code) {
            Ok(name) => name.to_string(),
            Err(e) => match self.policy {
                UnknownBitPolicy::Fail => return Err(e),
                UnknownBitPolicy::Ignore => {
                    warn!("{}", e);
                    format!("unknown #{}", code)
                },
            },
        };

        Ok(FrontEndGroup {
            code,
            name,
            samples: stats.samples,
            min_db: stats.min,
            max_db: stats.max,
            mean_db: stats.sum / stats.samples as f64,
        })
    }

    /// Terminates collection
    pub fn report(&self, gnss: &str, file: &str) -> Result<RxStatusReport, Error> {
        let frontends = self
            .frontends
            .iter()
            .map(|(code, stats)| self.frontend_group(*code, stats))
            .collect::<Result<Vec<_>, _>>()?;

        let min_db = frontends.iter().map(|fe| fe.min_db).reduce(f64::min);
        let max_db = frontends.iter().map(|fe| fe.max_db).reduce(f64::max);

        Ok(RxStatusReport {
            gnss: gnss.to_string(),
            file: file.to_string(),
            time: self.runtime.time_span(Duration::from_seconds(1.0)),
            rows: self.rows,
            dropped_rows: self.dropped,
            min_db,
            max_db,
            frontends,
        })
    }
}

impl RxStatusReport {
    pub fn log_summary(&self) {
        if let Some(time) = &self.time {
            info!(
                "{} - {} epochs from {} to {} ({})",
                self.file, time.epochs, time.first, time.last, time.duration
            );
        }

        if self.dropped_rows > 0 {
            warn!(
                "{} - dropped {} incomplete rows (kept {})",
                self.file, self.dropped_rows, self.rows
            );
        }

        for fe in self.frontends.iter() {
            info!(
                "{} - front-end #{} \"{}\": {} samples, AGC {:.1}/{:.1}/{:.1} dB (min/mean/max)",
                self.gnss, fe.code, fe.name, fe.samples, fe.min_db, fe.mean_db, fe.max_db
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::Collecter;
    use crate::{
        error::Error,
        signal::UnknownBitPolicy,
        stf::{
            StfFile,
            rxstatus::{AgcSample, Columns},
        },
        tests::{RXSTATUS_STF, init_logger},
    };

    fn collect(content: &str, policy: UnknownBitPolicy) -> Collecter {
        let mut stf = StfFile::from_reader(content.as_bytes()).unwrap();
        let columns = Columns::locate(&stf).unwrap();

        let mut collecter = Collecter::new(policy);

        for record in stf.by_ref() {
            match AgcSample::from_record(&record.unwrap(), &columns).unwrap() {
                Some(sample) => collecter.latch(&sample),
                None => collecter.drop_row(),
            }
        }
        collecter
    }

    #[test]
    fn rxstatus_report() {
        init_logger();

        let collecter = collect(RXSTATUS_STF, UnknownBitPolicy::Fail);
        let report = collecter.report("GPS+GAL", "RxStatus.stf").unwrap();

        report.log_summary();

        assert_eq!(report.rows, 7);
        assert_eq!(report.dropped_rows, 1);
        assert_eq!(report.time.as_ref().unwrap().epochs, 4);
        assert_eq!(report.min_db, Some(26.0));
        assert_eq!(report.max_db, Some(40.0));

        let summary = report
            .frontends
            .iter()
            .map(|fe| (fe.code, fe.name.as_str(), fe.samples))
            .collect::<Vec<_>>();

        assert_eq!(
            summary,
            vec![
                (0, "GPS/SBAS/Galileo L1", 4),
                (3, "GPS L2", 2),
                (5, "GPS/SBAS/Galileo L5/E5a", 1),
            ]
        );

        let l1 = &report.frontends[0];
        assert_eq!(l1.min_db, 26.0);
        assert_eq!(l1.max_db, 29.0);
        assert_eq!(l1.mean_db, 27.5);

        let l2 = &report.frontends[1];
        assert_eq!(l2.mean_db, 32.0);
    }

    #[test]
    fn unknown_frontend() {
        let content = "\
TOW[s],WNc[week],FrontEnd,AGCGain[dB]
units
100.0,2100,12,30.0
";

        let strict = collect(content, UnknownBitPolicy::Fail);
        assert!(matches!(
            strict.report("GPS", "test.stf"),
            Err(Error::UnknownCode { code: 12, .. })
        ));

        let tolerant = collect(content, UnknownBitPolicy::Ignore);
        let report = tolerant.report("GPS", "test.stf").unwrap();
        assert_eq!(report.frontends[0].name, "unknown #12");
    }

    #[test]
    fn do_not_use_rows() {
        let content = "\
TOW[s],WNc[week],FrontEnd,AGCGain[dB]
units
345600.0,2100,0,30.0
4294967.295,65535,0,-128
";
        let collecter = collect(content, UnknownBitPolicy::Fail);
        let report = collecter.report("GPS", "test.stf").unwrap();

        assert_eq!(report.rows, 1);
        assert_eq!(report.dropped_rows, 1);
        assert_eq!(report.min_db, Some(30.0));

        let time = report.time.unwrap();
        assert_eq!(time.epochs, 1);
        assert_eq!(time.first, time.last);
    }

    #[test]
    fn empty_report() {
        let collecter = collect(
            "TOW[s],WNc[week],FrontEnd,AGCGain[dB]\nunits\n",
            UnknownBitPolicy::Fail,
        );
        let report = collecter.report("GPS", "test.stf").unwrap();
        assert!(report.time.is_none());
        assert!(report.min_db.is_none());
        assert!(report.frontends.is_empty());
    }
}
