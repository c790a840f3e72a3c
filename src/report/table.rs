use csv::Writer;
use hifitime::prelude::TimeScale;
use log::info;

use std::io::Write;

use crate::{
    error::Error,
    report::fd::FileDescriptor,
    stf::{
        geodetic::{GeodeticEpoch, PositionMode},
        rxstatus::AgcSample,
    },
};

/// Per epoch table of positioned PVTGeodetic epochs
pub const GEODETIC_COLUMNS: [&str; 9] = [
    "time",
    "lat",
    "lon",
    "Height[m]",
    "NrSV",
    "Error",
    "SignalInfo",
    "signals",
    "2D/3D",
];

/// Per row table of complete ReceiverStatus rows
pub const RXSTATUS_COLUMNS: [&str; 3] = ["time", "FrontEnd", "AGCGain[dB]"];

/// CSV export of the processed epochs
pub struct EpochTable<W: Write> {
    writer: Writer<W>,
    rows: usize,
}

impl EpochTable<FileDescriptor> {
    pub fn create(filename: &str, gzip: bool, columns: &[&str]) -> Result<Self, Error> {
        let fd = FileDescriptor::new(gzip, filename)?;
        Self::new(fd, columns)
    }

    /// Flushes and closes the exported file. Returns the number of rows.
    pub fn release(self, filename: &str) -> Result<usize, Error> {
        let rows = self.rows();
        let fd = self.into_inner()?;
        fd.finish()?;

        info!("{} - {} rows exported", filename, rows);
        Ok(rows)
    }
}

impl<W: Write> EpochTable<W> {
    pub fn new(w: W, columns: &[&str]) -> Result<Self, Error> {
        let mut writer = Writer::from_writer(w);
        writer.write_record(columns)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Exports one positioned epoch, `signals` being the decoded mask name.
    /// Unpositioned epochs are not exported.
    pub fn geodetic(&mut self, epoch: &GeodeticEpoch, signals: &str) -> Result<(), Error> {
        let position = match epoch.position {
            Some(position) => position,
            None => return Ok(()),
        };

        let mode = match epoch.mode {
            Some(PositionMode::ThreeD) => "3D",
            Some(PositionMode::TwoD) => "2D",
            None => "",
        };

        self.writer.write_record(&[
            epoch.epoch.to_time_scale(TimeScale::UTC).to_string(),
            format!("{:.9}", position.latitude_deg),
            format!("{:.9}", position.longitude_deg),
            position
                .height_m
                .map(|h| format!("{:.3}", h))
                .unwrap_or_default(),
            epoch.nr_sv.map(|n| n.to_string()).unwrap_or_default(),
            epoch.error.to_string(),
            epoch.signal_info.0.to_string(),
            signals.to_string(),
            mode.to_string(),
        ])?;

        self.rows += 1;
        Ok(())
    }

    pub fn agc(&mut self, sample: &AgcSample) -> Result<(), Error> {
        self.writer.write_record(&[
            sample.epoch.to_time_scale(TimeScale::UTC).to_string(),
            sample.frontend.to_string(),
            format!("{:.1}", sample.gain_db),
        ])?;

        self.rows += 1;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

#[cfg(test)]
mod test {
    use super::{EpochTable, GEODETIC_COLUMNS, RXSTATUS_COLUMNS};
    use crate::{
        signal::SignalDecoder,
        stf::{
            StfFile,
            geodetic::{Columns as GeodeticColumns, GeodeticEpoch},
            rxstatus::{AgcSample, Columns as RxStatusColumns},
        },
        tests::{GEODETIC_STF, RXSTATUS_STF},
    };

    #[test]
    fn geodetic_table() {
        let mut stf = StfFile::from_reader(GEODETIC_STF.as_bytes()).unwrap();
        let columns = GeodeticColumns::locate(&stf).unwrap();
        let decoder = SignalDecoder::default();

        let mut table = EpochTable::new(Vec::new(), &GEODETIC_COLUMNS).unwrap();

        for record in stf.by_ref() {
            let epoch = GeodeticEpoch::from_record(&record.unwrap(), &columns)
                .unwrap()
                .unwrap();
            let name = decoder.name(epoch.signal_info).unwrap();
            table.geodetic(&epoch, &name).unwrap();
        }

        assert_eq!(table.rows(), 6);

        let content = String::from_utf8(table.into_inner().unwrap()).unwrap();
        let lines = content.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "time,lat,lon,Height[m],NrSV,Error,SignalInfo,signals,2D/3D"
        );

        let first = lines[1].split(',').collect::<Vec<_>>();
        assert!(first[0].ends_with("UTC"));
        assert!(first[1].starts_with("51.193"));
        assert!(first[2].starts_with("4.155"));
        assert_eq!(&first[3..], &["45.200", "12", "0", "65537", "GPS_L1-CA+GAL_L1A", "3D"]);

        assert!(lines[3].ends_with(",65537,GPS_L1-CA+GAL_L1A,2D"));
    }

    #[test]
    fn rxstatus_table() {
        let mut stf = StfFile::from_reader(RXSTATUS_STF.as_bytes()).unwrap();
        let columns = RxStatusColumns::locate(&stf).unwrap();

        let mut table = EpochTable::new(Vec::new(), &RXSTATUS_COLUMNS).unwrap();

        for record in stf.by_ref() {
            if let Some(sample) = AgcSample::from_record(&record.unwrap(), &columns).unwrap() {
                table.agc(&sample).unwrap();
            }
        }

        assert_eq!(table.rows(), 7);

        let content = String::from_utf8(table.into_inner().unwrap()).unwrap();
        let lines = content.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "time,FrontEnd,AGCGain[dB]");
        assert!(lines[1].ends_with(",0,28.0"));
        assert!(lines[2].ends_with(",3,31.0"));
    }
}
