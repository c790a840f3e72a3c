#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * STF2REPORT post-processes Septentrio receiver logs converted by sbf2stf.
 * Authors: Alain Muls <alain.muls@mil.be> et al,
 * This tool is shipped under Mozilla Public V2 license.
 */

extern crate gnss_rs as gnss;

use env_logger::{Builder, Target};

use log::{debug, error, info, warn};

use std::{
    io::{Read, Write},
    path::Path,
    process::ExitCode,
};

mod cli;
mod error;
mod frontend;
mod pvt;
mod report;
mod runtime;
mod signal;
mod stf;
mod utils;

#[cfg(test)]
mod tests;

use crate::{
    cli::Cli,
    error::Error,
    report::{
        geodetic::{Collecter as GeodeticCollecter, GeodeticReport},
        rxstatus::{Collecter as RxStatusCollecter, RxStatusReport},
        settings::Settings,
        table::{EpochTable, GEODETIC_COLUMNS, RXSTATUS_COLUMNS},
    },
    signal::{STANDARD_SIGNALS, SignalDecoder},
    stf::{
        StfFile,
        geodetic::{Columns as GeodeticColumns, GeodeticEpoch},
        rxstatus::{AgcSample, Columns as RxStatusColumns},
    },
};

/// Consumes a PVTGeodetic_v2 table, exporting positioned epochs into `table`
fn consume_geodetic<R: Read, W: Write>(
    stf: &mut StfFile<R>,
    settings: &Settings,
    filename: &str,
    table: &mut EpochTable<W>,
) -> Result<GeodeticReport, Error> {
    let columns = GeodeticColumns::locate(stf)?;

    let decoder = SignalDecoder::new(&STANDARD_SIGNALS, settings.policy);
    let mut collecter = GeodeticCollecter::new(decoder);

    for record in stf.by_ref() {
        let record = record?;
        match GeodeticEpoch::from_record(&record, &columns)? {
            Some(epoch) => {
                if epoch.position.is_some() {
                    let signals = decoder.name(epoch.signal_info)?;
                    table.geodetic(&epoch, &signals)?;
                }
                collecter.latch(&epoch);
            },
            None => warn!("{}:{} - undated row", filename, record.line),
        }
    }

    collecter.report(&settings.gnss, filename)
}

/// Consumes a ReceiverStatus_2 table, exporting complete rows into `table`
fn consume_rx_status<R: Read, W: Write>(
    stf: &mut StfFile<R>,
    settings: &Settings,
    filename: &str,
    table: &mut EpochTable<W>,
) -> Result<RxStatusReport, Error> {
    let columns = RxStatusColumns::locate(stf)?;

    let mut collecter = RxStatusCollecter::new(settings.policy);

    for record in stf.by_ref() {
        let record = record?;
        match AgcSample::from_record(&record, &columns)? {
            Some(sample) => {
                table.agc(&sample)?;
                collecter.latch(&sample);
            },
            None => {
                debug!("{}:{} - incomplete row", filename, record.line);
                collecter.drop_row();
            },
        }
    }

    collecter.report(&settings.gnss, filename)
}

fn run(fullpath: &Path, rx_status: bool, settings: &Settings) -> Result<(), Error> {
    let filename = fullpath.to_string_lossy().to_string();
    let output = settings.filename(fullpath);
    let table_output = settings.table_filename(fullpath);

    info!("{} - reading STF file", filename);

    let mut stf = StfFile::open(fullpath)?;
    debug!("{} - columns: {:?}", filename, stf.columns());

    if rx_status {
        let mut table = EpochTable::create(&table_output, settings.gzip, &RXSTATUS_COLUMNS)?;
        let report = consume_rx_status(&mut stf, settings, &filename, &mut table)?;
        table.release(&table_output)?;

        report.log_summary();
        report::release(&report, &output, settings.gzip)
    } else {
        let mut table = EpochTable::create(&table_output, settings.gzip, &GEODETIC_COLUMNS)?;
        let report = consume_geodetic(&mut stf, settings, &filename, &mut table)?;
        table.release(&table_output)?;

        report.log_summary();
        report::release(&report, &output, settings.gzip)
    }
}

pub fn main() -> ExitCode {
    let mut builder = Builder::from_default_env();

    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    // cli
    let cli = Cli::new();
    let settings = cli.report_settings();

    let fullpath = match cli.filepath() {
        Ok(fullpath) => fullpath,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    match run(&fullpath, cli.rx_status(), &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{} - {}", fullpath.display(), e);
            ExitCode::FAILURE
        },
    }
}
