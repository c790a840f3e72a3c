use log::info;
use serde::Serialize;

pub mod fd;
pub mod geodetic;
pub mod rxstatus;
pub mod settings;
pub mod table;

use fd::FileDescriptor;

use crate::error::Error;

/// Writes `report` as pretty JSON into `filename`.
pub fn release<T: Serialize>(report: &T, filename: &str, gzip: bool) -> Result<(), Error> {
    let mut fd = FileDescriptor::new(gzip, filename)?;

    serde_json::to_writer_pretty(&mut fd, report)?;
    fd.finish()?;

    info!("{} - report released", filename);
    Ok(())
}
