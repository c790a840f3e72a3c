use flate2::{Compression, write::GzEncoder};
use std::{fs::File, io::Write};

use crate::error::Error;

pub enum FileDescriptor {
    Plain(File),
    Gzip(GzEncoder<File>),
}

impl std::io::Write for FileDescriptor {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(data),
            Self::Gzip(w) => w.write(data),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
        }
    }
}

impl FileDescriptor {
    pub fn new(gzip: bool, filename: &str) -> Result<Self, Error> {
        let fd = File::create(filename)?;

        if gzip {
            let compression = Compression::new(5);
            Ok(Self::Gzip(GzEncoder::new(fd, compression)))
        } else {
            Ok(Self::Plain(fd))
        }
    }

    /// Flushes and terminates the gzip stream, if any.
    pub fn finish(self) -> Result<(), Error> {
        match self {
            Self::Plain(mut w) => w.flush()?,
            Self::Gzip(w) => {
                let mut fd = w.finish()?;
                fd.flush()?;
            },
        }
        Ok(())
    }
}
