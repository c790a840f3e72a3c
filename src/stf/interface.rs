use flate2::read::GzDecoder;
use std::{fs::File, io::Read};

/// Read-only [Interface] to the STF content
pub enum Interface {
    /// Plain (readable) STF file
    Plain(File),

    /// Gzip compressed STF file
    Gzip(GzDecoder<File>),
}

impl Interface {
    /// Creates a new plain file interface
    pub fn from_file_handle(handle: File) -> Self {
        Self::Plain(handle)
    }

    /// Creates a new gzip decompressing interface
    pub fn from_gzip_file_handle(handle: File) -> Self {
        Self::Gzip(GzDecoder::new(handle))
    }
}

impl Read for Interface {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(r) => r.read(buf),
            Self::Gzip(r) => r.read(buf),
        }
    }
}
