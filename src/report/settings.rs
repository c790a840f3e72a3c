use std::path::Path;

use crate::signal::UnknownBitPolicy;

#[derive(Debug, Clone)]
pub struct Settings {
    /// GNSS system name, used as report label
    pub gnss: String,

    /// GZIP compression
    pub gzip: bool,

    /// Custom output file
    pub output: Option<String>,

    /// Custom output folder
    pub prefix: Option<String>,

    /// Undecodable signal bits and codes handling
    pub policy: UnknownBitPolicy,
}

impl Settings {
    /// Output file name, deduced from the input STF file name
    /// unless a custom output was defined.
    pub fn filename(&self, input: &Path) -> String {
        let mut filepath = if let Some(output) = &self.output {
            output.to_string()
        } else {
            let mut filepath = if let Some(prefix) = &self.prefix {
                format!("{}/", prefix)
            } else {
                "".to_string()
            };

            filepath.push_str(&Self::stem(input));
            filepath.push_str(".json");
            filepath
        };

        if self.gzip && !filepath.ends_with(".gz") {
            filepath.push_str(".gz");
        }

        filepath
    }

    /// Per epoch CSV table file name: input file name with .csv
    /// extension, in the custom output folder if any.
    pub fn table_filename(&self, input: &Path) -> String {
        let mut filepath = if let Some(prefix) = &self.prefix {
            format!("{}/", prefix)
        } else {
            "".to_string()
        };

        filepath.push_str(&Self::stem(input));
        filepath.push_str(".csv");

        if self.gzip {
            filepath.push_str(".gz");
        }

        filepath
    }

    /// File name without folder, compression or STF extension
    fn stem(input: &Path) -> String {
        let mut name = input
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        if let Some(stripped) = name.strip_suffix(".gz") {
            name = stripped.to_string();
        }

        match name.rfind('.') {
            Some(0) | None => name,
            Some(offset) => name[..offset].to_string(),
        }
    }
}
