use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};

use std::path::{Path, PathBuf};

use crate::{error::Error, report::settings::Settings, signal::UnknownBitPolicy};

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: Self::command().get_matches(),
        }
    }

    fn command() -> Command {
        Command::new("stf2report")
            .author("Alain Muls <alain.muls@mil.be>")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Septentrio STF (sbf2stf) signal, PVT error and AGC summaries")
            .color(ColorChoice::Always)
            .arg_required_else_help(true)
            .next_help_heading("Input")
            .arg(
                Arg::new("dir")
                    .short('d')
                    .long("dir")
                    .value_name("DIR")
                    .required(false)
                    .default_value(".")
                    .help("Directory of the STF file (defaults to .)"),
            )
            .arg(
                Arg::new("file")
                    .short('f')
                    .long("file")
                    .value_name("FILE")
                    .required(true)
                    .help("STF file (PVTGeodetic_v2 or ReceiverStatus_2). May be gzip compressed (.gz)."),
            )
            .arg(
                Arg::new("gnss")
                    .short('g')
                    .long("gnss")
                    .value_name("NAME")
                    .required(true)
                    .help("GNSS system name, used to label the report"),
            )
            .arg(
                Arg::new("rx-status")
                    .long("rx-status")
                    .action(ArgAction::SetTrue)
                    .help("Input is a ReceiverStatus_2 file: summarize AGC per front-end. By default, input is a PVTGeodetic_v2 file."),
            )
            .next_help_heading("Decoding")
            .arg(
                Arg::new("ignore-unknown")
                    .long("ignore-unknown")
                    .action(ArgAction::SetTrue)
                    .help("Omit signal bits that the signal table does not describe, and tolerate unknown front-end or PVT error codes. By default, these abort the processing."),
            )
            .next_help_heading("Output")
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FILE")
                    .required(false)
                    .help("Custom report file. By default, the input file name with .json extension. The per epoch .csv table always follows the input file name."),
            )
            .arg(
                Arg::new("prefix")
                    .long("prefix")
                    .value_name("DIR")
                    .required(false)
                    .help("Custom output folder, for both the report and the .csv table"),
            )
            .arg(
                Arg::new("gzip")
                    .long("gzip")
                    .action(ArgAction::SetTrue)
                    .help("Gzip compress the report and the .csv table"),
            )
    }

    /// Working directory, which must exist
    pub fn working_directory(&self) -> Result<PathBuf, Error> {
        let dir = self
            .matches
            .get_one::<String>("dir")
            .map(|s| s.as_str())
            .unwrap_or(".");

        let path = Path::new(dir);
        if path.is_dir() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::DirectoryNotFound(dir.to_string()))
        }
    }

    /// STF file path, relative to the working directory
    pub fn filepath(&self) -> Result<PathBuf, Error> {
        let workdir = self.working_directory()?;
        let file = self
            .matches
            .get_one::<String>("file")
            .map(|s| s.as_str())
            .unwrap_or_default();
        Ok(workdir.join(file))
    }

    pub fn rx_status(&self) -> bool {
        self.matches.get_flag("rx-status")
    }

    pub fn policy(&self) -> UnknownBitPolicy {
        if self.matches.get_flag("ignore-unknown") {
            UnknownBitPolicy::Ignore
        } else {
            UnknownBitPolicy::Fail
        }
    }

    pub fn report_settings(&self) -> Settings {
        Settings {
            gnss: self
                .matches
                .get_one::<String>("gnss")
                .map(|s| s.to_string())
                .unwrap_or_default(),
            gzip: self.matches.get_flag("gzip"),
            output: self.matches.get_one::<String>("output").cloned(),
            prefix: self.matches.get_one::<String>("prefix").cloned(),
            policy: self.policy(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Cli;
    use crate::signal::UnknownBitPolicy;

    fn parse(args: &[&str]) -> Cli {
        Cli {
            matches: Cli::command().get_matches_from(args),
        }
    }

    #[test]
    fn default_settings() {
        let cli = parse(&["stf2report", "-f", "SEPT2310.stf", "-g", "GPS+GAL"]);

        assert!(!cli.rx_status());
        assert_eq!(cli.policy(), UnknownBitPolicy::Fail);
        assert!(cli.working_directory().is_ok());
        assert!(cli.filepath().unwrap().ends_with("SEPT2310.stf"));

        let settings = cli.report_settings();
        assert_eq!(settings.gnss, "GPS+GAL");
        assert!(!settings.gzip);
        assert!(settings.output.is_none());
        assert!(settings.prefix.is_none());
    }

    #[test]
    fn custom_settings() {
        let cli = parse(&[
            "stf2report",
            "-f",
            "SEPT2310_RxStatus.stf.gz",
            "-g",
            "GAL",
            "--rx-status",
            "--ignore-unknown",
            "--gzip",
            "-o",
            "agc.json",
        ]);

        assert!(cli.rx_status());
        assert_eq!(cli.policy(), UnknownBitPolicy::Ignore);

        let settings = cli.report_settings();
        assert!(settings.gzip);
        assert_eq!(settings.output.as_deref(), Some("agc.json"));
        assert_eq!(settings.policy, UnknownBitPolicy::Ignore);
    }

    #[test]
    fn missing_directory() {
        let cli = parse(&[
            "stf2report",
            "-d",
            "/this/folder/does/not/exist",
            "-f",
            "SEPT2310.stf",
            "-g",
            "GPS",
        ]);
        assert!(cli.working_directory().is_err());
        assert!(cli.filepath().is_err());
    }
}
