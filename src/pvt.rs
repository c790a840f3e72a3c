use crate::error::Error;

/// PVT error code, as reported in PVTGeodetic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PvtError {
    /// Valid solution
    NoError,
    NotEnoughMeasurements,
    NotEnoughEphemerides,
    /// DOP larger than 15
    DopTooLarge,
    ResidualsTooLarge,
    NoConvergence,
    NotEnoughMeasurementsAfterRejection,
    ExportLawsProhibited,
    NotEnoughDifferentialCorrections,
    BaseCoordinatesUnavailable,
    /// Valid position output actively suppressed (e.g. PRS denial)
    Suppressed,
}

impl PvtError {
    pub fn code(&self) -> u8 {
        match self {
            Self::NoError => 0,
            Self::NotEnoughMeasurements => 1,
            Self::NotEnoughEphemerides => 2,
            Self::DopTooLarge => 3,
            Self::ResidualsTooLarge => 4,
            Self::NoConvergence => 5,
            Self::NotEnoughMeasurementsAfterRejection => 6,
            Self::ExportLawsProhibited => 7,
            Self::NotEnoughDifferentialCorrections => 8,
            Self::BaseCoordinatesUnavailable => 9,
            Self::Suppressed => 127,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoError => "no error.",
            Self::NotEnoughMeasurements => "not enough meas",
            Self::NotEnoughEphemerides => "not enough ephem",
            Self::DopTooLarge => "DOP too large",
            Self::ResidualsTooLarge => "squared residuals too large",
            Self::NoConvergence => "no convergence",
            Self::NotEnoughMeasurementsAfterRejection => {
                "not enough measurements after outlier rejection"
            },
            Self::ExportLawsProhibited => "position output prohibited due to export laws",
            Self::NotEnoughDifferentialCorrections => {
                "not enough differential corrections available"
            },
            Self::BaseCoordinatesUnavailable => "base station coordinates unavailable",
            Self::Suppressed => "PNT actively suppressed",
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Self::NoError
    }

    /// Deliberate suppression, as opposed to a solver failure
    pub fn is_suppressed(&self) -> bool {
        *self == Self::Suppressed
    }

    /// Solver could not produce a solution (codes 1 to 9)
    pub fn is_failure(&self) -> bool {
        !self.is_success() && !self.is_suppressed()
    }
}

impl TryFrom<u32> for PvtError {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::NoError),
            1 => Ok(Self::NotEnoughMeasurements),
            2 => Ok(Self::NotEnoughEphemerides),
            3 => Ok(Self::DopTooLarge),
            4 => Ok(Self::ResidualsTooLarge),
            5 => Ok(Self::NoConvergence),
            6 => Ok(Self::NotEnoughMeasurementsAfterRejection),
            7 => Ok(Self::ExportLawsProhibited),
            8 => Ok(Self::NotEnoughDifferentialCorrections),
            9 => Ok(Self::BaseCoordinatesUnavailable),
            127 => Ok(Self::Suppressed),
            code => Err(Error::UnknownCode {
                table: "PVT error",
                code,
            }),
        }
    }
}

impl std::fmt::Display for PvtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// PVT error label lookup
pub fn classify_pvt_error(code: u32) -> Result<&'static str, Error> {
    let error = PvtError::try_from(code)?;
    Ok(error.label())
}

#[cfg(test)]
mod test {
    use super::{PvtError, classify_pvt_error};
    use crate::error::Error;
    use rstest::*;

    #[rstest]
    #[case(0, "no error.")]
    #[case(1, "not enough meas")]
    #[case(3, "DOP too large")]
    #[case(7, "position output prohibited due to export laws")]
    #[case(9, "base station coordinates unavailable")]
    #[case(127, "PNT actively suppressed")]
    fn pvt_error_labels(#[case] code: u32, #[case] label: &str) {
        assert_eq!(classify_pvt_error(code).unwrap(), label);
    }

    #[test]
    fn unknown_pvt_error() {
        for code in [10, 99, 126, 128] {
            match classify_pvt_error(code) {
                Err(Error::UnknownCode { code: c, .. }) => assert_eq!(c, code),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn suppression_is_distinct() {
        let suppressed = PvtError::try_from(127u32).unwrap();
        assert!(suppressed.is_suppressed());
        assert!(!suppressed.is_success());
        assert!(!suppressed.is_failure());

        let success = PvtError::try_from(0u32).unwrap();
        assert!(success.is_success());
        assert!(!success.is_failure());

        for code in 1..10u32 {
            let error = PvtError::try_from(code).unwrap();
            assert!(error.is_failure());
            assert!(!error.is_suppressed());
            assert_eq!(error.code() as u32, code);
        }
    }
}
