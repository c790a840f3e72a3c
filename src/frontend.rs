use crate::error::Error;

/// Receiver RF front-end (antenna path), as reported in ReceiverStatus.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrontEnd {
    GpsSbasGalileoL1,
    GlonassL1,
    GalileoE6,
    GpsL2,
    GlonassL2,
    GpsSbasGalileoL5E5a,
    GalileoE5b,
    GalileoE5ab,
    /// Unidentified paths (#8, #9)
    Auxiliary(u8),
}

impl FrontEnd {
    pub fn code(&self) -> u8 {
        match self {
            Self::GpsSbasGalileoL1 => 0,
            Self::GlonassL1 => 1,
            Self::GalileoE6 => 2,
            Self::GpsL2 => 3,
            Self::GlonassL2 => 4,
            Self::GpsSbasGalileoL5E5a => 5,
            Self::GalileoE5b => 6,
            Self::GalileoE5ab => 7,
            Self::Auxiliary(code) => *code,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GpsSbasGalileoL1 => "GPS/SBAS/Galileo L1",
            Self::GlonassL1 => "GLONASS L1",
            Self::GalileoE6 => "Galileo E6",
            Self::GpsL2 => "GPS L2",
            Self::GlonassL2 => "GLONASS L2",
            Self::GpsSbasGalileoL5E5a => "GPS/SBAS/Galileo L5/E5a",
            Self::GalileoE5b => "Galileo E5b",
            Self::GalileoE5ab => "Galileo E5 (a+b)",
            Self::Auxiliary(_) => "unknown am",
        }
    }
}

impl TryFrom<u32> for FrontEnd {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::GpsSbasGalileoL1),
            1 => Ok(Self::GlonassL1),
            2 => Ok(Self::GalileoE6),
            3 => Ok(Self::GpsL2),
            4 => Ok(Self::GlonassL2),
            5 => Ok(Self::GpsSbasGalileoL5E5a),
            6 => Ok(Self::GalileoE5b),
            7 => Ok(Self::GalileoE5ab),
            8 | 9 => Ok(Self::Auxiliary(code as u8)),
            code => Err(Error::UnknownCode {
                table: "front-end",
                code,
            }),
        }
    }
}

impl std::fmt::Display for FrontEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Front-end name lookup
pub fn classify_front_end(code: u32) -> Result<&'static str, Error> {
    let frontend = FrontEnd::try_from(code)?;
    Ok(frontend.name())
}

#[cfg(test)]
mod test {
    use super::{FrontEnd, classify_front_end};
    use crate::error::Error;

    #[test]
    fn front_end_names() {
        assert_eq!(classify_front_end(0).unwrap(), "GPS/SBAS/Galileo L1");
        assert_eq!(classify_front_end(2).unwrap(), "Galileo E6");
        assert_eq!(classify_front_end(5).unwrap(), "GPS/SBAS/Galileo L5/E5a");
        assert_eq!(classify_front_end(7).unwrap(), "Galileo E5 (a+b)");
        assert_eq!(classify_front_end(8).unwrap(), "unknown am");
        assert_eq!(classify_front_end(9).unwrap(), "unknown am");
    }

    #[test]
    fn front_end_codes() {
        for code in 0..10u32 {
            let frontend = FrontEnd::try_from(code).unwrap();
            assert_eq!(frontend.code() as u32, code);
        }
    }

    #[test]
    fn unknown_front_end() {
        for code in [10, 42, u32::MAX] {
            match classify_front_end(code) {
                Err(Error::UnknownCode { table, code: c }) => {
                    assert_eq!(table, "front-end");
                    assert_eq!(c, code);
                },
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }
}
