//! Septentrio signal types and `SignalInfo` bitmask decoding.
use itertools::Itertools;
use log::debug;
use serde::Serialize;

use gnss::prelude::Constellation;

use crate::{
    error::Error,
    utils::{MASK_WIDTH, count_set_bits, find_all_set_bits},
};

/// Label of the unassigned signal type slots
pub const RESERVED: &str = "Reserved";

/// Septentrio signal type, identified by its bit position
/// in the `SignalInfo` field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SignalType {
    GpsL1Ca,
    GpsL1Py,
    GpsL2Py,
    GpsL2C,
    GpsL5,
    GloL1Ca,
    GloL1P,
    GloL2P,
    GloL2Ca,
    GalL1A,
    GalL1Bc,
    GalE6A,
    GalE6Bc,
    GalE5a,
    GalE5b,
    GalE5,
    GeoL1Ca,
    /// Currently unassigned slot
    Reserved(u8),
}

impl SignalType {
    /// Identifies [SignalType] from its code, which is also its bit position.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::GpsL1Ca),
            1 => Some(Self::GpsL1Py),
            2 => Some(Self::GpsL2Py),
            3 => Some(Self::GpsL2C),
            4 => Some(Self::GpsL5),
            8 => Some(Self::GloL1Ca),
            9 => Some(Self::GloL1P),
            10 => Some(Self::GloL2P),
            11 => Some(Self::GloL2Ca),
            16 => Some(Self::GalL1A),
            17 => Some(Self::GalL1Bc),
            18 => Some(Self::GalE6A),
            19 => Some(Self::GalE6Bc),
            20 => Some(Self::GalE5a),
            21 => Some(Self::GalE5b),
            22 => Some(Self::GalE5),
            24 => Some(Self::GeoL1Ca),
            code if code < MASK_WIDTH => Some(Self::Reserved(code)),
            _ => None,
        }
    }

    pub const fn code(&self) -> u8 {
        match self {
            Self::GpsL1Ca => 0,
            Self::GpsL1Py => 1,
            Self::GpsL2Py => 2,
            Self::GpsL2C => 3,
            Self::GpsL5 => 4,
            Self::GloL1Ca => 8,
            Self::GloL1P => 9,
            Self::GloL2P => 10,
            Self::GloL2Ca => 11,
            Self::GalL1A => 16,
            Self::GalL1Bc => 17,
            Self::GalE6A => 18,
            Self::GalE6Bc => 19,
            Self::GalE5a => 20,
            Self::GalE5b => 21,
            Self::GalE5 => 22,
            Self::GeoL1Ca => 24,
            Self::Reserved(code) => *code,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::GpsL1Ca => "GPS_L1-CA",
            Self::GpsL1Py => "GPS_L1-P(Y)",
            Self::GpsL2Py => "GPS_L2-P(Y)",
            Self::GpsL2C => "GPS_L2C",
            Self::GpsL5 => "GPS_L5",
            Self::GloL1Ca => "GLO_L1-CA",
            Self::GloL1P => "GLO_L1-P",
            Self::GloL2P => "GLO_L2-P",
            Self::GloL2Ca => "GLO_L2-CA",
            Self::GalL1A => "GAL_L1A",
            Self::GalL1Bc => "GAL_L1BC",
            Self::GalE6A => "GAL_E6A",
            Self::GalE6Bc => "GAL_E6BC",
            Self::GalE5a => "GAL_E5a",
            Self::GalE5b => "GAL_E5b",
            Self::GalE5 => "GAL_E5",
            Self::GeoL1Ca => "GEO_L1CA",
            Self::Reserved(_) => RESERVED,
        }
    }

    /// [Constellation] transmitting this signal, None for reserved slots.
    pub fn constellation(&self) -> Option<Constellation> {
        match self {
            Self::GpsL1Ca | Self::GpsL1Py | Self::GpsL2Py | Self::GpsL2C | Self::GpsL5 => {
                Some(Constellation::GPS)
            },
            Self::GloL1Ca | Self::GloL1P | Self::GloL2P | Self::GloL2Ca => {
                Some(Constellation::Glonass)
            },
            Self::GalL1A
            | Self::GalL1Bc
            | Self::GalE6A
            | Self::GalE6Bc
            | Self::GalE5a
            | Self::GalE5b
            | Self::GalE5 => Some(Constellation::Galileo),
            Self::GeoL1Ca => Some(Constellation::SBAS),
            Self::Reserved(_) => None,
        }
    }

    pub const fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved(_))
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// `SignalInfo` bitmask: bit k set means signal type k was used.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SignalMask(pub u32);

impl SignalMask {
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of signals flagged
    pub fn count(&self) -> u32 {
        count_set_bits(self.0)
    }

    pub fn contains(&self, code: u8) -> bool {
        code < MASK_WIDTH && self.0 & (1 << code) != 0
    }

    /// Flag this signal type code
    pub fn insert(&mut self, code: u8) {
        if code < MASK_WIDTH {
            self.0 |= 1 << code;
        }
    }

    /// All [SignalType]s flagged, in ascending code order
    pub fn signals(&self) -> impl Iterator<Item = SignalType> + '_ {
        (0..MASK_WIDTH)
            .filter(|code| self.contains(*code))
            .filter_map(SignalType::from_code)
    }

    /// Unique [Constellation]s contributing to this mask
    pub fn constellations(&self) -> Vec<Constellation> {
        self.signals()
            .filter_map(|sig| sig.constellation())
            .unique()
            .collect()
    }
}

impl From<u32> for SignalMask {
    fn from(mask: u32) -> Self {
        Self(mask)
    }
}

impl std::fmt::Display for SignalMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

/// Signal type code to label lookup table. A code without label
/// is outside the table's domain.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    labels: [Option<&'static str>; MASK_WIDTH as usize],
}

/// Standard Septentrio signal table (all 32 codes, reserved slots included)
pub static STANDARD_SIGNALS: SignalTable = SignalTable::standard();

impl SignalTable {
    /// Builds the standard Septentrio table
    pub const fn standard() -> Self {
        let mut labels = [None; MASK_WIDTH as usize];
        let mut code = 0;
        while code < MASK_WIDTH {
            if let Some(signal) = SignalType::from_code(code) {
                labels[code as usize] = Some(signal.label());
            }
            code += 1;
        }
        Self { labels }
    }

    /// Builds a custom table from (code, label) entries.
    /// Codes beyond the mask width are discarded.
    pub fn from_entries(entries: &[(u8, &'static str)]) -> Self {
        let mut labels = [None; MASK_WIDTH as usize];
        for (code, label) in entries.iter() {
            if *code < MASK_WIDTH {
                labels[*code as usize] = Some(*label);
            }
        }
        Self { labels }
    }

    pub fn label(&self, code: u8) -> Option<&'static str> {
        self.labels.get(code as usize).copied().flatten()
    }

    /// Codes described by this table, in ascending order
    pub fn domain(&self) -> impl Iterator<Item = u8> + '_ {
        (0..MASK_WIDTH).filter(|code| self.label(*code).is_some())
    }

    /// Encodes a set of labels back to a [SignalMask], using the
    /// first code that carries each label.
    pub fn encode(&self, labels: &[&str]) -> Result<SignalMask, Error> {
        let mut mask = SignalMask::default();
        for label in labels.iter() {
            let code = self
                .domain()
                .find(|code| self.label(*code) == Some(*label))
                .ok_or_else(|| Error::UnknownSignalLabel(label.to_string()))?;
            mask.insert(code);
        }
        Ok(mask)
    }
}

impl Default for SignalTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Behavior when a set bit has no entry in the [SignalTable]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub enum UnknownBitPolicy {
    /// Decoding fails with [Error::UnknownSignalCode]
    #[default]
    Fail,

    /// Bit is omitted from the decoded labels
    Ignore,
}

/// Decodes [SignalMask]s against an injected [SignalTable]
#[derive(Debug, Copy, Clone)]
pub struct SignalDecoder<'a> {
    table: &'a SignalTable,
    policy: UnknownBitPolicy,
}

impl Default for SignalDecoder<'static> {
    fn default() -> Self {
        Self::new(&STANDARD_SIGNALS, UnknownBitPolicy::default())
    }
}

impl<'a> SignalDecoder<'a> {
    pub fn new(table: &'a SignalTable, policy: UnknownBitPolicy) -> Self {
        Self { table, policy }
    }

    pub fn policy(&self) -> UnknownBitPolicy {
        self.policy
    }

    /// Decodes all labels of `mask`, in ascending bit position order.
    /// The empty mask decodes to an empty list.
    pub fn decode(&self, mask: SignalMask) -> Result<Vec<&'static str>, Error> {
        let positions = find_all_set_bits(mask.0, Some(mask.count()))?;

        let mut labels = Vec::with_capacity(positions.len());

        for pos in positions {
            match self.table.label(pos) {
                Some(label) => labels.push(label),
                None => match self.policy {
                    UnknownBitPolicy::Fail => return Err(Error::UnknownSignalCode(pos)),
                    UnknownBitPolicy::Ignore => {
                        debug!("{} - ignoring unknown signal type #{}", mask, pos);
                    },
                },
            }
        }

        Ok(labels)
    }

    /// Name of the signal combination, used to group plot series:
    /// labels joined with '+'.
    pub fn name(&self, mask: SignalMask) -> Result<String, Error> {
        let labels = self.decode(mask)?;
        if labels.is_empty() {
            Ok("None".to_string())
        } else {
            Ok(labels.join("+"))
        }
    }
}
