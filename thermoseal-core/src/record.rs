//! Calibration record and its packed word layout
//!
//! ```text
//!  31        24 23              14 13  12 11  10 9   8 7            0
//! ┌────────────┬──────────────────┬──────┬──────┬─────┬──────────────┐
//! │   unused   │     setpoint     │status│ mode │ rsvd│    offset    │
//! └────────────┴──────────────────┴──────┴──────┴─────┴──────────────┘
//! ```
//!
//! Unused and reserved bits are always zero. Values wider than their field
//! are rejected, never masked.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calibration field identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Field {
    /// Temperature offset, bits [0:7]
    Offset,
    /// Operating mode, bits [10:11]
    Mode,
    /// Sensor status, bits [12:13]
    Status,
    /// Temperature setpoint, bits [14:23]
    Setpoint,
}

impl Field {
    /// Bit position of the field's least significant bit
    pub const fn shift(self) -> u32 {
        match self {
            Field::Offset => 0,
            Field::Mode => 10,
            Field::Status => 12,
            Field::Setpoint => 14,
        }
    }

    /// Field width in bits
    pub const fn width(self) -> u32 {
        match self {
            Field::Offset => 8,
            Field::Mode => 2,
            Field::Status => 2,
            Field::Setpoint => 10,
        }
    }

    /// Largest value the field can hold
    pub const fn max(self) -> u16 {
        ((1u32 << self.width()) - 1) as u16
    }

    /// Field mask in word position
    pub const fn mask(self) -> u32 {
        (self.max() as u32) << self.shift()
    }

    /// Name used in diagnostics and configuration
    pub const fn name(self) -> &'static str {
        match self {
            Field::Offset => "offset",
            Field::Mode => "mode",
            Field::Status => "status",
            Field::Setpoint => "setpoint",
        }
    }

    fn check(self, value: u16) -> Result<(), FieldOverflow> {
        if value > self.max() {
            return Err(FieldOverflow { field: self, value });
        }
        Ok(())
    }

    fn extract(self, word: u32) -> u16 {
        ((word & self.mask()) >> self.shift()) as u16
    }
}

/// Every bit owned by a field
pub const FIELD_BITS: u32 =
    Field::Offset.mask() | Field::Mode.mask() | Field::Status.mask() | Field::Setpoint.mask();

/// Bits that must stay zero (reserved [8:9] and unused [24:31])
pub const RESERVED_BITS: u32 = !FIELD_BITS;

/// A value exceeded its field's declared bit width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldOverflow {
    /// The offending field
    pub field: Field,
    /// The rejected value
    pub value: u16,
}

/// Errors from decoding a packed word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Reserved or unused bits are set; carries the offending bits
    ReservedBitsSet(u32),
}

/// The 32-bit encoded form of a [`CalibrationRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedWord(u32);

impl PackedWord {
    /// Raw word value
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl From<PackedWord> for u32 {
    fn from(word: PackedWord) -> Self {
        word.0
    }
}

/// Calibration record committed to the configuration region
///
/// Fields are private so a record in hand is always within width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationRecord {
    offset: u8,
    mode: u8,
    status: u8,
    setpoint: u16,
}

impl CalibrationRecord {
    /// Build a record, rejecting any value wider than its field
    pub fn new(offset: u8, mode: u8, status: u8, setpoint: u16) -> Result<Self, FieldOverflow> {
        Field::Mode.check(mode as u16)?;
        Field::Status.check(status as u16)?;
        Field::Setpoint.check(setpoint)?;

        Ok(Self {
            offset,
            mode,
            status,
            setpoint,
        })
    }

    pub const fn offset(&self) -> u8 {
        self.offset
    }

    pub const fn mode(&self) -> u8 {
        self.mode
    }

    pub const fn status(&self) -> u8 {
        self.status
    }

    pub const fn setpoint(&self) -> u16 {
        self.setpoint
    }

    /// Pack into the fixed word layout
    pub fn pack(&self) -> PackedWord {
        PackedWord(
            (self.offset as u32) << Field::Offset.shift()
                | (self.mode as u32) << Field::Mode.shift()
                | (self.status as u32) << Field::Status.shift()
                | (self.setpoint as u32) << Field::Setpoint.shift(),
        )
    }
}

/// Pack calibration fields into one word
///
/// Fails with [`FieldOverflow`] naming the first field (in bit order) whose
/// value exceeds its width.
pub fn encode(offset: u8, mode: u8, status: u8, setpoint: u16) -> Result<u32, FieldOverflow> {
    CalibrationRecord::new(offset, mode, status, setpoint).map(|record| record.pack().bits())
}

/// Unpack a word produced by [`encode`]
pub fn decode(word: u32) -> Result<CalibrationRecord, DecodeError> {
    let stray = word & RESERVED_BITS;
    if stray != 0 {
        return Err(DecodeError::ReservedBitsSet(stray));
    }

    Ok(CalibrationRecord {
        offset: Field::Offset.extract(word) as u8,
        mode: Field::Mode.extract(word) as u8,
        status: Field::Status.extract(word) as u8,
        setpoint: Field::Setpoint.extract(word),
    })
}
