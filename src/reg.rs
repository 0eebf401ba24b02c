#![allow(non_upper_case_globals)]

use cast::f64;
#[cfg(feature = "out_f32")]
use cast::f32;
#[cfg(feature = "out_f32")]
use num_derive::FromPrimitive;

/// I2C slave address with `SA0` low
pub const I2C_SAD: u8 = 0b110_1010;

/// Register mapping
#[allow(dead_code)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug)]
pub enum Register {
    WHO_AM_I = 0x0F,
    CTRL1_XL = 0x10,
    CTRL2_G = 0x11,
    CTRL3_C = 0x12,
    CTRL6_C = 0x15,
    CTRL8_XL = 0x17,
    STATUS_REG = 0x1E,
    OUT_TEMP_L = 0x20,
    OUT_TEMP_H = 0x21,
    OUTX_L_G = 0x22,
    OUTY_L_G = 0x24,
    OUTZ_L_G = 0x26,
    OUTX_L_A = 0x28,
    OUTY_L_A = 0x2A,
    OUTZ_L_A = 0x2C,
}

impl Register {
    /// Get register address
    pub fn addr(self) -> u8 {
        self as u8
    }
}

// === WHO_AM_I (0Fh) ===

/// WHO_AM_I device identification register
pub const DEVICE_ID: u8 = 0b0110_1100;

// === CTRL1_XL (10h), CTRL2_G (11h) ===

pub const ODR_MASK: u8 = 0b1111_0000;

/// Output Data Rate,
/// `ODR_XL` in `CTRL1_XL`, `ODR_G` in `CTRL2_G`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "out_f32", derive(FromPrimitive))]
pub enum Odr {
    /// Power-down mode
    PowerDown = 0b0000,
    /// 12.5 Hz
    Hz12_5 = 0b0001,
    /// 26 Hz
    Hz26 = 0b0010,
    /// 52 Hz
    Hz52 = 0b0011,
    /// 104 Hz
    Hz104 = 0b0100,
    /// 208 Hz
    Hz208 = 0b0101,
    /// 416 Hz
    Hz416 = 0b0110,
    /// 833 Hz
    Hz833 = 0b0111,
    /// 1.66 kHz
    Hz1660 = 0b1000,
    /// 3.33 kHz
    Hz3330 = 0b1001,
    /// 6.66 kHz
    Hz6660 = 0b1010,
    /// 1.6 Hz, accelerometer low-power mode only
    Hz1_6 = 0b1011,
}

impl Odr {
    pub(crate) fn bits(self) -> u8 {
        (self as u8) << 4
    }
}

/// ODR field value used while the sensor is powered on
pub const ODR_ON: u8 = 0b0100_0000;
/// ODR field value used while the sensor is powered off
pub const ODR_OFF: u8 = 0b0000_0000;

// === CTRL1_XL (10h) ===

/// ODR_XL = 104 Hz, FS_XL = 0
pub const CTRL1_XL_INIT: u8 = 0b0100_0000;

pub const FS_XL_MASK: u8 = 0b0000_1100;
pub const FS_XL_SHIFT: u8 = 2;

// === CTRL2_G (11h) ===

/// ODR_G = 104 Hz, FS_125 = 1
pub const CTRL2_G_INIT: u8 = 0b0100_0010;

pub const FS_G_MASK: u8 = 0b0000_1110;
pub const FS_G_SHIFT: u8 = 1;

// === CTRL3_C (12h) ===

pub const BDU: u8 = 0b0100_0000;
pub const IF_INC: u8 = 0b0000_0100;

pub const CTRL3_C_INIT: u8 = BDU | IF_INC;

// === CTRL8_XL (17h) ===

pub const CTRL8_XL_INIT: u8 = 0b0000_0000;

// === STATUS_REG (1Eh) ===

pub const TDA: u8 = 0b0000_0100;
pub const GDA: u8 = 0b0000_0010;
pub const XLDA: u8 = 0b0000_0001;

// === OUT_TEMP (20h, 21h) ===

/// Output of 0 corresponds to 25 °C
pub const TEMP_OFFSET: i32 = 25;

// *** Full-scale selection ***

/// mg/LSB at ±2 g
pub const XL_SENSITIVITY: f64 = 0.061;
/// mdps/LSB at ±125 dps
pub const G_SENSITIVITY: f64 = 4.375;

/// `FS_XL` field values in selector order (2 g, 4 g, 8 g, 16 g)
pub const ACCEL_FS_FIELDS: [u8; 4] = [0, 2, 3, 1];

/// `FS_G` + `FS_125` field values in selector order (125 .. 2000 dps)
pub const GYRO_FS_FIELDS: [u8; 5] = [1, 0, 2, 4, 6];

const ACCEL_RANGES: [AccelRange; 4] = [
    AccelRange::G2,
    AccelRange::G4,
    AccelRange::G8,
    AccelRange::G16,
];

const GYRO_RANGES: [GyroRange; 5] = [
    GyroRange::Dps125,
    GyroRange::Dps250,
    GyroRange::Dps500,
    GyroRange::Dps1000,
    GyroRange::Dps2000,
];

/// Accelerometer full-scale selection
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccelRange {
    /// ±2 g
    G2 = 0,
    /// ±4 g
    G4 = 1,
    /// ±8 g
    G8 = 2,
    /// ±16 g
    G16 = 3,
}

impl Default for AccelRange {
    fn default() -> Self {
        AccelRange::G2
    }
}

impl AccelRange {
    /// Range from its selector index, `None` for an unknown index
    pub fn from_index(index: u8) -> Option<Self> {
        ACCEL_RANGES.get(usize::from(index)).copied()
    }

    /// Selector index, also the power of two applied to the base sensitivity
    pub fn index(self) -> u8 {
        self as u8
    }

    /// `FS_XL` bits, already shifted into place
    pub(crate) fn bits(self) -> u8 {
        ACCEL_FS_FIELDS[usize::from(self.index())] << FS_XL_SHIFT
    }

    /// Raw output to mg
    pub(crate) fn convert_mg(self, raw: i16) -> i32 {
        convert(raw, XL_SENSITIVITY, self.index())
    }

    #[cfg(feature = "out_f32")]
    pub(crate) fn convert_g_f32(self, raw: i16) -> f32 {
        f32(raw) * 0.000_061 * f32(1u8 << self.index())
    }
}

/// Gyroscope full-scale selection
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GyroRange {
    /// ±125 dps
    Dps125 = 0,
    /// ±250 dps
    Dps250 = 1,
    /// ±500 dps
    Dps500 = 2,
    /// ±1000 dps
    Dps1000 = 3,
    /// ±2000 dps
    Dps2000 = 4,
}

impl Default for GyroRange {
    fn default() -> Self {
        GyroRange::Dps125
    }
}

impl GyroRange {
    /// Range from its selector index, `None` for an unknown index
    pub fn from_index(index: u8) -> Option<Self> {
        GYRO_RANGES.get(usize::from(index)).copied()
    }

    /// Selector index, also the power of two applied to the base sensitivity
    pub fn index(self) -> u8 {
        self as u8
    }

    /// `FS_G` and `FS_125` bits, already shifted into place
    pub(crate) fn bits(self) -> u8 {
        GYRO_FS_FIELDS[usize::from(self.index())] << FS_G_SHIFT
    }

    /// Raw output to mdps
    pub(crate) fn convert_mdps(self, raw: i16) -> i32 {
        convert(raw, G_SENSITIVITY, self.index())
    }
}

/// Measurement axis
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Euclidean norm of the X, Y and Z readings
    Strength,
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Default for Axis {
    fn default() -> Self {
        Axis::X
    }
}

/// Temperature unit
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TempUnit {
    /// Degrees Celsius
    C,
    /// Degrees Fahrenheit
    F,
}

impl Default for TempUnit {
    fn default() -> Self {
        TempUnit::C
    }
}

impl TempUnit {
    /// Convert the signed `OUT_TEMP_H` byte to whole degrees
    pub(crate) fn convert(self, raw: i8) -> i32 {
        let celsius = i32::from(raw) + TEMP_OFFSET;
        match self {
            TempUnit::C => celsius,
            TempUnit::F => round(32.0 + f64(celsius) * 9.0 / 5.0),
        }
    }
}

/// Round half toward positive infinity
#[inline]
pub(crate) fn round(x: f64) -> i32 {
    libm::floor(x + 0.5) as i32
}

#[inline]
fn convert(raw: i16, sensitivity: f64, index: u8) -> i32 {
    round(f64(raw) * sensitivity * f64(1u16 << index))
}

/// Norm of already converted axis values
pub(crate) fn strength(x: i32, y: i32, z: i32) -> i32 {
    let (x, y, z) = (f64(x), f64(y), f64(z));
    round(libm::sqrt(x * x + y * y + z * z))
}

/// Bits set in `mask` are kept from `current`, the rest come from `value`
#[inline]
pub(crate) fn masked(current: u8, value: u8, mask: u8) -> u8 {
    (current & mask) | value
}
