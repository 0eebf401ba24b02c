//! Platform-agnostic LSM6DSO accelerometer and gyroscope driver which uses
//! I2C via [embedded-hal] and implements the [`RawAccelerometer`][raw] and
//! [`Accelerometer` traits][trait] from the `accelerometer` crate.
//!
//! Readings are returned in integer physical units: acceleration in mg,
//! angular rate in mdps and temperature in whole degrees.
//!
//! The driver keeps the configured full-scale ranges in memory and converts
//! with those, it never reads them back from the device. Writing `CTRL1_XL`
//! or `CTRL2_G` behind the driver's back makes later conversions wrong.
//!
//! All operations take `&mut self`. Sharing one sensor between threads needs
//! a mutex held by the caller.
//!
//! [embedded-hal]: https://docs.rs/embedded-hal
//! [raw]: https://docs.rs/accelerometer/latest/accelerometer/trait.RawAccelerometer.html
//! [trait]: https://docs.rs/accelerometer/latest/accelerometer/trait.Accelerometer.html
//!

#![deny(missing_docs)]
#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

mod reg;

use core::fmt::Debug;

#[cfg(feature = "out_f32")]
pub use accelerometer::vector::F32x3;
pub use accelerometer::vector::I16x3;
pub use accelerometer::{Accelerometer, Error, ErrorKind, RawAccelerometer};
use embedded_hal as hal;
use hal::i2c::I2c;
use log::{debug, trace};
#[cfg(feature = "out_f32")]
use num_traits::FromPrimitive;

use crate::reg::*;
pub use crate::reg::{AccelRange, Axis, GyroRange, Odr, TempUnit, DEVICE_ID};

/// Possible slave addresses
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlaveAddr {
    /// Default slave address, `SA0` high (107)
    Default,
    /// Alternative slave address providing bit value for `SA0`,
    /// `false` selects 106, `true` selects 107
    Alternative(bool),
}

impl Default for SlaveAddr {
    fn default() -> Self {
        SlaveAddr::Default
    }
}

impl SlaveAddr {
    fn addr(self) -> u8 {
        match self {
            SlaveAddr::Default => I2C_SAD | 1,
            SlaveAddr::Alternative(sa0) => I2C_SAD | sa0 as u8,
        }
    }
}

/// Data status structure,
/// decoded from STATUS_REG register
#[derive(Debug, PartialEq, Eq)]
pub struct DataStatus {
    /// XLDA bit, new accelerometer data available
    pub xlda: bool,
    /// GDA bit, new gyroscope data available
    pub gda: bool,
    /// TDA bit, new temperature data available
    pub tda: bool,
}

/// `LSM6DSO` driver
pub struct Lsm6dso<I2C> {
    /// The concrete I²C device implementation
    i2c: I2C,
    /// The I²C device slave address
    addr: u8,
    /// Current accelerometer full-scale
    range_a: AccelRange,
    /// Current gyroscope full-scale
    range_g: GyroRange,
}

impl<I2C, E> Lsm6dso<I2C>
where
    I2C: I2c<Error = E>,
    E: Debug,
{
    /// Create a new `LSM6DSO` driver from the given `I2C` peripheral.
    ///
    /// Both sensors are enabled at 104 Hz with block data update and
    /// register auto-increment on, and the smallest full-scales
    /// (±2 g, ±125 dps) selected.
    pub fn new(i2c: I2C, addr: SlaveAddr) -> Result<Self, Error<E>> {
        let mut dev = Self {
            i2c,
            addr: addr.addr(),
            range_a: AccelRange::G2,
            range_g: GyroRange::Dps125,
        };

        dev.write_reg(Register::CTRL1_XL, CTRL1_XL_INIT)?;
        dev.write_reg(Register::CTRL2_G, CTRL2_G_INIT)?;
        dev.write_reg(Register::CTRL3_C, CTRL3_C_INIT)?;
        dev.write_reg(Register::CTRL8_XL, CTRL8_XL_INIT)?;
        dev.set_accelerometer_range(AccelRange::default())?;
        dev.set_angularmeter_range(GyroRange::default())?;

        debug!("LSM6DSO at {:#04x} initialized", dev.addr);
        Ok(dev)
    }

    /// Destroy driver instance, return `I2C` bus instance
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// `WHO_AM_I` register, [`DEVICE_ID`] for a genuine `LSM6DSO`
    pub fn get_device_id(&mut self) -> Result<u8, Error<E>> {
        self.read_u8(Register::WHO_AM_I).map_err(Into::into)
    }

    /// Acceleration in mg along `axis`,
    /// `OUTX_L_A`, `OUTY_L_A`, `OUTZ_L_A`
    ///
    /// [`Axis::Strength`] reads all three axes and returns the norm of the
    /// individually rounded values.
    pub fn acceleration(&mut self, axis: Axis) -> Result<i32, Error<E>> {
        let value = match axis {
            Axis::X => self.read_mg(Register::OUTX_L_A)?,
            Axis::Y => self.read_mg(Register::OUTY_L_A)?,
            Axis::Z => self.read_mg(Register::OUTZ_L_A)?,
            Axis::Strength => {
                let x = self.read_mg(Register::OUTX_L_A)?;
                let y = self.read_mg(Register::OUTY_L_A)?;
                let z = self.read_mg(Register::OUTZ_L_A)?;
                strength(x, y, z)
            }
        };
        Ok(value)
    }

    /// Angular rate in mdps along `axis`,
    /// `OUTX_L_G`, `OUTY_L_G`, `OUTZ_L_G`
    ///
    /// [`Axis::Strength`] reads all three axes and returns the norm of the
    /// individually rounded values.
    pub fn angular(&mut self, axis: Axis) -> Result<i32, Error<E>> {
        let value = match axis {
            Axis::X => self.read_mdps(Register::OUTX_L_G)?,
            Axis::Y => self.read_mdps(Register::OUTY_L_G)?,
            Axis::Z => self.read_mdps(Register::OUTZ_L_G)?,
            Axis::Strength => {
                let x = self.read_mdps(Register::OUTX_L_G)?;
                let y = self.read_mdps(Register::OUTY_L_G)?;
                let z = self.read_mdps(Register::OUTZ_L_G)?;
                strength(x, y, z)
            }
        };
        Ok(value)
    }

    /// Acceleration and angular rate of all axes at once,
    /// `[ax, ay, az]` in mg followed by `[gx, gy, gz]` in mdps
    pub fn get(&mut self) -> Result<[i32; 6], Error<E>> {
        Ok([
            self.read_mg(Register::OUTX_L_A)?,
            self.read_mg(Register::OUTY_L_A)?,
            self.read_mg(Register::OUTZ_L_A)?,
            self.read_mdps(Register::OUTX_L_G)?,
            self.read_mdps(Register::OUTY_L_G)?,
            self.read_mdps(Register::OUTZ_L_G)?,
        ])
    }

    /// Gyroscope raw output of all axes,
    /// `OUTX_L_G` .. `OUTZ_H_G`
    pub fn gyro_raw(&mut self) -> Result<I16x3, Error<E>> {
        self.read_xyz(Register::OUTX_L_G).map_err(Into::into)
    }

    /// Power both sensors on (104 Hz) or off,
    /// `CTRL1_XL`: `ODR_XL`, `CTRL2_G`: `ODR_G`
    pub fn power(&mut self, on: bool) -> Result<(), Error<E>> {
        let odr = if on { ODR_ON } else { ODR_OFF };
        self.write_reg_masked(Register::CTRL1_XL, odr, !ODR_MASK)?;
        self.write_reg_masked(Register::CTRL2_G, odr, !ODR_MASK)?;
        debug!("power {}", if on { "on" } else { "off" });
        Ok(())
    }

    /// Accelerometer data rate selection,
    /// `CTRL1_XL`: `ODR_XL`
    pub fn set_accel_odr(&mut self, odr: Odr) -> Result<(), Error<E>> {
        self.write_reg_masked(Register::CTRL1_XL, odr.bits(), !ODR_MASK)?;
        debug!("accelerometer ODR {:?}", odr);
        Ok(())
    }

    /// Gyroscope data rate selection,
    /// `CTRL2_G`: `ODR_G`
    pub fn set_gyro_odr(&mut self, odr: Odr) -> Result<(), Error<E>> {
        self.write_reg_masked(Register::CTRL2_G, odr.bits(), !ODR_MASK)?;
        debug!("gyroscope ODR {:?}", odr);
        Ok(())
    }

    /// Accelerometer full-scale selection,
    /// `CTRL1_XL`: `FS_XL`
    pub fn set_accelerometer_range(&mut self, range: AccelRange) -> Result<(), Error<E>> {
        self.write_reg_masked(Register::CTRL1_XL, range.bits(), !FS_XL_MASK)?;
        self.range_a = range;
        debug!("accelerometer range {:?}", range);
        Ok(())
    }

    /// Accelerometer full-scale selection by index (0 = ±2 g .. 3 = ±16 g),
    /// fails with [`ErrorKind::Param`] for an unknown index
    pub fn set_accelerometer_range_index(&mut self, index: u8) -> Result<(), Error<E>> {
        match AccelRange::from_index(index) {
            Some(range) => self.set_accelerometer_range(range),
            None => ErrorKind::Param.err(),
        }
    }

    /// Current accelerometer full-scale
    pub fn accelerometer_range(&self) -> AccelRange {
        self.range_a
    }

    /// Gyroscope full-scale selection,
    /// `CTRL2_G`: `FS_G`, `FS_125`
    pub fn set_angularmeter_range(&mut self, range: GyroRange) -> Result<(), Error<E>> {
        self.write_reg_masked(Register::CTRL2_G, range.bits(), !FS_G_MASK)?;
        self.range_g = range;
        debug!("gyroscope range {:?}", range);
        Ok(())
    }

    /// Gyroscope full-scale selection by index (0 = ±125 dps .. 4 = ±2000 dps),
    /// fails with [`ErrorKind::Param`] for an unknown index
    pub fn set_angularmeter_range_index(&mut self, index: u8) -> Result<(), Error<E>> {
        match GyroRange::from_index(index) {
            Some(range) => self.set_angularmeter_range(range),
            None => ErrorKind::Param.err(),
        }
    }

    /// Current gyroscope full-scale
    pub fn angularmeter_range(&self) -> GyroRange {
        self.range_g
    }

    /// Temperature in whole degrees,
    /// `OUT_TEMP_H`
    pub fn temperature(&mut self, unit: TempUnit) -> Result<i32, Error<E>> {
        let raw = self.read_i8(Register::OUT_TEMP_H)?;
        Ok(unit.convert(raw))
    }

    /// Data status,
    /// `STATUS_REG`: as
    /// DataStatus {xlda: `XLDA`, gda: `GDA`, tda: `TDA`}
    pub fn get_status(&mut self) -> Result<DataStatus, Error<E>> {
        let reg = self.read_u8(Register::STATUS_REG)?;
        Ok(DataStatus {
            xlda: (reg & XLDA) != 0,
            gda: (reg & GDA) != 0,
            tda: (reg & TDA) != 0,
        })
    }

    /// Dump control and status registers
    #[cfg(debug_assertions)]
    pub fn dump_regs<W>(&mut self, w: &mut W) -> Result<(), Error<E>>
    where
        W: core::fmt::Write,
    {
        for (name, reg) in [
            ("CTRL1_XL (10h)", Register::CTRL1_XL),
            ("CTRL2_G (11h)", Register::CTRL2_G),
            ("CTRL3_C (12h)", Register::CTRL3_C),
            ("CTRL6_C (15h)", Register::CTRL6_C),
            ("CTRL8_XL (17h)", Register::CTRL8_XL),
            ("STATUS_REG (1Eh)", Register::STATUS_REG),
        ] {
            let value = self.read_u8(reg)?;
            // formatting errors of `w` are not bus errors
            writeln!(w, "{} = {:#010b}", name, value).ok();
        }
        Ok(())
    }

    fn read_mg(&mut self, reg: Register) -> Result<i32, E> {
        let raw = self.read_i16(reg)?;
        Ok(self.range_a.convert_mg(raw))
    }

    fn read_mdps(&mut self, reg: Register) -> Result<i32, E> {
        let raw = self.read_i16(reg)?;
        Ok(self.range_g.convert_mdps(raw))
    }

    #[inline]
    fn read_u8(&mut self, reg: Register) -> Result<u8, E> {
        let mut buf = [0u8];
        self.i2c.write_read(self.addr, &[reg.addr()], &mut buf)?;
        Ok(buf[0])
    }

    #[inline]
    fn read_i8(&mut self, reg: Register) -> Result<i8, E> {
        self.read_u8(reg).map(|v| v as i8)
    }

    /// Low byte at `reg`, high byte at `reg + 1` (`IF_INC`)
    #[inline]
    fn read_u16(&mut self, reg: Register) -> Result<u16, E> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.addr, &[reg.addr()], &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    #[inline]
    fn read_i16(&mut self, reg: Register) -> Result<i16, E> {
        self.read_u16(reg).map(|v| v as i16)
    }

    fn read_xyz(&mut self, reg: Register) -> Result<I16x3, E> {
        let mut buf = [0u8; 6];
        self.i2c.write_read(self.addr, &[reg.addr()], &mut buf)?;
        Ok(I16x3::new(
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ))
    }

    #[inline]
    fn write_reg(&mut self, reg: Register, val: u8) -> Result<(), E> {
        trace!("write {:?} = {:#04x}", reg, val);
        self.i2c.write(self.addr, &[reg.addr(), val])
    }

    /// Read-modify-write, bits set in `mask` are preserved
    #[inline]
    fn write_reg_masked(&mut self, reg: Register, val: u8, mask: u8) -> Result<(), E> {
        let r = self.read_u8(reg)?;
        self.write_reg(reg, masked(r, val, mask))
    }
}

impl<I2C, E> RawAccelerometer<I16x3> for Lsm6dso<I2C>
where
    I2C: I2c<Error = E>,
    E: Debug,
{
    type Error = E;

    /// Get acceleration reading from the accelerometer
    fn accel_raw(&mut self) -> Result<I16x3, Error<E>> {
        self.read_xyz(Register::OUTX_L_A).map_err(Into::into)
    }
}

#[cfg(feature = "out_f32")]
impl<I2C, E> Accelerometer for Lsm6dso<I2C>
where
    I2C: I2c<Error = E>,
    E: Debug,
{
    type Error = E;

    /// Get normalized ±g reading from the accelerometer
    fn accel_norm(&mut self) -> Result<F32x3, Error<E>> {
        let acc_raw: I16x3 = self.accel_raw()?;

        Ok(F32x3::new(
            self.range_a.convert_g_f32(acc_raw.x),
            self.range_a.convert_g_f32(acc_raw.y),
            self.range_a.convert_g_f32(acc_raw.z),
        ))
    }

    /// Get sample rate of accelerometer in Hz
    fn sample_rate(&mut self) -> Result<f32, Error<E>> {
        let ctrl1 = self.read_u8(Register::CTRL1_XL)?;
        let rate = match FromPrimitive::from_u8(ctrl1 >> 4) {
            Some(Odr::PowerDown) => 0.0,
            Some(Odr::Hz1_6) => 1.6,
            Some(Odr::Hz12_5) => 12.5,
            Some(Odr::Hz26) => 26.0,
            Some(Odr::Hz52) => 52.0,
            Some(Odr::Hz104) => 104.0,
            Some(Odr::Hz208) => 208.0,
            Some(Odr::Hz416) => 416.0,
            Some(Odr::Hz833) => 833.0,
            Some(Odr::Hz1660) => 1660.0,
            Some(Odr::Hz3330) => 3330.0,
            Some(Odr::Hz6660) => 6660.0,
            None => 0.0,
        };
        Ok(rate)
    }
}
