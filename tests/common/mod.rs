#![allow(dead_code)]

pub use lsm6dso::{Axis, Lsm6dso, SlaveAddr, TempUnit};

use embedded_hal_mock as hal;
pub use hal::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

pub const DEV_ADDR: u8 = 0b110_1011;

/// Register writes done by `Lsm6dso::new` on `addr`
pub fn trans_init_at(addr: u8) -> Vec<I2cTrans> {
    vec![
        // CTRL1_XL: ODR_XL = 104 Hz
        I2cTrans::write(addr, vec![0x10, 0b0100_0000]),
        // CTRL2_G: ODR_G = 104 Hz, FS_125
        I2cTrans::write(addr, vec![0x11, 0b0100_0010]),
        // CTRL3_C: BDU, IF_INC
        I2cTrans::write(addr, vec![0x12, 0b0100_0100]),
        // CTRL8_XL
        I2cTrans::write(addr, vec![0x17, 0b0000_0000]),
        // accelerometer ±2 g
        I2cTrans::write_read(addr, vec![0x10], vec![0b0100_0000]),
        I2cTrans::write(addr, vec![0x10, 0b0100_0000]),
        // gyroscope ±125 dps
        I2cTrans::write_read(addr, vec![0x11], vec![0b0100_0010]),
        I2cTrans::write(addr, vec![0x11, 0b0100_0010]),
    ]
}

pub fn trans_init() -> Vec<I2cTrans> {
    trans_init_at(DEV_ADDR)
}

/// Mock expecting the init sequence followed by `trans`
pub fn mock_with(trans: &[I2cTrans]) -> I2cMock {
    let mut all = trans_init();
    all.extend_from_slice(trans);
    I2cMock::new(&all)
}

/// 16-bit output register read returning `raw`
pub fn trans_read16(reg: u8, raw: i16) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![reg], raw.to_le_bytes().to_vec())
}
