mod common;

use common::*;
use lsm6dso::{AccelRange, ErrorKind, GyroRange};

#[test]
fn accel_range_applies_to_next_read() {
    let mock = mock_with(&[
        // FS_XL = 01 (16 g)
        I2cTrans::write_read(DEV_ADDR, vec![0x10], vec![0b0100_0000]),
        I2cTrans::write(DEV_ADDR, vec![0x10, 0b0100_0100]),
        trans_read16(0x28, 1000),
        // FS_XL = 10 (4 g)
        I2cTrans::write_read(DEV_ADDR, vec![0x10], vec![0b0100_0100]),
        I2cTrans::write(DEV_ADDR, vec![0x10, 0b0100_1000]),
        trans_read16(0x28, 1000),
        // FS_XL = 11 (8 g)
        I2cTrans::write_read(DEV_ADDR, vec![0x10], vec![0b0100_1000]),
        I2cTrans::write(DEV_ADDR, vec![0x10, 0b0100_1100]),
        trans_read16(0x28, 1000),
    ]);
    let mut dev = Lsm6dso::new(mock, SlaveAddr::Default).unwrap();

    dev.set_accelerometer_range(AccelRange::G16).unwrap();
    assert_eq!(dev.accelerometer_range(), AccelRange::G16);
    assert_eq!(dev.acceleration(Axis::X).unwrap(), 488);

    dev.set_accelerometer_range(AccelRange::G4).unwrap();
    assert_eq!(dev.acceleration(Axis::X).unwrap(), 122);

    dev.set_accelerometer_range_index(2).unwrap();
    assert_eq!(dev.accelerometer_range(), AccelRange::G8);
    assert_eq!(dev.acceleration(Axis::X).unwrap(), 244);

    dev.destroy().done();
}

#[test]
fn gyro_range_applies_to_next_read() {
    let mock = mock_with(&[
        // FS_G = 11, FS_125 = 0 (2000 dps)
        I2cTrans::write_read(DEV_ADDR, vec![0x11], vec![0b0100_0010]),
        I2cTrans::write(DEV_ADDR, vec![0x11, 0b0100_1100]),
        trans_read16(0x22, 1),
        // FS_G = 00, FS_125 = 0 (250 dps)
        I2cTrans::write_read(DEV_ADDR, vec![0x11], vec![0b0100_1100]),
        I2cTrans::write(DEV_ADDR, vec![0x11, 0b0100_0000]),
        trans_read16(0x22, 1),
        // FS_G = 10 (1000 dps)
        I2cTrans::write_read(DEV_ADDR, vec![0x11], vec![0b0100_0000]),
        I2cTrans::write(DEV_ADDR, vec![0x11, 0b0100_1000]),
        trans_read16(0x22, 1),
        // FS_G = 01 (500 dps)
        I2cTrans::write_read(DEV_ADDR, vec![0x11], vec![0b0100_1000]),
        I2cTrans::write(DEV_ADDR, vec![0x11, 0b0100_0100]),
        trans_read16(0x22, 1),
    ]);
    let mut dev = Lsm6dso::new(mock, SlaveAddr::Default).unwrap();

    dev.set_angularmeter_range(GyroRange::Dps2000).unwrap();
    assert_eq!(dev.angular(Axis::X).unwrap(), 70);

    dev.set_angularmeter_range(GyroRange::Dps250).unwrap();
    assert_eq!(dev.angular(Axis::X).unwrap(), 9);

    dev.set_angularmeter_range_index(3).unwrap();
    assert_eq!(dev.angularmeter_range(), GyroRange::Dps1000);
    assert_eq!(dev.angular(Axis::X).unwrap(), 35);

    dev.set_angularmeter_range(GyroRange::Dps500).unwrap();
    assert_eq!(dev.angular(Axis::X).unwrap(), 18);

    dev.destroy().done();
}

#[test]
fn range_index_out_of_table() {
    // no bus traffic after init
    let mock = mock_with(&[]);
    let mut dev = Lsm6dso::new(mock, SlaveAddr::Default).unwrap();

    let err = dev.set_accelerometer_range_index(4).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Param);
    let err = dev.set_angularmeter_range_index(5).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Param);
    let err = dev.set_angularmeter_range_index(u8::MAX).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Param);

    assert_eq!(dev.accelerometer_range(), AccelRange::G2);
    assert_eq!(dev.angularmeter_range(), GyroRange::Dps125);

    dev.destroy().done();
}
