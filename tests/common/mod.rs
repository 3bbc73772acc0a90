//! Small FIT writer used to build decoder fixtures in tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

/// Seconds between the unix epoch and the FIT epoch (1989-12-31T00:00:00Z).
pub const FIT_EPOCH_OFFSET: i64 = 631_065_600;

/// FIT timestamp of the first stamped record in [`sample_ride`].
pub const RIDE_START: u32 = 1_000_000_000;

const PROFILE_VERSION: u16 = 2132;

const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800, 0xB401,
    0x5000, 0x9C01, 0x8801, 0x4400,
];

fn crc(bytes: &[u8]) -> u16 {
    bytes.iter().fold(0u16, |mut crc, byte| {
        for nibble in [byte & 0x0F, byte >> 4] {
            let tmp = CRC_TABLE[(crc & 0x0F) as usize];
            crc = (crc >> 4) & 0x0FFF;
            crc ^= tmp ^ CRC_TABLE[nibble as usize];
        }
        crc
    })
}

#[derive(Default)]
pub struct FitWriter {
    data: Vec<u8>,
}

impl FitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Definition message; `fields` are `(field number, size, base type)`.
    pub fn define(&mut self, local: u8, global: u16, fields: &[(u8, u8, u8)]) -> &mut Self {
        self.data.push(0x40 | local);
        self.data.push(0);
        self.data.push(0);
        self.data.extend_from_slice(&global.to_le_bytes());
        self.data.push(fields.len() as u8);
        for &(number, size, base_type) in fields {
            self.data.extend_from_slice(&[number, size, base_type]);
        }
        self
    }

    /// Data message with field values already little-endian encoded, in
    /// definition order.
    pub fn data(&mut self, local: u8, values: &[&[u8]]) -> &mut Self {
        self.data.push(local);
        for value in values {
            self.data.extend_from_slice(value);
        }
        self
    }

    /// 14-byte header without its own CRC, the messages, then the file CRC.
    pub fn finish(&self) -> Vec<u8> {
        let mut file = vec![14, 0x20];
        file.extend_from_slice(&PROFILE_VERSION.to_le_bytes());
        file.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        file.extend_from_slice(b".FIT");
        file.extend_from_slice(&[0, 0]);
        file.extend_from_slice(&self.data);
        let checksum = crc(&file);
        file.extend_from_slice(&checksum.to_le_bytes());
        file
    }
}

pub fn fit_time(offset: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(FIT_EPOCH_OFFSET + (RIDE_START + offset) as i64, 0)
        .single()
        .expect("timestamp")
}

/// Five records from a Wahoo head unit:
/// - record 0 has no timestamp and only power and heart rate
/// - records 1, 2 and 4 are stamped one second apart and climb 1 m each
/// - record 2 carries sentinel power, cadence, heart rate and temperature
/// - record 3 has no timestamp
pub fn sample_ride() -> Vec<u8> {
    const LAT: i32 = 1 << 29; // 45 degrees
    const LON: i32 = 1 << 28; // 22.5 degrees

    let mut fit = FitWriter::new();
    fit.define(0, 0, &[(0, 1, 0x00)])
        .data(0, &[&[4]])
        .define(1, 23, &[(2, 2, 0x84)])
        .data(1, &[&89u16.to_le_bytes()])
        .define(
            2,
            20,
            &[
                (253, 4, 0x86),
                (0, 4, 0x85),
                (1, 4, 0x85),
                (78, 4, 0x86),
                (5, 4, 0x86),
                (7, 2, 0x84),
                (4, 1, 0x02),
                (3, 1, 0x02),
                (13, 1, 0x01),
            ],
        )
        .define(3, 20, &[(7, 2, 0x84), (3, 1, 0x02)]);

    fit.data(3, &[&150u16.to_le_bytes(), &[120]]);
    fit.data(
        2,
        &[
            &RIDE_START.to_le_bytes(),
            &LAT.to_le_bytes(),
            &LON.to_le_bytes(),
            &3000u32.to_le_bytes(),
            &0u32.to_le_bytes(),
            &200u16.to_le_bytes(),
            &[90],
            &[140],
            &20i8.to_le_bytes(),
        ],
    );
    fit.data(
        2,
        &[
            &(RIDE_START + 1).to_le_bytes(),
            &(LAT + 1000).to_le_bytes(),
            &LON.to_le_bytes(),
            &3005u32.to_le_bytes(),
            &500u32.to_le_bytes(),
            &u16::MAX.to_le_bytes(),
            &[u8::MAX],
            &[u8::MAX],
            &i8::MAX.to_le_bytes(),
        ],
    );
    fit.data(3, &[&250u16.to_le_bytes(), &[150]]);
    fit.data(
        2,
        &[
            &(RIDE_START + 2).to_le_bytes(),
            &(LAT + 2000).to_le_bytes(),
            &LON.to_le_bytes(),
            &3010u32.to_le_bytes(),
            &1000u32.to_le_bytes(),
            &300u16.to_le_bytes(),
            &[95],
            &[150],
            &21i8.to_le_bytes(),
        ],
    );

    fit.finish()
}
