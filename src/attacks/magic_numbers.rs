//! Offline-generated magic multipliers.
//!
//! Produced by the `magic_gen` binary and verified collision-free over every
//! blocker subset. Index widths equal the popcount of each square's relevant
//! mask (rook table 102400 slots, bishop table 5248 slots).

pub const ROOK_MAGICS: [u64; 64] = [
    0x0080_0090_8064_C000, 0x0040_2000_4000_1000, 0x0180_1000_80A0_010A, 0x8880_0410_0080_0800,
    0x1200_1002_0120_0804, 0x0200_0200_0401_1008, 0x2180_0100_0080_0600, 0x0200_0050_8821_0204,
    0x0400_8000_4000_8021, 0x0400_4000_2000_5000, 0x8240_8010_0020_0080, 0x8611_0010_0420_0900,
    0x0081_8080_0C00_1800, 0x0100_8002_0080_0400, 0x0A02_0001_0200_0408, 0x8020_8023_0010_4280,
    0x0080_0040_0040_2000, 0xE010_1040_0040_2000, 0x0800_8080_1000_2000, 0xA280_2100_0810_0100,
    0x0001_8180_1400_0800, 0xA002_0101_0008_0400, 0x0080_2400_0102_0870, 0x0001_0200_0404_8845,
    0x0081_8262_8000_4004, 0x2020_8109_0028_4000, 0x0200_1000_8080_2000, 0x0200_0800_8010_0080,
    0x8083_0801_0010_0500, 0x4406_0009_0100_0400, 0x0005_0200_8080_0100, 0x0090_2042_0000_8114,
    0x0010_4000_9480_0420, 0x0900_8040_0080_2002, 0x0201_0018_4100_2000, 0x4100_0800_8080_1000,
    0x4540_0400_8080_0800, 0x0002_0010_0404_0020, 0x0281_1958_1400_1002, 0x1240_8000_4080_0100,
    0x0880_0420_0052_4004, 0x02C0_8041_0206_002C, 0x0801_2002_4105_0010, 0x8400_0800_1000_8080,
    0x0008_0005_0009_0010, 0x0082_0090_8402_0008, 0x4012_0001_0802_0004, 0x9000_104D_0886_0004,
    0x2004_2041_1480_0100, 0x0148_8021_1240_0300, 0x0202_8420_0010_0880, 0x001B_0800_8090_0080,
    0x001A_0020_0810_0600, 0x0004_0080_0402_0080, 0x5181_0006_0004_0300, 0x0000_0444_0112_8A00,
    0x8044_1104_8000_2441, 0x2008_1100_8440_2202, 0x9080_6005_0900_10C1, 0x0004_2031_0A00_4A42,
    0x0023_0010_0402_0801, 0x0882_0010_0804_0102, 0x0002_3008_8118_020C, 0x0000_0190_2504_0042,
];

pub const BISHOP_MAGICS: [u64; 64] = [
    0x0045_0108_0800_8680, 0x2002_0802_0400_4898, 0x0210_009A_1040_0006, 0x0824_0502_0081_0200,
    0x0006_0611_0500_4090, 0x0001_0108_C000_0000, 0x0814_0402_8210_4004, 0x0012_0122_0110_6800,
    0x1082_3014_100C_1040, 0x0080_C208_8802_808C, 0x0281_1084_1040_4000, 0x0101_2120_4182_6200,
    0x0020_1410_2822_1058, 0x2201_0202_0220_0202, 0x0000_82A8_0148_2000, 0x0000_0084_0141_1044,
    0x0007_1030_1430_0404, 0x0002_0911_1001_0100, 0x4214_0012_040C_0808, 0x0800_8088_0200_4020,
    0x90C4_0042_1014_0000, 0x0800_2009_00A0_1000, 0x00D0_4002_0110_8810, 0x8082_0183_8144_12A0,
    0x00A0_1008_2022_02B4, 0x01C2_021A_0950_0402, 0x0084_4402_0804_2400, 0x8004_0040_0C09_0100,
    0xBA10_0400_1080_2100, 0xD182_0090_0600_5000, 0x5011_0210_0100_9004, 0x0020_4202_0051_0400,
    0x0292_1040_0046_8800, 0x0004_3009_091C_0500, 0x0280_4410_0002_0025, 0x0042_8200_8008_0080,
    0x0440_1010_1001_0040, 0x1000_9001_0080_8080, 0x0108_1081_2008_9800, 0x0044_0102_0001_2682,
    0xC002_5004_2090_0400, 0x0040_4822_1071_0800, 0x0002_0600_2400_0200, 0x0281_020A_4400_0800,
    0xA002_1200_A400_0200, 0x0001_3010_0084_0840, 0x2868_5001_0844_4220, 0x0004_1110_4100_0200,
    0x8044_0208_4208_0200, 0x0000_2201_0421_0200, 0x0000_0212_0104_4000, 0x0000_2808_8404_0028,
    0x4012_1140_1085_8003, 0x0000_0810_0408_2B88, 0x3892_7005_0820_8002, 0x0022_0A04_1B06_0400,
    0x0812_0202_8401_4881, 0x0104_34A2_8210_3100, 0x0490_4008_2402_0800, 0x4A20_002C_0020_8800,
    0x0000_00A0_1102_0200, 0x4002_940A_0248_2202, 0x5100_1002_0214_0406, 0x0210_2000_8405_40C1,
];

#[cfg(test)]
mod tests {
    use super::{BISHOP_MAGICS, ROOK_MAGICS};

    #[test]
    fn magics_are_sparse_and_nonzero() {
        for magic in ROOK_MAGICS.iter().chain(BISHOP_MAGICS.iter()) {
            assert_ne!(*magic, 0);
            assert!(magic.count_ones() < 40);
        }
    }
}
