//! # pHYs 构建模块
//!
//! PNG 以"像素/米"记录密度，输入为 DPI（像素/英寸），构建时完成换算。

use super::crc::crc32;
use super::layout::{
    CHUNK_CRC_LEN, INCHES_PER_METRE, PHYS_DATA_LEN, PHYS_FRAMED_LEN, PHYS_PAYLOAD_LEN,
    PHYS_TYPE, PHYS_UNIT_METRE,
};

/// 已构建的 pHYs 块：13 字节载荷（类型 + 数据）与其大端 CRC。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysChunk {
    payload: [u8; PHYS_PAYLOAD_LEN],
    crc: u32,
}

impl PhysChunk {
    /// `"pHYs" ‖ X ‖ Y ‖ 单位`。
    pub fn payload(&self) -> &[u8; PHYS_PAYLOAD_LEN] {
        &self.payload
    }

    pub fn crc(&self) -> u32 {
        self.crc
    }

    pub fn crc_bytes(&self) -> [u8; CHUNK_CRC_LEN] {
        self.crc.to_be_bytes()
    }

    pub fn pixels_per_metre(&self) -> u32 {
        let mut x = [0u8; 4];
        x.copy_from_slice(&self.payload[4..8]);
        u32::from_be_bytes(x)
    }

    /// 完整的线上帧：长度字段 + 载荷 + CRC。
    pub fn framed(&self) -> [u8; PHYS_FRAMED_LEN] {
        let mut framed = [0u8; PHYS_FRAMED_LEN];
        framed[..4].copy_from_slice(&(PHYS_DATA_LEN as u32).to_be_bytes());
        framed[4..4 + PHYS_PAYLOAD_LEN].copy_from_slice(&self.payload);
        framed[4 + PHYS_PAYLOAD_LEN..].copy_from_slice(&self.crc_bytes());
        framed
    }
}

/// DPI 换算为像素/米（四舍五入）。
///
/// `u16` 输入保证乘积总能放入 32 位字段。
pub fn dpi_to_pixels_per_metre(dpi: u16) -> u32 {
    (f64::from(dpi) * INCHES_PER_METRE).round() as u32
}

/// 按目标 DPI 构建 pHYs 块，X/Y 使用同一密度，单位固定为米。
pub fn build_phys_chunk(dpi: u16) -> PhysChunk {
    let density = dpi_to_pixels_per_metre(dpi).to_be_bytes();

    let mut payload = [0u8; PHYS_PAYLOAD_LEN];
    payload[..4].copy_from_slice(&PHYS_TYPE);
    payload[4..8].copy_from_slice(&density);
    payload[8..12].copy_from_slice(&density);
    payload[12] = PHYS_UNIT_METRE;

    PhysChunk {
        payload,
        crc: crc32(&payload),
    }
}
