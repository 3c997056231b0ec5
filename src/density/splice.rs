//! # 头部改写模块
//!
//! ## 设计思路
//!
//! 只改写已解码的头部窗口，窗口之外的 base64 文本保持原样。
//! 三种改写方式由 `SpliceMode` 描述：
//!
//! - `Jpeg`：JFIF APP0 的密度字段位于固定偏移，直接写入 DPI。
//! - `PngOverwrite`：头部内已有 pHYs，原地覆写载荷与 CRC，长度不变。
//! - `PngInsert`：没有 pHYs，在 IHDR 之后插入完整的 21 字节帧。

use super::builder::{PhysChunk, build_phys_chunk};
use super::layout::{
    CHUNK_CRC_LEN, JFIF_HEADER_LEN, JFIF_IDENTIFIER, JFIF_IDENTIFIER_OFFSET,
    JFIF_UNITS_DOTS_PER_INCH, JFIF_UNITS_OFFSET, JFIF_X_DENSITY_OFFSET, JFIF_Y_DENSITY_OFFSET,
    PHYS_PAYLOAD_LEN, PNG_HEADER_LEN, PNG_INSERTED_HEADER_LEN,
};
use super::locator::find_phys_start;
use crate::error::DpiError;

/// 头部改写方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceMode {
    Jpeg,
    PngInsert,
    PngOverwrite,
}

/// 按改写方式处理已解码头部，返回新的头部字节。
pub fn splice_header(mode: SpliceMode, header: Vec<u8>, dpi: u16) -> Result<Vec<u8>, DpiError> {
    match mode {
        SpliceMode::Jpeg => set_jfif_density(header, dpi),
        SpliceMode::PngOverwrite => overwrite_phys(header, &build_phys_chunk(dpi)),
        SpliceMode::PngInsert => insert_phys(&header, &build_phys_chunk(dpi)),
    }
}

/// 写入 JFIF 密度：单位 = 点/英寸，X/Y = `dpi`（大端，不做米制换算）。
pub fn set_jfif_density(mut header: Vec<u8>, dpi: u16) -> Result<Vec<u8>, DpiError> {
    if header.len() < JFIF_HEADER_LEN {
        return Err(DpiError::InvalidHeader(format!(
            "JPEG 头部仅 {} 字节，至少需要 {} 字节",
            header.len(),
            JFIF_HEADER_LEN
        )));
    }

    let identifier = &header[JFIF_IDENTIFIER_OFFSET..JFIF_IDENTIFIER_OFFSET + JFIF_IDENTIFIER.len()];
    if identifier != JFIF_IDENTIFIER {
        log::warn!("⚠️ JPEG 头部未发现 JFIF 标识，仍按固定偏移写入密度");
    }

    let density = dpi.to_be_bytes();
    header[JFIF_UNITS_OFFSET] = JFIF_UNITS_DOTS_PER_INCH;
    header[JFIF_X_DENSITY_OFFSET..JFIF_X_DENSITY_OFFSET + 2].copy_from_slice(&density);
    header[JFIF_Y_DENSITY_OFFSET..JFIF_Y_DENSITY_OFFSET + 2].copy_from_slice(&density);

    Ok(header)
}

/// 原地覆写头部中已有的 pHYs 载荷与 CRC。
pub fn overwrite_phys(mut header: Vec<u8>, chunk: &PhysChunk) -> Result<Vec<u8>, DpiError> {
    let start = find_phys_start(&header).ok_or_else(|| {
        DpiError::ChunkNotFound(format!("已解码的 {} 字节头部中没有 pHYs 帧头", header.len()))
    })?;

    let crc_start = start + PHYS_PAYLOAD_LEN;
    let end = crc_start + CHUNK_CRC_LEN;
    if end > header.len() {
        return Err(DpiError::InvalidHeader(format!(
            "pHYs 位于偏移 {}，超出已解码头部（{} 字节）",
            start,
            header.len()
        )));
    }

    header[start..crc_start].copy_from_slice(chunk.payload());
    header[crc_start..end].copy_from_slice(&chunk.crc_bytes());

    log::debug!("✏️ 已覆写偏移 {} 处的 pHYs（{} 像素/米）", start, chunk.pixels_per_metre());
    Ok(header)
}

/// 在 IHDR 之后插入新的 pHYs 帧，返回 54 字节的新头部。
pub fn insert_phys(header: &[u8], chunk: &PhysChunk) -> Result<Vec<u8>, DpiError> {
    if header.len() < PNG_HEADER_LEN {
        return Err(DpiError::InvalidHeader(format!(
            "PNG 头部仅 {} 字节，至少需要 {} 字节（签名 + IHDR）",
            header.len(),
            PNG_HEADER_LEN
        )));
    }

    let mut spliced = Vec::with_capacity(PNG_INSERTED_HEADER_LEN);
    spliced.extend_from_slice(&header[..PNG_HEADER_LEN]);
    spliced.extend_from_slice(&chunk.framed());

    log::debug!("➕ 已在 IHDR 之后插入 pHYs（{} 像素/米）", chunk.pixels_per_metre());
    Ok(spliced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jfif_header() -> Vec<u8> {
        vec![
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00,
            0x00, 0x48, 0x00, 0x48,
        ]
    }

    #[test]
    fn jpeg_density_written_at_fixed_offsets() {
        let header = set_jfif_density(jfif_header(), 300).expect("jpeg splice failed");

        assert_eq!(header[13], 1);
        assert_eq!(&header[14..18], &[0x01, 0x2C, 0x01, 0x2C]);
        assert_eq!(&header[..13], &jfif_header()[..13]);
    }

    #[test]
    fn jpeg_short_header_is_rejected() {
        let result = set_jfif_density(vec![0xFF, 0xD8, 0xFF, 0xE0], 72);

        assert!(matches!(result, Err(DpiError::InvalidHeader(_))));
    }

    #[test]
    fn jpeg_without_jfif_identifier_is_still_written() {
        let mut header = jfif_header();
        header[6..11].copy_from_slice(b"Exif\0");

        let header = set_jfif_density(header, 96).expect("jpeg splice failed");

        assert_eq!(&header[14..16], &[0x00, 0x60]);
    }

    #[test]
    fn overwrite_replaces_payload_and_crc_in_place() {
        let old = build_phys_chunk(72);
        let mut header = vec![0xEE; 5];
        header.extend_from_slice(&old.framed());
        header.extend_from_slice(&[0x11; 3]);
        let original_len = header.len();

        let new = build_phys_chunk(300);
        let header = overwrite_phys(header, &new).expect("overwrite failed");

        assert_eq!(header.len(), original_len);
        assert_eq!(&header[5..26], &new.framed());
        assert_eq!(&header[26..], &[0x11; 3]);
    }

    #[test]
    fn overwrite_without_chunk_reports_not_found() {
        let result = overwrite_phys(vec![0; 40], &build_phys_chunk(72));

        assert!(matches!(result, Err(DpiError::ChunkNotFound(_))));
    }

    #[test]
    fn overwrite_with_truncated_chunk_is_invalid() {
        let framed = build_phys_chunk(72).framed();
        let result = overwrite_phys(framed[..12].to_vec(), &build_phys_chunk(300));

        assert!(matches!(result, Err(DpiError::InvalidHeader(_))));
    }

    #[test]
    fn insert_places_chunk_after_ihdr() {
        let header: Vec<u8> = (0..PNG_HEADER_LEN as u8).collect();
        let chunk = build_phys_chunk(150);

        let spliced = insert_phys(&header, &chunk).expect("insert failed");

        assert_eq!(spliced.len(), PNG_INSERTED_HEADER_LEN);
        assert_eq!(&spliced[..PNG_HEADER_LEN], header.as_slice());
        assert_eq!(&spliced[PNG_HEADER_LEN..], &chunk.framed());
    }

    #[test]
    fn insert_short_header_is_invalid() {
        let result = insert_phys(&[0x89, b'P', b'N', b'G'], &build_phys_chunk(72));

        assert!(matches!(result, Err(DpiError::InvalidHeader(_))));
    }

    #[test]
    fn splice_header_dispatches_by_mode() {
        let header = splice_header(SpliceMode::Jpeg, jfif_header(), 72).expect("jpeg splice failed");

        assert_eq!(&header[14..16], &[0x00, 0x48]);
    }
}
