//! # 字节布局常量
//!
//! 所有"魔法长度"都由格式几何推导而来，而不是直接写死字面量：
//!
//! ```text
//! PNG  : 签名(8) + IHDR[长度(4) 类型(4) 数据(13) CRC(4)] = 33 字节 = 44 个 base64 字符
//! pHYs : 长度(4) + 类型(4) + 数据[X(4) Y(4) 单位(1)] + CRC(4) = 21 字节
//! JFIF : SOI(2) APP0(2) 段长(2) "JFIF\0"(5) 版本(2) | 单位(1) X(2) Y(2) = 18 字节 = 24 个字符
//! ```

/// 一个 base64 量子：3 字节对应 4 个字符。
pub(crate) const B64_QUANTUM_BYTES: usize = 3;
pub(crate) const B64_QUANTUM_CHARS: usize = 4;

/// 覆盖 `bytes` 个字节所需的 base64 字符数（向上取整到完整量子）。
pub(crate) const fn b64_chars_for(bytes: usize) -> usize {
    bytes.div_ceil(B64_QUANTUM_BYTES) * B64_QUANTUM_CHARS
}

// ---- PNG ----

pub(crate) const PNG_SIGNATURE_LEN: usize = 8;
pub(crate) const CHUNK_LENGTH_FIELD_LEN: usize = 4;
pub(crate) const CHUNK_TYPE_LEN: usize = 4;
pub(crate) const CHUNK_CRC_LEN: usize = 4;

const IHDR_DATA_LEN: usize = 13;
const IHDR_FRAMED_LEN: usize = CHUNK_LENGTH_FIELD_LEN + CHUNK_TYPE_LEN + IHDR_DATA_LEN + CHUNK_CRC_LEN;

/// 签名 + 完整 IHDR：新 pHYs 块插入点。
pub(crate) const PNG_HEADER_LEN: usize = PNG_SIGNATURE_LEN + IHDR_FRAMED_LEN;
pub(crate) const PNG_HEADER_CHARS: usize = b64_chars_for(PNG_HEADER_LEN);

pub(crate) const PHYS_TYPE: [u8; CHUNK_TYPE_LEN] = *b"pHYs";
/// X 密度(4) + Y 密度(4) + 单位(1)。
pub(crate) const PHYS_DATA_LEN: usize = 4 + 4 + 1;
/// 参与 CRC 计算的部分：类型 + 数据。
pub(crate) const PHYS_PAYLOAD_LEN: usize = CHUNK_TYPE_LEN + PHYS_DATA_LEN;
pub(crate) const PHYS_FRAMED_LEN: usize = CHUNK_LENGTH_FIELD_LEN + PHYS_PAYLOAD_LEN + CHUNK_CRC_LEN;

/// 插入 pHYs 后的新头部长度。
pub(crate) const PNG_INSERTED_HEADER_LEN: usize = PNG_HEADER_LEN + PHYS_FRAMED_LEN;

/// 规范 pHYs 块的前 8 个字节：长度字段(=9) + 类型标签。
pub(crate) const PHYS_FRAME_PREFIX: [u8; CHUNK_LENGTH_FIELD_LEN + CHUNK_TYPE_LEN] =
    [0, 0, 0, PHYS_DATA_LEN as u8, b'p', b'H', b'Y', b's'];

/// 覆写模式下，在文本命中位置之后额外解码的字节数。
///
/// 文本下标本身已不小于真实字节偏移，再追加完整的 pHYs 帧、一个长度字段
/// 与一个 base64 量子作为余量。
pub(crate) const PHYS_LOOKAHEAD_BYTES: usize =
    PHYS_FRAMED_LEN + CHUNK_LENGTH_FIELD_LEN + B64_QUANTUM_BYTES;

/// pHYs 单位说明符：1 = 像素/米。
pub(crate) const PHYS_UNIT_METRE: u8 = 1;
pub(crate) const INCHES_PER_METRE: f64 = 39.3701;

// ---- JPEG (JFIF APP0) ----

const JPEG_SOI_LEN: usize = 2;
const JPEG_MARKER_LEN: usize = 2;
const APP0_SEGMENT_LENGTH_LEN: usize = 2;
const JFIF_VERSION_LEN: usize = 2;

pub(crate) const JFIF_IDENTIFIER: &[u8; 5] = b"JFIF\0";
pub(crate) const JFIF_IDENTIFIER_OFFSET: usize = JPEG_SOI_LEN + JPEG_MARKER_LEN + APP0_SEGMENT_LENGTH_LEN;
pub(crate) const JFIF_UNITS_OFFSET: usize = JFIF_IDENTIFIER_OFFSET + JFIF_IDENTIFIER.len() + JFIF_VERSION_LEN;
pub(crate) const JFIF_X_DENSITY_OFFSET: usize = JFIF_UNITS_OFFSET + 1;
pub(crate) const JFIF_Y_DENSITY_OFFSET: usize = JFIF_X_DENSITY_OFFSET + 2;
pub(crate) const JFIF_HEADER_LEN: usize = JFIF_Y_DENSITY_OFFSET + 2;
pub(crate) const JFIF_HEADER_CHARS: usize = b64_chars_for(JFIF_HEADER_LEN);

/// JFIF 单位：1 = 点/英寸。
pub(crate) const JFIF_UNITS_DOTS_PER_INCH: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_geometry_matches_known_lengths() {
        assert_eq!(PNG_HEADER_LEN, 33);
        assert_eq!(PNG_HEADER_CHARS, 44);
        assert_eq!(PHYS_PAYLOAD_LEN, 13);
        assert_eq!(PHYS_FRAMED_LEN, 21);
        assert_eq!(PNG_INSERTED_HEADER_LEN, 54);
        assert_eq!(PHYS_LOOKAHEAD_BYTES, 28);
    }

    #[test]
    fn jfif_geometry_matches_known_offsets() {
        assert_eq!(JFIF_IDENTIFIER_OFFSET, 6);
        assert_eq!(JFIF_UNITS_OFFSET, 13);
        assert_eq!(JFIF_X_DENSITY_OFFSET, 14);
        assert_eq!(JFIF_Y_DENSITY_OFFSET, 16);
        assert_eq!(JFIF_HEADER_LEN, 18);
        assert_eq!(JFIF_HEADER_CHARS, 24);
    }

    #[test]
    fn b64_chars_rounds_up_to_whole_quantum() {
        assert_eq!(b64_chars_for(0), 0);
        assert_eq!(b64_chars_for(1), 4);
        assert_eq!(b64_chars_for(3), 4);
        assert_eq!(b64_chars_for(4), 8);
    }
}
