//! # 像素密度改写模块（density）
//!
//! ## 设计思路
//!
//! 不完整解码图片，只解码 base64 主体中包含密度信息的最短前缀，改写后重新编码，
//! 再与从未解码的剩余文本拼接。头部窗口长度总是 base64 量子（4 字符）的整数倍，
//! 因此解码/编码可以精确往返。
//!
//! - `crc`：PNG CRC-32（一次性构建的查找表）
//! - `locator`：在 base64 文本与已解码字节上定位 pHYs
//! - `builder`：构建 pHYs 载荷与 CRC，完成 DPI → 像素/米 换算
//! - `splice`：JPEG 固定偏移改写、PNG 覆写/插入
//! - `dispatch`：格式识别、窗口规划、拼回 Data URL
//! - `layout/source`：字节布局常量与数据模型
//!
//! ## 调用链
//!
//! ```text
//! change_dpi
//!    ├─ EncodedImage::parse / ImageKind::classify
//!    ├─ HeaderPlan::for_body ── locator::find_phys_chunk（仅 PNG）
//!    ├─ DecodedHeader::decode
//!    └─ splice_header
//!         ├─ Jpeg         → set_jfif_density
//!         ├─ PngOverwrite → locator::find_phys_start + builder + crc
//!         └─ PngInsert    → builder + crc
//! ```

mod builder;
mod crc;
mod dispatch;
mod layout;
mod locator;
mod source;
mod splice;

pub use builder::{PhysChunk, build_phys_chunk, dpi_to_pixels_per_metre};
pub use crc::crc32;
pub use dispatch::{HeaderPlan, change_dpi};
pub use locator::{PHYS_SIGNATURES, PhysSignature, find_phys_chunk, find_phys_start};
pub use source::{DecodedHeader, EncodedImage, ImageKind};
pub use splice::{SpliceMode, insert_phys, overwrite_phys, set_jfif_density, splice_header};
