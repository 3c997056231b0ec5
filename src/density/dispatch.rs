//! # 格式分发模块
//!
//! ## 设计思路
//!
//! 对外唯一入口 `change_dpi`，处理链路固定为：
//! 1. 按第一个逗号拆分 Data URL
//! 2. 识别 PNG / JPEG
//! 3. 规划头部窗口长度与改写方式（`HeaderPlan`）
//! 4. 只解码头部窗口，改写，再重新编码
//! 5. 拼回原格式前缀与未触碰的剩余文本
//!
//! 任一步失败都整体返回错误，不存在部分成功。

use base64::{Engine as _, engine::general_purpose};

use super::layout::{JFIF_HEADER_CHARS, PHYS_LOOKAHEAD_BYTES, PNG_HEADER_CHARS, b64_chars_for};
use super::locator::find_phys_chunk;
use super::source::{DecodedHeader, EncodedImage, ImageKind};
use super::splice::{SpliceMode, splice_header};
use crate::error::DpiError;

/// 头部窗口规划：解码多少个 base64 字符，以及如何改写。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderPlan {
    pub header_chars: usize,
    pub mode: SpliceMode,
}

impl HeaderPlan {
    /// 根据容器类型与 base64 主体规划头部窗口。
    pub fn for_body(kind: ImageKind, body: &str) -> Self {
        match kind {
            ImageKind::Jpeg => Self {
                header_chars: JFIF_HEADER_CHARS,
                mode: SpliceMode::Jpeg,
            },
            ImageKind::Png => match find_phys_chunk(body) {
                Some(text_index) => Self {
                    header_chars: b64_chars_for(text_index + PHYS_LOOKAHEAD_BYTES),
                    mode: SpliceMode::PngOverwrite,
                },
                None => Self {
                    header_chars: PNG_HEADER_CHARS,
                    mode: SpliceMode::PngInsert,
                },
            },
        }
    }
}

/// 改写 Data URL 中图片的像素密度。
///
/// # 示例
/// ```rust,ignore
/// let output = changedpi::change_dpi("data:image/png;base64,iVBORw0KGgo...", 300)?;
/// # Ok::<(), changedpi::DpiError>(())
/// ```
pub fn change_dpi(data_url: &str, dpi: u16) -> Result<String, DpiError> {
    let image = EncodedImage::parse(data_url)?;
    let kind = ImageKind::classify(image.format)?;
    let plan = HeaderPlan::for_body(kind, image.body);

    log::debug!(
        "🧭 {:?} 改写方式 {:?}，解码头部 {} 个字符（主体共 {} 个）",
        kind,
        plan.mode,
        plan.header_chars,
        image.body.len()
    );

    let header = DecodedHeader::decode(image.body, plan.header_chars)?;
    let spliced = splice_header(plan.mode, header.bytes, dpi)?;
    let encoded = general_purpose::STANDARD.encode(spliced);

    Ok(image.rebuild(&encoded, header.rest_of_data))
}
