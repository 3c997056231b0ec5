//! # 数据模型
//!
//! - `EncodedImage`：按第一个逗号拆分的 Data URL（格式前缀 + base64 主体）
//! - `ImageKind`：由格式前缀识别出的容器类型
//! - `DecodedHeader`：只解码主体前缀得到的头部字节，以及未触碰的剩余文本

use base64::{Engine as _, engine::general_purpose};

use crate::error::DpiError;

/// 拆分后的 Data URL，借用原始字符串。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedImage<'a> {
    /// 逗号之前的部分，例如 `data:image/png;base64`。
    pub format: &'a str,
    /// 逗号之后的 base64 文本。
    pub body: &'a str,
}

impl<'a> EncodedImage<'a> {
    /// 按第一个逗号拆分。
    pub fn parse(data_url: &'a str) -> Result<Self, DpiError> {
        let (format, body) = data_url
            .split_once(',')
            .ok_or_else(|| DpiError::MalformedInput("Data URL 缺少逗号分隔符".to_string()))?;
        Ok(Self { format, body })
    }

    /// 用新的头部文本与未触碰的剩余文本重新拼出 Data URL。
    pub fn rebuild(&self, header: &str, rest_of_data: &str) -> String {
        let mut out = String::with_capacity(self.format.len() + 1 + header.len() + rest_of_data.len());
        out.push_str(self.format);
        out.push(',');
        out.push_str(header);
        out.push_str(rest_of_data);
        out
    }
}

/// 支持的容器类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// 按子串识别格式前缀（不区分大小写）：`png` → PNG，`jpeg`/`jpg` → JPEG。
    pub fn classify(format: &str) -> Result<Self, DpiError> {
        let lowered = format.to_ascii_lowercase();
        if lowered.contains("png") {
            Ok(Self::Png)
        } else if lowered.contains("jpeg") || lowered.contains("jpg") {
            Ok(Self::Jpeg)
        } else {
            Err(DpiError::UnsupportedFormat(format.to_string()))
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// 标准 Data URL 前缀，例如 `data:image/png;base64,`。
    pub fn data_url_prefix(self) -> String {
        format!("data:{};base64,", self.mime_type())
    }
}

/// 已解码的头部窗口。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHeader<'a> {
    pub bytes: Vec<u8>,
    /// 从未解码的 base64 剩余文本，原样拼回输出。
    pub rest_of_data: &'a str,
}

impl<'a> DecodedHeader<'a> {
    /// 解码 `body` 的前 `header_chars` 个字符；主体更短时解码整个主体。
    pub fn decode(body: &'a str, header_chars: usize) -> Result<Self, DpiError> {
        let split = header_chars.min(body.len());
        let (header, rest_of_data) = body
            .split_at_checked(split)
            .ok_or_else(|| DpiError::MalformedInput("base64 主体包含非 ASCII 字符".to_string()))?;

        let bytes = general_purpose::STANDARD.decode(header)?;
        Ok(Self { bytes, rest_of_data })
    }
}
