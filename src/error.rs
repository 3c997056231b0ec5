//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载密度改写链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! ## 实现思路
//!
//! - 核心链路（拆分 → 识别 → 解码 → 改写）只会产生前五种错误。
//! - `FileSystem` / `ResourceLimit` 仅由 `loader` 协作层产生。
//! - Base64 错误通过 `#[from]` 直接上转，调用点只需 `?`。

/// 密度改写统一错误类型。
///
/// 所有错误都原样返回给直接调用方，库内部不重试、不吞掉、不打印。
#[derive(Debug, thiserror::Error)]
pub enum DpiError {
    /// Data URL 缺少逗号分隔符，或缺少 `base64,` 标记。
    #[error("输入格式错误：{0}")]
    MalformedInput(String),

    /// MIME 类型既不是 PNG 也不是 JPEG。
    #[error("不支持的图片格式：{0}")]
    UnsupportedFormat(String),

    /// 解码后的头部长度不足，或目标区域超出头部窗口。
    #[error("图片头部无效：{0}")]
    InvalidHeader(String),

    /// 文本扫描预测到 pHYs，但字节扫描无法确认。
    #[error("未找到 pHYs 数据块：{0}")]
    ChunkNotFound(String),

    #[error("Base64 解码失败：{0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

impl From<DpiError> for String {
    /// 兼容部分仍使用字符串错误的调用点。
    fn from(error: DpiError) -> Self {
        error.to_string()
    }
}
