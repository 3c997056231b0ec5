//! # 配置模块
//!
//! ## 设计思路
//!
//! 核心改写链路没有可调参数；可调策略只存在于文件协作层（`loader`）。
//! 集中放在 `DpiConfig`，保证行为可观测、可调整、可测试。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用配置。
//! - 配置文件为 JSON，缺失字段回退默认值（`#[serde(default)]`）。
//! - 配置文件不存在或无法解析时整体回退默认配置，不阻断主流程。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DpiError;

/// 文件协作层配置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DpiConfig {
    /// 读取图片文件或解码 Data URL 时允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 文件后缀无法识别时，是否按文件签名（magic bytes）探测 PNG/JPEG。
    pub sniff_unknown_suffix: bool,
}

impl Default for DpiConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            sniff_unknown_suffix: true,
        }
    }
}

impl DpiConfig {
    /// 从 JSON 文件加载配置，失败时回退默认值。
    pub fn load_from_path(config_path: &Path) -> Self {
        if config_path.exists() {
            if let Ok(content) = fs::read_to_string(config_path) {
                match serde_json::from_str::<Self>(&content) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("⚠️ 解析配置文件失败，使用默认配置: {}", e),
                }
            }
        }
        Self::default()
    }

    /// 校验配置取值。
    pub fn validate(&self) -> Result<(), DpiError> {
        if self.max_file_size == 0 {
            return Err(DpiError::ResourceLimit("max_file_size 必须大于 0".to_string()));
        }
        Ok(())
    }

    /// 写出为格式化 JSON。
    pub fn save_to_path(&self, config_path: &Path) -> Result<(), DpiError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DpiError::FileSystem(format!("序列化配置失败: {}", e)))?;
        fs::write(config_path, content)
            .map_err(|e| DpiError::FileSystem(format!("写入配置文件失败: {}", e)))
    }
}
