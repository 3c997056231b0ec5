//! # changedpi — 图片像素密度改写库
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs (CLI: clap + env_logger)                        │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ Result<T, DpiError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ├─ loader ──── 文件 ↔ Data URL、后缀/签名识别            │
//! │  ├─ config ──── DpiConfig（JSON，缺省回退）                │
//! │  ├─ density ─── 核心：只解码头部窗口并改写密度             │
//! │  │   ├─ crc / locator / builder                         │
//! │  │   └─ splice / dispatch                               │
//! │  └─ error ───── DpiError（统一错误类型）                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `DpiError` |
//! | [`density`] | PNG pHYs 定位/构建/覆写/插入，JPEG JFIF 密度改写 |
//! | [`loader`] | 读取图片文件为 Data URL、写回文件、按路径改写 |
//! | [`config`] | 文件协作层的体积限制与签名探测开关 |

pub mod config;
pub mod density;
pub mod error;
pub mod loader;

pub use config::DpiConfig;
pub use density::{ImageKind, change_dpi, crc32};
pub use error::DpiError;
pub use loader::{change_dpi_by_path, change_dpi_file, data_url_from_file, save_image};
