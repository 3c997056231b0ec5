//! # 文件协作层
//!
//! ## 设计思路
//!
//! 核心改写只处理 Data URL 字符串，不做任何文件或网络访问。
//! 本模块负责"文件 ↔ Data URL"的转换，并在尽可能早的阶段执行输入校验，尽快失败。
//!
//! ## 实现思路
//!
//! - 读取：存在性 + metadata 体积限制 + 读取。
//! - MIME：优先按后缀推断，后缀未知时可按文件签名探测（`infer`）。
//! - 写出：解码前先估算解码后体积，超限直接拒绝。
//! - 核心链路的错误原样向上传递，不会被吞掉成空结果。

use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use crate::config::DpiConfig;
use crate::density::{ImageKind, change_dpi};
use crate::error::DpiError;

const DATA_URL_BASE64_MARKER: &str = "base64,";

/// 读取文件原始字节（带体积限制）。
fn read_file_with_limit(path: &Path, max_file_size: u64) -> Result<Vec<u8>, DpiError> {
    log::info!("📁 开始读取本地图片 - 路径: {}", path.display());

    if !path.exists() {
        return Err(DpiError::FileSystem(format!("文件不存在：{}", path.display())));
    }

    let metadata = fs::metadata(path)
        .map_err(|e| DpiError::FileSystem(format!("无法读取文件信息：{}", e)))?;

    if metadata.len() > max_file_size {
        return Err(DpiError::ResourceLimit(format!(
            "文件过大：{:.2} MB（限制：{:.2} MB）",
            metadata.len() as f64 / 1024.0 / 1024.0,
            max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    fs::read(path).map_err(|e| DpiError::FileSystem(format!("无法读取图片文件：{}", e)))
}

/// 读取文件并编码为纯 base64 字符串。
pub fn encode_file(path: &Path, config: &DpiConfig) -> Result<String, DpiError> {
    let bytes = read_file_with_limit(path, config.max_file_size)?;
    Ok(general_purpose::STANDARD.encode(bytes))
}

/// 按文件后缀推断容器类型（不区分大小写）。
pub fn kind_from_suffix(path: &Path) -> Option<ImageKind> {
    let suffix = path.extension()?.to_str()?.to_ascii_lowercase();
    match suffix.as_str() {
        "png" => Some(ImageKind::Png),
        "jpg" | "jpeg" => Some(ImageKind::Jpeg),
        _ => None,
    }
}

/// 通过文件签名（magic bytes）识别 PNG/JPEG。
fn sniff_kind(bytes: &[u8]) -> Result<ImageKind, DpiError> {
    let kind = infer::get(bytes)
        .ok_or_else(|| DpiError::UnsupportedFormat("无法识别图片类型".to_string()))?;

    match kind.mime_type() {
        "image/png" => Ok(ImageKind::Png),
        "image/jpeg" => Ok(ImageKind::Jpeg),
        other => Err(DpiError::UnsupportedFormat(other.to_string())),
    }
}

/// 读取图片文件并包装为 `data:<mime>;base64,<payload>`。
pub fn data_url_from_file(path: &Path, config: &DpiConfig) -> Result<String, DpiError> {
    let bytes = read_file_with_limit(path, config.max_file_size)?;

    let kind = match kind_from_suffix(path) {
        Some(kind) => kind,
        None if config.sniff_unknown_suffix => {
            let kind = sniff_kind(&bytes)?;
            log::debug!("🔎 后缀未知，按文件签名识别为 {}", kind.mime_type());
            kind
        }
        None => {
            return Err(DpiError::UnsupportedFormat(format!(
                "无法从后缀识别图片类型：{}",
                path.display()
            )));
        }
    };

    Ok(format!("{}{}", kind.data_url_prefix(), general_purpose::STANDARD.encode(bytes)))
}

fn estimate_base64_decoded_upper_bound_len(base64_data: &str) -> Result<u64, DpiError> {
    let len = base64_data.len() as u64;
    let groups = len
        .checked_add(3)
        .ok_or_else(|| DpiError::ResourceLimit("Base64 输入长度溢出".to_string()))?
        / 4;

    groups
        .checked_mul(3)
        .ok_or_else(|| DpiError::ResourceLimit("Base64 解码体积估算溢出".to_string()))
}

/// 解码 Data URL 的 base64 负载（解码前先估算体积）。
pub fn decode_data_url(data_url: &str, max_file_size: u64) -> Result<Vec<u8>, DpiError> {
    let normalized = data_url.trim();
    let base64_start = normalized
        .find(DATA_URL_BASE64_MARKER)
        .ok_or_else(|| DpiError::MalformedInput("缺少 base64 标记".to_string()))?;
    let base64_data = &normalized[base64_start + DATA_URL_BASE64_MARKER.len()..];

    let estimated_len = estimate_base64_decoded_upper_bound_len(base64_data)?;
    if estimated_len > max_file_size {
        return Err(DpiError::ResourceLimit(format!(
            "Base64 预计解码体积过大：{:.2} MB（限制：{:.2} MB）",
            estimated_len as f64 / 1024.0 / 1024.0,
            max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    Ok(general_purpose::STANDARD.decode(base64_data)?)
}

/// 将 Data URL 解码后写入文件。
pub fn save_image(output: &Path, data_url: &str, config: &DpiConfig) -> Result<(), DpiError> {
    let bytes = decode_data_url(data_url, config.max_file_size)?;

    fs::write(output, &bytes)
        .map_err(|e| DpiError::FileSystem(format!("写入图片文件失败：{}", e)))?;

    log::info!("💾 已写出图片 - 路径: {}（{} 字节）", output.display(), bytes.len());
    Ok(())
}

/// 读取图片文件并改写密度，返回新的 Data URL。
pub fn change_dpi_by_path(path: &Path, dpi: u16, config: &DpiConfig) -> Result<String, DpiError> {
    let data_url = data_url_from_file(path, config)?;
    change_dpi(&data_url, dpi)
}

/// 读取、改写、写出一条龙。
pub fn change_dpi_file(input: &Path, output: &Path, dpi: u16, config: &DpiConfig) -> Result<(), DpiError> {
    let data_url = change_dpi_by_path(input, dpi, config)?;
    save_image(output, &data_url, config)?;

    log::info!("✅ 已将 {} 的密度改写为 {} DPI", input.display(), dpi);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const ONE_PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAAAAAA6fptVAAAACklEQVR4nGNgAAAAAgABSK+kcQAAAABJRU5ErkJggg==";

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let bytes = general_purpose::STANDARD.decode(ONE_PIXEL_PNG).expect("fixture decode failed");
        fs::write(&path, bytes).expect("write fixture failed");
        path
    }

    #[test]
    fn suffix_inference_is_case_insensitive() {
        assert_eq!(kind_from_suffix(Path::new("a.PNG")), Some(ImageKind::Png));
        assert_eq!(kind_from_suffix(Path::new("a.jpeg")), Some(ImageKind::Jpeg));
        assert_eq!(kind_from_suffix(Path::new("a.JPG")), Some(ImageKind::Jpeg));
        assert_eq!(kind_from_suffix(Path::new("a.gif")), None);
        assert_eq!(kind_from_suffix(Path::new("noext")), None);
    }

    #[test]
    fn data_url_from_png_file_has_png_prefix() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = write_png(dir.path(), "pixel.png");

        let data_url = data_url_from_file(&path, &DpiConfig::default()).expect("load failed");

        assert_eq!(data_url, format!("data:image/png;base64,{}", ONE_PIXEL_PNG));
    }

    #[test]
    fn unknown_suffix_is_sniffed_when_enabled() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = write_png(dir.path(), "pixel.bin");

        let data_url = data_url_from_file(&path, &DpiConfig::default()).expect("load failed");

        assert!(data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn unknown_suffix_is_rejected_when_sniffing_disabled() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = write_png(dir.path(), "pixel.bin");
        let config = DpiConfig {
            sniff_unknown_suffix: false,
            ..DpiConfig::default()
        };

        assert!(matches!(
            data_url_from_file(&path, &config),
            Err(DpiError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn sniffing_rejects_non_image_bytes() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello world").expect("write failed");

        assert!(matches!(
            data_url_from_file(&path, &DpiConfig::default()),
            Err(DpiError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_filesystem_error() {
        let dir = tempfile::tempdir().expect("tempdir failed");

        assert!(matches!(
            encode_file(&dir.path().join("missing.png"), &DpiConfig::default()),
            Err(DpiError::FileSystem(_))
        ));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = write_png(dir.path(), "pixel.png");
        let config = DpiConfig {
            max_file_size: 16,
            ..DpiConfig::default()
        };

        assert!(matches!(encode_file(&path, &config), Err(DpiError::ResourceLimit(_))));
    }

    #[test]
    fn decode_data_url_requires_marker() {
        assert!(matches!(
            decode_data_url("data:image/png,AAAA", u64::MAX),
            Err(DpiError::MalformedInput(_))
        ));
    }

    #[test]
    fn decode_data_url_rejects_large_payload_before_decode() {
        let huge = format!("data:image/png;base64,{}", "A".repeat(1024 * 1024));

        assert!(matches!(decode_data_url(&huge, 32), Err(DpiError::ResourceLimit(_))));
    }

    #[test]
    fn change_dpi_by_path_propagates_core_errors() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("broken.jpg");
        fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).expect("write failed");

        assert!(matches!(
            change_dpi_by_path(&path, 300, &DpiConfig::default()),
            Err(DpiError::InvalidHeader(_))
        ));
    }

    #[test]
    fn change_dpi_file_writes_output() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let input = write_png(dir.path(), "pixel.png");
        let output = dir.path().join("pixel_300.png");

        change_dpi_file(&input, &output, 300, &DpiConfig::default()).expect("change failed");

        let original = fs::read(&input).expect("read input failed");
        let written = fs::read(&output).expect("read output failed");
        assert_eq!(written.len(), original.len() + 21);
        assert_eq!(&written[37..41], b"pHYs");
    }
}
