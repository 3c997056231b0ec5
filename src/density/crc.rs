//! # CRC-32 校验模块
//!
//! PNG 数据块使用的 CRC-32（多项式 `0xEDB88320`，初值与终值异或 `0xFFFFFFFF`）。
//!
//! 查找表通过 `once_cell::sync::Lazy` 在首次调用时一次性构建，
//! 并发首次访问时只会有一个线程执行构建，其余线程等待并看到完整的表。

use once_cell::sync::Lazy;

/// PNG 标准 CRC 多项式（反射形式）。
const CRC_POLYNOMIAL: u32 = 0xEDB8_8320;
const CRC_INITIAL: u32 = 0xFFFF_FFFF;

static CRC_TABLE: Lazy<[u32; 256]> = Lazy::new(build_table);

fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    for (n, slot) in table.iter_mut().enumerate() {
        let mut c = n as u32;
        for _ in 0..8 {
            c = if c & 1 != 0 {
                CRC_POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
        }
        *slot = c;
    }
    table
}

/// 计算任意字节序列的 PNG CRC-32。
///
/// # 示例
/// ```rust
/// assert_eq!(changedpi::crc32(b"IEND"), 0xAE42_6082);
/// ```
pub fn crc32(bytes: &[u8]) -> u32 {
    let table = &*CRC_TABLE;
    let acc = bytes.iter().fold(CRC_INITIAL, |acc, &b| {
        table[((acc ^ u32::from(b)) & 0xFF) as usize] ^ (acc >> 8)
    });
    acc ^ CRC_INITIAL
}
