//! # pHYs 定位模块
//!
//! ## 设计思路
//!
//! 定位分两级：
//! 1. 在 **base64 文本** 上查找 pHYs 帧头的编码，决定要解码多长的头部；
//! 2. 在 **已解码字节** 上反向查找 `09 'p' 'H' 'Y' 's'`，确定精确覆写位置。
//!
//! ## 实现思路
//!
//! base64 以 3 字节为一组编码为 4 个字符，同一段字节落在不同相位（偏移 mod 3）
//! 时会产生不同的文本。pHYs 帧头 `00 00 00 09 p H Y s` 截取 6 字节窗口后
//! 恰好对齐到一个量子边界的情形共有三种，对应下表三个签名。

use super::layout::{B64_QUANTUM_CHARS, PHYS_FRAME_PREFIX};

/// 一个对齐签名：`text` 是 `PHYS_FRAME_PREFIX[frame_offset..frame_offset + 6]` 的 base64 编码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysSignature {
    pub text: &'static str,
    pub frame_offset: usize,
}

/// 三种相位的签名，按固定优先级扫描。
pub const PHYS_SIGNATURES: [PhysSignature; 3] = [
    PhysSignature { text: "AAlwSFlz", frame_offset: 2 },
    PhysSignature { text: "AAAJcEhZ", frame_offset: 1 },
    PhysSignature { text: "AAAACXBI", frame_offset: 0 },
];

/// 字节级匹配模式：长度字段最后一个字节 + 类型标签。
const PHYS_BYTE_PATTERN: [u8; 5] = [
    PHYS_FRAME_PREFIX[3],
    PHYS_FRAME_PREFIX[4],
    PHYS_FRAME_PREFIX[5],
    PHYS_FRAME_PREFIX[6],
    PHYS_FRAME_PREFIX[7],
];

/// 在 base64 文本中查找已有的 pHYs 块，返回签名起始的字符下标。
///
/// 只接受落在量子边界（下标是 4 的倍数）上的命中，其余位置的同名文本
/// 并不解码为 pHYs 帧头。
pub fn find_phys_chunk(body: &str) -> Option<usize> {
    PHYS_SIGNATURES.iter().find_map(|signature| {
        let index = body
            .match_indices(signature.text)
            .map(|(index, _)| index)
            .find(|index| index % B64_QUANTUM_CHARS == 0)?;

        log::debug!(
            "🔍 base64 文本中命中 pHYs 签名 {}（帧偏移 {}）于字符 {}",
            signature.text,
            signature.frame_offset,
            index
        );
        Some(index)
    })
}

/// 在已解码字节中从尾部向前查找 pHYs，返回类型标签 `'p'` 的字节偏移。
///
/// 取最后一次出现：窗口末尾之前若有巧合相同的 5 字节序列，会优先匹配更靠后的那个。
pub fn find_phys_start(decoded: &[u8]) -> Option<usize> {
    decoded
        .windows(PHYS_BYTE_PATTERN.len())
        .rposition(|window| window == PHYS_BYTE_PATTERN.as_slice())
        .map(|index| index + 1)
}
