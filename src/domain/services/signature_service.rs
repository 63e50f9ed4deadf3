// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// GitHub 签名头的前缀
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// HMAC-SHA256 摘要的十六进制长度
const DIGEST_HEX_LEN: usize = 64;

/// 为负载生成 GitHub 风格的签名
///
/// # 参数
///
/// * `payload` - 原始请求体
/// * `secret` - 共享密钥
///
/// # 返回值
///
/// 返回 `sha256=<小写十六进制摘要>`
pub fn sign_payload(payload: &[u8], secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(payload);
    format!(
        "{}{}",
        SIGNATURE_PREFIX,
        hex::encode(mac.finalize().into_bytes())
    )
}

/// 校验 GitHub webhook 签名
///
/// 只有与 `sign_payload(payload, secret)` 完全一致的签名才会通过。
/// 摘要比较为常数时间。
///
/// # 参数
///
/// * `payload` - 原始请求体
/// * `signature` - `X-Hub-Signature-256` 头的值
/// * `secret` - 共享密钥
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> bool {
    let digest_hex = match signature.strip_prefix(SIGNATURE_PREFIX) {
        Some(h) => h,
        None => return false,
    };

    // hex::decode accepts uppercase; the expected form is lowercase only
    if digest_hex.len() != DIGEST_HEX_LEN
        || !digest_hex
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    {
        return false;
    }

    let digest = match hex::decode(digest_hex) {
        Ok(d) => d,
        Err(_) => return false,
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(payload);
    mac.verify_slice(&digest).is_ok()
}
