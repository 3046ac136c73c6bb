//! Webhook 签名校验（HMAC-SHA256，十六进制编码）

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    // HMAC 接受任意长度的密钥
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(payload);
    HEXLOWER.encode(&mac.finalize().into_bytes())
}

/// 常量时间比较签名
pub fn verify_signature(secret: &str, payload: &[u8], signature_hex: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Ok(expected) = HEXLOWER_PERMISSIVE.decode(signature_hex.trim().as_bytes()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_then_verify() {
        let body = br#"{"payment_id":1,"status":"completed"}"#;
        let sig = sign_payload("whsec", body);
        assert_eq!(sig.len(), 64);
        assert!(verify_signature("whsec", body, &sig));
        assert!(verify_signature("whsec", body, &sig.to_uppercase()));
    }

    #[test]
    fn test_rejects_tampering() {
        let sig = sign_payload("whsec", b"original");
        assert!(!verify_signature("whsec", b"tampered", &sig));
        assert!(!verify_signature("other", b"original", &sig));
        assert!(!verify_signature("whsec", b"original", "zz-not-hex"));
        assert!(!verify_signature("", b"original", &sig));
    }
}
