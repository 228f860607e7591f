//! User models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account, identified by wallet address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub wallet_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Check that a wallet address is `0x` followed by 40 hex digits
pub fn is_valid_wallet_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_checksummed_and_lowercase_addresses() {
        assert!(is_valid_wallet_address(
            "0x52908400098527886E0F7030069857D2E4169EE7"
        ));
        assert!(is_valid_wallet_address(
            "0x52908400098527886e0f7030069857d2e4169ee7"
        ));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_wallet_address(""));
        assert!(!is_valid_wallet_address("52908400098527886e0f7030069857d2e4169ee7"));
        assert!(!is_valid_wallet_address("0x1234"));
        assert!(!is_valid_wallet_address(
            "0xZZ908400098527886e0f7030069857d2e4169ee7"
        ));
    }
}
