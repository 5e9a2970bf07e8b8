use serde::Deserialize;

use primitive_types::H256;

/// Settings for an optimistic verification gate.
///
/// Deserialized from the host's settings blob. Identities are 32-byte hex
/// strings; the fraud window is in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimisticIsmConfig {
    /// Identity permitted to manage watchers and rotate submodules.
    pub owner: H256,
    /// Seconds a proposal must wait before final verification.
    pub fraud_window: u64,
    /// Initial watcher identities.
    #[serde(default)]
    pub watchers: Vec<H256>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserializes_from_json() {
        let config: OptimisticIsmConfig = serde_json::from_str(
            r#"{
                "owner": "0x0000000000000000000000000000000000000000000000000000000000000001",
                "fraudWindow": 3600,
                "watchers": [
                    "0x0000000000000000000000000000000000000000000000000000000000000002"
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.owner, H256::from_low_u64_be(1));
        assert_eq!(config.fraud_window, 3600);
        assert_eq!(config.watchers, vec![H256::from_low_u64_be(2)]);
    }

    #[test]
    fn watchers_default_to_empty() {
        let config: OptimisticIsmConfig = serde_json::from_str(
            r#"{
                "owner": "0x0000000000000000000000000000000000000000000000000000000000000001",
                "fraudWindow": 60
            }"#,
        )
        .unwrap();
        assert!(config.watchers.is_empty());
    }
}
