//! Serde helpers for arkworks types on host-facing records.
//!
//! Canonical compressed bytes, rendered as 0x-prefixed hex strings so the
//! records survive JSON transport unchanged.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde::{Deserialize, Deserializer, Serializer};

fn canonical_serialize_hex<T: CanonicalSerialize>(value: &T) -> Result<String, String> {
    let mut bytes = Vec::new();
    value
        .serialize_compressed(&mut bytes)
        .map_err(|e| e.to_string())?;
    Ok(format!("0x{}", hex::encode(bytes)))
}

fn canonical_deserialize_hex<T: CanonicalDeserialize>(encoded: &str) -> Result<T, String> {
    let stripped = encoded.strip_prefix("0x").unwrap_or(encoded);
    let bytes = hex::decode(stripped).map_err(|e| e.to_string())?;
    T::deserialize_compressed(&mut bytes.as_slice()).map_err(|e| e.to_string())
}

/// Serde helpers for single field elements as hex strings.
pub mod field {
    use super::*;

    pub fn serialize<F, S>(value: &F, serializer: S) -> Result<S::Ok, S::Error>
    where
        F: CanonicalSerialize,
        S: Serializer,
    {
        let hex = canonical_serialize_hex(value).map_err(SerError::custom)?;
        serializer.serialize_str(&hex)
    }

    pub fn deserialize<'de, F, D>(deserializer: D) -> Result<F, D::Error>
    where
        F: CanonicalDeserialize,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        canonical_deserialize_hex(&s).map_err(DeError::custom)
    }
}

/// Serde helpers for sequences of field elements.
pub mod field_vec {
    use super::*;

    pub fn serialize<F, S>(values: &[F], serializer: S) -> Result<S::Ok, S::Error>
    where
        F: CanonicalSerialize,
        S: Serializer,
    {
        let encoded: Result<Vec<String>, _> = values.iter().map(canonical_serialize_hex).collect();
        let encoded = encoded.map_err(SerError::custom)?;
        serializer.collect_seq(encoded)
    }

    pub fn deserialize<'de, F, D>(deserializer: D) -> Result<Vec<F>, D::Error>
    where
        F: CanonicalDeserialize,
        D: Deserializer<'de>,
    {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded
            .iter()
            .map(|s| canonical_deserialize_hex(s).map_err(DeError::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Field;
    use serde::Serialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Wrapper {
        #[serde(with = "field")]
        value: Field,
        #[serde(with = "field_vec")]
        path: Vec<Field>,
    }

    #[test]
    fn hex_round_trip() {
        let original = Wrapper {
            value: Field::from(123456789u64),
            path: vec![Field::from(1u64), Field::from(2u64)],
        };
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("0x"));
        let decoded: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }
}
