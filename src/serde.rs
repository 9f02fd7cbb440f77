//! Serde helpers putting big integers on the wire as decimal strings.
//!
//! `num_bigint` types do not serialize in a wire-stable, human-readable way on their own,
//! so the proof types use the proxy modules below with the `#[serde(with = "...")]`
//! syntax. Absent optional fields deserialize to `None` and are rejected later by the
//! proof-structure checks, not at decode time.

use num_bigint::BigInt;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

struct AsDecimal<'a>(&'a BigInt);

impl Serialize for AsDecimal<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_str_radix(10))
    }
}

struct FromDecimal(BigInt);

impl<'de> Deserialize<'de> for FromDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = String::deserialize(deserializer)?;
        repr.parse().map(FromDecimal).map_err(D::Error::custom)
    }
}

pub(crate) mod opt_big_int {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(
        value: &Option<BigInt>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&AsDecimal(value)),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigInt>, D::Error> {
        let wrapped = Option::<FromDecimal>::deserialize(deserializer)?;
        Ok(wrapped.map(|decimal| decimal.0))
    }
}

pub(crate) mod big_int_vec {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(
        value: &[BigInt],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(value.iter().map(AsDecimal))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<BigInt>, D::Error> {
        let wrapped = Vec::<FromDecimal>::deserialize(deserializer)?;
        Ok(wrapped.into_iter().map(|decimal| decimal.0).collect())
    }
}

#[cfg(test)]
mod test {
    use num_bigint::BigInt;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Wire {
        #[serde(with = "crate::serde::big_int_vec")]
        xs: Vec<BigInt>,
        #[serde(with = "crate::serde::opt_big_int", default)]
        y: Option<BigInt>,
    }

    #[test]
    fn decimal_strings_round_trip() {
        let wire = Wire {
            xs: vec![BigInt::from(0), BigInt::from(-17), BigInt::from(12345678901234567890i128)],
            y: Some(BigInt::from(42)),
        };
        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains("\"12345678901234567890\""));
        assert!(json.contains("\"-17\""));
        assert_eq!(serde_json::from_str::<Wire>(&json).unwrap(), wire);
    }

    #[test]
    fn absent_optional_fields_decode_to_none() {
        let wire: Wire = serde_json::from_str(r#"{"xs": ["5"]}"#).unwrap();
        assert_eq!(wire.y, None);

        let wire: Wire = serde_json::from_str(r#"{"xs": [], "y": null}"#).unwrap();
        assert_eq!(wire.y, None);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(serde_json::from_str::<Wire>(r#"{"xs": ["5x"]}"#).is_err());
        assert!(serde_json::from_str::<Wire>(r#"{"xs": [5]}"#).is_err());
    }
}
