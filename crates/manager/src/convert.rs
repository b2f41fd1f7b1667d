//! Conversion of indexer and decoded values into table [`Value`]s, following the column
//! mapping.

use std::fmt;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{I256, U256};
use hyperquery_table::Value;
use hyperquery_types::DataType;
use serde_json::Value as Json;

use crate::error::ConversionError;

const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// An integer of up to 256 bits stored as sign and magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Integer {
    negative: bool,
    magnitude: U256,
}

impl From<U256> for Integer {
    fn from(magnitude: U256) -> Self {
        Self {
            negative: false,
            magnitude,
        }
    }
}

impl From<I256> for Integer {
    fn from(value: I256) -> Self {
        Self {
            negative: value.is_negative(),
            magnitude: value.unsigned_abs(),
        }
    }
}

impl Integer {
    fn to_f64(self) -> f64 {
        let value = self
            .magnitude
            .as_limbs()
            .iter()
            .rev()
            .fold(0.0, |acc, limb| acc * TWO_POW_64 + *limb as f64);

        if self.negative {
            -value
        } else {
            value
        }
    }

    fn to_u64(self) -> Option<u64> {
        if self.negative && !self.magnitude.is_zero() {
            return None;
        }

        (self.magnitude.bit_len() <= 64).then(|| self.magnitude.as_limbs()[0])
    }

    fn to_i128(self) -> Option<i128> {
        if self.magnitude.bit_len() > 64 {
            return None;
        }

        let magnitude = self.magnitude.as_limbs()[0] as i128;
        Some(if self.negative { -magnitude } else { magnitude })
    }

    fn to_value(self, data_type: DataType) -> Option<Value> {
        match data_type {
            DataType::Float64 => Some(Value::Float64(self.to_f64())),
            DataType::Float32 => Some(Value::Float32(self.to_f64() as f32)),
            DataType::UInt64 => self.to_u64().map(Value::UInt64),
            DataType::UInt32 => self
                .to_u64()
                .and_then(|value| u32::try_from(value).ok())
                .map(Value::UInt32),
            DataType::Int64 => self
                .to_i128()
                .and_then(|value| i64::try_from(value).ok())
                .map(Value::Int64),
            DataType::Int32 => self
                .to_i128()
                .and_then(|value| i32::try_from(value).ok())
                .map(Value::Int32),
            DataType::IntStr => Some(Value::Text(self.to_string())),
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative && !self.magnitude.is_zero() {
            f.write_str("-")?;
        }

        write!(f, "{}", self.magnitude)
    }
}

/// Parses an indexer quantity: `0x`-prefixed hex, a decimal string or a JSON number.
fn parse_integer(raw: &Json) -> Option<Integer> {
    match raw {
        Json::String(text) => match text.strip_prefix("0x") {
            Some("") => Some(U256::ZERO.into()),
            Some(digits) => U256::from_str_radix(digits, 16).ok().map(Into::into),
            None => U256::from_str_radix(text, 10).ok().map(Into::into),
        },
        Json::Number(number) => {
            if let Some(value) = number.as_u64() {
                Some(U256::from(value).into())
            } else {
                number.as_i64().map(|value| Integer {
                    negative: true,
                    magnitude: U256::from(value.unsigned_abs()),
                })
            }
        }
        _ => None,
    }
}

/// Value of an unmapped indexer column, kept in the indexer's representation.
fn raw_to_value(raw: &Json) -> Value {
    match raw {
        Json::Null => Value::Null,
        Json::Bool(value) => Value::Bool(*value),
        Json::Number(number) => {
            if let Some(value) = number.as_u64() {
                Value::UInt64(value)
            } else if let Some(value) = number.as_i64() {
                Value::Int64(value)
            } else {
                number.as_f64().map(Value::Float64).unwrap_or_default()
            }
        }
        Json::String(text) => Value::Text(text.clone()),
        other => Value::Text(other.to_string()),
    }
}

/// Converts a value returned by the indexer. Unmapped values keep their representation,
/// so quantities stay `0x`-prefixed hex.
pub fn convert_raw(
    column: &str,
    raw: &Json,
    data_type: Option<DataType>,
) -> Result<Value, ConversionError> {
    let Some(data_type) = data_type else {
        return Ok(raw_to_value(raw));
    };

    if raw.is_null() {
        return Ok(Value::Null);
    }

    if let (Json::Number(number), DataType::Float64 | DataType::Float32) = (raw, data_type) {
        if number.is_f64() {
            let value = number.as_f64().unwrap_or_default();
            return Ok(match data_type {
                DataType::Float32 => Value::Float32(value as f32),
                _ => Value::Float64(value),
            });
        }
    }

    parse_integer(raw)
        .and_then(|integer| integer.to_value(data_type))
        .ok_or_else(|| ConversionError {
            column: column.to_string(),
            value: raw.to_string(),
            data_type,
        })
}

/// Converts a decoded event parameter. Unmapped integers become decimal strings, other
/// values are rendered as text.
pub fn convert_decoded(
    column: &str,
    value: &DynSolValue,
    data_type: Option<DataType>,
) -> Result<Value, ConversionError> {
    let integer = match value {
        DynSolValue::Uint(value, _) => Integer::from(*value),
        DynSolValue::Int(value, _) => Integer::from(*value),
        DynSolValue::Bool(value) => return Ok(Value::Bool(*value)),
        other => {
            return match data_type {
                None | Some(DataType::IntStr) => Ok(Value::Text(render(other))),
                Some(data_type) => Err(ConversionError {
                    column: column.to_string(),
                    value: render(other),
                    data_type,
                }),
            };
        }
    };

    let Some(data_type) = data_type else {
        return Ok(Value::Text(integer.to_string()));
    };

    integer
        .to_value(data_type)
        .ok_or_else(|| ConversionError {
            column: column.to_string(),
            value: integer.to_string(),
            data_type,
        })
}

/// Text form of a decoded value: hex for addresses and bytes, decimal for integers.
fn render(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(address) => format!("0x{}", hex::encode(address.as_slice())),
        DynSolValue::Function(function) => format!("0x{}", hex::encode(function.as_slice())),
        DynSolValue::FixedBytes(word, size) => {
            format!("0x{}", hex::encode(&word.as_slice()[..*size]))
        }
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(text) => text.clone(),
        DynSolValue::Bool(value) => value.to_string(),
        DynSolValue::Uint(value, _) => value.to_string(),
        DynSolValue::Int(value, _) => value.to_string(),
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            format!("[{}]", render_all(values))
        }
        other => match other.as_fixed_seq() {
            Some(values) => format!("({})", render_all(values)),
            None => format!("{:?}", other),
        },
    }
}

fn render_all(values: &[DynSolValue]) -> String {
    values.iter().map(render).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256};
    use serde_json::json;

    #[test]
    fn test_unmapped_raw_values_are_kept() {
        assert_eq!(
            convert_raw("value", &json!("0x1a"), None).unwrap(),
            Value::from("0x1a")
        );
        assert_eq!(convert_raw("status", &json!(1), None).unwrap(), Value::UInt64(1));
        assert_eq!(convert_raw("to", &Json::Null, None).unwrap(), Value::Null);
        assert_eq!(
            convert_raw("blob_versioned_hashes", &json!(["0x01"]), None).unwrap(),
            Value::from(r#"["0x01"]"#)
        );
    }

    #[test]
    fn test_mapped_raw_quantities() {
        assert_eq!(
            convert_raw("nonce", &json!("0x1a"), Some(DataType::UInt64)).unwrap(),
            Value::UInt64(26)
        );
        assert_eq!(
            convert_raw("value", &json!("0xde0b6b3a7640000"), Some(DataType::Float64)).unwrap(),
            Value::Float64(1e18)
        );
        assert_eq!(
            convert_raw("gas", &json!("0x"), Some(DataType::UInt32)).unwrap(),
            Value::UInt32(0)
        );
        assert_eq!(
            convert_raw("timestamp", &json!(1_700_000_000u64), Some(DataType::UInt64)).unwrap(),
            Value::UInt64(1_700_000_000)
        );
        assert_eq!(
            convert_raw("gas", &Json::Null, Some(DataType::UInt64)).unwrap(),
            Value::Null
        );
        assert_eq!(
            convert_raw("value", &json!("0xff"), Some(DataType::IntStr)).unwrap(),
            Value::from("255")
        );
    }

    #[test]
    fn test_mapped_raw_overflow_fails() {
        let err = convert_raw("gas", &json!("0x1ffffffff"), Some(DataType::UInt32)).unwrap_err();

        assert_eq!(err.column, "gas");
        assert_eq!(err.data_type, DataType::UInt32);
        assert!(convert_raw("gas", &json!("not hex"), Some(DataType::UInt64)).is_err());
    }

    #[test]
    fn test_decoded_integers() {
        let amount = DynSolValue::Int(I256::from_dec_str("-5").unwrap(), 256);

        assert_eq!(
            convert_decoded("amount0", &amount, Some(DataType::Int32)).unwrap(),
            Value::Int32(-5)
        );
        assert_eq!(
            convert_decoded("amount0", &amount, Some(DataType::Float64)).unwrap(),
            Value::Float64(-5.0)
        );
        assert_eq!(
            convert_decoded("amount0", &amount, None).unwrap(),
            Value::from("-5")
        );
        assert!(convert_decoded("amount0", &amount, Some(DataType::UInt64)).is_err());

        let big = DynSolValue::Uint(U256::MAX, 256);
        assert_eq!(
            convert_decoded("liquidity", &big, None).unwrap(),
            Value::Text(U256::MAX.to_string())
        );
        assert!(convert_decoded("liquidity", &big, Some(DataType::UInt64)).is_err());
        assert!(matches!(
            convert_decoded("liquidity", &big, Some(DataType::Float64)).unwrap(),
            Value::Float64(value) if value > 1e77
        ));
    }

    #[test]
    fn test_decoded_non_integers_render_as_text() {
        let address = DynSolValue::Address(Address::repeat_byte(0xab));
        assert_eq!(
            convert_decoded("sender", &address, None).unwrap(),
            Value::Text(format!("0x{}", "ab".repeat(20)))
        );

        let word = DynSolValue::FixedBytes(B256::repeat_byte(0x01), 4);
        assert_eq!(
            convert_decoded("id", &word, None).unwrap(),
            Value::from("0x01010101")
        );

        let array = DynSolValue::Array(vec![
            DynSolValue::Uint(U256::from(1u64), 256),
            DynSolValue::Uint(U256::from(2u64), 256),
        ]);
        assert_eq!(
            convert_decoded("ids", &array, None).unwrap(),
            Value::from("[1,2]")
        );

        assert!(convert_decoded("sender", &address, Some(DataType::Float64)).is_err());
    }
}
