//! Compile-time constants used as parameter defaults.

use crate::types::TypeRef;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Storage width of a signed integral constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntWidth {
    SByte,
    Short,
    #[default]
    Int,
    Long,
    NInt,
}

/// Storage width of an unsigned integral constant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UIntWidth {
    Byte,
    UShort,
    #[default]
    UInt,
    ULong,
    NUInt,
}

/// A constant value with its numeric kind preserved.
///
/// Single, double and fixed-point values are distinct variants so a default
/// never changes kind between source and contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstantValue {
    Null,
    /// The `default` literal of the parameter's type.
    Default,
    Bool {
        value: bool,
    },
    Char {
        value: char,
    },
    String {
        value: String,
    },
    Int {
        value: i64,
        #[serde(default)]
        width: IntWidth,
    },
    #[serde(rename = "uint")]
    UInt {
        value: u64,
        #[serde(default)]
        width: UIntWidth,
    },
    Single {
        value: f32,
    },
    Double {
        value: f64,
    },
    Decimal {
        value: Decimal,
    },
    /// An enum member, stored as its underlying integral value.
    Enum {
        ty: TypeRef,
        value: i64,
    },
}

impl ConstantValue {
    pub fn string(value: impl Into<String>) -> Self {
        ConstantValue::String {
            value: value.into(),
        }
    }

    pub fn bool(value: bool) -> Self {
        ConstantValue::Bool { value }
    }

    pub fn int(value: i64) -> Self {
        ConstantValue::Int {
            value,
            width: IntWidth::Int,
        }
    }

    pub fn single(value: f32) -> Self {
        ConstantValue::Single { value }
    }

    pub fn double(value: f64) -> Self {
        ConstantValue::Double { value }
    }

    pub fn decimal(value: Decimal) -> Self {
        ConstantValue::Decimal { value }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConstantValue::Null)
    }
}

/// How a parameter's default was written in source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum DefaultValue {
    /// A literal written in place.
    Literal { value: ConstantValue },
    /// A reference to a named compile-time constant, already folded to its
    /// value by the host.
    ConstantRef { name: String, value: ConstantValue },
}

impl DefaultValue {
    pub fn literal(value: ConstantValue) -> Self {
        DefaultValue::Literal { value }
    }

    pub fn constant(name: impl Into<String>, value: ConstantValue) -> Self {
        DefaultValue::ConstantRef {
            name: name.into(),
            value,
        }
    }

    /// The folded value, whichever form the default was written in.
    pub fn value(&self) -> &ConstantValue {
        match self {
            DefaultValue::Literal { value } | DefaultValue::ConstantRef { value, .. } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn constant_ref_exposes_folded_value() {
        let default = DefaultValue::constant("StringConstant", ConstantValue::string("Const"));
        assert_eq!(default.value(), &ConstantValue::string("Const"));
    }

    #[test]
    fn numeric_kinds_survive_json() {
        let parsed: Vec<ConstantValue> = serde_json::from_value(serde_json::json!([
            {"kind": "single", "value": 0.1},
            {"kind": "double", "value": 0.2},
            {"kind": "decimal", "value": "0.3"},
            {"kind": "int", "value": 7, "width": "long"},
            {"kind": "uint", "value": 7}
        ]))
        .unwrap();

        assert_eq!(parsed[0], ConstantValue::single(0.1));
        assert_eq!(parsed[1], ConstantValue::double(0.2));
        assert_eq!(
            parsed[2],
            ConstantValue::decimal(Decimal::from_str("0.3").unwrap())
        );
        assert_eq!(
            parsed[3],
            ConstantValue::Int {
                value: 7,
                width: IntWidth::Long
            }
        );
        assert_eq!(
            parsed[4],
            ConstantValue::UInt {
                value: 7,
                width: UIntWidth::UInt
            }
        );
    }
}
