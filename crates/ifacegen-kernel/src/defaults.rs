//! Default values as source literals.
//!
//! The numeric kind of a constant decides its suffix: `f` for single, `d`
//! for double, `m` for fixed-point, `L`/`U`/`UL` for wide or unsigned
//! integers. A default written as a named constant renders as its folded
//! value.

use crate::resolve::NameResolver;
use ifacegen_model::{ConstantValue, DefaultValue, IntWidth, UIntWidth};
use rust_decimal::Decimal;

pub fn render_default(default: &DefaultValue, resolver: &NameResolver<'_>) -> String {
    render_constant(default.value(), resolver)
}

/// Why `value` has no literal form, if it has none. A `char` literal holds a
/// single UTF-16 code unit.
pub fn literal_problem(value: &ConstantValue) -> Option<String> {
    match value {
        ConstantValue::Char { value } if u32::from(*value) > 0xFFFF => Some(format!(
            "char U+{:X} does not fit one UTF-16 code unit",
            u32::from(*value)
        )),
        _ => None,
    }
}

pub fn render_constant(value: &ConstantValue, resolver: &NameResolver<'_>) -> String {
    match value {
        ConstantValue::Null => "null".to_string(),
        ConstantValue::Default => "default".to_string(),
        ConstantValue::Bool { value } => value.to_string(),
        ConstantValue::Char { value } => render_char(*value),
        ConstantValue::String { value } => render_string(value),
        ConstantValue::Int { value, width } => match width {
            IntWidth::Long => format!("{value}L"),
            IntWidth::SByte | IntWidth::Short | IntWidth::Int | IntWidth::NInt => value.to_string(),
        },
        ConstantValue::UInt { value, width } => match width {
            UIntWidth::UInt => format!("{value}U"),
            UIntWidth::ULong => format!("{value}UL"),
            UIntWidth::Byte | UIntWidth::UShort | UIntWidth::NUInt => value.to_string(),
        },
        ConstantValue::Single { value } => render_single(*value),
        ConstantValue::Double { value } => render_double(*value),
        ConstantValue::Decimal { value } => render_decimal(value),
        ConstantValue::Enum { ty, value } if *value < 0 => {
            format!("({})({value})", resolver.resolve(ty))
        }
        ConstantValue::Enum { ty, value } => format!("({}){value}", resolver.resolve(ty)),
    }
}

fn render_single(value: f32) -> String {
    if value.is_nan() {
        "float.NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "float.PositiveInfinity".to_string()
        } else {
            "float.NegativeInfinity".to_string()
        }
    } else {
        // Debug gives the shortest text that round-trips, with exponent
        // notation for very large or small magnitudes.
        format!("{value:?}f")
    }
}

fn render_double(value: f64) -> String {
    if value.is_nan() {
        "double.NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "double.PositiveInfinity".to_string()
        } else {
            "double.NegativeInfinity".to_string()
        }
    } else {
        format!("{value:?}d")
    }
}

/// Fixed-point values keep their exact digits and declared scale.
fn render_decimal(value: &Decimal) -> String {
    format!("{value}m")
}

fn render_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            _ => push_escaped(&mut out, ch),
        }
    }
    out.push('"');
    out
}

fn render_char(value: char) -> String {
    let mut out = String::from("'");
    match value {
        '\'' => out.push_str("\\'"),
        _ => push_escaped(&mut out, value),
    }
    out.push('\'');
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\0' => out.push_str("\\0"),
        '\u{7}' => out.push_str("\\a"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{b}' => out.push_str("\\v"),
        '\u{85}' | '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04X}", ch as u32)),
        c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
        c => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::resolve::VisibleTypes;
    use ifacegen_model::TypeRef;
    use std::str::FromStr;

    fn render(value: ConstantValue) -> String {
        let config = GeneratorConfig::default();
        let visible = VisibleTypes::new();
        let resolver = NameResolver::new(&config, &visible, "App");
        render_constant(&value, &resolver)
    }

    #[test]
    fn strings_render_as_escaped_literals() {
        assert_eq!(render(ConstantValue::string("cGFyYW0=")), "\"cGFyYW0=\"");
        assert_eq!(
            render(ConstantValue::string("a\"b\\c\n\u{1}")),
            "\"a\\\"b\\\\c\\n\\u0001\""
        );
    }

    #[test]
    fn named_constants_render_their_value() {
        let config = GeneratorConfig::default();
        let visible = VisibleTypes::new();
        let resolver = NameResolver::new(&config, &visible, "App");
        let default = DefaultValue::constant("StringConstant", ConstantValue::string("Const"));
        assert_eq!(render_default(&default, &resolver), "\"Const\"");
    }

    #[test]
    fn floating_kinds_stay_distinct() {
        assert_eq!(render(ConstantValue::single(0.1)), "0.1f");
        assert_eq!(render(ConstantValue::double(0.2)), "0.2d");
        assert_eq!(render(ConstantValue::single(1.0)), "1.0f");
        assert_eq!(render(ConstantValue::double(1e-7)), "1e-7d");
        assert_eq!(render(ConstantValue::double(f64::NAN)), "double.NaN");
        assert_eq!(
            render(ConstantValue::single(f32::NEG_INFINITY)),
            "float.NegativeInfinity"
        );
    }

    #[test]
    fn fixed_point_keeps_scale_and_suffix() {
        let value = Decimal::from_str("0.3").unwrap();
        assert_eq!(render(ConstantValue::decimal(value)), "0.3m");
        let value = Decimal::from_str("1.50").unwrap();
        assert_eq!(render(ConstantValue::decimal(value)), "1.50m");
    }

    #[test]
    fn bools_nulls_and_defaults() {
        assert_eq!(render(ConstantValue::bool(true)), "true");
        assert_eq!(render(ConstantValue::bool(false)), "false");
        assert_eq!(render(ConstantValue::Null), "null");
        assert_eq!(render(ConstantValue::Default), "default");
    }

    #[test]
    fn integer_widths_pick_suffixes() {
        assert_eq!(render(ConstantValue::int(-5)), "-5");
        assert_eq!(
            render(ConstantValue::Int {
                value: 5,
                width: IntWidth::Long
            }),
            "5L"
        );
        assert_eq!(
            render(ConstantValue::UInt {
                value: 5,
                width: UIntWidth::ULong
            }),
            "5UL"
        );
        assert_eq!(
            render(ConstantValue::UInt {
                value: 255,
                width: UIntWidth::Byte
            }),
            "255"
        );
    }

    #[test]
    fn chars_outside_the_basic_plane_have_no_literal() {
        let last_basic = ConstantValue::Char { value: '\u{FFFF}' };
        let emoji = ConstantValue::Char { value: '\u{1F600}' };
        assert_eq!(literal_problem(&last_basic), None);
        assert_eq!(
            literal_problem(&emoji).as_deref(),
            Some("char U+1F600 does not fit one UTF-16 code unit")
        );
        assert_eq!(literal_problem(&ConstantValue::string("\u{1F600}")), None);
    }

    #[test]
    fn chars_and_enums() {
        assert_eq!(render(ConstantValue::Char { value: '\'' }), "'\\''");
        assert_eq!(render(ConstantValue::Char { value: 'x' }), "'x'");
        assert_eq!(
            render(ConstantValue::Enum {
                ty: TypeRef::named("App.Model", "Mode"),
                value: 2
            }),
            "(global::App.Model.Mode)2"
        );
        assert_eq!(
            render(ConstantValue::Enum {
                ty: TypeRef::named("App.Model", "Mode"),
                value: -1
            }),
            "(global::App.Model.Mode)(-1)"
        );
    }
}
