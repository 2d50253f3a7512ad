use crate::{
    protocol::wire::{BoundValue, ColumnDescriptor, ColumnTag, Parameter, TargetKind, WireValue},
    Error,
};

/// Matches a single-bit field, a `tinyint(1)` column, or a varchar column
/// offering itself for string-to-boolean coercion.
pub(crate) fn can_decode(column: &ColumnDescriptor, target: TargetKind) -> bool {
    if target != TargetKind::Bool {
        return false;
    }

    let ty = column.r#type();

    ((ty == ColumnTag::Bit || ty == ColumnTag::Tiny) && column.precision() == Some(1))
        || ty.is_var_char()
}

pub(crate) fn decode(value: &WireValue, column: &ColumnDescriptor) -> crate::Result<bool> {
    let bytes = value.as_bytes()?;

    if column.r#type().is_var_char() {
        return decode_text(bytes, column);
    }

    let byte = bytes.first().copied().ok_or_else(|| {
        Error::Protocol("empty payload for a fixed-width boolean column".into())
    })?;

    if value.is_binary() || column.r#type() == ColumnTag::Bit {
        // the stored boolean byte, in both protocols for BIT
        Ok(byte != 0)
    } else {
        // text protocol renders a tinyint as its ASCII digit
        Ok(byte != b'0')
    }
}

pub(crate) fn can_encode(value: &BoundValue) -> bool {
    matches!(value, BoundValue::Bool(_))
}

pub(crate) fn encode(value: BoundValue) -> crate::Result<Parameter> {
    match value {
        BoundValue::Bool(true) => Ok(Parameter::Bool(BoolParameter::TRUE)),
        BoundValue::Bool(false) => Ok(Parameter::Bool(BoolParameter::FALSE)),
        other => Err(Error::UnsupportedConversion(
            format!(
                "cannot encode a {} value as a boolean parameter",
                other.shape_name()
            )
            .into(),
        )),
    }
}

fn decode_text(bytes: &[u8], column: &ColumnDescriptor) -> crate::Result<bool> {
    if bytes.is_empty() {
        return Ok(from_long(0));
    }

    let encoding = column.collation().encoding()?;
    let (text, _, had_errors) = encoding.decode(bytes);

    if had_errors {
        return Err(Error::Encoding(
            "varchar payload is not valid for its collation".into(),
        ));
    }

    classify(&text, column)
}

/// Classifies a textual value in fixed priority order: truthy tokens, falsy
/// tokens, the floating-point grammar, then the integer grammar.
fn classify(text: &str, column: &ColumnDescriptor) -> crate::Result<bool> {
    if ["Y", "yes", "T", "true"]
        .iter()
        .any(|token| text.eq_ignore_ascii_case(token))
    {
        return Ok(from_long(1));
    }

    if ["N", "no", "F", "false"]
        .iter()
        .any(|token| text.eq_ignore_ascii_case(token))
    {
        return Ok(from_long(0));
    }

    if matches_float(text) {
        let parsed = text
            .parse::<f64>()
            .map_err(|_| coercion_error(text, column))?;

        return Ok(from_double(parsed));
    }

    if matches_int(text) {
        return Ok(match text.parse::<i64>() {
            Ok(parsed) => from_long(parsed),
            // the numeral is well-formed but beyond the 64-bit range
            Err(_) => from_big_integer(text),
        });
    }

    Err(coercion_error(text, column))
}

fn coercion_error(text: &str, column: &ColumnDescriptor) -> Error {
    Error::DataCoercion {
        sqlstate: "22018",
        message: format!(
            "the value '{}' of type '{}' cannot be decoded as a boolean",
            text,
            column.r#type().name()
        ),
    }
}

/// True under the 64-bit integer rule: -1 and anything positive.
fn from_long(value: i64) -> bool {
    value == -1 || value > 0
}

fn from_double(value: f64) -> bool {
    value == -1.0 || value > 0.0
}

/// Truthiness for a numeral whose magnitude exceeds the 64-bit range; such a
/// value can be neither 0 nor -1, so only the sign decides.
fn from_big_integer(digits: &str) -> bool {
    !digits.starts_with('-')
}

/// `-?\d*\.\d*`, `-?\d*\.\d+[eE]-?\d+` or `-?\d*[eE]-?\d+`.
fn matches_float(text: &str) -> bool {
    let bytes = text.strip_prefix('-').unwrap_or(text).as_bytes();
    let integral = bytes.iter().take_while(|b| b.is_ascii_digit()).count();

    match bytes.get(integral) {
        Some(b'.') => {
            let fraction = bytes[integral + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            let rest = &bytes[integral + 1 + fraction..];

            // a bare decimal point form, or an exponent after at least one
            // fraction digit
            rest.is_empty() || (fraction > 0 && matches_exponent(rest))
        }
        Some(_) => matches_exponent(&bytes[integral..]),
        None => false,
    }
}

/// `[eE]-?\d+`.
fn matches_exponent(bytes: &[u8]) -> bool {
    let digits = match bytes {
        [b'e' | b'E', b'-', digits @ ..] => digits,
        [b'e' | b'E', digits @ ..] => digits,
        _ => return false,
    };

    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

/// `-?\d+`.
fn matches_int(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text).as_bytes();

    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

/// A boolean statement parameter.
///
/// The two possible values are shared constants; parameters compare and hash
/// by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolParameter {
    value: bool,
}

impl BoolParameter {
    pub const TRUE: BoolParameter = BoolParameter { value: true };
    pub const FALSE: BoolParameter = BoolParameter { value: false };

    pub fn value(&self) -> bool {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Collation;
    use bytes::Bytes;

    fn varchar() -> ColumnDescriptor {
        ColumnDescriptor::new(ColumnTag::VarString, None, Collation::UTF8MB4_GENERAL_CI)
    }

    fn decode_str(text: &str) -> crate::Result<bool> {
        let value = WireValue::plain(Bytes::copy_from_slice(text.as_bytes()), false);
        decode(&value, &varchar())
    }

    #[test]
    fn decode_truthy_tokens() {
        for text in ["Y", "y", "yes", "YES", "T", "t", "true", "TRUE", "tRuE"] {
            assert_eq!(Ok(true), decode_str(text), "token {}", text);
        }
    }

    #[test]
    fn decode_falsy_tokens() {
        for text in ["N", "n", "no", "NO", "F", "f", "false", "FALSE", "fAlSe"] {
            assert_eq!(Ok(false), decode_str(text), "token {}", text);
        }
    }

    #[test]
    fn decode_numeric_strings() {
        let cases = [
            ("1", true),
            ("0", false),
            ("26.57", true),
            ("-57", false),
            ("-1", true),
            ("-0", false),
            ("100000", true),
            (".5", true),
            ("-0.0", false),
            ("1e4", true),
            ("-1.34e10", false),
            ("12345678901234567890", true),
            ("-12345678901234567890", false),
        ];

        for (text, expected) in cases {
            assert_eq!(Ok(expected), decode_str(text), "literal {}", text);
        }
    }

    #[test]
    fn decode_empty_string_is_false() {
        assert_eq!(Ok(false), decode_str(""));
    }

    #[test]
    fn decode_garbage_fails_with_sqlstate() {
        for text in ["Banana", "12a", "--1", "1.2.3", "e", "yes!"] {
            let err = decode_str(text).unwrap_err();
            assert_eq!(Some("22018"), err.sqlstate(), "literal {}", text);

            if text == "Banana" {
                let rendered = format!("{}", err);
                assert!(rendered.contains("Banana") && rendered.contains("varchar"));
            }
        }
    }

    #[test]
    fn decode_binary_bit_and_tinyint() {
        for tag in [ColumnTag::Bit, ColumnTag::Tiny] {
            let column = ColumnDescriptor::new(tag, Some(1), Collation::BINARY);

            let one = WireValue::plain(Bytes::from_static(&[1]), true);
            assert_eq!(Ok(true), decode(&one, &column));

            let zero = WireValue::plain(Bytes::from_static(&[0]), true);
            assert_eq!(Ok(false), decode(&zero, &column));
        }
    }

    #[test]
    fn decode_text_bit_reads_the_stored_byte() {
        // BIT keeps its binary encoding even through the text protocol
        let column = ColumnDescriptor::new(ColumnTag::Bit, Some(1), Collation::BINARY);

        let one = WireValue::plain(Bytes::from_static(&[1]), false);
        assert_eq!(Ok(true), decode(&one, &column));
    }

    #[test]
    fn decode_text_tinyint_compares_against_ascii_zero() {
        let column = ColumnDescriptor::new(ColumnTag::Tiny, Some(1), Collation::BINARY);

        let one = WireValue::plain(Bytes::from_static(b"1"), false);
        assert_eq!(Ok(true), decode(&one, &column));

        let zero = WireValue::plain(Bytes::from_static(b"0"), false);
        assert_eq!(Ok(false), decode(&zero, &column));

        let five = WireValue::plain(Bytes::from_static(b"5"), false);
        assert_eq!(Ok(true), decode(&five, &column));
    }

    #[test]
    fn decode_latin1_varchar() {
        let column =
            ColumnDescriptor::new(ColumnTag::VarString, None, Collation::LATIN1_SWEDISH_CI);
        let value = WireValue::plain(Bytes::from_static(b"true"), false);

        assert_eq!(Ok(true), decode(&value, &column));
    }

    #[test]
    fn can_decode_matches_bit_tiny1_and_varchar() {
        assert!(can_decode(
            &ColumnDescriptor::new(ColumnTag::Bit, Some(1), Collation::BINARY),
            TargetKind::Bool,
        ));
        assert!(can_decode(
            &ColumnDescriptor::new(ColumnTag::Tiny, Some(1), Collation::BINARY),
            TargetKind::Bool,
        ));
        assert!(can_decode(&varchar(), TargetKind::Bool));
    }

    #[test]
    fn can_decode_rejects_wide_tinyint_and_other_targets() {
        assert!(!can_decode(
            &ColumnDescriptor::new(ColumnTag::Tiny, Some(4), Collation::BINARY),
            TargetKind::Bool,
        ));
        assert!(!can_decode(
            &ColumnDescriptor::new(ColumnTag::Tiny, None, Collation::BINARY),
            TargetKind::Bool,
        ));
        assert!(!can_decode(&varchar(), TargetKind::Clob));
    }

    #[test]
    fn encode_reuses_the_shared_constants() {
        let truthy = encode(BoundValue::Bool(true)).unwrap();
        let falsy = encode(BoundValue::Bool(false)).unwrap();

        assert_eq!(Parameter::Bool(BoolParameter::TRUE), truthy);
        assert_eq!(Parameter::Bool(BoolParameter::FALSE), falsy);
        assert_ne!(truthy, falsy);
    }
}
