//! US treasury 32nds price notation codec
//!
//! Treasury prices quote as `xxx-yyz`: `xxx` whole points, `yy` 32nds
//! (00..31), `z` eighths of a 32nd (0..7, with `+` meaning 4, i.e. half a
//! 32nd). `99-31+` is 99 + 31/32 + 4/256. The feeds carry either this
//! notation or plain decimals; everything is canonicalized to decimal on the
//! way in.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::ParseError;
use crate::numeric::Price;

/// Parse a price in either 32nds notation or plain decimal notation.
pub fn parse_price(s: &str) -> Result<Price, ParseError> {
    let s = s.trim();
    match s.find('-') {
        None => {
            let decimal = Decimal::from_str(s).map_err(|_| bad_price(s))?;
            Price::try_new(decimal).ok_or_else(|| bad_price(s))
        }
        Some(pos) => {
            // xxx-yyz: exactly three characters after the dash
            let (whole, frac) = (&s[..pos], &s[pos + 1..]);
            if frac.len() != 3 {
                return Err(bad_price(s));
            }
            let xy: u32 = frac[..2].parse().map_err(|_| bad_price(s))?;
            if xy > 31 {
                return Err(bad_price(s));
            }
            let z: u32 = match &frac[2..3] {
                "+" => 4,
                d => {
                    let z = d.parse().map_err(|_| bad_price(s))?;
                    if z > 7 {
                        return Err(bad_price(s));
                    }
                    z
                }
            };
            let whole = Decimal::from_str(whole).map_err(|_| bad_price(s))?;
            let decimal =
                whole + Decimal::from(xy) / Decimal::from(32) + Decimal::from(z) / Decimal::from(256);
            Price::try_new(decimal).ok_or_else(|| bad_price(s))
        }
    }
}

/// Format a decimal price back into 32nds notation.
///
/// Inverse of [`parse_price`] for prices on the 1/256 grid; off-grid prices
/// are truncated to the grid.
pub fn format_price(price: Price) -> String {
    let decimal = price.as_decimal();
    let whole = decimal.trunc();
    let fraction = decimal - whole;
    let ticks = (fraction * Decimal::from(256))
        .trunc()
        .to_u32()
        .unwrap_or(0);
    let xy = ticks / 8;
    let z = ticks % 8;
    let z_str = if z == 4 { "+".to_string() } else { z.to_string() };
    format!("{}-{:02}{}", whole, xy, z_str)
}

fn bad_price(s: &str) -> ParseError {
    ParseError::BadPrice { value: s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_decimal_notation() {
        assert_eq!(parse_price("100.0").unwrap().as_decimal(), dec("100.0"));
        assert_eq!(parse_price("99.995").unwrap().as_decimal(), dec("99.995"));
    }

    #[test]
    fn test_parse_32nds_notation() {
        // 99-160 = 99 + 16/32 = 99.5
        assert_eq!(parse_price("99-160").unwrap().as_decimal(), dec("99.5"));
        // 99-16+ = 99 + 16/32 + 4/256 = 99.515625
        assert_eq!(parse_price("99-16+").unwrap().as_decimal(), dec("99.515625"));
        // 100-001 = 100 + 0/32 + 1/256
        assert_eq!(
            parse_price("100-001").unwrap().as_decimal(),
            dec("100.00390625")
        );
        // 99-312 = 99 + 31/32 + 2/256
        assert_eq!(parse_price("99-312").unwrap().as_decimal(), dec("99.9765625"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_price("99-3").is_err());
        assert!(parse_price("99-329").is_err()); // 32nds digit out of range
        assert!(parse_price("99-168").is_err()); // eighth out of range
        assert!(parse_price("abc").is_err());
        assert!(parse_price("").is_err());
        assert!(parse_price("-0.5").is_err());
    }

    #[test]
    fn test_format_32nds() {
        assert_eq!(format_price(parse_price("99.5").unwrap()), "99-160");
        assert_eq!(format_price(parse_price("99.515625").unwrap()), "99-16+");
        assert_eq!(format_price(parse_price("100").unwrap()), "100-000");
        assert_eq!(format_price(parse_price("99.9765625").unwrap()), "99-312");
    }

    #[test]
    fn test_roundtrip_on_grid() {
        for s in ["99-000", "99-01+", "100-317", "101-160"] {
            let price = parse_price(s).unwrap();
            assert_eq!(format_price(price), s, "roundtrip of {s}");
        }
    }
}
