use anyhow::{Context, Result, anyhow, bail};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Resource name → quantity. Sorted, so iteration order is deterministic.
pub type ResourceList = BTreeMap<String, Quantity>;

/// Finest precision a quantity keeps (nano units).
const NANO_SCALE: u32 = 9;

const BINARY_SUFFIXES: [&str; 6] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

const DECIMAL_SUFFIXES: [(&str, i32); 10] = [
    ("n", -9),
    ("u", -6),
    ("m", -3),
    ("", 0),
    ("k", 3),
    ("M", 6),
    ("G", 9),
    ("T", 12),
    ("P", 15),
    ("E", 18),
];

/// Notation a quantity was written in. Only affects `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantityFormat {
    /// `1Ki`, `10Gi`
    BinarySI,
    /// `100m`, `1.5`, `2k`
    #[default]
    DecimalSI,
    /// `1e3`, `5E-3`
    DecimalExponent,
}

enum Multiplier {
    Binary(u32),
    Decimal(i32),
}

/// An exact decimal amount of a resource, e.g. `1.5` CPUs or `10Gi` bytes.
///
/// Equality and ordering compare the numeric value, so `1Gi == 1073741824`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quantity {
    value: Decimal,
    format: QuantityFormat,
}

impl Quantity {
    /// Values finer than 1n are rounded away from zero to the nano scale.
    pub fn new(value: Decimal, format: QuantityFormat) -> Self {
        let value = value
            .round_dp_with_strategy(NANO_SCALE, RoundingStrategy::AwayFromZero)
            .normalize();
        Self { value, format }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn format(&self) -> QuantityFormat {
        self.format
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.value.fract().is_zero()
    }

    /// Exact sum, or `None` if it falls outside the representable range.
    /// The result keeps `self`'s format.
    pub fn checked_add(&self, other: &Quantity) -> Option<Quantity> {
        let value = self.value.checked_add(other.value)?;
        Some(Quantity::new(value, self.format))
    }
}

impl Add for Quantity {
    type Output = Quantity;

    /// Saturates at the representable bounds.
    fn add(self, rhs: Quantity) -> Quantity {
        self.checked_add(&rhs).unwrap_or_else(|| {
            let bound = if rhs.value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            };
            Quantity::new(bound, self.format)
        })
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl FromStr for Quantity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("quantity must not be empty");
        }

        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-'))
            .unwrap_or(s.len());
        let (number, suffix) = s.split_at(split);

        let (negative, digits) = match number.as_bytes().first() {
            Some(b'-') => (true, &number[1..]),
            Some(b'+') => (false, &number[1..]),
            _ => (false, number),
        };
        let well_formed = digits.chars().any(|c| c.is_ascii_digit())
            && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
            && digits.matches('.').count() <= 1;
        if !well_formed {
            bail!("unable to parse numeric part of quantity {:?}", s);
        }

        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
        let frac_part = frac_part.trim_end_matches('0');
        let all_digits = format!("{int_part}{frac_part}");
        let scale = frac_part.len() as i64;

        let (multiplier, format) =
            parse_suffix(suffix).with_context(|| format!("invalid quantity {:?}", s))?;

        let nanos = match multiplier {
            Multiplier::Binary(bits) => parse_digits(&all_digits, 0)
                .and_then(|(mantissa, _)| mantissa.checked_mul(1i128 << bits))
                .and_then(|mantissa| scale_to_nanos(mantissa, NANO_SCALE as i64 - scale)),
            Multiplier::Decimal(exp) => {
                let shift = exp as i64 - scale + NANO_SCALE as i64;
                let dropped = usize::try_from(-shift).unwrap_or(0);
                parse_digits(&all_digits, dropped).and_then(|(mantissa, inexact)| {
                    let nanos = scale_to_nanos(mantissa, shift.max(0))?;
                    nanos.checked_add(i128::from(inexact))
                })
            }
        };
        let nanos = nanos.ok_or_else(|| anyhow!("quantity {:?} is out of range", s))?;
        let nanos = if negative { -nanos } else { nanos };

        let value =
            from_nanos(nanos).ok_or_else(|| anyhow!("quantity {:?} is out of range", s))?;
        Ok(Quantity::new(value, format))
    }
}

fn parse_suffix(suffix: &str) -> Result<(Multiplier, QuantityFormat)> {
    if let Some(pos) = BINARY_SUFFIXES.iter().position(|b| *b == suffix) {
        let bits = 10 * (pos as u32 + 1);
        return Ok((Multiplier::Binary(bits), QuantityFormat::BinarySI));
    }
    if let Some((_, exp)) = DECIMAL_SUFFIXES.iter().find(|(d, _)| *d == suffix) {
        return Ok((Multiplier::Decimal(*exp), QuantityFormat::DecimalSI));
    }
    if let Some(rest) = suffix.strip_prefix(|c: char| c == 'e' || c == 'E') {
        let exp: i32 = rest
            .parse()
            .map_err(|_| anyhow!("unknown quantity suffix {:?}", suffix))?;
        return Ok((Multiplier::Decimal(exp), QuantityFormat::DecimalExponent));
    }
    bail!("unknown quantity suffix {:?}", suffix)
}

/// Parses an unsigned digit string, ignoring its lowest `dropped` digits.
/// The flag is set when any ignored digit was non-zero.
fn parse_digits(digits: &str, dropped: usize) -> Option<(i128, bool)> {
    let (kept, rest) = digits.split_at(digits.len().saturating_sub(dropped));
    let kept = kept.trim_start_matches('0');
    let mantissa = if kept.is_empty() { 0 } else { kept.parse().ok()? };
    Some((mantissa, rest.bytes().any(|b| b != b'0')))
}

/// `mantissa * 10^shift`, rounded up in magnitude when `shift` is negative.
fn scale_to_nanos(mantissa: i128, shift: i64) -> Option<i128> {
    if mantissa == 0 {
        return Some(0);
    }
    if shift >= 0 {
        let factor = 10i128.checked_pow(u32::try_from(shift).ok()?)?;
        return mantissa.checked_mul(factor);
    }
    match u32::try_from(-shift).ok().and_then(|p| 10i128.checked_pow(p)) {
        Some(d) => {
            let q = mantissa / d;
            Some(if mantissa % d != 0 { q + mantissa.signum() } else { q })
        }
        None => Some(mantissa.signum()),
    }
}

fn from_nanos(mut nanos: i128) -> Option<Decimal> {
    let mut scale = NANO_SCALE;
    while scale > 0 && nanos % 10 == 0 {
        nanos /= 10;
        scale -= 1;
    }
    Decimal::try_from_i128_with_scale(nanos, scale).ok()
}

impl fmt::Display for Quantity {
    /// Canonical form: `1500m`, `10Gi`, `1k`, `1e3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.normalize();
        if value.is_zero() {
            return write!(f, "0");
        }

        if self.format == QuantityFormat::BinarySI
            && value.abs() >= Decimal::from(1024)
            && value.fract().is_zero()
        {
            let mut mantissa = value.mantissa();
            let mut idx = 0;
            while idx < BINARY_SUFFIXES.len() && mantissa % 1024 == 0 {
                mantissa /= 1024;
                idx += 1;
            }
            if idx > 0 {
                return write!(f, "{}{}", mantissa, BINARY_SUFFIXES[idx - 1]);
            }
        }

        // value = mantissa * 10^exp with exp a multiple of 3
        let mut exp = -(value.scale() as i64);
        let mut mantissa = value.mantissa();
        let aligned = exp.div_euclid(3) * 3;
        mantissa *= 10i128.pow((exp - aligned) as u32);
        exp = aligned;
        while mantissa % 1000 == 0 && (self.format == QuantityFormat::DecimalExponent || exp < 18)
        {
            mantissa /= 1000;
            exp += 3;
        }

        match self.format {
            QuantityFormat::DecimalExponent => {
                if exp == 0 {
                    write!(f, "{}", mantissa)
                } else {
                    write!(f, "{}e{}", mantissa, exp)
                }
            }
            _ => {
                let suffix = DECIMAL_SUFFIXES
                    .iter()
                    .find(|(_, e)| *e as i64 == exp)
                    .map(|(s, _)| *s)
                    .unwrap_or_default();
                write!(f, "{}{}", mantissa, suffix)
            }
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

struct QuantityVisitor;

impl Visitor<'_> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a quantity string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Quantity, E> {
        v.parse().map_err(|e: anyhow::Error| E::custom(format!("{:#}", e)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Quantity, E> {
        Ok(Quantity::new(Decimal::from(v), QuantityFormat::DecimalSI))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Quantity, E> {
        Ok(Quantity::new(Decimal::from(v), QuantityFormat::DecimalSI))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Quantity, E> {
        self.visit_str(&v.to_string())
    }
}
