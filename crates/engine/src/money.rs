use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use crate::ValidationError;

/// Non-negative money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values (stored amounts, filtered totals,
/// overall totals) to avoid floating-point drift. Totals are exact sums of
/// cents; `f64` only appears at the JSON boundary.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "$12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator and an
/// exponent, rounds half-up to two decimals):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("3.5".parse::<MoneyCents>().unwrap().cents(), 350);
/// assert_eq!("1.005".parse::<MoneyCents>().unwrap().cents(), 101);
/// assert_eq!("1.5e2".parse::<MoneyCents>().unwrap().cents(), 15000);
/// assert!("1,000".parse::<MoneyCents>().is_err());
/// assert!("-2".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Largest amount accepted from input or storage.
    ///
    /// Small enough that the `f64` used at the JSON boundary represents every
    /// cent exactly.
    pub const MAX: MoneyCents = MoneyCents(1_000_000_000_000_000);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Amount in dollars, for the JSON boundary only.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Converts a stored dollar amount back to cents, rounding half-up.
    ///
    /// Returns `None` for non-finite, negative or out-of-range values.
    #[must_use]
    pub fn from_major(value: f64) -> Option<MoneyCents> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents > Self::MAX.0 as f64 {
            return None;
        }
        Some(MoneyCents(cents as i64))
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let dollars = group_thousands(abs / 100);
        let cents = abs % 100;
        write!(f, "{sign}${dollars}.{cents:02}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, |acc, amount| acc + amount)
    }
}

impl<'a> Sum<&'a MoneyCents> for MoneyCents {
    fn sum<I: Iterator<Item = &'a MoneyCents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for MoneyCents {
    type Err = ValidationError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts an optional leading `+`, `.` as decimal separator and an
    /// optional `e`/`E` exponent. `,` is also read as the decimal separator,
    /// but only with one or two digits after it: `1,000` is ambiguous and
    /// rejected rather than read as one dollar.
    ///
    /// Validation rules:
    /// - rejects empty/invalid strings and thousands separators
    /// - rejects negative values (`-0` is zero, not negative)
    /// - digits past the cents are rounded half-up on the first dropped digit
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || ValidationError::InvalidAmount("amount is empty".to_string());
        let invalid = || ValidationError::InvalidAmount("not a number".to_string());
        let overflow = || ValidationError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(idx) => (&rest[..idx], parse_exponent(&rest[idx + 1..])?),
            None => (rest, 0),
        };

        let (whole_str, frac_str, comma) = match mantissa.find(['.', ',']) {
            Some(idx) => (
                &mantissa[..idx],
                &mantissa[idx + 1..],
                mantissa.as_bytes()[idx] == b',',
            ),
            None => (mantissa, "", false),
        };

        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(invalid());
        }
        if !whole_str.bytes().all(|b| b.is_ascii_digit())
            || !frac_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        if comma && !(1..=2).contains(&frac_str.len()) {
            return Err(ValidationError::InvalidAmount(
                "ambiguous ','; use '.' for decimals".to_string(),
            ));
        }

        let digits = format!("{whole_str}{frac_str}");
        let frac_len = i64::try_from(frac_str.len()).map_err(|_| invalid())?;
        let shift = exponent.saturating_add(2).saturating_sub(frac_len);

        let total = scale_to_cents(digits.trim_start_matches('0'), shift)
            .filter(|v| *v <= Self::MAX.0)
            .ok_or_else(overflow)?;

        if negative && total > 0 {
            return Err(ValidationError::NegativeAmount);
        }

        Ok(MoneyCents(total))
    }
}

/// Parses the text after `e`/`E`: an optional sign and at least one digit.
fn parse_exponent(text: &str) -> Result<i64, ValidationError> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidAmount("not a number".to_string()));
    }
    text.parse()
        .map_err(|_| ValidationError::InvalidAmount("exponent out of range".to_string()))
}

/// Reads `digits` (no leading zeros) as an integer times `10^shift`, rounding
/// half-up when `shift` is negative. `None` when the result overflows `i64`.
fn scale_to_cents(digits: &str, shift: i64) -> Option<i64> {
    if digits.is_empty() {
        return Some(0);
    }

    if shift >= 0 {
        if digits.len() > 19 {
            return None;
        }
        let value: i64 = digits.parse().ok()?;
        let scale = 10_i64.checked_pow(u32::try_from(shift).ok()?)?;
        return value.checked_mul(scale);
    }

    let dropped_len = usize::try_from(shift.unsigned_abs()).unwrap_or(usize::MAX);
    if dropped_len > digits.len() {
        return Some(0);
    }
    let (kept, dropped) = digits.split_at(digits.len() - dropped_len);
    let value: i64 = if kept.is_empty() {
        0
    } else if kept.len() > 19 {
        return None;
    } else {
        kept.parse().ok()?
    };

    if dropped.as_bytes().first().is_some_and(|b| *b >= b'5') {
        value.checked_add(1)
    } else {
        Some(value)
    }
}
