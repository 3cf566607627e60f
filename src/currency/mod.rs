//! Fixed-point money in integer cents.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::LedgerError;

const GROUPING_SEPARATOR: char = ',';
const CENTS_PER_UNIT: u64 = 100;

/// A monetary amount counted in cents.
///
/// Renders with two decimal places and thousands separators (`-1,234.50`)
/// and serializes as that text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Integer division truncating toward zero, returning `(quotient, remainder)`.
    ///
    /// Panics if `divisor` is zero.
    pub fn div_rem(self, divisor: i64) -> (Amount, Amount) {
        (Amount(self.0 / divisor), Amount(self.0 % divisor))
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Two-decimal rendering without grouping separators (`-1234.50`).
    pub fn to_plain_string(self) -> String {
        let magnitude = self.0.unsigned_abs();
        format!(
            "{}{}.{:02}",
            if self.is_negative() { "-" } else { "" },
            magnitude / CENTS_PER_UNIT,
            magnitude % CENTS_PER_UNIT
        )
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let whole = group_digits(&(magnitude / CENTS_PER_UNIT).to_string());
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{}.{:02}", whole, magnitude % CENTS_PER_UNIT)
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(GROUPING_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

impl FromStr for Amount {
    type Err = LedgerError;

    /// Parses an optionally signed decimal, rounding half away from zero to
    /// the nearest cent. Thousands separators in the whole part are accepted
    /// when correctly grouped.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidAmount(text.to_string());

        let trimmed = text.trim();
        let (negative, body) = if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('+') {
            (false, rest)
        } else {
            (false, trimmed)
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let whole_digits = ungroup(whole).ok_or_else(invalid)?;

        // Magnitude of i64::MIN exceeds i64::MAX, so accumulate wider.
        let mut cents: i128 = 0;
        for digit in whole_digits.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(i128::from(digit - b'0')))
                .ok_or_else(invalid)?;
        }

        let mut fraction_digits = fraction.bytes().map(|b| i128::from(b - b'0'));
        let tenths = fraction_digits.next().unwrap_or(0);
        let hundredths = fraction_digits.next().unwrap_or(0);
        let round_up = fraction_digits.next().is_some_and(|d| d >= 5);

        cents = cents
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i128::from(round_up)))
            .ok_or_else(invalid)?;

        let signed = if negative { -cents } else { cents };
        i64::try_from(signed).map(Amount).map_err(|_| invalid())
    }
}

/// Strips well-formed thousands separators, returning `None` when the text
/// contains anything but digits and correctly placed separators.
fn ungroup(whole: &str) -> Option<String> {
    if !whole.contains(GROUPING_SEPARATOR) {
        return whole
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| whole.to_string());
    }
    let mut groups = whole.split(GROUPING_SEPARATOR);
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        self.0 -= rhs.0;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
