use bigdecimal::{BigDecimal, ParseBigDecimalError, ToPrimitive};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

const SCALE: i64 = 10_000;

/// Monetary amount held as a fixed-point integer with four decimal places.
///
/// Wrapping the raw `i64` keeps amounts from mixing with ids and counters and
/// sidesteps floating-point drift in balance arithmetic. Parsing and
/// formatting go through `BigDecimal`, so values written to customer files
/// read back exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Builds a `Money` from a raw fixed-point value (`12_500` is `1.2500`).
    pub fn from_raw(raw: i64) -> Self {
        Money(raw)
    }

    pub fn as_raw(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;
        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let raw = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(raw))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        write!(f, "{:.4}", bd)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_plain_and_fractional_amounts() {
        assert_eq!(Money::from_str("500").unwrap(), Money(5_000_000));
        assert_eq!(Money::from_str("1.5").unwrap(), Money(15_000));
        assert_eq!(Money::from_str("1.2345").unwrap(), Money(12_345));
        assert_eq!(Money::from_str("0.0001").unwrap(), Money(1));
        assert_eq!(Money::from_str("  2.0000 ").unwrap(), Money(20_000));
    }

    #[test]
    fn rounds_excess_precision() {
        assert_eq!(Money::from_str("1.99999").unwrap(), Money(20_000));
        assert_eq!(Money::from_str("0.00001").unwrap(), Money(0));
    }

    #[test]
    fn rejects_empty_and_garbage_input() {
        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("   ").is_err());
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn displays_four_decimal_places() {
        assert_eq!(Money(5_000_000).to_string(), "500.0000");
        assert_eq!(Money(12_345).to_string(), "1.2345");
        assert_eq!(Money(1).to_string(), "0.0001");
        assert_eq!(Money::ZERO.to_string(), "0.0000");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for raw in [0, 1, 9_999, 10_000, 5_000_000] {
            let m = Money(raw);
            assert_eq!(Money::from_str(&m.to_string()).unwrap(), m);
        }
    }

    #[test]
    fn arithmetic_and_ordering() {
        assert_eq!(Money(10_000) + Money(5_000), Money(15_000));
        assert_eq!(Money(15_000) - Money(5_000), Money(10_000));

        let mut m = Money(10_000);
        m += Money(5_000);
        assert_eq!(m, Money(15_000));
        m -= Money(15_000);
        assert_eq!(m, Money::ZERO);

        assert!(Money(10_000) < Money(15_000));
        assert!(Money(10_000) >= Money(10_000));
    }

    #[test]
    fn positivity() {
        assert!(Money(1).is_positive());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money(-1).is_positive());
    }
}
