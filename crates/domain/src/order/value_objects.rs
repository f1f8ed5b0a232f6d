//! Value objects for the work order domain.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Fixed-point money amount in integer cents. Never floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents (1050 = $10.50).
    cents: i64,
}

impl Money {
    /// Creates an amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates an amount from whole dollars.
    pub fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the raw cents value.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the whole-dollar part.
    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents remainder after whole dollars.
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Scales the amount by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents * quantity as i64,
        }
    }

    /// Divides by a quantity, truncating toward zero. The divisor must be
    /// non-zero.
    pub fn divide(&self, divisor: u32) -> Money {
        Money {
            cents: self.cents / divisor as i64,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents - rhs.cents,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.cents -= rhs.cents;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Work effort in hundredths of an hour (e.g., 250 = 2.50h).
///
/// Fixed point for the same reason as [`Money`]: repeated full
/// recomputation must be stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Hours {
    hundredths: i64,
}

impl Hours {
    /// Creates hours from a whole-hour value.
    pub fn from_hours(hours: i64) -> Self {
        Self {
            hundredths: hours * 100,
        }
    }

    /// Creates hours from hundredths of an hour.
    pub fn from_hundredths(hundredths: i64) -> Self {
        Self { hundredths }
    }

    /// Returns zero hours.
    pub fn zero() -> Self {
        Self { hundredths: 0 }
    }

    /// Returns the raw hundredths value.
    pub fn hundredths(&self) -> i64 {
        self.hundredths
    }

    /// Returns true if the value is positive.
    pub fn is_positive(&self) -> bool {
        self.hundredths > 0
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.hundredths == 0
    }

    /// Returns the labor cost of this effort at an hourly rate.
    pub fn cost_at(&self, rate: Money) -> Money {
        Money::from_cents(self.hundredths * rate.cents() / 100)
    }
}

impl std::fmt::Display for Hours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hundredths < 0 {
            write!(
                f,
                "-{}.{:02}",
                (self.hundredths / 100).abs(),
                (self.hundredths.abs()) % 100
            )
        } else {
            write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
        }
    }
}

impl std::ops::Add for Hours {
    type Output = Hours;

    fn add(self, rhs: Self) -> Self::Output {
        Hours {
            hundredths: self.hundredths + rhs.hundredths,
        }
    }
}

impl std::ops::AddAssign for Hours {
    fn add_assign(&mut self, rhs: Self) {
        self.hundredths += rhs.hundredths;
    }
}

impl std::iter::Sum for Hours {
    fn sum<I: Iterator<Item = Hours>>(iter: I) -> Self {
        iter.fold(Hours::zero(), |acc, h| acc + h)
    }
}

/// The kind of a maintenance work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    /// Planned (preventive or corrective) maintenance.
    #[default]
    General,

    /// Emergency order raised from an equipment-failure notification.
    /// Released under reduced procedural validation but subject to
    /// stricter post-completion reporting.
    Breakdown,
}

impl OrderKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::General => "GENERAL",
            OrderKind::Breakdown => "BREAKDOWN",
        }
    }

    /// Returns true for breakdown orders.
    pub fn is_breakdown(&self) -> bool {
        matches!(self, OrderKind::Breakdown)
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GENERAL" => Ok(OrderKind::General),
            "BREAKDOWN" => Ok(OrderKind::Breakdown),
            _ => Err(DomainError::InvalidValue {
                field: "order kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Processing priority of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Emergency,
}

impl Priority {
    /// Returns the priority as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Emergency => "EMERGENCY",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            "EMERGENCY" => Ok(Priority::Emergency),
            _ => Err(DomainError::InvalidValue {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(15075);
        assert_eq!(money.cents(), 15075);
        assert_eq!(money.dollars(), 150);
        assert_eq!(money.cents_part(), 75);
    }

    #[test]
    fn test_money_from_dollars() {
        let money = Money::from_dollars(150);
        assert_eq!(money.cents(), 15000);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(25050).to_string(), "$250.50");
        assert_eq!(Money::from_cents(100).to_string(), "$1.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-3075).to_string(), "-$30.75");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_dollars(150);
        let b = Money::from_dollars(85);

        assert_eq!((a + b).cents(), 23500);
        assert_eq!((a - b).cents(), 6500);
        assert_eq!(b.multiply(2).cents(), 17000);
        assert_eq!(Money::from_cents(15000).divide(3).cents(), 5000);
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_money_sign_checks() {
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_hours_cost_at_rate() {
        // 2.00h at $50.00/h
        let labor = Hours::from_hours(2).cost_at(Money::from_dollars(50));
        assert_eq!(labor, Money::from_dollars(100));

        // 2.50h at $50.00/h
        let labor = Hours::from_hundredths(250).cost_at(Money::from_dollars(50));
        assert_eq!(labor, Money::from_cents(12500));
    }

    #[test]
    fn test_hours_display() {
        assert_eq!(Hours::from_hours(2).to_string(), "2.00");
        assert_eq!(Hours::from_hundredths(250).to_string(), "2.50");
        assert_eq!(Hours::from_hundredths(-75).to_string(), "-0.75");
    }

    #[test]
    fn test_hours_sum() {
        let total: Hours = [Hours::from_hours(1), Hours::from_hundredths(50)]
            .into_iter()
            .sum();
        assert_eq!(total, Hours::from_hundredths(150));
    }

    #[test]
    fn test_order_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderKind::Breakdown).unwrap(),
            "\"BREAKDOWN\""
        );
        let parsed: OrderKind = "GENERAL".parse().unwrap();
        assert_eq!(parsed, OrderKind::General);
    }

    #[test]
    fn test_order_kind_rejects_unknown_value() {
        let result: Result<OrderKind, _> = "URGENT".parse();
        assert!(matches!(result, Err(DomainError::InvalidValue { .. })));
    }

    #[test]
    fn test_priority_parsing() {
        let parsed: Priority = "EMERGENCY".parse().unwrap();
        assert_eq!(parsed, Priority::Emergency);
        assert_eq!(Priority::default(), Priority::Medium);

        let result: Result<Priority, _> = "critical".parse();
        assert!(matches!(result, Err(DomainError::InvalidValue { .. })));
    }
}
