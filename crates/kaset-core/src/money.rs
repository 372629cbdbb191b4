//! # Money Module
//!
//! Provides the `Money` and `Quantity` fixed-point types.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    ฿10.00 / 3 = ฿3.33 (×3 = ฿9.99)  → Lost ฿0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Satang                                           │
//! │    1000 satang / 3 = 333 satang (×3 = 999 satang)                      │
//! │    We KNOW we lost 1 satang, and handle it explicitly                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fertilizer and seed are sold by weight, so quantities are fractional
//! too: `Quantity` holds thousandths of a unit (2.500 kg = 2500).
//!
//! ## Usage
//! ```rust
//! use kaset_core::money::{Money, Quantity};
//!
//! // Create from satang (preferred)
//! let price = Money::from_satang(1099); // ฿10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // ฿21.98
//! let total = price + Money::from_satang(500);   // ฿15.99
//!
//! // Fractional quantities
//! let line = price.times(Quantity::from_milli(2_500)); // 2.5 × ฿10.99
//! assert_eq!(line.satang(), 2748);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Percent;

/// Thousandths in one whole quantity unit.
const MILLI_PER_UNIT: i64 = 1_000;

/// Integer division rounding half-up, half away from zero for negatives.
///
/// `den` must be positive. Exact numerators are carried in i128 so that
/// `price × quantity × rate` products cannot overflow before rounding.
pub(crate) const fn div_round_half_up(num: i128, den: i128) -> i64 {
    if num >= 0 {
        ((num + den / 2) / den) as i64
    } else {
        (-((-num + den / 2) / den)) as i64
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (satang, ฿0.01).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for change and adjustments
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: serializes as a bare integer for the wire and the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from satang (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use kaset_core::money::Money;
    ///
    /// let price = Money::from_satang(1099); // Represents ฿10.99
    /// assert_eq!(price.satang(), 1099);
    /// ```
    #[inline]
    pub const fn from_satang(satang: i64) -> Self {
        Money(satang)
    }

    /// Creates a Money value from major and minor units (baht and satang).
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_baht_satang(-5, 50)` = -฿5.50, not -฿4.50.
    ///
    /// ## Example
    /// ```rust
    /// use kaset_core::money::Money;
    ///
    /// let price = Money::from_baht_satang(10, 99); // ฿10.99
    /// assert_eq!(price.satang(), 1099);
    /// ```
    #[inline]
    pub const fn from_baht_satang(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in satang (smallest currency unit).
    #[inline]
    pub const fn satang(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (baht) portion.
    #[inline]
    pub const fn baht(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (satang) portion (always 0-99).
    #[inline]
    pub const fn satang_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Takes a percentage portion of this amount, rounded half-up to the
    /// satang.
    ///
    /// This is the single rounding point for every rate application in
    /// the system: per-line discounts, per-line tax and the order-level
    /// discount all go through here.
    ///
    /// ## Example
    /// ```rust
    /// use kaset_core::money::Money;
    /// use kaset_core::types::Percent;
    ///
    /// let base = Money::from_satang(1000);      // ฿10.00
    /// let rate = Percent::from_bps(825);        // 8.25%
    ///
    /// // ฿10.00 × 8.25% = ฿0.825 → rounds to ฿0.83
    /// assert_eq!(base.percent_of(rate).satang(), 83);
    /// ```
    pub fn percent_of(&self, rate: Percent) -> Money {
        Money(div_round_half_up(
            self.0 as i128 * rate.bps() as i128,
            10_000,
        ))
    }

    /// Multiplies by a fractional quantity, rounded half-up to the satang.
    ///
    /// ## Example
    /// ```rust
    /// use kaset_core::money::{Money, Quantity};
    ///
    /// let unit_price = Money::from_satang(299);             // ฿2.99
    /// let line = unit_price.times(Quantity::from_units(3)); // ฿8.97
    /// assert_eq!(line.satang(), 897);
    /// ```
    pub fn times(&self, qty: Quantity) -> Money {
        Money(div_round_half_up(
            self.0 as i128 * qty.milli() as i128,
            MILLI_PER_UNIT as i128,
        ))
    }
}

// =============================================================================
// Money Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The terminal front-end owns actual
/// display formatting and localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}฿{}.{:02}", sign, self.baht().abs(), self.satang_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (whole-unit quantities).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over line amounts.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A quantity of product in thousandths of a unit.
///
/// The store sells both countable goods (bottles, sacks) and weighed
/// goods (kg of seed, litres of chemical), so quantity is fixed-point
/// with three decimal places: 2500 = 2.500 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from whole units.
    ///
    /// ## Example
    /// ```rust
    /// use kaset_core::money::Quantity;
    ///
    /// assert_eq!(Quantity::from_units(3).milli(), 3000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * MILLI_PER_UNIT)
    }

    /// Creates a quantity from thousandths of a unit.
    ///
    /// ## Example
    /// ```rust
    /// use kaset_core::money::Quantity;
    ///
    /// let half_kilo = Quantity::from_milli(500); // 0.500
    /// assert_eq!(half_kilo.milli(), 500);
    /// ```
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Returns the raw value in thousandths of a unit.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / MILLI_PER_UNIT
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the quantity is positive (greater than zero).
    ///
    /// Every cart line must hold a positive quantity.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

/// Display shows whole units without a fraction, otherwise three places.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac = (self.0 % MILLI_PER_UNIT).abs();
        if frac == 0 {
            write!(f, "{}", self.units())
        } else {
            let sign = if self.0 < 0 { "-" } else { "" };
            write!(f, "{}{}.{:03}", sign, self.units().abs(), frac)
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl AddAssign for Quantity {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
