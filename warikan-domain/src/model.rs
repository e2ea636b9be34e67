use std::{
    fmt,
    iter::Sum,
    ops::{Neg, Sub, SubAssign},
};

use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use indexmap::IndexMap;
use rust_decimal::Decimal;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaymentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Exact decimal currency amount.
///
/// Arithmetic is carried out on `rust_decimal::Decimal`, so sums and
/// differences are exact and only division introduces (28-digit) truncation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Rounds to the nearest integer unit, halves toward positive infinity
    /// (`2.5 -> 3`, `-2.5 -> -2`).
    ///
    /// `RoundingStrategy::MidpointAwayFromZero` would send `-2.5` to `-3`, so
    /// this is `floor(x + 0.5)` instead.
    pub fn round_half_up(self) -> Self {
        match self.0.checked_add(Decimal::new(5, 1)) {
            Some(shifted) => Self(shifted.floor()),
            // Only reachable near `Decimal::MAX`, where no fractional digits remain.
            None => self,
        }
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Adds, clamping at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Splits the amount into `parts` equal pieces. `None` when `parts` is 0.
    pub fn checked_split(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(parts as u64)).map(Self)
    }

    /// Computes `self * numerator / denominator`. `None` when the denominator is zero.
    ///
    /// Multiplies before dividing so exact midpoints such as `3 * 5 / 6 = 2.5`
    /// survive; the ratio is taken first only when the product overflows.
    pub fn checked_scale(self, numerator: Self, denominator: Self) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        match self.0.checked_mul(numerator.0) {
            Some(product) => product.checked_div(denominator.0).map(Self),
            None => {
                let ratio = numerator.0.checked_div(denominator.0)?;
                self.0.checked_mul(ratio).map(Self)
            }
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub payer: ParticipantId,
    pub description: String,
    pub amount: Money,
    pub excluded: FxHashSet<ParticipantId>,
}

impl Payment {
    pub fn new(id: impl Into<PaymentId>, payer: impl Into<ParticipantId>, amount: Money) -> Self {
        Self {
            id: id.into(),
            payer: payer.into(),
            description: String::new(),
            amount,
            excluded: FxHashSet::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn excluding<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ParticipantId>,
    {
        self.excluded.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn is_excluded(&self, id: &ParticipantId) -> bool {
        self.excluded.contains(id)
    }

    /// Amount that takes part in settlement; non-positive amounts count as zero.
    pub fn effective_amount(&self) -> Money {
        if self.amount.is_positive() {
            self.amount
        } else {
            Money::ZERO
        }
    }
}

/// Per-participant amounts in participant order.
///
/// Reads of ids that are not present yield [`Money::ZERO`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParticipantAmounts(IndexMap<ParticipantId, Money, FxBuildHasher>);

impl ParticipantAmounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// One zero entry per participant, in participant order.
    pub fn zeroed(participants: &[Participant]) -> Self {
        participants
            .iter()
            .map(|participant| (participant.id.clone(), Money::ZERO))
            .collect()
    }

    pub fn get(&self, id: &ParticipantId) -> Money {
        self.0.get(id).copied().unwrap_or(Money::ZERO)
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.0.contains_key(id)
    }

    pub fn insert(&mut self, id: ParticipantId, amount: Money) {
        self.0.insert(id, amount);
    }

    pub fn add(&mut self, id: &ParticipantId, amount: Money) {
        match self.0.get_mut(id) {
            Some(current) => *current = current.saturating_add(amount),
            None => {
                self.0.insert(id.clone(), amount);
            }
        }
    }

    /// Adds to an existing entry only. Returns `false` when `id` is unknown.
    pub fn add_existing(&mut self, id: &ParticipantId, amount: Money) -> bool {
        let Some(current) = self.0.get_mut(id) else {
            return false;
        };
        *current = current.saturating_add(amount);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Money)> + '_ {
        self.0.iter().map(|(id, amount)| (id, *amount))
    }

    pub fn ids(&self) -> impl Iterator<Item = &ParticipantId> + '_ {
        self.0.keys()
    }

    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ParticipantId, Money)> for ParticipantAmounts {
    fn from_iter<T: IntoIterator<Item = (ParticipantId, Money)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitMethod {
    /// Everyone owes their rounded equal share.
    #[default]
    Equal,
    /// Zeroed and fixed participants first, the remainder split by equal-share weight.
    Weighted,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitConfig {
    pub method: SplitMethod,
    pub fixed_amounts: FxHashMap<ParticipantId, Money>,
    pub zeroed: FxHashSet<ParticipantId>,
}

impl SplitConfig {
    pub fn equal() -> Self {
        Self::default()
    }

    pub fn weighted() -> Self {
        Self {
            method: SplitMethod::Weighted,
            ..Self::default()
        }
    }

    pub fn with_fixed_amount(mut self, id: impl Into<ParticipantId>, amount: Money) -> Self {
        self.fixed_amounts.insert(id.into(), amount);
        self
    }

    pub fn with_zeroed(mut self, id: impl Into<ParticipantId>) -> Self {
        self.zeroed.insert(id.into());
        self
    }

    pub fn fixed_amount(&self, id: &ParticipantId) -> Money {
        self.fixed_amounts.get(id).copied().unwrap_or(Money::ZERO)
    }

    pub fn is_zeroed(&self, id: &ParticipantId) -> bool {
        self.zeroed.contains(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: Participant,
    pub to: Participant,
    pub amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementResult {
    pub total_amount: Money,
    pub equal_shares: ParticipantAmounts,
    pub paid_amounts: ParticipantAmounts,
    pub obligations: ParticipantAmounts,
    pub transfers: Vec<Transfer>,
}

impl SettlementResult {
    /// `paid - obligation` per participant; positive means the participant is owed money.
    pub fn balances(&self) -> ParticipantAmounts {
        self.paid_amounts
            .iter()
            .map(|(id, paid)| (id.clone(), paid - self.obligations.get(id)))
            .collect()
    }

    pub fn balance_of(&self, id: &ParticipantId) -> Money {
        self.paid_amounts.get(id) - self.obligations.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::half_rounds_up(Money::new(25, 1), Money::from_i64(3))]
    #[case::below_half_rounds_down(Money::new(24, 1), Money::from_i64(2))]
    #[case::integer_is_unchanged(Money::from_i64(100), Money::from_i64(100))]
    #[case::repeating_third(Money::new(3_333_333, 5), Money::from_i64(33))]
    #[case::negative_half_rounds_toward_positive(Money::new(-25, 1), Money::from_i64(-2))]
    #[case::negative_below_half(Money::new(-26, 1), Money::from_i64(-3))]
    fn round_half_up_cases(#[case] value: Money, #[case] expected: Money) {
        assert_eq!(value.round_half_up(), expected);
    }

    #[test]
    fn checked_split_rejects_zero_parts() {
        assert_eq!(Money::from_i64(100).checked_split(0), None);
        assert_eq!(
            Money::from_i64(100).checked_split(4),
            Some(Money::from_i64(25))
        );
    }

    #[test]
    fn checked_scale_rejects_zero_denominator() {
        let remaining = Money::from_i64(700);
        assert_eq!(remaining.checked_scale(Money::ZERO, Money::ZERO), None);
        assert_eq!(
            remaining.checked_scale(Money::from_i64(50), Money::from_i64(100)),
            Some(Money::from_i64(350))
        );
    }

    #[rstest]
    #[case::exact_midpoint(3, 5, 6, Money::new(25, 1))]
    #[case::small_midpoint(3, 1, 6, Money::new(5, 1))]
    #[case::repeating(100, 1, 3, Money::from_i64(100).checked_split(3).unwrap_or(Money::ZERO))]
    fn checked_scale_multiplies_before_dividing(
        #[case] remaining: i64,
        #[case] numerator: i64,
        #[case] denominator: i64,
        #[case] expected: Money,
    ) {
        let scaled = Money::from_i64(remaining)
            .checked_scale(Money::from_i64(numerator), Money::from_i64(denominator));
        assert_eq!(scaled, Some(expected));
    }

    #[test]
    fn midpoint_scale_rounds_up() {
        let scaled = Money::from_i64(3)
            .checked_scale(Money::from_i64(5), Money::from_i64(6))
            .map(Money::round_half_up);
        assert_eq!(scaled, Some(Money::from_i64(3)));
    }

    #[test]
    fn checked_scale_falls_back_when_product_overflows() {
        let max = Money::from_decimal(Decimal::MAX);
        let scaled = max.checked_scale(Money::from_i64(2), Money::from_i64(4));
        assert!(scaled.is_some_and(|half| half.is_positive() && half < max));
    }

    #[test]
    fn additions_saturate_at_decimal_bounds() {
        let max = Money::from_decimal(Decimal::MAX);
        let one = Money::from_i64(1);

        assert_eq!(max.checked_add(one), None);
        assert_eq!(max.saturating_add(one), max);
        assert_eq!([max, max].into_iter().sum::<Money>(), max);
        assert_eq!(max.round_half_up(), max);

        let mut amounts = ParticipantAmounts::zeroed(&[Participant::new("a", "Alice")]);
        amounts.add(&"a".into(), max);
        assert!(amounts.add_existing(&"a".into(), max));
        assert_eq!(amounts.get(&"a".into()), max);
    }

    #[test]
    fn participant_amounts_default_to_zero() {
        let mut amounts = ParticipantAmounts::zeroed(&[Participant::new("a", "Alice")]);
        assert!(amounts.add_existing(&"a".into(), Money::from_i64(10)));
        assert!(!amounts.add_existing(&"ghost".into(), Money::from_i64(10)));

        assert_eq!(amounts.get(&"a".into()), Money::from_i64(10));
        assert_eq!(amounts.get(&"ghost".into()), Money::ZERO);
        assert_eq!(amounts.len(), 1);
    }

    #[test]
    fn payment_effective_amount_ignores_non_positive_values() {
        assert_eq!(
            Payment::new("p", "a", Money::from_i64(-5)).effective_amount(),
            Money::ZERO
        );
        assert_eq!(
            Payment::new("p", "a", Money::from_i64(5)).effective_amount(),
            Money::from_i64(5)
        );
    }

    #[test]
    fn money_display_drops_trailing_zeros() {
        assert_eq!(Money::new(10_000, 2).to_string(), "100");
        assert_eq!(Money::new(1_050, 1).to_string(), "105");
        assert_eq!(Money::new(1_055, 1).to_string(), "105.5");
    }
}
