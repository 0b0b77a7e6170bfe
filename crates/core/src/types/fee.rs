//! Adoption fee amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Fee`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeError {
    /// Fees cannot be negative.
    #[error("fee cannot be negative: {0}")]
    Negative(Decimal),
    /// The amount does not fit in the gateway's integer minor units.
    #[error("fee out of range: {0}")]
    OutOfRange(Decimal),
}

/// A non-negative adoption fee in the currency's major unit (e.g. rupees).
///
/// Serialized as a plain JSON number so the front end can render it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Fee(Decimal);

impl Fee {
    /// A fee of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a fee, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, FeeError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FeeError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a fee from a whole number of major units.
    #[must_use]
    pub fn from_major(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// The amount in major units.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount in minor units (hundredths), rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::OutOfRange` if the result does not fit in an `i64`.
    pub fn to_minor_units(&self) -> Result<i64, FeeError> {
        let minor = self
            .0
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(FeeError::OutOfRange(self.0))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        minor.to_i64().ok_or(FeeError::OutOfRange(self.0))
    }
}

impl TryFrom<Decimal> for Fee {
    type Error = FeeError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Fee> for Decimal {
    fn from(fee: Fee) -> Self {
        fee.0
    }
}

impl fmt::Display for Fee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Fee {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Fee {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Fee {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
