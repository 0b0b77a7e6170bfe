//! Lifecycle and role enums.
//!
//! A request's review `status` and its `paymentStatus` are deliberately two
//! separate enums: they move independently, and no combination is rejected.

use serde::{Deserialize, Serialize};

/// Error returned when parsing an enum from an unknown string value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct UnknownVariant {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Implements `as_str`, `Display` and `FromStr` from a single variant table.
macro_rules! string_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// The wire representation of this value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Availability of a pet listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "adoption_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionStatus {
    #[default]
    Available,
    Pending,
    /// Set only when a request for the pet completes payment.
    Adopted,
}

string_enum!(AdoptionStatus, "adoption status", {
    Available => "available",
    Pending => "pending",
    Adopted => "adopted",
});

/// Review status of an adoption request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "request_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

string_enum!(RequestStatus, "status", {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

/// Payment status of an adoption request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "payment_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
}

string_enum!(PaymentStatus, "payment status", {
    Pending => "pending",
    Completed => "completed",
});

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
    ShelterStaff,
}

string_enum!(Role, "role", {
    User => "user",
    Admin => "admin",
    ShelterStaff => "shelter_staff",
});

impl Role {
    /// Whether this role may review adoption requests.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::ShelterStaff)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_new_records() {
        assert_eq!(AdoptionStatus::default(), AdoptionStatus::Available);
        assert_eq!(RequestStatus::default(), RequestStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&Role::ShelterStaff).unwrap(),
            "\"shelter_staff\""
        );
        assert_eq!(
            serde_json::from_str::<PaymentStatus>("\"completed\"").unwrap(),
            PaymentStatus::Completed
        );
        assert!(serde_json::from_str::<RequestStatus>("\"done\"").is_err());
    }

    #[test]
    fn test_from_str_matches_display() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(status.to_string().parse::<RequestStatus>().unwrap(), status);
        }
        let err = "sold".parse::<AdoptionStatus>().unwrap_err();
        assert_eq!(err.kind, "adoption status");
    }

    #[test]
    fn test_staff_roles() {
        assert!(Role::Admin.is_staff());
        assert!(Role::ShelterStaff.is_staff());
        assert!(!Role::User.is_staff());
    }
}
