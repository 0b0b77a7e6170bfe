//! Adoption request domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pet_adoption_core::{AdoptionRequestId, Email, PaymentStatus, PetId, RequestStatus, UserId};

use super::pet::PetSummary;

/// A user's request to adopt a specific pet.
///
/// `name`, `email` and `message` are a snapshot taken at submission and are
/// not kept in sync with the user's profile. `pet_id` and `user_id` never
/// change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequest {
    #[serde(rename = "_id")]
    pub id: AdoptionRequestId,
    pub pet_id: PetId,
    pub user_id: UserId,
    pub name: String,
    pub email: Email,
    pub message: Option<String>,
    pub status: RequestStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdoptionRequest {
    /// Replace the bare references with resolved display records.
    ///
    /// `pet` is `None` when the referenced pet no longer resolves.
    #[must_use]
    pub fn join<U>(self, pet: Option<PetSummary>, user: U) -> JoinedAdoptionRequest<U> {
        JoinedAdoptionRequest {
            id: self.id,
            pet_id: pet,
            user_id: user,
            name: self.name,
            email: self.email,
            message: self.message,
            status: self.status,
            payment_status: self.payment_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// An adoption request with its pet (and optionally its user) resolved.
///
/// The reference fields keep their wire names (`petId`, `userId`) but carry
/// the joined record, which is what the request listings return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedAdoptionRequest<U> {
    #[serde(rename = "_id")]
    pub id: AdoptionRequestId,
    pub pet_id: Option<PetSummary>,
    pub user_id: U,
    pub name: String,
    pub email: Email,
    pub message: Option<String>,
    pub status: RequestStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating an adoption request.
#[derive(Debug, Clone)]
pub struct NewAdoptionRequest {
    pub pet_id: PetId,
    pub user_id: UserId,
    pub name: String,
    pub email: Email,
    pub message: Option<String>,
}

/// A partial update of a request's two status axes.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: Option<RequestStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl StatusUpdate {
    /// Apply the supplied fields to `request`.
    pub fn apply_to(&self, request: &mut AdoptionRequest) {
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(payment_status) = self.payment_status {
            request.payment_status = payment_status;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> AdoptionRequest {
        let now = Utc::now();
        AdoptionRequest {
            id: AdoptionRequestId::generate(),
            pet_id: PetId::generate(),
            user_id: UserId::generate(),
            name: "Jane".to_owned(),
            email: Email::parse("jane@example.com").unwrap(),
            message: None,
            status: RequestStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_status_only_keeps_payment_status() {
        let mut req = request();
        req.payment_status = PaymentStatus::Completed;
        StatusUpdate {
            status: Some(RequestStatus::Rejected),
            payment_status: None,
        }
        .apply_to(&mut req);
        assert_eq!(req.status, RequestStatus::Rejected);
        assert_eq!(req.payment_status, PaymentStatus::Completed);
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let mut req = request();
        let before = req.clone();
        let update = StatusUpdate::default();
        update.apply_to(&mut req);
        assert_eq!(req, before);
    }

    #[test]
    fn test_wire_shape() {
        let req = request();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["_id"], req.id.to_string());
        assert_eq!(json["petId"], req.pet_id.to_string());
        assert_eq!(json["userId"], req.user_id.to_string());
        assert_eq!(json["status"], "pending");
        assert_eq!(json["paymentStatus"], "pending");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_join_with_missing_pet_serializes_null() {
        let req = request();
        let user = req.user_id;
        let joined = req.join(None, user);
        let json = serde_json::to_value(&joined).unwrap();
        assert!(json["petId"].is_null());
        assert_eq!(json["userId"], user.to_string());
    }
}
