//! Adoption request lifecycle.
//!
//! A request is submitted as `pending`/`pending`, reviewed by staff
//! (`approved` or `rejected`), and paid (`paymentStatus: completed`). The two
//! status axes are independent; the service sets whatever it is given and
//! never rejects a combination.
//!
//! Payment completion marks the pet `adopted`. That is a second write after
//! the request update and is not rolled back if it fails: the request then
//! shows `completed` while the pet is still listed, until the update is
//! retried by the caller.

use std::collections::HashMap;

use serde::Deserialize;

use pet_adoption_core::{
    AdoptionRequestId, AdoptionStatus, Email, PaymentStatus, PetId, RequestStatus, UserId,
};

use super::ServiceError;
use crate::db::Repositories;
use crate::models::{
    AdoptionRequest, JoinedAdoptionRequest, NewAdoptionRequest, PetSummary, StatusUpdate,
    UserSummary,
};

const MISSING_FIELDS: &str = "Please provide all required fields (petId, name, email).";

/// Raw submission body, validated by [`AdoptionService::submit`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAdoption {
    pub pet_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Raw status update body. Blank strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateForm {
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

impl StatusUpdateForm {
    /// Parse the supplied fields into a typed update.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for an unknown status value.
    pub fn parse(&self) -> Result<StatusUpdate, ServiceError> {
        let status = non_blank(self.status.as_deref())
            .map(str::parse::<RequestStatus>)
            .transpose()
            .map_err(|e| ServiceError::validation(e.to_string()))?;
        let payment_status = non_blank(self.payment_status.as_deref())
            .map(str::parse::<PaymentStatus>)
            .transpose()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        Ok(StatusUpdate {
            status,
            payment_status,
        })
    }
}

/// Adoption lifecycle service.
pub struct AdoptionService<'a> {
    repos: &'a Repositories,
}

impl<'a> AdoptionService<'a> {
    /// Create a new adoption service.
    #[must_use]
    pub const fn new(repos: &'a Repositories) -> Self {
        Self { repos }
    }

    /// Submit a new adoption request on behalf of `caller`.
    ///
    /// The pet's availability is not changed here; staff decide that on review.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if `petId`, `name` or `email` is
    /// missing or malformed.
    /// Returns `ServiceError::NotFound` if the pet does not exist.
    pub async fn submit(
        &self,
        caller: UserId,
        form: SubmitAdoption,
    ) -> Result<AdoptionRequest, ServiceError> {
        let (Some(pet_id), Some(_), Some(email)) = (
            non_blank(form.pet_id.as_deref()),
            non_blank(form.name.as_deref()),
            non_blank(form.email.as_deref()),
        ) else {
            return Err(ServiceError::validation(MISSING_FIELDS));
        };

        let pet_id = PetId::parse(pet_id).map_err(|_| ServiceError::validation("Invalid pet id."))?;
        // Stricter than a presence check: the address must be `local@domain`
        let email = Email::parse(email)
            .map_err(|e| ServiceError::validation(format!("Invalid email: {e}.")))?;

        if self.repos.pets.get(pet_id).await?.is_none() {
            return Err(ServiceError::not_found("Pet not found."));
        }

        let request = self
            .repos
            .adoption_requests
            .create(NewAdoptionRequest {
                pet_id,
                user_id: caller,
                name: form.name.unwrap_or_default(),
                email,
                message: form.message.filter(|m| !m.trim().is_empty()),
            })
            .await?;

        tracing::info!(
            request_id = %request.id,
            pet_id = %request.pet_id,
            user_id = %request.user_id,
            "Adoption request submitted"
        );

        Ok(request)
    }

    /// Every request with its pet and requesting user resolved.
    ///
    /// Dangling references resolve to `None` rather than failing the listing.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if a store read fails.
    pub async fn list_all(
        &self,
    ) -> Result<Vec<JoinedAdoptionRequest<Option<UserSummary>>>, ServiceError> {
        let requests = self.repos.adoption_requests.list_all().await?;
        let pets = self.pet_summaries(&requests).await?;

        let mut user_ids: Vec<UserId> = requests.iter().map(|r| r.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users: HashMap<UserId, UserSummary> = self
            .repos
            .users
            .get_many(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.summary()))
            .collect();

        Ok(requests
            .into_iter()
            .map(|r| {
                let pet = pets.get(&r.pet_id).cloned();
                let user = users.get(&r.user_id).cloned();
                r.join(pet, user)
            })
            .collect())
    }

    /// The caller's own requests, newest first, with pets resolved.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if a store read fails.
    pub async fn list_for_user(
        &self,
        caller: UserId,
    ) -> Result<Vec<JoinedAdoptionRequest<UserId>>, ServiceError> {
        let requests = self.repos.adoption_requests.list_by_user(caller).await?;
        let pets = self.pet_summaries(&requests).await?;

        Ok(requests
            .into_iter()
            .map(|r| {
                let pet = pets.get(&r.pet_id).cloned();
                let user = r.user_id;
                r.join(pet, user)
            })
            .collect())
    }

    /// Apply a partial status update.
    ///
    /// When the resulting payment status is `completed`, the referenced pet
    /// is marked `adopted`, whatever the review status is.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the request does not exist.
    /// Returns `ServiceError::Repository` if either write fails; a failure of
    /// the pet write leaves the request update in place.
    pub async fn update_status(
        &self,
        id: AdoptionRequestId,
        update: StatusUpdate,
    ) -> Result<AdoptionRequest, ServiceError> {
        let request = self
            .repos
            .adoption_requests
            .update_status(id, update)
            .await?
            .ok_or_else(|| ServiceError::not_found("Request not found"))?;

        tracing::info!(
            request_id = %request.id,
            status = %request.status,
            payment_status = %request.payment_status,
            "Adoption request status updated"
        );

        if request.payment_status == PaymentStatus::Completed {
            self.mark_adopted(&request).await?;
        }

        Ok(request)
    }

    async fn mark_adopted(&self, request: &AdoptionRequest) -> Result<(), ServiceError> {
        match self
            .repos
            .pets
            .set_adoption_status(request.pet_id, AdoptionStatus::Adopted)
            .await
        {
            Ok(true) => {
                tracing::info!(pet_id = %request.pet_id, request_id = %request.id, "Pet marked adopted");
                Ok(())
            }
            Ok(false) => {
                tracing::warn!(
                    pet_id = %request.pet_id,
                    request_id = %request.id,
                    "Payment completed for a request whose pet no longer exists"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    pet_id = %request.pet_id,
                    request_id = %request.id,
                    "Request marked paid but pet status update failed"
                );
                Err(e.into())
            }
        }
    }

    async fn pet_summaries(
        &self,
        requests: &[AdoptionRequest],
    ) -> Result<HashMap<PetId, PetSummary>, ServiceError> {
        let mut pet_ids: Vec<PetId> = requests.iter().map(|r| r.pet_id).collect();
        pet_ids.sort_unstable();
        pet_ids.dedup();

        Ok(self
            .repos
            .pets
            .get_many(&pet_ids)
            .await?
            .iter()
            .map(|p| (p.id, p.summary()))
            .collect())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pet_adoption_core::{Fee, Role};

    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{NewPet, NewUser, Pet, User};

    struct Fixture {
        repos: Repositories,
        pet: Pet,
        user: User,
    }

    async fn fixture() -> Fixture {
        let repos = Repositories::in_memory(Arc::new(MemoryStore::new()));
        let pet = repos
            .pets
            .create(NewPet {
                name: "Biscuit".to_owned(),
                kind: "Dog".to_owned(),
                adoption_fee: Fee::from_major(250),
                ..NewPet::default()
            })
            .await
            .unwrap();
        let user = repos
            .users
            .create(NewUser {
                name: "Uma".to_owned(),
                email: Email::parse("uma@example.com").unwrap(),
                password_hash: "hash".to_owned(),
                role: Role::User,
            })
            .await
            .unwrap();
        Fixture { repos, pet, user }
    }

    fn form(pet_id: &str) -> SubmitAdoption {
        SubmitAdoption {
            pet_id: Some(pet_id.to_owned()),
            name: Some("Uma".to_owned()),
            email: Some("uma@example.com".to_owned()),
            message: Some("We have a big garden".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_submit_starts_pending_pending() {
        let f = fixture().await;
        let service = AdoptionService::new(&f.repos);
        let request = service
            .submit(f.user.id, form(&f.pet.id.to_string()))
            .await
            .unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.payment_status, PaymentStatus::Pending);
        assert_eq!(request.user_id, f.user.id);
        assert_eq!(request.message.as_deref(), Some("We have a big garden"));

        // Submitting does not touch the pet
        let pet = f.repos.pets.get(f.pet.id).await.unwrap().unwrap();
        assert_eq!(pet.adoption_status, AdoptionStatus::Available);
    }

    #[tokio::test]
    async fn test_submit_keeps_name_as_given() {
        let f = fixture().await;
        let service = AdoptionService::new(&f.repos);
        let mut padded = form(&f.pet.id.to_string());
        padded.name = Some("  Uma Rao ".to_owned());

        let request = service.submit(f.user.id, padded).await.unwrap();
        assert_eq!(request.name, "  Uma Rao ");
    }

    #[tokio::test]
    async fn test_submit_missing_fields() {
        let f = fixture().await;
        let service = AdoptionService::new(&f.repos);
        let mut missing_name = form(&f.pet.id.to_string());
        missing_name.name = Some("   ".to_owned());

        let err = service.submit(f.user.id, missing_name).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg == MISSING_FIELDS));
    }

    #[tokio::test]
    async fn test_submit_unknown_pet_creates_nothing() {
        let f = fixture().await;
        let service = AdoptionService::new(&f.repos);

        let err = service
            .submit(f.user.id, form(&PetId::generate().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_payment_completion_adopts_even_when_rejected() {
        let f = fixture().await;
        let service = AdoptionService::new(&f.repos);
        let request = service
            .submit(f.user.id, form(&f.pet.id.to_string()))
            .await
            .unwrap();

        service
            .update_status(
                request.id,
                StatusUpdate {
                    status: Some(RequestStatus::Rejected),
                    payment_status: None,
                },
            )
            .await
            .unwrap();
        let updated = service
            .update_status(
                request.id,
                StatusUpdate {
                    status: None,
                    payment_status: Some(PaymentStatus::Completed),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, RequestStatus::Rejected);
        assert_eq!(updated.payment_status, PaymentStatus::Completed);
        let pet = f.repos.pets.get(f.pet.id).await.unwrap().unwrap();
        assert_eq!(pet.adoption_status, AdoptionStatus::Adopted);
    }

    #[tokio::test]
    async fn test_update_unknown_request() {
        let f = fixture().await;
        let service = AdoptionService::new(&f.repos);
        let err = service
            .update_status(AdoptionRequestId::generate(), StatusUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_all_joins_pet_and_user() {
        let f = fixture().await;
        let service = AdoptionService::new(&f.repos);
        service
            .submit(f.user.id, form(&f.pet.id.to_string()))
            .await
            .unwrap();

        let all = service.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        let joined = &all[0];
        assert_eq!(joined.pet_id.as_ref().unwrap().name, "Biscuit");
        assert_eq!(joined.pet_id.as_ref().unwrap().adoption_fee, Fee::from_major(250));
        assert_eq!(joined.user_id.as_ref().unwrap().email.as_str(), "uma@example.com");
    }

    #[test]
    fn test_status_form_parsing() {
        let update = StatusUpdateForm {
            status: Some("approved".to_owned()),
            payment_status: Some(String::new()),
        }
        .parse()
        .unwrap();
        assert_eq!(update.status, Some(RequestStatus::Approved));
        assert_eq!(update.payment_status, None);

        let err = StatusUpdateForm {
            status: None,
            payment_status: Some("refunded".to_owned()),
        }
        .parse()
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
