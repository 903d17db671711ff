use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::security::{self, ActorRole};
use crate::core::state::AppState;

/// Caller identity taken from verified token claims. The session collaborator
/// owns the user directory; ids and roles are trusted as opaque values here.
#[derive(Debug, Clone)]
pub(crate) struct Identity {
    pub(crate) id: String,
    pub(crate) role: ActorRole,
}

pub(crate) struct CurrentUser(pub(crate) Identity);
pub(crate) struct CurrentInstructor(pub(crate) Identity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;

        let claims = security::verify_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized("Invalid authentication credentials"))?;

        Ok(CurrentUser(Identity { id: claims.sub, role: claims.role }))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentInstructor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(identity) = CurrentUser::from_request_parts(parts, state).await?;

        match identity.role {
            ActorRole::Instructor | ActorRole::Admin => Ok(CurrentInstructor(identity)),
            ActorRole::Student => Err(ApiError::Forbidden("Instructor access required")),
        }
    }
}

/// Students may read their own records; anything else needs instructor rights.
pub(crate) fn require_instructor_or_self(
    identity: &Identity,
    student_id: &str,
) -> Result<(), ApiError> {
    match identity.role {
        ActorRole::Instructor | ActorRole::Admin => Ok(()),
        ActorRole::Student if identity.id == student_id => Ok(()),
        ActorRole::Student => Err(ApiError::Forbidden("Not enough permissions for this record")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn students_can_only_read_their_own_records() {
        let student = Identity { id: "student-1".to_string(), role: ActorRole::Student };
        assert!(require_instructor_or_self(&student, "student-1").is_ok());
        assert!(require_instructor_or_self(&student, "student-2").is_err());

        let instructor = Identity { id: "instructor-1".to_string(), role: ActorRole::Instructor };
        assert!(require_instructor_or_self(&instructor, "student-2").is_ok());
    }
}
