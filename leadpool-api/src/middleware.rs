//! Operator identity extraction.
//!
//! The authentication collaborator in front of this service resolves the
//! session and forwards the operator identity in plain headers. Identity is
//! never read from ambient state: every handler that needs it takes an
//! [`OperatorExtractor`] and threads the [`Operator`] value explicitly into
//! the eligibility resolver and the assignment service.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use leadpool_core::{Operator, Role, SubRole};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the operator's id (UUID).
pub const OPERATOR_ID_HEADER: &str = "x-operator-id";
/// Header carrying the operator's role.
pub const OPERATOR_ROLE_HEADER: &str = "x-operator-role";
/// Header carrying the operator's sub-role; optional.
pub const OPERATOR_SUB_ROLE_HEADER: &str = "x-operator-sub-role";

/// Extracts the [`Operator`] identity from request headers.
#[derive(Debug, Clone)]
pub struct OperatorExtractor(pub Operator);

#[async_trait]
impl<S> FromRequestParts<S> for OperatorExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let operator_id = header_value(parts, OPERATOR_ID_HEADER)?
            .ok_or_else(|| {
                ApiError::unauthorized(format!("Missing {} header", OPERATOR_ID_HEADER))
            })
            .and_then(|raw| {
                Uuid::parse_str(&raw).map_err(|_| {
                    ApiError::unauthorized(format!("{} is not a valid UUID", OPERATOR_ID_HEADER))
                })
            })?;

        let role = header_value(parts, OPERATOR_ROLE_HEADER)?
            .ok_or_else(|| {
                ApiError::unauthorized(format!("Missing {} header", OPERATOR_ROLE_HEADER))
            })
            // Unrecognized roles fold into Role::Other; the eligibility
            // resolver applies its documented fail-open default to them.
            .map(|raw| Role::from_db_str_lenient(&raw))?;

        let sub_role = header_value(parts, OPERATOR_SUB_ROLE_HEADER)?
            .map(|raw| SubRole::from_db_str_lenient(&raw))
            .unwrap_or(SubRole::None);

        Ok(OperatorExtractor(Operator {
            operator_id,
            role,
            sub_role,
        }))
    }
}

impl std::ops::Deref for OperatorExtractor {
    type Target = Operator;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn header_value(parts: &Parts, name: &str) -> Result<Option<String>, ApiError> {
    match parts.headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|s| Some(s.trim().to_string()))
            .map_err(|_| ApiError::unauthorized(format!("{} header is not valid UTF-8", name))),
    }
}
