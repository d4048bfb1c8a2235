use actix_web::http::header;
use actix_web::HttpRequest;

use crate::domain::actor::{ActingUser, Role};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::db::UserRepository;

/// Resolve the request's bearer token to an acting user. Session and role
/// management live upstream; this is the seam where the pipeline receives
/// its explicit actor.
pub async fn authenticate(req: &HttpRequest, users: &UserRepository) -> Result<ActingUser> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("expected a bearer token".to_string()))?
        .trim();

    users
        .find_by_token(token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("unknown token".to_string()))
}

pub fn require_role(actor: &ActingUser, allowed: &[Role]) -> Result<()> {
    if allowed.contains(&actor.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "role {} cannot perform this upload",
            actor.role.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> ActingUser {
        ActingUser {
            id: "u-1".to_string(),
            role,
            display_name: "User".to_string(),
            email: "user@example.edu".to_string(),
            department: None,
            institute_id: None,
        }
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&actor(Role::Faculty), &[Role::Faculty]).is_ok());
        assert!(matches!(
            require_role(&actor(Role::Faculty), &[Role::Institute, Role::Admin]),
            Err(AppError::Forbidden(_))
        ));
    }
}
