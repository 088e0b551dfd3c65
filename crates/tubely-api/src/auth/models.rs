use uuid::Uuid;

/// The user an access token was issued for.
///
/// Used as a handler argument; extraction fails with 401 when the request
/// carries no valid bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}
