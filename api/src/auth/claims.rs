use serde::{Deserialize, Serialize};

/// JWT payload: `sub` is the user id, `exp` a unix timestamp.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

/// The authenticated requester, extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
