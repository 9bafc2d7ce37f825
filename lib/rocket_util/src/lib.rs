use rocket::figment::{providers::Env, Figment};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;

pub const SESSION_HEADER: &str = "X-Session-Id";

const MAX_SESSION_KEY_LEN: usize = 64;

/// Identifies the keypad session a request operates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(pub String);

#[derive(Debug)]
pub enum SessionKeyError {
    Missing,
    Invalid,
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_SESSION_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionKey {
    type Error = SessionKeyError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match request.headers().get_one(SESSION_HEADER) {
            Some(key) if is_valid_key(key) => Outcome::Success(SessionKey(key.to_string())),
            Some(_) => Outcome::Error((Status::BadRequest, SessionKeyError::Invalid)),
            None => Outcome::Error((Status::BadRequest, SessionKeyError::Missing)),
        }
    }
}

/// Rocket's configuration overlaid with `APP_` environment variables, where
/// the first `_` after the prefix separates the section, e.g.
/// `APP_DAO_ENDPOINT` sets `dao.endpoint`.
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::prefixed("APP_").map(|s| s.as_str().replacen('_', ".", 1).into()))
}
