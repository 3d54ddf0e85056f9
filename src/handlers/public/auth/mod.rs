// handlers/public/auth/mod.rs - Account creation and token acquisition

use serde_json::{Map, Value};

use crate::error::{codes, ApiError};
use crate::handlers::json_object;

pub mod signin; // POST /api/v1/SignIn - verify credentials and get a token
pub mod signup; // POST /api/v1/SignUp - create an account

pub use signin::signin;
pub use signup::signup;

/// `{"name": ..., "password": ...}` body shared by both endpoints
#[derive(Debug)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl Credentials {
    /// Both fields must be present and be strings, otherwise 400/1001
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let map = json_object(body).ok_or_else(malformed)?;
        Ok(Self {
            name: string_field(&map, "name")?,
            password: string_field(&map, "password")?,
        })
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Result<String, ApiError> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(malformed)
}

fn malformed() -> ApiError {
    ApiError::bad_request(codes::MALFORMED_AUTH_REQUEST, "Malformed request")
}
