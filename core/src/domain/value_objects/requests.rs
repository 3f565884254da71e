//! Request payloads accepted by the authentication service.

use serde::{Deserialize, Serialize};

/// Registration request: credentials plus optional profile data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub phone_number: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl RegistrationRequest {
    pub fn new(phone_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
            display_name: None,
        }
    }
}

/// Login request: credentials plus the optional OTP code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
    #[serde(default)]
    pub otp_code: Option<String>,
}

impl LoginRequest {
    pub fn new(phone_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            password: password.into(),
            otp_code: None,
        }
    }

    pub fn with_otp_code(mut self, otp_code: impl Into<String>) -> Self {
        self.otp_code = Some(otp_code.into());
        self
    }
}
