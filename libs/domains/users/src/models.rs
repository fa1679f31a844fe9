use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User account status.
///
/// `Unspecified` is the tri-state "not provided" marker: creation payloads
/// carrying it default to `Active` at the repository layer, update payloads
/// carrying it leave the stored status unchanged. Persisted records always
/// hold `Active` or `Inactive`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserStatus {
    #[default]
    Unspecified,
    Active,
    Inactive,
}

impl UserStatus {
    /// Wire/storage form; `None` for `Unspecified`.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            UserStatus::Unspecified => None,
            UserStatus::Active => Some("active"),
            UserStatus::Inactive => Some("inactive"),
        }
    }

    pub fn is_specified(&self) -> bool {
        !matches!(self, UserStatus::Unspecified)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str().unwrap_or(""))
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// User entity - matches the SQL schema
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique identifier, assigned once by the repository at creation
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// E.164-formatted phone number
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub status: UserStatus,
}

impl User {
    /// Apply the present fields of a partial update, leaving the rest as-is.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if update.status.is_specified() {
            self.status = update.status;
        }
    }
}

/// Creation payload; the repository assigns the identifier.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<i32>,
    /// `Unspecified` defaults to `Active` at the repository layer
    pub status: UserStatus,
}

/// Partial-update payload.
///
/// A `None` field (or `Unspecified` status) is absent: the stored value is
/// left unchanged. A present field carries the new value, so `age: Some(0)`
/// really sets the age to zero.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub status: UserStatus,
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(rename = "firstname")]
    #[validate(length(min = 2, max = 50))]
    pub first_name: String,
    #[serde(rename = "lastname")]
    #[validate(length(min = 2, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            age: request.age,
            status: UserStatus::Unspecified,
        }
    }
}

/// DTO for partially updating a user; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, rename = "firstname")]
    #[validate(length(min = 2, max = 50))]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastname")]
    #[validate(length(min = 2, max = 50))]
    pub last_name: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    /// "active" or "inactive"
    #[serde(default)]
    pub status: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UpdateUser {
    type Error = String;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        let status = match request.status.as_deref() {
            Some(s) => s.parse()?,
            None => UserStatus::Unspecified,
        };

        Ok(Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            age: request.age,
            status,
        })
    }
}

/// Transport representation of a user; optional fields are omitted when absent
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            age: user.age,
            status: user.status.as_str().map(str::to_string),
        }
    }
}
