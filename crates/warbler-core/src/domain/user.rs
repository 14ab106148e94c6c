use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::DomainError;

/// Profile image used when a user signs up without one.
pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";

/// Header image every new profile starts with.
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/warbler-hero.jpg";

/// User entity - an account that posts messages and follows other users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            image_url: image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            header_image_url: DEFAULT_HEADER_IMAGE_URL.to_string(),
            bio: None,
            location: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input to the signup operation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_url: Option<String>,
}

impl NewUser {
    /// Trim fields and reject anything that must never reach the database.
    pub fn validate(self) -> Result<Self, DomainError> {
        let username = validate_username(&self.username)?;
        let email = validate_email(&self.email)?;

        if self.password.is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }

        Ok(Self {
            username,
            email,
            password: self.password,
            image_url: self.image_url,
        })
    }
}

/// Partial profile update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub header_image_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl UpdateProfile {
    /// Apply the update to `user`, validating any changed identity field.
    pub fn apply_to(self, mut user: User) -> Result<User, DomainError> {
        if let Some(username) = self.username {
            user.username = validate_username(&username)?;
        }
        if let Some(email) = self.email {
            user.email = validate_email(&email)?;
        }
        if let Some(image_url) = self.image_url {
            user.image_url = non_empty_or(image_url, DEFAULT_IMAGE_URL);
        }
        if let Some(header_image_url) = self.header_image_url {
            user.header_image_url = non_empty_or(header_image_url, DEFAULT_HEADER_IMAGE_URL);
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio).filter(|b| !b.trim().is_empty());
        }
        if let Some(location) = self.location {
            user.location = Some(location).filter(|l| !l.trim().is_empty());
        }
        user.updated_at = Utc::now();
        Ok(user)
    }
}

fn validate_username(raw: &str) -> Result<String, DomainError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(DomainError::Validation("Username is required".to_string()));
    }
    Ok(username.to_string())
}

fn validate_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_string())
        }
        _ => Err(DomainError::Validation("Invalid email address".to_string())),
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: "pw".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_new_user_uses_default_images() {
        let user = User::new("u1".into(), "u1@test.com".into(), "hash".into(), None);

        assert_eq!(user.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(user.header_image_url, DEFAULT_HEADER_IMAGE_URL);
        assert!(user.bio.is_none());
    }

    #[test]
    fn test_blank_image_falls_back_to_default() {
        let user = User::new(
            "u1".into(),
            "u1@test.com".into(),
            "hash".into(),
            Some("  ".into()),
        );

        assert_eq!(user.image_url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_empty_username_rejected() {
        let result = new_user("", "test@test.com").validate();
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let result = new_user("   ", "test@test.com").validate();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_invalid_email_rejected() {
        for email in ["", "no-at-sign", "@test.com", "user@"] {
            let result = new_user("u1", email).validate();
            assert!(
                matches!(result, Err(DomainError::Validation(_))),
                "accepted {email:?}"
            );
        }
    }

    #[test]
    fn test_validate_trims_identity_fields() {
        let user = new_user("  u1 ", " u1@test.com ").validate().unwrap();
        assert_eq!(user.username, "u1");
        assert_eq!(user.email, "u1@test.com");
    }

    #[test]
    fn test_update_profile_applies_changes() {
        let user = User::new("u1".into(), "u1@test.com".into(), "hash".into(), None);
        let update = UpdateProfile {
            username: Some("renamed".into()),
            bio: Some("hello".into()),
            location: Some("".into()),
            ..Default::default()
        };

        let updated = update.apply_to(user.clone()).unwrap();

        assert_eq!(updated.username, "renamed");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.bio.as_deref(), Some("hello"));
        assert!(updated.location.is_none());
    }

    #[test]
    fn test_update_profile_rejects_empty_username() {
        let user = User::new("u1".into(), "u1@test.com".into(), "hash".into(), None);
        let update = UpdateProfile {
            username: Some(String::new()),
            ..Default::default()
        };

        assert!(matches!(
            update.apply_to(user),
            Err(DomainError::Validation(_))
        ));
    }
}
