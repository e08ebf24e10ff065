use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::faculty::Faculty;

/// Login name of a faculty member, mapped onto their directory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyAccount {
    pub username: String,
    pub faculty_id: Id<Faculty>,
}

impl FacultyAccount {
    pub fn new<S: AsRef<str>>(username: S, faculty_id: Id<Faculty>) -> Self {
        Self {
            username: normalize_username(username.as_ref()),
            faculty_id,
        }
    }
}

/// Usernames are stored lowercase and compared after trimming.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Body of `POST /faculty/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FacultyLogin {
    pub username: String,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub faculty_id: Option<Id<Faculty>>,
}

impl LoginResponse {
    pub fn faculty(faculty_id: Id<Faculty>) -> Self {
        Self {
            success: true,
            message: "Login successful".to_owned(),
            faculty_id: Some(faculty_id),
        }
    }

    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            message: message.into(),
            faculty_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames_are_normalized() {
        let account = FacultyAccount::new("  JDoe ", Id::new(3));
        assert_eq!(account.username, "jdoe");
        assert_eq!(normalize_username("JDOE"), account.username);
    }
}
