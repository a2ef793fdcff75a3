use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    /// bcrypt hash; never leaves the server.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub favorite_movies: Vec<Uuid>,
}

/// Fields written by registration and profile updates. `password` is already hashed.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

impl UserChanges {
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            name: self.name,
            password: self.password,
            email: self.email,
            birthday: self.birthday,
            favorite_movies: Vec::new(),
        }
    }

    /// `$set` semantics: everything is replaced except an absent birthday.
    pub fn apply_to(self, user: &mut User) {
        user.name = self.name;
        user.password = self.password;
        user.email = self.email;
        if self.birthday.is_some() {
            user.birthday = self.birthday;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let user = UserChanges {
            name: "alice".to_string(),
            password: "$2b$04$hash".to_string(),
            email: "alice@example.com".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
        }
        .into_user(Uuid::new_v4());

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("Password").is_none());
        assert_eq!(value["Name"], "alice");
        assert_eq!(value["Birthday"], "1990-05-17");
        assert_eq!(value["FavoriteMovies"], serde_json::json!([]));
    }

    #[test]
    fn update_keeps_birthday_when_absent() {
        let mut user = UserChanges {
            name: "alice".to_string(),
            password: "old".to_string(),
            email: "alice@example.com".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
        }
        .into_user(Uuid::new_v4());

        UserChanges {
            name: "alice2".to_string(),
            password: "new".to_string(),
            email: "a2@example.com".to_string(),
            birthday: None,
        }
        .apply_to(&mut user);

        assert_eq!(user.name, "alice2");
        assert_eq!(user.password, "new");
        assert_eq!(user.birthday, NaiveDate::from_ymd_opt(1990, 5, 17));
    }
}
