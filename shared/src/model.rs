//! Records exchanged with the record store.
//!
//! Every record serializes with camelCase keys so payloads line up with the
//! collections the store serves (`firstName`, `userId`, `createdAt`, ...).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned by the record store. The client never mints one.
pub type RecordId = Uuid;

pub const DEFAULT_MAJOR: &str = "Undeclared";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| UnknownVariant(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Academic,
    Personal,
    Work,
    Extracurricular,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Academic,
        Category::Personal,
        Category::Work,
        Category::Extracurricular,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Academic => "academic",
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Extracurricular => "extracurricular",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownVariant(value.to_string()))
    }
}

/// Returned when a select value does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant `{0}`")]
pub struct UnknownVariant(pub String);

/// A task as stored by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    /// `None` for anonymous sample tasks.
    #[serde(default)]
    pub user_id: Option<RecordId>,
    pub title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "optional_date")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub completed: bool,
    /// Records written without a timestamp read as created now.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Full-replacement body carrying every field except the id.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            user_id: self.user_id,
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            deadline: self.deadline,
            category: self.category,
            completed: self.completed,
            created_at: self.created_at,
        }
    }

    pub fn matches_search(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle_lowercase))
    }
}

/// Task body for create and full-replace update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub user_id: Option<RecordId>,
    pub title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(default, with = "optional_date")]
    pub deadline: Option<NaiveDate>,
    pub category: Category,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Password-free view of a user, the only shape the client keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub university: String,
    #[serde(default = "default_major")]
    pub major: String,
    #[serde(default)]
    pub username: String,
    pub join_date: DateTime<Utc>,
}

/// User as stored, password included.
///
/// Passwords are stored and matched in plaintext by the record store. This
/// mirrors the demo site as it exists and is not safe for real accounts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub profile: User,
    #[serde(default)]
    pub password: String,
}

impl UserRecord {
    /// Drops the password.
    pub fn into_public(self) -> User {
        self.profile
    }
}

/// Signup payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub university: String,
    pub major: String,
    pub username: String,
    pub join_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
}

fn default_major() -> String {
    DEFAULT_MAJOR.to_string()
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

/// `YYYY-MM-DD` dates where an empty string or null means "no date".
mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_reads_empty_deadline_and_description_as_missing() {
        let task: Task = serde_json::from_value(json!({
            "id": "5f0c3f8e-8f44-4b5e-9a57-1c1f4f8f0a01",
            "title": "Read chapter 4",
            "description": "",
            "priority": "low",
            "deadline": "",
            "category": "personal",
            "completed": false,
            "createdAt": "2024-06-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(task.deadline, None);
        assert_eq!(task.description, None);
        assert_eq!(task.user_id, None);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.category, Category::Personal);
    }

    #[test]
    fn task_writes_camel_case_keys_and_plain_dates() {
        let task: Task = serde_json::from_value(json!({
            "id": "5f0c3f8e-8f44-4b5e-9a57-1c1f4f8f0a01",
            "userId": "0b6f9d5c-2d8b-4a8e-b1a4-5b8c2f0e7d11",
            "title": "Lab report",
            "deadline": "2024-06-03",
            "createdAt": "2024-06-01T10:00:00Z"
        }))
        .unwrap();

        let value = serde_json::to_value(task.to_draft()).unwrap();
        assert_eq!(value["deadline"], "2024-06-03");
        assert_eq!(value["userId"], "0b6f9d5c-2d8b-4a8e-b1a4-5b8c2f0e7d11");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["category"], "academic");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn user_record_strips_password() {
        let record: UserRecord = serde_json::from_value(json!({
            "id": "0b6f9d5c-2d8b-4a8e-b1a4-5b8c2f0e7d11",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@uni.edu",
            "password": "secret1",
            "university": "State",
            "username": "ada",
            "joinDate": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(record.password, "secret1");
        let user = record.into_public();
        assert_eq!(user.major, DEFAULT_MAJOR);
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
    }

    #[test]
    fn priority_orders_high_before_low() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
    }
}
