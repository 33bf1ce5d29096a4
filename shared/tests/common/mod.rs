#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use tracker_shared::{
    ApiGateway, Category, MemoryStorage, MemoryStore, Priority, Session, Task, User,
};
use uuid::Uuid;

pub fn gateway() -> (ApiGateway<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    (ApiGateway::new(store.clone()), store)
}

pub fn user(first_name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: "Student".to_string(),
        email: format!("{}@uni.edu", first_name.to_lowercase()),
        university: "State University".to_string(),
        major: "Undeclared".to_string(),
        username: first_name.to_lowercase(),
        join_date: Utc::now(),
    }
}

pub fn signed_out() -> Session<MemoryStorage> {
    Session::restore(MemoryStorage::new())
}

pub fn signed_in(first_name: &str) -> Session<MemoryStorage> {
    let mut session = signed_out();
    session.sign_in(user(first_name));
    session
}

pub fn task(title: &str, priority: Priority, deadline: Option<&str>, completed: bool) -> Task {
    Task {
        id: Uuid::new_v4(),
        user_id: None,
        title: title.to_string(),
        description: None,
        priority,
        deadline: deadline.map(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()),
        category: Category::Academic,
        completed,
        created_at: Utc::now(),
    }
}
