//! Directory bodies and canned responses.

use serde_json::{json, Value};

/// One activity for [`directory_json`].
#[derive(Debug, Clone, Copy)]
pub struct ActivityFixture<'a> {
    /// Activity name.
    pub name: &'a str,
    /// Capacity.
    pub max_participants: u32,
    /// Initial roster.
    pub participants: &'a [&'a str],
}

impl<'a> ActivityFixture<'a> {
    /// Create a fixture.
    pub const fn new(name: &'a str, max_participants: u32, participants: &'a [&'a str]) -> Self {
        Self {
            name,
            max_participants,
            participants,
        }
    }
}

/// JSON body for `GET /activities`, keys in the given order.
pub fn directory_json(activities: &[ActivityFixture<'_>]) -> String {
    let entries: Vec<String> = activities
        .iter()
        .map(|a| {
            let details = json!({
                "description": format!("{} description", a.name),
                "schedule": format!("{} schedule", a.name),
                "max_participants": a.max_participants,
                "participants": a.participants,
            });
            format!("{}:{}", Value::from(a.name), details)
        })
        .collect();
    format!("{{{}}}", entries.join(","))
}

/// A single "Chess Club" with capacity 10 and `a@x.com` signed up.
pub fn chess_club_json() -> String {
    directory_json(&[ActivityFixture::new("Chess Club", 10, &["a@x.com"])])
}

/// The stock school directory.
pub fn school_directory_json() -> String {
    directory_json(&[
        ActivityFixture::new(
            "Chess Club",
            12,
            &["michael@mergington.edu", "daniel@mergington.edu"],
        ),
        ActivityFixture::new(
            "Programming Class",
            20,
            &["emma@mergington.edu", "sophia@mergington.edu"],
        ),
        ActivityFixture::new("Gym Class", 30, &[]),
    ])
}

/// `{"message": text}`.
pub fn message_body(text: &str) -> String {
    json!({ "message": text }).to_string()
}

/// `{"detail": text}`.
pub fn detail_body(text: &str) -> String {
    json!({ "detail": text }).to_string()
}
