//! HTTP client for the activities service.
//!
//! The service exposes three endpoints: `GET /activities` for the roster,
//! and `POST`/`DELETE /activities/{name}/signup` for signup and removal.
//! Activity names appear verbatim in the URL path, so every segment is
//! percent-encoded when the request URL is built.

use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::activities::types::{Activity, ActivityRecord};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{ActivityName, Email};

/// Client for the school activities service.
#[derive(Clone)]
pub struct ActivitiesClient {
    base_url: Url,
    client: Client,
}

impl ActivitiesClient {
    /// Create a new activities client from config
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::config(
                format!("Invalid activities service URL '{}': {}", config.base_url, e),
                "Set ACTIVITIES_BASE_URL to a full http(s) URL",
            )
        })?;

        Ok(Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
        })
    }

    /// Build a URL under the service base, percent-encoding each path segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                Error::config(
                    "Activities service URL cannot hold a path",
                    "Use a full http(s) URL for ACTIVITIES_BASE_URL",
                )
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Fetch the full activities roster, sorted by name
    pub async fn fetch_activities(&self) -> Result<Vec<Activity>> {
        let url = self.endpoint(&["activities"])?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to /activities failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::service_status(
                format!("Request to /activities returned {}", status),
                status.as_u16(),
            ));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON from /activities: {}", e)))?;

        parse_activities(json)
    }

    /// Sign a student up for an activity.
    ///
    /// On success, returns the service's confirmation message. On a rejected
    /// request, the error carries the service's `detail` text so the caller
    /// can surface it directly.
    pub async fn sign_up(&self, activity: &ActivityName, email: &Email) -> Result<String> {
        let (status, body) = self.send_signup(Method::POST, activity, email).await?;

        if status.is_success() {
            Ok(extract_message(&body)
                .unwrap_or_else(|| format!("Signed up {} for {}", email, activity)))
        } else {
            Err(Error::service_status(
                extract_detail(&body).unwrap_or_else(|| "An error occurred".to_string()),
                status.as_u16(),
            ))
        }
    }

    /// Remove a participant from an activity's roster
    pub async fn unregister(&self, activity: &ActivityName, email: &Email) -> Result<String> {
        let (status, body) = self.send_signup(Method::DELETE, activity, email).await?;

        if status.is_success() {
            Ok(extract_message(&body).unwrap_or_else(|| "Participant removed".to_string()))
        } else {
            Err(Error::service_status(
                extract_detail(&body).unwrap_or_else(|| "Failed to remove participant".to_string()),
                status.as_u16(),
            ))
        }
    }

    /// Shared POST/DELETE path for the signup endpoint
    async fn send_signup(
        &self,
        method: Method,
        activity: &ActivityName,
        email: &Email,
    ) -> Result<(StatusCode, Value)> {
        let url = self.endpoint(&["activities", activity.as_str(), "signup"])?;
        let resp = self
            .client
            .request(method, url)
            .query(&[("email", email.as_str())])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Signup request for {} failed: {}", activity, e)))?;

        let status = resp.status();
        let body = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Non-JSON body from signup endpoint ({}): {}", status, e);
                Value::Null
            }
        };

        Ok((status, body))
    }
}

/// Parse the roster object returned by `GET /activities`.
///
/// The service keys activities by name; collecting through a `BTreeMap`
/// yields a deterministic alphabetical order regardless of how the service
/// happened to serialize its map.
pub(crate) fn parse_activities(json: Value) -> Result<Vec<Activity>> {
    let records: BTreeMap<String, ActivityRecord> = serde_json::from_value(json)
        .map_err(|e| Error::parse(format!("Unexpected activities payload: {}", e)))?;

    Ok(records
        .into_iter()
        .map(|(name, record)| record.into_activity(name))
        .collect())
}

/// Pull the confirmation message out of a success body
pub(crate) fn extract_message(body: &Value) -> Option<String> {
    body.get("message").and_then(Value::as_str).map(String::from)
}

/// Pull the error detail out of a failure body
pub(crate) fn extract_detail(body: &Value) -> Option<String> {
    body.get("detail").and_then(Value::as_str).map(String::from)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    fn client() -> ActivitiesClient {
        ActivitiesClient::new(&Config::default()).unwrap()
    }

    #[test]
    fn endpoint_percent_encodes_activity_names() {
        let url = client()
            .endpoint(&["activities", "Chess Club", "signup"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/activities/Chess%20Club/signup"
        );
    }

    #[test]
    fn endpoint_joins_under_an_existing_base_path() {
        let mut config = Config::default();
        config.base_url = "http://localhost:8000/api".to_string();
        let url = ActivitiesClient::new(&config)
            .unwrap()
            .endpoint(&["activities"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/activities");
    }

    #[test]
    fn new_rejects_unparseable_base_urls() {
        let mut config = Config::default();
        config.base_url = "not a url".to_string();
        assert!(matches!(
            ActivitiesClient::new(&config),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn parse_activities_reads_the_roster_object() {
        let json = json!({
            "Chess Club": {
                "description": "Learn strategies and compete in tournaments",
                "schedule": "Fridays, 3:30 PM - 5:00 PM",
                "max_participants": 12,
                "participants": ["michael@mergington.edu", "daniel@mergington.edu"]
            },
            "Programming Class": {
                "description": "Learn programming fundamentals",
                "schedule": "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                "max_participants": 20,
                "participants": ["emma@mergington.edu"]
            }
        });

        let activities = parse_activities(json).unwrap();
        assert_eq!(activities.len(), 2);

        let chess = &activities[0];
        assert_eq!(chess.name.as_str(), "Chess Club");
        assert_eq!(chess.schedule, "Fridays, 3:30 PM - 5:00 PM");
        assert_eq!(chess.max_participants, 12);
        assert_eq!(chess.participants.len(), 2);
        assert_eq!(chess.spots_left(), 10);

        assert_eq!(activities[1].name.as_str(), "Programming Class");
        assert_eq!(activities[1].spots_left(), 19);
    }

    #[test]
    fn parse_activities_orders_alphabetically() {
        let json = json!({
            "Gym Class": { "max_participants": 30, "participants": [] },
            "Art Studio": { "max_participants": 10, "participants": [] },
            "Chess Club": { "max_participants": 12, "participants": [] }
        });

        let names: Vec<String> = parse_activities(json)
            .unwrap()
            .into_iter()
            .map(|a| a.name.0)
            .collect();
        assert_eq!(names, ["Art Studio", "Chess Club", "Gym Class"]);
    }

    #[test]
    fn parse_activities_defaults_missing_fields() {
        let json = json!({ "Drama Club": {} });

        let activities = parse_activities(json).unwrap();
        assert_eq!(activities[0].description, "");
        assert_eq!(activities[0].schedule, "");
        assert_eq!(activities[0].max_participants, 0);
        assert!(activities[0].participants.is_empty());
        assert!(activities[0].is_full());
    }

    #[test]
    fn parse_activities_rejects_non_object_payloads() {
        assert!(matches!(
            parse_activities(json!(["Chess Club"])),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn extract_message_and_detail_read_their_keys() {
        let ok = json!({ "message": "Signed up emma@mergington.edu for Chess Club" });
        assert_eq!(
            extract_message(&ok).as_deref(),
            Some("Signed up emma@mergington.edu for Chess Club")
        );
        assert!(extract_detail(&ok).is_none());

        let err = json!({ "detail": "Student is already signed up" });
        assert_eq!(extract_detail(&err).as_deref(), Some("Student is already signed up"));
        assert!(extract_message(&err).is_none());

        assert!(extract_message(&Value::Null).is_none());
        assert!(extract_detail(&Value::Null).is_none());
    }
}
