use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::common::{FINISHED_ATTRIBUTE, KEY_ATTRIBUTE};

/// One row of the task table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub username: String,
    pub task: String,
    #[serde(rename = "Finished")]
    pub finished: bool,
    pub created_at: String,
}

impl From<Task> for HashMap<String, AttributeValue> {
    fn from(value: Task) -> Self {
        let mut item = HashMap::new();
        item.insert(KEY_ATTRIBUTE.to_string(), AttributeValue::S(value.task_id));
        item.insert("username".to_string(), AttributeValue::S(value.username));
        item.insert("task".to_string(), AttributeValue::S(value.task));
        item.insert(
            FINISHED_ATTRIBUTE.to_string(),
            AttributeValue::Bool(value.finished),
        );
        item.insert("created_at".to_string(), AttributeValue::S(value.created_at));
        item
    }
}

/// A request field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("The request body is missing!")]
    MissingBody,
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("The request body must be a JSON object")]
    NotAnObject,
    #[error("{0} is empty")]
    Empty(&'static str),
    #[error("{0} must be a string")]
    NotAString(&'static str),
    #[error("{0} must be a boolean")]
    NotABoolean(&'static str),
}

/// Validated body of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub username: String,
    pub task: String,
    pub finished: bool,
}

impl NewTask {
    pub fn from_body(body: &[u8]) -> Result<Self, Vec<FieldError>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(vec![FieldError::MissingBody]);
        }
        let object = parse_object(body).map_err(|err| vec![err])?;

        let mut errors = Vec::new();
        let username = required_string(&object, "username", &mut errors);
        let task = required_string(&object, "task", &mut errors);
        let finished = optional_bool(&object, FINISHED_ATTRIBUTE, &mut errors);

        match (username, task, finished) {
            (Some(username), Some(task), Some(finished)) if errors.is_empty() => Ok(Self {
                username,
                task,
                finished,
            }),
            _ => Err(errors),
        }
    }

    /// Stamps a fresh identifier and the creation time onto the fragment.
    pub fn into_task(self, now: DateTime<Utc>) -> Task {
        Task {
            task_id: Uuid::new_v4().simple().to_string(),
            username: self.username,
            task: self.task,
            finished: self.finished,
            created_at: now.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }
}

/// Validated body of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusUpdate {
    pub finished: bool,
}

impl StatusUpdate {
    /// A missing or unparsable body means `Finished = false`; only a present,
    /// non-boolean `Finished` is rejected.
    pub fn from_body(body: &[u8]) -> Result<Self, Vec<FieldError>> {
        let Ok(object) = parse_object(body) else {
            return Ok(Self::default());
        };

        let mut errors = Vec::new();
        match optional_bool(&object, FINISHED_ATTRIBUTE, &mut errors) {
            Some(finished) => Ok(Self { finished }),
            None => Err(errors),
        }
    }
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, FieldError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(FieldError::NotAnObject),
        Err(err) => Err(FieldError::InvalidJson(err.to_string())),
    }
}

fn required_string(
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match object.get(field) {
        Some(Value::String(value)) if !value.is_empty() => Some(value.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            errors.push(FieldError::Empty(field));
            None
        }
        Some(_) => {
            errors.push(FieldError::NotAString(field));
            None
        }
    }
}

fn optional_bool(
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<bool> {
    match object.get(field) {
        None | Some(Value::Null) => Some(false),
        Some(Value::Bool(value)) => Some(*value),
        Some(_) => {
            errors.push(FieldError::NotABoolean(field));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    #[test]
    fn accepts_minimal_body() {
        let task = NewTask::from_body(br#"{"username":"alice","task":"buy milk"}"#).unwrap();

        assert_eq!(task.username, "alice");
        assert_eq!(task.task, "buy milk");
        assert!(!task.finished);
    }

    #[test]
    fn keeps_explicit_finished() {
        let task =
            NewTask::from_body(br#"{"username":"bob","task":"walk","Finished":true}"#).unwrap();
        assert!(task.finished);
    }

    #[rstest]
    #[case(b"", vec![FieldError::MissingBody])]
    #[case(b"  \n", vec![FieldError::MissingBody])]
    #[case(b"[1, 2]", vec![FieldError::NotAnObject])]
    #[case(br#"{"username":"","task":"x"}"#, vec![FieldError::Empty("username")])]
    #[case(br#"{"username":"alice"}"#, vec![FieldError::Empty("task")])]
    #[case(br#"{}"#, vec![FieldError::Empty("username"), FieldError::Empty("task")])]
    #[case(br#"{"username":7,"task":"x"}"#, vec![FieldError::NotAString("username")])]
    #[case(
        br#"{"username":"a","task":"x","Finished":"yes"}"#,
        vec![FieldError::NotABoolean("Finished")]
    )]
    fn rejects_invalid_create_bodies(#[case] body: &[u8], #[case] expected: Vec<FieldError>) {
        assert_eq!(NewTask::from_body(body), Err(expected));
    }

    #[test]
    fn reports_unparsable_json() {
        let errors = NewTask::from_body(b"{not json").unwrap_err();
        assert!(matches!(errors.as_slice(), [FieldError::InvalidJson(_)]));
    }

    #[test]
    fn into_task_stamps_id_and_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let fragment = NewTask {
            username: "alice".into(),
            task: "buy milk".into(),
            finished: false,
        };

        let first = fragment.clone().into_task(now);
        let second = fragment.into_task(now);

        assert_eq!(first.created_at, "2024-03-01T12:30:05+00:00");
        assert_eq!(first.task_id.len(), 32);
        assert!(first.task_id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first.task_id, second.task_id);
    }

    #[rstest]
    #[case(b"", false)]
    #[case(b"garbage", false)]
    #[case(b"{}", false)]
    #[case(br#"{"Finished":null}"#, false)]
    #[case(br#"{"Finished":true}"#, true)]
    #[case(br#"{"Finished":false}"#, false)]
    fn status_update_defaults_to_unfinished(#[case] body: &[u8], #[case] finished: bool) {
        assert_eq!(StatusUpdate::from_body(body), Ok(StatusUpdate { finished }));
    }

    #[test]
    fn status_update_rejects_non_boolean() {
        assert_eq!(
            StatusUpdate::from_body(br#"{"Finished":1}"#),
            Err(vec![FieldError::NotABoolean("Finished")])
        );
    }

    #[test]
    fn task_maps_to_item() {
        let item: HashMap<String, AttributeValue> = Task {
            task_id: "abc".into(),
            username: "alice".into(),
            task: "buy milk".into(),
            finished: true,
            created_at: "2024-03-01T12:30:05+00:00".into(),
        }
        .into();

        assert_eq!(item.get("task_id"), Some(&AttributeValue::S("abc".into())));
        assert_eq!(item.get("Finished"), Some(&AttributeValue::Bool(true)));
        assert_eq!(item.len(), 5);
    }
}
