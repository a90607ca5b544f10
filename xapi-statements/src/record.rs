use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    source::{CourseInputs, EventInputs},
    statement::Statement,
};

/// Flat row handed to the storage sink, with the statement serialized in `event`.
///
/// `problem_id` is `None` for course-level events such as registrations.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    pub event_id: String,
    pub verb: String,
    pub actor_id: String,
    pub org: String,
    pub problem_id: Option<String>,
    pub course_run_id: String,
    pub emission_time: DateTime<Utc>,
    pub event: String,
}

impl EventRecord {
    pub fn new(inputs: EventInputs, statement: &Statement) -> Result<Self> {
        let event = serde_json::to_string(statement)?;
        let EventInputs {
            actor_id,
            course_url,
            org,
            problem_id,
            emission_time,
        } = inputs;

        Ok(EventRecord {
            event_id: statement.id.clone(),
            verb: statement.verb.id.clone(),
            actor_id,
            org,
            problem_id: Some(problem_id),
            course_run_id: course_url,
            emission_time,
            event,
        })
    }

    pub fn for_course(inputs: CourseInputs, statement: &Statement) -> Result<Self> {
        let event = serde_json::to_string(statement)?;
        let CourseInputs {
            actor_id,
            course_url,
            org,
            emission_time,
        } = inputs;

        Ok(EventRecord {
            event_id: statement.id.clone(),
            verb: statement.verb.id.clone(),
            actor_id,
            org,
            problem_id: None,
            course_run_id: course_url,
            emission_time,
            event,
        })
    }

    pub fn statement(&self) -> Result<Statement> {
        Ok(serde_json::from_str(&self.event)?)
    }
}

/// Fresh statement id.
pub(crate) fn new_event_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
