use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::Result,
    record::{EventRecord, new_event_id},
    source::{CourseInputs, LoadContext},
    statement::{
        Activity, ActivityDefinition, COURSE_ACTIVITY_TYPE, COURSE_DISPLAY_NAME, Statement, Verb,
        language_map,
    },
};

pub const ENROLLMENT_MODE_EXTENSION: &str = "https://w3id.org/xapi/acrossx/extensions/type";
pub const AUDIT_MODE: &str = "audit";

/// Enrollment events. The course is the object, so there is no parent activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    pub verb: &'static str,
    pub verb_display: &'static str,
}

pub const REGISTERED: Registration = Registration {
    verb: "http://adlnet.gov/expapi/verbs/registered",
    verb_display: "registered",
};

pub const UNREGISTERED: Registration = Registration {
    verb: "http://id.tincanapi.com/verb/unregistered",
    verb_display: "unregistered",
};

impl Registration {
    pub fn generate<C: LoadContext>(&self, ctx: &mut C) -> Result<EventRecord> {
        let event_id = new_event_id();
        let inputs = CourseInputs::gather(ctx)?;
        let statement = self.statement(&event_id, &inputs);

        debug!(event = %event_id, verb = self.verb_display, "generated registration");
        EventRecord::for_course(inputs, &statement)
    }

    pub fn statement(&self, event_id: &str, inputs: &CourseInputs) -> Statement {
        let object = Activity::new(
            &inputs.course_url,
            ActivityDefinition {
                _type: COURSE_ACTIVITY_TYPE.to_string(),
                name: Some(language_map("en", COURSE_DISPLAY_NAME)),
                extensions: Some(BTreeMap::from([(
                    ENROLLMENT_MODE_EXTENSION.to_string(),
                    serde_json::Value::from(AUDIT_MODE),
                )])),
                ..Default::default()
            },
        );

        Statement::envelope(
            event_id,
            &inputs.actor_id,
            &inputs.course_url,
            object,
            inputs.emission_time,
            Verb::new(self.verb, self.verb_display),
        )
        .without_parent()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        source::tests::bob,
        statement::{EVENT_VERSION_EXTENSION, XAPI_VERSION},
    };

    #[test]
    fn registered_targets_course() {
        let record = REGISTERED.generate(&mut bob()).unwrap();
        let event: Value = serde_json::from_str(&record.event).unwrap();

        assert_eq!(event["id"], record.event_id);
        assert_eq!(event["verb"]["id"], "http://adlnet.gov/expapi/verbs/registered");
        assert_eq!(event["verb"]["display"]["en"], "registered");
        assert_eq!(
            event["object"],
            json!({
                "id": "course-v1:org+num+run",
                "objectType": "Activity",
                "definition": {
                    "type": COURSE_ACTIVITY_TYPE,
                    "name": {"en": "Demonstration Course"},
                    "extensions": {ENROLLMENT_MODE_EXTENSION: "audit"},
                },
            })
        );
        assert_eq!(event["version"], XAPI_VERSION);
        assert_eq!(event["timestamp"], "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn registration_context_has_no_parent() {
        let record = UNREGISTERED.generate(&mut bob()).unwrap();
        let event: Value = serde_json::from_str(&record.event).unwrap();

        assert_eq!(
            event["context"],
            json!({"extensions": {EVENT_VERSION_EXTENSION: "1.0"}})
        );
        assert_eq!(event["verb"]["id"], "http://id.tincanapi.com/verb/unregistered");
        assert!(event.get("result").is_none());
    }

    #[test]
    fn registration_record_has_no_problem() {
        let mut ctx = bob();
        // Problems are never looked up for registrations
        ctx.course.problem_id = String::new();

        let record = REGISTERED.generate(&mut ctx).unwrap();
        assert_eq!(record.problem_id, None);
        assert_eq!(record.course_run_id, "course-v1:org+num+run");
        assert_eq!(record.org, "org");
        assert_eq!(record.actor_id, "bob");

        let row = serde_json::to_value(&record).unwrap();
        assert!(row["problem_id"].is_null());
    }
}
