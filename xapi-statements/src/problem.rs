use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    error::Result,
    record::{EventRecord, new_event_id},
    source::{EventInputs, LoadContext},
    statement::{
        Activity, ActivityDefinition, INTERACTION_ACTIVITY_TYPE, Score, Statement,
        StatementResult, Verb, language_map,
    },
};

pub const ATTEMPT_ID_EXTENSION: &str = "http://id.tincanapi.com/extension/attempt-id";
pub const PLACEHOLDER_DESCRIPTION: &str =
    "Add the question text, or prompt, here. This text is required.";
pub const PLACEHOLDER_RESPONSE: &str = "A correct answer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckKind {
    /// Learner submitted an attempt from the browser
    Browser,
    /// Server evaluated the attempt
    Server,
}

/// Fixed parameters of a problem check event variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProblemCheck {
    pub verb: &'static str,
    pub verb_display: &'static str,
    pub kind: CheckKind,
}

pub const BROWSER_PROBLEM_CHECK: ProblemCheck = ProblemCheck {
    verb: "http://adlnet.gov/expapi/verbs/attempted",
    verb_display: "attempted",
    kind: CheckKind::Browser,
};

pub const SERVER_PROBLEM_CHECK: ProblemCheck = ProblemCheck {
    verb: "http://adlnet.gov/expapi/verbs/evaluated",
    verb_display: "evaluated",
    kind: CheckKind::Server,
};

impl ProblemCheck {
    pub fn generate<C: LoadContext>(&self, ctx: &mut C) -> Result<EventRecord> {
        let event_id = new_event_id();
        let inputs = EventInputs::gather(ctx)?;
        let statement = self.statement(&event_id, &inputs);

        debug!(event = %event_id, kind = ?self.kind, "generated problem check");
        EventRecord::new(inputs, &statement)
    }

    pub fn statement(&self, event_id: &str, inputs: &EventInputs) -> Statement {
        let (object, result) = match self.kind {
            CheckKind::Browser => (
                Activity::new(
                    &inputs.problem_id,
                    ActivityDefinition::of_type(INTERACTION_ACTIVITY_TYPE),
                ),
                None,
            ),
            CheckKind::Server => (server_object(&inputs.problem_id), Some(server_result())),
        };

        let mut statement = Statement::envelope(
            event_id,
            &inputs.actor_id,
            &inputs.course_url,
            object,
            inputs.emission_time,
            Verb::new(self.verb, self.verb_display),
        );
        statement.result = result;
        statement
    }
}

/// Server-side check object. All values are fixed placeholders.
fn server_object(problem_id: &str) -> Activity {
    Activity::new(
        problem_id,
        ActivityDefinition {
            _type: INTERACTION_ACTIVITY_TYPE.to_string(),
            description: Some(language_map("en-US", PLACEHOLDER_DESCRIPTION)),
            interaction_type: Some("other".to_string()),
            extensions: Some(BTreeMap::from([(
                ATTEMPT_ID_EXTENSION.to_string(),
                serde_json::Value::from(10),
            )])),
            ..Default::default()
        },
    )
}

fn server_result() -> StatementResult {
    StatementResult {
        response: PLACEHOLDER_RESPONSE.to_string(),
        score: Score {
            max: 1,
            min: 0,
            raw: 0,
            scaled: 0,
        },
        success: false,
    }
}
