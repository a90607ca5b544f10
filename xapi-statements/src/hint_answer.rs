use tracing::debug;

use crate::{
    error::Result,
    hint::{ASKED_VERB, ASKED_VERB_DISPLAY},
    record::{EventRecord, new_event_id},
    source::{EventInputs, LoadContext},
    statement::{
        Activity, ActivityDefinition, SOLUTION_ACTIVITY_TYPE, SUPPLEMENTAL_INFO_ACTIVITY_TYPE,
        Statement, Verb,
    },
};

/// Hint and answer events addressed to the hint or answer itself rather than the problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintAnswerKind {
    Hint,
    Answer,
}

impl HintAnswerKind {
    pub fn generate<C: LoadContext>(self, ctx: &mut C) -> Result<EventRecord> {
        let event_id = new_event_id();
        let inputs = EventInputs::gather(ctx)?;
        let statement = self.statement(&event_id, &inputs);

        debug!(event = %event_id, kind = ?self, "generated hint/answer");
        EventRecord::new(inputs, &statement)
    }

    pub fn statement(self, event_id: &str, inputs: &EventInputs) -> Statement {
        let object = match self {
            HintAnswerKind::Hint => Activity::new(
                format!("{}/hint/1", inputs.problem_id),
                ActivityDefinition::of_type(SUPPLEMENTAL_INFO_ACTIVITY_TYPE),
            ),
            HintAnswerKind::Answer => Activity::new(
                format!("{}/answer", inputs.problem_id),
                ActivityDefinition::of_type(SOLUTION_ACTIVITY_TYPE),
            ),
        };

        Statement::envelope(
            event_id,
            &inputs.actor_id,
            &inputs.course_url,
            object,
            inputs.emission_time,
            Verb::new(ASKED_VERB, ASKED_VERB_DISPLAY),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tests::bob;

    #[test]
    fn hint_targets_first_hint_of_problem() {
        let record = HintAnswerKind::Hint.generate(&mut bob()).unwrap();
        let statement = record.statement().unwrap();

        assert_eq!(statement.object.id, "block-v1:prob1/hint/1");
        assert_eq!(statement.object.definition._type, SUPPLEMENTAL_INFO_ACTIVITY_TYPE);
        assert_eq!(statement.id, record.event_id);
        assert!(statement.result.is_none());
        // The flat record keeps the problem, not the sub-activity
        assert_eq!(record.problem_id.as_deref(), Some("block-v1:prob1"));
    }

    #[test]
    fn answer_targets_problem_answer() {
        let record = HintAnswerKind::Answer.generate(&mut bob()).unwrap();
        let statement = record.statement().unwrap();

        assert_eq!(statement.object.id, "block-v1:prob1/answer");
        assert_eq!(statement.object.definition._type, SOLUTION_ACTIVITY_TYPE);
        assert_eq!(statement.verb.id, ASKED_VERB);
        assert_eq!(statement.timestamp, "2024-01-01T00:00:00+00:00");
    }
}
