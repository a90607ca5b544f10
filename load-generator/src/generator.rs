use anyhow::Context;
use rand::{Rng, seq::IndexedRandom};
use tracing::{debug, instrument};
use xapi_statements::{
    EventRecord, LoadContext,
    hint::{PROBLEM_SHOW_ANSWER, PROBLEM_SHOW_HINT},
    hint_answer::HintAnswerKind,
    problem::{BROWSER_PROBLEM_CHECK, SERVER_PROBLEM_CHECK},
    registration::{REGISTERED, UNREGISTERED},
};

use crate::course::RandomCourse;

pub const KNOWN_ORGS: [&str; 6] = ["openedX", "burritoX", "tacoX", "chipX", "salsaX", "guacX"];

const NEW_ACTOR_ONE_IN: u32 = 1_000;
const NEW_COURSE_ONE_IN: u32 = 10_000;
const MAX_KNOWN: usize = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    BrowserProblemCheck,
    ServerProblemCheck,
    ProblemShowHint,
    ProblemShowAnswer,
    ShowHint,
    ShowAnswer,
    Registered,
    Unregistered,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::BrowserProblemCheck,
        EventKind::ServerProblemCheck,
        EventKind::ProblemShowHint,
        EventKind::ProblemShowAnswer,
        EventKind::ShowHint,
        EventKind::ShowAnswer,
        EventKind::Registered,
        EventKind::Unregistered,
    ];

    /// Relative share of this kind in the generated event mix.
    pub fn weight(self) -> f64 {
        match self {
            EventKind::BrowserProblemCheck => 8.726,
            EventKind::ServerProblemCheck => 8.593,
            EventKind::ProblemShowHint => 0.025,
            EventKind::ProblemShowAnswer => 0.025,
            EventKind::ShowHint => 0.076,
            EventKind::ShowAnswer => 1.373,
            EventKind::Registered => 1.138,
            EventKind::Unregistered => 0.146,
        }
    }

    pub fn generate<C: LoadContext>(self, ctx: &mut C) -> xapi_statements::Result<EventRecord> {
        match self {
            EventKind::BrowserProblemCheck => BROWSER_PROBLEM_CHECK.generate(ctx),
            EventKind::ServerProblemCheck => SERVER_PROBLEM_CHECK.generate(ctx),
            EventKind::ProblemShowHint => PROBLEM_SHOW_HINT.generate(ctx),
            EventKind::ProblemShowAnswer => PROBLEM_SHOW_ANSWER.generate(ctx),
            EventKind::ShowHint => HintAnswerKind::Hint.generate(ctx),
            EventKind::ShowAnswer => HintAnswerKind::Answer.generate(ctx),
            EventKind::Registered => REGISTERED.generate(ctx),
            EventKind::Unregistered => UNREGISTERED.generate(ctx),
        }
    }
}

/// Hands out actors and courses, growing its known pools as it goes.
#[derive(Debug)]
pub struct EventGenerator {
    pub batch_size: usize,
    pub known_actor_uuids: Vec<String>,
    pub known_courses: Vec<RandomCourse>,
}

impl EventGenerator {
    pub fn new(batch_size: usize) -> Self {
        EventGenerator {
            batch_size,
            known_actor_uuids: vec![],
            known_courses: vec![],
        }
    }

    /// `batch_size` records drawn from the weighted event mix.
    #[instrument(skip_all, fields(batch_size = self.batch_size), err(Debug))]
    pub fn batch(&mut self) -> anyhow::Result<Vec<EventRecord>> {
        let mut rng = rand::rng();
        let kinds = (0..self.batch_size)
            .map(|_| {
                EventKind::ALL
                    .choose_weighted(&mut rng, |kind| kind.weight())
                    .copied()
            })
            .collect::<Result<Vec<_>, _>>()
            .context("unable to pick event kinds")?;

        let mut events = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let record = kind
                .generate(self)
                .with_context(|| format!("unable to generate {kind:?} event"))?;
            events.push(record);
        }

        debug!(
            actors = self.known_actor_uuids.len(),
            courses = self.known_courses.len(),
            "batch generated"
        );
        Ok(events)
    }
}

impl LoadContext for EventGenerator {
    type Course = RandomCourse;

    fn actor(&mut self) -> String {
        let i = random_index(
            &mut self.known_actor_uuids,
            || uuid::Uuid::new_v4().to_string(),
            NEW_ACTOR_ONE_IN,
        );
        self.known_actor_uuids[i].clone()
    }

    fn course(&mut self) -> &RandomCourse {
        let i = random_index(
            &mut self.known_courses,
            || {
                let org = KNOWN_ORGS.choose(&mut rand::rng()).unwrap_or(&KNOWN_ORGS[0]);
                debug!(org, "creating course");
                RandomCourse::new(org)
            },
            NEW_COURSE_ONE_IN,
        );
        &self.known_courses[i]
    }
}

/// Index of an existing thing, or of a freshly pushed one roughly once every `one_in` calls.
fn random_index<T>(things: &mut Vec<T>, new_thing: impl FnOnce() -> T, one_in: u32) -> usize {
    let mut rng = rand::rng();
    if (things.is_empty() || rng.random_range(0..one_in) == 0) && things.len() < MAX_KNOWN {
        things.push(new_thing());
        return things.len() - 1;
    }
    rng.random_range(0..things.len())
}
