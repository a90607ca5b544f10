use std::ops::Range;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use rand::{Rng, seq::IndexedRandom};
use xapi_statements::Course;

pub const BASE_URL: &str = "http://localhost:18000";

/// Share of generated courses per size, out of 100.
const COURSE_SIZE_WEIGHTS: [(CourseSize, u32); 4] = [
    (CourseSize::Small, 10),
    (CourseSize::Medium, 50),
    (CourseSize::Large, 30),
    (CourseSize::Whopper, 10),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourseSize {
    Small,
    Medium,
    Large,
    Whopper,
}

impl CourseSize {
    pub fn random() -> Self {
        COURSE_SIZE_WEIGHTS
            .choose_weighted(&mut rand::rng(), |(_, weight)| *weight)
            .map(|(size, _)| *size)
            .unwrap_or(CourseSize::Medium)
    }

    /// How many problems a course of this size holds.
    pub fn problems(self) -> Range<usize> {
        match self {
            CourseSize::Small => 1..10,
            CourseSize::Medium => 10..50,
            CourseSize::Large => 50..200,
            CourseSize::Whopper => 200..1000,
        }
    }
}

/// A fake course run with a fixed set of problems and a start/end window.
#[derive(Clone, Debug)]
pub struct RandomCourse {
    pub course_uuid: String,
    pub org: String,
    pub course_id: String,
    pub course_url: String,
    pub size: CourseSize,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub known_problem_ids: Vec<String>,
}

impl RandomCourse {
    pub fn new(org: &str) -> Self {
        Self::with_size(org, CourseSize::random())
    }

    pub fn with_size(org: &str, size: CourseSize) -> Self {
        let mut rng = rand::rng();
        let course_uuid = uuid::Uuid::new_v4().to_string();
        let course_id = format!("course-v1:{org}+DemoX+{course_uuid}");
        let course_url = format!("{BASE_URL}/course/{course_id}");

        // Course ends at least its own length before now. Whole seconds only.
        let course_length = TimeDelta::days(rng.random_range(90..365));
        let latest_start = Utc::now().trunc_subsecs(0) - course_length;
        let start_date = random_datetime(latest_start - TimeDelta::days(365 * 5), latest_start);
        let end_date = start_date + course_length;

        let known_problem_ids = (0..rng.random_range(size.problems()))
            .map(|_| {
                format!(
                    "{BASE_URL}/xblock/block-v1:{course_id}+type@problem+block@{}",
                    uuid::Uuid::new_v4()
                )
            })
            .collect();

        RandomCourse {
            course_uuid,
            org: org.to_string(),
            course_id,
            course_url,
            size,
            start_date,
            end_date,
            known_problem_ids,
        }
    }
}

impl Course for RandomCourse {
    fn course_url(&self) -> &str {
        &self.course_url
    }

    fn org(&self) -> &str {
        &self.org
    }

    fn problem_id(&self) -> String {
        self.known_problem_ids
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_default()
    }

    fn random_emission_time(&self) -> DateTime<Utc> {
        random_datetime(self.start_date, self.end_date)
    }
}

/// Uniform at second granularity in `[start, end)`. Returns `start` for an empty window.
pub fn random_datetime(start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        return start;
    }
    start + TimeDelta::seconds(rand::rng().random_range(0..seconds))
}
