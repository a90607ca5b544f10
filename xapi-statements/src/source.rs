use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// A course the load tool can emit events for.
pub trait Course {
    fn course_url(&self) -> &str;
    fn org(&self) -> &str;
    fn problem_id(&self) -> String;
    fn random_emission_time(&self) -> DateTime<Utc>;
}

/// Supplies actors and courses to the generators.
pub trait LoadContext {
    type Course: Course;

    fn actor(&mut self) -> String;
    fn course(&mut self) -> &Self::Course;
}

/// Values pulled from a `LoadContext` for a single event.
#[derive(Clone, Debug, PartialEq)]
pub struct EventInputs {
    pub actor_id: String,
    pub course_url: String,
    pub org: String,
    pub problem_id: String,
    pub emission_time: DateTime<Utc>,
}

impl EventInputs {
    pub fn gather<C: LoadContext>(ctx: &mut C) -> Result<Self> {
        let actor_id = ctx.actor();
        let course = ctx.course();
        let problem_id = course.problem_id();
        let emission_time = course.random_emission_time();

        let inputs = EventInputs {
            actor_id,
            course_url: course.course_url().to_string(),
            org: course.org().to_string(),
            problem_id,
            emission_time,
        };
        require_non_empty(&[
            ("actor id", inputs.actor_id.as_str()),
            ("course url", inputs.course_url.as_str()),
            ("org", inputs.org.as_str()),
            ("problem id", inputs.problem_id.as_str()),
        ])?;

        Ok(inputs)
    }
}

/// Values for events about the course itself, with no problem involved.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseInputs {
    pub actor_id: String,
    pub course_url: String,
    pub org: String,
    pub emission_time: DateTime<Utc>,
}

impl CourseInputs {
    pub fn gather<C: LoadContext>(ctx: &mut C) -> Result<Self> {
        let actor_id = ctx.actor();
        let course = ctx.course();

        let inputs = CourseInputs {
            actor_id,
            course_url: course.course_url().to_string(),
            org: course.org().to_string(),
            emission_time: course.random_emission_time(),
        };
        require_non_empty(&[
            ("actor id", inputs.actor_id.as_str()),
            ("course url", inputs.course_url.as_str()),
            ("org", inputs.org.as_str()),
        ])?;

        Ok(inputs)
    }
}

fn require_non_empty(fields: &[(&str, &str)]) -> Result<()> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(Error::InvalidInput(format!("{name} must not be empty")));
        }
    }
    Ok(())
}
