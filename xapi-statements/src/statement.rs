use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const XAPI_VERSION: &str = "1.0.3";
pub const ACCOUNT_HOME_PAGE: &str = "http://localhost:18000";
pub const EVENT_VERSION_EXTENSION: &str = "https://github.com/openedx/event-routing-backends/blob/master/docs/xapi-extensions/eventVersion.rst";
pub const EVENT_VERSION: &str = "1.0";

pub const COURSE_ACTIVITY_TYPE: &str = "http://adlnet.gov/expapi/activities/course";
pub const COURSE_DISPLAY_NAME: &str = "Demonstration Course";
pub const INTERACTION_ACTIVITY_TYPE: &str = "http://adlnet.gov/expapi/activities/cmi.interaction";
pub const SUPPLEMENTAL_INFO_ACTIVITY_TYPE: &str =
    "https://w3id.org/xapi/acrossx/extensions/supplemental-info";
pub const SOLUTION_ACTIVITY_TYPE: &str = "http://id.tincanapi.com/activitytype/solution";

/// Language tag -> text, e.g. `{"en-US": "Demonstration Course"}`
pub type LanguageMap = BTreeMap<String, String>;

pub fn language_map(tag: &str, text: &str) -> LanguageMap {
    BTreeMap::from([(tag.to_string(), text.to_string())])
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub id: String,
    pub actor: Actor,
    pub context: Context,
    pub object: Activity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<StatementResult>,
    pub timestamp: String,
    pub verb: Verb,
    pub version: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Actor {
    #[serde(rename = "objectType")]
    pub object_type: String,
    pub account: Account,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(rename = "homePage")]
    pub home_page: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Context {
    #[serde(rename = "contextActivities", skip_serializing_if = "Option::is_none")]
    pub context_activities: Option<ContextActivities>,
    pub extensions: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContextActivities {
    pub parent: Vec<Activity>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "objectType")]
    pub object_type: String,
    pub definition: ActivityDefinition,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivityDefinition {
    #[serde(rename = "type")]
    pub _type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LanguageMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<LanguageMap>,
    #[serde(rename = "interactionType", skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StatementResult {
    pub response: String,
    pub score: Score,
    pub success: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Score {
    pub max: u32,
    pub min: u32,
    pub raw: u32,
    pub scaled: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Verb {
    pub display: LanguageMap,
    pub id: String,
}

impl Verb {
    pub fn new(id: &str, display: &str) -> Self {
        Verb {
            display: language_map("en", display),
            id: id.to_string(),
        }
    }
}

impl Activity {
    pub fn new(id: impl Into<String>, definition: ActivityDefinition) -> Self {
        Activity {
            id: id.into(),
            object_type: "Activity".to_string(),
            definition,
        }
    }

    /// The single parent every statement is scoped to.
    pub fn course(course_url: &str) -> Self {
        Activity::new(
            course_url,
            ActivityDefinition {
                _type: COURSE_ACTIVITY_TYPE.to_string(),
                name: Some(language_map("en-US", COURSE_DISPLAY_NAME)),
                ..Default::default()
            },
        )
    }
}

impl ActivityDefinition {
    pub fn of_type(activity_type: &str) -> Self {
        ActivityDefinition {
            _type: activity_type.to_string(),
            ..Default::default()
        }
    }
}

impl Statement {
    /// Builds the envelope shared by all generators. `result` is left empty.
    pub fn envelope(
        event_id: &str,
        actor_id: &str,
        course_url: &str,
        object: Activity,
        timestamp: DateTime<Utc>,
        verb: Verb,
    ) -> Self {
        Statement {
            id: event_id.to_string(),
            actor: Actor {
                object_type: "Agent".to_string(),
                account: Account {
                    home_page: ACCOUNT_HOME_PAGE.to_string(),
                    name: actor_id.to_string(),
                },
            },
            context: Context {
                context_activities: Some(ContextActivities {
                    parent: vec![Activity::course(course_url)],
                }),
                extensions: event_version_extensions(),
            },
            object,
            result: None,
            timestamp: format_timestamp(timestamp),
            verb,
            version: XAPI_VERSION.to_string(),
        }
    }

    /// Context with the event version only and no parent activities.
    pub fn without_parent(mut self) -> Self {
        self.context.context_activities = None;
        self
    }
}

fn event_version_extensions() -> BTreeMap<String, serde_json::Value> {
    BTreeMap::from([(
        EVENT_VERSION_EXTENSION.to_string(),
        serde_json::Value::from(EVENT_VERSION),
    )])
}

/// ISO 8601 with an explicit `+00:00` offset.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn statement() -> Statement {
        Statement::envelope(
            "event-1",
            "bob",
            "course-v1:org+num+run",
            Activity::new("block-v1:prob1", ActivityDefinition::of_type(INTERACTION_ACTIVITY_TYPE)),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Verb::new("http://adlnet.gov/expapi/verbs/attempted", "attempted"),
        )
    }

    #[test]
    fn timestamp_has_utc_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn envelope_has_single_course_parent() {
        let value = serde_json::to_value(statement()).unwrap();
        let parent = value["context"]["contextActivities"]["parent"]
            .as_array()
            .unwrap();

        assert_eq!(parent.len(), 1);
        assert_eq!(parent[0]["id"], "course-v1:org+num+run");
        assert_eq!(parent[0]["definition"]["type"], COURSE_ACTIVITY_TYPE);
        assert_eq!(parent[0]["definition"]["name"]["en-US"], COURSE_DISPLAY_NAME);
        assert_eq!(value["context"]["extensions"][EVENT_VERSION_EXTENSION], "1.0");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let value = serde_json::to_value(statement()).unwrap();
        let object = value["object"].as_object().unwrap();

        assert!(value.get("result").is_none());
        assert_eq!(object["definition"].as_object().unwrap().len(), 1);
        assert_eq!(value["actor"]["objectType"], "Agent");
        assert_eq!(value["actor"]["account"]["homePage"], ACCOUNT_HOME_PAGE);
        assert_eq!(value["verb"]["display"]["en"], "attempted");
        assert_eq!(value["version"], XAPI_VERSION);
    }
}
