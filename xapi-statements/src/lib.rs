//! Fake xAPI Statement Generators
//!
//! ## Current API
//!
//! - Problem check statements (browser attempt, server evaluation)
//! - Problem hint statements (show hint, show answer)
//! - Hint and answer sub-activity statements
//! - Course registration statements (registered, unregistered)
//!
pub mod error;
pub mod hint;
pub mod hint_answer;
pub mod problem;
pub mod record;
pub mod registration;
pub mod source;
pub mod statement;

pub use error::{Error, Result};
pub use record::EventRecord;
pub use source::{Course, CourseInputs, EventInputs, LoadContext};
