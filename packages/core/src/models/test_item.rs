//! Quiz Tests (choice and action)
//!
//! The backend keeps choice tests and action tests in two separate
//! collections that share one body shape. Nothing inside the body says which
//! collection it came from, so:
//!
//! - single reads and all writes use an externally tagged envelope
//!   (`{ "ChoiceTest": {..} }` / `{ "ActionTest": {..} }`), modelled by [`Test`];
//! - "get all" returns `{ tests, tests_with_actions }` ([`AllTests`]) and the
//!   client tags each item by its origin collection ([`TaggedTest`]).
//!
//! [`TestDraft`] is the editor used by the create/edit test pages: an ordered
//! option list plus the correct answer.

use crate::models::{ObjectId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Test variant, also the `{type}` path segment of test endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Choice,
    Action,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Choice => "choice",
            TestKind::Action => "action",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "choice" => Ok(TestKind::Choice),
            "action" => Ok(TestKind::Action),
            other => Err(ValidationError::InvalidNodeKind(other.to_string())),
        }
    }
}

/// Fields shared by both test variants
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestBody {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub theme: String,
    pub question: String,
    pub answers: Vec<String>,
    /// The correct answer; for action tests, the final action
    pub answer: String,
    pub level: u32,
}

/// Externally tagged test envelope used by single reads and writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Test {
    ChoiceTest(TestBody),
    ActionTest(TestBody),
}

impl Test {
    pub fn new(kind: TestKind, body: TestBody) -> Self {
        match kind {
            TestKind::Choice => Test::ChoiceTest(body),
            TestKind::Action => Test::ActionTest(body),
        }
    }

    pub fn kind(&self) -> TestKind {
        match self {
            Test::ChoiceTest(_) => TestKind::Choice,
            Test::ActionTest(_) => TestKind::Action,
        }
    }

    pub fn body(&self) -> &TestBody {
        match self {
            Test::ChoiceTest(body) | Test::ActionTest(body) => body,
        }
    }

    pub fn into_body(self) -> TestBody {
        match self {
            Test::ChoiceTest(body) | Test::ActionTest(body) => body,
        }
    }
}

/// Response of `GET /admin/get/tests/all`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllTests {
    #[serde(default)]
    pub tests: Vec<TestBody>,
    #[serde(default)]
    pub tests_with_actions: Vec<TestBody>,
}

impl AllTests {
    /// Tag every test with the kind implied by its collection
    pub fn into_tagged(self) -> Vec<TaggedTest> {
        let choice = self.tests.into_iter().map(|body| TaggedTest {
            kind: TestKind::Choice,
            body,
        });
        let action = self.tests_with_actions.into_iter().map(|body| TaggedTest {
            kind: TestKind::Action,
            body,
        });
        choice.chain(action).collect()
    }
}

/// A test body together with the kind of the collection it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedTest {
    pub kind: TestKind,
    pub body: TestBody,
}

impl TaggedTest {
    pub fn id(&self) -> Option<&ObjectId> {
        self.body.id.as_ref()
    }
}

/// One answer option in the test editor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestOption {
    pub text: String,
    /// Only meaningful for choice tests
    pub is_correct: bool,
}

/// Editable test, as on the create/edit test pages.
///
/// For choice tests exactly one option must be marked correct. For action
/// tests the correct answer is the last option (the final action in the
/// sequence), so no option is marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDraft {
    kind: TestKind,
    pub id: Option<ObjectId>,
    pub theme: String,
    pub question: String,
    pub level: u32,
    options: Vec<TestOption>,
}

impl TestDraft {
    pub fn new(kind: TestKind) -> Self {
        Self {
            kind,
            id: None,
            theme: String::new(),
            question: String::new(),
            level: 0,
            options: Vec::new(),
        }
    }

    /// Load an existing test into the editor
    pub fn from_test(test: Test) -> Self {
        let kind = test.kind();
        let body = test.into_body();
        let correct = match kind {
            TestKind::Choice => body.answers.iter().position(|a| *a == body.answer),
            TestKind::Action => None,
        };
        let options = body
            .answers
            .into_iter()
            .enumerate()
            .map(|(i, text)| TestOption {
                is_correct: Some(i) == correct,
                text,
            })
            .collect();
        Self {
            kind,
            id: body.id,
            theme: body.theme,
            question: body.question,
            level: body.level,
            options,
        }
    }

    pub fn kind(&self) -> TestKind {
        self.kind
    }

    /// Switching the variant clears the option list
    pub fn set_kind(&mut self, kind: TestKind) {
        if self.kind != kind {
            self.kind = kind;
            self.options.clear();
        }
    }

    pub fn options(&self) -> &[TestOption] {
        &self.options
    }

    pub fn add_option(&mut self, text: impl Into<String>) -> usize {
        self.options.push(TestOption {
            text: text.into(),
            is_correct: false,
        });
        self.options.len() - 1
    }

    pub fn edit_option(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.options.get_mut(index) {
            Some(option) => {
                option.text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_option(&mut self, index: usize) -> Option<TestOption> {
        (index < self.options.len()).then(|| self.options.remove(index))
    }

    /// Mark `index` as the only correct option (choice tests)
    pub fn mark_correct(&mut self, index: usize) -> bool {
        if self.kind != TestKind::Choice || index >= self.options.len() {
            return false;
        }
        for (i, option) in self.options.iter_mut().enumerate() {
            option.is_correct = i == index;
        }
        true
    }

    /// Validate and produce the tagged envelope sent to the backend
    pub fn build(&self) -> Result<Test, ValidationError> {
        if self.question.trim().is_empty() {
            return Err(ValidationError::MissingField("question".to_string()));
        }
        if self.options.is_empty() {
            return Err(ValidationError::MissingField("answers".to_string()));
        }
        if let Some(blank) = self.options.iter().position(|o| o.text.trim().is_empty()) {
            return Err(ValidationError::InvalidTest(format!(
                "option {} is empty",
                blank
            )));
        }

        let answer = match self.kind {
            TestKind::Choice => {
                let mut correct = self.options.iter().filter(|o| o.is_correct);
                match (correct.next(), correct.next()) {
                    (Some(option), None) => option.text.clone(),
                    (None, _) => {
                        return Err(ValidationError::InvalidTest(
                            "choice test has no correct option".to_string(),
                        ))
                    }
                    (Some(_), Some(_)) => {
                        return Err(ValidationError::InvalidTest(
                            "choice test has more than one correct option".to_string(),
                        ))
                    }
                }
            }
            // validated non-empty above
            TestKind::Action => self
                .options
                .last()
                .map(|o| o.text.clone())
                .unwrap_or_default(),
        };

        let body = TestBody {
            id: None,
            theme: self.theme.clone(),
            question: self.question.clone(),
            answers: self.options.iter().map(|o| o.text.clone()).collect(),
            answer,
            level: self.level,
        };
        Ok(Test::new(self.kind, body))
    }
}

#[cfg(test)]
#[path = "test_item_test.rs"]
mod test_item_test;
