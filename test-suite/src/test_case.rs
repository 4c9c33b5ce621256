use serde_json::Value;
use validated_json::prelude::*;
use validated_json_cli::records::RecordKind;

/// The document a case validates.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseInput {
    /// An inline JSON value.
    Value(Value),
    /// Raw text, for cases about malformed input.
    Text(String),
}

/// What a case expects validation to produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// The rendered record.
    Output(String),
    /// The error message.
    Error(String),
}

/// A single case file.
///
/// ```json
/// {
///   "description": "missing description is reported",
///   "record": "my-data",
///   "input": { "nested": { "age": 1 }, "values": [] },
///   "expected-error": "Required key \"description\" not found"
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub description: Option<String>,
    pub record: RecordKind,
    pub label: Option<String>,
    pub strict: bool,
    pub input: CaseInput,
    pub expected: Expectation,
}

impl<'doc> ValidateJson<'doc> for TestCase {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;

        let description = rec
            .optional_field::<String>("description")?
            .map(Checked::into_inner);
        let record = rec
            .optional("record", RecordKind::MyData.name())?
            .member_of(&RecordKind::NAMES)?
            .into_inner();
        let label = rec
            .optional_field::<String>("label")?
            .map(|label| label.non_empty())
            .transpose()?
            .map(Checked::into_inner);
        let strict = rec.optional("strict", false)?.into_inner();

        let input = match rec.optional_field::<Value>("input")? {
            Some(value) => CaseInput::Value(value.into_inner()),
            None => CaseInput::Text(rec.required::<String>("input-text")?.into_inner()),
        };
        let expected = match rec.optional_field::<String>("expected-error")? {
            Some(message) => Expectation::Error(message.into_inner()),
            None => Expectation::Output(rec.required::<String>("expected-output")?.into_inner()),
        };

        rec.deny_unknown_fields()?;

        Ok(TestCase {
            name: ctx.label().to_string(),
            description,
            record: RecordKind::from_name(record).unwrap_or_default(),
            label,
            strict,
            input,
            expected,
        })
    }
}

impl TestCase {
    /// Parse a case file. The case is named after `name`.
    pub fn parse(name: &str, content: &str) -> Result<Self, ValidationError> {
        let data = JsonData::parse_str(content)?.with_label(name);
        data.validate_with_policy(UnknownFields::Deny)
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        if self.strict {
            UnknownFields::Deny
        } else {
            UnknownFields::Allow
        }
    }

    /// Build the document under test.
    pub fn document(&self) -> Result<JsonData, ValidationError> {
        let data = match &self.input {
            CaseInput::Value(value) => JsonData::from_value(value.clone()),
            CaseInput::Text(text) => JsonData::parse_str(text)?,
        };
        Ok(match &self.label {
            Some(label) => data.with_label(label.clone()),
            None => data,
        })
    }
}
