//! Record types the command line validates documents as.

use std::fmt;

use validated_json::prelude::*;

/// Name used when a document does not provide one.
pub const DEFAULT_NAME: &str = "No name provided";

pub const ROSTER_CAPACITY: usize = 4;

pub const ROLES: [&str; 2] = ["lead", "member"];

/// Which record a document is validated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RecordKind {
    #[default]
    MyData,
    Roster,
}

impl RecordKind {
    pub const NAMES: [&'static str; 2] = ["my-data", "roster"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "my-data" => Some(Self::MyData),
            "roster" => Some(Self::Roster),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MyData => "my-data",
            Self::Roster => "roster",
        }
    }
}

/// Validate `data` as `kind` and render the result.
pub fn render(
    kind: RecordKind,
    data: &JsonData,
    unknown_fields: UnknownFields,
) -> Result<String, ValidationError> {
    match kind {
        RecordKind::MyData => data
            .validate_with_policy::<MyData>(unknown_fields)
            .map(|record| record.to_string()),
        RecordKind::Roster => data
            .validate_with_policy::<Roster>(unknown_fields)
            .map(|record| record.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nested {
    pub age: i64,
}

impl<'doc> ValidateJson<'doc> for Nested {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let age = rec.required::<i64>("age")?.above_min(0)?.into_inner();
        rec.finish()?;
        Ok(Nested { age })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MyData {
    pub name: String,
    pub description: String,
    pub nested: Nested,
    pub values: Vec<i64>,
    /// Path to a file that must exist when given.
    pub attachment: Option<String>,
}

impl<'doc> ValidateJson<'doc> for MyData {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;

        let name = rec.optional_str("name", DEFAULT_NAME)?.into_inner();
        let description = rec
            .required::<String>("description")?
            .non_empty()?
            .into_inner();
        let nested = rec.required::<Nested>("nested")?.into_inner();
        let values = rec.required::<Vec<i64>>("values")?.into_inner();
        let attachment = rec
            .optional_field::<String>("attachment")?
            .map(|path| path.is_existing_file(None))
            .transpose()?
            .map(Checked::into_inner);

        rec.finish()?;

        Ok(MyData {
            name,
            description,
            nested,
            values,
            attachment,
        })
    }
}

impl fmt::Display for MyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self
            .values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "MyData: name = {}, description = {}, age = {}, values = [{}]",
            self.name, self.description, self.nested.age, values
        )?;
        if let Some(attachment) = &self.attachment {
            write!(f, ", attachment = {attachment}")?;
        }
        Ok(())
    }
}

/// One member of a [`Roster`], validated in place into its slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub name: String,
    pub role: String,
    pub active: bool,
}

impl<'doc> ValidateInPlace<'doc> for Entry {
    fn validate_in_place(&mut self, ctx: &ValidationContext<'doc>) -> Result<(), ValidationError> {
        let rec = ctx.validate_record()?;
        rec.required_into("name", &mut self.name)?;
        self.role = rec
            .required::<&str>("role")?
            .member_of(&ROLES)?
            .into_inner()
            .to_string();
        self.active = rec.optional("active", true)?.into_inner();
        rec.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster {
    pub title: String,
    pub entries: FixedBlock<Entry, ROSTER_CAPACITY>,
}

impl<'doc> ValidateJson<'doc> for Roster {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let title = rec.required::<String>("title")?.non_empty()?.into_inner();
        let mut entries = FixedBlock::default();
        rec.fixed_block("count", "entries", &mut entries)?;
        rec.finish()?;
        Ok(Roster { title, entries })
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Roster: {} ({} of {})",
            self.title,
            self.entries.count(),
            ROSTER_CAPACITY
        )?;
        for entry in self.entries.live() {
            write!(f, "\n  {} ({})", entry.name, entry.role)?;
            if !entry.active {
                write!(f, " [inactive]")?;
            }
        }
        Ok(())
    }
}
