use validated_json::prelude::*;

fn message<T>(input: &str) -> String
where
    T: for<'doc> ValidateJson<'doc>,
{
    let data: JsonData = input.parse().unwrap();
    match data.validate::<T>() {
        Ok(_) => panic!("expected validation of {input} to fail"),
        Err(err) => err.to_string(),
    }
}

struct RequiredInt {
    test_int: i32,
}

impl<'doc> ValidateJson<'doc> for RequiredInt {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let test_int = rec.required::<i32>("testInt")?.into_inner();
        rec.finish()?;
        Ok(RequiredInt { test_int })
    }
}

struct OptionalInt {
    test_int: i32,
}

impl<'doc> ValidateJson<'doc> for OptionalInt {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let test_int = rec.optional("testInt", 0)?.into_inner();
        rec.finish()?;
        Ok(OptionalInt { test_int })
    }
}

struct Scalars {
    test_string: String,
    test_bool: bool,
    test_double: f64,
}

impl<'doc> ValidateJson<'doc> for Scalars {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let test_string = rec.required::<String>("testString")?.into_inner();
        let test_bool = rec.required::<bool>("testBool")?.into_inner();
        let test_double = rec.required::<f64>("testDouble")?.into_inner();
        rec.finish()?;
        Ok(Scalars {
            test_string,
            test_bool,
            test_double,
        })
    }
}

struct Nested {
    age: i32,
}

impl<'doc> ValidateJson<'doc> for Nested {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let age = rec.required::<i32>("age")?.into_inner();
        rec.finish()?;
        Ok(Nested { age })
    }
}

struct Outer {
    nested: Nested,
}

impl<'doc> ValidateJson<'doc> for Outer {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let nested = rec.required::<Nested>("nested")?.into_inner();
        rec.finish()?;
        Ok(Outer { nested })
    }
}

struct Values {
    values: Vec<i32>,
}

impl<'doc> ValidateJson<'doc> for Values {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let values = rec.required::<Vec<i32>>("values")?.into_inner();
        rec.finish()?;
        Ok(Values { values })
    }
}

struct AboveMin;

impl<'doc> ValidateJson<'doc> for AboveMin {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let _ = rec.required::<i32>("testInt")?.above_min(10)?;
        Ok(AboveMin)
    }
}

struct BelowMax;

impl<'doc> ValidateJson<'doc> for BelowMax {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let _ = rec.required::<i32>("testInt")?.below_max(10)?;
        Ok(BelowMax)
    }
}

struct WithinRange;

impl<'doc> ValidateJson<'doc> for WithinRange {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let _ = rec.required::<i32>("testInt")?.within_range(10, 20)?;
        Ok(WithinRange)
    }
}

struct MemberOf;

impl<'doc> ValidateJson<'doc> for MemberOf {
    fn validate(ctx: &ValidationContext<'doc>) -> Result<Self, ValidationError> {
        let rec = ctx.validate_record()?;
        let _ = rec.required::<i32>("testValue")?.member_of(&[1, 2, 3])?;
        Ok(MemberOf)
    }
}

fn validate<T>(input: &str) -> Result<T, ValidationError>
where
    T: for<'doc> ValidateJson<'doc>,
{
    let data: JsonData = input.parse()?;
    data.validate()
}

#[test]
fn empty_input_is_a_parse_error() {
    let err = validate::<RequiredInt>("").err().unwrap();
    assert!(matches!(err, ValidationError::Parse(_)));
    assert!(err.to_string().starts_with("JSON parsing error: "));
}

#[test]
fn required_missing() {
    assert_eq!(
        message::<RequiredInt>("{}"),
        "Required key \"testInt\" not found"
    );
}

#[test]
fn required_present() {
    let parsed = validate::<RequiredInt>(r#"{"testInt": 42}"#).unwrap();
    assert_eq!(parsed.test_int, 42);
}

#[test]
fn optional_missing_uses_default() {
    let parsed = validate::<OptionalInt>("{}").unwrap();
    assert_eq!(parsed.test_int, 0);
}

#[test]
fn optional_present_overrides_default() {
    let parsed = validate::<OptionalInt>(r#"{"testInt": 42}"#).unwrap();
    assert_eq!(parsed.test_int, 42);
}

#[test]
fn scalars_are_parsed() {
    let parsed = validate::<Scalars>(
        r#"{"testString": "Hello", "testBool": true, "testDouble": 2.75}"#,
    )
    .unwrap();
    assert_eq!(parsed.test_string, "Hello");
    assert!(parsed.test_bool);
    assert!((parsed.test_double - 2.75).abs() < f64::EPSILON);
}

#[test]
fn integer_is_a_valid_double() {
    let parsed =
        validate::<Scalars>(r#"{"testString": "", "testBool": false, "testDouble": 3}"#).unwrap();
    assert_eq!(parsed.test_double, 3.0);
}

#[test]
fn nested_object_is_parsed() {
    let parsed = validate::<Outer>(r#"{"nested": {"age": 30}}"#).unwrap();
    assert_eq!(parsed.nested.age, 30);
}

#[test]
fn array_is_parsed_in_order() {
    let parsed = validate::<Values>(r#"{"values": [1, 2, 3]}"#).unwrap();
    assert_eq!(parsed.values, vec![1, 2, 3]);
}

#[test]
fn type_mismatch_messages() {
    assert_eq!(
        message::<Scalars>(r#"{"testString": 123, "testBool": true, "testDouble": 1.0}"#),
        "In JSON data, expected a string value for key \"testString\""
    );
    assert_eq!(
        message::<RequiredInt>(r#"{"testInt": "not an int"}"#),
        "In JSON data, expected an integer value for key \"testInt\""
    );
    assert_eq!(
        message::<Scalars>(r#"{"testString": "", "testBool": true, "testDouble": "not a double"}"#),
        "In JSON data, expected a double value for key \"testDouble\""
    );
    assert_eq!(
        message::<Scalars>(r#"{"testString": "", "testBool": "not a bool", "testDouble": 1.0}"#),
        "In JSON data, expected a boolean value for key \"testBool\""
    );
    assert_eq!(
        message::<Outer>(r#"{"nested": "not an object"}"#),
        "In JSON data, expected a JSON object for key \"nested\""
    );
    assert_eq!(
        message::<Values>(r#"{"values": "not an array"}"#),
        "In JSON data, expected a JSON array for key \"values\""
    );
}

#[test]
fn numeric_string_is_not_an_integer() {
    assert_eq!(
        message::<RequiredInt>(r#"{"testInt": "42"}"#),
        "In JSON data, expected an integer value for key \"testInt\""
    );
}

#[test]
fn minimum_and_maximum() {
    assert_eq!(
        message::<AboveMin>(r#"{"testInt": 9}"#),
        "In JSON data, value for key \"testInt\" is below minimum of 10"
    );
    assert!(validate::<AboveMin>(r#"{"testInt": 11}"#).is_ok());
    assert_eq!(
        message::<BelowMax>(r#"{"testInt": 11}"#),
        "In JSON data, value for key \"testInt\" is above maximum of 10"
    );
    assert!(validate::<BelowMax>(r#"{"testInt": 9}"#).is_ok());
}

#[test]
fn range_is_boundary_exact() {
    for inside in [10, 11, 20] {
        let input = format!(r#"{{"testInt": {inside}}}"#);
        assert!(validate::<WithinRange>(&input).is_ok(), "{inside} should pass");
    }
    for outside in [9, 21] {
        let input = format!(r#"{{"testInt": {outside}}}"#);
        assert_eq!(
            message::<WithinRange>(&input),
            "In JSON data, value for key \"testInt\" is outside range 10 to 20"
        );
    }
}

#[test]
fn permitted_values() {
    assert!(validate::<MemberOf>(r#"{"testValue": 2}"#).is_ok());
    assert_eq!(
        message::<MemberOf>(r#"{"testValue": 4}"#),
        "In JSON data, value for key \"testValue\" must be one of: 1 2 3"
    );
}

#[test]
fn strict_policy_rejects_unread_keys() {
    let data: JsonData = r#"{"testInt": 1, "extra": true}"#.parse().unwrap();
    assert!(data.validate::<RequiredInt>().is_ok());

    let err = data
        .validate_with_policy::<RequiredInt>(UnknownFields::Deny)
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "In JSON data, unknown key \"extra\"");
}

#[test]
fn record_at_scalar_root() {
    assert_eq!(
        message::<RequiredInt>("42"),
        "In JSON data, expected a JSON object at the document root"
    );
}
