//! Tests for the `#[derive(Record)]` macro.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rollcall::{ListQuery, Number, Record, TimeWindow, Timestamp, Value};

#[derive(Debug, Clone, Record)]
struct Student {
    name: String,
    branch: String,
    points: u32,
    gpa: f64,
    verified: bool,
    phone: Option<String>,
    #[record(rename = "createdAt")]
    created_at: DateTime<Utc>,
    graduation: NaiveDate,
    #[record(skip)]
    #[allow(dead_code)]
    notes: Vec<String>,
}

fn student(name: &str, branch: &str, points: u32, days_ago: i64) -> Student {
    Student {
        name: name.to_string(),
        branch: branch.to_string(),
        points,
        gpa: 3.5,
        verified: points > 10,
        phone: None,
        created_at: now() - chrono::Duration::days(days_ago),
        graduation: NaiveDate::from_ymd_opt(2026, 5, 30).unwrap(),
        notes: Vec::new(),
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

#[test]
fn generates_field_constants() {
    assert_eq!(Student::NAME, "name");
    assert_eq!(Student::BRANCH, "branch");
    assert_eq!(Student::POINTS, "points");
    assert_eq!(Student::CREATED_AT, "createdAt");
    assert_eq!(Student::GRADUATION, "graduation");
}

#[test]
fn exposes_every_field_type() {
    let s = student("Ada", "CS", 40, 2);

    assert_eq!(s.field_value(Student::NAME), Value::String("Ada"));
    assert_eq!(s.field_value("points"), Value::Number(Number::U64(40)));
    assert_eq!(s.field_value("gpa"), Value::Number(Number::F64(3.5)));
    assert_eq!(s.field_value("verified"), Value::Bool(true));
    assert_eq!(s.field_value("phone"), Value::None);
    assert_eq!(
        s.field_value("createdAt"),
        Value::Timestamp(Timestamp::from(s.created_at))
    );
    assert!(matches!(s.field_value("graduation"), Value::Timestamp(_)));
}

#[test]
fn renamed_and_skipped_fields() {
    let s = student("Ada", "CS", 40, 2);
    // Only the renamed key resolves
    assert_eq!(s.field_value("created_at"), Value::None);
    assert_eq!(s.field_value("notes"), Value::None);
    assert_eq!(s.field_value("unknown"), Value::None);
}

#[test]
fn derived_accessor_drives_queries() {
    let students = vec![
        student("Ada Lovelace", "CS", 40, 2),
        student("Alan Turing", "CS", 90, 12),
        student("Grace Hopper", "EE", 70, 1),
        student("Alonzo Church", "CS", 60, 3),
    ];

    let query = ListQuery::new()
        .search("a")
        .search_field(Student::NAME)
        .filter(Student::BRANCH, "CS")
        .time_window(TimeWindow::Last7d)
        .sort_desc(Student::POINTS)
        .build();

    let names: Vec<&str> = query
        .apply(&students, &now(), Student::accessor)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, ["Alonzo Church", "Ada Lovelace"]);
}

#[derive(Record)]
struct Keyword {
    r#type: String,
    #[record(rename = "college.name")]
    college_name: String,
}

#[test]
fn raw_identifiers_and_dotted_names() {
    let k = Keyword {
        r#type: "scholarship".to_string(),
        college_name: "Riverside".to_string(),
    };
    assert_eq!(Keyword::TYPE, "type");
    assert_eq!(Keyword::COLLEGE_NAME, "college.name");
    assert_eq!(k.field_value("type"), Value::String("scholarship"));
    assert_eq!(k.field_value("college.name"), Value::String("Riverside"));
}
