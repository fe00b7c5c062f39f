//! Decoding query values into derived records.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use urlstruct::{Pager, Urlstruct, Values, unmarshal};
use uuid::Uuid;

fn raw(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Default, PartialEq, Urlstruct)]
struct Primitives {
    flag: bool,
    tiny: i8,
    small: i16,
    medium: i32,
    large: i64,
    huge: i128,
    size: isize,
    byte: u8,
    word: u16,
    dword: u32,
    qword: u64,
    oword: u128,
    count: usize,
    ratio: f32,
    precise: f64,
    letter: char,
    text: String,
    at: Option<DateTime<Utc>>,
    at_local: Option<DateTime<FixedOffset>>,
    day: Option<NaiveDate>,
    moment: Option<NaiveDateTime>,
    id: Option<Uuid>,
}

#[test]
fn decodes_every_supported_primitive() {
    let info = Primitives::struct_info();
    let mut record = Primitives::default();

    for (key, value) in [
        ("flag", "true"),
        ("tiny", "-8"),
        ("small", "-1600"),
        ("medium", "320000"),
        ("large", "-6400000000"),
        ("huge", "170141183460469231731687303715884105727"),
        ("size", "-42"),
        ("byte", "255"),
        ("word", "65535"),
        ("dword", "4294967295"),
        ("qword", "18446744073709551615"),
        ("oword", "340282366920938463463374607431768211455"),
        ("count", "7"),
        ("ratio", "0.5"),
        ("precise", "3.25"),
        ("letter", "z"),
        ("text", "hello world"),
        ("at", "2024-03-05T10:20:30Z"),
        ("at_local", "2024-03-05T10:20:30-05:00"),
        ("day", "2024-03-05"),
        ("moment", "2024-03-05T10:20:30"),
        ("id", "550e8400-e29b-41d4-a716-446655440000"),
    ] {
        info.decode(&mut record, key, &raw(&[value]))
            .unwrap_or_else(|err| panic!("{key}: {err}"));
    }

    assert!(record.flag);
    assert_eq!(record.tiny, -8);
    assert_eq!(record.small, -1600);
    assert_eq!(record.medium, 320_000);
    assert_eq!(record.large, -6_400_000_000);
    assert_eq!(record.huge, i128::MAX);
    assert_eq!(record.size, -42);
    assert_eq!(record.byte, u8::MAX);
    assert_eq!(record.word, u16::MAX);
    assert_eq!(record.dword, u32::MAX);
    assert_eq!(record.qword, u64::MAX);
    assert_eq!(record.oword, u128::MAX);
    assert_eq!(record.count, 7);
    assert_eq!(record.ratio, 0.5);
    assert_eq!(record.precise, 3.25);
    assert_eq!(record.letter, 'z');
    assert_eq!(record.text, "hello world");
    assert_eq!(
        record.at,
        Some(DateTime::parse_from_rfc3339("2024-03-05T10:20:30Z").unwrap().with_timezone(&Utc))
    );
    assert_eq!(record.at_local.map(|ts| ts.offset().local_minus_utc()), Some(-5 * 3600));
    assert_eq!(record.day, NaiveDate::from_ymd_opt(2024, 3, 5));
    assert_eq!(
        record.moment,
        NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(10, 20, 30))
    );
    assert_eq!(
        record.id,
        Some(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap())
    );
}

#[derive(Debug, Default, Urlstruct)]
struct Lists {
    ids: Vec<i64>,
    names: Vec<String>,
    days: Vec<NaiveDate>,
}

#[test]
fn list_fields_take_every_value_in_order() {
    let info = Lists::struct_info();
    let mut record = Lists {
        ids: vec![99],
        ..Lists::default()
    };

    info.decode(&mut record, "ids", &raw(&["3", "1", "2"])).unwrap();
    info.decode(&mut record, "names[]", &raw(&["b", "a"])).unwrap();
    info.decode(&mut record, "days", &raw(&["2024-01-02", "2023-12-31"])).unwrap();

    assert_eq!(record.ids, vec![3, 1, 2]);
    assert_eq!(record.names, ["b", "a"]);
    assert_eq!(record.days.len(), 2);
    assert_eq!(record.days[1], NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
}

#[derive(Debug, Default, Clone, PartialEq, Urlstruct)]
struct Filter {
    author_id: i64,
    #[urlstruct(nodecode)]
    owner_id: i64,
    #[urlstruct(skip)]
    internal: i64,
    title: Option<String>,
}

#[test]
fn unknown_keys_are_ignored() {
    let info = Filter::struct_info();
    let mut record = Filter {
        author_id: 1,
        ..Filter::default()
    };
    let before = record.clone();

    info.decode(&mut record, "publisher_id", &raw(&["5"])).unwrap();
    info.decode(&mut record, "author_id__gte", &raw(&["5"])).unwrap();
    assert_eq!(record, before);
}

#[test]
fn excluded_fields_are_not_decoded() {
    let info = Filter::struct_info();
    let mut record = Filter::default();

    info.decode(&mut record, "owner_id", &raw(&["5"])).unwrap();
    info.decode(&mut record, "internal", &raw(&["5"])).unwrap();
    assert_eq!(record, Filter::default());

    let owner = info.field("owner_id").expect("nodecode fields stay in the table");
    assert!(owner.no_decode());
    assert!(info.field("internal").is_none());
}

#[test]
fn empty_value_list_leaves_field_untouched() {
    let info = Filter::struct_info();
    let mut record = Filter {
        author_id: 9,
        title: Some("kept".into()),
        ..Filter::default()
    };

    info.decode(&mut record, "author_id", &[]).unwrap();
    info.decode(&mut record, "title", &[]).unwrap();
    assert_eq!(record.author_id, 9);
    assert_eq!(record.title.as_deref(), Some("kept"));
}

#[test]
fn legacy_key_markers_are_stripped() {
    let info = Filter::struct_info();
    let mut record = Filter::default();

    info.decode(&mut record, ":author_id[]", &raw(&["42"])).unwrap();
    assert_eq!(record.author_id, 42);
}

#[test]
fn conversion_error_keeps_prior_value() {
    let info = Filter::struct_info();
    let mut record = Filter {
        author_id: 7,
        ..Filter::default()
    };

    let err = info.decode(&mut record, "author_id", &raw(&["abc"])).unwrap_err();
    assert_eq!(record.author_id, 7);
    assert_eq!(err.column, "author_id");
    assert_eq!(err.key, "author_id");
    assert_eq!(err.source.value, "abc");
    assert_eq!(err.source.target, "i64");

    let message = err.to_string();
    assert!(message.contains("author_id"), "{message}");
    assert!(message.contains("abc"), "{message}");
}

#[derive(Debug, Default, Urlstruct)]
#[urlstruct(table = "b")]
struct BookFilter {
    #[urlstruct(flatten)]
    pager: Pager,
    author_id: i64,
}

#[test]
fn embedded_fields_resolve_on_the_outer_record() {
    let info = BookFilter::struct_info();
    let mut filter = BookFilter::default();

    info.decode(&mut filter, "page", &raw(&["2"])).unwrap();
    info.decode(&mut filter, "limit", &raw(&["100"])).unwrap();
    info.decode(&mut filter, "author_id", &raw(&["123"])).unwrap();

    assert_eq!(filter.pager.page, 2);
    assert_eq!(filter.pager.limit, 100);
    assert_eq!(filter.pager.get_offset(), 100);
    assert_eq!(filter.author_id, 123);
    assert!(info.field("max_limit").is_none());
}

#[derive(Debug, Default, Urlstruct)]
struct LazyFilter {
    #[urlstruct(flatten)]
    pager: Option<Pager>,
    #[urlstruct(flatten)]
    sort: Option<Box<Sort>>,
    #[urlstruct(flatten)]
    range: Box<Range>,
}

#[derive(Debug, Default, Urlstruct)]
struct Sort {
    #[urlstruct(name = "sort")]
    column: String,
    desc: bool,
}

#[derive(Debug, Default, Urlstruct)]
struct Range {
    #[urlstruct(name = "price", op = "gte")]
    min: Option<f64>,
}

#[test]
fn optional_and_boxed_embeddings_are_allocated_on_decode() {
    let info = LazyFilter::struct_info();
    let mut filter = LazyFilter::default();

    info.decode(&mut filter, "name", &raw(&["x"])).unwrap();
    assert!(filter.pager.is_none(), "unknown keys allocate nothing");

    info.decode(&mut filter, "limit", &raw(&["25"])).unwrap();
    info.decode(&mut filter, "sort", &raw(&["title"])).unwrap();
    info.decode(&mut filter, "desc", &raw(&["1"])).unwrap();
    info.decode(&mut filter, "price__gte", &raw(&["9.5"])).unwrap();

    assert_eq!(filter.pager.as_ref().map(|p| p.limit), Some(25));
    let sort = filter.sort.as_deref().expect("sort allocated");
    assert_eq!(sort.column, "title");
    assert!(sort.desc);
    assert_eq!(filter.range.min, Some(9.5));
}

#[test]
fn failed_decode_leaves_optional_embeddings_empty() {
    let info = LazyFilter::struct_info();
    let mut filter = LazyFilter::default();

    assert!(info.decode(&mut filter, "limit", &raw(&["abc"])).is_err());
    assert!(filter.pager.is_none(), "pager allocated by failed decode: {:?}", filter.pager);

    assert!(info.decode(&mut filter, "desc", &raw(&["maybe"])).is_err());
    assert!(filter.sort.is_none(), "sort allocated by failed decode: {:?}", filter.sort);

    info.decode(&mut filter, "limit", &raw(&["10"])).unwrap();
    assert!(info.decode(&mut filter, "offset", &raw(&["-x"])).is_err());
    assert_eq!(
        filter.pager,
        Some(Pager {
            limit: 10,
            ..Pager::default()
        })
    );
}

#[test]
fn unmarshal_decodes_a_parsed_query() {
    let values = Values::parse("author_id=123&page=2&limit=100&unknown=1");
    let mut filter = BookFilter::default();
    unmarshal(&values, &mut filter).unwrap();

    assert_eq!(filter.author_id, 123);
    assert_eq!(filter.pager.get_limit(), 100);
    assert_eq!(filter.pager.get_offset(), 100);
}
