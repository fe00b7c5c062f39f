//! Compile-pass test: a `DateTime` offset without a conversion is left out of the table.

use urlstruct::Urlstruct;

#[derive(Debug, Default, Urlstruct)]
pub struct Visit {
    pub id: i64,
    pub seen: Option<chrono::DateTime<chrono::Local>>,
    pub at: Option<chrono::DateTime<chrono::Utc>>,
}

fn main() {
    let info = Visit::struct_info();
    assert!(info.field("seen").is_none());
    assert!(info.field("at").is_some());
    assert_eq!(info.fields().len(), 2);
}
