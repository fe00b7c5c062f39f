//! Compile-pass test: embedded records and custom scan types.

use urlstruct::{ConversionError, Pager, ScanValue, Urlstruct};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl ScanValue for Level {
    const TYPE_NAME: &'static str = "Level";

    fn scan_value(raw: &str) -> Result<Self, ConversionError> {
        match raw {
            "low" => Ok(Level::Low),
            "high" => Ok(Level::High),
            _ => Err(ConversionError::new(raw, Self::TYPE_NAME, "expected low or high")),
        }
    }
}

#[derive(Debug, Default, Urlstruct)]
pub struct Window {
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}

#[derive(Debug, Default, Urlstruct)]
pub struct AlertFilter {
    #[urlstruct(flatten)]
    pub pager: Pager,
    #[urlstruct(flatten)]
    pub window: Option<Box<Window>>,
    #[urlstruct(scan)]
    pub level: Level,
    #[urlstruct(scan)]
    pub levels: Vec<Level>,
}

#[derive(Debug, Default, Urlstruct)]
pub struct Empty;

fn main() {
    let info = AlertFilter::struct_info();
    let mut filter = AlertFilter::default();
    info.decode(&mut filter, "level", &["high".to_string()]).unwrap();
    info.decode(&mut filter, "from", &["2024-01-01".to_string()]).unwrap();
    assert_eq!(filter.level, Level::High);
    assert!(filter.window.is_some());
    assert!(Empty::struct_info().fields().is_empty());
}
