use anyhow::Result;

use crate::{ConversionError, ScanValue, Urlstruct, Values, unmarshal};

/// Sort direction accepted as `asc` / `desc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl ScanValue for Direction {
    const TYPE_NAME: &'static str = "Direction";

    fn scan_value(raw: &str) -> Result<Self, ConversionError> {
        match raw {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(ConversionError::new(raw, Self::TYPE_NAME, "expected asc or desc")),
        }
    }
}

/// Opaque payload with no conversion; stays out of the field table.
#[derive(Debug, Default)]
pub struct Cursor {
    pub token: Vec<u8>,
}

#[derive(Debug, Default, Urlstruct)]
pub struct ListFilter {
    #[urlstruct(scan)]
    pub direction: Direction,
    #[urlstruct(scan, name = "then")]
    pub tie_breakers: Vec<Direction>,
    pub cursor: Cursor,
}

/// Example 03 – custom value types through `ScanValue`.
pub fn run() -> Result<()> {
    let values = Values::parse("direction=desc&then=asc&then=desc&cursor=abc");
    let mut filter = ListFilter::default();
    unmarshal(&values, &mut filter)?;

    assert_eq!(filter.direction, Direction::Desc);
    assert_eq!(filter.tie_breakers, [Direction::Asc, Direction::Desc]);
    assert!(filter.cursor.token.is_empty());
    assert!(ListFilter::struct_info().field("cursor").is_none());
    Ok(())
}
