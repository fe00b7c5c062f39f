use anyhow::Result;

use crate::{Pager, Urlstruct, Values, unmarshal};

#[derive(Debug, Default, Urlstruct)]
#[urlstruct(table = "b")]
pub struct BookFilter {
    #[urlstruct(flatten)]
    pub pager: Pager,
    pub author_id: i64,
}

/// Example 01 – a filter with an embedded pager.
pub fn run() -> Result<()> {
    let values = Values::parse("author_id=123&page=2&limit=100");
    let mut filter = BookFilter::default();
    unmarshal(&values, &mut filter)?;

    filter.pager.max_limit = 100;
    filter.pager.max_offset = 100_000;

    assert_eq!(filter.author_id, 123);
    assert_eq!(filter.pager.get_limit(), 100);
    assert_eq!(filter.pager.get_offset(), 100);

    let info = BookFilter::struct_info();
    assert_eq!(info.table_name(), "b");
    assert_eq!(info.field("page").map(|f| f.index().to_vec()), Some(vec![0, 2]));
    Ok(())
}
