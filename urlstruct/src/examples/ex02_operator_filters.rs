use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::{Urlstruct, Values, unmarshal};

#[derive(Debug, Default, Urlstruct)]
pub struct OrderFilter {
    #[urlstruct(name = "created_at", op = "gte")]
    pub created_after: Option<DateTime<Utc>>,
    #[urlstruct(name = "created_at__lt")]
    pub created_before: Option<DateTime<Utc>>,
    #[urlstruct(name = "status", op = "in")]
    pub statuses: Vec<String>,
    #[urlstruct(name = "ship_date")]
    pub ship_date: Option<NaiveDate>,
    pub paid: bool,
}

/// Example 02 – operator suffixes, repeated values and legacy keys.
pub fn run() -> Result<()> {
    let values = Values::parse(
        "created_at__gte=2024-01-01T00:00:00Z&created_at__lt=2024-02-01T00:00:00Z\
         &:status__in[]=paid&:status__in[]=shipped&ship_date=2024-01-15&paid=true",
    );
    let mut filter = OrderFilter::default();
    unmarshal(&values, &mut filter)?;

    let after = filter.created_after.map(|ts| ts.to_rfc3339());
    assert_eq!(after.as_deref(), Some("2024-01-01T00:00:00+00:00"));
    assert!(filter.created_before.is_some());
    assert_eq!(filter.statuses, ["paid", "shipped"]);
    assert_eq!(filter.ship_date, NaiveDate::from_ymd_opt(2024, 1, 15));
    assert!(filter.paid);
    Ok(())
}
