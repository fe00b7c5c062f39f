//! Compile-pass test: every field option on supported types.

use urlstruct::{Urlstruct, Values};

#[derive(Debug, Default, Urlstruct)]
#[urlstruct(table = "orders")]
pub struct OrderFilter {
    #[urlstruct(name = "customer_id")]
    pub customer: i64,

    #[urlstruct(name = "total", op = "gte")]
    pub min_total: Option<f64>,

    #[urlstruct(name = "created_at__lt")]
    pub created_before: Option<chrono::DateTime<chrono::Utc>>,

    #[urlstruct(nodecode)]
    pub tenant_id: u64,

    #[urlstruct(skip)]
    pub cache_key: String,

    pub status: Vec<String>,
    pub r#type: Option<String>,
}

fn main() {
    let values = Values::parse("customer_id=1&total__gte=9.5&status=new&status=paid&type=retail");
    let mut filter = OrderFilter::default();
    urlstruct::unmarshal(&values, &mut filter).unwrap();
    assert_eq!(filter.customer, 1);
    assert_eq!(filter.status.len(), 2);
    assert_eq!(OrderFilter::struct_info().table_name(), "orders");
}
