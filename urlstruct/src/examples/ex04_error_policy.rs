use anyhow::Result;

use crate::{Decoder, DecoderConfig, ErrorPolicy, Urlstruct, Values};

#[derive(Debug, Default, Urlstruct)]
pub struct RangeFilter {
    #[urlstruct(name = "price", op = "gte")]
    pub min_price: Option<f64>,
    #[urlstruct(name = "price", op = "lte")]
    pub max_price: Option<f64>,
    pub limit: u32,
}

/// Example 04 – fail-fast versus collected decode errors.
pub fn run() -> Result<()> {
    let values = Values::parse("price__gte=cheap&price__lte=99.5&limit=-1");

    let mut filter = RangeFilter::default();
    let err = Decoder::default()
        .unmarshal(&values, &mut filter)
        .expect_err("fail-fast reports the first bad parameter");
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].key, "limit");

    let collecting = Decoder::new(DecoderConfig {
        error_policy: ErrorPolicy::Collect,
    });
    let mut filter = RangeFilter::default();
    let err = collecting
        .unmarshal(&values, &mut filter)
        .expect_err("both bad parameters are reported");
    let keys: Vec<&str> = err.errors.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, ["limit", "price__gte"]);
    assert_eq!(filter.max_price, Some(99.5));
    assert_eq!(filter.min_price, None);
    Ok(())
}
