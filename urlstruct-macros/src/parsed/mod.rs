mod field;
mod record;
mod types;

pub(crate) use record::ParsedRecord;
