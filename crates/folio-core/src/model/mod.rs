pub mod work;

pub use work::{Category, Lens, ParseEnumError, RawWork, Work, WorkType, parse_date, slugify};
