mod append_receipt;
mod name_mapping;
mod value_range;

pub use append_receipt::*;
pub use name_mapping::*;
pub use value_range::*;
