mod codecs;
mod data_type;
mod field;
mod lob;
mod parameter;

pub use codecs::*;
pub use data_type::*;
pub use field::*;
pub use lob::*;
pub use parameter::*;
