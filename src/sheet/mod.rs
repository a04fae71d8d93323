pub mod envelope;
pub mod source;
pub mod types;

pub use envelope::{decode_envelope, decode_rows};
pub use source::{GvizSource, RowSource};
pub use types::{col, Cell, RawRow};
