//! Cell values, schemas and row records

mod input;
mod record;
mod schema;
mod value;

pub use input::*;
pub use record::*;
pub use schema::*;
pub use value::*;

/// A grid of cell values, one inner vector per row.
pub type Table = Vec<Vec<Value>>;
