//! API handlers organized by resource type.

mod books;
mod health;
mod read_books;
mod to_be_read;
mod users;

pub use books::*;
pub use health::*;
pub use read_books::*;
pub use to_be_read::*;
pub use users::*;
