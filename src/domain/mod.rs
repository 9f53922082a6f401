pub mod comment;
pub mod item;
pub mod ranking;

pub use comment::CommentRecord;
pub use item::ItemRecord;
pub use ranking::{Sort, TimeRange};
