pub mod text;
pub mod time;

pub use text::fit_to_width;
pub use time::current_human_timestamp;
