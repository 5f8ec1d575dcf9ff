pub mod feed_view;
pub mod time_format;

pub use feed_view::{CardView, DisplayOptions, FeedBody, FeedView, ImpactBadge};
pub use time_format::{format_last_update, format_timestamp};
