//! @ai:module:intent Column feed: short posts shown beside the comparison
//! @ai:module:layer domain
//! @ai:module:public_api Post, PostPreview, ColumnFeed, TagFilter, collect_tags, load_posts

pub mod feed;
pub mod post;

pub use feed::{collect_tags, load_posts, ColumnFeed, TagFilter};
pub use post::{
    column_link, excerpt, parse_date, post_id_from_fragment, share_link, Post, PostPreview,
};
