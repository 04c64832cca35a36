//! @ai:module:intent Performance Arena application library
//! @ai:module:layer application
//! @ai:module:public_api app, columns, config, lookup, ranking, report, search

pub mod app;
pub mod columns;
pub mod config;
pub mod lookup;
pub mod ranking;
pub mod report;
pub mod search;

pub use app::Arena;
pub use columns::{ColumnFeed, Post, TagFilter};
pub use config::ArenaConfig;
pub use lookup::{resolve_product, LookupError};
pub use ranking::{leaderboard, Leaderboard, LeaderboardBuilder, LeaderboardEntry, LeaderboardTrait};
pub use report::{HtmlReporter, MarkdownReporter, ReportGenerator};
pub use search::FuzzySearch;
