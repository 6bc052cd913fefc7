pub mod affiliate;
pub mod category;
pub mod config;
pub mod description;
pub mod directory;
pub mod disclosure;
pub mod error;
pub mod images;
pub mod normalize;
pub mod record;
pub mod snapshot;

pub use affiliate::{affiliate_url, DEFAULT_AFFILIATE_TAG};
pub use category::Category;
pub use config::Config;
pub use description::Paragraphs;
pub use directory::{card_key, Card, DirectoryState};
pub use disclosure::{Affordance, DescriptionView, Disclosure, SHOW_MORE_THRESHOLD};
pub use error::{Result, Top100Error};
pub use normalize::normalize;
pub use record::{DisplayRecord, Rank, RawRecord, UNKNOWN_AUTHOR};
pub use snapshot::{Catalog, SnapshotStore};
