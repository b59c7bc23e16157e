pub mod live;
pub mod seed;
pub mod snapshot;
pub mod state;

pub use live::{FeedView, LiveFeed, Subscription};
pub use snapshot::FeedSnapshot;
pub use state::FeedState;
