//! Rotating group picker.
//!
//! Splits a list of members into shuffled groups of at least a minimum size
//! and, over several random trials, keeps the grouping that repeats the
//! fewest pairings from earlier groupings.
//!
//! ```
//! use group_picker::{rate_group, search, Group, SearchParams};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let previous = vec![Group::from(vec![1, 2]), Group::from(vec![3, 4])];
//! let params = SearchParams { min_group_size: 2, num_runs: 50 };
//! let best = search(&[1, 2, 3, 4], &previous, params, &mut StdRng::seed_from_u64(3)).unwrap();
//!
//! assert_eq!(best.statistics.total_rating, 0);
//! assert_eq!(rate_group(&Group::from(vec![1, 2, 5]), &previous).rating, 1);
//! ```

pub mod config;
pub mod error;
pub mod group;
pub mod partition;
pub mod rating;
pub mod search;
pub mod session;
pub mod storage;

pub use config::Config;
pub use error::{ConfigError, GroupingError, SessionError, StorageError};
pub use group::Group;
pub use partition::partition;
pub use rating::{rate_group, GroupRating, GroupingStatistics};
pub use search::{search, search_while, SearchOutcome, SearchParams};
pub use session::{Session, SessionOutcome};
