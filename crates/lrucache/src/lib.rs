//! # lrucache
//!
//! Fixed-capacity LRU cache with O(1) `get` and `set`.
//!
//! ## Architecture
//! - **Recency list**: arena of entry slots linked by index handles, front is
//!   most recently used, back is the eviction victim
//! - **Key index**: AHash map from key to list handle (O(1))
//! - **Cache**: owns both and only ever mutates them together
//! - **Shared cache**: the same cache behind a `parking_lot` mutex
//!   (feature `shared`, on by default)
//!
//! ```
//! use lrucache::{Error, LruCache};
//!
//! let mut cache = LruCache::new(5).unwrap();
//! for i in 1..=4 {
//!     cache.set(i, i);
//! }
//! assert_eq!(cache.get(&1), Some(&1));
//! assert_eq!(cache.get(&9), None);
//!
//! assert!(matches!(
//!     LruCache::<u32, u32>::new(0),
//!     Err(Error::InvalidCapacity(0))
//! ));
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod index;
mod list;
#[cfg(feature = "shared")]
mod shared;

pub use cache::LruCache;
pub use error::{Error, Result};
pub use list::Iter;
#[cfg(feature = "shared")]
pub use shared::SharedLruCache;
