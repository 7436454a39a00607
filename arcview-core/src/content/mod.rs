//! Content pipeline: kinds, cache tiers and the XML transform
//!
//! Everything between an archive entry name and displayable text lives
//! here. A key is classified by [`ContentKind`], then resolved through the
//! tiers by [`ContentResolver`]: the in-process [`MemoryCache`], a
//! [`ContentStore`] that survives restarts, the raw archive, and finally
//! the [`TransformWorker`] for XML that needs pretty-printing before
//! display.
//!
//! # Module Structure
//!
//! - `kind` - content kind detection from entry names
//! - `cache` - tier 1, the per-document in-memory map
//! - `store` - tier 2, the persistent store trait and its backends
//! - `transform` - the background XML formatting worker
//! - `resolver` - the tier walk and write-through policy
//!
//! # Example
//!
//! ```
//! use arcview_core::content::{format_xml, ContentKind};
//!
//! assert_eq!(ContentKind::detect("word/document.xml"), ContentKind::Code);
//! assert_eq!(ContentKind::detect("media/image1.png"), ContentKind::Image);
//!
//! let pretty = format_xml("<a><b/></a>").unwrap();
//! assert_eq!(pretty, "<a>\n  <b/>\n</a>");
//! ```

mod cache;
mod kind;
mod resolver;
mod store;
mod transform;

pub use cache::MemoryCache;
pub use kind::{ContentKind, IMAGE_EXTENSIONS};
pub use resolver::{ContentError, ContentResolver, Resolution};
pub use store::{ContentStore, FileStore, MemoryStore, StoreError, StoreResult, StoredEntry};
pub use transform::{
    DEFAULT_TRANSFORM_WORKERS, TransformError, TransformReply, TransformReplyReceiver,
    TransformRequest, TransformRequestSender, TransformWorker, format_xml,
};
