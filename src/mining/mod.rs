//! Co-change mining
//!
//! Three stages over the same bounded history:
//!
//! - **identity**: first pass, mints method ids per method key
//! - **extractor**: second pass, builds one transaction per commit
//! - **frequency**: groups transactions by co-change signature
//! - **progress**: progress reporting abstraction

mod extractor;
mod frequency;
mod identity;
mod progress;

pub use extractor::{build_transactions, commit_transaction};
pub use frequency::annotate_frequencies;
pub use identity::{IdentityMap, build_identity_map};
pub use progress::{IndicatifProgress, NoopProgress, Pass, PassProgress, ProgressReporter, reporter};
