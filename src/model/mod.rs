mod change;
mod method;
mod transaction;

pub use change::{ChangeEvent, ChangeKind, ChangedMethod, CommitRecord};
pub use method::{MethodId, MethodKey};
pub use transaction::{CommitDetails, CommitTransaction, TransactionDatabase};
