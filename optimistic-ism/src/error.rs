use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

use primitive_types::H256;

/// The result of a gate operation.
pub type IsmResult<T> = Result<T, OptimisticIsmError>;

/// Errors raised by the optimistic verification gate.
///
/// Every error aborts the whole operation with no state mutation; nothing
/// here is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum OptimisticIsmError {
    /// The caller does not hold the owner role
    #[error("caller {0} is not the owner")]
    NotOwner(H256),
    /// The caller is not in the watcher set
    #[error("caller {0} is not a watcher")]
    NotWatcher(H256),
    /// The zero identity was supplied where a real one is required
    #[error("the zero address is not a valid identity")]
    InvalidAddress,
    /// Rotation was attempted while the active submodule carries no fraud
    /// flag
    #[error("the active submodule has not been flagged as fraudulent")]
    NotFlagged,
    /// The submodule rejected the message during proposal
    #[error("submodule rejected message {0}")]
    VerificationFailed(H256),
    /// A second proposal was made for an already-proposed message identity
    #[error("message {0} has already been proposed for verification")]
    AlreadyProposed(H256),
    /// An error raised by a submodule invocation. Does not implement `From`
    /// to prevent conflicting/absorbing other errors.
    #[error("submodule call failed: {0}")]
    Submodule(Box<dyn StdError + Send + Sync>),
}

impl OptimisticIsmError {
    /// Create a submodule error from any other existing error
    pub fn from_submodule<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Submodule(Box::new(err))
    }

    /// Creates a submodule error from a static string
    pub fn from_submodule_str(err: &'static str) -> Self {
        #[derive(Debug)]
        #[repr(transparent)]
        struct StringError(&'static str);
        impl Display for StringError {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.0)
            }
        }
        impl StdError for StringError {}

        Self::from_submodule(StringError(err))
    }
}
