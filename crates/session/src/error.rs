use serde::Serialize;
use thiserror::Error;

/// Category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    NoProvider,
    UserRejected,
    NotConnected,
    NotDeployed,
    NoContractAtAddress,
    ReadFailed,
    ProviderRequestFailed,
}

/// Failure of a connect or token read attempt.
///
/// Every variant is terminal for the attempt; nothing is retried. The display
/// text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DappError {
    #[error("Please install MetaMask!")]
    NoProvider,

    #[error("{0}")]
    UserRejected(String),

    #[error("Please connect your wallet first.")]
    NotConnected,

    #[error("Contract not deployed. Please deploy the contract first.")]
    NotDeployed,

    #[error(
        "Error fetching token info: No contract found at address {address}. \
         Please deploy the contract first."
    )]
    NoContractAtAddress { address: String },

    #[error("Error fetching token info: {0}")]
    ReadFailed(String),

    #[error("{method} failed: {message}")]
    ProviderRequestFailed { method: String, message: String },
}

impl DappError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoProvider => ErrorKind::NoProvider,
            Self::UserRejected(_) => ErrorKind::UserRejected,
            Self::NotConnected => ErrorKind::NotConnected,
            Self::NotDeployed => ErrorKind::NotDeployed,
            Self::NoContractAtAddress { .. } => ErrorKind::NoContractAtAddress,
            Self::ReadFailed(_) => ErrorKind::ReadFailed,
            Self::ProviderRequestFailed { .. } => ErrorKind::ProviderRequestFailed,
        }
    }

    pub(crate) fn request_failed(method: &str, message: impl ToString) -> Self {
        Self::ProviderRequestFailed {
            method: method.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn read_failed(message: impl ToString) -> Self {
        Self::ReadFailed(message.to_string())
    }
}

/// The single user-visible error slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationError {
    pub message: String,
}

impl From<&DappError> for OperationError {
    fn from(err: &DappError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}
