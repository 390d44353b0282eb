use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Null account or contract address supplied (Error code: -4).
    InvalidAddress,
    /// Only the administrator has access (Error code: -5).
    Unauthorized,
    /// Reward receiver is the null account (Error code: -6).
    InvalidContributor,
    /// Amount must be greater than zero (Error code: -7).
    InvalidAmount,
    /// Repository name is empty (Error code: -8).
    EmptyRepoName,
    /// Contributor name is empty (Error code: -9).
    EmptyContributorName,
    /// Payment token refused to move funds from the payer (Error code: -10).
    TransferFailed,
    /// Batch sequences differ in length (Error code: -11).
    LengthMismatch,
    /// Batch exceeds `MAX_BATCH_LEN` rewards (Error code: -12).
    BatchTooLarge,
    /// No reward was minted under this token ID (Error code: -13).
    TokenNotFound,
    /// Contract holds less payment token than requested (Error code: -14).
    InsufficientBalance,
    /// Payment token refused to release contract funds (Error code: -15).
    WithdrawalFailed,
    /// Token ID counter cannot be advanced any further (Error code: -16).
    TokenIdOverflow,
    /// Failing to mint new tokens because one of the token IDs already exists
    /// in this contract (Error code: -17).
    TokenIdAlreadyExists,
    /// Failed to invoke a contract (Error code: -18).
    InvokeContractError,
    /// Incompatible contract (Error code: -19)
    Incompatible,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}

/// Failure of a read-only query against another contract.
#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    Compatibility,
    Parse,
}

/// Mapping read errors to CustomContractError.
impl<R> From<ContractReadError<R>> for CustomContractError {
    fn from(error: ContractReadError<R>) -> Self {
        match error {
            ContractReadError::Call(_) => Self::InvokeContractError,
            ContractReadError::Compatibility | ContractReadError::Parse => Self::Incompatible,
        }
    }
}
