use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type.
/// Receipts are numbered by a monotonic counter, so a `u64` id is enough.
pub type ContractTokenId = TokenIdU64;

/// Contract token amount type.
/// Every receipt is unique, so the amount is always either 0 or 1.
pub type ContractTokenAmount = TokenAmountU8;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;

/// Parameter type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenIDs used by this contract.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

/// Response type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenAmounts used by this contract.
pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;

/// Parameter type for the CIS-2 function `tokenMetadata`.
pub type ContractTokenMetadataQueryParams = TokenMetadataQueryParams<ContractTokenId>;

/// The payment token is a single fungible token, so it has no token ID.
pub type PaymentTokenId = TokenIdUnit;

/// Amount type of the payment token, in its smallest unit.
pub type PaymentTokenAmount = TokenAmountU64;

/// CIS-2 `transfer` parameter sent to the payment token contract.
pub type PaymentTransferParameter = TransferParams<PaymentTokenId, PaymentTokenAmount>;

/// CIS-2 `balanceOf` parameter sent to the payment token contract.
pub type PaymentBalanceOfQueryParams = BalanceOfQueryParams<PaymentTokenId>;

/// CIS-2 `balanceOf` response returned by the payment token contract.
pub type PaymentBalanceOfQueryResponse = BalanceOfQueryResponse<PaymentTokenAmount>;
