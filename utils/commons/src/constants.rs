use super::*;

/// Tag for the Custom Funds Transferred event.
pub const FUNDS_TRANSFERRED_TAG: u8 = u8::MAX - 5;

/// Tag for the Custom Reward Issued event.
pub const REWARD_ISSUED_TAG: u8 = u8::MAX - 6;

/// Tag for the Custom Payment Token Updated event.
pub const PAYMENT_TOKEN_UPDATED_TAG: u8 = u8::MAX - 7;

/// Tag for the Custom Emergency Withdrawal event.
pub const EMERGENCY_WITHDRAWAL_TAG: u8 = u8::MAX - 8;

/// Tag for the Custom Ownership Transferred event.
pub const OWNERSHIP_TRANSFERRED_TAG: u8 = u8::MAX - 9;

/// The baseurl for the token metadata, gets appended with the token ID as hex
/// encoding before emitted in the TokenMetadata event.
pub const TOKEN_METADATA_BASE_URL: &str = "https://rewards.bictory.io/metadata/";

/// Every reward logs four events. The chain caps a single invocation at 64
/// logged events in the protocol version this contract targets, so a batch
/// holds at most 16 rewards. Revisit if a later protocol lifts that cap.
pub const MAX_BATCH_LEN: usize = 16;

/// Account without keys, stands in for the "zero" address.
pub const NULL_ACCOUNT: AccountAddress = AccountAddress([0u8; 32]);

/// Contract address `<0, 0>`, never accepted as a payment token.
pub const NULL_CONTRACT: ContractAddress = ContractAddress {
    index: 0,
    subindex: 0,
};
