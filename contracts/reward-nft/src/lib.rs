//! A reward receipt NFT smart contract implementing the Concordium Token
//! Standard CIS2.
//!
//! # Description
//! Maintainers pay contributors in a CIS2 fungible payment token (a
//! stablecoin) through this contract. Every payment is forwarded directly from
//! the maintainer to the contributor and, in the same invocation, a unique NFT
//! is minted to the contributor as a receipt. The receipt carries an immutable
//! record of the amount, the repository and the contributor name.
//!
//! The contract must be an operator of the paying address on the payment token
//! contract, otherwise the forwarded transfer is rejected and nothing is
//! minted.
//!
//! Token IDs are allocated from a counter starting at 0 and are never reused.
//! Receipts are regular CIS2 tokens: they can be transferred and queried
//! through the standard `transfer`, `updateOperator`, `balanceOf`,
//! `operatorOf`, `tokenMetadata` and `supports` functions.
//!
//! Note: The word 'address' refers to either an account address or a
//! contract address.

#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod helper;
mod registry;
mod state;

#[concordium_std::concordium_cfg_test]
mod test;
