//! It exposes the common errors, types and host capabilities shared by the
//! reward contracts.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{constants::*, errors::*, ownership::*, payment_token::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

mod constants;
mod errors;
mod ownership;
mod payment_token;
mod types;
