use commons::{
    PaymentTokenAmount, EMERGENCY_WITHDRAWAL_TAG, FUNDS_TRANSFERRED_TAG,
    OWNERSHIP_TRANSFERRED_TAG, PAYMENT_TOKEN_UPDATED_TAG, REWARD_ISSUED_TAG,
};
use concordium_std::*;

use crate::external::RewardIssuedEvent;

/// An untagged event of a forwarded payment.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct FundsTransferredEvent {
    /// Address that paid the reward.
    pub from: Address,
    /// Contributor receiving the payment.
    pub to: AccountAddress,
    /// Amount in the smallest unit of the payment token.
    pub amount: PaymentTokenAmount,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum RewardEvent {
    /// Payment forwarded from the maintainer to the contributor
    FundsTransferred(FundsTransferredEvent),
    /// Receipt minted
    RewardIssued(RewardIssuedEvent),
    /// Payment token contract replaced
    PaymentTokenUpdated(ContractAddress),
    /// Stray payment token sent to the administrator
    EmergencyWithdrawal {
        to: AccountAddress,
        amount: PaymentTokenAmount,
    },
    /// Administrator replaced
    OwnershipTransferred {
        previous: AccountAddress,
        new: AccountAddress,
    },
}

impl Serial for RewardEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            RewardEvent::FundsTransferred(event) => {
                out.write_u8(FUNDS_TRANSFERRED_TAG)?;
                event.serial(out)
            }
            RewardEvent::RewardIssued(event) => {
                out.write_u8(REWARD_ISSUED_TAG)?;
                event.serial(out)
            }
            RewardEvent::PaymentTokenUpdated(contract) => {
                out.write_u8(PAYMENT_TOKEN_UPDATED_TAG)?;
                contract.serial(out)
            }
            RewardEvent::EmergencyWithdrawal { to, amount } => {
                out.write_u8(EMERGENCY_WITHDRAWAL_TAG)?;
                to.serial(out)?;
                amount.serial(out)
            }
            RewardEvent::OwnershipTransferred { previous, new } => {
                out.write_u8(OWNERSHIP_TRANSFERRED_TAG)?;
                previous.serial(out)?;
                new.serial(out)
            }
        }
    }
}

impl Deserial for RewardEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            FUNDS_TRANSFERRED_TAG => {
                FundsTransferredEvent::deserial(source).map(RewardEvent::FundsTransferred)
            }
            REWARD_ISSUED_TAG => RewardIssuedEvent::deserial(source).map(RewardEvent::RewardIssued),
            PAYMENT_TOKEN_UPDATED_TAG => {
                ContractAddress::deserial(source).map(RewardEvent::PaymentTokenUpdated)
            }
            EMERGENCY_WITHDRAWAL_TAG => Ok(RewardEvent::EmergencyWithdrawal {
                to: AccountAddress::deserial(source)?,
                amount: PaymentTokenAmount::deserial(source)?,
            }),
            OWNERSHIP_TRANSFERRED_TAG => Ok(RewardEvent::OwnershipTransferred {
                previous: AccountAddress::deserial(source)?,
                new: AccountAddress::deserial(source)?,
            }),
            _ => Err(ParseError::default()),
        }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::{TokenAmountU64, TokenIdU64};

    #[concordium_test]
    fn test_event_roundtrip_keeps_tag() {
        let event = RewardEvent::RewardIssued(RewardIssuedEvent {
            token_id: TokenIdU64(7),
            contributor: AccountAddress([16; 32]),
            amount: TokenAmountU64(1_000_000),
            repo_name: String::from("acme/repo"),
            contributor_name: String::from("alice"),
        });

        let bytes = to_bytes(&event);
        claim_eq!(bytes[0], REWARD_ISSUED_TAG);
        claim_eq!(from_bytes::<RewardEvent>(&bytes), Ok(event));

        claim!(from_bytes::<RewardEvent>(&[0u8]).is_err());
    }
}
