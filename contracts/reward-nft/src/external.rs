use commons::{
    ContractTokenId, CustomContractError, PaymentTokenAmount, MAX_BATCH_LEN, NULL_ACCOUNT,
    NULL_CONTRACT,
};
use concordium_std::*;

#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// CIS2 contract of the fungible token rewards are paid in.
    pub payment_token: ContractAddress,
}

/// Parameter of `issueReward`.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct IssueRewardParams {
    /// Account receiving both the payment and the receipt NFT.
    pub contributor: AccountAddress,
    /// Payment in the smallest unit of the payment token.
    pub amount: PaymentTokenAmount,
    /// Repository the contribution was made to.
    pub repo_name: String,
    /// Display name of the contributor.
    pub contributor_name: String,
}

impl IssueRewardParams {
    pub fn validate(&self) -> Result<(), CustomContractError> {
        ensure!(
            self.contributor != NULL_ACCOUNT,
            CustomContractError::InvalidContributor
        );
        ensure!(self.amount.0 > 0, CustomContractError::InvalidAmount);
        ensure!(!self.repo_name.is_empty(), CustomContractError::EmptyRepoName);
        ensure!(
            !self.contributor_name.is_empty(),
            CustomContractError::EmptyContributorName
        );
        Ok(())
    }
}

/// Parameter of `issueRewardBatch`. The three per-contributor lists are
/// matched up by index and share one repository name.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct IssueRewardBatchParams {
    pub contributors: Vec<AccountAddress>,
    pub amounts: Vec<PaymentTokenAmount>,
    pub contributor_names: Vec<String>,
    pub repo_name: String,
}

impl IssueRewardBatchParams {
    /// Splits the batch into one `IssueRewardParams` per contributor, in index
    /// order.
    pub fn into_rewards(self) -> Result<Vec<IssueRewardParams>, CustomContractError> {
        ensure!(
            self.contributors.len() == self.amounts.len()
                && self.contributors.len() == self.contributor_names.len(),
            CustomContractError::LengthMismatch
        );
        ensure!(
            self.contributors.len() <= MAX_BATCH_LEN,
            CustomContractError::BatchTooLarge
        );

        let repo_name = self.repo_name;
        let rewards = self
            .contributors
            .into_iter()
            .zip(self.amounts)
            .zip(self.contributor_names)
            .map(|((contributor, amount), contributor_name)| IssueRewardParams {
                contributor,
                amount,
                repo_name: repo_name.clone(),
                contributor_name,
            })
            .collect();

        Ok(rewards)
    }
}

/// Immutable record stored for every minted receipt.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct RewardRecord {
    pub amount: PaymentTokenAmount,
    pub repo_name: String,
    pub contributor_name: String,
    /// Slot time of the mint.
    pub timestamp: Timestamp,
}

/// An untagged event of a minted receipt.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct RewardIssuedEvent {
    pub token_id: ContractTokenId,
    pub contributor: AccountAddress,
    pub amount: PaymentTokenAmount,
    pub repo_name: String,
    pub contributor_name: String,
}

/// Parameter of `configure`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, SchemaType)]
pub struct ConfigureParams {
    pub payment_token: ContractAddress,
}

impl ConfigureParams {
    pub fn validate(&self) -> Result<(), CustomContractError> {
        ensure!(
            self.payment_token != NULL_CONTRACT,
            CustomContractError::InvalidAddress
        );
        Ok(())
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenAmountU64;

    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const USER_2: AccountAddress = AccountAddress([17; 32]);

    fn reward() -> IssueRewardParams {
        IssueRewardParams {
            contributor: USER_1,
            amount: TokenAmountU64(1_000_000),
            repo_name: String::from("acme/repo"),
            contributor_name: String::from("alice"),
        }
    }

    #[concordium_test]
    fn test_validate_reward() {
        claim_eq!(reward().validate(), Ok(()));

        let mut params = reward();
        params.contributor = NULL_ACCOUNT;
        claim_eq!(params.validate(), Err(CustomContractError::InvalidContributor));

        let mut params = reward();
        params.amount = TokenAmountU64(0);
        claim_eq!(params.validate(), Err(CustomContractError::InvalidAmount));

        let mut params = reward();
        params.repo_name = String::new();
        claim_eq!(params.validate(), Err(CustomContractError::EmptyRepoName));

        let mut params = reward();
        params.contributor_name = String::new();
        claim_eq!(
            params.validate(),
            Err(CustomContractError::EmptyContributorName)
        );
    }

    #[concordium_test]
    fn test_validate_reports_first_violation() {
        let params = IssueRewardParams {
            contributor: NULL_ACCOUNT,
            amount: TokenAmountU64(0),
            repo_name: String::new(),
            contributor_name: String::new(),
        };
        claim_eq!(params.validate(), Err(CustomContractError::InvalidContributor));
    }

    #[concordium_test]
    fn test_batch_into_rewards() {
        let params = IssueRewardBatchParams {
            contributors: vec![USER_1, USER_2],
            amounts: vec![TokenAmountU64(5), TokenAmountU64(10)],
            contributor_names: vec![String::from("bob"), String::from("carl")],
            repo_name: String::from("acme/repo"),
        };

        let rewards = params.into_rewards().expect_report("Batch should split");
        claim_eq!(rewards.len(), 2);
        claim_eq!(rewards[0].contributor, USER_1);
        claim_eq!(rewards[0].amount, TokenAmountU64(5));
        claim_eq!(rewards[0].contributor_name, "bob");
        claim_eq!(rewards[1].contributor, USER_2);
        claim_eq!(rewards[1].amount, TokenAmountU64(10));
        claim_eq!(rewards[1].contributor_name, "carl");
        claim!(rewards.iter().all(|r| r.repo_name == "acme/repo"));
    }

    #[concordium_test]
    fn test_batch_length_mismatch() {
        let params = IssueRewardBatchParams {
            contributors: vec![USER_1, USER_2],
            amounts: vec![TokenAmountU64(5)],
            contributor_names: vec![String::from("bob"), String::from("carl")],
            repo_name: String::from("acme/repo"),
        };
        claim_eq!(
            params.into_rewards(),
            Err(CustomContractError::LengthMismatch)
        );

        let params = IssueRewardBatchParams {
            contributors: vec![USER_1],
            amounts: vec![TokenAmountU64(5)],
            contributor_names: vec![],
            repo_name: String::from("acme/repo"),
        };
        claim_eq!(
            params.into_rewards(),
            Err(CustomContractError::LengthMismatch)
        );
    }

    #[concordium_test]
    fn test_batch_too_large() {
        let len = MAX_BATCH_LEN + 1;
        let params = IssueRewardBatchParams {
            contributors: vec![USER_1; len],
            amounts: vec![TokenAmountU64(1); len],
            contributor_names: vec![String::from("bob"); len],
            repo_name: String::from("acme/repo"),
        };
        claim_eq!(params.into_rewards(), Err(CustomContractError::BatchTooLarge));
    }

    #[concordium_test]
    fn test_validate_configure() {
        let params = ConfigureParams {
            payment_token: NULL_CONTRACT,
        };
        claim_eq!(params.validate(), Err(CustomContractError::InvalidAddress));

        let params = ConfigureParams {
            payment_token: ContractAddress {
                index: 7,
                subindex: 0,
            },
        };
        claim_eq!(params.validate(), Ok(()));
    }
}
