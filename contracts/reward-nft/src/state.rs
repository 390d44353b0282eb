use commons::{ContractResult, ContractTokenId, CustomContractError, Ownership};
use concordium_cis2::TokenIdU64;
use concordium_std::*;
use core::ops::DerefMut;

use crate::external::{IssueRewardParams, RewardRecord};
use crate::registry::CollectibleRegistry;

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Administrator allowed to reconfigure the contract.
    pub guard: Ownership,
    /// CIS2 contract of the fungible token rewards are paid in.
    pub payment_token: ContractAddress,
    /// Next token ID to allocate, equal to the number of minted receipts.
    next_token_id: u64,
    /// Reward record of every minted receipt.
    rewards: StateMap<ContractTokenId, RewardRecord, S>,
    /// Receipts minted to each contributor, in mint order. The whole list is
    /// read and rewritten on every mint to that contributor.
    contributor_tokens: StateMap<AccountAddress, Vec<ContractTokenId>, S>,
    /// Receipt ownership.
    pub registry: CollectibleRegistry<S>,
}

impl<S: HasStateApi> State<S> {
    /// Creates a new state with no receipts.
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        payment_token: ContractAddress,
        origin: AccountAddress,
    ) -> Self {
        Self {
            guard: Ownership::new(origin),
            payment_token,
            next_token_id: 0,
            rewards: state_builder.new_map(),
            contributor_tokens: state_builder.new_map(),
            registry: CollectibleRegistry::new(state_builder),
        }
    }

    /// Number of receipts ever minted.
    pub fn total_supply(&self) -> u64 {
        self.next_token_id
    }

    /// Records a paid reward: allocates the next token ID, stores the reward
    /// record, indexes it under the contributor and mints the receipt.
    ///
    /// Must only be called once the payment has been forwarded.
    pub fn record_reward(
        &mut self,
        reward: &IssueRewardParams,
        timestamp: Timestamp,
    ) -> ContractResult<ContractTokenId> {
        let token_id = TokenIdU64(self.next_token_id);
        self.next_token_id = self
            .next_token_id
            .checked_add(1)
            .ok_or(CustomContractError::TokenIdOverflow)?;

        self.rewards.insert(
            token_id,
            RewardRecord {
                amount: reward.amount,
                repo_name: reward.repo_name.clone(),
                contributor_name: reward.contributor_name.clone(),
                timestamp,
            },
        );

        self.contributor_tokens
            .entry(reward.contributor)
            .or_insert_with(Vec::new)
            .deref_mut()
            .push(token_id);

        self.registry
            .mint(token_id, Address::Account(reward.contributor))?;

        Ok(token_id)
    }

    pub fn reward_data(
        &self,
        token_id: &ContractTokenId,
    ) -> Result<RewardRecord, CustomContractError> {
        self.rewards
            .get(token_id)
            .map(|record| RewardRecord::clone(&record))
            .ok_or(CustomContractError::TokenNotFound)
    }

    pub fn contributor_tokens(&self, contributor: &AccountAddress) -> Vec<ContractTokenId> {
        self.contributor_tokens
            .get(contributor)
            .map(|tokens| tokens.to_vec())
            .unwrap_or_default()
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::TokenAmountU64;
    use test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const USER_2: AccountAddress = AccountAddress([17; 32]);
    const PAYMENT_TOKEN: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    fn reward(contributor: AccountAddress, amount: u64, name: &str) -> IssueRewardParams {
        IssueRewardParams {
            contributor,
            amount: TokenAmountU64(amount),
            repo_name: String::from("acme/repo"),
            contributor_name: String::from(name),
        }
    }

    #[concordium_test]
    fn test_record_reward() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, PAYMENT_TOKEN, ADMIN);
        let timestamp = Timestamp::from_timestamp_millis(10_000);

        claim_eq!(state.total_supply(), 0);
        claim_eq!(state.guard.owner(), ADMIN);
        claim_eq!(state.payment_token, PAYMENT_TOKEN);

        let result = state.record_reward(&reward(USER_1, 1_000_000, "alice"), timestamp);
        claim_eq!(result, Ok(TokenIdU64(0)));
        claim_eq!(state.total_supply(), 1);

        claim_eq!(
            state.reward_data(&TokenIdU64(0)),
            Ok(RewardRecord {
                amount: TokenAmountU64(1_000_000),
                repo_name: String::from("acme/repo"),
                contributor_name: String::from("alice"),
                timestamp,
            })
        );
        claim_eq!(state.contributor_tokens(&USER_1), vec![TokenIdU64(0)]);
        claim_eq!(
            state.registry.owner_of(&TokenIdU64(0)),
            Ok(Address::Account(USER_1))
        );
    }

    #[concordium_test]
    fn test_contributor_index_keeps_mint_order() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, PAYMENT_TOKEN, ADMIN);
        let timestamp = Timestamp::from_timestamp_millis(10_000);

        for (contributor, name) in [(USER_1, "alice"), (USER_2, "bob"), (USER_1, "alice")] {
            claim!(state
                .record_reward(&reward(contributor, 5, name), timestamp)
                .is_ok());
        }

        claim_eq!(state.total_supply(), 3);
        claim_eq!(
            state.contributor_tokens(&USER_1),
            vec![TokenIdU64(0), TokenIdU64(2)]
        );
        claim_eq!(state.contributor_tokens(&USER_2), vec![TokenIdU64(1)]);
        claim_eq!(state.contributor_tokens(&ADMIN), Vec::new());
    }

    #[concordium_test]
    fn test_reward_data_not_found() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, PAYMENT_TOKEN, ADMIN);

        claim_eq!(
            state.reward_data(&TokenIdU64(0)),
            Err(CustomContractError::TokenNotFound)
        );

        claim!(state
            .record_reward(
                &reward(USER_1, 1, "alice"),
                Timestamp::from_timestamp_millis(1)
            )
            .is_ok());

        // Every ID at or past the supply is unknown
        claim_eq!(
            state.reward_data(&TokenIdU64(state.total_supply())),
            Err(CustomContractError::TokenNotFound)
        );
    }

    #[concordium_test]
    fn test_record_reward_counter_overflow() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::new(&mut state_builder, PAYMENT_TOKEN, ADMIN);
        state.next_token_id = u64::MAX;

        let result = state.record_reward(
            &reward(USER_1, 1, "alice"),
            Timestamp::from_timestamp_millis(1),
        );

        claim_eq!(result, Err(CustomContractError::TokenIdOverflow.into()));
        claim_eq!(state.total_supply(), u64::MAX);
        claim_eq!(
            state.reward_data(&TokenIdU64(u64::MAX)),
            Err(CustomContractError::TokenNotFound)
        );
        claim_eq!(state.contributor_tokens(&USER_1), Vec::new());
        claim!(!state.registry.contains_token(&TokenIdU64(u64::MAX)));
    }
}
