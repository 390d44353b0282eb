use commons::{
    ContractError, ContractResult, ContractTokenAmount, ContractTokenId, CustomContractError,
};
use concordium_cis2::*;
use concordium_std::*;

/// Ownership of the minted receipts, following the CIS2 rules for NFTs: every
/// token has exactly one owner and a balance of either 0 or 1.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct CollectibleRegistry<S: HasStateApi> {
    /// Current owner of each minted token.
    owners: StateMap<ContractTokenId, Address, S>,
    /// Operators for each address.
    operators: StateMap<Address, StateSet<Address, S>, S>,
}

impl<S: HasStateApi> CollectibleRegistry<S> {
    /// Creates a registry with no tokens.
    pub fn new(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            owners: state_builder.new_map(),
            operators: state_builder.new_map(),
        }
    }

    /// Check that the token ID currently exists in this contract.
    pub fn contains_token(&self, token_id: &ContractTokenId) -> bool {
        self.owners.get(token_id).is_some()
    }

    pub fn owner_of(&self, token_id: &ContractTokenId) -> ContractResult<Address> {
        self.owners
            .get(token_id)
            .map(|owner| *owner)
            .ok_or(ContractError::InvalidTokenId)
    }

    /// Register a new token owned by `owner`.
    pub fn mint(&mut self, token_id: ContractTokenId, owner: Address) -> ContractResult<()> {
        ensure!(
            !self.contains_token(&token_id),
            CustomContractError::TokenIdAlreadyExists.into()
        );
        self.owners.insert(token_id, owner);
        Ok(())
    }

    /// Get the current balance of a given token ID for a given address.
    /// Results in an error if the token ID does not exist in the state.
    pub fn balance(
        &self,
        token_id: &ContractTokenId,
        address: &Address,
    ) -> ContractResult<ContractTokenAmount> {
        let owner = self.owner_of(token_id)?;
        Ok(TokenAmountU8(u8::from(owner == *address)))
    }

    /// Update the state with a transfer of some token.
    /// Results in an error if the token ID does not exist in the state or if
    /// the from address has insufficient tokens to do the transfer.
    pub fn transfer(
        &mut self,
        token_id: &ContractTokenId,
        amount: ContractTokenAmount,
        from: &Address,
        to: &Address,
    ) -> ContractResult<()> {
        let owner = self.owner_of(token_id)?;

        // A zero transfer does not modify the state.
        if amount.0 == 0 {
            return Ok(());
        }

        // Since this contract only contains NFTs, no one will have an amount
        // greater than 1. And since the amount cannot be the zero at this point,
        // the address must have insufficient funds for any amount other than 1.
        ensure_eq!(amount.0, 1, ContractError::InsufficientFunds);
        ensure_eq!(owner, *from, ContractError::InsufficientFunds);

        self.owners.insert(token_id.clone(), *to);
        Ok(())
    }

    /// Lets `operator` move every receipt held by `owner`. Adding an existing
    /// operator again changes nothing.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        let mut operators = self
            .operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_set());
        operators.insert(*operator);
    }

    /// Revokes `operator` for `owner`. Unknown pairs are ignored.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        if let Some(mut operators) = self.operators.get_mut(owner) {
            operators.remove(operator);
        }
    }

    /// Whether `address` may move receipts held by `owner`.
    pub fn is_operator(&self, owner: &Address, address: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|operators| operators.contains(address))
            .unwrap_or(false)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const USER_1: Address = Address::Account(AccountAddress([16; 32]));
    const USER_2: Address = Address::Account(AccountAddress([17; 32]));
    const OPERATOR: Address = Address::Contract(ContractAddress {
        index: 16,
        subindex: 16,
    });

    #[concordium_test]
    fn test_mint_and_balance() {
        let mut state_builder = TestStateBuilder::new();
        let mut registry = CollectibleRegistry::new(&mut state_builder);

        claim_eq!(registry.mint(TokenIdU64(0), USER_1), Ok(()));
        claim!(registry.contains_token(&TokenIdU64(0)));
        claim!(!registry.contains_token(&TokenIdU64(1)));
        claim_eq!(registry.owner_of(&TokenIdU64(0)), Ok(USER_1));
        claim_eq!(registry.balance(&TokenIdU64(0), &USER_1), Ok(TokenAmountU8(1)));
        claim_eq!(registry.balance(&TokenIdU64(0), &USER_2), Ok(TokenAmountU8(0)));
        claim_eq!(
            registry.balance(&TokenIdU64(1), &USER_1),
            Err(ContractError::InvalidTokenId)
        );

        claim_eq!(
            registry.mint(TokenIdU64(0), USER_2),
            Err(CustomContractError::TokenIdAlreadyExists.into())
        );
        claim_eq!(registry.owner_of(&TokenIdU64(0)), Ok(USER_1));
    }

    #[concordium_test]
    fn test_transfer() {
        let mut state_builder = TestStateBuilder::new();
        let mut registry = CollectibleRegistry::new(&mut state_builder);
        claim_eq!(registry.mint(TokenIdU64(0), USER_1), Ok(()));

        // Zero transfer is a no-op
        claim_eq!(
            registry.transfer(&TokenIdU64(0), TokenAmountU8(0), &USER_2, &USER_2),
            Ok(())
        );
        claim_eq!(registry.owner_of(&TokenIdU64(0)), Ok(USER_1));

        claim_eq!(
            registry.transfer(&TokenIdU64(0), TokenAmountU8(1), &USER_2, &USER_1),
            Err(ContractError::InsufficientFunds)
        );
        claim_eq!(
            registry.transfer(&TokenIdU64(0), TokenAmountU8(2), &USER_1, &USER_2),
            Err(ContractError::InsufficientFunds)
        );
        claim_eq!(
            registry.transfer(&TokenIdU64(5), TokenAmountU8(1), &USER_1, &USER_2),
            Err(ContractError::InvalidTokenId)
        );

        claim_eq!(
            registry.transfer(&TokenIdU64(0), TokenAmountU8(1), &USER_1, &USER_2),
            Ok(())
        );
        claim_eq!(registry.owner_of(&TokenIdU64(0)), Ok(USER_2));
        claim_eq!(registry.balance(&TokenIdU64(0), &USER_1), Ok(TokenAmountU8(0)));
    }

    #[concordium_test]
    fn test_operators() {
        let mut state_builder = TestStateBuilder::new();
        let mut registry = CollectibleRegistry::new(&mut state_builder);

        claim!(!registry.is_operator(&USER_1, &OPERATOR));

        registry.add_operator(&USER_1, &OPERATOR, &mut state_builder);
        registry.add_operator(&USER_1, &OPERATOR, &mut state_builder);
        claim!(registry.is_operator(&USER_1, &OPERATOR));
        claim!(!registry.is_operator(&USER_2, &OPERATOR));

        registry.remove_operator(&USER_1, &OPERATOR);
        claim!(!registry.is_operator(&USER_1, &OPERATOR));

        // Removing an unknown operator succeeds
        registry.remove_operator(&USER_2, &OPERATOR);
        claim!(!registry.is_operator(&USER_2, &OPERATOR));
    }
}
