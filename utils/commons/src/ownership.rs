use crate::{CustomContractError, NULL_ACCOUNT};
use concordium_std::*;

/// Single administrator guarding the maintenance entrypoints of a contract.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    /// Account allowed to reconfigure the contract and withdraw stray funds
    owner: AccountAddress,
}

impl Ownership {
    pub fn new(owner: AccountAddress) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> AccountAddress {
        self.owner
    }

    pub fn is_owner(&self, address: &Address) -> bool {
        address.matches_account(&self.owner)
    }

    pub fn ensure_owner(&self, address: &Address) -> Result<(), CustomContractError> {
        ensure!(self.is_owner(address), CustomContractError::Unauthorized);
        Ok(())
    }

    /// Hands the administrator role to `new_owner` and returns the previous one.
    pub fn handle_transfer(
        &mut self,
        sender: &Address,
        new_owner: AccountAddress,
    ) -> Result<AccountAddress, CustomContractError> {
        self.ensure_owner(sender)?;
        ensure!(new_owner != NULL_ACCOUNT, CustomContractError::InvalidAddress);

        let previous = self.owner;
        self.owner = new_owner;
        Ok(previous)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    const ADMIN_ACCOUNT: AccountAddress = AccountAddress([1; 32]);
    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const USER_2: AccountAddress = AccountAddress([17; 32]);
    const CONTRACT_1: ContractAddress = ContractAddress {
        index: 16,
        subindex: 16,
    };

    #[concordium_test]
    fn test_owner_rights() {
        let ownership = Ownership::new(ADMIN_ACCOUNT);

        claim_eq!(ownership.owner(), ADMIN_ACCOUNT);
        claim!(ownership.is_owner(&Address::Account(ADMIN_ACCOUNT)));
        claim!(!ownership.is_owner(&Address::Account(USER_1)));
        // A contract never matches an account owner
        claim!(!ownership.is_owner(&Address::Contract(CONTRACT_1)));

        claim_eq!(
            ownership.ensure_owner(&Address::Account(USER_1)),
            Err(CustomContractError::Unauthorized)
        );
        claim_eq!(
            ownership.ensure_owner(&Address::Account(ADMIN_ACCOUNT)),
            Ok(())
        );
    }

    #[concordium_test]
    fn test_transfer_ownership() {
        let mut ownership = Ownership::new(ADMIN_ACCOUNT);

        let result = ownership.handle_transfer(&Address::Account(ADMIN_ACCOUNT), USER_1);
        claim_eq!(result, Ok(ADMIN_ACCOUNT));
        claim!(ownership.is_owner(&Address::Account(USER_1)));
        claim!(!ownership.is_owner(&Address::Account(ADMIN_ACCOUNT)));

        // Previous owner lost its rights
        let result = ownership.handle_transfer(&Address::Account(ADMIN_ACCOUNT), USER_2);
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim_eq!(ownership.owner(), USER_1);
    }

    #[concordium_test]
    fn test_transfer_ownership_to_null_account() {
        let mut ownership = Ownership::new(ADMIN_ACCOUNT);

        let result = ownership.handle_transfer(&Address::Account(ADMIN_ACCOUNT), NULL_ACCOUNT);
        claim_eq!(result, Err(CustomContractError::InvalidAddress));
        claim_eq!(ownership.owner(), ADMIN_ACCOUNT);
    }
}
