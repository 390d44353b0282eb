use concordium_cis2::*;
use concordium_std::*;

use crate::{
    ContractReadError, PaymentBalanceOfQueryParams, PaymentBalanceOfQueryResponse,
    PaymentTokenAmount, PaymentTransferParameter,
};

/// Calls into the CIS-2 contract of the fungible token that rewards are paid in.
pub trait HostPaymentTokenExt<S>: HasHost<S> {
    /// Moves `amount` from `from` to the account `to`.
    ///
    /// The invoking contract has to be `from` itself or an operator of `from`
    /// on the payment token contract.
    fn payment_token_transfer(
        &mut self,
        contract: &ContractAddress,
        from: Address,
        to: AccountAddress,
        amount: PaymentTokenAmount,
    ) -> Result<(), CallContractError<Self::ReturnValueType>> {
        let parameter: PaymentTransferParameter = TransferParams(vec![Transfer {
            token_id: TokenIdUnit(),
            amount,
            from,
            to: Receiver::Account(to),
            data: AdditionalData::empty(),
        }]);

        self.invoke_contract(
            contract,
            &parameter,
            EntrypointName::new_unchecked("transfer"),
            Amount::zero(),
        )?;

        Ok(())
    }

    /// Queries the payment token balance held by `address`.
    fn payment_token_balance_of(
        &self,
        contract: &ContractAddress,
        address: Address,
    ) -> Result<PaymentTokenAmount, ContractReadError<Self::ReturnValueType>> {
        let parameter: PaymentBalanceOfQueryParams = BalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: TokenIdUnit(),
                address,
            }],
        };

        let mut result = self
            .invoke_contract_read_only(
                contract,
                &parameter,
                EntrypointName::new_unchecked("balanceOf"),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        let BalanceOfQueryResponse(balances) = PaymentBalanceOfQueryResponse::deserial(&mut result)
            .map_err(|_| ContractReadError::Parse)?;

        balances
            .into_iter()
            .next()
            .ok_or(ContractReadError::Compatibility)
    }
}

impl<S, H: HasHost<S>> HostPaymentTokenExt<S> for H {}
