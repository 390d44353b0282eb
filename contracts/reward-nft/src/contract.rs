use commons::*;
use concordium_cis2::*;
use concordium_std::*;

use crate::events::{FundsTransferredEvent, RewardEvent};
use crate::external::*;
use crate::helper::token_metadata_url;
use crate::state::State;

/// List of supported standards by this contract address.
const SUPPORTS_STANDARDS: [StandardIdentifier<'static>; 2] =
    [CIS0_STANDARD_IDENTIFIER, CIS2_STANDARD_IDENTIFIER];

/// Initialize contract instance with no receipts. The account creating the
/// instance becomes its administrator.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - The payment token is the null contract address.
#[init(contract = "RewardNft", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params = InitParams::deserial(&mut ctx.parameter_cursor())?;

    ensure!(
        params.payment_token != NULL_CONTRACT,
        CustomContractError::InvalidAddress.into()
    );

    // Construct the initial contract state.
    let state = State::new(state_builder, params.payment_token, ctx.init_origin());
    Ok(state)
}

/// Forwards one payment and mints its receipt.
///
/// The payment leaves the payer before any state is touched, so a rejected
/// transfer leaves the counter, the records and the index as they were.
fn issue<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
    payer: Address,
    slot_time: Timestamp,
    reward: IssueRewardParams,
) -> ContractResult<ContractTokenId> {
    reward.validate()?;

    let payment_token = host.state().payment_token;
    host.payment_token_transfer(&payment_token, payer, reward.contributor, reward.amount)
        .map_err(|_| CustomContractError::TransferFailed)?;

    logger.log(&RewardEvent::FundsTransferred(FundsTransferredEvent {
        from: payer,
        to: reward.contributor,
        amount: reward.amount,
    }))?;

    let token_id = host.state_mut().record_reward(&reward, slot_time)?;

    // Event for minted NFT.
    logger.log(&Cis2Event::Mint(MintEvent {
        token_id,
        amount: TokenAmountU8(1),
        owner: Address::Account(reward.contributor),
    }))?;

    // Metadata URL for the NFT.
    logger.log(&Cis2Event::TokenMetadata::<_, ContractTokenAmount>(
        TokenMetadataEvent {
            token_id,
            metadata_url: token_metadata_url(&token_id),
        },
    ))?;

    logger.log(&RewardEvent::RewardIssued(RewardIssuedEvent {
        token_id,
        contributor: reward.contributor,
        amount: reward.amount,
        repo_name: reward.repo_name,
        contributor_name: reward.contributor_name,
    }))?;

    Ok(token_id)
}

/// Pay a contributor and mint a receipt NFT to them.
/// Logs `FundsTransferred`, `Mint`, `TokenMetadata` and `RewardIssued`.
///
/// The sender pays. This contract must be an operator of the sender on the
/// payment token contract.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - The contributor is the null account;
/// - The amount is zero;
/// - The repository or the contributor name is empty;
/// - The payment token rejects the transfer;
/// - Fails to log any of the events.
#[receive(
    mutable,
    contract = "RewardNft",
    name = "issueReward",
    parameter = "IssueRewardParams",
    return_value = "ContractTokenId",
    enable_logger
)]
fn issue_reward<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<ContractTokenId> {
    let params = IssueRewardParams::deserial(&mut ctx.parameter_cursor())?;
    let slot_time = ctx.metadata().slot_time();

    issue(host, logger, ctx.sender(), slot_time, params)
}

/// Pay several contributors of the same repository, in list order.
/// Returns the minted token IDs in the same order.
///
/// Either every reward of the batch is issued or the whole invocation is
/// rejected.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - The contributor, amount and name lists differ in length;
/// - The batch holds more than `MAX_BATCH_LEN` rewards;
/// - Any single reward is rejected, for the same reasons as `issueReward`.
#[receive(
    mutable,
    contract = "RewardNft",
    name = "issueRewardBatch",
    parameter = "IssueRewardBatchParams",
    return_value = "Vec<ContractTokenId>",
    enable_logger
)]
fn issue_reward_batch<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<Vec<ContractTokenId>> {
    let params = IssueRewardBatchParams::deserial(&mut ctx.parameter_cursor())?;
    let rewards = params.into_rewards()?;
    let payer = ctx.sender();
    let slot_time = ctx.metadata().slot_time();

    let mut token_ids = Vec::with_capacity(rewards.len());
    for reward in rewards {
        token_ids.push(issue(host, logger, payer, slot_time, reward)?);
    }

    Ok(token_ids)
}

/// Receipts minted to a contributor, in mint order.
#[receive(
    contract = "RewardNft",
    name = "getContributorTokens",
    parameter = "AccountAddress",
    return_value = "Vec<ContractTokenId>"
)]
fn get_contributor_tokens<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<Vec<ContractTokenId>> {
    let contributor = AccountAddress::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().contributor_tokens(&contributor))
}

/// Reward record of a receipt.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - No receipt was minted under the token ID.
#[receive(
    contract = "RewardNft",
    name = "getRewardData",
    parameter = "ContractTokenId",
    return_value = "RewardRecord"
)]
fn get_reward_data<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<RewardRecord> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().reward_data(&token_id)?)
}

/// Number of receipts ever minted.
#[receive(contract = "RewardNft", name = "totalSupply", return_value = "u64")]
fn total_supply<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<u64> {
    Ok(host.state().total_supply())
}

/// Payment token balance held by this contract. Rewards never pass through
/// the contract, so this is only non-zero after a direct deposit.
///
/// It rejects if:
/// - The payment token contract fails the `balanceOf` query.
#[receive(
    contract = "RewardNft",
    name = "getContractBalance",
    return_value = "PaymentTokenAmount"
)]
fn get_contract_balance<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<PaymentTokenAmount> {
    let payment_token = host.state().payment_token;
    let balance = host
        .payment_token_balance_of(&payment_token, Address::Contract(ctx.self_address()))
        .map_err(CustomContractError::from)?;

    Ok(balance)
}

/// Replace the payment token contract. Logs `PaymentTokenUpdated`.
///
/// It rejects if:
/// - Sender is not the administrator;
/// - Fails to parse parameter;
/// - The new payment token is the null contract address.
#[receive(
    mutable,
    contract = "RewardNft",
    name = "configure",
    parameter = "ConfigureParams",
    enable_logger
)]
fn configure<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    host.state().guard.ensure_owner(&ctx.sender())?;

    let params = ConfigureParams::deserial(&mut ctx.parameter_cursor())?;
    params.validate()?;

    host.state_mut().payment_token = params.payment_token;

    logger.log(&RewardEvent::PaymentTokenUpdated(params.payment_token))?;

    Ok(())
}

#[receive(
    contract = "RewardNft",
    name = "viewPaymentToken",
    return_value = "ContractAddress"
)]
fn view_payment_token<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<ContractAddress> {
    Ok(host.state().payment_token)
}

/// Send payment token held by this contract to the administrator.
/// Logs `EmergencyWithdrawal`.
///
/// It rejects if:
/// - Sender is not the administrator;
/// - Fails to parse parameter;
/// - The amount is zero;
/// - The contract holds less than the amount;
/// - The payment token rejects the transfer.
#[receive(
    mutable,
    contract = "RewardNft",
    name = "emergencyWithdraw",
    parameter = "PaymentTokenAmount",
    enable_logger
)]
fn emergency_withdraw<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let state = host.state();
    state.guard.ensure_owner(&ctx.sender())?;

    let amount = PaymentTokenAmount::deserial(&mut ctx.parameter_cursor())?;
    ensure!(amount.0 > 0, CustomContractError::InvalidAmount.into());

    let payment_token = state.payment_token;
    let owner = state.guard.owner();
    let self_address = Address::Contract(ctx.self_address());

    let balance = host
        .payment_token_balance_of(&payment_token, self_address)
        .map_err(CustomContractError::from)?;
    ensure!(
        balance.0 >= amount.0,
        CustomContractError::InsufficientBalance.into()
    );

    host.payment_token_transfer(&payment_token, self_address, owner, amount)
        .map_err(|_| CustomContractError::WithdrawalFailed)?;

    logger.log(&RewardEvent::EmergencyWithdrawal { to: owner, amount })?;

    Ok(())
}

/// Hand the administrator role to another account.
/// Logs `OwnershipTransferred`.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Sender is not the administrator;
/// - The new administrator is the null account.
#[receive(
    mutable,
    contract = "RewardNft",
    name = "transferOwnership",
    parameter = "AccountAddress",
    enable_logger
)]
fn transfer_ownership<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let new_owner = AccountAddress::deserial(&mut ctx.parameter_cursor())?;
    let previous = host
        .state_mut()
        .guard
        .handle_transfer(&ctx.sender(), new_owner)?;

    logger.log(&RewardEvent::OwnershipTransferred {
        previous,
        new: new_owner,
    })?;

    Ok(())
}

#[receive(contract = "RewardNft", name = "owner", return_value = "AccountAddress")]
fn owner<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ReceiveResult<AccountAddress> {
    Ok(host.state().guard.owner())
}

/// Execute a list of receipt transfers, in the order of the list.
///
/// Logs a `Transfer` event and invokes a receive hook function for every
/// transfer in the list.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the transfers fail to be executed, which could be if:
///     - The `token_id` does not exist.
///     - The sender is not the owner of the token, or an operator for this
///       specific `token_id` and `from` address.
///     - The token is not owned by the `from`.
/// - Fails to log event.
/// - Any of the receive hook function calls rejects.
#[receive(
    contract = "RewardNft",
    name = "transfer",
    parameter = "TransferParameter",
    enable_logger,
    mutable
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let TransferParams(transfers) = TransferParameter::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();

    for Transfer {
        token_id,
        amount,
        from,
        to,
        data,
    } in transfers
    {
        let state = host.state_mut();

        // Authenticate the sender for this transfer
        ensure!(
            from == sender || state.registry.is_operator(&from, &sender),
            ContractError::Unauthorized
        );

        let to_address = to.address();
        state.registry.transfer(&token_id, amount, &from, &to_address)?;

        // Log transfer event
        logger.log(&Cis2Event::Transfer(TransferEvent {
            token_id,
            amount,
            from,
            to: to_address,
        }))?;

        // If the receiver is a contract, we invoke its receive hook.
        if let Receiver::Contract(address, function) = to {
            let parameter = OnReceivingCis2Params {
                token_id,
                amount,
                from,
                data,
            };

            host.invoke_contract(
                &address,
                &parameter,
                function.as_entrypoint_name(),
                Amount::zero(),
            )?;
        }
    }

    Ok(())
}

/// Enable or disable addresses as operators of the sender address.
/// Logs an `UpdateOperator` event.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Fails to log event.
#[receive(
    contract = "RewardNft",
    name = "updateOperator",
    parameter = "UpdateOperatorParams",
    enable_logger,
    mutable
)]
fn update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let UpdateOperatorParams(params) = UpdateOperatorParams::deserial(&mut ctx.parameter_cursor())?;
    let sender = ctx.sender();
    let (state, state_builder) = host.state_and_builder();

    for param in params {
        // Update the operator in the state.
        match param.update {
            OperatorUpdate::Add => {
                state
                    .registry
                    .add_operator(&sender, &param.operator, state_builder)
            }
            OperatorUpdate::Remove => state.registry.remove_operator(&sender, &param.operator),
        }

        // Log the appropriate event
        logger.log(
            &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(
                UpdateOperatorEvent {
                    owner: sender,
                    operator: param.operator,
                    update: param.update,
                },
            ),
        )?;
    }

    Ok(())
}

/// Takes a list of queries. Each query is an owner address and some address to
/// check as an operator of the owner address.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "RewardNft",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    let params = OperatorOfQueryParams::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state();

    let response = params
        .queries
        .iter()
        .map(|query| state.registry.is_operator(&query.owner, &query.address))
        .collect::<Vec<bool>>();

    Ok(OperatorOfQueryResponse::from(response))
}

/// Get the balance of given token IDs and addresses.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "RewardNft",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    let params = ContractBalanceOfQueryParams::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state();

    let mut response = Vec::with_capacity(params.queries.len());
    for query in params.queries {
        response.push(state.registry.balance(&query.token_id, &query.address)?);
    }

    Ok(ContractBalanceOfQueryResponse::from(response))
}

/// Get the token metadata URLs of the given token IDs.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "RewardNft",
    name = "tokenMetadata",
    parameter = "ContractTokenMetadataQueryParams",
    return_value = "TokenMetadataQueryResponse"
)]
fn token_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokenMetadataQueryResponse> {
    let params = ContractTokenMetadataQueryParams::deserial(&mut ctx.parameter_cursor())?;
    let state = host.state();

    let mut response = Vec::with_capacity(params.queries.len());
    for token_id in params.queries {
        ensure!(
            state.registry.contains_token(&token_id),
            ContractError::InvalidTokenId
        );
        response.push(token_metadata_url(&token_id));
    }

    Ok(TokenMetadataQueryResponse::from(response))
}

/// Current owner of a receipt.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The `token_id` does not exist.
#[receive(
    contract = "RewardNft",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Address"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    let token_id = ContractTokenId::deserial(&mut ctx.parameter_cursor())?;
    host.state().registry.owner_of(&token_id)
}

/// Get the supported standards or addresses for a implementation given list of
/// standard identifiers.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "RewardNft",
    name = "supports",
    parameter = "SupportsQueryParams",
    return_value = "SupportsQueryResponse"
)]
fn supports<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<SupportsQueryResponse> {
    let params = SupportsQueryParams::deserial(&mut ctx.parameter_cursor())?;

    let response = params
        .queries
        .iter()
        .map(|std_id| {
            if SUPPORTS_STANDARDS.contains(&std_id.as_standard_identifier()) {
                SupportResult::Support
            } else {
                SupportResult::NoSupport
            }
        })
        .collect::<Vec<SupportResult>>();

    Ok(SupportsQueryResponse::from(response))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use crate::test::*;
    use test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const MAINTAINER: AccountAddress = AccountAddress([2; 32]);

    const USER_1: AccountAddress = AccountAddress([16; 32]);
    const USER_2: AccountAddress = AccountAddress([17; 32]);
    const USER_3: AccountAddress = AccountAddress([18; 32]);

    const PAYMENT_TOKEN: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const OTHER_PAYMENT_TOKEN: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };

    fn slot_time() -> Timestamp {
        Timestamp::from_timestamp_millis(1_650_000_000_000)
    }

    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&InitParams {
            payment_token: PAYMENT_TOKEN,
        });
        // admin is initialized to `ctx.origin()`
        ctx.set_init_origin(ADMIN).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        // Call the init method.
        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_RewardNft");

        TestHost::new(state, state_builder)
    }

    fn receive_ctx(sender: Address, parameter: &[u8]) -> TestReceiveContext {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender)
            .set_self_address(SELF_ADDRESS)
            .set_parameter(parameter)
            .set_metadata_slot_time(slot_time());
        ctx
    }

    fn reward(contributor: AccountAddress, amount: u64, name: &str) -> IssueRewardParams {
        IssueRewardParams {
            contributor,
            amount: TokenAmountU64(amount),
            repo_name: String::from("acme/repo"),
            contributor_name: String::from(name),
        }
    }

    /// Payment token accepting every transfer paid by `payer`.
    fn mock_payment_transfer(host: &mut TestHost<State<TestStateApi>>, payer: Address) {
        host.setup_mock_entrypoint(
            PAYMENT_TOKEN,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            accepting_mock::<PaymentTransferParameter, _>(
                move |TransferParams(transfers)| transfers.iter().all(|t| t.from == payer),
                (),
            ),
        );
    }

    /// Payment token rejecting every transfer, e.g. missing operator rights.
    fn mock_payment_transfer_rejected(host: &mut TestHost<State<TestStateApi>>) {
        host.setup_mock_entrypoint(
            PAYMENT_TOKEN,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            accepting_mock::<PaymentTransferParameter, _>(|_| false, ()),
        );
    }

    /// Payment token reporting `balance` for this contract.
    fn mock_payment_balance(host: &mut TestHost<State<TestStateApi>>, balance: u64) {
        host.setup_mock_entrypoint(
            PAYMENT_TOKEN,
            OwnedEntrypointName::new_unchecked("balanceOf".into()),
            answering_mock::<PaymentBalanceOfQueryParams, _, _>(
                move |params: &PaymentBalanceOfQueryParams| {
                    let is_self_query = params.queries.len() == 1
                        && params.queries[0].address == Address::Contract(SELF_ADDRESS);
                    if is_self_query {
                        Some(PaymentBalanceOfQueryResponse::from(vec![TokenAmountU64(
                            balance,
                        )]))
                    } else {
                        None
                    }
                },
            ),
        );
    }

    fn issue_one(
        host: &mut TestHost<State<TestStateApi>>,
        params: &IssueRewardParams,
    ) -> (ContractResult<ContractTokenId>, TestLogger) {
        let bytes = to_bytes(params);
        let ctx = receive_ctx(Address::Account(MAINTAINER), &bytes);
        let mut logger = TestLogger::init();
        let result = issue_reward(&ctx, host, &mut logger);
        (result, logger)
    }

    #[concordium_test]
    fn test_init_test_state() {
        let host = default_host();
        let state = host.state();

        claim_eq!(state.payment_token, PAYMENT_TOKEN);
        claim_eq!(state.total_supply(), 0);
        claim!(state.guard.is_owner(&Address::Account(ADMIN)));
        claim!(!state.guard.is_owner(&Address::Account(MAINTAINER)));
    }

    #[concordium_test]
    fn test_init_null_payment_token() {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&InitParams {
            payment_token: NULL_CONTRACT,
        });
        ctx.set_init_origin(ADMIN).set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let result = init(&ctx, &mut state_builder);
        claim_eq!(
            result.err(),
            Some(CustomContractError::InvalidAddress.into())
        );
    }

    #[concordium_test]
    fn test_issue_reward() {
        let mut host = default_host();
        mock_payment_transfer(&mut host, Address::Account(MAINTAINER));

        let (result, logger) = issue_one(&mut host, &reward(USER_1, 1_000_000, "alice"));

        claim_eq!(result, Ok(TokenIdU64(0)));
        claim_eq!(host.state().total_supply(), 1);
        claim_eq!(
            host.state().reward_data(&TokenIdU64(0)),
            Ok(RewardRecord {
                amount: TokenAmountU64(1_000_000),
                repo_name: String::from("acme/repo"),
                contributor_name: String::from("alice"),
                timestamp: slot_time(),
            })
        );
        claim_eq!(host.state().contributor_tokens(&USER_1), vec![TokenIdU64(0)]);
        claim_eq!(
            host.state().registry.owner_of(&TokenIdU64(0)),
            Ok(Address::Account(USER_1))
        );

        // Payment notification comes first, reward notification last
        claim_eq!(logger.logs.len(), 4);
        claim_eq!(
            logger.logs[0],
            to_bytes(&RewardEvent::FundsTransferred(FundsTransferredEvent {
                from: Address::Account(MAINTAINER),
                to: USER_1,
                amount: TokenAmountU64(1_000_000),
            }))
        );
        claim_eq!(
            logger.logs[1],
            to_bytes(&Cis2Event::Mint(MintEvent {
                token_id: TokenIdU64(0),
                amount: TokenAmountU8(1),
                owner: Address::Account(USER_1),
            }))
        );
        claim_eq!(
            logger.logs[2],
            to_bytes(&Cis2Event::TokenMetadata::<_, ContractTokenAmount>(
                TokenMetadataEvent {
                    token_id: TokenIdU64(0),
                    metadata_url: token_metadata_url(&TokenIdU64(0)),
                }
            ))
        );
        claim_eq!(
            logger.logs[3],
            to_bytes(&RewardEvent::RewardIssued(RewardIssuedEvent {
                token_id: TokenIdU64(0),
                contributor: USER_1,
                amount: TokenAmountU64(1_000_000),
                repo_name: String::from("acme/repo"),
                contributor_name: String::from("alice"),
            }))
        );
    }

    #[concordium_test]
    fn test_issue_reward_returns_previous_supply() {
        let mut host = default_host();
        mock_payment_transfer(&mut host, Address::Account(MAINTAINER));

        for expected in 0..4u64 {
            let supply = host.state().total_supply();
            claim_eq!(supply, expected);

            let (result, _) = issue_one(&mut host, &reward(USER_1, 10, "alice"));
            claim_eq!(result, Ok(TokenIdU64(supply)));
            claim_eq!(host.state().total_supply(), supply + 1);
        }

        claim_eq!(
            host.state().contributor_tokens(&USER_1),
            vec![TokenIdU64(0), TokenIdU64(1), TokenIdU64(2), TokenIdU64(3)]
        );
    }

    #[concordium_test]
    fn test_issue_reward_transfer_failed() {
        let mut host = default_host();
        mock_payment_transfer_rejected(&mut host);

        let (result, logger) = issue_one(&mut host, &reward(USER_1, 1_000_000, "alice"));

        claim_eq!(result, Err(CustomContractError::TransferFailed.into()));
        claim_eq!(host.state().total_supply(), 0);
        claim_eq!(host.state().contributor_tokens(&USER_1), Vec::new());
        claim_eq!(
            host.state().reward_data(&TokenIdU64(0)),
            Err(CustomContractError::TokenNotFound)
        );
        claim!(!host.state().registry.contains_token(&TokenIdU64(0)));
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_issue_reward_invalid_params() {
        let mut host = default_host();

        let cases = [
            (
                reward(NULL_ACCOUNT, 10, "alice"),
                CustomContractError::InvalidContributor,
            ),
            (reward(USER_1, 0, "alice"), CustomContractError::InvalidAmount),
            (
                IssueRewardParams {
                    repo_name: String::new(),
                    ..reward(USER_1, 10, "alice")
                },
                CustomContractError::EmptyRepoName,
            ),
            (
                reward(USER_1, 10, ""),
                CustomContractError::EmptyContributorName,
            ),
        ];

        // Validation happens before the payment token is ever invoked
        for (params, error) in cases {
            let (result, logger) = issue_one(&mut host, &params);
            claim_eq!(result, Err(error.into()));
            claim!(logger.logs.is_empty());
        }

        claim_eq!(host.state().total_supply(), 0);
    }

    #[concordium_test]
    fn test_issue_reward_batch() {
        let mut host = default_host();
        mock_payment_transfer(&mut host, Address::Account(MAINTAINER));

        let (result, _) = issue_one(&mut host, &reward(USER_1, 1_000_000, "alice"));
        claim_eq!(result, Ok(TokenIdU64(0)));

        let params = IssueRewardBatchParams {
            contributors: vec![USER_2, USER_3],
            amounts: vec![TokenAmountU64(5), TokenAmountU64(10)],
            contributor_names: vec![String::from("bob"), String::from("carl")],
            repo_name: String::from("acme/repo"),
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(MAINTAINER), &bytes);
        let mut logger = TestLogger::init();

        let result = issue_reward_batch(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(vec![TokenIdU64(1), TokenIdU64(2)]));
        claim_eq!(host.state().total_supply(), 3);
        claim_eq!(logger.logs.len(), 8);

        claim_eq!(host.state().contributor_tokens(&USER_2), vec![TokenIdU64(1)]);
        claim_eq!(host.state().contributor_tokens(&USER_3), vec![TokenIdU64(2)]);

        let record = host
            .state()
            .reward_data(&TokenIdU64(2))
            .expect_report("Reward 2 should exist");
        claim_eq!(record.amount, TokenAmountU64(10));
        claim_eq!(record.contributor_name, "carl");
        claim_eq!(record.repo_name, "acme/repo");
    }

    #[concordium_test]
    fn test_issue_reward_batch_length_mismatch() {
        let mut host = default_host();

        let params = IssueRewardBatchParams {
            contributors: vec![USER_2, USER_3],
            amounts: vec![TokenAmountU64(5)],
            contributor_names: vec![String::from("bob"), String::from("carl")],
            repo_name: String::from("acme/repo"),
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(MAINTAINER), &bytes);
        let mut logger = TestLogger::init();

        let result = issue_reward_batch(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::LengthMismatch.into()));
        claim_eq!(host.state().total_supply(), 0);
        claim_eq!(host.state().contributor_tokens(&USER_2), Vec::new());
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_issue_reward_batch_empty() {
        let mut host = default_host();

        let params = IssueRewardBatchParams {
            contributors: vec![],
            amounts: vec![],
            contributor_names: vec![],
            repo_name: String::from("acme/repo"),
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(MAINTAINER), &bytes);
        let mut logger = TestLogger::init();

        let result = issue_reward_batch(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(Vec::new()));
        claim_eq!(host.state().total_supply(), 0);
    }

    #[concordium_test]
    fn test_issue_reward_batch_invalid_entry() {
        let mut host = default_host();
        mock_payment_transfer(&mut host, Address::Account(MAINTAINER));

        let params = IssueRewardBatchParams {
            contributors: vec![USER_2, USER_3],
            amounts: vec![TokenAmountU64(5), TokenAmountU64(0)],
            contributor_names: vec![String::from("bob"), String::from("carl")],
            repo_name: String::from("acme/repo"),
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(MAINTAINER), &bytes);
        let mut logger = TestLogger::init();

        // The host discards the effects of the first entry along with the
        // rejected invocation
        let result = issue_reward_batch(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::InvalidAmount.into()));
    }

    #[concordium_test]
    fn test_issue_reward_batch_transfer_failed() {
        let mut host = default_host();
        // Payment token pays USER_2 but refuses the transfer to USER_3
        host.setup_mock_entrypoint(
            PAYMENT_TOKEN,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            accepting_mock::<PaymentTransferParameter, _>(
                |TransferParams(transfers)| {
                    transfers
                        .iter()
                        .all(|t| t.to.address() == Address::Account(USER_2))
                },
                (),
            ),
        );

        let params = IssueRewardBatchParams {
            contributors: vec![USER_2, USER_3],
            amounts: vec![TokenAmountU64(5), TokenAmountU64(10)],
            contributor_names: vec![String::from("bob"), String::from("carl")],
            repo_name: String::from("acme/repo"),
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(MAINTAINER), &bytes);
        let mut logger = TestLogger::init();

        let result = issue_reward_batch(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::TransferFailed.into()));
        // No receipt is minted for the refused transfer
        claim_eq!(host.state().contributor_tokens(&USER_3), Vec::new());
        claim!(!host.state().registry.contains_token(&TokenIdU64(1)));
    }

    #[concordium_test]
    fn test_get_reward_data() {
        let mut host = default_host();
        mock_payment_transfer(&mut host, Address::Account(MAINTAINER));
        let (result, _) = issue_one(&mut host, &reward(USER_1, 1_000_000, "alice"));
        claim_eq!(result, Ok(TokenIdU64(0)));

        let bytes = to_bytes(&TokenIdU64(0));
        let ctx = receive_ctx(Address::Account(USER_2), &bytes);
        let record = get_reward_data(&ctx, &host).expect_report("Reward 0 should exist");
        claim_eq!(record.amount, TokenAmountU64(1_000_000));
        claim_eq!(record.repo_name, "acme/repo");
        claim_eq!(record.contributor_name, "alice");
        claim!(record.timestamp.timestamp_millis() > 0);

        let bytes = to_bytes(&TokenIdU64(1));
        let ctx = receive_ctx(Address::Account(USER_2), &bytes);
        claim_eq!(
            get_reward_data(&ctx, &host),
            Err(CustomContractError::TokenNotFound.into())
        );
    }

    #[concordium_test]
    fn test_get_contributor_tokens_and_supply() {
        let mut host = default_host();
        mock_payment_transfer(&mut host, Address::Account(MAINTAINER));
        let (result, _) = issue_one(&mut host, &reward(USER_1, 1_000_000, "alice"));
        claim_eq!(result, Ok(TokenIdU64(0)));

        let bytes = to_bytes(&USER_1);
        let ctx = receive_ctx(Address::Account(USER_2), &bytes);
        claim_eq!(get_contributor_tokens(&ctx, &host), Ok(vec![TokenIdU64(0)]));

        let bytes = to_bytes(&USER_2);
        let ctx = receive_ctx(Address::Account(USER_2), &bytes);
        claim_eq!(get_contributor_tokens(&ctx, &host), Ok(Vec::new()));

        let ctx = receive_ctx(Address::Account(USER_2), &[]);
        claim_eq!(total_supply(&ctx, &host), Ok(1));
    }

    #[concordium_test]
    fn test_configure() {
        let mut host = default_host();
        let bytes = to_bytes(&ConfigureParams {
            payment_token: OTHER_PAYMENT_TOKEN,
        });

        // Non-administrator is rejected and the stored address is unchanged
        let ctx = receive_ctx(Address::Account(MAINTAINER), &bytes);
        let mut logger = TestLogger::init();
        let result = configure(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::Unauthorized.into()));
        claim_eq!(host.state().payment_token, PAYMENT_TOKEN);
        claim!(logger.logs.is_empty());

        let ctx = receive_ctx(Address::Account(ADMIN), &bytes);
        let result = configure(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().payment_token, OTHER_PAYMENT_TOKEN);
        claim_eq!(
            logger.logs,
            vec![to_bytes(&RewardEvent::PaymentTokenUpdated(
                OTHER_PAYMENT_TOKEN
            ))]
        );

        let ctx = receive_ctx(Address::Account(ADMIN), &[]);
        claim_eq!(view_payment_token(&ctx, &host), Ok(OTHER_PAYMENT_TOKEN));
    }

    #[concordium_test]
    fn test_configure_null_address() {
        let mut host = default_host();
        let bytes = to_bytes(&ConfigureParams {
            payment_token: NULL_CONTRACT,
        });
        let ctx = receive_ctx(Address::Account(ADMIN), &bytes);
        let mut logger = TestLogger::init();

        let result = configure(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::InvalidAddress.into()));
        claim_eq!(host.state().payment_token, PAYMENT_TOKEN);
    }

    #[concordium_test]
    fn test_get_contract_balance() {
        let mut host = default_host();
        mock_payment_balance(&mut host, 50);

        let ctx = receive_ctx(Address::Account(USER_1), &[]);
        let result = get_contract_balance(&ctx, &host);

        claim_eq!(result, Ok(TokenAmountU64(50)));
    }

    #[concordium_test]
    fn test_emergency_withdraw() {
        let mut host = default_host();
        mock_payment_balance(&mut host, 50);
        host.setup_mock_entrypoint(
            PAYMENT_TOKEN,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            accepting_mock::<PaymentTransferParameter, _>(
                |TransferParams(transfers)| {
                    transfers.len() == 1
                        && transfers[0].from == Address::Contract(SELF_ADDRESS)
                        && transfers[0].amount == TokenAmountU64(50)
                        && transfers[0].to.address() == Address::Account(ADMIN)
                },
                (),
            ),
        );

        let bytes = to_bytes(&TokenAmountU64(50));
        let ctx = receive_ctx(Address::Account(ADMIN), &bytes);
        let mut logger = TestLogger::init();
        let result = emergency_withdraw(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&RewardEvent::EmergencyWithdrawal {
                to: ADMIN,
                amount: TokenAmountU64(50),
            })]
        );
    }

    #[concordium_test]
    fn test_emergency_withdraw_insufficient_balance() {
        let mut host = default_host();
        mock_payment_balance(&mut host, 50);

        let bytes = to_bytes(&TokenAmountU64(100));
        let ctx = receive_ctx(Address::Account(ADMIN), &bytes);
        let mut logger = TestLogger::init();
        let result = emergency_withdraw(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::InsufficientBalance.into()));
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_emergency_withdraw_rejects_invalid_requests() {
        let mut host = default_host();
        let mut logger = TestLogger::init();

        let bytes = to_bytes(&TokenAmountU64(10));
        let ctx = receive_ctx(Address::Account(MAINTAINER), &bytes);
        claim_eq!(
            emergency_withdraw(&ctx, &mut host, &mut logger),
            Err(CustomContractError::Unauthorized.into())
        );

        let bytes = to_bytes(&TokenAmountU64(0));
        let ctx = receive_ctx(Address::Account(ADMIN), &bytes);
        claim_eq!(
            emergency_withdraw(&ctx, &mut host, &mut logger),
            Err(CustomContractError::InvalidAmount.into())
        );
    }

    #[concordium_test]
    fn test_emergency_withdraw_failed() {
        let mut host = default_host();
        mock_payment_balance(&mut host, 50);
        mock_payment_transfer_rejected(&mut host);

        let bytes = to_bytes(&TokenAmountU64(20));
        let ctx = receive_ctx(Address::Account(ADMIN), &bytes);
        let mut logger = TestLogger::init();
        let result = emergency_withdraw(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::WithdrawalFailed.into()));
    }

    #[concordium_test]
    fn test_transfer_ownership() {
        let mut host = default_host();
        let mut logger = TestLogger::init();
        let bytes = to_bytes(&USER_1);

        let ctx = receive_ctx(Address::Account(MAINTAINER), &bytes);
        claim_eq!(
            transfer_ownership(&ctx, &mut host, &mut logger),
            Err(CustomContractError::Unauthorized.into())
        );

        let ctx = receive_ctx(Address::Account(ADMIN), &bytes);
        claim_eq!(transfer_ownership(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&RewardEvent::OwnershipTransferred {
                previous: ADMIN,
                new: USER_1,
            })]
        );

        let ctx = receive_ctx(Address::Account(ADMIN), &[]);
        claim_eq!(owner(&ctx, &host), Ok(USER_1));

        // Former administrator can no longer reconfigure
        let bytes = to_bytes(&ConfigureParams {
            payment_token: OTHER_PAYMENT_TOKEN,
        });
        let ctx = receive_ctx(Address::Account(ADMIN), &bytes);
        claim_eq!(
            configure(&ctx, &mut host, &mut logger),
            Err(CustomContractError::Unauthorized.into())
        );
    }

    #[concordium_test]
    fn test_transfer_receipt() {
        let mut host = default_host();
        mock_payment_transfer(&mut host, Address::Account(MAINTAINER));
        let (result, _) = issue_one(&mut host, &reward(USER_1, 1_000_000, "alice"));
        claim_eq!(result, Ok(TokenIdU64(0)));

        let params = TransferParams(vec![Transfer {
            token_id: TokenIdU64(0),
            amount: TokenAmountU8(1),
            from: Address::Account(USER_1),
            to: Receiver::Account(USER_2),
            data: AdditionalData::empty(),
        }]);
        let bytes = to_bytes(&params);

        // Neither owner nor operator
        let ctx = receive_ctx(Address::Account(USER_3), &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(
            transfer(&ctx, &mut host, &mut logger),
            Err(ContractError::Unauthorized)
        );

        let ctx = receive_ctx(Address::Account(USER_1), &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(transfer(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(
            host.state().registry.owner_of(&TokenIdU64(0)),
            Ok(Address::Account(USER_2))
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&Cis2Event::Transfer(TransferEvent {
                token_id: TokenIdU64(0),
                amount: TokenAmountU8(1),
                from: Address::Account(USER_1),
                to: Address::Account(USER_2),
            }))]
        );

        // The reward record stays with the token and the index with the
        // original contributor
        claim_eq!(host.state().contributor_tokens(&USER_1), vec![TokenIdU64(0)]);
        claim_eq!(
            host.state()
                .reward_data(&TokenIdU64(0))
                .map(|record| record.contributor_name),
            Ok(String::from("alice"))
        );
    }

    #[concordium_test]
    fn test_operator_transfer_and_balance_of() {
        let mut host = default_host();
        mock_payment_transfer(&mut host, Address::Account(MAINTAINER));
        let (result, _) = issue_one(&mut host, &reward(USER_1, 1_000_000, "alice"));
        claim_eq!(result, Ok(TokenIdU64(0)));

        let params = UpdateOperatorParams(vec![UpdateOperator {
            update: OperatorUpdate::Add,
            operator: Address::Account(USER_3),
        }]);
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(USER_1), &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(update_operator(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(logger.logs.len(), 1);

        let params = OperatorOfQueryParams {
            queries: vec![
                OperatorOfQuery {
                    owner: Address::Account(USER_1),
                    address: Address::Account(USER_3),
                },
                OperatorOfQuery {
                    owner: Address::Account(USER_2),
                    address: Address::Account(USER_3),
                },
            ],
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(USER_3), &bytes);
        let response = operator_of(&ctx, &host).expect_report("Operator query should succeed");
        claim_eq!(response.0, vec![true, false]);

        let params = TransferParams(vec![Transfer {
            token_id: TokenIdU64(0),
            amount: TokenAmountU8(1),
            from: Address::Account(USER_1),
            to: Receiver::Account(USER_2),
            data: AdditionalData::empty(),
        }]);
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(USER_3), &bytes);
        let mut logger = TestLogger::init();
        claim_eq!(transfer(&ctx, &mut host, &mut logger), Ok(()));

        let params = ContractBalanceOfQueryParams {
            queries: vec![
                BalanceOfQuery {
                    token_id: TokenIdU64(0),
                    address: Address::Account(USER_1),
                },
                BalanceOfQuery {
                    token_id: TokenIdU64(0),
                    address: Address::Account(USER_2),
                },
            ],
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(USER_3), &bytes);
        let response = balance_of(&ctx, &host).expect_report("Balance query should succeed");
        claim_eq!(response.0, vec![TokenAmountU8(0), TokenAmountU8(1)]);

        let bytes = to_bytes(&TokenIdU64(0));
        let ctx = receive_ctx(Address::Account(USER_3), &bytes);
        claim_eq!(owner_of(&ctx, &host), Ok(Address::Account(USER_2)));
    }

    #[concordium_test]
    fn test_token_metadata() {
        let mut host = default_host();
        mock_payment_transfer(&mut host, Address::Account(MAINTAINER));
        let (result, _) = issue_one(&mut host, &reward(USER_1, 1_000_000, "alice"));
        claim_eq!(result, Ok(TokenIdU64(0)));

        let params = ContractTokenMetadataQueryParams {
            queries: vec![TokenIdU64(0)],
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(USER_2), &bytes);
        let response =
            token_metadata(&ctx, &host).expect_report("Metadata query should succeed");
        claim_eq!(response.0.len(), 1);
        claim_eq!(
            response.0[0].url,
            "https://rewards.bictory.io/metadata/0000000000000000"
        );

        let params = ContractTokenMetadataQueryParams {
            queries: vec![TokenIdU64(0), TokenIdU64(1)],
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(USER_2), &bytes);
        claim_eq!(
            token_metadata(&ctx, &host).err(),
            Some(ContractError::InvalidTokenId)
        );
    }

    #[concordium_test]
    fn test_supports() {
        let host = default_host();

        let params = SupportsQueryParams {
            queries: vec![
                StandardIdentifierOwned::new_unchecked("CIS-0".into()),
                StandardIdentifierOwned::new_unchecked("CIS-2".into()),
                StandardIdentifierOwned::new_unchecked("CIS-1".into()),
            ],
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(Address::Account(USER_1), &bytes);

        let response = supports(&ctx, &host).expect_report("Supports query should succeed");
        claim_eq!(response.results.len(), 3);
        claim!(matches!(response.results[0], SupportResult::Support));
        claim!(matches!(response.results[1], SupportResult::Support));
        claim!(matches!(response.results[2], SupportResult::NoSupport));
    }
}
