use concordium_std::test_infrastructure::MockFn;
use concordium_std::*;

/// Entrypoint of an external contract that parses its parameter as `P`.
/// The call succeeds with `return_value` only when `accept` approves the
/// parameter and traps otherwise, like a payment token refusing a transfer.
pub fn accepting_mock<P: Deserial, S>(
    accept: impl Fn(&P) -> bool + 'static,
    return_value: impl Clone + Serial + 'static,
) -> MockFn<S> {
    MockFn::new(move |parameter, _amount, _balance, _state| {
        let parsed = P::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
        if !accept(&parsed) {
            return Err(CallContractError::Trap);
        }
        Ok((false, Some(return_value.clone())))
    })
}

/// Entrypoint of an external contract answering queries of type `P`.
/// A query `answer` has no reply for traps.
pub fn answering_mock<P: Deserial, R: Serial, S>(
    answer: impl Fn(&P) -> Option<R> + 'static,
) -> MockFn<S> {
    MockFn::new(move |parameter, _amount, _balance, _state| {
        let parsed = P::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
        match answer(&parsed) {
            Some(reply) => Ok((false, Some(reply))),
            None => Err(CallContractError::Trap),
        }
    })
}
