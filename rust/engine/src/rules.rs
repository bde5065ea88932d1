use crate::betting::ActionIntent;
use crate::errors::EngineError;
use crate::seat::Chips;

/// An intent that passed the betting rules, with the exact chip movement it
/// will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(Chips),
    RaiseTo { total: Chips, spend: Chips },
    AllIn(Chips),
}

/// Validates a player's intent against the betting rules and their stack.
///
/// Raise amounts are the *total* target bet level for the round, not an
/// increment. A raise below `current_bet + min_raise` is rejected unless it
/// puts the player all-in, which is legal but does not re-open the betting.
/// Calls are capped at the stack; exhausting the stack makes the seat
/// all-in.
///
/// # Examples
///
/// ```
/// use felt_engine::betting::ActionIntent;
/// use felt_engine::rules::{validate_action, ValidatedAction};
///
/// // Calling with a short stack moves what is left.
/// let v = validate_action(40, 0, 50, 10, ActionIntent::Call);
/// assert!(matches!(v, Ok(ValidatedAction::Call(40))));
///
/// // A raise to 60 over a bet of 30 with a 20 minimum increment is legal.
/// let v = validate_action(1000, 10, 30, 20, ActionIntent::Raise { to: 60 });
/// assert!(matches!(v, Ok(ValidatedAction::RaiseTo { total: 60, spend: 50 })));
/// ```
pub fn validate_action(
    stack: Chips,
    round_bet: Chips,
    current_bet: Chips,
    min_raise: Chips,
    intent: ActionIntent,
) -> Result<ValidatedAction, EngineError> {
    let to_call = current_bet.saturating_sub(round_bet);
    match intent {
        ActionIntent::Fold => Ok(ValidatedAction::Fold),
        ActionIntent::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(EngineError::IllegalCheck)
            }
        }
        ActionIntent::Call => Ok(ValidatedAction::Call(to_call.min(stack))),
        ActionIntent::Raise { to } => {
            let spend = to.saturating_sub(round_bet);
            if spend >= stack {
                // Shoving for less than a full raise is legal.
                return Ok(ValidatedAction::AllIn(stack));
            }
            if to < current_bet + min_raise {
                return Err(EngineError::RaiseTooSmall {
                    amount: to,
                    minimum: current_bet + min_raise,
                });
            }
            Ok(ValidatedAction::RaiseTo { total: to, spend })
        }
        ActionIntent::AllIn => Ok(ValidatedAction::AllIn(stack)),
    }
}
