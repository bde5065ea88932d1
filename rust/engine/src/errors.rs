use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("it is not seat {0}'s turn")]
    NotYourTurn(usize),
    #[error("cannot check while facing a bet")]
    IllegalCheck,
    #[error("raise to {amount} is below the minimum of {minimum}")]
    RaiseTooSmall { amount: u32, minimum: u32 },
    #[error("hand is already complete")]
    HandComplete,
    #[error("hand is not complete yet")]
    HandNotComplete,
    #[error("no seat {0} in this hand")]
    SeatNotFound(usize),
    #[error("hand requires at least two participants")]
    TooFewPlayers,
    #[error("invalid hand configuration: {0}")]
    InvalidConfig(String),
    #[error("deck exhausted while dealing")]
    DeckExhausted,
    #[error("a hand cannot be evaluated from {0} cards")]
    InvalidCardCount(usize),
    #[error("corrupt action log: {0}")]
    CorruptLog(String),
}
