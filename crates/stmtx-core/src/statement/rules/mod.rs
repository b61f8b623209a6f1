//! Rule-based building blocks of the line-parsing statement engine.

pub mod amounts;
pub mod classifier;
pub mod decomposer;
pub mod patterns;

pub use amounts::{
    format_amount, format_optional, parse_amount, reconcile, ReconciledAmounts, Resolution,
    RunningState, UNRESOLVED_AMOUNT,
};
pub use classifier::{classify, LineClass};
pub use decomposer::{decompose, PartialRow, MIN_ROW_TOKENS};
pub use patterns::*;
