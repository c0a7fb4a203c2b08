//! 核心错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("not enough points for {shape}: need {needed}, got {got}")]
    NotEnoughPoints {
        shape: &'static str,
        needed: usize,
        got: usize,
    },

    #[error("degenerate {shape}: {reason}")]
    Degenerate {
        shape: &'static str,
        reason: &'static str,
    },
}
