//! Translation of wallet and contract failures into user-facing reasons.
//!
//! The market contract aborts with these codes:
//! `EMarketEnded = 0`, `ENotWhitelisted = 1`, `EInvalidOption = 3`,
//! `EAlreadyVoted = 4`. Matching is by substring on the failure text, so new
//! patterns can be added here without touching call sites.

use crate::errors::WalletFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    UserCancelled,
    AlreadyVoted,
    MarketEnded,
    NotWhitelisted,
    InvalidOption,
    InsufficientFunds,
    Failed,
}

impl FailureReason {
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::UserCancelled => "Transaction cancelled by user",
            FailureReason::AlreadyVoted => "You have already voted in this market",
            FailureReason::MarketEnded => "This market has ended",
            FailureReason::NotWhitelisted => "Your wallet is not whitelisted for this market",
            FailureReason::InvalidOption => "Invalid option selected",
            FailureReason::InsufficientFunds => "Insufficient SUI balance",
            FailureReason::Failed => "Transaction failed",
        }
    }

    fn abort_code(&self) -> Option<u64> {
        match self {
            FailureReason::AlreadyVoted => Some(4),
            FailureReason::MarketEnded => Some(0),
            FailureReason::NotWhitelisted => Some(1),
            FailureReason::InvalidOption => Some(3),
            _ => None,
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

// Highest priority first.
const RULES: &[(FailureReason, &[&str])] = &[
    (FailureReason::UserCancelled, &["User rejected", "rejected the request"]),
    (FailureReason::AlreadyVoted, &["EAlreadyVoted", "code: 4", "abort code: 4"]),
    (FailureReason::MarketEnded, &["EMarketEnded", "code: 0", "abort code: 0"]),
    (FailureReason::NotWhitelisted, &["ENotWhitelisted", "code: 1", "abort code: 1"]),
    (FailureReason::InvalidOption, &["EInvalidOption", "code: 3", "abort code: 3"]),
    (FailureReason::InsufficientFunds, &["Insufficient"]),
];

pub fn translate(failure: &WalletFailure) -> FailureReason {
    translate_text(&failure.text())
}

pub fn translate_text(text: &str) -> FailureReason {
    let move_abort = move_abort_code(text);
    RULES
        .iter()
        .find(|(reason, patterns)| {
            patterns.iter().any(|pattern| text.contains(pattern))
                || (move_abort.is_some() && reason.abort_code() == move_abort)
        })
        .map(|(reason, _)| *reason)
        .unwrap_or(FailureReason::Failed)
}

/// Abort code from Sui's `MoveAbort(MoveLocation { .. }, 4) in command 0` rendering.
fn move_abort_code(text: &str) -> Option<u64> {
    let start = text.find("MoveAbort(")?;
    let rest = &text[start..];
    let close = rest.find(") in command").or_else(|| rest.rfind(')'))?;
    let (_, code) = rest[..close].rsplit_once(',')?;
    code.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cancellation_wins_over_abort_codes() {
        let text = "User rejected the request; MoveAbort in vote with abort code: 4";
        assert_eq!(translate_text(text), FailureReason::UserCancelled);
    }

    #[test]
    fn known_abort_codes() {
        assert_eq!(translate_text("Dry run failed, code: 4"), FailureReason::AlreadyVoted);
        assert_eq!(translate_text("abort code: 0"), FailureReason::MarketEnded);
        assert_eq!(translate_text("ENotWhitelisted"), FailureReason::NotWhitelisted);
        assert_eq!(translate_text("EInvalidOption in market::vote"), FailureReason::InvalidOption);
        assert_eq!(
            translate_text("InsufficientGas: budget too low"),
            FailureReason::InsufficientFunds
        );
    }

    #[test]
    fn move_abort_rendering() {
        let text = "MoveAbort(MoveLocation { module: ModuleId { address: 0x1, name: Identifier(\"market\") }, function: 2, instruction: 18, function_name: Some(\"vote\") }, 1) in command 0";
        assert_eq!(move_abort_code(text), Some(1));
        assert_eq!(translate_text(text), FailureReason::NotWhitelisted);
    }

    #[test]
    fn already_voted_outranks_market_ended() {
        assert_eq!(translate_text("EMarketEnded EAlreadyVoted"), FailureReason::AlreadyVoted);
    }

    #[test]
    fn unknown_text_is_generic() {
        assert_eq!(translate_text("connection reset"), FailureReason::Failed);
        assert_eq!(translate_text(""), FailureReason::Failed);
    }

    #[test]
    fn translates_json_payloads() {
        let failure = WalletFailure::payload(json!({ "cause": "abort code: 3" }));
        assert_eq!(translate(&failure), FailureReason::InvalidOption);
    }
}
