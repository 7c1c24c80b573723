//! Derived, read-only state of a market for one viewer at one instant.

use chrono::{Duration, Utc};

use crate::states::Market;

#[derive(Debug, Clone, PartialEq)]
pub struct OptionView {
    pub label: String,
    pub votes: u64,
    /// Share of all votes in percent, unrounded.
    pub percentage: f64,
    pub is_leading: bool,
}

impl OptionView {
    /// Percentage rendered to one decimal place.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketView {
    pub question: String,
    pub options: Vec<OptionView>,
    pub total_votes: u64,
    pub deadline: u64,
    pub whitelist_enabled: bool,
    pub whitelist_count: usize,
    pub is_ended: bool,
    pub has_voted: bool,
    pub is_whitelisted: bool,
    pub can_vote: bool,
    pub is_creator: bool,
    pub connected: bool,
}

impl MarketView {
    pub fn compute(market: &Market, user: Option<&str>, now_ms: u64) -> Self {
        let is_ended = now_ms > market.deadline;
        let total_votes = (0..market.options.len())
            .map(|i| market.vote_count(i))
            .fold(0u64, u64::saturating_add);
        let max_votes = (0..market.options.len())
            .map(|i| market.vote_count(i))
            .max()
            .unwrap_or(0);

        let options = market
            .options
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let votes = market.vote_count(i);
                let percentage = if total_votes > 0 {
                    votes as f64 / total_votes as f64 * 100.0
                } else {
                    0.0
                };
                OptionView {
                    label: label.clone(),
                    votes,
                    percentage,
                    is_leading: votes == max_votes && votes > 0,
                }
            })
            .collect();

        // `voters` backs both checks; see DESIGN.md.
        let has_voted = user.is_some_and(|u| market.has_voter(u));
        let is_whitelisted = !market.whitelist_enabled
            || user.map_or(true, |u| market.is_initial_voter(u) || market.has_voter(u));
        let can_vote = user.is_some() && !is_ended && !has_voted && is_whitelisted;
        let is_creator = user.is_some_and(|u| u == market.creator);

        Self {
            question: market.question.clone(),
            options,
            total_votes,
            deadline: market.deadline,
            whitelist_enabled: market.whitelist_enabled,
            whitelist_count: market.initial_voters.len(),
            is_ended,
            has_voted,
            is_whitelisted,
            can_vote,
            is_creator,
            connected: user.is_some(),
        }
    }

    /// Treats the viewer as having voted before the chain reflects it.
    pub fn mark_voted(&mut self) {
        self.has_voted = true;
        self.can_vote = false;
    }

    /// Index of the first leading option.
    pub fn leading_option(&self) -> Option<usize> {
        self.options.iter().position(|option| option.is_leading)
    }

    pub fn show_whitelist_manager(&self) -> bool {
        self.is_creator && self.whitelist_enabled
    }

    pub fn show_not_whitelisted(&self) -> bool {
        self.connected && self.whitelist_enabled && !self.is_whitelisted
    }

    pub fn vote_enabled(&self, voting_for: Option<usize>) -> bool {
        self.can_vote && voting_for.is_none()
    }

    pub fn vote_label(&self, index: usize, voting_for: Option<usize>) -> &'static str {
        if voting_for == Some(index) {
            "Voting..."
        } else if self.has_voted {
            "Already Voted"
        } else if self.whitelist_enabled && !self.is_whitelisted {
            "Not Whitelisted"
        } else if self.is_ended {
            "Ended"
        } else {
            "Vote"
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_ended {
            "Ended"
        } else {
            "Active"
        }
    }

    pub fn time_remaining(&self, now_ms: u64) -> String {
        format_time_remaining(self.deadline, now_ms)
    }
}

pub fn format_time_remaining(deadline_ms: u64, now_ms: u64) -> String {
    if deadline_ms <= now_ms {
        return "Ended".to_string();
    }
    let remaining = Duration::milliseconds(i64::try_from(deadline_ms - now_ms).unwrap_or(i64::MAX));
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

pub fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
