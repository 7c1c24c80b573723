//! Randomised checks of market views and failure translation.

use float_cmp::approx_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use polysui::failure::translate_text;
use polysui::{FailureReason, Market, MarketView};

const ROUNDS: usize = 500;
const NOW: u64 = 1_700_000_000_000;
const USERS: [&str; 4] = ["0xa1", "0xb2", "0xc3", "0xd4"];

fn some_users(rng: &mut StdRng) -> Vec<String> {
    USERS
        .iter()
        .filter(|_| rng.gen_bool(0.4))
        .map(|u| u.to_string())
        .collect()
}

fn random_market(rng: &mut StdRng) -> Market {
    let len: usize = rng.gen_range(2..=10);
    Market {
        question: "q".into(),
        options: (0..len).map(|i| format!("option {i}")).collect(),
        votes: (0..len)
            .map(|_| if rng.gen_bool(0.3) { 0 } else { rng.gen_range(0..1_000) })
            .collect(),
        deadline: NOW - 30_000 + rng.gen_range(0..60_000),
        whitelist_enabled: rng.gen_bool(0.5),
        initial_voters: some_users(rng),
        voters: some_users(rng),
        creator: USERS[rng.gen_range(0..USERS.len())].to_string(),
    }
}

fn random_user(rng: &mut StdRng) -> Option<&'static str> {
    let i = rng.gen_range(0..=USERS.len());
    USERS.get(i).copied()
}

#[test]
fn percentages_cover_the_whole_tally() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..ROUNDS {
        let market = random_market(&mut rng);
        let view = MarketView::compute(&market, None, NOW);
        let sum: f64 = view.options.iter().map(|o| o.percentage).sum();
        if view.total_votes == 0 {
            assert!(view.options.iter().all(|o| o.percentage == 0.0 && !o.is_leading));
            assert_eq!(view.leading_option(), None);
        } else {
            assert!(approx_eq!(f64, sum, 100.0, epsilon = 1e-9), "{sum}");
            let max = view.options.iter().map(|o| o.votes).max().unwrap_or(0);
            for option in &view.options {
                assert_eq!(option.is_leading, option.votes == max);
            }
        }
    }
}

#[test]
fn vote_eligibility_follows_its_inputs() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..ROUNDS {
        let market = random_market(&mut rng);
        let user = random_user(&mut rng);
        let view = MarketView::compute(&market, user, NOW);

        if !market.whitelist_enabled {
            assert!(view.is_whitelisted);
        }
        if view.has_voted || view.is_ended || user.is_none() {
            assert!(!view.can_vote);
        }
        assert_eq!(
            view.can_vote,
            user.is_some() && !view.is_ended && !view.has_voted && view.is_whitelisted
        );
        assert_eq!(view.is_ended, NOW > market.deadline);
        assert_eq!(view.whitelist_count, market.initial_voters.len());
    }
}

#[test]
fn cancellation_outranks_every_abort_code() {
    let mut rng = StdRng::seed_from_u64(3);
    let noise = ["abort code: 0", "code: 1", "EInvalidOption", "code: 4", "Insufficient gas"];
    for _ in 0..ROUNDS {
        let mut parts: Vec<&str> = noise.iter().copied().filter(|_| rng.gen_bool(0.5)).collect();
        let at = rng.gen_range(0..=parts.len());
        parts.insert(at, "User rejected the request");
        assert_eq!(translate_text(&parts.join("; ")), FailureReason::UserCancelled);
    }
}
