use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn affirmations_take_priority_over_topic_keywords() {
    // Matches both rule 1 ("yes") and rule 3 ("risk"); rule 1 is checked first.
    assert_eq!(classify("yes, I worry about risk"), Topic::FollowUp);
    assert_eq!(classify("maybe money is the problem"), Topic::FollowUp);
    assert_eq!(classify("no idea"), Topic::FollowUp);
}

#[test]
fn each_rule_matches_its_trigger_words() {
    assert_eq!(classify("where do I find funding?"), Topic::Funding);
    assert_eq!(classify("I need more capital"), Topic::Funding);
    assert_eq!(classify("I'm afraid of failing"), Topic::Risk);
    assert_eq!(classify("feeling scared about this"), Topic::Risk);
    assert_eq!(classify("what skill should I build?"), Topic::Skills);
    assert_eq!(classify("I want to learn sales"), Topic::Skills);
    assert_eq!(classify("my business plan"), Topic::Business);
    assert_eq!(classify("when should I start?"), Topic::Business);
    assert_eq!(classify("who is my customer?"), Topic::Market);
    assert_eq!(classify("how do I sell this?"), Topic::Market);
    assert_eq!(classify("hello"), Topic::Welcome);
    assert_eq!(classify("can you help me"), Topic::Welcome);
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(classify("FUNDING options?"), Topic::Funding);
    assert_eq!(classify("Hello there"), Topic::Welcome);
}

#[test]
fn funding_outranks_market_when_both_match() {
    assert_eq!(classify("money from customers"), Topic::Funding);
}

#[test]
fn unmatched_input_falls_through_to_general() {
    assert_eq!(classify("the weather today"), Topic::General);
    assert_eq!(classify(""), Topic::General);
}

#[test]
fn same_input_always_draws_from_the_same_pool() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let (topic, line) = respond("tell me about risk", &mut rng);
        assert_eq!(topic, Topic::Risk);
        assert!(pool(Topic::Risk).contains(&line));
    }
}

#[test]
fn seeded_rng_pins_the_selected_line() {
    let mut first = StdRng::seed_from_u64(42);
    let mut second = StdRng::seed_from_u64(42);
    assert_eq!(
        respond("what about the market", &mut first),
        respond("what about the market", &mut second)
    );
}

#[test]
fn every_pool_holds_between_four_and_eight_lines() {
    for topic in [
        Topic::FollowUp,
        Topic::Funding,
        Topic::Risk,
        Topic::Skills,
        Topic::Business,
        Topic::Market,
        Topic::Welcome,
        Topic::General,
    ] {
        let size = pool(topic).len();
        assert!((4..=8).contains(&size), "{topic:?} pool has {size} lines");
    }
}

#[test]
fn scenario_requests_bypass_the_dispatcher() {
    assert!(is_scenario_request("give me a new scenario"));
    assert!(is_scenario_request("NEW one please"));
    assert!(!is_scenario_request("tell me about funding"));
}
