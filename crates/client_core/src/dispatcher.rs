//! Canned-conversation dispatcher for the side chat.
//!
//! No language understanding: the input is lowercased and matched against a
//! fixed priority-ordered list of trigger substrings, then one line is drawn
//! uniformly at random from the matched topic's pool. Every call is stateless;
//! the returned [`Topic`] is bookkeeping for the caller only.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    FollowUp,
    Funding,
    Risk,
    Skills,
    Business,
    Market,
    Welcome,
    General,
}

const WELCOME: &[&str] = &[
    "Hi there! I'm here to help you explore your entrepreneurial readiness. What's been on your mind about starting a business lately?",
    "Hello! I'm your entrepreneurial readiness assistant. What aspect of entrepreneurship are you most curious or concerned about?",
    "Welcome! I'd love to help you think through your entrepreneurial journey. What's your biggest question about starting a business?",
    "Hey! Ready to dive into some entrepreneurial self-reflection? What's driving your interest in starting a business?",
];

const FUNDING: &[&str] = &[
    "How much of your own money would you be willing to invest in a business idea you truly believe in?",
    "What's your current savings situation, and how comfortable are you with potentially losing some of that money?",
    "Have you ever considered taking on investors or business partners to fund your startup dreams?",
    "If you had to bootstrap a business with just $1,000, what type of business would you start?",
    "How do you feel about the idea of taking out a business loan or using credit to fund your startup?",
];

const RISK: &[&str] = &[
    "On a scale of 1-10, how comfortable are you with uncertainty and not knowing if your business will succeed?",
    "What's the biggest professional risk you've ever taken, and how did it turn out?",
    "How would you handle it emotionally if your business failed after two years of hard work?",
    "What's more important to you - a steady paycheck or the potential for unlimited earning?",
    "If you knew there was a 70% chance of failure, would you still start a business? Why or why not?",
];

const SKILLS: &[&str] = &[
    "What's one skill you have that you think would be really valuable in running a business?",
    "How comfortable are you with selling something you believe in to people who need it?",
    "What's a skill you know you'd need to develop to be successful as an entrepreneur?",
    "Have you ever had to learn something completely new for work? How did you approach it?",
    "Do you prefer doing everything yourself or building a team to handle different parts of the business?",
];

const BUSINESS: &[&str] = &[
    "What problem in your daily life have you thought 'someone should really solve this'?",
    "If you started a business tomorrow, who would be your very first customer and why would they buy from you?",
    "What's more exciting to you - creating something completely new or improving something that already exists?",
    "How do you typically handle it when your plans don't work out as expected?",
    "If you could start any business right now with guaranteed success, what would it be and why?",
];

const MARKET: &[&str] = &[
    "How well do you think you understand what people in your area or industry really want?",
    "Have you ever tried to sell something, even informally? How did that experience go?",
    "What would you do if you discovered someone else was already doing exactly what you wanted to do?",
    "How important is it to you to be first to market versus being better than what's already out there?",
    "What's one thing you wish existed in the marketplace that you've never been able to find?",
];

const GENERAL: &[&str] = &[
    "What motivates you more - building something meaningful or achieving financial freedom?",
    "How do you typically handle stress and pressure when things get challenging?",
    "What would success look like to you if you started your own business?",
    "Are you more energized by working alone or collaborating with others on big projects?",
    "What's one thing about your current work situation that makes you think about entrepreneurship?",
];

const FOLLOW_UPS: &[&str] = &[
    "That's interesting! Can you tell me more about what drives that feeling?",
    "I can see where you're coming from. What do you think has shaped that perspective for you?",
    "That's a great point. How do you think that would affect your approach to running a business?",
    "Thanks for sharing that. What would need to change for you to feel more confident about it?",
    "That makes sense. Have you always felt that way, or is this something that's developed over time?",
    "Interesting perspective! What experiences have led you to think about it that way?",
    "I hear you. What would it take for you to feel ready to take that next step?",
    "That's really thoughtful. How do you think other people in your situation typically handle this?",
];

/// Priority-ordered trigger table. The first rule whose substrings match
/// wins, so "yes, money matters" is a follow-up, not a funding question.
const RULES: &[(Topic, &[&str])] = &[
    (Topic::FollowUp, &["yes", "no", "maybe"]),
    (Topic::Funding, &["money", "funding", "capital"]),
    (Topic::Risk, &["risk", "afraid", "scared"]),
    (Topic::Skills, &["skill", "experience", "learn"]),
    (Topic::Business, &["business", "start", "idea"]),
    (Topic::Market, &["market", "customer", "sell"]),
    (Topic::Welcome, &["help", "hello", "hi"]),
];

pub fn pool(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::FollowUp => FOLLOW_UPS,
        Topic::Funding => FUNDING,
        Topic::Risk => RISK,
        Topic::Skills => SKILLS,
        Topic::Business => BUSINESS,
        Topic::Market => MARKET,
        Topic::Welcome => WELCOME,
        Topic::General => GENERAL,
    }
}

pub fn classify(input: &str) -> Topic {
    let lower = input.to_lowercase();
    for (topic, triggers) in RULES {
        if triggers.iter().any(|trigger| lower.contains(trigger)) {
            return *topic;
        }
    }
    Topic::General
}

/// Picks a canned reply for the input. The RNG is caller-supplied so tests
/// can pin the selection.
pub fn respond<R: Rng + ?Sized>(input: &str, rng: &mut R) -> (Topic, &'static str) {
    let topic = classify(input);
    let lines = pool(topic);
    (topic, lines[rng.gen_range(0..lines.len())])
}

/// Chat shortcut: asking for a "scenario" or something "new" bypasses the
/// canned pools and requests a fresh scenario instead.
pub fn is_scenario_request(input: &str) -> bool {
    let lower = input.to_lowercase();
    lower.contains("scenario") || lower.contains("new")
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
