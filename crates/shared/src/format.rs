//! Display formatting shared by the GUI and headless clients.

/// Formats a whole-dollar amount with comma grouping: `1200` -> `$1,200`,
/// `0` -> `$0`.
pub fn format_money(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Turns a snake_case scenario type label into title case:
/// `side_hustle` -> `Side Hustle`.
pub fn format_scenario_type(scenario_type: &str) -> String {
    scenario_type
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_zero_renders_without_grouping() {
        assert_eq!(format_money(0), "$0");
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(1200), "$1,200");
        assert_eq!(format_money(999), "$999");
        assert_eq!(format_money(1_000), "$1,000");
        assert_eq!(format_money(1_234_567), "$1,234,567");
        assert_eq!(format_money(800_000), "$800,000");
    }

    #[test]
    fn money_handles_negative_amounts() {
        assert_eq!(format_money(-4500), "-$4,500");
    }

    #[test]
    fn scenario_type_title_cases_each_word() {
        assert_eq!(format_scenario_type("side_hustle"), "Side Hustle");
        assert_eq!(
            format_scenario_type("high_earner_no_savings"),
            "High Earner No Savings"
        );
        assert_eq!(format_scenario_type("bootstrapper"), "Bootstrapper");
    }

    #[test]
    fn scenario_type_ignores_empty_segments() {
        assert_eq!(format_scenario_type("lottery__winner"), "Lottery Winner");
        assert_eq!(format_scenario_type(""), "");
    }
}
