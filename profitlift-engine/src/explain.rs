//! Business-facing sentences for rules, bundles and what-if projections.

use profitlift_core::models::{ContextualRule, ItemSet, UpliftResult};

/// One-paragraph explanation of a rule, mentioning uplift when significant.
pub fn rule_explanation(rule: &ContextualRule, uplift: Option<&UpliftResult>) -> String {
    let base = format!(
        "When shoppers buy {}, they also tend to add {} ({} of the time, lift {:.2}).",
        list(&rule.antecedent),
        list(&rule.consequent),
        percent(rule.confidence, 0),
        rule.lift
    );
    let mut text = if rule.context.is_overall() {
        base
    } else {
        format!(
            "In {}, {}",
            rule.context.label().to_lowercase(),
            lowercase_first(&base)
        )
    };

    match (uplift, rule.profit_score) {
        (Some(u), _) if u.incremental_attach_rate > 0.0 => text.push_str(&format!(
            " True uplift of {} drives about ${:.2} extra margin per basket.",
            percent(u.incremental_attach_rate, 1),
            u.incremental_margin
        )),
        (_, Some(profit)) if profit != 0.0 => text.push_str(&format!(
            " Expect roughly ${profit:.2} extra margin per basket."
        )),
        _ => {}
    }
    text
}

/// Pitch for a bundle built from `rule`.
pub fn bundle_narrative(
    rule: &ContextualRule,
    uplift: Option<&UpliftResult>,
    expected_attach_rate: f64,
    expected_margin: f64,
) -> String {
    match uplift {
        Some(u) if u.incremental_attach_rate > 0.0 => format!(
            "{} shoppers who buy {} respond to featuring {}, \
             adding {} more baskets and about ${:.2} margin.",
            rule.context,
            list(&rule.antecedent),
            list(&rule.consequent),
            percent(u.incremental_attach_rate, 1),
            expected_margin
        ),
        _ => format!(
            "Bundle {} with {} in {} to capture {} attach rate \
             and roughly ${:.2} extra margin per basket.",
            list(&rule.antecedent),
            list(&rule.consequent),
            rule.context,
            percent(expected_attach_rate, 0),
            expected_margin
        ),
    }
}

/// Projection summary; `traffic` adds a basket-scaled total.
pub fn what_if_narrative(
    rule: &ContextualRule,
    projected_attach_rate: f64,
    incremental_attach_rate: f64,
    incremental_margin: f64,
    traffic: Option<(u64, f64)>,
) -> String {
    let context = if rule.context.is_overall() {
        "overall shopper base".to_string()
    } else {
        rule.context.label()
    };
    let mut text = format!(
        "If you spotlight {} and nudge {} in the {}, attach rate is projected to reach {} \
         ({} uplift) with about ${:.2} extra margin per basket.",
        rule.antecedent.iter().collect::<Vec<_>>().join(" & "),
        list(&rule.consequent),
        context,
        percent(projected_attach_rate, 1),
        percent(incremental_attach_rate, 1),
        incremental_margin
    );
    if let Some((baskets, total)) = traffic.filter(|(baskets, _)| *baskets > 0) {
        text.push_str(&format!(
            " Over roughly {} baskets that adds up to ${} incremental margin.",
            thousands(i128::from(baskets)),
            // float-to-int `as` saturates, so huge totals clamp instead of wrapping
            thousands(total.round() as i128)
        ));
    }
    text
}

fn list(items: &ItemSet) -> String {
    items.iter().collect::<Vec<_>>().join(", ")
}

fn percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn thousands(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
