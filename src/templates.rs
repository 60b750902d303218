//! Built-in prompt templates

/// A ready-made prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Short label
    pub label: &'static str,
    /// Emoji shown next to the label
    pub emoji: &'static str,
    /// Prompt text
    pub prompt: &'static str,
}

/// All templates, in display order
pub const TEMPLATES: [Template; 4] = [
    Template {
        label: "Product Launch",
        emoji: "🚀",
        prompt: "Write an exciting product launch post for my new AI-powered gardening tool.",
    },
    Template {
        label: "Tech Tip",
        emoji: "💡",
        prompt: "Share a quick tech tip about how to stay productive while working from home.",
    },
    Template {
        label: "Event Promo",
        emoji: "📅",
        prompt: "Invite people to a digital marketing webinar happening next Friday at 10 AM EST.",
    },
    Template {
        label: "Career Advice",
        emoji: "📈",
        prompt: "Write a professional post giving advice on how to transition into a career in AI.",
    },
];

/// Look up a template by 1-based number or case-insensitive label
pub fn find(query: &str) -> Option<&'static Template> {
    let query = query.trim();
    if let Ok(n) = query.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| TEMPLATES.get(i));
    }
    TEMPLATES
        .iter()
        .find(|t| t.label.eq_ignore_ascii_case(query))
}
