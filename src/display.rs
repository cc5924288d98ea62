use crate::conversation::{ChatMessage, TurnReplies};
use crate::utils::text::{pad_to_width, wrap_text};
use console::style;

pub const RULE_BOT_TITLE: &str = "If/Then Bot";
pub const RULE_BOT_DESCRIPTION: &str = "Powered by Rules";
pub const LLM_BOT_TITLE: &str = "I Get It Bot";

fn box_width() -> usize {
    let term = console::Term::stdout();
    let terminal_width = term.size().1 as usize;
    std::cmp::min(terminal_width.saturating_sub(4), 100).max(40)
}

/// Frame `text` in a box at most `max_width` columns wide, shrinking to the
/// content. Returns the unstyled lines.
pub fn render_box(text: &str, max_width: usize) -> Vec<String> {
    let inner = max_width.saturating_sub(4).max(1);
    let lines = wrap_text(text, inner);
    let content_width = lines
        .iter()
        .map(|line| console::measure_text_width(line))
        .max()
        .unwrap_or(0)
        .min(inner);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("┌{}┐", "─".repeat(content_width + 2)));
    for line in &lines {
        out.push(format!("│ {} │", pad_to_width(line, content_width)));
    }
    out.push(format!("└{}┘", "─".repeat(content_width + 2)));
    out
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```") || text.contains('*') || text.contains('`') || text.contains('#')
}

/// Header shown once at startup.
pub fn display_banner(llm_description: Option<&str>) {
    println!("{}", style("Chatbot Logic Explorer").bold().magenta());
    match llm_description {
        Some(description) => println!(
            "{}",
            style(format!(
                "Compare {} ({}) with {} ({}). Send the same prompts and see the difference.",
                RULE_BOT_TITLE, RULE_BOT_DESCRIPTION, LLM_BOT_TITLE, description
            ))
            .dim()
        ),
        None => println!(
            "{}",
            style(format!("{} ({})", RULE_BOT_TITLE, RULE_BOT_DESCRIPTION)).dim()
        ),
    }
}

pub fn display_greeting(text: &str, with_llm: bool) {
    display_bot_message(RULE_BOT_TITLE, &ChatMessage::bot(text), false, false);
    if with_llm {
        display_bot_message(LLM_BOT_TITLE, &ChatMessage::bot(text), false, false);
    }
}

pub fn display_turn(replies: &TurnReplies, show_logic: bool) {
    display_bot_message(RULE_BOT_TITLE, &replies.rule, show_logic, false);
    if let Some(llm) = &replies.llm {
        display_bot_message(LLM_BOT_TITLE, llm, show_logic, true);
    }
}

/// One bot reply in a box, optionally followed by its explanation.
pub fn display_bot_message(title: &str, message: &ChatMessage, show_logic: bool, markdown: bool) {
    println!("\n{}", style(format!("🤖 {}", title)).bold().blue());

    if markdown && looks_like_markdown(&message.text) {
        termimad::MadSkin::default().print_text(&message.text);
    } else {
        let lines = render_box(&message.text, box_width());
        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            if i == 0 || i == last {
                println!("{}", style(line).dim().blue());
            } else {
                println!("{}", style(line).white());
            }
        }
    }

    if show_logic {
        if let Some(explanation) = &message.explanation {
            if let Some(title) = &message.explanation_title {
                println!("  {}", style(title).bold().yellow());
            }
            for line in wrap_text(explanation, box_width().saturating_sub(2)) {
                println!("  {}", style(line).dim());
            }
        }
    }
}

pub fn display_info(message: &str) {
    println!("{}", message);
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("Error:").bold().red(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_shrinks_to_content() {
        let lines = render_box("hi", 40);
        assert_eq!(lines, vec!["┌────┐", "│ hi │", "└────┘"]);
    }

    #[test]
    fn box_wraps_long_text() {
        let lines = render_box("one two three", 10);
        assert_eq!(lines[0], "┌───────┐");
        assert_eq!(lines[1], "│ one   │");
        assert_eq!(lines[2], "│ two   │");
        assert_eq!(lines[3], "│ three │");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn markdown_detection() {
        assert!(looks_like_markdown("**bold**"));
        assert!(looks_like_markdown("# Title"));
        assert!(!looks_like_markdown("Just a friendly reply."));
    }
}
