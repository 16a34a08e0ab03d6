use colored::*;

const RULE: &str = "──────────────────────────────────────────────────────────";

fn boxed(label: ColoredString, body: &str) {
    println!("{}{}", "┌─".dimmed(), label);
    for line in body.trim_end().lines() {
        println!("{} {}", "│".dimmed(), line);
    }
    println!("{}", format!("└{}", RULE).dimmed());
}

pub fn display_tool_call(name: &str) {
    println!("{}", format!("Calling tool: {}...", name).cyan());
}

/// Display a tool result in a boxed format
pub fn display_tool_result(name: &str, result: &str) {
    boxed(format!("[TOOL: {}]", name).cyan(), result);
}

/// Display a tool error in a boxed format
pub fn display_tool_error(name: &str, error: &str) {
    boxed(format!("[TOOL ERROR: {}]", name).red(), error);
}

/// Print the assistant's final reply for the turn.
pub fn display_reply(content: &str) {
    println!("{}", format!("{} Assistant {}", "═══", "═".repeat(46)).green());
    println!("{}", content.trim_end());
    println!();
}
