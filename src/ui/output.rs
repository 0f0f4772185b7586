use crate::status::Urgency;
use crate::ui::{theme, Icons};
use owo_colors::{OwoColorize, Style};

pub fn header(icon: &str, text: &str) {
    println!("{} {}", icon, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn info(label: &str, value: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}

/// Overdue lists in red, lists due today in yellow
pub fn urgency_style(urgency: Urgency) -> Style {
    match urgency {
        Urgency::Overdue => theme().overdue.clone(),
        Urgency::DueToday => theme().due_today.clone(),
        Urgency::Normal => Style::new(),
    }
}
