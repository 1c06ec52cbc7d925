// Status lines go to stderr so reports on stdout stay pipeable
use colored::Colorize;

pub fn print_success(text: &str) {
    eprintln!("{} {}", "✓".green().bold(), text.green());
}

pub fn print_error(text: &str) {
    eprintln!("{} {}", "✗".red().bold(), text.red());
}

pub fn print_warning(text: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), text.yellow());
}
