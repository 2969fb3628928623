//! Custom dialoguer theme and banner for ImageChef interactive mode.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;
use imagechef_core::{Message, Severity};

/// Returns a `ColorfulTheme` configured with ImageChef's visual identity.
///
/// - Prompt prefix: magenta `?`
/// - Active item indicator: magenta `▸`
/// - Success prefix: green `✓`
/// - Error prefix: red `✗`
pub fn chef_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().magenta(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().magenta(),
        active_item_style: Style::new().for_stderr().magenta(),
        checked_item_prefix: style("◉".to_string()).for_stderr().green(),
        unchecked_item_prefix: style("○".to_string()).for_stderr().bright().black(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Prints the ImageChef banner to stderr.
pub fn print_banner() {
    let version_line = format!("ImageChef v{}", imagechef_core::VERSION);
    let tagline = "Batch effects, MP4 and GIF from a folder";

    let inner_width = tagline.len() + 4;

    let top = format!("  ╔{:═<width$}╗", "", width = inner_width);
    let mid1 = format!("  ║{:^width$}║", version_line, width = inner_width);
    let mid2 = format!("  ║{:^width$}║", tagline, width = inner_width);
    let bot = format!("  ╚{:═<width$}╝", "", width = inner_width);

    let magenta = Style::new().for_stderr().magenta();

    eprintln!();
    eprintln!("{}", magenta.apply_to(&top));
    eprintln!("{}", magenta.apply_to(&mid1));
    eprintln!("{}", magenta.apply_to(&mid2));
    eprintln!("{}", magenta.apply_to(&bot));
    eprintln!();
}

/// Prints controller messages as styled notices.
pub fn print_messages(messages: &[Message]) {
    if messages.is_empty() {
        return;
    }
    eprintln!();
    for message in messages {
        let (marker, style) = match message.severity {
            Severity::Info => ("✓", Style::new().for_stderr().green()),
            Severity::Warning => ("!", Style::new().for_stderr().yellow()),
            Severity::Error => ("✗", Style::new().for_stderr().red()),
        };
        eprintln!("  {} {}", style.apply_to(marker), message.text);
    }
    eprintln!();
}
