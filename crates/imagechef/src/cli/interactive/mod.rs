//! Interactive mode, entered when `imagechef` runs with no subcommand.
//!
//! One form is kept for the whole session. Each menu action prompts for the
//! fields it needs, then hands the form to the core controller and prints
//! whatever it reports.

pub mod form;
pub mod theme;

use dialoguer::Select;
use imagechef_core::{handle, Action, AppState, Config, Outcome};

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
///
/// Use this to wrap `interact_text()` / `interact()` calls that lack an `_opt`
/// variant, so interrupts exit the current flow cleanly instead of panicking.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Run(Action),
    ShowForm,
}

const MENU: [MenuItem; 5] = [
    MenuItem::Run(Action::ProcessImages),
    MenuItem::Run(Action::CreateMp4),
    MenuItem::Run(Action::CreateGif),
    MenuItem::ShowForm,
    MenuItem::Run(Action::Exit),
];

impl MenuItem {
    fn label(self) -> &'static str {
        match self {
            MenuItem::Run(Action::ProcessImages) => "Process images",
            MenuItem::Run(Action::CreateMp4) => "Create MP4",
            MenuItem::Run(Action::CreateGif) => "Create GIF",
            MenuItem::Run(Action::Exit) => "Exit",
            MenuItem::ShowForm => "Show form",
        }
    }
}

/// Entry point for interactive mode.
pub fn run(config: Config) -> anyhow::Result<()> {
    theme::print_banner();

    let theme = theme::chef_theme();
    let state = AppState::new(config);
    let mut values = state.default_form();
    let labels: Vec<&str> = MENU.iter().map(|item| item.label()).collect();

    loop {
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        // Esc / Ctrl+C at the menu behaves like Exit
        let item = selection
            .and_then(|i| MENU.get(i).copied())
            .unwrap_or(MenuItem::Run(Action::Exit));

        let action = match item {
            MenuItem::ShowForm => {
                form::print_form(&values);
                continue;
            }
            MenuItem::Run(action) => action,
        };

        let filled = match action {
            Action::ProcessImages => form::fill_process(&theme, &mut values)?,
            Action::CreateMp4 => form::fill_mp4(&theme, &mut values)?,
            Action::CreateGif => form::fill_gif(&theme, &mut values)?,
            Action::Exit => true,
        };
        if !filled {
            continue;
        }

        match handle(&state, action, &values) {
            Outcome::Continue(messages) => theme::print_messages(&messages),
            Outcome::Exit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_covers_every_action() {
        for action in Action::ALL {
            assert!(MENU.contains(&MenuItem::Run(action)), "{action} missing");
        }
        assert!(MENU.contains(&MenuItem::ShowForm));
    }

    #[test]
    fn test_menu_ends_with_exit() {
        assert_eq!(MENU.last(), Some(&MenuItem::Run(Action::Exit)));
    }
}
