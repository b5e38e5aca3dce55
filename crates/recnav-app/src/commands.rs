//! Parsing of the interactive commands

use recnav_core::NavAction;
use recnav_data::Gender;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(NavAction),
    /// Replace the search text (`/ann`, or `/` to clear it)
    Search(String),
    /// Replace the gender selection (`g FM`, `g F`, `g` for none)
    Genders(Vec<Gender>),
    /// Re-render without pressing any navigation control
    Refresh,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(Command::Refresh);
        }

        if let Some(search) = line.strip_prefix('/') {
            return Ok(Command::Search(search.to_string()));
        }

        if line == "g" || line.starts_with("g ") {
            let codes = line[1..].trim();
            let mut genders = Vec::new();
            for c in codes.chars().filter(|c| !c.is_whitespace()) {
                let gender = Gender::from_code(&c.to_string())
                    .ok_or_else(|| format!("Unknown gender '{}', expected F or M", c))?;
                if !genders.contains(&gender) {
                    genders.push(gender);
                }
            }
            return Ok(Command::Genders(genders));
        }

        match line {
            "q" | "quit" | "exit" => Ok(Command::Quit),
            "?" | "h" | "help" => Ok(Command::Help),
            other => other
                .parse::<NavAction>()
                .map(Command::Navigate)
                .map_err(|e| e.to_string()),
        }
    }
}

pub const HELP: &str = "\
commands:
  f | p | n | l     first / previous / next / last page
  /text             search names containing text (`/` clears)
  g FM | g F | g M  select genders
  <enter>           redraw the current page
  q                 quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_commands() {
        assert_eq!(Command::parse("n"), Ok(Command::Navigate(NavAction::Next)));
        assert_eq!(Command::parse(" last "), Ok(Command::Navigate(NavAction::Last)));
    }

    #[test]
    fn test_search_and_genders() {
        assert_eq!(Command::parse("/ann"), Ok(Command::Search("ann".to_string())));
        assert_eq!(Command::parse("/"), Ok(Command::Search(String::new())));
        assert_eq!(
            Command::parse("g MF"),
            Ok(Command::Genders(vec![Gender::Male, Gender::Female]))
        );
        assert_eq!(Command::parse("g"), Ok(Command::Genders(Vec::new())));
        assert!(Command::parse("g X").is_err());
    }

    #[test]
    fn test_misc_commands() {
        assert_eq!(Command::parse(""), Ok(Command::Refresh));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert!(Command::parse("jump").is_err());
    }
}
