use std::io::{self, BufRead, Write};

use crate::{
    api::SourceClient,
    application::{catalog, launch_entry, Launcher, SystemLauncher},
    config::Settings,
    domain::{AppError, DownloadEntry},
};

const GRAY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

const BANNER: &str = r"
              ___
          _.-'  /
      _.-'  _.-'
   .-'  _.-'    F E A T H E R
  /  .-'
 / .'
/.'
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Opened { title: String, uri: String },
    Declined,
    Nothing,
}

/// One menu round over an already loaded catalog.
pub struct ConsoleSession<'a, R, W, L> {
    entries: &'a [DownloadEntry],
    input: R,
    output: W,
    launcher: L,
}

impl<'a, R: BufRead, W: Write, L: Launcher> ConsoleSession<'a, R, W, L> {
    pub fn new(entries: &'a [DownloadEntry], input: R, output: W, launcher: L) -> Self {
        Self {
            entries,
            input,
            output,
            launcher,
        }
    }

    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn display(&mut self, games: &[DownloadEntry]) -> io::Result<()> {
        for (index, game) in games.iter().enumerate() {
            writeln!(self.output, "[{}] {}", index + 1, game.display_line())?;
        }
        Ok(())
    }

    pub fn run(&mut self) -> io::Result<SessionOutcome> {
        writeln!(self.output, "Choose an option:")?;
        writeln!(self.output, "1. Show all games")?;
        writeln!(self.output, "2. Search for a game")?;
        writeln!(self.output, "3. Surprise me")?;

        let Some(choice) = self.prompt("\nEnter your choice (1, 2 or 3): ")? else {
            return Ok(SessionOutcome::Nothing);
        };
        let Ok(choice) = choice.parse::<i64>() else {
            writeln!(self.output, "Please enter a valid number.")?;
            return Ok(SessionOutcome::Nothing);
        };

        let candidates = match choice {
            1 => {
                writeln!(self.output, "\nShowing all games:")?;
                let all = self.entries;
                self.display(all)?;
                all.to_vec()
            }
            2 => {
                let Some(query) = self.prompt("\nEnter the game title: ")? else {
                    return Ok(SessionOutcome::Nothing);
                };
                let results = catalog::filter_entries(self.entries, &query);
                if results.is_empty() {
                    writeln!(self.output, "\nNo games found with that search query.")?;
                } else {
                    writeln!(self.output, "\nSearch results:")?;
                    self.display(&results)?;
                }
                results
            }
            3 => return self.surprise(),
            _ => {
                writeln!(self.output, "Invalid option.")?;
                Vec::new()
            }
        };

        if candidates.is_empty() {
            writeln!(self.output, "No games to select from.")?;
            return Ok(SessionOutcome::Nothing);
        }

        let Some(selection) = self.prompt("\nEnter the game number: ")? else {
            return Ok(SessionOutcome::Nothing);
        };
        let Ok(selection) = selection.parse::<i64>() else {
            writeln!(self.output, "Please enter a valid number.")?;
            return Ok(SessionOutcome::Nothing);
        };

        let chosen = usize::try_from(selection)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| candidates.get(i));
        match chosen {
            Some(game) => self.open(game),
            None => {
                writeln!(self.output, "Invalid selection.")?;
                Ok(SessionOutcome::Nothing)
            }
        }
    }

    fn surprise(&mut self) -> io::Result<SessionOutcome> {
        let Some(game) = catalog::pick_random(self.entries) else {
            writeln!(self.output, "No games available to select.")?;
            return Ok(SessionOutcome::Nothing);
        };
        if game.magnet_link().is_none() {
            writeln!(self.output, "{}", AppError::NoMagnetLink)?;
            return Ok(SessionOutcome::Nothing);
        }

        let question = format!(
            "\nWould you like to download:\n\n{}? [y/N]: ",
            game.display_title()
        );
        let answer = self.prompt(&question)?.unwrap_or_default().to_lowercase();
        if answer == "y" || answer == "yes" {
            self.open(game)
        } else {
            Ok(SessionOutcome::Declined)
        }
    }

    fn open(&mut self, game: &DownloadEntry) -> io::Result<SessionOutcome> {
        if game.magnet_link().is_none() {
            writeln!(self.output, "{}", AppError::NoMagnetLink)?;
            return Ok(SessionOutcome::Nothing);
        }

        writeln!(
            self.output,
            "Opening magnet link for: {}",
            game.display_title()
        )?;
        match launch_entry(&self.launcher, game) {
            Ok(uri) => Ok(SessionOutcome::Opened {
                title: game.display_title().to_string(),
                uri,
            }),
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                Ok(SessionOutcome::Nothing)
            }
        }
    }
}

pub fn run(settings: Settings) -> Result<(), AppError> {
    let banner: Vec<String> = BANNER
        .lines()
        .map(|line| format!("{}{}{}", GRAY, line, RESET))
        .collect();
    println!("{}", banner.join("\n"));

    let client = SourceClient::new(&settings.api).map_err(|e| AppError::Api(e.to_string()))?;
    let runtime = tokio::runtime::Runtime::new().map_err(|e| AppError::Io(e.to_string()))?;
    let report = runtime.block_on(catalog::load_from_file(&client, &settings.sources))?;

    for failure in &report.failures {
        println!("{}", failure.describe());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session =
        ConsoleSession::new(&report.entries, stdin.lock(), stdout.lock(), SystemLauncher);
    session.run().map_err(|e| AppError::Io(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::launcher::testing::RecordingLauncher;
    use std::io::Cursor;

    fn entry(title: &str, uri: Option<&str>) -> DownloadEntry {
        DownloadEntry {
            title: Some(title.to_string()),
            file_size: Some("1 GB".to_string()),
            uris: uri.into_iter().map(str::to_string).collect(),
        }
    }

    fn catalog() -> Vec<DownloadEntry> {
        vec![
            entry("Celeste [GOG]", Some("magnet:?celeste")),
            entry("Hades (v1.38)", Some("magnet:?hades")),
            entry("Hollow Knight", None),
        ]
    }

    fn session(entries: &[DownloadEntry], input: &str) -> (SessionOutcome, String, Vec<String>) {
        let launcher = RecordingLauncher::default();
        let mut output = Vec::new();
        let outcome = ConsoleSession::new(entries, Cursor::new(input), &mut output, &launcher)
            .run()
            .unwrap();
        let opened = launcher.opened.borrow().clone();
        (outcome, String::from_utf8(output).unwrap(), opened)
    }

    #[test]
    fn test_show_all_and_select() {
        let entries = catalog();
        let (outcome, output, opened) = session(&entries, "1\n2\n");

        assert!(output.contains("[1] Celeste [GOG] | 1 GB"));
        assert!(output.contains("[3] Hollow Knight | 1 GB"));
        assert!(output.contains("Opening magnet link for: Hades (v1.38)"));
        assert_eq!(opened, vec!["magnet:?hades"]);
        assert_eq!(
            outcome,
            SessionOutcome::Opened {
                title: "Hades (v1.38)".to_string(),
                uri: "magnet:?hades".to_string()
            }
        );
    }

    #[test]
    fn test_search_then_select() {
        let entries = catalog();
        let (_, output, opened) = session(&entries, "2\nCELESTE\n1\n");

        assert!(output.contains("Search results:"));
        assert!(!output.contains("Hades"));
        assert_eq!(opened, vec!["magnet:?celeste"]);
    }

    #[test]
    fn test_search_without_results() {
        let entries = catalog();
        let (outcome, output, _) = session(&entries, "2\nportal\n");

        assert!(output.contains("No games found with that search query."));
        assert!(output.contains("No games to select from."));
        assert_eq!(outcome, SessionOutcome::Nothing);
    }

    #[test]
    fn test_missing_magnet_link() {
        let entries = catalog();
        let (outcome, output, opened) = session(&entries, "1\n3\n");

        assert!(output.contains("No magnet link found for the selected game."));
        assert!(opened.is_empty());
        assert_eq!(outcome, SessionOutcome::Nothing);
    }

    #[test]
    fn test_invalid_input() {
        let entries = catalog();

        let (_, output, _) = session(&entries, "abc\n");
        assert!(output.contains("Please enter a valid number."));

        let (_, output, _) = session(&entries, "7\n");
        assert!(output.contains("Invalid option."));

        let (_, output, opened) = session(&entries, "1\n0\n");
        assert!(output.contains("Invalid selection."));
        assert!(opened.is_empty());
    }

    #[test]
    fn test_negative_numbers_are_out_of_range() {
        let entries = catalog();

        let (outcome, output, _) = session(&entries, "-1\n");
        assert!(output.contains("Invalid option."));
        assert!(!output.contains("Please enter a valid number."));
        assert_eq!(outcome, SessionOutcome::Nothing);

        let (outcome, output, opened) = session(&entries, "1\n-1\n");
        assert!(output.contains("Invalid selection."));
        assert!(!output.contains("Please enter a valid number."));
        assert!(opened.is_empty());
        assert_eq!(outcome, SessionOutcome::Nothing);
    }

    #[test]
    fn test_empty_uri_is_not_opened() {
        let entries = vec![entry("Celeste", Some(""))];
        let (outcome, output, opened) = session(&entries, "1\n1\n");

        assert!(output.contains("No magnet link found for the selected game."));
        assert!(opened.is_empty());
        assert_eq!(outcome, SessionOutcome::Nothing);
    }

    #[test]
    fn test_surprise_me() {
        let entries = vec![entry("Celeste", Some("magnet:?celeste"))];

        let (outcome, output, opened) = session(&entries, "3\ny\n");
        assert!(output.contains("Would you like to download:"));
        assert_eq!(opened, vec!["magnet:?celeste"]);
        assert!(matches!(outcome, SessionOutcome::Opened { .. }));

        let (outcome, _, opened) = session(&entries, "3\n\n");
        assert_eq!(outcome, SessionOutcome::Declined);
        assert!(opened.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let (_, output, _) = session(&[], "1\n");
        assert!(output.contains("No games to select from."));

        let (_, output, _) = session(&[], "3\n");
        assert!(output.contains("No games available to select."));
    }
}
