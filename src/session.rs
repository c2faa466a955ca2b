//! The accept/retry loop wrapped around the search.
//!
//! The session owns no grouping logic. It runs a search, shows the best
//! result, and either stores it or runs again with a trial count the user
//! picks. Prompts are only written in interactive mode; piped input drives
//! the same loop and only sees results.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::config::Config;
use crate::error::SessionError;
use crate::group::{group_label, Group};
use crate::search::{search_while, SearchParams};
use crate::storage::save_grouping;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A grouping was accepted and written under this stem.
    Saved(PathBuf),
    /// The user declined, input ran out, or the session was interrupted.
    Discarded,
}

pub struct Session<R, W> {
    config: Config,
    list: Vec<String>,
    previous_groups: Vec<Group<String>>,
    input: R,
    output: W,
    interactive: bool,
    running: Arc<AtomicBool>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        config: Config,
        list: Vec<String>,
        previous_groups: Vec<Group<String>>,
        input: R,
        output: W,
    ) -> Self {
        Session {
            config,
            list,
            previous_groups,
            input,
            output,
            interactive: true,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Share a flag that, once cleared, stops the current search between
    /// trials and ends the session without saving.
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = running;
        self
    }

    pub fn run<G: Rng + ?Sized>(&mut self, rng: &mut G) -> Result<SessionOutcome, SessionError> {
        self.prompt("Welcome to the group picker!")?;
        self.prompt("Press enter to get a new group")?;

        let mut outcome = SessionOutcome::Discarded;
        let mut num_runs = self.config.num_runs;

        if self.read_answer()?.is_some() {
            loop {
                let params = SearchParams {
                    num_runs,
                    ..self.config.search_params()
                };
                let running = Arc::clone(&self.running);
                let best = search_while(&self.list, &self.previous_groups, params, rng, || {
                    running.load(Ordering::SeqCst)
                })?;
                if !self.running.load(Ordering::SeqCst) {
                    info!("interrupted during search, discarding result");
                    break;
                }
                info!(num_runs, statistics = %best.statistics, "search finished");

                writeln!(self.output, "Results of best run: {}", best.statistics)?;
                self.print_groups(&best.grouping)?;

                self.prompt("Would you like to keep this run? (y/n)")?;
                let Some(keep) = self.read_answer()? else {
                    break;
                };
                if is_yes(&keep) {
                    writeln!(self.output, "Writing to file...")?;
                    let stem = save_grouping(&self.config.group_dir, &best.grouping)?;
                    writeln!(self.output, "Saved {}", stem.with_extension("yml").display())?;
                    outcome = SessionOutcome::Saved(stem);
                    break;
                }

                self.prompt("Would you like to run the algorithm again? (y/n)")?;
                match self.read_answer()? {
                    Some(again) if is_yes(&again) => {}
                    _ => break,
                }

                let question = format!(
                    "How many times would you like to run the algorithm: ({} is default)",
                    self.config.num_runs
                );
                self.prompt(&question)?;
                let Some(answer) = self.read_answer()? else {
                    break;
                };
                num_runs = self.parse_num_runs(&answer)?;
            }
        }

        writeln!(self.output, "Done!")?;
        self.output.flush()?;
        Ok(outcome)
    }

    fn prompt(&mut self, text: &str) -> Result<(), SessionError> {
        if self.interactive {
            writeln!(self.output, "{}", text)?;
            self.output.flush()?;
        }
        Ok(())
    }

    // None on end of input or once the running flag is cleared
    fn read_answer(&mut self) -> Result<Option<String>, SessionError> {
        if !self.running.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 || !self.running.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn parse_num_runs(&mut self, answer: &str) -> Result<usize, SessionError> {
        let default = self.config.num_runs;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => {
                writeln!(
                    self.output,
                    "'{}' is not a valid number of runs, using {}",
                    answer, default
                )?;
                Ok(default)
            }
        }
    }

    fn print_groups(&mut self, grouping: &[Group<String>]) -> Result<(), SessionError> {
        for (i, group) in grouping.iter().enumerate() {
            writeln!(
                self.output,
                "Group {}: {} members",
                group_label(i),
                group.len()
            )?;
            for member in &group.members {
                writeln!(self.output, "  - {}", member)?;
            }
        }
        Ok(())
    }
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
