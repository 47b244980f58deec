//! Target selection - interactive numbered prompt or preset values

use anyhow::Context;
use colored::*;
use seaseq_core::ValidationTarget;
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use tracing::debug;

/// Website entry that means "no website"
pub const NO_WEBSITE: &str = "<none>";

/// Picks one entry from a list of choices
pub trait Selector: Send {
    /// `None` when nothing was chosen
    fn select(&mut self, title: &str, choices: &[String]) -> Option<String>;
}

/// Run one selection on the blocking pool and hand the selector back
pub async fn select_blocking(
    mut selector: Box<dyn Selector>,
    title: &'static str,
    choices: Vec<String>,
) -> anyhow::Result<(Box<dyn Selector>, Option<String>)> {
    tokio::task::spawn_blocking(move || {
        let choice = selector.select(title, &choices);
        (selector, choice)
    })
    .await
    .context("selection task failed")
}

/// Numbered-list prompt. Re-prompts on invalid input, gives up on EOF.
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl PromptSelector<BufReader<io::Stdin>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, title: &str, choices: &[String]) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", title.bold())?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  [{}] {}", i + 1, choice)?;
        }

        let mut line = String::new();
        loop {
            write!(self.output, "Choose #: ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            match line.trim().parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => {
                    return Ok(Some(choices[n - 1].clone()));
                }
                _ => writeln!(self.output, "{}", "Invalid selection".red())?,
            }
        }
    }
}

impl<R: BufRead + Send, W: Write + Send> Selector for PromptSelector<R, W> {
    fn select(&mut self, title: &str, choices: &[String]) -> Option<String> {
        if choices.is_empty() {
            return None;
        }
        self.prompt(title, choices).unwrap_or_else(|e| {
            debug!("Prompt failed: {}", e);
            None
        })
    }
}

/// Non-interactive selector answering each question in turn with values
/// fixed on the command line. `None` once the answers run out.
///
/// A value does not have to appear among the offered choices.
pub struct PresetSelector {
    answers: VecDeque<Option<String>>,
}

impl PresetSelector {
    pub fn new(answers: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }
}

impl Selector for PresetSelector {
    fn select(&mut self, _title: &str, _choices: &[String]) -> Option<String> {
        self.answers.pop_front().flatten()
    }
}

/// Website choices with the leading `<none>` entry; empty when there are no sites
pub fn website_choices(sites: &[String]) -> Vec<String> {
    if sites.is_empty() {
        return Vec::new();
    }
    std::iter::once(NO_WEBSITE.to_string())
        .chain(sites.iter().cloned())
        .collect()
}

/// Build the run target from the two selections.
///
/// No IP means a domain-only run against `0.0.0.0`; neither means nothing to do.
pub fn resolve_target(ip: Option<String>, website: Option<String>) -> Option<ValidationTarget> {
    let website = website.filter(|site| !site.is_empty() && site != NO_WEBSITE);
    match (ip, website) {
        (Some(ip), Some(site)) => Some(ValidationTarget::with_website(ip, site)),
        (Some(ip), None) => Some(ValidationTarget::new(ip)),
        (None, Some(site)) => Some(ValidationTarget::website_only(site)),
        (None, None) => None,
    }
}
