//! Console adapter over `Pipeline::run_session`.
//!
//! Reads handles, prints results, and renders the verbose/slow debugging
//! aids as a `SessionObserver`. Generic over reader and writer so the whole
//! loop runs in tests without a terminal.

use std::io::{BufRead, Write};

use tracing::info;

use crate::errors::MimicError;
use crate::session::{Pipeline, SessionEvent, SessionObserver, SessionReport, SessionRequest};

const RULE: &str = "##############################################################";
const HANDLE_PROMPT: &str = "Enter screen name: ";
const PAUSE_PROMPT: &str = "press enter to continue";

#[derive(Debug, Clone, Copy, Default)]
pub struct ShellOptions {
    pub verbose: bool,
    pub slow: bool,
    pub json: bool,
}

pub struct Console<R, W> {
    input: R,
    out: W,
    options: ShellOptions,
    handle: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W, options: ShellOptions) -> Self {
        Self {
            input,
            out,
            options,
            handle: String::new(),
        }
    }

    /// Prompts for a handle. `None` on end of input.
    pub fn read_handle(&mut self) -> std::io::Result<Option<String>> {
        write!(self.out, "\n{HANDLE_PROMPT}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prints whatever has not already been streamed through events.
    pub fn present(&mut self, report: &SessionReport) -> std::io::Result<()> {
        if self.options.json {
            serde_json::to_writer_pretty(&mut self.out, report)?;
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    /// JSON mode owns stdout, so verbose blocks are skipped there.
    fn verbose_block(&mut self, label: &str, body: &str) -> std::io::Result<()> {
        if !self.options.verbose || self.options.json {
            return Ok(());
        }
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out, "{label}")?;
        writeln!(self.out, "{body}")?;
        writeln!(self.out, "{RULE}")?;
        if self.options.slow {
            write!(self.out, "{PAUSE_PROMPT}")?;
            self.out.flush()?;
            let mut ack = String::new();
            self.input.read_line(&mut ack)?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> SessionObserver for Console<R, W> {
    fn on_event(&mut self, event: &SessionEvent<'_>) -> std::io::Result<()> {
        match event {
            SessionEvent::PostsFetched { handle, posts } => {
                self.handle = bare(handle).to_string();
                let label = format!("posts of @{}:", self.handle);
                self.verbose_block(&label, posts.examples())
            }
            SessionEvent::ToneDescribed(tone) => {
                self.verbose_block("tone description:", tone.as_str())?;
                if !self.options.json {
                    writeln!(self.out, "\nNew posts in the style of @{}", self.handle)?;
                }
                Ok(())
            }
            SessionEvent::SubjectGenerated {
                round,
                subject,
                used,
            } => {
                let label = format!("new subject {round} (previous: {}):", used.render());
                self.verbose_block(&label, &subject.text)
            }
            SessionEvent::RoundCompleted(round) => {
                self.verbose_block("new post:", &round.post.text)?;
                if self.options.json {
                    return Ok(());
                }
                writeln!(self.out, "\nSubject: {}", round.subject.text)?;
                writeln!(self.out, "{}", round.post.text)?;
                self.out.flush()
            }
        }
    }
}

fn bare(handle: &str) -> &str {
    handle.trim().trim_start_matches('@')
}

/// Runs one session for `request` and presents it.
pub async fn run_once<R: BufRead, W: Write>(
    pipeline: &Pipeline<'_>,
    request: &SessionRequest,
    console: &mut Console<R, W>,
) -> Result<SessionReport, MimicError> {
    let report = pipeline.run_session(request, console).await?;
    console.present(&report)?;
    Ok(report)
}

/// Prompts for handles until end of input or `quit`/`exit`.
///
/// The first failing session ends the loop with its error.
pub async fn run_interactive<R: BufRead, W: Write>(
    pipeline: &Pipeline<'_>,
    rounds: usize,
    console: &mut Console<R, W>,
) -> Result<usize, MimicError> {
    let mut sessions = 0;
    while let Some(handle) = console.read_handle()? {
        if handle.is_empty() {
            continue;
        }
        if matches!(handle.as_str(), "quit" | "exit") {
            break;
        }
        let request = SessionRequest::new(handle).with_rounds(rounds);
        run_once(pipeline, &request, console).await?;
        sessions += 1;
    }
    info!("Interactive shell finished after {} sessions", sessions);
    Ok(sessions)
}
