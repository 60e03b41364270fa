//! Sesión interactiva de cotización.
//!
//! Traduce comandos de texto a operaciones del engine y decide la navegación
//! que el engine deja en manos del host (p. ej. volver al primer step
//! inválido tras un envío rechazado).

use std::fmt::Write as _;
use std::str::FromStr;

use freight_adapters::{on_requirement, quote_engine, QuoteEngine};
use freight_core::{Advance, SubmissionError, SubmitOutcome};
use freight_domain::{QuoteFormData, QuoteRequirement};
use log::{debug, info};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `set <campo> [valor]`: entrada cruda para el step actual.
    Set { field: String, raw: String },
    Next,
    /// `back [step-id]`.
    Back(Option<String>),
    Show,
    Status,
    Events,
    Reset,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match head {
            "set" => {
                let (field, raw) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(AppError::Command("usage: set <field> [value]".into()));
                }
                Ok(Command::Set { field: field.to_string(),
                                  raw: raw.trim().to_string() })
            }
            "next" | "n" | "submit" => Ok(Command::Next),
            "back" | "b" => Ok(Command::Back((!rest.is_empty()).then(|| rest.to_string()))),
            "show" | "" => Ok(Command::Show),
            "status" => Ok(Command::Status),
            "events" => Ok(Command::Events),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(AppError::Command(format!("unknown command `{other}` (try `help`)"))),
        }
    }
}

/// Lo que el binario debe mostrar tras un comando.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Screen(String),
    Submitted(QuoteRequirement),
    Quit,
}

pub const HELP: &str = "\
commands:
  set <field> [value]   update a field of the current step (empty clears it)
  next                  validate and continue (submits on the last step)
  back [step-id]        go to the previous step, or to an earlier step by id
  show | status | events | reset | help | quit";

pub struct QuoteSession {
    engine: QuoteEngine,
    submitted: mpsc::UnboundedReceiver<QuoteRequirement>,
    preset: QuoteFormData,
}

impl QuoteSession {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let (tx, submitted) = mpsc::unbounded_channel();
        let preset = QuoteFormData::new(config.preset_shipping_type);
        let handler = on_requirement(move |req: QuoteRequirement| {
            let sent = tx.send(req).map_err(|e| SubmissionError::Failed(e.to_string()));
            async move { sent }
        });
        let engine = quote_engine(config.today(), preset.clone(), handler)?;
        info!("quote session {} started", engine.flow_id());
        Ok(Self { engine,
                  submitted,
                  preset })
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply, AppError> {
        debug!("command {command:?}");
        match command {
            Command::Set { field, raw } => {
                self.engine.input(&field, &raw);
                Ok(Reply::Screen(self.screen()))
            }
            Command::Next => self.next().await,
            Command::Back(None) => {
                if !self.engine.retreat() {
                    return Ok(Reply::Screen(format!("already at the first step\n{}", self.screen())));
                }
                Ok(Reply::Screen(self.screen()))
            }
            Command::Back(Some(step_id)) => {
                if !self.engine.retreat_to(&step_id) {
                    return Err(AppError::Command(format!("`{step_id}` is not an earlier step")));
                }
                Ok(Reply::Screen(self.screen()))
            }
            Command::Show => Ok(Reply::Screen(self.screen())),
            Command::Status => Ok(Reply::Screen(self.status())),
            Command::Events => Ok(Reply::Screen(self.engine.event_variants().join(" "))),
            Command::Reset => {
                self.engine.reset(self.preset.clone())?;
                Ok(Reply::Screen(self.screen()))
            }
            Command::Help => Ok(Reply::Screen(HELP.to_string())),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    async fn next(&mut self) -> Result<Reply, AppError> {
        match self.engine.advance().await {
            Advance::Blocked(_) | Advance::Moved { .. } => Ok(Reply::Screen(self.screen())),
            Advance::Submitted(SubmitOutcome::Completed) => match self.submitted.try_recv() {
                Ok(req) => Ok(Reply::Submitted(req)),
                Err(e) => Err(AppError::Command(format!("submission completed without a requirement: {e}"))),
            },
            Advance::Submitted(SubmitOutcome::Rejected { invalid_steps }) => {
                // Se muestra el primer step inválido con sus errores.
                if let Some(first) = invalid_steps.first() {
                    self.engine.retreat_to(first);
                    self.engine.advance().await;
                }
                Ok(Reply::Screen(format!("cannot submit, invalid steps: {}\n{}",
                                         invalid_steps.join(", "),
                                         self.screen())))
            }
            Advance::Submitted(SubmitOutcome::CallbackFailed) => {
                Ok(Reply::Screen(format!("submission failed, try again\n{}", self.screen())))
            }
        }
    }

    /// Render del step actual con su posición.
    pub fn screen(&mut self) -> String {
        let progress = self.engine.progress();
        match self.engine.render_current() {
            Some(view) => {
                let action = if progress.is_last { "submit" } else { "next" };
                format!("[{}/{}] {view}  ({action})", progress.current, progress.total)
            }
            None => "no active steps (next submits)".to_string(),
        }
    }

    fn status(&self) -> String {
        let mut out = String::new();
        let current = self.engine.current_step_id().unwrap_or("-");
        for id in self.engine.active_step_ids() {
            let mark = if id == current { ">" } else { " " };
            let _ = writeln!(out, "{mark} {id}");
        }
        let _ = write!(out, "submitting: {}", self.engine.is_submitting());
        out
    }
}
