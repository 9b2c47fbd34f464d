//! services/app/src/shell.rs
//!
//! A line-oriented front end for the two screens. Each input line is one UI
//! event; after every event or background completion the affected screen is
//! rendered as text.

use std::fmt::Write as _;
use std::sync::Arc;

use informes_core::{
    Credentials, FormStatus, FormView, LoginField, MessageTone, NoticeDuration, ReportDraft,
    ReportField,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::adapters::{BackStackNavigator, ToastQueue};
use crate::screens::{InformesScreen, LoginScreen};

//=========================================================================================
// Commands
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoginEdit(LoginField, String),
    LoginSubmit,
    LoginRegister,
    InformeEdit(ReportField, String),
    InformeSubmit,
    InformeAttach,
    /// Wait for every in-flight submission to complete.
    Wait,
    Back,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    #[error("unknown {screen} field '{field}'")]
    UnknownField { screen: &'static str, field: String },
    #[error("'{0}' needs an action or a field")]
    MissingAction(&'static str),
}

fn login_field(name: &str) -> Option<LoginField> {
    match name {
        "email" | "correo" => Some(LoginField::Email),
        "password" | "contraseña" | "clave" => Some(LoginField::Password),
        _ => None,
    }
}

fn report_field(name: &str) -> Option<ReportField> {
    match name {
        "curso" | "course" => Some(ReportField::Course),
        "año" | "anio" | "year" => Some(ReportField::Year),
        "semestre" | "semester" => Some(ReportField::Semester),
        "fecha" | "date" => Some(ReportField::Date),
        "comentarios" | "comments" => Some(ReportField::Comments),
        _ => None,
    }
}

/// Splits off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    input
        .trim_start()
        .split_once(char::is_whitespace)
        .unwrap_or((input.trim_start(), ""))
}

/// Parses one input line. Field values are the rest of the line, verbatim;
/// an absent value clears the field. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (head, rest) = split_word(line);
    let command = match head.to_lowercase().as_str() {
        "" => return Ok(None),
        "login" => {
            let (action, value) = split_word(rest);
            match action.to_lowercase().as_str() {
                "" => return Err(ParseError::MissingAction("login")),
                "submit" | "entrar" => Command::LoginSubmit,
                "register" | "registro" => Command::LoginRegister,
                other => {
                    let field = login_field(other).ok_or_else(|| ParseError::UnknownField {
                        screen: "login",
                        field: other.to_string(),
                    })?;
                    Command::LoginEdit(field, value.to_string())
                }
            }
        }
        "informe" => {
            let (action, value) = split_word(rest);
            match action.to_lowercase().as_str() {
                "" => return Err(ParseError::MissingAction("informe")),
                "submit" | "guardar" => Command::InformeSubmit,
                "attach" | "adjuntar" => Command::InformeAttach,
                other => {
                    let field = report_field(other).ok_or_else(|| ParseError::UnknownField {
                        screen: "informe",
                        field: other.to_string(),
                    })?;
                    Command::InformeEdit(field, value.to_string())
                }
            }
        }
        "wait" => Command::Wait,
        "back" => Command::Back,
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

pub const HELP: &str = "\
commands:
  login <email|password> <value>     edit a login field
  login submit | login register
  informe <curso|año|semestre|fecha|comentarios> <value>
  informe submit | informe attach
  wait      wait for submissions in flight
  back      go back one screen
  show      print both screens
  quit";

//=========================================================================================
// Rendering
//=========================================================================================

fn status_line(submit_enabled: bool, show_spinner: bool) -> &'static str {
    match (submit_enabled, show_spinner) {
        (_, true) => "[ ... ] (enviando)",
        (true, false) => "[ enviar ]",
        (false, false) => "[ enviar ] (deshabilitado)",
    }
}

fn message_line(out: &mut String, message: &str, tone: MessageTone) {
    if message.is_empty() {
        return;
    }
    let marker = match tone {
        MessageTone::Success => "+",
        MessageTone::Error => "!",
        MessageTone::Neutral => "*",
    };
    let _ = writeln!(out, "  {} {}", marker, message);
}

fn field_line(out: &mut String, label: &str, value: &str, error: Option<&String>) {
    let _ = writeln!(out, "  {:<12} {}", label, value);
    if let Some(error) = error {
        let _ = writeln!(out, "  {:<12} ^ {}", "", error);
    }
}

pub fn render_login(view: &FormView<Credentials>) -> String {
    let mut out = String::from("== Login ==\n");
    field_line(
        &mut out,
        "email",
        &view.values.email,
        view.errors.get(&LoginField::Email),
    );
    let masked = "*".repeat(view.values.password.chars().count());
    field_line(
        &mut out,
        "password",
        &masked,
        view.errors.get(&LoginField::Password),
    );
    let _ = writeln!(out, "  {}", status_line(view.submit_enabled, view.show_spinner));
    message_line(&mut out, &view.message, view.tone);
    out
}

pub fn render_informe(view: &FormView<ReportDraft>) -> String {
    let mut out = String::from("== Nuevo Informe ==\n");
    let fields = [
        ("curso *", ReportField::Course, &view.values.course),
        ("año *", ReportField::Year, &view.values.year),
        ("semestre *", ReportField::Semester, &view.values.semester),
        ("fecha", ReportField::Date, &view.values.date),
        ("comentarios", ReportField::Comments, &view.values.comments),
    ];
    for (label, field, value) in fields {
        field_line(&mut out, label, value, view.errors.get(&field));
    }
    let _ = writeln!(out, "  adjuntos     {}", view.values.attachments.len());
    let _ = writeln!(out, "  {}", status_line(view.submit_enabled, view.show_spinner));
    message_line(&mut out, &view.message, view.tone);
    out
}

fn render_toasts(toasts: &[(String, NoticeDuration)]) -> String {
    let mut out = String::new();
    for (text, duration) in toasts {
        let tag = match duration {
            NoticeDuration::Short => "toast",
            NoticeDuration::Long => "toast (long)",
        };
        let _ = writeln!(out, "({}) {}", tag, text);
    }
    out
}

//=========================================================================================
// The Shell
//=========================================================================================

/// Whether the read loop should keep going.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    pub login: LoginScreen,
    pub informes: InformesScreen,
    navigator: Arc<BackStackNavigator>,
    toasts: Arc<ToastQueue>,
}

impl Shell {
    pub fn new(
        login: LoginScreen,
        informes: InformesScreen,
        navigator: Arc<BackStackNavigator>,
        toasts: Arc<ToastQueue>,
    ) -> Self {
        Self {
            login,
            informes,
            navigator,
            toasts,
        }
    }

    fn route_line(&self) -> String {
        format!(
            "-- screen: {}\n",
            self.navigator.current().unwrap_or_default()
        )
    }

    /// Applies one command and returns the text to print.
    pub async fn handle(&mut self, command: Command) -> (Flow, String) {
        let mut out = String::new();
        match command {
            Command::LoginEdit(field, value) => {
                self.login.edit(field, value);
                out.push_str(&render_login(&self.login.view()));
            }
            Command::LoginSubmit => {
                self.login.submit();
                out.push_str(&render_login(&self.login.view()));
            }
            Command::LoginRegister => {
                self.login.register();
                out.push_str(&self.route_line());
            }
            Command::InformeEdit(field, value) => {
                self.informes.edit(field, value);
                out.push_str(&render_informe(&self.informes.view()));
            }
            Command::InformeSubmit => {
                self.informes.submit();
                out.push_str(&render_informe(&self.informes.view()));
            }
            Command::InformeAttach => {
                self.informes.attach_files();
            }
            Command::Wait => {
                if self.login.settle().await.is_some() {
                    out.push_str(&render_login(&self.login.view()));
                    out.push_str(&self.route_line());
                }
                if self.informes.settle().await.is_some() {
                    out.push_str(&render_informe(&self.informes.view()));
                }
            }
            Command::Back => {
                self.navigator.back();
                out.push_str(&self.route_line());
            }
            Command::Show => {
                out.push_str(&self.route_line());
                out.push_str(&render_login(&self.login.view()));
                out.push_str(&render_informe(&self.informes.view()));
            }
            Command::Help => {
                out.push_str(HELP);
                out.push('\n');
            }
            Command::Quit => return (Flow::Quit, out),
        }
        out.push_str(&render_toasts(&self.toasts.drain()));
        (Flow::Continue, out)
    }

    /// Reads commands until `quit` or end of input, interleaving background
    /// completions between lines. Submissions still in flight at end of input
    /// are awaited before returning.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        loop {
            let text = tokio::select! {
                biased;
                result = self.login.completed() => {
                    let _ = self.login.apply(result);
                    let mut text = render_login(&self.login.view());
                    text.push_str(&self.route_line());
                    text.push_str(&render_toasts(&self.toasts.drain()));
                    text
                }
                result = self.informes.completed() => {
                    let _ = self.informes.apply(result);
                    let mut text = render_informe(&self.informes.view());
                    text.push_str(&render_toasts(&self.toasts.drain()));
                    text
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        let (_, text) = self.handle(Command::Wait).await;
                        output.write_all(text.as_bytes()).await?;
                        break;
                    };
                    match parse_command(&line) {
                        Ok(Some(command)) => {
                            let (flow, text) = self.handle(command).await;
                            if flow == Flow::Quit {
                                output.write_all(text.as_bytes()).await?;
                                break;
                            }
                            text
                        }
                        Ok(None) => String::new(),
                        Err(err) => format!("{}\n", err),
                    }
                }
            };
            output.write_all(text.as_bytes()).await?;
            output.flush().await?;
        }
        output.flush().await?;
        info!(
            login_status = ?status_name(self.login.form().status()),
            "Shell finished."
        );
        Ok(())
    }
}

fn status_name(status: &FormStatus) -> &'static str {
    match status {
        FormStatus::Idle => "idle",
        FormStatus::Submitting => "submitting",
        FormStatus::Succeeded => "succeeded",
        FormStatus::Failed(_) => "failed",
    }
}
