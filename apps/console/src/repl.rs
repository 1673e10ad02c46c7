//! Line-oriented operator front end.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use client_core::Transport;
use shared::domain::ItemId;

use crate::{
    config::validate_base_url,
    controller::{events::ConsoleEvent, orchestration::Intent, Controller, Dispatch},
    prompt::Confirmer,
    render,
};

const HELP: &str = "\
connect              check the API connection, then load the file list
files                reload the source file list
source <name>        scope operations to one source file
items                load items for the selected source
filter [query]       filter the table by ID or title (empty clears)
toggle <id>...       select or deselect items
table                show the filtered item table
show                 show status, checklist, files, items and selection
validate             validate the first selected item
upload               upload the selected items
upload-file          upload every item of the selected source file
upload-all           upload every item of every source file
failed               list items that failed the last upload
delete [number...]   delete by itemNumber (no arguments: one per line, blank line ends)
base <url>           change the API base URL
status               show the last operation status
details              show the diagnostic transcript of the last operation
quit                 leave the console";

#[derive(Debug, Clone, PartialEq)]
pub enum ReplAction {
    Help,
    Quit,
    Show,
    Table,
    Status,
    Details,
    Local(Vec<ConsoleEvent>),
    Dispatch(Intent),
    /// `delete` without arguments: item numbers follow on their own lines.
    DeleteMultiline,
    Invalid(String),
    Empty,
}

pub fn parse_line(line: &str) -> ReplAction {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));
    let args: Vec<&str> = rest.split_whitespace().collect();

    match command {
        "" => ReplAction::Empty,
        "help" | "?" => ReplAction::Help,
        "quit" | "exit" => ReplAction::Quit,
        "show" => ReplAction::Show,
        "table" => ReplAction::Table,
        "status" => ReplAction::Status,
        "details" => ReplAction::Details,
        "connect" => ReplAction::Dispatch(Intent::CheckConnection),
        "files" => ReplAction::Dispatch(Intent::LoadFiles),
        "items" => ReplAction::Dispatch(Intent::LoadItems),
        "validate" => ReplAction::Dispatch(Intent::ValidateFirstSelected),
        "upload" => ReplAction::Dispatch(Intent::UploadSelected),
        "upload-file" => ReplAction::Dispatch(Intent::UploadSourceFile),
        "upload-all" => ReplAction::Dispatch(Intent::UploadAllFiles),
        "failed" => ReplAction::Dispatch(Intent::ListFailed),
        "delete" if args.is_empty() => ReplAction::DeleteMultiline,
        "delete" => ReplAction::Dispatch(Intent::DeleteByItemNumber {
            text: args.join("\n"),
        }),
        "filter" => ReplAction::Local(vec![ConsoleEvent::QueryChanged(rest.to_string())]),
        "source" if !rest.is_empty() => {
            ReplAction::Local(vec![ConsoleEvent::SourceSelected(rest.to_string())])
        }
        "toggle" if !args.is_empty() => ReplAction::Local(
            args.iter()
                .map(|id| ConsoleEvent::SelectionToggled(ItemId::new(*id)))
                .collect(),
        ),
        "base" if !rest.is_empty() => match validate_base_url(rest) {
            Ok(url) => ReplAction::Local(vec![ConsoleEvent::BaseUrlChanged(url)]),
            Err(error) => ReplAction::Local(vec![ConsoleEvent::Rejected {
                title: "Connection settings".to_string(),
                error,
            }]),
        },
        "source" | "toggle" | "base" => {
            ReplAction::Invalid(format!("usage: see `help` for `{command}`"))
        }
        other => ReplAction::Invalid(format!("unknown command `{other}`; type `help`")),
    }
}

pub async fn run<T, C, R, W>(
    controller: &mut Controller<T, C>,
    mut input: R,
    out: &mut W,
) -> Result<()>
where
    T: Transport,
    C: Confirmer,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", render::status(controller.state()))?;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_line(&mut input)? else {
            break;
        };

        match parse_line(&line) {
            ReplAction::Empty => {}
            ReplAction::Quit => break,
            ReplAction::Help => writeln!(out, "{HELP}")?,
            ReplAction::Show => writeln!(out, "{}", render::overview(controller.state()))?,
            ReplAction::Table => writeln!(out, "{}", render::item_table(controller.state()))?,
            ReplAction::Status => writeln!(out, "{}", render::status(controller.state()))?,
            ReplAction::Details => writeln!(out, "{}", render::details(controller.state()))?,
            ReplAction::Invalid(message) => writeln!(out, "{message}")?,
            ReplAction::Local(events) => {
                for event in events {
                    controller.apply(event);
                }
                writeln!(out, "{}", render::selection_card(controller.state()))?;
            }
            ReplAction::DeleteMultiline => {
                writeln!(out, "itemNumbers, one per line; finish with an empty line:")?;
                let text = read_block(&mut input)?;
                dispatch(controller, Intent::DeleteByItemNumber { text }, out).await?;
            }
            ReplAction::Dispatch(intent) => dispatch(controller, intent, out).await?,
        }
    }
    Ok(())
}

async fn dispatch<T, C, W>(
    controller: &mut Controller<T, C>,
    intent: Intent,
    out: &mut W,
) -> Result<()>
where
    T: Transport,
    C: Confirmer,
    W: Write,
{
    let show_files = matches!(intent, Intent::CheckConnection | Intent::LoadFiles);
    let show_items = intent == Intent::LoadItems;
    match controller.dispatch(intent).await? {
        Dispatch::Declined => writeln!(out, "Cancelled.")?,
        Dispatch::Busy { active } => writeln!(out, "Still running: {active}")?,
        Dispatch::Completed { .. } | Dispatch::Rejected => {
            writeln!(out, "{}", render::status(controller.state()))?;
            if show_files {
                writeln!(out, "{}", render::files(controller.state()))?;
            }
            if show_items {
                writeln!(out, "{}", render::item_table(controller.state()))?;
            }
        }
    }
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok((read > 0).then_some(line))
}

fn read_block(input: &mut impl BufRead) -> Result<String> {
    let mut lines = Vec::new();
    while let Some(line) = read_line(input)? {
        if line.trim().is_empty() {
            break;
        }
        lines.push(line.trim_end().to_string());
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, sync::Arc};

    use async_trait::async_trait;
    use client_core::{HttpMethod, RawResponse, TransportError};
    use serde_json::Value;
    use shared::error::InputError;

    use super::*;
    use crate::{prompt::AssumeYes, state::AppState};

    #[derive(Default)]
    struct RecordingTransport {
        calls: std::sync::Mutex<Vec<(String, Option<Value>)>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            _method: HttpMethod,
            url: &str,
            payload: Option<&Value>,
        ) -> Result<RawResponse, TransportError> {
            self.calls
                .lock()
                .expect("calls")
                .push((url.to_string(), payload.cloned()));
            Ok(RawResponse {
                status: 200,
                text: r#"{"success": true}"#.to_string(),
            })
        }
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_line("toggle 1 2"),
            ReplAction::Local(vec![
                ConsoleEvent::SelectionToggled(ItemId::new("1")),
                ConsoleEvent::SelectionToggled(ItemId::new("2")),
            ])
        );
        assert_eq!(
            parse_line("  filter  corner sofa "),
            ReplAction::Local(vec![ConsoleEvent::QueryChanged("corner sofa".into())])
        );
        assert_eq!(
            parse_line("filter"),
            ReplAction::Local(vec![ConsoleEvent::QueryChanged(String::new())])
        );
        assert_eq!(parse_line("delete"), ReplAction::DeleteMultiline);
        assert_eq!(
            parse_line("delete 11 22"),
            ReplAction::Dispatch(Intent::DeleteByItemNumber {
                text: "11\n22".into()
            })
        );
        assert!(matches!(parse_line("frobnicate"), ReplAction::Invalid(_)));
        assert!(matches!(parse_line("source"), ReplAction::Invalid(_)));
    }

    #[test]
    fn invalid_base_url_becomes_a_rejection() {
        assert_eq!(
            parse_line("base /api"),
            ReplAction::Local(vec![ConsoleEvent::Rejected {
                title: "Connection settings".into(),
                error: InputError::InvalidBaseUrl("/api".into()),
            }])
        );
    }

    struct NoTerminal;

    impl Confirmer for NoTerminal {
        fn confirm(&mut self, _prompt: &str) -> Result<bool> {
            anyhow::bail!("failed to read confirmation from terminal")
        }
    }

    #[tokio::test]
    async fn session_survives_an_unreadable_confirmation() {
        let transport = Arc::new(RecordingTransport::default());
        let mut controller =
            Controller::new(AppState::new("http://h", 50), transport.clone(), NoTerminal);
        let input = Cursor::new("upload-all\nfailed\nquit\n");
        let mut out = Vec::new();

        run(&mut controller, input, &mut out).await.expect("repl");

        let calls = transport.calls.lock().expect("calls").clone();
        assert_eq!(calls, vec![("http://h/items/status".to_string(), None)]);
        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.contains("Cancelled."));
        assert!(printed.contains("Failed items list: success"));
    }

    #[tokio::test]
    async fn multiline_delete_reads_until_blank_line() {
        let transport = Arc::new(RecordingTransport::default());
        let mut controller =
            Controller::new(AppState::new("http://h", 50), transport.clone(), AssumeYes);
        let input = Cursor::new("delete\n4069943027235\n 4069943027174\n\nquit\n");
        let mut out = Vec::new();

        run(&mut controller, input, &mut out).await.expect("repl");

        let calls = transport.calls.lock().expect("calls").clone();
        assert_eq!(
            calls,
            vec![(
                "http://h/items/delete/by-item-number".to_string(),
                Some(serde_json::json!({"item_numbers": ["4069943027235", "4069943027174"]}))
            )]
        );
        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.contains("Delete (2): success"));
    }
}
