//! Line-oriented driver that stands in for the browser: it turns typed
//! commands into page events, renders the page, and follows download
//! navigations.

use std::{
    io::{self, BufRead},
    thread,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use crossbeam_channel::{never, select, unbounded, Receiver};

use crate::controller::{
    bindings::{DomEvent, Element, Key},
    Controller,
};

const IDLE_WAIT: Duration = Duration::from_millis(250);

pub const HELP: &str = "\
commands:
  <url> | analyze [url]   analyze a video url (Enter in the input)
  pick <n>                select format n
  download                confirm the selected format
  close | esc | backdrop  close the format dialog
  platform <name>         show the input hint for a platform
  goto <#section>         scroll to a page section
  show                    print the page
  help                    print this help
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Analyze(Option<String>),
    Pick(usize),
    Download,
    Close,
    Escape,
    Backdrop,
    Platform(String),
    Goto(String),
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match word.to_ascii_lowercase().as_str() {
        "analyze" | "a" => Some(Command::Analyze(arg)),
        "pick" | "p" => rest
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(Command::Pick),
        "download" | "d" | "ok" => Some(Command::Download),
        "close" => Some(Command::Close),
        "esc" | "escape" => Some(Command::Escape),
        "backdrop" => Some(Command::Backdrop),
        "platform" => arg.map(Command::Platform),
        "goto" => arg.map(|target| {
            if target.starts_with('#') {
                Command::Goto(target)
            } else {
                Command::Goto(format!("#{target}"))
            }
        }),
        "show" => Some(Command::Show),
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        _ if line.contains("://") => Some(Command::Analyze(Some(line.to_string()))),
        _ => None,
    }
}

/// Translates a command into the page events a browser user would produce.
pub fn apply_command(controller: &mut Controller, command: Command) {
    match command {
        Command::Analyze(Some(url)) => {
            controller.set_url_input(url);
            controller.dispatch(DomEvent::key_press(Element::UrlInput, Key::Enter));
        }
        Command::Analyze(None) => controller.dispatch(DomEvent::click(Element::AnalyzeButton)),
        Command::Pick(n) => controller.dispatch(DomEvent::click(Element::FormatItem(n - 1))),
        Command::Download => controller.dispatch(DomEvent::click(Element::ConfirmButton)),
        Command::Close => controller.dispatch(DomEvent::click(Element::CloseButton)),
        Command::Escape => {
            controller.dispatch(DomEvent::key_down(Element::Document, Key::Escape))
        }
        Command::Backdrop => controller.dispatch(DomEvent::click(Element::DialogBackdrop)),
        Command::Platform(name) => {
            controller.dispatch(DomEvent::click(Element::PlatformLogo(name)))
        }
        Command::Goto(href) => controller.dispatch(DomEvent::click(Element::AnchorLink(href))),
        Command::Show | Command::Help | Command::Quit => {}
    }
}

pub fn run(mut controller: Controller) -> Result<()> {
    let mut lines = Some(spawn_stdin_reader()?);
    let closed_stdin = never::<String>();
    let backend_events = controller.backend_events().clone();
    let mut last_render = String::new();

    println!("{HELP}");
    print!("{}", controller.page().render_text());

    loop {
        if lines.is_none() && !controller.is_busy() {
            break;
        }

        let wait = controller
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_WAIT);

        let mut stdin_closed = false;
        select! {
            recv(lines.as_ref().unwrap_or(&closed_stdin)) -> line => match line {
                Ok(line) => match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::Help) => println!("{HELP}"),
                    Some(Command::Show) => print!("{}", controller.page().render_text()),
                    Some(command) => apply_command(&mut controller, command),
                    None => println!("unrecognized command; type 'help'"),
                },
                Err(_) => {
                    tracing::debug!("stdin closed; finishing pending work");
                    stdin_closed = true;
                }
            },
            recv(backend_events) -> event => match event {
                Ok(event) => controller.apply_backend_event(event),
                Err(_) => bail!("backend worker stopped unexpectedly"),
            },
            default(wait) => {}
        }
        if stdin_closed {
            lines = None;
        }

        controller.tick(Instant::now());
        if let Some(navigation) = controller.take_navigation() {
            println!("-> {}", navigation.path);
            controller.retrieve_file(navigation.filename);
        }

        let rendered = controller.page().render_text();
        if rendered != last_render {
            print!("{rendered}");
            last_render = rendered;
        }
    }

    Ok(())
}

fn spawn_stdin_reader() -> Result<Receiver<String>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("failed to spawn stdin reader")?;
    Ok(rx)
}
