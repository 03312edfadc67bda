//! Interactive terminal client for the todo service.
//!
//! Reads commands from stdin, executes the corresponding HTTP requests with
//! ureq, and refetches the collection after every mutation so the rendered
//! view resynchronizes with server state.

use std::io::{self, BufRead, Write};

use todo_core::{ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, TodoClient, UpdateTodo};
use todo_view::TodoView;

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add(String),
    Edit(u64, String),
    Done(u64),
    Remove(u64),
    Refresh,
    Help,
    Quit,
}

/// Parse one input line into a command. Returns `Err` with a usage hint
/// for anything unrecognized.
fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "add" if !rest.is_empty() => Ok(Command::Add(rest.to_string())),
        "add" => Err("usage: add <title>".to_string()),
        "edit" => {
            let (id, title) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: edit <id> <title>".to_string())?;
            let id = id.parse().map_err(|_| "usage: edit <id> <title>".to_string())?;
            Ok(Command::Edit(id, title.trim().to_string()))
        }
        "done" => parse_id_arg(rest, "done").map(Command::Done),
        "rm" => parse_id_arg(rest, "rm").map(Command::Remove),
        "refresh" | "ls" => Ok(Command::Refresh),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other} (try 'help')")),
    }
}

fn parse_id_arg(rest: &str, verb: &str) -> Result<u64, String> {
    rest.parse().map_err(|_| format!("usage: {verb} <id>"))
}

/// Execute an `HttpRequest` with ureq, returning the raw response.
///
/// Status-as-error is disabled so 4xx responses come back as data for the
/// core client to interpret.
fn execute(req: HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call()?,
        (HttpMethod::Delete, _) => agent.delete(&req.path).call()?,
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty()?,
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&req.path)
            .content_type("application/json")
            .send(body.as_bytes())?,
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes())?,
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty()?,
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.path)
            .content_type("application/json")
            .send(body.as_bytes())?,
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty()?,
    };

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

/// Fetch the collection and feed the result into the view's state machine.
fn refetch(client: &TodoClient, view: &mut TodoView) {
    view.fetch_started();
    let result = execute(client.build_list_todos())
        .map_err(|e| e.to_string())
        .and_then(|resp| client.parse_list_todos(resp).map_err(|e| e.to_string()));
    match result {
        Ok(todos) => view.fetch_succeeded(todos),
        Err(message) => view.fetch_failed(message),
    }
}

/// Run one mutation and report its outcome. The caller refetches afterwards.
fn run_mutation(client: &TodoClient, command: &Command) -> Result<(), String> {
    let outcome: Result<(), ApiError> = match command {
        Command::Add(title) => {
            let input = CreateTodo {
                title: title.clone(),
            };
            let req = client.build_create_todo(&input).map_err(|e| e.to_string())?;
            let resp = execute(req).map_err(|e| e.to_string())?;
            client.parse_create_todo(resp).map(|_| ())
        }
        Command::Edit(id, title) => {
            let input = UpdateTodo {
                title: Some(title.clone()),
            };
            let req = client.build_update_todo(*id, &input).map_err(|e| e.to_string())?;
            let resp = execute(req).map_err(|e| e.to_string())?;
            client.parse_update_todo(resp).map(|_| ())
        }
        Command::Done(id) => {
            let resp = execute(client.build_toggle_todo(*id)).map_err(|e| e.to_string())?;
            client.parse_toggle_todo(resp).map(|_| ())
        }
        Command::Remove(id) => {
            let resp = execute(client.build_delete_todo(*id)).map_err(|e| e.to_string())?;
            client.parse_delete_todo(resp)
        }
        Command::Refresh | Command::Help | Command::Quit => return Ok(()),
    };
    outcome.map_err(|e| e.to_string())
}

fn print_help() {
    println!("commands:");
    println!("  add <title>       create a todo");
    println!("  edit <id> <title> replace a todo's title");
    println!("  done <id>         toggle completion");
    println!("  rm <id>           delete a todo");
    println!("  refresh           refetch the list");
    println!("  quit              exit");
}

fn main() {
    let base_url =
        std::env::var("TODO_API_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let client = TodoClient::new(&base_url);
    let mut view = TodoView::new();

    refetch(&client, &mut view);

    let stdin = io::stdin();
    loop {
        for line in view.render_lines() {
            println!("{line}");
        }
        print!("> ");
        io::stdout().flush().ok();

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("input error: {e}");
                break;
            }
        }
        if input.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&input) {
            Ok(command) => command,
            Err(hint) => {
                eprintln!("{hint}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                print_help();
                continue;
            }
            ref mutation => {
                if let Err(message) = run_mutation(&client, mutation) {
                    eprintln!("{message}");
                }
                refetch(&client, &mut view);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_with_title() {
        assert_eq!(
            parse_command("add Buy milk"),
            Ok(Command::Add("Buy milk".to_string()))
        );
    }

    #[test]
    fn parse_add_without_title_is_rejected() {
        assert!(parse_command("add").is_err());
    }

    #[test]
    fn parse_edit_splits_id_and_title() {
        assert_eq!(
            parse_command("edit 3 Walk the dog"),
            Ok(Command::Edit(3, "Walk the dog".to_string()))
        );
    }

    #[test]
    fn parse_done_and_rm_take_ids() {
        assert_eq!(parse_command("done 2"), Ok(Command::Done(2)));
        assert_eq!(parse_command("rm 2"), Ok(Command::Remove(2)));
        assert!(parse_command("done two").is_err());
    }

    #[test]
    fn parse_quit_aliases() {
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn parse_unknown_command_mentions_help() {
        let err = parse_command("frobnicate").unwrap_err();
        assert!(err.contains("help"));
    }
}
