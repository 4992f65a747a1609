use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use tokio::io::{AsyncBufReadExt, BufReader};

use medivision_core::export::{format_export, write_export, ExportRecord};
use medivision_core::media::load_image;
use medivision_core::modules::load_config;
use medivision_core::pipeline::prompt::find_style;
use medivision_core::pipeline::render::format_medical_response;
use medivision_core::{regenerate, run_analysis, AnalysisRequest, GeminiClient, SessionContext};
use medivision_types::models::{find_model, is_supported_language};
use medivision_types::{AppConfig, InputMode};

use crate::analyze_commands::open_session;
use crate::output::{print_error, print_ok, print_outcome, print_usage_line, StreamPrinter};

const HELP: &str = "\
Type a question to analyze it. Commands:
  /image PATH       attach an image to the next queries (/image none to drop it)
  /mode MODE        Text Only | Image Only | Text + Image
  /style NAME       prompt style (/style none to clear)
  /model NAME       switch model
  /language NAME    switch response language
  /regen OPTION     re-run the last query (e.g. /regen More Detailed)
  /history          list past analyses
  /show N           print analysis N from the history
  /export [N]       save analysis N (default 1) as Markdown
  /feedback up|down rate the last answer
  /stats            usage and feedback counters
  /clear            clear the history
  /reset            reset the session (keeps your API key)
  /help             show this help
  /quit             leave";

/// Mutable selections for the REPL.
struct SessionState {
    config: AppConfig,
    model: String,
    language: String,
    mode: InputMode,
    style: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

enum Flow {
    Continue,
    Quit,
}

pub async fn run_session(
    model: Option<String>,
    language: Option<String>,
    api_key: Option<String>,
) -> Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let mut ctx = open_session(&config, api_key)?;
    let client = GeminiClient::new(&config).map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let mut state = SessionState {
        model: model.unwrap_or_else(|| config.default_model.clone()),
        language: language.unwrap_or_else(|| config.default_language.clone()),
        mode: InputMode::TextOnly,
        style: None,
        image: None,
        config,
    };

    tracing::info!("[Session] Started session {} ({}, {})", ctx.id(), state.model, state.language);
    println!("{}", "MediVision interactive session".cyan().bold());
    println!("{}", "Educational use only. Always consult a licensed medical professional.".dimmed());
    println!("Model: {} | Language: {} | /help for commands\n", state.model, state.language);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "›".cyan());
        let _ = std::io::Write::flush(&mut std::io::stdout());

        let Some(line) = lines.next_line().await? else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let flow = if let Some(command) = line.strip_prefix('/') {
            handle_command(command, &mut ctx, &client, &mut state).await
        } else {
            ask(line, &mut ctx, &client, &state).await;
            Flow::Continue
        };

        if let Flow::Quit = flow {
            break;
        }
    }

    println!("{}", "Goodbye.".dimmed());
    Ok(())
}

async fn ask(text: &str, ctx: &mut SessionContext, client: &GeminiClient, state: &SessionState) {
    let mut request = AnalysisRequest::new(&state.model, &state.language, state.mode).with_text(text);
    request.image = state.image.as_ref().map(|(_, bytes)| bytes.clone());
    request.style = state.style.clone();

    let mut printer = StreamPrinter::new();
    match run_analysis(ctx, client, &state.config, request, |buffer| printer.update(buffer)).await {
        Ok(report) => {
            printer.finish(&report.response);
            print_outcome(&report);
            print_usage_line(&report, &ctx.usage);
        },
        Err(e) => print_error(&e.user_message()),
    }
}

async fn handle_command(
    command: &str,
    ctx: &mut SessionContext,
    client: &GeminiClient,
    state: &mut SessionState,
) -> Flow {
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "exit" | "q" => return Flow::Quit,
        "help" => println!("{}", HELP),
        "image" => set_image(arg, state),
        "mode" => match InputMode::from_label(arg) {
            Some(mode) => {
                state.mode = mode;
                print_ok(&format!("Input mode: {}", mode));
            },
            None => print_error(&format!("Unknown input mode: {}", arg)),
        },
        "style" => {
            if arg.is_empty() || arg.eq_ignore_ascii_case("none") {
                state.style = None;
                print_ok("Prompt style cleared");
            } else if let Some(style) = find_style(arg) {
                state.style = Some(style.name.to_string());
                print_ok(&format!("Prompt style: {}", style.name));
            } else {
                print_error(&format!("Unknown prompt style: {} (see `medivision styles`)", arg));
            }
        },
        "model" => match find_model(arg) {
            Some(spec) => {
                state.model = spec.display_name.to_string();
                print_ok(&format!("Model: {}", spec.display_name));
            },
            None => print_error(&format!("Unknown model: {} (see `medivision models`)", arg)),
        },
        "language" => {
            if is_supported_language(arg) {
                state.language = arg.to_string();
                print_ok(&format!("Language: {}", arg));
            } else {
                print_error(&format!("Unsupported language: {} (see `medivision languages`)", arg));
            }
        },
        "regen" => {
            ctx.retarget_last_request(&state.model, &state.language);
            let mut printer = StreamPrinter::new();
            match regenerate(ctx, client, &state.config, arg, |buffer| printer.update(buffer)).await {
                Ok(report) => {
                    printer.finish(&report.response);
                    print_outcome(&report);
                    print_usage_line(&report, &ctx.usage);
                },
                Err(e) => print_error(&e.user_message()),
            }
        },
        "history" => print_history(ctx),
        "show" => match parse_index(arg).and_then(|n| ctx.history.get(n)) {
            Some(entry) => {
                println!("{}", format!("{} · {}", entry.title, entry.formatted_timestamp()).cyan().bold());
                println!("{}\n", entry.query.italic());
                println!("{}", format_medical_response(&entry.response));
            },
            None => print_error("No such history entry"),
        },
        "export" => export_entry(arg, ctx),
        "feedback" => match arg {
            "up" | "+" => {
                ctx.add_feedback(true);
                print_ok("Thanks for the feedback");
            },
            "down" | "-" => {
                ctx.add_feedback(false);
                print_ok("Thanks, we'll try to improve");
            },
            _ => print_error("Usage: /feedback up|down"),
        },
        "stats" => print_stats(ctx),
        "clear" => {
            ctx.history.clear();
            print_ok("History cleared");
        },
        "reset" => {
            ctx.reset();
            print_ok("Session reset");
        },
        other => print_error(&format!("Unknown command: /{} (try /help)", other)),
    }
    Flow::Continue
}

fn set_image(arg: &str, state: &mut SessionState) {
    if arg.is_empty() || arg.eq_ignore_ascii_case("none") {
        state.image = None;
        print_ok("Image removed");
        return;
    }
    match load_image(&PathBuf::from(arg)) {
        Ok(upload) => {
            print_ok(&format!("Attached {} ({} bytes)", upload.file_name, upload.bytes.len()));
            state.image = Some((upload.file_name, upload.bytes));
            if !state.mode.accepts_image() {
                state.mode = InputMode::TextAndImage;
                print_ok(&format!("Input mode: {}", state.mode));
            }
        },
        Err(e) => print_error(&e.user_message()),
    }
}

fn parse_index(arg: &str) -> Option<usize> {
    if arg.is_empty() {
        return Some(1);
    }
    arg.parse().ok()
}

fn print_history(ctx: &SessionContext) {
    if ctx.history.is_empty() {
        println!("{}", "No analyses yet.".yellow());
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Title", "Time", "Model", "Tokens"]);
    for (i, entry) in ctx.history.entries().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.title),
            Cell::new(entry.formatted_timestamp()),
            Cell::new(&entry.model),
            Cell::new(entry.tokens),
        ]);
    }
    println!("{table}");
}

fn export_entry(arg: &str, ctx: &SessionContext) {
    let Some(number) = parse_index(arg) else {
        print_error("Usage: /export [N]");
        return;
    };
    let Some(entry) = ctx.history.get(number) else {
        print_error("No such history entry");
        return;
    };

    let prefix = format!("MediVision_{}", number);
    let content = format_export(&ExportRecord::from(entry));
    match write_export(&PathBuf::from("."), Some(&prefix), &content) {
        Ok(path) => {
            tracing::info!("[Export] History entry {} written to {}", number, path.display());
            print_ok(&format!("Report saved to {}", path.display()));
        },
        Err(e) => print_error(&e.user_message()),
    }
}

fn print_stats(ctx: &SessionContext) {
    let (tokens, cost) = ctx.usage.display();
    let summary = ctx.history.summary();

    println!("{}", "Session statistics".cyan().bold());
    println!("  Tokens: {}  Cost: {}", tokens, cost);
    println!(
        "  Analyses: {} ({} tokens, {} languages, {} models)",
        summary.total_analyses, summary.total_tokens, summary.languages_used, summary.models_used
    );
    println!(
        "  Feedback: {} 👍 / {} 👎  Regenerations: {}",
        ctx.feedback.positive, ctx.feedback.negative, ctx.regenerate_count
    );
}
