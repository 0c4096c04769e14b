use std::fs;

use clap::{Args, Parser, Subcommand};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::{Map, Value};
use uuid::Uuid;

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session token; run `login` and set FRIDGE_SESSION_TOKEN or pass --session-token")]
    MissingSessionToken,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server returned HTTP {status} for {path}")]
    ServerError { status: u16, path: String },
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("cannot read {path}: {message}")]
    ReadInput { path: String, message: String },
    #[error("{0}")]
    Usage(&'static str),
    #[error("line {line}: {message}")]
    BadTaggedLine { line: usize, message: String },
}

#[derive(Parser, Debug)]
#[command(name = "fridge-cli", about = "Fridge magnet poetry API CLI")]
struct Cli {
    #[arg(long, env = "FRIDGE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "FRIDGE_SESSION_TOKEN")]
    session_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    session_token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Create an account and print its session token.
    Signup(CredentialArgs),
    /// Sign in and print the session token.
    Login(CredentialArgs),
    Logout,
    Me,
    Words(WordsCommand),
    /// Your own poems, newest first.
    Gallery,
    /// Everyone's poems, newest first.
    Feed {
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Toggle your like on a poem.
    Like { poem_id: Uuid },
    /// Print a poem's reading; with --speak, synthesize it and print the audio URL.
    Read {
        poem_id: Uuid,
        #[arg(long, default_value_t = false)]
        speak: bool,
        #[arg(long, default_value = "")]
        voice: String,
    },
    /// Ask for a critique of a saved poem, or of `--text`.
    Analyze {
        poem_id: Option<Uuid>,
        #[arg(long, conflicts_with = "poem_id")]
        text: Option<String>,
    },
    Stickers,
    Voices,
    /// Probe the server's Fish Audio key.
    Diagnose,
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "FRIDGE_PASSWORD")]
    password: String,
}

#[derive(Args, Debug)]
struct WordsCommand {
    #[command(subcommand)]
    command: WordsSubcommand,
}

#[derive(Subcommand, Debug)]
enum WordsSubcommand {
    /// Draw a word bank the way the game does.
    Sample,
    /// Print the stored categories.
    Show,
    /// Replace the stored categories from a file.
    Import {
        path: String,
        /// Read `category<TAB>word` lines instead of a JSON object.
        #[arg(long, default_value_t = false)]
        tagged: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, session_token: cli.session_token };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Signup(args) => run_credentials(&ctx, "/api/auth/signup", args).await,
        Command::Login(args) => run_credentials(&ctx, "/api/auth/login", args).await,
        Command::Logout => {
            api_request(&ctx, reqwest::Method::POST, "/api/auth/logout", None).await?;
            eprintln!("signed out");
            Ok(())
        }
        Command::Me => get_and_print(&ctx, "/api/auth/me").await,
        Command::Words(words) => run_words(&ctx, words).await,
        Command::Gallery => get_and_print(&ctx, "/api/poems").await,
        Command::Feed { offset, limit } => get_and_print(&ctx, &format!("/api/feed?offset={offset}&limit={limit}")).await,
        Command::Like { poem_id } => {
            let json = api_request(&ctx, reqwest::Method::POST, &format!("/api/poems/{poem_id}/like"), None).await?;
            print_json(&json)
        }
        Command::Read { poem_id, speak, voice } => run_read(&ctx, poem_id, speak, &voice).await,
        Command::Analyze { poem_id, text } => run_analyze(&ctx, poem_id, text).await,
        Command::Stickers => get_and_print(&ctx, "/api/stickers").await,
        Command::Voices => get_and_print(&ctx, "/api/voices").await,
        Command::Diagnose => get_and_print(&ctx, "/api/debug/check-fish-audio").await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.get(url(cli, "/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), path: "/healthz".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_credentials(cli: &CliContext, path: &str, args: CredentialArgs) -> Result<(), CliError> {
    let body = serde_json::json!({ "email": args.email, "password": args.password });
    let json = send(cli, None, reqwest::Method::POST, path, Some(body)).await?;
    let token = json
        .get("token")
        .and_then(Value::as_str)
        .ok_or(CliError::MissingField("token"))?;
    if let Some(email) = json.pointer("/user/email").and_then(Value::as_str) {
        eprintln!("signed in as {email}");
    }
    println!("{token}");
    Ok(())
}

async fn run_words(cli: &CliContext, words: WordsCommand) -> Result<(), CliError> {
    match words.command {
        WordsSubcommand::Sample => get_and_print(cli, "/api/words").await,
        WordsSubcommand::Show => get_and_print(cli, "/api/words/categories").await,
        WordsSubcommand::Import { path, tagged } => {
            let raw = fs::read_to_string(&path).map_err(|error| CliError::ReadInput {
                path: path.clone(),
                message: error.to_string(),
            })?;
            let body = if tagged { parse_tagged_words(&raw)? } else { serde_json::from_str::<Value>(&raw)? };
            eprintln!("{}", category_summary(&body));
            let json = api_request(cli, reqwest::Method::PUT, "/api/words/categories", Some(body)).await?;
            print_json(&json)
        }
    }
}

async fn run_read(cli: &CliContext, poem_id: Uuid, speak: bool, voice: &str) -> Result<(), CliError> {
    let reading = api_request(cli, reqwest::Method::GET, &format!("/api/poems/{poem_id}/reading"), None).await?;
    if !speak {
        return print_json(&reading);
    }

    let mut body = Map::new();
    for key in ["text", "pitch", "speed"] {
        let value = reading.get(key).cloned().ok_or(CliError::MissingField(key))?;
        body.insert(key.to_owned(), value);
    }
    body.insert("voice_name".to_owned(), Value::String(voice.to_owned()));
    let json = api_request(cli, reqwest::Method::POST, "/api/tts", Some(Value::Object(body))).await?;
    let audio_url = json
        .get("audio_url")
        .and_then(Value::as_str)
        .ok_or(CliError::MissingField("audio_url"))?;
    println!("{audio_url}");
    Ok(())
}

async fn run_analyze(cli: &CliContext, poem_id: Option<Uuid>, text: Option<String>) -> Result<(), CliError> {
    let text = match (text, poem_id) {
        (Some(text), _) => Value::String(text),
        (None, Some(poem_id)) => {
            let reading =
                api_request(cli, reqwest::Method::GET, &format!("/api/poems/{poem_id}/reading"), None).await?;
            reading
                .get("text")
                .cloned()
                .ok_or(CliError::MissingField("text"))?
        }
        (None, None) => return Err(CliError::Usage("pass a poem id or --text")),
    };
    let json = api_request(cli, reqwest::Method::POST, "/api/analyze-poem", Some(serde_json::json!({ "text": text })))
        .await?;
    print_json(&json)
}

async fn get_and_print(cli: &CliContext, path: &str) -> Result<(), CliError> {
    let json = api_request(cli, reqwest::Method::GET, path, None).await?;
    print_json(&json)
}

fn url(cli: &CliContext, path: &str) -> String {
    format!("{}{}", cli.base_url.trim_end_matches('/'), path)
}

/// Authenticated request. Requires a session token.
async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let session_token = cli
        .session_token
        .as_deref()
        .ok_or(CliError::MissingSessionToken)?;
    send(cli, Some(session_token), method, path, body).await
}

async fn send(
    cli: &CliContext,
    session_token: Option<&str>,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = session_token {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    }

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()?;

    let request = client.request(method, url(cli, path));
    let request = if let Some(json) = body { request.json(&json) } else { request };

    let response = request.send().await?;
    let status = response.status();
    let value = response
        .json::<Value>()
        .await
        .unwrap_or_else(|_| Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), path: path.to_owned() });
    }
    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    if value.is_null() {
        return Ok(());
    }
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

/// Category key for a tag in a tagged word list.
fn category_for(tag: &str) -> Option<&'static str> {
    match tag.trim().to_ascii_lowercase().as_str() {
        "noun" | "nouns" | "n" => Some("nouns"),
        "verb" | "verbs" | "v" => Some("verbs"),
        "adj" | "adjective" | "adjectives" | "a" => Some("adjectives"),
        "conj" | "conjunction" | "conjunctions" | "c" => Some("conjunctions"),
        _ => None,
    }
}

/// Parse `category<TAB>word` lines into a categories object. Blank lines and
/// `#` comments are skipped; duplicate words within a category are dropped.
fn parse_tagged_words(raw: &str) -> Result<Value, CliError> {
    let mut categories: Map<String, Value> = ["nouns", "verbs", "adjectives", "conjunctions"]
        .into_iter()
        .map(|key| (key.to_owned(), Value::Array(Vec::new())))
        .collect();

    for (index, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line_no = index + 1;
        let (tag, word) = trimmed
            .split_once('\t')
            .ok_or_else(|| CliError::BadTaggedLine { line: line_no, message: "expected category<TAB>word".to_owned() })?;
        let word = word.trim();
        if word.is_empty() {
            return Err(CliError::BadTaggedLine { line: line_no, message: "empty word".to_owned() });
        }
        let key = category_for(tag)
            .ok_or_else(|| CliError::BadTaggedLine { line: line_no, message: format!("unknown category `{}`", tag.trim()) })?;

        if let Some(Value::Array(words)) = categories.get_mut(key) {
            let word = Value::String(word.to_owned());
            if !words.contains(&word) {
                words.push(word);
            }
        }
    }

    Ok(Value::Object(categories))
}

fn category_summary(body: &Value) -> String {
    let count = |key: &str| body.get(key).and_then(Value::as_array).map_or(0, Vec::len);
    format!(
        "nouns: {}, verbs: {}, adjectives: {}, conjunctions: {}",
        count("nouns"),
        count("verbs"),
        count("adjectives"),
        count("conjunctions")
    )
}
