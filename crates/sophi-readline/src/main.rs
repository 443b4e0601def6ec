mod commands;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use sophi_application::{BackgroundTasks, DebouncedPersister, DialogueService, SophiStore};
use sophi_core::SophiError;
use sophi_core::clock::now_millis;
use sophi_core::conversation::{Message, MessageRole};
use sophi_core::persona::{PersonaCategory, find_builtin, personas_in_category};
use sophi_core::repository::DataRepository;
use sophi_core::state::SophiData;
use sophi_infrastructure::export::write_conversations_csv;
use sophi_infrastructure::{ConfigService, JsonDataRepository, SophiPaths};
use sophi_interaction::{GeminiApiAgent, GeminiConceptExtractor};

use commands::{COMMAND_NAMES, Command};

/// Overrides the platform config/data directories when set.
const HOME_ENV_VAR: &str = "SOPHI_HOME";

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMAND_NAMES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Installs the file logger. The returned guard must outlive the REPL.
fn init_logging(paths: &SophiPaths, level: &str) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "sophi.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(guard)
}

/// REPL state on top of the application services.
struct Repl {
    store: Arc<SophiStore>,
    dialogue: DialogueService,
    /// Personas answering the next turn, primary first
    active: Vec<String>,
}

impl Repl {
    /// Executes one command; returns false when the REPL should exit.
    async fn handle(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Help => print_help(),
            Command::Say(text) => self.say(&text).await?,
            Command::Persona(id) => {
                let exists = self.persona_exists(&id).await;
                if !exists {
                    return Err(anyhow!("unknown persona '{id}' (see /personas)"));
                }
                self.store
                    .update(|d| {
                        d.set_active_persona(&id);
                        Ok(())
                    })
                    .await?;
                println!("{}", format!("Active persona: {id}").bright_green());
                self.active = vec![id];
            }
            Command::ListPersonas => self.list_personas().await,
            Command::Multi(ids) => {
                for id in &ids {
                    if !self.persona_exists(id).await {
                        return Err(anyhow!("unknown persona '{id}' (see /personas)"));
                    }
                }
                println!(
                    "{}",
                    format!("Council: {}", ids.join(", ")).bright_green()
                );
                self.active = ids;
            }
            Command::CreateCustom { name, instruction } => {
                let persona = self
                    .store
                    .update(|d| d.add_custom_persona(&name, "", &instruction, "", now_millis()))
                    .await?;
                println!(
                    "{}",
                    format!("Created persona '{}'", persona.name).bright_green()
                );
            }
            Command::DeleteCustom(name) => {
                let removed = self
                    .store
                    .update(|d| {
                        let id = d
                            .custom_personas
                            .iter()
                            .find(|p| p.name == name)
                            .map(|p| p.id.clone())
                            .ok_or_else(|| {
                                SophiError::not_found("CustomPersona", &name)
                            })?;
                        d.delete_custom_persona(&id)
                    })
                    .await?;
                self.active.retain(|id| id != &removed.name);
                if self.active.is_empty() {
                    let fallback = self.store.read(|d| d.active_persona.clone()).await;
                    self.active.push(fallback);
                }
                println!(
                    "{}",
                    format!("Deleted persona '{}'", removed.name).bright_green()
                );
            }
            Command::NewConversation => {
                self.store.update(|d| d.select_conversation(None)).await?;
                println!("{}", "Next message starts a new conversation.".bright_black());
            }
            Command::ListConversations => self.list_conversations().await,
            Command::Open(n) => {
                let (title, personas) = self
                    .store
                    .update(|d| {
                        let conv = d
                            .conversations
                            .get(n - 1)
                            .ok_or_else(|| SophiError::not_found("Conversation", n.to_string()))?;
                        let result = (conv.title.clone(), conv.persona_set());
                        let id = conv.id.clone();
                        d.select_conversation(Some(&id))?;
                        Ok(result)
                    })
                    .await?;
                if !personas.is_empty() {
                    self.active = personas;
                }
                println!("{}", format!("Opened: {title}").bright_green());
                self.print_transcript().await;
            }
            Command::Delete(n) => {
                let removed = self
                    .store
                    .update(|d| {
                        let id = d
                            .conversations
                            .get(n - 1)
                            .map(|c| c.id.clone())
                            .ok_or_else(|| SophiError::not_found("Conversation", n.to_string()))?;
                        d.delete_conversation(&id)
                    })
                    .await?;
                println!("{}", format!("Deleted: {}", removed.title).bright_green());
            }
            Command::AddNote { title, content } => {
                self.store
                    .update(|d| Ok(d.add_note(&title, &content, now_millis())))
                    .await?;
                println!("{}", format!("Saved note '{title}'").bright_green());
            }
            Command::ListNotes => self.list_notes().await,
            Command::Activate(n) => {
                let (title, active) = self
                    .store
                    .update(|d| {
                        let note = d
                            .notes
                            .get(n - 1)
                            .map(|note| (note.id.clone(), note.title.clone()))
                            .ok_or_else(|| SophiError::not_found("Note", n.to_string()))?;
                        let active = d.toggle_active_note(&note.0)?;
                        Ok((note.1, active))
                    })
                    .await?;
                let state = if active { "active" } else { "inactive" };
                println!("{}", format!("Note '{title}' is now {state}").bright_green());
            }
            Command::Profile(text) => {
                self.store
                    .update(|d| {
                        d.set_user_prompt(&text);
                        Ok(())
                    })
                    .await?;
                println!("{}", "Profile updated.".bright_green());
            }
            Command::Forge(text) => {
                let persona = self.primary();
                self.store
                    .update(|d| {
                        d.set_augmentation(&persona, &text);
                        Ok(())
                    })
                    .await?;
                let verb = if text.trim().is_empty() { "Cleared" } else { "Forged" };
                println!("{}", format!("{verb} DNA for {persona}").bright_green());
            }
            Command::Concepts => self.list_concepts().await,
            Command::Think => {
                let current = self.store.read(|d| d.current_conversation_id.clone()).await;
                let Some(id) = current else {
                    return Err(anyhow!("no open conversation"));
                };
                println!("{}", "Contemplating...".bright_black());
                let text = self.dialogue.generate_thought_experiment(&id).await?;
                println!("{}", "[THOUGHT EXPERIMENT]".bright_magenta());
                for line in text.lines() {
                    println!("{}", line.bright_blue());
                }
            }
            Command::Export(path) => {
                let data = self.store.snapshot().await;
                if write_conversations_csv(Path::new(&path), &data.conversations)? {
                    println!("{}", format!("Exported to {path}").bright_green());
                } else {
                    println!("{}", "Nothing to export.".bright_black());
                }
            }
            Command::Emoji(enabled) => {
                self.store
                    .update(|d| {
                        d.set_emoji_mode(enabled);
                        Ok(())
                    })
                    .await?;
                let state = if enabled { "on" } else { "off" };
                println!("{}", format!("Emoji mode {state}").bright_green());
            }
        }
        Ok(true)
    }

    fn primary(&self) -> String {
        self.active.first().cloned().unwrap_or_default()
    }

    async fn persona_exists(&self, id: &str) -> bool {
        find_builtin(id).is_some()
            || self
                .store
                .read(|d| d.custom_personas.iter().any(|p| p.name == id))
                .await
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        let current = self.store.read(|d| d.current_conversation_id.clone()).await;
        println!("{}", "Thinking...".bright_black());
        let outcome = self
            .dialogue
            .send_turn(current.as_deref(), text, &self.active)
            .await?;

        let emoji = self.store.read(|d| d.emoji_mode).await;
        for reply in &outcome.replies {
            print_message(&reply.message, Some(&reply.persona_id), emoji);
        }
        Ok(())
    }

    async fn list_personas(&self) {
        for category in PersonaCategory::iter() {
            let members = personas_in_category(category);
            if members.is_empty() {
                continue;
            }
            println!("{}", format!("-- {category} --").bold());
            for persona in members {
                let marker = if self.active.iter().any(|a| a == persona.id) { "*" } else { " " };
                println!(
                    "{} {} {}",
                    marker,
                    format!("{:<24}", persona.id).bright_cyan(),
                    persona.description.bright_black()
                );
            }
        }
        let customs = self.store.read(|d| d.custom_personas.clone()).await;
        for persona in customs {
            let marker = if self.active.contains(&persona.name) { "*" } else { " " };
            println!(
                "{} {} {}",
                marker,
                format!("{:<20}", persona.name).bright_yellow(),
                "[Custom]".bright_black()
            );
        }
    }

    async fn list_conversations(&self) {
        let rows: Vec<(String, String, usize, bool)> = self
            .store
            .read(|d| {
                d.conversations
                    .iter()
                    .map(|c| {
                        (
                            c.title.clone(),
                            c.persona.clone(),
                            c.messages.len(),
                            d.current_conversation_id.as_deref() == Some(c.id.as_str()),
                        )
                    })
                    .collect()
            })
            .await;
        if rows.is_empty() {
            println!("{}", "No conversations yet.".bright_black());
        }
        for (i, (title, persona, count, current)) in rows.iter().enumerate() {
            let marker = if *current { "*" } else { " " };
            println!(
                "{}{:>3}. {} {}",
                marker,
                i + 1,
                title.bright_white(),
                format!("({persona}, {count} messages)").bright_black()
            );
        }
    }

    async fn list_notes(&self) {
        let (notes, active) = self
            .store
            .read(|d| (d.notes.clone(), d.active_context_note_id.clone()))
            .await;
        if notes.is_empty() {
            println!("{}", "No notes yet.".bright_black());
        }
        for (i, note) in notes.iter().enumerate() {
            let marker = if active.as_deref() == Some(note.id.as_str()) { "*" } else { " " };
            println!("{}{:>3}. {}", marker, i + 1, note.title.bright_white());
        }
    }

    async fn list_concepts(&self) {
        let mut concepts = self.store.read(|d| d.concepts.clone()).await;
        if concepts.is_empty() {
            println!("{}", "No concepts mapped yet.".bright_black());
        }
        concepts.sort_by(|a, b| b.importance.cmp(&a.importance));
        for concept in concepts {
            println!(
                "{} {} {}",
                format!("[{}]", concept.importance).bright_yellow(),
                concept.label.bright_white(),
                format!(
                    "{} ({} conversations)",
                    concept.category.as_deref().unwrap_or("uncategorized"),
                    concept.connections.len()
                )
                .bright_black()
            );
        }
    }

    async fn print_transcript(&self) {
        let (messages, emoji) = self
            .store
            .read(|d| {
                (
                    d.current_conversation().map(|c| c.messages.clone()).unwrap_or_default(),
                    d.emoji_mode,
                )
            })
            .await;
        let primary = self.primary();
        for message in &messages {
            match message.role {
                MessageRole::User => {
                    println!("{}", format!("> {}", message.content).green());
                }
                MessageRole::Assistant => {
                    print_message(message, Some(&primary), emoji);
                }
            }
        }
    }
}

/// Prints an assistant message with its persona header and metadata.
fn print_message(message: &Message, fallback_persona: Option<&str>, emoji: bool) {
    let author = message.persona.as_deref().or(fallback_persona).unwrap_or("?");
    let header = if emoji {
        format!("🏛  {author}")
    } else {
        format!("[{author}]")
    };
    println!("{}", header.bright_magenta());

    if message.is_error() {
        println!("{}", message.content.red());
        println!();
        return;
    }
    for line in message.content.lines() {
        println!("{}", line.bright_blue());
    }
    if let Some(metadata) = &message.metadata {
        if metadata.contradiction_detected {
            let label = if emoji { "⚠  Contradiction detected" } else { "! Contradiction detected" };
            println!("{}", label.yellow());
        }
        for fallacy in &metadata.fallacies {
            println!(
                "{} {}",
                format!("  fallacy: {}", fallacy.name).yellow(),
                format!("({})", fallacy.definition).bright_black()
            );
        }
    }
    println!();
}

fn print_help() {
    let lines = [
        "<text>                     talk to the active persona(s)",
        "/persona <id>              switch to a single persona",
        "/personas                  list personas (* = active)",
        "/multi <id,id,...>         convene several personas",
        "/custom <name>: <prompt>   create a custom persona",
        "/uncustom <name>           delete a custom persona",
        "/new                       start a new conversation",
        "/list                      list conversations",
        "/open <n> | /delete <n>    open or delete a conversation",
        "/note <title>: <content>   save a note",
        "/notes                     list notes (* = active context)",
        "/activate <n>              toggle a note as session context",
        "/profile <text>            set the global user profile",
        "/forge <text>              set DNA for the primary persona",
        "/concepts                  show the concept map",
        "/think                     thought experiment on this conversation",
        "/export <path>             export conversations as CSV",
        "/emoji on|off              toggle emoji rendering",
        "quit                       exit",
    ];
    for line in lines {
        println!("{}", line.bright_black());
    }
}

/// The main entry point for the Sophi readline REPL.
#[tokio::main]
async fn main() -> Result<()> {
    // ===== Configuration & Logging =====
    let base_dir = std::env::var_os(HOME_ENV_VAR).map(PathBuf::from);
    let paths = SophiPaths::new(base_dir.as_deref());
    let config_service = ConfigService::new(paths.clone());
    let config = config_service.load_config()?;
    let _log_guard = init_logging(&paths, &config.logging.level)?;
    tracing::info!("[sophi] starting with model {}", config.model.name);

    // ===== Backend Initialization =====
    let repository = Arc::new(JsonDataRepository::with_path(
        paths.data_file(&config.persistence.data_file)?,
    ));
    let data = repository.load().await?.unwrap_or_else(SophiData::new);
    let store = Arc::new(SophiStore::new(data));
    let persister = DebouncedPersister::spawn(
        Arc::clone(&store),
        repository.clone(),
        Duration::from_millis(config.persistence.debounce_ms),
    );

    let api_key = config_service.resolve_api_key()?;
    if api_key.is_none() {
        let secret_path = config_service.ensure_secret_file()?;
        println!(
            "{}",
            format!(
                "No API key found. Set SOPHI_API_KEY or edit {}",
                secret_path.display()
            )
            .yellow()
        );
    }
    let agent = GeminiApiAgent::from_settings(&config.model, api_key)?;
    let extractor = GeminiConceptExtractor::new(agent.clone());
    let dialogue = DialogueService::new(
        Arc::clone(&store),
        Arc::new(agent),
        Arc::new(extractor),
        Arc::new(BackgroundTasks::new()),
    );

    let active = vec![store.read(|d| d.active_persona.clone()).await];
    let mut repl = Repl {
        store: Arc::clone(&store),
        dialogue,
        active,
    };

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== SOPHI ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a question, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let prompt = format!("{} >> ", repl.active.join("+"));
        match rl.readline(&prompt) {
            Ok(line) => {
                let command = match Command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(usage) => {
                        println!("{}", usage.yellow());
                        continue;
                    }
                };
                let _ = rl.add_history_entry(line.trim());

                match repl.handle(command).await {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("[sophi] command failed: {:#}", e);
                        eprintln!("{}", format!("Error: {e}").red());
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Let in-flight concept merges land before the final write.
    repl.dialogue.background().wait_idle().await;
    persister.shutdown().await?;
    tracing::info!("[sophi] shut down");

    Ok(())
}
