//! Slash-command parsing for the REPL.

/// Every command name, used for completion and hints.
pub const COMMAND_NAMES: &[&str] = &[
    "/persona",
    "/personas",
    "/multi",
    "/custom",
    "/uncustom",
    "/new",
    "/list",
    "/open",
    "/delete",
    "/note",
    "/notes",
    "/activate",
    "/profile",
    "/forge",
    "/concepts",
    "/think",
    "/export",
    "/emoji",
    "/help",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text sent to the active personas
    Say(String),
    Persona(String),
    ListPersonas,
    Multi(Vec<String>),
    CreateCustom { name: String, instruction: String },
    DeleteCustom(String),
    NewConversation,
    ListConversations,
    /// 1-based index into the conversation list
    Open(usize),
    Delete(usize),
    AddNote { title: String, content: String },
    ListNotes,
    /// 1-based index into the note list
    Activate(usize),
    Profile(String),
    Forge(String),
    Concepts,
    Think,
    Export(String),
    Emoji(bool),
    Help,
    Quit,
}

impl Command {
    /// Parses one REPL line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        if line == "quit" || line == "exit" {
            return Ok(Some(Self::Quit));
        }
        if !line.starts_with('/') {
            return Ok(Some(Self::Say(line.to_string())));
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name {
            "/persona" => Self::Persona(required(rest, "/persona <id>")?),
            "/personas" => Self::ListPersonas,
            "/multi" => {
                let ids: Vec<String> = rest
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect();
                if ids.is_empty() {
                    return Err("usage: /multi <id,id,...>".to_string());
                }
                Self::Multi(ids)
            }
            "/custom" => {
                let (name, instruction) = split_pair(rest, "/custom <name>: <instruction>")?;
                Self::CreateCustom { name, instruction }
            }
            "/uncustom" => Self::DeleteCustom(required(rest, "/uncustom <name>")?),
            "/new" => Self::NewConversation,
            "/list" => Self::ListConversations,
            "/open" => Self::Open(index(rest, "/open <n>")?),
            "/delete" => Self::Delete(index(rest, "/delete <n>")?),
            "/note" => {
                let (title, content) = split_pair(rest, "/note <title>: <content>")?;
                Self::AddNote { title, content }
            }
            "/notes" => Self::ListNotes,
            "/activate" => Self::Activate(index(rest, "/activate <n>")?),
            // An empty profile clears it.
            "/profile" => Self::Profile(rest.to_string()),
            "/forge" => Self::Forge(rest.to_string()),
            "/concepts" => Self::Concepts,
            "/think" => Self::Think,
            "/export" => Self::Export(required(rest, "/export <path>")?),
            "/emoji" => match rest {
                "on" => Self::Emoji(true),
                "off" => Self::Emoji(false),
                _ => return Err("usage: /emoji on|off".to_string()),
            },
            "/help" => Self::Help,
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(Some(command))
    }
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(rest.to_string())
    }
}

fn index(rest: &str, usage: &str) -> Result<usize, String> {
    match rest.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("usage: {usage}")),
    }
}

fn split_pair(rest: &str, usage: &str) -> Result<(String, String), String> {
    match rest.split_once(':') {
        Some((left, right)) if !left.trim().is_empty() && !right.trim().is_empty() => {
            Ok((left.trim().to_string(), right.trim().to_string()))
        }
        _ => Err(format!("usage: {usage}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_said() {
        assert_eq!(
            Command::parse("  what is justice?  ").unwrap(),
            Some(Command::Say("what is justice?".to_string()))
        );
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_multi_splits_and_trims() {
        assert_eq!(
            Command::parse("/multi Stoic, Skeptic ,,Analytic Matrix").unwrap(),
            Some(Command::Multi(vec![
                "Stoic".to_string(),
                "Skeptic".to_string(),
                "Analytic Matrix".to_string(),
            ]))
        );
        assert!(Command::parse("/multi").is_err());
    }

    #[test]
    fn test_note_requires_title_and_content() {
        assert_eq!(
            Command::parse("/note Reading: Meditations book 2").unwrap(),
            Some(Command::AddNote {
                title: "Reading".to_string(),
                content: "Meditations book 2".to_string(),
            })
        );
        assert!(Command::parse("/note no colon here").is_err());
        assert!(Command::parse("/note : empty title").is_err());
    }

    #[test]
    fn test_indices_are_one_based() {
        assert_eq!(Command::parse("/open 2").unwrap(), Some(Command::Open(2)));
        assert!(Command::parse("/open 0").is_err());
        assert!(Command::parse("/activate x").is_err());
    }

    #[test]
    fn test_persona_names_keep_spaces() {
        assert_eq!(
            Command::parse("/persona Analytic Matrix").unwrap(),
            Some(Command::Persona("Analytic Matrix".to_string()))
        );
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        let err = Command::parse("/teleport").unwrap_err();
        assert!(err.contains("/teleport"));
    }

    #[test]
    fn test_empty_profile_clears() {
        assert_eq!(
            Command::parse("/profile").unwrap(),
            Some(Command::Profile(String::new()))
        );
    }
}
