use newsdesk_core::Msg;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Goes to the engine.
    Dispatch(Msg),
    ListCategories,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help` for the list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
}

/// Parses a prompt line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        // Empty text is left to the reducer, which reports it.
        "search" | "s" => Command::Dispatch(Msg::SearchSubmitted(rest.to_string())),
        "category" | "cat" => {
            Command::Dispatch(Msg::CategorySelected(required("category", rest)?))
        }
        "categories" => Command::ListCategories,
        "country" => Command::Dispatch(Msg::CountrySelected(required("country", rest)?)),
        "next" | "n" => Command::Dispatch(Msg::NextPage),
        "prev" | "p" => Command::Dispatch(Msg::PrevPage),
        "page" => Command::Dispatch(Msg::GoToPage(number("page", rest)?)),
        "open" | "o" => {
            let shown = number("open", rest)?;
            let index = shown
                .checked_sub(1)
                .ok_or_else(|| CommandError::InvalidNumber(rest.to_string()))?;
            Command::Dispatch(Msg::ArticleOpened(index as usize))
        }
        "close" => Command::Dispatch(Msg::ArticleClosed),
        "reload" | "home" => Command::Dispatch(Msg::Reload),
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn required(command: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest.to_string())
    }
}

fn number(command: &'static str, rest: &str) -> Result<u32, CommandError> {
    let text = required(command, rest)?;
    text.parse()
        .map_err(|_| CommandError::InvalidNumber(text.clone()))
}
