use protocol::{Category, Envelope, Intent, SessionId, names};
use regex::Regex;
use std::sync::LazyLock;

static COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^/([A-Za-z_]+)(?:@\w+)?(?:\s+(.*))?$").expect("command pattern is valid")
});

pub const USAGE: &str = "I can read news articles for you.\n\
/extract <article> - find people, places, dates and more\n\
/get <category> - list what the last article mentions (person, date, location, organization, money, percent)\n\
/cluster <article> - tell which topic an article belongs to\n\
/reset - forget the last article";

pub const UNAVAILABLE: &str = "Sorry, that service is not available right now.";
pub const RESET_DONE: &str = "Okay, I forgot the last article.";

/// A chat message translated into something the bot can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Extract(String),
    Cluster(String),
    Get(Intent),
    Reset,
    MissingArgument(&'static str),
}

/// What the conversation actor does with a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Forward {
        to: &'static str,
        envelope: Envelope,
        ack: Option<&'static str>,
    },
    Reply(String),
}

impl Command {
    /// Parse `/command[@bot] [argument]`. Anything that isn't a known command asks for help.
    pub fn parse(text: &str) -> Command {
        let Some(captures) = COMMAND.captures(text.trim()) else {
            return Command::Help;
        };
        let name = captures[1].to_ascii_lowercase();
        let argument = captures
            .get(2)
            .map(|m| m.as_str().trim())
            .unwrap_or_default();

        match name.as_str() {
            "extract" if argument.is_empty() => Command::MissingArgument("extract"),
            "extract" => Command::Extract(argument.to_string()),
            "cluster" if argument.is_empty() => Command::MissingArgument("cluster"),
            "cluster" => Command::Cluster(argument.to_string()),
            "get" if argument.is_empty() => Command::MissingArgument("get"),
            "get" => Command::Get(category_intent(argument)),
            "reset" => Command::Reset,
            other => match Category::from_label(other) {
                Some(category) => Command::Get(Intent::GetExtracted(category)),
                None => Command::Help,
            },
        }
    }

    pub fn into_action(self, session: &SessionId) -> Action {
        let forward = |to: &'static str, envelope: Envelope, ack: Option<&'static str>| Action::Forward {
            to,
            envelope: envelope.in_session(session.clone()),
            ack,
        };

        match self {
            Command::Help => Action::Reply(USAGE.to_string()),
            Command::MissingArgument(name) => {
                Action::Reply(format!("Please add some text after /{}.\n\n{}", name, USAGE))
            }
            Command::Extract(article) => forward(
                names::EXTRACTOR,
                Envelope::new(Intent::ExtractFromArticle).with_payload(article),
                None,
            ),
            Command::Cluster(article) => forward(
                names::CLUSTERER,
                Envelope::new(Intent::ClusterArticle).with_payload(article),
                None,
            ),
            Command::Get(intent) => forward(names::EXTRACTOR, Envelope::new(intent), None),
            Command::Reset => forward(
                names::EXTRACTOR,
                Envelope::new(Intent::EndSession),
                Some(RESET_DONE),
            ),
        }
    }
}

fn category_intent(argument: &str) -> Intent {
    let label = argument.split_whitespace().next().unwrap_or_default();
    match Category::from_label(label) {
        Some(category) => Intent::GetExtracted(category),
        None => Intent::GetUnsupported(label.to_ascii_uppercase()),
    }
}
