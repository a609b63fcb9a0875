//! Commands Module
//!
//! The universal easter-egg table shared by every terminal instance, plus the
//! normalization and fallback helpers the workflows build on.

use std::fmt;

/// Universal commands recognized in every instance and every step.
///
/// These always win over workflow commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EasterEgg {
    Help,
    Clear,
    Whoami,
    Ls,
    Passwd,
    Rmdir,
    Hello,
    Sudo,
    Exit,
    Logout,
    Matrix,
}

pub const WHOAMI_REPLY: &str = "who am i?... i find myself asking that all the time — not just as a command, but as a quiet panic that slips in when the noise fades — am i just a brief flicker of thought in a vast, unfeeling universe that will forget me the moment i'm gone? does anything i build truly matter, or is it all just dust rearranging itself before the next collapse? maybe we invent purpose because we can't bear the weight of insignificance, maybe the stories we tell about meaning are just beautifully crafted lies to survive the silence — and yet, despite knowing all this, i still create, i still reach, i still hope — because maybe the act of searching is its own kind of answer.";

impl EasterEgg {
    /// Look up an already-normalized command
    pub fn parse(normalized: &str) -> Option<Self> {
        match normalized {
            "help" => Some(Self::Help),
            "clear" => Some(Self::Clear),
            "whoami" => Some(Self::Whoami),
            "ls" => Some(Self::Ls),
            "passwd" => Some(Self::Passwd),
            "rmdir" => Some(Self::Rmdir),
            "hello" => Some(Self::Hello),
            "sudo" => Some(Self::Sudo),
            "exit" => Some(Self::Exit),
            "logout" => Some(Self::Logout),
            "matrix" => Some(Self::Matrix),
            _ => None,
        }
    }

    /// Fixed reply shared by all instances.
    ///
    /// `Help` and `Ls` describe the instance they run in, so their text comes
    /// from the instance profile. `Clear` has no typed reply.
    pub fn canned_reply(&self) -> Option<&'static str> {
        match self {
            Self::Help | Self::Ls | Self::Clear => None,
            Self::Whoami => Some(WHOAMI_REPLY),
            Self::Passwd => Some("nice try"),
            Self::Rmdir => Some("did you really think that was going to work?"),
            Self::Hello => Some("Hello, stranger ;)"),
            Self::Sudo => Some("User is not in the sudoers file. This incident will be reported"),
            Self::Exit => Some("You can try to exit, but you can never leave."),
            Self::Logout => Some("And leave me all alone? No way."),
            Self::Matrix => Some("Follow the white rabbit, Neo."),
        }
    }

    /// Short description shown in the secret catalogue
    pub fn description(&self) -> &'static str {
        match self {
            Self::Help => "Display available commands",
            Self::Clear => "Clear the terminal",
            Self::Whoami => "Existential crisis mode activated",
            Self::Ls => "List directory contents",
            Self::Passwd => "Attempt to change password (spoiler: it won't work)",
            Self::Rmdir => "Try to remove directory (spoiler: also won't work)",
            Self::Hello => "Receive a friendly greeting",
            Self::Sudo => "Pretend you have root access",
            Self::Exit => "Try to leave (you can't)",
            Self::Logout => "Attempt to logout (also impossible)",
            Self::Matrix => "Follow the white rabbit",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Help,
            Self::Clear,
            Self::Whoami,
            Self::Ls,
            Self::Passwd,
            Self::Rmdir,
            Self::Hello,
            Self::Sudo,
            Self::Exit,
            Self::Logout,
            Self::Matrix,
        ]
    }
}

impl fmt::Display for EasterEgg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Help => "help",
            Self::Clear => "clear",
            Self::Whoami => "whoami",
            Self::Ls => "ls",
            Self::Passwd => "passwd",
            Self::Rmdir => "rmdir",
            Self::Hello => "hello",
            Self::Sudo => "sudo",
            Self::Exit => "exit",
            Self::Logout => "logout",
            Self::Matrix => "matrix",
        };
        write!(f, "{}", name)
    }
}

/// A submitted line, in both its original and normalized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Trimmed, original case
    pub raw: String,
    /// Trimmed and lowercased
    pub normalized: String,
}

impl Command {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let normalized = raw.to_lowercase();
        Self { raw, normalized }
    }

    /// Whitespace-separated tokens of the normalized line
    pub fn tokens(&self) -> Vec<&str> {
        self.normalized.split_whitespace().collect()
    }

    pub fn first_token(&self) -> &str {
        self.normalized.split_whitespace().next().unwrap_or("")
    }

    /// True when the line is a `git ...` invocation
    pub fn is_git(&self) -> bool {
        self.first_token() == "git"
    }

    /// True when the line starts with `git <sub>`
    pub fn is_git_sub(&self, sub: &str) -> bool {
        let tokens = self.tokens();
        tokens.len() >= 2 && tokens[0] == "git" && tokens[1] == sub
    }
}

/// Generic fallback for anything no table or step recognizes
pub fn command_not_found(command: &Command) -> String {
    format!("bash: {}: command not found", command.first_token())
}

/// Fallback for `git <x>` with an unknown or out-of-step subcommand
pub fn not_a_git_command(command: &Command) -> String {
    let sub = command.tokens().get(1).copied().unwrap_or("");
    format!("git: '{}' is not a git command. See 'git --help'.", sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_egg() {
        for egg in EasterEgg::all() {
            assert_eq!(EasterEgg::parse(&egg.to_string()), Some(egg));
        }
        assert_eq!(EasterEgg::parse("start"), None);
        assert_eq!(EasterEgg::parse("Help"), None);
    }

    #[test]
    fn test_canned_replies() {
        assert_eq!(EasterEgg::Passwd.canned_reply(), Some("nice try"));
        assert!(EasterEgg::Whoami.canned_reply().unwrap().starts_with("who am i?"));
        assert!(EasterEgg::Clear.canned_reply().is_none());
        assert!(EasterEgg::Help.canned_reply().is_none());
    }

    #[test]
    fn test_command_normalization() {
        let command = Command::new("  Git   Commit -m \"Fix Bug\"  ");
        assert_eq!(command.raw, "Git   Commit -m \"Fix Bug\"");
        assert_eq!(command.normalized, "git   commit -m \"fix bug\"");
        assert_eq!(command.tokens(), vec!["git", "commit", "-m", "\"fix", "bug\""]);
        assert!(command.is_git_sub("commit"));
    }

    #[test]
    fn test_fallback_messages() {
        assert_eq!(
            command_not_found(&Command::new("foo bar")),
            "bash: foo: command not found"
        );
        assert_eq!(
            not_a_git_command(&Command::new("git status")),
            "git: 'status' is not a git command. See 'git --help'."
        );
        assert_eq!(
            not_a_git_command(&Command::new("git")),
            "git: '' is not a git command. See 'git --help'."
        );
        assert!(!Command::new("github").is_git());
    }
}
