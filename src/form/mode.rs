// src/form/mode.rs
use std::fmt;
use std::str::FromStr;

use crate::errors::ClientError;

/// Where the submitted code comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InputMode {
    #[default]
    Direct,
    File,
    Github,
}

/// Input sections of the form; each mode owns exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    DirectInput,
    FileInput,
    GithubInput,
}

impl InputMode {
    pub const ALL: [InputMode; 3] = [InputMode::Direct, InputMode::File, InputMode::Github];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Direct => "direct",
            InputMode::File => "file",
            InputMode::Github => "github",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Direct => "Direct Input",
            InputMode::File => "File Upload",
            InputMode::Github => "GitHub URL",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            InputMode::Direct => Section::DirectInput,
            InputMode::File => Section::FileInput,
            InputMode::Github => Section::GithubInput,
        }
    }

    /// Uploaded files land in the same text area as typed code, so both modes
    /// read it.
    pub fn reads_code_text(&self) -> bool {
        matches!(self, InputMode::Direct | InputMode::File)
    }
}

impl Section {
    pub const ALL: [Section; 3] = [Section::DirectInput, Section::FileInput, Section::GithubInput];

    /// Element id of the section in the rendered form.
    pub fn element_id(&self) -> &'static str {
        match self {
            Section::DirectInput => "directInput",
            Section::FileInput => "fileInput",
            Section::GithubInput => "githubInput",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s.trim())
            .ok_or_else(|| ClientError::UnknownInputMode(s.to_string()))
    }
}
