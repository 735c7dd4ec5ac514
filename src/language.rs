//! Target language detection.
//!
//! Maps a source file to the interpreter (or compiler) that runs it.

use std::path::Path;

use crate::execution::Command;

/// Languages rebound knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Run with `python3`.
    Python,
    /// Run with `node`.
    Node,
    /// Run with `ruby`.
    Ruby,
    /// Run with `go run`.
    Go,
    /// Java sources are compiled with `javac`; the compiler's errors are
    /// what gets searched.
    Java,
}

impl Language {
    /// Detect a language from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "py" => Some(Self::Python),
            "js" | "mjs" | "cjs" => Some(Self::Node),
            "rb" => Some(Self::Ruby),
            "go" => Some(Self::Go),
            "java" => Some(Self::Java),
            _ => None,
        }
    }

    /// Detect a language from an interpreter name, e.g. `python3` or
    /// `/usr/bin/node`.
    pub fn from_program(program: &str) -> Option<Self> {
        let name = Path::new(program).file_name()?.to_str()?;
        if name.starts_with("python") {
            Some(Self::Python)
        } else if name == "node" || name == "nodejs" {
            Some(Self::Node)
        } else if name == "ruby" {
            Some(Self::Ruby)
        } else if name == "go" {
            Some(Self::Go)
        } else if name == "java" || name == "javac" {
            Some(Self::Java)
        } else {
            None
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Node => "Node.js",
            Self::Ruby => "Ruby",
            Self::Go => "Go",
            Self::Java => "Java",
        }
    }

    /// Tag used to narrow search results.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Node => "javascript",
            Self::Ruby => "ruby",
            Self::Go => "go",
            Self::Java => "java",
        }
    }

    /// Build the command that runs `file` with `args`.
    pub fn command_for(&self, file: &Path, args: &[String]) -> Command {
        let file = file.to_string_lossy().into_owned();
        match self {
            Self::Python => Command::new("python3").arg(file).args(args.iter().cloned()),
            Self::Node => Command::new("node").arg(file).args(args.iter().cloned()),
            Self::Ruby => Command::new("ruby").arg(file).args(args.iter().cloned()),
            Self::Go => Command::new("go")
                .arg("run")
                .arg(file)
                .args(args.iter().cloned()),
            // Program arguments only matter once the class is run.
            Self::Java => Command::new("javac").arg(file),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
