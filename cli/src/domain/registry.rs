//! Registry document model.
//!
//! Only the fields the classifier needs are interpreted; the parsed document is
//! kept alongside so a rewrite preserves every unrelated field and the original
//! entry order.

use std::fmt;

use serde_json::{Map, Value};

use crate::domain::error::RegistryError;

/// Top-level member holding the server entries.
pub const SERVERS_KEY: &str = "mcpServers";

/// Launchers that fetch and run a published package.
pub const PACKAGE_LAUNCHERS: &[&str] = &["npx", "uvx", "bunx", "pnpx", "pipx"];
/// Launchers that run a local script file.
pub const SCRIPT_LAUNCHERS: &[&str] = &["node", "deno", "bun"];
/// Interpreters that run a local script file.
pub const INTERPRETER_LAUNCHERS: &[&str] = &["python", "python3", "py"];

// ── Entry descriptor ─────────────────────────────────────────────────────────

/// Launch mechanism of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKind {
    PackageLaunch,
    LocalScript,
    InterpreterScript,
}

impl LaunchKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LaunchKind::PackageLaunch => "package",
            LaunchKind::LocalScript => "script",
            LaunchKind::InterpreterScript => "interpreter",
        }
    }
}

impl fmt::Display for LaunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an entry is started, carrying exactly the fields valid for that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    /// Package resolved by an external package manager.
    Package {
        command: String,
        /// Environment variables in document order.
        environment: Vec<(String, String)>,
    },
    /// Script file run by a JavaScript runtime.
    LocalScript { command: String, launch_path: String },
    /// Script file run by an interpreter.
    InterpreterScript { command: String, launch_path: String },
    /// Launcher the rules do not know about.
    Unrecognized { command: Option<String> },
    /// Record that cannot be interpreted at all.
    Malformed { reason: String },
}

/// One registered server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescriptor {
    /// Unique key within the registry.
    pub name: String,
    pub launch: Launch,
}

impl EntryDescriptor {
    /// Interpret one `mcpServers` record. Never fails: unusable records become
    /// [`Launch::Malformed`].
    #[must_use]
    pub fn from_record(name: &str, record: &Value) -> Self {
        Self {
            name: name.to_string(),
            launch: launch_from_record(record),
        }
    }

    /// Launch kind, or `None` for unrecognized and malformed entries.
    #[must_use]
    pub fn kind(&self) -> Option<LaunchKind> {
        match self.launch {
            Launch::Package { .. } => Some(LaunchKind::PackageLaunch),
            Launch::LocalScript { .. } => Some(LaunchKind::LocalScript),
            Launch::InterpreterScript { .. } => Some(LaunchKind::InterpreterScript),
            Launch::Unrecognized { .. } | Launch::Malformed { .. } => None,
        }
    }

    /// Short label for listings, covering the degraded variants too.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match (&self.launch, self.kind()) {
            (_, Some(kind)) => kind.as_str(),
            (Launch::Malformed { .. }, None) => "malformed",
            (_, None) => "unrecognized",
        }
    }

    /// Native script path for script entries.
    #[must_use]
    pub fn launch_path(&self) -> Option<&str> {
        match &self.launch {
            Launch::LocalScript { launch_path, .. }
            | Launch::InterpreterScript { launch_path, .. } => Some(launch_path),
            _ => None,
        }
    }

    /// Launcher command as written in the document.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        match &self.launch {
            Launch::Package { command, .. }
            | Launch::LocalScript { command, .. }
            | Launch::InterpreterScript { command, .. } => Some(command),
            Launch::Unrecognized { command } => command.as_deref(),
            Launch::Malformed { .. } => None,
        }
    }
}

fn launch_from_record(record: &Value) -> Launch {
    let Some(obj) = record.as_object() else {
        return Launch::Malformed {
            reason: "entry is not an object".to_string(),
        };
    };
    let Some(command) = obj.get("command").and_then(Value::as_str) else {
        return Launch::Unrecognized { command: None };
    };
    let args: Vec<&str> = obj
        .get("args")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let launcher = launcher_name(command);
    if PACKAGE_LAUNCHERS.contains(&launcher.as_str()) {
        return Launch::Package {
            command: command.to_string(),
            environment: environment_of(obj),
        };
    }

    let script = SCRIPT_LAUNCHERS.contains(&launcher.as_str());
    let interpreter = INTERPRETER_LAUNCHERS.contains(&launcher.as_str());
    if !script && !interpreter {
        return Launch::Unrecognized {
            command: Some(command.to_string()),
        };
    }
    let path = match script_argument(&launcher, &args) {
        ScriptArgument::Path(path) => path,
        // `python -m pkg`, `node -e '...'`: no file to check.
        ScriptArgument::Inline => {
            return Launch::Unrecognized {
                command: Some(command.to_string()),
            };
        }
        ScriptArgument::Absent => {
            return Launch::Malformed {
                reason: format!("'{command}' entry has no script argument"),
            };
        }
    };
    if script {
        Launch::LocalScript {
            command: command.to_string(),
            launch_path: path.to_string(),
        }
    } else {
        Launch::InterpreterScript {
            command: command.to_string(),
            launch_path: path.to_string(),
        }
    }
}

/// Launcher options that consume the following argument, and options that
/// mean the program is given inline instead of as a file.
struct ArgRules {
    value_flags: &'static [&'static str],
    inline_flags: &'static [&'static str],
    /// Subcommand placed before the script (`deno run x.ts`).
    run_subcommand: Option<&'static str>,
    /// Subcommand that takes source text instead of a file.
    inline_subcommand: Option<&'static str>,
}

fn arg_rules(launcher: &str) -> ArgRules {
    match launcher {
        "node" => ArgRules {
            value_flags: &["-r", "--require", "--import", "--loader", "--experimental-loader"],
            inline_flags: &["-e", "--eval", "-p", "--print"],
            run_subcommand: None,
            inline_subcommand: None,
        },
        "deno" => ArgRules {
            value_flags: &["-c", "--config", "--import-map", "--location", "--env-file"],
            inline_flags: &[],
            run_subcommand: Some("run"),
            inline_subcommand: Some("eval"),
        },
        "bun" => ArgRules {
            value_flags: &["-r", "--preload", "--cwd", "--env-file"],
            inline_flags: &["-e", "--eval", "-p", "--print"],
            run_subcommand: Some("run"),
            inline_subcommand: None,
        },
        _ => ArgRules {
            value_flags: &["-X", "-W", "--check-hash-based-pycs"],
            inline_flags: &["-m", "-c"],
            run_subcommand: None,
            inline_subcommand: None,
        },
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ScriptArgument<'a> {
    Path(&'a str),
    Inline,
    Absent,
}

/// The script a launcher is asked to run: the first positional argument once
/// launcher options, their values and a leading `run` subcommand are skipped.
fn script_argument<'a>(launcher: &str, args: &[&'a str]) -> ScriptArgument<'a> {
    let rules = arg_rules(launcher);
    let mut seen_subcommand = false;
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        if arg.starts_with('-') {
            if rules.inline_flags.iter().any(|f| *f == arg) {
                return ScriptArgument::Inline;
            }
            if rules.value_flags.iter().any(|f| *f == arg) {
                iter.next();
            }
            continue;
        }
        if !seen_subcommand {
            seen_subcommand = true;
            if rules.run_subcommand == Some(arg) {
                continue;
            }
            if rules.inline_subcommand == Some(arg) {
                return ScriptArgument::Inline;
            }
        }
        return ScriptArgument::Path(arg);
    }
    ScriptArgument::Absent
}

/// Bare, lowercased launcher name: `C:\Program Files\nodejs\npx.cmd` → `npx`.
fn launcher_name(command: &str) -> String {
    let base = command.rsplit(['/', '\\']).next().unwrap_or(command);
    let lower = base.to_ascii_lowercase();
    [".exe", ".cmd", ".bat"]
        .iter()
        .find_map(|ext| lower.strip_suffix(ext))
        .map_or_else(|| lower.clone(), str::to_string)
}

fn environment_of(obj: &Map<String, Value>) -> Vec<(String, String)> {
    obj.get("env")
        .and_then(Value::as_object)
        .map(|env| {
            env.iter()
                .map(|(k, v)| {
                    let value = v.as_str().map_or_else(|| v.to_string(), str::to_string);
                    (k.clone(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Snapshot of the configuration document: entries in document order plus the
/// document they were read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    document: Value,
    entries: Vec<EntryDescriptor>,
}

impl Registry {
    /// Parse raw document bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not JSON, the root is not an object,
    /// or `mcpServers` is present but not an object.
    pub fn parse(bytes: &[u8]) -> Result<Self, RegistryError> {
        let document: Value = serde_json::from_slice(bytes)?;
        Self::from_document(document)
    }

    /// Build a registry from an already-parsed document.
    ///
    /// # Errors
    ///
    /// Same shape checks as [`Registry::parse`].
    pub fn from_document(document: Value) -> Result<Self, RegistryError> {
        let Some(root) = document.as_object() else {
            return Err(RegistryError::Malformed(
                "document root is not an object".to_string(),
            ));
        };
        let entries = match root.get(SERVERS_KEY) {
            None => Vec::new(),
            Some(Value::Object(servers)) => servers
                .iter()
                .map(|(name, record)| EntryDescriptor::from_record(name, record))
                .collect(),
            Some(_) => {
                return Err(RegistryError::Malformed(format!(
                    "'{SERVERS_KEY}' is not an object"
                )));
            }
        };
        Ok(Self { document, entries })
    }

    /// Entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[EntryDescriptor] {
        &self.entries
    }

    /// Entry names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntryDescriptor> {
        self.entries.iter().find(|e| e.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The underlying document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// New registry holding only the entries for which `keep` returns true.
    ///
    /// Relative order and every non-server field of the document are preserved.
    #[must_use]
    pub fn retain(&self, mut keep: impl FnMut(&EntryDescriptor) -> bool) -> Self {
        let entries: Vec<EntryDescriptor> =
            self.entries.iter().filter(|e| keep(e)).cloned().collect();
        let mut document = self.document.clone();
        if let Some(Value::Object(servers)) = document.get_mut(SERVERS_KEY) {
            servers.retain(|name, _| entries.iter().any(|e| &e.name == name));
        }
        Self { document, entries }
    }

    /// Serialize the document as pretty JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut bytes = serde_json::to_vec_pretty(&self.document)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
