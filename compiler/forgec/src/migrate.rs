//! Versioned migrations: the destructive-change guard and the migration
//! engine driver.
//!
//! `diff` asks the engine for a new migration against the declarative
//! schema, then scans every new file. Files containing destructive
//! statements are deleted unless the caller forces them through.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::tools::{Tool, ToolError};

/// Migration engine binary.
pub const ENGINE: &str = "atlas";

/// Environment in the generated `atlas.hcl`.
pub const ENGINE_ENV: &str = "local";

/// Statement classes the guard refuses without `--force`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Destructive {
    DropTable,
    DropColumn,
    AlterColumnType,
    DropIndex,
}

impl Destructive {
    pub const ALL: [Destructive; 4] = [
        Destructive::DropTable,
        Destructive::DropColumn,
        Destructive::AlterColumnType,
        Destructive::DropIndex,
    ];

    pub fn describe(self) -> &'static str {
        match self {
            Destructive::DropTable => "DROP TABLE",
            Destructive::DropColumn => "DROP COLUMN",
            Destructive::AlterColumnType => "ALTER COLUMN ... TYPE",
            Destructive::DropIndex => "DROP INDEX",
        }
    }

    fn pattern(self) -> &'static Regex {
        static PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
            [
                compile(r"(?i)\bDROP\s+TABLE\b"),
                compile(r"(?i)\bDROP\s+COLUMN\b"),
                compile(r"(?i)\bALTER\s+COLUMN\b.*\bTYPE\b"),
                compile(r"(?i)\bDROP\s+INDEX\b"),
            ]
        });
        &PATTERNS[self as usize]
    }
}

#[expect(clippy::expect_used, reason = "patterns are fixed literals")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("guard pattern compiles")
}

/// A destructive line of a migration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    /// 1-based line number.
    pub line: usize,
    /// The line, trimmed.
    pub text: String,
    pub kind: Destructive,
}

/// Destructive statements in `sql`, in line order. Comment lines are
/// skipped; a line matching several classes is reported once.
pub fn scan(sql: &str) -> Vec<Finding> {
    sql.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let text = line.trim();
            if text.starts_with("--") {
                return None;
            }
            let kind = Destructive::ALL
                .into_iter()
                .find(|kind| kind.pattern().is_match(text))?;
            Some(Finding {
                line: index + 1,
                text: text.to_string(),
                kind,
            })
        })
        .collect()
}

/// Warning shown when `file` contains destructive statements.
pub fn warning(file: &Path, findings: &[Finding], forced: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "warning: {} contains destructive changes:",
        file.display()
    );
    for finding in findings {
        let _ = writeln!(out, "  line {}: {}", finding.line, finding.text);
    }
    out.push('\n');
    if forced {
        out.push_str("Kept because --force was given. Review it before applying.\n");
    } else {
        out.push_str(
            "The migration was deleted. Data in the affected tables or columns would be lost.\n\
             If this is intended, re-run with --force to keep it.\n",
        );
    }
    out
}

#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("{warning}")]
    Destructive { path: PathBuf, warning: String },
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> MigrateError + '_ {
    move |source| MigrateError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Runs `migrate` subcommands of the migration engine.
pub trait Engine {
    fn migrate(&self, args: &[&str]) -> Result<String, ToolError>;
}

/// The `atlas` binary, run from the project root.
#[derive(Clone, Debug)]
pub struct Atlas {
    pub root: PathBuf,
    pub database_url: Option<String>,
}

impl Engine for Atlas {
    fn migrate(&self, args: &[&str]) -> Result<String, ToolError> {
        let mut tool = Tool::new(ENGINE)
            .arg("migrate")
            .args(args.iter().copied())
            .args(["--env", ENGINE_ENV])
            .current_dir(&self.root);
        if let Some(url) = &self.database_url {
            tool = tool.env(crate::config::DATABASE_URL_ENV, url.as_str());
        }
        tool.run()
    }
}

/// Outcome of [`diff`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffReport {
    /// Engine output.
    pub output: String,
    /// Migration files the engine created.
    pub created: Vec<PathBuf>,
    /// Warnings for files kept with `--force`.
    pub warnings: Vec<String>,
}

fn sql_files(dir: &Path) -> Result<BTreeSet<PathBuf>, MigrateError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(io_error(dir)(e)),
    };
    let mut files = BTreeSet::new();
    for entry in entries {
        let path = entry.map_err(io_error(dir))?.path();
        if path.extension().is_some_and(|ext| ext == "sql") {
            files.insert(path);
        }
    }
    Ok(files)
}

/// Create migration `name` and guard it.
pub fn diff(
    engine: &dyn Engine,
    migrations: &Path,
    name: &str,
    force: bool,
) -> Result<DiffReport, MigrateError> {
    let before = sql_files(migrations)?;
    let output = engine.migrate(&["diff", name])?;
    let created: Vec<PathBuf> = sql_files(migrations)?
        .difference(&before)
        .cloned()
        .collect();
    tracing::debug!(created = created.len(), "migration diff finished");

    let mut warnings = Vec::new();
    let mut refused: Option<PathBuf> = None;
    let mut refusal = String::new();
    for path in &created {
        let sql = fs::read_to_string(path).map_err(io_error(path))?;
        let findings = scan(&sql);
        if findings.is_empty() {
            continue;
        }
        if force {
            warnings.push(warning(path, &findings, true));
            continue;
        }
        fs::remove_file(path).map_err(io_error(path))?;
        tracing::debug!(path = %path.display(), "deleted destructive migration");
        refusal.push_str(&warning(path, &findings, false));
        refused.get_or_insert_with(|| path.clone());
    }

    if let Some(path) = refused {
        // The checksum file still lists the deleted migration.
        engine.migrate(&["hash"])?;
        return Err(MigrateError::Destructive {
            path,
            warning: refusal,
        });
    }
    Ok(DiffReport {
        output,
        created,
        warnings,
    })
}
