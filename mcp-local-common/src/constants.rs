//! Shared constants for file selection and classification

/// Glob patterns excluded from every advanced search
///
/// Caller-supplied patterns extend this set, they never replace it.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    ".git/*",
    "node_modules/*",
    "__pycache__/*",
    "*.pyc",
    "*.pyo",
    ".DS_Store",
    "Thumbs.db",
    "*.log",
    ".env",
    ".vscode/*",
    ".idea/*",
    "dist/*",
    "build/*",
    "*.egg-info/*",
    ".pytest_cache/*",
    "coverage/*",
    ".coverage",
    "*.min.js",
    "*.min.css",
];

/// Named bundles of file-name globs accepted by `file_types`
pub const FILE_TYPE_GROUPS: &[(&str, &[&str])] = &[
    (
        "code",
        &[
            "*.py", "*.js", "*.ts", "*.jsx", "*.tsx", "*.java", "*.c", "*.cpp", "*.h", "*.cs",
            "*.php", "*.rb", "*.go", "*.rs", "*.swift",
        ],
    ),
    (
        "web",
        &["*.html", "*.css", "*.scss", "*.sass", "*.less", "*.vue", "*.svelte"],
    ),
    (
        "config",
        &["*.json", "*.yaml", "*.yml", "*.toml", "*.ini", "*.cfg", "*.conf"],
    ),
    ("docs", &["*.md", "*.txt", "*.rst", "*.doc", "*.docx", "*.pdf"]),
    ("data", &["*.csv", "*.xlsx", "*.xml", "*.sql"]),
    ("all", &["*"]),
];

/// Extensions (lowercase, with dot) always treated as text
pub const TEXT_EXTENSIONS: &[&str] = &[
    ".py",
    ".js",
    ".ts",
    ".jsx",
    ".tsx",
    ".html",
    ".css",
    ".scss",
    ".json",
    ".xml",
    ".yaml",
    ".yml",
    ".md",
    ".txt",
    ".log",
    ".ini",
    ".cfg",
    ".conf",
    ".sh",
    ".bat",
    ".sql",
    ".r",
    ".php",
    ".rb",
    ".go",
    ".rs",
    ".swift",
    ".java",
    ".c",
    ".cpp",
    ".h",
    ".cs",
    ".vue",
    ".svelte",
    ".toml",
    ".dockerfile",
];

/// Default per-file size limit for reads and edits (1 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Files above this size are never sniffed for text content
pub const TEXT_SNIFF_SIZE_LIMIT: u64 = 1024 * 1024;

/// Number of leading bytes inspected for null bytes
pub const TEXT_SNIFF_BYTES: usize = 1024;

/// Default capacity of the edit history log
pub const DEFAULT_MAX_EDIT_HISTORY: usize = 100;

/// Directory name of the backup store under the user's home directory
pub const BACKUP_DIR_NAME: &str = ".mcp_local_backups";

/// Look up a preset group by name
pub fn file_type_group(name: &str) -> Option<&'static [&'static str]> {
    FILE_TYPE_GROUPS
        .iter()
        .find(|(group, _)| *group == name)
        .map(|(_, patterns)| *patterns)
}
