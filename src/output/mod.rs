// Output formatting utilities shared by all commands

use std::io::IsTerminal;

// Colors for terminal output (when supported)
pub const RED: &str = "\x1b[0;31m";
pub const GREEN: &str = "\x1b[0;32m";
pub const YELLOW: &str = "\x1b[1;33m";
pub const CYAN: &str = "\x1b[0;36m";
pub const MAGENTA: &str = "\x1b[0;35m";
pub const BOLD: &str = "\x1b[1m";
pub const NC: &str = "\x1b[0m"; // No Color

/// Check if stdout is a terminal (for color output)
#[inline]
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

fn paint(color: &'static str) -> (&'static str, &'static str) {
    if is_terminal() {
        (color, NC)
    } else {
        ("", "")
    }
}

/// Print info message
pub fn info(msg: &str) {
    let (color, reset) = paint(GREEN);
    println!("{}[INFO]{} {}", color, reset, msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    let (color, reset) = paint(YELLOW);
    eprintln!("{}[WARN]{} {}", color, reset, msg);
}

/// Print error message
pub fn error(msg: &str) {
    let (color, reset) = paint(RED);
    eprintln!("{}[ERROR]{} {}", color, reset, msg);
}

/// Print success message
pub fn success(msg: &str) {
    let (color, reset) = paint(MAGENTA);
    println!("{}[OK]{} {}", color, reset, msg);
}

/// Print section header
pub fn header(msg: &str) {
    let (bold, reset) = paint(BOLD);
    println!("{}===>{} {}", bold, reset, msg);
}

/// Print one numbered path line
pub fn path_line(index: usize, text: &str) {
    let (color, reset) = paint(CYAN);
    println!("  {}{:>3}{} {}", color, index + 1, reset, text);
}

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_FILE_NOT_FOUND: i32 = 4;
pub const EXIT_VALIDATION: i32 = 5;

/// Exit with usage error
pub fn exit_usage(msg: &str) -> ! {
    error(msg);
    std::process::exit(EXIT_USAGE);
}

/// Exit with file not found error
pub fn exit_file_not_found(path: &str) -> ! {
    error(&format!("File not found: {}", path));
    std::process::exit(EXIT_FILE_NOT_FOUND);
}

// ============================================================================
// Error Codes and Remediation
// ============================================================================

/// Error codes for JSON error responses
pub const E_GRAPH_NOT_FOUND: &str = "E001";
pub const E_GRAPH_MALFORMED: &str = "E002";
pub const E_GRAPH_INVALID: &str = "E003";
pub const E_PATH_UNEXTENDABLE: &str = "E004";
pub const E_PATH_LIMIT: &str = "E005";
pub const E_COVERAGE_ERROR: &str = "E006";

/// Common remediation messages
pub const R_HINT_GRAPH: &str = "Pass --graph FILE or set PATHCOV_GRAPH";
pub const R_HINT_VALIDATE: &str = "Run 'pathcov validate' to list the problems";
pub const R_HINT_MAX_LENGTH: &str = "Use --max-length N to allow longer test paths";

/// JSON output wrapper
#[derive(Debug, Clone, serde::Serialize)]
pub struct JsonResponse<T> {
    pub schema_version: String,
    pub execution_id: String,
    pub tool: String,
    pub timestamp: String,
    pub data: T,
}

impl<T: serde::Serialize> JsonResponse<T> {
    pub fn new(data: T) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = chrono::Utc::now().to_rfc3339();
        let exec_id = format!(
            "{:x}-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            std::process::id()
        );

        JsonResponse {
            schema_version: "1.0.0".to_string(),
            execution_id: exec_id,
            tool: "pathcov".to_string(),
            timestamp,
            data,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Error response format for JSON mode
#[derive(Debug, Clone, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl JsonError {
    pub fn new(category: &str, message: &str, code: &str) -> Self {
        JsonError {
            error: category.to_string(),
            message: message.to_string(),
            code: code.to_string(),
            remediation: None,
        }
    }

    pub fn with_remediation(mut self, remediation: &str) -> Self {
        self.remediation = Some(remediation.to_string());
        self
    }

    /// Graph file not found error with remediation
    pub fn graph_not_found(path: &str) -> Self {
        Self::new(
            "GraphNotFound",
            &format!("Graph file not found: {}", path),
            E_GRAPH_NOT_FOUND,
        )
        .with_remediation(R_HINT_GRAPH)
    }

    /// Unreadable or inconsistent graph description
    pub fn graph_malformed(message: &str) -> Self {
        Self::new("GraphMalformed", message, E_GRAPH_MALFORMED)
    }

    /// Graph failed validation
    pub fn graph_invalid(problems: &[String]) -> Self {
        Self::new(
            "GraphInvalid",
            &format!("Invalid graph: {}", problems.join("; ")),
            E_GRAPH_INVALID,
        )
        .with_remediation(R_HINT_VALIDATE)
    }

    /// Reduction failure, classified by cause
    pub fn coverage(err: &crate::coverage::CoverageError) -> Self {
        use crate::coverage::CoverageError;

        match err {
            CoverageError::Unextendable { .. } => {
                Self::new("PathUnextendable", &err.to_string(), E_PATH_UNEXTENDABLE)
                    .with_remediation(R_HINT_VALIDATE)
            }
            CoverageError::PathLimitExceeded { .. } => {
                Self::new("PathLimitExceeded", &err.to_string(), E_PATH_LIMIT)
                    .with_remediation(R_HINT_MAX_LENGTH)
            }
            _ => Self::new("CoverageError", &err.to_string(), E_COVERAGE_ERROR),
        }
    }
}
