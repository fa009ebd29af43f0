// Output formatting utilities for the CLI layer

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

/// Print info message
pub fn info(msg: &str) {
    let color = if is_terminal() { GREEN } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}[INFO]{} {}", color, reset, msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    let color = if is_terminal() { YELLOW } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[WARN]{} {}", color, reset, msg);
}

/// Print error message
pub fn error(msg: &str) {
    let color = if is_terminal() { RED } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[ERROR]{} {}", color, reset, msg);
}

/// Print success message
pub fn success(msg: &str) {
    let color = if is_terminal() { MAGENTA } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}[OK]{} {}", color, reset, msg);
}

/// Print section header
pub fn header(msg: &str) {
    let bold = if is_terminal() { BOLD } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}===>{} {}", bold, reset, msg);
    println!();
}

/// Exit codes (clap owns code 2 for argument errors)
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_FILE_NOT_FOUND: i32 = 4;
pub const EXIT_VALIDATION: i32 = 5;
pub const EXIT_BUDGET: i32 = 6;

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
pub const E_INVALID_EDGE_LIST: &str = "E002";
pub const E_BUDGET_EXCEEDED: &str = "E003";
pub const E_EXTRACTION_FAILED: &str = "E004";

/// Common remediation messages
pub const R_HINT_EDGE_LIST: &str =
    "Edge-list lines are 'FROM TO'; a lone token declares an isolated node";
pub const R_HINT_MAX_NODES: &str =
    "Use --max-nodes N to raise the budget, or reduce the graph first";

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
                .unwrap_or(0),
            std::process::id()
        );

        JsonResponse {
            schema_version: "0.1.0".to_string(),
            execution_id: exec_id,
            tool: "primepath".to_string(),
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

    /// Graph file not found error
    pub fn graph_not_found(path: &str) -> Self {
        Self::new(
            "GraphNotFound",
            &format!("Graph file not found: {}", path),
            E_GRAPH_NOT_FOUND,
        )
    }

    /// Malformed edge-list error with remediation
    pub fn invalid_edge_list(detail: &str) -> Self {
        Self::new(
            "InvalidEdgeList",
            &format!("Malformed edge list: {}", detail),
            E_INVALID_EDGE_LIST,
        )
        .with_remediation(R_HINT_EDGE_LIST)
    }

    /// Source extraction failure
    pub fn extraction_failed(detail: &str) -> Self {
        Self::new(
            "ExtractionFailed",
            &format!("CFG extraction failed: {}", detail),
            E_EXTRACTION_FAILED,
        )
    }

    /// Node budget exceeded error with remediation
    pub fn budget_exceeded(nodes: usize, max: usize) -> Self {
        Self::new(
            "BudgetExceeded",
            &format!("Graph has {} nodes, budget is {}", nodes, max),
            E_BUDGET_EXCEEDED,
        )
        .with_remediation(R_HINT_MAX_NODES)
    }
}
