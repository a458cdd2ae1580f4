use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Can't start {tool}: {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },

    #[error("{tool} exited with {}: {}\n{stderr}", exit_status(.exit_code), .args.join(" "))]
    InvocationFailed {
        tool: String,
        args: Vec<String>,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Invalid tool configuration {path}: {message}")]
    Config { path: String, message: String },

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn exit_status(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
