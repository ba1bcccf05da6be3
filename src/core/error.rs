use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigMissingFile,
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    GitCommandFailed,
    PublishCommandFailed,
    DeployCommandFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigMissingFile => "config.missing_file",
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::GitCommandFailed => "git.command_failed",
            ErrorCode::PublishCommandFailed => "publish.command_failed",
            ErrorCode::DeployCommandFailed => "deploy.command_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFileDetails {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvalidArgumentDetails {
    field: String,
    problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommandFailureDetails {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    stderr: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InternalDetails {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or(Value::Null)
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = hints.into_iter().map(|message| Hint { message }).collect();
        self
    }

    pub fn config_missing_file(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::ConfigMissingFile,
            format!("No project config found at {}", path),
            to_details(ConfigFileDetails { path, error: None }),
        )
        .with_hints(vec![
            "Create a shipmate.json in the project root".to_string(),
            "Or point at one explicitly: shipmate --config <path> ...".to_string(),
        ])
    }

    pub fn config_invalid_json(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        let error = error.into();
        Self::new(
            ErrorCode::ConfigInvalidJson,
            format!("Invalid JSON in {}: {}", path, error),
            to_details(ConfigFileDetails {
                path,
                error: Some(error),
            }),
        )
    }

    pub fn config_invalid_value(field: &str, problem: impl Into<String>) -> Self {
        let problem = problem.into();
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid config value for {}: {}", field, problem),
            to_details(InvalidArgumentDetails {
                field: field.to_string(),
                problem,
            }),
        )
    }

    pub fn validation_invalid_argument(
        field: &str,
        problem: impl Into<String>,
        hints: Option<Vec<String>>,
    ) -> Self {
        let problem = problem.into();
        let err = Self::new(
            ErrorCode::ValidationInvalidArgument,
            problem.clone(),
            to_details(InvalidArgumentDetails {
                field: field.to_string(),
                problem,
            }),
        );
        match hints {
            Some(hints) => err.with_hints(hints),
            None => err,
        }
    }

    pub fn git_command_failed(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::command_failed(ErrorCode::GitCommandFailed, command, exit_code, stderr)
    }

    pub fn publish_command_failed(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::command_failed(ErrorCode::PublishCommandFailed, command, exit_code, stderr)
    }

    pub fn deploy_command_failed(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::command_failed(ErrorCode::DeployCommandFailed, command, exit_code, stderr)
    }

    fn command_failed(
        code: ErrorCode,
        command: impl Into<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        let command = command.into();
        let stderr = stderr.into();
        let message = if stderr.is_empty() {
            format!("{} failed", command)
        } else {
            format!("{} failed: {}", command, stderr)
        };
        Self::new(
            code,
            message,
            to_details(CommandFailureDetails {
                command,
                exit_code,
                stderr,
            }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::InternalIoError,
            error.clone(),
            to_details(InternalDetails {
                error,
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::InternalJsonError,
            error.clone(),
            to_details(InternalDetails {
                error,
                context,
            }),
        )
    }

    pub fn internal_unexpected(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::InternalUnexpected,
            message.clone(),
            to_details(InternalDetails {
                error: message,
                context: None,
            }),
        )
    }
}
