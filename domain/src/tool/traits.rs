//! Tool domain traits
//!
//! Contains the pure argument shape check applied at the dispatch boundary.
//! The async handler and dispatcher ports live in the application layer.

use super::entities::{ToolCall, ToolDefinition};
use super::ParamType;

/// Shape problem found in a tool call's arguments.
///
/// None of these fail a dispatch: missing arguments fall back to the
/// handler's documented defaults, and mismatched or unknown arguments are
/// dropped before the handler sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentIssue {
    /// A required parameter was not supplied
    MissingRequired { name: String },
    /// A supplied value does not match the declared type
    TypeMismatch { name: String, expected: ParamType },
    /// An argument that the tool does not declare
    UnknownParameter { name: String },
}

impl ArgumentIssue {
    /// Whether the offending argument must be removed before execution
    pub fn drops_argument(&self) -> Option<&str> {
        match self {
            ArgumentIssue::MissingRequired { .. } => None,
            ArgumentIssue::TypeMismatch { name, .. } | ArgumentIssue::UnknownParameter { name } => {
                Some(name)
            }
        }
    }
}

impl std::fmt::Display for ArgumentIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentIssue::MissingRequired { name } => {
                write!(f, "missing required parameter '{}', using default", name)
            }
            ArgumentIssue::TypeMismatch { name, expected } => {
                write!(f, "parameter '{}' is not a {}, using default", name, expected)
            }
            ArgumentIssue::UnknownParameter { name } => {
                write!(f, "unknown parameter '{}' ignored", name)
            }
        }
    }
}

/// Validator for tool call arguments
///
/// This is a pure domain trait that inspects tool calls against their
/// definitions without any I/O operations.
pub trait ArgumentValidator {
    /// Report every shape issue in `call` relative to `definition`
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Vec<ArgumentIssue>;

    /// Remove offending arguments, returning the cleaned call and the issues found
    fn sanitize(
        &self,
        call: &ToolCall,
        definition: &ToolDefinition,
    ) -> (ToolCall, Vec<ArgumentIssue>) {
        let issues = self.validate(call, definition);
        let cleaned = issues
            .iter()
            .filter_map(|issue| issue.drops_argument())
            .fold(call.clone(), |call, name| call.without_arg(name));
        (cleaned, issues)
    }
}

/// Default implementation of ArgumentValidator
#[derive(Debug, Clone, Default)]
pub struct DefaultArgumentValidator;

impl ArgumentValidator for DefaultArgumentValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Vec<ArgumentIssue> {
        let mut issues = Vec::new();

        for param in &definition.parameters {
            match call.arguments.get(&param.name) {
                None => {
                    if param.required {
                        issues.push(ArgumentIssue::MissingRequired {
                            name: param.name.clone(),
                        });
                    }
                }
                Some(value) if !param.param_type.accepts(value) => {
                    issues.push(ArgumentIssue::TypeMismatch {
                        name: param.name.clone(),
                        expected: param.param_type,
                    });
                }
                Some(_) => {}
            }
        }

        let mut unknown: Vec<_> = call
            .arguments
            .keys()
            .filter(|name| definition.parameter(name).is_none())
            .cloned()
            .collect();
        unknown.sort();
        issues.extend(
            unknown
                .into_iter()
                .map(|name| ArgumentIssue::UnknownParameter { name }),
        );

        issues
    }
}
