//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::core::error::DomainError;

/// Declared type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Object => "object",
        }
    }

    /// Whether a dynamic argument value has the shape this type expects.
    ///
    /// `null` never matches; it is treated like an absent argument.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
            ParamType::Number => value.is_number(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool the agent host can invoke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "check_inventory")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
    /// "Please wait" messages spoken while the handler runs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fillers: Vec<String>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether the host is expected to supply this parameter
    pub required: bool,
    /// Declared parameter type
    pub param_type: ParamType,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            fillers: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn with_filler(mut self, filler: impl Into<String>) -> Self {
        self.fillers.push(filler.into());
        self
    }

    /// Replace the declared fillers (used for configuration overrides)
    pub fn with_fillers(mut self, fillers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fillers = fillers.into_iter().map(Into::into).collect();
        self
    }

    /// Filler selected for this tool: always the first declared one.
    pub fn filler(&self) -> Option<&str> {
        self.fillers.first().map(|s| s.as_str())
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }
}

/// Name-keyed set of tool definitions
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: HashMap<String, ToolDefinition>,
    /// Registration order, for stable listings
    order: Vec<String>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Names must be non-empty and unique.
    pub fn register(&mut self, tool: ToolDefinition) -> Result<(), DomainError> {
        if tool.name.trim().is_empty() {
            return Err(DomainError::EmptyToolName);
        }
        if self.tools.contains_key(&tool.name) {
            return Err(DomainError::DuplicateTool(tool.name));
        }
        self.order.push(tool.name.clone());
        self.tools.insert(tool.name.clone(), tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Definitions in registration order
    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A call to a tool with arguments, as delivered by the agent host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
    /// Opaque host context, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_context: Option<Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            call_context: None,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.call_context = Some(context);
        self
    }

    /// Drop an argument (used when its shape does not match the schema)
    pub fn without_arg(mut self, key: &str) -> Self {
        self.arguments.remove(key);
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a numeric argument as f64
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.arguments.get(key).and_then(|v| v.as_f64())
    }

    /// Get an optional bool argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(|v| v.as_bool())
    }

    /// String argument, or `default` when absent
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or(default).to_string()
    }

    /// Numeric argument, or `default` when absent or not finite
    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.get_f64(key).filter(|v| v.is_finite()).unwrap_or(default)
    }
}
