//! 命令参数：宿主以 JSON 对象传入，处理函数按类型读取

use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Number,
    Bool,
    String,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKind::Number => write!(f, "number"),
            ArgKind::Bool => write!(f, "boolean"),
            ArgKind::String => write!(f, "string"),
        }
    }
}

/// 参数模式：名称 + 类型 + 是否必填
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

impl ArgSpec {
    pub const fn required(name: &'static str, kind: ArgKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: ArgKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// 静态表（面板/菜单/启动器）中使用的常量参数值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue {
    Number(i64),
    Bool(bool),
    Str(&'static str),
}

impl From<ArgValue> for Value {
    fn from(value: ArgValue) -> Self {
        match value {
            ArgValue::Number(n) => Value::from(n),
            ArgValue::Bool(b) => Value::Bool(b),
            ArgValue::Str(s) => Value::from(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArgError {
    pub name: String,
    pub expected: ArgKind,
    pub found: String,
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "argument `{}` expects a {}, got {}",
            self.name, self.expected, self.found
        )
    }
}

impl std::error::Error for ArgError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    values: Map<String, Value>,
}

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&'static str, ArgValue)]) -> Self {
        let values = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), Value::from(*value)))
            .collect();
        Self { values }
    }

    /// 非对象的 JSON 返回 None
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self { values }),
            Value::Null => Some(Self::default()),
            _ => None,
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// 数字参数；数字字符串同样接受（例如 "-1"）
    pub fn number(&self, name: &str) -> Result<Option<f64>, ArgError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed.filter(|n| n.is_finite()) {
            Some(n) => Ok(Some(n)),
            None => Err(self.mismatch(name, ArgKind::Number, value)),
        }
    }

    pub fn bool(&self, name: &str) -> Result<Option<bool>, ArgError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(value) => Err(self.mismatch(name, ArgKind::Bool, value)),
        }
    }

    pub fn str(&self, name: &str) -> Result<Option<&str>, ArgError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(value) => Err(self.mismatch(name, ArgKind::String, value)),
        }
    }

    /// 按类型检查单个参数
    pub fn check(&self, spec: &ArgSpec) -> Result<(), ArgError> {
        match spec.kind {
            ArgKind::Number => self.number(spec.name).map(|_| ()),
            ArgKind::Bool => self.bool(spec.name).map(|_| ()),
            ArgKind::String => self.str(spec.name).map(|_| ()),
        }
    }

    fn mismatch(&self, name: &str, expected: ArgKind, found: &Value) -> ArgError {
        ArgError {
            name: name.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/args.rs"]
mod tests;
