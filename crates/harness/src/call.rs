// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Descriptions of student function calls for failure messages.

use std::any::Any;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
struct CallArg {
    name: Option<String>,
    repr: String,
    text: Option<String>,
}

/// How a student function was called, e.g. `greet("Ada", times=2)`.
///
/// Arguments are recorded by their `Debug` rendering. String arguments
/// (`String` and `&'static str`) are also remembered verbatim, since
/// some assertions require them to show up in the student's output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    path: String,
    args: Vec<CallArg>,
}

impl Call {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
        }
    }

    /// Add a positional argument.
    pub fn arg<T: fmt::Debug + Any>(mut self, value: T) -> Self {
        self.args.push(CallArg {
            name: None,
            repr: format!("{value:?}"),
            text: text_of(&value),
        });
        self
    }

    /// Add a keyword argument, rendered as `name=value`.
    pub fn kwarg<T: fmt::Debug + Any>(mut self, name: impl Into<String>, value: T) -> Self {
        self.args.push(CallArg {
            name: Some(name.into()),
            repr: format!("{value:?}"),
            text: text_of(&value),
        });
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// String arguments, positional and keyword, in call order.
    pub fn text_args(&self) -> impl Iterator<Item = &str> {
        self.args.iter().filter_map(|arg| arg.text.as_deref())
    }
}

fn text_of(value: &dyn Any) -> Option<String> {
    if let Some(text) = value.downcast_ref::<String>() {
        Some(text.clone())
    } else {
        value.downcast_ref::<&str>().map(|text| text.to_string())
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.path)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if let Some(name) = &arg.name {
                write!(f, "{name}=")?;
            }
            write!(f, "{}", arg.repr)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
#[path = "call_tests.rs"]
mod tests;
