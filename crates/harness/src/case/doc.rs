// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Documentation checks.
//!
//! Rust keeps no documentation at run time, so targets are either built by
//! hand or pulled out of the student's source file with `syn`, which sees
//! `///` and `//!` comments as `#[doc = "..."]` attributes.

use std::fmt;
use std::path::Path;
use thiserror::Error;

use super::TestCase;
use crate::failure::{Failure, FailureKind};

/// Minimum documentation length, in characters, unless a test asks for
/// another.
pub const DEFAULT_DOC_MIN_LENGTH: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocKind {
    Function,
    Module,
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocKind::Function => write!(f, "function"),
            DocKind::Module => write!(f, "module"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocError {
    #[error("could not parse the source: {0}")]
    Parse(#[from] syn::Error),

    #[error("no {kind} named {name} was found")]
    NotFound { kind: DocKind, name: String },
}

/// A function or module together with its documentation, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocTarget {
    name: String,
    kind: DocKind,
    doc: Option<String>,
}

impl DocTarget {
    pub fn function(name: impl Into<String>, doc: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind: DocKind::Function,
            doc: doc.map(str::to_string),
        }
    }

    pub fn module(name: impl Into<String>, doc: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind: DocKind::Module,
            doc: doc.map(str::to_string),
        }
    }

    /// Find function `name` in `source`, looking inside inline modules,
    /// impl blocks and traits too. The first match wins.
    pub fn function_in_source(source: &str, name: &str) -> Result<Self, DocError> {
        let file = syn::parse_file(source)?;
        find_fn_attrs(&file.items, name)
            .map(|attrs| Self {
                name: name.to_string(),
                kind: DocKind::Function,
                doc: doc_text(attrs),
            })
            .ok_or_else(|| DocError::NotFound {
                kind: DocKind::Function,
                name: name.to_string(),
            })
    }

    /// The inner (`//!`) documentation of a whole source file.
    pub fn module_in_source(source: &str, name: &str) -> Result<Self, DocError> {
        let file = syn::parse_file(source)?;
        Ok(Self {
            name: name.to_string(),
            kind: DocKind::Module,
            doc: doc_text(&file.attrs),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DocKind {
        self.kind
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// `name()` for functions, `name` for modules.
    pub fn display_name(&self) -> String {
        match self.kind {
            DocKind::Function => format!("{}()", self.name),
            DocKind::Module => self.name.clone(),
        }
    }
}

fn find_fn_attrs<'a>(items: &'a [syn::Item], name: &str) -> Option<&'a [syn::Attribute]> {
    items.iter().find_map(|item| match item {
        syn::Item::Fn(func) if func.sig.ident == name => Some(func.attrs.as_slice()),
        syn::Item::Mod(module) => module
            .content
            .as_ref()
            .and_then(|(_, items)| find_fn_attrs(items, name)),
        syn::Item::Impl(block) => block.items.iter().find_map(|item| match item {
            syn::ImplItem::Fn(func) if func.sig.ident == name => Some(func.attrs.as_slice()),
            _ => None,
        }),
        syn::Item::Trait(block) => block.items.iter().find_map(|item| match item {
            syn::TraitItem::Fn(func) if func.sig.ident == name => Some(func.attrs.as_slice()),
            _ => None,
        }),
        _ => None,
    })
}

/// Join `#[doc = "..."]` lines. `None` when there are none.
fn doc_text(attrs: &[syn::Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(pair) => match &pair.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(text),
                    ..
                }) => Some(text.value()),
                _ => None,
            },
            _ => None,
        })
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

impl TestCase {
    pub fn assert_doc(&self, target: &DocTarget) -> Result<(), Failure> {
        self.assert_doc_with(target, DEFAULT_DOC_MIN_LENGTH)
    }

    /// Fail unless `target`'s trimmed documentation has at least
    /// `min_length` characters.
    pub fn assert_doc_with(&self, target: &DocTarget, min_length: usize) -> Result<(), Failure> {
        let name = target.display_name();
        let Some(doc) = target.doc() else {
            return Err(Failure::new(
                FailureKind::MissingDocumentation,
                format!("No documentation provided for {name}"),
            ));
        };
        if doc.trim().chars().count() < min_length {
            return Err(Failure::new(
                FailureKind::MissingDocumentation,
                format!("Documentation for {name} isn't very descriptive..."),
            ));
        }
        Ok(())
    }

    /// Check documentation found in a source file under the base directory.
    pub fn assert_doc_in_file(
        &self,
        filename: impl AsRef<Path>,
        kind: DocKind,
        name: &str,
    ) -> Result<(), Failure> {
        let filename = filename.as_ref();
        let source = self.read_file(filename)?;
        let target = match kind {
            DocKind::Function => DocTarget::function_in_source(&source, name),
            DocKind::Module => DocTarget::module_in_source(&source, name),
        };
        match target {
            Ok(target) => self.assert_doc(&target),
            Err(DocError::NotFound { kind, name }) => Err(Failure::assertion(format!(
                "Could not find a {kind} named {name} in {}",
                filename.display()
            ))),
            Err(err @ DocError::Parse(_)) => Err(Failure::harness(format!(
                "{}: {err}",
                filename.display()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "doc_tests.rs"]
mod tests;
