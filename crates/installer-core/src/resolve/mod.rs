//! Interactive resolution of the module tree
//!
//! The resolver walks the tree depth-first in declaration order, posing each
//! node's question through a [`Prompter`] and re-asking until the answer
//! validates. A module that resolves truthy has its dependencies resolved
//! immediately, before the next sibling; a falsy module's dependencies are
//! never visited, so the user is never asked about unreachable options.
//!
//! The result is an immutable [`ResolvedSet`] snapshot. The tree itself is
//! never mutated: resolve fully, then rewrite.

use crate::modules::{ModuleNode, ModuleTree};
use anyhow::Result;

const YES_NO_MESSAGE: &str = "Possible answers Y or N";

/// What kind of input a prompt expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    FreeText { default: Option<String> },
    YesNo { default: bool },
}

/// Everything a prompt provider needs to pose one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub text: String,
    pub kind: PromptKind,
}

/// A raw, not-yet-validated answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAnswer {
    Text(String),
    Flag(bool),
}

/// Boundary to the terminal (or to a script, in tests).
///
/// `ask` blocks until an answer is produced; the resolver issues one prompt
/// at a time and never proceeds past an unanswered question. An error from
/// either method aborts the whole run.
pub trait Prompter {
    fn ask(&mut self, spec: &PromptSpec) -> Result<RawAnswer>;

    /// Deliver a rejection message before the same question is asked again
    fn reject(&mut self, message: &str) -> Result<()>;
}

/// A single validated value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    Text(String),
    Enabled(bool),
}

impl ResolvedValue {
    /// Non-empty text or an enabled toggle
    pub fn is_truthy(&self) -> bool {
        match self {
            ResolvedValue::Text(value) => !value.is_empty(),
            ResolvedValue::Enabled(on) => *on,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResolvedValue::Text(value) => Some(value),
            ResolvedValue::Enabled(_) => None,
        }
    }
}

/// One resolved node plus the resolved portion of its dependencies
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    name: String,
    value: ResolvedValue,
    dependencies: ResolvedSet,
}

impl ResolvedEntry {
    /// A resolved variable (no dependencies by construction)
    pub fn variable(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ResolvedValue::Text(value.into()),
            dependencies: ResolvedSet::default(),
        }
    }

    /// A resolved module toggle with the already-resolved slice of its dependencies
    pub fn module(name: impl Into<String>, enabled: bool, dependencies: ResolvedSet) -> Self {
        Self {
            name: name.into(),
            value: ResolvedValue::Enabled(enabled),
            dependencies,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ResolvedValue {
        &self.value
    }

    pub fn dependencies(&self) -> &ResolvedSet {
        &self.dependencies
    }
}

/// Immutable snapshot of every reachable node's validated value, in tree
/// declaration order
#[derive(Debug, Clone, Default)]
pub struct ResolvedSet {
    entries: Vec<ResolvedEntry>,
}

impl ResolvedSet {
    pub fn new(entries: Vec<ResolvedEntry>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedEntry> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// The value of a variable at this level, if present
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|entry| entry.value.as_text())
    }

    /// Whether a node at this level resolved truthy
    pub fn truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(|entry| entry.value.is_truthy())
    }
}

/// Resolve every node reachable under a truthy ancestor chain.
///
/// Returns early only when the prompter fails; validation failures are
/// reported through the prompter and retried on the same node, without bound.
pub fn resolve<P: Prompter>(tree: &ModuleTree, prompter: &mut P) -> Result<ResolvedSet> {
    let mut entries = Vec::with_capacity(tree.len());

    for (name, node) in tree.iter() {
        let value = resolve_node(node, prompter)?;

        let dependencies = match node {
            ModuleNode::Module(module) if value.is_truthy() => {
                resolve(&module.dependencies, prompter)?
            }
            _ => ResolvedSet::default(),
        };

        entries.push(ResolvedEntry {
            name: name.to_string(),
            value,
            dependencies,
        });
    }

    Ok(ResolvedSet { entries })
}

/// Ask one node's question until the answer validates.
///
/// An explicit loop rather than recursion: the retry count is unbounded and
/// must not grow the stack.
fn resolve_node<P: Prompter>(node: &ModuleNode, prompter: &mut P) -> Result<ResolvedValue> {
    let spec = prompt_spec(node);

    loop {
        let answer = prompter.ask(&spec)?;
        match validate(node, answer) {
            Ok(value) => return Ok(value),
            Err(message) => prompter.reject(message)?,
        }
    }
}

fn prompt_spec(node: &ModuleNode) -> PromptSpec {
    match node {
        ModuleNode::Variable(variable) => PromptSpec {
            text: variable.prompt.clone(),
            kind: PromptKind::FreeText {
                default: variable.default.clone(),
            },
        },
        ModuleNode::Module(module) => PromptSpec {
            text: module.prompt.clone(),
            kind: PromptKind::YesNo {
                default: module.default,
            },
        },
    }
}

/// Check a raw answer against the node it was asked for. Answers of the
/// wrong shape are rejected like any other invalid input.
fn validate(node: &ModuleNode, answer: RawAnswer) -> Result<ResolvedValue, &str> {
    match (node, answer) {
        (ModuleNode::Variable(variable), RawAnswer::Text(text)) => {
            if variable.rule.check(&text) {
                Ok(ResolvedValue::Text(text))
            } else {
                Err(variable.rule.message())
            }
        }
        (ModuleNode::Variable(variable), RawAnswer::Flag(_)) => Err(variable.rule.message()),
        (ModuleNode::Module(_), RawAnswer::Flag(on)) => Ok(ResolvedValue::Enabled(on)),
        (ModuleNode::Module(_), RawAnswer::Text(_)) => Err(YES_NO_MESSAGE),
    }
}
