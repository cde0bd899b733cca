//! The module tree: a declarative catalog of every installer customization
//!
//! A tree level is an ordered list of named nodes. Each node is either a
//! `Variable` (a leaf value substituted into templates) or a `Module` (a
//! boolean toggle that may gate a nested tree of further nodes). The tree is
//! assembled once at startup and never changes; resolution state lives in a
//! separate snapshot produced by the resolver.

pub mod rule;

use rule::Rule;
use thiserror::Error;

/// Errors detected while assembling a module tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("invalid node name '{0}': must start with a letter, contain only letters, digits and hyphens, and not end with a hyphen")]
    InvalidName(String),

    #[error("duplicate node name '{0}' within one tree level")]
    DuplicateName(String),
}

/// A file or directory copied from the template when the owning node resolves truthy
#[derive(Debug, Clone)]
pub struct CopyTask {
    /// Source path relative to the template root
    pub src: &'static str,
    /// Destination path relative to the target directory
    pub dest: &'static str,
    /// Copy the whole subtree; otherwise only files directly inside `src`
    pub recursive: bool,
}

/// An npm package installed when the owning node resolves truthy
#[derive(Debug, Clone)]
pub struct PackageSpec {
    pub name: &'static str,
    pub dev: bool,
}

/// Opaque payloads attached to a node.
///
/// The tree carries these through untouched; only the copy and install
/// plumbing interprets them.
#[derive(Debug, Clone, Default)]
pub struct SideEffects {
    pub copy_tasks: Vec<CopyTask>,
    pub packages: Vec<PackageSpec>,
}

/// A leaf configuration value substituted verbatim into template text
#[derive(Debug, Clone)]
pub struct Variable {
    pub prompt: String,
    pub default: Option<String>,
    pub rule: Rule,
    pub side_effects: SideEffects,
}

impl Variable {
    pub fn new(prompt: impl Into<String>, rule: Rule) -> Self {
        Self {
            prompt: prompt.into(),
            default: None,
            rule,
            side_effects: SideEffects::default(),
        }
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn side_effects(mut self, side_effects: SideEffects) -> Self {
        self.side_effects = side_effects;
        self
    }
}

/// A boolean feature toggle gating template blocks and nested configuration
#[derive(Debug, Clone)]
pub struct Module {
    pub prompt: String,
    pub default: bool,
    pub dependencies: ModuleTree,
    pub side_effects: SideEffects,
}

impl Module {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            default: false,
            dependencies: ModuleTree::empty(),
            side_effects: SideEffects::default(),
        }
    }

    pub fn dependencies(mut self, dependencies: ModuleTree) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn side_effects(mut self, side_effects: SideEffects) -> Self {
        self.side_effects = side_effects;
        self
    }
}

/// A named entry in the tree.
///
/// Variables carry no dependencies field at all: nested configuration only
/// ever hangs off module toggles, and the sum type makes the other shape
/// unrepresentable.
#[derive(Debug, Clone)]
pub enum ModuleNode {
    Variable(Variable),
    Module(Module),
}

impl ModuleNode {
    pub fn side_effects(&self) -> &SideEffects {
        match self {
            ModuleNode::Variable(variable) => &variable.side_effects,
            ModuleNode::Module(module) => &module.side_effects,
        }
    }
}

/// Ordered collection of named nodes; iteration follows declaration order
#[derive(Debug, Clone, Default)]
pub struct ModuleTree {
    entries: Vec<(String, ModuleNode)>,
}

impl ModuleTree {
    /// Build a tree level, checking node names as it goes
    pub fn new(entries: Vec<(&str, ModuleNode)>) -> Result<Self, TreeError> {
        let mut tree = Self {
            entries: Vec::with_capacity(entries.len()),
        };
        for (name, node) in entries {
            if !valid_name(name) {
                return Err(TreeError::InvalidName(name.to_string()));
            }
            if tree.get(name).is_some() {
                return Err(TreeError::DuplicateName(name.to_string()));
            }
            tree.entries.push((name.to_string(), node));
        }
        Ok(tree)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ModuleNode> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleNode)> {
        self.entries
            .iter()
            .map(|(name, node)| (name.as_str(), node))
    }
}

/// Node names double as marker names in templates: letter first, then
/// letters, digits and hyphens, with no trailing hyphen
fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-') && !name.ends_with('-')
}
