use std::collections::HashMap;

/// Index of a scope node inside a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

/// A tree of lexical scopes built while checking a program.
///
/// Each node maps unscoped source names to their fully-qualified form, which
/// is the dot-joined path of scope names. The root scope contributes no
/// prefix, so top-level functions keep their bare names.
#[derive(Debug)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
}

#[derive(Debug)]
struct ScopeNode {
    name: String,
    parent: Option<ScopeId>,
    variables: HashMap<String, String>,
}

impl ScopeTree {
    /// A tree holding only the unnamed root scope.
    pub fn new() -> Self {
        ScopeTree {
            nodes: vec![ScopeNode {
                name: String::new(),
                parent: None,
                variables: HashMap::new(),
            }],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn child(&mut self, parent: ScopeId, name: impl Into<String>) -> ScopeId {
        let id = ScopeId(self.nodes.len());
        self.nodes.push(ScopeNode {
            name: name.into(),
            parent: Some(parent),
            variables: HashMap::new(),
        });
        id
    }

    /// The dot-joined path of scope names from the root down to `scope`.
    fn path(&self, scope: ScopeId) -> String {
        let mut names = Vec::new();
        let mut cursor = Some(scope);
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            if !node.name.is_empty() {
                names.push(node.name.as_str());
            }
            cursor = node.parent;
        }
        names.reverse();
        names.join(".")
    }

    /// The qualified name `name` would get if it were registered in `scope`.
    pub fn qualified(&self, scope: ScopeId, name: &str) -> String {
        let path = self.path(scope);
        if path.is_empty() {
            name.to_string()
        } else {
            format!("{path}.{name}")
        }
    }

    /// Registers an unscoped name in `scope` and returns its qualified form.
    pub fn register(&mut self, scope: ScopeId, name: &str) -> String {
        let qualified = self.qualified(scope, name);
        self.nodes[scope.0]
            .variables
            .insert(name.to_string(), qualified.clone());
        qualified
    }

    /// Resolves an unscoped name by walking from `scope` towards the root.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&str> {
        let mut cursor = Some(scope);
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            if let Some(qualified) = node.variables.get(name) {
                return Some(qualified);
            }
            cursor = node.parent;
        }
        None
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod scope_test;
