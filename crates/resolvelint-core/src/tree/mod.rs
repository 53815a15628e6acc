//! Directive tree
//!
//! A parsed configuration is stored as an arena of nodes. Node `0` is a
//! synthetic root block; every directive of the file hangs below it.
//! [`Directive`] is a cheap `Copy` handle into the arena and exposes the
//! navigation and scope queries rules rely on.
//!
//! ## Scope Queries
//!
//! nginx has two kinds of directive visibility:
//!
//! - **Inherited** directives (`resolver`, `proxy_set_header`, ...) are taken
//!   from the nearest enclosing block that declares them; an inner
//!   declaration replaces every outer one. See
//!   [`Directive::find_directives_in_scope`].
//! - **Imperative** directives (`set`, `upstream`, ...) are collected from
//!   the enclosing blocks as written. See
//!   [`Directive::find_imperative_directives_in_scope`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node inside a [`ConfigTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic root block
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    args: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    block: bool,
    line: Option<usize>,
}

/// Arena-backed directive tree
#[derive(Debug, Clone)]
pub struct ConfigTree {
    nodes: Vec<Node>,
}

impl ConfigTree {
    /// Create an empty tree containing only the root block
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: String::new(),
                args: Vec::new(),
                parent: None,
                children: Vec::new(),
                block: true,
                line: None,
            }],
        }
    }

    /// The root block
    pub fn root(&self) -> Directive<'_> {
        Directive {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node by id
    pub fn get(&self, id: NodeId) -> Option<Directive<'_>> {
        (id.0 < self.nodes.len()).then_some(Directive { tree: self, id })
    }

    /// Number of directives (the root is not counted)
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether the tree holds no directives
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a simple directive (`name args;`) below `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn push<I, S>(&mut self, parent: NodeId, name: impl Into<String>, args: I) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(parent, name.into(), args.into_iter().map(Into::into).collect(), false)
    }

    /// Append a block directive (`name args { ... }`) below `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn push_block<I, S>(&mut self, parent: NodeId, name: impl Into<String>, args: I) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(parent, name.into(), args.into_iter().map(Into::into).collect(), true)
    }

    /// Record the source line of a directive
    pub fn set_line(&mut self, id: NodeId, line: usize) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.line = Some(line);
        }
    }

    /// All directives in document order (the root is not included)
    pub fn walk(&self) -> Vec<Directive<'_>> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.nodes[0].children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            out.push(Directive { tree: self, id });
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }

        out
    }

    fn insert(&mut self, parent: NodeId, name: String, args: Vec<String>, block: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name,
            args,
            parent: Some(parent),
            children: Vec::new(),
            block,
            line: None,
        });

        let parent = &mut self.nodes[parent.0];
        parent.children.push(id);
        parent.block = true;

        id
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a single directive of a [`ConfigTree`]
#[derive(Clone, Copy)]
pub struct Directive<'a> {
    tree: &'a ConfigTree,
    id: NodeId,
}

impl<'a> Directive<'a> {
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    /// Node identifier
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Directive name (empty for the root)
    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    /// Ordered argument list
    pub fn args(&self) -> &'a [String] {
        &self.node().args
    }

    /// First argument, if any
    pub fn first_arg(&self) -> Option<&'a str> {
        self.node().args.first().map(String::as_str)
    }

    /// Source line, when known
    pub fn line(&self) -> Option<usize> {
        self.node().line
    }

    /// Whether this directive opens a block
    pub fn is_block(&self) -> bool {
        self.node().block
    }

    /// Whether this is the synthetic root block
    pub fn is_root(&self) -> bool {
        self.id == NodeId::ROOT
    }

    /// Enclosing block
    pub fn parent(&self) -> Option<Directive<'a>> {
        self.node().parent.map(|id| Directive {
            tree: self.tree,
            id,
        })
    }

    /// Direct children in document order
    pub fn children(&self) -> impl Iterator<Item = Directive<'a>> + use<'a> {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| Directive { tree, id })
    }

    /// Enclosing blocks, nearest first, ending with the root
    pub fn parents(&self) -> Parents<'a> {
        Parents {
            next: self.parent(),
        }
    }

    /// Directives named `kind` inherited from the nearest declaring scope
    ///
    /// The enclosing blocks are searched outward; the first block that
    /// declares at least one `kind` directive wins and its declarations are
    /// returned in document order.
    pub fn find_directives_in_scope(&self, kind: &str) -> Vec<Directive<'a>> {
        for scope in self.parents() {
            let found: Vec<_> = scope.children().filter(|c| c.name() == kind).collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    /// Directives named `kind` declared in enclosing blocks
    ///
    /// With `ancestors == false` only the immediately enclosing block is
    /// searched. Otherwise every enclosing block is searched, nearest first,
    /// and declarations inside one block are kept in document order.
    pub fn find_imperative_directives_in_scope(
        &self,
        kind: &str,
        ancestors: bool,
    ) -> Vec<Directive<'a>> {
        let mut found = Vec::new();
        for scope in self.parents() {
            found.extend(scope.children().filter(|c| c.name() == kind));
            if !ancestors {
                break;
            }
        }
        found
    }

    /// First child (`flat`) or descendant (`!flat`) named `kind`
    pub fn some(&self, kind: &str, flat: bool) -> Option<Directive<'a>> {
        for child in self.children() {
            if child.name() == kind {
                return Some(child);
            }
            if !flat
                && let Some(found) = child.some(kind, false)
            {
                return Some(found);
            }
        }
        None
    }
}

impl fmt::Debug for Directive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directive")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("args", &self.args())
            .field("line", &self.line())
            .finish()
    }
}

impl PartialEq for Directive<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Directive<'_> {}

impl fmt::Display for Directive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        for arg in self.args() {
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || matches!(c, ';' | '{' | '}')) {
                write!(f, " \"{}\"", arg.replace('"', "\\\""))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        if self.is_block() {
            f.write_str(" {")
        } else {
            f.write_str(";")
        }
    }
}

/// Iterator over the enclosing blocks of a directive
pub struct Parents<'a> {
    next: Option<Directive<'a>>,
}

impl<'a> Iterator for Parents<'a> {
    type Item = Directive<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
