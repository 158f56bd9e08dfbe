//! Scope tree for variable resolution

use crate::table::VariableTable;
use crate::variable::Variable;
use la_arena::{Arena, Idx};
use sj_parser::BlockKind;
use std::iter;
use std::ops::Range;

/// Index of a scope in its [`ScopeTree`]
pub type ScopeId = Idx<Scope>;

/// Kind of scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    /// The whole source unit
    File,
    /// A method body
    Method {
        /// Name of the method
        name: String,
    },
    /// An `if` or `while` body
    Block {
        /// Keyword that opened the block
        kind: BlockKind,
        /// Condition text from the header
        condition: String,
    },
}

/// Where a name was found inside one scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Local,
    Shadow,
}

/// A single scope in the scope tree
#[derive(Debug, Clone)]
pub struct Scope {
    /// What opened this scope
    pub kind: ScopeKind,
    /// Enclosing scope (None for the file scope)
    pub parent: Option<ScopeId>,
    /// Scopes opened inside this one, in source order
    pub children: Vec<ScopeId>,
    /// Declarations made in this scope only
    pub variables: VariableTable,
    /// Method scopes only: private copies of the globals that were still
    /// uninitialized once the file scope had been processed
    pub shadow: Option<VariableTable>,
    /// Indices of the lines this scope governs
    pub range: Range<usize>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>, range: Range<usize>) -> Self {
        let shadow = matches!(kind, ScopeKind::Method { .. }).then(VariableTable::new);
        Self {
            kind,
            parent,
            children: Vec::new(),
            variables: VariableTable::new(),
            shadow,
            range,
        }
    }

    fn find(&self, name: &str) -> Option<Slot> {
        if self.variables.contains(name) {
            return Some(Slot::Local);
        }
        self.shadow
            .as_ref()
            .filter(|shadow| shadow.contains(name))
            .map(|_| Slot::Shadow)
    }
}

/// Scope tree for a source unit
///
/// Scopes own their declarations. Lookups walk parent links, and assignments
/// mutate the variable stored in whichever scope owns it, so an ancestor
/// initialized inside a block stays initialized after the block closes.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Arena<Scope>,
    root: ScopeId,
}

impl ScopeTree {
    /// Create a tree holding only a file scope over `range`
    pub fn new(range: Range<usize>) -> Self {
        let mut scopes = Arena::new();
        let root = scopes.alloc(Scope::new(ScopeKind::File, None, range));
        Self { scopes, root }
    }

    /// The file scope
    pub fn root(&self) -> ScopeId {
        self.root
    }

    /// Create a child scope
    pub fn alloc_child(&mut self, parent: ScopeId, kind: ScopeKind, range: Range<usize>) -> ScopeId {
        let child = self.scopes.alloc(Scope::new(kind, Some(parent), range));
        self.scopes[parent].children.push(child);
        child
    }

    /// Scope stored under `id`
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    /// Mutable [`scope`](Self::scope)
    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id]
    }

    /// All scopes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes.iter()
    }

    /// Number of scopes, the file scope included
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Never true; the file scope always exists
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Number of ancestors of `id`; the file scope has depth 0
    pub fn depth(&self, id: ScopeId) -> usize {
        self.ancestors(id).count() - 1
    }

    /// `id` followed by each enclosing scope up to the file scope
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        iter::successors(Some(id), move |current| self.scopes[*current].parent)
    }

    fn locate(&self, from: ScopeId, name: &str) -> Option<(ScopeId, Slot)> {
        self.ancestors(from)
            .find_map(|id| self.scopes[id].find(name).map(|slot| (id, slot)))
    }

    /// Resolve `name` as seen from `from`: local table, then the method's
    /// shadow copies, then the enclosing scopes
    pub fn resolve(&self, from: ScopeId, name: &str) -> Option<&Variable> {
        let (id, slot) = self.locate(from, name)?;
        let scope = &self.scopes[id];
        match slot {
            Slot::Local => scope.variables.lookup(name),
            Slot::Shadow => scope.shadow.as_ref()?.lookup(name),
        }
    }

    /// Like [`ScopeTree::resolve`], returning the owning scope's variable
    pub fn resolve_mut(&mut self, from: ScopeId, name: &str) -> Option<&mut Variable> {
        let (id, slot) = self.locate(from, name)?;
        let scope = &mut self.scopes[id];
        match slot {
            Slot::Local => scope.variables.lookup_mut(name),
            Slot::Shadow => scope.shadow.as_mut()?.lookup_mut(name),
        }
    }

    /// Every name visible from `from`, innermost first, duplicates included
    pub fn visible_names(&self, from: ScopeId) -> impl Iterator<Item = &str> {
        self.ancestors(from).flat_map(move |id| {
            let scope = &self.scopes[id];
            scope
                .variables
                .iter()
                .chain(scope.shadow.iter().flat_map(VariableTable::iter))
                .map(|var| var.name.as_str())
        })
    }

    /// The method scope enclosing `id`, if any
    pub fn enclosing_method(&self, id: ScopeId) -> Option<ScopeId> {
        self.ancestors(id)
            .find(|ancestor| matches!(self.scopes[*ancestor].kind, ScopeKind::Method { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sj_span::LineNumber;
    use sj_syntax::VarType;

    fn var(name: &str, ty: VarType, initialized: bool) -> Variable {
        Variable::declared(name, ty, false, initialized, LineNumber(1))
    }

    fn method_kind(name: &str) -> ScopeKind {
        ScopeKind::Method {
            name: name.to_owned(),
        }
    }

    fn block_kind() -> ScopeKind {
        ScopeKind::Block {
            kind: BlockKind::If,
            condition: "true".to_owned(),
        }
    }

    #[test]
    fn test_shadowing_prefers_innermost() {
        let mut tree = ScopeTree::new(0..10);
        let root = tree.root();
        let method = tree.alloc_child(root, method_kind("f"), 1..9);
        let block = tree.alloc_child(method, block_kind(), 2..5);

        tree.scope_mut(root).variables.declare(var("x", VarType::Int, true)).unwrap();
        tree.scope_mut(block).variables.declare(var("x", VarType::String, false)).unwrap();

        assert_eq!(tree.resolve(block, "x").map(|var| var.ty), Some(VarType::String));
        assert_eq!(tree.resolve(method, "x").map(|var| var.ty), Some(VarType::Int));
        assert!(tree.resolve(root, "y").is_none());
    }

    #[test]
    fn test_shadow_copies_come_before_globals() {
        let mut tree = ScopeTree::new(0..10);
        let root = tree.root();
        let first = tree.alloc_child(root, method_kind("first"), 1..4);
        let second = tree.alloc_child(root, method_kind("second"), 5..9);

        let global = var("g", VarType::Double, false);
        tree.scope_mut(root).variables.declare(global.clone()).unwrap();
        for method in [first, second] {
            if let Some(shadow) = tree.scope_mut(method).shadow.as_mut() {
                shadow.declare(global.clone()).unwrap();
            }
        }

        let block = tree.alloc_child(first, block_kind(), 2..3);
        if let Some(var) = tree.resolve_mut(block, "g") {
            var.is_initialized = true;
        }

        assert_eq!(tree.resolve(first, "g").map(|var| var.is_initialized), Some(true));
        assert_eq!(tree.resolve(second, "g").map(|var| var.is_initialized), Some(false));
        assert_eq!(tree.resolve(root, "g").map(|var| var.is_initialized), Some(false));
    }

    #[test]
    fn test_structure_queries() {
        let mut tree = ScopeTree::new(0..6);
        let root = tree.root();
        let method = tree.alloc_child(root, method_kind("f"), 1..5);
        let outer = tree.alloc_child(method, block_kind(), 2..4);
        let inner = tree.alloc_child(outer, block_kind(), 3..3);

        assert_eq!(tree.depth(root), 0);
        assert_eq!(tree.depth(inner), 3);
        assert_eq!(tree.scope(method).children, vec![outer]);
        assert_eq!(tree.scope(inner).parent, Some(outer));
        assert_eq!(tree.enclosing_method(inner), Some(method));
        assert_eq!(tree.enclosing_method(root), None);
        assert!(tree.scope(root).shadow.is_none());
        assert!(tree.scope(method).shadow.is_some());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_visible_names_walk_outward() {
        let mut tree = ScopeTree::new(0..4);
        let root = tree.root();
        let method = tree.alloc_child(root, method_kind("f"), 1..3);
        tree.scope_mut(root).variables.declare(var("outer", VarType::Int, true)).unwrap();
        tree.scope_mut(method).variables.declare(var("inner", VarType::Int, true)).unwrap();

        let names: Vec<&str> = tree.visible_names(method).collect();
        assert_eq!(names, vec!["inner", "outer"]);
    }
}
