//! Prefix tree of multi-character symbols
//!
//! Nodes live in an arena owned by [`SymbolTrie`]; children and the parent
//! back-reference are arena indices, so the tree has no ownership cycles.
//! Matching is greedy with backtracking: the longest registered symbol that is
//! a prefix of the remaining input wins.

use std::collections::BTreeMap;

use super::scanner::Scanner;
use super::token::{Token, TokenKind};

/// Index of a node in the trie arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One character of one or more registered symbols
#[derive(Debug, Clone)]
pub struct SymbolNode {
    character: Option<char>,
    parent: Option<NodeId>,
    children: BTreeMap<char, NodeId>,
    valid: bool,
    kind: TokenKind,
}

impl SymbolNode {
    fn new(character: Option<char>, parent: Option<NodeId>) -> Self {
        SymbolNode {
            character,
            parent,
            children: BTreeMap::new(),
            valid: false,
            kind: TokenKind::Symbol,
        }
    }

    /// Character this node stands for; `None` for the root
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// Parent node; `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True if the path from the root to this node is a registered symbol
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Token kind reported for the symbol ending here
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Registered symbols, matched longest-first
#[derive(Debug, Clone)]
pub struct SymbolTrie {
    nodes: Vec<SymbolNode>,
    symbol_count: usize,
}

impl SymbolTrie {
    const ROOT: NodeId = NodeId(0);

    /// Creates a trie with no registered symbols
    pub fn new() -> Self {
        SymbolTrie {
            nodes: vec![SymbolNode::new(None, None)],
            symbol_count: 0,
        }
    }

    /// Registers `text` as a symbol reported with `kind`. Registering the
    /// same text again only updates its kind. Empty text is ignored.
    pub fn add(&mut self, text: &str, kind: TokenKind) {
        if text.is_empty() {
            return;
        }

        let mut node = Self::ROOT;
        for c in text.chars() {
            node = match self.child(node, c) {
                Some(child) => child,
                None => {
                    let id = NodeId(self.nodes.len());
                    self.nodes.push(SymbolNode::new(Some(c), Some(node)));
                    self.nodes[node.0].children.insert(c, id);
                    id
                }
            };
        }

        let terminal = &mut self.nodes[node.0];
        if !terminal.valid {
            terminal.valid = true;
            self.symbol_count += 1;
        }
        terminal.kind = kind;
    }

    /// Returns true if `text` is a registered symbol
    pub fn contains(&self, text: &str) -> bool {
        self.find(text)
            .map(|id| self.nodes[id.0].valid)
            .unwrap_or(false)
    }

    /// Number of registered symbols
    pub fn len(&self) -> usize {
        self.symbol_count
    }

    /// Returns true if no symbol is registered
    pub fn is_empty(&self) -> bool {
        self.symbol_count == 0
    }

    /// The root node, which never stands for a symbol
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// Node by id
    pub fn node(&self, id: NodeId) -> &SymbolNode {
        &self.nodes[id.0]
    }

    /// Child of `id` for character `c`
    pub fn child(&self, id: NodeId, c: char) -> Option<NodeId> {
        self.nodes[id.0].children.get(&c).copied()
    }

    /// Reads the longest registered symbol at the cursor, or a single
    /// character symbol when nothing longer matches
    pub fn next_token(&self, scanner: &mut Scanner) -> Token {
        let line = scanner.peek_line();
        let column = scanner.peek_column();

        let Some(c) = scanner.read() else {
            return Token::eof(line, column);
        };
        let Some(first) = self.child(Self::ROOT, c) else {
            return Token::new(TokenKind::Symbol, c.to_string(), line, column);
        };

        let deepest = self.deepest_read(first, scanner);
        let node = self.unread_to_valid(deepest, scanner);

        let kind = if self.nodes[node.0].valid {
            self.nodes[node.0].kind
        } else {
            TokenKind::Symbol
        };
        Token::new(kind, self.path(node), line, column)
    }

    /// Follows matching children as far as the input allows. The first
    /// character without a matching child is unread.
    fn deepest_read(&self, mut node: NodeId, scanner: &mut Scanner) -> NodeId {
        loop {
            match scanner.read().and_then(|c| self.child(node, c)) {
                Some(child) => node = child,
                None => {
                    scanner.unread();
                    return node;
                }
            }
        }
    }

    /// Walks back toward the root, unreading one character per step, until a
    /// valid node. A depth-one node is always accepted: its character was read
    /// and stands alone as a symbol.
    fn unread_to_valid(&self, mut node: NodeId, scanner: &mut Scanner) -> NodeId {
        let mut steps = 0;
        while !self.nodes[node.0].valid {
            match self.nodes[node.0].parent {
                Some(parent) if parent != Self::ROOT => {
                    scanner.unread();
                    node = parent;
                    steps += 1;
                }
                _ => break,
            }
        }
        if steps > 0 {
            tracing::trace!(steps, symbol = %self.path(node), "symbol backtracked");
        }
        node
    }

    fn find(&self, text: &str) -> Option<NodeId> {
        let mut node = Self::ROOT;
        for c in text.chars() {
            node = self.child(node, c)?;
        }
        Some(node)
    }

    fn path(&self, mut node: NodeId) -> String {
        let mut chars = Vec::new();
        while let Some(c) = self.nodes[node.0].character {
            chars.push(c);
            match self.nodes[node.0].parent {
                Some(parent) => node = parent,
                None => break,
            }
        }
        chars.iter().rev().collect()
    }
}

impl Default for SymbolTrie {
    fn default() -> Self {
        Self::new()
    }
}
