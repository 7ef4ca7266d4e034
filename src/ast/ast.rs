use std::fmt::Display;

/// Node Types
///
/// The kinds of node an expression tree is built from.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NodeType {
    Number,
    If,
    Or,
    And,
    Cmp,
    Sum,
    Product,
    Expt,
}

/// An expression tree.
///
/// Every non-leaf variant exclusively owns its children, so dropping a node
/// releases its whole subtree.
#[derive(Debug)]
pub enum Node {
    /// A numeric literal, kept as its source text.
    Number(String),
    /// `if cond then then else otherwise`.
    If {
        cond: Box<Node>,
        then: Box<Node>,
        otherwise: Box<Node>,
    },
    /// `left or right`
    Or(Box<Node>, Box<Node>),
    /// `left and right`
    And(Box<Node>, Box<Node>),
    /// `left > right`
    Cmp(Box<Node>, Box<Node>),
    /// `left + right`
    Sum(Box<Node>, Box<Node>),
    /// `left * right`
    Product(Box<Node>, Box<Node>),
    /// `base ^ exponent`
    Expt(Box<Node>, Box<Node>),
}

impl Node {
    pub fn number(text: impl Into<String>) -> Self {
        Node::Number(text.into())
    }

    pub fn if_else(cond: Node, then: Node, otherwise: Node) -> Self {
        Node::If {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn or(left: Node, right: Node) -> Self {
        Node::Or(Box::new(left), Box::new(right))
    }

    pub fn and(left: Node, right: Node) -> Self {
        Node::And(Box::new(left), Box::new(right))
    }

    pub fn cmp(left: Node, right: Node) -> Self {
        Node::Cmp(Box::new(left), Box::new(right))
    }

    pub fn sum(left: Node, right: Node) -> Self {
        Node::Sum(Box::new(left), Box::new(right))
    }

    pub fn product(left: Node, right: Node) -> Self {
        Node::Product(Box::new(left), Box::new(right))
    }

    pub fn expt(base: Node, exponent: Node) -> Self {
        Node::Expt(Box::new(base), Box::new(exponent))
    }

    pub fn get_node_type(&self) -> NodeType {
        match self {
            Node::Number(_) => NodeType::Number,
            Node::If { .. } => NodeType::If,
            Node::Or(..) => NodeType::Or,
            Node::And(..) => NodeType::And,
            Node::Cmp(..) => NodeType::Cmp,
            Node::Sum(..) => NodeType::Sum,
            Node::Product(..) => NodeType::Product,
            Node::Expt(..) => NodeType::Expt,
        }
    }

    /// The direct children of this node, left to right.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Number(_) => vec![],
            Node::If {
                cond,
                then,
                otherwise,
            } => vec![&**cond, &**then, &**otherwise],
            Node::Or(left, right)
            | Node::And(left, right)
            | Node::Cmp(left, right)
            | Node::Sum(left, right)
            | Node::Product(left, right)
            | Node::Expt(left, right) => vec![&**left, &**right],
        }
    }

    /// The number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children());
        }

        count
    }

    /// The head of this node's s-expression; empty for a number.
    fn operator(&self) -> &'static str {
        match self {
            Node::Number(_) => "",
            Node::If { .. } => "if",
            Node::Or(..) => "or",
            Node::And(..) => "and",
            Node::Cmp(..) => ">",
            Node::Sum(..) => "+",
            Node::Product(..) => "*",
            Node::Expt(..) => "^",
        }
    }

    /// Moves the children out of `self`, leaving empty leaves behind.
    fn take_children(&mut self, out: &mut Vec<Node>) {
        let mut take = |child: &mut Box<Node>| {
            out.push(std::mem::replace(&mut **child, Node::Number(String::new())));
        };

        match self {
            Node::Number(_) => {}
            Node::If {
                cond,
                then,
                otherwise,
            } => {
                take(cond);
                take(then);
                take(otherwise);
            }
            Node::Or(left, right)
            | Node::And(left, right)
            | Node::Cmp(left, right)
            | Node::Sum(left, right)
            | Node::Product(left, right)
            | Node::Expt(left, right) => {
                take(left);
                take(right);
            }
        }
    }
}

// Long `+`/`*`/`and`/`or` chains fold into left-deep trees whose depth is not
// bounded by the parser's nesting limit, so subtrees are released iteratively.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);

        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

// Equality and rendering walk the tree with an explicit stack, like `Drop`.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            match (left, right) {
                (Node::Number(a), Node::Number(b)) if a != b => return false,
                _ if left.get_node_type() != right.get_node_type() => return false,
                _ => pending.extend(left.children().into_iter().zip(right.children())),
            }
        }

        true
    }
}

impl Eq for Node {}

enum Piece<'a> {
    Node(&'a Node),
    Text(&'static str),
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![Piece::Node(self)];

        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Node(Node::Number(text)) => f.write_str(text)?,
                Piece::Node(node) => {
                    f.write_str("(")?;
                    f.write_str(node.operator())?;

                    pending.push(Piece::Text(")"));
                    for child in node.children().into_iter().rev() {
                        pending.push(Piece::Node(child));
                        pending.push(Piece::Text(" "));
                    }
                }
            }
        }

        Ok(())
    }
}
