use std::fmt;

/// A set of raw byte values, one bit per symbol of the 256-symbol alphabet.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteSet {
    bits: [u64; 4],
}

impl ByteSet {
    pub const fn new() -> Self {
        Self { bits: [0; 4] }
    }

    /// Insert `byte`, returning `true` if it was not already present.
    pub fn insert(&mut self, byte: u8) -> bool {
        let (word, mask) = Self::slot(byte);
        let fresh = self.bits[word] & mask == 0;
        self.bits[word] |= mask;
        fresh
    }

    pub fn contains(&self, byte: u8) -> bool {
        let (word, mask) = Self::slot(byte);
        self.bits[word] & mask != 0
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&b| self.contains(b))
    }

    fn slot(byte: u8) -> (usize, u64) {
        ((byte >> 6) as usize, 1u64 << (byte & 63))
    }
}

impl FromIterator<u8> for ByteSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = ByteSet::new();
        for b in iter {
            set.insert(b);
        }
        set
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A node of a compiled pattern.
///
/// Every node exclusively owns its children, so a tree never aliases another
/// tree. Operations that need the same subtree twice deep-copy it with
/// `clone`. `Empty` and `Epsilon` carry no payload and never allocate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Matches no string.
    Empty,
    /// Matches only the zero-length string.
    Epsilon,
    Literal(u8),
    /// Matches one byte from a set of at least two members.
    Class(ByteSet),
    Alt(Box<Node>, Box<Node>),
    Concat(Box<Node>, Box<Node>),
    Star(Box<Node>),
}

impl Node {
    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Node::Empty | Node::Epsilon | Node::Literal(_) | Node::Class(_) => 1,
            Node::Alt(a, b) | Node::Concat(a, b) => 1 + a.size() + b.size(),
            Node::Star(a) => 1 + a.size(),
        }
    }
}

/// `a|b`, dropping an `Empty` side.
///
/// Payload-free variants are a single canonical value, so `ε|ε` collapses to
/// `ε` the same way an alternation of a node with itself would. Structurally
/// equal subtrees are otherwise kept apart.
pub fn alt(a: Node, b: Node) -> Node {
    match (a, b) {
        (Node::Empty, b) => b,
        (a, Node::Empty) => a,
        (Node::Epsilon, Node::Epsilon) => Node::Epsilon,
        (a, b) => Node::Alt(Box::new(a), Box::new(b)),
    }
}

/// `ab`. `Empty` absorbs, `Epsilon` is the identity.
pub fn concat(a: Node, b: Node) -> Node {
    match (a, b) {
        (Node::Empty, _) | (_, Node::Empty) => Node::Empty,
        (Node::Epsilon, b) => b,
        (a, Node::Epsilon) => a,
        (a, b) => Node::Concat(Box::new(a), Box::new(b)),
    }
}

/// `a*`, with `∅* = ε* = ε` and `(a*)* = a*`.
pub fn star(a: Node) -> Node {
    match a {
        Node::Empty | Node::Epsilon => Node::Epsilon,
        Node::Star(_) => a,
        a => Node::Star(Box::new(a)),
    }
}

/// A class over `set`: no members is `Empty`, one member is a `Literal`.
pub fn class_from_set(set: ByteSet) -> Node {
    let mut members = set.iter();
    match (members.next(), members.next()) {
        (None, _) => Node::Empty,
        (Some(b), None) => Node::Literal(b),
        _ => Node::Class(set),
    }
}

fn write_byte(f: &mut fmt::Formatter<'_>, b: u8, special: &[u8]) -> fmt::Result {
    if special.contains(&b) {
        write!(f, "\\{}", b as char)
    } else if b.is_ascii() {
        write!(f, "{}", b as char)
    } else {
        write!(f, "\\x{b:02x}")
    }
}

// Renders in the accepted pattern syntax. ASCII-only trees reparse to the
// same language; other bytes are shown as `\xNN` for diagnostics only.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Empty => write!(f, "[]"),
            Node::Epsilon => write!(f, "()"),
            Node::Literal(b) => write_byte(f, *b, b"\\|()*["),
            Node::Class(set) => {
                write!(f, "[")?;
                for b in set.iter() {
                    write_byte(f, b, b"\\]")?;
                }
                write!(f, "]")
            }
            Node::Alt(a, b) => write!(f, "({a}|{b})"),
            Node::Concat(a, b) => write!(f, "{a}{b}"),
            Node::Star(a) => match **a {
                Node::Literal(_) | Node::Class(_) | Node::Alt(..) => write!(f, "{a}*"),
                _ => write!(f, "({a})*"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(b: u8) -> Node {
        Node::Literal(b)
    }

    #[test]
    fn alt_drops_empty_side() {
        assert_eq!(alt(Node::Empty, lit(b'a')), lit(b'a'));
        assert_eq!(alt(lit(b'a'), Node::Empty), lit(b'a'));
        assert_eq!(alt(Node::Epsilon, Node::Epsilon), Node::Epsilon);
    }

    #[test]
    fn alt_keeps_structurally_equal_operands() {
        let node = alt(lit(b'a'), lit(b'a'));
        assert_eq!(node, Node::Alt(Box::new(lit(b'a')), Box::new(lit(b'a'))));
    }

    #[test]
    fn concat_absorbs_and_identity() {
        assert_eq!(concat(Node::Empty, lit(b'a')), Node::Empty);
        assert_eq!(concat(star(lit(b'a')), Node::Empty), Node::Empty);
        assert_eq!(concat(Node::Epsilon, lit(b'a')), lit(b'a'));
        assert_eq!(concat(lit(b'a'), Node::Epsilon), lit(b'a'));
    }

    #[test]
    fn star_simplifies() {
        assert_eq!(star(Node::Empty), Node::Epsilon);
        assert_eq!(star(Node::Epsilon), Node::Epsilon);
        let once = star(lit(b'a'));
        assert_eq!(star(once.clone()), once);
    }

    #[test]
    fn class_canonical_forms() {
        assert_eq!(class_from_set(ByteSet::new()), Node::Empty);
        assert_eq!(class_from_set([b'x'].into_iter().collect()), lit(b'x'));
        let set: ByteSet = b"abc".iter().copied().collect();
        assert_eq!(class_from_set(set), Node::Class(set));
    }

    #[test]
    fn byte_set_membership() {
        let mut set = ByteSet::new();
        assert!(set.is_empty());
        assert!(set.insert(0));
        assert!(set.insert(255));
        assert!(!set.insert(255));
        assert!(set.contains(0) && set.contains(255) && !set.contains(64));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 255]);
    }

    #[test]
    fn display_escapes_metacharacters() {
        let node = concat(lit(b'*'), star(alt(lit(b'a'), lit(b'|'))));
        assert_eq!(node.to_string(), r"\*(a|\|)*");
        let set: ByteSet = b"]a\\".iter().copied().collect();
        assert_eq!(Node::Class(set).to_string(), r"[\\\]a]");
        assert_eq!(Node::Empty.to_string(), "[]");
    }

    #[test]
    fn size_counts_nodes() {
        assert_eq!(Node::Epsilon.size(), 1);
        assert_eq!(concat(lit(b'a'), star(lit(b'b'))).size(), 4);
    }
}
