//! Shape-preserving extraction results.

use crate::types::Value;

/// What a path expression resolved to, before any cross-column alignment.
///
/// Every wildcard in the path becomes one [`Structure::Sequence`] level; every path end becomes a
/// [`Structure::Leaf`].
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    /// A resolved path end. `None` means the path did not exist in the document, which is
    /// distinct from a present [`Value::Null`] or an empty string.
    Leaf(Option<Value>),
    /// One element per item iterated by a wildcard.
    Sequence(Vec<Structure>),
}

impl Structure {
    /// Leaf value, if this is a leaf holding a present value.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Leaf(v) => v.as_ref(),
            Self::Sequence(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Reduce to this column's own values, ignoring every other column.
    ///
    /// A leaf yields its value (absent becomes [`Value::Null`]). A sequence yields a flat
    /// [`Value::Sequence`] of all leaves below it, in document order.
    pub fn individual_values(&self) -> Value {
        match self {
            Self::Leaf(v) => v.clone().unwrap_or(Value::Null),
            Self::Sequence(_) => {
                let mut out = Vec::new();
                self.collect_leaves(&mut out);
                Value::Sequence(out)
            }
        }
    }

    fn collect_leaves(&self, out: &mut Vec<Value>) {
        match self {
            Self::Leaf(v) => out.push(v.clone().unwrap_or(Value::Null)),
            Self::Sequence(items) => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
        }
    }
}
