//! Axis shapes: how many elements a column iterates at each axis, ignoring values.

use super::structure::Structure;

/// Element counts of a [`Structure`], per axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisShape {
    /// No axis below this point; iteration counts must come from another column.
    NoAxis,
    /// Exactly N leaves and no deeper axis.
    Count(usize),
    /// One shape per element. Sibling shapes may differ (ragged arrays).
    Axes(Vec<AxisShape>),
}

impl AxisShape {
    /// Extract the shape of `structure`.
    ///
    /// A sequence collapses to [`AxisShape::Count`] only when every element is a leaf; as soon as
    /// one element is itself a sequence the full per-element detail is kept, so deeper
    /// mismatches stay detectable.
    pub fn of(structure: &Structure) -> Self {
        match structure {
            Structure::Leaf(_) => Self::NoAxis,
            Structure::Sequence(items) if items.iter().all(Structure::is_leaf) => Self::Count(items.len()),
            Structure::Sequence(items) => Self::Axes(items.iter().map(Self::of).collect()),
        }
    }

    pub fn is_no_axis(&self) -> bool {
        matches!(self, Self::NoAxis)
    }

    /// Number of flat rows this shape produces when used as a broadcast template.
    pub fn row_count(&self) -> usize {
        match self {
            Self::NoAxis => 1,
            Self::Count(n) => *n,
            Self::Axes(items) => items.iter().map(Self::row_count).sum(),
        }
    }
}

/// Where and how two shapes disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// Concrete element index taken at each axis above the offending one. The offending axis is
    /// at depth `axis_indices.len()`.
    pub axis_indices: Vec<usize>,
    pub left_count: usize,
    pub right_count: usize,
}

/// Compare two shapes for broadcast dominance.
///
/// Returns `Ok(true)` when `left` should serve as the template over `right`, `Ok(false)` when
/// `right` dominates or the two tie, and `Err` when they disagree on an element count at a shared
/// depth. [`AxisShape::NoAxis`] never conflicts with anything; it always loses.
pub fn compare(left: &AxisShape, right: &AxisShape) -> Result<bool, ShapeMismatch> {
    let mut path = Vec::new();
    compare_at(left, right, &mut path)
}

fn compare_at(left: &AxisShape, right: &AxisShape, path: &mut Vec<usize>) -> Result<bool, ShapeMismatch> {
    match (left, right) {
        (AxisShape::NoAxis, _) => Ok(false),
        (_, AxisShape::NoAxis) => Ok(true),
        (AxisShape::Count(l), AxisShape::Count(r)) => check_counts(*l, *r, path).map(|()| false),
        (AxisShape::Count(l), AxisShape::Axes(r)) => check_counts(*l, r.len(), path).map(|()| false),
        (AxisShape::Axes(l), AxisShape::Count(r)) => check_counts(l.len(), *r, path).map(|()| true),
        (AxisShape::Axes(l), AxisShape::Axes(r)) => {
            check_counts(l.len(), r.len(), path)?;
            for (i, (ls, rs)) in l.iter().zip(r).enumerate() {
                path.push(i);
                if compare_at(ls, rs, path)? {
                    return Ok(true);
                }
                path.pop();
            }
            Ok(false)
        }
    }
}

fn check_counts(left: usize, right: usize, path: &[usize]) -> Result<(), ShapeMismatch> {
    if left == right {
        return Ok(());
    }
    Err(ShapeMismatch {
        axis_indices: path.to_vec(),
        left_count: left,
        right_count: right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;
    use AxisShape::{Axes, Count, NoAxis};

    fn counts(ns: &[usize]) -> AxisShape {
        Axes(ns.iter().map(|n| Count(*n)).collect())
    }

    #[test]
    fn shape_of_leaf_and_flat_sequence() {
        assert_eq!(AxisShape::of(&Structure::Leaf(None)), NoAxis);
        let flat = Structure::Sequence(vec![Structure::Leaf(Some(Value::Int64(1))), Structure::Leaf(None)]);
        assert_eq!(AxisShape::of(&flat), Count(2));
        assert_eq!(AxisShape::of(&Structure::Sequence(vec![])), Count(0));
    }

    #[test]
    fn shape_keeps_detail_when_any_element_nests() {
        let s = Structure::Sequence(vec![
            Structure::Sequence(vec![Structure::Leaf(None); 3]),
            Structure::Leaf(None),
        ]);
        assert_eq!(AxisShape::of(&s), Axes(vec![Count(3), NoAxis]));
    }

    #[test]
    fn row_count_sums_leaf_counts() {
        assert_eq!(NoAxis.row_count(), 1);
        assert_eq!(counts(&[3, 3, 2]).row_count(), 8);
    }

    #[test]
    fn no_axis_always_loses() {
        assert_eq!(compare(&Count(3), &NoAxis), Ok(true));
        assert_eq!(compare(&NoAxis, &Count(3)), Ok(false));
        assert_eq!(compare(&NoAxis, &NoAxis), Ok(false));
    }

    #[test]
    fn richer_side_wins_on_equal_counts() {
        assert_eq!(compare(&counts(&[3, 3, 2]), &Count(3)), Ok(true));
        assert_eq!(compare(&Count(3), &counts(&[3, 3, 2])), Ok(false));
        assert_eq!(compare(&counts(&[3, 3, 2]), &counts(&[3, 3, 2])), Ok(false));
    }

    #[test]
    fn count_mismatch_at_top_level() {
        let err = compare(&Count(2), &Count(3)).unwrap_err();
        assert_eq!(err, ShapeMismatch { axis_indices: vec![], left_count: 2, right_count: 3 });

        let err = compare(&Count(2), &counts(&[3, 4, 5])).unwrap_err();
        assert_eq!((err.left_count, err.right_count, err.axis_indices.len()), (2, 3, 0));
    }

    #[test]
    fn nested_mismatch_records_indices() {
        let err = compare(&counts(&[2, 3]), &counts(&[2, 4])).unwrap_err();
        assert_eq!(err, ShapeMismatch { axis_indices: vec![1], left_count: 3, right_count: 4 });

        let left = Axes(vec![counts(&[1, 2]), Axes(vec![]), counts(&[2, 10])]);
        let right = Axes(vec![counts(&[1, 2]), Axes(vec![]), counts(&[2, 11])]);
        let err = compare(&left, &right).unwrap_err();
        assert_eq!(err, ShapeMismatch { axis_indices: vec![2, 1], left_count: 10, right_count: 11 });
    }

    #[test]
    fn mismatch_is_symmetric() {
        let a = counts(&[3]);
        let b = Axes(vec![counts(&[2, 3])]);
        let ab = compare(&a, &b).unwrap_err();
        let ba = compare(&b, &a).unwrap_err();
        assert_eq!(ab.axis_indices, ba.axis_indices);
        assert_eq!((ab.left_count, ab.right_count), (ba.right_count, ba.left_count));
    }

    #[test]
    fn first_richer_element_short_circuits() {
        let left = Axes(vec![counts(&[2]), Count(1)]);
        let right = Axes(vec![Count(1), Count(5)]);
        // The second element would mismatch, but the first already shows `left` is richer.
        assert_eq!(compare(&left, &right), Ok(true));
    }
}
