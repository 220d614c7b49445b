//! Replaying a column's values against a template shape.

use crate::types::Value;

use super::shape::AxisShape;
use super::structure::Structure;

/// Flatten `structure` into exactly `template.row_count()` values laid out along `template`.
///
/// Where the column iterates the same axes as the template it contributes its own values row
/// for row. Where it has no axis of its own, its last seen leaf value is replayed across the
/// template's elements. Elements the column lacks are filled by replay, or `Null` when nothing
/// was seen yet.
pub fn broadcast(structure: &Structure, template: &AxisShape) -> Vec<Value> {
    let mut out = Vec::with_capacity(template.row_count());
    broadcast_into(Some(structure), template, None, &mut out);
    out
}

fn broadcast_into(
    structure: Option<&Structure>,
    template: &AxisShape,
    replay: Option<&Value>,
    out: &mut Vec<Value>,
) {
    match template {
        AxisShape::NoAxis => out.push(structure.and_then(Structure::value).cloned().unwrap_or(Value::Null)),
        AxisShape::Count(n) => {
            for i in 0..*n {
                let v = match structure {
                    Some(Structure::Sequence(items)) => items.get(i).and_then(Structure::value),
                    Some(Structure::Leaf(v)) => v.as_ref(),
                    None => replay,
                };
                out.push(v.cloned().unwrap_or(Value::Null));
            }
        }
        AxisShape::Axes(shapes) => {
            // Carried across siblings: a missing element replays the previous sibling's leaf.
            let mut replay = replay;
            for (i, shape) in shapes.iter().enumerate() {
                let child = match structure {
                    Some(Structure::Leaf(v)) => {
                        replay = v.as_ref();
                        None
                    }
                    Some(Structure::Sequence(items)) => {
                        let child = items.get(i);
                        if let Some(Structure::Leaf(v)) = child {
                            replay = v.as_ref();
                        }
                        child
                    }
                    None => None,
                };
                broadcast_into(child, shape, replay, out);
            }
        }
    }
}
