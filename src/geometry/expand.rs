//! Expanding a fragment back into tabs and areas

use crate::parser::{Direction, Fragment, Node};

use super::data::AlgebraData;
use super::error::GeometryError;
use super::tabs::TabId;

impl Fragment {
    /// Lay this fragment out inside the outer boundary of a fresh
    /// [`AlgebraData`]
    ///
    /// Rows keep their top and bottom tabs and get a new vertical tab between
    /// neighbouring children; columns do the same with horizontal tabs.
    pub fn to_algebra_data(&self) -> Result<AlgebraData, GeometryError> {
        let mut data = AlgebraData::new();
        let frame = [data.left(), data.top(), data.right(), data.bottom()];

        let mut stack: Vec<(&Fragment, [TabId; 4])> = vec![(self, frame)];
        while let Some((fragment, [left, top, right, bottom])) = stack.pop() {
            let n = fragment.children.len();
            let mut cuts = Vec::with_capacity(n + 1);
            match fragment.direction {
                Direction::Row => {
                    cuts.push(left);
                    cuts.extend((1..n).map(|_| data.add_x_tab()));
                    cuts.push(right);
                }
                Direction::Column => {
                    cuts.push(top);
                    cuts.extend((1..n).map(|_| data.add_y_tab()));
                    cuts.push(bottom);
                }
            }

            for (k, child) in fragment.children.iter().enumerate() {
                let cell = match fragment.direction {
                    Direction::Row => [cuts[k], top, cuts[k + 1], bottom],
                    Direction::Column => [left, cuts[k], right, cuts[k + 1]],
                };
                match &child.node {
                    Node::Area(id) => {
                        let [l, t, r, b] = cell;
                        data.add_area(id.clone(), l, t, r, b)?;
                    }
                    Node::Fragment(inner) => stack.push((inner, cell)),
                }
            }
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::GeometryError;
    use crate::parser::parse_fragment;

    #[test]
    fn test_row_expansion() {
        let data = parse_fragment("A | B | C").unwrap().to_algebra_data().unwrap();
        assert_eq!(data.areas().len(), 3);
        assert_eq!(data.tabs().len(), 6);

        let (a, b, c) = (
            data.area("A").unwrap(),
            data.area("B").unwrap(),
            data.area("C").unwrap(),
        );
        assert_eq!(a.left, data.left());
        assert_eq!(a.right, b.left);
        assert_eq!(b.right, c.left);
        assert_eq!(c.right, data.right());
        assert!([a, b, c].iter().all(|x| x.top == data.top() && x.bottom == data.bottom()));
    }

    #[test]
    fn test_nested_expansion() {
        let data = parse_fragment("A / (B | C)").unwrap().to_algebra_data().unwrap();
        let (a, b, c) = (
            data.area("A").unwrap(),
            data.area("B").unwrap(),
            data.area("C").unwrap(),
        );
        assert_eq!(a.bottom, b.top);
        assert_eq!(b.top, c.top);
        assert_eq!(b.right, c.left);
        assert_eq!(c.bottom, data.bottom());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = parse_fragment("A | A").unwrap().to_algebra_data().unwrap_err();
        assert_eq!(err, GeometryError::DuplicateArea("A".to_string()));
    }
}
