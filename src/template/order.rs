//! Position/order annotations.
//!
//! Nodes created by the style and script upserts are tagged with
//! `data-position` and `data-order` so the final sort pass can reconcile
//! several independent upsert calls. The annotation never survives
//! serialization: [`strip`] removes it from the whole tree first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dom::Element;

pub const ORDER_ATTR: &str = "data-order";
pub const POSITION_ATTR: &str = "data-position";

/// Which boundary of the container a node is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Beginning,
    End,
}

impl Position {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginning => "beginning",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginning" => Ok(Self::Beginning),
            "end" => Ok(Self::End),
            _ => Err(()),
        }
    }
}

/// The ephemeral annotation carried by positioned nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub position: Position,
    pub order: i64,
}

impl SortKey {
    pub const fn new(position: Position, order: i64) -> Self {
        Self { position, order }
    }

    /// Write the annotation onto `elem`.
    pub fn write(self, elem: &mut Element) {
        elem.set_attr(ORDER_ATTR, self.order.to_string());
        elem.set_attr(POSITION_ATTR, self.position.as_str());
    }

    /// Read the annotation of a node eligible for reordering.
    ///
    /// Eligible means it carries `id`, `data-order` and `data-position`, and
    /// the position is one of the known values. The order is the leading
    /// integer of the value (`"2px"` is 2, `"1.5"` is 1); no leading integer
    /// counts as 0.
    pub fn read(elem: &Element) -> Option<Self> {
        if !elem.has_attr("id") {
            return None;
        }
        let order = elem.get_attr(ORDER_ATTR)?;
        let position = elem.get_attr(POSITION_ATTR)?.parse().ok()?;
        Some(Self {
            position,
            order: leading_int(order),
        })
    }
}

/// Optional sign followed by decimal digits, after leading whitespace.
fn leading_int(value: &str) -> i64 {
    let value = value.trim_start();
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

/// Remove the annotation from `root` and every descendant element.
pub fn strip(root: &mut Element) {
    root.walk_mut(&mut |elem| {
        elem.attrs.remove(ORDER_ATTR);
        elem.attrs.remove(POSITION_ATTR);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Attrs, Node};

    #[test]
    fn test_read_requires_all_three() {
        let full = Element::with_attrs(
            "script",
            Attrs::from([("id", "a"), ("data-order", "3"), ("data-position", "end")]),
        );
        assert_eq!(SortKey::read(&full), Some(SortKey::new(Position::End, 3)));

        let no_id = Element::with_attrs(
            "script",
            Attrs::from([("data-order", "3"), ("data-position", "end")]),
        );
        assert_eq!(SortKey::read(&no_id), None);

        let bad_position = Element::with_attrs(
            "script",
            Attrs::from([("id", "a"), ("data-order", "3"), ("data-position", "middle")]),
        );
        assert_eq!(SortKey::read(&bad_position), None);
    }

    #[test]
    fn test_unparsable_order_is_zero() {
        let elem = Element::with_attrs(
            "style",
            Attrs::from([("id", "a"), ("data-order", "undefined"), ("data-position", "beginning")]),
        );
        assert_eq!(SortKey::read(&elem), Some(SortKey::new(Position::Beginning, 0)));
    }

    #[test]
    fn test_order_uses_leading_integer() {
        assert_eq!(leading_int("2px"), 2);
        assert_eq!(leading_int("1.5"), 1);
        assert_eq!(leading_int(" -3 "), -3);
        assert_eq!(leading_int("+7"), 7);
        assert_eq!(leading_int("px2"), 0);
        assert_eq!(leading_int(""), 0);

        let elem = Element::with_attrs(
            "script",
            Attrs::from([("id", "a"), ("data-order", "2px"), ("data-position", "end")]),
        );
        assert_eq!(SortKey::read(&elem), Some(SortKey::new(Position::End, 2)));
    }

    #[test]
    fn test_strip_is_recursive() {
        let mut outer = Element::with_attrs("div", Attrs::from([("data-order", "1")]));
        let inner = Element::with_attrs(
            "span",
            Attrs::from([("class", "x"), ("data-position", "end")]),
        );
        outer.push(inner);

        strip(&mut outer);

        assert!(outer.attrs.is_empty());
        let Node::Element(inner) = &outer.children[0] else {
            panic!("expected element");
        };
        assert_eq!(inner.attrs.names(), vec!["class"]);
    }

    #[test]
    fn test_position_serde() {
        let p: Position = serde_json::from_str("\"beginning\"").unwrap();
        assert_eq!(p, Position::Beginning);
        assert_eq!(serde_json::to_string(&Position::End).unwrap(), "\"end\"");
    }
}
