//! Dense class identifiers for raw labels.

use std::collections::HashMap;
use std::hash::Hash;

/// Dense class identifier, `0..N`, in first-seen label order.
pub type ClassId = usize;

/// A point in the destination coordinate space, tagged with its class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Class of the point
    pub class: ClassId,
}

/// Immutable label → [`ClassId`] mapping.
///
/// Classes are numbered in the order their labels first appear. This is
/// the only place raw label identity is used; everything downstream works
/// on dense ids.
///
/// # Example
///
/// ```
/// use class_palette::ClassMap;
///
/// let classes = ClassMap::from_labels(["b", "a", "b", "c"]);
/// assert_eq!(classes.len(), 3);
/// assert_eq!(classes.id(&"b"), Some(0));
/// assert_eq!(classes.label(2), Some(&"c"));
/// ```
#[derive(Debug, Clone)]
pub struct ClassMap<L> {
    labels: Vec<L>,
    ids: HashMap<L, ClassId>,
}

impl<L: Eq + Hash + Clone> ClassMap<L> {
    /// Number labels in first-seen order.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
    {
        let mut map = Self {
            labels: Vec::new(),
            ids: HashMap::new(),
        };
        for label in labels {
            if !map.ids.contains_key(&label) {
                map.ids.insert(label.clone(), map.labels.len());
                map.labels.push(label);
            }
        }
        map
    }

    /// The class id of `label`.
    #[inline]
    pub fn id(&self, label: &L) -> Option<ClassId> {
        self.ids.get(label).copied()
    }

    /// The label of class `id`.
    #[inline]
    pub fn label(&self, id: ClassId) -> Option<&L> {
        self.labels.get(id)
    }

    /// Labels in class order.
    #[inline]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Number of classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if there are no classes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
