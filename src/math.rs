use std::collections::BTreeSet;

/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition is a different view on an equivalence relation, by grouping elements of
/// type `I` into their respective classes under the relation. Elements that are not
/// mentioned in any class are implicitly in a class of their own.
#[derive(Debug, Clone)]
pub struct Partition<I: Ord>(Vec<BTreeSet<I>>);

impl<I: Ord> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Ord> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Ord> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Ord> Eq for Partition<I> {}

impl<I: Ord> Default for Partition<I> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<I: Ord + Clone> Partition<I> {
    /// Returns the size of the partition, i.e. the number of explicitly stored classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators
    /// which yield elements of type `I`.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .collect(),
        )
    }

    /// Returns the class that contains `element`, if it is part of any explicitly stored class.
    pub fn class_of(&self, element: &I) -> Option<&BTreeSet<I>> {
        self.0.iter().find(|class| class.contains(element))
    }

    /// Records that `left` and `right` are equivalent. If neither is part of an existing class,
    /// a new class is started. If exactly one of them is, the other one joins that class. If
    /// they are in two different classes, these classes are merged into one.
    pub fn join(&mut self, left: I, right: I) {
        let l = self.0.iter().position(|class| class.contains(&left));
        let r = self.0.iter().position(|class| class.contains(&right));
        match (l, r) {
            (None, None) => self.0.push(BTreeSet::from_iter([left, right])),
            (Some(i), None) => {
                self.0[i].insert(right);
            }
            (None, Some(j)) => {
                self.0[j].insert(left);
            }
            (Some(i), Some(j)) if i == j => {}
            (Some(i), Some(j)) => {
                let (keep, drop) = (i.min(j), i.max(j));
                let absorbed = self.0.remove(drop);
                self.0[keep].extend(absorbed);
            }
        }
    }
}
