//! Presentation order of the questions in a quiz.

use alloc::vec::Vec;
use core::fmt::{self, Display};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

/// A permutation where `order[display]` is the original index of the question shown at
/// position `display`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Order(Vec<usize>);

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The indices are not a permutation of `0..n`.
    NotPermutation,
    /// The number of items does not match the number of positions.
    Length { expected: usize, found: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPermutation => f.write_str("Question order is not a permutation."),
            Self::Length { expected, found } => write!(f, "Expected {expected} answers but found {found}."),
        }
    }
}

impl TryFrom<Vec<usize>> for Order {
    type Error = Error;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        let mut seen = alloc::vec![false; indices.len()];
        for &index in &indices {
            let slot = seen.get_mut(index).ok_or(Error::NotPermutation)?;
            if core::mem::replace(slot, true) {
                return Err(Error::NotPermutation);
            }
        }
        Ok(Self(indices))
    }
}

impl From<Order> for Vec<usize> {
    fn from(Order(indices): Order) -> Self {
        indices
    }
}

impl Order {
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Fisher-Yates shuffle of `0..len`.
    pub fn shuffled<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut order = Self::identity(len);
        order.0.shuffle(rng);
        order
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Arranges the items in presentation order.
    pub fn present<'a, T>(&self, items: &'a [T]) -> Result<Vec<&'a T>, Error> {
        if items.len() != self.len() {
            return Err(Error::Length { expected: self.len(), found: items.len() });
        }
        Ok(self.0.iter().map(|&original| &items[original]).collect())
    }

    /// Undoes [`present`](Self::present): the item at display position `d` is moved back to its
    /// original position `order[d]`.
    pub fn restore<T>(&self, items: Vec<T>) -> Result<Vec<T>, Error> {
        if items.len() != self.len() {
            return Err(Error::Length { expected: self.len(), found: items.len() });
        }

        let mut slots: Vec<Option<T>> = items.iter().map(|_| None).collect();
        for (&original, item) in self.0.iter().zip(items) {
            slots[original] = Some(item);
        }

        // Every slot is filled exactly once since the order is a permutation.
        Ok(slots.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn rejects_non_permutations() {
        assert_eq!(Order::try_from(vec![0, 0]), Err(Error::NotPermutation));
        assert_eq!(Order::try_from(vec![0, 2]), Err(Error::NotPermutation));
        assert!(Order::try_from(vec![2, 0, 1]).is_ok());
        assert!(Order::try_from(Vec::new()).is_ok());
    }

    #[test]
    fn restore_inverts_present() {
        let mut rng = StdRng::seed_from_u64(3);
        let items: Vec<u32> = (0..20).collect();
        for _ in 0..50 {
            let order = Order::shuffled(items.len(), &mut rng);
            let shown: Vec<u32> = order.present(&items).unwrap().into_iter().copied().collect();
            assert_eq!(order.restore(shown).unwrap(), items);
        }
    }

    #[test]
    fn restore_moves_answers_back() {
        let order = Order::try_from(vec![2, 0, 1]).unwrap();
        assert_eq!(order.present(&["a", "b", "c"]).unwrap(), [&"c", &"a", &"b"]);
        assert_eq!(order.restore(vec!["C", "A", "B"]).unwrap(), ["A", "B", "C"]);
        assert_eq!(order.restore(vec!["A"]), Err(Error::Length { expected: 3, found: 1 }));
    }

    #[test]
    fn shuffled_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let order = Order::shuffled(10, &mut rng);
        let mut sorted = order.as_slice().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, Order::identity(10).as_slice());
    }

    #[test]
    fn deserialization_checks_the_permutation() {
        assert!(serde_json::from_str::<Order>("[1, 0]").is_ok());
        assert!(serde_json::from_str::<Order>("[1, 1]").is_err());
    }
}
