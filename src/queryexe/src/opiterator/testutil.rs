use crate::opiterator::OpIterator;
use common::DbError;

#[allow(dead_code)]
/// Returns the count of the number of tuples in an OpIterator.
///
/// This function consumes the iterator.
///
/// # Arguments
///
/// * `iter` - Iterator to count.
pub fn num_tuples(iter: &mut impl OpIterator) -> Result<u32, DbError> {
    let mut counter = 0;
    while iter.next()?.is_some() {
        counter += 1;
    }
    Ok(counter)
}

#[allow(dead_code)]
/// Asserts that iter1 and iter2 contain all the same tuples in the same order
pub fn match_all_tuples(
    mut iter1: Box<dyn OpIterator>,
    mut iter2: Box<dyn OpIterator>,
) -> Result<(), DbError> {
    while let Some(t1) = iter1.next()? {
        let t2 = iter2.next()?.unwrap();
        assert_eq!(t1, t2);
    }
    assert!(iter2.next()?.is_none());
    Ok(())
}

#[allow(dead_code)]
/// Asserts that iter1 and iter2 contain the same multiset of tuples, in any
/// order. Used for evaluators that do not guarantee Cartesian traversal order.
pub fn match_tuples_unordered(
    mut iter1: Box<dyn OpIterator>,
    mut iter2: Box<dyn OpIterator>,
) -> Result<(), DbError> {
    let mut expected = Vec::new();
    while let Some(t) = iter2.next()? {
        expected.push(t);
    }
    while let Some(t) = iter1.next()? {
        let pos = expected.iter().position(|e| *e == t);
        match pos {
            None => panic!("unexpected tuple {}", t),
            Some(idx) => {
                expected.swap_remove(idx);
            }
        }
    }
    assert!(expected.is_empty());
    Ok(())
}
