pub use self::join::{EqJoinFactory, Join, JoinPredicate};
pub use self::tuple_iterator::TupleIterator;
use common::{DbError, TableSchema, Tuple};

mod join;
mod testutil;
mod tuple_iterator;

/// The pull contract every relation and operator exposes. Operators own their
/// children and drive them through this same interface, so a join can sit
/// below a projection or another join without either knowing the difference.
pub trait OpIterator {
    /// Opens the iterator. This must be called before any of the other methods.
    fn open(&mut self) -> Result<(), DbError>;

    /// Advances the iterator and returns the next tuple from the operator.
    ///
    /// Returns None when iteration is finished.
    ///
    /// # Errors
    ///
    /// `DbError::UsageError` if the iterator is not open.
    fn next(&mut self) -> Result<Option<Tuple>, DbError>;

    /// Closes the iterator.
    fn close(&mut self) -> Result<(), DbError>;

    /// Returns the iterator to the start.
    ///
    /// # Errors
    ///
    /// `DbError::UsageError` if the iterator is not open.
    fn rewind(&mut self) -> Result<(), DbError>;

    /// Returns the schema associated with this OpIterator.
    fn get_schema(&self) -> &TableSchema;
}
