use super::OpIterator;
use common::{DbError, TableSchema, Tuple};

/// Iterator over a Vec of tuples.
///
/// Supports any number of full passes via rewind, which makes it the
/// materializing wrapper to put around a one-pass input before using it as
/// the right child of a nested-loop join.
pub struct TupleIterator {
    /// Tuples to iterate over.
    tuples: Vec<Tuple>,
    /// Schema of the output.
    schema: TableSchema,
    /// Current tuple in iteration.
    index: Option<usize>,
}

impl TupleIterator {
    /// Create a new tuple iterator over a set of results.
    ///
    /// # Arguments
    ///
    /// * `tuples` - Tuples to iterate over.
    /// * `schema` - Schema of the output results.
    pub fn new(tuples: Vec<Tuple>, schema: TableSchema) -> Self {
        Self {
            index: None,
            tuples,
            schema,
        }
    }
}

impl OpIterator for TupleIterator {
    /// Opens the iterator without returning a tuple.
    fn open(&mut self) -> Result<(), DbError> {
        self.index = Some(0);
        Ok(())
    }

    /// Retrieves the next tuple in the iterator.
    ///
    /// # Errors
    ///
    /// `DbError::UsageError` if the TupleIterator has not been opened.
    fn next(&mut self) -> Result<Option<Tuple>, DbError> {
        let i = match self.index {
            None => {
                return Err(DbError::UsageError(String::from(
                    "Operator has not been opened",
                )))
            }
            Some(i) => i,
        };
        let tuple = self.tuples.get(i);
        self.index = Some(i + 1);
        Ok(tuple.cloned())
    }

    /// Closes the tuple iterator.
    fn close(&mut self) -> Result<(), DbError> {
        self.index = None;
        Ok(())
    }

    /// Make iterator point to the first tuple again.
    ///
    /// # Errors
    ///
    /// `DbError::UsageError` if the TupleIterator has not been opened.
    fn rewind(&mut self) -> Result<(), DbError> {
        if self.index.is_none() {
            return Err(DbError::UsageError(String::from(
                "Operator has not been opened",
            )));
        }
        self.close()?;
        self.open()
    }

    /// Returns the schema of the tuples.
    fn get_schema(&self) -> &TableSchema {
        &self.schema
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use common::testutil::*;

    const NUM_ROWS: usize = 3;
    const WIDTH: usize = 1;

    fn get_tuple_iterator() -> TupleIterator {
        let tuples = create_tuple_list(vec![vec![1], vec![2], vec![3]]);
        let schema = get_int_table_schema(WIDTH);
        TupleIterator::new(tuples, schema)
    }

    #[test]
    fn test_open() -> Result<(), DbError> {
        let mut ti = get_tuple_iterator();
        ti.open()?;
        assert!(ti.index.is_some());
        Ok(())
    }

    #[test]
    fn test_next() -> Result<(), DbError> {
        let mut ti = get_tuple_iterator();
        ti.open()?;
        let mut counter = 0;
        while ti.next()?.is_some() {
            counter += 1;
        }
        assert_eq!(counter, NUM_ROWS);
        Ok(())
    }

    #[test]
    fn test_next_not_open() {
        let mut ti = get_tuple_iterator();
        assert!(matches!(ti.next(), Err(DbError::UsageError(_))));
    }

    #[test]
    fn test_close() -> Result<(), DbError> {
        let mut ti = get_tuple_iterator();
        ti.open()?;
        assert!(ti.index.is_some());
        ti.close()?;
        assert!(ti.index.is_none());
        Ok(())
    }

    #[test]
    fn test_rewind() -> Result<(), DbError> {
        let mut ti = get_tuple_iterator();
        ti.open()?;
        let mut counter1 = 0;
        while ti.next()?.is_some() {
            counter1 += 1;
        }
        ti.rewind()?;
        let mut counter2 = 0;
        while ti.next()?.is_some() {
            counter2 += 1;
        }
        assert_eq!(counter1, counter2);
        Ok(())
    }

    #[test]
    fn test_rewind_not_open() {
        let mut ti = get_tuple_iterator();
        assert!(matches!(ti.rewind(), Err(DbError::UsageError(_))));
    }
}
