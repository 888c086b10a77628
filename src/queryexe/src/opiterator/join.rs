use super::OpIterator;
use common::{DbError, PredicateOp, TableSchema, Tuple};

/// Compares the fields of two tuples using a predicate.
pub struct JoinPredicate {
    /// Operation to compare the fields with.
    op: PredicateOp,
    /// Index of the field of the left table (tuple).
    left_index: usize,
    /// Index of the field of the right table (tuple).
    right_index: usize,
}

impl JoinPredicate {
    /// Constructor that determines if two tuples satisfy the join condition.
    ///
    /// # Arguments
    ///
    /// * `op` - Operation to compare the two fields with.
    /// * `left_index` - Index of the field to compare in the left tuple.
    /// * `right_index` - Index of the field to compare in the right tuple.
    pub fn new(op: PredicateOp, left_index: usize, right_index: usize) -> Self {
        Self {
            op,
            left_index,
            right_index,
        }
    }

    /// Evaluates the join condition over a pair of tuples.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range for its tuple. The indices are
    /// fixed against the child schemas when the join is planned, so an
    /// out-of-range index here is a planner bug, not a runtime condition.
    pub fn filter(&self, left_tuple: &Tuple, right_tuple: &Tuple) -> bool {
        let left_field = left_tuple.get_field(self.left_index).unwrap();
        let right_field = right_tuple.get_field(self.right_index).unwrap();
        self.op.compare(left_field, right_field)
    }

    /// Returns the comparison operator.
    pub fn op(&self) -> PredicateOp {
        self.op
    }

    /// Returns the index of the join field in the left tuple.
    pub fn left_index(&self) -> usize {
        self.left_index
    }

    /// Returns the index of the join field in the right tuple.
    pub fn right_index(&self) -> usize {
        self.right_index
    }
}

/// Builds the equality-specialized evaluator a [`Join`] delegates to when its
/// predicate is an equality comparison.
///
/// The evaluator takes ownership of both children and must honor the
/// [`OpIterator`] contract. It must produce tuples in the same merged layout
/// as the nested loop (left fields then right fields); it is free to return
/// them in a different order.
pub trait EqJoinFactory {
    fn build(
        &self,
        predicate: JoinPredicate,
        left_child: Box<dyn OpIterator>,
        right_child: Box<dyn OpIterator>,
    ) -> Box<dyn OpIterator>;
}

/// Evaluation strategy, fixed at construction for the life of the operator.
enum JoinStrategy {
    /// Generic path: materializes the matching pairs at open and replays the
    /// buffer on next/rewind.
    NestedLoop {
        /// Left child node.
        left_child: Box<dyn OpIterator>,
        /// Right child node.
        right_child: Box<dyn OpIterator>,
        /// Matches buffered by open, in Cartesian traversal order.
        results: Vec<Tuple>,
        /// Position of the next tuple to serve out of `results`.
        cursor: usize,
    },
    /// Equality path: every lifecycle call is forwarded to the evaluator,
    /// which owns both children.
    EqDelegate(Box<dyn OpIterator>),
}

/// Join operator.
///
/// Consumes two child iterators and a join predicate and exposes the matching
/// concatenated tuples through the same [`OpIterator`] contract the children
/// implement. The generic strategy is a materializing nested-loop join: `open`
/// scans every (left, right) pair in left-then-right order, buffers the
/// matches, and `next` serves them back; `rewind` replays the buffer without
/// touching the children again. The right child must support `rewind` over its
/// full contents; wrap a one-pass input in a [`TupleIterator`] first.
///
/// [`TupleIterator`]: super::TupleIterator
pub struct Join {
    /// Join condition.
    predicate: JoinPredicate,
    /// Schema of the result.
    schema: TableSchema,
    /// Number of fields coming from the left child.
    left_width: usize,
    /// Evaluation strategy.
    strategy: JoinStrategy,
    /// Whether the operator is between open and close.
    is_open: bool,
}

impl Join {
    /// Join constructor. Creates a new node for a nested-loop join.
    ///
    /// This constructor always selects the nested-loop strategy, whatever the
    /// operator; use [`Join::new_with_eq_factory`] to wire in an
    /// equality-specialized evaluator.
    ///
    /// # Arguments
    ///
    /// * `op` - Operation in join condition.
    /// * `left_index` - Index of the left field in join condition.
    /// * `right_index` - Index of the right field in join condition.
    /// * `left_child` - Left child of join operator.
    /// * `right_child` - Right child of join operator.
    pub fn new(
        op: PredicateOp,
        left_index: usize,
        right_index: usize,
        left_child: Box<dyn OpIterator>,
        right_child: Box<dyn OpIterator>,
    ) -> Self {
        let left_schema = left_child.get_schema().clone();
        let right_schema = right_child.get_schema().clone();
        Self {
            predicate: JoinPredicate::new(op, left_index, right_index),
            schema: left_schema.merge(&right_schema),
            left_width: left_schema.size(),
            strategy: JoinStrategy::NestedLoop {
                left_child,
                right_child,
                results: Vec::new(),
                cursor: 0,
            },
            is_open: false,
        }
    }

    /// Like [`Join::new`], except that when `op` is an equality comparison the
    /// join is served by an evaluator built by `factory` instead of the
    /// nested loop. For any other operator the factory is ignored.
    ///
    /// The evaluator must yield the same tuples as the nested loop for the
    /// same inputs; only their order may differ.
    pub fn new_with_eq_factory(
        op: PredicateOp,
        left_index: usize,
        right_index: usize,
        left_child: Box<dyn OpIterator>,
        right_child: Box<dyn OpIterator>,
        factory: &dyn EqJoinFactory,
    ) -> Self {
        if !op.is_equality() {
            return Self::new(op, left_index, right_index, left_child, right_child);
        }
        let left_schema = left_child.get_schema().clone();
        let right_schema = right_child.get_schema().clone();
        let predicate = JoinPredicate::new(op, left_index, right_index);
        let evaluator = factory.build(
            JoinPredicate::new(op, left_index, right_index),
            left_child,
            right_child,
        );
        Self {
            predicate,
            schema: left_schema.merge(&right_schema),
            left_width: left_schema.size(),
            strategy: JoinStrategy::EqDelegate(evaluator),
            is_open: false,
        }
    }

    /// Returns the join condition.
    pub fn join_predicate(&self) -> &JoinPredicate {
        &self.predicate
    }

    /// Resolves the name of the join field on the left input.
    pub fn left_field_name(&self) -> Result<&str, DbError> {
        if self.predicate.left_index >= self.left_width {
            return Err(DbError::ValidationError(format!(
                "field {} does not exist in the left input",
                self.predicate.left_index
            )));
        }
        Ok(self
            .schema
            .get_attribute(self.predicate.left_index)
            .unwrap()
            .name())
    }

    /// Resolves the name of the join field on the right input.
    pub fn right_field_name(&self) -> Result<&str, DbError> {
        match self
            .schema
            .get_attribute(self.left_width + self.predicate.right_index)
        {
            Some(attr) => Ok(attr.name()),
            None => Err(DbError::ValidationError(format!(
                "field {} does not exist in the right input",
                self.predicate.right_index
            ))),
        }
    }
}

impl OpIterator for Join {
    fn open(&mut self) -> Result<(), DbError> {
        match &mut self.strategy {
            JoinStrategy::NestedLoop {
                left_child,
                right_child,
                results,
                cursor,
            } => {
                left_child.open()?;
                right_child.open()?;
                results.clear();
                while let Some(left_tuple) = left_child.next()? {
                    right_child.rewind()?;
                    while let Some(right_tuple) = right_child.next()? {
                        if self.predicate.filter(&left_tuple, &right_tuple) {
                            results.push(left_tuple.merge(&right_tuple));
                        }
                    }
                }
                *cursor = 0;
                debug!("nested loop join materialized {} tuples", results.len());
            }
            JoinStrategy::EqDelegate(evaluator) => {
                debug!("join delegating to equality evaluator");
                evaluator.open()?;
            }
        }
        self.is_open = true;
        Ok(())
    }

    /// Serves the next buffered tuple of the nested-loop result, or forwards
    /// to the equality evaluator.
    fn next(&mut self) -> Result<Option<Tuple>, DbError> {
        if !self.is_open {
            return Err(DbError::UsageError(String::from(
                "Operator has not been opened",
            )));
        }
        match &mut self.strategy {
            JoinStrategy::NestedLoop {
                results, cursor, ..
            } => {
                let tuple = results.get(*cursor).cloned();
                if tuple.is_some() {
                    *cursor += 1;
                }
                Ok(tuple)
            }
            JoinStrategy::EqDelegate(evaluator) => evaluator.next(),
        }
    }

    fn close(&mut self) -> Result<(), DbError> {
        if !self.is_open {
            return Err(DbError::UsageError(String::from(
                "Operator has not been opened",
            )));
        }
        match &mut self.strategy {
            JoinStrategy::NestedLoop {
                left_child,
                right_child,
                results,
                cursor,
            } => {
                left_child.close()?;
                right_child.close()?;
                results.clear();
                *cursor = 0;
            }
            JoinStrategy::EqDelegate(evaluator) => evaluator.close()?,
        }
        self.is_open = false;
        Ok(())
    }

    /// Resets the cursor to the start of the buffered result. The children are
    /// not touched and nothing is recomputed.
    fn rewind(&mut self) -> Result<(), DbError> {
        if !self.is_open {
            return Err(DbError::UsageError(String::from(
                "Operator has not been opened",
            )));
        }
        match &mut self.strategy {
            JoinStrategy::NestedLoop { cursor, .. } => {
                *cursor = 0;
                Ok(())
            }
            JoinStrategy::EqDelegate(evaluator) => evaluator.rewind(),
        }
    }

    /// return schema of the result
    fn get_schema(&self) -> &TableSchema {
        &self.schema
    }
}
