use crate::{Attribute, DataType, Field, TableSchema, Tuple};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Generates n int fields drawn uniformly from the given cardinality, or from
/// the full i32 range when no cardinality is given.
pub fn gen_uniform_ints(n: u64, cardinality: Option<u64>) -> Vec<Field> {
    let mut rng = rand::thread_rng();
    let mut ret = Vec::new();
    if let Some(card) = cardinality {
        if card > i32::MAX as u64 {
            panic!("Cardinality larger than i32 max")
        }
        let range = Uniform::new_inclusive(0, card as i32 - 1);
        for _ in 0..n {
            ret.push(Field::IntField(range.sample(&mut rng)));
        }
    } else {
        for _ in 0..n {
            ret.push(Field::IntField(rng.gen::<i32>()));
        }
    }
    ret
}

/// Converts an int vector to a Tuple.
///
/// # Argument
///
/// * `data` - Data to put into tuple.
pub fn int_vec_to_tuple(data: Vec<i32>) -> Tuple {
    let mut tuple_data = Vec::new();

    for val in data {
        tuple_data.push(Field::IntField(val));
    }

    Tuple::new(tuple_data)
}

/// Creates a Vec of tuples containing IntFields given a 2D Vec of i32 's
pub fn create_tuple_list(tuple_data: Vec<Vec<i32>>) -> Vec<Tuple> {
    let mut tuples = Vec::new();
    for item in &tuple_data {
        let fields = item.iter().map(|i| Field::IntField(*i)).collect();
        tuples.push(Tuple::new(fields));
    }
    tuples
}

/// Creates a new table schema for a table with width number of IntFields.
pub fn get_int_table_schema(width: usize) -> TableSchema {
    let mut attrs = Vec::new();
    for _ in 0..width {
        attrs.push(Attribute::new(String::new(), DataType::Int))
    }
    TableSchema::new(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_uniform_ints() {
        let ints = gen_uniform_ints(4, Some(6));
        for x in &ints {
            if let Field::IntField(a) = x {
                assert!(*a < 6);
            }
        }

        let card: usize = 20;
        let ints = gen_uniform_ints(1000, Some(card as u64));
        assert_eq!(1000, ints.len());
        let mut map = HashMap::new();
        for i in ints {
            if let Field::IntField(val) = i {
                *map.entry(val).or_insert(0) += 1;
            }
        }
        assert!(map.keys().count() <= card);
    }

    #[test]
    fn test_create_tuple_list() {
        let tuples = create_tuple_list(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(2, tuples.len());
        assert_eq!(tuples[0], int_vec_to_tuple(vec![1, 2]));
    }
}
