use serde::{Deserialize, Serialize};

/// A mark encoding that is either shared by every instance or given per instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarOrArray<T: Clone> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Clone> ScalarOrArray<T> {
    /// Iterate `len` values, repeating a scalar as needed
    pub fn as_iter(&self, len: usize) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            ScalarOrArray::Scalar(value) => Box::new(std::iter::repeat(value).take(len)),
            ScalarOrArray::Array(values) => Box::new(values.iter().take(len)),
        }
    }

    pub fn as_vec(&self, len: usize) -> Vec<T> {
        self.as_iter(len).cloned().collect()
    }

    /// Value of the i-th instance, if any
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            ScalarOrArray::Scalar(value) => Some(value),
            ScalarOrArray::Array(values) => values.get(index),
        }
    }

    pub fn map<U: Clone>(&self, f: impl Fn(&T) -> U) -> ScalarOrArray<U> {
        match self {
            ScalarOrArray::Scalar(value) => ScalarOrArray::Scalar(f(value)),
            ScalarOrArray::Array(values) => ScalarOrArray::Array(values.iter().map(f).collect()),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ScalarOrArray::Scalar(_))
    }

    /// Number of explicit values, `None` for scalars
    pub fn array_len(&self) -> Option<usize> {
        match self {
            ScalarOrArray::Scalar(_) => None,
            ScalarOrArray::Array(values) => Some(values.len()),
        }
    }
}

impl<T: Clone + PartialEq> ScalarOrArray<T> {
    /// Collapse an array whose values are all equal into a scalar
    pub fn compacted(self) -> Self {
        match self {
            ScalarOrArray::Array(values) if !values.is_empty() => {
                let first = values[0].clone();
                if values.iter().all(|v| *v == first) {
                    ScalarOrArray::Scalar(first)
                } else {
                    ScalarOrArray::Array(values)
                }
            }
            other => other,
        }
    }
}

impl<T: Clone> From<Vec<T>> for ScalarOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }
}

impl<T: Clone> From<T> for ScalarOrArray<T> {
    fn from(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }
}
