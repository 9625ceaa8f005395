//! Action and observation spaces.
use rand::{distributions::uniform::SampleUniform, Rng};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A set of values an action or observation can take.
pub trait Space {
    /// Type of an element of the space.
    type Sample;

    /// Draws an element uniformly at random.
    fn sample<R: Rng>(&self, rng: &mut R) -> Self::Sample;

    /// Returns `true` if `value` is an element of the space.
    fn contains(&self, value: &Self::Sample) -> bool;

    /// Shape of an element.
    fn shape(&self) -> &[usize];
}

/// Discrete space with `n` values: `{0, 1, ..., n - 1}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrete {
    /// Number of values.
    pub n: usize,
}

impl Discrete {
    /// Creates a discrete space with `n` values.
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Space for Discrete {
    type Sample = usize;

    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.n)
    }

    fn contains(&self, value: &usize) -> bool {
        *value < self.n
    }

    fn shape(&self) -> &[usize] {
        &[]
    }
}

/// Box space: arrays of a fixed shape, each element bounded by `[low, high]`.
///
/// Elements are flattened in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace<T> {
    /// Lower bound of every element.
    pub low: T,

    /// Upper bound of every element.
    pub high: T,

    shape: Vec<usize>,
}

impl<T> BoxSpace<T> {
    /// Creates a box space with the same bounds for all elements.
    pub fn new(low: T, high: T, shape: &[usize]) -> Self {
        Self {
            low,
            high,
            shape: shape.to_vec(),
        }
    }

    /// Number of elements of a sample.
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }
}

impl<T> Space for BoxSpace<T>
where
    T: Copy + PartialOrd + SampleUniform,
{
    type Sample = Vec<T>;

    fn sample<R: Rng>(&self, rng: &mut R) -> Vec<T> {
        (0..self.size())
            .map(|_| rng.gen_range(self.low..=self.high))
            .collect()
    }

    fn contains(&self, value: &Vec<T>) -> bool {
        value.len() == self.size() && value.iter().all(|v| *v >= self.low && *v <= self.high)
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }
}
