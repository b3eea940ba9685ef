//! Parallel mergesort — component M.

pub mod mergesort;

pub use mergesort::mergesort_parallel;
