//! CUDA implementations of the operation traits.

mod dot;
