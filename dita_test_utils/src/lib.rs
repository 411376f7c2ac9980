//! utils for dita tests
#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::all, clippy::missing_const_for_fn)]

use rand::{distr::Uniform, prelude::Distribution};
use rand_distr::Normal;
use std::ops::RangeInclusive;

pub type Vertex2 = [f64; 2];

/// Samples `n` vertices in 2D space from the [Uniform] distribution.
///
/// If no range is specified, the unit-square centered around the origin is used, `[-0.5, 0.5]`.
pub fn sample_vertices_2d(n: usize, range: Option<RangeInclusive<f64>>) -> Vec<Vertex2> {
    let mut rng = rand::rng();
    let range = range.unwrap_or(-0.5..=0.5);
    let uniform = Uniform::try_from(range).expect("Expected range with a greater start then end");

    let mut vertices: Vec<[f64; 2]> = Vec::with_capacity(n);
    for _ in 0..n {
        let x = uniform.sample(&mut rng);
        let y = uniform.sample(&mut rng);
        vertices.push([x, y]);
    }

    vertices
}

/// Builds the vertices of an `n x n` lattice with the given spacing,
/// row-major from the origin.
pub fn lattice_vertices_2d(n: usize, spacing: f64) -> Vec<Vertex2> {
    let mut vertices: Vec<[f64; 2]> = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            vertices.push([i as f64 * spacing, j as f64 * spacing]);
        }
    }

    vertices
}

/// Builds an `n x n` lattice and perturbs every coordinate with [Normal]
/// noise of the given standard deviation.
///
/// Useful to break the cocircular degeneracies of the exact lattice.
pub fn noisy_lattice_vertices_2d(n: usize, spacing: f64, std_dev: f64) -> Vec<Vertex2> {
    let mut rng = rand::rng();
    let normal = Normal::new(0.0, std_dev).expect("Expected a non-negative standard deviation");

    let mut vertices = lattice_vertices_2d(n, spacing);
    for vertex in &mut vertices {
        vertex[0] += normal.sample(&mut rng);
        vertex[1] += normal.sample(&mut rng);
    }

    vertices
}
