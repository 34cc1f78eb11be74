//! Wireframe meshes loaded from Wavefront OBJ files.
//!
//! Only vertex positions (`v`) and faces (`f`) are read. Every face becomes a
//! closed loop of edges between consecutive vertices.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};
use thiserror::Error;

use crate::geometry::Vec3;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

fn parse_error(line: usize, message: impl Into<String>) -> ModelError {
    ModelError::Parse {
        line,
        message: message.into(),
    }
}

/// Vertices plus edges given as pairs of vertex indices.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Model {
    vertices: Vec<Vec3>,
    edges: Vec<(usize, usize)>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, vertex: Vec3) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.edges.push((from, to));
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex(&self, index: usize) -> Option<&Vec3> {
        self.vertices.get(index)
    }

    pub fn edge(&self, index: usize) -> Option<(usize, usize)> {
        self.edges.get(index).copied()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let model = Self::parse_obj(BufReader::new(file))?;
        info!(
            "Loaded {}: {} vertices, {} edges",
            path.display(),
            model.vertex_count(),
            model.edge_count()
        );
        Ok(model)
    }

    pub fn parse_obj<R: BufRead>(reader: R) -> Result<Self, ModelError> {
        let mut model = Model::new();
        // faces may reference vertices declared further down
        let mut faces: Vec<(usize, Vec<usize>)> = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let number = number + 1;
            let mut tokens = line.split_whitespace();

            match tokens.next() {
                Some("v") => {
                    let mut coords = [0.0f32; 3];
                    for coord in coords.iter_mut() {
                        let token = tokens
                            .next()
                            .ok_or_else(|| parse_error(number, "vertex needs three coordinates"))?;
                        *coord = token.parse().map_err(|_| {
                            parse_error(number, format!("invalid coordinate '{}'", token))
                        })?;
                    }
                    model.add_vertex(Vec3::new(coords[0], coords[1], coords[2]));
                }
                Some("f") => {
                    let indices = tokens
                        .map(|token| face_index(token, model.vertex_count(), number))
                        .collect::<Result<Vec<_>, _>>()?;

                    if indices.len() >= 3 {
                        faces.push((number, indices));
                    } else {
                        warn!("Line {}: skipping face with {} vertices", number, indices.len());
                    }
                }
                _ => {}
            }
        }

        for (number, indices) in faces {
            if let Some(&bad) = indices.iter().find(|&&i| i >= model.vertex_count()) {
                return Err(parse_error(
                    number,
                    format!(
                        "face references vertex {} but only {} exist",
                        bad + 1,
                        model.vertex_count()
                    ),
                ));
            }
            for (i, &current) in indices.iter().enumerate() {
                model.add_edge(current, indices[(i + 1) % indices.len()]);
            }
        }

        debug!(
            "Parsed OBJ data: {} vertices, {} edges",
            model.vertex_count(),
            model.edge_count()
        );
        Ok(model)
    }
}

/// Zero-based vertex index from a face token such as `7`, `7/1` or `7//3`.
///
/// Negative indices count back from the vertices read so far.
fn face_index(token: &str, vertices_so_far: usize, line: usize) -> Result<usize, ModelError> {
    let position = token.split('/').next().unwrap_or(token);
    let value: i64 = position
        .parse()
        .map_err(|_| parse_error(line, format!("invalid face index '{}'", token)))?;

    let index = match value {
        0 => None,
        v if v > 0 => Some(v as usize - 1),
        v => usize::try_from(vertices_so_far as i64 + v).ok(),
    };
    index.ok_or_else(|| parse_error(line, format!("face index '{}' is out of range", token)))
}
