//! Interactive viewer for SMF triangle meshes.
//!
//! Loads a line-based mesh description (`v x y z` / `f a b c`), derives flat
//! and averaged vertex normals, and renders the model on a software
//! rasterizer with flat, Gouraud or Phong shading while the user orbits the
//! camera and a light around the mesh.

pub mod app;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod scene;
pub mod ui;
