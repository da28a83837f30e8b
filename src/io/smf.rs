use crate::scene::mesh::{Mesh, Triangle};
use log::{info, warn};
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses an SMF mesh description from any reader.
///
/// The format is line-oriented with whitespace-separated tokens, first token
/// is the type tag:
///   `v x y z` — vertex position, appended to an implicit 1-based list
///   `f a b c` — triangle of three previously declared vertex indices
/// Anything else (including malformed `v`/`f` lines) is skipped silently.
///
/// Faces with a non-positive index or one past the current vertex count are
/// dropped and counted; the loader never indexes out of bounds.
///
/// Returns the triangles in file order plus the number of dropped faces.
pub fn parse_smf<R: BufRead>(reader: R) -> (Mesh, usize) {
    let mut vertices: Vec<Point3<f32>> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();
    let mut skipped_faces = 0usize;

    for line in reader.lines() {
        let Ok(line) = line else { break };
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let coords: Option<[f32; 3]> = parse_three(&mut tokens);
                if let Some([x, y, z]) = coords {
                    vertices.push(Point3::new(x, y, z));
                }
            }
            Some("f") => {
                let indices: Option<[i64; 3]> = parse_three(&mut tokens);
                let Some(idx) = indices else { continue };

                if idx
                    .iter()
                    .any(|&i| i <= 0 || i > vertices.len() as i64)
                {
                    skipped_faces += 1;
                    continue;
                }

                triangles.push(Triangle::new(
                    vertices[(idx[0] - 1) as usize],
                    vertices[(idx[1] - 1) as usize],
                    vertices[(idx[2] - 1) as usize],
                ));
            }
            _ => {}
        }
    }

    (Mesh::new(triangles), skipped_faces)
}

fn parse_three<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Option<[T; 3]> {
    let a = tokens.next()?.parse().ok()?;
    let b = tokens.next()?.parse().ok()?;
    let c = tokens.next()?.parse().ok()?;
    Some([a, b, c])
}

/// Loads an SMF file from disk.
///
/// An unopenable file is an error for the caller to recover from (the
/// interactive app falls back to a built-in triangle); everything else is
/// best-effort with skipped elements logged.
pub fn load_smf<P: AsRef<Path>>(path: P) -> Result<Mesh, String> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| format!("Failed to open mesh file '{}': {}", path.display(), e))?;

    let (mesh, skipped) = parse_smf(BufReader::new(file));

    if skipped > 0 {
        warn!(
            "Skipped {} face(s) with out-of-range indices in '{}'",
            skipped,
            path.display()
        );
    }
    info!(
        "Loaded {} triangles from '{}'",
        mesh.triangles.len(),
        path.display()
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> (Mesh, usize) {
        parse_smf(Cursor::new(text))
    }

    #[test]
    fn counts_match_valid_input() {
        let (mesh, skipped) = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             v 0 0 1\n\
             f 1 2 3\n\
             f 1 3 4\n",
        );
        assert_eq!(mesh.triangles.len(), 2);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn unknown_and_malformed_lines_are_skipped() {
        let (mesh, skipped) = parse(
            "# comment\n\
             vn 0 0 1\n\
             v 0 0 0\n\
             v abc 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             f 1 2\n\
             f 1 2 3\n\
             \n",
        );
        // `v abc 0 0` and `f 1 2` are malformed, not counted as invalid faces.
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn out_of_range_faces_are_dropped_and_counted() {
        let (mesh, skipped) = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             f 0 1 2\n\
             f 1 2 999\n\
             f -1 2 3\n\
             f 1 2 3\n",
        );
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(skipped, 3);
    }

    #[test]
    fn forward_references_are_invalid() {
        // Faces only see vertices declared above them.
        let (mesh, skipped) = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             f 1 2 3\n\
             v 0 1 0\n\
             f 1 2 3\n",
        );
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn canonical_triangle_round_trip() {
        let (mesh, _) = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(mesh.triangles.len(), 1);
        let tri = &mesh.triangles[0];
        let n = crate::scene::normals::face_normal(tri);
        assert!((n - nalgebra::Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_smf("definitely/not/here.smf").is_err());
    }
}
