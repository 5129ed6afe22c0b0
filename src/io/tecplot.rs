//! Tecplot ASCII point-data files.
//!
//! # Written layout
//! Triangulations are written as a finite-element zone:
//! ```text
//! TITLE = "Delaunay Triangulation"
//! VARIABLES = "X", "Y"
//! ZONE NODES=4, ELEMENTS=2, DATAPACKING=POINT, ZONETYPE=FETRIANGLE
//! 0 0
//! ...
//! 1 2 3
//! ...
//! ```
//! with 1-based vertex indices. Structured grids are written as an ordered
//! `I`x`J` zone of points only.
//!
//! # Reading
//! Lines before the first line containing `ZONE` are ignored. If the zone
//! line declares `NODES=n` or `I=..`/`J=..`, exactly that many points are
//! read and the rest of the file (e.g. connectivity) is ignored; otherwise
//! every remaining line is an `x y` pair. Blank lines are skipped.

use crate::delaunay::Triangulation;
use crate::geometry::point::Point2;
use crate::io::{MeshWriter, PointReader};
use crate::mesh_error::MeshError;
use crate::structured::StructuredGrid;
use crate::topology::cell_type::CellType;
use std::io::{BufRead, BufReader, Read, Write};

/// Tecplot ASCII writer for triangulations and structured grids.
#[derive(Debug, Default, Clone)]
pub struct TecplotWriter;

fn write_points<W: Write>(writer: &mut W, points: &[Point2]) -> Result<(), MeshError> {
    for p in points {
        writeln!(writer, "{} {}", p.x, p.y)?;
    }
    Ok(())
}

impl MeshWriter<Triangulation> for TecplotWriter {
    fn write<W: Write>(&self, mut writer: W, mesh: &Triangulation) -> Result<(), MeshError> {
        writeln!(writer, "TITLE = \"Delaunay Triangulation\"")?;
        writeln!(writer, "VARIABLES = \"X\", \"Y\"")?;
        writeln!(
            writer,
            "ZONE NODES={}, ELEMENTS={}, DATAPACKING=POINT, ZONETYPE={}",
            mesh.points.len(),
            mesh.triangles.len(),
            CellType::Triangle.tecplot_zone_type()
        )?;
        write_points(&mut writer, &mesh.points)?;
        for tri in &mesh.triangles {
            let [a, b, c] = tri.vertices;
            writeln!(writer, "{} {} {}", a + 1, b + 1, c + 1)?;
        }
        Ok(())
    }
}

impl MeshWriter<StructuredGrid> for TecplotWriter {
    fn write<W: Write>(&self, mut writer: W, grid: &StructuredGrid) -> Result<(), MeshError> {
        writeln!(writer, "TITLE = \"2D Mesh Data\"")?;
        writeln!(writer, "VARIABLES = \"X\", \"Y\"")?;
        writeln!(
            writer,
            "ZONE T=\"2D Mesh\", I={}, J={}, DATAPACKING=POINT",
            grid.i_max, grid.j_max
        )?;
        write_points(&mut writer, &grid.points)
    }
}

/// Tecplot point-list reader.
#[derive(Debug, Default, Clone)]
pub struct TecplotPointReader;

impl TecplotPointReader {
    /// Point count declared on a zone line, if any.
    fn declared_count(zone: &str, line: usize) -> Result<Option<usize>, MeshError> {
        let mut nodes = None;
        let mut i = None;
        let mut j = None;
        for token in zone.split(|c: char| c == ',' || c.is_whitespace()) {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            let slot = match key.trim().to_ascii_uppercase().as_str() {
                "NODES" | "N" => &mut nodes,
                "I" => &mut i,
                "J" => &mut j,
                _ => continue,
            };
            let parsed = value.trim().parse::<usize>().map_err(|_| MeshError::Parse {
                line,
                message: format!("invalid zone size: {token}"),
            })?;
            *slot = Some(parsed);
        }
        Ok(nodes.or(match (i, j) {
            (Some(i), Some(j)) => Some(i * j),
            (Some(i), None) => Some(i),
            _ => None,
        }))
    }

    fn parse_point(text: &str, line: usize) -> Result<Point2, MeshError> {
        let mut parts = text.split_whitespace();
        let mut coord = |name: &str| -> Result<f32, MeshError> {
            let raw = parts.next().ok_or_else(|| MeshError::Parse {
                line,
                message: format!("missing {name} coordinate"),
            })?;
            raw.parse::<f32>().map_err(|_| MeshError::Parse {
                line,
                message: format!("invalid {name} coordinate: {raw}"),
            })
        };
        let x = coord("x")?;
        let y = coord("y")?;
        if let Some(extra) = parts.next() {
            return Err(MeshError::Parse {
                line,
                message: format!("unexpected trailing value: {extra}"),
            });
        }
        Ok(Point2::new(x, y))
    }
}

impl PointReader for TecplotPointReader {
    fn read<R: Read>(&self, reader: R) -> Result<Vec<Point2>, MeshError> {
        let mut lines = BufReader::new(reader).lines().enumerate();

        let mut expected = None;
        let mut found_zone = false;
        let mut last_line = 0;
        for (idx, line) in lines.by_ref() {
            let line = line?;
            last_line = idx + 1;
            if line.contains("ZONE") {
                expected = Self::declared_count(&line, idx + 1)?;
                found_zone = true;
                break;
            }
        }
        if !found_zone {
            return Err(MeshError::Parse {
                line: last_line + 1,
                message: "no ZONE line found".into(),
            });
        }

        let mut points = Vec::with_capacity(expected.unwrap_or(0));
        for (idx, line) in lines {
            if expected.is_some_and(|n| points.len() >= n) {
                break;
            }
            let line = line?;
            last_line = idx + 1;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            points.push(Self::parse_point(text, idx + 1)?);
        }

        if let Some(n) = expected {
            if points.len() < n {
                return Err(MeshError::Parse {
                    line: last_line + 1,
                    message: format!("expected {n} points, found {}", points.len()),
                });
            }
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::polygon::Triangle;

    #[test]
    fn reads_undeclared_point_list_to_eof() {
        let text = "TITLE = \"cloud\"\nVARIABLES = \"X\", \"Y\"\nZONE\n0 0\n\n1.5 2\n-3 4e-1\n";
        let pts = TecplotPointReader.read(text.as_bytes()).unwrap();
        assert_eq!(
            pts,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.5, 2.0),
                Point2::new(-3.0, 0.4)
            ]
        );
    }

    #[test]
    fn declared_count_stops_before_connectivity() {
        let text = "ZONE NODES=3, ELEMENTS=1, DATAPACKING=POINT, ZONETYPE=FETRIANGLE\n\
                    0 0\n1 0\n0 1\n1 2 3\n";
        let pts = TecplotPointReader.read(text.as_bytes()).unwrap();
        assert_eq!(pts.len(), 3);
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let err = TecplotPointReader
            .read("ZONE\n0 0\n1 x\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 3, .. }), "{err}");

        let err = TecplotPointReader.read("0 0\n1 1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::Parse { .. }));

        let err = TecplotPointReader
            .read("ZONE I=2, J=2\n0 0\n1 0\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn triangulation_layout_is_one_based() {
        let mesh = Triangulation {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
            triangles: vec![Triangle::new([0, 1, 2])],
            normalization: crate::delaunay::normalize::Normalization {
                x_min: 0.0,
                y_min: 0.0,
                scale: 1.0,
            },
            stats: Default::default(),
        };
        let mut out = Vec::new();
        TecplotWriter.write(&mut out, &mesh).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "TITLE = \"Delaunay Triangulation\"\n\
             VARIABLES = \"X\", \"Y\"\n\
             ZONE NODES=3, ELEMENTS=1, DATAPACKING=POINT, ZONETYPE=FETRIANGLE\n\
             0 0\n1 0\n0 1\n1 2 3\n"
        );
    }
}
