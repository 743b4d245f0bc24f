//! Plain-text coordinate files.
//!
//! ```text
//! NAME : berlin5
//! TYPE : TSP
//! DIMENSION : 5
//! NODE_COORD_SECTION
//! 1 565.0 575.0
//! 2 25.0 185.0
//! ...
//! EOF
//! ```
//!
//! Header lines are `KEY : value`; only `NAME` (required) and `DIMENSION`
//! (checked when present) are interpreted. Of each coordinate line only
//! the last two whitespace-separated fields are read, so the leading index
//! is optional. A missing `EOF` is tolerated at end of input.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Point, Tour};

/// Parses a coordinate file into a tour in file order.
///
/// # Examples
///
/// ```
/// use u_tsp::io::parse_tsp;
///
/// let tour = parse_tsp("NAME : tri\nNODE_COORD_SECTION\n1 0 0\n2 3 0\n3 0 4\nEOF\n").unwrap();
/// assert_eq!(tour.name(), "tri");
/// assert_eq!(tour.len(), 3);
/// assert!((tour.cost() - 12.0).abs() < 1e-10);
/// ```
pub fn parse_tsp(text: &str) -> Result<Tour> {
    let mut name: Option<String> = None;
    let mut dimension: Option<(usize, usize)> = None;
    let mut in_coords = false;
    let mut points = Vec::new();
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("EOF") {
            break;
        }
        if in_coords {
            points.push(parse_coord_line(line, line_no)?);
            continue;
        }
        if line.starts_with("NODE_COORD_SECTION") {
            in_coords = true;
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            match key.trim().to_ascii_uppercase().as_str() {
                "NAME" => name = Some(value.trim().to_string()),
                "DIMENSION" => {
                    let value = value.trim();
                    match value.parse::<usize>() {
                        Ok(n) => dimension = Some((n, line_no)),
                        Err(e) => {
                            let message = format!("invalid DIMENSION {value:?}: {e}");
                            return Err(Error::parse(line_no, message));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    let name = name.ok_or_else(|| Error::parse(last_line, "missing NAME header"))?;
    if !in_coords {
        return Err(Error::parse(last_line, "missing NODE_COORD_SECTION"));
    }
    if let Some((n, line_no)) = dimension {
        if n != points.len() {
            return Err(Error::parse(
                line_no,
                format!("DIMENSION is {n} but {} points were read", points.len()),
            ));
        }
    }
    Ok(Tour::new(name, points))
}

fn parse_coord_line(line: &str, line_no: usize) -> Result<Point> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [.., x, y] = fields.as_slice() else {
        let message = format!("expected `index x y`, got {line:?}");
        return Err(Error::parse(line_no, message));
    };
    let x = parse_coord(x, line_no)?;
    let y = parse_coord(y, line_no)?;
    Ok(Point::new(x, y))
}

fn parse_coord(field: &str, line_no: usize) -> Result<f64> {
    let value: f64 = match field.parse() {
        Ok(value) => value,
        Err(e) => {
            let message = format!("invalid coordinate {field:?}: {e}");
            return Err(Error::parse(line_no, message));
        }
    };
    if !value.is_finite() {
        let message = format!("non-finite coordinate {field:?}");
        return Err(Error::parse(line_no, message));
    }
    Ok(value)
}

/// Formats a tour as a coordinate file, points in visiting order.
///
/// Coordinates are written with the shortest representation that parses
/// back to the same value.
pub fn format_tsp(tour: &Tour) -> String {
    let mut out = String::with_capacity(64 + tour.len() * 32);
    out.push_str(&format!("NAME : {}\n", tour.name()));
    out.push_str(&format!("COMMENT : cost {:.4}\n", tour.cost()));
    out.push_str("TYPE : TSP\n");
    out.push_str(&format!("DIMENSION : {}\n", tour.len()));
    out.push_str("EDGE_WEIGHT_TYPE : EUC_2D\n");
    out.push_str("NODE_COORD_SECTION\n");
    for (i, p) in tour.points().iter().enumerate() {
        out.push_str(&format!("{} {} {}\n", i + 1, p.x(), p.y()));
    }
    out.push_str("EOF\n");
    out
}

/// Reads and parses a coordinate file.
pub fn read_tsp_file(path: impl AsRef<Path>) -> Result<Tour> {
    let text = fs::read_to_string(path)?;
    parse_tsp(&text)
}

/// Writes a tour as a coordinate file, creating parent directories.
pub fn write_tsp_file(path: impl AsRef<Path>, tour: &Tour) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, format_tsp(tour))?;
    log::debug!("wrote {} points to {}", tour.len(), path.display());
    Ok(())
}
