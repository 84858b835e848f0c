//! Benchmark directories: file discovery, loading and writing.

use crate::error::BookshelfError;
use crate::nets::{parse_nets, write_nets};
use crate::nodes::{parse_nodes, write_nodes};
use crate::pl::{parse_pl, write_pl};
use crate::scl::{parse_scl, rows_bounds};
use dfmp_model::{Bounds, Design};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The Bookshelf files making up one benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkFiles {
    /// Macro sizes.
    pub nodes: PathBuf,
    /// Net connectivity.
    pub nets: PathBuf,
    /// Initial placement.
    pub pl: PathBuf,
    /// Placement rows, if present.
    pub scl: Option<PathBuf>,
}

impl BenchmarkFiles {
    /// Finds the benchmark files in `dir` by extension.
    ///
    /// `.nodes`, `.nets` and `.pl` are required; `.scl` is optional. When an
    /// extension matches several files, the first in name order is used.
    pub fn discover(dir: &Path) -> Result<Self, BookshelfError> {
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| BookshelfError::io(dir, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        entries.sort();

        let find = |ext: &'static str| {
            let mut matches = entries
                .iter()
                .filter(|p| p.extension().is_some_and(|e| e == ext));
            let first = matches.next().cloned();
            if let (Some(chosen), Some(_)) = (&first, matches.next()) {
                log::warn!(
                    "several .{ext} files in {}; using {}",
                    dir.display(),
                    chosen.display()
                );
            }
            first
        };
        let require = |ext: &'static str| {
            find(ext).ok_or_else(|| BookshelfError::MissingFile {
                dir: dir.to_path_buf(),
                extension: ext,
            })
        };

        Ok(Self {
            nodes: require("nodes")?,
            nets: require("nets")?,
            pl: require("pl")?,
            scl: find("scl"),
        })
    }
}

/// A loaded benchmark.
#[derive(Debug, Clone)]
pub struct Benchmark {
    /// Benchmark name, taken from the directory name.
    pub name: String,
    /// Macros and nets with the initial placement applied.
    pub design: Design,
    /// Layout bounds from the `.scl` rows, or the bounding box of the initial
    /// placement when there are none.
    pub bounds: Bounds,
    /// The files the benchmark was loaded from.
    pub files: BenchmarkFiles,
}

/// Loads the benchmark in `dir`.
pub fn load_benchmark(dir: &Path) -> Result<Benchmark, BookshelfError> {
    let files = BenchmarkFiles::discover(dir)?;

    let mut design = parse_nodes(&read(&files.nodes)?, &label(&files.nodes))?;
    parse_pl(&read(&files.pl)?, &label(&files.pl), &mut design)?;
    parse_nets(&read(&files.nets)?, &label(&files.nets), &mut design)?;

    let rows = match &files.scl {
        Some(path) => parse_scl(&read(path)?, &label(path))?,
        None => Vec::new(),
    };
    let bounds = match rows_bounds(&rows) {
        Some(bounds) => bounds,
        None => {
            log::info!("no placement rows; using the bounding box of the initial placement");
            placement_bounds(&design)
        }
    };
    bounds.validate()?;

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bench".to_string());
    log::info!(
        "loaded benchmark {name}: {} macros ({} fixed), {} nets, {} pins, bounds {bounds}",
        design.macro_count(),
        design.fixed_count(),
        design.net_count(),
        design.pin_count()
    );

    Ok(Benchmark {
        name,
        design,
        bounds,
        files,
    })
}

/// Returns the bounding box of all macros at their current positions, or an
/// empty box at the origin for an empty design.
pub fn placement_bounds(design: &Design) -> Bounds {
    let mut macros = design.macros().iter();
    let Some(first) = macros.next() else {
        return Bounds::new(0.0, 0.0, 0.0, 0.0);
    };
    let extent = |m: &dfmp_model::Macro| {
        let (w, h) = m.dimensions();
        let p = m.position();
        (p.x, p.x + w, p.y - h, p.y)
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = extent(first);
    for m in macros {
        let (x0, x1, y0, y1) = extent(m);
        min_x = min_x.min(x0);
        max_x = max_x.max(x1);
        min_y = min_y.min(y0);
        max_y = max_y.max(y1);
    }
    Bounds::new(min_x, max_x, min_y, max_y)
}

/// Writes `design` as `<basename>.nodes`, `.pl` and `.nets` into `dir`,
/// creating the directory if needed.
pub fn write_benchmark(design: &Design, dir: &Path, basename: &str) -> Result<(), BookshelfError> {
    fs::create_dir_all(dir).map_err(|e| BookshelfError::io(dir, e))?;
    write_file(&dir.join(format!("{basename}.nodes")), |w| write_nodes(design, w))?;
    write_file(&dir.join(format!("{basename}.pl")), |w| write_pl(design, w))?;
    write_file(&dir.join(format!("{basename}.nets")), |w| write_nets(design, w))?;
    Ok(())
}

/// Writes the placement of `design` to a `.pl` file.
pub fn save_placement(design: &Design, path: &Path) -> Result<(), BookshelfError> {
    write_file(path, |w| write_pl(design, w))
}

fn write_file(
    path: &Path,
    body: impl FnOnce(&mut BufWriter<fs::File>) -> std::io::Result<()>,
) -> Result<(), BookshelfError> {
    let file = fs::File::create(path).map_err(|e| BookshelfError::io(path, e))?;
    let mut out = BufWriter::new(file);
    body(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| BookshelfError::io(path, e))
}

fn read(path: &Path) -> Result<String, BookshelfError> {
    fs::read_to_string(path).map_err(|e| BookshelfError::io(path, e))
}

fn label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
