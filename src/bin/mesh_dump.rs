//! CLI tool for checking line tessellation without a renderer
//!
//! Usage:
//!   cargo run --release --bin mesh_dump -- <document> [options]
//!
//! Options:
//!   --thickness <t>        Override the document thickness
//!   --no-center            Disable the center offset
//!   --abort-degenerate     Abort the whole build on a segment with < 2 points
//!   --segment <n>          Only show ranges for one segment
//!   --triangles <n>        Number of triangles to dump (default 50)
//!   --binary <path>        Also write the binary mesh to a file
//!   --summary              Show summary stats only

use std::env;
use std::time::Instant;

use ui_line_renderer::draw::geometry::serialize_mesh_binary;
use ui_line_renderer::draw::tessellation::{segment_mesh_size, tessellate_segments_with_ranges, DegenerateSegments};
use ui_line_renderer::load_line_document;
use ui_line_renderer::server::util::{format_triangle_dump, init_logging};

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <document.json|document.msgpack> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --thickness <t>      Override the document thickness");
        eprintln!("  --no-center          Disable the center offset");
        eprintln!("  --abort-degenerate   Abort the whole build on a segment with < 2 points");
        eprintln!("  --segment <n>        Only show ranges for one segment");
        eprintln!("  --triangles <n>      Number of triangles to dump (default 50)");
        eprintln!("  --binary <path>      Also write the binary mesh to a file");
        eprintln!("  --summary            Show summary stats only");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} drawing.json --summary", args[0]);
        eprintln!("  {} drawing.json --no-center --triangles 200", args[0]);
        return Ok(());
    }

    let doc_path = &args[1];

    let mut thickness: Option<f32> = None;
    let mut no_center = false;
    let mut abort_degenerate = false;
    let mut segment_filter: Option<usize> = None;
    let mut triangle_limit = 50usize;
    let mut binary_path: Option<String> = None;
    let mut summary_only = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--thickness" => {
                i += 1;
                if i < args.len() {
                    thickness = Some(args[i].parse()?);
                }
            }
            "--segment" => {
                i += 1;
                if i < args.len() {
                    segment_filter = Some(args[i].parse()?);
                }
            }
            "--triangles" => {
                i += 1;
                if i < args.len() {
                    triangle_limit = args[i].parse()?;
                }
            }
            "--binary" => {
                i += 1;
                if i < args.len() {
                    binary_path = Some(args[i].clone());
                }
            }
            "--no-center" => no_center = true,
            "--abort-degenerate" => abort_degenerate = true,
            "--summary" => summary_only = true,
            other => log::warn!("Ignoring unknown option {}", other),
        }
        i += 1;
    }

    log::info!("Loading: {}", doc_path);
    let start = Instant::now();
    let doc = load_line_document(doc_path)?;
    log::info!("Document loaded in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    let mut params = doc.params();
    if let Some(t) = thickness {
        params = params.with_thickness(t);
    }
    if no_center {
        params = params.with_center_offset(false);
    }
    if abort_degenerate {
        params = params.with_degenerate(DegenerateSegments::AbortBuild);
    }

    let start = Instant::now();
    let (mesh, ranges) = tessellate_segments_with_ranges(doc.segments.segments(), &params)?;
    log::info!("Tessellated in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    if !summary_only {
        for (idx, segment) in doc.segments.segments().iter().enumerate() {
            if segment_filter.is_some_and(|s| s != idx) {
                continue;
            }
            let (expected_verts, expected_tris) = segment_mesh_size(segment.len(), segment.is_closed());
            println!("=== Segment {} ===", idx);
            println!("  Points: {}, closed: {}", segment.len(), segment.is_closed());
            println!("  Expected: {} vertices, {} triangles", expected_verts, expected_tris);
            match ranges.iter().find(|r| r.segment_index == idx) {
                Some(r) => println!("  Emitted: vertices {}..{}, triangles {}..{}",
                    r.first_vertex, r.first_vertex + r.vertex_count,
                    r.first_triangle, r.first_triangle + r.triangle_count),
                None => println!("  Emitted: nothing"),
            }
        }

        println!();
        println!("=== Triangles (first {}) ===", triangle_limit);
        for line in format_triangle_dump(&mesh, triangle_limit) {
            println!("{}", line);
        }
        println!();
    }

    println!("=== Summary ===");
    println!("  Segments: {}", doc.segments.len());
    println!("  Points: {}", doc.segments.point_count());
    println!("  Thickness: {}, center: {}", params.thickness, params.center_offset);
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Indices in bounds: {}", mesh.indices_in_bounds());
    if let Some([min_x, min_y, max_x, max_y]) = mesh.bounds() {
        println!("  Bounds: ({:.2},{:.2})-({:.2},{:.2})", min_x, min_y, max_x, max_y);
    }

    if let Some(path) = binary_path {
        let bytes = serialize_mesh_binary(&mesh)?;
        std::fs::write(&path, &bytes)?;
        println!("  Wrote {} bytes to {}", bytes.len(), path);
    }

    Ok(())
}
