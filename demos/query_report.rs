use chunk_linearization::{
    chunk_bounds, compute_query_result, global_index, make_displayable, parent_chunk, CellOrdering,
    LayoutConfig, QueryBox, QueryConfig,
};
use nalgebra::Vector3;

fn main() -> chunk_linearization::Result<()> {
    env_logger::init();

    // A 2D array of 6x6 cells, stored in chunks of 4x4 cells. The chunks on the right and bottom edges are partial
    // (2 cells wide or high), and are stored as if they were smaller grids of their own
    let size = Vector3::new(6, 6, 1);
    let chunk = Vector3::new(4, 4, 1);

    // Orderings can be given by their names, e.g. when they come from a settings file or a UI control
    let cell_ordering: CellOrdering = "hilbert".parse()?;
    let chunk_ordering: CellOrdering = "row-major".parse()?;
    let layout = LayoutConfig::new(size, chunk, cell_ordering, chunk_ordering);

    // Querying a 2x2 box that straddles all four chunks forces a chunked reader to fetch every chunk
    let config = QueryConfig::new(layout, QueryBox::new_2d([3, 4], [3, 4]));
    let result = compute_query_result(&config)?;
    let metrics = result.metrics();
    println!(
        "{} cells requested, {} chunks touched, {} cells read",
        metrics.requested_cells, metrics.touched_chunks, metrics.actual_cells
    );
    println!("chunked ranges:   {}", make_displayable(&result.chunked_ranges));
    println!("unchunked ranges: {}", make_displayable(&result.unchunked_ranges));
    if let (Some(amplification), Some(efficiency)) = (metrics.amplification, metrics.efficiency) {
        println!("amplification {:.2}x, efficiency {:.1}%", amplification, efficiency);
    }

    // Hover-style lookups for single cells, without analyzing a whole query
    let cell = Vector3::new(4, 1, 0);
    println!(
        "cell {:?} lives in chunk {:?} at global index {}",
        cell.as_slice(),
        parent_chunk(cell, &layout)?.as_slice(),
        global_index(cell, &layout)?
    );

    // Pixel regions of each chunk for a renderer
    for chunk_y in 0..2 {
        for chunk_x in 0..2 {
            let (x0, y0, x1, y1) = chunk_bounds(chunk_x, chunk_y, chunk.x, chunk.y, size.x, size.y);
            println!("chunk ({}, {}) covers x {}..{}, y {}..{}", chunk_x, chunk_y, x0, x1, y0, y1);
        }
    }

    Ok(())
}
