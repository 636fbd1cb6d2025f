use corkboard_core::{Board, BoardEvent, FixedMeasure, RectData, Runtime};
use corkboard_render::links::layout_links;
use corkboard_render::svg::links_layer_svg;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

#[derive(Deserialize)]
struct SnapshotDocument {
    board: Board,
    container: RectData,
    #[serde(default)]
    measurements: HashMap<String, RectData>,
}

fn main() {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("read stdin");

    let doc: SnapshotDocument = serde_json::from_str(&input).expect("snapshot JSON");
    doc.board.validate().expect("valid board");

    let mounts: Vec<(String, String)> = doc
        .board
        .notes
        .iter()
        .flat_map(|n| n.paragraphs.iter().map(|p| (n.id.clone(), p.id.clone())))
        .collect();

    let mut runtime = Runtime::new(doc.board);
    let container = Arc::new(FixedMeasure::new(doc.container.to_rect()));
    for (note_id, paragraph_id) in mounts {
        let Some(rect) = doc.measurements.get(&paragraph_id) else {
            continue;
        };
        runtime.apply(BoardEvent::ParagraphMounted {
            note_id,
            paragraph_id,
            handle: Arc::new(FixedMeasure::new(rect.to_rect())),
            container: Some(container.clone()),
        });
    }
    runtime.apply(BoardEvent::RecalculateRequested);
    runtime.run_frame();

    let layout = layout_links(
        &runtime.board().link_pairs(),
        runtime.positions(),
        runtime.selection(),
    );
    print!("{}", links_layer_svg(&layout));
}
