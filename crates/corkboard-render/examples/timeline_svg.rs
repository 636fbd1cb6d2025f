use corkboard_core::events_from_json;
use corkboard_render::svg::timeline_svg;
use corkboard_render::timeline::{TimelineOptions, layout_timeline};
use std::io::Read;

fn main() {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("read stdin");

    let events = events_from_json(&input).expect("events JSON");
    let layout = layout_timeline(&events, &TimelineOptions::default());
    print!("{}", timeline_svg(&layout));
}
