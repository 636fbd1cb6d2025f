use crate::model::*;
use serde_json::json;

fn sample_board() -> Board {
    let text = json!({
        "notes": [
            {
                "id": "n1",
                "position": { "x": 100.0, "y": 100.0 },
                "paragraphs": [
                    { "id": "n1p0", "content": "First paragraph of note 1.", "position": 0,
                      "linkedParagraphs": ["n2p5"] },
                    { "id": "n1p1", "content": "Second paragraph.", "position": 1 },
                    { "id": "n1p2", "content": "Third paragraph.", "position": 2,
                      "linkedParagraphs": ["n2p2", "n2p3"] }
                ]
            },
            {
                "id": "n2",
                "position": { "x": 600.0, "y": 100.0 },
                "paragraphs": [
                    { "id": "n2p2", "content": "Receives links.", "position": 0 },
                    { "id": "n2p3", "content": "Also receives links.", "position": 1 },
                    { "id": "n2p5", "content": "Final link target.", "position": 2 }
                ]
            }
        ],
        "links": [
            { "from": "n1p2", "to": ["n2p2", "n2p3"] },
            { "from": "n1p0", "to": ["n2p5"] }
        ]
    })
    .to_string();
    Board::from_json(&text).unwrap()
}

#[test]
fn fan_out_links_flatten_in_declaration_order() {
    let board = sample_board();
    let pairs = board.link_pairs();
    assert_eq!(
        pairs,
        vec![
            LinkPair {
                source: "n1p2".to_string(),
                target: "n2p2".to_string()
            },
            LinkPair {
                source: "n1p2".to_string(),
                target: "n2p3".to_string()
            },
            LinkPair {
                source: "n1p0".to_string(),
                target: "n2p5".to_string()
            },
        ]
    );
}

#[test]
fn pair_form_links_are_accepted_too() {
    let board = Board::from_json(
        &json!({
            "notes": [],
            "links": [
                { "source": "a", "target": "b" },
                { "from": "c", "to": ["d", "e"] }
            ]
        })
        .to_string(),
    )
    .unwrap();
    let pairs = board.link_pairs();
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0].source, "a");
    assert_eq!(pairs[1].target, "d");
    assert_eq!(pairs[2].target, "e");
}

#[test]
fn connected_paragraphs_walk_links_in_both_directions() {
    let board = sample_board();
    assert_eq!(board.connected_paragraphs("n1p2"), vec!["n2p2", "n2p3"]);
    // Reverse direction: a target sees its source.
    assert_eq!(board.connected_paragraphs("n2p3"), vec!["n1p2"]);
    assert!(board.connected_paragraphs("n1p1").is_empty());
}

#[test]
fn duplicate_paragraph_ids_are_rejected() {
    let err = Board::from_json(
        &json!({
            "notes": [
                { "id": "n1", "paragraphs": [{ "id": "p", "position": 0 }] },
                { "id": "n2", "paragraphs": [{ "id": "p", "position": 0 }] }
            ],
            "links": []
        })
        .to_string(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Duplicate paragraph id: p");
}

#[test]
fn events_reject_inverted_time_ranges() {
    let err = events_from_json(
        &json!([
            { "id": "e1", "name": "build", "startTime": 1000, "endTime": 500 }
        ])
        .to_string(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("ends before it starts"));
}

#[test]
fn event_payload_fields_round_trip() {
    let events = events_from_json(
        &json!([
            { "id": "e1", "name": "build", "startTime": 0, "endTime": 1000,
              "type": "ci", "details": { "exit": 0 } }
        ])
        .to_string(),
    )
    .unwrap();
    assert_eq!(events[0].duration_ms(), 1000);
    assert_eq!(events[0].kind.as_deref(), Some("ci"));
    let round_tripped = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(round_tripped["type"], "ci");
    assert_eq!(round_tripped["details"]["exit"], 0);
}
