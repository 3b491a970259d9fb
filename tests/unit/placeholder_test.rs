//! Unit tests for placeholder markup

use fbfsvg::{generate_loading_spinner, generate_placeholder, ThumbnailState};

fn font_sizes(svg: &str) -> Vec<f32> {
    svg.split(r#"font-size=""#)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter_map(|value| value.parse().ok())
        .collect()
}

#[test]
fn placeholder_is_deterministic() {
    for state in ThumbnailState::ALL {
        assert_eq!(
            generate_placeholder(160.0, 120.0, state, 9),
            generate_placeholder(160.0, 120.0, state, 9)
        );
    }
}

#[test]
fn spinner_matches_loading_placeholder() {
    assert_eq!(
        generate_loading_spinner(200.0, 200.0, 4),
        generate_placeholder(200.0, 200.0, ThumbnailState::Loading, 4)
    );
}

#[test]
fn pending_and_loading_both_animate() {
    for state in [ThumbnailState::Pending, ThumbnailState::Loading] {
        let out = generate_placeholder(200.0, 200.0, state, 0);
        assert!(out.contains("<animate"), "{state}");
        assert!(out.contains("Loading..."), "{state}");
    }
}

#[test]
fn label_font_is_clamped() {
    let tiny = generate_placeholder(20.0, 20.0, ThumbnailState::NotLoaded, 0);
    assert_eq!(font_sizes(&tiny), vec![10.0]);

    let huge = generate_placeholder(1000.0, 1000.0, ThumbnailState::NotLoaded, 0);
    assert_eq!(font_sizes(&huge), vec![20.0]);

    let mid = generate_placeholder(150.0, 150.0, ThumbnailState::NotLoaded, 0);
    assert_eq!(font_sizes(&mid), vec![15.0]);
}

#[test]
fn ready_state_falls_back_to_label() {
    let out = generate_placeholder(100.0, 100.0, ThumbnailState::Ready, 0);
    assert!(out.contains(">SVG<"));
    assert!(!out.contains("animate"));
}
