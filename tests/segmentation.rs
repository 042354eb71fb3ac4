use glyph_pipeline::{Direction, Script, Segmenter};

#[test]
fn segments_cover_the_input_exactly_once_in_order() {
    let input = "Hello \u{0645}\u{0631}\u{062d}\u{0628}\u{0627} World! 123";
    let segments = Segmenter::new(Direction::Ltr).segment(input);

    let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(joined, input);

    let mut cursor = 0;
    for segment in &segments {
        assert_eq!(segment.start_byte, cursor, "segments must be contiguous");
        cursor = segment.end_byte;
    }
    assert_eq!(cursor, input.len());
}

#[test]
fn every_segment_is_uniform_in_level_and_script() {
    let input = "abc \u{05d0}\u{05d1}\u{05d2} def";
    let segments = Segmenter::new(Direction::Ltr).segment(input);
    for segment in &segments {
        for c in segment.text.chars() {
            let script = glyph_pipeline::detect_script(c);
            assert!(
                script == segment.script || script.is_context_dependent(),
                "char {c:?} (script {script:?}) doesn't belong in a {:?} segment",
                segment.script
            );
        }
    }
}

#[test]
fn rtl_base_direction_is_honored_for_pure_rtl_text() {
    let input = "\u{05d0}\u{05d1}\u{05d2}";
    let segments = Segmenter::new(Direction::Rtl).segment(input);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].direction, Direction::Rtl);
    assert_eq!(segments[0].script, Script::Hebrew);
}

#[test]
fn empty_input_has_no_segments() {
    assert!(Segmenter::new(Direction::Ltr).segment("").is_empty());
}

#[test]
fn latin_punctuation_does_not_fragment_a_run() {
    let segments = Segmenter::new(Direction::Ltr).segment("Hello, World! 42");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].script, Script::Latin);
}
