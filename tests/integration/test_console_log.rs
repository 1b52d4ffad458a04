//! Integration Tests for Annotated Console Logs
//!
//! Writes raw output through a `ConsoleWriter`, reads it back with
//! `ConsoleLog` and checks the rendered HTML.

#[path = "../test_utils/fixtures.rs"]
mod fixtures;

use std::sync::Arc;

use ansicolor::persistence::{find_notes, PREAMBLE};
use ansicolor::{
    AnsiColorNote, ColorPalette, ConsoleLog, ConsoleNoteCodec, ConsoleWriter, Error, NoteCodec,
    Result,
};
use fixtures::*;

const BUILD_OUTPUT: &str = "\
Compiling app v0.1.0
\x1b[1m\x1b[33mwarning\x1b[0m: unused variable
\x1b[1m\x1b[31merror\x1b[0m: see file:///work/app/src/main.rs:3
Finished with errors, log at \"file:///tmp/build log.txt\"
";

fn annotated(raw: &str) -> String {
    let mut writer = ConsoleWriter::new(Vec::new(), ConsoleNoteCodec);
    writer.write_lines(raw).unwrap();
    writer.flush().unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn test_annotated_log_round_trip() {
    let log = annotated(BUILD_OUTPUT);
    assert_eq!(find_notes(&log).len(), 3);

    let parsed = ConsoleLog::parse(&log, &ConsoleNoteCodec);
    assert_eq!(parsed.text(), BUILD_OUTPUT);
    for (offset, note) in parsed.notes() {
        assert_eq!(&parsed.text()[*offset..*offset + note.data().len()], note.data());
    }
}

#[test]
fn test_render_build_output() {
    let log = annotated(BUILD_OUTPUT);
    let html = ConsoleLog::parse(&log, &ConsoleNoteCodec).render_html(&ColorPalette::xterm());

    assert!(html.starts_with("<pre>Compiling app v0.1.0\n<span style=\"color: #CDCD00;\"><b>warning</b></span>"));
    assert!(html.contains(&format!("{XTERM_RED}<b>error</b></span>: see <a href=\"file:///work/app/src/main.rs:3\">")));
    assert!(html.contains("<a href=\"file:///tmp/build log.txt\">&quot;file:///tmp/build log.txt&quot;</a>"));
    assert!(html.ends_with("</pre>"));
    assert!(is_nested(&html), "{html}");
    // The raw escape bytes never reach the output
    assert!(!html.contains('\x1b'));
}

#[test]
fn test_writer_palette_is_recorded() {
    let mut writer =
        ConsoleWriter::new(Vec::new(), ConsoleNoteCodec).with_palette(Arc::new(ColorPalette::css()));
    writer.write_chunk("\x1b[31mred\x1b[0m").unwrap();
    let log = String::from_utf8(writer.into_inner()).unwrap();

    let html = ConsoleLog::parse(&log, &ConsoleNoteCodec).render_html(&ColorPalette::xterm());
    assert!(html.starts_with("<pre><span style=\"color: red;\">red</span>"));
}

#[test]
fn test_plain_output_has_no_notes() {
    let log = annotated("one\ntwo\n");
    assert_eq!(log, "one\ntwo\n");

    let html = ConsoleLog::parse(&log, &ConsoleNoteCodec).render_html(&ColorPalette::xterm());
    assert_eq!(html, "<pre>one\ntwo\n</pre>");
}

#[test]
fn test_encode_failure_writes_chunk_only() {
    struct Refusing;

    impl NoteCodec for Refusing {
        fn encode(&self, _note: &AnsiColorNote) -> Result<String> {
            Err(Error::NoteEncodingFailed {
                reason: "refused".to_string(),
            })
        }

        fn decode(&self, token: &str) -> Result<AnsiColorNote> {
            ConsoleNoteCodec.decode(token)
        }
    }

    let mut writer = ConsoleWriter::new(Vec::new(), Refusing);
    writer.write_chunk("\x1b[1mx").unwrap();
    assert_eq!(writer.notes_written(), 0);
    assert_eq!(writer.into_inner(), b"\x1b[1mx");
}

#[test]
fn test_corrupt_note_falls_back_to_escaped_text() {
    let log = format!("{PREAMBLE}not base64!\x1b[0m\x1b[1mbold\x1b[0m\n");
    let parsed = ConsoleLog::parse(&log, &ConsoleNoteCodec);
    assert!(parsed.notes().is_empty());

    let html = parsed.render_html(&ColorPalette::xterm());
    assert_eq!(html, "<pre>&#27;[1mbold&#27;[0m\n</pre>");
}
