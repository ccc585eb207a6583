#![no_main]

use libfuzzer_sys::fuzz_target;
use templ_ide::{IndentStyle, TextSize};

const MAX_SOURCE_BYTES: usize = 4096;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fn style_from_seed(seed: u8) -> IndentStyle {
    if seed & 1 == 0 {
        IndentStyle::spaces(u32::from(seed >> 1) % 9)
    } else {
        IndentStyle::tabs()
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&seed, rest)) = data.split_first() else {
        return;
    };
    let source = decode_source(rest);
    let style = style_from_seed(seed);

    let edits = templ_ide::reindent(&source, style);
    let line_count = source.split('\n').count();
    for edit in &edits {
        assert!((edit.line as usize) < line_count);
        let (start, end) = (usize::from(edit.range.start()), usize::from(edit.range.end()));
        assert!(source.get(start..end).is_some());
        assert!(!edit.new_text.contains('\n'));
    }

    let once = templ_ide::reindent_text(&source, style);
    assert_eq!(once.split('\n').count(), line_count);
    assert_eq!(templ_ide::reindent_text(&once, style), once);

    let offset = usize::from(seed) % (source.len() + 1);
    let _ = templ_ide::hover(&source, TextSize::from(offset as u32));
});
