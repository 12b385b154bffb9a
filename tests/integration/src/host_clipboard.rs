//! Clipboard content as real hosts deliver it

use std::time::Duration;

use clip_content::Block;
use clip_core::{
    ClipboardEvent, ClipboardSettings, ClipboardTransfer, DeclineReason, Outcome, TransferFile,
};
use clip_test_utils::{BLOCK_NODE, FOREIGN_NODE, FixtureDocument, FixtureEditor, interceptor};
use pretty_assertions::assert_eq;

fn selected_paragraphs(count: usize) -> FixtureEditor {
    clip_core::logging::init_for_tests();
    let blocks = (0..count)
        .map(|i| Block::with_html("paragraph", format!("<p>{i}</p>")))
        .collect();
    let mut editor = FixtureEditor::with_blocks(blocks);
    editor.select_all();
    editor
}

#[tokio::test]
async fn test_windows_html_clipboard() {
    let html = "<html><head><meta charset=\"utf-8\"><title>x</title></head><body>\
                <!--StartFragment--><h3>Title</h3><ul><li>one</li></ul><!--EndFragment-->\
                </body></html>";
    let (mut interceptor, _) =
        interceptor(selected_paragraphs(2), FixtureDocument::new(), ClipboardSettings::default());

    interceptor
        .on_paste(&mut ClipboardEvent::paste(
            BLOCK_NODE,
            ClipboardTransfer::with_content(html, "Title\none"),
        ))
        .unwrap();

    let blocks = interceptor.editor().blocks();
    assert_eq!(interceptor.editor().block_names(), vec!["core/heading", "core/list"]);
    assert_eq!(blocks[0].attributes["level"], 3);
    assert_eq!(blocks[1].inner_html(), "<ul><li>one</li></ul>");
}

#[tokio::test]
async fn test_pasted_images_become_image_blocks() {
    let transfer = ClipboardTransfer::with_content("", "screenshot.png")
        .with_file(TransferFile::new("screenshot.png", "image/png", "blob:host/1"));
    let (mut interceptor, _) =
        interceptor(selected_paragraphs(2), FixtureDocument::new(), ClipboardSettings::default());

    interceptor
        .on_paste(&mut ClipboardEvent::paste(BLOCK_NODE, transfer))
        .unwrap();

    let blocks = interceptor.editor().blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].name, "core/image");
    assert_eq!(blocks[0].attributes["url"], "blob:host/1");
}

#[tokio::test]
async fn test_scripts_never_reach_the_store() {
    let html = r#"<p onclick="steal()">hello</p><script>steal()</script>"#;
    let (mut interceptor, _) =
        interceptor(selected_paragraphs(2), FixtureDocument::new(), ClipboardSettings::default());

    interceptor
        .on_paste(&mut ClipboardEvent::paste(
            BLOCK_NODE,
            ClipboardTransfer::with_content(html, "hello"),
        ))
        .unwrap();

    let html: Vec<String> = interceptor.editor().blocks().iter().map(Block::inner_html).collect();
    assert_eq!(html, vec!["<p>hello</p>"]);
}

#[tokio::test]
async fn test_plain_text_paragraphs() {
    let (mut interceptor, _) =
        interceptor(selected_paragraphs(2), FixtureDocument::new(), ClipboardSettings::default());

    interceptor
        .on_paste(&mut ClipboardEvent::paste(
            BLOCK_NODE,
            ClipboardTransfer::with_content("", "first\nline\n\nsecond"),
        ))
        .unwrap();

    let html: Vec<String> = interceptor.editor().blocks().iter().map(Block::inner_html).collect();
    assert_eq!(html, vec!["<p>first<br>line</p>", "<p>second</p>"]);
}

#[tokio::test]
async fn test_events_from_other_widgets_pass_through() {
    let (mut interceptor, _) =
        interceptor(selected_paragraphs(3), FixtureDocument::new(), ClipboardSettings::default());
    let mut paste =
        ClipboardEvent::paste(FOREIGN_NODE, ClipboardTransfer::with_content("<p>x</p>", "x"));

    assert_eq!(
        interceptor.on_paste(&mut paste).unwrap(),
        Outcome::Declined(DeclineReason::ForeignTarget)
    );
    assert!(!paste.is_default_prevented());
    assert_eq!(interceptor.editor().blocks().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_flash_timers_run_on_worker_threads() {
    let settings = ClipboardSettings {
        flash_duration_ms: 20,
        ..ClipboardSettings::default()
    };
    let (mut interceptor, state) =
        interceptor(selected_paragraphs(1), FixtureDocument::new(), settings);
    let id = interceptor.editor().selection()[0];

    interceptor.on_copy(&mut ClipboardEvent::copy(BLOCK_NODE)).unwrap();
    assert!(state.is_highlighted(&id));

    for _ in 0..100 {
        if !state.is_highlighted(&id) && interceptor.flash().pending() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(!state.is_highlighted(&id));
    assert_eq!(interceptor.flash().pending(), 0);
}
