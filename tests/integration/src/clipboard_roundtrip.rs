//! Copy/cut in one editor, paste in another, through the full stack

use clip_content::Block;
use clip_core::{ClipboardEvent, ClipboardSettings, ClipboardTransfer, TEXT_HTML, TEXT_PLAIN};
use clip_test_utils::{BLOCK_NODE, FixtureDocument, FixtureEditor, interceptor};
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_blocks() -> Vec<Block> {
    vec![
        Block::with_html("heading", "<h2>Release notes</h2>").attribute("level", json!(2)),
        Block::with_html("paragraph", "<p>Fixed <em>everything</em> &amp; more.</p>"),
        Block::new("group")
            .html("<div class=\"wp-group\">")
            .child(Block::with_html("quote", "<blockquote>Ship it</blockquote>"))
            .child(Block::new("separator"))
            .html("</div>"),
        Block::with_html("html", "<marquee>hi</marquee>").attribute("note", json!("a--b <c> & d")),
        Block::with_html("freeform", "<p>Classic <b>content</b></p>"),
    ]
}

/// Copy the whole of `blocks` and return the written transfer
async fn copy_all(blocks: Vec<Block>) -> ClipboardTransfer {
    clip_core::logging::init_for_tests();
    let mut editor = FixtureEditor::with_blocks(blocks);
    editor.select_all();
    let (mut source, _) = interceptor(editor, FixtureDocument::new(), ClipboardSettings::default());

    let mut event = ClipboardEvent::copy(BLOCK_NODE);
    assert!(source.on_copy(&mut event).unwrap().is_handled());
    event.clipboard_data().clone()
}

#[tokio::test]
async fn test_copy_then_paste_preserves_blocks() {
    let original = sample_blocks();
    let transfer = copy_all(original.clone()).await;
    assert_eq!(transfer.get_data(TEXT_PLAIN), transfer.get_data(TEXT_HTML));

    let mut target = FixtureEditor::with_blocks(vec![Block::with_html("paragraph", "<p>old</p>")]);
    target.select_all();
    let (mut destination, _) =
        interceptor(target, FixtureDocument::new(), ClipboardSettings::default());

    let mut paste = ClipboardEvent::paste(BLOCK_NODE, transfer);
    assert!(destination.on_paste(&mut paste).unwrap().is_handled());

    let pasted = destination.editor().blocks();
    assert_eq!(pasted.len(), original.len());
    for (pasted, original) in pasted.iter().zip(&original) {
        assert!(
            pasted.structurally_eq(original),
            "{pasted:#?}\n!=\n{original:#?}"
        );
        assert_ne!(pasted.client_id, original.client_id);
    }
}

#[tokio::test]
async fn test_plain_text_channel_alone_round_trips() {
    let original = sample_blocks();
    let transfer = copy_all(original.clone()).await;
    let plain_only = ClipboardTransfer::with_content("", transfer.get_data(TEXT_PLAIN));

    let mut target =
        FixtureEditor::with_blocks(vec![Block::new("separator"), Block::new("separator")]);
    target.select_all();
    let (mut destination, _) =
        interceptor(target, FixtureDocument::new(), ClipboardSettings::default());
    destination
        .on_paste(&mut ClipboardEvent::paste(BLOCK_NODE, plain_only))
        .unwrap();

    let names: Vec<String> = original.iter().map(|b| b.name.clone()).collect();
    assert_eq!(destination.editor().block_names(), names);
}

#[tokio::test]
async fn test_cut_and_paste_moves_blocks() {
    let blocks = vec![
        Block::with_html("paragraph", "<p>a</p>"),
        Block::with_html("paragraph", "<p>b</p>"),
        Block::with_html("paragraph", "<p>c</p>"),
        Block::with_html("paragraph", "<p>d</p>"),
    ];
    let ids: Vec<_> = blocks.iter().map(|b| b.client_id).collect();
    let mut editor = FixtureEditor::with_blocks(blocks);
    editor.select(&ids[..2]);
    let (mut interceptor, _) =
        interceptor(editor, FixtureDocument::new(), ClipboardSettings::default());

    let mut cut = ClipboardEvent::cut(BLOCK_NODE);
    interceptor.on_cut(&mut cut).unwrap();
    assert_eq!(interceptor.editor().block_ids(), ids[2..].to_vec());

    interceptor.editor_mut().select(&ids[3..]);
    let mut paste = ClipboardEvent::paste(BLOCK_NODE, cut.clipboard_data().clone());
    interceptor.on_paste(&mut paste).unwrap();

    let html: Vec<String> = interceptor
        .editor()
        .blocks()
        .iter()
        .map(Block::inner_html)
        .collect();
    assert_eq!(html, vec!["<p>c</p>", "<p>a</p>", "<p>b</p>"]);
}
