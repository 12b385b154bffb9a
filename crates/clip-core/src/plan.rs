//! Build the command for an intercepted event

use clip_content::paste::{escape_html, sanitize_html};
use clip_content::serializer::FREEFORM_BLOCK;
use clip_content::{Block, BlockCodec, ClientId, PasteRequest};

use crate::command::{Command, CopyCommand, ReplaceBlocks};
use crate::config::{ClipboardSettings, ParseFailurePolicy};
use crate::error::Result;
use crate::event::ClipboardEventKind;
use crate::notice::Notice;
use crate::selection::SelectionQuery;
use crate::transfer::ClipboardTransfer;

/// Plan the block operation for an event that was intercepted.
///
/// Copy and cut serialize `selected` in order; paste parses `transfer` and
/// replaces the whole selection. Nothing is written or mutated here.
///
/// # Errors
/// Propagates `BlockNotFound` for stale ids and paste parse failures,
/// unless the settings ask for raw text on parse failure.
pub fn plan<S, C>(
    kind: ClipboardEventKind,
    selected: &[ClientId],
    selection: &S,
    codec: &C,
    transfer: &ClipboardTransfer,
    settings: &ClipboardSettings,
) -> Result<Command>
where
    S: SelectionQuery + ?Sized,
    C: BlockCodec + ?Sized,
{
    match kind {
        ClipboardEventKind::Copy => Ok(Command::Copy(plan_copy(selected, selection, codec)?)),
        ClipboardEventKind::Cut => Ok(Command::Cut {
            copy: plan_copy(selected, selection, codec)?,
            remove: selected.to_vec(),
        }),
        ClipboardEventKind::Paste => {
            let request = transfer.paste_request(settings.can_user_use_unfiltered_html);
            let blocks = parse_paste(codec, &request, settings.on_parse_failure)?;
            Ok(Command::Replace(ReplaceBlocks::new(selected.to_vec(), blocks)))
        }
    }
}

fn plan_copy<S, C>(selected: &[ClientId], selection: &S, codec: &C) -> Result<CopyCommand>
where
    S: SelectionQuery + ?Sized,
    C: BlockCodec + ?Sized,
{
    let blocks = selection.blocks_by_ids(selected)?;
    let payload = codec.serialize(&blocks);

    let (notice, flash) = match selected {
        [client_id] => {
            let block_type = selection.block_type(client_id)?;
            (Notice::copied_block(&block_type.title), Some(*client_id))
        }
        _ => (Notice::copied_blocks(selected.len()), None),
    };

    Ok(CopyCommand {
        payload,
        notice,
        flash,
    })
}

fn parse_paste<C>(
    codec: &C,
    request: &PasteRequest,
    policy: ParseFailurePolicy,
) -> Result<Vec<Block>>
where
    C: BlockCodec + ?Sized,
{
    match codec.parse_clipboard_content(request) {
        Ok(blocks) => Ok(blocks),
        Err(e) if policy == ParseFailurePolicy::InsertRawText => match raw_text_block(request) {
            Some(block) => {
                tracing::warn!(
                    error = %e,
                    "Could not parse pasted content, inserting it as raw text"
                );
                Ok(vec![block])
            }
            None => Err(e.into()),
        },
        Err(e) => Err(e.into()),
    }
}

/// One freeform block holding the pasted content as-is.
///
/// Uses the HTML channel when it has content after filtering, otherwise the
/// escaped plain text.
fn raw_text_block(request: &PasteRequest) -> Option<Block> {
    let html = if request.allow_unfiltered_html {
        request.html.clone()
    } else {
        sanitize_html(&request.html)
    };
    let html = html.trim();
    if !html.is_empty() {
        return Some(Block::with_html(FREEFORM_BLOCK, html));
    }

    let text = request.plain_text.trim();
    if text.is_empty() {
        return None;
    }
    Some(Block::with_html(FREEFORM_BLOCK, escape_html(text)))
}
