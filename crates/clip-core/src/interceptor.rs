//! The clipboard event handlers

use std::sync::Arc;

use clip_content::{BlockCodec, MarkupCodec};

use crate::command::{Command, CopyCommand, EditorSink};
use crate::config::ClipboardSettings;
use crate::decision::{DeclineReason, Decision, EventFacts, decide};
use crate::error::Result;
use crate::event::{ClipboardEvent, ClipboardEventKind};
use crate::flash::{BlockHighlighter, FlashManager};
use crate::plan::plan;
use crate::selection::{HostDocument, NodeId, SelectionQuery, SelectionSnapshot};
use crate::transfer::{ClipboardTransfer, TEXT_HTML, TEXT_PLAIN};

/// Result of handling one clipboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Left to the host; the default action was not suppressed
    Declined(DeclineReason),
    /// Claimed and carried out at block level
    Handled(ClipboardEventKind),
}

impl Outcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// Block-level clipboard handling for one editor container
///
/// The editor supplies both the selection and the mutation sink. Events
/// are handled synchronously; only the flash timers outlive a call.
pub struct ClipboardInterceptor<E, D, C = MarkupCodec> {
    editor: E,
    document: D,
    codec: C,
    container: NodeId,
    settings: ClipboardSettings,
    flash: FlashManager,
}

impl<E, D> ClipboardInterceptor<E, D, MarkupCodec>
where
    E: SelectionQuery + EditorSink,
    D: HostDocument,
{
    /// Create an interceptor using the markup codec.
    ///
    /// Flash timers run on the current tokio runtime.
    ///
    /// # Errors
    /// Returns `NoRuntime` when called outside a runtime.
    pub fn new(
        editor: E,
        document: D,
        container: NodeId,
        highlighter: Arc<dyn BlockHighlighter>,
        settings: ClipboardSettings,
    ) -> Result<Self> {
        let flash = FlashManager::new(highlighter, settings.flash_duration())?;
        Ok(Self::with_parts(editor, document, MarkupCodec::new(), container, settings, flash))
    }
}

impl<E, D, C> ClipboardInterceptor<E, D, C>
where
    E: SelectionQuery + EditorSink,
    D: HostDocument,
    C: BlockCodec,
{
    pub fn with_parts(
        editor: E,
        document: D,
        codec: C,
        container: NodeId,
        settings: ClipboardSettings,
        flash: FlashManager,
    ) -> Self {
        Self {
            editor,
            document,
            codec,
            container,
            settings,
            flash,
        }
    }

    /// Swap the codec used for serializing and parsing
    pub fn with_codec<C2: BlockCodec>(self, codec: C2) -> ClipboardInterceptor<E, D, C2> {
        ClipboardInterceptor {
            editor: self.editor,
            document: self.document,
            codec,
            container: self.container,
            settings: self.settings,
            flash: self.flash,
        }
    }

    pub fn on_copy(&mut self, event: &mut ClipboardEvent) -> Result<Outcome> {
        debug_assert_eq!(event.kind(), ClipboardEventKind::Copy);
        self.handle_event(event)
    }

    pub fn on_cut(&mut self, event: &mut ClipboardEvent) -> Result<Outcome> {
        debug_assert_eq!(event.kind(), ClipboardEventKind::Cut);
        self.handle_event(event)
    }

    pub fn on_paste(&mut self, event: &mut ClipboardEvent) -> Result<Outcome> {
        debug_assert_eq!(event.kind(), ClipboardEventKind::Paste);
        self.handle_event(event)
    }

    /// Handle any clipboard event according to its kind.
    ///
    /// # Errors
    /// Selection and parse errors propagate after the event has been
    /// claimed; the host's default action then stays suppressed.
    pub fn handle_event(&mut self, event: &mut ClipboardEvent) -> Result<Outcome> {
        let snapshot =
            SelectionSnapshot::capture(&self.editor, &self.document, event.kind());
        let facts = EventFacts {
            kind: event.kind(),
            already_claimed: event.is_claimed(),
            target_in_container: self.document.contains(self.container, event.target()),
        };

        let kind = match decide(&facts, &snapshot) {
            Decision::Intercept(kind) => kind,
            Decision::Decline(reason) => {
                tracing::debug!(
                    kind = %facts.kind,
                    %reason,
                    "Leaving clipboard event to the host"
                );
                return Ok(Outcome::Declined(reason));
            }
        };

        event.claim();
        tracing::info!(%kind, blocks = snapshot.len(), "Handling clipboard event");

        let command = plan(
            kind,
            &snapshot.selected,
            &self.editor,
            &self.codec,
            event.clipboard_data(),
            &self.settings,
        )?;
        self.execute(command, event.clipboard_data_mut());
        Ok(Outcome::Handled(kind))
    }

    fn execute(&mut self, command: Command, transfer: &mut ClipboardTransfer) {
        match command {
            Command::Copy(copy) => self.write_copy(copy, transfer),
            Command::Cut { copy, remove } => {
                self.write_copy(copy, transfer);
                self.editor.remove_blocks(&remove);
            }
            Command::Replace(replace) => {
                tracing::debug!(
                    targets = replace.targets.len(),
                    blocks = replace.blocks.len(),
                    "Replacing selection with pasted blocks"
                );
                self.editor.replace_blocks(replace);
            }
        }
    }

    fn write_copy(&mut self, copy: CopyCommand, transfer: &mut ClipboardTransfer) {
        transfer.set_data(TEXT_PLAIN, copy.payload.as_str());
        transfer.set_data(TEXT_HTML, copy.payload);
        if let Some(client_id) = copy.flash {
            self.flash.flash(client_id);
        }
        self.editor.notify(copy.notice);
    }
}

impl<E, D, C> ClipboardInterceptor<E, D, C> {
    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn settings(&self) -> &ClipboardSettings {
        &self.settings
    }

    pub fn flash(&self) -> &FlashManager {
        &self.flash
    }

    /// Cancel pending flash timers
    pub fn shutdown(&self) {
        self.flash.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::flash::FlashState;
    use crate::notice::Notice;
    use crate::command::ReplaceBlocks;
    use clip_content::{Block, BlockType, ClientId};

    const CONTAINER: NodeId = NodeId::new(1);
    const INSIDE: NodeId = NodeId::new(2);
    const OUTSIDE: NodeId = NodeId::new(99);

    #[derive(Default)]
    struct Editor {
        blocks: Vec<Block>,
        selected: Vec<ClientId>,
        log: Vec<String>,
    }

    impl SelectionQuery for Editor {
        fn selected_block_ids(&self) -> Vec<ClientId> {
            self.selected.clone()
        }

        fn has_multi_selection(&self) -> bool {
            self.selected.len() > 1
        }

        fn block_type(&self, client_id: &ClientId) -> Result<BlockType> {
            self.blocks
                .iter()
                .find(|b| b.client_id == *client_id)
                .map(|b| BlockType::new(b.name.clone(), "Separator"))
                .ok_or(Error::BlockNotFound { client_id: *client_id })
        }

        fn blocks_by_ids(&self, client_ids: &[ClientId]) -> Result<Vec<Block>> {
            client_ids
                .iter()
                .map(|id| {
                    self.blocks
                        .iter()
                        .find(|b| b.client_id == *id)
                        .cloned()
                        .ok_or(Error::BlockNotFound { client_id: *id })
                })
                .collect()
        }
    }

    impl EditorSink for Editor {
        fn remove_blocks(&mut self, client_ids: &[ClientId]) {
            self.log.push(format!("remove {}", client_ids.len()));
        }

        fn replace_blocks(&mut self, replace: ReplaceBlocks) {
            self.log.push(format!(
                "replace {} with {}",
                replace.targets.len(),
                replace.blocks.len()
            ));
        }

        fn notify(&mut self, notice: Notice) {
            self.log.push(notice.message);
        }
    }

    struct Document {
        text_selection: bool,
    }

    impl HostDocument for Document {
        fn contains(&self, container: NodeId, target: NodeId) -> bool {
            container == CONTAINER && target != OUTSIDE
        }

        fn has_text_selection(&self) -> bool {
            self.text_selection
        }

        fn has_selection(&self) -> bool {
            self.text_selection
        }
    }

    fn interceptor(count: usize) -> (ClipboardInterceptor<Editor, Document>, Arc<FlashState>) {
        let blocks: Vec<Block> = (0..count).map(|_| Block::new("separator")).collect();
        let editor = Editor {
            selected: blocks.iter().map(|b| b.client_id).collect(),
            blocks,
            log: Vec::new(),
        };
        let state = Arc::new(FlashState::new());
        let interceptor = ClipboardInterceptor::new(
            editor,
            Document { text_selection: false },
            CONTAINER,
            state.clone(),
            ClipboardSettings::default(),
        )
        .unwrap();
        (interceptor, state)
    }

    #[tokio::test]
    async fn test_copy_writes_both_channels_and_flashes() {
        let (mut interceptor, state) = interceptor(1);
        let id = interceptor.editor().selected[0];
        let mut event = ClipboardEvent::copy(INSIDE);

        let outcome = interceptor.on_copy(&mut event).unwrap();

        assert_eq!(outcome, Outcome::Handled(ClipboardEventKind::Copy));
        assert!(event.is_default_prevented());
        assert_eq!(event.clipboard_data().get_data(TEXT_PLAIN), "<!-- block:separator /-->");
        assert_eq!(event.clipboard_data().get_data(TEXT_HTML), "<!-- block:separator /-->");
        assert!(state.is_highlighted(&id));
        assert_eq!(interceptor.flash().pending(), 1);
        assert_eq!(interceptor.editor().log, vec![r#"Copied block "Separator" to clipboard."#]);
    }

    #[tokio::test]
    async fn test_cut_removes_after_notice() {
        let (mut interceptor, state) = interceptor(2);
        let mut event = ClipboardEvent::cut(INSIDE);

        assert!(interceptor.on_cut(&mut event).unwrap().is_handled());
        assert_eq!(
            interceptor.editor().log,
            vec!["Copied 2 blocks to clipboard.", "remove 2"]
        );
        assert!(state.highlighted().is_empty());
        assert_eq!(interceptor.flash().pending(), 0);
    }

    #[tokio::test]
    async fn test_paste_replaces_selection() {
        let (mut interceptor, _) = interceptor(3);
        let mut event =
            ClipboardEvent::paste(INSIDE, ClipboardTransfer::with_content("", "a\n\nb"));

        assert!(interceptor.on_paste(&mut event).unwrap().is_handled());
        assert_eq!(interceptor.editor().log, vec!["replace 3 with 2"]);
    }

    #[tokio::test]
    async fn test_declined_event_is_untouched() {
        let (mut interceptor, _) = interceptor(1);
        interceptor.document_mut().text_selection = true;
        let mut event = ClipboardEvent::copy(INSIDE);

        let outcome = interceptor.on_copy(&mut event).unwrap();

        assert_eq!(outcome, Outcome::Declined(DeclineReason::NativeTextSelection));
        assert!(!event.is_default_prevented());
        assert!(event.clipboard_data().is_empty());
        assert!(interceptor.editor().log.is_empty());
    }

    #[tokio::test]
    async fn test_foreign_target_declined() {
        let (mut interceptor, _) = interceptor(2);
        let mut event = ClipboardEvent::cut(OUTSIDE);
        assert_eq!(
            interceptor.on_cut(&mut event).unwrap(),
            Outcome::Declined(DeclineReason::ForeignTarget)
        );
        assert!(!event.is_default_prevented());
    }

    #[tokio::test]
    async fn test_parse_error_keeps_default_suppressed() {
        let (mut interceptor, _) = interceptor(1);
        let mut event = ClipboardEvent::paste(INSIDE, ClipboardTransfer::new());

        let err = interceptor.on_paste(&mut event).unwrap_err();

        assert!(matches!(err, Error::Content(clip_content::Error::NothingToPaste)));
        assert!(event.is_default_prevented());
        assert!(interceptor.editor().log.is_empty());
    }

    #[tokio::test]
    async fn test_second_handler_does_not_reclaim() {
        let (mut interceptor, _) = interceptor(2);
        let mut event = ClipboardEvent::copy(INSIDE);

        assert!(interceptor.on_copy(&mut event).unwrap().is_handled());
        assert_eq!(
            interceptor.on_copy(&mut event).unwrap(),
            Outcome::Declined(DeclineReason::AlreadyClaimed)
        );
        assert_eq!(interceptor.editor().log.len(), 1);
    }

    #[tokio::test]
    async fn test_host_prevented_default_is_still_handled() {
        let (mut interceptor, _) = interceptor(2);
        let mut event = ClipboardEvent::copy(INSIDE);
        event.prevent_default();

        assert!(interceptor.on_copy(&mut event).unwrap().is_handled());
        assert!(event.is_claimed());
        assert_eq!(interceptor.editor().log.len(), 1);
    }
}
