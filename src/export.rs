use crate::error::ExportError;
use crate::logging;
use crate::personas;
use crate::session::{ChatMessage, Role};
use chrono::{DateTime, Local};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

// US letter, 0.5in top/bottom margins, 1in sides.
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_TOP_MM: f32 = 12.7;
const MARGIN_BOTTOM_MM: f32 = 12.7;
const MARGIN_SIDE_MM: f32 = 25.4;

const TITLE_SIZE: f32 = 24.0;
const LABEL_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;

const MM_PER_PT: f32 = 0.3528;

/// The logical document structure: same transcript and timestamp always
/// produce the same ordered blocks, independent of the layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    Generated(String),
    Label(String),
    Body(String),
    Footer(String),
}

/// Strip emphasis/heading markup the PDF does not interpret.
pub fn strip_markup(content: &str) -> String {
    content.replace(['*', '#'], "")
}

/// Label for one message: "You" for the user, the persona's display name for
/// a reply, falling back to a generic "AI" when the tag is missing.
fn message_label(message: &ChatMessage) -> String {
    match message.role {
        Role::User => "You".to_string(),
        Role::Assistant => message
            .persona
            .map(|id| personas::get(id).display_name.to_string())
            .unwrap_or_else(|| "AI".to_string()),
    }
}

/// Build the ordered content blocks: title, generation stamp, one labeled
/// block per message in transcript order, closing footer.
pub fn build_story(transcript: &[ChatMessage], generated_at: &str) -> Vec<Block> {
    let mut story = Vec::with_capacity(transcript.len() * 2 + 3);

    story.push(Block::Title("HeartMend AI Conversation".to_string()));
    story.push(Block::Generated(format!("Generated on: {}", generated_at)));

    for message in transcript {
        story.push(Block::Label(format!("{}:", message_label(message))));
        story.push(Block::Body(strip_markup(&message.content)));
    }

    story.push(Block::Footer("Made with love by HeartMend AI".to_string()));
    story
}

/// Greedy word wrap to a character budget. Words longer than the budget are
/// hard-split so a pasted URL cannot push past the margin. Counts and splits
/// in chars, never bytes - message content is arbitrary UTF-8.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.split('\n') {
        let mut current = String::new();
        let mut current_chars = 0;
        for word in source_line.split_whitespace() {
            let word_chars = word.chars().count();
            if current_chars == 0 && word_chars <= max_chars {
                current.push_str(word);
                current_chars = word_chars;
            } else if current_chars + 1 + word_chars <= max_chars {
                current.push(' ');
                current.push_str(word);
                current_chars += 1 + word_chars;
            } else {
                if current_chars > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_chars = 0;
                }
                for ch in word.chars() {
                    if current_chars == max_chars {
                        lines.push(std::mem::take(&mut current));
                        current_chars = 0;
                    }
                    current.push(ch);
                    current_chars += 1;
                }
            }
        }
        lines.push(std::mem::take(&mut current));
    }
    lines
}

fn chars_per_line(font_size: f32) -> usize {
    let usable_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_SIDE_MM;
    let avg_char_mm = font_size * 0.5 * MM_PER_PT;
    (usable_mm / avg_char_mm) as usize
}

fn line_height_mm(font_size: f32) -> f32 {
    font_size * MM_PER_PT * 1.4
}

struct PageWriter {
    doc: printpdf::PdfDocumentReference,
    layer: PdfLayerReference,
    cursor_mm: f32,
}

impl PageWriter {
    fn new(doc: printpdf::PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_TOP_MM,
        }
    }

    fn write_line(&mut self, line: &str, font_size: f32, font: &IndirectFontRef) {
        let height = line_height_mm(font_size);
        if self.cursor_mm - height < MARGIN_BOTTOM_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_TOP_MM;
        }
        self.cursor_mm -= height;
        if !line.is_empty() {
            self.layer
                .use_text(line, font_size, Mm(MARGIN_SIDE_MM), Mm(self.cursor_mm), font);
        }
    }

    fn write_block(&mut self, text: &str, font_size: f32, font: &IndirectFontRef) {
        for line in wrap(text, chars_per_line(font_size)) {
            self.write_line(&line, font_size, font);
        }
    }

    fn spacer(&mut self, mm: f32) {
        self.cursor_mm -= mm;
    }
}

/// Lay the story out into PDF bytes. Fails only if the layout engine itself
/// fails - never because of message content.
pub fn render(story: &[Block]) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        "HeartMend AI Conversation",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut writer = PageWriter::new(doc, layer);

    for block in story {
        match block {
            Block::Title(text) => {
                writer.write_block(text, TITLE_SIZE, &bold);
                writer.spacer(4.0);
            }
            Block::Generated(text) => {
                writer.write_block(text, BODY_SIZE, &regular);
                writer.spacer(7.6);
            }
            Block::Label(text) => {
                writer.write_block(text, LABEL_SIZE, &bold);
            }
            Block::Body(text) => {
                writer.write_block(text, BODY_SIZE, &regular);
                writer.spacer(5.1);
            }
            Block::Footer(text) => {
                writer.spacer(7.6);
                writer.write_block(text, BODY_SIZE, &regular);
            }
        }
    }

    Ok(writer.doc.save_to_bytes()?)
}

/// Render the transcript as a downloadable PDF artifact.
pub fn export(transcript: &[ChatMessage], generated_at: &str) -> Result<Vec<u8>, ExportError> {
    let story = build_story(transcript, generated_at);
    let bytes = render(&story)?;
    logging::log_export(&format!(
        "Exported {} messages ({} bytes)",
        transcript.len(),
        bytes.len()
    ));
    Ok(bytes)
}

/// Download name: `heartmend_chat_<YYYYMMDD_HHMM>.pdf`.
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("heartmend_chat_{}.pdf", now.format("%Y%m%d_%H%M"))
}
