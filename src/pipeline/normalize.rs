//! Isolates the JSON payload candidate from a raw completion.
//!
//! Models wrap JSON answers in conversational text and fenced code blocks.
//! Policy, in order: a ```json-tagged fence wins, then the first untagged
//! fence, then the trimmed full text. This step is purely textual — no JSON
//! validation happens here.

const TAGGED_FENCE: &str = "```json";
const BARE_FENCE: &str = "```";

/// An opening fence marker, with the byte offset where content starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceOpen {
    Tagged(usize),
    Bare(usize),
}

fn find_opening_fence(text: &str) -> Option<FenceOpen> {
    if let Some(at) = text.find(TAGGED_FENCE) {
        return Some(FenceOpen::Tagged(at + TAGGED_FENCE.len()));
    }
    text.find(BARE_FENCE)
        .map(|at| FenceOpen::Bare(at + BARE_FENCE.len()))
}

/// Extract the substring most likely to be a JSON document.
///
/// Text with no fence markers comes back trimmed and otherwise unchanged.
/// An opening fence with no matching close extends to the end of the text.
/// When multiple fenced blocks exist, the first match wins.
pub fn isolate_json(raw: &str) -> &str {
    let text = raw.trim();

    let content_start = match find_opening_fence(text) {
        None => return text,
        Some(FenceOpen::Tagged(start)) | Some(FenceOpen::Bare(start)) => start,
    };

    let content_end = text[content_start..]
        .find(BARE_FENCE)
        .map_or(text.len(), |at| content_start + at);

    text[content_start..content_end].trim()
}
