//! Transcript accumulation for one speech session.
//!
//! Engines re-emit overlapping finals, so every final span goes through
//! [`TranscriptState::merge_final`] before it is stored.

use super::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Stored as a new segment.
    Appended,
    /// Replaced stored segment(s) it contains.
    Extended,
    /// Already covered by a stored segment.
    Duplicate,
    Empty,
}

impl MergeOutcome {
    pub fn stored(self) -> bool {
        matches!(self, MergeOutcome::Appended | MergeOutcome::Extended)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptState {
    field: Field,
    final_segments: Vec<String>,
    interim_segment: String,
}

impl TranscriptState {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            final_segments: Vec::new(),
            interim_segment: String::new(),
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn final_segments(&self) -> &[String] {
        &self.final_segments
    }

    pub fn interim_segment(&self) -> &str {
        &self.interim_segment
    }

    /// Merge a final span.
    ///
    /// Invariant: no stored segment is a substring of another. A span
    /// contained in a stored segment is dropped; a span containing stored
    /// segments takes the place of the first one and absorbs the rest.
    pub fn merge_final(&mut self, span: &str) -> MergeOutcome {
        let span = span.trim();
        if span.is_empty() {
            return MergeOutcome::Empty;
        }
        if self.final_segments.iter().any(|s| s.contains(span)) {
            return MergeOutcome::Duplicate;
        }

        match self.final_segments.iter().position(|s| span.contains(s.as_str())) {
            Some(first) => {
                let mut index = 0;
                self.final_segments.retain(|s| {
                    let keep = index == first || !span.contains(s.as_str());
                    index += 1;
                    keep
                });
                // `first` survived the retain and nothing before it was removed
                self.final_segments[first] = span.to_string();
                MergeOutcome::Extended
            }
            None => {
                self.final_segments.push(span.to_string());
                MergeOutcome::Appended
            }
        }
    }

    pub fn set_interim(&mut self, interim: String) {
        self.interim_segment = interim;
    }

    pub fn clear_interim(&mut self) {
        self.interim_segment.clear();
    }

    pub fn has_final(&self) -> bool {
        !self.final_segments.is_empty()
    }

    /// Final segments joined with single spaces.
    pub fn final_text(&self) -> String {
        self.final_segments.join(" ")
    }

    /// What the bound field shows while listening: finals, then the interim tail.
    pub fn display_text(&self) -> String {
        let finals = self.final_text();
        let interim = self.interim_segment.trim();
        match (finals.is_empty(), interim.is_empty()) {
            (_, true) => finals,
            (true, false) => interim.to_string(),
            (false, false) => format!("{} {}", finals, interim),
        }
    }

    pub fn clear(&mut self) {
        self.final_segments.clear();
        self.interim_segment.clear();
    }
}
