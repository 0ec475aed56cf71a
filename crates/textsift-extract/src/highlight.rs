//! Entity highlighting for the search view
//!
//! Wraps every extracted entity span in an HTML `<span>` carrying the
//! entity label as a CSS class. Spans are applied by byte offset; where
//! two candidate spans overlap, the longer one wins so a shorter entity
//! nested inside a longer one does not split it. The input text is
//! HTML-escaped on the way out, inside and outside the spans.

use textsift_core::{Entity, Result};

use crate::EntityExtractor;

/// Extract entities from `text` and return the highlighted HTML
/// alongside the entities themselves.
pub fn highlight_entities(
    text: &str,
    extractor: &dyn EntityExtractor,
) -> Result<(String, Vec<Entity>)> {
    let entities = extractor.extract(text)?;
    let html = apply_highlights(text, &entities);
    Ok((html, entities))
}

/// Wrap entity spans in highlight markup, longest span winning overlaps
pub fn apply_highlights(text: &str, entities: &[Entity]) -> String {
    // longer spans first so they claim their range before nested ones
    let mut candidates: Vec<&Entity> = entities
        .iter()
        .filter(|e| e.start < e.end && e.end <= text.len())
        .filter(|e| text.is_char_boundary(e.start) && text.is_char_boundary(e.end))
        .collect();
    candidates.sort_by(|a, b| (b.end - b.start).cmp(&(a.end - a.start)).then(a.start.cmp(&b.start)));

    let mut selected: Vec<&Entity> = Vec::new();
    for entity in candidates {
        let overlaps = selected
            .iter()
            .any(|s| entity.start < s.end && s.start < entity.end);
        if !overlaps {
            selected.push(entity);
        }
    }
    selected.sort_by_key(|e| e.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for entity in selected {
        out.push_str(&escape_html(&text[cursor..entity.start]));
        out.push_str(&format!(
            "<span class=\"highlight {}\">{}</span>",
            entity.label.as_str().to_lowercase(),
            escape_html(&text[entity.start..entity.end])
        ));
        cursor = entity.end;
    }
    out.push_str(&escape_html(&text[cursor..]));
    out
}

/// Escape text for inclusion in the highlight markup
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsift_core::EntityLabel;

    fn entity_at(text: &str, span: &str, label: EntityLabel) -> Entity {
        let start = text.find(span).unwrap();
        Entity::new(span, label, start, start + span.len(), 0.9)
    }

    #[test]
    fn test_wraps_matches_in_spans() {
        let text = "Vendor 1 admitted the claim";
        let out = apply_highlights(
            text,
            &[entity_at(text, "Vendor 1", EntityLabel::Organization)],
        );
        assert_eq!(
            out,
            "<span class=\"highlight org\">Vendor 1</span> admitted the claim"
        );
    }

    #[test]
    fn test_every_occurrence_gets_its_own_span() {
        let text = "Vendor 1 met Vendor 2";
        let out = apply_highlights(
            text,
            &[
                entity_at(text, "Vendor 1", EntityLabel::Organization),
                entity_at(text, "Vendor 2", EntityLabel::Organization),
            ],
        );
        assert_eq!(out.matches("<span").count(), 2);
    }

    #[test]
    fn test_longer_span_wins_overlap() {
        let text = "Pristina Airport Authority";
        let out = apply_highlights(
            text,
            &[
                entity_at(text, "Airport", EntityLabel::Location),
                entity_at(text, "Pristina Airport Authority", EntityLabel::Organization),
            ],
        );

        assert_eq!(
            out,
            "<span class=\"highlight org\">Pristina Airport Authority</span>"
        );
    }

    #[test]
    fn test_out_of_range_spans_ignored() {
        let text = "short";
        let out = apply_highlights(
            text,
            &[Entity::new("ghost", EntityLabel::Unknown, 2, 40, 0.5)],
        );
        assert_eq!(out, "short");
    }

    #[test]
    fn test_no_entities_leaves_text_untouched() {
        let out = apply_highlights("nothing to see", &[]);
        assert_eq!(out, "nothing to see");
    }

    #[test]
    fn test_markup_in_input_is_escaped() {
        let text = "<b>Vendor 1</b> & co";
        let out = apply_highlights(
            text,
            &[entity_at(text, "Vendor 1", EntityLabel::Organization)],
        );
        assert_eq!(
            out,
            "&lt;b&gt;<span class=\"highlight org\">Vendor 1</span>&lt;/b&gt; &amp; co"
        );
    }

    #[test]
    fn test_markup_inside_span_is_escaped() {
        let text = "see <script> now";
        let out = apply_highlights(
            text,
            &[entity_at(text, "<script>", EntityLabel::Unknown)],
        );
        assert_eq!(
            out,
            "see <span class=\"highlight unknown\">&lt;script&gt;</span> now"
        );
    }
}
