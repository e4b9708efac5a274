//! Question selection: pick the attribute that splits the candidates most evenly
//!
//! Score is `min(yes_count, no_count)`, which bounds the worst-case number of
//! objects left after the answer. Attributes every candidate agrees on are
//! never chosen. Ties go to the attribute listed first.

use twenty_engine::Record;

/// One candidate object: name and attribute values
pub type Entry<'d> = (&'d str, &'d Record);

/// Split score for `attribute`, or None if it does not discriminate.
pub fn split_score(objects: &[Entry<'_>], attribute: &str) -> Option<usize> {
    let yes_count = objects
        .iter()
        .filter(|(_, record)| record.value(attribute))
        .count();
    let no_count = objects.len() - yes_count;
    if yes_count == 0 || no_count == 0 {
        return None;
    }
    Some(yes_count.min(no_count))
}

/// Best discriminating attribute for `objects`, or None if none discriminates.
pub fn select_attribute<'a, S: AsRef<str>>(
    objects: &[Entry<'_>],
    attributes: &'a [S],
) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for attribute in attributes {
        let attribute = attribute.as_ref();
        let Some(score) = split_score(objects, attribute) else {
            continue;
        };
        // Strictly greater: the first attribute with the top score keeps it.
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((attribute, score));
        }
    }
    best.map(|(attribute, _)| attribute)
}
