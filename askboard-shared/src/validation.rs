/// Custom field validators used by the input structs
///
/// The `validator` derive covers lengths; these functions cover the rules
/// it has no built-in for (blank detection, username alphabet, tag shape).

use validator::ValidationError;

use crate::models::question::MAX_TAGS;

/// Maximum length of a single tag
pub const MAX_TAG_LEN: usize = 32;

/// Rejects strings that are empty or whitespace only
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Allows ASCII letters, digits and underscores
pub fn username_chars(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_chars");
        err.message = Some("Username may only contain letters, digits and underscores".into());
        Err(err)
    }
}

/// Every tag must be non-blank, at most `MAX_TAG_LEN` characters and free of
/// whitespace; at most `MAX_TAGS` remain once duplicates are folded
pub fn tag_shape(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty()
            || tag.chars().count() > MAX_TAG_LEN
            || tag.chars().any(char::is_whitespace)
        {
            let mut err = ValidationError::new("tag_shape");
            err.message = Some(
                format!("Tags must be 1-{} characters without spaces", MAX_TAG_LEN).into(),
            );
            return Err(err);
        }
    }
    if normalize_tags(tags).len() > MAX_TAGS {
        let mut err = ValidationError::new("too_many_tags");
        err.message = Some(format!("At most {} tags are allowed", MAX_TAGS).into());
        return Err(err);
    }

    Ok(())
}

/// Trims, lower-cases and de-duplicates tags, keeping first-seen order
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
