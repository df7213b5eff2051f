/// Derive a URL-safe slug from a product name: lowercase, drop punctuation,
/// collapse whitespace and hyphen runs into single hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
        // anything else is punctuation and dropped
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Gold Ring"), "gold-ring");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("22K Gold Necklace!"), "22k-gold-necklace");
        assert_eq!(slugify("Bridal Set (Deluxe)"), "bridal-set-deluxe");
    }

    #[test]
    fn collapses_whitespace_and_hyphen_runs() {
        assert_eq!(slugify("Rose   Gold -- Pendant"), "rose-gold-pendant");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  Silver Anklet  "), "silver-anklet");
        assert_eq!(slugify("- Chain -"), "chain");
    }

    #[test]
    fn keeps_underscores() {
        assert_eq!(slugify("limited_edition Bangle"), "limited_edition-bangle");
    }

    #[test]
    fn empty_input_gives_empty_slug() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
