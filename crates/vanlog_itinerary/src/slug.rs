/// Strips the accent of a lowercase latin letter, `None` for letters without
/// a plain base.
fn fold_accent(c: char) -> Option<char> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None,
    };

    Some(folded)
}

/// Identifier derived from a display name: lowercase ascii letters, digits
/// and dashes, accents folded and whitespace runs turned into a dash.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        let c = fold_accent(c).unwrap_or(c);
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    slug
}

/// `slugify(name)`, suffixed `-1`, `-2`, ... until `taken` rejects it.
pub fn unique_slug<F>(name: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut base = slugify(name);
    if base.is_empty() {
        base = String::from("stop");
    }

    let mut candidate = base.clone();
    let mut suffix = 1;
    while taken(&candidate) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Paris"), "paris");
        assert_eq!(slugify("Saint-Émilion"), "saint-emilion");
        assert_eq!(slugify("Aix  en Provence"), "aix-en-provence");
        assert_eq!(slugify("L'Isle-sur-la-Sorgue"), "lisle-sur-la-sorgue");
        assert_eq!(slugify("Besançon 2"), "besancon-2");
    }

    #[test]
    fn test_unique_slug() {
        let existing = ["paris", "paris-1"];
        let slug = unique_slug("Paris", |candidate| existing.contains(&candidate));

        assert_eq!(slug, "paris-2");
        assert_eq!(unique_slug("Lyon", |_| false), "lyon");
        assert_eq!(unique_slug("東京", |_| false), "stop");
    }
}
