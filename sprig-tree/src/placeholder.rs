//! Placeholder substitution in path templates.

/// Token replaced with the project name, written `{name}` in a path template.
pub const NAME_PLACEHOLDER: &str = "name";

/// A piece of a parsed path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, copied as-is
    Literal(&'a str),
    /// The `{name}` placeholder
    Name,
}

/// Split a path template into literal text and placeholders.
///
/// On failure returns the offending token: the inside of an unrecognized
/// `{...}`, or the unbalanced remainder for a stray brace.
pub fn parse(template: &str) -> Result<Vec<Segment<'_>>, String> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find(['{', '}']) {
        if rest[open..].starts_with('}') {
            return Err(rest[open..].to_string());
        }
        if open > 0 {
            segments.push(Segment::Literal(&rest[..open]));
        }
        let after = &rest[open + 1..];
        let Some(close) = after.find(['{', '}']).filter(|&i| after[i..].starts_with('}')) else {
            return Err(rest[open..].to_string());
        };
        let token = &after[..close];
        if token.trim() != NAME_PLACEHOLDER {
            return Err(token.to_string());
        }
        segments.push(Segment::Name);
        rest = &after[close + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    Ok(segments)
}

/// Substitute every `{name}` in a template with `name`.
pub fn substitute(template: &str, name: &str) -> Result<String, String> {
    let mut out = String::with_capacity(template.len() + name.len());
    for segment in parse(template)? {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Name => out.push_str(name),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        assert_eq!(
            parse("includes/class-{name}-activator.php").unwrap(),
            vec![
                Segment::Literal("includes/class-"),
                Segment::Name,
                Segment::Literal("-activator.php"),
            ]
        );
        assert_eq!(parse("{name}").unwrap(), vec![Segment::Name]);
        assert_eq!(parse("index.php").unwrap(), vec![Segment::Literal("index.php")]);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_substitute() {
        assert_eq!(
            substitute("public/js/{name}-public.js", "my-plugin").unwrap(),
            "public/js/my-plugin-public.js"
        );
        assert_eq!(substitute("{name}/{name}.php", "x").unwrap(), "x/x.php");
        assert_eq!(substitute("README.txt", "x").unwrap(), "README.txt");
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(substitute("{slug}.php", "x").unwrap_err(), "slug");
        assert_eq!(substitute("{}.php", "x").unwrap_err(), "");
        assert_eq!(substitute("{Name}.php", "x").unwrap_err(), "Name");
    }

    #[test]
    fn test_unbalanced_braces() {
        assert_eq!(substitute("{name.php", "x").unwrap_err(), "{name.php");
        assert_eq!(substitute("name}.php", "x").unwrap_err(), "}.php");
        assert_eq!(substitute("{{name}}.php", "x").unwrap_err(), "{{name}}.php");
    }
}
