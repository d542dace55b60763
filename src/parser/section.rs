use super::*;

use tracing::trace;

pub(super) fn parse_document(parser: &mut Parser, default_name: &str) -> Result<Section, ConfigError> {
    if default_name.is_empty() {
        return Err(ConfigError::EmptySectionName);
    }
    let mut root = Section::new(default_name);

    parser.skip_comments()?;
    if !parser.token().is_punct('[') {
        return Err(parser.unexpected("["));
    }

    while *parser.token() != Token::Eof {
        parse_section(parser, &mut root)?;
    }

    Ok(root)
}

/// Parse one `[header]` and the options that follow it, up to the next
/// header or the end of input.
///
/// A header whose first component is the top-level name addresses the
/// top-level section itself; any other first component is resolved from the
/// top level down, creating missing sections along the way.
fn parse_section(parser: &mut Parser, root: &mut Section) -> Result<(), ConfigError> {
    parser.expect_punct('[')?;
    let parts = parse_section_name(parser)?;
    parser.expect_punct(']')?;

    let header = parts.join(".");
    let path = match parts.split_first() {
        Some((first, rest)) if first == root.name() => rest.to_vec(),
        _ => parts,
    };
    if !parser.declared.insert(path.clone()) {
        return Err(ConfigError::DuplicateSection { path: header });
    }

    trace!(section = %header, depth = path.len(), "opening section");
    let section = root.descend_mut(&path);

    loop {
        parser.skip_comments()?;
        match parser.token() {
            Token::Ident(_) => {}
            Token::Punct('[') | Token::Eof => break,
            _ => return Err(parser.unexpected("option's key")),
        }

        let key = parser.expect_ident("option's key")?;
        parser.expect_punct('=')?;
        let value = parser.parse_value()?;

        if section.insert_option(key.clone(), value).is_err() {
            return Err(ConfigError::DuplicateOption {
                option: key,
                section: header,
            });
        }
    }

    Ok(())
}

fn parse_section_name(parser: &mut Parser) -> Result<Vec<String>, ConfigError> {
    let mut parts = vec![parser.expect_ident("identifier")?];

    while parser.token().is_punct('.') {
        parser.bump()?;
        parts.push(parser.expect_ident("identifier")?);
    }

    Ok(parts)
}
