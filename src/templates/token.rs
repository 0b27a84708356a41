//! Template-token string grammar.
//!
//! Token strings come in three shapes:
//! - single-character separators: `.`, `_`, `-`
//! - initials: `f_N`, `m_N`, `l_N` (N a non-negative decimal index)
//! - full components: `first_<flags…>_N`, `middle_<flags…>_N`,
//!   `last_<flags…>_N`, with flag segments drawn from
//!   `{original, nfkd, translit, nickname, surp}` in any order.

use super::error::{TemplateLoadError, TemplateLoadResult};
use super::types::{NameGroup, TemplateToken, TokenFlags};

/// Parses a full token sequence, failing on the first malformed token.
pub fn parse_token_sequence(tokens: &[String]) -> TemplateLoadResult<Vec<TemplateToken>> {
    tokens.iter().map(|t| parse_token(t)).collect()
}

/// Parses a single token string.
pub fn parse_token(token: &str) -> TemplateLoadResult<TemplateToken> {
    if matches!(token, "." | "_" | "-") {
        return Ok(TemplateToken::Separator(token.to_string()));
    }

    let parts: Vec<&str> = token.split('_').filter(|p| !p.is_empty()).collect();
    if parts.len() < 2 {
        return Err(invalid(token, "expected '<group>[_<flags…>]_<index>'"));
    }

    // Index is always the final segment.
    let index = parts[parts.len() - 1]
        .parse::<usize>()
        .map_err(|_| invalid(token, "index segment is not a non-negative integer"))?;

    let (group, use_initial) = match parts[0] {
        "f" => (NameGroup::First, true),
        "m" => (NameGroup::Middle, true),
        "l" => (NameGroup::Last, true),
        "first" => (NameGroup::First, false),
        "middle" => (NameGroup::Middle, false),
        "last" => (NameGroup::Last, false),
        other => return Err(invalid(token, &format!("unknown name group '{other}'"))),
    };

    let mut flags = TokenFlags {
        use_initial,
        ..TokenFlags::default()
    };

    for flag in &parts[1..parts.len() - 1] {
        match *flag {
            "original" => flags.use_original = true,
            "nfkd" => flags.use_nfkd = true,
            "translit" => flags.use_translit = true,
            "nickname" => flags.use_nickname = true,
            "surp" => flags.use_surname_particle = true,
            other => {
                return Err(invalid(token, &format!("unknown normalisation flag '{other}'")));
            }
        }
    }

    Ok(TemplateToken::Component {
        group,
        index,
        flags,
    })
}

fn invalid(token: &str, reason: &str) -> TemplateLoadError {
    TemplateLoadError::InvalidToken {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}
